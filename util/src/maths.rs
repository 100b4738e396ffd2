//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Round a value to the given number of decimal places.
pub fn round_dp<T>(value: T, decimal_places: i32) -> T
where
    T: Float,
{
    // Every float type can represent 10
    let scale = match T::from(10) {
        Some(ten) => ten.powi(decimal_places),
        None => return value,
    };

    (value * scale).round() / scale
}

/// Get the sign of a value as -1, 0 or +1.
///
/// Unlike `Float::signum` a zero value (of either sign) gives zero.
pub fn sign<T>(value: T) -> T
where
    T: Float,
{
    if value > T::zero() {
        T::one()
    }
    else if value < T::zero() {
        -T::one()
    }
    else {
        T::zero()
    }
}

/// Replace negative zero with positive zero, leaving all other values alone.
pub fn normalise_zero<T>(value: T) -> T
where
    T: Float,
{
    if value == T::zero() {
        T::zero()
    }
    else {
        value
    }
}
