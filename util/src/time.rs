//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Convert a number of frames per second into the period of one frame.
///
/// Rates that are not finite and positive have no period and give `None`.
pub fn frame_period(frames_per_second: f64) -> Option<std::time::Duration> {
    if frames_per_second.is_finite() && frames_per_second > 0.0 {
        Some(std::time::Duration::from_secs_f64(1.0 / frames_per_second))
    }
    else {
        None
    }
}
