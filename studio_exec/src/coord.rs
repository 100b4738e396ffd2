//! # Coordinate mapping
//!
//! The path model works in field inches with the origin at the centre of the field. Front ends
//! draw onto a square canvas whose origin is a corner, so every point crossing that boundary goes
//! through the functions here.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use util::maths::round_dp;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Default canvas scale.
pub const DEFAULT_PIXELS_PER_INCH: f64 = 5.0;

/// Default field side length, a standard 12 ft field.
pub const DEFAULT_FIELD_SIZE_IN: f64 = 144.0;

/// Number of decimal places kept when converting to inches.
const INCHES_DP: i32 = 2;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The pixel view of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    /// Scale of the canvas.
    ///
    /// Units: pixels/inch
    pub pixels_per_inch: f64,

    /// Side length of the (square) field.
    ///
    /// Units: inches
    pub field_size_in: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Canvas {
    fn default() -> Self {
        Self {
            pixels_per_inch: DEFAULT_PIXELS_PER_INCH,
            field_size_in: DEFAULT_FIELD_SIZE_IN,
        }
    }
}

impl Canvas {
    /// Side length of the canvas in pixels.
    pub fn field_size_px(&self) -> f64 {
        self.field_size_in * self.pixels_per_inch
    }

    /// Convert a field point into canvas pixels.
    pub fn to_pixels(&self, point_in: &Vector2<f64>) -> Vector2<f64> {
        to_pixels(point_in, self.pixels_per_inch, self.field_size_px())
    }

    /// Convert a canvas point into field inches, rounded to 0.01 in.
    pub fn to_inches(&self, point_px: &Vector2<f64>) -> Vector2<f64> {
        to_inches(point_px, self.pixels_per_inch, self.field_size_in)
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Convert a point in field inches to canvas pixels.
pub fn to_pixels(
    point_in: &Vector2<f64>,
    pixels_per_inch: f64,
    field_size_px: f64,
) -> Vector2<f64> {
    point_in.map(|v| v * pixels_per_inch + field_size_px / 2.0)
}

/// Convert a point in canvas pixels to field inches.
///
/// The result is rounded to 2 decimal places so that values shown to the user don't carry
/// floating point noise.
pub fn to_inches(
    point_px: &Vector2<f64>,
    pixels_per_inch: f64,
    field_size_in: f64,
) -> Vector2<f64> {
    point_px.map(|v| round_dp(v / pixels_per_inch - field_size_in / 2.0, INCHES_DP))
}
