//! Rigid robot body

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::{CornerOffsets, NUM_CORNERS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Physical size of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotParams {
    /// Side to side size of the robot.
    ///
    /// Units: inches
    pub width_in: f64,

    /// Front to back size of the robot.
    ///
    /// Units: inches
    pub length_in: f64,
}

/// The robot's footprint, a rectangle centred on the body origin.
///
/// Corners are stored in body-local canvas units, starting at bottom-right and going clockwise:
/// bottom-right, bottom-left, top-left, top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotBody {
    params: RobotParams,
    corners: CornerOffsets,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("Robot dimensions must be finite and positive, got {width_in} x {length_in} in")]
    InvalidRobotDimensions { width_in: f64, length_in: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            width_in: 18.0,
            length_in: 18.0,
        }
    }
}

impl RobotBody {
    /// Build the body from its physical size and the canvas scale.
    pub fn new(params: RobotParams, pixels_per_inch: f64) -> Result<Self, BodyError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;

        if !valid(params.width_in) || !valid(params.length_in) || !valid(pixels_per_inch) {
            return Err(BodyError::InvalidRobotDimensions {
                width_in: params.width_in,
                length_in: params.length_in,
            });
        }

        let half_w = params.width_in * pixels_per_inch / 2.0;
        let half_l = params.length_in * pixels_per_inch / 2.0;

        Ok(Self {
            params,
            corners: [
                Vector2::new(half_w, -half_l),
                Vector2::new(-half_w, -half_l),
                Vector2::new(-half_w, half_l),
                Vector2::new(half_w, half_l),
            ],
        })
    }

    /// The body-local corners.
    pub fn corners(&self) -> &CornerOffsets {
        &self.corners
    }

    /// The physical size this body was built from.
    pub fn params(&self) -> &RobotParams {
        &self.params
    }

    /// Place the body at a position using the given corner offsets.
    pub fn place(position: &Vector2<f64>, offsets: &CornerOffsets) -> CornerOffsets {
        let mut placed = [Vector2::zeros(); NUM_CORNERS];

        for (p, o) in placed.iter_mut().zip(offsets.iter()) {
            *p = position + o;
        }

        placed
    }
}
