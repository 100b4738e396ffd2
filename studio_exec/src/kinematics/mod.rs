//! # Kinematics module
//!
//! Constant-velocity straight-line motion and constant-rate point turns of the robot body,
//! quantised into animation frames.
//!
//! All functions here work in whatever planar units the caller supplies. The simulation player
//! uses canvas pixels, which is why translation takes a pixels/inch scale.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod body;
mod calc_rotation;
mod calc_translation;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use body::*;
pub use calc_rotation::*;
pub use calc_translation::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of corners of the robot body.
pub const NUM_CORNERS: usize = 4;

/// Default animation rate.
///
/// Units: frames/second
pub const DEFAULT_FRAMES_PER_SECOND: f64 = 60.0;

// ---------------------------------------------------------------------------
// TYPES
// ---------------------------------------------------------------------------

/// Offsets of each body corner from the body origin for one frame.
pub type CornerOffsets = [nalgebra::Vector2<f64>; NUM_CORNERS];
