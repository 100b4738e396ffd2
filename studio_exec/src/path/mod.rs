//! # Path module
//!
//! The path being authored: an ordered list of waypoints in field inches, the velocity of every
//! segment between consecutive waypoints, and in-place turns bound to waypoints.
//!
//! The [`PathModel`] is the only owner of this data. Every mutation goes through one of its
//! methods, which keep the following true after each call:
//!
//! - there is exactly one velocity per segment, i.e. `velocities.len() == waypoints.len() - 1`
//!   (or zero for an empty path),
//! - every turn refers to an existing waypoint,
//! - turns are sorted by waypoint index and there is at most one turn per waypoint.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod describe;
mod model;
mod turn;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use describe::fmt_num;
pub use model::*;
pub use turn::Turn;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Velocity given to new segments when none is specified.
///
/// Units: inches/second
pub const DEFAULT_VELOCITY_IPS: f64 = 48.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while editing a path.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PathError {
    #[error("Invalid path state: {0}")]
    InvalidState(String),

    #[error("Index {index} is out of range (length is {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Waypoint {0} already has a turn")]
    DuplicateTurn(usize),

    #[error("Waypoint {0} has no turn")]
    NoTurnAt(usize),
}
