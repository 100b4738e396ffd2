//! # Simulation player
//!
//! Replays a path as a sequence of [`RobotPose`]s, one per animation frame. The player works on
//! a snapshot of the path taken when it is created, so the path can keep being edited while a
//! playback is running.
//!
//! The player is a small state machine:
//!
//! ```text
//! Idle -> Rotating -> Translating -> (Rotating | Translating | Done)
//! ```
//!
//! Each segment starts by snapping the robot to the segment's first waypoint, performs the turn
//! bound to that waypoint (if any) and then drives to the next waypoint. Frames can be pulled one
//! at a time with [`SimPlayer::step`] (or by iterating) or played back in real time with
//! [`SimPlayer::run`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod archive;
mod params;
mod pose;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use archive::PoseArchiver;
pub use params::SimParams;
pub use pose::{Phase, RobotPose};
pub use state::{Pacing, PlaybackReport, PlayerState, SimPlayer};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that prevent a playback from being set up.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    #[error("Cannot simulate a path with {0} waypoint(s), at least 2 are needed")]
    EmptyPath(usize),

    #[error("Frame rate must be finite and positive, got {0} frames/second")]
    InvalidFrameRate(f64),

    #[error("Turn rate must be finite and positive, got {0} degrees/second")]
    InvalidTurnRate(f64),
}
