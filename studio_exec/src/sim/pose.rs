//! Robot pose snapshots

use nalgebra::Vector2;
use serde::Serialize;

use crate::kinematics::CornerOffsets;

/// What the robot is doing in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Rotating,
    Translating,
}

/// The robot's pose in a single frame, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RobotPose {
    /// Position of the body origin.
    ///
    /// Units: pixels
    pub position_px: Vector2<f64>,

    /// Heading of the robot, 0 being "up" and positive clockwise.
    ///
    /// Units: degrees
    pub orientation_deg: f64,

    /// The body corners, bottom-right first.
    ///
    /// Units: pixels
    pub corners_px: CornerOffsets,

    pub phase: Phase,

    /// Index of the segment being played, 0 for the segment leaving the start point.
    pub segment: usize,

    /// Frame number from the start of the playback, starting at 0.
    pub frame: usize,
}
