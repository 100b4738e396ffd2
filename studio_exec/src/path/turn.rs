//! Turn annotations

use serde::{Deserialize, Serialize};

/// An in-place rotation performed after arriving at a waypoint and before leaving it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Index of the waypoint the turn is bound to.
    pub waypoint_index: usize,

    /// The heading to turn to, 0 being "up" and positive clockwise.
    ///
    /// Units: degrees
    pub angle_deg: f64,
}

impl Turn {
    pub fn new(waypoint_index: usize, angle_deg: f64) -> Self {
        Self {
            waypoint_index,
            angle_deg,
        }
    }
}
