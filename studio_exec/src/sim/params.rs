//! Parameters structure for the simulation player

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::kinematics::DEFAULT_FRAMES_PER_SECOND;
use crate::path::DEFAULT_VELOCITY_IPS;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulation player.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Animation rate of the playback.
    ///
    /// Units: frames/second
    pub frames_per_second: f64,

    /// Rate at which the robot performs point turns.
    ///
    /// Units: degrees/second
    pub turn_rate_dps: f64,

    /// Velocity given to new segments and to segments loaded from a save file.
    ///
    /// Units: inches/second
    pub default_velocity_ips: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            turn_rate_dps: 45.0,
            default_velocity_ips: DEFAULT_VELOCITY_IPS,
        }
    }
}
