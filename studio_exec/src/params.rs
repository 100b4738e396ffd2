//! # Studio Executable Parameters
//!
//! This module provides parameters for the studio executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use crate::coord::Canvas;
use crate::export::ExportParams;
use crate::kinematics::RobotParams;
use crate::sim::SimParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// All parameters of the studio, normally loaded from `params/studio.toml`.
///
/// Any section (or field) missing from the file takes its default value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StudioParams {
    /// Scale of the field canvas
    pub field: Canvas,

    /// Size of the robot
    pub robot: RobotParams,

    /// Playback settings
    pub sim: SimParams,

    /// Names used in exported source
    pub export: ExportParams,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_file() {
        let p: StudioParams = util::params::from_str(
            r#"
            [field]
            pixels_per_inch = 4.0
            field_size_in = 144.0

            [sim]
            turn_rate_dps = 90.0

            [export]
            class_name = "RedRight"
            "#,
        )
        .unwrap();

        assert_eq!(p.field.pixels_per_inch, 4.0);
        assert_eq!(p.robot, RobotParams::default());
        assert_eq!(p.sim.turn_rate_dps, 90.0);
        assert_eq!(p.sim.frames_per_second, 60.0);
        assert_eq!(p.export.class_name, "RedRight");
        assert_eq!(p.export.package, "org.firstinspires.ftc.teamcode");
    }

    #[test]
    fn test_shipped_params_parse() {
        let text = include_str!("../../params/studio.toml");
        let p: StudioParams = util::params::from_str(text).unwrap();
        assert_eq!(p, StudioParams::default());
    }
}
