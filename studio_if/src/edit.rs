//! # Path editing commands
//!
//! Every edit an operator can make to a path is one variant of [`EditCmd`]. Front ends build
//! these from their own input events and hand them to the studio's edit processor, which is the
//! only place the path model is mutated from.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The names of all recognised commands, as they appear in the `"cmd"` field.
pub const CMD_NAMES: [&str; 11] = [
    "set_start",
    "set_start_heading",
    "append_waypoint",
    "remove_waypoint",
    "set_waypoint",
    "set_velocity",
    "add_turn",
    "remove_turn",
    "set_turn_angle",
    "round_all",
    "clear",
];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An edit to be applied to the path model.
///
/// All coordinates are in field inches, all angles in degrees with 0 being "up" and positive
/// angles turning clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum EditCmd {
    /// Place (or move) the start point and set the starting heading.
    SetStart {
        x_in: f64,
        y_in: f64,
        #[serde(default)]
        heading_deg: f64,
    },

    /// Change only the starting heading.
    SetStartHeading { heading_deg: f64 },

    /// Add a waypoint at the end of the path.
    ///
    /// If no velocity is given the model's default velocity is used for the new segment.
    AppendWaypoint {
        x_in: f64,
        y_in: f64,
        #[serde(default)]
        velocity_ips: Option<f64>,
    },

    /// Delete the waypoint at the given index.
    RemoveWaypoint { index: usize },

    /// Move an existing waypoint.
    SetWaypoint { index: usize, x_in: f64, y_in: f64 },

    /// Change the velocity of a segment, indexed from 0 for the segment leaving the start point.
    SetVelocity { segment: usize, velocity_ips: f64 },

    /// Bind a turn to a waypoint.
    AddTurn { index: usize, angle_deg: f64 },

    /// Remove the turn bound to a waypoint, if there is one.
    RemoveTurn { index: usize },

    /// Change the angle of the turn bound to a waypoint.
    SetTurnAngle { index: usize, angle_deg: f64 },

    /// Snap every waypoint to the nearest whole inch.
    RoundAll,

    /// Remove every waypoint and turn.
    Clear,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum EditParseError {
    #[error("Edit command contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Edit command has an invalid type ({0})")]
    InvalidType(String),

    #[error("Edit command `{0}` has invalid arguments: {1}")]
    InvalidArgs(String, serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EditCmd {
    /// Parse a new command from a JSON object such as
    /// `{"cmd": "append_waypoint", "x_in": 10, "y_in": 20}`.
    pub fn from_json(json_str: &str) -> Result<Self, EditParseError> {
        let val: Value = serde_json::from_str(json_str).map_err(EditParseError::InvalidJson)?;

        let name = match val["cmd"].as_str() {
            Some(s) => s.to_string(),
            None => {
                return Err(EditParseError::InvalidType(String::from(
                    "Expected \"cmd\" to be a string",
                )))
            }
        };

        if !CMD_NAMES.contains(&name.as_str()) {
            return Err(EditParseError::InvalidType(format!(
                "{} is not a recognised edit command",
                name
            )));
        }

        serde_json::from_value(val).map_err(|e| EditParseError::InvalidArgs(name, e))
    }

    /// Serialise this command to a single line of JSON.
    pub fn to_json(&self) -> String {
        // A plain data enum with string keys always serialises
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Get the name of this command, as used in the `"cmd"` field.
    pub fn name(&self) -> &'static str {
        match self {
            EditCmd::SetStart { .. } => CMD_NAMES[0],
            EditCmd::SetStartHeading { .. } => CMD_NAMES[1],
            EditCmd::AppendWaypoint { .. } => CMD_NAMES[2],
            EditCmd::RemoveWaypoint { .. } => CMD_NAMES[3],
            EditCmd::SetWaypoint { .. } => CMD_NAMES[4],
            EditCmd::SetVelocity { .. } => CMD_NAMES[5],
            EditCmd::AddTurn { .. } => CMD_NAMES[6],
            EditCmd::RemoveTurn { .. } => CMD_NAMES[7],
            EditCmd::SetTurnAngle { .. } => CMD_NAMES[8],
            EditCmd::RoundAll => CMD_NAMES[9],
            EditCmd::Clear => CMD_NAMES[10],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_append() {
        let cmd = EditCmd::from_json(r#"{"cmd": "append_waypoint", "x_in": 10, "y_in": -20.5}"#)
            .unwrap();

        assert_eq!(
            cmd,
            EditCmd::AppendWaypoint {
                x_in: 10.0,
                y_in: -20.5,
                velocity_ips: None
            }
        );
    }

    #[test]
    fn test_parse_unit_variant() {
        assert_eq!(
            EditCmd::from_json(r#"{"cmd": "round_all"}"#).unwrap(),
            EditCmd::RoundAll
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            EditCmd::from_json("{not json"),
            Err(EditParseError::InvalidJson(_))
        ));
        assert!(matches!(
            EditCmd::from_json(r#"{"x_in": 1}"#),
            Err(EditParseError::InvalidType(_))
        ));
        assert!(matches!(
            EditCmd::from_json(r#"{"cmd": "teleport"}"#),
            Err(EditParseError::InvalidType(_))
        ));
        assert!(matches!(
            EditCmd::from_json(r#"{"cmd": "add_turn", "index": 1}"#),
            Err(EditParseError::InvalidArgs(_, _))
        ));
    }

    #[test]
    fn test_names_match_serde_tags() {
        let cmds = vec![
            EditCmd::SetStart {
                x_in: 0.0,
                y_in: 0.0,
                heading_deg: 0.0,
            },
            EditCmd::SetStartHeading { heading_deg: 90.0 },
            EditCmd::AppendWaypoint {
                x_in: 1.0,
                y_in: 2.0,
                velocity_ips: Some(30.0),
            },
            EditCmd::RemoveWaypoint { index: 1 },
            EditCmd::SetWaypoint {
                index: 1,
                x_in: 3.0,
                y_in: 4.0,
            },
            EditCmd::SetVelocity {
                segment: 0,
                velocity_ips: 12.0,
            },
            EditCmd::AddTurn {
                index: 1,
                angle_deg: 45.0,
            },
            EditCmd::RemoveTurn { index: 1 },
            EditCmd::SetTurnAngle {
                index: 1,
                angle_deg: -45.0,
            },
            EditCmd::RoundAll,
            EditCmd::Clear,
        ];

        for cmd in cmds {
            let json = cmd.to_json();
            assert!(json.contains(&format!("\"cmd\":\"{}\"", cmd.name())), "{}", json);
            assert_eq!(EditCmd::from_json(&json).unwrap(), cmd);
        }
    }
}
