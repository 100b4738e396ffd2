//! # Edit processor module
//!
//! The edit processor applies edit commands from any front end to the path model.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector2;

// Internal
use crate::path::{PathError, PathModel};
use studio_if::edit::EditCmd;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute an edit command.
///
/// The model is left unchanged if the edit is rejected.
pub fn exec(model: &mut PathModel, cmd: &EditCmd) -> Result<(), PathError> {
    debug!("Executing {} command", cmd.name());

    match *cmd {
        EditCmd::SetStart {
            x_in,
            y_in,
            heading_deg,
        } => model.set_start(Vector2::new(x_in, y_in), heading_deg),
        EditCmd::SetStartHeading { heading_deg } => model.set_start_heading(heading_deg),
        EditCmd::AppendWaypoint {
            x_in,
            y_in,
            velocity_ips,
        } => model.append_waypoint(Vector2::new(x_in, y_in), velocity_ips)?,
        EditCmd::RemoveWaypoint { index } => model.remove_waypoint(index)?,
        EditCmd::SetWaypoint { index, x_in, y_in } => {
            model.set_waypoint_coordinates(index, x_in, y_in)?
        }
        EditCmd::SetVelocity {
            segment,
            velocity_ips,
        } => model.set_velocity(segment, velocity_ips)?,
        EditCmd::AddTurn { index, angle_deg } => model.add_turn(index, angle_deg)?,
        EditCmd::RemoveTurn { index } => model.remove_turn(index),
        EditCmd::SetTurnAngle { index, angle_deg } => model.set_turn_angle(index, angle_deg)?,
        EditCmd::RoundAll => model.round_all_to_nearest_inch(),
        EditCmd::Clear => model.clear(),
    }

    Ok(())
}

/// Execute a sequence of edit commands, stopping at the first rejected one.
///
/// On error the position of the rejected command is returned with the error, earlier commands
/// remain applied.
pub fn exec_all<'a, I>(model: &mut PathModel, cmds: I) -> Result<usize, (usize, PathError)>
where
    I: IntoIterator<Item = &'a EditCmd>,
{
    let mut count = 0;

    for cmd in cmds {
        exec(model, cmd).map_err(|e| (count, e))?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::path::Turn;

    #[test]
    fn test_build_path() {
        let cmds = vec![
            EditCmd::SetStart {
                x_in: -60.0,
                y_in: -60.0,
                heading_deg: 90.0,
            },
            EditCmd::AppendWaypoint {
                x_in: 0.4,
                y_in: -60.0,
                velocity_ips: Some(24.0),
            },
            EditCmd::AppendWaypoint {
                x_in: 0.0,
                y_in: 0.0,
                velocity_ips: None,
            },
            EditCmd::AddTurn {
                index: 1,
                angle_deg: 0.0,
            },
            EditCmd::SetTurnAngle {
                index: 1,
                angle_deg: 10.0,
            },
            EditCmd::SetVelocity {
                segment: 1,
                velocity_ips: 12.0,
            },
            EditCmd::RoundAll,
        ];

        let mut m = PathModel::default();
        assert_eq!(exec_all(&mut m, &cmds), Ok(7));

        assert_eq!(m.waypoints()[1], Vector2::new(0.0, -60.0));
        assert_eq!(m.velocities(), &[24.0, 12.0]);
        assert_eq!(m.turns(), &[Turn::new(1, 10.0)]);
        assert_eq!(m.start_heading_deg(), 90.0);

        exec(&mut m, &EditCmd::RemoveWaypoint { index: 1 }).unwrap();
        assert_eq!(m.turn_count(), 0);

        exec(&mut m, &EditCmd::Clear).unwrap();
        assert_eq!(m.waypoint_count(), 0);
    }

    #[test]
    fn test_rejected_edit() {
        let mut m = PathModel::default();

        let cmds = vec![
            EditCmd::SetStart {
                x_in: 0.0,
                y_in: 0.0,
                heading_deg: 0.0,
            },
            EditCmd::AddTurn {
                index: 0,
                angle_deg: 90.0,
            },
            EditCmd::AddTurn {
                index: 0,
                angle_deg: 45.0,
            },
            EditCmd::Clear,
        ];

        assert_eq!(
            exec_all(&mut m, &cmds),
            Err((2, PathError::DuplicateTurn(0)))
        );
        assert_eq!(m.turns(), &[Turn::new(0, 90.0)]);

        assert_eq!(
            exec(&mut m, &EditCmd::SetWaypoint {
                index: 3,
                x_in: 0.0,
                y_in: 0.0
            }),
            Err(PathError::IndexOutOfRange { index: 3, len: 1 })
        );
    }
}
