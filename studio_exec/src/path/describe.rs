//! Human readable descriptions of segments and turns

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use util::maths::{normalise_zero, round_dp};

use super::{PathError, PathModel};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Format a number for display or export.
///
/// Values are rounded to 2 decimal places and printed in their shortest form, so `10.0` gives
/// `10` and `-3.250` gives `-3.25`. Negative zero is printed as `0`.
pub fn fmt_num(value: f64) -> String {
    format!("{}", normalise_zero(round_dp(value, 2)))
}

fn fmt_point(p: &Vector2<f64>) -> String {
    format!("({}, {})", fmt_num(p.x), fmt_num(p.y))
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathModel {
    /// Describe a segment, e.g. `(0, 0) to (10, 20) going 48 in/s at 0°`.
    ///
    /// The heading shown is the one the robot approaches the segment's start waypoint with.
    pub fn describe_path(&self, segment: usize) -> Result<String, PathError> {
        let len = self.segment_count();

        if segment >= len {
            return Err(PathError::IndexOutOfRange {
                index: segment,
                len,
            });
        }

        let from = &self.waypoints()[segment];
        let to = &self.waypoints()[segment + 1];

        Ok(format!(
            "{} to {} going {} in/s at {}°",
            fmt_point(from),
            fmt_point(to),
            fmt_num(self.velocities()[segment]),
            fmt_num(self.heading_approaching(segment))
        ))
    }

    /// Describe a turn by its position in the sorted turn list, e.g. `Turn to 90° at (10, 0)`.
    pub fn describe_turn(&self, turn_position: usize) -> Result<String, PathError> {
        let turn = self
            .turns()
            .get(turn_position)
            .ok_or(PathError::IndexOutOfRange {
                index: turn_position,
                len: self.turn_count(),
            })?;

        let at = self.waypoints().get(turn.waypoint_index).ok_or_else(|| {
            PathError::InvalidState(format!(
                "Turn bound to missing waypoint {}",
                turn.waypoint_index
            ))
        })?;

        Ok(format!(
            "Turn to {}° at {}",
            fmt_num(turn.angle_deg),
            fmt_point(at)
        ))
    }

    /// The numbered segment list, `Path #1: ...` onwards.
    pub fn describe_all_paths(&self) -> Result<Vec<String>, PathError> {
        (0..self.segment_count())
            .map(|i| Ok(format!("Path #{}: {}", i + 1, self.describe_path(i)?)))
            .collect()
    }

    /// The numbered turn list, `Turn #1: ...` onwards.
    pub fn describe_all_turns(&self) -> Result<Vec<String>, PathError> {
        (0..self.turn_count())
            .map(|i| Ok(format!("Turn #{}: {}", i + 1, self.describe_turn(i)?)))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(10.0), "10");
        assert_eq!(fmt_num(10.5), "10.5");
        assert_eq!(fmt_num(-3.25), "-3.25");
        assert_eq!(fmt_num(1.23456), "1.23");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(-0.0), "0");
    }

    #[test]
    fn test_describe() {
        let mut m = PathModel::default();
        m.set_start(Vector2::new(0.0, 0.0), 0.0);
        m.append_waypoint(Vector2::new(10.0, 20.0), None).unwrap();
        m.append_waypoint(Vector2::new(-12.5, 20.0), Some(30.0)).unwrap();
        m.add_turn(1, 90.0).unwrap();

        assert_eq!(
            m.describe_path(0).unwrap(),
            "(0, 0) to (10, 20) going 48 in/s at 0°"
        );
        // The turn at waypoint 1 isn't reflected until the segment after it
        assert_eq!(
            m.describe_path(1).unwrap(),
            "(10, 20) to (-12.5, 20) going 30 in/s at 0°"
        );
        assert_eq!(m.describe_turn(0).unwrap(), "Turn to 90° at (10, 20)");

        assert_eq!(
            m.describe_path(2),
            Err(PathError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            m.describe_turn(1),
            Err(PathError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_describe_all() {
        let mut m = PathModel::default();
        m.set_start(Vector2::new(1.0, 2.0), 45.0);
        m.append_waypoint(Vector2::new(3.0, 4.0), Some(10.0)).unwrap();
        m.add_turn(0, 180.0).unwrap();

        assert_eq!(
            m.describe_all_paths().unwrap(),
            vec!["Path #1: (1, 2) to (3, 4) going 10 in/s at 45°".to_string()]
        );
        assert_eq!(
            m.describe_all_turns().unwrap(),
            vec!["Turn #1: Turn to 180° at (1, 2)".to_string()]
        );

        assert!(PathModel::default().describe_all_paths().unwrap().is_empty());
    }
}
