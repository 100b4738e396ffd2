//! CSV archiving of playback poses

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::path::Path;

use super::{Phase, RobotPose};
use util::{
    archive::{Archived, Archiver},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Path of the pose archive relative to the session's archive root.
pub const POSE_ARCHIVE_PATH: &str = "sim/poses.csv";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Writes every recorded pose as a row of a csv file.
pub struct PoseArchiver {
    arch: Archiver,
    pending: Option<RobotPose>,
}

/// A flattened pose, as csv can't hold nested arrays
#[derive(Serialize)]
struct PoseRecord {
    elapsed_s: f64,
    frame: usize,
    segment: usize,
    phase: Phase,
    x_px: f64,
    y_px: f64,
    orientation_deg: f64,
    br_x_px: f64,
    br_y_px: f64,
    bl_x_px: f64,
    bl_y_px: f64,
    tl_x_px: f64,
    tl_y_px: f64,
    tr_x_px: f64,
    tr_y_px: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PoseArchiver {
    /// Create the archive in the session's archive directory.
    pub fn new(session: &Session) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            arch: Archiver::from_path(session, POSE_ARCHIVE_PATH)?,
            pending: None,
        })
    }

    /// Create the archive at an explicit path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            arch: Archiver::create(path)?,
            pending: None,
        })
    }

    /// Set the pose to be written on the next call to `write`.
    pub fn record(&mut self, pose: &RobotPose) {
        self.pending = Some(*pose);
    }
}

impl Archived for PoseArchiver {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let pose = match self.pending.take() {
            Some(p) => p,
            None => return Ok(()),
        };

        let c = &pose.corners_px;

        self.arch.serialise(PoseRecord {
            elapsed_s: session::get_elapsed_seconds(),
            frame: pose.frame,
            segment: pose.segment,
            phase: pose.phase,
            x_px: pose.position_px.x,
            y_px: pose.position_px.y,
            orientation_deg: pose.orientation_deg,
            br_x_px: c[0].x,
            br_y_px: c[0].y,
            bl_x_px: c[1].x,
            bl_y_px: c[1].y,
            tl_x_px: c[2].x,
            tl_y_px: c[2].y,
            tr_x_px: c[3].x,
            tr_y_px: c[3].y,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord::Canvas;
    use crate::kinematics::{RobotBody, RobotParams};
    use crate::path::PathModel;
    use crate::sim::{SimParams, SimPlayer};
    use nalgebra::Vector2;

    #[test]
    fn test_archive_poses() {
        let mut m = PathModel::default();
        m.set_start(Vector2::new(0.0, 0.0), 0.0);
        m.append_waypoint(Vector2::new(0.0, 10.0), Some(60.0)).unwrap();
        m.add_turn(0, 3.0).unwrap();

        let body = RobotBody::new(RobotParams::default(), 5.0).unwrap();
        let player = SimPlayer::new(m, Canvas::default(), SimParams::default(), body).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(POSE_ARCHIVE_PATH);
        let mut arch = PoseArchiver::create(&path).unwrap();

        // Nothing recorded yet
        arch.write().unwrap();

        for pose in player {
            arch.record(&pose);
            arch.write().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // Header, 4 rotation frames, 10 translation frames
        assert_eq!(lines.len(), 15);
        assert!(lines[0].starts_with("elapsed_s,frame,segment,phase,x_px,y_px"));
        assert!(lines[1].contains(",Rotating,"));
        assert!(lines[14].contains(",Translating,"));
    }
}
