//! Implementation of the simulation player state machine

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use nalgebra::Vector2;
use serde::Serialize;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use super::{Phase, RobotPose, SimError, SimParams};
use crate::coord::Canvas;
use crate::kinematics::{
    rotation_delta_per_frame, translation_delta_per_frame, translation_frame_count,
    CornerOffsets, RobotBody,
};
use crate::path::PathModel;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// State of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    /// Not yet started, or reset.
    Idle,

    /// Turning in place at the start of a segment.
    Rotating,

    /// Driving along a segment.
    Translating,

    /// Every segment has been played.
    Done,
}

/// How [`SimPlayer::run`] paces frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Each frame takes (at least) one frame period of wall clock time.
    RealTime,

    /// Frames are produced as fast as possible.
    Unpaced,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Summary of a call to [`SimPlayer::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackReport {
    /// Number of frames produced.
    pub frames: usize,

    /// Number of frames that took longer than the frame period.
    pub overruns: usize,

    /// True if playback was stopped by the cancel check.
    pub cancelled: bool,

    /// State of the player when the run ended.
    pub final_state: PlayerState,
}

/// Plays back a snapshot of a path.
pub struct SimPlayer {
    model: PathModel,
    params: SimParams,
    body: RobotBody,

    /// The model's waypoints on the canvas, in pixels
    waypoints_px: Vec<Vector2<f64>>,
    pixels_per_inch: f64,

    /// Offsets of the body at the start heading
    initial_offsets: CornerOffsets,

    state: PlayerState,

    /// Index of the waypoint at the end of the current segment
    target: usize,
    frame: usize,

    position_px: Vector2<f64>,
    heading_deg: f64,
    offsets: CornerOffsets,

    rotation: Rotation,

    delta_px: Vector2<f64>,
    translation_frames_left: usize,
}

/// Progress through the rotation frames of the current segment
#[derive(Default)]
struct Rotation {
    frames: Vec<CornerOffsets>,
    next: usize,
    from_deg: f64,
    step_deg: f64,
    to_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimPlayer {
    /// Create a new player for the given path.
    ///
    /// The model should be a snapshot (clone) of the path being edited.
    pub fn new(
        model: PathModel,
        canvas: Canvas,
        params: SimParams,
        body: RobotBody,
    ) -> Result<Self, SimError> {
        if model.waypoint_count() < 2 {
            return Err(SimError::EmptyPath(model.waypoint_count()));
        }

        if util::time::frame_period(params.frames_per_second).is_none() {
            return Err(SimError::InvalidFrameRate(params.frames_per_second));
        }

        if !(params.turn_rate_dps.is_finite() && params.turn_rate_dps > 0.0) {
            return Err(SimError::InvalidTurnRate(params.turn_rate_dps));
        }

        let waypoints_px: Vec<Vector2<f64>> =
            model.waypoints().iter().map(|p| canvas.to_pixels(p)).collect();

        // The robot is shown already facing the start heading
        let start_heading = model.start_heading_deg();
        let initial_offsets = if start_heading != 0.0 {
            rotation_delta_per_frame(
                body.corners(),
                0.0,
                start_heading,
                params.turn_rate_dps,
                params.frames_per_second,
            )
            .last()
            .copied()
            .unwrap_or(*body.corners())
        }
        else {
            *body.corners()
        };

        let mut player = Self {
            position_px: waypoints_px[0],
            heading_deg: start_heading,
            offsets: initial_offsets,
            model,
            params,
            body,
            waypoints_px,
            pixels_per_inch: canvas.pixels_per_inch,
            initial_offsets,
            state: PlayerState::Idle,
            target: 0,
            frame: 0,
            rotation: Rotation::default(),
            delta_px: Vector2::zeros(),
            translation_frames_left: 0,
        };
        player.reset();

        debug!(
            "SimPlayer created for {} waypoints, {} turns",
            player.waypoints_px.len(),
            player.model.turn_count()
        );

        Ok(player)
    }

    /// Return the player to `Idle` so the path can be played again.
    pub fn reset(&mut self) {
        self.state = PlayerState::Idle;
        self.target = 0;
        self.frame = 0;
        self.position_px = self.waypoints_px[0];
        self.heading_deg = self.model.start_heading_deg();
        self.offsets = self.initial_offsets;
        self.rotation = Rotation::default();
        self.delta_px = Vector2::zeros();
        self.translation_frames_left = 0;
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// The path snapshot being played.
    pub fn model(&self) -> &PathModel {
        &self.model
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn body(&self) -> &RobotBody {
        &self.body
    }

    /// Where the robot is drawn before the first frame, and after a reset.
    pub fn resting_pose(&self) -> RobotPose {
        RobotPose {
            position_px: self.waypoints_px[0],
            orientation_deg: self.model.start_heading_deg(),
            corners_px: RobotBody::place(&self.waypoints_px[0], &self.initial_offsets),
            phase: Phase::Translating,
            segment: 0,
            frame: 0,
        }
    }

    /// Total number of frames a full playback produces.
    pub fn total_frames(&self) -> usize {
        let mut heading = self.model.start_heading_deg();
        let mut total = 0;

        for i in 1..self.waypoints_px.len() {
            if let Some(t) = self.model.turn_at(i - 1) {
                total += crate::kinematics::rotation_frame_count(
                    heading,
                    t.angle_deg,
                    self.params.turn_rate_dps,
                    self.params.frames_per_second,
                );
                heading = t.angle_deg;
            }

            let (_, n) = self.segment_motion(i);
            total += n;
        }

        total
    }

    /// Produce the next frame, or `None` once the playback is done.
    ///
    /// No pacing is applied, successive calls return frames as fast as they can be computed.
    pub fn step(&mut self) -> Option<RobotPose> {
        loop {
            match self.state {
                PlayerState::Idle => {
                    info!("Playback started");
                    self.begin_segment(1);
                }
                PlayerState::Rotating => {
                    if let Some(pose) = self.next_rotation_frame() {
                        return Some(pose);
                    }

                    // Hold the last applied offsets, the heading is now the turn's angle even if
                    // the final frame fell short of it
                    self.heading_deg = self.rotation.to_deg;
                    self.state = PlayerState::Translating;
                }
                PlayerState::Translating => {
                    if self.translation_frames_left > 0 {
                        self.translation_frames_left -= 1;
                        self.position_px += self.delta_px;
                        return Some(self.pose(Phase::Translating, self.heading_deg));
                    }

                    self.begin_segment(self.target + 1);
                }
                PlayerState::Done => return None,
            }
        }
    }

    /// Play the path back, blocking until it is done or cancelled.
    ///
    /// `on_frame` is called with every pose. `should_cancel` is checked once before each frame,
    /// returning `true` stops the playback leaving the player where it was.
    ///
    /// With `Pacing::RealTime` each frame is given one frame period, any remaining time after the
    /// frame is rendered is slept. Frames that overrun are counted and logged, the next frame
    /// starts immediately without trying to catch up.
    pub fn run<F, C>(&mut self, mut on_frame: F, mut should_cancel: C, pacing: Pacing) -> PlaybackReport
    where
        F: FnMut(&RobotPose),
        C: FnMut() -> bool,
    {
        // Validated on construction
        let period = util::time::frame_period(self.params.frames_per_second)
            .unwrap_or_else(|| Duration::from_secs(0));

        let mut report = PlaybackReport {
            frames: 0,
            overruns: 0,
            cancelled: false,
            final_state: self.state,
        };

        loop {
            if should_cancel() {
                info!("Playback cancelled after {} frames", report.frames);
                report.cancelled = true;
                break;
            }

            let frame_start = Instant::now();

            let pose = match self.step() {
                Some(p) => p,
                None => break,
            };

            on_frame(&pose);
            report.frames += 1;

            if pacing == Pacing::Unpaced {
                continue;
            }

            let frame_dur = Instant::now() - frame_start;

            match period.checked_sub(frame_dur) {
                Some(d) => thread::sleep(d),
                None => {
                    warn!(
                        "Frame {} overran by {:.06} s",
                        pose.frame,
                        frame_dur.as_secs_f64() - period.as_secs_f64()
                    );
                    report.overruns += 1;
                }
            }
        }

        report.final_state = self.state;

        if self.state == PlayerState::Done {
            info!(
                "Playback complete, {} frames with {} overruns",
                report.frames, report.overruns
            );
        }

        report
    }

    // ---- PRIVATE ----

    /// Start the segment ending at waypoint `target`.
    fn begin_segment(&mut self, target: usize) {
        if target >= self.waypoints_px.len() {
            self.state = PlayerState::Done;
            return;
        }

        self.target = target;
        self.position_px = self.waypoints_px[target - 1];

        let (delta, frames) = self.segment_motion(target);
        self.delta_px = delta;
        self.translation_frames_left = frames;

        match self.model.turn_at(target - 1).copied() {
            Some(turn) => {
                let step = (self.params.turn_rate_dps / self.params.frames_per_second).abs()
                    * util::maths::sign(turn.angle_deg - self.heading_deg);

                self.rotation = Rotation {
                    frames: rotation_delta_per_frame(
                        self.body.corners(),
                        self.heading_deg,
                        turn.angle_deg,
                        self.params.turn_rate_dps,
                        self.params.frames_per_second,
                    ),
                    next: 0,
                    from_deg: self.heading_deg,
                    step_deg: step,
                    to_deg: turn.angle_deg,
                };
                self.state = PlayerState::Rotating;

                debug!(
                    "Segment {}: turning {} -> {} deg over {} frames",
                    target - 1,
                    self.heading_deg,
                    turn.angle_deg,
                    self.rotation.frames.len()
                );
            }
            None => self.state = PlayerState::Translating,
        }

        debug!(
            "Segment {}: driving {} frames of ({:.3}, {:.3}) px",
            target - 1,
            frames,
            delta.x,
            delta.y
        );
    }

    fn next_rotation_frame(&mut self) -> Option<RobotPose> {
        let offsets = *self.rotation.frames.get(self.rotation.next)?;

        self.rotation.next += 1;
        self.offsets = offsets;

        let angle = self.rotation.from_deg + self.rotation.next as f64 * self.rotation.step_deg;

        Some(self.pose(Phase::Rotating, angle))
    }

    /// Per-frame delta and number of frames for the segment ending at waypoint `target`.
    fn segment_motion(&self, target: usize) -> (Vector2<f64>, usize) {
        let p1 = &self.waypoints_px[target - 1];
        let p2 = &self.waypoints_px[target];

        let delta = translation_delta_per_frame(
            p1,
            p2,
            self.model.velocities()[target - 1],
            self.params.frames_per_second,
            self.pixels_per_inch,
        );

        (delta, translation_frame_count(p1, p2, &delta))
    }

    fn pose(&mut self, phase: Phase, orientation_deg: f64) -> RobotPose {
        let pose = RobotPose {
            position_px: self.position_px,
            orientation_deg,
            corners_px: RobotBody::place(&self.position_px, &self.offsets),
            phase,
            segment: self.target - 1,
            frame: self.frame,
        };

        trace!(
            "Frame {}: ({:.3}, {:.3}) px at {:.2} deg",
            pose.frame,
            pose.position_px.x,
            pose.position_px.y,
            pose.orientation_deg
        );

        self.frame += 1;

        pose
    }
}

impl Iterator for SimPlayer {
    type Item = RobotPose;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kinematics::{rotate_corners, RobotParams};
    use std::cell::Cell;

    fn body() -> RobotBody {
        RobotBody::new(RobotParams::default(), 5.0).unwrap()
    }

    /// Straight up 10 in at 60 in/s, i.e. 5 px/frame over 50 px
    fn straight() -> PathModel {
        let mut m = PathModel::default();
        m.set_start(Vector2::new(0.0, 0.0), 0.0);
        m.append_waypoint(Vector2::new(0.0, 10.0), Some(60.0)).unwrap();
        m
    }

    fn player(m: PathModel) -> SimPlayer {
        SimPlayer::new(m, Canvas::default(), SimParams::default(), body()).unwrap()
    }

    #[test]
    fn test_empty_path() {
        let mut m = PathModel::default();
        assert_eq!(
            SimPlayer::new(m.clone(), Canvas::default(), SimParams::default(), body()).err(),
            Some(SimError::EmptyPath(0))
        );

        m.set_start(Vector2::new(0.0, 0.0), 0.0);
        assert_eq!(
            SimPlayer::new(m, Canvas::default(), SimParams::default(), body()).err(),
            Some(SimError::EmptyPath(1))
        );
    }

    #[test]
    fn test_invalid_frame_rate() {
        let params = SimParams {
            frames_per_second: 0.0,
            ..SimParams::default()
        };
        assert_eq!(
            SimPlayer::new(straight(), Canvas::default(), params, body()).err(),
            Some(SimError::InvalidFrameRate(0.0))
        );
    }

    #[test]
    fn test_invalid_turn_rate() {
        for rate in [0.0, -45.0] {
            let params = SimParams {
                turn_rate_dps: rate,
                ..SimParams::default()
            };
            assert_eq!(
                SimPlayer::new(straight(), Canvas::default(), params, body()).err(),
                Some(SimError::InvalidTurnRate(rate))
            );
        }

        let params = SimParams {
            turn_rate_dps: f64::NAN,
            ..SimParams::default()
        };
        assert!(matches!(
            SimPlayer::new(straight(), Canvas::default(), params, body()),
            Err(SimError::InvalidTurnRate(_))
        ));
    }

    #[test]
    fn test_straight_segment() {
        let mut p = player(straight());
        assert_eq!(p.state(), PlayerState::Idle);

        let poses: Vec<RobotPose> = p.by_ref().collect();
        assert_eq!(poses.len(), 10);
        assert_eq!(p.state(), PlayerState::Done);

        assert_eq!(poses[0].position_px, Vector2::new(360.0, 365.0));
        assert_eq!(poses[9].position_px, Vector2::new(360.0, 410.0));
        assert_eq!(poses[9].frame, 9);
        assert!(poses.iter().all(|f| f.phase == Phase::Translating && f.segment == 0));

        // Unrotated body at the start heading of 0
        assert_eq!(poses[0].corners_px[0], Vector2::new(405.0, 320.0));
        assert_eq!(p.step(), None);
    }

    #[test]
    fn test_turn_then_drive() {
        let mut m = straight();
        m.append_waypoint(Vector2::new(0.0, 0.0), Some(60.0)).unwrap();
        m.add_turn(1, 90.0).unwrap();

        let mut p = player(m);
        // 90 deg at 45 deg/s and 60 fps is 120 frames
        assert_eq!(p.total_frames(), 10 + 120 + 10);

        let poses: Vec<RobotPose> = p.by_ref().collect();
        assert_eq!(poses.len(), 140);

        let rot = &poses[10..130];
        assert!(rot.iter().all(|f| f.phase == Phase::Rotating && f.segment == 1));
        assert!(rot.iter().all(|f| f.position_px == Vector2::new(360.0, 410.0)));
        assert!((rot[0].orientation_deg - 0.75).abs() < 1e-9);
        assert!((rot[119].orientation_deg - 90.0).abs() < 1e-9);

        // Drive back holding the rotated body
        let last = poses[139];
        assert_eq!(last.phase, Phase::Translating);
        assert_eq!(last.orientation_deg, 90.0);
        assert_eq!(last.position_px, Vector2::new(360.0, 360.0));

        let expected = RobotBody::place(&last.position_px, &rotate_corners(body().corners(), 90.0));
        for (a, b) in last.corners_px.iter().zip(expected.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_start_heading_sets_initial_offsets() {
        let mut m = straight();
        m.set_start_heading(90.0);

        let mut p = player(m);
        let rest = p.resting_pose();
        let first = p.step().unwrap();

        let expected = rotate_corners(body().corners(), 90.0);
        for i in 0..4 {
            assert!((rest.corners_px[i] - rest.position_px - expected[i]).norm() < 1e-9);
            assert!((first.corners_px[i] - first.position_px - expected[i]).norm() < 1e-9);
        }
        assert_eq!(first.orientation_deg, 90.0);
    }

    #[test]
    fn test_turn_to_same_heading_has_no_frames() {
        let mut m = straight();
        m.add_turn(0, 0.0).unwrap();

        let poses: Vec<RobotPose> = player(m).collect();
        assert_eq!(poses.len(), 10);
        assert!(poses.iter().all(|f| f.phase == Phase::Translating));
    }

    #[test]
    fn test_repeated_turn_keeps_rotated_body() {
        let mut m = straight();
        m.append_waypoint(Vector2::new(0.0, 0.0), Some(60.0)).unwrap();
        m.append_waypoint(Vector2::new(0.0, 10.0), Some(60.0)).unwrap();
        m.add_turn(1, 90.0).unwrap();
        m.add_turn(2, 90.0).unwrap();

        let mut p = player(m);
        // The second turn is already at 90 deg so adds no frames
        assert_eq!(p.total_frames(), 10 + 120 + 10 + 10);

        let poses: Vec<RobotPose> = p.by_ref().collect();
        assert_eq!(poses.len(), 150);

        let third = &poses[140..];
        assert!(third.iter().all(|f| f.segment == 2 && f.phase == Phase::Translating));
        assert_eq!(third[9].position_px, Vector2::new(360.0, 410.0));

        let expected = rotate_corners(body().corners(), 90.0);
        for f in third {
            assert_eq!(f.orientation_deg, 90.0);
            for i in 0..4 {
                assert!((f.corners_px[i] - f.position_px - expected[i]).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn test_deterministic_and_reset() {
        let mut m = straight();
        m.append_waypoint(Vector2::new(20.0, 25.0), Some(33.0)).unwrap();
        m.add_turn(1, -60.0).unwrap();

        let a: Vec<RobotPose> = player(m.clone()).collect();
        let b: Vec<RobotPose> = player(m.clone()).collect();
        assert_eq!(a, b);

        let mut p = player(m);
        let first_run: Vec<RobotPose> = p.by_ref().collect();
        p.reset();
        assert_eq!(p.state(), PlayerState::Idle);
        let second_run: Vec<RobotPose> = p.collect();
        assert_eq!(first_run, second_run);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut m = straight();
        let mut p = player(m.clone());

        m.append_waypoint(Vector2::new(50.0, 50.0), None).unwrap();
        assert_eq!(p.model().waypoint_count(), 2);
        assert_eq!(p.by_ref().count(), 10);
    }

    #[test]
    fn test_run_unpaced() {
        let mut p = player(straight());
        let mut seen = Vec::new();

        let report = p.run(|f| seen.push(f.frame), || false, Pacing::Unpaced);

        assert_eq!(report.frames, 10);
        assert_eq!(report.overruns, 0);
        assert!(!report.cancelled);
        assert_eq!(report.final_state, PlayerState::Done);
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_cancel() {
        let mut p = player(straight());
        let polls = Cell::new(0);

        let report = p.run(
            |_| (),
            || {
                polls.set(polls.get() + 1);
                polls.get() > 4
            },
            Pacing::Unpaced,
        );

        assert!(report.cancelled);
        assert_eq!(report.frames, 4);
        assert_eq!(report.final_state, PlayerState::Translating);

        // Picks up where it stopped
        assert_eq!(p.step().map(|f| f.frame), Some(4));
    }

    #[test]
    fn test_run_real_time() {
        let params = SimParams {
            frames_per_second: 200.0,
            ..SimParams::default()
        };
        let mut p = SimPlayer::new(straight(), Canvas::default(), params, body()).unwrap();

        let start = Instant::now();
        let report = p.run(|_| (), || false, Pacing::RealTime);

        // 60 in/s at 200 fps is 1.5 px/frame, 50 px gives 33 frames
        assert_eq!(report.frames, 33);
        assert!(start.elapsed() >= Duration::from_secs_f64(0.9 * 33.0 / 200.0));
    }
}
