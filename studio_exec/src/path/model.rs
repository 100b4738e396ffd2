//! Implementation of the path model

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use super::{PathError, Turn, DEFAULT_VELOCITY_IPS};
use util::maths::{normalise_zero, round_dp};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The path being edited.
///
/// Waypoint 0 is the start point. Segment `i` runs from waypoint `i` to waypoint `i + 1` and has
/// velocity `velocities()[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathModel {
    /// Units: inches
    waypoints: Vec<Vector2<f64>>,

    /// Units: inches/second
    velocities: Vec<f64>,

    /// Sorted by waypoint index, unique.
    turns: Vec<Turn>,

    /// Units: degrees
    start_heading_deg: f64,

    /// Units: inches/second
    default_velocity_ips: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for PathModel {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_IPS)
    }
}

impl PathModel {
    /// Create a new empty path, using the given velocity for segments appended without one.
    pub fn new(default_velocity_ips: f64) -> Self {
        Self {
            waypoints: Vec::new(),
            velocities: Vec::new(),
            turns: Vec::new(),
            start_heading_deg: 0.0,
            default_velocity_ips,
        }
    }

    // ---- MUTATIONS ----

    /// Place the start point, replacing the existing one if there is one.
    ///
    /// Turns and velocities are left alone.
    pub fn set_start(&mut self, point_in: Vector2<f64>, heading_deg: f64) {
        match self.waypoints.first_mut() {
            Some(p) => *p = point_in,
            None => self.waypoints.push(point_in),
        }

        self.start_heading_deg = heading_deg;

        debug!("Start set to ({}, {}) at {} deg", point_in.x, point_in.y, heading_deg);
    }

    /// Change the starting heading without moving the start point.
    pub fn set_start_heading(&mut self, heading_deg: f64) {
        self.start_heading_deg = heading_deg;
        debug!("Start heading set to {} deg", heading_deg);
    }

    /// Add a waypoint at the end of the path.
    ///
    /// The new segment uses `velocity_ips`, or the default velocity if `None`.
    pub fn append_waypoint(
        &mut self,
        point_in: Vector2<f64>,
        velocity_ips: Option<f64>,
    ) -> Result<(), PathError> {
        if self.waypoints.is_empty() {
            return Err(PathError::InvalidState(String::from(
                "Cannot add a waypoint before the start point is placed",
            )));
        }

        let velocity = velocity_ips.unwrap_or(self.default_velocity_ips);
        check_velocity(velocity)?;

        self.waypoints.push(point_in);
        self.velocities.push(velocity);

        debug!(
            "Waypoint {} appended at ({}, {}), {} in/s",
            self.waypoints.len() - 1,
            point_in.x,
            point_in.y,
            velocity
        );

        Ok(())
    }

    /// Remove a waypoint, along with any turn bound to it.
    ///
    /// The velocity of the segment ending at the waypoint is removed. For the start point the
    /// first segment's velocity goes instead, as the old waypoint 1 becomes the new start. Turns
    /// bound to later waypoints are shifted down to keep pointing at the same waypoint.
    pub fn remove_waypoint(&mut self, index: usize) -> Result<(), PathError> {
        self.check_waypoint_index(index)?;

        if index == 0 && self.waypoints.len() == 1 {
            return Err(PathError::InvalidState(String::from(
                "Cannot remove the start point while it is the only waypoint",
            )));
        }

        self.waypoints.remove(index);
        self.velocities.remove(index.saturating_sub(1));

        self.turns.retain(|t| t.waypoint_index != index);
        for t in self.turns.iter_mut() {
            if t.waypoint_index > index {
                t.waypoint_index -= 1;
            }
        }

        debug!("Waypoint {} removed", index);

        Ok(())
    }

    /// Move an existing waypoint.
    pub fn set_waypoint_coordinates(
        &mut self,
        index: usize,
        x_in: f64,
        y_in: f64,
    ) -> Result<(), PathError> {
        self.check_waypoint_index(index)?;

        self.waypoints[index] = Vector2::new(x_in, y_in);

        debug!("Waypoint {} moved to ({}, {})", index, x_in, y_in);

        Ok(())
    }

    /// Change the velocity of a segment.
    pub fn set_velocity(&mut self, segment: usize, velocity_ips: f64) -> Result<(), PathError> {
        check_velocity(velocity_ips)?;

        let len = self.velocities.len();

        match self.velocities.get_mut(segment) {
            Some(v) => *v = velocity_ips,
            None => return Err(PathError::IndexOutOfRange { index: segment, len }),
        }

        debug!("Segment {} velocity set to {} in/s", segment, velocity_ips);

        Ok(())
    }

    /// Bind a turn to a waypoint.
    pub fn add_turn(&mut self, index: usize, angle_deg: f64) -> Result<(), PathError> {
        self.check_waypoint_index(index)?;

        if self.turn_at(index).is_some() {
            return Err(PathError::DuplicateTurn(index));
        }

        let pos = self.turns.partition_point(|t| t.waypoint_index < index);
        self.turns.insert(pos, Turn::new(index, angle_deg));

        debug!("Turn to {} deg added at waypoint {}", angle_deg, index);

        Ok(())
    }

    /// Remove the turn bound to a waypoint. Does nothing if there isn't one.
    pub fn remove_turn(&mut self, index: usize) {
        let before = self.turns.len();
        self.turns.retain(|t| t.waypoint_index != index);

        if self.turns.len() != before {
            debug!("Turn at waypoint {} removed", index);
        }
    }

    /// Change the angle of the turn bound to a waypoint.
    pub fn set_turn_angle(&mut self, index: usize, angle_deg: f64) -> Result<(), PathError> {
        match self.turns.iter_mut().find(|t| t.waypoint_index == index) {
            Some(t) => t.angle_deg = angle_deg,
            None => return Err(PathError::NoTurnAt(index)),
        }

        debug!("Turn at waypoint {} set to {} deg", index, angle_deg);

        Ok(())
    }

    /// Snap every waypoint to the nearest whole inch.
    pub fn round_all_to_nearest_inch(&mut self) {
        for p in self.waypoints.iter_mut() {
            *p = p.map(|v| normalise_zero(round_dp(v, 0)));
        }

        debug!("All waypoints rounded");
    }

    /// Remove every waypoint, velocity and turn, and reset the start heading.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.velocities.clear();
        self.turns.clear();
        self.start_heading_deg = 0.0;

        debug!("Path cleared");
    }

    // ---- QUERIES ----

    pub fn waypoints(&self) -> &[Vector2<f64>] {
        &self.waypoints
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    /// Turns, sorted by waypoint index.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn segment_count(&self) -> usize {
        self.velocities.len()
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn start_heading_deg(&self) -> f64 {
        self.start_heading_deg
    }

    pub fn default_velocity_ips(&self) -> f64 {
        self.default_velocity_ips
    }

    /// The turn bound to a waypoint, if any.
    pub fn turn_at(&self, index: usize) -> Option<&Turn> {
        self.turns
            .binary_search_by_key(&index, |t| t.waypoint_index)
            .ok()
            .map(|i| &self.turns[i])
    }

    /// The heading the robot has while travelling towards waypoint `index`.
    ///
    /// This is the angle of the last turn bound at or before `index - 1`, or the start heading
    /// if there is none. For the start point itself the start heading is returned.
    pub fn heading_approaching(&self, index: usize) -> f64 {
        match index.checked_sub(1) {
            Some(prev) => self.last_turn_angle_up_to(prev),
            None => self.start_heading_deg,
        }
    }

    /// The heading the robot has when leaving waypoint `index`, including any turn bound to it.
    pub fn heading_leaving(&self, index: usize) -> f64 {
        self.last_turn_angle_up_to(index)
    }

    // ---- PRIVATE ----

    fn last_turn_angle_up_to(&self, index: usize) -> f64 {
        self.turns
            .iter()
            .rev()
            .find(|t| t.waypoint_index <= index)
            .map(|t| t.angle_deg)
            .unwrap_or(self.start_heading_deg)
    }

    fn check_waypoint_index(&self, index: usize) -> Result<(), PathError> {
        if index < self.waypoints.len() {
            Ok(())
        }
        else {
            Err(PathError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Segment velocities must be finite and not negative.
fn check_velocity(velocity_ips: f64) -> Result<(), PathError> {
    if velocity_ips.is_finite() && velocity_ips >= 0.0 {
        Ok(())
    }
    else {
        Err(PathError::InvalidState(format!(
            "Velocity must be finite and not negative, got {} in/s",
            velocity_ips
        )))
    }
}
