//! In-place rotation calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;

use super::{CornerOffsets, NUM_CORNERS};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Number of frames a rotation from `angle_from_deg` to `angle_to_deg` takes.
///
/// Only whole frames are counted, so the last frame may stop short of the target angle by up to
/// one step.
pub fn rotation_frame_count(
    angle_from_deg: f64,
    angle_to_deg: f64,
    degrees_per_second: f64,
    frames_per_second: f64,
) -> usize {
    let degrees_per_frame = (degrees_per_second / frames_per_second).abs();

    if degrees_per_frame == 0.0 || !degrees_per_frame.is_finite() {
        return 0;
    }

    ((angle_to_deg - angle_from_deg).abs() / degrees_per_frame).floor() as usize
}

/// Calculate the offsets of every body corner for each frame of a rotation.
///
/// Frame `k` (counting from 1) is at `angle_from_deg + k * step` where the step is
/// `degrees_per_second / frames_per_second` towards `angle_to_deg`. Each corner `(x, y)` maps to
/// `(x sin t + y cos t, x cos t - y sin t)`, which for the y-down canvas turns the body clockwise
/// as the heading increases from "up".
///
/// Returns an empty list when the angles are equal, in which case the caller keeps whatever
/// offsets it last applied.
pub fn rotation_delta_per_frame(
    corners: &CornerOffsets,
    angle_from_deg: f64,
    angle_to_deg: f64,
    degrees_per_second: f64,
    frames_per_second: f64,
) -> Vec<CornerOffsets> {
    let num_frames = rotation_frame_count(
        angle_from_deg,
        angle_to_deg,
        degrees_per_second,
        frames_per_second,
    );

    let step = (degrees_per_second / frames_per_second).abs()
        * util::maths::sign(angle_to_deg - angle_from_deg);

    (1..=num_frames)
        .map(|k| rotate_corners(corners, angle_from_deg + k as f64 * step))
        .collect()
}

/// Map the body corners through the rotation transform for a single heading.
pub fn rotate_corners(corners: &CornerOffsets, angle_deg: f64) -> CornerOffsets {
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    let mut rotated = [Vector2::zeros(); NUM_CORNERS];

    for (r, c) in rotated.iter_mut().zip(corners.iter()) {
        *r = Vector2::new(c.x * sin + c.y * cos, c.x * cos - c.y * sin);
    }

    rotated
}
