//! Straight line translation calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the distance to move each frame to travel from `p1` to `p2` at a constant speed.
///
/// The length of the delta is `inches_per_second * pixels_per_inch / frames_per_second` and it
/// points from `p1` towards `p2`. Vertical and horizontal segments are handled separately so the
/// slope ratio is never a division by zero.
///
/// # Notes
///
/// - For horizontal segments the delta starts out pointing towards -x and is flipped when `p2`
///   lies to the right of `p1`. This mirrors the sign handling of the general case and is kept so
///   that playback matches the authoring tool frame for frame.
/// - A zero length segment gives a zero delta.
/// - Only the magnitude of `inches_per_second` is used, a negative speed still moves towards `p2`.
pub fn translation_delta_per_frame(
    p1: &Vector2<f64>,
    p2: &Vector2<f64>,
    inches_per_second: f64,
    frames_per_second: f64,
    pixels_per_inch: f64,
) -> Vector2<f64> {
    let mag = (inches_per_second * pixels_per_inch / frames_per_second).abs();

    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    // Vertical (or degenerate) segment
    if dx == 0.0 {
        return Vector2::new(0.0, mag * util::maths::sign(dy));
    }

    // Horizontal segment
    if dy == 0.0 {
        let mut delta_x = -mag;
        if p2.x > p1.x {
            delta_x = -delta_x;
        }
        return Vector2::new(delta_x, 0.0);
    }

    // General case, solve for the step along y given the slope ratio, then derive the x step.
    let ratio = dx / dy;
    let mut delta_y = (mag.powi(2) / (ratio.powi(2) + 1.0)).sqrt();
    let mut delta_x = ratio * delta_y;

    // delta_y is positive so far, invert both when travelling downwards
    if p2.y <= p1.y {
        delta_x = -delta_x;
        delta_y = -delta_y;
    }

    Vector2::new(delta_x, delta_y)
}

/// Number of whole frames needed to cover the segment from `p1` to `p2` with the given delta.
///
/// Any remainder shorter than one delta is not played, the next segment starts from its own
/// waypoint.
pub fn translation_frame_count(p1: &Vector2<f64>, p2: &Vector2<f64>, delta: &Vector2<f64>) -> usize {
    let step = delta.norm();

    if step == 0.0 || !step.is_finite() {
        return 0;
    }

    ((p2 - p1).norm() / step).floor() as usize
}

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-9;

    fn approx(a: Vector2<f64>, b: Vector2<f64>) -> bool {
        (a - b).norm() < TOL
    }

    #[test]
    fn test_vertical_unit_step() {
        let d = translation_delta_per_frame(
            &Vector2::new(0.0, 0.0),
            &Vector2::new(0.0, 100.0),
            60.0,
            60.0,
            1.0,
        );
        assert_eq!(d, Vector2::new(0.0, 1.0));

        let down = translation_delta_per_frame(
            &Vector2::new(0.0, 100.0),
            &Vector2::new(0.0, 0.0),
            60.0,
            60.0,
            1.0,
        );
        assert_eq!(down, Vector2::new(0.0, -1.0));
    }

    #[test]
    fn test_horizontal_moves_towards_target() {
        let right = translation_delta_per_frame(
            &Vector2::new(0.0, 5.0),
            &Vector2::new(50.0, 5.0),
            48.0,
            60.0,
            5.0,
        );
        assert!(approx(right, Vector2::new(4.0, 0.0)));

        let left = translation_delta_per_frame(
            &Vector2::new(50.0, 5.0),
            &Vector2::new(0.0, 5.0),
            48.0,
            60.0,
            5.0,
        );
        assert!(approx(left, Vector2::new(-4.0, 0.0)));
    }

    #[test]
    fn test_general_case_all_quadrants() {
        let origin = Vector2::new(100.0, 100.0);

        for target in &[
            Vector2::new(130.0, 140.0),
            Vector2::new(70.0, 140.0),
            Vector2::new(70.0, 60.0),
            Vector2::new(130.0, 60.0),
        ] {
            let d = translation_delta_per_frame(&origin, target, 60.0, 60.0, 5.0);

            // Length is the per-frame magnitude
            assert!((d.norm() - 5.0).abs() < TOL);

            // And the delta is parallel to and in the same direction as the segment
            let dir = (target - origin).normalize();
            assert!(approx(d.normalize(), dir), "{} vs {}", d, dir);
        }
    }

    #[test]
    fn test_negative_speed_moves_towards_target() {
        let o = Vector2::new(0.0, 0.0);

        let up = translation_delta_per_frame(&o, &Vector2::new(0.0, 10.0), -60.0, 60.0, 5.0);
        assert!(approx(up, Vector2::new(0.0, 5.0)));

        let right = translation_delta_per_frame(&o, &Vector2::new(10.0, 0.0), -60.0, 60.0, 5.0);
        assert!(approx(right, Vector2::new(5.0, 0.0)));

        let diag = translation_delta_per_frame(&o, &Vector2::new(6.0, 8.0), -60.0, 60.0, 5.0);
        assert!(approx(diag, Vector2::new(3.0, 4.0)));
    }

    #[test]
    fn test_zero_length_segment() {
        let p = Vector2::new(3.0, 4.0);
        let d = translation_delta_per_frame(&p, &p, 48.0, 60.0, 5.0);
        assert_eq!(d, Vector2::zeros());
        assert_eq!(translation_frame_count(&p, &p, &d), 0);
    }

    #[test]
    fn test_frame_count_truncates() {
        let p1 = Vector2::new(0.0, 0.0);
        let p2 = Vector2::new(0.0, 10.5);
        let d = Vector2::new(0.0, 1.0);
        assert_eq!(translation_frame_count(&p1, &p2, &d), 10);

        // 3-4-5 triangle, 50 px at 4 px/frame
        let p3 = Vector2::new(30.0, 40.0);
        let d = translation_delta_per_frame(&p1, &p3, 48.0, 60.0, 5.0);
        assert_eq!(translation_frame_count(&p1, &p3, &d), 12);
    }
}
