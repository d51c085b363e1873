//! Vector math used by smoothing and motion analysis.

use kinetrace_pose_model::point::Point3D;

/// Euclidean distance between two joints.
///
/// `L = sqrt(sum((b_i - a_i)^2))` over the three coordinates.
pub fn segment_length(a: &Point3D, b: &Point3D) -> f64 {
    a.distance_to(b)
}

/// Angle between two vectors in degrees.
///
/// `angle = arccos( (v1 · v2) / (||v1|| * ||v2||) )`, with the cosine clipped
/// to `[-1, 1]`. A zero-length vector yields 0.0.
pub fn angle_between_vectors(v1: &Point3D, v2: &Point3D) -> f64 {
    let denom = v1.norm() * v2.norm();
    if denom == 0.0 {
        return 0.0;
    }
    let cos_theta = (v1.dot(v2) / denom).clamp(-1.0, 1.0);
    cos_theta.acos().to_degrees()
}

/// Angle at `vertex` formed by the joints `a` and `c`, in degrees.
pub fn joint_angle(a: &Point3D, vertex: &Point3D, c: &Point3D) -> f64 {
    angle_between_vectors(&(*a - *vertex), &(*c - *vertex))
}

/// Component-wise arithmetic mean, or `None` for an empty input.
///
/// Uses a running mean so that identical inputs reproduce the input exactly.
pub fn mean<'a, I>(points: I) -> Option<Point3D>
where
    I: IntoIterator<Item = &'a Point3D>,
{
    let mut count = 0usize;
    let mut acc = Point3D::ZERO;
    for p in points {
        count += 1;
        acc = acc + (*p - acc) / count as f64;
    }
    (count > 0).then_some(acc)
}

/// Mean of the last `window` values (all of them if fewer). A window of 0
/// is treated as 1.
pub fn moving_average(values: &[Point3D], window: usize) -> Option<Point3D> {
    let window = window.max(1);
    let start = values.len().saturating_sub(window);
    mean(&values[start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_segment_length_three_four_five() {
        let a = Point3D::ZERO;
        let b = Point3D::new(3.0, 4.0, 0.0);
        assert_eq!(segment_length(&a, &b), 5.0);
    }

    #[test]
    fn test_right_angle() {
        let v = Point3D::ZERO;
        let a = Point3D::new(1.0, 0.0, 0.0);
        let c = Point3D::new(0.0, 1.0, 0.0);
        assert!((joint_angle(&a, &v, &c) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_straight_and_folded() {
        let v = Point3D::ZERO;
        let a = Point3D::new(-1.0, 0.0, 0.0);
        let c = Point3D::new(2.0, 0.0, 0.0);
        assert!((joint_angle(&a, &v, &c) - 180.0).abs() < 1e-9);
        assert!(joint_angle(&c, &v, &c).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_angle_is_zero() {
        let v = Point3D::ZERO;
        let a = Point3D::ZERO;
        let c = Point3D::new(0.0, 1.0, 0.0);
        assert_eq!(joint_angle(&a, &v, &c), 0.0);
        assert_eq!(angle_between_vectors(&Point3D::ZERO, &Point3D::ZERO), 0.0);
    }

    #[test]
    fn test_moving_average_window() {
        let values = vec![
            Point3D::new(100.0, 0.0, 0.0),
            Point3D::new(1.0, 1.0, 1.0),
            Point3D::new(3.0, 3.0, 3.0),
        ];
        assert_eq!(
            moving_average(&values, 2),
            Some(Point3D::new(2.0, 2.0, 2.0))
        );
        assert_eq!(moving_average(&values, 0), Some(values[2]));
        assert_eq!(moving_average(&[], 3), None);
    }

    #[test]
    fn test_short_history_averages_everything() {
        let values = vec![Point3D::new(0.0, 0.0, 0.0), Point3D::new(2.0, 4.0, 6.0)];
        assert_eq!(
            moving_average(&values, 5),
            Some(Point3D::new(1.0, 2.0, 3.0))
        );
    }

    proptest! {
        #[test]
        fn prop_identical_points_average_exactly(
            x in -1e4f64..1e4,
            y in -1e4f64..1e4,
            z in -1e4f64..1e4,
            window in 1usize..32,
        ) {
            let p = Point3D::new(x, y, z);
            let values = vec![p; window];
            prop_assert_eq!(moving_average(&values, window), Some(p));
        }

        #[test]
        fn prop_angle_in_range(
            ax in -10.0f64..10.0, ay in -10.0f64..10.0, az in -10.0f64..10.0,
            cx in -10.0f64..10.0, cy in -10.0f64..10.0, cz in -10.0f64..10.0,
        ) {
            let angle = angle_between_vectors(
                &Point3D::new(ax, ay, az),
                &Point3D::new(cx, cy, cz),
            );
            prop_assert!((0.0..=180.0).contains(&angle));
        }
    }
}
