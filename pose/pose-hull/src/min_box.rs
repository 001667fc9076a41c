//! Minimum-area oriented bounding box via rotating calipers.

use pose_types::{Point2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum angular separation between candidate box angles, in radians.
const ANGLE_DEDUP_EPS: f64 = 1e-4;

/// Edges shorter than this (squared length) contribute no candidate angle.
const MIN_EDGE_LENGTH_SQ: f64 = 1e-8;

/// A minimum-area axis-aligned box found at some rotation of the plane.
///
/// `angle` is the rotation to *apply* to the input points so that the box
/// becomes axis-aligned; `min` and `max` are the box corners in that rotated
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinAreaBox {
    /// Rotation (radians, counter-clockwise) that axis-aligns the box.
    pub angle: f64,
    /// Minimum corner in the rotated frame.
    pub min: Point2<f64>,
    /// Maximum corner in the rotated frame.
    pub max: Point2<f64>,
    /// Box area (width x height in the rotated frame).
    pub area: f64,
}

impl MinAreaBox {
    /// Box extents (width, height) in the rotated frame.
    #[must_use]
    pub fn extents(&self) -> Vector2<f64> {
        self.max - self.min
    }
}

/// Rotate a set of points about the origin by `angle` radians.
#[must_use]
pub fn rotate_points(points: &[Point2<f64>], angle: f64) -> Vec<Point2<f64>> {
    let (sin, cos) = angle.sin_cos();
    points
        .iter()
        .map(|p| Point2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
        .collect()
}

/// Candidate alignment angles from the edges of a convex hull.
///
/// Each hull edge yields the rotation that would make it horizontal,
/// normalized into `[0, pi)`. Degenerate edges are skipped, and angles
/// closer than `1e-4` rad after sorting collapse to one candidate. An
/// empty result means the hull had no usable edge; callers fall back to
/// angle zero.
#[must_use]
pub fn edge_angles(hull: &[Point2<f64>]) -> Vec<f64> {
    let n = hull.len();
    let mut angles = Vec::with_capacity(n);
    for i in 0..n {
        let a = hull[i];
        let b = hull[(i + 1) % n];
        let d = b - a;
        if d.norm_squared() < MIN_EDGE_LENGTH_SQ {
            continue;
        }
        let mut angle = d.y.atan2(d.x);
        // Fold into [0, pi): a box is symmetric under half turns.
        angle = angle.rem_euclid(std::f64::consts::PI);
        if std::f64::consts::PI - angle < ANGLE_DEDUP_EPS {
            angle = 0.0;
        }
        angles.push(angle);
    }
    angles.sort_unstable_by(f64::total_cmp);
    angles.dedup_by(|a, b| (*a - *b).abs() < ANGLE_DEDUP_EPS);
    angles
}

/// Find the rotation of the plane that minimizes the axis-aligned bounding
/// box area of `points`.
///
/// `hull` supplies the candidate angles (one per hull edge); for each
/// candidate the full point set is rotated by the negated edge angle and
/// its axis-aligned bounds measured. The first candidate to reach the
/// minimum area wins ties. With no usable candidates the box at angle zero
/// is returned.
///
/// # Example
///
/// ```
/// use pose_hull::{convex_hull, min_area_box};
/// use pose_types::Point2;
///
/// // Unit square rotated 45 degrees.
/// let s = std::f64::consts::FRAC_1_SQRT_2;
/// let points = vec![
///     Point2::new(0.0, -s),
///     Point2::new(s, 0.0),
///     Point2::new(0.0, s),
///     Point2::new(-s, 0.0),
/// ];
/// let hull = convex_hull(&points);
/// let b = min_area_box(&points, &hull);
/// assert!((b.area - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn min_area_box(points: &[Point2<f64>], hull: &[Point2<f64>]) -> MinAreaBox {
    let candidates = edge_angles(hull);
    let mut best = box_at_angle(points, 0.0);
    for &edge_angle in &candidates {
        let candidate = box_at_angle(points, -edge_angle);
        if candidate.area < best.area {
            best = candidate;
        }
    }
    best
}

fn box_at_angle(points: &[Point2<f64>], angle: f64) -> MinAreaBox {
    let rotated = rotate_points(points, angle);
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &rotated {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    if points.is_empty() {
        min = Point2::origin();
        max = Point2::origin();
    }
    let extent = max - min;
    MinAreaBox {
        angle,
        min,
        max,
        area: extent.x * extent.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convex_hull;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn axis_aligned_rectangle_keeps_angle_zero() {
        let points = vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 1.0), p(0.0, 1.0)];
        let hull = convex_hull(&points);
        let b = min_area_box(&points, &hull);
        assert_relative_eq!(b.area, 3.0, epsilon = 1e-12);
        // One of the candidates is 0 and ties go to the first minimum.
        assert!(b.angle.abs() < 1e-12 || (b.angle.abs() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        let e = b.extents();
        assert_relative_eq!(e.x.max(e.y), 3.0, epsilon = 1e-12);
        assert_relative_eq!(e.x.min(e.y), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tilted_rectangle_recovered() {
        let base = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(0.0, 2.0)];
        let tilt = 0.35;
        let points = rotate_points(&base, tilt);
        let hull = convex_hull(&points);
        let b = min_area_box(&points, &hull);
        assert_relative_eq!(b.area, 8.0, epsilon = 1e-9);
        let e = b.extents();
        assert_relative_eq!(e.x.max(e.y), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn box_area_at_most_axis_aligned_area() {
        let points = vec![
            p(0.1, 0.2),
            p(2.3, 0.9),
            p(1.7, 3.1),
            p(-0.4, 2.2),
            p(1.0, 1.0),
        ];
        let hull = convex_hull(&points);
        let b = min_area_box(&points, &hull);
        let aligned = box_at_angle(&points, 0.0);
        assert!(b.area <= aligned.area + 1e-12);
    }

    #[test]
    fn area_scales_quadratically() {
        let points = vec![
            p(0.1, 0.2),
            p(2.3, 0.9),
            p(1.7, 3.1),
            p(-0.4, 2.2),
        ];
        let hull = convex_hull(&points);
        let base = min_area_box(&points, &hull);

        let k = 2.5;
        let scaled: Vec<_> = points.iter().map(|q| p(q.x * k, q.y * k)).collect();
        let scaled_hull = convex_hull(&scaled);
        let big = min_area_box(&scaled, &scaled_hull);
        assert_relative_eq!(big.area, base.area * k * k, epsilon = 1e-9);
    }

    #[test]
    fn edge_angles_fold_and_dedup() {
        // Square: four edges, two distinct angles (0 and pi/2).
        let hull = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let angles = edge_angles(&hull);
        assert_eq!(angles.len(), 2);
        assert!(angles[0].abs() < 1e-12);
        assert_relative_eq!(angles[1], std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_edges_skipped() {
        let hull = vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)];
        let angles = edge_angles(&hull);
        // Zero-length edge contributes nothing; the two real edges fold to 0.
        assert_eq!(angles.len(), 1);
    }

    #[test]
    fn empty_input_gives_zero_box() {
        let b = min_area_box(&[], &[]);
        assert_eq!(b.angle, 0.0);
        assert_eq!(b.area, 0.0);
    }

    #[test]
    fn rotate_points_quarter_turn() {
        let r = rotate_points(&[p(1.0, 0.0)], std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(r[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(r[0].y, 1.0, epsilon = 1e-12);
    }
}
