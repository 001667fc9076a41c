//! Andrew's monotone-chain convex hull.

use pose_types::Point2;

/// Cross product of (a->b) x (a->c); positive for a left turn.
#[inline]
fn cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Compute the 2D convex hull of a point set.
///
/// Points are sorted lexicographically by (x, y) and deduplicated; the hull
/// is built as lower + upper chains, popping while the last turn is not a
/// strict left turn (cross product <= 0), so collinear boundary points are
/// dropped. Three or fewer distinct points are returned as-is (sorted).
///
/// The result is in counter-clockwise order starting from the
/// lexicographically smallest point. The input is left untouched; callers
/// holding reusable buffers keep them.
///
/// # Example
///
/// ```
/// use pose_hull::convex_hull;
/// use pose_types::Point2;
///
/// let square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 4.0),
///     Point2::new(0.0, 4.0),
///     Point2::new(2.0, 2.0),
/// ];
/// let hull = convex_hull(&square);
/// assert!(!hull.contains(&Point2::new(2.0, 2.0)));
/// ```
#[must_use]
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut points = points.to_vec();
    points.sort_unstable_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    if points.len() <= 3 {
        return points;
    }

    let mut hull: Vec<Point2<f64>> = Vec::with_capacity(points.len() + 1);

    // Lower chain
    for &p in &points {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain
    let lower_len = hull.len();
    for &p in points.iter().rev().skip(1) {
        while hull.len() > lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }

    // Last point repeats the first.
    hull.pop();
    hull
}
