//! Shoelace area/centroid and point containment for simple polygons.

use pose_types::{Point2, Vector2};

/// Signed area and centroid of a simple polygon via the shoelace formula.
///
/// Vertices are taken in order with implicit closure. The area is positive
/// for counter-clockwise winding. Polygons whose absolute area is below
/// `f64::EPSILON` get the vertex mean as centroid instead of the shoelace
/// centroid, which would otherwise divide by a vanishing area.
///
/// Returns `(signed_area, centroid)`; an empty polygon yields
/// `(0.0, origin)`.
#[must_use]
pub fn polygon_area_centroid(polygon: &[Point2<f64>]) -> (f64, Vector2<f64>) {
    let n = polygon.len();
    if n == 0 {
        return (0.0, Vector2::zeros());
    }

    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area2 += cross;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }

    let area = area2 * 0.5;
    if area.abs() < f64::EPSILON {
        let mut mean = Vector2::zeros();
        for p in polygon {
            mean += p.coords;
        }
        #[allow(clippy::cast_precision_loss)]
        return (area, mean / n as f64);
    }

    let inv = 1.0 / (6.0 * area);
    (area, Vector2::new(cx * inv, cy * inv))
}

/// Ray-casting parity test for point containment.
///
/// Casts a ray in +X from `point` and counts crossings against the polygon
/// edges (implicit closure). Points on an edge may land on either side.
#[must_use]
pub fn point_in_polygon(point: Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
