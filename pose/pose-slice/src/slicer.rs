//! Band decomposition and center-of-gravity integration.

use pose_graph::UnionFind;
use pose_hull::{convex_hull, polygon_area_centroid};
use pose_types::{Aabb2, Point2, Point3, Vector2, Vector3};
use tracing::debug;

use crate::result::{CogResult, Slice};
use crate::scratch::SliceScratch;

/// Hard cap on the number of bands per object.
const MAX_SLICES: usize = 255;

/// Edges with a smaller Z span never intersect a band plane cleanly.
const MIN_EDGE_SPAN: f64 = 1e-8;

/// Coincident-point merge tolerance within one component.
const POINT_MERGE_EPS: f64 = 1e-9;

/// Component polygons below this area are dropped before weighting.
const MIN_POLYGON_AREA: f64 = 1e-12;

/// Integrate the center of gravity of a wireframe object by Z bands.
///
/// The object is cut into `min(255, ceil(height / slice_height))` bands of
/// uniform height, the topmost clamped to the object's maximum Z; a
/// zero-height object still gets one band. Per band, in-range vertices and
/// edge/plane intersection points are grouped by global edge-connectivity,
/// and each group with three or more distinct points contributes its
/// convex-hull polygon. The overall center of gravity weights each band's
/// centroid (at the band's Z midpoint) by its cross-section area.
///
/// Degenerate inputs degrade to neutral values rather than failing: an
/// empty vertex buffer or non-positive `slice_height` yields an empty
/// result, and an object with no measurable cross-section anywhere falls
/// back to the plain vertex mean.
pub fn compute_cog(
    vertices: &[Point3<f64>],
    edges: &[[u32; 2]],
    slice_height: f64,
    scratch: &mut SliceScratch,
) -> CogResult {
    if vertices.is_empty() || slice_height <= 0.0 {
        return CogResult::default();
    }

    let mut z0 = f64::INFINITY;
    let mut z1 = f64::NEG_INFINITY;
    for v in vertices {
        z0 = z0.min(v.z);
        z1 = z1.max(v.z);
    }
    let height = z1 - z0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let slice_count = ((height / slice_height).ceil() as usize).clamp(1, MAX_SLICES);

    let (labels, component_count) = connected_components(vertices.len(), edges);
    scratch.ensure_components(component_count as usize);

    let mut slice_points: Vec<Vec<(u32, Point2<f64>)>> = vec![Vec::new(); slice_count];
    bucket_vertices(vertices, &labels, z0, slice_height, &mut slice_points);
    bucket_crossings(vertices, edges, &labels, z0, slice_height, &mut slice_points);

    let mut slices = Vec::with_capacity(slice_count);
    let mut total_area = 0.0;
    let mut weighted = Vector3::zeros();
    for (i, points) in slice_points.into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let z_lo = z0 + i as f64 * slice_height;
        let z_hi = if i + 1 == slice_count {
            z1
        } else {
            z_lo + slice_height
        };
        let mid_z = 0.5 * (z_lo + z_hi);

        let slice = measure_band(points, mid_z, scratch);
        total_area += slice.area;
        weighted += Vector3::new(slice.centroid.x, slice.centroid.y, slice.mid_z) * slice.area;
        slices.push(slice);
    }

    let overall = if total_area > 0.0 {
        weighted / total_area
    } else {
        // No band produced a polygon anywhere (a bare point cloud with no
        // cross-sections); the vertex mean is the only anchor left.
        #[allow(clippy::cast_precision_loss)]
        let inv = 1.0 / vertices.len() as f64;
        vertices.iter().fold(Vector3::zeros(), |acc, v| acc + v.coords) * inv
    };

    debug!(
        slices = slices.len(),
        components = component_count,
        total_area,
        "integrated center of gravity"
    );

    CogResult {
        overall,
        slices,
        total_area,
    }
}

/// Global union-find over the edge graph. Out-of-range edges are skipped.
fn connected_components(vertex_count: usize, edges: &[[u32; 2]]) -> (Vec<u32>, u32) {
    let mut uf = UnionFind::new(vertex_count);
    let mut skipped = 0usize;
    for e in edges {
        if e[0] as usize >= vertex_count || e[1] as usize >= vertex_count {
            skipped += 1;
            continue;
        }
        uf.union(e[0], e[1]);
    }
    if skipped > 0 {
        debug!(skipped, "skipped out-of-range edges while labeling components");
    }
    uf.compress_labels()
}

fn bucket_vertices(
    vertices: &[Point3<f64>],
    labels: &[u32],
    z0: f64,
    slice_height: f64,
    slice_points: &mut [Vec<(u32, Point2<f64>)>],
) {
    let last = slice_points.len() - 1;
    for (v, p) in vertices.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let band = (((p.z - z0) / slice_height).floor() as usize).min(last);
        slice_points[band].push((labels[v], Point2::new(p.x, p.y)));
    }
}

/// Intersect each edge with the interior band planes it crosses; the
/// intersection point feeds the bands on both sides of the plane.
fn bucket_crossings(
    vertices: &[Point3<f64>],
    edges: &[[u32; 2]],
    labels: &[u32],
    z0: f64,
    slice_height: f64,
    slice_points: &mut [Vec<(u32, Point2<f64>)>],
) {
    let slice_count = slice_points.len();
    for e in edges {
        let (ia, ib) = (e[0] as usize, e[1] as usize);
        if ia >= vertices.len() || ib >= vertices.len() {
            continue;
        }
        let (a, b) = (vertices[ia], vertices[ib]);
        if (b.z - a.z).abs() < MIN_EDGE_SPAN {
            continue;
        }
        let z_min = a.z.min(b.z);
        let z_max = a.z.max(b.z);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k_start = (((z_min - z0) / slice_height).ceil() as usize).max(1);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let k_end = (((z_max - z0) / slice_height).floor() as usize).min(slice_count - 1);

        for k in k_start..=k_end {
            #[allow(clippy::cast_precision_loss)]
            let plane = z0 + k as f64 * slice_height;
            if plane < z_min || plane > z_max {
                continue;
            }
            let t = (plane - a.z) / (b.z - a.z);
            let point = Point2::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
            let label = labels[ia];
            slice_points[k - 1].push((label, point));
            slice_points[k].push((label, point));
        }
    }
}

/// Hull and measure one band's points, grouped by component.
fn measure_band(
    points: Vec<(u32, Point2<f64>)>,
    mid_z: f64,
    scratch: &mut SliceScratch,
) -> Slice {
    scratch.begin_slice();
    for (component, point) in points {
        scratch.push(component, point);
    }

    let mut area_sum = 0.0;
    let mut weighted = Vector2::zeros();
    let mut bounds_min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut bounds_max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

    for bucket in scratch.groups_mut() {
        bucket.sort_unstable_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        bucket.dedup_by(|a, b| {
            (a.x - b.x).abs() < POINT_MERGE_EPS && (a.y - b.y).abs() < POINT_MERGE_EPS
        });
        if bucket.len() < 3 {
            continue;
        }
        // Borrow, don't take: the bucket's storage is the whole point of
        // the scratch context and must survive into the next band.
        let hull = convex_hull(bucket);
        if hull.len() < 3 {
            continue;
        }
        let (signed_area, centroid) = polygon_area_centroid(&hull);
        let area = signed_area.abs();
        if area < MIN_POLYGON_AREA {
            continue;
        }
        area_sum += area;
        weighted += centroid * area;
        for p in &hull {
            bounds_min.x = bounds_min.x.min(p.x);
            bounds_min.y = bounds_min.y.min(p.y);
            bounds_max.x = bounds_max.x.max(p.x);
            bounds_max.y = bounds_max.y.max(p.y);
        }
    }

    if area_sum > 0.0 {
        Slice {
            area: area_sum,
            centroid: weighted / area_sum,
            bounds: Aabb2 {
                min: bounds_min,
                max: bounds_max,
            },
            mid_z,
        }
    } else {
        Slice::empty(mid_z)
    }
}
