//! Free-standing (ground) rule and its front-axis sub-rules.

use pose_hull::{convex_hull, point_in_polygon};
use pose_types::{Aabb2, CardinalAxis, Point2, Vector2};

use crate::{Classification, ClassifyInput, GroundRule, Placement};

/// Height fraction of the band whose vertices form the base hull.
const BASE_BAND_FACTOR: f64 = 0.05;
/// The prism footprint may exceed the base box by at most this factor.
const MAX_FOOTPRINT_RATIO: f64 = 4.0;
/// Interior cross-sections must all stay above this area.
const MIN_INTERIOR_SECTION: f64 = 1.5e-4;
/// A stand slice is one whose box area is this much under the full box.
const STAND_AREA_RATIO: f64 = 5.0;
/// Top-slice centroid offset (as a fraction of extent) that triggers a snap.
const TOP_SNAP_FACTOR: f64 = 0.05;
/// Objects under this bounding volume get the reversed small-object snap.
const SMALL_VOLUME: f64 = 0.05;
/// Footprint aspect under which the offset is snapped without re-alignment.
const SQUARISH_ASPECT: f64 = 2.0;

/// A ground object rests on a base comparable to its body: the base hull
/// must carry the silhouette (footprint ratio), the interior may not pinch
/// off, and the center of gravity must fall inside the base.
pub(crate) fn rule(input: &ClassifyInput) -> Option<Classification> {
    let bounds = input.bounds;
    let height = bounds.height();

    let base_z = bounds.z_at(BASE_BAND_FACTOR);
    let base_points: Vec<Point2<f64>> = input
        .vertices
        .iter()
        .filter(|v| v.z <= base_z)
        .map(|v| Point2::new(v.x, v.y))
        .collect();
    let base_hull = convex_hull(&base_points);
    if base_hull.len() < 3 {
        return None;
    }
    let base_area = Aabb2::from_points(base_hull.iter().copied()).area();
    if base_area <= 0.0 {
        return None;
    }

    // Treat the object as a prism of equal volume; a zero-height object is
    // its own footprint.
    let prism_footprint = if height > f64::EPSILON {
        bounds.volume() / height
    } else {
        bounds.footprint().area()
    };
    if prism_footprint / base_area >= MAX_FOOTPRINT_RATIO {
        return None;
    }

    let slices = &input.cog.slices;
    if slices.len() > 2 {
        let min_interior = slices[1..slices.len() - 1]
            .iter()
            .map(|s| s.area)
            .fold(f64::INFINITY, f64::min);
        if min_interior <= MIN_INTERIOR_SECTION {
            return None;
        }
    }

    let cog_xy = Point2::new(input.cog.overall.x, input.cog.overall.y);
    if !point_in_polygon(cog_xy, &base_hull) {
        return None;
    }

    let (sub_rule, quarter_turns) = front_rule(input);
    Some(Classification {
        placement: Placement::Ground(sub_rule),
        quarter_turns,
    })
}

fn front_rule(input: &ClassifyInput) -> (GroundRule, u8) {
    if let Some(turns) = stand_snap(input) {
        return (GroundRule::Stand, turns);
    }
    if let Some(turns) = top_snap(input) {
        return (GroundRule::Top, turns);
    }
    fallback(input)
}

/// A narrow stand shows as several lower-half slices with a box area far
/// under the full footprint box. Their area-weighted centroid offset from
/// the overall center of gravity points along the stand's reach.
fn stand_snap(input: &ClassifyInput) -> Option<u8> {
    let full_area = input.bounds.footprint().area();
    if full_area <= 0.0 {
        return None;
    }
    let half_z = input.bounds.z_at(0.5);
    let cog_xy = Vector2::new(input.cog.overall.x, input.cog.overall.y);

    let slices = &input.cog.slices;
    let mut offset = Vector2::zeros();
    let mut weight = 0.0;
    let mut matches = 0usize;
    for (i, slice) in slices.iter().enumerate() {
        // Interior lower-half slices only; the base itself is excluded.
        if i == 0 || i + 1 >= slices.len() {
            continue;
        }
        if slice.mid_z >= half_z || !slice.is_occupied() {
            continue;
        }
        let box_area = slice.bounds.area();
        if box_area <= 0.0 || full_area / box_area <= STAND_AREA_RATIO {
            continue;
        }
        offset += (slice.centroid - cog_xy) * slice.area;
        weight += slice.area;
        matches += 1;
    }
    if matches < 2 || weight <= 0.0 {
        return None;
    }
    let axis = CardinalAxis::most_similar(offset / weight, None);
    Some(axis.quarter_turns_to_pos_y())
}

/// The top slice leaning clearly off the footprint center marks the front.
fn top_snap(input: &ClassifyInput) -> Option<u8> {
    let top = input.cog.occupied_slices().last()?;
    let footprint = input.bounds.footprint();
    let center = footprint.center();
    let extents = footprint.extents();
    let offset = Vector2::new(top.centroid.x - center.x, top.centroid.y - center.y);
    if offset.x.abs() > TOP_SNAP_FACTOR * extents.x || offset.y.abs() > TOP_SNAP_FACTOR * extents.y
    {
        let axis = CardinalAxis::most_similar(offset, None);
        return Some(axis.quarter_turns_to_pos_y());
    }
    None
}

fn fallback(input: &ClassifyInput) -> (GroundRule, u8) {
    let footprint = input.bounds.footprint();
    let center = footprint.center();
    let offset = Vector2::new(
        input.cog.overall.x - center.x,
        input.cog.overall.y - center.y,
    );

    if input.bounds.volume() < SMALL_VOLUME {
        let turns = CardinalAxis::most_similar(offset, None).quarter_turns_to_pos_y();
        return (GroundRule::Small, (turns + 2) % 4);
    }

    let extents = footprint.extents();
    let long = extents.x.max(extents.y);
    let short = extents.x.min(extents.y);
    if short > 0.0 && long / short < SQUARISH_ASPECT {
        let turns = CardinalAxis::most_similar(offset, None).quarter_turns_to_pos_y();
        return (GroundRule::Squarish, turns);
    }

    // Lay the long footprint axis onto X, then pick front or back.
    let pre_turns = u8::from(extents.y > extents.x);
    let rotated = if pre_turns == 1 {
        Vector2::new(-offset.y, offset.x)
    } else {
        offset
    };
    let axis = CardinalAxis::most_similar(
        rotated,
        Some(&[CardinalAxis::PosY, CardinalAxis::NegY]),
    );
    (
        GroundRule::LongAxis,
        (pre_turns + axis.quarter_turns_to_pos_y()) % 4,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pose_slice::{CogResult, Slice};
    use pose_types::{Aabb3, Point3, Vector3};

    fn box_slice(area: f64, cx: f64, cy: f64, half_x: f64, half_y: f64, mid_z: f64) -> Slice {
        Slice {
            area,
            centroid: Vector2::new(cx, cy),
            bounds: Aabb2 {
                min: Point2::new(cx - half_x, cy - half_y),
                max: Point2::new(cx + half_x, cy + half_y),
            },
            mid_z,
        }
    }

    fn base_vertices() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ]
    }

    fn unit_bounds() -> Aabb3 {
        Aabb3 {
            min: Point3::origin(),
            max: Point3::new(1.0, 1.0, 1.0),
        }
    }

    fn full_slices() -> Vec<Slice> {
        (0..5)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                box_slice(1.0, 0.5, 0.5, 0.5, 0.5, 0.1 + 0.2 * i as f64)
            })
            .collect()
    }

    #[test]
    fn solid_block_matches() {
        let vertices = base_vertices();
        let cog = CogResult {
            overall: Vector3::new(0.5, 0.5, 0.5),
            slices: full_slices(),
            total_area: 5.0,
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds: unit_bounds(),
            vertices: &vertices,
        };
        let c = rule(&input);
        assert!(matches!(
            c.map(|c| c.placement),
            Some(Placement::Ground(_))
        ));
    }

    #[test]
    fn cog_outside_base_rejected() {
        let vertices = base_vertices();
        let cog = CogResult {
            overall: Vector3::new(1.8, 0.5, 0.5),
            slices: full_slices(),
            total_area: 5.0,
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds: unit_bounds(),
            vertices: &vertices,
        };
        assert!(rule(&input).is_none());
    }

    #[test]
    fn pinched_interior_rejected() {
        let vertices = base_vertices();
        let mut slices = full_slices();
        slices[2].area = 0.0;
        let cog = CogResult {
            overall: Vector3::new(0.5, 0.5, 0.5),
            slices,
            total_area: 4.0,
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds: unit_bounds(),
            vertices: &vertices,
        };
        assert!(rule(&input).is_none());
    }

    #[test]
    fn tiny_base_rejected() {
        // Wide body over a narrow base: the prism footprint dwarfs the base.
        let vertices = vec![
            Point3::new(0.45, 0.45, 0.0),
            Point3::new(0.55, 0.45, 0.0),
            Point3::new(0.55, 0.55, 0.0),
            Point3::new(0.45, 0.55, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ];
        let cog = CogResult {
            overall: Vector3::new(0.5, 0.5, 0.7),
            slices: full_slices(),
            total_area: 5.0,
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds: unit_bounds(),
            vertices: &vertices,
        };
        assert!(rule(&input).is_none());
    }

    #[test]
    fn stand_snap_wins_over_fallback() {
        let vertices = base_vertices();
        // Full base and top, narrow stem through the lower half offset +X.
        let slices = vec![
            box_slice(1.0, 0.5, 0.5, 0.5, 0.5, 0.1),
            box_slice(0.04, 0.7, 0.5, 0.1, 0.1, 0.3),
            box_slice(0.04, 0.7, 0.5, 0.1, 0.1, 0.45),
            box_slice(1.0, 0.5, 0.5, 0.5, 0.5, 0.7),
            box_slice(1.0, 0.5, 0.5, 0.5, 0.5, 0.9),
        ];
        let cog = CogResult {
            overall: Vector3::new(0.5, 0.5, 0.6),
            slices,
            total_area: 3.08,
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds: unit_bounds(),
            vertices: &vertices,
        };
        let c = rule(&input);
        assert_eq!(
            c.map(|c| c.placement),
            Some(Placement::Ground(GroundRule::Stand))
        );
        // Stem centroids sit +X of the center of gravity.
        assert_eq!(c.map(|c| c.quarter_turns), Some(1));
    }

    #[test]
    fn top_snap_on_leaning_top() {
        let vertices = base_vertices();
        let mut slices = full_slices();
        // Top slice shifted well past 5% of the extent toward -Y.
        slices[4] = box_slice(0.5, 0.5, 0.2, 0.3, 0.2, 0.9);
        let cog = CogResult {
            overall: Vector3::new(0.5, 0.45, 0.5),
            slices,
            total_area: 4.5,
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds: unit_bounds(),
            vertices: &vertices,
        };
        let c = rule(&input);
        assert_eq!(
            c.map(|c| c.placement),
            Some(Placement::Ground(GroundRule::Top))
        );
        assert_eq!(c.map(|c| c.quarter_turns), Some(2));
    }

    #[test]
    fn small_object_snaps_reversed() {
        // A 0.2-cube: volume well under the small threshold.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.2, 0.0, 0.0),
            Point3::new(0.2, 0.2, 0.0),
            Point3::new(0.0, 0.2, 0.0),
            Point3::new(0.2, 0.2, 0.2),
        ];
        let slices = vec![
            box_slice(0.04, 0.1, 0.1, 0.1, 0.1, 0.05),
            box_slice(0.04, 0.1, 0.1, 0.1, 0.1, 0.15),
        ];
        let cog = CogResult {
            overall: Vector3::new(0.1, 0.14, 0.1),
            slices,
            total_area: 0.08,
        };
        let bounds = Aabb3 {
            min: Point3::origin(),
            max: Point3::new(0.2, 0.2, 0.2),
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds,
            vertices: &vertices,
        };
        let c = rule(&input);
        assert_eq!(
            c.map(|c| c.placement),
            Some(Placement::Ground(GroundRule::Small))
        );
        // Offset points +Y; the reversed snap lands on 2 quarter turns.
        assert_eq!(c.map(|c| c.quarter_turns), Some(2));
    }

    #[test]
    fn elongated_footprint_aligns_long_axis() {
        // 3 x 1 x 1 box, slightly back-heavy.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(3.0, 1.0, 1.0),
        ];
        let slices = vec![
            box_slice(3.0, 1.5, 0.5, 1.5, 0.5, 0.17),
            box_slice(3.0, 1.5, 0.5, 1.5, 0.5, 0.5),
            box_slice(3.0, 1.5, 0.5, 1.5, 0.5, 0.83),
        ];
        let cog = CogResult {
            overall: Vector3::new(1.5, 0.4, 0.5),
            slices,
            total_area: 9.0,
        };
        let bounds = Aabb3 {
            min: Point3::origin(),
            max: Point3::new(3.0, 1.0, 1.0),
        };
        let input = ClassifyInput {
            cog: &cog,
            bounds,
            vertices: &vertices,
        };
        let c = rule(&input);
        assert_eq!(
            c.map(|c| c.placement),
            Some(Placement::Ground(GroundRule::LongAxis))
        );
        // X already the long axis; offset -Y snaps to NegY.
        assert_eq!(c.map(|c| c.quarter_turns), Some(2));
    }
}
