//! Wall-mounted rule.

use pose_types::{Aabb3, CardinalAxis, Point3};

use crate::{Classification, ClassifyInput, Placement};

/// Thickness of the boundary bands, as a fraction of the extent.
const BAND_FACTOR: f64 = 0.01;
/// The full transverse cross-section may exceed the wall face by at most
/// this factor.
const MAX_TRANSVERSE_RATIO: f64 = 10.0;

/// A wall object concentrates its geometry in one thin vertical band: the
/// band with the largest face area marks the mounted side, and the whole
/// cross-section transverse to it must stay comparable to that face. The
/// front then points from the wall into the interior.
pub(crate) fn rule(input: &ClassifyInput) -> Option<Classification> {
    let extents = input.bounds.extents();

    let mut side = CardinalAxis::PosX;
    let mut best_face = f64::NEG_INFINITY;
    for axis in CardinalAxis::ALL {
        let face = band_face_area(input, axis);
        if face > best_face {
            side = axis;
            best_face = face;
        }
    }
    if best_face <= 0.0 {
        return None;
    }

    let transverse = match side {
        CardinalAxis::PosX | CardinalAxis::NegX => extents.y * extents.z,
        CardinalAxis::PosY | CardinalAxis::NegY => extents.x * extents.z,
    };
    if transverse >= MAX_TRANSVERSE_RATIO * best_face {
        return None;
    }

    let front = side.opposite();
    Some(Classification {
        placement: Placement::Wall,
        quarter_turns: front.quarter_turns_to_pos_y(),
    })
}

/// Face area of one boundary band: the bounds of the vertices inside the
/// band, measured transverse to the band axis (band volume over band
/// thickness, without the division).
fn band_face_area(input: &ClassifyInput, side: CardinalAxis) -> f64 {
    let b = input.bounds;
    let in_band = |v: &&Point3<f64>| match side {
        CardinalAxis::PosX => v.x >= b.x_at(1.0 - BAND_FACTOR),
        CardinalAxis::NegX => v.x <= b.x_at(BAND_FACTOR),
        CardinalAxis::PosY => v.y >= b.y_at(1.0 - BAND_FACTOR),
        CardinalAxis::NegY => v.y <= b.y_at(BAND_FACTOR),
    };
    let band = Aabb3::from_points(input.vertices.iter().filter(in_band).copied());
    let e = band.extents();
    match side {
        CardinalAxis::PosX | CardinalAxis::NegX => e.y * e.z,
        CardinalAxis::PosY | CardinalAxis::NegY => e.x * e.z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pose_slice::CogResult;

    fn box_vertices(ex: f64, ey: f64, ez: f64) -> Vec<Point3<f64>> {
        let mut v = Vec::new();
        for &x in &[0.0, ex] {
            for &y in &[0.0, ey] {
                for &z in &[0.0, ez] {
                    v.push(Point3::new(x, y, z));
                }
            }
        }
        v
    }

    #[test]
    fn thin_slab_matches_with_interior_front() {
        let vertices = box_vertices(0.1, 2.0, 2.0);
        let cog = CogResult::default();
        let bounds = Aabb3::from_points(vertices.iter().copied());
        let c = rule(&ClassifyInput {
            cog: &cog,
            bounds,
            vertices: &vertices,
        });
        assert_eq!(c.map(|c| c.placement), Some(Placement::Wall));
        // Tie between the +-X faces resolves to +X; front is -X.
        assert_eq!(c.map(|c| c.quarter_turns), Some(3));
    }

    #[test]
    fn slab_against_y_front_points_in() {
        // Thin along Y: the largest faces are the +-Y sides.
        let vertices = box_vertices(2.0, 0.1, 2.0);
        let cog = CogResult::default();
        let bounds = Aabb3::from_points(vertices.iter().copied());
        let c = rule(&ClassifyInput {
            cog: &cog,
            bounds,
            vertices: &vertices,
        });
        assert_eq!(c.map(|c| c.placement), Some(Placement::Wall));
        // Wall side +Y, front -Y.
        assert_eq!(c.map(|c| c.quarter_turns), Some(2));
    }

    #[test]
    fn sparse_bands_rejected() {
        // Band vertices exist but have no transverse spread.
        let vertices = vec![
            Point3::new(0.0, 0.5, 0.5),
            Point3::new(2.0, 0.5, 0.5),
            Point3::new(1.0, 0.0, 0.5),
            Point3::new(1.0, 1.0, 0.5),
            Point3::new(1.0, 0.5, 0.0),
            Point3::new(1.0, 0.5, 1.0),
        ];
        let cog = CogResult::default();
        let bounds = Aabb3::from_points(vertices.iter().copied());
        assert!(rule(&ClassifyInput {
            cog: &cog,
            bounds,
            vertices: &vertices,
        })
        .is_none());
    }

    #[test]
    fn empty_vertices_rejected() {
        let cog = CogResult::default();
        assert!(rule(&ClassifyInput {
            cog: &cog,
            bounds: Aabb3::default(),
            vertices: &[],
        })
        .is_none());
    }
}
