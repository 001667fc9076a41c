//! Per-object and batch standardization entrypoints.

use std::f64::consts::FRAC_PI_2;
use std::ops::Range;

use nalgebra::UnitQuaternion;
use pose_classify::{classify, ClassifyInput, Placement};
use pose_graph::VertexAdjacency;
use pose_hull::{convex_hull, min_area_box};
use pose_slice::{compute_cog, SliceScratch};
use pose_types::{Aabb3, Point2, Point3, Vector3};
use pose_voxel::{select_wire_vertices, wire_candidates, VoxelGrid};
use rayon::prelude::*;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{KernelError, KernelParams};

/// The standardizing pose of one object.
///
/// Applying `rotation` to the raw positions and then subtracting
/// `translation` puts the object front-forward (+Y) with its center of
/// gravity at the origin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientationResult {
    /// Rotation about +Z aligning the front to +Y.
    pub rotation: UnitQuaternion<f64>,
    /// Center of gravity, expressed in the rotated frame.
    pub translation: Vector3<f64>,
    /// Mounting style the classifier settled on.
    pub placement: Placement,
    /// The angle `rotation` encodes, in radians.
    pub forward_angle: f64,
}

impl OrientationResult {
    /// Identity pose; returned for degenerate inputs.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
            placement: Placement::Ceiling,
            forward_angle: 0.0,
        }
    }
}

/// Standardize one object given its point set and wireframe edges.
///
/// `normals`, when present, must be parallel to `positions`. Degenerate
/// inputs (empty buffers, non-positive slice height, mismatched normals)
/// yield [`OrientationResult::neutral`] rather than an error; a malformed
/// object must never take a batch down with it. A single-vertex object
/// keeps the identity rotation with its position as the anchor.
#[must_use]
pub fn standardize_object(
    positions: &[Point3<f64>],
    normals: Option<&[Vector3<f64>]>,
    edges: &[[u32; 2]],
    params: &KernelParams,
) -> OrientationResult {
    let mut scratch = SliceScratch::new();
    standardize_with_scratch(positions, normals, edges, params, &mut scratch)
}

pub(crate) fn standardize_with_scratch(
    positions: &[Point3<f64>],
    normals: Option<&[Vector3<f64>]>,
    edges: &[[u32; 2]],
    params: &KernelParams,
    scratch: &mut SliceScratch,
) -> OrientationResult {
    if positions.is_empty() || params.slice_height <= 0.0 {
        warn!(
            vertices = positions.len(),
            slice_height = params.slice_height,
            "degenerate input, returning neutral pose"
        );
        return OrientationResult::neutral();
    }
    if let Some(n) = normals {
        if n.len() != positions.len() {
            warn!(
                normals = n.len(),
                vertices = positions.len(),
                "normal buffer length mismatch, returning neutral pose"
            );
            return OrientationResult::neutral();
        }
    }
    if positions.len() == 1 {
        return OrientationResult {
            rotation: UnitQuaternion::identity(),
            translation: positions[0].coords,
            placement: Placement::Ceiling,
            forward_angle: 0.0,
        };
    }

    let adjacency = VertexAdjacency::build(edges, positions.len());
    let grid = VoxelGrid::build(positions, normals, &params.voxel);
    let candidates = wire_candidates(&grid, &params.voxel);
    let mask = select_wire_vertices(&grid, &candidates, &adjacency, positions.len());

    // Silhouette = the unmasked vertices; if masking ate everything, fall
    // back to the full set.
    let mut silhouette_xy: Vec<Point2<f64>> = positions
        .iter()
        .zip(&mask)
        .filter(|(_, &masked)| !masked)
        .map(|(p, _)| Point2::new(p.x, p.y))
        .collect();
    if silhouette_xy.is_empty() {
        silhouette_xy = positions.iter().map(|p| Point2::new(p.x, p.y)).collect();
    }

    let hull = convex_hull(&silhouette_xy);
    let min_box = min_area_box(&silhouette_xy, &hull);
    let forward = min_box.angle;

    let (sin, cos) = forward.sin_cos();
    let rotated: Vec<Point3<f64>> = positions
        .iter()
        .map(|p| Point3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z))
        .collect();
    let mut silhouette: Vec<Point3<f64>> = rotated
        .iter()
        .zip(&mask)
        .filter(|(_, &masked)| !masked)
        .map(|(p, _)| *p)
        .collect();
    if silhouette.is_empty() {
        silhouette.clone_from(&rotated);
    }
    let bounds = Aabb3::from_points(silhouette.iter().copied());

    let cog = compute_cog(&rotated, edges, params.slice_height, scratch);
    let classification = classify(&ClassifyInput {
        cog: &cog,
        bounds,
        vertices: &silhouette,
    });

    let turn_angle = f64::from(classification.quarter_turns) * FRAC_PI_2;
    let final_angle = forward + turn_angle;
    let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), final_angle);

    // The center of gravity is in the forward-aligned frame; apply the
    // remaining quarter turns to land in the final frame.
    let (ts, tc) = turn_angle.sin_cos();
    let translation = Vector3::new(
        cog.overall.x * tc - cog.overall.y * ts,
        cog.overall.x * ts + cog.overall.y * tc,
        cog.overall.z,
    );

    debug!(
        placement = ?classification.placement,
        forward,
        quarter_turns = classification.quarter_turns,
        "standardized object"
    );

    OrientationResult {
        rotation,
        translation,
        placement: classification.placement,
        forward_angle: final_angle,
    }
}

/// Standardize a batch of objects packed into flattened buffers.
///
/// `vertex_counts[i]` and `edge_counts[i]` give object `i`'s sub-range of
/// `positions` and `edges`; edge indices are object-local. The count
/// arrays must partition their buffers exactly, otherwise the whole batch
/// is rejected with a [`KernelError`]. Objects are independent and are
/// processed in parallel; their results come back in input order.
///
/// # Errors
///
/// [`KernelError::ObjectCountMismatch`] when the two count arrays differ
/// in length, [`KernelError::CountMismatch`] when either does not sum to
/// its buffer's length.
pub fn standardize_batch(
    positions: &[Point3<f64>],
    edges: &[[u32; 2]],
    vertex_counts: &[u32],
    edge_counts: &[u32],
    params: &KernelParams,
) -> Result<Vec<OrientationResult>, KernelError> {
    let ranges = partition_ranges(positions.len(), edges.len(), vertex_counts, edge_counts)?;
    debug!(objects = ranges.len(), "standardizing batch");
    let results = ranges
        .into_par_iter()
        .map_init(SliceScratch::new, |scratch, (vr, er)| {
            standardize_with_scratch(&positions[vr], None, &edges[er], params, scratch)
        })
        .collect();
    Ok(results)
}

pub(crate) fn partition_ranges(
    vertex_total: usize,
    edge_total: usize,
    vertex_counts: &[u32],
    edge_counts: &[u32],
) -> Result<Vec<(Range<usize>, Range<usize>)>, KernelError> {
    if vertex_counts.len() != edge_counts.len() {
        return Err(KernelError::object_count_mismatch(
            vertex_counts.len(),
            edge_counts.len(),
        ));
    }
    let vertex_sum: usize = vertex_counts.iter().map(|&c| c as usize).sum();
    if vertex_sum != vertex_total {
        return Err(KernelError::count_mismatch(
            "vertices",
            vertex_sum,
            vertex_total,
        ));
    }
    let edge_sum: usize = edge_counts.iter().map(|&c| c as usize).sum();
    if edge_sum != edge_total {
        return Err(KernelError::count_mismatch("edges", edge_sum, edge_total));
    }

    let mut ranges = Vec::with_capacity(vertex_counts.len());
    let mut v0 = 0usize;
    let mut e0 = 0usize;
    for (&vc, &ec) in vertex_counts.iter().zip(edge_counts) {
        let v1 = v0 + vc as usize;
        let e1 = e0 + ec as usize;
        ranges.push((v0..v1, e0..e1));
        v0 = v1;
        e0 = e1;
    }
    Ok(ranges)
}
