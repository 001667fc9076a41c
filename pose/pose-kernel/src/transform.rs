//! In-place grouping transforms over flattened batch buffers.

use nalgebra::UnitQuaternion;
use pose_types::{Point3, Vector3};
use tracing::debug;

use crate::kernel::partition_ranges;
use crate::KernelError;

/// Fold per-object transforms into flattened vertex buffers and rebase
/// edge indices to the global vertex space.
///
/// For object `i`, every vertex becomes
/// `rotations[i] * (scales[i] .* v) + offsets[i]`, and its object-local
/// edge indices are shifted by the object's vertex base offset. After this
/// pass the whole batch lives in one shared coordinate and index space,
/// ready for grouped export.
///
/// # Errors
///
/// [`KernelError::ObjectCountMismatch`] when the per-object arrays differ
/// in length, [`KernelError::CountMismatch`] when a count array does not
/// sum to its buffer's length.
pub fn apply_transforms(
    positions: &mut [Point3<f64>],
    edges: &mut [[u32; 2]],
    vertex_counts: &[u32],
    edge_counts: &[u32],
    rotations: &[UnitQuaternion<f64>],
    scales: &[Vector3<f64>],
    offsets: &[Vector3<f64>],
) -> Result<(), KernelError> {
    for len in [rotations.len(), scales.len(), offsets.len()] {
        if len != vertex_counts.len() {
            return Err(KernelError::object_count_mismatch(vertex_counts.len(), len));
        }
    }
    let ranges = partition_ranges(positions.len(), edges.len(), vertex_counts, edge_counts)?;

    for (i, (vertex_range, edge_range)) in ranges.into_iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let base = vertex_range.start as u32;
        for p in &mut positions[vertex_range] {
            let scaled = p.coords.component_mul(&scales[i]);
            p.coords = rotations[i] * scaled + offsets[i];
        }
        for e in &mut edges[edge_range] {
            e[0] += base;
            e[1] += base;
        }
    }

    debug!(objects = vertex_counts.len(), "applied grouping transforms");
    Ok(())
}
