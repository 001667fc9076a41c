//! Wire candidate selection and per-vertex mask growth.

use hashbrown::HashSet;
use pose_graph::VertexAdjacency;
use tracing::debug;

use crate::grid::FACE_OFFSETS;
use crate::stats::iqr_trimmed_mean;
use crate::{VoxelGrid, VoxelKey, VoxelParams};

/// Share of the trimmed density allowed as growth per boundary group.
const GROWTH_CAP_FACTOR: f64 = 0.4;

/// Cells whose local statistics look like thin rod geometry.
///
/// A cell qualifies when its mean normal is short (radially spread
/// normals cancel), its first eigenvalue dominates the first two, and at
/// most `max_occupied_neighbors` of its six face neighbors are occupied.
/// Candidates with no face-adjacent candidate are discarded; a real wire
/// spans several cells.
#[must_use]
pub fn wire_candidates(grid: &VoxelGrid, params: &VoxelParams) -> Vec<VoxelKey> {
    let mut raw: HashSet<VoxelKey> = HashSet::new();
    for (key, cell) in grid.cells() {
        if cell.eigenvalues[0] <= 0.0 {
            continue;
        }
        if cell.mean_normal.norm() >= params.max_normal_magnitude {
            continue;
        }
        let pair = cell.eigenvalues[0] + cell.eigenvalues[1];
        if cell.eigenvalues[0] < params.linearity_dominance * pair {
            continue;
        }
        if grid.occupied_face_neighbors(key) > params.max_occupied_neighbors {
            continue;
        }
        raw.insert(*key);
    }

    let mut kept: Vec<VoxelKey> = raw
        .iter()
        .filter(|key| {
            FACE_OFFSETS.iter().any(|d| {
                raw.contains(&[key[0] + d[0], key[1] + d[1], key[2] + d[2]])
            })
        })
        .copied()
        .collect();
    kept.sort_unstable();

    debug!(
        raw = raw.len(),
        kept = kept.len(),
        "selected wire candidate cells"
    );
    kept
}

/// Grow candidate cells into a per-vertex wire mask.
///
/// Members of candidate cells are the seed set and are always masked. When
/// the seeds are a small minority (under one sixth of all vertices), the
/// mask additionally grows outward along the adjacency: the unmasked
/// one-ring boundary is split into connected groups, and each group is
/// grown breadth-first with a budget derived from the local vertex density
/// around the candidate cells. A frontier that would exceed the budget
/// halts that group's growth entirely.
///
/// Bits are only ever set, never cleared. An empty candidate set yields an
/// all-false mask.
#[must_use]
pub fn select_wire_vertices(
    grid: &VoxelGrid,
    candidates: &[VoxelKey],
    adjacency: &VertexAdjacency,
    vertex_count: usize,
) -> Vec<bool> {
    let mut mask = vec![false; vertex_count];
    if candidates.is_empty() {
        return mask;
    }

    let mut seed_count = 0usize;
    for key in candidates {
        if let Some(cell) = grid.cell(key) {
            for &v in &cell.members {
                if !mask[v as usize] {
                    mask[v as usize] = true;
                    seed_count += 1;
                }
            }
        }
    }

    // A large seed set means the "wire" is most of the object; growing the
    // mask further would erase legitimate structure.
    if seed_count >= vertex_count / 6 {
        debug!(seed_count, vertex_count, "seed set too large, skipping growth");
        return mask;
    }

    let density = neighborhood_density(grid, candidates, adjacency, &mask);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let limit = (density * GROWTH_CAP_FACTOR) as usize;
    debug!(seed_count, density, limit, "growing wire mask");

    let boundary = one_ring_boundary(adjacency, &mask);
    for group in boundary_groups(adjacency, &boundary) {
        grow_group(adjacency, &mut mask, group, limit);
    }
    mask
}

/// Trimmed mean count of distinct unmasked neighbors around candidate-cell
/// members.
///
/// The `seen` marks span the whole candidate loop: a vertex adjacent to
/// members of several cells contributes to one sample only. Wires that
/// converge on a shared junction must not inflate the estimate.
fn neighborhood_density(
    grid: &VoxelGrid,
    candidates: &[VoxelKey],
    adjacency: &VertexAdjacency,
    mask: &[bool],
) -> f64 {
    let mut samples = Vec::with_capacity(candidates.len());
    let mut seen = vec![false; mask.len()];
    for key in candidates {
        let Some(cell) = grid.cell(key) else {
            continue;
        };
        let mut count = 0usize;
        for &v in &cell.members {
            for &nb in adjacency.neighbors(v) {
                let nb = nb as usize;
                if !mask[nb] && !seen[nb] {
                    seen[nb] = true;
                    count += 1;
                }
            }
        }
        #[allow(clippy::cast_precision_loss)]
        samples.push(count as f64);
    }
    iqr_trimmed_mean(&samples)
}

/// Unmasked vertices adjacent to at least one masked vertex.
fn one_ring_boundary(adjacency: &VertexAdjacency, mask: &[bool]) -> Vec<u32> {
    let mut boundary = Vec::new();
    for (v, &masked) in mask.iter().enumerate() {
        if !masked {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        for &nb in adjacency.neighbors(v as u32) {
            if !mask[nb as usize] {
                boundary.push(nb);
            }
        }
    }
    boundary.sort_unstable();
    boundary.dedup();
    boundary
}

/// Partition the boundary into connected groups, walking only boundary
/// vertices.
fn boundary_groups(adjacency: &VertexAdjacency, boundary: &[u32]) -> Vec<Vec<u32>> {
    let in_boundary: HashSet<u32> = boundary.iter().copied().collect();
    let mut visited: HashSet<u32> = HashSet::new();
    let mut groups = Vec::new();

    for &start in boundary {
        if visited.contains(&start) {
            continue;
        }
        let mut group = Vec::new();
        let mut queue = vec![start];
        visited.insert(start);
        while let Some(v) = queue.pop() {
            group.push(v);
            for &nb in adjacency.neighbors(v) {
                if in_boundary.contains(&nb) && visited.insert(nb) {
                    queue.push(nb);
                }
            }
        }
        groups.push(group);
    }
    groups
}

/// Breadth-first growth of one boundary group, bounded by `limit` newly
/// masked vertices. A frontier that would push past the limit halts the
/// group without masking it.
fn grow_group(adjacency: &VertexAdjacency, mask: &mut [bool], group: Vec<u32>, limit: usize) {
    let mut frontier = group;
    let mut grown = 0usize;
    while !frontier.is_empty() {
        if grown + frontier.len() > limit {
            return;
        }
        let mut next = Vec::new();
        for &v in &frontier {
            if mask[v as usize] {
                continue;
            }
            mask[v as usize] = true;
            grown += 1;
            for &nb in adjacency.neighbors(v) {
                if !mask[nb as usize] {
                    next.push(nb);
                }
            }
        }
        next.sort_unstable();
        next.dedup();
        frontier = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pose_types::{Point3, Vector3};

    fn params() -> VoxelParams {
        VoxelParams::default().with_voxel_size(1.0)
    }

    /// Collinear points filling cells `[0,0,0]` and `[1,0,0]`.
    fn wire_vertices() -> Vec<Point3<f64>> {
        #[allow(clippy::cast_precision_loss)]
        (0..10)
            .map(|i| Point3::new(0.1 + 0.18 * f64::from(i), 0.5, 0.5))
            .collect()
    }

    #[test]
    fn adjacent_linear_cells_are_candidates() {
        let vertices = wire_vertices();
        let grid = VoxelGrid::build(&vertices, None, &params());
        let candidates = wire_candidates(&grid, &params());
        assert_eq!(candidates, vec![[0, 0, 0], [1, 0, 0]]);
    }

    #[test]
    fn isolated_candidate_discarded() {
        let mut vertices = wire_vertices();
        // A second, far-away linear run confined to a single cell.
        for i in 0..5 {
            #[allow(clippy::cast_precision_loss)]
            vertices.push(Point3::new(10.1 + 0.15 * f64::from(i), 0.5, 0.5));
        }
        let grid = VoxelGrid::build(&vertices, None, &params());
        let candidates = wire_candidates(&grid, &params());
        assert!(!candidates.contains(&[10, 0, 0]));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn coherent_normals_disqualify() {
        let vertices = wire_vertices();
        let normals = vec![Vector3::z(); vertices.len()];
        let grid = VoxelGrid::build(&vertices, Some(&normals), &params());
        assert!(wire_candidates(&grid, &params()).is_empty());
    }

    #[test]
    fn planar_cell_not_candidate() {
        let mut vertices = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                #[allow(clippy::cast_precision_loss)]
                vertices.push(Point3::new(
                    0.1 + 0.25 * f64::from(i),
                    0.1 + 0.25 * f64::from(j),
                    0.5,
                ));
            }
        }
        let grid = VoxelGrid::build(&vertices, None, &params());
        assert!(wire_candidates(&grid, &params()).is_empty());
    }

    #[test]
    fn empty_candidates_give_all_false_mask() {
        let vertices = wire_vertices();
        let grid = VoxelGrid::build(&vertices, None, &params());
        let adjacency = VertexAdjacency::build(&[], vertices.len());
        let mask = select_wire_vertices(&grid, &[], &adjacency, vertices.len());
        assert!(mask.iter().all(|&m| !m));
    }

    /// Ten seed vertices in one cell, ninety bulk vertices spread far away.
    fn growth_fixture() -> (Vec<Point3<f64>>, Vec<[u32; 2]>) {
        let mut vertices = wire_vertices();
        #[allow(clippy::cast_precision_loss)]
        for i in 0..90 {
            vertices.push(Point3::new(50.0 + f64::from(i), 0.5, 0.5));
        }
        // Each seed touches one bulk vertex; density sample = 5 per cell.
        let mut edges: Vec<[u32; 2]> = (0..10u32).map(|i| [i, 10 + i]).collect();
        // A chain hanging off bulk vertex 10 for cap testing.
        edges.extend([[10u32, 20], [20, 21], [21, 22], [22, 23], [23, 24]]);
        (vertices, edges)
    }

    #[test]
    fn seeds_always_masked_and_growth_capped() {
        let (vertices, edges) = growth_fixture();
        let grid = VoxelGrid::build(&vertices, None, &params());
        let adjacency = VertexAdjacency::build(&edges, vertices.len());
        let candidates = vec![[0i32, 0, 0], [1, 0, 0]];
        let mask = select_wire_vertices(&grid, &candidates, &adjacency, vertices.len());

        // All seeds masked.
        for v in 0..10 {
            assert!(mask[v], "seed {v} unmasked");
        }
        // Density is 5 per candidate cell, so the per-group budget is 2.
        // The chain group rooted at vertex 10 grows 10, 20 and halts when
        // the next frontier would exceed the budget.
        assert!(mask[10] && mask[20]);
        assert!(!mask[21] && !mask[22] && !mask[23]);
        // Untouched bulk stays unmasked.
        assert!(!mask[50]);
    }

    #[test]
    fn shared_neighbor_counted_once_in_density() {
        let mut vertices = wire_vertices();
        #[allow(clippy::cast_precision_loss)]
        for i in 0..90 {
            vertices.push(Point3::new(50.0 + f64::from(i), 0.5, 0.5));
        }
        // Every seed converges on bulk vertex 10.
        let edges: Vec<[u32; 2]> = (0..10u32).map(|i| [i, 10]).collect();
        let grid = VoxelGrid::build(&vertices, None, &params());
        let adjacency = VertexAdjacency::build(&edges, vertices.len());
        let candidates = vec![[0i32, 0, 0], [1, 0, 0]];
        let mask = select_wire_vertices(&grid, &candidates, &adjacency, vertices.len());

        for v in 0..10 {
            assert!(mask[v], "seed {v} unmasked");
        }
        // The junction is one distinct neighbor, not ten: the density
        // samples are [1, 0], the trimmed mean 0.5, and the growth budget
        // rounds to zero, so the junction vertex survives.
        assert!(!mask[10]);
    }

    #[test]
    fn large_seed_set_skips_growth() {
        // Everything sits in the candidate cells: seeds are the majority.
        let vertices = wire_vertices();
        let edges: Vec<[u32; 2]> = (0..9u32).map(|i| [i, i + 1]).collect();
        let grid = VoxelGrid::build(&vertices, None, &params());
        let adjacency = VertexAdjacency::build(&edges, vertices.len());
        let candidates = vec![[0i32, 0, 0], [1, 0, 0]];
        let mask = select_wire_vertices(&grid, &candidates, &adjacency, vertices.len());
        assert!(mask.iter().all(|&m| m));
    }

    #[test]
    fn mask_only_grows_from_seeds() {
        let (vertices, edges) = growth_fixture();
        let grid = VoxelGrid::build(&vertices, None, &params());
        let adjacency = VertexAdjacency::build(&edges, vertices.len());
        let candidates = vec![[0i32, 0, 0], [1, 0, 0]];
        let mask = select_wire_vertices(&grid, &candidates, &adjacency, vertices.len());
        let seeded: Vec<usize> = (0..10).collect();
        for (v, &m) in mask.iter().enumerate() {
            if seeded.contains(&v) {
                assert!(m);
            }
        }
        // Vertices with no adjacency path to a seed never get masked.
        assert!(!mask[99]);
    }
}
