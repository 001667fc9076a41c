//! Uniform voxel grid with cached per-cell statistics.

use hashbrown::HashMap;
use nalgebra::Matrix3;
use pose_types::{Point3, Vector3};
use tracing::debug;

use crate::pca::{linearity, symmetric_eigen3};
use crate::VoxelParams;

/// Integer grid coordinate, `floor(position / voxel_size)` per axis.
pub type VoxelKey = [i32; 3];

/// Key of the cell containing `position`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn voxel_key(position: &Point3<f64>, voxel_size: f64) -> VoxelKey {
    [
        (position.x / voxel_size).floor() as i32,
        (position.y / voxel_size).floor() as i32,
        (position.z / voxel_size).floor() as i32,
    ]
}

/// One occupied grid cell with its cached local statistics.
///
/// Built once by [`VoxelGrid::build`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct VoxelCell {
    /// Indices of the vertices bucketed into this cell.
    pub members: Vec<u32>,
    /// Mean position of the members.
    pub centroid: Point3<f64>,
    /// Mean of the member normals; zero when no normals were supplied.
    pub mean_normal: Vector3<f64>,
    /// Covariance eigenvalues, descending. Zero below the sample threshold.
    pub eigenvalues: [f64; 3],
    /// Unit eigenvectors matching `eigenvalues`.
    pub eigenvectors: [Vector3<f64>; 3],
    /// `(lambda1 - lambda2) / lambda1`, or zero when undefined.
    pub linearity: f64,
}

impl VoxelCell {
    fn new() -> Self {
        Self {
            members: Vec::new(),
            centroid: Point3::origin(),
            mean_normal: Vector3::zeros(),
            eigenvalues: [0.0; 3],
            eigenvectors: [Vector3::x(), Vector3::y(), Vector3::z()],
            linearity: 0.0,
        }
    }
}

/// Sparse uniform grid over a vertex buffer.
///
/// # Example
///
/// ```
/// use pose_types::Point3;
/// use pose_voxel::{voxel_key, VoxelGrid, VoxelParams};
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.01, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 1.0),
/// ];
/// let grid = VoxelGrid::build(&vertices, None, &VoxelParams::default());
/// assert_eq!(grid.len(), 2);
/// let key = voxel_key(&vertices[0], grid.voxel_size());
/// assert_eq!(grid.cell(&key).map(|c| c.members.len()), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    cells: HashMap<VoxelKey, VoxelCell>,
    voxel_size: f64,
}

impl VoxelGrid {
    /// Bucket `vertices` into a uniform grid and cache per-cell statistics.
    ///
    /// `normals`, when given, must be parallel to `vertices`; a mismatched
    /// length is treated as absent. Cells with at least
    /// `params.min_pca_samples` members get a covariance
    /// eigen-decomposition and linearity score; smaller cells keep zero
    /// eigenvalues.
    #[must_use]
    pub fn build(
        vertices: &[Point3<f64>],
        normals: Option<&[Vector3<f64>]>,
        params: &VoxelParams,
    ) -> Self {
        let normals = match normals {
            Some(n) if n.len() == vertices.len() => Some(n),
            Some(n) => {
                debug!(
                    normals = n.len(),
                    vertices = vertices.len(),
                    "normal buffer length mismatch, ignoring normals"
                );
                None
            }
            None => None,
        };

        let mut cells: HashMap<VoxelKey, VoxelCell> = HashMap::new();
        for (i, p) in vertices.iter().enumerate() {
            let key = voxel_key(p, params.voxel_size);
            #[allow(clippy::cast_possible_truncation)]
            cells
                .entry(key)
                .or_insert_with(VoxelCell::new)
                .members
                .push(i as u32);
        }

        for cell in cells.values_mut() {
            finalize_cell(cell, vertices, normals, params.min_pca_samples);
        }

        debug!(
            vertices = vertices.len(),
            cells = cells.len(),
            voxel_size = params.voxel_size,
            "built voxel grid"
        );

        Self {
            cells,
            voxel_size: params.voxel_size,
        }
    }

    /// Cell at `key`, if occupied.
    #[must_use]
    pub fn cell(&self, key: &VoxelKey) -> Option<&VoxelCell> {
        self.cells.get(key)
    }

    /// Iterate over all occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (&VoxelKey, &VoxelCell)> {
        self.cells.iter()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no occupied cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Grid cell edge length.
    #[must_use]
    pub fn voxel_size(&self) -> f64 {
        self.voxel_size
    }

    /// Count of the (up to 6) face-adjacent neighbor cells that are occupied.
    #[must_use]
    pub fn occupied_face_neighbors(&self, key: &VoxelKey) -> usize {
        FACE_OFFSETS
            .iter()
            .filter(|d| {
                self.cells
                    .contains_key(&[key[0] + d[0], key[1] + d[1], key[2] + d[2]])
            })
            .count()
    }
}

/// Offsets to the six face-adjacent cells.
pub(crate) const FACE_OFFSETS: [[i32; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

fn finalize_cell(
    cell: &mut VoxelCell,
    vertices: &[Point3<f64>],
    normals: Option<&[Vector3<f64>]>,
    min_pca_samples: usize,
) {
    let n = cell.members.len();
    #[allow(clippy::cast_precision_loss)]
    let inv_n = 1.0 / n as f64;

    let mut sum = Vector3::zeros();
    for &i in &cell.members {
        sum += vertices[i as usize].coords;
    }
    cell.centroid = Point3::from(sum * inv_n);

    if let Some(normals) = normals {
        let mut normal_sum = Vector3::zeros();
        for &i in &cell.members {
            normal_sum += normals[i as usize];
        }
        cell.mean_normal = normal_sum * inv_n;
    }

    if n < min_pca_samples {
        return;
    }

    let mut cov = Matrix3::zeros();
    for &i in &cell.members {
        let d = vertices[i as usize] - cell.centroid;
        cov += d * d.transpose();
    }
    cov *= inv_n;

    let (values, vectors) = symmetric_eigen3(&cov);
    cell.eigenvalues = values;
    cell.eigenvectors = vectors;
    cell.linearity = linearity(&values);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> VoxelParams {
        VoxelParams::default().with_voxel_size(1.0)
    }

    #[test]
    fn key_uses_floor() {
        assert_eq!(voxel_key(&Point3::new(0.5, -0.5, 1.5), 1.0), [0, -1, 1]);
        assert_eq!(voxel_key(&Point3::new(-0.01, 0.0, 0.0), 1.0), [-1, 0, 0]);
    }

    #[test]
    fn vertices_bucketed_by_cell() {
        let vertices = vec![
            Point3::new(0.1, 0.1, 0.1),
            Point3::new(0.9, 0.9, 0.9),
            Point3::new(2.5, 0.0, 0.0),
        ];
        let grid = VoxelGrid::build(&vertices, None, &params());
        assert_eq!(grid.len(), 2);
        let cell = grid.cell(&[0, 0, 0]);
        assert_eq!(cell.map(|c| c.members.len()), Some(2));
    }

    #[test]
    fn centroid_is_member_mean() {
        let vertices = vec![Point3::new(0.2, 0.2, 0.2), Point3::new(0.4, 0.6, 0.2)];
        let grid = VoxelGrid::build(&vertices, None, &params());
        let cell = grid.cell(&[0, 0, 0]).map(|c| c.centroid);
        let centroid = cell.unwrap_or_else(Point3::origin);
        assert_relative_eq!(centroid.x, 0.3, epsilon = 1e-12);
        assert_relative_eq!(centroid.y, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn line_of_points_is_linear() {
        #[allow(clippy::cast_precision_loss)]
        let vertices: Vec<_> = (0..10)
            .map(|i| Point3::new(0.05 + 0.09 * i as f64, 0.5, 0.5))
            .collect();
        let grid = VoxelGrid::build(&vertices, None, &params());
        let cell = grid.cell(&[0, 0, 0]);
        let linearity = cell.map_or(0.0, |c| c.linearity);
        assert!(linearity > 0.99, "linearity = {linearity}");
        // Dominant eigenvector lies along X.
        let e1 = cell.map_or(Vector3::zeros(), |c| c.eigenvectors[0]);
        assert!(e1.x.abs() > 0.99);
    }

    #[test]
    fn small_cells_skip_pca() {
        let vertices = vec![Point3::new(0.1, 0.1, 0.1), Point3::new(0.2, 0.2, 0.2)];
        let grid = VoxelGrid::build(&vertices, None, &params().with_min_pca_samples(3));
        let cell = grid.cell(&[0, 0, 0]);
        assert_eq!(cell.map(|c| c.eigenvalues), Some([0.0; 3]));
        assert_eq!(cell.map(|c| c.linearity), Some(0.0));
    }

    #[test]
    fn mean_normal_from_buffer() {
        let vertices = vec![Point3::new(0.1, 0.1, 0.1), Point3::new(0.2, 0.2, 0.2)];
        let normals = vec![Vector3::z(), Vector3::z()];
        let grid = VoxelGrid::build(&vertices, Some(&normals), &params());
        let mean = grid.cell(&[0, 0, 0]).map_or(Vector3::zeros(), |c| c.mean_normal);
        assert_relative_eq!(mean.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_normals_ignored() {
        let vertices = vec![Point3::new(0.1, 0.1, 0.1), Point3::new(0.2, 0.2, 0.2)];
        let normals = vec![Vector3::z()];
        let grid = VoxelGrid::build(&vertices, Some(&normals), &params());
        let mean = grid.cell(&[0, 0, 0]).map_or(Vector3::x(), |c| c.mean_normal);
        assert_eq!(mean, Vector3::zeros());
    }

    #[test]
    fn face_neighbor_counting() {
        let vertices = vec![
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(1.5, 0.5, 0.5),
            Point3::new(0.5, 1.5, 0.5),
            // Diagonal neighbor, not face-adjacent.
            Point3::new(1.5, 1.5, 0.5),
        ];
        let grid = VoxelGrid::build(&vertices, None, &params());
        assert_eq!(grid.occupied_face_neighbors(&[0, 0, 0]), 2);
        assert_eq!(grid.occupied_face_neighbors(&[5, 5, 5]), 0);
    }

    #[test]
    fn empty_input() {
        let grid = VoxelGrid::build(&[], None, &params());
        assert!(grid.is_empty());
    }
}
