//! Tunables for voxelization and wire-candidate selection.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters controlling the voxel grid and wire-candidate thresholds.
///
/// The defaults are calibrated for scene geometry expressed in meters;
/// scale `voxel_size` along with your coordinate units.
///
/// # Example
///
/// ```
/// use pose_voxel::VoxelParams;
///
/// let params = VoxelParams::default().with_voxel_size(0.05);
/// assert_eq!(params.voxel_size, 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelParams {
    /// Edge length of one cubic grid cell.
    pub voxel_size: f64,
    /// Minimum members in a cell before its covariance is decomposed.
    ///
    /// Below this the cell keeps zero eigenvalues and zero linearity.
    /// Useful range is 3 to 6: lower catches sparse wires earlier, higher
    /// suppresses eigen noise on thin point samples.
    pub min_pca_samples: usize,
    /// Upper bound on the mean-normal magnitude of a wire candidate.
    ///
    /// Rod-like geometry has normals pointing in many radial directions,
    /// so their per-cell mean stays short.
    pub max_normal_magnitude: f64,
    /// Minimum share of `lambda1 / (lambda1 + lambda2)` for a candidate.
    pub linearity_dominance: f64,
    /// Maximum occupied face-adjacent neighbor cells of a candidate.
    pub max_occupied_neighbors: usize,
}

impl Default for VoxelParams {
    fn default() -> Self {
        Self {
            voxel_size: 0.03,
            min_pca_samples: 3,
            max_normal_magnitude: 0.25,
            linearity_dominance: 0.85,
            max_occupied_neighbors: 4,
        }
    }
}

impl VoxelParams {
    /// Set the grid cell edge length.
    #[must_use]
    pub fn with_voxel_size(mut self, voxel_size: f64) -> Self {
        self.voxel_size = voxel_size;
        self
    }

    /// Set the minimum per-cell sample count for PCA.
    #[must_use]
    pub fn with_min_pca_samples(mut self, min_pca_samples: usize) -> Self {
        self.min_pca_samples = min_pca_samples;
        self
    }

    /// Set the mean-normal magnitude ceiling for wire candidates.
    #[must_use]
    pub fn with_max_normal_magnitude(mut self, max_normal_magnitude: f64) -> Self {
        self.max_normal_magnitude = max_normal_magnitude;
        self
    }

    /// Set the eigenvalue dominance threshold for wire candidates.
    #[must_use]
    pub fn with_linearity_dominance(mut self, linearity_dominance: f64) -> Self {
        self.linearity_dominance = linearity_dominance;
        self
    }

    /// Set the occupied-neighbor ceiling for wire candidates.
    #[must_use]
    pub fn with_max_occupied_neighbors(mut self, max_occupied_neighbors: usize) -> Self {
        self.max_occupied_neighbors = max_occupied_neighbors;
        self
    }
}
