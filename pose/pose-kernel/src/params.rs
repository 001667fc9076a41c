//! Kernel-level tunables.

use pose_voxel::VoxelParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for the full standardization pipeline.
///
/// # Example
///
/// ```
/// use pose_kernel::KernelParams;
///
/// let params = KernelParams::default().with_slice_height(0.05);
/// assert_eq!(params.slice_height, 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KernelParams {
    /// Voxelization and wire-detection tunables.
    pub voxel: VoxelParams,
    /// Height of one integration band.
    pub slice_height: f64,
}

impl Default for KernelParams {
    fn default() -> Self {
        Self {
            voxel: VoxelParams::default(),
            slice_height: 0.02,
        }
    }
}

impl KernelParams {
    /// Set the integration band height.
    #[must_use]
    pub fn with_slice_height(mut self, slice_height: f64) -> Self {
        self.slice_height = slice_height;
        self
    }

    /// Replace the voxel tunables.
    #[must_use]
    pub fn with_voxel(mut self, voxel: VoxelParams) -> Self {
        self.voxel = voxel;
        self
    }
}
