//! Uniform voxel index, per-cell PCA, and wire/noise vertex masking.
//!
//! Thin rod-like geometry (cables, railings, support struts) must not
//! influence silhouette-based orientation decisions. This crate buckets
//! vertices into a uniform grid, scores each occupied cell by the
//! eigen-structure of its local covariance, flags strongly linear cells as
//! wire candidates, and grows those candidates into a per-vertex exclusion
//! mask along the wireframe adjacency.
//!
//! Pipeline:
//!
//! 1. [`VoxelGrid::build`] - bucket vertices, cache per-cell centroid,
//!    mean normal, eigenvalues, and linearity.
//! 2. [`wire_candidates`] - select cells that look like isolated thin rods.
//! 3. [`select_wire_vertices`] - turn candidate cells into a per-vertex
//!    mask via density-capped region growth.
//!
//! The mask only ever grows during one call; a vertex marked as wire is
//! never unmarked.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod grid;
mod params;
mod pca;
mod stats;
mod wire;

pub use grid::{voxel_key, VoxelCell, VoxelGrid, VoxelKey};
pub use params::VoxelParams;
pub use pca::{linearity, symmetric_eigen3};
pub use stats::iqr_trimmed_mean;
pub use wire::{select_wire_vertices, wire_candidates};
