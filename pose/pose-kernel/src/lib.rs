//! Canonical orientation and center-of-gravity anchoring for wireframe
//! objects.
//!
//! Given an object as a point set plus an unordered edge graph, the kernel
//! derives the rotation that puts its front on +Y and the translation that
//! puts its center of gravity at the origin. The pipeline:
//!
//! 1. adjacency lists over the edge graph (`pose-graph`)
//! 2. voxel statistics and wire/noise masking (`pose-voxel`)
//! 3. convex hull and minimum-area box of the clean silhouette
//!    (`pose-hull`) - the continuous forward alignment
//! 4. slice-based volumetric center of gravity (`pose-slice`)
//! 5. placement rules fixing the remaining quarter turn (`pose-classify`)
//!
//! Per-object analysis is pure and synchronous; batches fan out across a
//! thread pool with no cross-object state.
//!
//! # Example
//!
//! ```
//! use pose_kernel::{standardize_object, KernelParams};
//! use pose_types::{Point3, UnitQuaternion, Vector3};
//!
//! let lone = [Point3::new(1.0, 2.0, 3.0)];
//! let pose = standardize_object(&lone, None, &[], &KernelParams::default());
//! assert_eq!(pose.rotation, UnitQuaternion::identity());
//! assert_eq!(pose.translation, Vector3::new(1.0, 2.0, 3.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod kernel;
mod params;
mod transform;

pub use error::KernelError;
pub use kernel::{standardize_batch, standardize_object, OrientationResult};
pub use params::KernelParams;
pub use transform::apply_transforms;

pub use pose_classify::{Classification, GroundRule, Placement};
pub use pose_voxel::VoxelParams;
