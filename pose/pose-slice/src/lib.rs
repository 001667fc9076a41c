//! Slice-based volumetric center-of-gravity integration.
//!
//! The object is cut into uniform-height Z bands. Within each band, the
//! vertices falling inside it and the points where edges pierce its
//! bounding planes are grouped by global edge-connectivity, hulled per
//! group, and measured with the shoelace formula. Areas and centroids are
//! then aggregated bottom-to-top into an overall center of gravity.
//!
//! Grouping by connectivity keeps disjoint sub-meshes that overlap in XY
//! (a lamp shade around its bulb, nested crates) from fusing into one
//! inflated cross-section.
//!
//! # Example
//!
//! ```
//! use pose_slice::{compute_cog, SliceScratch};
//! use pose_types::Point3;
//!
//! // A flat unit square loop at z = 2.
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 2.0),
//!     Point3::new(1.0, 0.0, 2.0),
//!     Point3::new(1.0, 1.0, 2.0),
//!     Point3::new(0.0, 1.0, 2.0),
//! ];
//! let edges = [[0u32, 1], [1, 2], [2, 3], [3, 0]];
//! let mut scratch = SliceScratch::new();
//! let cog = compute_cog(&vertices, &edges, 0.02, &mut scratch);
//! assert_eq!(cog.slices.len(), 1);
//! assert!((cog.slices[0].area - 1.0).abs() < 1e-9);
//! assert!((cog.overall.z - 2.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod result;
mod scratch;
mod slicer;

pub use result::{CogResult, Slice};
pub use scratch::SliceScratch;
pub use slicer::compute_cog;
