//! Core geometry types for the pose standardization kernel.
//!
//! This crate provides the foundational types shared by the analysis
//! pipeline:
//!
//! - [`Aabb2`] / [`Aabb3`] - Axis-aligned bounding boxes
//! - [`CardinalAxis`] - One of the four cardinal front directions
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (left/right)
//! - Y: depth (front/back) - canonical "forward" is +Y
//! - Z: height (up/down, slicing direction)
//!
//! All coordinates are `f64` and unit-agnostic; the shipped defaults for
//! voxel and slice sizes assume meters.
//!
//! # Example
//!
//! ```
//! use pose_types::{Aabb3, Point3};
//!
//! let points = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(2.0, 1.0, 3.0),
//! ];
//! let aabb = Aabb3::from_points(points.iter().copied());
//! assert!((aabb.height() - 3.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod axis;
mod bounds;

pub use axis::CardinalAxis;
pub use bounds::{Aabb2, Aabb3};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, UnitQuaternion, Vector2, Vector3};
