//! 2D convex hulls, minimum-area oriented boxes, and polygon measures.
//!
//! This crate carries the silhouette-side geometry of the pose pipeline:
//!
//! - [`convex_hull`] - Andrew's monotone chain
//! - [`min_area_box`] - rotating-calipers search over hull-edge angles
//! - [`polygon_area_centroid`] - shoelace signed area and centroid
//! - [`point_in_polygon`] - ray-casting parity test
//!
//! # Example
//!
//! ```
//! use pose_hull::convex_hull;
//! use pose_types::Point2;
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 4.0),
//!     Point2::new(0.0, 4.0),
//!     Point2::new(2.0, 2.0), // interior
//! ];
//! let hull = convex_hull(&points);
//! assert_eq!(hull.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod chain;
mod min_box;
mod polygon;

pub use chain::convex_hull;
pub use min_box::{edge_angles, min_area_box, rotate_points, MinAreaBox};
pub use polygon::{point_in_polygon, polygon_area_centroid};
