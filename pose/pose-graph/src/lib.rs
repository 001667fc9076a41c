//! Vertex adjacency and connectivity for wireframe analysis.
//!
//! This crate provides the graph-side primitives of the pose pipeline:
//!
//! - [`VertexAdjacency`] - sorted, deduplicated per-vertex neighbor lists
//! - [`UnionFind`] - arena-indexed disjoint sets with path halving
//!
//! # Edge Index Policy
//!
//! Edges referencing a vertex index at or beyond the vertex count are
//! **defensively skipped** rather than rejected; one malformed edge must
//! never abort an object. The same policy applies everywhere edges are
//! consumed in the pipeline.
//!
//! # Example
//!
//! ```
//! use pose_graph::VertexAdjacency;
//!
//! let edges = [[0u32, 1], [1, 2], [2, 0], [1, 0]]; // duplicate tolerated
//! let adj = VertexAdjacency::build(&edges, 3);
//! assert_eq!(adj.neighbors(1), &[0, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod union_find;

pub use adjacency::VertexAdjacency;
pub use union_find::UnionFind;
