//! Per-vertex neighbor lists built from an unordered edge set.

use tracing::debug;

/// Symmetric vertex adjacency built from an edge list.
///
/// Each vertex maps to a sorted, deduplicated list of neighbor indices.
/// Duplicate edges and self-loops are tolerated; out-of-range edges are
/// skipped (see the crate-level policy note).
#[derive(Debug, Clone)]
pub struct VertexAdjacency {
    lists: Vec<Vec<u32>>,
}

impl VertexAdjacency {
    /// Build adjacency lists for `vertex_count` vertices.
    ///
    /// Two passes: a degree count to pre-size each list, then an append of
    /// both directions per edge, followed by sort + dedup.
    ///
    /// # Example
    ///
    /// ```
    /// use pose_graph::VertexAdjacency;
    ///
    /// let edges = [[0u32, 1], [0, 2]];
    /// let adj = VertexAdjacency::build(&edges, 3);
    /// assert_eq!(adj.neighbors(0), &[1, 2]);
    /// assert_eq!(adj.degree(2), 1);
    /// ```
    #[must_use]
    pub fn build(edges: &[[u32; 2]], vertex_count: usize) -> Self {
        let mut degrees = vec![0usize; vertex_count];
        let mut skipped = 0usize;
        for e in edges {
            let (a, b) = (e[0] as usize, e[1] as usize);
            if a >= vertex_count || b >= vertex_count {
                skipped += 1;
                continue;
            }
            degrees[a] += 1;
            degrees[b] += 1;
        }
        if skipped > 0 {
            debug!(skipped, "skipped out-of-range edges while building adjacency");
        }

        let mut lists: Vec<Vec<u32>> = degrees.iter().map(|&d| Vec::with_capacity(d)).collect();
        for e in edges {
            let (a, b) = (e[0] as usize, e[1] as usize);
            if a >= vertex_count || b >= vertex_count {
                continue;
            }
            lists[a].push(e[1]);
            lists[b].push(e[0]);
        }

        for neighbors in &mut lists {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        Self { lists }
    }

    /// Neighbors of a vertex, sorted ascending.
    ///
    /// Returns an empty slice for an out-of-range index.
    #[must_use]
    pub fn neighbors(&self, vertex: u32) -> &[u32] {
        self.lists
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of distinct neighbors of a vertex.
    #[must_use]
    pub fn degree(&self, vertex: u32) -> usize {
        self.neighbors(vertex).len()
    }

    /// Number of vertices the adjacency was built for.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.lists.len()
    }
}
