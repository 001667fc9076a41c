//! Arena-indexed disjoint sets.

/// Union-find over dense `u32` indices.
///
/// Uses parent/rank arrays with path halving and union by rank. One
/// instance partitions the vertices of a single object; it is rebuilt per
/// request and never shared.
///
/// # Example
///
/// ```
/// use pose_graph::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// uf.union(0, 1);
/// uf.union(2, 3);
/// assert_eq!(uf.find(0), uf.find(1));
/// assert_ne!(uf.find(1), uf.find(2));
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether the structure is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `x`, with path halving.
    pub fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merge the sets containing `a` and `b` (union by rank).
    pub fn union(&mut self, a: u32, b: u32) {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.rank[ra as usize] < self.rank[rb as usize] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb as usize] = ra;
        if self.rank[ra as usize] == self.rank[rb as usize] {
            self.rank[ra as usize] += 1;
        }
    }

    /// Dense component labels.
    ///
    /// Returns a per-element compressed component id (0-based, assigned in
    /// element order) together with the number of components.
    #[must_use]
    pub fn compress_labels(&mut self) -> (Vec<u32>, u32) {
        let n = self.parent.len();
        let mut labels = vec![0u32; n];
        let mut root_to_label = vec![u32::MAX; n];
        let mut next = 0u32;
        for i in 0..n as u32 {
            let root = self.find(i);
            let slot = &mut root_to_label[root as usize];
            if *slot == u32::MAX {
                *slot = next;
                next += 1;
            }
            labels[i as usize] = *slot;
        }
        (labels, next)
    }
}
