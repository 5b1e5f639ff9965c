use std::ops::Range;

use crate::{
    error::{out_of_range, panics_over, Result},
    set::{BitIndexSet, HashIndexSet, IndexSet, SortedIndexSet},
    Node, NumEdges, NumNodes,
};

/// One neighbor set per vertex, generic over the set backend.
///
/// Vertices are `0..vertex_count()` and fixed at construction; both endpoints
/// of every insert are checked against that range, so the container never
/// grows implicitly. An entry `v` in row `u` records the pair `(u, v)` —
/// directedness is assigned by the view layer, not here.
#[derive(Clone)]
pub struct AdjacencyList<S: IndexSet> {
    rows: Vec<S>,
}

/// Adjacency list over bit-set rows: dense graphs, ascending neighbors.
pub type AdjacencyListBits = AdjacencyList<BitIndexSet>;

/// Adjacency list over hash-set rows: sparse graphs, unspecified order.
pub type AdjacencyListHash = AdjacencyList<HashIndexSet>;

/// Adjacency list over sorted-vector rows: mostly-static graphs.
pub type AdjacencyListSorted = AdjacencyList<SortedIndexSet>;

impl<S: IndexSet> AdjacencyList<S> {
    /// Creates an edgeless graph on `n` vertices.
    pub fn new(n: NumNodes) -> Self {
        Self {
            rows: (0..n).map(|_| S::with_universe(n)).collect(),
        }
    }

    pub fn vertex_count(&self) -> NumNodes {
        self.rows.len() as NumNodes
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> Range<Node> {
        0..self.vertex_count()
    }

    fn check_vertex(&self, u: Node) -> Result<()> {
        if (u as usize) < self.rows.len() {
            Ok(())
        } else {
            Err(out_of_range!(u, self.rows.len()))
        }
    }

    /// The neighbor set of `u`, checked.
    pub fn try_adjacency(&self, u: Node) -> Result<&S> {
        self.check_vertex(u)?;
        Ok(&self.rows[u as usize])
    }

    panics_over!(
        /// The neighbor set of `u`.
        /// ** Panics if `u >= vertex_count()` **
        pub fn adjacency(&self, u: Node) -> &S => try_adjacency
    );

    /// Records the pair `(u, v)` and returns *true* if it was not present
    /// before, checked.
    pub fn try_insert(&mut self, u: Node, v: Node) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.rows[u as usize].insert(v))
    }

    panics_over!(
        /// Records the pair `(u, v)` and returns *true* if it was not present
        /// before. Duplicates collapse into one entry.
        /// ** Panics if `u >= vertex_count()` or `v >= vertex_count()` **
        pub fn insert(&mut self, u: Node, v: Node) -> bool => try_insert
    );

    /// Removes the pair `(u, v)` and returns *true* if it was present,
    /// checked.
    pub fn try_remove(&mut self, u: Node, v: Node) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.rows[u as usize].remove(v))
    }

    panics_over!(
        /// Removes the pair `(u, v)` and returns *true* if it was present.
        /// ** Panics if `u >= vertex_count()` or `v >= vertex_count()` **
        pub fn remove(&mut self, u: Node, v: Node) -> bool => try_remove
    );

    /// Iterates over the neighbors of `u` in the backend's order.
    /// ** Panics if `u >= vertex_count()` **
    pub fn neighbors(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.adjacency(u).iter()
    }

    /// Number of neighbors of `u`.
    /// ** Panics if `u >= vertex_count()` **
    pub fn degree(&self, u: Node) -> NumNodes {
        self.adjacency(u).len() as NumNodes
    }

    /// Total number of stored pairs, i.e. the sum of all degrees. Read as a
    /// directed graph this is the arc count.
    pub fn degrees_sum(&self) -> NumEdges {
        self.rows.iter().map(|r| r.len() as NumEdges).sum()
    }

    /// Removes every stored pair; the vertex count stays.
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(|r| r.clear());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn follows_reference<S: IndexSet>(seed: u64) {
        let rng = &mut Pcg64Mcg::seed_from_u64(seed);

        for n in [1u32, 13, 60] {
            let mut adj = AdjacencyList::<S>::new(n);
            let mut shadow = vec![vec![false; n as usize]; n as usize];

            for _ in 0..(n * n) {
                let (u, v) = (rng.random_range(0..n), rng.random_range(0..n));

                if rng.random_bool(0.7) {
                    assert_eq!(adj.insert(u, v), !shadow[u as usize][v as usize]);
                    shadow[u as usize][v as usize] = true;
                } else {
                    assert_eq!(adj.remove(u, v), shadow[u as usize][v as usize]);
                    shadow[u as usize][v as usize] = false;
                }
            }

            let mut arcs = 0;
            for u in adj.vertices() {
                let expected = (0..n).filter(|&v| shadow[u as usize][v as usize]).collect_vec();

                let mut neighbors = adj.neighbors(u).collect_vec();
                neighbors.sort_unstable();
                assert_eq!(neighbors, expected);

                assert_eq!(adj.degree(u), expected.len() as NumNodes);
                arcs += expected.len() as NumEdges;
            }
            assert_eq!(adj.degrees_sum(), arcs);
        }
    }

    #[test]
    fn bit_rows_follow_reference() {
        follows_reference::<BitIndexSet>(37);
    }

    #[test]
    fn hash_rows_follow_reference() {
        follows_reference::<HashIndexSet>(38);
    }

    #[test]
    fn sorted_rows_follow_reference() {
        follows_reference::<SortedIndexSet>(39);
    }

    #[test]
    fn rejects_endpoints_past_vertex_count() {
        let mut adj = AdjacencyListBits::new(3);

        assert_eq!(
            adj.try_insert(0, 5),
            Err(Error::OutOfRange { index: 5, bound: 3 })
        );
        assert_eq!(
            adj.try_insert(5, 0),
            Err(Error::OutOfRange { index: 5, bound: 3 })
        );
        assert_eq!(
            adj.try_adjacency(3).unwrap_err(),
            Error::OutOfRange { index: 3, bound: 3 }
        );

        assert!(adj.try_insert(2, 2).unwrap());
        assert_eq!(adj.degrees_sum(), 1);
    }

    #[test]
    fn clear_keeps_vertex_count() {
        let mut adj = AdjacencyListSorted::new(4);
        adj.insert(0, 1);
        adj.insert(3, 0);

        adj.clear();
        assert_eq!(adj.vertex_count(), 4);
        assert_eq!(adj.degrees_sum(), 0);
        assert!(adj.neighbors(0).next().is_none());
    }

    #[test]
    fn empty_graph_is_fine() {
        let adj = AdjacencyListHash::new(0);
        assert_eq!(adj.vertex_count(), 0);
        assert_eq!(adj.vertices().count(), 0);
        assert_eq!(adj.degrees_sum(), 0);
    }
}
