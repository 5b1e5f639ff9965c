/*!
# Substructure Generators

Utility methods to lay common motifs — paths, cycles, cliques — into any
conversion target, plus a hypercube edge enumerator. Handy for building test
fixtures and benchmark instances without spelling out edge lists by hand.

```rust
use rgraphs::{gens::*, repr::AdjacencyListBits, set::{BitIndexSet, IndexSet}, convert::GraphTarget};

let mut g = AdjacencyListBits::with_vertices(5);
g.connect_path([0, 1, 2]).unwrap();
g.connect_cycle([2, 3, 4]).unwrap();
g.connect_clique(&BitIndexSet::from_indices(5, [0, 2, 4]), false).unwrap();

assert!(g.adjacency(3).contains(4));
assert!(g.adjacency(0).contains(4));
```
*/

use itertools::Itertools;

use crate::{convert::GraphTarget, error::Result, set::IndexSet, Edge, Node};

/// Adds **substructures** (paths, cycles, cliques) to an already existing
/// graph. Implemented for every conversion target; all inserts are
/// undirected, so the motifs read the same from both endpoints.
pub trait Substructures {
    /// Connects the given vertices in order with a **simple path**.
    ///
    /// Fewer than two vertices add nothing.
    fn connect_path<P>(&mut self, nodes_on_path: P) -> Result<()>
    where
        P: IntoIterator<Item = Node>;

    /// Connects the given vertices with a **cycle**: consecutive vertices
    /// plus the last back to the first.
    ///
    /// A single vertex becomes a self-loop; an empty sequence adds nothing.
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C) -> Result<()>
    where
        C: IntoIterator<Item = Node>;

    /// Connects all vertices of `nodes` into a **clique**; with `with_loops`
    /// each member also gets a self-loop. Pairs are inserted normalized, so
    /// no pair is touched twice.
    fn connect_clique<S: IndexSet>(&mut self, nodes: &S, with_loops: bool) -> Result<()>;
}

impl<G: GraphTarget> Substructures for G {
    fn connect_path<P>(&mut self, nodes_on_path: P) -> Result<()>
    where
        P: IntoIterator<Item = Node>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.try_add_edge(u, v)?;
        }
        Ok(())
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C) -> Result<()>
    where
        C: IntoIterator<Item = Node>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                self.try_add_edge(prev, cur)?;
                prev = cur;
            }
            self.try_add_edge(prev, first)?;
        }
        Ok(())
    }

    fn connect_clique<S: IndexSet>(&mut self, nodes: &S, with_loops: bool) -> Result<()> {
        for u in nodes.iter() {
            for v in nodes.iter() {
                let e = Edge(u, v);
                if (e.is_loop() && !with_loops) || !e.is_normalized() {
                    continue;
                }
                self.try_add_edge(u, v)?;
            }
        }
        Ok(())
    }
}

/// Enumerates the edge set of the `dimension`-dimensional hypercube:
/// vertices `0..2^dimension`, one edge per pair of ids differing in exactly
/// one bit. Each edge appears once, normalized.
/// ** Panics if `dimension >= 32` **
pub fn hypercube_edges(dimension: u32) -> impl Iterator<Item = Edge> {
    assert!(dimension < Node::BITS);
    let n: Node = 1 << dimension;

    (0..n).flat_map(move |u| {
        (0..dimension).filter_map(move |bit| {
            let v = u | (1 << bit);
            (v != u).then_some(Edge(u, v))
        })
    })
}
