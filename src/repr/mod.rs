/*!
# Sparse Representations

The two sparse graph containers, complementing the dense matrices of
[`crate::matrix`]:

- [`EdgeList`] — a flat list of vertex pairs. Duplicates are allowed, so it
  is the natural carrier for multigraphs and for edge streams that have not
  been deduplicated yet.
- [`AdjacencyList`] — one neighbor set per vertex, generic over the
  [`IndexSet`](crate::set::IndexSet) backend. Inserting a duplicate collapses
  it, which makes conversion into an adjacency list a compaction step.

Neither container fixes a directedness by itself: an entry `(u, v)` is just a
stored pair. Whether pairs are read as arcs or as undirected edges is decided
by the views in [`crate::view`].
*/

mod adj_list;
mod edge_list;

pub use adj_list::*;
pub use edge_list::*;
