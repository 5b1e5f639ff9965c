/*!
`rgraphs` stores graphs in several interchangeable physical **r**epresentations
and converts losslessly between them:

- dense and symmetric-packed **bit matrices** (and their scalar-valued
  counterparts for weighted graphs) with zero-copy windowing — [`matrix`],
- per-vertex **adjacency sets** over three index-set backends — [`repr`] /
  [`set`],
- flat **edge lists** with multigraph semantics — [`repr`].

# Representation

Vertices are dense `u32` indices in `0..n` ([`Node`]); an edge is the tuple
struct [`Edge(Node, Node)`](Edge). Whether a stored pair is read as the arc
`u -> v` or the undirected edge `{u, v}` is not a property of the containers
but of the [`view`] layer: zero-cost read-only projections binding a container
to a [`Directed`](view::Directed) or [`Undirected`](view::Undirected) marker
and answering membership, neighbor iteration and degree queries uniformly
through the [`GraphView`](view::GraphView) trait.

# Conversion

The [`convert`] module moves a graph between backends through that view
contract alone:

```rust
use rgraphs::{convert, repr::*, view::*, matrix::SymmetricBitMatrix, Edge};

let list: EdgeList = [Edge(0, 1), Edge(1, 2), Edge(2, 0)].into_iter().collect();

// read the pairs as undirected edges and pack them into one matrix triangle
let view = UndirectedEdgeListView::new(&list);
let matrix: SymmetricBitMatrix = convert::undirected::from(&view).into_new().unwrap();

let round_trip = UndirectedBitMatrixView::try_new(&matrix).unwrap();
assert!(round_trip.has_edge(1, 0));
```

Conversion policy (self-loops, duplicate collapse, symmetrization) is
documented in [`convert`]; out-of-range source indices fail with
[`Error::OutOfRange`](error::Error).

# Choosing a backend

The three [`set::IndexSet`] backends trade membership cost against iteration
order and memory: bit vectors for dense universes, hash sets for sparse
unbounded ones, sorted vectors for mostly-static sets. Matrices answer
`has_edge` in O(1) and iterate rows through the word-scanning
[`DenseBitIter`](iter::DenseBitIter); edge lists are the cheapest to append
to and the only backend preserving multiplicity.

# Scope

This is a representation library, not an algorithms suite: beyond the thin
structure predicates in [`checks`] and the fixture generators in [`gens`]
there are no graph algorithms, no serialization formats and no persistence.
All types are single-threaded values; views and matrix windows are borrows,
so the usual aliasing rules make a mutating writer and live readers mutually
exclusive at compile time.
*/

pub mod checks;
pub mod convert;
pub mod edge;
pub mod error;
pub mod gens;
pub mod iter;
pub mod matrix;
pub mod node;
pub mod repr;
pub mod set;
pub(crate) mod testing;
pub mod view;

pub use edge::{Edge, NumEdges};
pub use error::{Error, Result};
pub use node::{Node, NumNodes};

/// Definitions for nodes and edges, the containers of every representation,
/// and the view plus conversion entry points.
pub mod prelude {
    pub use super::{
        convert::{self, GraphTarget},
        edge::*,
        matrix::*,
        node::*,
        repr::*,
        set::*,
        view::*,
    };
}
