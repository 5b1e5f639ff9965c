/*!
# Representation Conversion

Converting a graph into another backend is a two-party protocol: any
[`GraphView`] can act as the source, and any [`GraphTarget`] as the
destination. The convertor in between walks the source's neighbor iteration
and feeds the destination's native insert, so it is the only place that has to
understand cross-representation semantics.

The entry points mirror the directedness split of the views:

```rust
use rgraphs::{convert, repr::*, view::*, Edge};

let list: EdgeList = [Edge(0, 1), Edge(1, 2), Edge(2, 0)].into_iter().collect();
let adj: AdjacencyListBits = convert::directed::from(&DirectedEdgeListView::new(&list))
    .into_new()
    .unwrap();
assert!(DirectedAdjacencyView::new(&adj).has_edge(2, 0));
```

Policy, stated once here and honored by every impl:

- the directed convertor inserts exactly the arcs the source reports and
  never symmetrizes;
- the undirected convertor makes every reported pair reachable from both
  endpoints, inserting each unordered pair once even when the source reports
  both orientations;
- set- and matrix-backed destinations collapse duplicates, the edge list
  preserves multiplicity;
- self-loops are ordinary edges and survive every target;
- a source index outside the destination's declared vertex range fails with
  `OutOfRange` — the destination never grows to accommodate it.

Besides whole-graph copies, [`extract_subgraph`](Convertor::extract_subgraph)
carves the subgraph induced by a vertex set out of any view, reindexing the
members densely into a fresh target.
*/

use std::marker::PhantomData;

use fxhash::FxHashMap;

use crate::{
    error::{out_of_range, panics_over, Result},
    matrix::{BitMatrix, MatrixLayout, MatrixShape},
    repr::{AdjacencyList, EdgeList},
    set::IndexSet,
    view::{Directed, Directedness, GraphView, Undirected},
    Edge, Node, NumEdges, NumNodes,
};

/// Destination capability of a conversion: sized construction plus the
/// backend's native insert, in an arc and an edge flavor.
///
/// The `bool` results report whether the insert changed the target; the
/// convertor sums them up so callers can observe duplicate collapse.
pub trait GraphTarget {
    /// Creates an empty instance able to hold vertices `0..n`.
    fn with_vertices(n: NumNodes) -> Self;

    /// Records the arc `u -> v`, checked.
    fn try_add_arc(&mut self, u: Node, v: Node) -> Result<bool>;

    /// Records the edge `{u, v}` so that it is reachable from both
    /// endpoints, checked.
    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<bool>;

    panics_over!(
        /// Records the arc `u -> v`.
        /// ** Panics if an endpoint is out of the target's vertex range **
        fn add_arc(&mut self, u: Node, v: Node) -> bool => try_add_arc
    );

    panics_over!(
        /// Records the edge `{u, v}`.
        /// ** Panics if an endpoint is out of the target's vertex range **
        fn add_edge(&mut self, u: Node, v: Node) -> bool => try_add_edge
    );
}

/// Appends pairs, never fails, never deduplicates. Edges are stored
/// normalized so an undirected fill yields normalized output.
impl GraphTarget for EdgeList {
    fn with_vertices(n: NumNodes) -> Self {
        // a vertex count is only a rough capacity hint for a sparse list
        Self::with_capacity(n as usize)
    }

    fn try_add_arc(&mut self, u: Node, v: Node) -> Result<bool> {
        self.push(Edge(u, v));
        Ok(true)
    }

    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        self.push(Edge(u, v).normalized());
        Ok(true)
    }
}

/// Set-backed rows: duplicates collapse, endpoints past the vertex count are
/// `OutOfRange`.
impl<S: IndexSet> GraphTarget for AdjacencyList<S> {
    fn with_vertices(n: NumNodes) -> Self {
        Self::new(n)
    }

    fn try_add_arc(&mut self, u: Node, v: Node) -> Result<bool> {
        self.try_insert(u, v)
    }

    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        let changed = self.try_insert(u, v)?;
        if u == v {
            return Ok(changed);
        }
        Ok(self.try_insert(v, u)? || changed)
    }
}

/// Cell writes into a square matrix. Under symmetric packing one canonical
/// cell covers both orientations, so this layout cannot represent a one-way
/// arc: `try_add_arc` on a symmetric matrix is defined to behave like
/// `try_add_edge`. Callers that need true arcs must use the dense layout.
impl<L: MatrixLayout> GraphTarget for BitMatrix<L> {
    fn with_vertices(n: NumNodes) -> Self {
        // square shapes pass every layout check and a u32 vertex count
        // cannot overflow the cell count on 64-bit targets
        match Self::new(MatrixShape::square(n as usize)) {
            Ok(matrix) => matrix,
            Err(e) => panic!("{e}"),
        }
    }

    fn try_add_arc(&mut self, u: Node, v: Node) -> Result<bool> {
        Ok(!self.try_set(u as usize, v as usize, true)?)
    }

    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        let changed = !self.try_set(u as usize, v as usize, true)?;
        if L::SYMMETRIC || u == v {
            return Ok(changed);
        }
        Ok(!self.try_set(v as usize, u as usize, true)? || changed)
    }
}

/// Flow interface holding the source view; obtain one through
/// [`directed::from`] or [`undirected::from`], then call
/// [`to`](Convertor::to) or [`into_new`](Convertor::into_new).
pub struct Convertor<'a, V: GraphView, D: Directedness> {
    view: &'a V,
    _dir: PhantomData<D>,
}

impl<'a, V: GraphView> Convertor<'a, V, Directed> {
    /// Inserts every arc the source reports into `target`, in vertex-major
    /// order, via [`GraphTarget::try_add_arc`]. Nothing is symmetrized or
    /// deduplicated here; returns how many inserts changed the target.
    pub fn to<T: GraphTarget>(&self, target: &mut T) -> Result<NumEdges> {
        let mut added = 0;
        for u in self.view.vertices() {
            for v in self.view.neighbors(u) {
                added += target.try_add_arc(u, v)? as NumEdges;
            }
        }
        Ok(added)
    }

    /// Allocates a `T` sized to the source's vertex count and fills it.
    pub fn into_new<T: GraphTarget>(&self) -> Result<T> {
        let mut target = T::with_vertices(self.view.vertex_count());
        self.to(&mut target)?;
        Ok(target)
    }

    /// Extracts the subgraph induced by `vertices` into a fresh `T`:
    /// members are reindexed densely to `0..vertices.len()` in the set's
    /// iteration order, and exactly the arcs running between two members
    /// are copied. Fails with `OutOfRange` if a member is no vertex of the
    /// source view.
    pub fn extract_subgraph<T: GraphTarget, S: IndexSet>(&self, vertices: &S) -> Result<T> {
        let index_map = dense_reindex(self.view, vertices)?;
        let mut target = T::with_vertices(vertices.len() as NumNodes);

        for u in vertices.iter() {
            for v in self.view.neighbors(u) {
                if let Some(&w) = index_map.get(&v) {
                    target.try_add_arc(index_map[&u], w)?;
                }
            }
        }
        Ok(target)
    }
}

impl<'a, V: GraphView> Convertor<'a, V, Undirected> {
    /// Inserts every reported pair into `target` via
    /// [`GraphTarget::try_add_edge`], making it reachable from both
    /// endpoints. A non-normalized pair whose mirror the source's neighbor
    /// iteration also reports is skipped, so symmetric sources contribute
    /// each unordered pair once and antiparallel arcs of a directed source
    /// collapse into one edge; a pair reported from one endpoint only, like
    /// a lone arc `(1, 0)` or a one-sided adjacency row, is still
    /// symmetrized in the target. Returns how many inserts changed the
    /// target.
    pub fn to<T: GraphTarget>(&self, target: &mut T) -> Result<NumEdges> {
        let mut added = 0;
        for u in self.view.vertices() {
            for v in self.view.neighbors(u) {
                // `has_edge` answers one-sided storage symmetrically on
                // undirected views, so only an actually reported mirror
                // justifies the skip
                if u > v && self.view.neighbors(v).any(|x| x == u) {
                    continue;
                }
                added += target.try_add_edge(u, v)? as NumEdges;
            }
        }
        Ok(added)
    }

    /// Allocates a `T` sized to the source's vertex count and fills it.
    pub fn into_new<T: GraphTarget>(&self) -> Result<T> {
        let mut target = T::with_vertices(self.view.vertex_count());
        self.to(&mut target)?;
        Ok(target)
    }

    /// Extracts the subgraph induced by `vertices` into a fresh `T`:
    /// members are reindexed densely to `0..vertices.len()` in the set's
    /// iteration order, and exactly the pairs running between two members
    /// are copied, each unordered pair once, via the same mirror-skip rule
    /// as [`to`](Convertor::to). Fails with `OutOfRange` if a member is no
    /// vertex of the source view.
    pub fn extract_subgraph<T: GraphTarget, S: IndexSet>(&self, vertices: &S) -> Result<T> {
        let index_map = dense_reindex(self.view, vertices)?;
        let mut target = T::with_vertices(vertices.len() as NumNodes);

        for u in vertices.iter() {
            for v in self.view.neighbors(u) {
                let Some(&w) = index_map.get(&v) else {
                    continue;
                };
                if u > v && self.view.neighbors(v).any(|x| x == u) {
                    continue;
                }
                target.try_add_edge(index_map[&u], w)?;
            }
        }
        Ok(target)
    }
}

/// Maps every member of `vertices` to a dense new index in iteration order,
/// rejecting members outside the view's vertex range.
fn dense_reindex<V: GraphView, S: IndexSet>(
    view: &V,
    vertices: &S,
) -> Result<FxHashMap<Node, Node>> {
    let mut map = FxHashMap::default();
    map.reserve(vertices.len());

    for (i, u) in vertices.iter().enumerate() {
        if u >= view.vertex_count() {
            return Err(out_of_range!(u, view.vertex_count()));
        }
        map.insert(u, i as Node);
    }
    Ok(map)
}

/// Conversions preserving arcs exactly as the source reports them.
pub mod directed {
    use super::*;

    /// Starts a directed conversion from `view`; follow up with
    /// [`to`](Convertor::to) or [`into_new`](Convertor::into_new).
    pub fn from<V: GraphView>(view: &V) -> Convertor<'_, V, Directed> {
        Convertor {
            view,
            _dir: PhantomData,
        }
    }
}

/// Conversions reading the source as undirected and keeping both
/// reachabilities of every pair intact in the destination.
pub mod undirected {
    use super::*;

    /// Starts an undirected conversion from `view`; follow up with
    /// [`to`](Convertor::to) or [`into_new`](Convertor::into_new).
    pub fn from<V: GraphView>(view: &V) -> Convertor<'_, V, Undirected> {
        Convertor {
            view,
            _dir: PhantomData,
        }
    }
}
