/*!
# Graph Views

A view binds a storage container to a directedness and answers the classic
read queries behind one trait, [`GraphView`]. The containers themselves
([`EdgeList`], [`AdjacencyList`], [`BitMatrix`]) only store pairs; whether a
stored `(u, v)` means the arc `u -> v` or the edge `{u, v}` is entirely the
view's business.

Views own no data. Each is a shared borrow of its container plus a zero-sized
[`Directedness`] marker, so creating one is free and the borrow checker rules
out mutation while a view is alive. The usual combinations have aliases:
[`DirectedEdgeListView`], [`UndirectedAdjacencyView`],
[`UndirectedBitMatrixView`] and friends.

Undirected views expect undirected storage conventions: every stored pair is
reachable from both endpoints (symmetric matrix cells, both-orientation
adjacency entries), which is exactly what
[`GraphTarget::add_edge`](crate::convert::GraphTarget::add_edge) maintains.
*/

use std::marker::PhantomData;
use std::ops::Range;

use crate::{
    error::{shape_mismatch, Result},
    matrix::{BitMatrix, MatrixLayout},
    repr::{AdjacencyList, EdgeList},
    set::IndexSet,
    testing::test_view_contract,
    Edge, Node, NumEdges, NumNodes,
};

/// Type-level directedness of a view.
pub trait Directedness {
    const IS_DIRECTED: bool;
}

/// Marker reading stored pairs as arcs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Directed;

/// Marker reading stored pairs as undirected edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Undirected;

impl Directedness for Directed {
    const IS_DIRECTED: bool = true;
}

impl Directedness for Undirected {
    const IS_DIRECTED: bool = false;
}

/// Uniform read access to a graph, independent of the backing storage.
pub trait GraphView {
    /// Number of vertices; valid vertices are `0..vertex_count()`.
    fn vertex_count(&self) -> NumNodes;

    /// Number of edges under this view's directedness: arcs when directed,
    /// unordered pairs (self-loops counted once) when undirected.
    fn edge_count(&self) -> NumEdges;

    /// Returns *true* if stored pairs are read as arcs.
    fn is_directed(&self) -> bool;

    /// Returns *true* if the view contains the given arc (directed) or edge
    /// (undirected).
    /// ** Might panic if `u >= vertex_count()` or `v >= vertex_count()` **
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Iterates over the neighbors of `u`: successors when directed, all
    /// partners when undirected.
    /// ** Might panic if `u >= vertex_count()` **
    fn neighbors(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Iterates over all vertices.
    fn vertices(&self) -> Range<Node> {
        0..self.vertex_count()
    }

    /// Number of reported neighbors of `u`; a self-loop contributes one.
    /// ** Might panic if `u >= vertex_count()` **
    fn degree(&self, u: Node) -> NumNodes {
        self.neighbors(u).count() as NumNodes
    }

    /// Iterates over all edges in vertex-major order. Undirected views
    /// suppress the non-normalized duplicate of every pair, so each edge
    /// appears once.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let directed = self.is_directed();
        self.vertices().flat_map(move |u| {
            self.neighbors(u)
                .map(move |v| Edge(u, v))
                .filter(move |e| directed || e.is_normalized())
        })
    }
}

/// [`EdgeList`] read as a graph.
///
/// The vertex count is derived: one past the largest vertex mentioned by any
/// edge, saturating at `Node::MAX` (the id `Node::MAX` itself lies outside
/// the representable vertex range). Duplicate pairs stay visible as parallel
/// edges.
pub struct EdgeListView<'a, D: Directedness> {
    list: &'a EdgeList,
    _dir: PhantomData<D>,
}

/// Edge list whose pairs are arcs.
pub type DirectedEdgeListView<'a> = EdgeListView<'a, Directed>;

/// Edge list whose pairs are undirected edges.
pub type UndirectedEdgeListView<'a> = EdgeListView<'a, Undirected>;

impl<'a, D: Directedness> EdgeListView<'a, D> {
    pub fn new(list: &'a EdgeList) -> Self {
        Self {
            list,
            _dir: PhantomData,
        }
    }
}

impl<D: Directedness> GraphView for EdgeListView<'_, D> {
    fn vertex_count(&self) -> NumNodes {
        self.list
            .max_vertex_index()
            .map_or(0, |max| max.saturating_add(1))
    }

    fn edge_count(&self) -> NumEdges {
        self.list.len() as NumEdges
    }

    fn is_directed(&self) -> bool {
        D::IS_DIRECTED
    }

    /// Scans the whole list; out-of-range probes simply find nothing.
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.list
            .iter()
            .any(|e| e == Edge(u, v) || (!D::IS_DIRECTED && e == Edge(v, u)))
    }

    fn neighbors(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        EdgeListNeighborIter {
            edges: self.list.as_slice().iter(),
            vertex: u,
            undirected: !D::IS_DIRECTED,
        }
    }
}

/// Lazy scan yielding the partner of every stored pair touching a vertex, in
/// source order.
///
/// Directed scans match on the first endpoint only. Undirected scans match on
/// either endpoint; a self-loop pair yields its vertex once.
pub struct EdgeListNeighborIter<'a> {
    edges: std::slice::Iter<'a, Edge>,
    vertex: Node,
    undirected: bool,
}

impl Iterator for EdgeListNeighborIter<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        for &Edge(u, v) in self.edges.by_ref() {
            if u == self.vertex {
                return Some(v);
            }
            if self.undirected && v == self.vertex {
                return Some(u);
            }
        }

        None
    }
}

/// [`AdjacencyList`] read as a graph.
pub struct AdjacencyListView<'a, S: IndexSet, D: Directedness> {
    adj: &'a AdjacencyList<S>,
    _dir: PhantomData<D>,
}

/// Adjacency list whose rows are out-neighbors.
pub type DirectedAdjacencyView<'a, S> = AdjacencyListView<'a, S, Directed>;

/// Adjacency list whose rows are undirected neighborhoods.
pub type UndirectedAdjacencyView<'a, S> = AdjacencyListView<'a, S, Undirected>;

impl<'a, S: IndexSet, D: Directedness> AdjacencyListView<'a, S, D> {
    pub fn new(adj: &'a AdjacencyList<S>) -> Self {
        Self {
            adj,
            _dir: PhantomData,
        }
    }
}

impl<S: IndexSet, D: Directedness> GraphView for AdjacencyListView<'_, S, D> {
    fn vertex_count(&self) -> NumNodes {
        self.adj.vertex_count()
    }

    fn edge_count(&self) -> NumEdges {
        let sum = self.adj.degrees_sum();
        if D::IS_DIRECTED {
            sum
        } else {
            let loops = self
                .adj
                .vertices()
                .filter(|&v| self.adj.adjacency(v).contains(v))
                .count() as NumEdges;
            (sum + loops) / 2
        }
    }

    fn is_directed(&self) -> bool {
        D::IS_DIRECTED
    }

    /// Undirected views accept either orientation, so rows that were filled
    /// one-sidedly still answer membership symmetrically.
    /// ** Panics if `u >= vertex_count()` or `v >= vertex_count()` **
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj.adjacency(u).contains(v)
            || (!D::IS_DIRECTED && self.adj.adjacency(v).contains(u))
    }

    fn neighbors(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.adj.neighbors(u)
    }

    fn degree(&self, u: Node) -> NumNodes {
        self.adj.degree(u)
    }
}

/// Square [`BitMatrix`] read as a graph; cell `(u, v)` is the pair `(u, v)`.
pub struct BitMatrixView<'a, L: MatrixLayout, D: Directedness> {
    matrix: &'a BitMatrix<L>,
    _dir: PhantomData<D>,
}

/// Bit matrix whose cells are arcs.
pub type DirectedBitMatrixView<'a, L> = BitMatrixView<'a, L, Directed>;

/// Bit matrix whose cells are undirected edges.
pub type UndirectedBitMatrixView<'a, L> = BitMatrixView<'a, L, Undirected>;

impl<'a, L: MatrixLayout, D: Directedness> BitMatrixView<'a, L, D> {
    /// Fails with `ShapeMismatch` unless the matrix is square.
    pub fn try_new(matrix: &'a BitMatrix<L>) -> Result<Self> {
        if !matrix.shape().is_square() {
            return Err(shape_mismatch!(
                "adjacency needs a square matrix, got {}",
                matrix.shape()
            ));
        }
        Ok(Self {
            matrix,
            _dir: PhantomData,
        })
    }
}

impl<L: MatrixLayout, D: Directedness> GraphView for BitMatrixView<'_, L, D> {
    fn vertex_count(&self) -> NumNodes {
        self.matrix.shape().rows as NumNodes
    }

    /// Undirected over dense storage assumes mirrored content; directed over
    /// symmetric storage counts every stored pair as two arcs (one per
    /// orientation), self-loops as one.
    fn edge_count(&self) -> NumEdges {
        let ones = self.matrix.count_ones() as NumEdges;
        let loops = self
            .vertices()
            .filter(|&v| self.matrix.get(v as usize, v as usize))
            .count() as NumEdges;

        match (L::SYMMETRIC, D::IS_DIRECTED) {
            (true, false) | (false, true) => ones,
            (true, true) => 2 * ones - loops,
            (false, false) => (ones + loops) / 2,
        }
    }

    fn is_directed(&self) -> bool {
        D::IS_DIRECTED
    }

    /// ** Panics if `u >= vertex_count()` or `v >= vertex_count()` **
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.matrix.get(u as usize, v as usize)
    }

    fn neighbors(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.matrix.row_iter(u as usize).map(|col| col as Node)
    }
}

test_view_contract!(
    directed_edge_list_contract,
    true,
    |_n, edges| edges.iter().copied().collect::<EdgeList>(),
    |store| EdgeListView::<Directed>::new(&store)
);

test_view_contract!(
    undirected_edge_list_contract,
    false,
    |_n, edges| edges.iter().copied().collect::<EdgeList>(),
    |store| EdgeListView::<Undirected>::new(&store)
);

test_view_contract!(
    directed_adjacency_contract,
    true,
    |n, edges| {
        let mut adj = AdjacencyListBits::new(n);
        for Edge(u, v) in edges.iter().copied() {
            adj.insert(u, v);
        }
        adj
    },
    |store| DirectedAdjacencyView::new(&store)
);

test_view_contract!(
    undirected_adjacency_contract,
    false,
    |n, edges| {
        let mut adj = AdjacencyListSorted::new(n);
        for Edge(u, v) in edges.iter().copied() {
            adj.insert(u, v);
            adj.insert(v, u);
        }
        adj
    },
    |store| UndirectedAdjacencyView::new(&store)
);

test_view_contract!(
    directed_dense_matrix_contract,
    true,
    |n, edges| {
        let mut matrix = DenseBitMatrix::new(MatrixShape::square(n as usize)).unwrap();
        for Edge(u, v) in edges.iter().copied() {
            matrix.set(u as usize, v as usize, true);
        }
        matrix
    },
    |store| DirectedBitMatrixView::try_new(&store).unwrap()
);

test_view_contract!(
    undirected_dense_matrix_contract,
    false,
    |n, edges| {
        let mut matrix = DenseBitMatrix::new(MatrixShape::square(n as usize)).unwrap();
        for Edge(u, v) in edges.iter().copied() {
            matrix.set(u as usize, v as usize, true);
            matrix.set(v as usize, u as usize, true);
        }
        matrix
    },
    |store| UndirectedBitMatrixView::try_new(&store).unwrap()
);

test_view_contract!(
    undirected_symmetric_matrix_contract,
    false,
    |n, edges| {
        let mut matrix = SymmetricBitMatrix::new(MatrixShape::square(n as usize)).unwrap();
        for Edge(u, v) in edges.iter().copied() {
            matrix.set(u as usize, v as usize, true);
        }
        matrix
    },
    |store| UndirectedBitMatrixView::try_new(&store).unwrap()
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        matrix::{DenseBitMatrix, MatrixShape, SymmetricBitMatrix},
        repr::AdjacencyListBits,
    };
    use itertools::Itertools;

    #[test]
    fn edge_list_neighbors_in_source_order() {
        let list: EdgeList = [(0, 1), (0, 2), (1, 2)].map(Edge::from).into_iter().collect();

        let directed = DirectedEdgeListView::new(&list);
        assert_eq!(directed.neighbors(0).collect_vec(), vec![1, 2]);
        assert_eq!(directed.neighbors(2).count(), 0);

        let undirected = UndirectedEdgeListView::new(&list);
        assert_eq!(undirected.neighbors(0).collect_vec(), vec![1, 2]);
        assert_eq!(undirected.neighbors(2).collect_vec(), vec![0, 1]);
    }

    #[test]
    fn directedness_changes_membership() {
        let list: EdgeList = std::iter::once(Edge(1, 0)).collect();

        let directed = DirectedEdgeListView::new(&list);
        assert!(directed.has_edge(1, 0));
        assert!(!directed.has_edge(0, 1));

        let undirected = UndirectedEdgeListView::new(&list);
        assert!(undirected.has_edge(1, 0));
        assert!(undirected.has_edge(0, 1));
    }

    #[test]
    fn self_loops_surface_once_per_stored_pair() {
        let list: EdgeList = [(3, 3), (3, 3)].map(Edge::from).into_iter().collect();
        let view = UndirectedEdgeListView::new(&list);

        assert_eq!(view.neighbors(3).collect_vec(), vec![3, 3]);
        assert_eq!(view.edges().collect_vec(), vec![Edge(3, 3), Edge(3, 3)]);
        assert_eq!(view.degree(3), 2);
    }

    #[test]
    fn edge_list_vertex_count_is_derived() {
        assert_eq!(DirectedEdgeListView::new(&EdgeList::new()).vertex_count(), 0);

        let list: EdgeList = std::iter::once(Edge(0, 9)).collect();
        assert_eq!(UndirectedEdgeListView::new(&list).vertex_count(), 10);
    }

    #[test]
    fn vertex_count_saturates_at_node_max() {
        let list: EdgeList = std::iter::once(Edge(0, Node::MAX)).collect();
        assert_eq!(DirectedEdgeListView::new(&list).vertex_count(), Node::MAX);
    }

    #[test]
    fn matrix_views_require_square_storage() {
        let rect = DenseBitMatrix::new(MatrixShape { rows: 2, cols: 3 }).unwrap();
        assert!(matches!(
            DirectedBitMatrixView::try_new(&rect),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn edge_count_per_directedness() {
        // symmetric storage: the pair {0, 2} and the loop at 1
        let mut sym = SymmetricBitMatrix::new(MatrixShape::square(3)).unwrap();
        sym.set(2, 0, true);
        sym.set(1, 1, true);

        let undirected = UndirectedBitMatrixView::try_new(&sym).unwrap();
        assert_eq!(undirected.edge_count(), 2);
        let directed = DirectedBitMatrixView::try_new(&sym).unwrap();
        assert_eq!(directed.edge_count(), 3);

        // dense storage with mirrored content plus a loop
        let mut dense = DenseBitMatrix::new(MatrixShape::square(3)).unwrap();
        dense.set(0, 2, true);
        dense.set(2, 0, true);
        dense.set(1, 1, true);

        assert_eq!(DirectedBitMatrixView::try_new(&dense).unwrap().edge_count(), 3);
        assert_eq!(UndirectedBitMatrixView::try_new(&dense).unwrap().edge_count(), 2);

        // adjacency rows: loop at 0 plus the pair {0, 1} in both orientations
        let mut adj = AdjacencyListBits::new(2);
        adj.insert(0, 0);
        adj.insert(0, 1);
        adj.insert(1, 0);

        assert_eq!(DirectedAdjacencyView::new(&adj).edge_count(), 3);
        assert_eq!(UndirectedAdjacencyView::new(&adj).edge_count(), 2);
    }

    #[test]
    fn asymmetric_rows_read_undirected() {
        let mut adj = AdjacencyListBits::new(3);
        adj.insert(1, 0);

        let view = UndirectedAdjacencyView::new(&adj);
        assert!(view.has_edge(0, 1));
        assert!(view.has_edge(1, 0));
        // membership is symmetric, but row 0 itself holds nothing
        assert_eq!(view.neighbors(0).count(), 0);
    }

    #[test]
    fn symmetric_matrix_view_reports_both_directions() {
        let mut sym = SymmetricBitMatrix::new(MatrixShape::square(4)).unwrap();
        sym.set(0, 1, true);

        let view = UndirectedBitMatrixView::try_new(&sym).unwrap();
        assert!(view.has_edge(0, 1));
        assert!(view.has_edge(1, 0));
        assert_eq!(view.neighbors(1).collect_vec(), vec![0]);
        assert_eq!(view.edges().collect_vec(), vec![Edge(0, 1)]);
    }
}
