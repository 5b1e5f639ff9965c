use std::ops::Index;

use rand::Rng;

use crate::{Edge, Node};

/// Flat list of vertex pairs with positional access.
///
/// The list keeps every pair it is given, duplicates included, in insertion
/// order. It answers no adjacency queries of its own; wrap it in an
/// [`EdgeListView`](crate::view::EdgeListView) for those.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Appends `edge` at the end.
    pub fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Inserts `edge` at `index`, shifting later entries back.
    /// ** Panics if `index > len` **
    pub fn insert_at(&mut self, index: usize, edge: Edge) {
        self.edges.insert(index, edge);
    }

    /// The edge at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<Edge> {
        self.edges.get(index).copied()
    }

    /// Overwrites the edge at `index` and returns the previous one.
    /// ** Panics if `index >= len` **
    pub fn replace(&mut self, index: usize, edge: Edge) -> Edge {
        std::mem::replace(&mut self.edges[index], edge)
    }

    /// Removes and returns the last edge.
    pub fn pop(&mut self) -> Option<Edge> {
        self.edges.pop()
    }

    /// Removes the edge at `index`, shifting later entries forward. Use
    /// [`take_random`](Self::take_random) when the order does not matter.
    /// ** Panics if `index >= len` **
    pub fn take_at(&mut self, index: usize) -> Edge {
        self.edges.remove(index)
    }

    /// Removes and returns a uniformly chosen edge, or `None` if the list is
    /// empty. The vacated slot is filled with the last edge, so removal is
    /// O(1) but the remaining order is not preserved.
    pub fn take_random<R: Rng>(&mut self, rng: &mut R) -> Option<Edge> {
        if self.edges.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.edges.len());
        Some(self.edges.swap_remove(index))
    }

    /// Position of the first entry equal to `edge`, endpoint order included:
    /// `(u, v)` does not match a stored `(v, u)`.
    pub fn find(&self, edge: Edge) -> Option<usize> {
        self.edges.iter().position(|&e| e == edge)
    }

    /// Largest vertex appearing in any edge, or `None` for an empty list.
    pub fn max_vertex_index(&self) -> Option<Node> {
        self.edges.iter().map(|e| e.0.max(e.1)).max()
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }
}

impl Index<usize> for EdgeList {
    type Output = Edge;

    fn index(&self, index: usize) -> &Edge {
        &self.edges[index]
    }
}

impl FromIterator<Edge> for EdgeList {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl Extend<Edge> for EdgeList {
    fn extend<I: IntoIterator<Item = Edge>>(&mut self, iter: I) {
        self.edges.extend(iter);
    }
}

impl IntoIterator for EdgeList {
    type Item = Edge;
    type IntoIter = std::vec::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = Edge;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Edge>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter().copied()
    }
}
