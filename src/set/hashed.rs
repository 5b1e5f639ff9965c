use fxhash::FxHashSet;

use crate::{node::*, set::IndexSet, testing::test_index_set};

/// Hash-table backend for sparse sets over large or unbounded universes.
///
/// Iteration order is unspecified. The universe passed at construction is
/// ignored: capacity grows on demand.
#[derive(Debug, Clone, Default)]
pub struct HashIndexSet {
    items: FxHashSet<Node>,
}

impl IndexSet for HashIndexSet {
    fn with_universe(_n: NumNodes) -> Self {
        Self::default()
    }

    fn contains(&self, u: Node) -> bool {
        self.items.contains(&u)
    }

    fn insert(&mut self, u: Node) -> bool {
        self.items.insert(u)
    }

    fn remove(&mut self, u: Node) -> bool {
        self.items.remove(&u)
    }

    fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.items.iter().copied()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn union_with(&mut self, other: &Self) {
        self.items.extend(other.items.iter().copied());
    }

    fn intersect_with(&mut self, other: &Self) {
        self.items.retain(|u| other.items.contains(u));
    }
}

test_index_set!(hash_set, HashIndexSet, false);
