use itertools::Itertools;

use crate::{
    error::{invariant_violation, Result},
    node::*,
    set::IndexSet,
    testing::test_index_set,
};

/// Sorted-vector backend: binary-search membership, shift-based insertion.
///
/// Elements are kept strictly ascending, which makes iteration ordered and
/// lets the set operations run as linear merges. Best for mostly-static sets.
#[derive(Debug, Clone, Default)]
pub struct SortedIndexSet {
    items: Vec<Node>,
}

impl SortedIndexSet {
    /// Adopts an already sorted vector without re-sorting it.
    ///
    /// Fails with `InvariantViolation` unless `items` is strictly ascending.
    pub fn from_sorted(items: Vec<Node>) -> Result<Self> {
        if items.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invariant_violation!(
                "sorted-vector backend requires strictly ascending indices"
            ));
        }
        Ok(Self { items })
    }

    /// The elements in ascending order.
    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }
}

impl IndexSet for SortedIndexSet {
    fn with_universe(_n: NumNodes) -> Self {
        Self::default()
    }

    fn contains(&self, u: Node) -> bool {
        self.items.binary_search(&u).is_ok()
    }

    fn insert(&mut self, u: Node) -> bool {
        match self.items.binary_search(&u) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, u);
                true
            }
        }
    }

    fn remove(&mut self, u: Node) -> bool {
        match self.items.binary_search(&u) {
            Ok(pos) => {
                self.items.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Ascending.
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
        self.items = self
            .items
            .iter()
            .merge(other.items.iter())
            .dedup()
            .copied()
            .collect();
    }

    fn intersect_with(&mut self, other: &Self) {
        let mut kept = Vec::with_capacity(self.items.len().min(other.items.len()));
        let (mut i, mut j) = (0, 0);
        while i < self.items.len() && j < other.items.len() {
            match self.items[i].cmp(&other.items[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    kept.push(self.items[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        self.items = kept;
    }
}

test_index_set!(sorted_set, SortedIndexSet, true);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn from_sorted_validates_order() {
        assert!(SortedIndexSet::from_sorted(vec![]).is_ok());
        assert!(SortedIndexSet::from_sorted(vec![0, 1, 5, 9]).is_ok());

        assert!(matches!(
            SortedIndexSet::from_sorted(vec![0, 5, 3]),
            Err(Error::InvariantViolation(_))
        ));
        // duplicates break strictness too
        assert!(SortedIndexSet::from_sorted(vec![2, 2]).is_err());
    }

    #[test]
    fn insert_keeps_slice_sorted() {
        let mut set = SortedIndexSet::default();
        for u in [9 as Node, 1, 4, 1, 20, 0] {
            set.insert(u);
        }
        assert_eq!(set.as_slice(), &[0, 1, 4, 9, 20]);
    }
}
