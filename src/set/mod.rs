/*!
# Index Sets

This module provides the [`IndexSet`] abstraction over duplicate-free sets of
vertex indices, allowing algorithms to choose the most efficient backend
based on context:

- [`BitIndexSet`]: one bit per index — O(1) membership and insert, ascending
  iteration that skips empty words, best for dense or small universes.
- [`HashIndexSet`]: hash-table backend — O(1) average operations, unspecified
  iteration order, best for sparse sets over large, unbounded universes.
- [`SortedIndexSet`]: sorted vector — O(log n) membership, O(n) insert,
  ascending iteration, merge-based set operations, best for mostly-static
  sets.

All three agree on the [`IndexSet`] contract; iteration order is a backend
property, not a correctness guarantee (except where documented ascending).
*/

use crate::node::*;

mod bits;
mod hashed;
mod sorted;

pub use bits::*;
pub use hashed::*;
pub use sorted::*;

/// Contract shared by all index-set backends.
///
/// Inserting a present element and removing an absent one are no-ops, not
/// errors; the `bool` returns report whether the set changed.
pub trait IndexSet: Clone {
    /// Creates an empty set for indices drawn from `0..n`.
    ///
    /// Bounded backends allocate storage for the universe up front; unbounded
    /// backends treat `n` as a non-binding capacity hint.
    fn with_universe(n: NumNodes) -> Self;

    /// Returns *true* if `u` is in the set.
    fn contains(&self, u: Node) -> bool;

    /// Inserts `u` into the set.
    /// Returns *true* exactly if `u` was not present before.
    fn insert(&mut self, u: Node) -> bool;

    /// Inserts multiple indices from an iterator.
    fn insert_multiple<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Node>,
    {
        for u in iter {
            self.insert(u);
        }
    }

    /// Removes `u` from the set.
    /// Returns *true* exactly if `u` was present before.
    fn remove(&mut self, u: Node) -> bool;

    /// Returns an iterator over all indices in the set.
    fn iter(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of indices in the set.
    fn len(&self) -> usize;

    /// Returns *true* if the set is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all indices from the set.
    fn clear(&mut self);

    /// Replaces `self` with `self ∪ other`. The operand is unmodified.
    fn union_with(&mut self, other: &Self);

    /// Replaces `self` with `self ∩ other`. The operand is unmodified.
    fn intersect_with(&mut self, other: &Self);
}
