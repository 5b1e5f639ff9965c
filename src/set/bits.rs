use crate::{
    iter::{words_for, DenseBitIter, WORD_BITS},
    node::*,
    set::IndexSet,
    testing::test_index_set,
};

/// Bit-vector backend: one bit per index, plus a cached cardinality.
///
/// Membership and removal beyond the current universe are simply *false*;
/// inserting beyond it grows the backing word array, so `insert` is total
/// over the whole `Node` range (amortized O(1)).
#[derive(Debug, Clone, Default)]
pub struct BitIndexSet {
    words: Vec<u64>,
    cardinality: usize,
}

impl BitIndexSet {
    /// Creates a set over `0..n` pre-populated from an iterator.
    pub fn from_indices<I>(n: NumNodes, indices: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        let mut set = Self::with_universe(n);
        set.insert_multiple(indices);
        set
    }

    fn split(u: Node) -> (usize, u64) {
        (
            u as usize / WORD_BITS,
            1u64 << (u as usize % WORD_BITS),
        )
    }

    fn recount(&mut self) {
        self.cardinality = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }
}

impl IndexSet for BitIndexSet {
    fn with_universe(n: NumNodes) -> Self {
        Self {
            words: vec![0; words_for(n as usize)],
            cardinality: 0,
        }
    }

    fn contains(&self, u: Node) -> bool {
        let (word, mask) = Self::split(u);
        self.words.get(word).is_some_and(|w| w & mask != 0)
    }

    fn insert(&mut self, u: Node) -> bool {
        let (word, mask) = Self::split(u);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }

        let fresh = self.words[word] & mask == 0;
        self.words[word] |= mask;
        self.cardinality += fresh as usize;

        fresh
    }

    fn remove(&mut self, u: Node) -> bool {
        let (word, mask) = Self::split(u);
        match self.words.get_mut(word) {
            Some(w) if *w & mask != 0 => {
                *w &= !mask;
                self.cardinality -= 1;
                true
            }
            _ => false,
        }
    }

    /// Ascending; skips all-zero words in one step.
    fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        DenseBitIter::over(&self.words).map(|b| b as Node)
    }

    fn len(&self) -> usize {
        self.cardinality
    }

    fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
        self.cardinality = 0;
    }

    fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
        self.recount();
    }

    fn intersect_with(&mut self, other: &Self) {
        for (i, w) in self.words.iter_mut().enumerate() {
            *w &= other.words.get(i).copied().unwrap_or(0);
        }
        self.recount();
    }
}

test_index_set!(bits_set, BitIndexSet, true);

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn iterates_across_word_boundary() {
        let set = BitIndexSet::from_indices(70, [2 as Node, 5, 9, 63, 64]);
        assert_eq!(set.iter().collect_vec(), vec![2, 5, 9, 63, 64]);
    }

    #[test]
    fn grows_on_insert_past_universe() {
        let mut set = BitIndexSet::with_universe(10);
        assert!(!set.contains(200));
        assert!(set.insert(200));
        assert!(set.contains(200));
        assert_eq!(set.len(), 1);
        assert!(set.remove(200));
        assert!(set.is_empty());
    }

    #[test]
    fn set_ops_across_different_universes() {
        let a = BitIndexSet::from_indices(10, [1 as Node, 3, 7]);
        let big = BitIndexSet::from_indices(300, [3 as Node, 255]);

        let mut union = a.clone();
        union.union_with(&big);
        assert_eq!(union.iter().collect_vec(), vec![1, 3, 7, 255]);

        let mut isect = big.clone();
        isect.intersect_with(&a);
        assert_eq!(isect.iter().collect_vec(), vec![3]);
    }
}
