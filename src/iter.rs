/*!
# Bit-Scanning Iteration

[`DenseBitIter`] yields the positions of set bits in a `u64` word slice,
restricted to a half-open bit range. All-zero words are skipped in a single
step; positions inside a non-zero word are extracted with `trailing_zeros`
and clearing the lowest set bit, so iteration cost is proportional to the
number of words touched plus the number of bits reported.

This is the traversal primitive behind bit-backed index sets and bit-matrix
rows; the bit range does not have to be word-aligned, which is what lets a
row-major matrix iterate a single row out of its flat backing storage.
*/

/// Bits per backing word.
pub(crate) const WORD_BITS: usize = 64;

/// Number of words needed to store `bits` bits.
pub(crate) const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Iterator over the positions of set bits in `words`, limited to the bit
/// range `[start, end)` passed at construction. Positions are yielded in
/// ascending order and are absolute, i.e. relative to bit `0` of `words`.
pub struct DenseBitIter<'a> {
    words: &'a [u64],
    /// Remaining bits of the word `word_idx` points at, low bits already consumed.
    current: u64,
    word_idx: usize,
    end: usize,
}

impl<'a> DenseBitIter<'a> {
    /// Creates an iterator over the set bits in `[start, end)`.
    /// ** Panics if `end > words.len() * 64` or `start > end` (debug builds) **
    pub fn new(words: &'a [u64], start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= words.len() * WORD_BITS);

        let word_idx = start / WORD_BITS;
        let current = if start >= end {
            0
        } else {
            words[word_idx] & (u64::MAX << (start % WORD_BITS))
        };

        Self {
            words,
            current,
            word_idx,
            end,
        }
    }

    /// Convenience constructor covering every bit of `words`.
    pub fn over(words: &'a [u64]) -> Self {
        Self::new(words, 0, words.len() * WORD_BITS)
    }
}

impl Iterator for DenseBitIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.word_idx * WORD_BITS + self.current.trailing_zeros() as usize;
                if bit >= self.end {
                    return None;
                }
                self.current &= self.current - 1;
                return Some(bit);
            }

            self.word_idx += 1;
            if self.word_idx * WORD_BITS >= self.end {
                return None;
            }
            self.current = self.words[self.word_idx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn words_with_bits(len: usize, bits: &[usize]) -> Vec<u64> {
        let mut words = vec![0u64; len];
        for &b in bits {
            words[b / WORD_BITS] |= 1 << (b % WORD_BITS);
        }
        words
    }

    #[test]
    fn crosses_word_boundary() {
        let words = words_with_bits(2, &[2, 5, 9, 63, 64]);
        assert_eq!(
            DenseBitIter::over(&words).collect_vec(),
            vec![2, 5, 9, 63, 64]
        );
    }

    #[test]
    fn empty_words_and_ranges() {
        assert_eq!(DenseBitIter::over(&[]).count(), 0);
        assert_eq!(DenseBitIter::over(&[0, 0, 0]).count(), 0);

        let words = words_with_bits(2, &[3, 70]);
        assert_eq!(DenseBitIter::new(&words, 5, 5).count(), 0);
    }

    #[test]
    fn respects_unaligned_range() {
        let words = words_with_bits(3, &[0, 10, 20, 64, 100, 130]);

        // start cuts into the first word, end into the second
        assert_eq!(DenseBitIter::new(&words, 5, 100).collect_vec(), vec![10, 20, 64]);
        // range boundaries landing exactly on set bits
        assert_eq!(
            DenseBitIter::new(&words, 10, 101).collect_vec(),
            vec![10, 20, 64, 100]
        );
        assert_eq!(DenseBitIter::new(&words, 11, 100).collect_vec(), vec![20, 64]);
    }

    #[test]
    fn skips_zero_words() {
        // only the first and last word carry bits
        let mut words = vec![0u64; 100];
        words[0] = 1 << 7;
        words[99] = 1 << 3;
        assert_eq!(
            DenseBitIter::over(&words).collect_vec(),
            vec![7, 99 * WORD_BITS + 3]
        );
    }

    #[test]
    fn full_word() {
        let words = [u64::MAX];
        assert_eq!(DenseBitIter::over(&words).collect_vec(), (0..64).collect_vec());
        assert_eq!(DenseBitIter::new(&words, 60, 64).collect_vec(), vec![60, 61, 62, 63]);
    }
}
