use std::marker::PhantomData;

use crate::{
    error::{invariant_violation, panics_over, shape_mismatch, Result},
    iter::{words_for, DenseBitIter, WORD_BITS},
    matrix::{LowerTriangle, MatrixIndex, MatrixLayout, MatrixShape, MatrixWindow, RowMajor},
};

/// Boolean grid packed into `u64` words, physical layout chosen by `L`.
#[derive(Clone)]
pub struct BitMatrix<L: MatrixLayout> {
    shape: MatrixShape,
    /// Stored cell count (`L::storage_len` of `shape`). Bits past it in the
    /// last word are kept zero so popcounts stay exact.
    bits: usize,
    words: Vec<u64>,
    _layout: PhantomData<L>,
}

/// Bit matrix storing every cell.
pub type DenseBitMatrix = BitMatrix<RowMajor>;

/// Bit matrix storing one triangle; `get(i, j) == get(j, i)` by construction.
pub type SymmetricBitMatrix = BitMatrix<LowerTriangle>;

impl<L: MatrixLayout> BitMatrix<L> {
    /// Creates an all-false matrix of `shape`.
    ///
    /// Fails with `ShapeMismatch` if the layout rejects the shape or the
    /// cell count overflows.
    pub fn new(shape: MatrixShape) -> Result<Self> {
        L::check_shape(shape)?;
        let bits = L::storage_len(shape)?;
        Ok(Self {
            shape,
            bits,
            words: vec![0; words_for(bits)],
            _layout: PhantomData,
        })
    }

    /// Adopts raw backing words for `shape`.
    ///
    /// Fails with `ShapeMismatch` on a word-count disagreement and with
    /// `InvariantViolation` if a bit past the stored cell range is set.
    pub fn from_words(shape: MatrixShape, words: Vec<u64>) -> Result<Self> {
        L::check_shape(shape)?;
        let bits = L::storage_len(shape)?;
        if words.len() != words_for(bits) {
            return Err(shape_mismatch!(
                "{} backing words given, a {shape} matrix needs {}",
                words.len(),
                words_for(bits)
            ));
        }
        let rem = bits % WORD_BITS;
        if rem != 0 && words.last().is_some_and(|w| w >> rem != 0) {
            return Err(invariant_violation!(
                "set bits beyond the {bits} stored cells"
            ));
        }
        Ok(Self {
            shape,
            bits,
            words,
            _layout: PhantomData,
        })
    }

    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    fn locate(&self, row: usize, col: usize) -> (usize, u64) {
        let slot = L::slot(self.shape, MatrixIndex { row, col });
        (slot / WORD_BITS, 1u64 << (slot % WORD_BITS))
    }

    /// Cell value at `(row, col)`, checked.
    pub fn try_get(&self, row: usize, col: usize) -> Result<bool> {
        self.shape.check_contains(row, col)?;
        let (word, mask) = self.locate(row, col);
        Ok(self.words[word] & mask != 0)
    }

    panics_over!(
        /// Cell value at `(row, col)`.
        /// ** Panics if the position lies outside the shape **
        pub fn get(&self, row: usize, col: usize) -> bool => try_get
    );

    /// Writes `value` at `(row, col)` and returns the old value, checked.
    pub fn try_set(&mut self, row: usize, col: usize, value: bool) -> Result<bool> {
        self.shape.check_contains(row, col)?;
        let (word, mask) = self.locate(row, col);
        let old = self.words[word] & mask != 0;
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
        Ok(old)
    }

    panics_over!(
        /// Writes `value` at `(row, col)` and returns the old value.
        /// ** Panics if the position lies outside the shape **
        pub fn set(&mut self, row: usize, col: usize, value: bool) -> bool => try_set
    );

    /// Inverts the cell at `(row, col)` and returns the old value, checked.
    pub fn try_flip(&mut self, row: usize, col: usize) -> Result<bool> {
        self.shape.check_contains(row, col)?;
        let (word, mask) = self.locate(row, col);
        let old = self.words[word] & mask != 0;
        self.words[word] ^= mask;
        Ok(old)
    }

    panics_over!(
        /// Inverts the cell at `(row, col)` and returns the old value.
        /// ** Panics if the position lies outside the shape **
        pub fn flip(&mut self, row: usize, col: usize) -> bool => try_flip
    );

    /// Assigns `value` to every cell.
    pub fn fill(&mut self, value: bool) {
        let word = if value { u64::MAX } else { 0 };
        self.words.iter_mut().for_each(|w| *w = word);
        if value {
            self.mask_tail();
        }
    }

    /// Resets every cell to *false*.
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Inverts every stored cell.
    pub fn complement(&mut self) {
        self.words.iter_mut().for_each(|w| *w = !*w);
        self.mask_tail();
    }

    /// Number of *true* cells in storage. Symmetric packing counts each
    /// unordered pair once.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Discards the content and resizes to an all-false matrix of `new_shape`.
    pub fn reshape(&mut self, new_shape: MatrixShape) -> Result<()> {
        L::check_shape(new_shape)?;
        let bits = L::storage_len(new_shape)?;
        self.shape = new_shape;
        self.bits = bits;
        self.words.clear();
        self.words.resize(words_for(bits), 0);
        Ok(())
    }

    /// Iterates the *true* columns of `row` in ascending order.
    /// ** Panics if `row >= rows` **
    pub fn row_iter(&self, row: usize) -> BitRowIter<'_, L> {
        assert!(row < self.shape.rows);
        let (prefix, tail_start) = L::row_split(self.shape, row);
        BitRowIter {
            words: &self.words,
            prefix_start: prefix.start,
            prefix: DenseBitIter::new(&self.words, prefix.start, prefix.end),
            shape: self.shape,
            row,
            next_col: tail_start,
            _layout: PhantomData,
        }
    }

    /// Read-only zero-copy view of the region described by `win`.
    ///
    /// Fails with `ShapeMismatch` if the window exceeds the parent shape;
    /// the extent is not re-validated afterwards.
    pub fn window(&self, win: MatrixWindow) -> Result<BitWindow<'_, L>> {
        if !win.fits_within(self.shape) {
            return Err(shape_mismatch!(
                "window {win} exceeds its {} parent",
                self.shape
            ));
        }
        Ok(BitWindow { parent: self, win })
    }

    /// Mutable zero-copy view; writes through it mutate the parent.
    ///
    /// Fails with `ShapeMismatch` if the window exceeds the parent shape.
    pub fn window_mut(&mut self, win: MatrixWindow) -> Result<BitWindowMut<'_, L>> {
        if !win.fits_within(self.shape) {
            return Err(shape_mismatch!(
                "window {win} exceeds its {} parent",
                self.shape
            ));
        }
        Ok(BitWindowMut { parent: self, win })
    }

    fn mask_tail(&mut self) {
        let rem = self.bits % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }
}

/// Iterator over the *true* columns of one matrix row.
///
/// The contiguous part of the row delegates to [`DenseBitIter`]; under
/// symmetric packing the columns past the diagonal live in strided slots and
/// are probed individually.
pub struct BitRowIter<'a, L: MatrixLayout> {
    words: &'a [u64],
    prefix: DenseBitIter<'a>,
    prefix_start: usize,
    shape: MatrixShape,
    row: usize,
    next_col: usize,
    _layout: PhantomData<L>,
}

impl<L: MatrixLayout> Iterator for BitRowIter<'_, L> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if let Some(slot) = self.prefix.next() {
            return Some(slot - self.prefix_start);
        }

        while self.next_col < self.shape.cols {
            let col = self.next_col;
            self.next_col += 1;
            let slot = L::slot(self.shape, MatrixIndex { row: self.row, col });
            if self.words[slot / WORD_BITS] & (1u64 << (slot % WORD_BITS)) != 0 {
                return Some(col);
            }
        }

        None
    }
}

/// Read-only window into a [`BitMatrix`]; the parent outlives the view.
pub struct BitWindow<'a, L: MatrixLayout> {
    parent: &'a BitMatrix<L>,
    win: MatrixWindow,
}

impl<L: MatrixLayout> BitWindow<'_, L> {
    pub fn shape(&self) -> MatrixShape {
        self.win.shape
    }

    /// Cell value at window-local `(row, col)`, checked.
    pub fn try_get(&self, row: usize, col: usize) -> Result<bool> {
        self.win.shape.check_contains(row, col)?;
        self.parent
            .try_get(self.win.origin.row + row, self.win.origin.col + col)
    }

    panics_over!(
        /// Cell value at window-local `(row, col)`, read from the parent cell
        /// `(origin.row + row, origin.col + col)`.
        /// ** Panics if the position lies outside the window **
        pub fn get(&self, row: usize, col: usize) -> bool => try_get
    );

    /// Materializes the window into an owned dense matrix.
    pub fn to_matrix(&self) -> DenseBitMatrix {
        copy_out(self.parent, self.win)
    }
}

/// Mutable window into a [`BitMatrix`]; writes mutate the parent in place.
pub struct BitWindowMut<'a, L: MatrixLayout> {
    parent: &'a mut BitMatrix<L>,
    win: MatrixWindow,
}

impl<L: MatrixLayout> BitWindowMut<'_, L> {
    pub fn shape(&self) -> MatrixShape {
        self.win.shape
    }

    /// Cell value at window-local `(row, col)`, checked.
    pub fn try_get(&self, row: usize, col: usize) -> Result<bool> {
        self.win.shape.check_contains(row, col)?;
        self.parent
            .try_get(self.win.origin.row + row, self.win.origin.col + col)
    }

    panics_over!(
        /// Cell value at window-local `(row, col)`.
        /// ** Panics if the position lies outside the window **
        pub fn get(&self, row: usize, col: usize) -> bool => try_get
    );

    /// Writes `value` at window-local `(row, col)` and returns the old value,
    /// checked.
    pub fn try_set(&mut self, row: usize, col: usize, value: bool) -> Result<bool> {
        self.win.shape.check_contains(row, col)?;
        self.parent
            .try_set(self.win.origin.row + row, self.win.origin.col + col, value)
    }

    panics_over!(
        /// Writes `value` through to the parent cell
        /// `(origin.row + row, origin.col + col)` and returns the old value.
        /// ** Panics if the position lies outside the window **
        pub fn set(&mut self, row: usize, col: usize, value: bool) -> bool => try_set
    );

    /// Inverts the cell at window-local `(row, col)`, checked.
    pub fn try_flip(&mut self, row: usize, col: usize) -> Result<bool> {
        self.win.shape.check_contains(row, col)?;
        self.parent
            .try_flip(self.win.origin.row + row, self.win.origin.col + col)
    }

    panics_over!(
        /// Inverts the cell at window-local `(row, col)` and returns the old value.
        /// ** Panics if the position lies outside the window **
        pub fn flip(&mut self, row: usize, col: usize) -> bool => try_flip
    );

    /// Assigns `value` to every cell covered by the window.
    pub fn fill(&mut self, value: bool) {
        for row in 0..self.win.shape.rows {
            for col in 0..self.win.shape.cols {
                self.set(row, col, value);
            }
        }
    }

    /// Materializes the window into an owned dense matrix.
    pub fn to_matrix(&self) -> DenseBitMatrix {
        copy_out(self.parent, self.win)
    }
}

fn copy_out<L: MatrixLayout>(parent: &BitMatrix<L>, win: MatrixWindow) -> DenseBitMatrix {
    // cannot overflow: the window fits inside an already validated parent
    let bits = win.shape.rows * win.shape.cols;
    let mut out = DenseBitMatrix {
        shape: win.shape,
        bits,
        words: vec![0; words_for(bits)],
        _layout: PhantomData,
    };
    for row in 0..win.shape.rows {
        for col in 0..win.shape.cols {
            if parent.get(win.origin.row + row, win.origin.col + col) {
                out.set(row, col, true);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn set_reports_old_value() {
        let mut m = DenseBitMatrix::new(MatrixShape { rows: 3, cols: 4 }).unwrap();
        assert!(!m.set(1, 2, true));
        assert!(m.set(1, 2, true));
        assert!(m.get(1, 2));
        assert!(m.set(1, 2, false));
        assert!(!m.get(1, 2));
        assert!(!m.flip(0, 0));
        assert!(m.get(0, 0));
        assert!(m.flip(0, 0));
        assert!(!m.get(0, 0));
    }

    #[test]
    fn rejects_out_of_range() {
        let mut m = DenseBitMatrix::new(MatrixShape { rows: 3, cols: 4 }).unwrap();
        assert_eq!(
            m.try_get(3, 0),
            Err(Error::OutOfRange { index: 3, bound: 3 })
        );
        assert_eq!(
            m.try_set(0, 4, true),
            Err(Error::OutOfRange { index: 4, bound: 4 })
        );
        assert!(m.try_flip(2, 3).is_ok());
    }

    #[test]
    fn symmetric_requires_square() {
        assert!(matches!(
            SymmetricBitMatrix::new(MatrixShape { rows: 3, cols: 4 }),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn symmetric_mirrors_writes() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let n = 20;
        let mut m = SymmetricBitMatrix::new(MatrixShape::square(n)).unwrap();
        let mut shadow = vec![vec![false; n]; n];

        for _ in 0..300 {
            let (i, j) = (rng.random_range(0..n), rng.random_range(0..n));
            let value = rng.random_bool(0.7);

            assert_eq!(m.set(i, j, value), shadow[i][j]);
            shadow[i][j] = value;
            shadow[j][i] = value;

            assert_eq!(m.get(i, j), value);
            assert_eq!(m.get(j, i), value);
        }

        for i in 0..n {
            for j in 0..n {
                assert_eq!(m.get(i, j), shadow[i][j]);
            }
        }
    }

    #[test]
    fn row_iteration_matches_reference() {
        let rng = &mut Pcg64Mcg::seed_from_u64(6);
        let n = 70; // forces multi-word rows

        let mut dense = DenseBitMatrix::new(MatrixShape::square(n)).unwrap();
        let mut sym = SymmetricBitMatrix::new(MatrixShape::square(n)).unwrap();
        let mut shadow_dense = vec![vec![false; n]; n];
        let mut shadow_sym = vec![vec![false; n]; n];

        for _ in 0..(n * n / 2) {
            let (i, j) = (rng.random_range(0..n), rng.random_range(0..n));
            dense.set(i, j, true);
            shadow_dense[i][j] = true;
            sym.set(i, j, true);
            shadow_sym[i][j] = true;
            shadow_sym[j][i] = true;
        }

        for row in 0..n {
            let expected = (0..n).filter(|&c| shadow_dense[row][c]).collect_vec();
            assert_eq!(dense.row_iter(row).collect_vec(), expected);

            let expected = (0..n).filter(|&c| shadow_sym[row][c]).collect_vec();
            assert_eq!(sym.row_iter(row).collect_vec(), expected);
        }
    }

    #[test]
    fn fill_complement_and_count() {
        let mut m = SymmetricBitMatrix::new(MatrixShape::square(9)).unwrap();
        assert_eq!(m.count_ones(), 0);

        m.fill(true);
        assert_eq!(m.count_ones(), 9 * 10 / 2);

        m.complement();
        assert_eq!(m.count_ones(), 0);

        m.set(2, 7, true);
        m.complement();
        assert_eq!(m.count_ones(), 9 * 10 / 2 - 1);
        assert!(!m.get(2, 7));
        assert!(!m.get(7, 2));
        assert!(m.get(0, 5));
    }

    #[test]
    fn reshape_discards_content() {
        let mut m = DenseBitMatrix::new(MatrixShape { rows: 2, cols: 2 }).unwrap();
        m.fill(true);
        m.reshape(MatrixShape { rows: 4, cols: 3 }).unwrap();
        assert_eq!(m.shape(), MatrixShape { rows: 4, cols: 3 });
        assert_eq!(m.count_ones(), 0);
    }

    #[test]
    fn window_translates_to_parent() {
        let mut parent = DenseBitMatrix::new(MatrixShape::square(5)).unwrap();
        parent.set(2, 3, true);

        let win = MatrixWindow::square(MatrixIndex { row: 2, col: 3 }, 2);
        {
            let window = parent.window(win).unwrap();
            assert!(window.get(0, 0));
            assert!(!window.get(1, 1));
        }

        let mut window = parent.window_mut(win).unwrap();
        assert!(!window.set(1, 1, true));
        assert!(parent.get(3, 4));
    }

    #[test]
    fn window_on_symmetric_parent_stays_symmetric() {
        let mut parent = SymmetricBitMatrix::new(MatrixShape::square(6)).unwrap();
        let win = MatrixWindow::new(
            MatrixIndex { row: 0, col: 3 },
            MatrixShape { rows: 2, cols: 3 },
        );

        let mut window = parent.window_mut(win).unwrap();
        window.set(1, 2, true); // parent (1, 5)
        assert!(parent.get(1, 5));
        assert!(parent.get(5, 1));
    }

    #[test]
    fn window_rejects_excess_extent() {
        let parent = DenseBitMatrix::new(MatrixShape::square(5)).unwrap();
        assert!(matches!(
            parent.window(MatrixWindow::square(MatrixIndex { row: 4, col: 4 }, 2)),
            Err(Error::ShapeMismatch(_))
        ));
        assert!(parent
            .window(MatrixWindow::main(MatrixShape::square(5)))
            .is_ok());
    }

    #[test]
    fn window_materializes_its_cells() {
        let mut parent = SymmetricBitMatrix::new(MatrixShape::square(7)).unwrap();
        for (i, j) in [(1, 2), (3, 3), (6, 0), (4, 5)] {
            parent.set(i, j, true);
        }

        let win = MatrixWindow::new(
            MatrixIndex { row: 1, col: 0 },
            MatrixShape { rows: 4, cols: 6 },
        );
        let window = parent.window(win).unwrap();
        let copy = window.to_matrix();

        assert_eq!(copy.shape(), win.shape);
        for row in 0..4 {
            for col in 0..6 {
                assert_eq!(copy.get(row, col), window.get(row, col));
            }
        }
    }

    #[test]
    fn from_words_validates_storage() {
        let shape = MatrixShape { rows: 2, cols: 3 };
        assert!(DenseBitMatrix::from_words(shape, vec![0b101_010]).is_ok());

        assert!(matches!(
            DenseBitMatrix::from_words(shape, vec![0, 0]),
            Err(Error::ShapeMismatch(_))
        ));
        // bit 6 lies beyond the 6 stored cells
        assert!(matches!(
            DenseBitMatrix::from_words(shape, vec![1 << 6]),
            Err(Error::InvariantViolation(_))
        ));
    }
}
