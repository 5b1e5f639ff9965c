use std::marker::PhantomData;

use crate::{
    error::{panics_over, shape_mismatch, Result},
    matrix::{LowerTriangle, MatrixIndex, MatrixLayout, MatrixShape, MatrixWindow, RowMajor},
};

/// Element grid over an arbitrary scalar type, physical layout chosen by `L`.
///
/// `T::default()` plays the role of the absent entry: fresh matrices and
/// reshaped matrices hold it everywhere.
#[derive(Clone)]
pub struct ScalarMatrix<T, L: MatrixLayout> {
    shape: MatrixShape,
    items: Vec<T>,
    _layout: PhantomData<L>,
}

/// Scalar matrix storing every cell.
pub type DenseMatrix<T> = ScalarMatrix<T, RowMajor>;

/// Scalar matrix storing one triangle; `get(i, j)` and `get(j, i)` read the
/// same cell.
pub type SymmetricMatrix<T> = ScalarMatrix<T, LowerTriangle>;

impl<T: Clone + Default, L: MatrixLayout> ScalarMatrix<T, L> {
    /// Creates a matrix of `shape` holding `T::default()` everywhere.
    ///
    /// Fails with `ShapeMismatch` if the layout rejects the shape or the
    /// cell count overflows.
    pub fn new(shape: MatrixShape) -> Result<Self> {
        L::check_shape(shape)?;
        let len = L::storage_len(shape)?;
        Ok(Self {
            shape,
            items: vec![T::default(); len],
            _layout: PhantomData,
        })
    }

    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    /// Reference to the cell at `(row, col)`, checked.
    pub fn try_get(&self, row: usize, col: usize) -> Result<&T> {
        self.shape.check_contains(row, col)?;
        Ok(&self.items[L::slot(self.shape, MatrixIndex { row, col })])
    }

    panics_over!(
        /// Reference to the cell at `(row, col)`.
        /// ** Panics if the position lies outside the shape **
        pub fn get(&self, row: usize, col: usize) -> &T => try_get
    );

    /// Writes `value` at `(row, col)` and returns the old value, checked.
    pub fn try_set(&mut self, row: usize, col: usize, value: T) -> Result<T> {
        self.shape.check_contains(row, col)?;
        let slot = L::slot(self.shape, MatrixIndex { row, col });
        Ok(std::mem::replace(&mut self.items[slot], value))
    }

    panics_over!(
        /// Writes `value` at `(row, col)` and returns the old value.
        /// ** Panics if the position lies outside the shape **
        pub fn set(&mut self, row: usize, col: usize, value: T) -> T => try_set
    );

    /// Assigns a clone of `value` to every cell.
    pub fn fill(&mut self, value: T) {
        self.items.fill(value);
    }

    /// Resets every cell to `T::default()`.
    pub fn clear(&mut self) {
        self.fill(T::default());
    }

    /// Discards the content and resizes to an all-default matrix of
    /// `new_shape`.
    pub fn reshape(&mut self, new_shape: MatrixShape) -> Result<()> {
        L::check_shape(new_shape)?;
        let len = L::storage_len(new_shape)?;
        self.shape = new_shape;
        self.items.clear();
        self.items.resize(len, T::default());
        Ok(())
    }

    /// Iterates the cells of `row` in column order.
    /// ** Panics if `row >= rows` **
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = &T> + '_ {
        assert!(row < self.shape.rows);
        (0..self.shape.cols)
            .map(move |col| &self.items[L::slot(self.shape, MatrixIndex { row, col })])
    }

    /// Read-only zero-copy view of the region described by `win`.
    ///
    /// Fails with `ShapeMismatch` if the window exceeds the parent shape.
    pub fn window(&self, win: MatrixWindow) -> Result<ScalarWindow<'_, T, L>> {
        if !win.fits_within(self.shape) {
            return Err(shape_mismatch!(
                "window {win} exceeds its {} parent",
                self.shape
            ));
        }
        Ok(ScalarWindow { parent: self, win })
    }

    /// Mutable zero-copy view; writes through it mutate the parent.
    ///
    /// Fails with `ShapeMismatch` if the window exceeds the parent shape.
    pub fn window_mut(&mut self, win: MatrixWindow) -> Result<ScalarWindowMut<'_, T, L>> {
        if !win.fits_within(self.shape) {
            return Err(shape_mismatch!(
                "window {win} exceeds its {} parent",
                self.shape
            ));
        }
        Ok(ScalarWindowMut { parent: self, win })
    }
}

/// Read-only window into a [`ScalarMatrix`].
pub struct ScalarWindow<'a, T, L: MatrixLayout> {
    parent: &'a ScalarMatrix<T, L>,
    win: MatrixWindow,
}

impl<T: Clone + Default, L: MatrixLayout> ScalarWindow<'_, T, L> {
    pub fn shape(&self) -> MatrixShape {
        self.win.shape
    }

    /// Reference to the cell at window-local `(row, col)`, checked.
    pub fn try_get(&self, row: usize, col: usize) -> Result<&T> {
        self.win.shape.check_contains(row, col)?;
        self.parent
            .try_get(self.win.origin.row + row, self.win.origin.col + col)
    }

    panics_over!(
        /// Reference to the cell at window-local `(row, col)`, read from the
        /// parent cell `(origin.row + row, origin.col + col)`.
        /// ** Panics if the position lies outside the window **
        pub fn get(&self, row: usize, col: usize) -> &T => try_get
    );

    /// Materializes the window into an owned dense matrix.
    pub fn to_matrix(&self) -> DenseMatrix<T> {
        copy_out(self.parent, self.win)
    }
}

/// Mutable window into a [`ScalarMatrix`]; writes mutate the parent in place.
pub struct ScalarWindowMut<'a, T, L: MatrixLayout> {
    parent: &'a mut ScalarMatrix<T, L>,
    win: MatrixWindow,
}

impl<T: Clone + Default, L: MatrixLayout> ScalarWindowMut<'_, T, L> {
    pub fn shape(&self) -> MatrixShape {
        self.win.shape
    }

    /// Reference to the cell at window-local `(row, col)`, checked.
    pub fn try_get(&self, row: usize, col: usize) -> Result<&T> {
        self.win.shape.check_contains(row, col)?;
        self.parent
            .try_get(self.win.origin.row + row, self.win.origin.col + col)
    }

    panics_over!(
        /// Reference to the cell at window-local `(row, col)`.
        /// ** Panics if the position lies outside the window **
        pub fn get(&self, row: usize, col: usize) -> &T => try_get
    );

    /// Writes `value` at window-local `(row, col)` and returns the old value,
    /// checked.
    pub fn try_set(&mut self, row: usize, col: usize, value: T) -> Result<T> {
        self.win.shape.check_contains(row, col)?;
        self.parent
            .try_set(self.win.origin.row + row, self.win.origin.col + col, value)
    }

    panics_over!(
        /// Writes `value` through to the parent cell
        /// `(origin.row + row, origin.col + col)` and returns the old value.
        /// ** Panics if the position lies outside the window **
        pub fn set(&mut self, row: usize, col: usize, value: T) -> T => try_set
    );

    /// Assigns a clone of `value` to every cell covered by the window.
    pub fn fill(&mut self, value: T) {
        for row in 0..self.win.shape.rows {
            for col in 0..self.win.shape.cols {
                self.set(row, col, value.clone());
            }
        }
    }

    /// Materializes the window into an owned dense matrix.
    pub fn to_matrix(&self) -> DenseMatrix<T> {
        copy_out(self.parent, self.win)
    }
}

fn copy_out<T: Clone + Default, L: MatrixLayout>(
    parent: &ScalarMatrix<T, L>,
    win: MatrixWindow,
) -> DenseMatrix<T> {
    let mut out = DenseMatrix {
        shape: win.shape,
        items: vec![T::default(); win.shape.rows * win.shape.cols],
        _layout: PhantomData,
    };
    for row in 0..win.shape.rows {
        for col in 0..win.shape.cols {
            out.set(
                row,
                col,
                parent.get(win.origin.row + row, win.origin.col + col).clone(),
            );
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
    fn set_returns_previous_value() {
        let mut m: DenseMatrix<i32> = DenseMatrix::new(MatrixShape { rows: 2, cols: 3 }).unwrap();
        assert_eq!(*m.get(1, 2), 0);
        assert_eq!(m.set(1, 2, 7), 0);
        assert_eq!(m.set(1, 2, -4), 7);
        assert_eq!(*m.get(1, 2), -4);
    }

    #[test]
    fn rejects_out_of_range() {
        let mut m: DenseMatrix<u8> = DenseMatrix::new(MatrixShape { rows: 2, cols: 3 }).unwrap();
        assert_eq!(
            m.try_get(2, 0).unwrap_err(),
            Error::OutOfRange { index: 2, bound: 2 }
        );
        assert_eq!(
            m.try_set(0, 3, 1).unwrap_err(),
            Error::OutOfRange { index: 3, bound: 3 }
        );
    }

    #[test]
    fn symmetric_shares_one_cell() {
        let mut m: SymmetricMatrix<u32> = SymmetricMatrix::new(MatrixShape::square(5)).unwrap();
        assert!(matches!(
            SymmetricMatrix::<u32>::new(MatrixShape { rows: 2, cols: 3 }),
            Err(Error::ShapeMismatch(_))
        ));

        assert_eq!(m.set(1, 4, 9), 0);
        assert_eq!(*m.get(4, 1), 9);
        assert_eq!(m.set(4, 1, 2), 9);
        assert_eq!(*m.get(1, 4), 2);
    }

    #[test]
    fn symmetric_matches_shadow_model() {
        let rng = &mut Pcg64Mcg::seed_from_u64(21);
        let n = 15;
        let mut m: SymmetricMatrix<i64> = SymmetricMatrix::new(MatrixShape::square(n)).unwrap();
        let mut shadow = vec![vec![0i64; n]; n];

        for _ in 0..400 {
            let (i, j) = (rng.random_range(0..n), rng.random_range(0..n));
            let value = rng.random_range(-50..50);

            assert_eq!(m.set(i, j, value), shadow[i][j]);
            shadow[i][j] = value;
            shadow[j][i] = value;
        }

        for i in 0..n {
            assert_eq!(
                m.row_iter(i).copied().collect_vec(),
                shadow[i],
                "row {i} diverged"
            );
        }
    }

    #[test]
    fn row_iteration_in_column_order() {
        let mut m: DenseMatrix<usize> = DenseMatrix::new(MatrixShape { rows: 3, cols: 4 }).unwrap();
        for row in 0..3 {
            for col in 0..4 {
                m.set(row, col, row * 10 + col);
            }
        }

        assert_eq!(m.row_iter(2).copied().collect_vec(), vec![20, 21, 22, 23]);
    }

    #[test]
    fn fill_and_reshape() {
        let mut m: DenseMatrix<char> = DenseMatrix::new(MatrixShape::square(3)).unwrap();
        m.fill('x');
        assert_eq!(*m.get(2, 2), 'x');

        m.reshape(MatrixShape { rows: 2, cols: 5 }).unwrap();
        assert_eq!(m.shape(), MatrixShape { rows: 2, cols: 5 });
        assert!(m.row_iter(0).all(|&c| c == char::default()));
    }

    #[test]
    fn window_writes_through_to_parent() {
        let mut parent: DenseMatrix<u16> = DenseMatrix::new(MatrixShape::square(6)).unwrap();
        let win = MatrixWindow::new(
            MatrixIndex { row: 1, col: 2 },
            MatrixShape { rows: 3, cols: 3 },
        );

        {
            let mut window = parent.window_mut(win).unwrap();
            assert_eq!(window.set(0, 0, 11), 0);
            window.fill(5);
            assert_eq!(window.set(2, 2, 99), 5);
        }

        assert_eq!(*parent.get(1, 2), 5);
        assert_eq!(*parent.get(3, 4), 99);
        assert_eq!(*parent.get(0, 0), 0);

        let copy = parent.window(win).unwrap().to_matrix();
        assert_eq!(copy.shape(), win.shape);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(copy.get(row, col), parent.get(1 + row, 2 + col));
            }
        }
    }

    #[test]
    fn window_rejects_excess_extent() {
        let m: DenseMatrix<u8> = DenseMatrix::new(MatrixShape::square(4)).unwrap();
        assert!(matches!(
            m.window(MatrixWindow::square(MatrixIndex { row: 2, col: 2 }, 3)),
            Err(Error::ShapeMismatch(_))
        ));
    }
}
