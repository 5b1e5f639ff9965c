/*!
# Matrix Storage

2-D storage for adjacency and weight data, in two element flavors and two
physical layouts:

- [`BitMatrix`] stores booleans packed into `u64` words; [`ScalarMatrix`]
  stores one value of an arbitrary element type per cell, with the type's
  default standing in for "absent".
- [`RowMajor`] keeps every cell and lays rows out back to back.
- [`LowerTriangle`] keeps only the triangle `row >= col` (diagonal included)
  and canonicalizes every access `(i, j)` with `i < j` to `(j, i)` before
  touching storage. `get(i, j) == get(j, i)` therefore holds by construction;
  there is no separate symmetry pass anywhere.

The layout is a type-level strategy ([`MatrixLayout`]), so the dense and
symmetric variants of both matrix kinds share one generic core:

- [`DenseBitMatrix`] / [`SymmetricBitMatrix`]
- [`DenseMatrix<T>`](DenseMatrix) / [`SymmetricMatrix<T>`](SymmetricMatrix)

[`MatrixWindow`] describes a rectangular sub-region; `window`/`window_mut`
turn it into a zero-copy view whose accesses translate into the parent.
Window extents are validated once at view creation, not per access.
*/

use std::fmt::Display;
use std::ops::Range;

use crate::error::{out_of_range, shape_mismatch, Result};

mod bits;
mod scalar;

pub use bits::*;
pub use scalar::*;

/// Row and column extent of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixShape {
    pub rows: usize,
    pub cols: usize,
}

impl Display for MatrixShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl MatrixShape {
    /// Shape with `size` rows and columns.
    pub const fn square(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
        }
    }

    /// Returns *true* if `rows == cols`.
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Number of cells, or `ShapeMismatch` if `rows * cols` overflows.
    pub fn element_count(&self) -> Result<usize> {
        self.rows
            .checked_mul(self.cols)
            .ok_or_else(|| shape_mismatch!("element count of a {self} matrix overflows"))
    }

    /// Returns *true* if `index` points inside the shape.
    pub const fn contains(&self, index: MatrixIndex) -> bool {
        index.row < self.rows && index.col < self.cols
    }

    /// Checked counterpart of [`contains`](Self::contains), reporting the
    /// offending coordinate.
    pub fn check_contains(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows {
            return Err(out_of_range!(row, self.rows));
        }
        if col >= self.cols {
            return Err(out_of_range!(col, self.cols));
        }
        Ok(())
    }
}

/// Zero-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixIndex {
    pub row: usize,
    pub col: usize,
}

impl Display for MatrixIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for MatrixIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A rectangular sub-region of a parent matrix: origin cell plus extent.
///
/// This is only the description; `window`/`window_mut` on a matrix validate
/// it against the parent shape and hand out the actual view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixWindow {
    pub origin: MatrixIndex,
    pub shape: MatrixShape,
}

impl Display for MatrixWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.shape, self.origin)
    }
}

impl MatrixWindow {
    pub const fn new(origin: MatrixIndex, shape: MatrixShape) -> Self {
        Self { origin, shape }
    }

    /// Square window of extent `size` at `origin`.
    pub const fn square(origin: MatrixIndex, size: usize) -> Self {
        Self {
            origin,
            shape: MatrixShape::square(size),
        }
    }

    /// Window covering all of `shape`, positioned at `(0, 0)`.
    pub const fn main(shape: MatrixShape) -> Self {
        Self {
            origin: MatrixIndex { row: 0, col: 0 },
            shape,
        }
    }

    /// Returns *true* if the window lies fully inside a parent of `parent` shape.
    pub fn fits_within(&self, parent: MatrixShape) -> bool {
        let row_end = self.origin.row.checked_add(self.shape.rows);
        let col_end = self.origin.col.checked_add(self.shape.cols);
        row_end.is_some_and(|r| r <= parent.rows) && col_end.is_some_and(|c| c <= parent.cols)
    }
}

/// Type-level storage-layout strategy shared by bit and scalar matrices.
///
/// Implementations map cell positions to backing slots; the matrix core never
/// inspects positions itself beyond bounds checking.
pub trait MatrixLayout: Clone {
    /// Stores only one triangle of a square matrix, making `(i, j)` and
    /// `(j, i)` the same cell.
    const SYMMETRIC: bool;

    /// Rejects shapes this layout cannot represent.
    fn check_shape(shape: MatrixShape) -> Result<()>;

    /// Backing slots needed for `shape` (already accepted by `check_shape`).
    fn storage_len(shape: MatrixShape) -> Result<usize>;

    /// Backing slot of `index`. Callers guarantee `shape.contains(index)`.
    fn slot(shape: MatrixShape, index: MatrixIndex) -> usize;

    /// Splits row iteration work: the contiguous slot range holding the
    /// leading columns of `row`, and the first column that must be located
    /// through `slot` individually instead.
    fn row_split(shape: MatrixShape, row: usize) -> (Range<usize>, usize);
}

/// Dense layout: every cell stored, rows back to back (`row * cols + col`).
#[derive(Debug, Clone, Copy, Default)]
pub struct RowMajor;

impl MatrixLayout for RowMajor {
    const SYMMETRIC: bool = false;

    fn check_shape(_shape: MatrixShape) -> Result<()> {
        Ok(())
    }

    fn storage_len(shape: MatrixShape) -> Result<usize> {
        shape.element_count()
    }

    fn slot(shape: MatrixShape, index: MatrixIndex) -> usize {
        index.row * shape.cols + index.col
    }

    fn row_split(shape: MatrixShape, row: usize) -> (Range<usize>, usize) {
        let start = row * shape.cols;
        (start..start + shape.cols, shape.cols)
    }
}

/// Symmetric packing: only the triangle `row >= col` is stored, at slot
/// `row * (row + 1) / 2 + col` after canonicalizing the position. Requires a
/// square shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerTriangle;

impl MatrixLayout for LowerTriangle {
    const SYMMETRIC: bool = true;

    fn check_shape(shape: MatrixShape) -> Result<()> {
        if shape.is_square() {
            Ok(())
        } else {
            Err(shape_mismatch!(
                "symmetric packing requires a square shape, got {shape}"
            ))
        }
    }

    fn storage_len(shape: MatrixShape) -> Result<usize> {
        let n = shape.rows;
        n.checked_add(1)
            .and_then(|m| n.checked_mul(m))
            .map(|c| c / 2)
            .ok_or_else(|| shape_mismatch!("triangle cell count of a {shape} matrix overflows"))
    }

    fn slot(_shape: MatrixShape, index: MatrixIndex) -> usize {
        let (row, col) = if index.row >= index.col {
            (index.row, index.col)
        } else {
            (index.col, index.row)
        };
        row * (row + 1) / 2 + col
    }

    fn row_split(shape: MatrixShape, row: usize) -> (Range<usize>, usize) {
        let _ = shape;
        let start = row * (row + 1) / 2;
        (start..start + row + 1, row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_basics() {
        let shape = MatrixShape { rows: 3, cols: 7 };
        assert!(!shape.is_square());
        assert_eq!(shape.element_count().unwrap(), 21);
        assert!(shape.contains(MatrixIndex { row: 2, col: 6 }));
        assert!(!shape.contains(MatrixIndex { row: 3, col: 0 }));

        let huge = MatrixShape::square(usize::MAX);
        assert!(huge.element_count().is_err());
    }

    #[test]
    fn window_fit() {
        let parent = MatrixShape::square(5);
        assert!(MatrixWindow::main(parent).fits_within(parent));
        assert!(MatrixWindow::square(MatrixIndex { row: 2, col: 3 }, 2).fits_within(parent));
        assert!(!MatrixWindow::square(MatrixIndex { row: 4, col: 4 }, 2).fits_within(parent));
        // overflow in origin + extent must not wrap around
        assert!(
            !MatrixWindow::square(MatrixIndex { row: usize::MAX, col: 0 }, 2).fits_within(parent)
        );
    }

    #[test]
    fn lower_triangle_canonicalizes() {
        let shape = MatrixShape::square(6);
        for row in 0..6 {
            for col in 0..6 {
                let a = LowerTriangle::slot(shape, MatrixIndex { row, col });
                let b = LowerTriangle::slot(shape, MatrixIndex { row: col, col: row });
                assert_eq!(a, b);
            }
        }
        // distinct canonical cells get distinct slots
        assert_eq!(LowerTriangle::storage_len(shape).unwrap(), 21);
        let mut slots: Vec<usize> = (0..6)
            .flat_map(|row| (0..=row).map(move |col| LowerTriangle::slot(shape, MatrixIndex { row, col })))
            .collect();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), 21);
    }

    #[test]
    fn lower_triangle_rejects_rectangles() {
        assert!(LowerTriangle::check_shape(MatrixShape { rows: 3, cols: 4 }).is_err());
    }
}
