/*!
# Error Handling

All fallible operations in this crate report a variant of [`Error`] and fail
fast at the call that violates a precondition; nothing is retried or repaired
internally. Direct accessors (`get`, `set`, `insert`, ...) panic on contract
violations instead and document it; each of them has a `try_`-prefixed
counterpart returning [`Result`].
*/

use thiserror::Error;

/// Errors raised by bounds-checked accessors, geometry validation and
/// checked raw-parts constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A vertex or matrix index lies outside the declared bounds of the
    /// structure it was used on.
    #[error("index {index} is out of range for bound {bound}")]
    OutOfRange { index: usize, bound: usize },

    /// Two shapes disagree: a window exceeding its parent matrix, a
    /// symmetric matrix requested with `rows != cols`, or a shape whose
    /// element count overflows.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Input handed to a checked raw-parts constructor breaks the invariant
    /// the structure maintains internally (e.g. an unsorted slice for the
    /// sorted-vector set backend).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

macro_rules! out_of_range {
    ($index:expr, $bound:expr) => {
        crate::error::Error::OutOfRange {
            index: $index as usize,
            bound: $bound as usize,
        }
    };
}

macro_rules! shape_mismatch {
    ($($arg:tt)*) => {
        crate::error::Error::ShapeMismatch(format!($($arg)*))
    };
}

macro_rules! invariant_violation {
    ($($arg:tt)*) => {
        crate::error::Error::InvariantViolation(format!($($arg)*))
    };
}

pub(crate) use {invariant_violation, out_of_range, shape_mismatch};

/// Generates the documented-panic shorthand of a `try_`-prefixed method.
macro_rules! panics_over {
    ($(#[$attr:meta])* $vis:vis fn $name:ident(&self $(, $arg:ident : $ty:ty)*) -> $ret:ty => $try_name:ident) => {
        $(#[$attr])*
        $vis fn $name(&self $(, $arg: $ty)*) -> $ret {
            match self.$try_name($($arg),*) {
                Ok(value) => value,
                Err(e) => panic!("{e}"),
            }
        }
    };
    ($(#[$attr:meta])* $vis:vis fn $name:ident(&mut self $(, $arg:ident : $ty:ty)*) -> $ret:ty => $try_name:ident) => {
        $(#[$attr])*
        $vis fn $name(&mut self $(, $arg: $ty)*) -> $ret {
            match self.$try_name($($arg),*) {
                Ok(value) => value,
                Err(e) => panic!("{e}"),
            }
        }
    };
}

pub(crate) use panics_over;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = out_of_range!(7u32, 3usize);
        assert_eq!(err.to_string(), "index 7 is out of range for bound 3");

        let err = shape_mismatch!("window exceeds parent");
        assert_eq!(err.to_string(), "shape mismatch: window exceeds parent");
    }
}
