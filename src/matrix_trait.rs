use std::fmt;

use crate::error::DimensionError;
use crate::matrix::ShapeError;

/// A small trait abstraction over the dense matrix containers in this
/// crate. It centralizes the public contract (construction, element access,
/// resizing, equality and the nine arithmetic entry points) so that an
/// alternative storage engine can live next to its kernels and still be
/// exercised by the same test suite.
///
/// `Default` is the 1x1 zero matrix and `Clone` the deep copy; two values
/// compare equal only when their shapes and every corresponding element
/// match.
pub trait DenseMatrix<T>: Default + Clone + fmt::Debug + PartialEq + Sized {
    /// All-zero matrix of the given shape.
    fn zeros(rows: usize, cols: usize) -> Self;

    /// Row-major construction from a flat buffer holding at least
    /// `rows * cols` elements.
    fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError>;

    fn nrows(&self) -> usize;

    fn ncols(&self) -> usize;

    /// Stored value in range, zero otherwise.
    fn get(&self, row: usize, col: usize) -> T;

    /// Writes in range and reports whether the write happened.
    fn set(&mut self, row: usize, col: usize, value: T) -> bool;

    /// Reshapes in place, discarding contents and rezeroing; `false` when
    /// the backing allocation fails.
    fn resize(&mut self, rows: usize, cols: usize) -> bool;

    /// Elementwise sum; both operands must share one shape.
    fn add(&self, rhs: &Self) -> Result<Self, DimensionError>;

    /// Elementwise difference; both operands must share one shape.
    fn sub(&self, rhs: &Self) -> Result<Self, DimensionError>;

    /// Algebraic product; the left column count must match the right row
    /// count.
    fn matmul(&self, rhs: &Self) -> Result<Self, DimensionError>;

    fn add_scalar(&self, rhs: T) -> Self;

    fn scalar_add(lhs: T, rhs: &Self) -> Self;

    fn sub_scalar(&self, rhs: T) -> Self;

    fn scalar_sub(lhs: T, rhs: &Self) -> Self;

    fn mul_scalar(&self, rhs: T) -> Self;

    fn scalar_mul(lhs: T, rhs: &Self) -> Self;
}
