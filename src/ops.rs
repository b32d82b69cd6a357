//! Free-function arithmetic over [`Matrix`] operands.
//!
//! Nine entry points cover the matrix/matrix, scalar/matrix and
//! matrix/scalar operand pairs for addition, subtraction and multiplication.
//! Every function reads its operands and allocates a fresh result; the
//! matrix/matrix forms are the only fallible ones, failing with a
//! [`DimensionError`] when the operand shapes are incompatible.

use std::ops::{Add, Mul, Sub};

use num_traits::Zero;

use crate::error::{DimensionError, MatrixOp};
use crate::matrix::Matrix;

/// Elementwise sum of two equally-shaped matrices.
pub fn add<T>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>, DimensionError>
where
    T: Copy + Add<Output = T>,
{
    if lhs.shape() != rhs.shape() {
        return Err(DimensionError::new(
            MatrixOp::Addition,
            lhs.shape(),
            rhs.shape(),
        ));
    }
    let data = lhs
        .as_slice()
        .iter()
        .zip(rhs.as_slice())
        .map(|(&a, &b)| a + b)
        .collect();
    Ok(Matrix::from_raw(lhs.nrows(), lhs.ncols(), data))
}

/// Elementwise difference of two equally-shaped matrices.
pub fn sub<T>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>, DimensionError>
where
    T: Copy + Sub<Output = T>,
{
    if lhs.shape() != rhs.shape() {
        return Err(DimensionError::new(
            MatrixOp::Subtraction,
            lhs.shape(),
            rhs.shape(),
        ));
    }
    let data = lhs
        .as_slice()
        .iter()
        .zip(rhs.as_slice())
        .map(|(&a, &b)| a - b)
        .collect();
    Ok(Matrix::from_raw(lhs.nrows(), lhs.ncols(), data))
}

/// Algebraic matrix product.
///
/// Requires `lhs.ncols() == rhs.nrows()`; the result has shape
/// `lhs.nrows() x rhs.ncols()` and element `(i, j)` is the sum over `k` of
/// `lhs[(i, k)] * rhs[(k, j)]`, accumulated in a zero-initialized
/// accumulator of `T`. Overflow and rounding follow `T`'s native arithmetic.
pub fn matmul<T>(lhs: &Matrix<T>, rhs: &Matrix<T>) -> Result<Matrix<T>, DimensionError>
where
    T: Copy + Zero + Mul<Output = T>,
{
    if lhs.ncols() != rhs.nrows() {
        return Err(DimensionError::new(
            MatrixOp::Multiplication,
            lhs.shape(),
            rhs.shape(),
        ));
    }

    let (rows, inner, cols) = (lhs.nrows(), lhs.ncols(), rhs.ncols());
    let a = lhs.as_slice();
    let b = rhs.as_slice();

    let mut data = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            let mut acc = T::zero();
            for k in 0..inner {
                acc = acc + a[i * inner + k] * b[k * cols + j];
            }
            data.push(acc);
        }
    }
    Ok(Matrix::from_raw(rows, cols, data))
}

/// Adds `rhs` to every element of `lhs`.
pub fn add_scalar<T>(lhs: &Matrix<T>, rhs: T) -> Matrix<T>
where
    T: Copy + Add<Output = T>,
{
    lhs.mapv(|&v| v + rhs)
}

/// Adds every element of `rhs` to `lhs`.
pub fn scalar_add<T>(lhs: T, rhs: &Matrix<T>) -> Matrix<T>
where
    T: Copy + Add<Output = T>,
{
    rhs.mapv(|&v| lhs + v)
}

/// Subtracts `rhs` from every element of `lhs`.
pub fn sub_scalar<T>(lhs: &Matrix<T>, rhs: T) -> Matrix<T>
where
    T: Copy + Sub<Output = T>,
{
    lhs.mapv(|&v| v - rhs)
}

/// Subtracts every element of `rhs` from `lhs`.
pub fn scalar_sub<T>(lhs: T, rhs: &Matrix<T>) -> Matrix<T>
where
    T: Copy + Sub<Output = T>,
{
    rhs.mapv(|&v| lhs - v)
}

/// Multiplies every element of `lhs` by `rhs`.
pub fn mul_scalar<T>(lhs: &Matrix<T>, rhs: T) -> Matrix<T>
where
    T: Copy + Mul<Output = T>,
{
    lhs.mapv(|&v| v * rhs)
}

/// Multiplies `lhs` by every element of `rhs`.
pub fn scalar_mul<T>(lhs: T, rhs: &Matrix<T>) -> Matrix<T>
where
    T: Copy + Mul<Output = T>,
{
    rhs.mapv(|&v| lhs * v)
}
