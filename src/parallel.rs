//! Thread-parallel sibling of [`Matrix`](crate::matrix::Matrix).
//!
//! `ParMatrix` keeps the same row-major storage and the same observable
//! contract, but its arithmetic kernels fan out across the rayon thread
//! pool: elementwise work is split per element, the matrix product per
//! output row. Parallelism never reorders the per-element accumulation, so
//! results match the sequential container's exactly, including the errors
//! raised for incompatible shapes.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use log::{debug, warn};
use num_traits::Zero;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{DimensionError, MatrixOp};
use crate::matrix::{Matrix, ShapeError};
use crate::matrix_trait::DenseMatrix;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> ParMatrix<T> {
    /// Builds a matrix from a flat row-major buffer, consuming the first
    /// `rows * cols` entries and discarding any surplus.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        Matrix::from_vec(rows, cols, data).map(Self::from)
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    // Same bounds chokepoint as the sequential container.
    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Writes `value` at `(row, col)` and reports whether the write
    /// happened.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.offset(row, col) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }
}

impl<T> ParMatrix<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Reshapes in place, discarding prior contents and rezeroing; `false`
    /// without touching the matrix when the new buffer cannot be allocated.
    pub fn resize(&mut self, rows: usize, cols: usize) -> bool {
        let len = rows * cols;
        let mut data = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            warn!("matrix resize to {}x{} failed: cannot allocate {} elements", rows, cols, len);
            return false;
        }
        data.resize(len, T::zero());
        self.data = data;
        self.rows = rows;
        self.cols = cols;
        true
    }
}

impl<T> ParMatrix<T>
where
    T: Copy + Zero,
{
    /// Stored value in range, zero otherwise.
    pub fn get(&self, row: usize, col: usize) -> T {
        match self.offset(row, col) {
            Some(idx) => self.data[idx],
            None => T::zero(),
        }
    }
}

impl<T> ParMatrix<T>
where
    T: Copy + Send + Sync,
{
    fn zip_elementwise<F>(&self, rhs: &Self, op: MatrixOp, f: F) -> Result<Self, DimensionError>
    where
        F: Fn(T, T) -> T + Send + Sync,
    {
        if self.shape() != rhs.shape() {
            return Err(DimensionError::new(op, self.shape(), rhs.shape()));
        }
        let data = self
            .data
            .par_iter()
            .zip(rhs.data.par_iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    fn par_mapv<F>(&self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync,
    {
        Self {
            data: self.data.par_iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T> ParMatrix<T>
where
    T: Copy + Zero + Mul<Output = T> + Send + Sync,
{
    // Matrix product with one rayon task per output row. The inner k-loop
    // stays sequential so each output element accumulates in the same order
    // as the sequential kernel.
    fn product(&self, rhs: &Self) -> Result<Self, DimensionError> {
        if self.cols != rhs.rows {
            return Err(DimensionError::new(
                MatrixOp::Multiplication,
                self.shape(),
                rhs.shape(),
            ));
        }

        let (rows, inner, cols) = (self.rows, self.cols, rhs.cols);
        debug!("parallel matmul: {}x{} by {}x{}", rows, inner, rhs.rows, cols);

        let mut data = vec![T::zero(); rows * cols];
        if !data.is_empty() {
            let a = &self.data;
            let b = &rhs.data;
            data.par_chunks_mut(cols).enumerate().for_each(|(i, out_row)| {
                for (j, out) in out_row.iter_mut().enumerate() {
                    let mut acc = T::zero();
                    for k in 0..inner {
                        acc = acc + a[i * inner + k] * b[k * cols + j];
                    }
                    *out = acc;
                }
            });
        }
        Ok(Self { data, rows, cols })
    }
}

/// The default matrix is a single zero element.
impl<T> Default for ParMatrix<T>
where
    T: Clone + Zero,
{
    fn default() -> Self {
        Self::zeros(1, 1)
    }
}

/// Matrices of different shapes are never equal; shapes are compared before
/// any element.
impl<T: PartialEq> PartialEq for ParMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<T> From<Matrix<T>> for ParMatrix<T> {
    fn from(value: Matrix<T>) -> Self {
        let (rows, cols) = value.shape();
        Self {
            data: value.into_vec(),
            rows,
            cols,
        }
    }
}

impl<T> From<ParMatrix<T>> for Matrix<T> {
    fn from(value: ParMatrix<T>) -> Self {
        Matrix::from_raw(value.rows, value.cols, value.data)
    }
}

impl<T> DenseMatrix<T> for ParMatrix<T>
where
    T: Copy
        + Zero
        + PartialEq
        + fmt::Debug
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Send
        + Sync,
{
    fn zeros(rows: usize, cols: usize) -> Self {
        ParMatrix::zeros(rows, cols)
    }

    fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        ParMatrix::from_vec(rows, cols, data)
    }

    fn nrows(&self) -> usize {
        self.rows
    }

    fn ncols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> T {
        ParMatrix::get(self, row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        ParMatrix::set(self, row, col, value)
    }

    fn resize(&mut self, rows: usize, cols: usize) -> bool {
        ParMatrix::resize(self, rows, cols)
    }

    fn add(&self, rhs: &Self) -> Result<Self, DimensionError> {
        self.zip_elementwise(rhs, MatrixOp::Addition, |a, b| a + b)
    }

    fn sub(&self, rhs: &Self) -> Result<Self, DimensionError> {
        self.zip_elementwise(rhs, MatrixOp::Subtraction, |a, b| a - b)
    }

    fn matmul(&self, rhs: &Self) -> Result<Self, DimensionError> {
        self.product(rhs)
    }

    fn add_scalar(&self, rhs: T) -> Self {
        self.par_mapv(move |v| v + rhs)
    }

    fn scalar_add(lhs: T, rhs: &Self) -> Self {
        rhs.par_mapv(move |v| lhs + v)
    }

    fn sub_scalar(&self, rhs: T) -> Self {
        self.par_mapv(move |v| v - rhs)
    }

    fn scalar_sub(lhs: T, rhs: &Self) -> Self {
        rhs.par_mapv(move |v| lhs - v)
    }

    fn mul_scalar(&self, rhs: T) -> Self {
        self.par_mapv(move |v| v * rhs)
    }

    fn scalar_mul(lhs: T, rhs: &Self) -> Self {
        rhs.par_mapv(move |v| lhs * v)
    }
}
