use std::error::Error;
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use log::warn;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::DimensionError;
use crate::matrix_trait::DenseMatrix;
use crate::ops;

/// Dense row-major matrix over a numeric element type.
///
/// Element `(row, col)` lives at linear offset `row * cols + col`; every
/// accessor and every arithmetic loop goes through that mapping. The backing
/// buffer always holds exactly `rows * cols` elements and is owned
/// exclusively by its instance, so `clone` yields an independent deep copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Builds a matrix from a flat row-major buffer, consuming the first
    /// `rows * cols` entries and discarding any surplus.
    pub fn from_vec(rows: usize, cols: usize, mut data: Vec<T>) -> Result<Self, ShapeError> {
        let len = rows * cols;
        if data.len() < len {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        data.truncate(len);
        Ok(Self { data, rows, cols })
    }

    // Internal constructor for buffers whose length is already known to
    // match the shape.
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
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

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Maps matrix coordinates to the backing linear offset, or `None` when
    /// they fall outside the matrix. `get`, `set` and the `Index` impls all
    /// consult this one routine, so the bounds policy cannot drift between
    /// accessors.
    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Writes `value` at `(row, col)` and reports whether the write
    /// happened. Out-of-range coordinates leave the matrix untouched and
    /// return `false`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.offset(row, col) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Matrix<T>
where
    T: Clone,
{
    /// Builds a matrix by copying the first `rows * cols` entries of a flat
    /// row-major slice.
    pub fn from_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self, ShapeError> {
        let len = rows * cols;
        if data.len() < len {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self {
            data: data[..len].to_vec(),
            rows,
            cols,
        })
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero,
{
    /// Creates an all-zero matrix of the given shape. Either dimension may
    /// be zero, in which case the matrix holds no elements.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Reshapes the matrix in place, discarding all prior contents and
    /// reinitializing every element to zero.
    ///
    /// Returns `false` without touching the matrix when the new backing
    /// buffer cannot be allocated.
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

impl<T> Matrix<T>
where
    T: Copy + Zero,
{
    /// Returns the element at `(row, col)`, or zero when the coordinates
    /// fall outside the matrix. Reads never fail; callers that must tell a
    /// stored zero from an out-of-range read should check the shape first.
    pub fn get(&self, row: usize, col: usize) -> T {
        match self.offset(row, col) {
            Some(idx) => self.data[idx],
            None => T::zero(),
        }
    }
}

/// The default matrix is a single zero element.
impl<T> Default for Matrix<T>
where
    T: Clone + Zero,
{
    fn default() -> Self {
        Self::zeros(1, 1)
    }
}

/// Matrices of different shapes are never equal; shapes are compared before
/// any element.
impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        match self.offset(index.0, index.1) {
            Some(idx) => &self.data[idx],
            None => panic!(
                "matrix index ({}, {}) out of bounds for shape {}x{}",
                index.0, index.1, self.rows, self.cols
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        match self.offset(index.0, index.1) {
            Some(idx) => &mut self.data[idx],
            None => panic!(
                "matrix index ({}, {}) out of bounds for shape {}x{}",
                index.0, index.1, self.rows, self.cols
            ),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "[")?;
            for (idx, value) in self.row_slice(row).iter().enumerate() {
                write!(f, "{}", value)?;
                if idx + 1 != self.cols {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl<T> DenseMatrix<T> for Matrix<T>
where
    T: Copy + Zero + PartialEq + fmt::Debug + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::zeros(rows, cols)
    }

    fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, ShapeError> {
        Matrix::from_vec(rows, cols, data)
    }

    fn nrows(&self) -> usize {
        self.rows
    }

    fn ncols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> T {
        Matrix::get(self, row, col)
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        Matrix::set(self, row, col, value)
    }

    fn resize(&mut self, rows: usize, cols: usize) -> bool {
        Matrix::resize(self, rows, cols)
    }

    fn add(&self, rhs: &Self) -> Result<Self, DimensionError> {
        ops::add(self, rhs)
    }

    fn sub(&self, rhs: &Self) -> Result<Self, DimensionError> {
        ops::sub(self, rhs)
    }

    fn matmul(&self, rhs: &Self) -> Result<Self, DimensionError> {
        ops::matmul(self, rhs)
    }

    fn add_scalar(&self, rhs: T) -> Self {
        ops::add_scalar(self, rhs)
    }

    fn scalar_add(lhs: T, rhs: &Self) -> Self {
        ops::scalar_add(lhs, rhs)
    }

    fn sub_scalar(&self, rhs: T) -> Self {
        ops::sub_scalar(self, rhs)
    }

    fn scalar_sub(lhs: T, rhs: &Self) -> Self {
        ops::scalar_sub(lhs, rhs)
    }

    fn mul_scalar(&self, rhs: T) -> Self {
        ops::mul_scalar(self, rhs)
    }

    fn scalar_mul(lhs: T, rhs: &Self) -> Self {
        ops::scalar_mul(lhs, rhs)
    }
}

/// Error produced when a flat buffer cannot back the requested shape.
#[derive(Debug, Clone)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buffer of length {} is too short for shape ({}, {})",
            self.len, self.rows, self.cols
        )
    }
}

impl Error for ShapeError {}
