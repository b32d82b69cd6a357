//! densemat: a dense, generic two-dimensional matrix container.
//!
//! The crate provides [`Matrix`], a row-major heap-backed container over any
//! numeric element type, free-function arithmetic for matrix/matrix and
//! matrix/scalar operand pairs, and [`ParMatrix`], a thread-parallel sibling
//! with the same observable behavior.
//!
//! The design favors small, testable modules: every accessor of a container
//! funnels through one bounds-check routine, and shape violations in binary
//! arithmetic surface as a single error type that names the offending
//! operation.
pub mod error;
pub mod matrix;
pub mod matrix_trait;
pub mod ops;
pub mod parallel;

pub use error::{DimensionError, MatrixOp};
pub use matrix::{Matrix, ShapeError};
pub use matrix_trait::DenseMatrix;
pub use parallel::ParMatrix;
