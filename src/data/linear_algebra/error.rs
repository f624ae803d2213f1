//! # Error reporting for sparse matrix operations
//!
//! All errors are violations of a precondition by the caller. They are detected before any
//! storage is modified, so a matrix is never left in an inconsistent state.
use thiserror::Error;

/// Convenience alias for results of matrix operations.
pub type CrsResult<T> = Result<T, CrsError>;

/// Anything that can go wrong when creating, accessing or combining a `CrsMatrix`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrsError {
    /// The requested shape can't be represented.
    ///
    /// This happens when the number of cells, or the length of the row index, would overflow.
    #[error("Invalid dimensions: {rows}×{columns} matrix can not be represented")]
    InvalidDimension {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        columns: usize,
    },
    /// A cell outside of the current shape was accessed.
    #[error("Index out of range: ({row}, {column}) in a {rows}×{columns} matrix")]
    IndexOutOfRange {
        /// Row index that was accessed.
        row: usize,
        /// Column index that was accessed.
        column: usize,
        /// Number of rows of the matrix at the time of access.
        rows: usize,
        /// Number of columns of the matrix at the time of access.
        columns: usize,
    },
    /// The operands of a binary operation have incompatible shapes.
    #[error("Dimension mismatch in {operation}: {}×{} and {}×{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        /// Name of the operation, for the end user.
        operation: &'static str,
        /// Shape of the left operand.
        left: (usize, usize),
        /// Shape of the right operand.
        right: (usize, usize),
    },
    /// Raw storage arrays don't describe a matrix in compressed row storage.
    #[error("Invalid storage: {reason}")]
    InvalidStorage {
        /// Message for the end user.
        reason: String,
    },
}

impl CrsError {
    pub(crate) fn invalid_storage(reason: impl Into<String>) -> Self {
        CrsError::InvalidStorage { reason: reason.into() }
    }
}
