//! # Sparse matrices in compressed row storage
//!
//! A `CrsMatrix` stores only the nonzero values of a matrix, grouped by row. It behaves like a
//! dense matrix in which every cell that is not stored is zero: cells can be read and written,
//! the matrix can be resized, multiplied by a scalar, added to, subtracted from and multiplied
//! with other matrices.
//!
//! The matrix is generic over its element type. Floating point matrices compare equal when their
//! values are within a small relative tolerance, exact types (integers, rationals) compare exactly.
//!
//! ```
//! use relp_crs::CrsMatrix;
//!
//! let a = CrsMatrix::from_dense(&[[1.0, 0.0], [0.0, 2.0]]).unwrap();
//! let b = CrsMatrix::from_dense(&[[0.0, 3.0], [4.0, 0.0]]).unwrap();
//!
//! let product = a.checked_mul(&b).unwrap();
//! assert_eq!(product, vec![vec![0.0, 3.0], vec![8.0, 0.0]]);
//! assert_eq!(product.nonzero_count(), 2);
//! ```
#![warn(missing_docs)]

pub mod data;

pub use data::linear_algebra::error::{CrsError, CrsResult};
pub use data::linear_algebra::matrix::CrsMatrix;
pub use data::number_types::tolerance::Tolerance;
