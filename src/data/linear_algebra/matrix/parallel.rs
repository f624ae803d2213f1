//! # Parallel matrix multiplication
//!
//! The rows of a product can be computed independently of each other. They are distributed over
//! the rayon thread pool, each worker reading both operands and writing only the rows it owns.
//! The rows are then concatenated in order, so no locking is needed.
//!
//! Without the `parallel` feature, the sequential multiplication is used.
use std::ops::{Add, Mul};

#[cfg(feature = "parallel")]
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::data::linear_algebra::error::CrsResult;
use crate::data::linear_algebra::matrix::CrsMatrix;
#[cfg(feature = "parallel")]
use crate::data::linear_algebra::matrix::ops::RowAccumulator;
use crate::data::linear_algebra::traits::Element;

/// Rows computed by a single task before it is split further.
///
/// Each task allocates a work space as wide as the product, so tiny tasks don't pay off.
pub const MIN_ROWS_PER_SHARD: usize = 16;

impl<T: Element> CrsMatrix<T> {
    /// Multiply with another matrix, computing the rows of the product in parallel.
    ///
    /// The result is identical to that of `checked_mul`. Each task holds its own dense work space
    /// of `other.nr_columns()` elements.
    #[cfg(feature = "parallel")]
    pub fn par_mul(&self, other: &Self) -> CrsResult<Self>
    where
        T: Add<Output=T> + Mul<Output=T> + Send + Sync,
    {
        self.check_multipliable(other)?;
        let mut product = Self::with_shape(self.nr_rows, other.nr_columns)?;

        let rows = (0..self.nr_rows)
            .into_par_iter()
            .with_min_len(MIN_ROWS_PER_SHARD)
            .map_init(
                || RowAccumulator::new(other.nr_columns),
                |accumulator, i| {
                    let mut column_indices = Vec::new();
                    let mut values = Vec::new();
                    accumulator.multiply_row(self, other, i, &mut column_indices, &mut values);

                    (column_indices, values)
                },
            )
            .collect::<Vec<_>>();
        debug!(
            "Multiplied {}x{} by {}x{} over {} threads",
            self.nr_rows, self.nr_columns, other.nr_rows, other.nr_columns, rayon::current_num_threads(),
        );

        for (i, (column_indices, values)) in rows.into_iter().enumerate() {
            product.column_indices.extend(column_indices);
            product.values.extend(values);
            product.row_starts[i + 1] = product.values.len();
        }

        debug_assert!(product.is_consistent());
        Ok(product)
    }

    /// Multiply with another matrix.
    ///
    /// The `parallel` feature is disabled, so this is the same as `checked_mul`.
    #[cfg(not(feature = "parallel"))]
    pub fn par_mul(&self, other: &Self) -> CrsResult<Self>
    where
        T: Add<Output=T> + Mul<Output=T>,
    {
        self.checked_mul(other)
    }
}
