//! # Changing the shape of a matrix
//!
//! Growing only changes the bounds (and, for rows, the row index). Shrinking drops the values
//! that fall outside of the new shape.
use std::cmp::Ordering;

use itertools::repeat_n;
use log::trace;

use crate::data::linear_algebra::error::{CrsError, CrsResult};
use crate::data::linear_algebra::matrix::{check_shape, CrsMatrix};
use crate::data::linear_algebra::traits::Element;

impl<T: Element> CrsMatrix<T> {
    /// Change the number of rows to `nr_rows`.
    ///
    /// New rows are empty. When shrinking, all values in the removed rows are dropped.
    pub fn resize_rows(&mut self, nr_rows: usize) -> CrsResult<()> {
        check_shape(nr_rows, self.nr_columns)?;
        self.reserve_rows(nr_rows, self.nr_columns)?;

        self.resize_rows_unchecked(nr_rows);

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Change the number of columns to `nr_columns`.
    ///
    /// When shrinking, all values in the removed columns are dropped.
    pub fn resize_columns(&mut self, nr_columns: usize) -> CrsResult<()> {
        check_shape(self.nr_rows, nr_columns)?;

        self.resize_columns_unchecked(nr_columns);

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Change the shape to `nr_rows` x `nr_columns`, first the rows and then the columns.
    ///
    /// The new shape is validated before anything changes.
    pub fn resize(&mut self, nr_rows: usize, nr_columns: usize) -> CrsResult<()> {
        check_shape(nr_rows, nr_columns)?;
        self.reserve_rows(nr_rows, nr_columns)?;

        self.resize_rows_unchecked(nr_rows);
        self.resize_columns_unchecked(nr_columns);

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Remove all values, keeping the shape.
    pub fn clear(&mut self) {
        self.values.clear();
        self.column_indices.clear();
        self.row_starts.fill(0);
    }

    fn resize_rows_unchecked(&mut self, nr_rows: usize) {
        match nr_rows.cmp(&self.nr_rows) {
            Ordering::Greater => self.grow_rows(nr_rows),
            Ordering::Less => self.shrink_rows(nr_rows),
            Ordering::Equal => {},
        }
    }

    fn resize_columns_unchecked(&mut self, nr_columns: usize) {
        match nr_columns.cmp(&self.nr_columns) {
            Ordering::Greater => self.grow_columns(nr_columns),
            Ordering::Less => self.shrink_columns(nr_columns),
            Ordering::Equal => {},
        }
    }

    /// Make room in the row index for `nr_rows` rows, without changing the matrix.
    ///
    /// The shape should have passed `check_shape`.
    pub(super) fn reserve_rows(&mut self, nr_rows: usize, nr_columns: usize) -> CrsResult<()> {
        let additional = (nr_rows + 1).saturating_sub(self.row_starts.len());

        self.row_starts.try_reserve_exact(additional)
            .map_err(|_| CrsError::InvalidDimension { rows: nr_rows, columns: nr_columns })
    }

    /// Append empty rows until there are `nr_rows`.
    pub(super) fn grow_rows(&mut self, nr_rows: usize) {
        debug_assert!(nr_rows >= self.nr_rows);
        trace!("Growing from {} to {} rows", self.nr_rows, nr_rows);

        let nr_values = self.nonzero_count();
        self.row_starts.extend(repeat_n(nr_values, nr_rows - self.nr_rows));
        self.nr_rows = nr_rows;
    }

    /// Columns can be added without touching any value.
    pub(super) fn grow_columns(&mut self, nr_columns: usize) {
        debug_assert!(nr_columns >= self.nr_columns);
        trace!("Growing from {} to {} columns", self.nr_columns, nr_columns);

        self.nr_columns = nr_columns;
    }

    /// Drop the trailing rows, keeping the first `nr_rows`.
    fn shrink_rows(&mut self, nr_rows: usize) {
        debug_assert!(nr_rows < self.nr_rows);

        let nr_values = self.row_starts[nr_rows];
        trace!(
            "Shrinking from {} to {} rows, dropping {} values",
            self.nr_rows, nr_rows, self.nonzero_count() - nr_values,
        );

        self.values.truncate(nr_values);
        self.column_indices.truncate(nr_values);
        self.row_starts.truncate(nr_rows + 1);
        self.nr_rows = nr_rows;
    }

    /// Drop all values in columns `nr_columns` and up.
    ///
    /// The kept values are compacted to the front in a single pass, keeping their order. Each row
    /// start moves forward by the number of values dropped in the rows before it.
    fn shrink_columns(&mut self, nr_columns: usize) {
        debug_assert!(nr_columns < self.nr_columns);

        let mut write = 0;
        for i in 0..self.nr_rows {
            let (start, end) = (self.row_starts[i], self.row_starts[i + 1]);
            self.row_starts[i] = write;

            for read in start..end {
                if self.column_indices[read] < nr_columns {
                    // Everything between `write` and `read` is being dropped.
                    self.column_indices.swap(write, read);
                    self.values.swap(write, read);
                    write += 1;
                }
            }
        }
        trace!(
            "Shrinking from {} to {} columns, dropping {} values",
            self.nr_columns, nr_columns, self.nonzero_count() - write,
        );

        self.row_starts[self.nr_rows] = write;
        self.values.truncate(write);
        self.column_indices.truncate(write);
        self.nr_columns = nr_columns;
    }
}
