//! # Sparse matrix in compressed row storage
//!
//! Only the nonzero values of the matrix are stored, grouped by row. Three arrays describe the
//! matrix:
//!
//! * `values`: The nonzero values, ordered by row and, within a row, by column.
//! * `column_indices`: For each value, the column it is in.
//! * `row_starts`: For each row, the offset in the two arrays above at which that row starts. It
//! has one more element than there are rows; the last element is the number of stored values.
//!
//! All mutations go through `set` or one of the resize methods, which keep the storage canonical:
//! columns within a row are strictly increasing and no zero is ever stored. Two matrices with the
//! same logical content therefore always have identical `column_indices` and `row_starts`.
use std::mem;
use std::ops::Range;

use num_traits::One;

use crate::data::linear_algebra::error::{CrsError, CrsResult};
use crate::data::linear_algebra::traits::{Element, NotZero};
use crate::data::number_types::tolerance::Tolerance;

pub use format::StorageDump;
pub use parallel::MIN_ROWS_PER_SHARD;

mod format;
mod ops;
mod parallel;
mod resize;

/// Matrix of dimension `nr_rows` x `nr_columns` in compressed row storage. Indices start at `0`.
///
/// Behaves observably like a dense matrix in which every cell that is not stored is zero.
#[derive(Clone, Debug)]
pub struct CrsMatrix<T> {
    values: Vec<T>,
    column_indices: Vec<usize>,
    row_starts: Vec<usize>,

    nr_rows: usize,
    nr_columns: usize,
}

impl<T> CrsMatrix<T> {
    /// Create a matrix with zero rows and zero columns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            column_indices: Vec::new(),
            row_starts: vec![0],

            nr_rows: 0,
            nr_columns: 0,
        }
    }

    /// Get the number of rows in this matrix.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Get the number of columns in this matrix.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Get the number of cells in this matrix, zero or not.
    pub fn size(&self) -> usize {
        // Shapes are validated on every change, so this can't overflow.
        self.nr_rows * self.nr_columns
    }

    /// Get the number of stored (nonzero) values.
    pub fn nonzero_count(&self) -> usize {
        self.row_starts[self.nr_rows]
    }

    /// Get the number of cells that are not stored, and hence zero.
    pub fn zero_count(&self) -> usize {
        self.size() - self.nonzero_count()
    }

    /// Get the number of stored values in row `i`.
    pub fn row_size(&self, i: usize) -> CrsResult<usize> {
        self.check_row(i)?;

        Ok(self.row_starts[i + 1] - self.row_starts[i])
    }

    /// Whether the matrix has no rows, no columns or no stored values.
    pub fn is_empty(&self) -> bool {
        self.nr_rows == 0 || self.nr_columns == 0 || self.values.is_empty()
    }

    /// The stored values, ordered by row and then by column.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The column of each stored value.
    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// Offsets at which each row starts in `values` and `column_indices`, followed by the number
    /// of stored values.
    pub fn row_starts(&self) -> &[usize] {
        &self.row_starts
    }

    /// Find the row that the stored value at offset `index` belongs to.
    ///
    /// # Return value
    ///
    /// `None` if there is no stored value at that offset.
    pub fn row_of_entry(&self, index: usize) -> Option<usize> {
        if index < self.nonzero_count() {
            // Rows that are empty share their start with the next row, the last of those owns it.
            Some(self.row_starts.partition_point(|&start| start <= index) - 1)
        } else {
            None
        }
    }

    /// Offsets of the values in row `i`.
    fn row_range(&self, i: usize) -> Range<usize> {
        debug_assert!(i < self.nr_rows);

        self.row_starts[i]..self.row_starts[i + 1]
    }

    /// Offset of the first value in row `i` with a column of at least `j`.
    ///
    /// Rows are sorted, so the scan can stop early. If there is no such value, the offset at which
    /// the next row starts is returned.
    fn find_in_row(&self, i: usize, j: usize) -> usize {
        let Range { start, end } = self.row_range(i);

        self.column_indices[start..end].iter()
            .position(|&column| column >= j)
            .map_or(end, |offset| start + offset)
    }

    fn check_row(&self, i: usize) -> CrsResult<()> {
        if i < self.nr_rows {
            Ok(())
        } else {
            Err(CrsError::IndexOutOfRange { row: i, column: 0, rows: self.nr_rows, columns: self.nr_columns })
        }
    }

    fn check_index(&self, i: usize, j: usize) -> CrsResult<()> {
        if i < self.nr_rows && j < self.nr_columns {
            Ok(())
        } else {
            Err(CrsError::IndexOutOfRange { row: i, column: j, rows: self.nr_rows, columns: self.nr_columns })
        }
    }

    /// Remove the value stored at offset `index`, which lies in row `i`.
    fn remove_entry(&mut self, i: usize, index: usize) {
        debug_assert!(self.row_range(i).contains(&index));

        self.values.remove(index);
        self.column_indices.remove(index);
        for start in &mut self.row_starts[(i + 1)..] {
            *start -= 1;
        }
    }

    /// Insert a value at offset `index` in row `i`, at column `j`.
    fn insert_entry(&mut self, i: usize, j: usize, index: usize, value: T) {
        debug_assert!(index >= self.row_starts[i] && index <= self.row_starts[i + 1]);

        self.values.insert(index, value);
        self.column_indices.insert(index, j);
        for start in &mut self.row_starts[(i + 1)..] {
            *start += 1;
        }
    }
}

impl<T> Default for CrsMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Largest number of rows: the row index of `nr_rows + 1` offsets should fit in a `Vec`.
const MAX_NR_ROWS: usize = isize::MAX as usize / mem::size_of::<usize>() - 1;

/// Whether a matrix of this shape can be represented.
///
/// The row index needs `nr_rows + 1` elements and the number of cells should be countable.
pub(crate) fn check_shape(nr_rows: usize, nr_columns: usize) -> CrsResult<()> {
    if nr_rows <= MAX_NR_ROWS && nr_rows.checked_mul(nr_columns).is_some() {
        Ok(())
    } else {
        Err(CrsError::InvalidDimension { rows: nr_rows, columns: nr_columns })
    }
}

/// Row index of `nr_rows` empty rows, failing instead of aborting when it can't be allocated.
fn empty_row_starts(nr_rows: usize, nr_columns: usize) -> CrsResult<Vec<usize>> {
    check_shape(nr_rows, nr_columns)?;

    let mut row_starts = Vec::new();
    row_starts.try_reserve_exact(nr_rows + 1)
        .map_err(|_| CrsError::InvalidDimension { rows: nr_rows, columns: nr_columns })?;
    row_starts.resize(nr_rows + 1, 0);

    Ok(row_starts)
}

impl<T: Element> CrsMatrix<T> {
    /// Create a matrix of zeros of dimension `nr_rows` x `nr_columns`.
    pub fn with_shape(nr_rows: usize, nr_columns: usize) -> CrsResult<Self> {
        Ok(Self {
            values: Vec::new(),
            column_indices: Vec::new(),
            row_starts: empty_row_starts(nr_rows, nr_columns)?,

            nr_rows,
            nr_columns,
        })
    }

    /// Create a square identity matrix of size `len`.
    pub fn identity(len: usize) -> CrsResult<Self>
    where
        T: One,
    {
        check_shape(len, len)?;

        Ok(Self {
            values: vec![T::one(); len],
            column_indices: (0..len).collect(),
            row_starts: (0..=len).collect(),

            nr_rows: len,
            nr_columns: len,
        })
    }

    /// Import a dense grid.
    ///
    /// # Arguments
    ///
    /// * `grid`: Rows of the matrix. They don't need to be of equal length: the number of columns
    /// is the length of the longest row, shorter rows are padded with zeros.
    ///
    /// # Return value
    ///
    /// A matrix containing each nonzero cell of the grid.
    pub fn from_dense<R: AsRef<[T]>>(grid: &[R]) -> CrsResult<Self> {
        let nr_rows = grid.len();
        let nr_columns = grid.iter()
            .map(|row| row.as_ref().len())
            .max()
            .unwrap_or(0);

        let mut matrix = Self::with_shape(nr_rows, nr_columns)?;
        for (i, row) in grid.iter().enumerate() {
            for (j, value) in row.as_ref().iter().enumerate() {
                if value.is_not_zero() {
                    matrix.set(i, j, value.clone())?;
                }
            }
        }

        Ok(matrix)
    }

    /// Create a matrix directly from its storage arrays.
    ///
    /// The arrays are validated: the row starts should be consistent with the number of values,
    /// columns should be in range and strictly increasing within each row, and no value may be
    /// zero.
    pub fn from_parts(
        nr_rows: usize,
        nr_columns: usize,
        values: Vec<T>,
        column_indices: Vec<usize>,
        row_starts: Vec<usize>,
    ) -> CrsResult<Self> {
        let matrix = Self { values, column_indices, row_starts, nr_rows, nr_columns };
        matrix.check_storage()?;

        Ok(matrix)
    }

    /// Get the value at coordinate (`i`, `j`).
    ///
    /// # Return value
    ///
    /// The stored value, or zero if nothing is stored at that coordinate.
    pub fn get(&self, i: usize, j: usize) -> CrsResult<T> {
        self.check_index(i, j)?;

        let index = self.find_in_row(i, j);
        if index < self.row_starts[i + 1] && self.column_indices[index] == j {
            Ok(self.values[index].clone())
        } else {
            Ok(T::zero())
        }
    }

    /// Set the value at coordinate (`i`, `j`) to `value`.
    ///
    /// If the coordinate lies outside of the matrix, the matrix is first grown to contain it. Zero
    /// values are never stored: writing a zero removes the value at that coordinate, if any.
    ///
    /// # Arguments
    ///
    /// * `i`: Row index. New values might be inserted, causing the values of all later rows to be
    /// shifted.
    /// * `j`: Column index.
    /// * `value`: Value to be taken at (`i`, `j`).
    pub fn set(&mut self, i: usize, j: usize, value: T) -> CrsResult<()> {
        let grown = |index: usize, current: usize| {
            if index < current { Some(current) } else { index.checked_add(1) }
        };
        let (nr_rows, nr_columns) = match (grown(i, self.nr_rows), grown(j, self.nr_columns)) {
            (Some(nr_rows), Some(nr_columns)) => (nr_rows, nr_columns),
            // The requested shape, saturated
            (nr_rows, nr_columns) => return Err(CrsError::InvalidDimension {
                rows: nr_rows.unwrap_or(usize::MAX),
                columns: nr_columns.unwrap_or(usize::MAX),
            }),
        };
        if (nr_rows, nr_columns) != (self.nr_rows, self.nr_columns) {
            check_shape(nr_rows, nr_columns)?;
            self.reserve_rows(nr_rows, nr_columns)?;

            self.grow_rows(nr_rows);
            self.grow_columns(nr_columns);
        }

        let index = self.find_in_row(i, j);
        let is_present = index < self.row_starts[i + 1] && self.column_indices[index] == j;

        match (value.is_not_zero(), is_present) {
            (false, false) => {},
            (false, true) => self.remove_entry(i, index),
            (true, true) => self.values[index] = value,
            (true, false) => self.insert_entry(i, j, index, value),
        }

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Get all (`column`, `value`) tuples of row `i`.
    pub fn row(&self, i: usize) -> CrsResult<impl Iterator<Item=(usize, &T)>> {
        self.check_row(i)?;

        let range = self.row_range(i);
        Ok(self.column_indices[range.clone()].iter().copied().zip(&self.values[range]))
    }

    /// Get all (`row`, `column`, `value`) tuples of stored values, in storage order.
    pub fn iter(&self) -> impl Iterator<Item=(usize, usize, &T)> {
        (0..self.nr_rows).flat_map(move |i| {
            self.row_range(i).map(move |index| (i, self.column_indices[index], &self.values[index]))
        })
    }

    /// Materialize all cells of this matrix.
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        let mut grid = vec![vec![T::zero(); self.nr_columns]; self.nr_rows];
        for (i, j, value) in self.iter() {
            grid[i][j] = value.clone();
        }

        grid
    }

    /// Whether all invariants of the storage hold.
    pub(crate) fn is_consistent(&self) -> bool {
        self.check_storage().is_ok()
    }

    fn check_storage(&self) -> CrsResult<()> {
        check_shape(self.nr_rows, self.nr_columns)?;

        if self.row_starts.len() != self.nr_rows + 1 {
            return Err(CrsError::invalid_storage(format!(
                "{} row starts for {} rows", self.row_starts.len(), self.nr_rows,
            )));
        }
        if self.row_starts[0] != 0 {
            return Err(CrsError::invalid_storage("first row doesn't start at offset 0"));
        }
        if let Some(i) = self.row_starts.windows(2).position(|pair| pair[0] > pair[1]) {
            return Err(CrsError::invalid_storage(format!("row starts decrease after row {}", i)));
        }
        let nr_values = self.row_starts[self.nr_rows];
        if self.values.len() != nr_values || self.column_indices.len() != nr_values {
            return Err(CrsError::invalid_storage(format!(
                "{} values and {} column indices, but row starts account for {}",
                self.values.len(), self.column_indices.len(), nr_values,
            )));
        }
        for i in 0..self.nr_rows {
            let columns = &self.column_indices[self.row_range(i)];
            if !columns.windows(2).all(|pair| pair[0] < pair[1]) {
                return Err(CrsError::invalid_storage(format!("columns of row {} are not strictly increasing", i)));
            }
            if let Some(&column) = columns.last() {
                if column >= self.nr_columns {
                    return Err(CrsError::invalid_storage(format!(
                        "column {} in row {} is out of range for {} columns", column, i, self.nr_columns,
                    )));
                }
            }
        }
        if let Some(index) = self.values.iter().position(|value| !value.is_not_zero()) {
            return Err(CrsError::invalid_storage(format!("explicit zero stored at offset {}", index)));
        }

        Ok(())
    }
}

impl<T: Element> TryFrom<Vec<Vec<T>>> for CrsMatrix<T> {
    type Error = CrsError;

    fn try_from(grid: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_dense(&grid)
    }
}

/// Shapes and storage layout should be identical, values are compared with a tolerance.
impl<T: Tolerance> PartialEq for CrsMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.nr_rows == other.nr_rows
            && self.nr_columns == other.nr_columns
            && self.column_indices == other.column_indices
            && self.row_starts == other.row_starts
            && self.values.iter().zip(&other.values).all(|(left, right)| left.tolerant_eq(right))
    }
}

/// Imports the grid and compares. A grid that can't be imported is never equal.
impl<T: Element + Tolerance> PartialEq<Vec<Vec<T>>> for CrsMatrix<T> {
    fn eq(&self, other: &Vec<Vec<T>>) -> bool {
        CrsMatrix::from_dense(other).is_ok_and(|other| *self == other)
    }
}

impl<T: Element + Tolerance> PartialEq<CrsMatrix<T>> for Vec<Vec<T>> {
    fn eq(&self, other: &CrsMatrix<T>) -> bool {
        other == self
    }
}
