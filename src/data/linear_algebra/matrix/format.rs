//! # Human readable representations
//!
//! Meant for debugging, the format is not stable.
use std::fmt;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::data::linear_algebra::matrix::CrsMatrix;
use crate::data::linear_algebra::traits::Element;

/// Dense rendering: each row on its own line between brackets.
impl<T: Element> Display for CrsMatrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let zero = T::zero();
        for i in 0..self.nr_rows {
            let mut row = self.row_range(i)
                .map(|index| (self.column_indices[index], &self.values[index]))
                .peekable();
            let cells = (0..self.nr_columns).map(|j| match row.next_if(|&(column, _)| column == j) {
                Some((_, value)) => value,
                None => &zero,
            });

            writeln!(f, "[{}]", cells.format(" "))?;
        }

        Ok(())
    }
}

/// Dense rendering followed by the three storage arrays.
///
/// Created with `CrsMatrix::storage_dump`.
pub struct StorageDump<'a, T>(&'a CrsMatrix<T>);

impl<T: Element> Display for StorageDump<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let matrix = self.0;

        write!(f, "{}", matrix)?;
        writeln!(f, "Values:  {{ {} }}", matrix.values.iter().format(" "))?;
        writeln!(f, "Columns: {{ {} }}", matrix.column_indices.iter().format(" "))?;
        writeln!(f, "Rows:    {{ {} }}", matrix.row_starts.iter().format(" "))
    }
}

impl<T: Element> CrsMatrix<T> {
    /// Show the dense matrix together with its storage arrays.
    pub fn storage_dump(&self) -> StorageDump<'_, T> {
        StorageDump(self)
    }
}
