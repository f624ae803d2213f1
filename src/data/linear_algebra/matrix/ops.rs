//! # Arithmetic
//!
//! Operations that can't fail are implemented as operators: multiplication by a scalar and
//! negation. Operations between two matrices require compatible shapes and return a `CrsResult`.
use std::mem;
use std::ops::{Add, Mul, Neg};

use log::debug;

use crate::data::linear_algebra::error::{CrsError, CrsResult};
use crate::data::linear_algebra::matrix::CrsMatrix;
use crate::data::linear_algebra::traits::{Element, NotZero};

impl<T: Element> CrsMatrix<T> {
    /// Apply `f` to every stored value, dropping the results that are zero.
    ///
    /// The result has the same shape, and a sparsity pattern that is a subset of this matrix's.
    fn map_values<F: FnMut(&T) -> T>(&self, mut f: F) -> Self {
        let mut values = Vec::with_capacity(self.values.len());
        let mut column_indices = Vec::with_capacity(self.column_indices.len());
        let mut row_starts = Vec::with_capacity(self.row_starts.len());
        row_starts.push(0);

        for i in 0..self.nr_rows {
            for index in self.row_range(i) {
                let value = f(&self.values[index]);
                if value.is_not_zero() {
                    values.push(value);
                    column_indices.push(self.column_indices[index]);
                }
            }
            row_starts.push(values.len());
        }

        Self { values, column_indices, row_starts, nr_rows: self.nr_rows, nr_columns: self.nr_columns }
    }

    /// Multiply each value by a scalar.
    ///
    /// For a nonzero scalar, the sparsity pattern is unchanged, unless a product underflows to
    /// zero. Scaling by zero results in a matrix without any stored values.
    #[must_use]
    pub fn scale(&self, scalar: &T) -> Self
    where
        T: Mul<Output=T>,
    {
        self.map_values(|value| value.clone() * scalar.clone())
    }

    fn check_same_shape(&self, other: &Self, operation: &'static str) -> CrsResult<()> {
        if (self.nr_rows, self.nr_columns) == (other.nr_rows, other.nr_columns) {
            Ok(())
        } else {
            Err(CrsError::DimensionMismatch {
                operation,
                left: (self.nr_rows, self.nr_columns),
                right: (other.nr_rows, other.nr_columns),
            })
        }
    }

    pub(super) fn check_multipliable(&self, other: &Self) -> CrsResult<()> {
        if self.nr_columns == other.nr_rows {
            Ok(())
        } else {
            Err(CrsError::DimensionMismatch {
                operation: "multiplication",
                left: (self.nr_rows, self.nr_columns),
                right: (other.nr_rows, other.nr_columns),
            })
        }
    }

    /// Add another matrix of the same shape to this one.
    ///
    /// Each value of `other` is added to the corresponding cell of a copy of this matrix. Values
    /// that cancel out are removed.
    pub fn checked_add(&self, other: &Self) -> CrsResult<Self>
    where
        T: Add<Output=T>,
    {
        self.check_same_shape(other, "addition")?;

        let mut sum = self.clone();
        for (i, j, value) in other.iter() {
            let current = sum.get(i, j)?;
            sum.set(i, j, current + value.clone())?;
        }

        Ok(sum)
    }

    /// Subtract another matrix of the same shape from this one.
    pub fn checked_sub(&self, other: &Self) -> CrsResult<Self>
    where
        T: Add<Output=T> + Neg<Output=T>,
    {
        self.check_same_shape(other, "subtraction")?;

        self.checked_add(&-other)
    }

    /// Multiply with another matrix, cell by cell.
    ///
    /// This is the textbook algorithm: every cell of the product is the sum over the inner
    /// dimension, accessing each operand through `get`. It serves as a reference for the faster
    /// `checked_mul`, which gives identical results for finite values.
    pub fn mul_reference(&self, other: &Self) -> CrsResult<Self>
    where
        T: Add<Output=T> + Mul<Output=T>,
    {
        self.check_multipliable(other)?;

        let mut product = Self::with_shape(self.nr_rows, other.nr_columns)?;
        for i in 0..self.nr_rows {
            for j in 0..other.nr_columns {
                let mut sum = T::zero();
                for k in 0..self.nr_columns {
                    sum = sum + self.get(i, k)? * other.get(k, j)?;
                }
                product.set(i, j, sum)?;
            }
        }

        Ok(product)
    }

    /// Multiply with another matrix.
    ///
    /// Row `i` of the product is a combination of the rows of `other`, weighted by the values in
    /// row `i` of this matrix. Only stored values are visited, so the time spent depends on the
    /// number of values rather than on the dimensions.
    ///
    /// The row being computed is accumulated densely: besides the product, this allocates work
    /// space proportional to `other.nr_columns()`, also when `other` is very wide and nearly
    /// empty.
    ///
    /// # Return value
    ///
    /// A `self.nr_rows()` x `other.nr_columns()` matrix, or a `DimensionMismatch` when the number
    /// of columns of this matrix differs from the number of rows of `other`.
    pub fn checked_mul(&self, other: &Self) -> CrsResult<Self>
    where
        T: Add<Output=T> + Mul<Output=T>,
    {
        self.check_multipliable(other)?;
        let mut product = Self::with_shape(self.nr_rows, other.nr_columns)?;

        let mut accumulator = RowAccumulator::new(other.nr_columns);
        for i in 0..self.nr_rows {
            accumulator.multiply_row(self, other, i, &mut product.column_indices, &mut product.values);
            product.row_starts[i + 1] = product.values.len();
        }
        debug!(
            "Multiplied {}x{} ({} values) by {}x{} ({} values) into {} values",
            self.nr_rows, self.nr_columns, self.nonzero_count(),
            other.nr_rows, other.nr_columns, other.nonzero_count(),
            product.nonzero_count(),
        );

        debug_assert!(product.is_consistent());
        Ok(product)
    }
}

/// Dense work space for computing a single row of a matrix product.
///
/// Keeps track of which columns received a contribution, such that clearing it costs only as
/// much as the row that was computed. Its memory is proportional to the width of the product,
/// regardless of how many values the product has.
pub(super) struct RowAccumulator<T> {
    sums: Vec<T>,
    touched: Vec<bool>,
    columns: Vec<usize>,
}

impl<T: Element> RowAccumulator<T> {
    pub(super) fn new(nr_columns: usize) -> Self {
        Self {
            sums: vec![T::zero(); nr_columns],
            touched: vec![false; nr_columns],
            columns: Vec::new(),
        }
    }

    /// Compute row `i` of `left * right`, appending its columns and values to the output.
    ///
    /// Contributions to each cell are added in order of increasing inner index, starting from
    /// zero, exactly like the textbook algorithm does.
    pub(super) fn multiply_row(
        &mut self,
        left: &CrsMatrix<T>,
        right: &CrsMatrix<T>,
        i: usize,
        column_indices: &mut Vec<usize>,
        values: &mut Vec<T>,
    )
    where
        T: Add<Output=T> + Mul<Output=T>,
    {
        debug_assert!(self.columns.is_empty());
        debug_assert_eq!(self.sums.len(), right.nr_columns);

        for left_index in left.row_range(i) {
            let k = left.column_indices[left_index];
            let left_value = &left.values[left_index];

            for right_index in right.row_range(k) {
                let j = right.column_indices[right_index];
                if !self.touched[j] {
                    self.touched[j] = true;
                    self.columns.push(j);
                }
                let contribution = left_value.clone() * right.values[right_index].clone();
                let sum = mem::replace(&mut self.sums[j], T::zero());
                self.sums[j] = sum + contribution;
            }
        }

        self.columns.sort_unstable();
        for &j in &self.columns {
            self.touched[j] = false;
            let sum = mem::replace(&mut self.sums[j], T::zero());
            if sum.is_not_zero() {
                column_indices.push(j);
                values.push(sum);
            }
        }
        self.columns.clear();
    }
}

impl<T: Element + Mul<Output=T>> Mul<T> for CrsMatrix<T> {
    type Output = Self;

    fn mul(self, scalar: T) -> Self::Output {
        self.scale(&scalar)
    }
}

impl<T: Element + Mul<Output=T>> Mul<T> for &CrsMatrix<T> {
    type Output = CrsMatrix<T>;

    fn mul(self, scalar: T) -> Self::Output {
        self.scale(&scalar)
    }
}

macro_rules! impl_scalar_left_mul {
    ($($t:ty),*) => {
        $(
            impl Mul<CrsMatrix<$t>> for $t {
                type Output = CrsMatrix<$t>;

                fn mul(self, matrix: CrsMatrix<$t>) -> Self::Output {
                    matrix.scale(&self)
                }
            }

            impl Mul<&CrsMatrix<$t>> for $t {
                type Output = CrsMatrix<$t>;

                fn mul(self, matrix: &CrsMatrix<$t>) -> Self::Output {
                    matrix.scale(&self)
                }
            }
        )*
    }
}
impl_scalar_left_mul!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Multiplication by minus one.
impl<T: Element + Neg<Output=T>> Neg for CrsMatrix<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<T: Element + Neg<Output=T>> Neg for &CrsMatrix<T> {
    type Output = CrsMatrix<T>;

    fn neg(self) -> Self::Output {
        self.map_values(|value| -value.clone())
    }
}
