//! Scaling, addition and multiplication against dense arithmetic.
use approx::assert_relative_eq;
use proptest::prelude::*;

use relp_crs::{CrsError, CrsMatrix};
use relp_crs::data::linear_algebra::matrix::MIN_ROWS_PER_SHARD;

use super::{any_grid, check_canonical, check_cells, grid};

/// Same summation order as the sparse product: ascending inner index, starting from zero.
fn dense_product(left: &[Vec<f64>], right: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let nr_columns = right.first().map_or(0, Vec::len);

    left.iter()
        .map(|row| (0..nr_columns)
            .map(|j| row.iter().zip(right).fold(0f64, |sum, (a, b_row)| sum + a * b_row[j]))
            .collect())
        .collect()
}

fn same_shape_pair() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    (1..7usize, 1..7usize).prop_flat_map(|(rows, columns)| (grid(rows, columns), grid(rows, columns)))
}

fn multipliable_pair() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    (1..7usize, 1..7usize, 1..7usize)
        .prop_flat_map(|(rows, inner, columns)| (grid(rows, inner), grid(inner, columns)))
}

proptest! {
    #[test]
    fn scale_by_one_and_zero(values in any_grid()) {
        let matrix = CrsMatrix::from_dense(&values).unwrap();

        let same = matrix.scale(&1f64);
        prop_assert_eq!(same.values(), matrix.values());
        prop_assert_eq!(same.column_indices(), matrix.column_indices());

        let zero = 0f64 * &matrix;
        check_canonical(&zero)?;
        prop_assert_eq!(zero.nonzero_count(), 0);
        prop_assert_eq!((zero.nr_rows(), zero.nr_columns()), (matrix.nr_rows(), matrix.nr_columns()));
    }

    #[test]
    fn scale_is_cellwise(values in any_grid(), scalar in -10f64..10f64) {
        let matrix = CrsMatrix::from_dense(&values).unwrap();
        let scaled = &matrix * scalar;
        check_canonical(&scaled)?;

        let expected = values.iter()
            .map(|row| row.iter().map(|value| value * scalar).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        check_cells(&scaled, &expected)?;
    }

    #[test]
    fn add_is_cellwise((left, right) in same_shape_pair()) {
        let a = CrsMatrix::from_dense(&left).unwrap();
        let b = CrsMatrix::from_dense(&right).unwrap();

        let sum = a.checked_add(&b).unwrap();
        check_canonical(&sum)?;
        let expected = left.iter().zip(&right)
            .map(|(x, y)| x.iter().zip(y).map(|(p, q)| p + q).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        check_cells(&sum, &expected)?;

        prop_assert_eq!(b.checked_add(&a).unwrap(), sum);
    }

    #[test]
    fn subtract_itself(values in any_grid()) {
        let matrix = CrsMatrix::from_dense(&values).unwrap();

        let difference = matrix.checked_sub(&matrix).unwrap();
        check_canonical(&difference)?;
        prop_assert_eq!(difference.nonzero_count(), 0);
        prop_assert_eq!((difference.nr_rows(), difference.nr_columns()), (matrix.nr_rows(), matrix.nr_columns()));
    }

    #[test]
    fn subtract_is_cellwise((left, right) in same_shape_pair()) {
        let a = CrsMatrix::from_dense(&left).unwrap();
        let b = CrsMatrix::from_dense(&right).unwrap();

        let difference = a.checked_sub(&b).unwrap();
        check_canonical(&difference)?;
        for (i, (x, y)) in left.iter().zip(&right).enumerate() {
            for (j, (p, q)) in x.iter().zip(y).enumerate() {
                assert_relative_eq!(difference.get(i, j).unwrap(), p - q);
            }
        }
    }

    #[test]
    fn multiply_like_dense((left, right) in multipliable_pair()) {
        let a = CrsMatrix::from_dense(&left).unwrap();
        let b = CrsMatrix::from_dense(&right).unwrap();

        let product = a.checked_mul(&b).unwrap();
        check_canonical(&product)?;
        check_cells(&product, &dense_product(&left, &right))?;
    }

    #[test]
    fn multiplication_variants_agree((left, right) in multipliable_pair()) {
        let a = CrsMatrix::from_dense(&left).unwrap();
        let b = CrsMatrix::from_dense(&right).unwrap();

        let fast = a.checked_mul(&b).unwrap();
        let reference = a.mul_reference(&b).unwrap();
        let parallel = a.par_mul(&b).unwrap();

        for other in [&reference, &parallel] {
            prop_assert_eq!(other.values(), fast.values());
            prop_assert_eq!(other.column_indices(), fast.column_indices());
            prop_assert_eq!(other.row_starts(), fast.row_starts());
        }
    }

    #[test]
    fn zero_absorbs((left, right) in multipliable_pair()) {
        let a = CrsMatrix::from_dense(&left).unwrap();
        let zero = CrsMatrix::<f64>::with_shape(right.len(), right[0].len()).unwrap();

        let product = a.checked_mul(&zero).unwrap();
        prop_assert_eq!(product.nonzero_count(), 0);
        prop_assert_eq!((product.nr_rows(), product.nr_columns()), (a.nr_rows(), zero.nr_columns()));
    }

    #[test]
    fn identity_is_neutral(values in any_grid()) {
        let matrix = CrsMatrix::from_dense(&values).unwrap();
        let left = CrsMatrix::identity(matrix.nr_rows()).unwrap();
        let right = CrsMatrix::identity(matrix.nr_columns()).unwrap();

        prop_assert_eq!(left.checked_mul(&matrix).unwrap(), matrix.clone());
        prop_assert_eq!(matrix.checked_mul(&right).unwrap(), matrix);
    }

    #[test]
    fn incompatible_shapes((rows, inner, columns) in (1..7usize, 1..7usize, 1..7usize)) {
        let a = CrsMatrix::<f64>::with_shape(rows, inner).unwrap();
        let b = CrsMatrix::<f64>::with_shape(inner + 1, columns).unwrap();

        prop_assert!(is_mismatch(a.checked_mul(&b)));
        prop_assert!(is_mismatch(a.par_mul(&b)));
        prop_assert!(is_mismatch(a.mul_reference(&b)));

        // Same number of rows, one column more
        let wider = CrsMatrix::<f64>::with_shape(rows, inner + 1).unwrap();
        prop_assert!(is_mismatch(a.checked_add(&wider)));
        prop_assert!(is_mismatch(a.checked_sub(&wider)));
        prop_assert!(is_mismatch(wider.checked_add(&a)));

        // Same number of columns, one row more
        let taller = CrsMatrix::<f64>::with_shape(rows + 1, inner).unwrap();
        prop_assert!(is_mismatch(a.checked_add(&taller)));
        prop_assert!(is_mismatch(taller.checked_sub(&a)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Enough rows for the parallel product to be split over several tasks.
    #[test]
    fn multiplication_variants_agree_over_shards((left, right) in sharded_pair()) {
        let a = CrsMatrix::from_dense(&left).unwrap();
        let b = CrsMatrix::from_dense(&right).unwrap();

        let fast = a.checked_mul(&b).unwrap();
        let parallel = a.par_mul(&b).unwrap();
        prop_assert_eq!(parallel.values(), fast.values());
        prop_assert_eq!(parallel.column_indices(), fast.column_indices());
        prop_assert_eq!(parallel.row_starts(), fast.row_starts());
        check_cells(&parallel, &dense_product(&left, &right))?;
    }
}

fn sharded_pair() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    (3 * MIN_ROWS_PER_SHARD..6 * MIN_ROWS_PER_SHARD, 1..12usize, 1..12usize)
        .prop_flat_map(|(rows, inner, columns)| (grid(rows, inner), grid(inner, columns)))
}

fn is_mismatch(result: Result<CrsMatrix<f64>, CrsError>) -> bool {
    matches!(result, Err(CrsError::DimensionMismatch { .. }))
}
