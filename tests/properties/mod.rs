//! Property based tests comparing `CrsMatrix` with a dense model.
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use relp_crs::CrsMatrix;

mod arithmetic;

/// Mostly zeros, such that the matrices are actually sparse.
pub fn cell() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => Just(0f64),
        2 => -100f64..100f64,
        1 => (-5i32..5).prop_map(f64::from),
    ]
}

/// A rectangular grid of `nr_rows` x `nr_columns`.
pub fn grid(nr_rows: usize, nr_columns: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(cell(), nr_columns), nr_rows)
}

/// A rectangular grid of random, nonzero, shape.
pub fn any_grid() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1..7usize, 1..7usize).prop_flat_map(|(nr_rows, nr_columns)| grid(nr_rows, nr_columns))
}

/// Rows of varying length, possibly none at all.
pub fn ragged_grid() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(cell(), 0..7), 0..7)
}

/// Check every storage invariant through the public accessors.
pub fn check_canonical(matrix: &CrsMatrix<f64>) -> Result<(), TestCaseError> {
    let row_starts = matrix.row_starts();
    let column_indices = matrix.column_indices();

    prop_assert_eq!(row_starts.len(), matrix.nr_rows() + 1);
    prop_assert_eq!(row_starts[0], 0);
    prop_assert!(row_starts.windows(2).all(|pair| pair[0] <= pair[1]));
    prop_assert_eq!(row_starts[matrix.nr_rows()], matrix.values().len());
    prop_assert_eq!(column_indices.len(), matrix.values().len());
    prop_assert_eq!(matrix.nonzero_count(), matrix.values().len());

    for i in 0..matrix.nr_rows() {
        let columns = &column_indices[row_starts[i]..row_starts[i + 1]];
        prop_assert!(columns.windows(2).all(|pair| pair[0] < pair[1]), "row {} not sorted", i);
        prop_assert!(columns.iter().all(|&column| column < matrix.nr_columns()));
    }
    prop_assert!(matrix.values().iter().all(|&value| value != 0f64));

    Ok(())
}

/// Compare every cell with a dense model of the same shape.
pub fn check_cells(matrix: &CrsMatrix<f64>, model: &[Vec<f64>]) -> Result<(), TestCaseError> {
    prop_assert_eq!(matrix.nr_rows(), model.len());
    for (i, row) in model.iter().enumerate() {
        prop_assert_eq!(matrix.nr_columns(), row.len());
        for (j, &value) in row.iter().enumerate() {
            prop_assert_eq!(matrix.get(i, j).unwrap(), value, "cell ({}, {})", i, j);
        }
    }

    Ok(())
}
