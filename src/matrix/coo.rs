//! Coordinate (COO) matrix format implementation

use num_traits::Num;
use std::fmt;

use crate::matrix::storage::write_buffer;

/// A sparse matrix in coordinate (COO) format
///
/// Three parallel arrays of length nnz. Entries produced by the converters
/// are in row-major order with ties broken by column.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrixCOO<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row index of each entry (size: nnz)
    pub row_idx: Vec<usize>,

    /// Column index of each entry (size: nnz)
    pub col_idx: Vec<usize>,

    /// Value of each entry (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCOO<T>
where
    T: Copy + Num,
{
    /// Creates a new COO matrix from its three parallel arrays
    ///
    /// # Panics
    ///
    /// Panics if the arrays differ in length or an index is outside the shape.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_idx: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_idx.len(), values.len(), "row_idx.len() must equal values.len()");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");

        for (&row, &col) in row_idx.iter().zip(&col_idx) {
            assert!(row < n_rows, "Row index {} out of bounds (n_rows = {})", row, n_rows);
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_idx,
            col_idx,
            values,
        }
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterates over `(row, col, value)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.row_idx
            .iter()
            .zip(&self.col_idx)
            .zip(&self.values)
            .map(|((&row, &col), val)| (row, col, val))
    }
}

impl<T: fmt::Display> fmt::Display for SparseMatrixCOO<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// COO {} x {}, nnz = {}", self.n_rows, self.n_cols, self.values.len())?;
        write_buffer(f, "usize", "row_idx", &self.row_idx)?;
        write_buffer(f, "usize", "col_idx", &self.col_idx)?;
        write_buffer(f, std::any::type_name::<T>(), "values", &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_storage_order() {
        let coo = SparseMatrixCOO::new(2, 3, vec![0, 1], vec![2, 0], vec![1.5f64, 2.5]);
        let entries: Vec<_> = coo.iter().collect();
        assert_eq!(entries, vec![(0, 2, &1.5), (1, 0, &2.5)]);
        assert_eq!(coo.nnz(), 2);
    }

    #[test]
    #[should_panic(expected = "col_idx.len() must equal values.len()")]
    fn test_inconsistent_lengths() {
        SparseMatrixCOO::new(2, 2, vec![0, 1], vec![0], vec![1.0f64, 2.0]);
    }

    #[test]
    #[should_panic(expected = "Column index 4 out of bounds")]
    fn test_column_out_of_bounds() {
        SparseMatrixCOO::new(2, 2, vec![0], vec![4], vec![1.0f64]);
    }

    #[test]
    fn test_display_lists_every_buffer() {
        let coo = SparseMatrixCOO::new(2, 2, vec![0, 1], vec![1, 0], vec![3.0f64, 4.0]);
        let text = coo.to_string();
        assert!(text.contains("usize row_idx[2] = {0, 1};"));
        assert!(text.contains("usize col_idx[2] = {1, 0};"));
        assert!(text.contains("f64 values[2] = {3, 4};"));
    }
}
