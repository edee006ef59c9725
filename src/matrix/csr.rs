//! Compressed Sparse Row (CSR) matrix format implementation

use log::warn;
use num_traits::Num;
use std::fmt;

use crate::matrix::partition::{partition_rows, Stripe};
use crate::matrix::storage::{pointers_are_monotone, write_buffer};

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// The buffers are never modified after construction, so a CSR matrix can be
/// shared read-only between workers. The only mutable state is the cached
/// stripe list written by [`SparseMatrixCSR::partition`].
#[derive(Clone)]
pub struct SparseMatrixCSR<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,

    stripes: Vec<Stripe>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), n_rows + 1, "row_ptr.len() must be n_rows + 1");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");
        assert_eq!(
            row_ptr[n_rows], col_idx.len(),
            "row_ptr[n_rows] must equal col_idx.len()"
        );
        assert_eq!(row_ptr[0], 0, "row_ptr[0] must be 0");
        debug_assert!(pointers_are_monotone(&row_ptr), "row_ptr must be non-decreasing");

        // Check that column indices are within bounds
        for &col in &col_idx {
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
            stripes: Vec::new(),
        }
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of non-zero elements stored in row i
    pub fn row_nnz(&self, i: usize) -> usize {
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self::new(n_rows, n_cols, vec![0; n_rows + 1], Vec::new(), Vec::new())
    }

    /// Splits the rows into `n_partitions` stripes of roughly equal nnz and
    /// caches the result
    ///
    /// Partitioning a matrix twice is almost always a caller mistake, so it
    /// is logged; the new stripe list replaces the old one.
    pub fn partition(&mut self, n_partitions: usize) -> &[Stripe] {
        if !self.stripes.is_empty() {
            warn!(
                "CSR matrix ({} x {}) already partitioned into {} stripes; recomputing with {}",
                self.n_rows,
                self.n_cols,
                self.stripes.len(),
                n_partitions
            );
        }
        self.stripes = partition_rows(self, n_partitions);
        &self.stripes
    }

    /// The stripe list from the last call to [`partition`](Self::partition),
    /// empty if the matrix was never partitioned
    pub fn stripes(&self) -> &[Stripe] {
        &self.stripes
    }
}

/// Two matrices are equal when shape and buffers match; the stripe cache is
/// not compared.
impl<T: PartialEq> PartialEq for SparseMatrixCSR<T> {
    fn eq(&self, other: &Self) -> bool {
        self.n_rows == other.n_rows
            && self.n_cols == other.n_cols
            && self.row_ptr == other.row_ptr
            && self.col_idx == other.col_idx
            && self.values == other.values
    }
}

/// Shape, the first few rows and the cached stripes
impl<T: fmt::Debug> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SAMPLE: usize = 4;

        writeln!(
            f,
            "SparseMatrixCSR {} x {}, nnz = {} {{",
            self.n_rows,
            self.n_cols,
            self.values.len()
        )?;

        for i in 0..self.n_rows.min(SAMPLE) {
            let range = self.row_ptr[i]..self.row_ptr[i + 1];
            write!(f, "  row {}:", i)?;
            if range.is_empty() {
                write!(f, " (empty)")?;
            }
            for k in range.clone().take(SAMPLE) {
                write!(f, " ({}, {:?})", self.col_idx[k], self.values[k])?;
            }
            if range.len() > SAMPLE {
                write!(f, " ... {} more", range.len() - SAMPLE)?;
            }
            writeln!(f)?;
        }
        if self.n_rows > SAMPLE {
            writeln!(f, "  ... {} more rows", self.n_rows - SAMPLE)?;
        }

        for (i, stripe) in self.stripes.iter().enumerate() {
            writeln!(f, "  stripe {}: {}", i, stripe)?;
        }

        write!(f, "}}")
    }
}

/// Complete dump: shape line, then every element of each buffer
impl<T: fmt::Display> fmt::Display for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// CSR {} x {}, nnz = {}", self.n_rows, self.n_cols, self.values.len())?;
        write_buffer(f, "usize", "row_ptr", &self.row_ptr)?;
        write_buffer(f, "usize", "col_idx", &self.col_idx)?;
        write_buffer(f, std::any::type_name::<T>(), "values", &self.values)
    }
}
