//! Conversion functions between matrix formats
//!
//! Triplet conversions order a private copy of the triples (row-major for
//! COO and CSR, column-major for CSC) and then make one pass over the
//! ordered copy. The source matrix is only read. The sort is stable, so
//! entries that share a coordinate keep their insertion order.

use num_traits::Num;

use crate::matrix::{SparseMatrixCOO, SparseMatrixCSC, SparseMatrixCSR, Triple, TripletMatrix};

impl<T: Copy + Num> TripletMatrix<T> {
    fn sorted_row_major(&self) -> Vec<Triple<T>> {
        let mut triples = self.triples().to_vec();
        triples.sort_by_key(|t| (t.row, t.col));
        triples
    }

    fn sorted_col_major(&self) -> Vec<Triple<T>> {
        let mut triples = self.triples().to_vec();
        triples.sort_by_key(|t| (t.col, t.row));
        triples
    }

    /// Converts to coordinate format in row-major order
    pub fn to_coo(&self) -> SparseMatrixCOO<T> {
        let sorted = self.sorted_row_major();
        let nnz = sorted.len();

        let mut row_idx = Vec::with_capacity(nnz);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for t in sorted {
            row_idx.push(t.row);
            col_idx.push(t.col);
            values.push(t.value);
        }

        SparseMatrixCOO::new(self.n_rows, self.n_cols, row_idx, col_idx, values)
    }

    /// Converts to compressed sparse row format
    ///
    /// # Panics
    ///
    /// Panics if a triple lies outside the matrix shape.
    pub fn to_csr(&self) -> SparseMatrixCSR<T> {
        let sorted = self.sorted_row_major();
        let (row_ptr, col_idx, values) =
            compress(self.n_rows, sorted.iter().map(|t| (t.row, t.col, t.value)));

        SparseMatrixCSR::new(self.n_rows, self.n_cols, row_ptr, col_idx, values)
    }

    /// Converts to compressed sparse column format
    ///
    /// # Panics
    ///
    /// Panics if a triple lies outside the matrix shape.
    pub fn to_csc(&self) -> SparseMatrixCSC<T> {
        let sorted = self.sorted_col_major();
        let (col_ptr, row_idx, values) =
            compress(self.n_cols, sorted.iter().map(|t| (t.col, t.row, t.value)));

        SparseMatrixCSC::new(self.n_rows, self.n_cols, col_ptr, row_idx, values)
    }
}

/// Builds a pointer array over `n_major` lines from entries already grouped
/// by their major index, returning `(ptr, minor_idx, values)`
///
/// Lines without entries get an empty range: the pointer is carried forward
/// for every skipped line before the next entry is appended, and again for
/// the trailing lines after the last entry.
fn compress<T, I>(n_major: usize, entries: I) -> (Vec<usize>, Vec<usize>, Vec<T>)
where
    I: ExactSizeIterator<Item = (usize, usize, T)>,
{
    let nnz = entries.len();
    let mut ptr = Vec::with_capacity(n_major + 1);
    let mut minor_idx = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);

    ptr.push(0);
    let mut current = 0;

    for (major, minor, value) in entries {
        assert!(
            major < n_major,
            "Major index {} out of bounds (dimension = {})",
            major,
            n_major
        );

        // Fill empty lines
        while current < major {
            ptr.push(minor_idx.len());
            current += 1;
        }

        minor_idx.push(minor);
        values.push(value);
    }

    // Fill remaining empty lines
    while current < n_major {
        ptr.push(minor_idx.len());
        current += 1;
    }

    (ptr, minor_idx, values)
}

impl<T: Copy + Num> SparseMatrixCSR<T> {
    /// Converts this CSR matrix to CSC format
    pub fn to_csc(&self) -> SparseMatrixCSC<T> {
        // Count non-zeros per column
        let mut col_counts = vec![0; self.n_cols];

        for &col in &self.col_idx {
            col_counts[col] += 1;
        }

        let col_ptr = crate::utils::exclusive_scan(&col_counts);

        // Allocate arrays for CSC matrix
        let nnz = self.nnz();
        let mut row_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        // Scatter rows in ascending order so each column comes out sorted
        let mut next = col_ptr.clone();

        for i in 0..self.n_rows {
            for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                let col = self.col_idx[idx];
                let pos = next[col];

                row_idx[pos] = i;
                values[pos] = self.values[idx];

                next[col] += 1;
            }
        }

        SparseMatrixCSC::new(self.n_rows, self.n_cols, col_ptr, row_idx, values)
    }
}

impl<T: Copy + Num> SparseMatrixCSC<T> {
    /// Converts this CSC matrix to CSR format
    pub fn to_csr(&self) -> SparseMatrixCSR<T> {
        // Count non-zeros per row
        let mut row_counts = vec![0; self.n_rows];

        for &row in &self.row_idx {
            row_counts[row] += 1;
        }

        let row_ptr = crate::utils::exclusive_scan(&row_counts);

        // Allocate arrays for CSR matrix
        let nnz = self.nnz();
        let mut col_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        let mut next = row_ptr.clone();

        for j in 0..self.n_cols {
            for idx in self.col_ptr[j]..self.col_ptr[j + 1] {
                let row = self.row_idx[idx];
                let pos = next[row];

                col_idx[pos] = j;
                values[pos] = self.values[idx];

                next[row] += 1;
            }
        }

        SparseMatrixCSR::new(self.n_rows, self.n_cols, row_ptr, col_idx, values)
    }
}
