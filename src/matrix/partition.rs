//! Row-stripe partitioning of CSR matrices for parallel workers
//!
//! A stripe is a half-open range of rows together with the half-open range
//! of the value (and column index) arrays those rows occupy. Stripes handed
//! out by [`partition_rows`] never overlap, so each worker can read its own
//! slice of a shared CSR matrix without any coordination.

use num_traits::Num;
use std::fmt;
use std::ops::Range;

use crate::matrix::SparseMatrixCSR;

/// A contiguous block of rows and the value-array range it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stripe {
    pub row_begin: usize,
    pub row_end: usize,
    pub val_begin: usize,
    pub val_end: usize,
}

impl Stripe {
    pub fn rows(&self) -> Range<usize> {
        self.row_begin..self.row_end
    }

    pub fn vals(&self) -> Range<usize> {
        self.val_begin..self.val_end
    }

    pub fn n_rows(&self) -> usize {
        self.row_end - self.row_begin
    }

    pub fn nnz(&self) -> usize {
        self.val_end - self.val_begin
    }

    /// A stripe with no rows; produced when there are more stripes than rows
    pub fn is_empty(&self) -> bool {
        self.row_begin == self.row_end
    }
}

impl fmt::Display for Stripe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows [{}, {}) vals [{}, {})",
            self.row_begin, self.row_end, self.val_begin, self.val_end
        )
    }
}

/// Splits the rows of `matrix` into exactly `n_partitions` stripes with
/// roughly equal nonzero counts
///
/// Each stripe but the last takes whole rows until it holds at least
/// `nnz / n_partitions` entries or the rows run out. The last stripe always
/// ends at `(n_rows, nnz)`, absorbing any rounding left over by the integer
/// chunk size. With more stripes than rows the trailing stripes are empty.
///
/// # Panics
///
/// Panics if `n_partitions` is zero.
pub fn partition_rows<T>(matrix: &SparseMatrixCSR<T>, n_partitions: usize) -> Vec<Stripe>
where
    T: Copy + Num,
{
    assert!(n_partitions > 0, "n_partitions must be at least 1");

    let n_rows = matrix.n_rows;
    let nnz = matrix.nnz();
    let chunk_size = nnz / n_partitions;

    let mut stripes = Vec::with_capacity(n_partitions);
    let mut row = 0;
    let mut val = 0;

    for p in 0..n_partitions {
        let row_begin = row;
        let val_begin = val;

        if p == n_partitions - 1 {
            row = n_rows;
            val = nnz;
        } else {
            let mut covered = 0;
            while covered < chunk_size && row < n_rows {
                covered += matrix.row_nnz(row);
                row += 1;
            }
            val += covered;
        }

        stripes.push(Stripe {
            row_begin,
            row_end: row,
            val_begin,
            val_end: val,
        });
    }

    debug_assert!(
        stripes_cover(&stripes, n_rows, nnz),
        "stripes must tile [0, {}) x [0, {})",
        n_rows,
        nnz
    );

    stripes
}

/// Checks that `stripes` tile `[0, n_rows)` and `[0, nnz)` without gaps or
/// overlap
pub fn stripes_cover(stripes: &[Stripe], n_rows: usize, nnz: usize) -> bool {
    let (Some(first), Some(last)) = (stripes.first(), stripes.last()) else {
        return false;
    };

    let contiguous = stripes.windows(2).all(|w| {
        w[0].row_end == w[1].row_begin && w[0].val_end == w[1].val_begin
    });
    let ordered = stripes
        .iter()
        .all(|s| s.row_begin <= s.row_end && s.val_begin <= s.val_end);

    contiguous
        && ordered
        && first.row_begin == 0
        && first.val_begin == 0
        && last.row_end == n_rows
        && last.val_end == nnz
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csr_from_row_lengths(lengths: &[usize]) -> SparseMatrixCSR<f64> {
        let mut row_ptr = vec![0];
        let mut col_idx = Vec::new();
        for &len in lengths {
            col_idx.extend(0..len);
            row_ptr.push(col_idx.len());
        }
        let n_cols = lengths.iter().copied().max().unwrap_or(0).max(1);
        let values = vec![1.0; col_idx.len()];
        SparseMatrixCSR::new(lengths.len(), n_cols, row_ptr, col_idx, values)
    }

    #[test]
    fn test_single_partition() {
        let csr = csr_from_row_lengths(&[2, 1, 2]);
        let stripes = partition_rows(&csr, 1);
        assert_eq!(
            stripes,
            vec![Stripe { row_begin: 0, row_end: 3, val_begin: 0, val_end: 5 }]
        );
    }

    #[test]
    fn test_even_rows() {
        let csr = csr_from_row_lengths(&[2, 2, 2, 2]);
        let stripes = partition_rows(&csr, 2);
        assert_eq!(stripes[0], Stripe { row_begin: 0, row_end: 2, val_begin: 0, val_end: 4 });
        assert_eq!(stripes[1], Stripe { row_begin: 2, row_end: 4, val_begin: 4, val_end: 8 });
    }

    #[test]
    fn test_heavy_row_overshoots_chunk() {
        // chunk = 10 / 3 = 3; row 0 alone already exceeds it
        let csr = csr_from_row_lengths(&[6, 1, 1, 1, 1]);
        let stripes = partition_rows(&csr, 3);
        assert_eq!(stripes[0].rows(), 0..1);
        assert_eq!(stripes[0].nnz(), 6);
        assert_eq!(stripes[1].rows(), 1..4);
        assert_eq!(stripes[2].rows(), 4..5);
        assert!(stripes_cover(&stripes, 5, 10));
    }

    #[test]
    fn test_more_partitions_than_rows() {
        let csr = csr_from_row_lengths(&[3, 3]);
        let stripes = partition_rows(&csr, 5);
        assert_eq!(stripes.len(), 5);
        assert!(stripes_cover(&stripes, 2, 6));
        assert_eq!(stripes.iter().filter(|s| s.is_empty()).count(), 3);
    }

    #[test]
    fn test_empty_matrix() {
        let csr = SparseMatrixCSR::<f64>::zeros(3, 3);
        let stripes = partition_rows(&csr, 3);
        assert_eq!(stripes.len(), 3);
        // Zero chunk size: nothing is consumed until the last stripe
        assert_eq!(stripes[0], Stripe::default());
        assert_eq!(stripes[1], Stripe::default());
        assert_eq!(stripes[2], Stripe { row_begin: 0, row_end: 3, val_begin: 0, val_end: 0 });
    }

    #[test]
    fn test_stripes_cover_detects_gap() {
        let stripes = [
            Stripe { row_begin: 0, row_end: 1, val_begin: 0, val_end: 2 },
            Stripe { row_begin: 2, row_end: 3, val_begin: 2, val_end: 4 },
        ];
        assert!(!stripes_cover(&stripes, 3, 4));
        assert!(!stripes_cover(&[], 0, 0));
    }

    #[test]
    #[should_panic(expected = "n_partitions must be at least 1")]
    fn test_zero_partitions() {
        let csr = csr_from_row_lengths(&[1]);
        partition_rows(&csr, 0);
    }

    #[test]
    fn test_display() {
        let s = Stripe { row_begin: 1, row_end: 4, val_begin: 3, val_end: 9 };
        assert_eq!(s.to_string(), "rows [1, 4) vals [3, 9)");
    }
}
