//! Row-structure statistics of a CSR matrix
//!
//! Only the index structure is inspected: row lengths and the gaps between
//! consecutive column indices inside a row. Values are never read.

use num_traits::Num;
use std::fmt;

use crate::matrix::{partition_rows, SparseMatrixCSR};
use crate::parallel::map_stripes;

/// Summary of how nonzeros are spread over the rows
#[derive(Debug, Clone, PartialEq)]
pub struct RowStats {
    pub n_rows: usize,
    pub n_cols: usize,
    pub nnz: usize,
    /// nnz / n_rows
    pub mean_row_length: f64,
    pub max_row_length: usize,
    /// Per non-empty row, the summed column gaps divided by the row length,
    /// averaged over all rows
    pub mean_disparity: f64,
    /// Population standard deviation of the row lengths
    pub row_length_std_dev: f64,
}

#[derive(Default)]
struct Partial {
    max_row_length: usize,
    sum_sq_diff: f64,
    disparity: f64,
}

impl RowStats {
    /// Collects statistics, splitting the rows into `n_partitions` stripes
    /// that are processed in parallel
    pub fn collect<T>(matrix: &SparseMatrixCSR<T>, n_partitions: usize) -> Self
    where
        T: Copy + Num + Sync,
    {
        let n_rows = matrix.n_rows;
        let nnz = matrix.nnz();

        if n_rows == 0 {
            return Self {
                n_rows,
                n_cols: matrix.n_cols,
                nnz,
                mean_row_length: 0.0,
                max_row_length: 0,
                mean_disparity: 0.0,
                row_length_std_dev: 0.0,
            };
        }

        let mean = nnz as f64 / n_rows as f64;
        let stripes = partition_rows(matrix, n_partitions.max(1));

        let partials = map_stripes(matrix, &stripes, |view| {
            let mut p = Partial::default();
            let base = view.stripe.val_begin;
            for bounds in view.row_ptr.windows(2) {
                let cols = &view.col_idx[bounds[0] - base..bounds[1] - base];
                let length = cols.len();

                p.max_row_length = p.max_row_length.max(length);
                let diff = length as f64 - mean;
                p.sum_sq_diff += diff * diff;

                if length > 0 {
                    let gaps: usize = cols.windows(2).map(|w| w[1] - w[0]).sum();
                    p.disparity += gaps as f64 / length as f64;
                }
            }
            p
        });

        let total = partials.into_iter().fold(Partial::default(), |acc, p| Partial {
            max_row_length: acc.max_row_length.max(p.max_row_length),
            sum_sq_diff: acc.sum_sq_diff + p.sum_sq_diff,
            disparity: acc.disparity + p.disparity,
        });

        Self {
            n_rows,
            n_cols: matrix.n_cols,
            nnz,
            mean_row_length: mean,
            max_row_length: total.max_row_length,
            mean_disparity: total.disparity / n_rows as f64,
            row_length_std_dev: (total.sum_sq_diff / n_rows as f64).sqrt(),
        }
    }
}

/// One line: `N M NZ mean max disparity stddev`
impl fmt::Display for RowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:.5} {} {:.5} {:.5}",
            self.n_rows,
            self.n_cols,
            self.nnz,
            self.mean_row_length,
            self.max_row_length,
            self.mean_disparity,
            self.row_length_std_dev
        )
    }
}
