//! # Parallel stripe dispatch
//!
//! Hands the stripes of a partitioned CSR matrix to Rayon workers. Each
//! worker receives a [`CsrStripeView`] borrowing only its own row range of
//! `row_ptr` and its own slice of `col_idx` and `values`; since stripes do not
//! overlap, no locking is needed. Combining per-stripe results is up to the
//! caller.

use num_traits::Num;
use rayon::prelude::*;

use crate::matrix::{SparseMatrixCSR, Stripe};

/// Read-only view of one stripe of a CSR matrix
#[derive(Debug, Clone, Copy)]
pub struct CsrStripeView<'a, T> {
    /// The stripe this view covers
    pub stripe: Stripe,

    /// `row_ptr[row_begin..=row_end]`; offsets are global
    pub row_ptr: &'a [usize],

    /// `col_idx[val_begin..val_end]`
    pub col_idx: &'a [usize],

    /// `values[val_begin..val_end]`
    pub values: &'a [T],
}

impl<'a, T> CsrStripeView<'a, T> {
    /// Global row indices covered by this view
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.stripe.rows()
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Entries of global row `row` as `(col, value)`
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the stripe.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        assert!(
            self.stripe.rows().contains(&row),
            "Row {} outside stripe {}",
            row,
            self.stripe
        );

        let local = row - self.stripe.row_begin;
        let start = self.row_ptr[local] - self.stripe.val_begin;
        let end = self.row_ptr[local + 1] - self.stripe.val_begin;

        let col_idx: &'a [usize] = self.col_idx;
        let values: &'a [T] = self.values;
        col_idx[start..end]
            .iter()
            .zip(&values[start..end])
            .map(|(&col, val)| (col, val))
    }
}

/// Builds one view per stripe, in stripe order
///
/// # Panics
///
/// Panics if a stripe reaches past the end of the matrix.
pub fn stripe_views<'a, T>(
    matrix: &'a SparseMatrixCSR<T>,
    stripes: &[Stripe],
) -> Vec<CsrStripeView<'a, T>>
where
    T: Copy + Num,
{
    stripes
        .iter()
        .map(|&stripe| {
            debug_assert_eq!(matrix.row_ptr[stripe.row_begin], stripe.val_begin);
            debug_assert_eq!(matrix.row_ptr[stripe.row_end], stripe.val_end);
            CsrStripeView {
                stripe,
                row_ptr: &matrix.row_ptr[stripe.row_begin..=stripe.row_end],
                col_idx: &matrix.col_idx[stripe.vals()],
                values: &matrix.values[stripe.vals()],
            }
        })
        .collect()
}

/// Runs `f` on every stripe in parallel and returns the results in stripe
/// order
///
/// # Examples
///
/// ```
/// use stripes::{TripletMatrix, map_stripes, partition_rows};
///
/// let mut m = TripletMatrix::new(4, 4);
/// for i in 0..4 {
///     m.add(i, i, 1.0f64);
/// }
/// let csr = m.to_csr();
/// let stripes = partition_rows(&csr, 2);
///
/// let counts = map_stripes(&csr, &stripes, |view| view.nnz());
/// assert_eq!(counts, vec![2, 2]);
/// ```
pub fn map_stripes<T, R, F>(matrix: &SparseMatrixCSR<T>, stripes: &[Stripe], f: F) -> Vec<R>
where
    T: Copy + Num + Sync,
    R: Send,
    F: Fn(CsrStripeView<'_, T>) -> R + Sync + Send,
{
    stripe_views(matrix, stripes)
        .into_par_iter()
        .map(|view| f(view))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{partition_rows, TripletMatrix};

    fn example() -> SparseMatrixCSR<f64> {
        //    [1 0 2 0]
        //    [0 0 0 0]
        //    [3 4 5 0]
        //    [0 0 0 6]
        let mut m = TripletMatrix::new(4, 4);
        m.add(0, 0, 1.0);
        m.add(0, 2, 2.0);
        m.add(2, 0, 3.0);
        m.add(2, 1, 4.0);
        m.add(2, 2, 5.0);
        m.add(3, 3, 6.0);
        m.to_csr()
    }

    #[test]
    fn test_views_slice_their_stripe() {
        let csr = example();
        let stripes = partition_rows(&csr, 2);
        let views = stripe_views(&csr, &stripes);

        assert_eq!(views.len(), 2);
        assert_eq!(views.iter().map(|v| v.nnz()).sum::<usize>(), csr.nnz());

        for view in &views {
            for row in view.rows() {
                let expected: Vec<_> = csr.row_iter(row).collect();
                let actual: Vec<_> = view.row_iter(row).collect();
                assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn test_map_stripes_preserves_order() {
        let csr = example();
        let stripes = partition_rows(&csr, 3);
        let firsts = map_stripes(&csr, &stripes, |view| view.stripe.row_begin);
        let expected: Vec<_> = stripes.iter().map(|s| s.row_begin).collect();
        assert_eq!(firsts, expected);
    }

    #[test]
    fn test_map_stripes_row_sums() {
        let csr = example();
        let stripes = partition_rows(&csr, 4);
        let partial: Vec<f64> = map_stripes(&csr, &stripes, |view| view.values.iter().sum());
        assert_eq!(partial.iter().sum::<f64>(), 21.0);
    }

    #[test]
    #[should_panic(expected = "outside stripe")]
    fn test_row_outside_view() {
        let csr = example();
        let stripes = partition_rows(&csr, 2);
        let views = stripe_views(&csr, &stripes);
        let _ = views[0].row_iter(3).count();
    }
}
