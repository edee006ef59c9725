//! Dense views of sparse matrices, for inspection and testing

use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR, TripletMatrix};
use ndarray::Array2;
use num_traits::Num;

/// Scatters the triples into a dense array
///
/// Entries are written, not summed: when a coordinate repeats, the last
/// triple in insertion order wins.
pub fn triplets_to_dense<T>(matrix: &TripletMatrix<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::zeros((matrix.n_rows, matrix.n_cols));
    for t in matrix.iter() {
        dense[[t.row, t.col]] = t.value;
    }
    dense
}

pub fn csr_to_dense<T>(matrix: &SparseMatrixCSR<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::zeros((matrix.n_rows, matrix.n_cols));
    for i in 0..matrix.n_rows {
        for (j, &val) in matrix.row_iter(i) {
            dense[[i, j]] = val;
        }
    }
    dense
}

pub fn csc_to_dense<T>(matrix: &SparseMatrixCSC<T>) -> Array2<T>
where
    T: Copy + Num,
{
    let mut dense = Array2::zeros((matrix.n_rows, matrix.n_cols));
    for j in 0..matrix.n_cols {
        for (i, &val) in matrix.col_iter(j) {
            dense[[i, j]] = val;
        }
    }
    dense
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dense_views_agree() {
        let mut m = TripletMatrix::new(2, 3);
        m.add(1, 2, 6.0f64);
        m.add(0, 0, 1.0);
        m.add(1, 0, 4.0);

        let expected = array![[1.0, 0.0, 0.0], [4.0, 0.0, 6.0]];
        assert_eq!(triplets_to_dense(&m), expected);
        assert_eq!(csr_to_dense(&m.to_csr()), expected);
        assert_eq!(csc_to_dense(&m.to_csc()), expected);
    }
}
