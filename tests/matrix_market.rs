//! Reading and writing Matrix Market files on disk

use std::fs;
use stripes::{MatrixMarketError, MatrixMarketIO, SparseStorage, StorageFormat, TripletMatrix};
use tempfile::tempdir;

const SYMMETRIC_PATTERN: &str = "\
%%MatrixMarket matrix coordinate pattern symmetric
% lower triangle of a 4 x 4 path graph plus its diagonal
4 4 7
1 1
2 1
2 2
3 2
3 3
% comments may sit between entries
4 3
4 4
";

#[test]
fn test_write_then_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("example.mtx");

    let mut m = TripletMatrix::new(3, 4);
    m.add(2, 3, -1.5f64);
    m.add(0, 0, 2.0);
    m.add(1, 2, 0.25);

    MatrixMarketIO::write_matrix(&path, &m).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("%%MatrixMarket matrix coordinate real general\n3 4 3\n"));

    let back: TripletMatrix<f64> = MatrixMarketIO::read_matrix(&path).unwrap();
    assert_eq!((back.n_rows, back.n_cols), (3, 4));
    assert_eq!(back.triples(), m.triples());
    assert_eq!(back.to_csr(), m.to_csr());
}

#[test]
fn test_symmetric_pattern_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("path4.mtx");
    fs::write(&path, SYMMETRIC_PATTERN).unwrap();

    let m: TripletMatrix<f64> = MatrixMarketIO::read_matrix(&path).unwrap();
    assert!(m.is_symmetric());
    assert_eq!(m.nnz(), 10);
    assert!(m.has_full_diagonal());
    assert_eq!(m.lower_split().nnz(), m.upper_split().nnz());

    let csr = m.to_csr();
    assert_eq!(csr.row_ptr, vec![0, 2, 5, 8, 10]);
    assert_eq!(csr.col_idx, vec![0, 1, 0, 1, 2, 1, 2, 3, 2, 3]);
    assert!(csr.values.iter().all(|&v| v == 1.0));

    // Symmetric input gives a CSC that mirrors the CSR
    let csc = m.to_csc();
    assert_eq!(csc.col_ptr, csr.row_ptr);
    assert_eq!(csc.row_idx, csr.col_idx);
}

#[test]
fn test_read_as_f32() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ints.mtx");
    fs::write(
        &path,
        "%%MatrixMarket matrix coordinate integer general\n2 2 2\n1 2 7\n2 1 -3\n",
    )
    .unwrap();

    let m: TripletMatrix<f32> = MatrixMarketIO::read_matrix(&path).unwrap();
    match SparseStorage::convert(&m, StorageFormat::Coo) {
        SparseStorage::Coo(coo) => assert_eq!(coo.values, vec![7.0f32, -3.0]),
        other => panic!("expected COO, got {}", other.format()),
    }
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does_not_exist.mtx");

    let err = MatrixMarketIO::read_matrix::<f64, _>(&path).unwrap_err();
    match &err {
        MatrixMarketError::Io { path: p, .. } => assert_eq!(p, &path),
        other => panic!("expected Io error, got {:?}", other),
    }
    assert!(err.to_string().contains("does_not_exist.mtx"));
}

#[test]
fn test_truncated_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.mtx");
    fs::write(&path, "3 3 3\n1 1 1.0\n2 2 2.0\n").unwrap();

    let err = MatrixMarketIO::read_matrix::<f64, _>(&path).unwrap_err();
    assert!(matches!(
        err,
        MatrixMarketError::MissingEntries {
            expected: 3,
            found: 2
        }
    ));
}
