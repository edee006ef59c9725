//! # stripes: sparse matrix layouts and row-stripe partitioning
//!
//! Builds the three classic sparse layouts from a list of coordinate
//! triples and splits CSR matrices into contiguous row stripes of roughly
//! equal nonzero count, so that parallel workers can each take one.
//!
//! ## Overview
//!
//! - [`TripletMatrix`]: unordered `(row, col, value)` triples with a shape,
//!   plus diagonal queries and lower/upper triangular splits
//! - [`SparseMatrixCOO`], [`SparseMatrixCSR`], [`SparseMatrixCSC`]: the
//!   layouts, built by stable sorting a private copy of the triples
//! - [`partition_rows`]: the greedy stripe partitioner
//! - [`map_stripes`]: runs a closure over every stripe with Rayon
//! - [`MatrixMarketIO`]: reads and writes Matrix Market coordinate files
//!
//! ## Usage
//!
//! ```
//! use stripes::{TripletMatrix, partition_rows};
//!
//! //    [1 0 2]
//! //    [0 3 0]
//! //    [4 0 5]
//! let mut m = TripletMatrix::new(3, 3);
//! m.add(2, 0, 4.0f64);
//! m.add(0, 0, 1.0);
//! m.add(2, 2, 5.0);
//! m.add(1, 1, 3.0);
//! m.add(0, 2, 2.0);
//!
//! let mut csr = m.to_csr();
//! assert_eq!(csr.row_ptr, vec![0, 2, 3, 5]);
//! assert_eq!(csr.col_idx, vec![0, 2, 1, 0, 2]);
//!
//! let stripes = partition_rows(&csr, 2);
//! assert_eq!(stripes[0].rows(), 0..1);
//! assert_eq!(stripes[1].vals(), 2..5);
//!
//! // Or cache them on the matrix
//! assert_eq!(csr.partition(2), &stripes[..]);
//! ```

pub mod error;
pub mod matrix;
pub mod mtx;
pub mod parallel;
pub mod utils;

// Re-export the main components
pub use error::{MatrixMarketError, Result};
pub use matrix::{
    partition_rows, stripes_cover, RowStats, SparseMatrixCOO, SparseMatrixCSC, SparseMatrixCSR,
    SparseStorage, StorageFormat, Stripe, StripesConfig, Triple, TripletMatrix, ValueType,
};
pub use mtx::MatrixMarketIO;
pub use parallel::{map_stripes, stripe_views, CsrStripeView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
