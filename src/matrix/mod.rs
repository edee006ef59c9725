// Matrix data structures and operations

pub mod config;
pub mod conversion;
pub mod coo;
pub mod csc;
pub mod csr;
pub mod partition;
pub mod stats;
pub mod storage;
pub mod triplet;

pub use config::{StripesConfig, ValueType};
pub use coo::SparseMatrixCOO;
pub use csc::SparseMatrixCSC;
pub use csr::SparseMatrixCSR;
pub use partition::{partition_rows, stripes_cover, Stripe};
pub use stats::RowStats;
pub use storage::{SparseStorage, StorageFormat};
pub use triplet::{Triple, TripletMatrix};
