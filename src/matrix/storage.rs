//! Closed set of storage layouts and the shared dump helpers

use num_traits::Num;
use std::fmt;
use std::str::FromStr;

use crate::matrix::{SparseMatrixCOO, SparseMatrixCSC, SparseMatrixCSR, TripletMatrix};

/// The storage layouts a triplet matrix can be converted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageFormat {
    Coo,
    Csr,
    Csc,
}

impl StorageFormat {
    pub const ALL: [StorageFormat; 3] = [StorageFormat::Coo, StorageFormat::Csr, StorageFormat::Csc];

    pub fn name(&self) -> &'static str {
        match self {
            StorageFormat::Coo => "COO",
            StorageFormat::Csr => "CSR",
            StorageFormat::Csc => "CSC",
        }
    }

    /// Parses a format selection: one format name, or `all` for every layout
    pub fn parse_selection(s: &str) -> Result<Vec<StorageFormat>, String> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::ALL.to_vec())
        } else {
            Ok(vec![s.parse()?])
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coo" => Ok(StorageFormat::Coo),
            "csr" => Ok(StorageFormat::Csr),
            "csc" => Ok(StorageFormat::Csc),
            other => Err(format!("unknown storage format '{}'", other)),
        }
    }
}

/// A converted matrix in one of the three layouts
#[derive(Debug, Clone)]
pub enum SparseStorage<T> {
    Coo(SparseMatrixCOO<T>),
    Csr(SparseMatrixCSR<T>),
    Csc(SparseMatrixCSC<T>),
}

impl<T> SparseStorage<T>
where
    T: Copy + Num,
{
    /// Converts `matrix` into the requested layout
    pub fn convert(matrix: &TripletMatrix<T>, format: StorageFormat) -> Self {
        match format {
            StorageFormat::Coo => SparseStorage::Coo(matrix.to_coo()),
            StorageFormat::Csr => SparseStorage::Csr(matrix.to_csr()),
            StorageFormat::Csc => SparseStorage::Csc(matrix.to_csc()),
        }
    }

    pub fn format(&self) -> StorageFormat {
        match self {
            SparseStorage::Coo(_) => StorageFormat::Coo,
            SparseStorage::Csr(_) => StorageFormat::Csr,
            SparseStorage::Csc(_) => StorageFormat::Csc,
        }
    }

    /// `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        match self {
            SparseStorage::Coo(m) => (m.n_rows, m.n_cols),
            SparseStorage::Csr(m) => (m.n_rows, m.n_cols),
            SparseStorage::Csc(m) => (m.n_rows, m.n_cols),
        }
    }

    pub fn nnz(&self) -> usize {
        match self {
            SparseStorage::Coo(m) => m.nnz(),
            SparseStorage::Csr(m) => m.nnz(),
            SparseStorage::Csc(m) => m.nnz(),
        }
    }

    pub fn as_csr(&self) -> Option<&SparseMatrixCSR<T>> {
        match self {
            SparseStorage::Csr(m) => Some(m),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for SparseStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SparseStorage::Coo(m) => fmt::Display::fmt(m, f),
            SparseStorage::Csr(m) => fmt::Display::fmt(m, f),
            SparseStorage::Csc(m) => fmt::Display::fmt(m, f),
        }
    }
}

/// Writes one buffer as `type name[len] = {a, b, c};`
pub(crate) fn write_buffer<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    type_name: &str,
    name: &str,
    buffer: &[V],
) -> fmt::Result {
    write!(f, "{} {}[{}] = {{", type_name, name, buffer.len())?;
    for (i, v) in buffer.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    writeln!(f, "}};")
}

pub(crate) fn pointers_are_monotone(ptr: &[usize]) -> bool {
    ptr.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> TripletMatrix<f64> {
        let mut m = TripletMatrix::new(3, 4);
        m.add(2, 3, 1.0);
        m.add(0, 1, 2.0);
        m
    }

    #[test]
    fn test_convert_dispatch() {
        let m = example();
        for format in StorageFormat::ALL {
            let storage = SparseStorage::convert(&m, format);
            assert_eq!(storage.format(), format);
            assert_eq!(storage.shape(), (3, 4));
            assert_eq!(storage.nnz(), 2);
        }
        assert!(SparseStorage::convert(&m, StorageFormat::Csr).as_csr().is_some());
        assert!(SparseStorage::convert(&m, StorageFormat::Coo).as_csr().is_none());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSR".parse::<StorageFormat>(), Ok(StorageFormat::Csr));
        assert_eq!("coo".parse::<StorageFormat>(), Ok(StorageFormat::Coo));
        assert!("dense".parse::<StorageFormat>().is_err());
    }

    #[test]
    fn test_format_selection_ignores_case() {
        assert_eq!(StorageFormat::parse_selection("all"), Ok(StorageFormat::ALL.to_vec()));
        assert_eq!(StorageFormat::parse_selection("ALL"), Ok(StorageFormat::ALL.to_vec()));
        assert_eq!(StorageFormat::parse_selection("Csc"), Ok(vec![StorageFormat::Csc]));
        assert!(StorageFormat::parse_selection("every").is_err());
    }

    #[test]
    fn test_display_delegates() {
        let storage = SparseStorage::convert(&example(), StorageFormat::Csc);
        assert!(storage.to_string().starts_with("// CSC 3 x 4, nnz = 2"));
        assert!(storage.to_string().contains("usize col_ptr[5] = {0, 0, 1, 1, 2};"));
    }

    #[test]
    fn test_monotone_pointers() {
        assert!(pointers_are_monotone(&[0, 0, 2, 5]));
        assert!(!pointers_are_monotone(&[0, 3, 2]));
        assert!(pointers_are_monotone(&[0]));
    }
}
