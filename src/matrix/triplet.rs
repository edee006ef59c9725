//! Triplet (row, column, value) matrix: the unordered input to every conversion

use num_traits::Num;
use std::fmt;

/// A single nonzero entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triple<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> Triple<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Self { row, col, value }
    }

    /// True for entries on the main diagonal
    pub fn is_diagonal(&self) -> bool {
        self.row == self.col
    }
}

/// An append-only bag of triples with a fixed shape
///
/// The number of nonzeros is always the number of stored triples; there is
/// no separate counter that could drift. The `symmetric` flag only records
/// what the source declared. Mirroring the off-diagonal entries of a
/// symmetric source is the reader's job, so by the time a matrix reaches the
/// converters it holds every entry explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct TripletMatrix<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    symmetric: bool,
    triples: Vec<Triple<T>>,
}

impl<T> TripletMatrix<T>
where
    T: Copy + Num,
{
    /// Creates an empty, non-symmetric matrix of the given shape
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self::with_symmetry(n_rows, n_cols, false)
    }

    /// Creates an empty matrix and records whether its source declared symmetry
    pub fn with_symmetry(n_rows: usize, n_cols: usize, symmetric: bool) -> Self {
        Self {
            n_rows,
            n_cols,
            symmetric,
            triples: Vec::new(),
        }
    }

    /// Creates an empty matrix with room for `capacity` triples
    pub fn with_capacity(n_rows: usize, n_cols: usize, capacity: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            symmetric: false,
            triples: Vec::with_capacity(capacity),
        }
    }

    /// Appends a triple. Indices are not checked against the shape.
    pub fn add(&mut self, row: usize, col: usize, value: T) {
        self.triples.push(Triple::new(row, col, value));
    }

    /// Returns the number of stored triples
    pub fn nnz(&self) -> usize {
        self.triples.len()
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    pub fn is_square(&self) -> bool {
        self.n_rows == self.n_cols
    }

    /// The stored triples, in insertion order
    pub fn triples(&self) -> &[Triple<T>] {
        &self.triples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple<T>> {
        self.triples.iter()
    }

    /// Checks that every diagonal position holds a nonzero entry
    ///
    /// Returns false for non-square matrices, when any diagonal index is
    /// missing, or when any diagonal triple carries a zero value. The order
    /// of the triples does not matter.
    pub fn has_full_diagonal(&self) -> bool {
        if !self.is_square() {
            return false;
        }

        let mut seen = vec![false; self.n_rows];
        for t in self.triples.iter().filter(|t| t.is_diagonal()) {
            if t.value.is_zero() {
                return false;
            }
            if t.row < self.n_rows {
                seen[t.row] = true;
            }
        }

        seen.into_iter().all(|s| s)
    }

    /// Returns the number of diagonal triples
    pub fn diagonal_nnz(&self) -> usize {
        self.triples.iter().filter(|t| t.is_diagonal()).count()
    }

    /// Lower triangle including the diagonal (`row >= col`)
    pub fn lower_split(&self) -> Self {
        self.filtered(|t| t.row >= t.col)
    }

    /// Upper triangle including the diagonal (`row <= col`)
    pub fn upper_split(&self) -> Self {
        self.filtered(|t| t.row <= t.col)
    }

    // A triangle of a symmetric matrix is not itself symmetric, so the
    // split is always flagged general.
    fn filtered<F>(&self, keep: F) -> Self
    where
        F: Fn(&Triple<T>) -> bool,
    {
        let triples: Vec<_> = self.triples.iter().copied().filter(|t| keep(t)).collect();
        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            symmetric: false,
            triples,
        }
    }
}

impl<T> Extend<(usize, usize, T)> for TripletMatrix<T>
where
    T: Copy + Num,
{
    fn extend<I: IntoIterator<Item = (usize, usize, T)>>(&mut self, iter: I) {
        for (row, col, value) in iter {
            self.add(row, col, value);
        }
    }
}

/// Zero-based dump: a `N M NZ` header followed by one `row col value` line
/// per triple in storage order.
impl<T: fmt::Display> fmt::Display for TripletMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.n_rows, self.n_cols, self.triples.len())?;
        for t in &self.triples {
            writeln!(f, "{} {} {}", t.row, t.col, t.value)?;
        }
        Ok(())
    }
}
