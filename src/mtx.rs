//! Matrix Market coordinate format reader/writer
//!
//! The reader produces a [`TripletMatrix`] ready for conversion: indices are
//! shifted to zero-based, pattern entries get the value one, and for
//! matrices declared symmetric the mirrored entry is inserted next to every
//! off-diagonal entry. Anything the converters cannot process (dense
//! `array` files, complex values, skew-symmetric or hermitian storage) is
//! rejected here.

use log::{debug, info};
use num_traits::{Num, NumCast};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{MatrixMarketError, Result};
use crate::matrix::TripletMatrix;

const BANNER: &str = "%%matrixmarket";

/// Upper bound on entries reserved up front; the size line is untrusted, so
/// larger files grow the buffer as entries arrive
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 20;

/// Value field declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Real,
    Integer,
    /// No value column; every entry is one
    Pattern,
}

/// Storage scheme declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    General,
    /// Only one triangle is stored
    Symmetric,
}

/// The parts of a `%%MatrixMarket matrix coordinate <field> <symmetry>`
/// banner that affect reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub field: Field,
    pub symmetry: Symmetry,
}

impl Default for Banner {
    /// What a file without a banner line is read as
    fn default() -> Self {
        Self {
            field: Field::Real,
            symmetry: Symmetry::General,
        }
    }
}

impl Banner {
    /// Parses a banner line. Keywords are case insensitive.
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<String> = line.split_whitespace().map(|t| t.to_ascii_lowercase()).collect();

        if tokens.len() != 5 || tokens[0] != BANNER {
            return Err(MatrixMarketError::MalformedBanner(line.trim().to_string()));
        }

        if tokens[1] != "matrix" {
            return Err(MatrixMarketError::Unsupported(format!(
                "object '{}' is not a matrix",
                tokens[1]
            )));
        }

        match tokens[2].as_str() {
            "coordinate" => {}
            "array" => {
                return Err(MatrixMarketError::Unsupported(
                    "only sparse matrices in coordinate format are handled".to_string(),
                ))
            }
            other => {
                return Err(MatrixMarketError::MalformedBanner(format!(
                    "unknown format '{}'",
                    other
                )))
            }
        }

        let field = match tokens[3].as_str() {
            "real" | "double" => Field::Real,
            "integer" => Field::Integer,
            "pattern" => Field::Pattern,
            "complex" => {
                return Err(MatrixMarketError::Unsupported(
                    "complex matrices are not handled".to_string(),
                ))
            }
            other => {
                return Err(MatrixMarketError::MalformedBanner(format!(
                    "unknown field '{}'",
                    other
                )))
            }
        };

        let symmetry = match tokens[4].as_str() {
            "general" => Symmetry::General,
            "symmetric" => Symmetry::Symmetric,
            "skew-symmetric" | "hermitian" => {
                return Err(MatrixMarketError::Unsupported(format!(
                    "{} matrices are not handled",
                    tokens[4]
                )))
            }
            other => {
                return Err(MatrixMarketError::MalformedBanner(format!(
                    "unknown symmetry '{}'",
                    other
                )))
            }
        };

        Ok(Self { field, symmetry })
    }
}

/// Matrix Market format reader/writer
pub struct MatrixMarketIO;

impl MatrixMarketIO {
    /// Read a matrix in Matrix Market format
    pub fn read_matrix<T, P>(path: P) -> Result<TripletMatrix<T>>
    where
        T: Copy + Num + NumCast,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MatrixMarketError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let matrix = Self::parse(BufReader::new(file)).map_err(|e| match e {
            MatrixMarketError::Stream(source) => MatrixMarketError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        info!(
            "Loaded {}: {} x {}, {} entries{}",
            path.display(),
            matrix.n_rows,
            matrix.n_cols,
            matrix.nnz(),
            if matrix.is_symmetric() { " (symmetric, expanded)" } else { "" }
        );
        Ok(matrix)
    }

    /// Parse Matrix Market text from any buffered reader
    ///
    /// Values are read as `f64` and cast to `T`. A value `T` cannot hold,
    /// including a fractional value for an integer `T`, is a `ValueCast` error.
    pub fn parse<T, R>(reader: R) -> Result<TripletMatrix<T>>
    where
        T: Copy + Num + NumCast,
        R: BufRead,
    {
        let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));
        let mut banner = Banner::default();
        let mut size_line = None;

        // Banner (first line only), comments, then the size line
        for (line_no, line) in lines.by_ref() {
            let line = line?;
            let trimmed = line.trim();

            if line_no == 1 && trimmed.to_ascii_lowercase().starts_with(BANNER) {
                banner = Banner::parse(trimmed)?;
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            size_line = Some(line);
            break;
        }

        let size_line =
            size_line.ok_or_else(|| MatrixMarketError::MalformedSize("missing size line".to_string()))?;
        let (n_rows, n_cols, declared) = parse_size(&size_line)?;

        debug!(
            "Banner {:?}, size {} x {}, {} declared entries",
            banner, n_rows, n_cols, declared
        );

        let symmetric = banner.symmetry == Symmetry::Symmetric;
        if symmetric && n_rows != n_cols {
            return Err(MatrixMarketError::Unsupported(format!(
                "symmetric matrix must be square, got {} x {}",
                n_rows, n_cols
            )));
        }

        let reserved = declared.min(MAX_PREALLOCATED_ENTRIES);
        let capacity = if symmetric { 2 * reserved } else { reserved };
        let mut matrix = TripletMatrix::with_symmetry(n_rows, n_cols, symmetric);
        let mut triples = Vec::with_capacity(capacity);

        let mut found = 0;
        while found < declared {
            let Some((line_no, line)) = lines.next() else {
                break;
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }

            let (row, col, value) = parse_entry::<T>(trimmed, line_no, banner.field)?;

            if row == 0 || col == 0 || row > n_rows || col > n_cols {
                return Err(MatrixMarketError::IndexOutOfBounds {
                    line: line_no,
                    row,
                    col,
                    n_rows,
                    n_cols,
                });
            }

            // Adjust to zero index
            triples.push((row - 1, col - 1, value));
            if symmetric && row != col {
                triples.push((col - 1, row - 1, value));
            }
            found += 1;
        }

        if found < declared {
            return Err(MatrixMarketError::MissingEntries {
                expected: declared,
                found,
            });
        }

        matrix.extend(triples);
        Ok(matrix)
    }

    /// Write a matrix in Matrix Market format
    pub fn write_matrix<T, P>(path: P, matrix: &TripletMatrix<T>) -> Result<()>
    where
        T: Copy + Num + fmt::Display,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| MatrixMarketError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(&mut writer, matrix).map_err(|e| match e {
            MatrixMarketError::Stream(source) => io_err(source),
            other => other,
        })?;
        writer.flush().map_err(io_err)
    }

    /// Write one-based `coordinate real general` text; the triples are
    /// written as stored, so a symmetric source comes out expanded
    pub fn write_to<T, W>(writer: &mut W, matrix: &TripletMatrix<T>) -> Result<()>
    where
        T: Copy + Num + fmt::Display,
        W: Write,
    {
        writeln!(writer, "%%MatrixMarket matrix coordinate real general")?;
        writeln!(writer, "{} {} {}", matrix.n_rows, matrix.n_cols, matrix.nnz())?;

        for t in matrix.iter() {
            // Convert to 1-indexed
            writeln!(writer, "{} {} {}", t.row + 1, t.col + 1, t.value)?;
        }

        Ok(())
    }
}

fn parse_size(line: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(MatrixMarketError::MalformedSize(format!(
            "expected 'rows cols entries', got '{}'",
            line.trim()
        )));
    }

    let field = |s: &str, what: &str| {
        s.parse::<usize>()
            .map_err(|_| MatrixMarketError::MalformedSize(format!("invalid number of {}: '{}'", what, s)))
    };

    Ok((
        field(parts[0], "rows")?,
        field(parts[1], "columns")?,
        field(parts[2], "entries")?,
    ))
}

fn parse_entry<T>(line: &str, line_no: usize, field: Field) -> Result<(usize, usize, T)>
where
    T: Copy + Num + NumCast,
{
    let malformed = |reason: String| MatrixMarketError::MalformedEntry {
        line: line_no,
        reason,
    };

    let mut parts = line.split_whitespace();
    let mut index = |what: &str| -> Result<usize> {
        let token = parts
            .next()
            .ok_or_else(|| malformed(format!("missing {} index", what)))?;
        token
            .parse::<usize>()
            .map_err(|_| malformed(format!("invalid {} index '{}'", what, token)))
    };

    let row = index("row")?;
    let col = index("column")?;

    let value = match field {
        // Pattern matrices carry no value; entries are one
        Field::Pattern => T::one(),
        Field::Real | Field::Integer => {
            let token = parts
                .next()
                .ok_or_else(|| malformed("missing value".to_string()))?;
            let raw: f64 = token
                .parse()
                .map_err(|_| malformed(format!("invalid value '{}'", token)))?;
            let cast_error = MatrixMarketError::ValueCast {
                line: line_no,
                value: raw,
            };
            // NumCast truncates fractions into integer types
            if raw.fract() != 0.0 && is_integral::<T>() {
                return Err(cast_error);
            }
            <T as NumCast>::from(raw).ok_or(cast_error)?
        }
    };

    Ok((row, col, value))
}

/// True when `T` drops the fractional part of a cast value
fn is_integral<T>() -> bool
where
    T: Num + NumCast,
{
    <T as NumCast>::from(0.5f64).map_or(true, |half| half.is_zero())
}
