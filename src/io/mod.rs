//! Matrix construction from text formats.
//!
//! Three parsers produce a dense [`Matrix`] from text: comma-separated
//! rows, a MatrixMarket-like coordinate format, and whitespace-delimited
//! tables. The format is always chosen explicitly through
//! [`MatrixFormat`] — nothing is inferred from file extensions or content
//! sniffing.
//!
//! This module is a collaborator of the solvers, not a dependency: the
//! solver core accepts any correctly-shaped matrix regardless of origin,
//! and file-layer errors ([`ReadError`]) are never translated into solver
//! error kinds.
//!
//! ```
//! use spectris::io::{read_str, MatrixFormat};
//!
//! let m = read_str::<f64>("1.0, 2.0\n3.0, 4.0\n", MatrixFormat::Csv).unwrap();
//! assert_eq!(m.nrows(), 2);
//! assert_eq!(m[(1, 0)], 3.0);
//! ```

pub(crate) mod csv;
pub(crate) mod mtx;
pub(crate) mod txt;

use std::fs;
use std::path::Path;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

/// Input format for [`read_str`] / [`read_file`], selected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    /// Comma-separated rows, one matrix row per line.
    Csv,
    /// MatrixMarket-like coordinate text: `%` comment lines, a dimension
    /// line, then 1-based `row col value` triplets (unlisted entries are
    /// zero).
    MatrixMarket,
    /// Whitespace-delimited rows, one matrix row per line.
    Plain,
}

/// Errors from matrix file parsing.
///
/// I/O failures pass through untranslated; the remaining variants carry
/// the 1-based line number they were detected on.
#[derive(Debug)]
pub enum ReadError {
    /// Underlying I/O failure, reported as-is.
    Io(std::io::Error),
    /// The input contained no matrix entries.
    Empty,
    /// A numeric field failed to parse.
    Parse {
        /// 1-based line number.
        line: usize,
    },
    /// A row had a different number of fields than the first row, or the
    /// dimension line was malformed.
    ShapeMismatch {
        /// 1-based line number.
        line: usize,
        /// Fields expected (from the first row or the dimension line).
        expected: usize,
        /// Fields found.
        got: usize,
    },
    /// A coordinate entry pointed outside the declared dimensions.
    OutOfRange {
        /// 1-based line number.
        line: usize,
    },
}

impl core::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "i/o error: {}", e),
            ReadError::Empty => write!(f, "input contains no matrix entries"),
            ReadError::Parse { line } => {
                write!(f, "could not parse a numeric value on line {}", line)
            }
            ReadError::ShapeMismatch {
                line,
                expected,
                got,
            } => write!(
                f,
                "line {}: expected {} fields, found {}",
                line, expected, got
            ),
            ReadError::OutOfRange { line } => {
                write!(f, "line {}: entry coordinates outside declared dimensions", line)
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

/// Parse a matrix from in-memory text in the given format.
pub fn read_str<T>(input: &str, format: MatrixFormat) -> Result<Matrix<T>, ReadError>
where
    T: FloatScalar + core::str::FromStr,
{
    match format {
        MatrixFormat::Csv => csv::parse(input),
        MatrixFormat::MatrixMarket => mtx::parse(input),
        MatrixFormat::Plain => txt::parse(input),
    }
}

/// Read and parse a matrix file in the given format.
///
/// ```no_run
/// use spectris::io::{read_file, MatrixFormat};
///
/// let m = read_file::<f64>("matrices/system.csv", MatrixFormat::Csv).unwrap();
/// assert!(m.is_square());
/// ```
pub fn read_file<T>(path: impl AsRef<Path>, format: MatrixFormat) -> Result<Matrix<T>, ReadError>
where
    T: FloatScalar + core::str::FromStr,
{
    let text = fs::read_to_string(path)?;
    read_str(&text, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_file_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("spectris_io_round_trip.csv");
        std::fs::write(&path, "1.0,2.0\n3.0,4.0\n").unwrap();

        let m = read_file::<f64>(&path, MatrixFormat::Csv).unwrap();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 1)], 4.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_file::<f64>("/nonexistent/spectris.csv", MatrixFormat::Csv).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }

    #[test]
    fn format_is_explicit() {
        // The same text parses differently depending on the declared
        // format; nothing is sniffed.
        let text = "1 2\n3 4\n";
        let plain = read_str::<f64>(text, MatrixFormat::Plain).unwrap();
        assert_eq!(plain.nrows(), 2);
        assert_eq!(plain.ncols(), 2);

        // As MatrixMarket the first line declares a 1x2 matrix, making the
        // second line a malformed triplet.
        let mm = read_str::<f64>(text, MatrixFormat::MatrixMarket);
        assert!(matches!(mm, Err(ReadError::ShapeMismatch { line: 2, .. })));
    }
}
