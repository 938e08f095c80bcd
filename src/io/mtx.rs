use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::ReadError;

/// Parse MatrixMarket-like coordinate text.
///
/// Leading lines starting with `%` are headers and comments. The first
/// data line declares `rows cols` (a trailing entry count is tolerated
/// and ignored). Every following non-blank line is a 1-based
/// `row col value` triplet; entries not listed stay zero.
pub(crate) fn parse<T>(input: &str) -> Result<Matrix<T>, ReadError>
where
    T: FloatScalar + core::str::FromStr,
{
    let mut lines = input.lines().enumerate();

    // Skip the banner and comments.
    let (dim_idx, dim_line) = loop {
        match lines.next() {
            Some((idx, line)) => {
                if line.trim().is_empty() || line.trim_start().starts_with('%') {
                    continue;
                }
                break (idx, line);
            }
            None => return Err(ReadError::Empty),
        }
    };
    let dim_no = dim_idx + 1;

    let fields: Vec<&str> = dim_line.split_whitespace().collect();
    if fields.len() < 2 || fields.len() > 3 {
        return Err(ReadError::ShapeMismatch {
            line: dim_no,
            expected: 2,
            got: fields.len(),
        });
    }
    let nrows: usize = fields[0]
        .parse()
        .map_err(|_| ReadError::Parse { line: dim_no })?;
    let ncols: usize = fields[1]
        .parse()
        .map_err(|_| ReadError::Parse { line: dim_no })?;
    if nrows == 0 || ncols == 0 {
        return Err(ReadError::Empty);
    }

    let mut matrix = Matrix::zeros(nrows, ncols);

    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(ReadError::ShapeMismatch {
                line: line_no,
                expected: 3,
                got: fields.len(),
            });
        }

        let row: usize = fields[0]
            .parse()
            .map_err(|_| ReadError::Parse { line: line_no })?;
        let col: usize = fields[1]
            .parse()
            .map_err(|_| ReadError::Parse { line: line_no })?;
        let value: T = fields[2]
            .parse()
            .map_err(|_| ReadError::Parse { line: line_no })?;

        // 1-based coordinates
        if row == 0 || col == 0 || row > nrows || col > ncols {
            return Err(ReadError::OutOfRange { line: line_no });
        }
        matrix[(row - 1, col - 1)] = value;
    }

    Ok(matrix)
}
