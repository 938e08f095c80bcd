use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::ReadError;

/// Parse whitespace-delimited rows. Blank lines are skipped; every
/// non-blank row must carry the same number of fields as the first.
pub(crate) fn parse<T>(input: &str) -> Result<Matrix<T>, ReadError>
where
    T: FloatScalar + core::str::FromStr,
{
    let mut values: Vec<T> = Vec::new();
    let mut ncols = 0usize;
    let mut nrows = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = 0usize;
        for field in line.split_whitespace() {
            let value: T = field
                .parse()
                .map_err(|_| ReadError::Parse { line: line_no })?;
            values.push(value);
            fields += 1;
        }
        if nrows == 0 {
            ncols = fields;
        } else if fields != ncols {
            return Err(ReadError::ShapeMismatch {
                line: line_no,
                expected: ncols,
                got: fields,
            });
        }
        nrows += 1;
    }

    if nrows == 0 {
        return Err(ReadError::Empty);
    }

    Ok(Matrix::from_rows(nrows, ncols, &values))
}
