use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::ReadError;

/// Parse comma-separated rows. Every row must carry the same number of
/// fields as the first; fields are trimmed before parsing.
pub(crate) fn parse<T>(input: &str) -> Result<Matrix<T>, ReadError>
where
    T: FloatScalar + core::str::FromStr,
{
    let mut values: Vec<T> = Vec::new();
    let mut ncols = 0usize;
    let mut nrows = 0usize;

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let mut fields = 0usize;
        for field in line.split(',') {
            let value: T = field
                .trim()
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

    if nrows == 0 || ncols == 0 {
        return Err(ReadError::Empty);
    }

    Ok(Matrix::from_rows(nrows, ncols, &values))
}
