pub(crate) mod lu;
pub(crate) mod qr;

pub use lu::Lu;
pub use qr::Qr;

/// Errors from matrix and decomposition operations.
///
/// Returned by [`crate::Matrix::mul_vec`], [`crate::Matrix::solve`], and the
/// decomposition constructors.
///
/// ```
/// use spectris::Matrix;
/// use spectris::linalg::LinalgError;
///
/// let singular = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(singular.lu().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand dimensions are inconsistent (non-square matrix where a square
    /// one is required, or a vector of the wrong length).
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },
    /// Matrix is singular or nearly singular: the largest available pivot
    /// fell below machine epsilon scaled by the matrix's largest entry.
    Singular,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, got)
            }
            LinalgError::Singular => write!(f, "matrix is singular"),
        }
    }
}
