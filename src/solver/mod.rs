//! Eigenvalue solvers.
//!
//! Three iterative algorithms behind one contract ([`EigenSolver`]):
//!
//! - [`PowerMethod`] — dominant eigenpair via repeated multiplication and
//!   normalization.
//! - [`InversePowerMethod`] — eigenpair nearest a shift via repeated
//!   linear-system solves against a single up-front factorization.
//! - [`QrMethod`] — the full real spectrum via shifted QR iteration with
//!   deflation, on a working copy of the input.
//!
//! The concrete solver is injected at the call site; there is no registry
//! and no dispatch by matrix inspection:
//!
//! ```
//! use spectris::{Matrix, SolverConfig};
//! use spectris::solver::{EigenSolver, InversePowerMethod, PowerMethod};
//!
//! let a = Matrix::from_rows(2, 2, &[4.0_f64, 1.0, 2.0, 3.0]);
//!
//! let dominant = PowerMethod
//!     .solve(&a, &SolverConfig::new(1e-10, 500))
//!     .unwrap();
//! assert!((dominant.eigenvalue - 5.0).abs() < 1e-8);
//!
//! // Target the other eigenvalue (2) with a nearby shift.
//! let config = SolverConfig::new(1e-10, 500).with_shift(1.7);
//! let targeted = InversePowerMethod.solve(&a, &config).unwrap();
//! assert!((targeted.eigenvalue - 2.0).abs() < 1e-8);
//! ```
//!
//! All solvers are pure functions of `(matrix, config)`: identical inputs
//! produce identical output, nothing is shared between calls, and the
//! caller's matrix is never mutated (the QR solver clones it at entry).

pub(crate) mod inverse_power;
pub(crate) mod power;
pub(crate) mod qr;

pub use inverse_power::InversePowerMethod;
pub use power::PowerMethod;
pub use qr::QrMethod;

use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Configuration shared by every solver. Immutable once constructed.
///
/// ```
/// use spectris::SolverConfig;
///
/// let config = SolverConfig::new(1e-8, 1000).with_shift(2.5);
/// assert_eq!(config.tolerance(), 1e-8);
/// assert_eq!(config.max_iter(), 1000);
/// assert_eq!(config.shift(), Some(2.5));
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig<T: FloatScalar> {
    tolerance: T,
    max_iter: usize,
    initial: Option<Vector<T>>,
    shift: Option<T>,
}

impl<T: FloatScalar> SolverConfig<T> {
    /// Create a configuration from a relative convergence tolerance and an
    /// iteration budget.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is not a positive number or `max_iter` is zero.
    pub fn new(tolerance: T, max_iter: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iter > 0, "iteration budget must be positive");
        Self {
            tolerance,
            max_iter,
            initial: None,
            shift: None,
        }
    }

    /// Use a caller-supplied starting vector instead of the all-ones
    /// default. Its length is validated against the matrix at solve time.
    pub fn with_initial(mut self, initial: Vector<T>) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Set the spectral shift. Required by [`InversePowerMethod`], ignored
    /// by the other solvers.
    pub fn with_shift(mut self, shift: T) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Relative convergence tolerance.
    #[inline]
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Maximum number of iterations.
    #[inline]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Caller-supplied starting vector, if any.
    #[inline]
    pub fn initial(&self) -> Option<&Vector<T>> {
        self.initial.as_ref()
    }

    /// Spectral shift, if any.
    #[inline]
    pub fn shift(&self) -> Option<T> {
        self.shift
    }
}

/// One converged (or best-so-far) eigenpair.
///
/// The eigenvector has unit 2-norm; its sign is not otherwise constrained.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenResult<T> {
    /// The eigenvalue estimate.
    pub eigenvalue: T,
    /// The normalized eigenvector estimate, length n.
    pub eigenvector: Vector<T>,
    /// Iterations consumed to produce this estimate. For the QR solver,
    /// the cumulative iteration count at this eigenvalue's deflation.
    pub iterations: usize,
    /// Whether the estimate met the tolerance.
    pub converged: bool,
}

/// Best estimates at the point an iteration budget ran out.
///
/// Carried inside [`SolverError::DidNotConverge`] so callers can inspect
/// what the solver had before failing. For the power-family solvers this
/// is a single non-converged estimate; for the QR solver it is the
/// eigenvalues that had already deflated (those did converge — the error
/// refers to the remaining active block).
#[derive(Debug, Clone, PartialEq)]
pub struct Partial<T> {
    /// Eigenpair estimates available when the budget was exhausted.
    pub results: Vec<EigenResult<T>>,
    /// Total iterations spent.
    pub iterations: usize,
}

/// Errors surfaced by the solvers.
///
/// Errors propagate immediately; no solver retries internally or falls
/// back to a different algorithm. Callers may retry with an adjusted
/// shift, a larger budget, or a looser tolerance.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError<T> {
    /// The matrix is not square, or a supplied vector has the wrong length.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },
    /// A shifted linear system was singular: the shift coincides with an
    /// eigenvalue to within the pivot threshold. Perturb the shift and
    /// retry.
    Singular,
    /// The iteration budget was exhausted before the tolerance was met.
    DidNotConverge(Partial<T>),
}

impl<T> core::fmt::Display for SolverError<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SolverError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {}, got {}", expected, got)
            }
            SolverError::Singular => {
                write!(f, "shifted matrix is singular (shift coincides with an eigenvalue)")
            }
            SolverError::DidNotConverge(partial) => write!(
                f,
                "did not converge within {} iterations ({} partial estimate(s) available)",
                partial.iterations,
                partial.results.len()
            ),
        }
    }
}

impl<T> From<LinalgError> for SolverError<T> {
    fn from(e: LinalgError) -> Self {
        match e {
            LinalgError::DimensionMismatch { expected, got } => {
                SolverError::DimensionMismatch { expected, got }
            }
            LinalgError::Singular => SolverError::Singular,
        }
    }
}

/// The shared solver contract.
///
/// `find_eigenvalues` consumes a square matrix read-only and produces one
/// or more eigenpairs: a single dominant (or shift-targeted) pair for the
/// power-family solvers, the full spectrum in deflation order for the QR
/// solver. Convergence means the relative change between successive
/// eigenvalue estimates dropped below the configured tolerance; running
/// out of the iteration budget is an error that still carries the partial
/// estimates.
pub trait EigenSolver<T: FloatScalar> {
    /// Compute eigenvalues (and eigenvectors) of `matrix`.
    fn find_eigenvalues(
        &self,
        matrix: &Matrix<T>,
        config: &SolverConfig<T>,
    ) -> Result<Vec<EigenResult<T>>, SolverError<T>>;
}

/// Validate squareness, returning the dimension.
pub(crate) fn check_square<T>(matrix: &Matrix<T>) -> Result<usize, SolverError<T>> {
    if !matrix.is_square() {
        return Err(SolverError::DimensionMismatch {
            expected: matrix.nrows(),
            got: matrix.ncols(),
        });
    }
    Ok(matrix.nrows())
}

/// The starting iterate: the caller's initial vector (validated and
/// normalized) or the normalized all-ones vector.
///
/// Panics if the caller's vector is zero (it cannot be normalized).
pub(crate) fn starting_vector<T: FloatScalar>(
    n: usize,
    config: &SolverConfig<T>,
) -> Result<Vector<T>, SolverError<T>> {
    if n == 0 {
        return Err(SolverError::DimensionMismatch {
            expected: 1,
            got: 0,
        });
    }
    match config.initial() {
        Some(v) => {
            if v.len() != n {
                return Err(SolverError::DimensionMismatch {
                    expected: n,
                    got: v.len(),
                });
            }
            Ok(v.normalize())
        }
        None => Ok(Vector::ones(n).normalize()),
    }
}
