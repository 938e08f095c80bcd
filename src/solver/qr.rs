use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::lu::Lu;
use crate::linalg::qr::{apply_q_right, qr_in_place};
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

use super::{check_square, EigenResult, EigenSolver, Partial, SolverConfig, SolverError};

/// Inverse-iteration refinement steps per eigenvector.
const MAX_REFINE: usize = 8;

/// Shifted QR iteration with deflation: the full real spectrum.
///
/// Operates on a working copy of the input — the caller's matrix is never
/// mutated. An active leading block shrinks as trailing eigenvalues
/// converge: each iteration factors the Wilkinson-shifted block as `Q·R`,
/// forms `R·Q` plus the shift, and checks whether the block's trailing row
/// has collapsed onto the diagonal. When it has, the corner entry is an
/// eigenvalue; the block shrinks by one and iteration continues.
///
/// Eigenvalues are returned in deflation order (trailing first), not
/// sorted by magnitude. Once the spectrum has deflated, each eigenvector
/// is recovered by a short inverse iteration against the original matrix.
///
/// Complex conjugate pairs never deflate under real shifts: a matrix with
/// such a pair exhausts the iteration budget and fails with
/// [`SolverError::DidNotConverge`], carrying whatever real eigenvalues had
/// already deflated. Extracting the complex pair is out of scope.
///
/// Each factorization of an m×m active block costs O(m³); the budget bounds
/// the total at O(`max_iter` · n³), though deflation usually shrinks the
/// active block long before the bound matters.
///
/// # Example
///
/// ```
/// use spectris::{Matrix, SolverConfig};
/// use spectris::solver::QrMethod;
///
/// // Symmetric, eigenvalues {5, 3, 1}
/// let a = Matrix::from_rows(3, 3, &[
///     4.0_f64, 1.0, 0.0,
///     1.0, 4.0, 0.0,
///     0.0, 0.0, 1.0,
/// ]);
/// let spectrum = QrMethod.solve(&a, &SolverConfig::new(1e-10, 300)).unwrap();
/// let sum: f64 = spectrum.iter().map(|r| r.eigenvalue).sum();
/// assert!((sum - a.trace()).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QrMethod;

impl QrMethod {
    /// Compute the full spectrum, in deflation order.
    pub fn solve<T: FloatScalar>(
        &self,
        matrix: &Matrix<T>,
        config: &SolverConfig<T>,
    ) -> Result<Vec<EigenResult<T>>, SolverError<T>> {
        let n = check_square(matrix)?;
        let tol = config.tolerance();
        let max_iter = config.max_iter();

        if n == 0 {
            return Ok(Vec::new());
        }

        let mut h = matrix.clone();
        let mut deflated: Vec<(T, usize)> = Vec::with_capacity(n);
        let mut m = n;
        let mut iterations = 0usize;
        let mut stall = 0usize;

        while m > 0 {
            if m == 1 {
                deflated.push((h[(0, 0)], iterations));
                break;
            }

            // Deflation test: the active block's trailing row, off the
            // diagonal, against the local scale.
            let mut off = T::zero();
            for j in 0..(m - 1) {
                off = off + h[(m - 1, j)].abs();
            }
            let local = h[(m - 2, m - 2)].abs() + h[(m - 1, m - 1)].abs();
            let threshold = if local > T::zero() { tol * local } else { tol };
            if off < threshold {
                deflated.push((h[(m - 1, m - 1)], iterations));
                m -= 1;
                stall = 0;
                continue;
            }

            if iterations >= max_iter {
                let results = attach_eigenvectors(matrix, &deflated, tol);
                return Err(SolverError::DidNotConverge(Partial {
                    results,
                    iterations,
                }));
            }

            iterations += 1;
            stall += 1;
            let mu = if stall % 10 == 0 {
                // Exceptional shift: perturb off the symmetric orbit that
                // keeps the Wilkinson shift stationary.
                h[(m - 1, m - 1)] + h[(m - 1, m - 2)].abs()
            } else {
                wilkinson_shift(
                    h[(m - 2, m - 2)],
                    h[(m - 2, m - 1)],
                    h[(m - 1, m - 2)],
                    h[(m - 1, m - 1)],
                )
            };
            qr_step(&mut h, m, mu);
        }

        Ok(attach_eigenvectors(matrix, &deflated, tol))
    }
}

impl<T: FloatScalar> EigenSolver<T> for QrMethod {
    fn find_eigenvalues(
        &self,
        matrix: &Matrix<T>,
        config: &SolverConfig<T>,
    ) -> Result<Vec<EigenResult<T>>, SolverError<T>> {
        self.solve(matrix, config)
    }
}

/// One shifted QR similarity step on the leading `m`×`m` block of `h`:
/// factor `H - μI = Q·R`, overwrite the block with `R·Q + μI`.
fn qr_step<T: FloatScalar>(h: &mut Matrix<T>, m: usize, mu: T) {
    let mut fac = Matrix::zeros(m, m);
    for j in 0..m {
        for i in 0..m {
            fac[(i, j)] = h[(i, j)];
        }
    }
    for i in 0..m {
        fac[(i, i)] = fac[(i, i)] - mu;
    }

    let mut tau = vec![T::zero(); m];
    qr_in_place(&mut fac, &mut tau);

    // R, then R·Q via the packed reflectors
    let mut rq = Matrix::zeros(m, m);
    for i in 0..m {
        for j in i..m {
            rq[(i, j)] = fac[(i, j)];
        }
    }
    apply_q_right(&mut rq, &fac, &tau);

    for j in 0..m {
        for i in 0..m {
            h[(i, j)] = rq[(i, j)];
        }
    }
    for i in 0..m {
        h[(i, i)] = h[(i, i)] + mu;
    }
}

/// Wilkinson-style shift from the trailing 2×2 block `[[a, b], [c, d]]`:
/// the eigenvalue of the block closer to the corner entry `d`, or the
/// block's mean when its eigenvalues form a complex pair.
fn wilkinson_shift<T: FloatScalar>(a: T, b: T, c: T, d: T) -> T {
    let two = T::one() + T::one();
    let p = (a - d) / two;
    let disc = p * p + b * c;
    if disc >= T::zero() {
        let root = disc.sqrt();
        let lo = d + p - root;
        let hi = d + p + root;
        if (lo - d).abs() <= (hi - d).abs() {
            lo
        } else {
            hi
        }
    } else {
        d + p
    }
}

/// Build the final results from deflated `(eigenvalue, iteration)` pairs,
/// recovering each eigenvector from the original matrix.
fn attach_eigenvectors<T: FloatScalar>(
    matrix: &Matrix<T>,
    deflated: &[(T, usize)],
    tol: T,
) -> Vec<EigenResult<T>> {
    deflated
        .iter()
        .map(|&(lambda, iterations)| EigenResult {
            eigenvalue: lambda,
            eigenvector: eigenvector_for(matrix, lambda, tol),
            iterations,
            converged: true,
        })
        .collect()
}

/// Eigenvector for a converged eigenvalue, by inverse iteration against
/// the original matrix.
///
/// The shift is offset from the eigenvalue by `‖A‖∞·√ε` so the factored
/// matrix stays clear of exact singularity while the target
/// eigencomponent's amplification still dwarfs every other; the offset
/// escalates ×100 (at most twice) in the unlikely case the factorization
/// reports singular anyway. Deterministic, never fails: the worst outcome
/// is an unrefined starting vector.
fn eigenvector_for<T: FloatScalar>(matrix: &Matrix<T>, lambda: T, tol: T) -> Vector<T> {
    let n = matrix.nrows();
    let norm = matrix.norm_inf();
    let scale = if norm > T::zero() { norm } else { T::one() };
    let escalate = T::from(100.0).unwrap_or_else(T::one);

    let mut offset = scale * T::epsilon().sqrt();
    // Graded start: the all-ones vector is orthogonal to too many
    // eigenvectors of symmetric test matrices.
    let mut v = Vector::from_vec((0..n).map(|i| T::from(i + 1).unwrap_or_else(T::one)).collect())
        .normalize();

    for _ in 0..3 {
        let lu = match Lu::new(&matrix.shifted(lambda + offset)) {
            Ok(lu) => lu,
            Err(_) => {
                offset = offset * escalate;
                continue;
            }
        };

        for _ in 0..MAX_REFINE {
            let w = lu.solve(&v);
            let wnorm = w.norm();
            if !(wnorm > T::zero()) || !wnorm.is_finite() {
                break;
            }
            v = &w / wnorm;

            let av = matrix * &v;
            let residual = (&av - &(&v * lambda)).norm();
            if residual <= tol * scale {
                break;
            }
        }
        return v;
    }
    v
}
