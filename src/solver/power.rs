use alloc::vec;
use alloc::vec::Vec;

use crate::matrix::Matrix;
use crate::traits::FloatScalar;

use super::{
    check_square, starting_vector, EigenResult, EigenSolver, Partial, SolverConfig, SolverError,
};

/// Power iteration: the dominant eigenpair.
///
/// Repeatedly multiplies the iterate by the matrix and renormalizes; the
/// eigenvalue estimate is the Rayleigh quotient of the current iterate.
/// Converges at a rate governed by the ratio of the two largest eigenvalue
/// magnitudes.
///
/// When the two largest-magnitude eigenvalues are equal (a complex
/// conjugate pair, or a real ± pair), the iterate oscillates and no
/// estimate ever passes the relative-change test; the solver then fails
/// with [`SolverError::DidNotConverge`] once the budget is exhausted. That
/// is the documented limitation of the method, not a recoverable state.
///
/// `SolverConfig::shift` is ignored; use [`super::InversePowerMethod`] to
/// target an interior eigenvalue.
///
/// # Example
///
/// ```
/// use spectris::{Matrix, SolverConfig};
/// use spectris::solver::PowerMethod;
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 1.0]);
/// let result = PowerMethod.solve(&a, &SolverConfig::new(1e-12, 200)).unwrap();
/// assert!((result.eigenvalue - 2.0).abs() < 1e-10);
/// assert!(result.converged);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerMethod;

impl PowerMethod {
    /// Find the dominant eigenpair.
    pub fn solve<T: FloatScalar>(
        &self,
        matrix: &Matrix<T>,
        config: &SolverConfig<T>,
    ) -> Result<EigenResult<T>, SolverError<T>> {
        let n = check_square(matrix)?;
        let tol = config.tolerance();
        let scale = matrix.norm_inf();

        let mut v = starting_vector(n, config)?;
        let mut av = matrix.mul_vec(&v)?;
        let mut lambda = v.dot(&av);

        for iter in 1..=config.max_iter() {
            let norm = av.norm();
            if norm == T::zero() {
                // The iterate landed in the null space: (0, v) is exact.
                return Ok(EigenResult {
                    eigenvalue: T::zero(),
                    eigenvector: v,
                    iterations: iter,
                    converged: true,
                });
            }

            v = &av / norm;
            av = matrix.mul_vec(&v)?;
            let next = v.dot(&av);

            // The relative-change test alone is fooled by ± eigenvalue
            // pairs, whose period-2 oscillation keeps the Rayleigh quotient
            // constant. Acceptance also requires the residual of the
            // candidate pair.
            if (next - lambda).abs() < tol * next.abs() {
                let residual = (&av - &(&v * next)).norm();
                if residual <= tol * scale {
                    return Ok(EigenResult {
                        eigenvalue: next,
                        eigenvector: v,
                        iterations: iter,
                        converged: true,
                    });
                }
            }
            lambda = next;
        }

        Err(SolverError::DidNotConverge(Partial {
            results: vec![EigenResult {
                eigenvalue: lambda,
                eigenvector: v,
                iterations: config.max_iter(),
                converged: false,
            }],
            iterations: config.max_iter(),
        }))
    }
}

impl<T: FloatScalar> EigenSolver<T> for PowerMethod {
    fn find_eigenvalues(
        &self,
        matrix: &Matrix<T>,
        config: &SolverConfig<T>,
    ) -> Result<Vec<EigenResult<T>>, SolverError<T>> {
        self.solve(matrix, config).map(|r| vec![r])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Vector;

    #[test]
    fn dominant_of_diagonal() {
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 1.0]);
        let config = SolverConfig::new(1e-12, 200).with_initial(Vector::from_slice(&[1.0, 1.0]));
        let result = PowerMethod.solve(&a, &config).unwrap();

        assert!((result.eigenvalue - 2.0).abs() < 1e-10);
        assert!(result.converged);
        // Eigenvector proportional to e_0
        assert!((result.eigenvector[0].abs() - 1.0).abs() < 1e-5);
        assert!(result.eigenvector[1].abs() < 1e-5);
    }

    #[test]
    fn loose_tolerance_converges_fast() {
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 1.0]);
        let config = SolverConfig::new(0.05, 50).with_initial(Vector::from_slice(&[1.0, 1.0]));
        let result = PowerMethod.solve(&a, &config).unwrap();
        assert!(result.iterations <= 6);
        assert!((result.eigenvalue - 2.0).abs() < 0.2);
    }

    #[test]
    fn dominant_of_nonsymmetric() {
        // Eigenvalues 5 and 2
        let a = Matrix::from_rows(2, 2, &[4.0_f64, 1.0, 2.0, 3.0]);
        let result = PowerMethod
            .solve(&a, &SolverConfig::new(1e-12, 500))
            .unwrap();
        assert!((result.eigenvalue - 5.0).abs() < 1e-9);

        // Round trip: A v ≈ λ v
        let av = a.mul_vec(&result.eigenvector).unwrap();
        let lv = &result.eigenvector * result.eigenvalue;
        assert!((&av - &lv).norm() < 1e-8);
    }

    #[test]
    fn equal_modulus_pair_fails() {
        // Rotation by 90 degrees: eigenvalues ±i, no real dominant one.
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, -1.0, 0.0]);
        let err = PowerMethod
            .solve(&a, &SolverConfig::new(1e-10, 100))
            .unwrap_err();
        match err {
            SolverError::DidNotConverge(partial) => {
                assert_eq!(partial.iterations, 100);
                assert_eq!(partial.results.len(), 1);
                assert!(!partial.results[0].converged);
            }
            other => panic!("expected DidNotConverge, got {:?}", other),
        }
    }

    #[test]
    fn sign_degenerate_pair_fails() {
        // Eigenvalues +1 and -1: equal modulus, iterate oscillates.
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
        let config = SolverConfig::new(1e-10, 100).with_initial(Vector::from_slice(&[2.0, 1.0]));
        let err = PowerMethod.solve(&a, &config).unwrap_err();
        assert!(matches!(err, SolverError::DidNotConverge(_)));
    }

    #[test]
    fn non_square_rejected() {
        let a = Matrix::<f64>::zeros(2, 3);
        let err = PowerMethod
            .solve(&a, &SolverConfig::new(1e-10, 10))
            .unwrap_err();
        assert_eq!(
            err,
            SolverError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn wrong_initial_length_rejected() {
        let a = Matrix::<f64>::eye(3);
        let config = SolverConfig::new(1e-10, 10).with_initial(Vector::from_slice(&[1.0, 1.0]));
        let err = PowerMethod.solve(&a, &config).unwrap_err();
        assert_eq!(
            err,
            SolverError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn deterministic() {
        let a = Matrix::from_rows(3, 3, &[3.0_f64, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 1.0]);
        let config = SolverConfig::new(1e-10, 500);
        let r1 = PowerMethod.solve(&a, &config).unwrap();
        let r2 = PowerMethod.solve(&a, &config).unwrap();
        assert_eq!(r1.eigenvalue, r2.eigenvalue);
        assert_eq!(r1.eigenvector, r2.eigenvector);
        assert_eq!(r1.iterations, r2.iterations);
    }

    #[test]
    fn via_trait_object() {
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 1.0]);
        let solver: &dyn EigenSolver<f64> = &PowerMethod;
        let results = solver
            .find_eigenvalues(&a, &SolverConfig::new(1e-10, 200))
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!((results[0].eigenvalue - 2.0).abs() < 1e-8);
    }
}
