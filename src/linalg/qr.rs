use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::{Matrix, Vector};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// QR decomposition in place using Householder reflections.
///
/// On return, `a` contains the packed QR factorization:
/// - Upper triangle (including diagonal): R
/// - Lower triangle (excluding diagonal): Householder vectors (scaled so
///   the implicit leading element is 1)
///
/// `tau` is filled with the Householder scalar factors (length min(M,N)).
/// Works on rectangular matrices (M >= N).
///
/// A (sub-)column that is already zero gets an identity reflector
/// (`tau = 0`) instead of an error: the factorization of a singular matrix
/// is still well defined, and the QR eigenvalue iteration factors exactly
/// shifted — hence singular — blocks as a matter of course. Rank
/// deficiency only surfaces later, if a triangular solve against R is
/// attempted.
pub fn qr_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>, tau: &mut [T]) {
    let m = a.nrows();
    let n = a.ncols();
    let k = m.min(n);
    assert!(m >= n, "QR decomposition requires M >= N");
    assert_eq!(tau.len(), k, "tau length must equal min(M, N)");

    for col in 0..k {
        // Squared norm of the sub-column a[col:m, col]
        let mut norm_sq = T::zero();
        for i in col..m {
            let v = *a.get(i, col);
            norm_sq = norm_sq + v * v;
        }

        if norm_sq < T::min_positive_value() {
            tau[col] = T::zero();
            continue;
        }

        let norm = norm_sq.sqrt();
        let a_col_col = *a.get(col, col);

        // sigma = sign(a[col,col]) * ||x|| so v0 = a + sigma avoids
        // cancellation
        let sigma = if a_col_col >= T::zero() { norm } else { -norm };

        let v0 = a_col_col + sigma;
        let tau_val = v0 / sigma;
        tau[col] = tau_val;

        // Scale the sub-diagonal entries by 1/v0 for storage
        for i in (col + 1)..m {
            let val = *a.get(i, col) / v0;
            *a.get_mut(i, col) = val;
        }

        // Apply H to trailing columns: A[col:m, j] -= tau * v * (v^T * A[col:m, j])
        // where v = [1, a[col+1,col], ..., a[m-1,col]] (stored values)
        for j in (col + 1)..n {
            let mut dot = *a.get(col, j);
            for i in (col + 1)..m {
                dot = dot + *a.get(i, col) * *a.get(i, j);
            }
            dot = dot * tau_val;

            *a.get_mut(col, j) = *a.get(col, j) - dot;
            for i in (col + 1)..m {
                let update = *a.get(i, j) - dot * *a.get(i, col);
                *a.get_mut(i, j) = update;
            }
        }

        // Store -sigma (the R diagonal entry) in a[col, col]
        *a.get_mut(col, col) = -sigma;
    }
}

/// Form `M * Q` in place, where Q is held in packed Householder form.
///
/// `qr`/`tau` are the packed factors from [`qr_in_place`] of a k×k matrix;
/// `m` is overwritten with `m * Q = m * H_0 * H_1 * ... * H_{k-1}`. This is
/// the step that turns `R` into `R·Q` inside the QR eigenvalue iteration.
///
/// Only the leading `k` columns of `m` are touched; `m` must have at least
/// `k` columns.
pub fn apply_q_right<T: FloatScalar>(
    m: &mut impl MatrixMut<T>,
    qr: &impl MatrixRef<T>,
    tau: &[T],
) {
    let k = qr.ncols();
    assert!(m.ncols() >= k, "operand has fewer columns than Q");
    let rows = m.nrows();

    for col in 0..k {
        let tau_val = tau[col];
        if tau_val == T::zero() {
            continue;
        }
        // v = [1, qr[col+1,col], ..., qr[k-1,col]], acting on columns col..k
        for i in 0..rows {
            let mut dot = *m.get(i, col);
            for l in (col + 1)..k {
                dot = dot + *m.get(i, l) * *qr.get(l, col);
            }
            dot = dot * tau_val;

            *m.get_mut(i, col) = *m.get(i, col) - dot;
            for l in (col + 1)..k {
                let update = *m.get(i, l) - dot * *qr.get(l, col);
                *m.get_mut(i, l) = update;
            }
        }
    }
}

/// QR decomposition of a matrix (M >= N).
///
/// Stores the packed Householder vectors, R, and tau scalars.
/// Use `q()`, `r()`, or `solve()` to work with the decomposition.
///
/// # Example
///
/// ```
/// use spectris::{Matrix, Vector};
/// use spectris::linalg::Qr;
///
/// // Least-squares fit: y = c0 + c1*x to points (0,1), (1,2), (2,4)
/// let a = Matrix::from_rows(3, 2, &[
///     1.0_f64, 0.0,
///     1.0, 1.0,
///     1.0, 2.0,
/// ]);
/// let x = Qr::new(&a).solve(&Vector::from_slice(&[1.0, 2.0, 4.0])).unwrap();
/// assert!((x[0] - 5.0 / 6.0).abs() < 1e-10);
/// assert!((x[1] - 3.0 / 2.0).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct Qr<T> {
    qr: Matrix<T>,
    tau: Vec<T>,
}

impl<T: FloatScalar> Qr<T> {
    /// Decompose a matrix. Panics if M < N.
    pub fn new(a: &Matrix<T>) -> Self {
        let m = a.nrows();
        let n = a.ncols();
        assert!(m >= n, "QR decomposition requires M >= N");
        let k = m.min(n);
        let mut qr = a.clone();
        let mut tau = vec![T::zero(); k];
        qr_in_place(&mut qr, &mut tau);
        Self { qr, tau }
    }

    /// Extract the upper-triangular R factor (N × N).
    pub fn r(&self) -> Matrix<T> {
        let n = self.qr.ncols();
        let mut r = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                r[(i, j)] = self.qr[(i, j)];
            }
        }
        r
    }

    /// Compute the thin Q factor (M × N, orthonormal columns).
    ///
    /// Applies Householder reflections in reverse to the first N columns
    /// of the identity matrix.
    ///
    /// ```
    /// use spectris::Matrix;
    /// use spectris::linalg::Qr;
    ///
    /// let a = Matrix::from_rows(3, 3, &[
    ///     12.0_f64, -51.0, 4.0,
    ///     6.0, 167.0, -68.0,
    ///     -4.0, 24.0, -41.0,
    /// ]);
    /// let q = Qr::new(&a).q();
    /// let qtq = &q.transpose() * &q;
    /// assert!((qtq[(0, 0)] - 1.0).abs() < 1e-10);
    /// assert!(qtq[(0, 1)].abs() < 1e-10);
    /// ```
    pub fn q(&self) -> Matrix<T> {
        let m = self.qr.nrows();
        let n = self.qr.ncols();

        // Thin identity: e_0..e_{n-1}
        let mut q = Matrix::zeros(m, n);
        for i in 0..n {
            q[(i, i)] = T::one();
        }

        // Apply reflections in reverse order
        for col in (0..n).rev() {
            let tau_val = self.tau[col];
            if tau_val == T::zero() {
                continue;
            }

            // H_col acts on Q[col:m, col:n]; v = [1, qr[col+1,col], ...]
            for j in col..n {
                let mut dot = q[(col, j)];
                for i in (col + 1)..m {
                    dot = dot + self.qr[(i, col)] * q[(i, j)];
                }
                dot = dot * tau_val;

                q[(col, j)] = q[(col, j)] - dot;
                for i in (col + 1)..m {
                    q[(i, j)] = q[(i, j)] - dot * self.qr[(i, col)];
                }
            }
        }

        q
    }

    /// Solve the least-squares problem min ||Ax - b|| for x.
    ///
    /// Computes x = R⁻¹ Qᵀ b via Householder application + back
    /// substitution. Fails with [`LinalgError::Singular`] when R has a
    /// diagonal entry below machine epsilon relative to the matrix's
    /// largest entry (rank deficiency).
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        let m = self.qr.nrows();
        let n = self.qr.ncols();
        if b.len() != m {
            return Err(LinalgError::DimensionMismatch {
                expected: m,
                got: b.len(),
            });
        }

        let r_min = self.qr.max_abs() * T::epsilon();

        // Apply Q^T to b by applying each Householder reflection in order.
        let mut qtb: Vec<T> = b.as_slice().to_vec();
        for col in 0..n {
            let tau_val = self.tau[col];
            if tau_val == T::zero() {
                continue;
            }
            let mut dot = qtb[col];
            for i in (col + 1)..m {
                dot = dot + self.qr[(i, col)] * qtb[i];
            }
            dot = dot * tau_val;

            qtb[col] = qtb[col] - dot;
            for i in (col + 1)..m {
                qtb[i] = qtb[i] - dot * self.qr[(i, col)];
            }
        }

        // Back substitution with R (upper triangle of qr, first N rows)
        let mut x = vec![T::zero(); n];
        for i in (0..n).rev() {
            let diag = self.qr[(i, i)];
            if diag.abs() < r_min {
                return Err(LinalgError::Singular);
            }
            let mut sum = qtb[i];
            for j in (i + 1)..n {
                sum = sum - self.qr[(i, j)] * x[j];
            }
            x[i] = sum / diag;
        }

        Ok(Vector::from_vec(x))
    }
}

/// Convenience method on [`Matrix`].
impl<T: FloatScalar> Matrix<T> {
    /// Householder QR decomposition.
    pub fn qr(&self) -> Qr<T> {
        Qr::new(self)
    }
}
