use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::{Matrix, Vector};
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Perform LU decomposition with partial pivoting, in place.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// `perm` is filled with the row permutation indices.
/// Returns `true` if the number of row swaps was even.
///
/// A column whose largest available pivot magnitude falls below machine
/// epsilon times the matrix's largest entry yields
/// [`LinalgError::Singular`]; the threshold scales with the matrix so that
/// `c * A` is singular exactly when `A` is.
pub fn lu_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    perm: &mut [usize],
) -> Result<bool, LinalgError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "LU decomposition requires a square matrix");
    assert_eq!(n, perm.len(), "permutation slice length must match matrix size");

    // Pivot threshold relative to the matrix magnitude
    let mut scale = T::zero();
    for j in 0..n {
        for i in 0..n {
            let v = a.get(i, j).abs();
            if v > scale {
                scale = v;
            }
        }
    }
    if scale == T::zero() {
        return Err(LinalgError::Singular);
    }
    let pivot_min = scale * T::epsilon();

    for i in 0..n {
        perm[i] = i;
    }

    let mut even = true;

    for col in 0..n {
        // Partial pivoting: find row with largest magnitude in this column
        let mut max_row = col;
        let mut max_val = a.get(col, col).abs();
        for row in (col + 1)..n {
            let val = a.get(row, col).abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_val < pivot_min {
            return Err(LinalgError::Singular);
        }

        // Swap rows if needed
        if max_row != col {
            perm.swap(col, max_row);
            for j in 0..n {
                let tmp = *a.get(col, j);
                *a.get_mut(col, j) = *a.get(max_row, j);
                *a.get_mut(max_row, j) = tmp;
            }
            even = !even;
        }

        let pivot = *a.get(col, col);
        let inv_pivot = T::one() / pivot;

        // Scale sub-column: a[col+1:n, col] /= pivot
        {
            let sub_col = a.col_as_mut_slice(col, col + 1);
            for x in sub_col.iter_mut() {
                *x = *x * inv_pivot;
            }
        }

        // Rank-1 update: a[col+1:n, j] -= a[col, j] * a[col+1:n, col]
        for j in (col + 1)..n {
            let factor = *a.get(col, j);
            if factor == T::zero() {
                continue;
            }
            for i in (col + 1)..n {
                let update = *a.get(i, j) - factor * *a.get(i, col);
                *a.get_mut(i, j) = update;
            }
        }
    }

    Ok(even)
}

/// Solve Ax = b given the packed LU decomposition and permutation.
///
/// `lu` is the packed L/U matrix from [`lu_in_place`].
/// `perm` is the row permutation from [`lu_in_place`].
/// `b` (input) and `x` (output) are separate slices of length n.
pub fn lu_solve<T: FloatScalar>(lu: &impl MatrixRef<T>, perm: &[usize], b: &[T], x: &mut [T]) {
    let n = lu.nrows();

    // Apply permutation and forward substitution (solve Ly = Pb)
    for i in 0..n {
        let mut sum = b[perm[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Back substitution (solve Ux = y)
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}

/// LU decomposition of a square matrix with partial pivoting.
///
/// Stores the packed L/U factors and permutation vector. Inverse iteration
/// factors its shifted matrix once through this struct and then back-solves
/// every iteration against the same factors.
///
/// # Example
///
/// ```
/// use spectris::{Matrix, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = a.lu().unwrap();
///
/// let x = lu.solve(&Vector::from_slice(&[4.0, 11.0]));
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Lu<T> {
    lu: Matrix<T>,
    perm: Vec<usize>,
    even: bool,
}

impl<T: FloatScalar> Lu<T> {
    /// Decompose a matrix. Fails with `DimensionMismatch` if the matrix is
    /// not square and with `Singular` if a pivot falls below the relative
    /// threshold.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        if !a.is_square() {
            return Err(LinalgError::DimensionMismatch {
                expected: a.nrows(),
                got: a.ncols(),
            });
        }
        let n = a.nrows();
        let mut lu = a.clone();
        let mut perm = vec![0usize; n];
        let even = lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm, even })
    }

    /// Solve Ax = b for x. Panics if the length of `b` does not match.
    pub fn solve(&self, b: &Vector<T>) -> Vector<T> {
        let n = self.lu.nrows();
        assert_eq!(b.len(), n, "rhs length mismatch");
        let mut x = vec![T::zero(); n];
        lu_solve(&self.lu, &self.perm, b.as_slice(), &mut x);
        Vector::from_vec(x)
    }

    /// Compute the matrix inverse.
    pub fn inverse(&self) -> Matrix<T> {
        let n = self.lu.nrows();
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![T::zero(); n];
        let mut col_buf = vec![T::zero(); n];

        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();

            lu_solve(&self.lu, &self.perm, &e, &mut col_buf);

            for row in 0..n {
                inv[(row, col)] = col_buf[row];
            }
        }

        inv
    }

    /// Compute the determinant.
    pub fn det(&self) -> T {
        let n = self.lu.nrows();
        let mut d = if self.even { T::one() } else { -T::one() };
        for i in 0..n {
            d = d * self.lu[(i, i)];
        }
        d
    }
}

/// Convenience methods on [`Matrix`].
impl<T: FloatScalar> Matrix<T> {
    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> Result<Lu<T>, LinalgError> {
        Lu::new(self)
    }

    /// Solve `Ax = b` for `x` via Gaussian elimination with partial
    /// pivoting.
    ///
    /// Fails with `DimensionMismatch` for a non-square matrix or a
    /// wrong-length right-hand side, and with `Singular` when the best
    /// available pivot in some column is below machine epsilon relative to
    /// the matrix's largest entry.
    ///
    /// ```
    /// use spectris::{Matrix, Vector};
    /// let a = Matrix::from_rows(3, 3, &[
    ///     2.0_f64, 1.0, -1.0,
    ///     -3.0, -1.0, 2.0,
    ///     -2.0, 1.0, 2.0,
    /// ]);
    /// let x = a.solve(&Vector::from_slice(&[8.0, -11.0, -3.0])).unwrap();
    /// assert!((x[0] - 2.0).abs() < 1e-12);
    /// assert!((x[1] - 3.0).abs() < 1e-12);
    /// assert!((x[2] + 1.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        if b.len() != self.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.nrows(),
                got: b.len(),
            });
        }
        Ok(self.lu()?.solve(b))
    }

    /// Compute the matrix inverse via LU decomposition.
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        Ok(self.lu()?.inverse())
    }

    /// Compute the determinant via LU decomposition.
    ///
    /// Returns zero for a singular matrix rather than an error.
    pub fn det(&self) -> T {
        match self.lu() {
            Ok(lu) => lu.det(),
            Err(_) => T::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_2x2() {
        // 3x + 2y = 7
        // x + 4y = 9
        let a = Matrix::from_rows(2, 2, &[3.0_f64, 2.0, 1.0, 4.0]);
        let x = a.solve(&Vector::from_slice(&[7.0, 9.0])).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn solve_3x3() {
        let a = Matrix::from_rows(
            3,
            3,
            &[2.0_f64, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0],
        );
        let x = a.solve(&Vector::from_slice(&[8.0, -11.0, -3.0])).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!((x[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn solve_verify_residual() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 2.0, 6.0, 4.0, 1.0, 3.0, 1.0, 9.0, 2.0,
            ],
        );
        let b = Vector::from_slice(&[10.0, 26.0, 13.0, 15.0]);
        let x = a.solve(&b).unwrap();

        for i in 0..4 {
            let mut row_sum = 0.0;
            for j in 0..4 {
                row_sum += a[(i, j)] * x[j];
            }
            assert!(
                (row_sum - b[i]).abs() < 1e-10,
                "residual[{}] = {}",
                i,
                row_sum - b[i]
            );
        }
    }

    #[test]
    fn inverse_3x3() {
        let a = Matrix::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]);
        let a_inv = a.inverse().unwrap();
        let id = &a * &a_inv;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (id[(i, j)] - expected).abs() < 1e-10,
                    "id[({},{})] = {}",
                    i,
                    j,
                    id[(i, j)]
                );
            }
        }
    }

    #[test]
    fn det() {
        let a = Matrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
        assert!((a.det() + 14.0).abs() < 1e-12);

        let b = Matrix::from_rows(3, 3, &[6.0_f64, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0]);
        assert!((b.det() + 306.0).abs() < 1e-10);
    }

    #[test]
    fn singular_detected() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        assert_eq!(a.lu().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn singular_is_scale_invariant() {
        // The same rank-deficient matrix, scaled far down: still singular
        // because the pivot threshold is relative.
        let a = Matrix::from_rows(2, 2, &[1e-20_f64, 2e-20, 2e-20, 4e-20]);
        assert_eq!(a.lu().unwrap_err(), LinalgError::Singular);

        // A well-conditioned matrix scaled far down is still solvable.
        let b = Matrix::from_rows(2, 2, &[3e-20_f64, 2e-20, 1e-20, 4e-20]);
        assert!(b.lu().is_ok());
    }

    #[test]
    fn zero_matrix_singular() {
        let a = Matrix::<f64>::zeros(3, 3);
        assert_eq!(a.lu().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn non_square_rejected() {
        let a = Matrix::<f64>::zeros(2, 3);
        assert_eq!(
            Lu::new(&a).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn solve_rhs_length_mismatch() {
        let a = Matrix::<f64>::eye(3);
        let b = Vector::from_slice(&[1.0, 2.0]);
        assert_eq!(
            a.solve(&b).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        );
    }
}
