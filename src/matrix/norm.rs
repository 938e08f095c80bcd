use crate::traits::{FloatScalar, Scalar};

use super::vector::Vector;
use super::Matrix;

// ── Vector norms ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Squared L2 norm (dot product with self).
    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }
}

impl<T: FloatScalar> Vector<T> {
    /// L2 (Euclidean) norm.
    ///
    /// ```
    /// use spectris::Vector;
    /// let v = Vector::from_slice(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// L1 norm (sum of absolute values).
    pub fn norm_l1(&self) -> T {
        let mut sum = T::zero();
        for i in 0..self.len() {
            sum = sum + self[i].abs();
        }
        sum
    }

    /// Infinity norm (largest absolute value).
    pub fn norm_inf(&self) -> T {
        let mut max = T::zero();
        for i in 0..self.len() {
            let a = self[i].abs();
            if a > max {
                max = a;
            }
        }
        max
    }

    /// Return a unit vector in the same direction.
    ///
    /// Panics if the norm is zero.
    ///
    /// ```
    /// use spectris::Vector;
    /// let u = Vector::from_slice(&[3.0_f64, 4.0]).normalize();
    /// assert!((u.norm() - 1.0).abs() < 1e-12);
    /// assert!((u[0] - 0.6).abs() < 1e-12);
    /// ```
    pub fn normalize(&self) -> Self {
        let n = self.norm();
        assert!(n > T::zero(), "cannot normalize a zero vector");
        let inv = T::one() / n;
        let data = self.as_slice().iter().map(|&x| x * inv).collect();
        Vector {
            inner: Matrix {
                data,
                nrows: 1,
                ncols: self.len(),
            },
        }
    }
}

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Squared Frobenius norm (sum of all elements squared).
    pub fn frobenius_norm_squared(&self) -> T {
        let mut sum = T::zero();
        for &x in &self.data {
            sum = sum + x * x;
        }
        sum
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Frobenius norm (square root of the sum of squared entries), the
    /// entry-wise 2-norm.
    ///
    /// ```
    /// use spectris::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        self.frobenius_norm_squared().sqrt()
    }

    /// Infinity norm (maximum absolute row sum). Used for the solvers'
    /// singularity and deflation scaling.
    ///
    /// ```
    /// use spectris::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
    /// assert!((m.norm_inf() - 7.0).abs() < 1e-12);
    /// ```
    pub fn norm_inf(&self) -> T {
        let mut max = T::zero();
        for i in 0..self.nrows {
            let mut row_sum = T::zero();
            for j in 0..self.ncols {
                row_sum = row_sum + self[(i, j)].abs();
            }
            if row_sum > max {
                max = row_sum;
            }
        }
        max
    }

    /// One norm (maximum absolute column sum).
    pub fn norm_one(&self) -> T {
        let mut max = T::zero();
        for j in 0..self.ncols {
            let mut col_sum = T::zero();
            for i in 0..self.nrows {
                col_sum = col_sum + self[(i, j)].abs();
            }
            if col_sum > max {
                max = col_sum;
            }
        }
        max
    }

    /// Largest absolute entry. The LU pivot threshold scales with this.
    pub fn max_abs(&self) -> T {
        let mut max = T::zero();
        for &x in &self.data {
            let a = x.abs();
            if a > max {
                max = a;
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_norm() {
        let v = Vector::from_slice(&[3.0_f64, 4.0]);
        assert!((v.norm() - 5.0).abs() < 1e-12);
        assert_eq!(v.norm_squared(), 25.0);
    }

    #[test]
    fn vector_norm_l1_inf() {
        let v = Vector::from_slice(&[1.0_f64, -2.0, 3.0]);
        assert!((v.norm_l1() - 6.0).abs() < 1e-12);
        assert!((v.norm_inf() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn vector_normalize() {
        let u = Vector::from_slice(&[3.0_f64, 4.0]).normalize();
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u[0] - 0.6).abs() < 1e-12);
        assert!((u[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "zero vector")]
    fn normalize_zero() {
        let _ = Vector::<f64>::zeros(3).normalize();
    }

    #[test]
    fn frobenius_norm() {
        let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn norm_inf_and_one() {
        let m = Matrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
        assert!((m.norm_inf() - 7.0).abs() < 1e-12);
        assert!((m.norm_one() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn max_abs() {
        let m = Matrix::from_rows(2, 2, &[1.0_f64, -9.0, 3.0, 4.0]);
        assert_eq!(m.max_abs(), 9.0);
    }
}
