//! Cross-sectional least-squares fit of continuation values.
//!
//! The design matrix is never materialised: with `k` basis functions the
//! normal equations `X^T X beta = X^T y` only need a `k x k` Gram matrix,
//! accumulated in one pass over the in-the-money sample. The system is
//! solved by Cholesky first and LU as a fallback for the borderline
//! positive-definite cases a near-collinear basis produces.

use lsm_models::BasisFunction;
use nalgebra::{DMatrix, DVector};

/// Fits regression coefficients for the continuation value.
///
/// `x` holds the underlying prices of the in-the-money paths at the
/// current exercise date and `y` the corresponding discounted future cash
/// flows. Returns `None` when the sample is too small for the basis size
/// or the normal equations are singular; callers treat that as a zero
/// continuation estimate.
pub fn fit_continuation(
    basis: &[BasisFunction],
    x: &[f64],
    y: &[f64],
) -> Option<DVector<f64>> {
    debug_assert_eq!(x.len(), y.len());
    let k = basis.len();
    if k == 0 || x.len() < k {
        return None;
    }

    let mut gram = DMatrix::<f64>::zeros(k, k);
    let mut moment = DVector::<f64>::zeros(k);
    let mut features = vec![0.0; k];

    for (&xi, &yi) in x.iter().zip(y.iter()) {
        for (j, f) in basis.iter().enumerate() {
            features[j] = f.evaluate(xi);
        }
        for row in 0..k {
            for col in row..k {
                gram[(row, col)] += features[row] * features[col];
            }
            moment[row] += features[row] * yi;
        }
    }
    // Gram matrix is symmetric; mirror the upper triangle.
    for row in 1..k {
        for col in 0..row {
            gram[(row, col)] = gram[(col, row)];
        }
    }

    let coeffs = match gram.clone().cholesky() {
        Some(chol) => chol.solve(&moment),
        None => {
            tracing::debug!(basis_size = k, "Cholesky failed, falling back to LU");
            gram.lu().solve(&moment)?
        }
    };

    if coeffs.iter().all(|c| c.is_finite()) {
        Some(coeffs)
    } else {
        None
    }
}

/// Evaluates the fitted continuation value at an underlying price.
#[inline]
pub fn continuation_value(basis: &[BasisFunction], coeffs: &DVector<f64>, x: f64) -> f64 {
    basis
        .iter()
        .zip(coeffs.iter())
        .map(|(f, &c)| c * f.evaluate(x))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lsm_models::{monomial_set, BasisFunction};

    fn quadratic_basis() -> Vec<BasisFunction> {
        vec![
            BasisFunction::constant(),
            BasisFunction::monomial(1),
            BasisFunction::monomial(2),
        ]
    }

    #[test]
    fn test_exact_quadratic_fit() {
        // y = 2 + 3x - 0.5x^2 is recovered exactly by {1, x, x^2}.
        let basis = quadratic_basis();
        let x: Vec<f64> = (0..20).map(|i| 1.0 + i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|&v| 2.0 + 3.0 * v - 0.5 * v * v).collect();

        let coeffs = fit_continuation(&basis, &x, &y).unwrap();
        for &v in &x {
            assert_relative_eq!(
                continuation_value(&basis, &coeffs, v),
                2.0 + 3.0 * v - 0.5 * v * v,
                epsilon = 1e-8
            );
        }
    }

    #[test]
    fn test_sample_smaller_than_basis_degenerates() {
        let basis = monomial_set(3); // 4 functions
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        assert!(fit_continuation(&basis, &x, &y).is_none());
    }

    #[test]
    fn test_empty_sample_degenerates() {
        let basis = monomial_set(2);
        assert!(fit_continuation(&basis, &[], &[]).is_none());
    }

    #[test]
    fn test_singular_design_degenerates() {
        // All observations at the same price: columns beyond the
        // intercept are collinear and the Gram matrix is singular.
        let basis = quadratic_basis();
        let x = [5.0; 10];
        let y = [1.0; 10];
        assert!(fit_continuation(&basis, &x, &y).is_none());
    }

    #[test]
    fn test_constant_only_fits_mean() {
        let basis = monomial_set(0);
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let coeffs = fit_continuation(&basis, &x, &y).unwrap();
        assert_relative_eq!(coeffs[0], 5.0, epsilon = 1e-10);
    }
}
