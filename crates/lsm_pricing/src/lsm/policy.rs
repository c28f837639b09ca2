//! Fitted exercise policy, reusable on an independent path set.
//!
//! The backward induction produces one coefficient vector per interior
//! exercise date. Freezing those coefficients and replaying them forward
//! on freshly simulated paths gives an out-of-sample value estimate free
//! of the in-sample selection bias.

use nalgebra::DVector;

/// Per-date continuation-value coefficients frozen after a pricing run.
///
/// Index `t` (for `t` in `1..n_exercise_dates`) holds the coefficients
/// fitted at interior exercise date `t`, or `None` where the regression
/// was degenerate and the continuation estimate was zero. Slots 0 (the
/// valuation date) and the maturity date are never populated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePolicy {
    coefficients: Vec<Option<DVector<f64>>>,
}

impl ExercisePolicy {
    pub(crate) fn new(n_exercise_dates: usize) -> Self {
        Self {
            coefficients: vec![None; n_exercise_dates],
        }
    }

    pub(crate) fn set(&mut self, date: usize, coeffs: Option<DVector<f64>>) {
        self.coefficients[date] = coeffs;
    }

    /// Coefficients fitted at exercise date `date`, if the regression
    /// there was well-posed.
    #[inline]
    pub fn coefficients(&self, date: usize) -> Option<&DVector<f64>> {
        self.coefficients.get(date).and_then(|c| c.as_ref())
    }

    /// Number of exercise dates the policy spans.
    #[inline]
    pub fn n_dates(&self) -> usize {
        self.coefficients.len()
    }
}
