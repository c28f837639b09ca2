//! Regression basis functions for continuation-value estimation.
//!
//! The Longstaff-Schwartz regression projects discounted future cash flows
//! onto a small set of scalar features of the underlying price. This module
//! provides the feature library: a constant intercept, plain monomials, and
//! the weighted Laguerre and probabilist's Hermite polynomial families used
//! in the original literature.
//!
//! Orthogonal polynomials are evaluated with the standard three-term
//! recurrence truncated at order 5, rather than hard-coded closed forms.

use crate::error::{BasisError, MAX_POLY_ORDER};

/// A single regression basis function.
///
/// Stateless, immutable evaluator from underlying price to feature value.
/// Variants are validated at construction; an out-of-range polynomial
/// order fails with [`BasisError::OrderOutOfRange`].
///
/// # Examples
///
/// ```rust
/// use lsm_models::BasisFunction;
///
/// let lag1 = BasisFunction::laguerre(1).unwrap();
/// // e^{-x/2} * (1 - x) at x = 0 is exactly 1
/// assert_eq!(lag1.evaluate(0.0), 1.0);
/// assert!(BasisFunction::laguerre(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasisFunction {
    /// Intercept term; evaluates to 1.0 everywhere.
    Constant,
    /// Monomial `x^power`.
    Monomial {
        /// Power of the monomial (any non-negative integer).
        power: u32,
    },
    /// Weighted Laguerre polynomial `e^{-x/2} L_n(x)`, orders 0..=5.
    ///
    /// Negative arguments are clamped to zero before evaluation so the
    /// exponential weight cannot explode.
    Laguerre {
        /// Polynomial order in `[0, 5]`.
        order: u32,
    },
    /// Probabilist's Hermite polynomial `He_n(x)`, orders 0..=5.
    Hermite {
        /// Polynomial order in `[0, 5]`.
        order: u32,
    },
}

impl BasisFunction {
    /// Creates the constant intercept term.
    #[inline]
    pub fn constant() -> Self {
        Self::Constant
    }

    /// Creates a monomial basis function `x^power`.
    #[inline]
    pub fn monomial(power: u32) -> Self {
        Self::Monomial { power }
    }

    /// Creates a weighted Laguerre basis function of the given order.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::OrderOutOfRange`] for `order > 5`.
    pub fn laguerre(order: u32) -> Result<Self, BasisError> {
        if order > MAX_POLY_ORDER {
            return Err(BasisError::OrderOutOfRange(order));
        }
        Ok(Self::Laguerre { order })
    }

    /// Creates a probabilist's Hermite basis function of the given order.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::OrderOutOfRange`] for `order > 5`.
    pub fn hermite(order: u32) -> Result<Self, BasisError> {
        if order > MAX_POLY_ORDER {
            return Err(BasisError::OrderOutOfRange(order));
        }
        Ok(Self::Hermite { order })
    }

    /// Evaluates the basis function at the given underlying price.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Constant => 1.0,
            // powi takes an i32 exponent; powers beyond its range go
            // through powf instead of wrapping negative.
            Self::Monomial { power } if power <= i32::MAX as u32 => x.powi(power as i32),
            Self::Monomial { power } => x.powf(f64::from(power)),
            Self::Laguerre { order } => {
                // The e^{-x/2} weight diverges for x < 0; the regression
                // state is a price, so clamp at zero.
                let x = x.max(0.0);
                (-x / 2.0).exp() * laguerre_poly(order, x)
            }
            Self::Hermite { order } => hermite_poly(order, x),
        }
    }

    /// Display name for diagnostic output.
    pub fn name(&self) -> String {
        match *self {
            Self::Constant => "Const".to_string(),
            Self::Monomial { power } => format!("x^{}", power),
            Self::Laguerre { order } => format!("Lag{}", order),
            Self::Hermite { order } => format!("He{}", order),
        }
    }
}

/// Unweighted Laguerre polynomial `L_n(x)` via the three-term recurrence
/// `(n+1) L_{n+1} = (2n+1-x) L_n - n L_{n-1}`.
fn laguerre_poly(order: u32, x: f64) -> f64 {
    let mut prev = 1.0; // L_0
    if order == 0 {
        return prev;
    }
    let mut curr = 1.0 - x; // L_1
    for n in 1..order as u64 {
        let n = n as f64;
        let next = ((2.0 * n + 1.0 - x) * curr - n * prev) / (n + 1.0);
        prev = curr;
        curr = next;
    }
    curr
}

/// Probabilist's Hermite polynomial `He_n(x)` via the recurrence
/// `He_{n+1} = x He_n - n He_{n-1}`.
fn hermite_poly(order: u32, x: f64) -> f64 {
    let mut prev = 1.0; // He_0
    if order == 0 {
        return prev;
    }
    let mut curr = x; // He_1
    for n in 1..order as u64 {
        let next = x * curr - n as f64 * prev;
        prev = curr;
        curr = next;
    }
    curr
}

/// Builds the canonical Laguerre basis set of size `m`.
///
/// Yields `m + 1` functions: the constant intercept followed by weighted
/// Laguerre polynomials of orders `0..m`.
///
/// # Errors
///
/// Returns [`BasisError::OrderOutOfRange`] when `m` would require an order
/// above 5.
pub fn laguerre_set(m: u32) -> Result<Vec<BasisFunction>, BasisError> {
    let mut set = Vec::with_capacity(m as usize + 1);
    set.push(BasisFunction::constant());
    for order in 0..m {
        set.push(BasisFunction::laguerre(order)?);
    }
    Ok(set)
}

/// Builds the canonical Hermite basis set of size `m` (constant prepended).
///
/// # Errors
///
/// Returns [`BasisError::OrderOutOfRange`] when `m` would require an order
/// above 5.
pub fn hermite_set(m: u32) -> Result<Vec<BasisFunction>, BasisError> {
    let mut set = Vec::with_capacity(m as usize + 1);
    set.push(BasisFunction::constant());
    for order in 0..m {
        set.push(BasisFunction::hermite(order)?);
    }
    Ok(set)
}

/// Builds a monomial basis set of size `m` (constant prepended, then
/// `x^0 .. x^{m-1}`).
pub fn monomial_set(m: u32) -> Vec<BasisFunction> {
    let mut set = Vec::with_capacity(m as usize + 1);
    set.push(BasisFunction::constant());
    for power in 0..m {
        set.push(BasisFunction::monomial(power));
    }
    set
}
