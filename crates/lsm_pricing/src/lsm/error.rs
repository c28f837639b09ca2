//! Error types for the pricing kernel.
//!
//! Construction errors (invalid configuration, invalid basis) and input
//! errors (non-positive spot) surface as `Result`s. Mid-computation
//! numerical degeneracy never does: a singular design matrix or empty
//! in-the-money subset falls back to a zero continuation estimate and is
//! logged as a diagnostic.

use lsm_models::BasisError;
use thiserror::Error;

/// Configuration error for the LSM pricer.
///
/// Raised at construction when invalid parameters are provided; values
/// are never silently clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside the valid range.
    #[error("invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Exercise-date count outside the valid range.
    #[error("invalid exercise-date count {0}: must be in range [1, 10_000]")]
    InvalidExerciseDateCount(usize),

    /// Maturity must be positive and finite.
    #[error("invalid maturity: must be positive and finite")]
    InvalidMaturity,

    /// Risk-free rate must be finite.
    #[error("invalid risk-free rate: must be finite")]
    InvalidRate,

    /// Antithetic pairing needs an even path count.
    #[error("antithetic pairing requires an even path count, got {0}")]
    OddAntitheticPathCount(usize),

    /// Required builder parameter was not specified.
    #[error("missing parameter '{0}': must be specified")]
    MissingParameter(&'static str),

    /// The basis set handed to the pricer was empty.
    #[error("basis set must not be empty")]
    EmptyBasis,
}

/// Pricing error for `LsmPricer` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Spot price rejected before simulation begins.
    #[error("invalid spot price {0}: must be positive and finite")]
    InvalidSpot(f64),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid basis-function construction.
    #[error(transparent)]
    Basis(#[from] BasisError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("invalid path count 0"));

        let err = ConfigError::OddAntitheticPathCount(999);
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn test_pricing_error_from_config() {
        let err: PricingError = ConfigError::EmptyBasis.into();
        assert_eq!(err.to_string(), "basis set must not be empty");
    }

    #[test]
    fn test_pricing_error_from_basis() {
        let err: PricingError = BasisError::OrderOutOfRange(9).into();
        assert!(err.to_string().contains("order 9"));
    }
}
