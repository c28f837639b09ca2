//! Vanilla payoff definitions.
//!
//! A payoff maps an underlying price to an immediate exercise value. The
//! pricer evaluates it at every exercise date, so it is a pure function of
//! the price with no state beyond the strike.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side of a vanilla option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionType {
    /// Put option: `max(K - S, 0)`.
    Put,
    /// Call option: `max(S - K, 0)`.
    Call,
}

/// Vanilla option payoff with a fixed strike.
///
/// # Examples
///
/// ```rust
/// use lsm_models::{OptionType, VanillaPayoff};
///
/// let put = VanillaPayoff::put(40.0);
/// assert_eq!(put.exercise_value(36.0), 4.0);
/// assert_eq!(put.exercise_value(44.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VanillaPayoff {
    /// Option side.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
}

impl VanillaPayoff {
    /// Creates a put payoff with the given strike.
    #[inline]
    pub fn put(strike: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
        }
    }

    /// Creates a call payoff with the given strike.
    #[inline]
    pub fn call(strike: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
        }
    }

    /// Immediate exercise value at the given underlying price.
    #[inline]
    pub fn exercise_value(&self, price: f64) -> f64 {
        match self.option_type {
            OptionType::Put => (self.strike - price).max(0.0),
            OptionType::Call => (price - self.strike).max(0.0),
        }
    }
}
