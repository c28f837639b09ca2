//! Longstaff-Schwartz pricing kernel.
//!
//! The kernel simulates a grid of underlying paths, runs the backward
//! induction from maturity to the first exercise date (fitting a
//! cross-sectional regression of discounted future cash flows on the
//! basis functions at each date, over in-the-money paths only), and
//! aggregates the resulting discounted cash flows into a value and
//! standard-error estimate.
//!
//! The backward sweep is strictly sequential across exercise dates: each
//! date's policy depends on the later dates' realised cash flows. Within
//! a date there are no inter-path dependencies.

pub mod config;
pub mod error;
pub mod policy;
pub mod pricer;
pub mod regression;

pub use config::{LsmConfig, LsmConfigBuilder};
pub use error::{ConfigError, PricingError};
pub use policy::ExercisePolicy;
pub use pricer::{LsmPricer, ValuationResult};
