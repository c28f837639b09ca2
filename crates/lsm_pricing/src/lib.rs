//! # LSM Pricing (engine layer)
//!
//! Longstaff-Schwartz least-squares Monte Carlo pricing of American-style
//! options, plus the convergence diagnostics that drive the pricer across
//! basis sizes, path counts, and independent path-set pairs.
//!
//! ## Architecture
//!
//! ```text
//! LsmPricer<P>
//! ├── LsmConfig            (simulation parameters, builder-validated)
//! ├── P: StochasticProcess (path simulation, lsm_models)
//! ├── VanillaPayoff        (exercise value, lsm_models)
//! ├── Vec<BasisFunction>   (regression features, lsm_models)
//! └── backward induction
//!     ├── in-the-money filter
//!     ├── regression::fit_continuation()  (normal equations)
//!     └── exercise decision per path
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use lsm_models::{laguerre_set, GeometricBrownianMotion, VanillaPayoff};
//! use lsm_pricing::{LsmConfig, LsmPricer};
//!
//! let config = LsmConfig::builder()
//!     .n_paths(2_000)
//!     .n_exercise_dates(25)
//!     .maturity(1.0)
//!     .rate(0.06)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let pricer = LsmPricer::new(
//!     config,
//!     GeometricBrownianMotion::new(0.06, 0.20),
//!     VanillaPayoff::put(40.0),
//!     laguerre_set(3).unwrap(),
//! )
//! .unwrap();
//!
//! let result = pricer.price(40.0).unwrap();
//! assert!(result.option_value >= result.european_value - 3.0 * result.std_error);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod convergence;
pub mod lsm;

pub use convergence::{
    BasisSizePoint, ConvergenceAnalyzer, OutOfSampleTrial, PathCountPoint,
};
pub use lsm::{
    ConfigError, ExercisePolicy, LsmConfig, LsmConfigBuilder, LsmPricer, PricingError,
    ValuationResult,
};

// Re-export the model layer so downstream users need a single import root.
pub use lsm_models as models;
