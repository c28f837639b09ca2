//! # LSM Models (model layer)
//!
//! Leaf crate for the Longstaff-Schwartz pricer: stochastic processes,
//! vanilla payoffs, regression basis functions, and the seeded random
//! number generator that drives path simulation.
//!
//! The pricing engine itself lives in `lsm_pricing`; this crate carries
//! no regression or discounting logic.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch at the seams**: processes are generic trait
//!   implementors, basis functions are a tagged enum. No `Box<dyn Trait>`
//!   in hot paths.
//! - **Reproducibility**: all randomness flows through [`SimulationRng`],
//!   seeded deterministically.
//! - **Validation at construction**: invalid basis orders fail with
//!   [`BasisError`] rather than being clamped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod basis;
pub mod error;
pub mod payoffs;
pub mod processes;
pub mod rng;

pub use basis::{hermite_set, laguerre_set, monomial_set, BasisFunction};
pub use error::BasisError;
pub use payoffs::{OptionType, VanillaPayoff};
pub use processes::{GeometricBrownianMotion, JumpDiffusion, PathGrid, StochasticProcess};
pub use rng::SimulationRng;
