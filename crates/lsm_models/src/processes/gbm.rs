//! Geometric Brownian Motion.
//!
//! Risk-neutral dynamics `dS = r S dt + sigma S dW`, stepped with the
//! exact lognormal solution for numerical stability:
//!
//! ```text
//! S(t+dt) = S(t) * exp((r - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)
//! ```

use super::StochasticProcess;
use crate::rng::SimulationRng;

/// Geometric Brownian Motion process.
///
/// # Examples
///
/// ```rust
/// use lsm_models::{GeometricBrownianMotion, SimulationRng, StochasticProcess};
///
/// let process = GeometricBrownianMotion::new(0.06, 0.20);
/// let mut rng = SimulationRng::from_seed(42);
/// let grid = process.simulate(40.0, 50, 0.02, 100, false, &mut rng);
/// assert_eq!(grid.price(0, 0), 40.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricBrownianMotion {
    /// Risk-free rate (annualised).
    pub rate: f64,
    /// Volatility (annualised).
    pub volatility: f64,
}

impl GeometricBrownianMotion {
    /// Creates a GBM process with the given rate and volatility.
    #[inline]
    pub fn new(rate: f64, volatility: f64) -> Self {
        Self { rate, volatility }
    }
}

impl StochasticProcess for GeometricBrownianMotion {
    #[inline]
    fn evolve_step(&self, price: f64, dt: f64, z: f64, _rng: &mut SimulationRng) -> f64 {
        let drift = (self.rate - 0.5 * self.volatility * self.volatility) * dt;
        let diffusion = self.volatility * dt.sqrt() * z;
        price * (drift + diffusion).exp()
    }

    fn process_name(&self) -> &'static str {
        "GBM"
    }
}
