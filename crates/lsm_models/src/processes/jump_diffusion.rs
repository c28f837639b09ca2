//! Merton jump-diffusion.
//!
//! GBM diffusion composed with a compound-Poisson jump component per step:
//! the jump count is Poisson(`lambda * dt`) and each jump multiplies the
//! price by a lognormal factor `exp(mu_j + sigma_j * eps)`. The diffusion
//! drift carries the Merton compensator `-lambda * (E[e^J] - 1)` so that
//! `lambda = 0` reduces exactly to GBM and the discounted price remains a
//! martingale.

use super::StochasticProcess;
use crate::rng::SimulationRng;

/// Default mean of the lognormal jump size exponent.
const DEFAULT_JUMP_MEAN: f64 = -0.10;

/// Default volatility of the lognormal jump size exponent.
const DEFAULT_JUMP_VOLATILITY: f64 = 0.15;

/// Merton-style jump-diffusion process.
///
/// # Examples
///
/// ```rust
/// use lsm_models::JumpDiffusion;
///
/// // rate, diffusion volatility, jump intensity (jumps per year)
/// let process = JumpDiffusion::new(0.06, 0.20, 0.10);
/// assert_eq!(process.jump_intensity, 0.10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpDiffusion {
    /// Risk-free rate (annualised).
    pub rate: f64,
    /// Diffusion volatility (annualised).
    pub volatility: f64,
    /// Jump intensity lambda (expected jumps per year).
    pub jump_intensity: f64,
    /// Mean of the lognormal jump exponent.
    pub jump_mean: f64,
    /// Volatility of the lognormal jump exponent.
    pub jump_volatility: f64,
}

impl JumpDiffusion {
    /// Creates a jump-diffusion process with default jump-size parameters.
    ///
    /// Mirrors the three-argument form used by the reference cases:
    /// `lambda = 0` is pure GBM.
    #[inline]
    pub fn new(rate: f64, volatility: f64, jump_intensity: f64) -> Self {
        Self {
            rate,
            volatility,
            jump_intensity,
            jump_mean: DEFAULT_JUMP_MEAN,
            jump_volatility: DEFAULT_JUMP_VOLATILITY,
        }
    }

    /// Overrides the lognormal jump-size parameters.
    #[inline]
    pub fn with_jump_params(mut self, jump_mean: f64, jump_volatility: f64) -> Self {
        self.jump_mean = jump_mean;
        self.jump_volatility = jump_volatility;
        self
    }

    /// Merton compensator `lambda * (E[e^J] - 1)`.
    #[inline]
    fn jump_compensator(&self) -> f64 {
        let expected_jump =
            (self.jump_mean + 0.5 * self.jump_volatility * self.jump_volatility).exp();
        self.jump_intensity * (expected_jump - 1.0)
    }
}

impl StochasticProcess for JumpDiffusion {
    fn evolve_step(&self, price: f64, dt: f64, z: f64, rng: &mut SimulationRng) -> f64 {
        // Compensated diffusion step.
        let drift = (self.rate
            - self.jump_compensator()
            - 0.5 * self.volatility * self.volatility)
            * dt;
        let diffusion = self.volatility * dt.sqrt() * z;
        let diffused = price * (drift + diffusion).exp();

        // Compound-Poisson jump factor, applied multiplicatively.
        let n_jumps = rng.gen_poisson(self.jump_intensity * dt);
        let mut jump_exponent = 0.0;
        for _ in 0..n_jumps {
            jump_exponent += self.jump_mean + self.jump_volatility * rng.gen_normal();
        }
        diffused * jump_exponent.exp()
    }

    fn process_name(&self) -> &'static str {
        "JumpDiffusion"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_intensity_matches_gbm() {
        use super::super::GeometricBrownianMotion;

        let jd = JumpDiffusion::new(0.06, 0.2, 0.0);
        let gbm = GeometricBrownianMotion::new(0.06, 0.2);
        let mut rng_a = SimulationRng::from_seed(3);
        let mut rng_b = SimulationRng::from_seed(3);
        for z in [-1.5, -0.2, 0.0, 0.4, 2.1] {
            let a = jd.evolve_step(40.0, 0.02, z, &mut rng_a);
            let b = gbm.evolve_step(40.0, 0.02, z, &mut rng_b);
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_jump_params_override() {
        let jd = JumpDiffusion::new(0.06, 0.2, 0.1).with_jump_params(-0.2, 0.3);
        assert_eq!(jd.jump_mean, -0.2);
        assert_eq!(jd.jump_volatility, 0.3);
    }

    #[test]
    fn test_paths_positive_and_finite() {
        let jd = JumpDiffusion::new(0.06, 0.2, 0.5);
        let mut rng = SimulationRng::from_seed(42);
        let grid = jd.simulate(40.0, 50, 0.02, 200, false, &mut rng);
        for path in 0..grid.n_paths() {
            for step in 0..=grid.n_steps() {
                let p = grid.price(path, step);
                assert!(p > 0.0 && p.is_finite());
            }
        }
    }

    #[test]
    fn test_risk_neutral_terminal_mean_with_jumps() {
        // The compensator keeps E[S(T)] = S(0) * exp(r*T) even with jumps.
        let jd = JumpDiffusion::new(0.05, 0.2, 1.0);
        let mut rng = SimulationRng::from_seed(42);
        let n_paths = 100_000;
        let grid = jd.simulate(100.0, 4, 0.25, n_paths, false, &mut rng);
        let mean: f64 =
            (0..n_paths).map(|p| grid.terminal(p)).sum::<f64>() / n_paths as f64;
        let expected = 100.0 * 0.05_f64.exp();
        assert_relative_eq!(mean, expected, max_relative = 0.03);
    }
}
