//! Seeded random number generation for path simulation.
//!
//! Wraps `rand::StdRng` behind a small simulation-oriented interface:
//! reproducible seeding, standard normal variates (Ziggurat via
//! `rand_distr::StandardNormal`) and Poisson counts for the jump process.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson, StandardNormal};

/// Simulation random number generator.
///
/// The same seed always produces the same draw sequence, so a pricer that
/// reconstructs its generator from the configured seed yields bit-identical
/// results across calls.
///
/// # Examples
///
/// ```rust
/// use lsm_models::SimulationRng;
///
/// let mut a = SimulationRng::from_seed(42);
/// let mut b = SimulationRng::from_seed(42);
/// assert_eq!(a.gen_normal(), b.gen_normal());
/// ```
pub struct SimulationRng {
    inner: StdRng,
    seed: u64,
}

impl SimulationRng {
    /// Creates a generator initialised with the given seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    ///
    /// Useful for logging reproducibility issues.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws a single standard normal variate (mean 0, std 1).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Draws a Poisson-distributed count with the given mean.
    ///
    /// Used for the jump count per step in the Merton jump-diffusion
    /// process. A non-positive mean yields zero jumps.
    #[inline]
    pub fn gen_poisson(&mut self, mean: f64) -> u64 {
        if mean <= 0.0 {
            return 0;
        }
        // Poisson::new only fails for non-positive or non-finite lambda,
        // which the guard above excludes.
        match Poisson::new(mean) {
            Ok(dist) => dist.sample(&mut self.inner) as u64,
            Err(_) => 0,
        }
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Zero-allocation batch operation; the buffer is caller-allocated.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimulationRng::from_seed(12345);
        let mut b = SimulationRng::from_seed(12345);
        for _ in 0..100 {
            assert_eq!(a.gen_normal(), b.gen_normal());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = SimulationRng::from_seed(1);
        let mut b = SimulationRng::from_seed(2);
        let differs = (0..32).any(|_| a.gen_normal() != b.gen_normal());
        assert!(differs);
    }

    #[test]
    fn test_seed_accessor() {
        let rng = SimulationRng::from_seed(7);
        assert_eq!(rng.seed(), 7);
    }

    #[test]
    fn test_fill_normal_matches_single_draws() {
        let mut a = SimulationRng::from_seed(99);
        let mut b = SimulationRng::from_seed(99);
        let mut buffer = vec![0.0; 16];
        a.fill_normal(&mut buffer);
        for &v in &buffer {
            assert_eq!(v, b.gen_normal());
        }
    }

    #[test]
    fn test_normal_sample_moments() {
        let mut rng = SimulationRng::from_seed(42);
        let n = 100_000;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for _ in 0..n {
            let z = rng.gen_normal();
            sum += z;
            sum_sq += z * z;
        }
        let mean = sum / n as f64;
        let var = sum_sq / n as f64 - mean * mean;
        assert!(mean.abs() < 0.02, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.03, "var = {}", var);
    }

    #[test]
    fn test_poisson_zero_mean() {
        let mut rng = SimulationRng::from_seed(42);
        assert_eq!(rng.gen_poisson(0.0), 0);
        assert_eq!(rng.gen_poisson(-1.0), 0);
    }

    #[test]
    fn test_poisson_sample_mean() {
        let mut rng = SimulationRng::from_seed(42);
        let n = 50_000;
        let lambda = 0.5;
        let total: u64 = (0..n).map(|_| rng.gen_poisson(lambda)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - lambda).abs() < 0.02, "mean = {}", mean);
    }
}
