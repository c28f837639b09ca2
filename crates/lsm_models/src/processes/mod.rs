//! Stochastic process abstraction and path-grid storage.
//!
//! A process evolves a single underlying price one step at a time; the
//! provided [`StochasticProcess::simulate`] drives the per-step evolution
//! across a whole grid of paths, including antithetic pairing.
//!
//! # Memory Layout
//!
//! Paths are stored row-major in a flat buffer:
//! `grid[path_idx * (n_steps + 1) + step_idx]`, where step 0 holds the
//! initial spot.

mod gbm;
mod jump_diffusion;

pub use gbm::GeometricBrownianMotion;
pub use jump_diffusion::JumpDiffusion;

use crate::rng::SimulationRng;

/// Grid of simulated underlying prices, one row per path.
///
/// Produced by [`StochasticProcess::simulate`] and owned exclusively by
/// one pricing run.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGrid {
    data: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl PathGrid {
    /// Creates a zero-filled grid for `n_paths` paths of `n_steps` steps.
    pub fn zeros(n_paths: usize, n_steps: usize) -> Self {
        Self {
            data: vec![0.0; n_paths * (n_steps + 1)],
            n_paths,
            n_steps,
        }
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path (grid rows have `n_steps + 1` prices).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Price of `path` at time-step `step` (step 0 is the initial spot).
    #[inline]
    pub fn price(&self, path: usize, step: usize) -> f64 {
        self.data[path * (self.n_steps + 1) + step]
    }

    /// Terminal price of `path`.
    #[inline]
    pub fn terminal(&self, path: usize) -> f64 {
        self.price(path, self.n_steps)
    }

    #[inline]
    fn set(&mut self, path: usize, step: usize, value: f64) {
        self.data[path * (self.n_steps + 1) + step] = value;
    }
}

/// A single-factor stochastic process for the underlying price.
///
/// Implementors define the one-step transition; the provided
/// [`simulate`](Self::simulate) method owns the randomness for the
/// duration of one call and fills a [`PathGrid`] deterministically given
/// the generator's seed.
pub trait StochasticProcess {
    /// Evolves `price` over one step of length `dt`.
    ///
    /// `z` is the standard normal diffusion draw for this step; any
    /// additional randomness (e.g. jump counts) is taken from `rng`.
    fn evolve_step(&self, price: f64, dt: f64, z: f64, rng: &mut SimulationRng) -> f64;

    /// Process name for diagnostics.
    fn process_name(&self) -> &'static str;

    /// Simulates a grid of price paths starting from `spot`.
    ///
    /// With `antithetic` set, paths are generated in pairs sharing the
    /// same diffusion normals negated; `n_paths` must then be even (the
    /// pricer configuration enforces this). Jump draws, where a process
    /// has them, are redrawn per path since a Poisson count has no
    /// mirror image.
    fn simulate(
        &self,
        spot: f64,
        n_steps: usize,
        dt: f64,
        n_paths: usize,
        antithetic: bool,
        rng: &mut SimulationRng,
    ) -> PathGrid {
        let mut grid = PathGrid::zeros(n_paths, n_steps);

        if antithetic {
            debug_assert!(n_paths % 2 == 0);
            let mut normals = vec![0.0; n_steps];
            for pair in 0..n_paths / 2 {
                let (a, b) = (2 * pair, 2 * pair + 1);
                rng.fill_normal(&mut normals);

                let mut price = spot;
                grid.set(a, 0, price);
                for (step, &z) in normals.iter().enumerate() {
                    price = self.evolve_step(price, dt, z, rng);
                    grid.set(a, step + 1, price);
                }

                let mut price = spot;
                grid.set(b, 0, price);
                for (step, &z) in normals.iter().enumerate() {
                    price = self.evolve_step(price, dt, -z, rng);
                    grid.set(b, step + 1, price);
                }
            }
        } else {
            for path in 0..n_paths {
                let mut price = spot;
                grid.set(path, 0, price);
                for step in 0..n_steps {
                    let z = rng.gen_normal();
                    price = self.evolve_step(price, dt, z, rng);
                    grid.set(path, step + 1, price);
                }
            }
        }

        grid
    }
}
