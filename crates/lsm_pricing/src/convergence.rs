//! Convergence diagnostics for the LSM pricer.
//!
//! Thin outer loops over the pricer, varying one axis at a time: basis
//! size, path count, or the in-sample/out-of-sample path-set pairing.
//! Each driver is a pure associated function consuming a base
//! configuration; no state is shared across calls.

use lsm_models::{laguerre_set, GeometricBrownianMotion, VanillaPayoff};

use crate::lsm::{LsmConfig, LsmPricer, PricingError, ValuationResult};

/// One point of the value-versus-basis-size series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisSizePoint {
    /// Laguerre basis size `m` (the set holds `m + 1` functions).
    pub m: u32,
    /// Option value estimate.
    pub value: f64,
    /// Monte Carlo standard error.
    pub std_error: f64,
}

/// One point of the value-versus-path-count series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCountPoint {
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Option value estimate.
    pub value: f64,
    /// Monte Carlo standard error.
    pub std_error: f64,
}

/// One in-sample/out-of-sample trial pair.
///
/// The in-sample result fitted the exercise policy; the out-of-sample
/// result applied that fixed policy to an independently seeded path set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutOfSampleTrial {
    /// Result on the path set the policy was fitted to.
    pub in_sample: ValuationResult,
    /// Result on the independent path set under the frozen policy.
    pub out_of_sample: ValuationResult,
}

impl OutOfSampleTrial {
    /// `in_sample.option_value - out_of_sample.option_value`; the
    /// in-sample optimism at this trial.
    #[inline]
    pub fn bias(&self) -> f64 {
        self.in_sample.option_value - self.out_of_sample.option_value
    }
}

/// Diagnostic drivers over the pricer.
///
/// All drivers price an American put under geometric Brownian motion
/// with the configuration's rate as the risk-neutral drift, matching
/// the scenario family the convergence literature reports on.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceAnalyzer;

impl ConvergenceAnalyzer {
    /// Value versus Laguerre basis size, for `m = 1..=max_m`.
    ///
    /// Each point runs a fresh pricer on the same configuration and
    /// seed, so the series isolates the effect of the basis alone.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if a basis set cannot be built (order
    /// above the supported range) or a pricing run rejects its input.
    pub fn by_basis_size(
        config: &LsmConfig,
        spot: f64,
        strike: f64,
        sigma: f64,
        max_m: u32,
    ) -> Result<Vec<BasisSizePoint>, PricingError> {
        let mut series = Vec::with_capacity(max_m as usize);
        for m in 1..=max_m {
            let pricer = LsmPricer::new(
                config.clone(),
                GeometricBrownianMotion::new(config.rate(), sigma),
                VanillaPayoff::put(strike),
                laguerre_set(m)?,
            )?;
            let result = pricer.price(spot)?;
            series.push(BasisSizePoint {
                m,
                value: result.option_value,
                std_error: result.std_error,
            });
        }
        Ok(series)
    }

    /// Value versus path count, with a fixed 3-term Laguerre basis.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if a requested path count fails
    /// configuration validation or a pricing run rejects its input.
    pub fn by_path_count(
        config: &LsmConfig,
        spot: f64,
        strike: f64,
        sigma: f64,
        path_counts: &[usize],
    ) -> Result<Vec<PathCountPoint>, PricingError> {
        let mut series = Vec::with_capacity(path_counts.len());
        for &n_paths in path_counts {
            let pricer = LsmPricer::new(
                config.with_n_paths(n_paths)?,
                GeometricBrownianMotion::new(config.rate(), sigma),
                VanillaPayoff::put(strike),
                laguerre_set(3)?,
            )?;
            let result = pricer.price(spot)?;
            series.push(PathCountPoint {
                n_paths,
                value: result.option_value,
                std_error: result.std_error,
            });
        }
        Ok(series)
    }

    /// Paired in-sample/out-of-sample trials.
    ///
    /// Trial `i` fits the exercise policy on a path set seeded
    /// `seed + 2i` and replays the frozen policy on an independent set
    /// seeded `seed + 2i + 1`. The out-of-sample value is free of the
    /// regression's in-sample optimism.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if a pricing run rejects its input.
    pub fn out_of_sample(
        config: &LsmConfig,
        spot: f64,
        strike: f64,
        sigma: f64,
        n_trials: usize,
    ) -> Result<Vec<OutOfSampleTrial>, PricingError> {
        let mut trials = Vec::with_capacity(n_trials);
        for i in 0..n_trials as u64 {
            let fit_config = config.with_seed(config.seed() + 2 * i);
            let replay_config = config.with_seed(config.seed() + 2 * i + 1);

            let fit_pricer = LsmPricer::new(
                fit_config,
                GeometricBrownianMotion::new(config.rate(), sigma),
                VanillaPayoff::put(strike),
                laguerre_set(3)?,
            )?;
            let (policy, in_sample) = fit_pricer.fit_policy(spot)?;

            let replay_pricer = LsmPricer::new(
                replay_config,
                GeometricBrownianMotion::new(config.rate(), sigma),
                VanillaPayoff::put(strike),
                laguerre_set(3)?,
            )?;
            let out_of_sample = replay_pricer.price_with_policy(spot, &policy)?;

            trials.push(OutOfSampleTrial {
                in_sample,
                out_of_sample,
            });
        }
        Ok(trials)
    }
}
