//! The Longstaff-Schwartz pricer.

use lsm_models::{BasisFunction, SimulationRng, StochasticProcess, VanillaPayoff};

use super::config::LsmConfig;
use super::error::{ConfigError, PricingError};
use super::policy::ExercisePolicy;
use super::regression;

/// Result of one pricing run.
///
/// All values are in currency units at the valuation date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationResult {
    /// American-style option value (LSM estimate, a lower bound).
    pub option_value: f64,
    /// European value from the same paths (discounted terminal payoffs).
    pub european_value: f64,
    /// `option_value - european_value`; the value of the exercise right.
    pub early_exercise_premium: f64,
    /// Monte Carlo standard error of `option_value`.
    pub std_error: f64,
}

impl ValuationResult {
    /// 95% confidence interval around the option value.
    pub fn confidence_95(&self) -> (f64, f64) {
        (
            self.option_value - 1.96 * self.std_error,
            self.option_value + 1.96 * self.std_error,
        )
    }
}

/// Per-path cash-flow record during the backward induction.
///
/// `amount` is undiscounted; `date` is the exercise-date index at which
/// it occurs. Discounting happens against the valuation date only when
/// cash flows are aggregated or used as regression targets.
#[derive(Debug, Clone, Copy)]
struct CashFlow {
    amount: f64,
    date: usize,
}

/// Least-squares Monte Carlo pricer for American-style vanilla options.
///
/// Owns its process, payoff, and basis set for the lifetime of the
/// pricer; each call to [`price`](Self::price) runs a complete, fresh
/// simulation from the configured seed, so repeated calls are
/// bit-identical.
#[derive(Debug, Clone)]
pub struct LsmPricer<P: StochasticProcess> {
    config: LsmConfig,
    process: P,
    payoff: VanillaPayoff,
    basis: Vec<BasisFunction>,
}

impl<P: StochasticProcess> LsmPricer<P> {
    /// Creates a pricer, validating the configuration and basis set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation or
    /// the basis set is empty.
    pub fn new(
        config: LsmConfig,
        process: P,
        payoff: VanillaPayoff,
        basis: Vec<BasisFunction>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if basis.is_empty() {
            return Err(ConfigError::EmptyBasis);
        }
        Ok(Self {
            config,
            process,
            payoff,
            basis,
        })
    }

    /// The pricer's configuration.
    #[inline]
    pub fn config(&self) -> &LsmConfig {
        &self.config
    }

    /// The regression basis set.
    #[inline]
    pub fn basis(&self) -> &[BasisFunction] {
        &self.basis
    }

    /// Prices the option for the given spot.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidSpot`] if `spot` is not positive
    /// and finite. Numerical degeneracy during the backward induction is
    /// recovered internally and never surfaces as an error.
    pub fn price(&self, spot: f64) -> Result<ValuationResult, PricingError> {
        let (_, result) = self.run_backward_induction(spot)?;
        Ok(result)
    }

    /// Prices the option and returns the fitted exercise policy with it.
    ///
    /// The policy holds the per-date regression coefficients and can be
    /// replayed on an independent path set with
    /// [`price_with_policy`](Self::price_with_policy).
    ///
    /// # Errors
    ///
    /// Same conditions as [`price`](Self::price).
    pub fn fit_policy(&self, spot: f64) -> Result<(ExercisePolicy, ValuationResult), PricingError> {
        self.run_backward_induction(spot)
    }

    /// Applies a previously fitted policy forward on freshly simulated
    /// paths.
    ///
    /// Each path exercises at the first date where it is in the money
    /// and the intrinsic payoff is at least the policy's continuation
    /// estimate; otherwise it collects the terminal payoff. No
    /// regression is performed, so the estimate is out-of-sample with
    /// respect to the paths that fitted `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidSpot`] if `spot` is not positive
    /// and finite.
    pub fn price_with_policy(
        &self,
        spot: f64,
        policy: &ExercisePolicy,
    ) -> Result<ValuationResult, PricingError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(PricingError::InvalidSpot(spot));
        }

        let n_steps = self.config.n_exercise_dates();
        let dt = self.config.dt();
        let rate = self.config.rate();
        let n_paths = self.config.n_paths();

        let mut rng = SimulationRng::from_seed(self.config.seed());
        let grid = self
            .process
            .simulate(spot, n_steps, dt, n_paths, self.config.antithetic(), &mut rng);

        let mut discounted = Vec::with_capacity(n_paths);
        let mut european = Vec::with_capacity(n_paths);
        for path in 0..n_paths {
            let mut cash_flow = CashFlow {
                amount: self.payoff.exercise_value(grid.terminal(path)),
                date: n_steps,
            };
            for t in 1..n_steps {
                let price = grid.price(path, t);
                let intrinsic = self.payoff.exercise_value(price);
                if intrinsic > 0.0 && intrinsic >= self.policy_continuation(policy, t, price) {
                    cash_flow = CashFlow {
                        amount: intrinsic,
                        date: t,
                    };
                    break;
                }
            }
            discounted.push(cash_flow.amount * (-rate * dt * cash_flow.date as f64).exp());
            european
                .push(self.payoff.exercise_value(grid.terminal(path)) * (-rate * dt * n_steps as f64).exp());
        }

        Ok(self.aggregate(&discounted, &european))
    }

    /// Continuation estimate from a frozen policy. A missing or
    /// non-finite fit degrades to zero, matching the in-sample fallback.
    /// A coefficient vector whose length does not match this pricer's
    /// basis (a policy fitted by a differently configured pricer)
    /// degrades the same way.
    fn policy_continuation(&self, policy: &ExercisePolicy, date: usize, price: f64) -> f64 {
        match policy.coefficients(date) {
            Some(coeffs) if coeffs.len() == self.basis.len() => {
                let value = regression::continuation_value(&self.basis, coeffs, price);
                if value.is_finite() {
                    value
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    fn run_backward_induction(
        &self,
        spot: f64,
    ) -> Result<(ExercisePolicy, ValuationResult), PricingError> {
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(PricingError::InvalidSpot(spot));
        }

        let n_steps = self.config.n_exercise_dates();
        let dt = self.config.dt();
        let rate = self.config.rate();
        let n_paths = self.config.n_paths();

        tracing::debug!(
            process = self.process.process_name(),
            n_paths,
            n_exercise_dates = n_steps,
            spot,
            "starting LSM backward induction"
        );

        let mut rng = SimulationRng::from_seed(self.config.seed());
        let grid = self
            .process
            .simulate(spot, n_steps, dt, n_paths, self.config.antithetic(), &mut rng);

        // Seed each path's record with exercise at maturity.
        let mut cash_flows: Vec<CashFlow> = (0..n_paths)
            .map(|path| CashFlow {
                amount: self.payoff.exercise_value(grid.terminal(path)),
                date: n_steps,
            })
            .collect();

        let mut policy = ExercisePolicy::new(n_steps);

        // Reused per-date buffers for the in-the-money cross-section.
        let mut itm: Vec<usize> = Vec::with_capacity(n_paths);
        let mut x: Vec<f64> = Vec::with_capacity(n_paths);
        let mut y: Vec<f64> = Vec::with_capacity(n_paths);

        for t in (1..n_steps).rev() {
            itm.clear();
            x.clear();
            y.clear();

            for path in 0..n_paths {
                let price = grid.price(path, t);
                if self.payoff.exercise_value(price) > 0.0 {
                    itm.push(path);
                    x.push(price);
                    let cf = cash_flows[path];
                    // Discount the realised cash flow back to date t.
                    y.push(cf.amount * (-rate * dt * (cf.date - t) as f64).exp());
                }
            }

            let coeffs = regression::fit_continuation(&self.basis, &x, &y);
            if coeffs.is_none() && !itm.is_empty() {
                tracing::debug!(
                    date = t,
                    itm_count = itm.len(),
                    "degenerate regression, zero continuation at this date"
                );
            }

            for (&path, &price) in itm.iter().zip(x.iter()) {
                let intrinsic = self.payoff.exercise_value(price);
                let exercise = match &coeffs {
                    Some(c) => {
                        let continuation =
                            regression::continuation_value(&self.basis, c, price);
                        // A non-finite estimate cannot justify stopping.
                        continuation.is_finite() && intrinsic >= continuation
                    }
                    None => true,
                };
                if exercise {
                    cash_flows[path] = CashFlow {
                        amount: intrinsic,
                        date: t,
                    };
                }
            }

            policy.set(t, coeffs);
        }

        let discounted: Vec<f64> = cash_flows
            .iter()
            .map(|cf| cf.amount * (-rate * dt * cf.date as f64).exp())
            .collect();
        let european: Vec<f64> = (0..n_paths)
            .map(|path| {
                self.payoff.exercise_value(grid.terminal(path))
                    * (-rate * dt * n_steps as f64).exp()
            })
            .collect();

        Ok((policy, self.aggregate(&discounted, &european)))
    }

    fn aggregate(&self, discounted: &[f64], european: &[f64]) -> ValuationResult {
        let (option_value, std_error) = if self.config.antithetic() {
            // Pair members share draws, so the error comes from the
            // independent pair averages.
            let pairs: Vec<f64> = discounted
                .chunks_exact(2)
                .map(|pair| 0.5 * (pair[0] + pair[1]))
                .collect();
            mean_and_stderr(&pairs)
        } else {
            mean_and_stderr(discounted)
        };
        let european_value = mean(european);

        ValuationResult {
            option_value,
            european_value,
            early_exercise_premium: option_value - european_value,
            std_error,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample mean and standard error of the mean.
fn mean_and_stderr(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    let m = mean(values);
    if n < 2 {
        return (m, 0.0);
    }
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64;
    (m, (variance / n as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lsm_models::{laguerre_set, GeometricBrownianMotion, JumpDiffusion};
    use proptest::prelude::*;

    fn put_pricer(n_paths: usize, seed: u64) -> LsmPricer<GeometricBrownianMotion> {
        let config = LsmConfig::builder()
            .n_paths(n_paths)
            .n_exercise_dates(50)
            .maturity(1.0)
            .rate(0.06)
            .seed(seed)
            .build()
            .unwrap();
        LsmPricer::new(
            config,
            GeometricBrownianMotion::new(0.06, 0.20),
            VanillaPayoff::put(40.0),
            laguerre_set(3).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_basis_rejected() {
        let config = LsmConfig::builder()
            .n_paths(100)
            .n_exercise_dates(10)
            .maturity(1.0)
            .build()
            .unwrap();
        let result = LsmPricer::new(
            config,
            GeometricBrownianMotion::new(0.05, 0.2),
            VanillaPayoff::put(40.0),
            vec![],
        );
        assert!(matches!(result, Err(ConfigError::EmptyBasis)));
    }

    #[test]
    fn test_invalid_spot_rejected() {
        let pricer = put_pricer(1000, 1);
        assert!(matches!(
            pricer.price(0.0),
            Err(PricingError::InvalidSpot(_))
        ));
        assert!(matches!(
            pricer.price(-5.0),
            Err(PricingError::InvalidSpot(_))
        ));
        assert!(matches!(
            pricer.price(f64::NAN),
            Err(PricingError::InvalidSpot(_))
        ));
    }

    #[test]
    fn test_repeated_calls_bit_identical() {
        let pricer = put_pricer(2000, 42);
        let a = pricer.price(40.0).unwrap();
        let b = pricer.price(40.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_premium_non_negative_within_noise() {
        let pricer = put_pricer(5000, 7);
        let result = pricer.price(40.0).unwrap();
        assert!(result.option_value > 0.0);
        assert!(result.std_error > 0.0);
        assert!(result.early_exercise_premium >= -3.0 * result.std_error);
        assert_relative_eq!(
            result.early_exercise_premium,
            result.option_value - result.european_value,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_deep_itm_put_near_intrinsic() {
        // Spot far below strike: the put is worth at least its intrinsic
        // value, exercised immediately or very early.
        let pricer = put_pricer(5000, 3);
        let result = pricer.price(10.0).unwrap();
        assert!(result.option_value >= 29.0, "value {}", result.option_value);
    }

    #[test]
    fn test_deep_otm_put_near_zero() {
        let pricer = put_pricer(5000, 3);
        let result = pricer.price(400.0).unwrap();
        assert!(result.option_value < 0.01, "value {}", result.option_value);
    }

    #[test]
    fn test_confidence_interval_brackets_value() {
        let pricer = put_pricer(2000, 11);
        let result = pricer.price(40.0).unwrap();
        let (lo, hi) = result.confidence_95();
        assert!(lo <= result.option_value && result.option_value <= hi);
        assert_relative_eq!(hi - lo, 2.0 * 1.96 * result.std_error, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_policy_matches_price() {
        let pricer = put_pricer(2000, 42);
        let (policy, in_sample) = pricer.fit_policy(40.0).unwrap();
        assert_eq!(policy.n_dates(), 50);
        assert_eq!(in_sample, pricer.price(40.0).unwrap());
        // Interior dates of an at-the-money put have in-the-money paths,
        // so most slots carry fitted coefficients.
        assert!(policy.coefficients(25).is_some());
    }

    #[test]
    fn test_policy_replay_on_same_paths_reprices_closely() {
        // Replaying the fitted policy on the paths that produced it
        // differs from the in-sample value only through the per-date
        // fallback edge cases, so the two estimates must be close.
        let pricer = put_pricer(5000, 13);
        let (policy, in_sample) = pricer.fit_policy(40.0).unwrap();
        let replay = pricer.price_with_policy(40.0, &policy).unwrap();
        assert!(
            (replay.option_value - in_sample.option_value).abs() < 4.0 * in_sample.std_error,
            "replay {} vs in-sample {}",
            replay.option_value,
            in_sample.option_value
        );
    }

    fn antithetic_put_pricer(n_paths: usize) -> LsmPricer<GeometricBrownianMotion> {
        let config = LsmConfig::builder()
            .n_paths(n_paths)
            .n_exercise_dates(50)
            .maturity(1.0)
            .rate(0.06)
            .antithetic(true)
            .seed(5)
            .build()
            .unwrap();
        LsmPricer::new(
            config,
            GeometricBrownianMotion::new(0.06, 0.20),
            VanillaPayoff::put(40.0),
            laguerre_set(3).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_antithetic_std_error_from_pair_averages() {
        // With pairing on, aggregation must collapse each adjacent pair
        // to its average before computing the error: [1,3] and [5,7]
        // become [2, 6], whose mean is 4 and standard error
        // std([2, 6]) / sqrt(2) = 2. The raw four-element error would
        // be sqrt(20/3)/2 instead.
        let pricer = antithetic_put_pricer(4);
        let discounted = [1.0, 3.0, 5.0, 7.0];
        let european = [0.0; 4];
        let result = pricer.aggregate(&discounted, &european);
        assert_relative_eq!(result.option_value, 4.0, epsilon = 1e-12);
        assert_relative_eq!(result.std_error, 2.0, epsilon = 1e-12);

        let (pair_mean, pair_se) = mean_and_stderr(&[2.0, 6.0]);
        assert_eq!(result.option_value, pair_mean);
        assert_eq!(result.std_error, pair_se);

        let (_, raw_se) = mean_and_stderr(&discounted);
        assert_ne!(result.std_error, raw_se);
    }

    #[test]
    fn test_antithetic_pricing_run() {
        let result = antithetic_put_pricer(4000).price(40.0).unwrap();
        assert!(result.option_value > 0.0);
        assert!(result.std_error > 0.0);
    }

    #[test]
    fn test_mismatched_policy_replays_as_zero_continuation() {
        // A policy fitted under a wider basis carries coefficient
        // vectors this pricer's basis cannot evaluate; replay must
        // degrade those dates to zero continuation, exactly as if the
        // policy had no fit there.
        let narrow = put_pricer(2000, 13);
        let wide = LsmPricer::new(
            narrow.config().clone(),
            GeometricBrownianMotion::new(0.06, 0.20),
            VanillaPayoff::put(40.0),
            laguerre_set(5).unwrap(),
        )
        .unwrap();
        let (foreign_policy, _) = wide.fit_policy(40.0).unwrap();
        let replayed = narrow.price_with_policy(40.0, &foreign_policy).unwrap();
        let unfitted = ExercisePolicy::new(narrow.config().n_exercise_dates());
        let zero = narrow.price_with_policy(40.0, &unfitted).unwrap();
        assert_eq!(replayed, zero);
    }

    #[test]
    fn test_jump_diffusion_prices() {
        let config = LsmConfig::builder()
            .n_paths(2000)
            .n_exercise_dates(50)
            .maturity(1.0)
            .rate(0.06)
            .seed(21)
            .build()
            .unwrap();
        let pricer = LsmPricer::new(
            config,
            JumpDiffusion::new(0.06, 0.20, 0.1),
            VanillaPayoff::put(40.0),
            laguerre_set(3).unwrap(),
        )
        .unwrap();
        let result = pricer.price(40.0).unwrap();
        assert!(result.option_value.is_finite());
        assert!(result.option_value > 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_price_deterministic_for_any_seed(seed in 0u64..10_000, spot in 20.0..60.0_f64) {
            let pricer = put_pricer(200, seed);
            let first = pricer.price(spot).unwrap();
            let second = pricer.price(spot).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_result_identities_hold(seed in 0u64..10_000, spot in 20.0..60.0_f64) {
            let result = put_pricer(200, seed).price(spot).unwrap();
            prop_assert!(result.option_value >= 0.0);
            prop_assert!(result.std_error >= 0.0);
            prop_assert!(
                (result.early_exercise_premium
                    - (result.option_value - result.european_value))
                    .abs()
                    < 1e-12
            );
        }
    }

    #[test]
    fn test_mean_and_stderr() {
        let (m, se) = mean_and_stderr(&[1.0, 2.0, 3.0, 4.0]);
        assert_relative_eq!(m, 2.5, epsilon = 1e-12);
        // Sample variance 5/3; SE = sqrt(5/12).
        assert_relative_eq!(se, (5.0_f64 / 12.0).sqrt(), epsilon = 1e-12);

        let (m, se) = mean_and_stderr(&[7.0]);
        assert_eq!(m, 7.0);
        assert_eq!(se, 0.0);
    }
}
