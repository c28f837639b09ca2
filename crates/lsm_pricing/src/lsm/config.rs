//! LSM simulation configuration.
//!
//! Immutable configuration with a fluent builder, validated at build
//! time. A pricer never mutates its configuration; the convergence
//! analyzer derives new configurations with [`LsmConfig::with_n_paths`]
//! and [`LsmConfig::with_seed`].

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of exercise dates allowed.
pub const MAX_EXERCISE_DATES: usize = 10_000;

/// Longstaff-Schwartz simulation configuration.
///
/// # Examples
///
/// ```rust
/// use lsm_pricing::LsmConfig;
///
/// let config = LsmConfig::builder()
///     .n_paths(10_000)
///     .n_exercise_dates(50)
///     .maturity(1.0)
///     .rate(0.06)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_exercise_dates(), 50);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LsmConfig {
    n_paths: usize,
    n_exercise_dates: usize,
    maturity: f64,
    rate: f64,
    antithetic: bool,
    seed: u64,
}

impl LsmConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LsmConfigBuilder {
        LsmConfigBuilder::default()
    }

    /// Number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of discrete exercise dates (time steps per path).
    #[inline]
    pub fn n_exercise_dates(&self) -> usize {
        self.n_exercise_dates
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Risk-free rate (annualised, continuously compounded).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Whether antithetic pairing is enabled.
    ///
    /// When set, paths are generated in pairs sharing negated diffusion
    /// normals and the standard error is computed from pair averages.
    /// The exact variance-reduction semantics follow the description in
    /// the method literature; this switch is not exercised by the
    /// benchmark driver and is treated as an assumption.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Seed for the simulation random number generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Step size between exercise dates, `maturity / n_exercise_dates`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.n_exercise_dates as f64
    }

    /// Returns a revalidated copy with a different path count.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the new path count is invalid.
    pub fn with_n_paths(&self, n_paths: usize) -> Result<Self, ConfigError> {
        let config = Self {
            n_paths,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than [`MAX_PATHS`]
    /// - `n_exercise_dates` is 0 or greater than [`MAX_EXERCISE_DATES`]
    /// - `maturity` is not positive and finite
    /// - `rate` is not finite
    /// - antithetic pairing is enabled with an odd path count
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_exercise_dates == 0 || self.n_exercise_dates > MAX_EXERCISE_DATES {
            return Err(ConfigError::InvalidExerciseDateCount(self.n_exercise_dates));
        }
        if !(self.maturity > 0.0 && self.maturity.is_finite()) {
            return Err(ConfigError::InvalidMaturity);
        }
        if !self.rate.is_finite() {
            return Err(ConfigError::InvalidRate);
        }
        if self.antithetic && self.n_paths % 2 != 0 {
            return Err(ConfigError::OddAntitheticPathCount(self.n_paths));
        }
        Ok(())
    }
}

/// Builder for [`LsmConfig`].
///
/// `n_paths`, `n_exercise_dates` and `maturity` must be specified; the
/// rate defaults to zero, antithetic pairing to off, and the seed to 0.
#[derive(Clone, Debug, Default)]
pub struct LsmConfigBuilder {
    n_paths: Option<usize>,
    n_exercise_dates: Option<usize>,
    maturity: Option<f64>,
    rate: f64,
    antithetic: bool,
    seed: u64,
}

impl LsmConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of discrete exercise dates.
    #[inline]
    pub fn n_exercise_dates(mut self, n_exercise_dates: usize) -> Self {
        self.n_exercise_dates = Some(n_exercise_dates);
        self
    }

    /// Sets the time to maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Enables or disables antithetic pairing.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Sets the random seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required parameter is missing or any
    /// value fails [`LsmConfig::validate`].
    pub fn build(self) -> Result<LsmConfig, ConfigError> {
        let n_paths = self
            .n_paths
            .ok_or(ConfigError::MissingParameter("n_paths"))?;
        let n_exercise_dates = self
            .n_exercise_dates
            .ok_or(ConfigError::MissingParameter("n_exercise_dates"))?;
        let maturity = self
            .maturity
            .ok_or(ConfigError::MissingParameter("maturity"))?;

        let config = LsmConfig {
            n_paths,
            n_exercise_dates,
            maturity,
            rate: self.rate,
            antithetic: self.antithetic,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
