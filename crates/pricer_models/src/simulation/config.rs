//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders for Monte Carlo
//! pricing runs.

use super::error::SimulationError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Default number of simulated paths.
pub const DEFAULT_NUM_SIMULATIONS: usize = 10_000;

/// Default number of time steps for time-stepped models.
pub const DEFAULT_NUM_STEPS: usize = 100;

/// Default number of paths per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1_024;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_models::simulation::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .num_simulations(20_000)
///     .num_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.num_simulations(), 20_000);
/// assert_eq!(config.num_steps(), 252);
/// assert_eq!(config.batch_size(), 1_024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of simulation paths.
    num_simulations: usize,
    /// Number of time steps per path.
    num_steps: usize,
    /// Paths per independently seeded batch.
    batch_size: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            num_steps: DEFAULT_NUM_STEPS,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder starting from the defaults.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the number of paths per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of batches the paths are split into.
    #[inline]
    pub fn num_batches(&self) -> usize {
        self.num_simulations.div_ceil(self.batch_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidPathCount` if `num_simulations` is 0 or greater than 10,000,000
    /// - `InvalidStepCount` if `num_steps` is 0 or greater than 10,000
    /// - `InvalidBatchSize` if `batch_size` is 0
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_simulations == 0 || self.num_simulations > MAX_PATHS {
            return Err(SimulationError::InvalidPathCount(self.num_simulations));
        }
        if self.num_steps == 0 || self.num_steps > MAX_STEPS {
            return Err(SimulationError::InvalidStepCount(self.num_steps));
        }
        if self.batch_size == 0 {
            return Err(SimulationError::InvalidBatchSize(self.batch_size));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields keep their defaults (10 000 paths, 100 steps, batches of
/// 1 024 paths, no seed).
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn num_simulations(mut self, num_simulations: usize) -> Self {
        self.config.num_simulations = num_simulations;
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.config.num_steps = num_steps;
        self
    }

    /// Sets the number of paths per batch.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SimulationConfig::builder().build().unwrap();
        assert_eq!(config.num_simulations(), 10_000);
        assert_eq!(config.num_steps(), 100);
        assert_eq!(config.batch_size(), 1_024);
        assert_eq!(config.seed(), None);
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_num_batches_rounds_up() {
        let config = SimulationConfig::builder()
            .num_simulations(2_049)
            .batch_size(1_024)
            .build()
            .unwrap();
        assert_eq!(config.num_batches(), 3);
    }

    #[test]
    fn test_invalid_zero_paths() {
        let result = SimulationConfig::builder().num_simulations(0).build();
        assert!(matches!(result, Err(SimulationError::InvalidPathCount(0))));
    }

    #[test]
    fn test_invalid_too_many_paths() {
        let result = SimulationConfig::builder()
            .num_simulations(MAX_PATHS + 1)
            .build();
        assert!(matches!(result, Err(SimulationError::InvalidPathCount(_))));
    }

    #[test]
    fn test_invalid_steps_and_batch() {
        assert!(matches!(
            SimulationConfig::builder().num_steps(0).build(),
            Err(SimulationError::InvalidStepCount(0))
        ));
        assert!(matches!(
            SimulationConfig::builder().num_steps(MAX_STEPS + 1).build(),
            Err(SimulationError::InvalidStepCount(_))
        ));
        assert!(matches!(
            SimulationConfig::builder().batch_size(0).build(),
            Err(SimulationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_maybe_seed() {
        let seeded = SimulationConfig::builder().maybe_seed(Some(3)).build().unwrap();
        assert_eq!(seeded.seed(), Some(3));
        let unseeded = SimulationConfig::builder().seed(3).maybe_seed(None).build().unwrap();
        assert_eq!(unseeded.seed(), None);
    }
}
