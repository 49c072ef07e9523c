//! Engine-wide defaults for Monte Carlo runs and sweep parallelism.

use pricer_core::types::PricingError;
use pricer_models::simulation::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_NUM_SIMULATIONS, DEFAULT_NUM_STEPS,
};
use pricer_models::simulation::SimulationConfig;

/// Defaults applied when a parameter map does not set them.
///
/// # Examples
///
/// ```
/// use pricer_pricing::EngineConfig;
///
/// let config = EngineConfig {
///     num_simulations: 50_000,
///     seed: Some(7),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.num_steps, 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Paths per Monte Carlo call
    pub num_simulations: usize,
    /// Time steps per path for time-stepped models
    pub num_steps: usize,
    /// Paths per batch; each batch has its own random stream
    pub batch_size: usize,
    /// Base seed; `None` draws a fresh seed per call
    pub seed: Option<u64>,
    /// Sweep worker threads; `None` uses one per logical CPU
    pub workers: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            num_steps: DEFAULT_NUM_STEPS,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            workers: None,
        }
    }
}

impl EngineConfig {
    /// Checks every field against the simulation limits.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        self.simulation_config(self.num_simulations, self.num_steps, self.seed)?;
        if self.workers == Some(0) {
            return Err(PricingError::invalid("workers", 0.0, "must be at least 1"));
        }
        Ok(())
    }

    /// Number of sweep worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Builds a validated simulation configuration with this batch size.
    pub(crate) fn simulation_config(
        &self,
        num_simulations: usize,
        num_steps: usize,
        seed: Option<u64>,
    ) -> Result<SimulationConfig, PricingError> {
        let config = SimulationConfig::builder()
            .num_simulations(num_simulations)
            .num_steps(num_steps)
            .batch_size(self.batch_size)
            .maybe_seed(seed)
            .build()?;
        Ok(config)
    }
}
