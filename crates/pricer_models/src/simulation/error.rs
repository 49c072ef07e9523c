//! Error types for Monte Carlo simulation.

use pricer_core::types::{InterpolationError, PricingError};
use thiserror::Error;

use crate::terms::ParameterError;

/// Monte Carlo simulation errors.
///
/// # Variants
/// - `Parameter`: Model input outside its domain
/// - `InvalidPathCount` / `InvalidStepCount` / `InvalidBatchSize`: Configuration out of range
/// - `InvalidLocalVol`: The local-volatility capability is unusable at `(S, 0)`
/// - `LocalVolBreakdown`: The capability returned a bad value mid-simulation
/// - `Interpolation`: A local-volatility grid could not be built
/// - `Distribution`: A sampling distribution could not be constructed
/// - `Cancelled`: Cancellation observed between batches
///
/// # Examples
/// ```
/// use pricer_models::simulation::SimulationError;
///
/// let err = SimulationError::InvalidPathCount(0);
/// assert!(err.to_string().contains("Invalid path count 0"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Input outside the model's domain.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Path count outside [1, MAX_PATHS].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Step count outside [1, MAX_STEPS].
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),

    /// Batch size of zero.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Local volatility is non-positive or non-finite at the initial spot.
    #[error("Local volatility {volatility} at (S = {spot}, t = {time}) must be positive and finite")]
    InvalidLocalVol {
        /// Spot at which the capability was probed
        spot: f64,
        /// Time at which the capability was probed
        time: f64,
        /// Returned volatility
        volatility: f64,
    },

    /// Local volatility became non-positive or non-finite along a path.
    #[error("Local volatility broke down at (S = {spot}, t = {time}): {volatility}")]
    LocalVolBreakdown {
        /// Path spot at the failing step
        spot: f64,
        /// Time of the failing step
        time: f64,
        /// Returned volatility
        volatility: f64,
    },

    /// Malformed local-volatility grid.
    #[error("Local volatility grid: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Sampling distribution construction failed.
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Cancellation requested.
    #[error("Simulation cancelled")]
    Cancelled,
}

impl From<SimulationError> for PricingError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Parameter(inner) => inner.into(),
            SimulationError::InvalidPathCount(count) => {
                PricingError::invalid("num_simulations", count as f64, "must be in [1, 10000000]")
            }
            SimulationError::InvalidStepCount(count) => {
                PricingError::invalid("num_steps", count as f64, "must be in [1, 10000]")
            }
            SimulationError::InvalidBatchSize(size) => {
                PricingError::invalid("batch_size", size as f64, "must be at least 1")
            }
            SimulationError::InvalidLocalVol { volatility, .. } => {
                PricingError::invalid("local_vol", volatility, "must be positive and finite at (S, 0)")
            }
            SimulationError::LocalVolBreakdown { .. } | SimulationError::Distribution(_) => {
                PricingError::NumericalFailure(err.to_string())
            }
            SimulationError::Interpolation(inner) => inner.into(),
            SimulationError::Cancelled => PricingError::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_invalid_parameters() {
        let err: PricingError = SimulationError::InvalidStepCount(0).into();
        match err {
            PricingError::InvalidParameter { name, .. } => assert_eq!(name, "num_steps"),
            other => panic!("Expected InvalidParameter variant, got {other:?}"),
        }
    }

    #[test]
    fn test_local_vol_errors() {
        let probe: PricingError = SimulationError::InvalidLocalVol {
            spot: 100.0,
            time: 0.0,
            volatility: -0.1,
        }
        .into();
        assert!(probe.is_invalid_parameter());

        let breakdown: PricingError = SimulationError::LocalVolBreakdown {
            spot: 1e-300,
            time: 0.5,
            volatility: f64::NAN,
        }
        .into();
        assert!(matches!(breakdown, PricingError::NumericalFailure(_)));
    }

    #[test]
    fn test_cancelled_maps_to_cancelled() {
        let err: PricingError = SimulationError::Cancelled.into();
        assert_eq!(err, PricingError::Cancelled);
    }
}
