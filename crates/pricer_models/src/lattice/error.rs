//! Error types for lattice pricing.

use pricer_core::types::PricingError;
use thiserror::Error;

use super::binomial::MAX_STEPS;
use crate::terms::ParameterError;

/// Binomial tree errors.
///
/// # Examples
/// ```
/// use pricer_models::lattice::LatticeError;
///
/// let err = LatticeError::InvalidSteps { steps: 0 };
/// assert_eq!(format!("{}", err), "Invalid step count 0: must be in [1, 100000]");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Input outside the model's domain.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Step count outside `[1, MAX_STEPS]`.
    #[error("Invalid step count {steps}: must be in [1, {max}]", max = MAX_STEPS)]
    InvalidSteps {
        /// The rejected step count
        steps: usize,
    },

    /// Risk-neutral up-probability outside [0, 1].
    #[error("Risk-neutral probability {probability} is outside [0, 1]")]
    ArbitrageProbability {
        /// The computed probability
        probability: f64,
    },
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::Parameter(inner) => inner.into(),
            LatticeError::InvalidSteps { steps } => {
                PricingError::invalid("steps", steps as f64, format!("must be in [1, {MAX_STEPS}]"))
            }
            LatticeError::ArbitrageProbability { .. } => {
                PricingError::NumericalFailure(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_steps_to_pricing_error() {
        let err: PricingError = LatticeError::InvalidSteps { steps: 0 }.into();
        assert!(err.is_invalid_parameter());

        let err: PricingError = LatticeError::InvalidSteps { steps: MAX_STEPS + 1 }.into();
        assert!(err.to_string().contains("steps"), "{err}");
    }

    #[test]
    fn test_probability_to_pricing_error() {
        let err: PricingError = LatticeError::ArbitrageProbability { probability: 1.2 }.into();
        match err {
            PricingError::NumericalFailure(msg) => assert!(msg.contains("1.2")),
            other => panic!("Expected NumericalFailure variant, got {other:?}"),
        }
    }
}
