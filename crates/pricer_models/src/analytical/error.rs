//! Errors raised by the closed-form models (Black-Scholes, SABR).

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::terms::ParameterError;

/// Analytical pricing errors.
///
/// # Variants
/// - `Parameter`: An input outside the model's domain
/// - `NumericalInstability`: Division by zero or log of a non-positive value
/// - `InvalidImpliedVol`: The volatility expansion produced a non-positive
///   or non-finite value
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidImpliedVol { volatility: -0.01 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Input outside the model's domain.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },

    /// The implied volatility expansion broke down.
    #[error("Implied volatility is not positive: σ = {volatility}")]
    InvalidImpliedVol {
        /// The offending volatility
        volatility: f64,
    },
}

impl AnalyticalError {
    pub(crate) fn instability(message: impl Into<String>) -> Self {
        AnalyticalError::NumericalInstability {
            message: message.into(),
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::Parameter(inner) => inner.into(),
            AnalyticalError::NumericalInstability { .. }
            | AnalyticalError::InvalidImpliedVol { .. } => {
                PricingError::NumericalFailure(err.to_string())
            }
        }
    }
}
