//! Pricing and interpolation errors.
//!
//! Two error families live here:
//! - `PricingError`: The uniform failure outcome of every pricing operation
//! - `InterpolationError`: Errors from grid construction and lookup

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every model-specific error converts into this type, so callers of the
/// dispatcher and sweeper only ever see one failure type carrying a
/// human-readable reason.
///
/// # Variants
/// - `MissingParameter`: A required parameter is absent or undefined (NaN)
/// - `InvalidParameter`: A parameter is outside the model's domain
/// - `UnknownModel`: The model tag is not recognised
/// - `NumericalFailure`: Division by zero, log of a non-positive value, degenerate expansion
/// - `ComputationFailed`: An uncaught fault inside a model evaluation
/// - `Cancelled`: The evaluation observed a cancellation request
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter {
///     name: "sigma".to_string(),
///     value: -0.2,
///     reason: "must be positive".to_string(),
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Pricing failed: invalid parameter sigma = -0.2 (must be positive)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A required parameter is absent or holds an undefined value.
    #[error("Pricing failed: missing parameter {0}")]
    MissingParameter(String),

    /// A parameter value is outside the model's domain.
    #[error("Pricing failed: invalid parameter {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// The offending value
        value: f64,
        /// Why the value was rejected
        reason: String,
    },

    /// The model tag is not recognised.
    #[error("Pricing failed: unknown model '{0}'")]
    UnknownModel(String),

    /// Numerical breakdown during evaluation.
    #[error("Pricing failed: numerical failure: {0}")]
    NumericalFailure(String),

    /// Uncaught fault inside a model evaluation.
    #[error("Pricing failed: computation error: {0}")]
    ComputationFailed(String),

    /// Evaluation was cancelled before completion.
    #[error("Pricing failed: cancelled")]
    Cancelled,
}

impl PricingError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid(name: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Returns true for missing or out-of-domain parameters.
    ///
    /// Both are caller-correctable input problems.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            PricingError::MissingParameter(_) | PricingError::InvalidParameter { .. }
        )
    }

    /// Returns the human-readable reason without the common prefix.
    pub fn reason(&self) -> String {
        let text = self.to_string();
        text.strip_prefix("Pricing failed: ")
            .map(str::to_string)
            .unwrap_or(text)
    }
}

/// Failures building or querying an interpolation grid.
///
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert_eq!(err.to_string(), "point 5 lies outside the grid [0, 3]");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// A strict lookup fell outside the axis range.
    #[error("point {x} lies outside the grid [{min}, {max}]")]
    OutOfBounds {
        /// Coordinate looked up
        x: f64,
        /// First knot of the axis
        min: f64,
        /// Last knot of the axis
        max: f64,
    },

    /// An axis has too few knots.
    #[error("axis has {got} knots, needs at least {need}")]
    InsufficientData {
        /// Knots supplied
        got: usize,
        /// Knots required
        need: usize,
    },

    /// Knot `index` does not exceed its predecessor.
    #[error("axis knots must strictly increase (index {index})")]
    NonMonotonicData {
        /// First offending knot
        index: usize,
    },

    /// Sample rows do not match the axes.
    #[error("grid shape mismatch: {0}")]
    InvalidInput(String),
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        PricingError::NumericalFailure(err.to_string())
    }
}
