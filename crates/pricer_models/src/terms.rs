//! Contract terms shared by every pricing model.
//!
//! This module provides:
//! - `OptionTerms`: validated spot, strike, expiry and risk-free rate
//! - `ParameterError`: a single out-of-domain parameter value
//! - Domain checks used by model constructors

use pricer_core::types::PricingError;
use thiserror::Error;

/// A parameter value outside its model's domain.
///
/// # Examples
/// ```
/// use pricer_models::terms::ParameterError;
///
/// let err = ParameterError::new("sigma", -0.2, "must be positive");
/// assert_eq!(format!("{}", err), "invalid sigma = -0.2: must be positive");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid {name} = {value}: {reason}")]
pub struct ParameterError {
    /// Parameter name as used in parameter mappings (e.g. `"sigma"`)
    pub name: &'static str,
    /// The rejected value
    pub value: f64,
    /// Why the value was rejected
    pub reason: &'static str,
}

impl ParameterError {
    /// Creates a new parameter error.
    pub fn new(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self {
            name,
            value,
            reason,
        }
    }
}

impl From<ParameterError> for PricingError {
    fn from(err: ParameterError) -> Self {
        PricingError::invalid(err.name, err.value, err.reason)
    }
}

/// Requires `value > 0` and finite.
pub fn require_positive(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::new(name, value, "must be positive"))
    }
}

/// Requires `value >= 0` and finite.
pub fn require_non_negative(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::new(name, value, "must be non-negative"))
    }
}

/// Requires a finite value.
pub fn require_finite(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::new(name, value, "must be finite"))
    }
}

/// Requires `low <= value <= high`.
pub fn require_in_range(
    name: &'static str,
    value: f64,
    low: f64,
    high: f64,
    reason: &'static str,
) -> Result<(), ParameterError> {
    if (low..=high).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::new(name, value, reason))
    }
}

/// Validated terms of a European option.
///
/// Every model requires `S > 0`, `K > 0`, `T > 0` and a finite rate `r`.
///
/// # Examples
/// ```
/// use pricer_models::terms::OptionTerms;
///
/// let terms = OptionTerms::new(100.0, 95.0, 0.5, 0.03).unwrap();
/// assert_eq!(terms.strike(), 95.0);
///
/// // Invalid expiry
/// assert!(OptionTerms::new(100.0, 95.0, 0.0, 0.03).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionTerms {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
}

impl OptionTerms {
    /// Creates validated option terms.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price `S` (must be positive)
    /// * `strike` - Strike price `K` (must be positive)
    /// * `expiry` - Time to expiry `T` in years (must be positive)
    /// * `rate` - Continuously compounded risk-free rate `r`
    pub fn new(spot: f64, strike: f64, expiry: f64, rate: f64) -> Result<Self, ParameterError> {
        require_positive("S", spot)?;
        require_positive("K", strike)?;
        require_positive("T", expiry)?;
        require_finite("r", rate)?;
        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Call payoff `max(S_T - K, 0)`.
    #[inline]
    pub fn call_payoff(&self, terminal: f64) -> f64 {
        (terminal - self.strike).max(0.0)
    }

    /// Put payoff `max(K - S_T, 0)`.
    #[inline]
    pub fn put_payoff(&self, terminal: f64) -> f64 {
        (self.strike - terminal).max(0.0)
    }
}
