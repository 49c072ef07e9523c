//! SABR implied volatility fed into Black-Scholes.
//!
//! SABR (Stochastic Alpha, Beta, Rho) is the stochastic volatility model
//! ```text
//! dF = alpha * F^beta * dW_F
//! d(alpha) = nu * alpha * dW_alpha
//! E[dW_F * dW_alpha] = rho * dt
//! ```
//!
//! ## Hagan formula
//!
//! The implied Black volatility follows Hagan et al. (2002). At the money
//! the closed-form branch is used; its leading term `alpha / F^(1-beta)` is
//! the `K -> F` limit of the general branch, so both agree near the forward.
//!
//! The spot `S` plays the role of the forward `F`, and the resulting
//! volatility is priced with [`BlackScholes`] discounting at the caller's `r`.

use pricer_core::types::PriceResult;

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;
use crate::terms::{require_in_range, require_positive, OptionTerms};

/// `|ln(F/K)|` below which the at-the-money branch is used.
const ATM_THRESHOLD: f64 = 1e-12;

/// `|z|` below which `z / x(z)` is replaced by its limit 1.
const Z_EPSILON: f64 = 1e-12;

/// SABR model parameters.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::SabrParams;
///
/// let params = SabrParams { alpha: 0.2, beta: 1.0, rho: -0.3, nu: 0.4 };
/// assert!(params.validate().is_ok());
///
/// let bad = SabrParams { beta: 1.5, ..params };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrParams {
    /// Initial volatility (alpha > 0)
    pub alpha: f64,
    /// CEV exponent (0 <= beta <= 1)
    pub beta: f64,
    /// Forward/volatility correlation (-1 <= rho <= 1)
    pub rho: f64,
    /// Volatility of volatility (nu > 0)
    pub nu: f64,
}

impl SabrParams {
    /// Validates the parameter domain.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        require_positive("alpha", self.alpha)?;
        require_in_range("beta", self.beta, 0.0, 1.0, "must lie in [0, 1]")?;
        require_in_range("rho", self.rho, -1.0, 1.0, "must lie in [-1, 1]")?;
        require_positive("nu", self.nu)?;
        Ok(())
    }
}

/// SABR pricing model.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::{SabrModel, SabrParams};
/// use pricer_models::terms::OptionTerms;
///
/// let terms = OptionTerms::new(100.0, 110.0, 1.0, 0.05).unwrap();
/// let params = SabrParams { alpha: 0.2, beta: 1.0, rho: -0.3, nu: 0.4 };
/// let model = SabrModel::new(terms, params).unwrap();
///
/// let vol = model.implied_vol().unwrap();
/// assert!(vol > 0.0);
/// assert!(model.price().unwrap().call() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SabrModel {
    terms: OptionTerms,
    params: SabrParams,
}

impl SabrModel {
    /// Creates a validated SABR model.
    pub fn new(terms: OptionTerms, params: SabrParams) -> Result<Self, AnalyticalError> {
        params.validate()?;
        Ok(Self { terms, params })
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Returns the SABR parameters.
    #[inline]
    pub fn params(&self) -> &SabrParams {
        &self.params
    }

    /// Computes the Hagan implied Black volatility.
    ///
    /// # Errors
    ///
    /// - `NumericalInstability` when `x(z)` or its denominator `1 - rho` is
    ///   zero, or the logarithm in `x(z)` has a non-positive argument
    /// - `InvalidImpliedVol` when the expansion yields `vol <= 0` or a
    ///   non-finite value
    pub fn implied_vol(&self) -> Result<f64, AnalyticalError> {
        let forward = self.terms.spot();
        let strike = self.terms.strike();
        let log_fk = (forward / strike).ln();

        let vol = if log_fk.abs() < ATM_THRESHOLD {
            self.atm_vol()
        } else {
            self.hagan_vol(log_fk)?
        };

        if !(vol > 0.0) || !vol.is_finite() {
            return Err(AnalyticalError::InvalidImpliedVol { volatility: vol });
        }
        Ok(vol)
    }

    /// Prices the call/put pair at the SABR implied volatility.
    pub fn price(&self) -> Result<PriceResult, AnalyticalError> {
        let vol = self.implied_vol()?;
        Ok(BlackScholes::new(self.terms, vol)?.price())
    }

    /// σ_ATM = α / F^(1-β) · (1 + [(1-β)²/24·α²/F^(2-2β) + ρβνα/(4F^(1-β)) + (2-3ρ²)ν²/24]·T)
    ///
    /// The leading `α / F^(1-β)` differs from the plain `α · (1 + ...)` form
    /// quoted for the at-the-money case. With the divisor this branch equals
    /// the `K → F` limit of [`Self::hagan_vol`], so the implied vol stays
    /// continuous across the at-the-money threshold when `β < 1`.
    fn atm_vol(&self) -> f64 {
        let f_pow = self.terms.spot().powf(1.0 - self.params.beta);
        self.params.alpha / f_pow * (1.0 + self.expansion(f_pow) * self.terms.expiry())
    }

    /// General Hagan branch: σ_B = A · z/x(z) · B.
    fn hagan_vol(&self, log_fk: f64) -> Result<f64, AnalyticalError> {
        let SabrParams {
            alpha,
            beta,
            rho,
            nu,
        } = self.params;
        let fk = self.terms.spot() * self.terms.strike();
        let one_minus_beta = 1.0 - beta;

        // (FK)^((1-β)/2)
        let fk_pow_half = fk.powf(one_minus_beta / 2.0);

        // D(F/K) = 1 + ((1-β)²/24)*ln²(F/K) + ((1-β)⁴/1920)*ln⁴(F/K)
        let log_fk_2 = log_fk * log_fk;
        let omb_2 = one_minus_beta * one_minus_beta;
        let d = 1.0 + omb_2 / 24.0 * log_fk_2 + omb_2 * omb_2 / 1920.0 * log_fk_2 * log_fk_2;

        let z = nu / alpha * fk_pow_half * log_fk;
        let z_over_x = z_over_x(z, rho)?;

        let a = alpha / (fk_pow_half * d);
        let b = 1.0 + self.expansion(fk_pow_half) * self.terms.expiry();

        Ok(a * z_over_x * b)
    }

    /// Bracketed time-correction term given `q = F^(1-β)` at the money or
    /// `q = (FK)^((1-β)/2)` in the general branch.
    fn expansion(&self, q: f64) -> f64 {
        let SabrParams {
            alpha,
            beta,
            rho,
            nu,
        } = self.params;
        let one_minus_beta = 1.0 - beta;

        let term1 = one_minus_beta * one_minus_beta / 24.0 * alpha * alpha / (q * q);
        let term2 = 0.25 * rho * beta * nu * alpha / q;
        let term3 = (2.0 - 3.0 * rho * rho) / 24.0 * nu * nu;
        term1 + term2 + term3
    }
}

/// z / x(z) with x(z) = ln[(√(1-2ρz+z²) + z - ρ) / (1-ρ)].
fn z_over_x(z: f64, rho: f64) -> Result<f64, AnalyticalError> {
    let denominator = 1.0 - rho;
    if denominator == 0.0 {
        return Err(AnalyticalError::instability(
            "x(z) denominator 1 - rho is zero",
        ));
    }
    if z.abs() < Z_EPSILON {
        return Ok(1.0);
    }

    let numerator = (1.0 - 2.0 * rho * z + z * z).sqrt() + z - rho;
    let argument = numerator / denominator;
    if !(argument > 0.0) || !argument.is_finite() {
        return Err(AnalyticalError::instability(format!(
            "x(z) takes the logarithm of non-positive value {argument}"
        )));
    }

    let x = argument.ln();
    if x == 0.0 {
        return Err(AnalyticalError::instability("x(z) is zero"));
    }
    Ok(z / x)
}
