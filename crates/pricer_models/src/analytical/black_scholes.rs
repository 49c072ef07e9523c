//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The arithmetic-Asian approximation reuses the same machinery with a
//! cost-of-carry `b` in place of `r` and an adjusted volatility σ/√3.

use pricer_core::types::PriceResult;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::terms::{require_positive, OptionTerms};

/// Black-Scholes model for European option pricing.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::terms::OptionTerms;
///
/// let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
/// let bs = BlackScholes::new(terms, 0.2).unwrap();
/// let result = bs.price();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = result.call() - result.put() - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
///
/// // Non-positive volatility is rejected
/// assert!(BlackScholes::new(terms, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    terms: OptionTerms,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// `AnalyticalError::Parameter` if `volatility <= 0` or is not finite.
    pub fn new(terms: OptionTerms, volatility: f64) -> Result<Self, AnalyticalError> {
        require_positive("sigma", volatility)?;
        Ok(Self { terms, volatility })
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T).
    #[inline]
    pub fn d1(&self) -> f64 {
        d1(&self.terms, self.terms.rate(), self.volatility)
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d1() - self.volatility * self.terms.expiry().sqrt()
    }

    /// European call price.
    #[inline]
    pub fn call(&self) -> f64 {
        self.price().call()
    }

    /// European put price.
    #[inline]
    pub fn put(&self) -> f64 {
        self.price().put()
    }

    /// Computes the `(call, put)` pair.
    pub fn price(&self) -> PriceResult {
        with_carry(&self.terms, self.terms.rate(), self.volatility)
    }

    /// Arithmetic-Asian approximation.
    ///
    /// Prices the average-rate option with the geometric-average closed form
    /// using σ_a = σ/√3 and cost of carry b = ½(r - ½σ²) + σ²/6:
    ///
    /// ```text
    /// C = S·e^((b-r)T)·N(d₁) - K·e^(-rT)·N(d₂)
    /// P = K·e^(-rT)·N(-d₂) - S·e^((b-r)T)·N(-d₁)
    /// ```
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::terms::OptionTerms;
    ///
    /// let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
    /// let bs = BlackScholes::new(terms, 0.2).unwrap();
    ///
    /// // Averaging dampens volatility, so the Asian call is cheaper
    /// assert!(bs.asian_approximation().call() < bs.call());
    /// ```
    pub fn asian_approximation(&self) -> PriceResult {
        let sigma = self.volatility;
        let r = self.terms.rate();
        let sigma_adj = sigma / 3.0_f64.sqrt();
        let carry = 0.5 * (r - 0.5 * sigma * sigma) + sigma * sigma / 6.0;
        with_carry(&self.terms, carry, sigma_adj)
    }
}

fn d1(terms: &OptionTerms, carry: f64, volatility: f64) -> f64 {
    let t = terms.expiry();
    let log_moneyness = (terms.spot() / terms.strike()).ln();
    (log_moneyness + (carry + 0.5 * volatility * volatility) * t) / (volatility * t.sqrt())
}

/// Generalised Black-Scholes with cost of carry `b`; `b = r` is the vanilla case.
fn with_carry(terms: &OptionTerms, carry: f64, volatility: f64) -> PriceResult {
    let d1 = d1(terms, carry, volatility);
    let d2 = d1 - volatility * terms.expiry().sqrt();

    let forward_spot = terms.spot() * ((carry - terms.rate()) * terms.expiry()).exp();
    let discounted_strike = terms.strike() * terms.discount_factor();

    let call = forward_spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2);
    let put = discounted_strike * norm_cdf(-d2) - forward_spot * norm_cdf(-d1);
    PriceResult::new(call, put)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    fn atm(volatility: f64) -> BlackScholes {
        let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
        BlackScholes::new(terms, volatility).unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_new_invalid_volatility() {
        let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
        for sigma in [0.0, -0.2, f64::NAN, f64::INFINITY] {
            let err = BlackScholes::new(terms, sigma).unwrap_err();
            match err {
                AnalyticalError::Parameter(inner) => assert_eq!(inner.name, "sigma"),
                other => panic!("Expected Parameter variant, got {other:?}"),
            }
        }
    }

    // ==========================================================
    // d1 / d2
    // ==========================================================

    #[test]
    fn test_d1_d2_atm() {
        let bs = atm(0.2);
        // d1 = (0.05 + 0.02) / 0.2 = 0.35
        assert_relative_eq!(bs.d1(), 0.35, epsilon = 1e-12);
        assert_relative_eq!(bs.d2(), 0.15, epsilon = 1e-12);
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_reference_values() {
        let result = atm(0.2).price();
        assert_abs_diff_eq!(result.call(), 10.4506, epsilon = 1e-3);
        assert_abs_diff_eq!(result.put(), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_deep_otm_call_vanishes() {
        let terms = OptionTerms::new(100.0, 400.0, 0.25, 0.01).unwrap();
        let result = BlackScholes::new(terms, 0.1).unwrap().price();
        assert_abs_diff_eq!(result.call(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(result.put(), 400.0 * terms.discount_factor() - 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_small_volatility_tends_to_discounted_intrinsic() {
        for strike in [80.0, 100.0, 120.0] {
            let terms = OptionTerms::new(100.0, strike, 1.0, 0.05).unwrap();
            let result = BlackScholes::new(terms, 1e-6).unwrap().price();
            let forward_intrinsic = (100.0 - strike * (-0.05_f64).exp()).max(0.0);
            assert_abs_diff_eq!(result.call(), forward_intrinsic, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_call_increases_with_volatility() {
        assert!(atm(0.3).call() > atm(0.2).call());
        assert!(atm(0.3).put() > atm(0.2).put());
    }

    // ==========================================================
    // Asian approximation
    // ==========================================================

    #[test]
    fn test_asian_reference_value() {
        let asian = atm(0.2).asian_approximation();
        assert_abs_diff_eq!(asian.call(), 5.547, epsilon = 0.02);
    }

    #[test]
    fn test_asian_parity_uses_carry() {
        let bs = atm(0.2);
        let asian = bs.asian_approximation();
        let carry = 0.5 * (0.05 - 0.5 * 0.04) + 0.04 / 6.0;
        let expected = 100.0 * ((carry - 0.05) * 1.0_f64).exp() - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(asian.call() - asian.put(), expected, epsilon = 1e-10);
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_put_call_parity(
            spot in 1.0_f64..500.0,
            strike in 1.0_f64..500.0,
            expiry in 0.01_f64..10.0,
            rate in -0.05_f64..0.2,
            sigma in 0.01_f64..2.0,
        ) {
            let terms = OptionTerms::new(spot, strike, expiry, rate).unwrap();
            let result = BlackScholes::new(terms, sigma).unwrap().price();
            let parity = spot - strike * (-rate * expiry).exp();
            prop_assert!((result.call() - result.put() - parity).abs() < 1e-6);
        }

        #[test]
        fn prop_prices_non_negative(
            spot in 1.0_f64..500.0,
            strike in 1.0_f64..500.0,
            expiry in 0.01_f64..5.0,
            sigma in 0.05_f64..1.0,
        ) {
            let terms = OptionTerms::new(spot, strike, expiry, 0.03).unwrap();
            let result = BlackScholes::new(terms, sigma).unwrap().price();
            // erfc approximation error bounds how far below zero a tail price can fall
            prop_assert!(result.call() >= -1e-4);
            prop_assert!(result.put() >= -1e-4);
        }
    }
}
