//! Variance Gamma model.
//!
//! Brownian motion with drift `theta` and volatility `sigma`, evaluated at a
//! gamma-distributed business time `g` with mean `T` and variance `nu·T`:
//!
//! ```text
//! g   ~ Gamma(shape = T/nu, scale = nu)
//! S_T = S·exp((r + theta)·T + g·(theta - sigma²/2) + sigma·√g·Z)
//! ```

use rand_distr::Gamma;

use super::engine::PathSimulator;
use super::error::SimulationError;
use super::rng::PricerRng;
use crate::terms::{require_finite, require_positive, OptionTerms};

/// Variance Gamma parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarianceGammaParams {
    /// Volatility of the subordinated Brownian motion (sigma > 0)
    pub sigma: f64,
    /// Drift of the subordinated Brownian motion (skew)
    pub theta: f64,
    /// Variance rate of the gamma clock (nu > 0; kurtosis)
    pub nu: f64,
}

impl VarianceGammaParams {
    /// Validates the parameter domain.
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("sigma", self.sigma)?;
        require_finite("theta", self.theta)?;
        require_positive("nu", self.nu)?;
        Ok(())
    }
}

/// Variance Gamma Monte Carlo model; one gamma and one normal draw per path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGammaModel {
    terms: OptionTerms,
    params: VarianceGammaParams,
}

impl VarianceGammaModel {
    /// Creates a validated Variance Gamma model.
    pub fn new(terms: OptionTerms, params: VarianceGammaParams) -> Result<Self, SimulationError> {
        params.validate()?;
        Ok(Self { terms, params })
    }

    /// Returns the model parameters.
    #[inline]
    pub fn params(&self) -> &VarianceGammaParams {
        &self.params
    }
}

impl PathSimulator for VarianceGammaModel {
    fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    fn simulate_terminals(
        &self,
        rng: &mut PricerRng,
        _num_steps: usize,
        terminals: &mut [f64],
    ) -> Result<(), SimulationError> {
        let VarianceGammaParams { sigma, theta, nu } = self.params;
        let expiry = self.terms.expiry();
        let clock = Gamma::new(expiry / nu, nu).map_err(|e| SimulationError::Distribution(e.to_string()))?;
        let drift = (self.terms.rate() + theta) * expiry;
        let convexity = theta - 0.5 * sigma * sigma;

        for terminal in terminals.iter_mut() {
            let g = rng.sample(&clock);
            let z = rng.gen_normal();
            *terminal = self.terms.spot() * (drift + g * convexity + sigma * g.sqrt() * z).exp();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::ParameterError;

    fn params() -> VarianceGammaParams {
        VarianceGammaParams {
            sigma: 0.2,
            theta: -0.1,
            nu: 0.2,
        }
    }

    fn terms() -> OptionTerms {
        OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap()
    }

    #[test]
    fn test_rejects_out_of_domain_parameters() {
        let cases = [
            (VarianceGammaParams { sigma: -0.2, ..params() }, "sigma"),
            (VarianceGammaParams { theta: f64::NAN, ..params() }, "theta"),
            (VarianceGammaParams { nu: 0.0, ..params() }, "nu"),
        ];
        for (bad, name) in cases {
            match VarianceGammaModel::new(terms(), bad) {
                Err(SimulationError::Parameter(ParameterError { name: got, .. })) => {
                    assert_eq!(got, name)
                }
                other => panic!("Expected Parameter error for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_positive_theta_accepted() {
        assert!(VarianceGammaModel::new(terms(), VarianceGammaParams { theta: 0.3, ..params() }).is_ok());
    }

    #[test]
    fn test_gamma_clock_mean_is_expiry() {
        let clock = Gamma::new(2.0 / 0.25, 0.25).unwrap();
        let mut rng = PricerRng::from_seed(77);
        let n = 50_000;
        let mean = (0..n).map(|_| rng.sample(&clock)).sum::<f64>() / n as f64;
        // sd of the mean is sqrt(nu·T / n) ≈ 0.0032
        assert!((mean - 2.0).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn test_terminals_positive_and_seeded() {
        let model = VarianceGammaModel::new(terms(), params()).unwrap();
        let mut a = vec![0.0; 256];
        let mut b = vec![0.0; 256];
        model.simulate_terminals(&mut PricerRng::from_seed(4), 1, &mut a).unwrap();
        model.simulate_terminals(&mut PricerRng::from_seed(4), 1, &mut b).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.is_finite() && *s > 0.0));
    }
}
