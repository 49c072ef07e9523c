//! Merton jump-diffusion model.
//!
//! Log-returns combine a Brownian diffusion with a compound Poisson process
//! of normally distributed log-jumps. The diffusion part has a closed-form
//! terminal law, so each path is a single scalar draw:
//!
//! ```text
//! N ~ Poisson(lambda_j·T),  J_k ~ Normal(mu_j, sigma_j²)
//! S_T = S·exp(ΣJ_k)·exp((r - sigma²/2)·T + sigma·√T·Z)
//! ```
//!
//! The drift is not compensated for the jumps, so the discounted spot is not
//! a martingale when `lambda_j > 0`.

use rand_distr::Poisson;

use super::engine::PathSimulator;
use super::error::SimulationError;
use super::rng::PricerRng;
use crate::terms::{require_finite, require_non_negative, require_positive, OptionTerms};

/// Merton model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MertonParams {
    /// Diffusion volatility (sigma > 0)
    pub sigma: f64,
    /// Jump intensity per year (lambda_j >= 0)
    pub lambda_j: f64,
    /// Mean log-jump size
    pub mu_j: f64,
    /// Log-jump volatility (sigma_j >= 0)
    pub sigma_j: f64,
}

impl MertonParams {
    /// Validates the parameter domain.
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_positive("sigma", self.sigma)?;
        require_non_negative("lambda_j", self.lambda_j)?;
        require_finite("mu_j", self.mu_j)?;
        require_non_negative("sigma_j", self.sigma_j)?;
        Ok(())
    }
}

/// Merton jump-diffusion Monte Carlo model.
///
/// The time-step count of the engine configuration is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MertonModel {
    terms: OptionTerms,
    params: MertonParams,
}

impl MertonModel {
    /// Creates a validated Merton model.
    pub fn new(terms: OptionTerms, params: MertonParams) -> Result<Self, SimulationError> {
        params.validate()?;
        Ok(Self { terms, params })
    }

    /// Returns the model parameters.
    #[inline]
    pub fn params(&self) -> &MertonParams {
        &self.params
    }

    /// Expected number of jumps over the option life.
    #[inline]
    pub fn expected_jumps(&self) -> f64 {
        self.params.lambda_j * self.terms.expiry()
    }
}

impl PathSimulator for MertonModel {
    fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    fn simulate_terminals(
        &self,
        rng: &mut PricerRng,
        _num_steps: usize,
        terminals: &mut [f64],
    ) -> Result<(), SimulationError> {
        let MertonParams {
            sigma,
            mu_j,
            sigma_j,
            ..
        } = self.params;
        let expiry = self.terms.expiry();
        let drift = (self.terms.rate() - 0.5 * sigma * sigma) * expiry;
        let diffusion = sigma * expiry.sqrt();

        // Poisson rejects a zero rate; no jumps are drawn in that case.
        let intensity = self.expected_jumps();
        let jumps = if intensity > 0.0 {
            Some(Poisson::new(intensity).map_err(|e| SimulationError::Distribution(e.to_string()))?)
        } else {
            None
        };

        for terminal in terminals.iter_mut() {
            let count = jumps.as_ref().map_or(0, |poisson| rng.sample(poisson) as u64);
            let mut jump_sum = 0.0;
            for _ in 0..count {
                jump_sum += mu_j + sigma_j * rng.gen_normal();
            }
            let z = rng.gen_normal();
            *terminal = self.terms.spot() * jump_sum.exp() * (drift + diffusion * z).exp();
        }
        Ok(())
    }
}
