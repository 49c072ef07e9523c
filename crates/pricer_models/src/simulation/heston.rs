//! Heston stochastic volatility model.
//!
//! ```text
//! dS = mu * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + xi * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//!
//! ## Discretisation
//!
//! Euler steps on a uniform grid `dt = T / num_steps` with correlated normals
//! `W1 = Z1`, `W2 = rho·Z1 + √(1-rho²)·Z2`. The variance is reflected at zero:
//!
//! ```text
//! v_t = |v_{t-1} + kappa·(theta - v_{t-1})·dt + xi·√(v_{t-1}·dt)·W2|
//! S_t = S_{t-1}·exp((mu - v_{t-1}/2)·dt + √(v_{t-1}·dt)·W1)
//! ```
//!
//! The drift uses `mu` while payoffs are discounted at `r`; the two are
//! independent inputs.

use super::engine::PathSimulator;
use super::ensemble::PathEnsemble;
use super::error::SimulationError;
use super::rng::PricerRng;
use crate::terms::{require_finite, require_in_range, require_non_negative, require_positive, OptionTerms};

/// Heston model parameters.
///
/// # Examples
///
/// ```
/// use pricer_models::simulation::HestonParams;
///
/// let params = HestonParams {
///     kappa: 1.5,
///     theta: 0.04,
///     xi: 0.3,
///     rho: -0.7,
///     v0: 0.04,
///     mu: 0.05,
/// };
/// assert!(params.validate().is_ok());
/// assert!(params.satisfies_feller());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParams {
    /// Mean-reversion speed (kappa >= 0)
    pub kappa: f64,
    /// Long-run variance (theta > 0)
    pub theta: f64,
    /// Volatility of variance (xi >= 0; zero gives deterministic variance)
    pub xi: f64,
    /// Spot/variance correlation (-1 <= rho <= 1)
    pub rho: f64,
    /// Initial variance (v0 > 0)
    pub v0: f64,
    /// Drift of the spot process
    pub mu: f64,
}

impl HestonParams {
    /// Validates the parameter domain.
    pub fn validate(&self) -> Result<(), SimulationError> {
        require_non_negative("kappa", self.kappa)?;
        require_positive("theta", self.theta)?;
        require_non_negative("xi", self.xi)?;
        require_in_range("rho", self.rho, -1.0, 1.0, "must lie in [-1, 1]")?;
        require_positive("v0", self.v0)?;
        require_finite("mu", self.mu)?;
        Ok(())
    }

    /// Feller condition `2·kappa·theta > xi²`.
    ///
    /// When it holds the continuous-time variance stays strictly positive.
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.xi * self.xi
    }
}

/// Heston Monte Carlo model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HestonModel {
    terms: OptionTerms,
    params: HestonParams,
}

impl HestonModel {
    /// Creates a validated Heston model.
    pub fn new(terms: OptionTerms, params: HestonParams) -> Result<Self, SimulationError> {
        params.validate()?;
        Ok(Self { terms, params })
    }

    /// Returns the model parameters.
    #[inline]
    pub fn params(&self) -> &HestonParams {
        &self.params
    }

    /// Simulates `n_paths` spot and variance trajectories.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::simulation::{HestonModel, HestonParams, PricerRng};
    /// use pricer_models::terms::OptionTerms;
    ///
    /// let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
    /// let params = HestonParams { kappa: 2.0, theta: 0.04, xi: 0.3, rho: -0.5, v0: 0.04, mu: 0.05 };
    /// let model = HestonModel::new(terms, params).unwrap();
    ///
    /// let mut rng = PricerRng::from_seed(3);
    /// let ensemble = model.simulate_paths(&mut rng, 8, 50);
    /// assert_eq!(ensemble.terminal().len(), 8);
    /// assert!(ensemble.variance(50, 0).unwrap() >= 0.0);
    /// ```
    pub fn simulate_paths(&self, rng: &mut PricerRng, n_paths: usize, n_steps: usize) -> PathEnsemble {
        let HestonParams {
            kappa,
            theta,
            xi,
            rho,
            v0,
            mu,
        } = self.params;
        let dt = self.terms.expiry() / n_steps as f64;
        let rho_perp = (1.0 - rho * rho).sqrt();

        let mut ensemble = PathEnsemble::new(n_paths, n_steps, self.terms.spot(), Some(v0));
        for step in 1..=n_steps {
            let rows = ensemble.step_rows(step);
            let (Some(prev_vars), Some(next_vars)) = (rows.prev_vars, rows.next_vars) else {
                unreachable!("Heston ensembles always carry variance");
            };
            for path in 0..n_paths {
                let z1 = rng.gen_normal();
                let z2 = rng.gen_normal();
                let w2 = rho * z1 + rho_perp * z2;

                let v = prev_vars[path];
                let diffusion = (v * dt).sqrt();
                next_vars[path] = (v + kappa * (theta - v) * dt + xi * diffusion * w2).abs();
                rows.next_spots[path] =
                    rows.prev_spots[path] * ((mu - 0.5 * v) * dt + diffusion * z1).exp();
            }
        }
        ensemble
    }
}

impl PathSimulator for HestonModel {
    fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    fn simulate_terminals(
        &self,
        rng: &mut PricerRng,
        num_steps: usize,
        terminals: &mut [f64],
    ) -> Result<(), SimulationError> {
        let ensemble = self.simulate_paths(rng, terminals.len(), num_steps);
        terminals.copy_from_slice(ensemble.terminal());
        Ok(())
    }
}
