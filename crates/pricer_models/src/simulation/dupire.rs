//! Dupire local-volatility model.
//!
//! Log-Euler steps on a uniform grid with the volatility read from the
//! caller's surface at the previous spot and the current step time:
//!
//! ```text
//! vol = sigma_loc(S_{t-1}, t·dt)
//! S_t = S_{t-1}·exp((r - vol²/2)·dt + vol·√dt·Z)
//! ```
//!
//! Every step of every path evaluates the surface once, which makes this the
//! most expensive model per path.

use std::fmt;
use std::sync::Arc;

use super::engine::PathSimulator;
use super::ensemble::PathEnsemble;
use super::error::SimulationError;
use super::local_vol::LocalVolatility;
use super::rng::PricerRng;
use crate::terms::OptionTerms;

/// Local-volatility Monte Carlo model.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pricer_models::simulation::{DupireModel, PricerRng};
/// use pricer_models::terms::OptionTerms;
///
/// let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.03).unwrap();
/// let skew = |spot: f64, _t: f64| 0.2 * (100.0 / spot).powf(0.5);
/// let model = DupireModel::new(terms, Arc::new(skew)).unwrap();
///
/// let ensemble = model.simulate_paths(&mut PricerRng::from_seed(1), 4, 12).unwrap();
/// assert_eq!(ensemble.n_steps(), 12);
/// ```
#[derive(Clone)]
pub struct DupireModel {
    terms: OptionTerms,
    local_vol: Arc<dyn LocalVolatility>,
}

impl fmt::Debug for DupireModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DupireModel")
            .field("terms", &self.terms)
            .finish_non_exhaustive()
    }
}

impl DupireModel {
    /// Creates the model after probing the surface at `(S, 0)`.
    ///
    /// # Errors
    /// `SimulationError::InvalidLocalVol` when the probe is non-positive or
    /// non-finite.
    pub fn new(terms: OptionTerms, local_vol: Arc<dyn LocalVolatility>) -> Result<Self, SimulationError> {
        let spot = terms.spot();
        let volatility = local_vol.local_vol(spot, 0.0);
        if !is_usable(volatility) {
            return Err(SimulationError::InvalidLocalVol {
                spot,
                time: 0.0,
                volatility,
            });
        }
        Ok(Self { terms, local_vol })
    }

    /// Returns the local-volatility capability.
    #[inline]
    pub fn local_vol(&self) -> &Arc<dyn LocalVolatility> {
        &self.local_vol
    }

    /// Simulates `n_paths` spot trajectories over `n_steps` steps.
    ///
    /// # Errors
    /// `SimulationError::LocalVolBreakdown` at the first step where the
    /// surface returns a non-positive or non-finite volatility.
    pub fn simulate_paths(
        &self,
        rng: &mut PricerRng,
        n_paths: usize,
        n_steps: usize,
    ) -> Result<PathEnsemble, SimulationError> {
        let rate = self.terms.rate();
        let dt = self.terms.expiry() / n_steps as f64;
        let sqrt_dt = dt.sqrt();

        let mut ensemble = PathEnsemble::new(n_paths, n_steps, self.terms.spot(), None);
        for step in 1..=n_steps {
            let time = step as f64 * dt;
            let rows = ensemble.step_rows(step);
            for (next, &prev) in rows.next_spots.iter_mut().zip(rows.prev_spots) {
                let vol = self.local_vol.local_vol(prev, time);
                if !is_usable(vol) {
                    return Err(SimulationError::LocalVolBreakdown {
                        spot: prev,
                        time,
                        volatility: vol,
                    });
                }
                let z = rng.gen_normal();
                *next = prev * ((rate - 0.5 * vol * vol) * dt + vol * sqrt_dt * z).exp();
            }
        }
        Ok(ensemble)
    }
}

#[inline]
fn is_usable(volatility: f64) -> bool {
    volatility.is_finite() && volatility > 0.0
}

impl PathSimulator for DupireModel {
    fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    fn simulate_terminals(
        &self,
        rng: &mut PricerRng,
        num_steps: usize,
        terminals: &mut [f64],
    ) -> Result<(), SimulationError> {
        let ensemble = self.simulate_paths(rng, terminals.len(), num_steps)?;
        terminals.copy_from_slice(ensemble.terminal());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::local_vol::FlatLocalVol;
    use approx::assert_relative_eq;

    fn terms() -> OptionTerms {
        OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_rejects_unusable_surface_at_start() {
        for bad in [0.0, -0.2, f64::NAN, f64::INFINITY] {
            let surface = move |_s: f64, _t: f64| bad;
            let err = DupireModel::new(terms(), Arc::new(surface)).unwrap_err();
            assert!(matches!(err, SimulationError::InvalidLocalVol { spot, .. } if spot == 100.0));
        }
    }

    #[test]
    fn test_debug_omits_surface() {
        let model = DupireModel::new(terms(), Arc::new(FlatLocalVol::new(0.2).unwrap())).unwrap();
        assert!(format!("{model:?}").starts_with("DupireModel"));
    }

    // ==========================================================
    // Paths
    // ==========================================================

    #[test]
    fn test_flat_surface_step_matches_formula() {
        let model = DupireModel::new(terms(), Arc::new(FlatLocalVol::new(0.2).unwrap())).unwrap();
        let ensemble = model.simulate_paths(&mut PricerRng::from_seed(6), 1, 2).unwrap();

        let mut rng = PricerRng::from_seed(6);
        let dt = 0.5_f64;
        let mut spot = 100.0;
        for step in 1..=2 {
            let z = rng.gen_normal();
            spot *= ((0.05 - 0.02) * dt + 0.2 * dt.sqrt() * z).exp();
            assert_relative_eq!(ensemble.spot(step, 0).unwrap(), spot, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_surface_sampled_at_previous_spot_and_step_time() {
        let calls = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = Arc::clone(&calls);
        let surface = move |spot: f64, time: f64| {
            recorder.lock().unwrap().push((spot, time));
            0.2
        };
        let model = DupireModel::new(terms(), Arc::new(surface)).unwrap();
        let ensemble = model.simulate_paths(&mut PricerRng::from_seed(1), 1, 4).unwrap();

        let calls = calls.lock().unwrap();
        // Construction probe, then one lookup per step.
        let times: Vec<f64> = calls.iter().map(|&(_, t)| t).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        for step in 1..=4 {
            assert_eq!(calls[step].0, ensemble.spot(step - 1, 0).unwrap());
        }
    }

    #[test]
    fn test_breakdown_mid_path() {
        let late = |_s: f64, t: f64| if t > 0.5 { -1.0 } else { 0.2 };
        let model = DupireModel::new(terms(), Arc::new(late)).unwrap();
        let err = model.simulate_paths(&mut PricerRng::from_seed(3), 8, 4).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::LocalVolBreakdown { time, volatility, .. } if time == 0.75 && volatility == -1.0
        ));
    }
}
