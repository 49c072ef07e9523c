//! Monte Carlo batch engine.
//!
//! Paths are split into fixed-size batches. Each batch draws from its own
//! [`PricerRng`] seeded from the run's base seed and the batch index, so a
//! seeded estimate does not depend on how many rayon workers execute it.
//! Per-batch payoff moments are gathered in batch order and reduced
//! sequentially, which keeps the floating-point sum deterministic.

use pricer_core::types::{CancellationToken, PriceResult};
use rayon::prelude::*;

use super::config::SimulationConfig;
use super::error::SimulationError;
use super::rng::{batch_seed, fresh_seed, PricerRng};
use crate::terms::OptionTerms;

/// A model that can simulate terminal underlying values.
///
/// Implementors fill `terminals` with independent draws of `S_T`, using
/// `num_steps` time steps where the dynamics need them.
pub trait PathSimulator: Sync {
    /// Contract terms used for payoffs and discounting.
    fn terms(&self) -> &OptionTerms;

    /// Fills `terminals` with simulated terminal spots.
    fn simulate_terminals(
        &self,
        rng: &mut PricerRng,
        num_steps: usize,
        terminals: &mut [f64],
    ) -> Result<(), SimulationError>;
}

/// Discounted Monte Carlo estimate with its standard errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloEstimate {
    price: PriceResult,
    call_std_error: f64,
    put_std_error: f64,
    num_paths: usize,
    seed: u64,
}

impl MonteCarloEstimate {
    /// Discounted mean payoffs.
    #[inline]
    pub fn price(&self) -> PriceResult {
        self.price
    }

    /// Standard error of the call estimate.
    #[inline]
    pub fn call_std_error(&self) -> f64 {
        self.call_std_error
    }

    /// Standard error of the put estimate.
    #[inline]
    pub fn put_std_error(&self) -> f64 {
        self.put_std_error
    }

    /// Number of simulated paths.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Base seed of the run (drawn fresh when none was configured).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Payoff sums of one batch.
#[derive(Debug, Clone, Copy, Default)]
struct BatchMoments {
    count: usize,
    call_sum: f64,
    call_sq: f64,
    put_sum: f64,
    put_sq: f64,
}

impl BatchMoments {
    fn from_terminals(terms: &OptionTerms, terminals: &[f64]) -> Self {
        terminals.iter().fold(
            Self {
                count: terminals.len(),
                ..Self::default()
            },
            |mut acc, &s| {
                let call = terms.call_payoff(s);
                let put = terms.put_payoff(s);
                acc.call_sum += call;
                acc.call_sq += call * call;
                acc.put_sum += put;
                acc.put_sq += put * put;
                acc
            },
        )
    }

    fn merge(mut self, other: &Self) -> Self {
        self.count += other.count;
        self.call_sum += other.call_sum;
        self.call_sq += other.call_sq;
        self.put_sum += other.put_sum;
        self.put_sq += other.put_sq;
        self
    }
}

/// Mean and standard error of the mean from running sums.
fn mean_and_std_error(sum: f64, sq: f64, n: usize) -> (f64, f64) {
    let n_f = n as f64;
    let mean = sum / n_f;
    if n < 2 {
        return (mean, 0.0);
    }
    let variance = ((sq - n_f * mean * mean) / (n_f - 1.0)).max(0.0);
    (mean, (variance / n_f).sqrt())
}

/// Monte Carlo engine running a [`PathSimulator`] in parallel batches.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::CancellationToken;
/// use pricer_models::simulation::{
///     MonteCarloEngine, SimulationConfig, SimulationError, VarianceGammaModel,
///     VarianceGammaParams,
/// };
/// use pricer_models::terms::OptionTerms;
///
/// let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
/// let params = VarianceGammaParams { sigma: 0.2, theta: -0.1, nu: 0.2 };
/// let model = VarianceGammaModel::new(terms, params).unwrap();
///
/// let token = CancellationToken::new();
/// token.cancel();
/// let engine = MonteCarloEngine::new(SimulationConfig::default()).with_cancellation(token);
/// assert_eq!(engine.run(&model), Err(SimulationError::Cancelled));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    config: SimulationConfig,
    cancellation: Option<CancellationToken>,
}

impl MonteCarloEngine {
    /// Creates an engine for a validated configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            cancellation: None,
        }
    }

    /// Polls `token` before every batch.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Simulates all batches and returns the discounted estimate.
    ///
    /// # Errors
    ///
    /// - Configuration errors from [`SimulationConfig::validate`]
    /// - Any error raised by the model while simulating
    /// - `SimulationError::Cancelled` when the token fires between batches
    pub fn run<M: PathSimulator>(&self, model: &M) -> Result<MonteCarloEstimate, SimulationError> {
        self.config.validate()?;
        if self.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }

        let seed = self.config.seed().unwrap_or_else(fresh_seed);
        let total = self.config.num_simulations();
        let batch_size = self.config.batch_size();
        let num_steps = self.config.num_steps();
        let terms = model.terms();

        let batches = (0..self.config.num_batches())
            .into_par_iter()
            .map(|index| {
                if self.is_cancelled() {
                    return Err(SimulationError::Cancelled);
                }
                let start = index * batch_size;
                let len = batch_size.min(total - start);
                let mut rng = PricerRng::from_seed(batch_seed(seed, index));
                let mut terminals = vec![0.0; len];
                model.simulate_terminals(&mut rng, num_steps, &mut terminals)?;
                Ok(BatchMoments::from_terminals(terms, &terminals))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let totals = batches
            .iter()
            .fold(BatchMoments::default(), BatchMoments::merge);

        let discount = terms.discount_factor();
        let (call_mean, call_se) = mean_and_std_error(totals.call_sum, totals.call_sq, totals.count);
        let (put_mean, put_se) = mean_and_std_error(totals.put_sum, totals.put_sq, totals.count);

        Ok(MonteCarloEstimate {
            price: PriceResult::new(discount * call_mean, discount * put_mean),
            call_std_error: discount * call_se,
            put_std_error: discount * put_se,
            num_paths: totals.count,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Deterministic terminal spots cycling through a fixed list.
    struct FixedTerminals {
        terms: OptionTerms,
        values: Vec<f64>,
    }

    impl PathSimulator for FixedTerminals {
        fn terms(&self) -> &OptionTerms {
            &self.terms
        }

        fn simulate_terminals(
            &self,
            _rng: &mut PricerRng,
            _num_steps: usize,
            terminals: &mut [f64],
        ) -> Result<(), SimulationError> {
            for (slot, value) in terminals.iter_mut().zip(self.values.iter().cycle()) {
                *slot = *value;
            }
            Ok(())
        }
    }

    /// Terminal spots equal to the first normal draw.
    struct NormalTerminals {
        terms: OptionTerms,
    }

    impl PathSimulator for NormalTerminals {
        fn terms(&self) -> &OptionTerms {
            &self.terms
        }

        fn simulate_terminals(
            &self,
            rng: &mut PricerRng,
            _num_steps: usize,
            terminals: &mut [f64],
        ) -> Result<(), SimulationError> {
            for slot in terminals.iter_mut() {
                *slot = 100.0 + 10.0 * rng.gen_normal();
            }
            Ok(())
        }
    }

    fn terms() -> OptionTerms {
        OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap()
    }

    fn config(num_simulations: usize, batch_size: usize, seed: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .num_simulations(num_simulations)
            .batch_size(batch_size)
            .seed(seed)
            .build()
            .unwrap()
    }

    // ==========================================================
    // Estimation
    // ==========================================================

    #[test]
    fn test_discounted_mean_of_fixed_payoffs() {
        let model = FixedTerminals {
            terms: terms(),
            values: vec![110.0, 90.0],
        };
        let estimate = MonteCarloEngine::new(config(1_000, 64, 1)).run(&model).unwrap();
        let disc = (-0.05_f64).exp();

        assert_eq!(estimate.num_paths(), 1_000);
        assert_relative_eq!(estimate.price().call(), 5.0 * disc, epsilon = 1e-12);
        assert_relative_eq!(estimate.price().put(), 5.0 * disc, epsilon = 1e-12);
        // Payoffs alternate 10 / 0: sample std ≈ 5.0025
        assert_relative_eq!(
            estimate.call_std_error(),
            disc * (25.0 * 1_000.0 / 999.0_f64).sqrt() / 1_000.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_single_path_has_zero_std_error() {
        let model = FixedTerminals {
            terms: terms(),
            values: vec![120.0],
        };
        let estimate = MonteCarloEngine::new(config(1, 8, 1)).run(&model).unwrap();
        assert_eq!(estimate.call_std_error(), 0.0);
        assert!(estimate.price().call() > 0.0);
    }

    // ==========================================================
    // Reproducibility
    // ==========================================================

    #[test]
    fn test_seeded_runs_identical() {
        let model = NormalTerminals { terms: terms() };
        let engine = MonteCarloEngine::new(config(5_000, 256, 99));
        let a = engine.run(&model).unwrap();
        let b = engine.run(&model).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn test_seeded_run_independent_of_pool_size() {
        let model = NormalTerminals { terms: terms() };
        let engine = MonteCarloEngine::new(config(5_000, 256, 5));

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| engine.run(&model).unwrap());
        let multi = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| engine.run(&model).unwrap());

        assert_eq!(single, multi);
    }

    #[test]
    fn test_different_seeds_differ() {
        let model = NormalTerminals { terms: terms() };
        let a = MonteCarloEngine::new(config(2_000, 256, 1)).run(&model).unwrap();
        let b = MonteCarloEngine::new(config(2_000, 256, 2)).run(&model).unwrap();
        assert_ne!(a.price(), b.price());
    }

    #[test]
    fn test_unseeded_run_reports_drawn_seed() {
        let model = NormalTerminals { terms: terms() };
        let config = SimulationConfig::builder()
            .num_simulations(100)
            .build()
            .unwrap();
        let estimate = MonteCarloEngine::new(config).run(&model).unwrap();
        let replay = MonteCarloEngine::new(
            SimulationConfig::builder()
                .num_simulations(100)
                .seed(estimate.seed())
                .build()
                .unwrap(),
        )
        .run(&model)
        .unwrap();
        assert_eq!(estimate.price(), replay.price());
    }

    // ==========================================================
    // Cancellation
    // ==========================================================

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let model = NormalTerminals { terms: terms() };
        let result = MonteCarloEngine::new(config(1_000, 64, 1))
            .with_cancellation(token)
            .run(&model);
        assert_eq!(result, Err(SimulationError::Cancelled));
    }
}
