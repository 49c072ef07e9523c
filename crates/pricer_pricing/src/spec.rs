//! Validated model instances built from a tag and a parameter map.
//!
//! Resolution checks, in order: every required parameter is present and not
//! NaN, no key falls outside the model's declared set, counts and seeds are
//! integral, then the model's own constructor validates its domain. Any
//! failure happens before a single path is simulated.

use std::sync::Arc;

use pricer_core::types::{CancellationToken, PriceResult, PricingError};
use pricer_models::analytical::{BlackScholes, SabrModel, SabrParams};
use pricer_models::lattice::BinomialTree;
use pricer_models::simulation::{
    DupireModel, FlatLocalVol, HestonModel, HestonParams, LocalVolatility, MertonModel,
    MertonParams, MonteCarloEngine, MonteCarloEstimate, PathSimulator, VarianceGammaModel,
    VarianceGammaParams,
};
use pricer_models::terms::OptionTerms;

use crate::config::EngineConfig;
use crate::model::ModelTag;
use crate::params::ModelParameters;

/// Per-call overrides of the engine's Monte Carlo defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationOverrides {
    /// Overrides [`EngineConfig::num_simulations`]
    pub num_simulations: Option<usize>,
    /// Overrides [`EngineConfig::num_steps`]
    pub num_steps: Option<usize>,
    /// Overrides [`EngineConfig::seed`]
    pub seed: Option<u64>,
}

/// A model ready to price, one variant per [`ModelTag`].
#[derive(Debug, Clone)]
pub enum ModelSpec {
    /// Black-Scholes closed form
    BlackScholes(BlackScholes),
    /// Binomial tree
    Binomial(BinomialTree),
    /// SABR volatility into Black-Scholes
    Sabr(SabrModel),
    /// Heston Monte Carlo
    Heston(HestonModel, SimulationOverrides),
    /// Merton Monte Carlo
    Merton(MertonModel, SimulationOverrides),
    /// Variance Gamma Monte Carlo
    VarianceGamma(VarianceGammaModel, SimulationOverrides),
    /// Dupire local-volatility Monte Carlo
    Dupire(DupireModel, SimulationOverrides),
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    /// Call and put prices
    pub price: PriceResult,
    /// Standard errors and seed, for Monte Carlo models
    pub monte_carlo: Option<MonteCarloEstimate>,
}

impl From<PriceResult> for Valuation {
    fn from(price: PriceResult) -> Self {
        Self {
            price,
            monte_carlo: None,
        }
    }
}

impl From<MonteCarloEstimate> for Valuation {
    fn from(estimate: MonteCarloEstimate) -> Self {
        Self {
            price: estimate.price(),
            monte_carlo: Some(estimate),
        }
    }
}

impl ModelSpec {
    /// Resolves `params` into a validated model.
    ///
    /// `local_vol` is used by Dupire; without it Dupire falls back to a
    /// flat surface at `sigma`.
    ///
    /// # Errors
    /// - `MissingParameter` for an absent or NaN required value, or for
    ///   Dupire with neither a surface nor `sigma`
    /// - `InvalidParameter` for unrecognised keys, non-integral counts and
    ///   values outside the model's domain
    pub fn resolve(
        tag: ModelTag,
        params: &ModelParameters,
        local_vol: Option<&Arc<dyn LocalVolatility>>,
    ) -> Result<Self, PricingError> {
        for &name in tag.required_parameters() {
            if params.defined(name).is_none() {
                return Err(PricingError::MissingParameter(name.to_string()));
            }
        }
        for (name, value) in params.iter() {
            if !tag.accepts(name) {
                return Err(PricingError::invalid(
                    name,
                    value,
                    format!("unrecognised parameter for {tag}"),
                ));
            }
        }

        let reader = Reader(params);
        let terms = OptionTerms::new(
            reader.required("S")?,
            reader.required("K")?,
            reader.required("T")?,
            reader.required("r")?,
        )?;

        let spec = match tag {
            ModelTag::BlackScholes => {
                ModelSpec::BlackScholes(BlackScholes::new(terms, reader.required("sigma")?)?)
            }
            ModelTag::Binomial => ModelSpec::Binomial(BinomialTree::new(
                terms,
                reader.required("sigma")?,
                reader.count("steps")?.unwrap_or(0),
            )?),
            ModelTag::Sabr => {
                let params = SabrParams {
                    alpha: reader.required("alpha")?,
                    beta: reader.required("beta")?,
                    rho: reader.required("rho")?,
                    nu: reader.required("nu")?,
                };
                ModelSpec::Sabr(SabrModel::new(terms, params)?)
            }
            ModelTag::Heston => {
                let params = HestonParams {
                    kappa: reader.required("kappa")?,
                    theta: reader.required("theta")?,
                    xi: reader.required("xi")?,
                    rho: reader.required("rho")?,
                    v0: reader.required("v0")?,
                    mu: reader.required("mu")?,
                };
                ModelSpec::Heston(HestonModel::new(terms, params)?, reader.overrides()?)
            }
            ModelTag::Merton => {
                let params = MertonParams {
                    sigma: reader.required("sigma")?,
                    lambda_j: reader.required("lambda_j")?,
                    mu_j: reader.required("mu_j")?,
                    sigma_j: reader.required("sigma_j")?,
                };
                ModelSpec::Merton(MertonModel::new(terms, params)?, reader.overrides()?)
            }
            ModelTag::VarianceGamma => {
                let params = VarianceGammaParams {
                    sigma: reader.required("sigma")?,
                    theta: reader.required("theta")?,
                    nu: reader.required("nu")?,
                };
                ModelSpec::VarianceGamma(VarianceGammaModel::new(terms, params)?, reader.overrides()?)
            }
            ModelTag::Dupire => {
                let surface: Arc<dyn LocalVolatility> = match (local_vol, params.defined("sigma")) {
                    (Some(surface), _) => Arc::clone(surface),
                    (None, Some(sigma)) => Arc::new(FlatLocalVol::new(sigma)?),
                    (None, None) => return Err(PricingError::MissingParameter("local_vol".to_string())),
                };
                ModelSpec::Dupire(DupireModel::new(terms, surface)?, reader.overrides()?)
            }
        };
        Ok(spec)
    }

    /// Tag of this model.
    pub fn tag(&self) -> ModelTag {
        match self {
            ModelSpec::BlackScholes(_) => ModelTag::BlackScholes,
            ModelSpec::Binomial(_) => ModelTag::Binomial,
            ModelSpec::Sabr(_) => ModelTag::Sabr,
            ModelSpec::Heston(..) => ModelTag::Heston,
            ModelSpec::Merton(..) => ModelTag::Merton,
            ModelSpec::VarianceGamma(..) => ModelTag::VarianceGamma,
            ModelSpec::Dupire(..) => ModelTag::Dupire,
        }
    }

    /// Prices the model; Monte Carlo variants use `config` for any setting
    /// the parameter map did not override.
    pub fn evaluate(
        &self,
        config: &EngineConfig,
        cancellation: Option<&CancellationToken>,
    ) -> Result<Valuation, PricingError> {
        match self {
            ModelSpec::BlackScholes(model) => Ok(model.price().into()),
            ModelSpec::Binomial(tree) => Ok(tree.price()?.into()),
            ModelSpec::Sabr(model) => Ok(model.price()?.into()),
            ModelSpec::Heston(model, overrides) => simulate(model, overrides, config, cancellation),
            ModelSpec::Merton(model, overrides) => simulate(model, overrides, config, cancellation),
            ModelSpec::VarianceGamma(model, overrides) => {
                simulate(model, overrides, config, cancellation)
            }
            ModelSpec::Dupire(model, overrides) => simulate(model, overrides, config, cancellation),
        }
    }
}

fn simulate<M: PathSimulator>(
    model: &M,
    overrides: &SimulationOverrides,
    config: &EngineConfig,
    cancellation: Option<&CancellationToken>,
) -> Result<Valuation, PricingError> {
    let simulation = config.simulation_config(
        overrides.num_simulations.unwrap_or(config.num_simulations),
        overrides.num_steps.unwrap_or(config.num_steps),
        overrides.seed.or(config.seed),
    )?;
    let mut engine = MonteCarloEngine::new(simulation);
    if let Some(token) = cancellation {
        engine = engine.with_cancellation(token.clone());
    }
    Ok(engine.run(model)?.into())
}

/// Typed access to a parameter map.
struct Reader<'a>(&'a ModelParameters);

impl Reader<'_> {
    fn required(&self, name: &str) -> Result<f64, PricingError> {
        self.0
            .defined(name)
            .ok_or_else(|| PricingError::MissingParameter(name.to_string()))
    }

    /// A positive integer count; `None` when absent or NaN.
    fn count(&self, name: &str) -> Result<Option<usize>, PricingError> {
        match self.0.defined(name) {
            None => Ok(None),
            Some(value) if value.is_finite() && value >= 1.0 && value.fract() == 0.0 => {
                Ok(Some(value as usize))
            }
            Some(value) => Err(PricingError::invalid(name, value, "must be a positive integer")),
        }
    }

    fn seed(&self) -> Result<Option<u64>, PricingError> {
        match self.0.defined("seed") {
            None => Ok(None),
            Some(value) if value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 => {
                Ok(Some(value as u64))
            }
            Some(value) => Err(PricingError::invalid("seed", value, "must be a non-negative integer")),
        }
    }

    fn overrides(&self) -> Result<SimulationOverrides, PricingError> {
        Ok(SimulationOverrides {
            num_simulations: self.count("num_simulations")?,
            num_steps: self.count("num_steps")?,
            seed: self.seed()?,
        })
    }
}
