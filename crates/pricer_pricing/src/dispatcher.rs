//! Pricing dispatcher: tag + parameter map → price pair.
//!
//! Every failure inside a model, including a panic raised by a
//! caller-supplied local-volatility surface, comes back as a
//! [`PricingError`].

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use pricer_core::types::{CancellationToken, PriceResult, PricingError};
use pricer_models::simulation::LocalVolatility;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::model::ModelTag;
use crate::params::ModelParameters;
use crate::spec::{ModelSpec, Valuation};

/// Resolves and evaluates models by tag.
///
/// # Examples
///
/// ```
/// use pricer_pricing::{Dispatcher, ModelParameters, ModelTag};
///
/// let params = ModelParameters::new()
///     .with("S", 100.0)
///     .with("K", 100.0)
///     .with("T", 1.0)
///     .with("r", 0.05)
///     .with("sigma", 0.2)
///     .with("steps", 200.0);
///
/// let dispatcher = Dispatcher::default();
/// let price = dispatcher.price(ModelTag::Binomial, &params).unwrap();
/// assert!((price.call() - 10.45).abs() < 0.05);
/// ```
#[derive(Clone, Default)]
pub struct Dispatcher {
    config: EngineConfig,
    local_vol: Option<Arc<dyn LocalVolatility>>,
    cancellation: Option<CancellationToken>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("local_vol", &self.local_vol.is_some())
            .field("cancellation", &self.cancellation)
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher with the given engine defaults.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Supplies the local-volatility surface used by Dupire.
    pub fn with_local_vol(mut self, local_vol: Arc<dyn LocalVolatility>) -> Self {
        self.local_vol = Some(local_vol);
        self
    }

    /// Attaches a cancellation token polled between Monte Carlo batches.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns the engine defaults.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the cancellation token, if any.
    #[inline]
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Validates `params` for `tag` without pricing.
    pub fn resolve(&self, tag: ModelTag, params: &ModelParameters) -> Result<ModelSpec, PricingError> {
        ModelSpec::resolve(tag, params, self.local_vol.as_ref())
    }

    /// Prices and returns the Monte Carlo diagnostics alongside the prices.
    pub fn evaluate(&self, tag: ModelTag, params: &ModelParameters) -> Result<Valuation, PricingError> {
        debug!(model = %tag, parameters = params.len(), "dispatching");
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.resolve(tag, params)?
                .evaluate(&self.config, self.cancellation.as_ref())
        }))
        .unwrap_or_else(|payload| Err(PricingError::ComputationFailed(panic_message(payload))));

        match &outcome {
            Ok(valuation) => debug!(
                model = %tag,
                call = valuation.price.call(),
                put = valuation.price.put(),
                "priced"
            ),
            Err(PricingError::Cancelled) => warn!(model = %tag, "pricing cancelled"),
            Err(err) => debug!(model = %tag, error = %err, "pricing failed"),
        }
        outcome
    }

    /// Prices `tag` with `params`.
    pub fn price(&self, tag: ModelTag, params: &ModelParameters) -> Result<PriceResult, PricingError> {
        self.evaluate(tag, params).map(|valuation| valuation.price)
    }
}

/// Prices a model named by `tag` with default engine settings.
///
/// # Errors
/// `PricingError::UnknownModel` for an unrecognised tag, otherwise as
/// [`Dispatcher::price`].
///
/// # Examples
///
/// ```
/// use pricer_core::types::PricingError;
/// use pricer_pricing::{price, ModelParameters};
///
/// let params = ModelParameters::new().with("S", 100.0);
/// assert!(matches!(price("heston", &params), Err(PricingError::MissingParameter(_))));
/// assert!(matches!(price("garch", &params), Err(PricingError::UnknownModel(_))));
/// ```
pub fn price(tag: &str, params: &ModelParameters) -> Result<PriceResult, PricingError> {
    Dispatcher::default().price(tag.parse()?, params)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "model panicked".to_string()
    }
}
