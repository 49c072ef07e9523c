//! # Pricer Pricing (Layer 3: Orchestration)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns a model tag and a map of named parameters into a
//! price pair, and re-evaluates a model over a two-parameter grid:
//! - [`ModelTag`]: model selector with declared required/optional parameters
//! - [`ModelSpec`]: the validated model, one variant per tag
//! - [`Dispatcher`]: resolves, evaluates and normalises every failure into
//!   [`PricingError`](pricer_core::types::PricingError)
//! - [`SurfaceSweeper`]: parallel grid evaluation into a [`PriceSurface`]
//! - [`EngineConfig`]: Monte Carlo defaults and sweep worker count
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `PriceResult`, `PricingError`, `CancellationToken`
//! - Layer 2 (pricer_models): the models themselves
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::{Dispatcher, ModelParameters, ModelTag};
//!
//! let params = ModelParameters::new()
//!     .with("S", 100.0)
//!     .with("K", 100.0)
//!     .with("T", 1.0)
//!     .with("r", 0.05)
//!     .with("sigma", 0.2);
//!
//! let price = Dispatcher::default()
//!     .price(ModelTag::BlackScholes, &params)
//!     .unwrap();
//! assert!((price.call() - 10.45).abs() < 0.01);
//! assert!((price.put() - 5.57).abs() < 0.01);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod dispatcher;
pub mod model;
pub mod params;
pub mod spec;
pub mod sweep;

pub use config::EngineConfig;
pub use dispatcher::{price, Dispatcher};
pub use model::ModelTag;
pub use params::ModelParameters;
pub use spec::{ModelSpec, SimulationOverrides, Valuation};
pub use sweep::{AxisSpec, PriceSurface, SurfaceSweeper};
