//! Monte Carlo path-simulation models.
//!
//! This module provides:
//! - [`MonteCarloEngine`]: batch runner over a rayon pool with per-batch
//!   seeding and cooperative cancellation
//! - [`SimulationConfig`]: path count, step count, batch size and seed
//! - [`PricerRng`]: seeded PRNG wrapper
//! - [`PathEnsemble`]: simulated spot (and variance) trajectories
//! - Models: [`HestonModel`], [`MertonModel`], [`VarianceGammaModel`],
//!   [`DupireModel`]
//! - [`LocalVolatility`]: caller-supplied `(spot, time) -> volatility`
//!   capability with [`FlatLocalVol`] and [`GridLocalVol`]
//!
//! Every model validates its parameters in its constructor, so invalid
//! inputs fail before any path is drawn.
//!
//! ## Usage
//!
//! ```rust
//! use pricer_models::simulation::{
//!     MertonModel, MertonParams, MonteCarloEngine, SimulationConfig,
//! };
//! use pricer_models::terms::OptionTerms;
//!
//! let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
//! let params = MertonParams { sigma: 0.2, lambda_j: 0.5, mu_j: -0.1, sigma_j: 0.15 };
//! let model = MertonModel::new(terms, params).unwrap();
//!
//! let config = SimulationConfig::builder()
//!     .num_simulations(4_096)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let estimate = MonteCarloEngine::new(config).run(&model).unwrap();
//! assert!(estimate.price().call() > 0.0);
//! ```

pub mod config;
pub mod dupire;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod heston;
pub mod local_vol;
pub mod merton;
pub mod rng;
pub mod variance_gamma;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use dupire::DupireModel;
pub use engine::{MonteCarloEngine, MonteCarloEstimate, PathSimulator};
pub use ensemble::PathEnsemble;
pub use error::SimulationError;
pub use heston::{HestonModel, HestonParams};
pub use local_vol::{FlatLocalVol, GridLocalVol, LocalVolatility};
pub use merton::{MertonModel, MertonParams};
pub use rng::PricerRng;
pub use variance_gamma::{VarianceGammaModel, VarianceGammaParams};
