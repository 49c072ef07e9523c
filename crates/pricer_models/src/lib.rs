//! # Pricer Models (L2: Business Logic)
//!
//! Option pricing models mapping model parameters onto a `(call, put)` pair.
//!
//! This crate provides:
//! - Closed-form models: Black-Scholes, SABR and an arithmetic-Asian
//!   approximation ([`analytical`])
//! - A Cox-Ross-Rubinstein binomial tree ([`lattice`])
//! - Monte Carlo models: Heston, Merton jump-diffusion, Variance Gamma and
//!   Dupire local volatility, together with the batch engine that drives
//!   them ([`simulation`])
//! - Validated contract terms shared by every model ([`terms`])
//!
//! ## Design Principles
//!
//! - **Validate at construction**: every model checks its parameters before
//!   any pricing or simulation work begins
//! - **One error type per concern**: each module error converts into
//!   [`pricer_core::types::PricingError`]
//! - **Explicit randomness**: Monte Carlo models draw from a seeded
//!   [`simulation::PricerRng`] per path batch
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::terms::OptionTerms;
//!
//! let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
//! let result = BlackScholes::new(terms, 0.2).unwrap().price();
//! assert!((result.call() - 10.45).abs() < 0.01);
//! assert!((result.put() - 5.57).abs() < 0.01);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod lattice;
pub mod simulation;
pub mod terms;
