//! # pricer_core: Foundation for the Option Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - Error types: `PricingError`, `InterpolationError` (`types::error`)
//! - The `(call, put)` result pair: `PriceResult` (`types::price`)
//! - Cooperative cancellation: `CancellationToken` (`types::cancel`)
//! - Grid interpolation for surfaces (`math::interpolators`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{CancellationToken, PriceResult, PricingError};
//!
//! let result = PriceResult::new(10.45, 5.57);
//! assert_eq!(result.call(), 10.45);
//!
//! let err = PricingError::MissingParameter("kappa".to_string());
//! assert!(err.is_invalid_parameter());
//!
//! let token = CancellationToken::new();
//! assert!(!token.is_cancelled());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `PriceResult` and `InterpolationError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
