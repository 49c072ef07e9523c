//! Core result, error, and control types.
//!
//! This module provides:
//! - `error`: Structured error types for pricing and interpolation operations
//! - `price`: The immutable `(call, put)` pair returned by every model
//! - `cancel`: Cooperative cancellation shared between a caller and long-running work
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`PricingError`], [`InterpolationError`] from `error`
//! - [`PriceResult`] from `price`
//! - [`CancellationToken`] from `cancel`

pub mod cancel;
pub mod error;
pub mod price;

// Re-export commonly used types at module level
pub use cancel::CancellationToken;
pub use error::{InterpolationError, PricingError};
pub use price::PriceResult;
