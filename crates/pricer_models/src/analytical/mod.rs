//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - SABR implied volatility (Hagan et al. 2002) fed into Black-Scholes
//! - Arithmetic-Asian approximation via an adjusted geometric closed form
//!
//! ## Design Principles
//!
//! - **Validation at construction**: invalid inputs never reach the formulas
//! - **Numerical Stability**: Uses erfc-based CDF whose symmetry makes
//!   put-call parity hold to rounding error

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod sabr;

// Re-export main types at module level
pub use black_scholes::BlackScholes;
pub use distributions::norm_cdf;
pub use error::AnalyticalError;
pub use sabr::{SabrModel, SabrParams};
