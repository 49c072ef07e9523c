//! Numerical building blocks shared by the model layer.
//!
//! - `interpolators`: 2D grid interpolation for surfaces such as local volatility

pub mod interpolators;
