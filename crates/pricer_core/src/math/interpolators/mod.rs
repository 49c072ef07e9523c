//! Interpolation methods for numerical computation.
//!
//! ## Available Interpolators
//!
//! - [`BilinearInterpolator`]: 2D grid interpolation for surfaces
//!
//! All interpolators are generic over `T: num_traits::Float`.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::BilinearInterpolator;
//!
//! let xs = [80.0, 120.0];
//! let ys = [0.0, 1.0];
//! let zs = [&[0.25, 0.20][..], &[0.15, 0.20][..]];
//!
//! let interp = BilinearInterpolator::new(&xs, &ys, &zs).unwrap();
//! let z: f64 = interp.interpolate(100.0, 0.5).unwrap();
//! assert!((z - 0.2).abs() < 1e-12);
//! ```

mod bilinear;

// Re-export public types at module level
pub use bilinear::BilinearInterpolator;
