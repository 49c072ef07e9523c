//! Standard normal distribution function.
//!
//! `norm_cdf` uses the Abramowitz and Stegun erfc approximation
//! (formula 7.1.26), accurate to 1.5e-7.

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

// Abramowitz and Stegun constants (7.1.26)
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;
const P: f64 = 0.327_591_1;

/// Complementary error function approximation using Horner's method.
///
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
#[inline]
fn erfc_approx(x: f64) -> f64 {
    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < 0.0 {
        2.0 - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) as Φ(x) = (1/2) * erfc(-x / sqrt(2)).
///
/// Φ(x) + Φ(-x) = 1 holds to rounding error for every x, which is what
/// makes Black-Scholes put-call parity exact in this crate.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc_approx(-x / SQRT_2)
}
