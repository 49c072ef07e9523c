//! Local-volatility capability `σ_loc(S, t)`.
//!
//! The Dupire model only needs the call contract of [`LocalVolatility`];
//! closures, flat surfaces and interpolated grids all satisfy it.

use pricer_core::math::interpolators::BilinearInterpolator;

use super::error::SimulationError;
use crate::terms::{require_positive, ParameterError};

/// Local volatility as a function of spot and time.
///
/// Implementations must be thread-safe: paths are simulated on a rayon pool.
/// Any `Fn(f64, f64) -> f64 + Send + Sync` closure is a local volatility.
///
/// # Examples
/// ```
/// use pricer_models::simulation::LocalVolatility;
///
/// let skew = |spot: f64, _time: f64| 0.2 * (100.0 / spot).sqrt();
/// assert!((skew.local_vol(100.0, 0.5) - 0.2).abs() < 1e-12);
/// ```
pub trait LocalVolatility: Send + Sync {
    /// Volatility at `(spot, time)`.
    fn local_vol(&self, spot: f64, time: f64) -> f64;
}

impl<F> LocalVolatility for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    #[inline]
    fn local_vol(&self, spot: f64, time: f64) -> f64 {
        self(spot, time)
    }
}

/// Constant local volatility.
///
/// With a flat surface the Dupire model reduces to Black-Scholes dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatLocalVol {
    sigma: f64,
}

impl FlatLocalVol {
    /// Creates a flat surface; `sigma` must be positive.
    pub fn new(sigma: f64) -> Result<Self, ParameterError> {
        require_positive("sigma", sigma)?;
        Ok(Self { sigma })
    }

    /// Returns the constant volatility.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl LocalVolatility for FlatLocalVol {
    #[inline]
    fn local_vol(&self, _spot: f64, _time: f64) -> f64 {
        self.sigma
    }
}

/// Local volatility interpolated bilinearly on a spot × time grid.
///
/// Outside the grid the nearest edge value is used (flat extrapolation).
///
/// # Examples
/// ```
/// use pricer_models::simulation::{GridLocalVol, LocalVolatility};
///
/// let spots = [80.0, 100.0, 120.0];
/// let times = [0.0, 1.0];
/// let vols = vec![vec![0.30, 0.28], vec![0.20, 0.20], vec![0.16, 0.18]];
/// let surface = GridLocalVol::new(&spots, &times, &vols).unwrap();
///
/// assert!((surface.local_vol(90.0, 0.0) - 0.25).abs() < 1e-12);
/// // Flat beyond the grid
/// assert!((surface.local_vol(500.0, 3.0) - 0.18).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GridLocalVol {
    grid: BilinearInterpolator<f64>,
}

impl GridLocalVol {
    /// Builds the surface with `vols[i][j] = σ(spots[i], times[j])`.
    ///
    /// # Errors
    /// - `SimulationError::Interpolation` for malformed grids (axis too
    ///   short, not strictly increasing, or ragged rows)
    /// - `SimulationError::Parameter` for a non-positive or non-finite node
    pub fn new(spots: &[f64], times: &[f64], vols: &[Vec<f64>]) -> Result<Self, SimulationError> {
        for &vol in vols.iter().flatten() {
            require_positive("local_vol", vol)?;
        }
        let rows: Vec<&[f64]> = vols.iter().map(Vec::as_slice).collect();
        let grid = BilinearInterpolator::new(spots, times, &rows)?;
        Ok(Self { grid })
    }

    /// Returns the underlying interpolator.
    #[inline]
    pub fn grid(&self) -> &BilinearInterpolator<f64> {
        &self.grid
    }
}

impl LocalVolatility for GridLocalVol {
    #[inline]
    fn local_vol(&self, spot: f64, time: f64) -> f64 {
        self.grid.interpolate_clamped(spot, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    #[test]
    fn test_flat_rejects_non_positive() {
        assert!(FlatLocalVol::new(0.0).is_err());
        assert!(FlatLocalVol::new(f64::NAN).is_err());
        assert_eq!(FlatLocalVol::new(0.25).unwrap().local_vol(1.0, 2.0), 0.25);
    }

    #[test]
    fn test_closure_behind_trait_object() {
        let surface: Arc<dyn LocalVolatility> = Arc::new(|spot: f64, time: f64| 0.1 + 0.001 * spot + time);
        assert_relative_eq!(surface.local_vol(100.0, 0.5), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_interpolates_between_nodes() {
        let surface = GridLocalVol::new(
            &[50.0, 150.0],
            &[0.0, 2.0],
            &[vec![0.4, 0.2], vec![0.2, 0.4]],
        )
        .unwrap();
        assert_relative_eq!(surface.local_vol(100.0, 1.0), 0.3, epsilon = 1e-12);
        assert_relative_eq!(surface.local_vol(10.0, -1.0), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_rejects_bad_nodes_and_shapes() {
        let bad_node = GridLocalVol::new(&[1.0, 2.0], &[0.0, 1.0], &[vec![0.2, 0.2], vec![0.2, -0.1]]);
        assert!(matches!(bad_node, Err(SimulationError::Parameter(_))));

        let ragged = GridLocalVol::new(&[1.0, 2.0], &[0.0, 1.0], &[vec![0.2, 0.2], vec![0.2]]);
        assert!(matches!(ragged, Err(SimulationError::Interpolation(_))));
    }
}
