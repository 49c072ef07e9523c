//! Bilinear interpolation on a rectangular grid.

use crate::types::InterpolationError;
use num_traits::Float;

/// One strictly increasing grid axis.
#[derive(Debug, Clone)]
struct GridAxis<T> {
    knots: Vec<T>,
}

impl<T: Float> GridAxis<T> {
    fn new(knots: &[T]) -> Result<Self, InterpolationError> {
        if knots.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: knots.len(),
                need: 2,
            });
        }
        if let Some(pos) = knots.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(InterpolationError::NonMonotonicData { index: pos + 1 });
        }
        Ok(Self {
            knots: knots.to_vec(),
        })
    }

    fn first(&self) -> T {
        self.knots[0]
    }

    fn last(&self) -> T {
        self.knots[self.knots.len() - 1]
    }

    fn contains(&self, value: T) -> bool {
        value >= self.first() && value <= self.last()
    }

    fn clamp(&self, value: T) -> T {
        value.max(self.first()).min(self.last())
    }

    fn out_of_bounds(&self, value: T) -> InterpolationError {
        let as_f64 = |v: T| v.to_f64().unwrap_or(f64::NAN);
        InterpolationError::OutOfBounds {
            x: as_f64(value),
            min: as_f64(self.first()),
            max: as_f64(self.last()),
        }
    }

    /// Lower knot index of the cell holding `value` and the weight of the
    /// upper knot. `value` must lie inside the axis.
    fn bracket(&self, value: T) -> (usize, T) {
        let last_cell = self.knots.len() - 2;
        let lo = self
            .knots
            .partition_point(|&k| k <= value)
            .saturating_sub(1)
            .min(last_cell);
        let (a, b) = (self.knots[lo], self.knots[lo + 1]);
        (lo, (value - a) / (b - a))
    }
}

/// Bilinear interpolator over `z(x, y)` samples.
///
/// Rows follow `xs` and columns follow `ys`. Local-volatility grids use
/// spot for `x` and time for `y`.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let spots = [80.0, 100.0, 120.0];
/// let times = [0.0, 1.0];
/// let vols = [&[0.30, 0.26][..], &[0.22, 0.20][..], &[0.18, 0.19][..]];
///
/// let surface = BilinearInterpolator::new(&spots, &times, &vols).unwrap();
/// let vol: f64 = surface.interpolate(90.0, 0.5).unwrap();
/// assert!((vol - 0.245).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BilinearInterpolator<T> {
    rows: GridAxis<T>,
    cols: GridAxis<T>,
    /// Row-major samples, `rows.len() * cols.len()` long
    samples: Vec<T>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Builds an interpolator where `zs[i][j]` is the sample at `(xs[i], ys[j])`.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` when an axis has fewer than two knots
    /// * `NonMonotonicData` when an axis is not strictly increasing
    /// * `InvalidInput` when the sample rows do not match the axes
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        let rows = GridAxis::new(xs)?;
        let cols = GridAxis::new(ys)?;

        if zs.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "{} sample rows for {} x knots",
                zs.len(),
                xs.len()
            )));
        }
        if let Some((i, row)) = zs.iter().enumerate().find(|(_, row)| row.len() != ys.len()) {
            return Err(InterpolationError::InvalidInput(format!(
                "sample row {i} has {} values for {} y knots",
                row.len(),
                ys.len()
            )));
        }

        Ok(Self {
            rows,
            cols,
            samples: zs.iter().flat_map(|row| row.iter().copied()).collect(),
        })
    }

    /// Interpolated value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` for a point outside the grid.
    pub fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError> {
        if !self.rows.contains(x) {
            return Err(self.rows.out_of_bounds(x));
        }
        if !self.cols.contains(y) {
            return Err(self.cols.out_of_bounds(y));
        }
        Ok(self.blend(x, y))
    }

    /// Interpolated value with flat extrapolation outside the grid.
    ///
    /// NaN coordinates give NaN.
    pub fn interpolate_clamped(&self, x: T, y: T) -> T {
        if x.is_nan() || y.is_nan() {
            return T::nan();
        }
        self.blend(self.rows.clamp(x), self.cols.clamp(y))
    }

    /// `(first, last)` x knot.
    pub fn domain_x(&self) -> (T, T) {
        (self.rows.first(), self.rows.last())
    }

    /// `(first, last)` y knot.
    pub fn domain_y(&self) -> (T, T) {
        (self.cols.first(), self.cols.last())
    }

    /// The x knots.
    pub fn xs(&self) -> &[T] {
        &self.rows.knots
    }

    /// The y knots.
    pub fn ys(&self) -> &[T] {
        &self.cols.knots
    }

    /// Sample at knot `(i, j)`.
    pub fn sample(&self, i: usize, j: usize) -> Option<T> {
        let width = self.cols.knots.len();
        (j < width).then(|| self.samples.get(i * width + j).copied()).flatten()
    }

    fn blend(&self, x: T, y: T) -> T {
        let width = self.cols.knots.len();
        let (i, u) = self.rows.bracket(x);
        let (j, v) = self.cols.bracket(y);
        let at = |di: usize, dj: usize| self.samples[(i + di) * width + j + dj];

        let low = at(0, 0) + (at(1, 0) - at(0, 0)) * u;
        let high = at(0, 1) + (at(1, 1) - at(0, 1)) * u;
        low + (high - low) * v
    }
}
