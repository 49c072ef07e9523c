//! Two-parameter price surfaces.
//!
//! A sweep re-prices one model over the Cartesian product of two axes,
//! holding every other parameter fixed. Cells are independent: each one is
//! priced on the sweeper's worker pool, and a failed cell never aborts the
//! sweep. The surface always has the full `x.count × y.count` shape.
//!
//! With a seeded [`EngineConfig`](crate::EngineConfig) every Monte Carlo
//! cell reuses the same random streams, so neighbouring cells differ only
//! through their parameters.

use pricer_core::types::{PriceResult, PricingError};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatcher;
use crate::model::ModelTag;
use crate::params::ModelParameters;

/// One sweep axis: `count` evenly spaced values of `name` from `low` to
/// `high` inclusive.
///
/// # Examples
///
/// ```
/// use pricer_pricing::AxisSpec;
///
/// let axis = AxisSpec::new("sigma", 0.1, 0.5, 5);
/// let values = axis.values();
/// assert_eq!(values.len(), 5);
/// assert!((values[2] - 0.3).abs() < 1e-12);
/// assert_eq!(values[4], 0.5);
///
/// assert_eq!(AxisSpec::new("S", 80.0, 120.0, 1).values(), vec![80.0]);
/// assert!(AxisSpec::new("S", 80.0, 120.0, 0).values().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSpec {
    /// Parameter overridden along this axis
    pub name: String,
    /// First value
    pub low: f64,
    /// Last value
    pub high: f64,
    /// Number of values
    pub count: usize,
}

impl AxisSpec {
    /// Creates an axis.
    pub fn new(name: impl Into<String>, low: f64, high: f64, count: usize) -> Self {
        Self {
            name: name.into(),
            low,
            high,
            count,
        }
    }

    /// Inclusive linear space; the last value is exactly `high`.
    pub fn values(&self) -> Vec<f64> {
        match self.count {
            0 => Vec::new(),
            1 => vec![self.low],
            n => {
                let step = (self.high - self.low) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { self.high } else { self.low + step * i as f64 })
                    .collect()
            }
        }
    }
}

/// Result grid of a sweep, row-major with `x` as the row index.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSurface {
    model: ModelTag,
    x_name: String,
    y_name: String,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    cells: Vec<Result<PriceResult, PricingError>>,
}

impl PriceSurface {
    /// Swept model.
    pub fn model(&self) -> ModelTag {
        self.model
    }

    /// Row-axis parameter name.
    pub fn x_name(&self) -> &str {
        &self.x_name
    }

    /// Column-axis parameter name.
    pub fn y_name(&self) -> &str {
        &self.y_name
    }

    /// Row-axis values.
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// Column-axis values.
    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.x_values.len(), self.y_values.len())
    }

    /// Outcome at row `i`, column `j`.
    pub fn cell(&self, i: usize, j: usize) -> Option<&Result<PriceResult, PricingError>> {
        let (rows, cols) = self.shape();
        (i < rows && j < cols).then(|| &self.cells[i * cols + j])
    }

    /// All outcomes in row-major order.
    pub fn cells(&self) -> &[Result<PriceResult, PricingError>] {
        &self.cells
    }

    /// Call prices with `NaN` in failed cells.
    pub fn call_grid(&self) -> Vec<Vec<f64>> {
        self.grid(PriceResult::call)
    }

    /// Put prices with `NaN` in failed cells.
    pub fn put_grid(&self) -> Vec<Vec<f64>> {
        self.grid(PriceResult::put)
    }

    /// Number of failed cells.
    pub fn failures(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_err()).count()
    }

    fn grid(&self, leg: fn(&PriceResult) -> f64) -> Vec<Vec<f64>> {
        let cols = self.y_values.len();
        if cols == 0 {
            return vec![Vec::new(); self.x_values.len()];
        }
        self.cells
            .chunks(cols)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map_or(f64::NAN, leg))
                    .collect()
            })
            .collect()
    }
}

/// Evaluates a [`Dispatcher`] over parameter grids on a fixed-size pool.
///
/// # Examples
///
/// ```
/// use pricer_pricing::{AxisSpec, Dispatcher, ModelParameters, ModelTag, SurfaceSweeper};
///
/// let base = ModelParameters::new()
///     .with("S", 100.0)
///     .with("K", 100.0)
///     .with("T", 1.0)
///     .with("r", 0.05)
///     .with("sigma", 0.2);
///
/// let sweeper = SurfaceSweeper::new(Dispatcher::default()).unwrap();
/// let surface = sweeper.sweep(
///     ModelTag::BlackScholes,
///     &base,
///     &AxisSpec::new("S", 80.0, 120.0, 3),
///     &AxisSpec::new("sigma", 0.0, 0.4, 3),
/// );
///
/// assert_eq!(surface.shape(), (3, 3));
/// // sigma = 0 is outside the model's domain
/// assert_eq!(surface.failures(), 3);
/// assert!(surface.call_grid()[0][0].is_nan());
/// ```
pub struct SurfaceSweeper {
    dispatcher: Dispatcher,
    pool: ThreadPool,
}

impl std::fmt::Debug for SurfaceSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceSweeper")
            .field("dispatcher", &self.dispatcher)
            .field("workers", &self.pool.current_num_threads())
            .finish()
    }
}

impl SurfaceSweeper {
    /// Creates a sweeper with `dispatcher.config().worker_count()` threads.
    ///
    /// # Errors
    /// `PricingError::ComputationFailed` when the pool cannot be started.
    pub fn new(dispatcher: Dispatcher) -> Result<Self, PricingError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(dispatcher.config().worker_count())
            .thread_name(|index| format!("pricer-sweep-{index}"))
            .build()
            .map_err(|e| PricingError::ComputationFailed(e.to_string()))?;
        Ok(Self { dispatcher, pool })
    }

    /// Returns the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Prices `model` at every `(x, y)` grid point.
    pub fn sweep(
        &self,
        model: ModelTag,
        base: &ModelParameters,
        x: &AxisSpec,
        y: &AxisSpec,
    ) -> PriceSurface {
        let x_values = x.values();
        let y_values = y.values();
        let cols = y_values.len();
        let total = x_values.len() * cols;
        info!(%model, x = %x.name, y = %y.name, cells = total, "sweep started");

        let cells = match axis_error(model, x, y) {
            Some(err) => {
                debug!(%model, error = %err, "sweep axes rejected");
                vec![Err(err); total]
            }
            None => self.pool.install(|| {
                (0..total)
                    .into_par_iter()
                    .map(|index| {
                        let (i, j) = (index / cols, index % cols);
                        self.price_cell(model, base, x, x_values[i], y, y_values[j])
                    })
                    .collect()
            }),
        };

        let surface = PriceSurface {
            model,
            x_name: x.name.clone(),
            y_name: y.name.clone(),
            x_values,
            y_values,
            cells,
        };
        if surface.cells.iter().any(|cell| matches!(cell, Err(PricingError::Cancelled))) {
            warn!(%model, "sweep cancelled");
        }
        info!(%model, cells = total, failures = surface.failures(), "sweep finished");
        surface
    }

    fn price_cell(
        &self,
        model: ModelTag,
        base: &ModelParameters,
        x: &AxisSpec,
        x_value: f64,
        y: &AxisSpec,
        y_value: f64,
    ) -> Result<PriceResult, PricingError> {
        if self.dispatcher.cancellation().is_some_and(|token| token.is_cancelled()) {
            return Err(PricingError::Cancelled);
        }
        let mut params = base.clone();
        params.insert(x.name.as_str(), x_value);
        params.insert(y.name.as_str(), y_value);

        let outcome = self.dispatcher.price(model, &params);
        if let Err(err) = &outcome {
            debug!(%model, x = x_value, y = y_value, error = %err, "cell failed");
        }
        outcome
    }
}

/// Reason every cell fails when the axes themselves are unusable.
fn axis_error(model: ModelTag, x: &AxisSpec, y: &AxisSpec) -> Option<PricingError> {
    if x.name == y.name {
        return Some(PricingError::invalid(
            y.name.as_str(),
            f64::NAN,
            "sweep axes must name different parameters",
        ));
    }
    [x, y].into_iter().find(|axis| !model.accepts(&axis.name)).map(|axis| {
        PricingError::invalid(
            axis.name.as_str(),
            f64::NAN,
            format!("not a parameter of {model}"),
        )
    })
}
