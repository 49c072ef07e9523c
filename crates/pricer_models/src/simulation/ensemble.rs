//! Simulated path storage.

/// Spot (and optionally variance) trajectories of one simulation batch.
///
/// Values are stored row-major with one row per time index: the spot of
/// `path` at `step` lives at `step * n_paths + path`. Row 0 holds the
/// initial state and row `n_steps` the terminal state.
///
/// # Examples
///
/// ```rust
/// use pricer_models::simulation::PathEnsemble;
///
/// let mut ensemble = PathEnsemble::new(2, 1, 100.0, None);
/// ensemble.set_spot(1, 0, 101.0);
/// ensemble.set_spot(1, 1, 99.0);
///
/// assert_eq!(ensemble.terminal(), &[101.0, 99.0]);
/// assert_eq!(ensemble.spot(0, 1), Some(100.0));
/// assert_eq!(ensemble.variance(0, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    n_paths: usize,
    n_steps: usize,
    spots: Vec<f64>,
    variances: Option<Vec<f64>>,
}

impl PathEnsemble {
    /// Allocates an ensemble with every path starting at `spot0`.
    ///
    /// When `variance0` is given a variance matrix is allocated as well,
    /// starting at that value.
    pub fn new(n_paths: usize, n_steps: usize, spot0: f64, variance0: Option<f64>) -> Self {
        let len = (n_steps + 1) * n_paths;
        let mut spots = vec![0.0; len];
        spots[..n_paths].fill(spot0);
        let variances = variance0.map(|v0| {
            let mut variances = vec![0.0; len];
            variances[..n_paths].fill(v0);
            variances
        });
        Self {
            n_paths,
            n_steps,
            spots,
            variances,
        }
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps (rows minus one).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Terminal spots, one per path.
    pub fn terminal(&self) -> &[f64] {
        let start = self.n_steps * self.n_paths;
        &self.spots[start..start + self.n_paths]
    }

    /// Spot of `path` at `step`, or `None` when out of range.
    pub fn spot(&self, step: usize, path: usize) -> Option<f64> {
        self.index(step, path).map(|i| self.spots[i])
    }

    /// Variance of `path` at `step`; `None` for models without a variance
    /// process or out-of-range indices.
    pub fn variance(&self, step: usize, path: usize) -> Option<f64> {
        let i = self.index(step, path)?;
        self.variances.as_ref().map(|v| v[i])
    }

    /// Splits out the previous row (read) and `step` row (write) of both matrices.
    pub(crate) fn step_rows(&mut self, step: usize) -> StepRows<'_> {
        let n = self.n_paths;
        let (head, tail) = self.spots.split_at_mut(step * n);
        let prev_spots = &head[(step - 1) * n..];
        let next_spots = &mut tail[..n];
        let (prev_vars, next_vars) = match self.variances.as_mut() {
            Some(variances) => {
                let (vh, vt) = variances.split_at_mut(step * n);
                (Some(&vh[(step - 1) * n..]), Some(&mut vt[..n]))
            }
            None => (None, None),
        };
        StepRows {
            prev_spots,
            next_spots,
            prev_vars,
            next_vars,
        }
    }

    /// Sets the spot of `path` at `step`.
    ///
    /// # Panics
    /// Panics when `step > n_steps` or `path >= n_paths`.
    pub fn set_spot(&mut self, step: usize, path: usize, value: f64) {
        let i = step * self.n_paths + path;
        assert!(step <= self.n_steps && path < self.n_paths, "index out of range");
        self.spots[i] = value;
    }

    fn index(&self, step: usize, path: usize) -> Option<usize> {
        (step <= self.n_steps && path < self.n_paths).then(|| step * self.n_paths + path)
    }
}

/// Borrowed view of two consecutive time rows.
pub(crate) struct StepRows<'a> {
    pub prev_spots: &'a [f64],
    pub next_spots: &'a mut [f64],
    pub prev_vars: Option<&'a [f64]>,
    pub next_vars: Option<&'a mut [f64]>,
}
