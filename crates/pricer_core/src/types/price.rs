//! Call/put price pair.

/// Immutable `(call_price, put_price)` pair produced by one model evaluation.
///
/// Analytic and tree models always produce non-negative prices. Monte Carlo
/// estimates may carry small negative noise; the engine does not clip them.
///
/// # Examples
/// ```
/// use pricer_core::types::PriceResult;
///
/// let result = PriceResult::new(10.45, 5.57);
/// let (call, put) = result.into();
/// assert_eq!((call, put), (10.45, 5.57));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceResult {
    call: f64,
    put: f64,
}

impl PriceResult {
    /// Creates a new price pair.
    #[inline]
    pub fn new(call: f64, put: f64) -> Self {
        Self { call, put }
    }

    /// Returns the call price.
    #[inline]
    pub fn call(&self) -> f64 {
        self.call
    }

    /// Returns the put price.
    #[inline]
    pub fn put(&self) -> f64 {
        self.put
    }

    /// Returns true when both prices are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.call.is_finite() && self.put.is_finite()
    }
}

impl From<PriceResult> for (f64, f64) {
    fn from(result: PriceResult) -> Self {
        (result.call, result.put)
    }
}
