//! Cooperative cancellation for long-running sweeps and simulations.
//!
//! A [`CancellationToken`] is cheap to clone; all clones observe the same
//! flag. Work loops poll [`CancellationToken::is_cancelled`] between cells
//! or path batches and stop with `PricingError::Cancelled`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag.
///
/// # Examples
/// ```
/// use pricer_core::types::CancellationToken;
///
/// let token = CancellationToken::new();
/// let worker_view = token.clone();
///
/// token.cancel();
/// assert!(worker_view.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the non-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns true once any clone has requested cancellation.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_not_cancelled() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn test_cancel_visible_across_clones_and_threads() {
        let token = CancellationToken::new();
        let other = token.clone();

        std::thread::spawn(move || other.cancel())
            .join()
            .unwrap();

        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let token = CancellationToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
