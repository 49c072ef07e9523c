//! Cox-Ross-Rubinstein binomial tree for European options.
//!
//! ```text
//! dt = T / steps,  u = e^(σ√dt),  d = 1/u
//! q  = (e^(r·dt) - d) / (u - d)
//! ```
//!
//! Terminal payoffs sit on `steps + 1` nodes with `S_i = S·u^(steps-i)·d^i`;
//! backward induction overwrites the payoff vectors in place until node 0
//! holds the price. The error against Black-Scholes is typically `O(1/steps)`.

use pricer_core::types::PriceResult;

use super::error::LatticeError;
use crate::terms::{require_positive, OptionTerms};

/// Maximum number of time steps allowed in a tree.
pub const MAX_STEPS: usize = 100_000;

/// Binomial recombining tree.
///
/// # Examples
/// ```
/// use pricer_models::lattice::BinomialTree;
/// use pricer_models::terms::OptionTerms;
///
/// let terms = OptionTerms::new(100.0, 100.0, 1.0, 0.05).unwrap();
/// let tree = BinomialTree::new(terms, 0.2, 200).unwrap();
/// let result = tree.price().unwrap();
/// assert!((result.call() - 10.45).abs() < 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialTree {
    terms: OptionTerms,
    volatility: f64,
    steps: usize,
}

impl BinomialTree {
    /// Creates a tree with `steps` time steps.
    ///
    /// # Errors
    /// - `LatticeError::Parameter` if `volatility <= 0`
    /// - `LatticeError::InvalidSteps` if `steps` is outside `[1, MAX_STEPS]`
    pub fn new(terms: OptionTerms, volatility: f64, steps: usize) -> Result<Self, LatticeError> {
        require_positive("sigma", volatility)?;
        if steps == 0 || steps > MAX_STEPS {
            return Err(LatticeError::InvalidSteps { steps });
        }
        Ok(Self {
            terms,
            volatility,
            steps,
        })
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time step `T / steps`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.terms.expiry() / self.steps as f64
    }

    /// Up factor `u = e^(σ√dt)`.
    #[inline]
    pub fn up(&self) -> f64 {
        (self.volatility * self.dt().sqrt()).exp()
    }

    /// Risk-neutral up-probability `q`.
    pub fn probability(&self) -> f64 {
        let u = self.up();
        let d = 1.0 / u;
        ((self.terms.rate() * self.dt()).exp() - d) / (u - d)
    }

    /// Prices the call/put pair by backward induction.
    ///
    /// # Errors
    /// `LatticeError::ArbitrageProbability` when `q` falls outside `[0, 1]`,
    /// which happens when `r·√dt > σ`.
    pub fn price(&self) -> Result<PriceResult, LatticeError> {
        let q = self.probability();
        if !(0.0..=1.0).contains(&q) {
            return Err(LatticeError::ArbitrageProbability { probability: q });
        }

        let n = self.steps;
        let log_u = self.volatility * self.dt().sqrt();
        let disc = (-self.terms.rate() * self.dt()).exp();
        let disc_q = disc * q;
        let disc_1mq = disc * (1.0 - q);

        let mut calls = Vec::with_capacity(n + 1);
        let mut puts = Vec::with_capacity(n + 1);
        for i in 0..=n {
            // u^(n-i)·d^i = e^((n-2i)·ln u)
            let stock = self.terms.spot() * (log_u * (n as f64 - 2.0 * i as f64)).exp();
            calls.push(self.terms.call_payoff(stock));
            puts.push(self.terms.put_payoff(stock));
        }

        for step in (0..n).rev() {
            for i in 0..=step {
                calls[i] = disc_q * calls[i] + disc_1mq * calls[i + 1];
                puts[i] = disc_q * puts[i] + disc_1mq * puts[i + 1];
            }
        }

        Ok(PriceResult::new(calls[0], puts[0]))
    }
}
