//! Recombining lattice models.
//!
//! - [`BinomialTree`]: Cox-Ross-Rubinstein tree with backward induction

pub mod binomial;
pub mod error;

pub use binomial::{BinomialTree, MAX_STEPS};
pub use error::LatticeError;
