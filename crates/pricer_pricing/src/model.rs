//! Model tags and their declared parameter sets.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

const TERMS: [&str; 4] = ["S", "K", "T", "r"];

/// Pricing model selector.
///
/// Parsing is case-insensitive and treats `-` and spaces as `_`, so
/// `"Black-Scholes"`, `"black_scholes"` and `"bs"` all select
/// [`ModelTag::BlackScholes`].
///
/// # Examples
///
/// ```
/// use pricer_pricing::ModelTag;
///
/// let tag: ModelTag = "VG".parse().unwrap();
/// assert_eq!(tag, ModelTag::VarianceGamma);
/// assert_eq!(tag.to_string(), "variance_gamma");
/// assert!(tag.required_parameters().contains(&"nu"));
/// assert!("garch".parse::<ModelTag>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelTag {
    /// Black-Scholes closed form
    BlackScholes,
    /// Cox-Ross-Rubinstein binomial tree
    Binomial,
    /// Hagan SABR implied volatility fed into Black-Scholes
    Sabr,
    /// Heston stochastic volatility (Monte Carlo)
    Heston,
    /// Merton jump-diffusion (Monte Carlo)
    Merton,
    /// Variance Gamma (Monte Carlo)
    VarianceGamma,
    /// Dupire local volatility (Monte Carlo)
    Dupire,
}

impl ModelTag {
    /// Every tag, in listing order.
    pub const ALL: [ModelTag; 7] = [
        ModelTag::BlackScholes,
        ModelTag::Binomial,
        ModelTag::Sabr,
        ModelTag::Heston,
        ModelTag::Merton,
        ModelTag::VarianceGamma,
        ModelTag::Dupire,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            ModelTag::BlackScholes => "black_scholes",
            ModelTag::Binomial => "binomial",
            ModelTag::Sabr => "sabr",
            ModelTag::Heston => "heston",
            ModelTag::Merton => "merton",
            ModelTag::VarianceGamma => "variance_gamma",
            ModelTag::Dupire => "dupire",
        }
    }

    /// Alternative names accepted by [`FromStr`].
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ModelTag::BlackScholes => &["bs"],
            ModelTag::Binomial => &["crr"],
            ModelTag::VarianceGamma => &["vg"],
            ModelTag::Dupire => &["local_vol"],
            ModelTag::Sabr | ModelTag::Heston | ModelTag::Merton => &[],
        }
    }

    /// Parameters that must be present and defined.
    pub fn required_parameters(self) -> &'static [&'static str] {
        const BLACK_SCHOLES: [&str; 5] = ["S", "K", "T", "r", "sigma"];
        const BINOMIAL: [&str; 6] = ["S", "K", "T", "r", "sigma", "steps"];
        const SABR: [&str; 8] = ["S", "K", "T", "r", "alpha", "beta", "rho", "nu"];
        const HESTON: [&str; 10] = ["S", "K", "T", "r", "kappa", "theta", "xi", "rho", "v0", "mu"];
        const MERTON: [&str; 8] = ["S", "K", "T", "r", "sigma", "lambda_j", "mu_j", "sigma_j"];
        const VARIANCE_GAMMA: [&str; 7] = ["S", "K", "T", "r", "sigma", "theta", "nu"];

        match self {
            ModelTag::BlackScholes => &BLACK_SCHOLES,
            ModelTag::Binomial => &BINOMIAL,
            ModelTag::Sabr => &SABR,
            ModelTag::Heston => &HESTON,
            ModelTag::Merton => &MERTON,
            ModelTag::VarianceGamma => &VARIANCE_GAMMA,
            ModelTag::Dupire => &TERMS,
        }
    }

    /// Parameters that may be supplied; engine defaults apply otherwise.
    pub fn optional_parameters(self) -> &'static [&'static str] {
        match self {
            ModelTag::BlackScholes | ModelTag::Binomial | ModelTag::Sabr => &[],
            ModelTag::Heston => &["num_simulations", "num_steps", "seed"],
            ModelTag::Merton | ModelTag::VarianceGamma => &["num_simulations", "seed"],
            ModelTag::Dupire => &["sigma", "num_simulations", "num_steps", "seed"],
        }
    }

    /// Returns true when `name` is a required or optional parameter.
    pub fn accepts(self, name: &str) -> bool {
        self.required_parameters().contains(&name) || self.optional_parameters().contains(&name)
    }

    /// Returns true for the Monte Carlo models.
    pub fn is_monte_carlo(self) -> bool {
        matches!(
            self,
            ModelTag::Heston | ModelTag::Merton | ModelTag::VarianceGamma | ModelTag::Dupire
        )
    }
}

impl fmt::Display for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelTag {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace(['-', ' '], "_");
        ModelTag::ALL
            .into_iter()
            .find(|tag| tag.name() == normalised || tag.aliases().contains(&normalised.as_str()))
            .ok_or_else(|| PricingError::UnknownModel(s.to_string()))
    }
}
