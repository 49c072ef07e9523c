//! Named model inputs.

use std::collections::BTreeMap;

/// Mapping from parameter name (`S`, `K`, `sigma`, `num_simulations`, ...)
/// to its value.
///
/// Counts and seeds are carried as `f64` and checked for integrality when a
/// model is resolved. Keys are kept sorted so listings are stable.
///
/// # Examples
///
/// ```
/// use pricer_pricing::ModelParameters;
///
/// let params = ModelParameters::new()
///     .with("S", 100.0)
///     .with("K", 95.0)
///     .with("sigma", 0.25);
///
/// assert_eq!(params.get("K"), Some(95.0));
/// assert_eq!(params.get("r"), None);
/// assert_eq!(params.keys().collect::<Vec<_>>(), ["K", "S", "sigma"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModelParameters {
    values: BTreeMap<String, f64>,
}

impl ModelParameters {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Removes a value.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Value stored under `name`, NaN included.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value stored under `name` unless absent or NaN.
    pub fn defined(&self, name: &str) -> Option<f64> {
        self.get(name).filter(|value| !value.is_nan())
    }

    /// Returns true when `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Parameter names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `(name, value)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ModelParameters {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, f64)> for ModelParameters {
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.values.insert(name.into(), value);
        }
    }
}
