use std::collections::BTreeMap;

use interphase_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Named numeric parameters of a closure model or blending method.
///
/// The map is opaque to configuration loading. Each model reads the names it
/// understands when it is selected, and rejects missing or non-finite values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficients(BTreeMap<String, f64>);

impl Coefficients {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns these coefficients with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a coefficient that `model` cannot do without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCoefficient`] if `name` is absent, or
    /// [`ConfigError::InvalidCoefficient`] if its value is not finite.
    pub fn require(&self, model: &str, name: &str) -> Result<f64, ConfigError> {
        match self.get(name) {
            Some(value) => finite(model, name, value),
            None => Err(ConfigError::MissingCoefficient {
                model: model.to_owned(),
                coefficient: name.to_owned(),
            }),
        }
    }

    /// Reads an optional coefficient, falling back to `default`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCoefficient`] if a value is present but not finite.
    pub fn get_or(&self, model: &str, name: &str, default: f64) -> Result<f64, ConfigError> {
        self.get(name)
            .map_or(Ok(default), |value| finite(model, name, value))
    }
}

impl Coefficients {
    /// Rejects any coefficient `model` does not read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCoefficient`] naming the first unknown coefficient.
    pub fn only(&self, model: &str, known: &[&str]) -> Result<(), ConfigError> {
        match self.names().find(|name| !known.contains(name)) {
            Some(name) => Err(invalid(model, name, "is not recognized")),
            None => Ok(()),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Coefficients {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn finite(model: &str, name: &str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(model, name, "must be finite"))
    }
}

/// Builds an [`ConfigError::InvalidCoefficient`] for `model`.
pub(crate) fn invalid(model: &str, name: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidCoefficient {
        model: model.to_owned(),
        coefficient: name.to_owned(),
        reason,
    }
}

/// Checks that a coefficient is strictly positive.
pub(crate) fn positive(model: &str, name: &str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(model, name, "must be positive"))
    }
}
