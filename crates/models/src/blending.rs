//! Blending between the two directional models of a phase pair.
//!
//! A blending method maps the local volume fractions of a pair to the weight
//! of the model for one phase dispersed in the other. Three methods are
//! available, selected by name:
//!
//! - `none`: one fixed phase is always continuous
//! - `linear`: weight ramps linearly between two continuous-phase fractions
//! - `hyperbolic`: weight follows a `tanh` profile about a transition fraction

mod hyperbolic;
mod linear;
mod none;
mod weights;

use std::{collections::BTreeMap, fmt};

use interphase_core::{ConfigError, EvaluationError, Phase, PhasePairKey, PhaseSet, ScalarField};
use serde::{Deserialize, Serialize};

use crate::Coefficients;

pub use hyperbolic::Hyperbolic;
pub use linear::Linear;
pub use none::NoBlending;
pub use weights::BlendWeights;

/// Names accepted by [`select`].
pub const AVAILABLE: &[&str] = &["none", "linear", "hyperbolic"];

/// A function from local phase fractions to a directional model weight.
pub trait BlendingMethod: fmt::Debug {
    /// Returns the weight, per cell, of the model for `dispersed` in `continuous`.
    ///
    /// The result is not required to lie in `[0, 1]`; callers clip it.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPhase`] if either phase was not known
    /// when the method was selected.
    fn weight(&self, dispersed: &Phase, continuous: &Phase)
    -> Result<ScalarField, EvaluationError>;

    /// Checks that the method can blend the models of `pair`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the method would weigh both directions of
    /// `pair` to zero.
    fn check_pair(&self, _pair: &PhasePairKey) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Configuration of a blending method.
///
/// ```toml
/// type = "linear"
///
/// [phases.air]
/// min_fully_continuous_alpha = 0.7
/// min_partly_continuous_alpha = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlendingConfig {
    #[serde(rename = "type")]
    pub method: String,

    /// The phase treated as continuous by `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuous_phase: Option<String>,

    /// Width of the `hyperbolic` transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_alpha_scale: Option<f64>,

    /// Per-phase thresholds, keyed by phase name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub phases: BTreeMap<String, Coefficients>,
}

impl BlendingConfig {
    /// A configuration for the named method with no parameters.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            continuous_phase: None,
            transition_alpha_scale: None,
            phases: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_continuous_phase(self, phase: impl Into<String>) -> Self {
        Self {
            continuous_phase: Some(phase.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_transition_alpha_scale(self, scale: f64) -> Self {
        Self {
            transition_alpha_scale: Some(scale),
            ..self
        }
    }

    #[must_use]
    pub fn with_phase(mut self, phase: impl Into<String>, coefficients: Coefficients) -> Self {
        self.phases.insert(phase.into(), coefficients);
        self
    }
}

/// Selects and validates the blending method named in `config` for `phases`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the method is unknown, a phase is unknown, or
/// a required threshold is missing or out of range.
pub fn select(
    config: &BlendingConfig,
    phases: &PhaseSet,
) -> Result<Box<dyn BlendingMethod>, ConfigError> {
    if let Some(name) = config.phases.keys().find(|name| !phases.contains(name)) {
        return Err(ConfigError::UnknownPhase(name.clone()));
    }

    let method: Box<dyn BlendingMethod> = match config.method.as_str() {
        "none" => Box::new(NoBlending::from_config(config, phases)?),
        "linear" => Box::new(Linear::from_config(config, phases)?),
        "hyperbolic" => Box::new(Hyperbolic::from_config(config, phases)?),
        _ => {
            return Err(ConfigError::UnknownBlending {
                name: config.method.clone(),
                available: AVAILABLE,
            });
        }
    };

    log::debug!("selected `{}` blending", config.method);
    Ok(method)
}

/// Reads a per-phase threshold, which must lie in `[0, 1]`.
fn phase_alpha(
    config: &BlendingConfig,
    phase: &str,
    name: &str,
) -> Result<f64, ConfigError> {
    let coefficient = format!("phases.{phase}.{name}");
    let value = config
        .phases
        .get(phase)
        .and_then(|coefficients| coefficients.get(name))
        .ok_or_else(|| ConfigError::MissingCoefficient {
            model: config.method.clone(),
            coefficient: coefficient.clone(),
        })?;

    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(crate::coefficients::invalid(
            &config.method,
            &coefficient,
            "must be within [0, 1]",
        ))
    }
}
