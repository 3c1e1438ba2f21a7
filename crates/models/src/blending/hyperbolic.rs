use std::collections::HashMap;

use interphase_core::{ConfigError, EvaluationError, Phase, PhaseSet, ScalarField};

use crate::coefficients::positive;

use super::{BlendingConfig, BlendingMethod, phase_alpha};

/// Follows `(1 + tanh(4 (α_c − α_max) / s)) / 2`, where `α_max` is the
/// continuous phase's `max_dispersed_alpha` and `s` the `transition_alpha_scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperbolic {
    transition_alpha_scale: f64,
    max_dispersed_alpha: HashMap<String, f64>,
}

impl Hyperbolic {
    pub(super) fn from_config(
        config: &BlendingConfig,
        phases: &PhaseSet,
    ) -> Result<Self, ConfigError> {
        let scale = config
            .transition_alpha_scale
            .ok_or_else(|| ConfigError::MissingCoefficient {
                model: config.method.clone(),
                coefficient: "transition_alpha_scale".into(),
            })?;
        let transition_alpha_scale = positive(&config.method, "transition_alpha_scale", scale)?;

        let max_dispersed_alpha = phases
            .names()
            .map(|phase| Ok((phase.to_owned(), phase_alpha(config, phase, "max_dispersed_alpha")?)))
            .collect::<Result<_, ConfigError>>()?;

        Ok(Self {
            transition_alpha_scale,
            max_dispersed_alpha,
        })
    }
}

impl BlendingMethod for Hyperbolic {
    fn weight(
        &self,
        _dispersed: &Phase,
        continuous: &Phase,
    ) -> Result<ScalarField, EvaluationError> {
        let max_dispersed = *self
            .max_dispersed_alpha
            .get(continuous.name())
            .ok_or_else(|| EvaluationError::UnknownPhase(continuous.name().to_owned()))?;

        let slope = 4.0 / self.transition_alpha_scale;
        Ok(continuous
            .alpha()
            .mapv(|alpha| 0.5 * (1.0 + (slope * (alpha - max_dispersed)).tanh())))
    }
}
