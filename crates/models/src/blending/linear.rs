use std::collections::HashMap;

use interphase_core::{ConfigError, EvaluationError, Phase, PhaseSet, ScalarField};

use super::{BlendingConfig, BlendingMethod, phase_alpha};

const FULLY: &str = "min_fully_continuous_alpha";
const PARTLY: &str = "min_partly_continuous_alpha";

/// Ramps the weight linearly with the continuous-phase fraction.
///
/// The weight is zero below the continuous phase's
/// `min_partly_continuous_alpha` and one above its `min_fully_continuous_alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    thresholds: HashMap<String, Thresholds>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Thresholds {
    fully: f64,
    partly: f64,
}

impl Linear {
    pub(super) fn from_config(
        config: &BlendingConfig,
        phases: &PhaseSet,
    ) -> Result<Self, ConfigError> {
        let thresholds = phases
            .names()
            .map(|phase| {
                let fully = phase_alpha(config, phase, FULLY)?;
                let partly = phase_alpha(config, phase, PARTLY)?;
                if partly > fully {
                    return Err(crate::coefficients::invalid(
                        &config.method,
                        &format!("phases.{phase}.{PARTLY}"),
                        "must not exceed min_fully_continuous_alpha",
                    ));
                }
                Ok((phase.to_owned(), Thresholds { fully, partly }))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { thresholds })
    }
}

impl BlendingMethod for Linear {
    fn weight(
        &self,
        _dispersed: &Phase,
        continuous: &Phase,
    ) -> Result<ScalarField, EvaluationError> {
        let Thresholds { fully, partly } = *self
            .thresholds
            .get(continuous.name())
            .ok_or_else(|| EvaluationError::UnknownPhase(continuous.name().to_owned()))?;

        let width = fully - partly;
        Ok(continuous.alpha().mapv(|alpha| {
            if width > 0.0 {
                ((alpha - partly) / width).clamp(0.0, 1.0)
            } else if alpha >= fully {
                1.0
            } else {
                0.0
            }
        }))
    }
}
