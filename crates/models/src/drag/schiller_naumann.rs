use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField};

use crate::{Coefficients, coefficients::positive};

use super::{DragModel, sphere_cd_re};

/// The default lower bound on Reynolds number in the Newton regime.
pub const DEFAULT_RESIDUAL_RE: f64 = 1e-3;

/// Schiller-Naumann drag on an isolated sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchillerNaumann {
    pub residual_re: f64,
}

impl Default for SchillerNaumann {
    fn default() -> Self {
        Self {
            residual_re: DEFAULT_RESIDUAL_RE,
        }
    }
}

impl SchillerNaumann {
    pub(crate) fn from_coefficients(
        name: &str,
        coefficients: &Coefficients,
    ) -> Result<Self, ConfigError> {
        coefficients.only(name, &["residual_re"])?;
        let residual_re = coefficients.get_or(name, "residual_re", DEFAULT_RESIDUAL_RE)?;
        Ok(Self {
            residual_re: positive(name, "residual_re", residual_re)?,
        })
    }
}

impl DragModel for SchillerNaumann {
    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        Ok(pair.re()?.mapv_into(|re| sphere_cd_re(re, self.residual_re)))
    }
}
