use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField};
use ndarray::Zip;

use crate::{Coefficients, coefficients::positive};

use super::{DragModel, schiller_naumann::DEFAULT_RESIDUAL_RE, sphere_cd_re};

/// Wen-Yu drag for dense particle suspensions.
///
/// The single-sphere correlation is evaluated at `α_c Re` and corrected by
/// `α_c^-3.65`, where `α_c` is bounded below by the continuous phase's
/// residual fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WenYu {
    pub residual_re: f64,
}

impl WenYu {
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

impl DragModel for WenYu {
    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let re = pair.re()?;
        let residual = pair.continuous().residual_alpha();

        Ok(Zip::from(&re)
            .and(pair.dispersed().alpha())
            .and(pair.continuous().alpha())
            .map_collect(|&re, &alpha_d, &alpha_c| {
                let alpha = (1.0 - alpha_d).max(residual);
                sphere_cd_re(alpha * re, self.residual_re)
                    * alpha.powf(-3.65)
                    * alpha_c.max(residual)
            }))
    }
}
