use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField, field};

use crate::Coefficients;

use super::LiftModel;

/// A constant lift coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantLift {
    pub cl: f64,
}

impl ConstantLift {
    pub(crate) fn from_coefficients(
        name: &str,
        coefficients: &Coefficients,
    ) -> Result<Self, ConfigError> {
        coefficients.only(name, &["cl"])?;
        Ok(Self {
            cl: coefficients.require(name, "cl")?,
        })
    }
}

impl LiftModel for ConstantLift {
    fn cl(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        Ok(field::uniform(pair.dispersed().alpha().len(), self.cl))
    }
}
