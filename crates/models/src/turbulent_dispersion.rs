//! Turbulent dispersion closure models.
//!
//! A model supplies the diffusivity `D` of the dispersed phase fraction due
//! to turbulence in the continuous phase. The resulting force on phase 1 of a
//! pair is `−D ∇α1`.

use std::fmt;

use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField};

use crate::{Coefficients, ModelKind};

/// A turbulent dispersion diffusivity for one phase dispersed in another.
pub trait TurbulentDispersionModel: fmt::Debug {
    /// Turbulent diffusivity `D`, per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model
    /// needs, such as the continuous phase's turbulence fields.
    fn d(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError>;
}

impl ModelKind for dyn TurbulentDispersionModel {
    const KIND: &'static str = "turbulent dispersion";
    const AVAILABLE: &'static [&'static str] = &["constantCoefficient", "LopezDeBertodano"];

    fn select(name: &str, coefficients: &Coefficients) -> Result<Box<Self>, ConfigError> {
        let build: fn(f64) -> Box<Self> = match name {
            "constantCoefficient" => |ctd| Box::new(ConstantTurbulentDispersion { ctd }),
            "LopezDeBertodano" => |ctd| Box::new(LopezDeBertodano { ctd }),
            _ => {
                return Err(ConfigError::UnknownModel {
                    kind: Self::KIND,
                    name: name.to_owned(),
                    available: Self::AVAILABLE,
                });
            }
        };

        coefficients.only(name, &["ctd"])?;
        Ok(build(coefficients.require(name, "ctd")?))
    }
}

/// `D = Ctd α_d ρ_c k_c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTurbulentDispersion {
    pub ctd: f64,
}

impl TurbulentDispersionModel for ConstantTurbulentDispersion {
    fn d(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let continuous = pair.continuous();
        let k = &continuous.turbulence()?.k;
        Ok(pair.dispersed().alpha() * k * (self.ctd * continuous.density()))
    }
}

/// Lopez de Bertodano's model, `D = Ctd ρ_c k_c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LopezDeBertodano {
    pub ctd: f64,
}

impl TurbulentDispersionModel for LopezDeBertodano {
    fn d(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let continuous = pair.continuous();
        Ok(&continuous.turbulence()?.k * (self.ctd * continuous.density()))
    }
}
