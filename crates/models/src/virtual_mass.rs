//! Virtual mass closure models.
//!
//! ```text
//! Ki = Cvm ρ_c
//! K  = α_d Ki
//! Kf = interpolate(α_d) interpolate(Ki)
//! ```

use std::fmt;

use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField, field};

use crate::{Coefficients, ImplicitCoefficient, ModelKind, coefficients::invalid};

/// A virtual mass coefficient for one phase dispersed in another.
pub trait VirtualMassModel: fmt::Debug {
    /// Virtual mass coefficient `Cvm`, per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model needs.
    fn cvm(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError>;
}

fn ki(
    model: &dyn VirtualMassModel,
    pair: &OrderedPhasePair<'_>,
) -> Result<ScalarField, EvaluationError> {
    Ok(model.cvm(pair)? * pair.continuous().density())
}

impl ImplicitCoefficient for dyn VirtualMassModel {
    fn k(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        Ok(pair.dispersed().alpha() * &ki(self, pair)?)
    }

    fn kf(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let mesh = pair.mesh();
        Ok(mesh.interpolate(pair.dispersed().alpha()) * mesh.interpolate(&ki(self, pair)?))
    }
}

impl ModelKind for dyn VirtualMassModel {
    const KIND: &'static str = "virtual mass";
    const AVAILABLE: &'static [&'static str] = &["constantCoefficient"];

    fn select(name: &str, coefficients: &Coefficients) -> Result<Box<Self>, ConfigError> {
        match name {
            "constantCoefficient" => Ok(Box::new(ConstantVirtualMass::from_coefficients(
                name,
                coefficients,
            )?)),
            _ => Err(ConfigError::UnknownModel {
                kind: Self::KIND,
                name: name.to_owned(),
                available: Self::AVAILABLE,
            }),
        }
    }
}

/// A constant virtual mass coefficient, 0.5 for spheres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantVirtualMass {
    pub cvm: f64,
}

impl ConstantVirtualMass {
    fn from_coefficients(name: &str, coefficients: &Coefficients) -> Result<Self, ConfigError> {
        coefficients.only(name, &["cvm"])?;
        let cvm = coefficients.require(name, "cvm")?;
        if cvm < 0.0 {
            return Err(invalid(name, "cvm", "must not be negative"));
        }
        Ok(Self { cvm })
    }
}

impl VirtualMassModel for ConstantVirtualMass {
    fn cvm(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        Ok(field::uniform(pair.dispersed().alpha().len(), self.cvm))
    }
}
