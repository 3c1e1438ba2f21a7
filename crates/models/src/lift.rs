//! Lift closure models.
//!
//! ```text
//! Fi = Cl ρ_c (Ur × (∇ × U_c))
//! F  = α_d Fi
//! Ff = interpolate(α_d) (interpolate(Fi) · Sf)
//! ```

mod constant;
mod tomiyama;

use std::fmt;

use interphase_core::{
    ConfigError, EvaluationError, OrderedPhasePair, ScalarField, VectorField,
    field::{cross, scale},
};

use crate::{Coefficients, ExplicitForce, ModelKind};

pub use constant::ConstantLift;
pub use tomiyama::TomiyamaLift;

/// A lift coefficient for one phase dispersed in another.
pub trait LiftModel: fmt::Debug {
    /// Lift coefficient `Cl`, per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model needs.
    fn cl(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError>;
}

fn fi(model: &dyn LiftModel, pair: &OrderedPhasePair<'_>) -> Result<VectorField, EvaluationError> {
    let vorticity = pair.mesh().curl(pair.continuous().velocity());
    let cl_rho = model.cl(pair)? * pair.continuous().density();
    Ok(scale(&cross(&pair.ur(), &vorticity), &cl_rho))
}

impl ExplicitForce for dyn LiftModel {
    fn f(&self, pair: &OrderedPhasePair<'_>) -> Result<VectorField, EvaluationError> {
        Ok(scale(&fi(self, pair)?, pair.dispersed().alpha()))
    }

    fn ff(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let mesh = pair.mesh();
        Ok(mesh.interpolate(pair.dispersed().alpha()) * mesh.face_flux(&fi(self, pair)?))
    }
}

impl ModelKind for dyn LiftModel {
    const KIND: &'static str = "lift";
    const AVAILABLE: &'static [&'static str] = &["constantCoefficient", "Tomiyama"];

    fn select(name: &str, coefficients: &Coefficients) -> Result<Box<Self>, ConfigError> {
        Ok(match name {
            "constantCoefficient" => Box::new(ConstantLift::from_coefficients(name, coefficients)?),
            "Tomiyama" => Box::new(TomiyamaLift::from_coefficients(name, coefficients)?),
            _ => {
                return Err(ConfigError::UnknownModel {
                    kind: Self::KIND,
                    name: name.to_owned(),
                    available: Self::AVAILABLE,
                });
            }
        })
    }
}
