//! Wall lubrication closure models.
//!
//! A model supplies the force `Fi` per unit dispersed volume fraction, which
//! points along the wall normal and depends on the slip velocity parallel to
//! the wall. Then `F = α_d Fi` and `Ff = interpolate(α_d) (interpolate(Fi) · Sf)`.

mod antal;
mod tomiyama;

use std::fmt;

use interphase_core::{
    ConfigError, EvaluationError, OrderedPhasePair, ScalarField, VectorField,
    field::{dot, mag_sqr, scale},
};

use crate::{Coefficients, ExplicitForce, ModelKind};

pub use antal::Antal;
pub use tomiyama::TomiyamaWallLubrication;

/// A wall lubrication force for one phase dispersed in another.
pub trait WallLubricationModel: fmt::Debug {
    /// Force per unit dispersed volume fraction, per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model needs.
    fn fi(&self, pair: &OrderedPhasePair<'_>) -> Result<VectorField, EvaluationError>;
}

impl ExplicitForce for dyn WallLubricationModel {
    fn f(&self, pair: &OrderedPhasePair<'_>) -> Result<VectorField, EvaluationError> {
        Ok(scale(&self.fi(pair)?, pair.dispersed().alpha()))
    }

    fn ff(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let mesh = pair.mesh();
        Ok(mesh.interpolate(pair.dispersed().alpha()) * mesh.face_flux(&self.fi(pair)?))
    }
}

impl ModelKind for dyn WallLubricationModel {
    const KIND: &'static str = "wall lubrication";
    const AVAILABLE: &'static [&'static str] = &["Antal", "Tomiyama"];

    fn select(name: &str, coefficients: &Coefficients) -> Result<Box<Self>, ConfigError> {
        Ok(match name {
            "Antal" => Box::new(Antal::from_coefficients(name, coefficients)?),
            "Tomiyama" => Box::new(TomiyamaWallLubrication::from_coefficients(
                name,
                coefficients,
            )?),
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

/// Squared slip velocity parallel to the nearest wall, `|Ur − (Ur · n) n|²`.
fn wall_slip_sqr(pair: &OrderedPhasePair<'_>) -> ScalarField {
    let ur = pair.ur();
    let normal = pair.mesh().wall_normal();
    let tangential = &ur - &scale(normal, &dot(&ur, normal));
    mag_sqr(&tangential)
}
