use interphase_core::{
    ConfigError, EvaluationError, OrderedPhasePair, VectorField, field::scale,
};
use ndarray::Zip;

use crate::Coefficients;

use super::{WallLubricationModel, wall_slip_sqr};

/// Antal's wall lubrication force, `max(Cw1 / d + Cw2 / y, 0) ρ_c |U_slip|² n`.
///
/// The force vanishes beyond `y = −Cw2 d / Cw1` from the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antal {
    pub cw1: f64,
    pub cw2: f64,
}

impl Antal {
    pub(crate) fn from_coefficients(
        name: &str,
        coefficients: &Coefficients,
    ) -> Result<Self, ConfigError> {
        coefficients.only(name, &["cw1", "cw2"])?;
        Ok(Self {
            cw1: coefficients.require(name, "cw1")?,
            cw2: coefficients.require(name, "cw2")?,
        })
    }
}

impl WallLubricationModel for Antal {
    fn fi(&self, pair: &OrderedPhasePair<'_>) -> Result<VectorField, EvaluationError> {
        let d = pair.diameter()?;
        let rho = pair.continuous().density();
        let mesh = pair.mesh();

        let magnitude = Zip::from(mesh.wall_distance())
            .and(&wall_slip_sqr(pair))
            .map_collect(|&y, &slip| (self.cw1 / d + self.cw2 / y).max(0.0) * rho * slip);

        Ok(scale(mesh.wall_normal(), &magnitude))
    }
}
