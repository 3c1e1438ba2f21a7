use std::fmt;

use crate::{
    error::EvaluationError,
    field::{ScalarField, VectorField, mag, max_with},
    mesh::Mesh,
    phase::Phase,
};

use super::PhasePairKey;

/// A pair with one phase dispersed in the other.
///
/// Derived quantities are computed from the current phase state on every call.
#[derive(Clone, Copy)]
pub struct OrderedPhasePair<'a> {
    pub(super) dispersed: &'a Phase,
    pub(super) continuous: &'a Phase,
    pub(super) mesh: &'a dyn Mesh,
    pub(super) gravity: [f64; 3],
    pub(super) surface_tension: Option<f64>,
}

impl<'a> OrderedPhasePair<'a> {
    #[must_use]
    pub fn dispersed(&self) -> &'a Phase {
        self.dispersed
    }

    #[must_use]
    pub fn continuous(&self) -> &'a Phase {
        self.continuous
    }

    #[must_use]
    pub fn mesh(&self) -> &'a dyn Mesh {
        self.mesh
    }

    /// Returns the `dispersed in continuous` key.
    #[must_use]
    pub fn key(&self) -> PhasePairKey {
        PhasePairKey::ordered_from_distinct(
            self.dispersed.name().to_owned(),
            self.continuous.name().to_owned(),
        )
    }

    /// Dispersed phase diameter in m.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingDiameter`] if the dispersed phase has none.
    pub fn diameter(&self) -> Result<f64, EvaluationError> {
        self.dispersed.diameter()
    }

    /// Dispersed volume fraction bounded below by its residual value.
    #[must_use]
    pub fn bounded_dispersed_alpha(&self) -> ScalarField {
        max_with(self.dispersed.alpha(), self.dispersed.residual_alpha())
    }

    /// Relative velocity `Ur = U_d − U_c`.
    #[must_use]
    pub fn ur(&self) -> VectorField {
        self.dispersed.velocity() - self.continuous.velocity()
    }

    #[must_use]
    pub fn mag_ur(&self) -> ScalarField {
        mag(&self.ur())
    }

    /// Reynolds number `|Ur| d / ν_c`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingDiameter`] if the dispersed phase has no diameter.
    pub fn re(&self) -> Result<ScalarField, EvaluationError> {
        let d = self.diameter()?;
        let nu = self.continuous.kinematic_viscosity();
        Ok(self.mag_ur() * (d / nu))
    }

    /// Eötvös number `|g| |ρ_c − ρ_d| d² / σ`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispersed phase has no diameter or the pair
    /// has no surface tension.
    pub fn eo(&self) -> Result<f64, EvaluationError> {
        let d = self.diameter()?;
        self.eo_for(d)
    }

    /// Eötvös number based on the hydraulic diameter
    /// `d_H = d (1 + 0.163 Eo^0.757)^(1/3)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispersed phase has no diameter or the pair
    /// has no surface tension.
    pub fn eo_h(&self) -> Result<f64, EvaluationError> {
        let d = self.diameter()?;
        let d_h = d * (1.0 + 0.163 * self.eo_for(d)?.powf(0.757)).cbrt();
        self.eo_for(d_h)
    }

    fn eo_for(&self, d: f64) -> Result<f64, EvaluationError> {
        let sigma = self
            .surface_tension
            .ok_or_else(|| EvaluationError::MissingSurfaceTension(self.key().unordered().to_string()))?;

        let [gx, gy, gz] = self.gravity;
        let mag_g = (gx * gx + gy * gy + gz * gz).sqrt();
        let delta_rho = (self.continuous.density() - self.dispersed.density()).abs();

        Ok(mag_g * delta_rho * d * d / sigma)
    }
}

impl fmt::Debug for OrderedPhasePair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedPhasePair")
            .field("dispersed", &self.dispersed.name())
            .field("continuous", &self.continuous.name())
            .field("gravity", &self.gravity)
            .field("surface_tension", &self.surface_tension)
            .finish_non_exhaustive()
    }
}
