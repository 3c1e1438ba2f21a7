mod key;
mod ordered;

use std::fmt;

pub use key::PhasePairKey;
pub use ordered::OrderedPhasePair;

use crate::{
    error::EvaluationError,
    field::{ScalarField, mag},
    mesh::Mesh,
    phase::{Phase, PhaseSet},
};

/// Two distinct phases bound together with the mesh they live on.
///
/// `phase1` is whichever phase was defined first in the [`PhaseSet`], so the
/// orientation of a pair never depends on how its key was spelled.
#[derive(Clone, Copy)]
pub struct PhasePair<'a> {
    phase1: &'a Phase,
    phase2: &'a Phase,
    mesh: &'a dyn Mesh,
    gravity: [f64; 3],
    surface_tension: Option<f64>,
}

impl<'a> PhasePair<'a> {
    /// Binds the phases named by `key`, ignoring any ordering it carries.
    ///
    /// Gravity defaults to zero and surface tension to none.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPhase`] if either phase is not in `phases`.
    pub fn new(
        phases: &'a PhaseSet,
        key: &PhasePairKey,
        mesh: &'a dyn Mesh,
    ) -> Result<Self, EvaluationError> {
        let a = phases.get(key.first())?;
        let b = phases.get(key.second())?;
        let (phase1, phase2) = if a.index() < b.index() { (a, b) } else { (b, a) };

        Ok(Self {
            phase1,
            phase2,
            mesh,
            gravity: [0.0; 3],
            surface_tension: None,
        })
    }

    #[must_use]
    pub fn with_gravity(self, gravity: [f64; 3]) -> Self {
        Self { gravity, ..self }
    }

    #[must_use]
    pub fn with_surface_tension(self, surface_tension: Option<f64>) -> Self {
        Self {
            surface_tension,
            ..self
        }
    }

    /// Returns the unordered key of this pair.
    #[must_use]
    pub fn key(&self) -> PhasePairKey {
        PhasePairKey::from_distinct(self.phase1.name().to_owned(), self.phase2.name().to_owned())
    }

    #[must_use]
    pub fn phase1(&self) -> &'a Phase {
        self.phase1
    }

    #[must_use]
    pub fn phase2(&self) -> &'a Phase {
        self.phase2
    }

    #[must_use]
    pub fn mesh(&self) -> &'a dyn Mesh {
        self.mesh
    }

    /// Volume-fraction-weighted density `α1 ρ1 + α2 ρ2`.
    #[must_use]
    pub fn mixture_density(&self) -> ScalarField {
        self.phase1.alpha() * self.phase1.density() + self.phase2.alpha() * self.phase2.density()
    }

    /// Magnitude of the relative velocity, `|U1 − U2|`.
    #[must_use]
    pub fn mag_ur(&self) -> ScalarField {
        mag(&(self.phase1.velocity() - self.phase2.velocity()))
    }

    /// Phase 1 dispersed in phase 2.
    #[must_use]
    pub fn one_in_two(&self) -> OrderedPhasePair<'a> {
        self.ordered(self.phase1, self.phase2)
    }

    /// Phase 2 dispersed in phase 1.
    #[must_use]
    pub fn two_in_one(&self) -> OrderedPhasePair<'a> {
        self.ordered(self.phase2, self.phase1)
    }

    fn ordered(&self, dispersed: &'a Phase, continuous: &'a Phase) -> OrderedPhasePair<'a> {
        OrderedPhasePair {
            dispersed,
            continuous,
            mesh: self.mesh,
            gravity: self.gravity,
            surface_tension: self.surface_tension,
        }
    }
}

impl fmt::Debug for PhasePair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhasePair")
            .field("phase1", &self.phase1.name())
            .field("phase2", &self.phase2.name())
            .field("gravity", &self.gravity)
            .field("surface_tension", &self.surface_tension)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::error::Error;

    use approx::assert_relative_eq;
    use ndarray::array;
    use uom::si::{
        dynamic_viscosity::pascal_second,
        f64::{DynamicViscosity, Length, MassDensity},
        length::millimeter,
        mass_density::kilogram_per_cubic_meter,
    };

    use crate::{mesh::LineMesh, phase::PhaseProperties};

    fn air_water() -> Result<PhaseSet, Box<dyn Error>> {
        let mut phases = PhaseSet::new(2);
        phases.insert(
            "water",
            PhaseProperties::new(
                MassDensity::new::<kilogram_per_cubic_meter>(1000.0),
                DynamicViscosity::new::<pascal_second>(1e-3),
            ),
        )?;
        phases.insert(
            "air",
            PhaseProperties::new(
                MassDensity::new::<kilogram_per_cubic_meter>(1.0),
                DynamicViscosity::new::<pascal_second>(1.8e-5),
            )
            .with_diameter(Length::new::<millimeter>(2.0)),
        )?;

        let air = phases.get_mut("air")?;
        air.set_alpha(array![0.2, 0.4])?;
        air.set_velocity(array![[0.0, 0.1, 0.0], [0.0, 0.2, 0.0]])?;
        phases.get_mut("water")?.set_alpha(array![0.8, 0.6])?;

        Ok(phases)
    }

    #[test]
    fn orientation_follows_definition_order() -> Result<(), Box<dyn Error>> {
        let phases = air_water()?;
        let mesh = LineMesh::new(2, 1.0, 1.0)?;

        for spelling in ["air and water", "water and air", "air in water", "water in air"] {
            let pair = PhasePair::new(&phases, &spelling.parse::<PhasePairKey>()?, &mesh)?;
            assert_eq!(pair.phase1().name(), "water");
            assert_eq!(pair.phase2().name(), "air");
            assert_eq!(pair.key(), PhasePairKey::new("air", "water")?);
        }

        Ok(())
    }

    #[test]
    fn derived_quantities() -> Result<(), Box<dyn Error>> {
        let phases = air_water()?;
        let mesh = LineMesh::new(2, 1.0, 1.0)?;
        let pair = PhasePair::new(&phases, &PhasePairKey::new("air", "water")?, &mesh)?
            .with_gravity([0.0, -9.81, 0.0])
            .with_surface_tension(Some(0.07));

        let mixture = pair.mixture_density();
        assert_relative_eq!(mixture[0], 0.8 * 1000.0 + 0.2);
        assert_relative_eq!(pair.mag_ur()[1], 0.2);

        let bubbles = pair.two_in_one();
        assert_eq!(bubbles.dispersed().name(), "air");
        assert_eq!(bubbles.key(), PhasePairKey::ordered("air", "water")?);
        assert_eq!(bubbles.ur()[[0, 1]], 0.1);

        // Re = |Ur| d / ν_water
        let re = bubbles.re()?;
        assert_relative_eq!(re[0], 0.1 * 2e-3 / 1e-6, max_relative = 1e-12);

        let eo = bubbles.eo()?;
        assert_relative_eq!(eo, 9.81 * 999.0 * 4e-6 / 0.07, max_relative = 1e-12);

        let d_h = 2e-3 * (1.0 + 0.163 * eo.powf(0.757)).cbrt();
        assert_relative_eq!(bubbles.eo_h()?, 9.81 * 999.0 * d_h * d_h / 0.07, max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn missing_inputs_are_reported() -> Result<(), Box<dyn Error>> {
        let phases = air_water()?;
        let mesh = LineMesh::new(2, 1.0, 1.0)?;
        let pair = PhasePair::new(&phases, &PhasePairKey::new("air", "water")?, &mesh)?;

        assert_eq!(
            pair.one_in_two().re().err(),
            Some(EvaluationError::MissingDiameter("water".into()))
        );
        assert_eq!(
            pair.two_in_one().eo(),
            Err(EvaluationError::MissingSurfaceTension("air and water".into()))
        );

        let unknown = PhasePairKey::new("air", "oil")?;
        assert_eq!(
            PhasePair::new(&phases, &unknown, &mesh).err(),
            Some(EvaluationError::UnknownPhase("oil".into()))
        );

        Ok(())
    }

    #[test]
    fn bounded_alpha_respects_residual() -> Result<(), Box<dyn Error>> {
        let mut phases = air_water()?;
        phases.get_mut("air")?.set_alpha(array![0.0, 0.5])?;
        let mesh = LineMesh::new(2, 1.0, 1.0)?;
        let pair = PhasePair::new(&phases, &PhasePairKey::new("air", "water")?, &mesh)?;

        let alpha = pair.two_in_one().bounded_dispersed_alpha();
        assert_eq!(alpha, array![1e-6, 0.5]);

        Ok(())
    }
}
