//! Shared fixtures for closure model tests.

use interphase_core::{
    LineMesh, PhasePair, PhasePairKey, PhaseProperties, PhaseSet, Turbulence, field,
};
use ndarray::{Array1, Array2};
use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, Length, MassDensity},
    length::millimeter,
    mass_density::kilogram_per_cubic_meter,
};

pub(crate) const SURFACE_TENSION: f64 = 0.07;
pub(crate) const GRAVITY: [f64; 3] = [0.0, -9.81, 0.0];

/// Air bubbles rising through water in a four-cell channel of unit length.
///
/// - air: 3 mm bubbles, fractions `0.1, 0.2, 0.3, 0.4`, velocity `(0, 0.2, 0)`
/// - water: 1 mm droplets, velocity `(0, 0.1 x, 0)`, `k = 0.01`
pub(crate) struct Bubbly {
    pub(crate) mesh: LineMesh,
    pub(crate) phases: PhaseSet,
}

impl Bubbly {
    pub(crate) fn new() -> Self {
        let mesh = LineMesh::new(4, 1.0, 0.01).unwrap();
        let mut phases = PhaseSet::new(4);

        let props = |rho, mu, d| {
            PhaseProperties::new(
                MassDensity::new::<kilogram_per_cubic_meter>(rho),
                DynamicViscosity::new::<pascal_second>(mu),
            )
            .with_diameter(Length::new::<millimeter>(d))
        };
        phases.insert("air", props(1.0, 1.8e-5, 3.0)).unwrap();
        phases.insert("water", props(1000.0, 1e-3, 1.0)).unwrap();

        let alpha_air = Array1::from(vec![0.1, 0.2, 0.3, 0.4]);
        let alpha_water = alpha_air.mapv(|a| 1.0 - a);
        let x = mesh.cell_centres();

        let air = phases.get_mut("air").unwrap();
        air.set_alpha(alpha_air).unwrap();
        air.set_velocity(field::uniform_vector(4, [0.0, 0.2, 0.0]))
            .unwrap();

        let water = phases.get_mut("water").unwrap();
        water.set_alpha(alpha_water).unwrap();
        water
            .set_velocity(Array2::from_shape_fn((4, 3), |(i, j)| {
                if j == 1 { 0.1 * x[i] } else { 0.0 }
            }))
            .unwrap();
        water
            .set_turbulence(Turbulence {
                k: field::uniform(4, 0.01),
                nut: field::uniform(4, 1e-4),
            })
            .unwrap();

        Self { mesh, phases }
    }

    /// Phase 1 is air and phase 2 is water.
    pub(crate) fn pair(&self) -> PhasePair<'_> {
        let key = PhasePairKey::new("air", "water").unwrap();
        PhasePair::new(&self.phases, &key, &self.mesh)
            .unwrap()
            .with_gravity(GRAVITY)
            .with_surface_tension(Some(SURFACE_TENSION))
    }
}
