//! Shared fixtures for the momentum transfer integration tests.

use interphase_core::{EvaluationError, PhaseSet, Turbulence, field};
use interphase_system::{Error, LineMesh, MomentumTransferSystem};
use ndarray::Array2;

pub const N_CELLS: usize = 8;

pub const AIR: &str = r#"
[[phases]]
name = "air"
density = 1.2
viscosity = 1.8e-5
diameter = 3e-3
residual_alpha = 1e-6
"#;

pub const WATER: &str = r#"
[[phases]]
name = "water"
density = 998.0
viscosity = 1e-3
diameter = 1e-3
"#;

/// Builds a system over a unit channel of [`N_CELLS`] cells.
///
/// # Errors
///
/// Returns an [`Error`] if `config` is rejected.
pub fn system(config: &str) -> Result<MomentumTransferSystem<LineMesh>, Error> {
    let mesh = LineMesh::new(N_CELLS, 1.0, 0.01)?;
    MomentumTransferSystem::from_toml_str(mesh, config)
}

/// Air and water phase definitions, followed by `rest`.
pub fn air_water(air_first: bool, rest: &str) -> String {
    if air_first {
        format!("{AIR}{WATER}{rest}")
    } else {
        format!("{WATER}{AIR}{rest}")
    }
}

/// Bubbles rising through a sheared water column.
///
/// The air fraction grows from 0.05 at `x = 0` to 0.35 at `x = 1`. Air
/// rises at 0.3 m/s and water moves at `0.2 x` m/s, both vertically.
///
/// # Errors
///
/// Returns an [`EvaluationError`] if `air` or `water` is missing.
pub fn rising_bubbles(phases: &mut PhaseSet) -> Result<(), EvaluationError> {
    let n = phases.n_cells();
    let x = (0..n).map(|i| (i as f64 + 0.5) / n as f64);
    let alpha_air: ndarray::Array1<f64> = x.clone().map(|x| 0.05 + 0.3 * x).collect();
    let turbulence = || Turbulence {
        k: field::uniform(n, 0.01),
        nut: field::uniform(n, 1e-4),
    };

    let air = phases.get_mut("air")?;
    air.set_alpha(alpha_air.clone())?;
    air.set_velocity(field::uniform_vector(n, [0.0, 0.3, 0.0]))?;
    air.set_turbulence(turbulence())?;

    let shear: Vec<f64> = x.collect();
    let water = phases.get_mut("water")?;
    water.set_alpha(alpha_air.mapv(|a| 1.0 - a))?;
    water.set_velocity(Array2::from_shape_fn((n, 3), |(i, j)| {
        if j == 1 { 0.2 * shear[i] } else { 0.0 }
    }))?;
    water.set_turbulence(turbulence())?;

    Ok(())
}
