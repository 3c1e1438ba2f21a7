//! A three-phase system where only some pairs interact.

use std::error::Error;

use approx::assert_relative_eq;
use integration_tests::{AIR, WATER, rising_bubbles, system};
use interphase_core::field;
use interphase_system::{LineMesh, MomentumTransferSystem, PhasePairKey};

const OIL_AND_MODELS: &str = r#"
[[phases]]
name = "oil"
density = 850.0
viscosity = 0.03
diameter = 2e-3
alpha = 0.1

[blending.default]
type = "none"
continuous_phase = "water"

[[drag]]
pair = "air in water"
type = "SchillerNaumann"

[[drag]]
pair = "oil in water"
type = "SchillerNaumann"

[[virtual_mass]]
pair = "air in water"
type = "constantCoefficient"
cvm = 0.5
"#;

fn three_phase() -> Result<MomentumTransferSystem<LineMesh>, Box<dyn Error>> {
    let mut system = system(&format!("{AIR}{WATER}{OIL_AND_MODELS}"))?;
    let phases = system.new_time_step();
    rising_bubbles(phases)?;
    let n = phases.n_cells();
    phases
        .get_mut("oil")?
        .set_velocity(field::uniform_vector(n, [0.0, -0.05, 0.0]))?;
    Ok(system)
}

fn key(s: &str) -> Result<PhasePairKey, Box<dyn Error>> {
    Ok(s.parse()?)
}

#[test]
fn every_pair_is_known_even_without_models() -> Result<(), Box<dyn Error>> {
    let system = three_phase()?;

    assert_eq!(
        system.pairs(),
        [key("air and water")?, key("air and oil")?, key("oil and water")?]
    );
    let k = system.drag_coefficient(&key("oil in air")?)?;
    assert!(k.iter().all(|&k| k == 0.0));
    assert!(!system.drag_models().contains(&key("air and oil")?));
    Ok(())
}

#[test]
fn phase_coefficients_sum_over_pairs() -> Result<(), Box<dyn Error>> {
    let system = three_phase()?;
    let air_water = system.drag_coefficient(&key("air and water")?)?;
    let oil_water = system.drag_coefficient(&key("oil and water")?)?;

    assert_eq!(system.phase_drag_coefficient("air")?, air_water);
    assert_eq!(system.phase_drag_coefficient("oil")?, oil_water);
    let water = system.phase_drag_coefficient("water")?;
    for ((total, a), o) in water.iter().zip(air_water).zip(oil_water) {
        assert_relative_eq!(*total, a + o);
    }

    assert_eq!(
        system.phase_virtual_mass_coefficient("water")?,
        system.virtual_mass_coefficient(&key("air and water")?)?
    );
    assert!(
        system
            .phase_virtual_mass_coefficient("oil")?
            .iter()
            .all(|&vm| vm == 0.0)
    );
    Ok(())
}

#[test]
fn matrices_couple_only_interacting_phases() -> Result<(), Box<dyn Error>> {
    let system = three_phase()?;
    let transfer = system.momentum_transfer()?;

    let partners = |phase: &str| -> Result<Vec<String>, Box<dyn Error>> {
        let matrix = transfer.get(phase).ok_or("missing matrix")?;
        Ok(matrix.partners().map(str::to_owned).collect())
    };
    assert_eq!(partners("air")?, ["water"]);
    assert_eq!(partners("oil")?, ["water"]);
    assert_eq!(partners("water")?, ["air", "oil"]);

    let water = transfer.get("water").ok_or("missing matrix")?;
    let oil = water.coupling("oil").ok_or("missing coupling")?;
    assert_eq!(&oil.drag, system.drag_coefficient(&key("oil and water")?)?);
    assert!(oil.virtual_mass.iter().all(|&vm| vm == 0.0));
    assert!(transfer.get("air").ok_or("missing matrix")?.coupling("oil").is_none());
    Ok(())
}

#[test]
fn drag_never_enters_the_source() -> Result<(), Box<dyn Error>> {
    let system = three_phase()?;

    // Phases slip past each other but nothing accelerates.
    for (_, matrix) in system.momentum_transfer()?.present() {
        assert!(matrix.source().iter().all(|&s| s == 0.0));
    }
    Ok(())
}

#[test]
fn evaluate_applies_implicit_terms() -> Result<(), Box<dyn Error>> {
    let system = three_phase()?;
    let transfer = system.momentum_transfer()?;
    let water = system.phases().get("water")?;
    let matrix = transfer.get("water").ok_or("missing matrix")?;

    let momentum = matrix.evaluate(water.velocity(), water.acceleration())?;
    let kd = system.phase_drag_coefficient("water")?;
    for (i, row) in momentum.outer_iter().enumerate() {
        assert_relative_eq!(row[1], -kd[i] * water.velocity()[[i, 1]]);
        assert_relative_eq!(row[0], 0.0);
    }
    Ok(())
}

#[test]
fn tables_list_registered_pairs_in_order() -> Result<(), Box<dyn Error>> {
    let system = three_phase()?;

    let drag = system.drag_coefficients()?;
    let keys: Vec<_> = drag.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(keys, ["air and water", "oil and water"]);
    assert_eq!(drag[1].1, system.drag_coefficient(&key("water and oil")?)?);

    let faces = system.face_virtual_mass_coefficients()?;
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].1.len(), integration_tests::N_CELLS - 1);
    Ok(())
}
