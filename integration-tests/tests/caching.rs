//! Derived fields are computed once per time step.

use std::{error::Error, ptr};

use integration_tests::{air_water, rising_bubbles, system};
use interphase_system::PhasePairKey;

const MODELS: &str = r#"
[[pairs]]
pair = "air and water"
surface_tension = 0.07

[blending.default]
type = "none"
continuous_phase = "water"

[[drag]]
pair = "air in water"
type = "TomiyamaCorrelated"

[[lift]]
pair = "air in water"
type = "constantCoefficient"
cl = 0.25

[[turbulent_dispersion]]
pair = "air in water"
type = "constantCoefficient"
ctd = 1.0
"#;

#[test]
fn repeated_queries_return_the_same_field() -> Result<(), Box<dyn Error>> {
    let mut system = system(&air_water(true, MODELS))?;
    rising_bubbles(system.new_time_step())?;
    let key: PhasePairKey = "water in air".parse()?;

    assert!(ptr::eq(system.drag_coefficient(&key)?, system.drag_coefficient(&key)?));
    assert!(ptr::eq(
        system.phase_face_drag_coefficient("water")?,
        system.phase_face_drag_coefficient("water")?,
    ));
    assert!(ptr::eq(system.combined_force(&key)?, system.combined_force(&key)?));
    assert!(ptr::eq(system.combined_forces()?, system.combined_forces()?));
    assert!(ptr::eq(
        system.combined_face_forces()?,
        system.combined_face_forces()?,
    ));
    assert!(ptr::eq(
        system.turbulent_diffusivity(&key)?,
        system.turbulent_diffusivity(&key)?,
    ));
    Ok(())
}

#[test]
fn a_new_time_step_sees_new_fields() -> Result<(), Box<dyn Error>> {
    let mut system = system(&air_water(true, MODELS))?;
    let key: PhasePairKey = "air and water".parse()?;

    // At rest there is no lift.
    let before = system.combined_force(&key)?.clone();
    assert!(before.iter().all(|&f| f == 0.0));

    rising_bubbles(system.new_time_step())?;
    let after = system.combined_force(&key)?;
    assert!(after.iter().any(|&f| f != 0.0));
    Ok(())
}

#[test]
fn rereading_an_unchanged_configuration_keeps_the_cache() -> Result<(), Box<dyn Error>> {
    let config = air_water(true, MODELS);
    let mut system = system(&config)?;
    rising_bubbles(system.new_time_step())?;
    let key: PhasePairKey = "air and water".parse()?;

    let cached = system.drag_coefficient(&key)?.as_ptr();
    assert!(!system.read_toml_str(&config)?);
    assert_eq!(system.drag_coefficient(&key)?.as_ptr(), cached);

    let stronger = config.replace("cl = 0.25", "cl = 0.5");
    assert!(system.read_toml_str(&stronger)?);
    let lift = system.combined_force(&key)?;
    assert!(lift.iter().any(|&f| f != 0.0));
    Ok(())
}
