use std::{error::Error as StdError, ptr};

use approx::assert_relative_eq;
use interphase_core::LineMesh;
use ndarray::Array1;

use super::*;
use crate::Kind;

type TestResult = Result<(), Box<dyn StdError>>;

const BUBBLY: &str = r#"
[[phases]]
name = "air"
density = 1.0
viscosity = 1.8e-5
diameter = 3e-3
alpha = 0.25

[[phases]]
name = "water"
density = 1000.0
viscosity = 1e-3
alpha = 0.75

[[pairs]]
pair = "air and water"
surface_tension = 0.07

[blending.default]
type = "none"
continuous_phase = "water"

[[drag]]
pair = "air in water"
type = "SchillerNaumann"

[[virtual_mass]]
pair = "air in water"
type = "constantCoefficient"
cvm = 0.5
"#;

fn mesh() -> Result<LineMesh, Box<dyn StdError>> {
    Ok(LineMesh::new(4, 1.0, 0.01)?)
}

fn bubbly() -> Result<MomentumTransferSystem<LineMesh>, Box<dyn StdError>> {
    Ok(MomentumTransferSystem::from_toml_str(mesh()?, BUBBLY)?)
}

fn key(s: &str) -> Result<PhasePairKey, ConfigError> {
    s.parse()
}

#[test]
fn builds_phases_and_pairs() -> TestResult {
    let system = bubbly()?;

    assert_eq!(system.phases().names().collect::<Vec<_>>(), ["air", "water"]);
    assert_eq!(system.pairs(), [key("air and water")?]);
    assert_eq!(system.phases().get("air")?.alpha(), &Array1::from_elem(4, 0.25));
    assert_eq!(system.drag_models().len(), 1);
    assert!(system.lift_models().is_empty());
    Ok(())
}

#[test]
fn stokes_drag_at_rest() -> TestResult {
    let system = bubbly()?;

    // Re = 0, so Cd Re = 24 and K = alpha 0.75 24 mu / d^2.
    let k = system.drag_coefficient(&key("air and water")?)?;
    for value in k {
        assert_relative_eq!(*value, 0.25 * 0.75 * 24.0 * 1e-3 / 9e-6, max_relative = 1e-12);
    }

    let vm = system.virtual_mass_coefficient(&key("air in water")?)?;
    for value in vm {
        assert_relative_eq!(*value, 0.25 * 0.5 * 1000.0);
    }
    Ok(())
}

#[test]
fn queries_are_cached_for_every_spelling() -> TestResult {
    let system = bubbly()?;

    let first = system.drag_coefficient(&key("air and water")?)?;
    for spelling in ["water and air", "air in water", "water in air"] {
        assert!(ptr::eq(first, system.drag_coefficient(&key(spelling)?)?));
    }
    assert!(ptr::eq(
        system.phase_drag_coefficient("air")?,
        system.phase_drag_coefficient("air")?,
    ));
    Ok(())
}

#[test]
fn new_time_step_recomputes() -> TestResult {
    let mut system = bubbly()?;
    let before = system.drag_coefficient(&key("air and water")?)?[0];

    system.new_time_step().get_mut("air")?.set_uniform_alpha(0.5);

    let after = system.drag_coefficient(&key("air and water")?)?[0];
    assert_relative_eq!(after, 2.0 * before);
    Ok(())
}

#[test]
fn phase_sums_match_the_single_pair() -> TestResult {
    let system = bubbly()?;
    let pair = key("air and water")?;

    for phase in ["air", "water"] {
        assert_eq!(system.phase_drag_coefficient(phase)?, system.drag_coefficient(&pair)?);
        assert_eq!(
            system.phase_face_virtual_mass_coefficient(phase)?,
            system.face_virtual_mass_coefficient(&pair)?,
        );
    }
    assert_eq!(system.phase_face_drag_coefficient("air")?.len(), 3);
    Ok(())
}

#[test]
fn pairs_without_models_contribute_nothing() -> TestResult {
    let system = bubbly()?;
    let pair = key("air and water")?;

    assert!(system.combined_force(&pair)?.iter().all(|&f| f == 0.0));
    assert!(system.combined_face_force(&pair)?.iter().all(|&f| f == 0.0));
    assert!(system.turbulent_diffusivity(&pair)?.iter().all(|&d| d == 0.0));
    assert_eq!(system.combined_forces()?.present().count(), 0);
    Ok(())
}

#[test]
fn unknown_pairs_and_phases() -> TestResult {
    let system = bubbly()?;

    assert_eq!(
        system.drag_coefficient(&key("air and oil")?),
        Err(EvaluationError::UnknownPair("air and oil".into()))
    );
    assert_eq!(
        system.phase_drag_coefficient("oil"),
        Err(EvaluationError::UnknownPhase("oil".into()))
    );
    Ok(())
}

#[test]
fn momentum_transfer_of_two_phases() -> TestResult {
    let system = bubbly()?;
    let transfer = system.momentum_transfer()?;

    let k = 0.25 * 0.75 * 24.0 * 1e-3 / 9e-6;
    for (phase, partner) in [("air", "water"), ("water", "air")] {
        let matrix = transfer.get(phase).ok_or("missing matrix")?;
        assert_eq!(matrix.phase(), phase);
        assert_eq!(matrix.partners().collect::<Vec<_>>(), [partner]);
        for value in matrix.implicit_drag() {
            assert_relative_eq!(*value, k, max_relative = 1e-12);
        }
        for value in matrix.implicit_virtual_mass() {
            assert_relative_eq!(*value, 125.0);
        }
        // Phases are at rest and unaccelerated.
        assert!(matrix.source().iter().all(|&s| s == 0.0));
    }
    Ok(())
}

#[test]
fn dispersion_fluxes_need_one_field_per_phase() -> TestResult {
    let system = bubbly()?;

    assert_eq!(
        system
            .turbulent_dispersion_fluxes(&[Array1::zeros(4)])
            .unwrap_err(),
        EvaluationError::PhaseCount {
            expected: 2,
            found: 1
        }
    );
    assert_eq!(
        system
            .face_turbulent_dispersion_fluxes(&[Array1::zeros(3), Array1::zeros(4)])
            .unwrap_err(),
        EvaluationError::ShapeMismatch {
            field: "rAUf",
            expected: 3,
            found: 4
        }
    );
    Ok(())
}

#[test]
fn rejects_invalid_configurations() -> TestResult {
    let config = Config::from_toml_str(BUBBLY)?;
    let build = |config: Config| MomentumTransferSystem::new(mesh().ok()?, config).err();

    assert_eq!(
        build(Config {
            phases: Vec::new(),
            ..config.clone()
        }),
        Some(ConfigError::NoPhases)
    );

    let mut alpha = config.clone();
    alpha.phases[0].alpha = Some(1.5);
    assert!(matches!(
        build(alpha),
        Some(ConfigError::InvalidCoefficient { ref model, .. }) if model == "air"
    ));

    let mut duplicate = config.clone();
    duplicate.pairs.push(duplicate.pairs[0].clone());
    assert_eq!(
        build(duplicate),
        Some(ConfigError::DuplicatePair("air and water".into()))
    );

    let mut required = config.clone();
    required.pairs[0].require = vec![Kind::Drag, Kind::Lift];
    assert_eq!(
        build(required),
        Some(ConfigError::MissingModel {
            kind: "lift",
            pair: "air and water".into(),
        })
    );

    let mut sigma = config;
    sigma.pairs[0].surface_tension = Some(0.0);
    assert!(matches!(
        build(sigma),
        Some(ConfigError::InvalidCoefficient { ref coefficient, .. }) if coefficient == "surface_tension"
    ));
    Ok(())
}

#[test]
fn read_replaces_models_and_keeps_fields() -> TestResult {
    let mut system = bubbly()?;
    system.new_time_step().get_mut("air")?.set_uniform_alpha(0.5);
    let pair = key("air and water")?;
    let vm = system.virtual_mass_coefficient(&pair)?[0];

    assert!(!system.read_toml_str(BUBBLY)?);
    assert_relative_eq!(system.virtual_mass_coefficient(&pair)?[0], vm);

    assert!(system.read_toml_str(&BUBBLY.replace("cvm = 0.5", "cvm = 0.25"))?);
    assert_relative_eq!(system.virtual_mass_coefficient(&pair)?[0], vm / 2.0);
    assert_relative_eq!(system.phases().get("air")?.alpha()[0], 0.5);
    Ok(())
}

#[test]
fn read_refuses_a_different_phase_set() -> TestResult {
    let mut system = bubbly()?;
    let mut config = system.config().clone();
    config.phases.swap(0, 1);

    assert_eq!(system.read(config), Err(ConfigError::PhaseSetChanged));
    assert_eq!(system.phases().names().next(), Some("air"));
    Ok(())
}

#[test]
fn read_reports_duplicate_phases() -> TestResult {
    let mut system = bubbly()?;
    let mut config = system.config().clone();
    config.phases.push(config.phases[0].clone());

    assert_eq!(system.read(config), Err(ConfigError::DuplicatePhase("air".into())));
    assert_eq!(system.phases().len(), 2);
    Ok(())
}
