//! Blending of the two directional models of a pair.

use std::error::Error;

use approx::assert_relative_eq;
use integration_tests::{air_water, rising_bubbles, system};
use interphase_models::Location;
use interphase_system::{LineMesh, MomentumTransferSystem, PhasePairKey};

const LINEAR: &str = r#"
[blending.default]
type = "linear"

[blending.default.phases.air]
min_fully_continuous_alpha = 0.7
min_partly_continuous_alpha = 0.3

[blending.default.phases.water]
min_fully_continuous_alpha = 0.7
min_partly_continuous_alpha = 0.3
"#;

const HYPERBOLIC: &str = r#"
[blending.default]
type = "hyperbolic"
transition_alpha_scale = 0.05

[blending.default.phases.air]
max_dispersed_alpha = 0.25

[blending.default.phases.water]
max_dispersed_alpha = 0.5
"#;

const NONE: &str = r#"
[blending.default]
type = "none"
continuous_phase = "water"
"#;

const BUBBLES: &str = r#"
[[drag]]
pair = "air in water"
type = "SchillerNaumann"
"#;

const DROPLETS: &str = r#"
[[drag]]
pair = "water in air"
type = "WenYu"
"#;

fn bubbly(blending: &str, models: &[&str]) -> Result<MomentumTransferSystem<LineMesh>, Box<dyn Error>> {
    let mut system = system(&air_water(true, &format!("{blending}{}", models.concat())))?;
    rising_bubbles(system.new_time_step())?;
    Ok(system)
}

fn pair_key() -> Result<PhasePairKey, Box<dyn Error>> {
    Ok("air and water".parse()?)
}

#[test]
fn a_single_model_is_never_weighted() -> Result<(), Box<dyn Error>> {
    let key = pair_key()?;
    let unblended = bubbly(NONE, &[BUBBLES])?;

    for blending in [LINEAR, HYPERBOLIC] {
        let system = bubbly(blending, &[BUBBLES])?;
        assert_eq!(
            system.drag_coefficient(&key)?,
            unblended.drag_coefficient(&key)?
        );
        assert_eq!(
            system.face_drag_coefficient(&key)?,
            unblended.face_drag_coefficient(&key)?
        );
    }
    Ok(())
}

#[test]
fn weights_are_fractions() -> Result<(), Box<dyn Error>> {
    let key = pair_key()?;

    for blending in [LINEAR, HYPERBOLIC, NONE] {
        let system = bubbly(blending, &[BUBBLES, DROPLETS])?;
        let model = system.drag_models().get(&key).ok_or("missing drag model")?;
        let pair = system.pair(&key)?;

        for location in [Location::Cell, Location::Face] {
            let weights = model.weights(&pair, location)?;
            for (w12, w21) in weights.one_in_two().iter().zip(weights.two_in_one()) {
                assert!((0.0..=1.0).contains(w12), "{w12} out of range");
                assert!((0.0..=1.0).contains(w21), "{w21} out of range");
                assert!(w12 + w21 <= 1.0 + 1e-12);
            }
        }
    }
    Ok(())
}

#[test]
fn both_models_are_weighted_and_summed() -> Result<(), Box<dyn Error>> {
    let key = pair_key()?;
    let system = bubbly(LINEAR, &[BUBBLES, DROPLETS])?;
    let bubbles = bubbly(LINEAR, &[BUBBLES])?;
    let droplets = bubbly(LINEAR, &[DROPLETS])?;

    let weights = system
        .drag_models()
        .get(&key)
        .ok_or("missing drag model")?
        .weights(&system.pair(&key)?, Location::Cell)?;
    let expected = weights.one_in_two() * bubbles.drag_coefficient(&key)?
        + weights.two_in_one() * droplets.drag_coefficient(&key)?;

    for (k, expected) in system.drag_coefficient(&key)?.iter().zip(&expected) {
        assert_relative_eq!(*k, *expected, max_relative = 1e-12);
    }

    // Water is fully continuous in the first cell, so only bubbles count there.
    assert_relative_eq!(weights.one_in_two()[0], 1.0);
    assert_relative_eq!(weights.two_in_one()[0], 0.0);
    Ok(())
}

#[test]
fn no_blending_follows_the_continuous_phase() -> Result<(), Box<dyn Error>> {
    let key = pair_key()?;
    let system = bubbly(NONE, &[BUBBLES, DROPLETS])?;
    let bubbles = bubbly(NONE, &[BUBBLES])?;

    assert_eq!(
        system.drag_coefficient(&key)?,
        bubbles.drag_coefficient(&key)?
    );
    Ok(())
}
