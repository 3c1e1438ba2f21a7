use std::collections::{HashMap, HashSet};

use interphase_core::{ConfigError, PhasePairKey, PhaseSet};

use crate::{config::Config, registry::Registries};

/// Everything derived from a configuration besides the phases themselves.
pub(super) struct Setup {
    pub(super) gravity: [f64; 3],
    pub(super) surface_tension: HashMap<PhasePairKey, f64>,
    pub(super) registries: Registries,
}

/// Creates the phases of `config`, with initial volume fractions applied.
pub(super) fn phase_set(config: &Config, n_cells: usize) -> Result<PhaseSet, ConfigError> {
    if config.phases.is_empty() {
        return Err(ConfigError::NoPhases);
    }

    let mut phases = PhaseSet::new(n_cells);
    for entry in &config.phases {
        let index = phases.insert(entry.name.clone(), entry.properties)?;
        let Some(phase) = phases.by_index_mut(index) else {
            return Err(ConfigError::UnknownPhase(entry.name.clone()));
        };

        let name = phase.name().to_owned();
        positive(&name, "density", phase.density())?;
        positive(&name, "viscosity", phase.viscosity())?;
        if let Ok(diameter) = phase.diameter() {
            positive(&name, "diameter", diameter)?;
        }
        if !(0.0..1.0).contains(&phase.residual_alpha()) {
            return Err(invalid(&name, "residual_alpha", "must be within [0, 1)"));
        }

        if let Some(alpha) = entry.alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(invalid(&name, "alpha", "must be within [0, 1]"));
            }
            phase.set_uniform_alpha(alpha);
        }
    }

    Ok(phases)
}

/// Returns every unordered pair of `phases`, in definition order.
pub(super) fn all_pairs(phases: &PhaseSet) -> Result<Vec<PhasePairKey>, ConfigError> {
    let names: Vec<_> = phases.names().collect();
    let mut pairs = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            pairs.push(PhasePairKey::new(*a, *b)?);
        }
    }
    Ok(pairs)
}

/// Selects models and validates pair settings against `phases`.
pub(super) fn setup(config: &Config, phases: &PhaseSet) -> Result<Setup, ConfigError> {
    if !config.gravity.iter().all(|g| g.is_finite()) {
        return Err(invalid("system", "gravity", "must be finite"));
    }

    let registries = Registries::build(config, phases)?;

    let mut seen = HashSet::new();
    let mut surface_tension = HashMap::new();
    for entry in &config.pairs {
        let key = entry.pair.parse::<PhasePairKey>()?.unordered();
        for phase in [key.first(), key.second()] {
            if !phases.contains(phase) {
                return Err(ConfigError::UnknownPhase(phase.to_owned()));
            }
        }
        if !seen.insert(key.clone()) {
            return Err(ConfigError::DuplicatePair(key.to_string()));
        }

        if let Some(sigma) = entry.surface_tension {
            positive(&key.to_string(), "surface_tension", sigma)?;
            surface_tension.insert(key.clone(), sigma);
        }

        if let Some(kind) = entry
            .require
            .iter()
            .find(|kind| !registries.contains(**kind, &key))
        {
            return Err(ConfigError::MissingModel {
                kind: kind.label(),
                pair: key.to_string(),
            });
        }
    }

    Ok(Setup {
        gravity: config.gravity,
        surface_tension,
        registries,
    })
}

fn invalid(model: &str, coefficient: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidCoefficient {
        model: model.to_owned(),
        coefficient: coefficient.to_owned(),
        reason,
    }
}

fn positive(model: &str, coefficient: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(model, coefficient, "must be positive and finite"))
    }
}
