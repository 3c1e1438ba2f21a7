use interphase_core::{
    ConfigError, EvaluationError, Phase, PhasePairKey, PhaseSet, ScalarField, field,
};

use super::{BlendingConfig, BlendingMethod};

/// Gives full weight to models whose continuous phase is a fixed phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoBlending {
    continuous_phase: String,
}

impl NoBlending {
    pub(super) fn from_config(
        config: &BlendingConfig,
        phases: &PhaseSet,
    ) -> Result<Self, ConfigError> {
        let continuous_phase =
            config
                .continuous_phase
                .clone()
                .ok_or_else(|| ConfigError::MissingCoefficient {
                    model: config.method.clone(),
                    coefficient: "continuous_phase".into(),
                })?;

        if !phases.contains(&continuous_phase) {
            return Err(ConfigError::UnknownPhase(continuous_phase));
        }

        Ok(Self { continuous_phase })
    }

    #[must_use]
    pub fn continuous_phase(&self) -> &str {
        &self.continuous_phase
    }
}

impl BlendingMethod for NoBlending {
    fn weight(
        &self,
        _dispersed: &Phase,
        continuous: &Phase,
    ) -> Result<ScalarField, EvaluationError> {
        let weight = if continuous.name() == self.continuous_phase {
            1.0
        } else {
            0.0
        };
        Ok(field::uniform(continuous.alpha().len(), weight))
    }

    fn check_pair(&self, pair: &PhasePairKey) -> Result<(), ConfigError> {
        if pair.contains(&self.continuous_phase) {
            Ok(())
        } else {
            Err(ConfigError::InvalidCoefficient {
                model: "none".into(),
                coefficient: "continuous_phase".into(),
                reason: "must be a phase of every pair it blends",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::blending::{select, tests::air_water};

    #[test]
    fn fixed_continuous_phase() -> Result<(), Box<dyn std::error::Error>> {
        let phases = air_water();
        let (air, water) = (phases.get("air")?, phases.get("water")?);

        let config = BlendingConfig::new("none").with_continuous_phase("water");
        let method = select(&config, &phases)?;

        assert_eq!(method.weight(air, water)?, field::uniform(3, 1.0));
        assert_eq!(method.weight(water, air)?, field::uniform(3, 0.0));

        Ok(())
    }

    #[test]
    fn continuous_phase_is_required() {
        let phases = air_water();

        assert!(matches!(
            select(&BlendingConfig::new("none"), &phases),
            Err(ConfigError::MissingCoefficient { .. })
        ));
        assert!(matches!(
            select(&BlendingConfig::new("none").with_continuous_phase("oil"), &phases),
            Err(ConfigError::UnknownPhase(name)) if name == "oil"
        ));
    }

    #[test]
    fn continuous_phase_must_belong_to_the_pair() -> Result<(), Box<dyn std::error::Error>> {
        let mut phases = air_water();
        let oil = *phases.get("water")?.properties();
        phases.insert("oil", oil)?;
        let method = select(&BlendingConfig::new("none").with_continuous_phase("water"), &phases)?;

        assert!(method.check_pair(&PhasePairKey::new("air", "water")?).is_ok());
        assert!(matches!(
            method.check_pair(&PhasePairKey::new("air", "oil")?),
            Err(ConfigError::InvalidCoefficient { coefficient, .. }) if coefficient == "continuous_phase"
        ));
        Ok(())
    }
}
