use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField};

use crate::{Coefficients, coefficients::positive};

use super::DragModel;

/// Tomiyama's correlation for bubbles in slightly contaminated liquids.
///
/// `Cd Re = max(A min(1 + 0.15 Re^0.687, 3), 8 Eo Re / (3 Eo + 12))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TomiyamaCorrelated {
    /// Scale of the viscous branch, 24 for slightly contaminated systems.
    pub a: f64,
}

impl Default for TomiyamaCorrelated {
    fn default() -> Self {
        Self { a: 24.0 }
    }
}

impl TomiyamaCorrelated {
    pub(crate) fn from_coefficients(
        name: &str,
        coefficients: &Coefficients,
    ) -> Result<Self, ConfigError> {
        coefficients.only(name, &["a"])?;
        let a = coefficients.get_or(name, "a", Self::default().a)?;
        Ok(Self {
            a: positive(name, "a", a)?,
        })
    }
}

impl DragModel for TomiyamaCorrelated {
    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let eo = pair.eo()?;
        Ok(pair.re()?.mapv_into(|re| {
            let viscous = self.a * (1.0 + 0.15 * re.powf(0.687)).min(3.0);
            let deformed = 8.0 * eo * re / (3.0 * eo + 12.0);
            viscous.max(deformed)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::testing::{Bubbly, GRAVITY, SURFACE_TENSION};

    #[test]
    fn larger_of_viscous_and_deformed_branches() {
        let bubbly = Bubbly::new();
        let pair = bubbly.pair();
        let air_in_water = pair.one_in_two();

        let eo = GRAVITY[1].abs() * 999.0 * 9e-6 / SURFACE_TENSION;
        assert_relative_eq!(air_in_water.eo().unwrap(), eo, max_relative = 1e-9);

        let re = air_in_water.re().unwrap();
        let cd_re = TomiyamaCorrelated::default().cd_re(&air_in_water).unwrap();
        for (re, cd_re) in re.iter().zip(&cd_re) {
            let viscous = 24.0 * (1.0 + 0.15 * re.powf(0.687)).min(3.0);
            let deformed = 8.0 * eo * re / (3.0 * eo + 12.0);
            assert_relative_eq!(*cd_re, viscous.max(deformed), max_relative = 1e-9);
        }
    }

    #[test]
    fn needs_surface_tension() {
        let bubbly = Bubbly::new();
        let pair = bubbly.pair().with_surface_tension(None);

        assert_eq!(
            TomiyamaCorrelated::default().cd_re(&pair.one_in_two()),
            Err(EvaluationError::MissingSurfaceTension("air and water".into()))
        );
    }
}
