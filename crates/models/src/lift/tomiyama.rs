use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField};

use crate::Coefficients;

use super::LiftModel;

/// Tomiyama's lift coefficient, which changes sign for large deformed bubbles.
///
/// Depends on the Reynolds number and on the Eötvös number based on the
/// bubble's hydraulic diameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TomiyamaLift;

impl TomiyamaLift {
    pub(crate) fn from_coefficients(
        name: &str,
        coefficients: &Coefficients,
    ) -> Result<Self, ConfigError> {
        coefficients.only(name, &[])?;
        Ok(Self)
    }
}

impl LiftModel for TomiyamaLift {
    fn cl(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let eo_h = pair.eo_h()?;
        let deformed = 0.00105 * eo_h.powi(3) - 0.0159 * eo_h.powi(2) - 0.0204 * eo_h + 0.474;

        Ok(pair.re()?.mapv_into(|re| {
            if eo_h < 4.0 {
                (0.288 * (0.121 * re).tanh()).min(deformed)
            } else if eo_h < 10.7 {
                deformed
            } else {
                -0.288
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::millimeter};

    use crate::testing::Bubbly;

    fn with_air_diameter(mm: f64) -> Bubbly {
        let mut bubbly = Bubbly::new();
        let air = bubbly.phases.get_mut("air").unwrap();
        let properties = air.properties().with_diameter(Length::new::<millimeter>(mm));
        air.set_properties(properties);
        bubbly
    }

    #[test]
    fn small_bubbles_follow_shear() {
        let bubbly = with_air_diameter(3.0);
        let pair = bubbly.pair();
        let air_in_water = pair.one_in_two();
        assert!(air_in_water.eo_h().unwrap() < 4.0);

        let cl = TomiyamaLift.cl(&air_in_water).unwrap();
        assert!(cl.iter().all(|&cl| cl > 0.0 && cl <= 0.288));
    }

    #[test]
    fn large_bubbles_reverse() {
        let bubbly = with_air_diameter(10.0);
        let pair = bubbly.pair();
        let air_in_water = pair.one_in_two();
        assert!(air_in_water.eo_h().unwrap() >= 10.7);

        let cl = TomiyamaLift.cl(&air_in_water).unwrap();
        for value in &cl {
            assert_relative_eq!(*value, -0.288);
        }
    }
}
