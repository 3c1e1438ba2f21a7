use interphase_core::{
    ConfigError, EvaluationError, OrderedPhasePair, VectorField, field::scale,
};
use ndarray::Zip;

use crate::{Coefficients, coefficients::positive};

use super::{WallLubricationModel, wall_slip_sqr};

/// Tomiyama's wall lubrication force for bubbles in a pipe of diameter `D`.
///
/// `Cw(Eo) d/2 (1/y² − 1/(D − y)²) ρ_c |U_slip|² n`
///
/// Both wall distances are bounded below by the bubble radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TomiyamaWallLubrication {
    pub duct_diameter: f64,
}

impl TomiyamaWallLubrication {
    pub(crate) fn from_coefficients(
        name: &str,
        coefficients: &Coefficients,
    ) -> Result<Self, ConfigError> {
        coefficients.only(name, &["duct_diameter"])?;
        let duct_diameter = coefficients.require(name, "duct_diameter")?;
        Ok(Self {
            duct_diameter: positive(name, "duct_diameter", duct_diameter)?,
        })
    }
}

/// Wall force coefficient as a function of the Eötvös number.
fn cw(eo: f64) -> f64 {
    if eo < 1.0 {
        0.47
    } else if eo < 5.0 {
        (-0.933 * eo + 0.179).exp()
    } else if eo < 33.0 {
        0.00599 * eo - 0.0187
    } else {
        0.179
    }
}

impl WallLubricationModel for TomiyamaWallLubrication {
    fn fi(&self, pair: &OrderedPhasePair<'_>) -> Result<VectorField, EvaluationError> {
        let d = pair.diameter()?;
        let scale_factor = cw(pair.eo()?) * 0.5 * d * pair.continuous().density();
        let mesh = pair.mesh();
        let duct = self.duct_diameter;
        let radius = 0.5 * d;

        let magnitude = Zip::from(mesh.wall_distance())
            .and(&wall_slip_sqr(pair))
            .map_collect(|&y, &slip| {
                let near = y.max(radius);
                let far = (duct - y).max(radius);
                scale_factor * (1.0 / (near * near) - 1.0 / (far * far)) * slip
            });

        Ok(scale(mesh.wall_normal(), &magnitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::testing::Bubbly;

    #[test]
    fn coefficient_regimes() {
        assert_relative_eq!(cw(0.5), 0.47);
        assert_relative_eq!(cw(2.0), (-1.866_f64 + 0.179).exp());
        assert_relative_eq!(cw(10.0), 0.0599 - 0.0187);
        assert_relative_eq!(cw(40.0), 0.179);
    }

    #[test]
    fn symmetric_in_a_duct() {
        let bubbly = Bubbly::new();
        let pair = bubbly.pair();
        let model = TomiyamaWallLubrication { duct_diameter: 1.0 };

        let fi = model.fi(&pair.one_in_two()).unwrap();
        let eo = pair.one_in_two().eo().unwrap();
        let slip = wall_slip_sqr(&pair.one_in_two());

        // y = 0.125 in the first cell, 0.875 from the far wall.
        let expected =
            cw(eo) * 0.5 * 3e-3 * (1.0 / 0.125_f64.powi(2) - 1.0 / 0.875_f64.powi(2)) * 1000.0 * slip[0];
        assert_relative_eq!(fi[[0, 0]], expected, max_relative = 1e-9);
        assert!(fi[[3, 0]] < 0.0);
    }

    #[test]
    fn finite_outside_a_narrow_duct() {
        let bubbly = Bubbly::new();
        let pair = bubbly.pair();

        // Every cell centre is at least this far from its nearest wall.
        let model = TomiyamaWallLubrication { duct_diameter: 0.125 };

        let fi = model.fi(&pair.one_in_two()).unwrap();
        assert!(fi.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn needs_a_duct_diameter() {
        assert!(matches!(
            TomiyamaWallLubrication::from_coefficients("Tomiyama", &Coefficients::new()),
            Err(ConfigError::MissingCoefficient { .. })
        ));
    }
}
