//! Drag closure models.
//!
//! A drag model supplies `Cd Re` for a dispersed phase. The exchange
//! coefficient follows as
//!
//! ```text
//! Ki = 0.75 Cd Re μ_c / d²
//! K  = max(α_d, α_d,res) Ki
//! Kf = interpolate(max(α_d, α_d,res)) interpolate(Ki)
//! ```

mod schiller_naumann;
mod tomiyama_correlated;
mod wen_yu;

use std::fmt;

use interphase_core::{ConfigError, EvaluationError, OrderedPhasePair, ScalarField};

use crate::{Coefficients, ImplicitCoefficient, ModelKind};

pub use schiller_naumann::SchillerNaumann;
pub use tomiyama_correlated::TomiyamaCorrelated;
pub use wen_yu::WenYu;

/// A drag correlation for one phase dispersed in another.
pub trait DragModel: fmt::Debug {
    /// Drag coefficient times Reynolds number, per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the correlation needs.
    fn cd_re(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError>;
}

/// Coefficient per unit dispersed volume fraction.
fn ki(model: &dyn DragModel, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
    let d = pair.diameter()?;
    let mu = pair.continuous().viscosity();
    Ok(model.cd_re(pair)? * (0.75 * mu / (d * d)))
}

impl ImplicitCoefficient for dyn DragModel {
    fn k(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        Ok(pair.bounded_dispersed_alpha() * ki(self, pair)?)
    }

    fn kf(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        let mesh = pair.mesh();
        Ok(mesh.interpolate(&pair.bounded_dispersed_alpha()) * mesh.interpolate(&ki(self, pair)?))
    }
}

impl ModelKind for dyn DragModel {
    const KIND: &'static str = "drag";
    const AVAILABLE: &'static [&'static str] = &["SchillerNaumann", "WenYu", "TomiyamaCorrelated"];

    fn select(name: &str, coefficients: &Coefficients) -> Result<Box<Self>, ConfigError> {
        Ok(match name {
            "SchillerNaumann" => Box::new(SchillerNaumann::from_coefficients(name, coefficients)?),
            "WenYu" => Box::new(WenYu::from_coefficients(name, coefficients)?),
            "TomiyamaCorrelated" => {
                Box::new(TomiyamaCorrelated::from_coefficients(name, coefficients)?)
            }
            _ => {
                return Err(ConfigError::UnknownModel {
                    kind: Self::KIND,
                    name: name.to_owned(),
                    available: Self::AVAILABLE,
                });
            }
        })
    }
}

/// `Cd Re` of a single sphere: `24 (1 + 0.15 Re^0.687)` below `Re = 1000`
/// and `0.44 Re` above, with `Re` bounded below by `residual_re`.
pub(crate) fn sphere_cd_re(re: f64, residual_re: f64) -> f64 {
    if re < 1000.0 {
        24.0 * (1.0 + 0.15 * re.powf(0.687))
    } else {
        0.44 * re.max(residual_re)
    }
}
