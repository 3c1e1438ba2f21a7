//! Configuration of a momentum transfer phase system.
//!
//! ```toml
//! gravity = [0.0, -9.81, 0.0]
//!
//! [[phases]]
//! name = "air"
//! density = 1.2
//! viscosity = 1.8e-5
//! diameter = 3e-3
//! alpha = 0.1
//!
//! [[phases]]
//! name = "water"
//! density = 1000.0
//! viscosity = 1e-3
//! alpha = 0.9
//!
//! [[pairs]]
//! pair = "air and water"
//! surface_tension = 0.07
//! require = ["drag"]
//!
//! [blending.default]
//! type = "none"
//! continuous_phase = "water"
//!
//! [[drag]]
//! pair = "air in water"
//! type = "SchillerNaumann"
//! ```

use std::{collections::BTreeMap, fmt};

use interphase_core::PhaseProperties;
use interphase_models::{
    BlendingConfig, Coefficients, DragModel, LiftModel, ModelKind, TurbulentDispersionModel,
    VirtualMassModel, WallLubricationModel,
};
use serde::{Deserialize, Serialize};

/// The blending entry used by kinds without one of their own.
pub const DEFAULT_BLENDING: &str = "default";

fn default_gravity() -> [f64; 3] {
    [0.0, -9.81, 0.0]
}

/// Everything needed to construct a
/// [`MomentumTransferSystem`](crate::MomentumTransferSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Phases in definition order.
    pub phases: Vec<PhaseConfig>,

    /// Gravitational acceleration in m/s².
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 3],

    /// Properties and mandatory model kinds of individual pairs.
    #[serde(default)]
    pub pairs: Vec<PairConfig>,

    /// Blending methods keyed by model kind, or by `default`.
    #[serde(default)]
    pub blending: BTreeMap<String, BlendingConfig>,

    #[serde(default)]
    pub drag: Vec<ModelEntry>,

    #[serde(default)]
    pub virtual_mass: Vec<ModelEntry>,

    #[serde(default)]
    pub lift: Vec<ModelEntry>,

    #[serde(default)]
    pub wall_lubrication: Vec<ModelEntry>,

    #[serde(default)]
    pub turbulent_dispersion: Vec<ModelEntry>,
}

impl Config {
    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is not valid TOML or does not match the schema.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Returns the phase names in definition order.
    pub fn phase_names(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(|phase| phase.name.as_str())
    }

    /// Returns the model entries of one kind.
    #[must_use]
    pub fn models(&self, kind: Kind) -> &[ModelEntry] {
        match kind {
            Kind::Drag => &self.drag,
            Kind::VirtualMass => &self.virtual_mass,
            Kind::Lift => &self.lift,
            Kind::WallLubrication => &self.wall_lubrication,
            Kind::TurbulentDispersion => &self.turbulent_dispersion,
        }
    }

    /// Returns the blending configuration for `kind`, falling back to `default`.
    #[must_use]
    pub fn blending_for(&self, kind: Kind) -> Option<&BlendingConfig> {
        self.blending
            .get(kind.as_str())
            .or_else(|| self.blending.get(DEFAULT_BLENDING))
    }
}

/// A phase and its constant properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub name: String,

    #[serde(flatten)]
    pub properties: PhaseProperties,

    /// Initial uniform volume fraction, applied only at construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

/// Settings of one unordered pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairConfig {
    /// The pair, as `<a> and <b>`.
    pub pair: String,

    /// Surface tension in N/m.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_tension: Option<f64>,

    /// Model kinds this pair must have.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub require: Vec<Kind>,
}

/// A closure model for one phase dispersed in another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// The ordered pair, as `<dispersed> in <continuous>`.
    pub pair: String,

    /// Name of the model.
    #[serde(rename = "type")]
    pub model: String,

    /// Model coefficients.
    #[serde(flatten)]
    pub coefficients: Coefficients,
}

impl ModelEntry {
    #[must_use]
    pub fn new(pair: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            model: model.into(),
            coefficients: Coefficients::new(),
        }
    }

    #[must_use]
    pub fn with(self, coefficient: impl Into<String>, value: f64) -> Self {
        Self {
            coefficients: self.coefficients.with(coefficient, value),
            ..self
        }
    }
}

/// The kinds of interfacial momentum transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Drag,
    VirtualMass,
    Lift,
    WallLubrication,
    TurbulentDispersion,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Drag,
        Kind::VirtualMass,
        Kind::Lift,
        Kind::WallLubrication,
        Kind::TurbulentDispersion,
    ];

    /// The configuration key of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Drag => "drag",
            Kind::VirtualMass => "virtual_mass",
            Kind::Lift => "lift",
            Kind::WallLubrication => "wall_lubrication",
            Kind::TurbulentDispersion => "turbulent_dispersion",
        }
    }

    /// The name used for this kind in messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Kind::Drag => <dyn DragModel>::KIND,
            Kind::VirtualMass => <dyn VirtualMassModel>::KIND,
            Kind::Lift => <dyn LiftModel>::KIND,
            Kind::WallLubrication => <dyn WallLubricationModel>::KIND,
            Kind::TurbulentDispersion => <dyn TurbulentDispersionModel>::KIND,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
