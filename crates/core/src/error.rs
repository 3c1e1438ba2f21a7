use thiserror::Error;

/// Errors detected while building a phase system from its configuration.
///
/// All of these are fatal: the system refuses to construct rather than
/// silently dropping a model or a pair.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no phases are defined")]
    NoPhases,

    #[error("phase `{0}` is defined more than once")]
    DuplicatePhase(String),

    #[error("phase `{0}` is not defined")]
    UnknownPhase(String),

    #[error("phase `{0}` has no properties")]
    MissingPhaseProperties(String),

    /// A pair names the same phase twice.
    #[error("phase `{0}` cannot be paired with itself")]
    SelfPair(String),

    /// A pair string is neither `<a> in <b>` nor `<a> and <b>`.
    #[error("invalid phase pair `{0}`: expected `<phase> in <phase>` or `<phase> and <phase>`")]
    InvalidPair(String),

    #[error("pair `{0}` is configured more than once")]
    DuplicatePair(String),

    /// A closure model entry does not say which phase is dispersed.
    #[error("{kind} model for `{pair}` must name a dispersed phase (`<phase> in <phase>`)")]
    UnorderedModel { kind: &'static str, pair: String },

    #[error("unknown {kind} model `{name}`; available: {}", .available.join(", "))]
    UnknownModel {
        kind: &'static str,
        name: String,
        available: &'static [&'static str],
    },

    #[error("unknown blending method `{name}`; available: {}", .available.join(", "))]
    UnknownBlending {
        name: String,
        available: &'static [&'static str],
    },

    #[error("no blending method is configured for {kind} models")]
    MissingBlending { kind: &'static str },

    #[error("{kind} model for `{pair}` is defined more than once")]
    DuplicateModel { kind: &'static str, pair: String },

    /// A pair declares a model kind as required but none is configured.
    #[error("pair `{pair}` requires a {kind} model")]
    MissingModel { kind: &'static str, pair: String },

    #[error("`{model}` requires coefficient `{coefficient}`")]
    MissingCoefficient { model: String, coefficient: String },

    #[error("`{model}` coefficient `{coefficient}` {reason}")]
    InvalidCoefficient {
        model: String,
        coefficient: String,
        reason: &'static str,
    },

    /// Re-reading a configuration tried to add, remove, or reorder phases.
    #[error("the phase set cannot change once the system is constructed")]
    PhaseSetChanged,
}

/// Errors reported when querying coefficients or forces.
///
/// These indicate a request the configured system cannot answer, or field
/// state that does not satisfy a closure model's inputs.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EvaluationError {
    #[error("phase `{0}` is not part of the phase system")]
    UnknownPhase(String),

    #[error("pair `{0}` is not part of the phase system")]
    UnknownPair(String),

    /// A field does not have one value per mesh location.
    #[error("field `{field}` has {found} values, expected {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// A per-phase input list does not have one entry per phase.
    #[error("expected one entry per phase ({expected}), found {found}")]
    PhaseCount { expected: usize, found: usize },

    #[error("phase `{0}` has no diameter but is treated as dispersed")]
    MissingDiameter(String),

    #[error("pair `{0}` has no surface tension")]
    MissingSurfaceTension(String),

    #[error("phase `{0}` has no turbulence fields")]
    MissingTurbulence(String),
}
