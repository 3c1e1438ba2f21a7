use interphase_core::{ConfigError, EvaluationError, MeshError};
use thiserror::Error;

/// Any failure of the momentum transfer phase system.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
