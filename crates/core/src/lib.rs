//! Fields, phases, and phase pairs for interfacial momentum transfer.
//!
//! This crate defines the shared vocabulary that closure models and the
//! momentum transfer phase system build on:
//!
//! - [`ScalarField`], [`VectorField`]: per-cell or per-face values
//! - [`Mesh`]: the finite-volume operators interfacial models consume
//! - [`Phase`], [`PhaseSet`]: named phases and their current field state
//! - [`PhasePairKey`], [`PhasePair`], [`OrderedPhasePair`]: pair identity and
//!   the derived quantities closure models need
//! - [`ConfigError`], [`EvaluationError`]: setup and query failures

mod error;
mod pair;
mod phase;

pub mod field;
pub mod mesh;

pub use error::{ConfigError, EvaluationError};
pub use field::{FieldOps, ScalarField, VectorField};
pub use mesh::{LineMesh, Mesh, MeshError};
pub use pair::{OrderedPhasePair, PhasePair, PhasePairKey};
pub use phase::{DEFAULT_RESIDUAL_ALPHA, Phase, PhaseProperties, PhaseSet, Turbulence};
