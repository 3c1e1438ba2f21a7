//! Interfacial momentum transfer for Eulerian multiphase flow.
//!
//! A [`MomentumTransferSystem`] owns a set of phases and, for every pair of
//! them, the blended closure models configured for drag, virtual mass,
//! lift, wall lubrication, and turbulent dispersion. It answers coefficient
//! and force queries per pair or per phase, caching results for the rest of
//! the time step, and assembles each phase's [`MomentumTransferMatrix`].
//!
//! ```no_run
//! use interphase_system::{LineMesh, MomentumTransferSystem};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = std::fs::read_to_string("phases.toml")?;
//! let mesh = LineMesh::new(100, 1.0, 0.01)?;
//! let system = MomentumTransferSystem::from_toml_str(mesh, &config)?;
//!
//! for (phase, matrix) in system.momentum_transfer()?.present() {
//!     println!("{phase}: {:?}", matrix.implicit_drag());
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod config;
mod error;
mod matrix;
mod per_phase;
mod registry;
mod system;

pub use config::{Config, DEFAULT_BLENDING, Kind, ModelEntry, PairConfig, PhaseConfig};
pub use error::Error;
pub use matrix::{Coupling, MomentumTransferMatrix};
pub use per_phase::PerPhase;
pub use registry::ModelTable;
pub use system::MomentumTransferSystem;

pub use interphase_core::{
    ConfigError, EvaluationError, LineMesh, Mesh, Phase, PhasePairKey, PhaseProperties, PhaseSet,
    ScalarField, Turbulence, VectorField,
};
pub use interphase_models::{BlendingConfig, Coefficients};
