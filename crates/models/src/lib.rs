//! Interfacial closure models and their blending.
//!
//! Each kind of interfacial force has a model trait, implemented by the
//! available correlations and selected by name through [`ModelKind::select`]:
//!
//! - [`DragModel`]: implicit exchange coefficient from `Cd Re`
//! - [`VirtualMassModel`]: implicit added-mass coefficient
//! - [`LiftModel`]: explicit force from shear in the continuous phase
//! - [`WallLubricationModel`]: explicit force away from walls
//! - [`TurbulentDispersionModel`]: diffusivity of the dispersed fraction
//!
//! A [`BlendedInterfacialModel`] holds the models of one kind for one phase
//! pair and combines them using a [`BlendingMethod`].

mod blended;
mod coefficients;

pub mod blending;
pub mod drag;
pub mod lift;
pub mod turbulent_dispersion;
pub mod virtual_mass;
pub mod wall_lubrication;

#[cfg(test)]
mod testing;

pub use blended::{BlendedInterfacialModel, ExplicitForce, ImplicitCoefficient, Location, ModelKind};
pub use blending::{BlendWeights, BlendingConfig, BlendingMethod};
pub use coefficients::Coefficients;
pub use drag::DragModel;
pub use lift::LiftModel;
pub use turbulent_dispersion::TurbulentDispersionModel;
pub use virtual_mass::VirtualMassModel;
pub use wall_lubrication::WallLubricationModel;
