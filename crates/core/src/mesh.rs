//! The finite-volume operators interfacial models consume.
//!
//! Discretization lives outside this workspace. Closure models only need a
//! handful of operators from it, which the [`Mesh`] trait names. A small
//! reference implementation, [`LineMesh`], is provided for tests and demos.

mod line;

pub use line::{LineMesh, MeshError};

use crate::field::{ScalarField, VectorField, dot, mag};

/// Mesh geometry and discretization operators.
///
/// Cell fields have [`Mesh::n_cells`] locations and face fields have
/// [`Mesh::n_faces`] locations.
pub trait Mesh {
    /// Returns the number of cells.
    fn n_cells(&self) -> usize;

    /// Returns the number of faces.
    fn n_faces(&self) -> usize;

    /// Interpolates a cell scalar field to faces.
    fn interpolate(&self, field: &ScalarField) -> ScalarField;

    /// Interpolates a cell vector field to faces.
    fn interpolate_vector(&self, field: &VectorField) -> VectorField;

    /// Returns the face area vectors `Sf`.
    fn face_area_vectors(&self) -> &VectorField;

    /// Returns the surface-normal gradient of a cell field at each face.
    fn sn_grad(&self, field: &ScalarField) -> ScalarField;

    /// Returns the cell-centred gradient of a cell field.
    fn grad(&self, field: &ScalarField) -> VectorField;

    /// Returns the cell-centred curl of a cell vector field.
    fn curl(&self, field: &VectorField) -> VectorField;

    /// Returns the distance from each cell centre to the nearest wall.
    fn wall_distance(&self) -> &ScalarField;

    /// Returns the unit normal of the nearest wall at each cell, pointing into the domain.
    fn wall_normal(&self) -> &VectorField;

    /// Returns the face area magnitudes `|Sf|`.
    fn face_areas(&self) -> ScalarField {
        mag(self.face_area_vectors())
    }

    /// Returns the face flux `interpolate(field) · Sf` of a cell vector field.
    fn face_flux(&self, field: &VectorField) -> ScalarField {
        dot(&self.interpolate_vector(field), self.face_area_vectors())
    }
}
