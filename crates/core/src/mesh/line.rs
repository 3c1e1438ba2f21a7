use ndarray::{Array1, Array2, ArrayView1};
use thiserror::Error;

use crate::field::{ScalarField, VectorField, uniform_vector};

use super::Mesh;

/// Errors that can occur when constructing a [`LineMesh`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    #[error("a mesh needs at least one cell")]
    NoCells,

    #[error("length must be finite and positive")]
    Length,

    #[error("cross-sectional area must be finite and positive")]
    Area,
}

/// A uniform one-dimensional mesh along `x`, bounded by walls at both ends.
///
/// Cells are numbered from the wall at `x = 0`.
/// Only the `n - 1` interior faces are represented; face `i` separates cells
/// `i` and `i + 1` and its area vector points in `+x`.
///
/// Gradients use face values from linear interpolation, with zero-gradient
/// values at the two walls.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMesh {
    n_cells: usize,
    dx: f64,
    face_area_vectors: VectorField,
    wall_distance: ScalarField,
    wall_normal: VectorField,
}

impl LineMesh {
    /// Creates a mesh of `n_cells` equal cells spanning `length`.
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] if there are no cells or if the length or area
    /// is not finite and positive.
    pub fn new(n_cells: usize, length: f64, area: f64) -> Result<Self, MeshError> {
        if n_cells == 0 {
            return Err(MeshError::NoCells);
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(MeshError::Length);
        }
        if !area.is_finite() || area <= 0.0 {
            return Err(MeshError::Area);
        }

        #[allow(clippy::cast_precision_loss)]
        let dx = length / n_cells as f64;
        let centres = cell_centres(n_cells, dx);

        let wall_distance = centres.mapv(|x| x.min(length - x));
        let wall_normal = Array2::from_shape_fn((n_cells, 3), |(i, j)| match j {
            0 if centres[i] <= 0.5 * length => 1.0,
            0 => -1.0,
            _ => 0.0,
        });

        Ok(Self {
            n_cells,
            dx,
            face_area_vectors: uniform_vector(n_cells - 1, [area, 0.0, 0.0]),
            wall_distance,
            wall_normal,
        })
    }

    /// Returns the cell width.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.dx
    }

    /// Returns the `x` coordinate of each cell centre.
    #[must_use]
    pub fn cell_centres(&self) -> ScalarField {
        cell_centres(self.n_cells, self.dx)
    }

    /// Derivative along `x` of a cell field, evaluated at cell centres.
    fn ddx(&self, values: ArrayView1<f64>) -> ScalarField {
        let n = self.n_cells;
        Array1::from_shape_fn(n, |i| {
            let west = if i > 0 {
                0.5 * (values[i - 1] + values[i])
            } else {
                values[i]
            };
            let east = if i + 1 < n {
                0.5 * (values[i] + values[i + 1])
            } else {
                values[i]
            };
            (east - west) / self.dx
        })
    }
}

impl Mesh for LineMesh {
    fn n_cells(&self) -> usize {
        self.n_cells
    }

    fn n_faces(&self) -> usize {
        self.n_cells - 1
    }

    fn interpolate(&self, field: &ScalarField) -> ScalarField {
        Array1::from_shape_fn(self.n_faces(), |f| 0.5 * (field[f] + field[f + 1]))
    }

    fn interpolate_vector(&self, field: &VectorField) -> VectorField {
        Array2::from_shape_fn((self.n_faces(), 3), |(f, j)| {
            0.5 * (field[[f, j]] + field[[f + 1, j]])
        })
    }

    fn face_area_vectors(&self) -> &VectorField {
        &self.face_area_vectors
    }

    fn sn_grad(&self, field: &ScalarField) -> ScalarField {
        Array1::from_shape_fn(self.n_faces(), |f| (field[f + 1] - field[f]) / self.dx)
    }

    fn grad(&self, field: &ScalarField) -> VectorField {
        let ddx = self.ddx(field.view());
        Array2::from_shape_fn((self.n_cells, 3), |(i, j)| if j == 0 { ddx[i] } else { 0.0 })
    }

    /// Only `x` derivatives exist, so `∇×U = (0, −∂Uz/∂x, ∂Uy/∂x)`.
    fn curl(&self, field: &VectorField) -> VectorField {
        let d_uy = self.ddx(field.column(1));
        let d_uz = self.ddx(field.column(2));
        Array2::from_shape_fn((self.n_cells, 3), |(i, j)| match j {
            1 => -d_uz[i],
            2 => d_uy[i],
            _ => 0.0,
        })
    }

    fn wall_distance(&self) -> &ScalarField {
        &self.wall_distance
    }

    fn wall_normal(&self) -> &VectorField {
        &self.wall_normal
    }
}

#[allow(clippy::cast_precision_loss)]
fn cell_centres(n_cells: usize, dx: f64) -> ScalarField {
    Array1::from_shape_fn(n_cells, |i| (i as f64 + 0.5) * dx)
}
