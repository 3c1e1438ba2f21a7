//! Field storage and the pointwise operations closure models rely on.
//!
//! Fields are plain [`ndarray`] arrays:
//!
//! - [`ScalarField`]: one value per cell, or per face for face fields
//! - [`VectorField`]: one `[x, y, z]` row per cell, shape `(n, 3)`
//!
//! Whether a scalar field lives on cells or faces is determined by the
//! operation that produced it; the [`Mesh`](crate::Mesh) reports both counts.

use ndarray::{Array1, Array2, Axis, Zip};

/// A scalar value per mesh location.
pub type ScalarField = Array1<f64>;

/// A three-component vector per mesh location, stored as an `(n, 3)` array.
pub type VectorField = Array2<f64>;

/// Pointwise operations shared by scalar and vector fields.
///
/// Blending and per-phase accumulation are written once against this trait
/// and reused for coefficients, forces, and fluxes alike.
pub trait FieldOps: Sized {
    /// Returns a field of zeros over `len` locations.
    fn zeroed(len: usize) -> Self;

    /// Multiplies the value at each location by the matching weight.
    #[must_use]
    fn weighted(self, weights: &ScalarField) -> Self;

    /// Flips the sign of every value.
    #[must_use]
    fn negated(self) -> Self;

    /// Adds `other` into `self`, location by location.
    fn accumulate(&mut self, other: &Self);
}

impl FieldOps for ScalarField {
    fn zeroed(len: usize) -> Self {
        Array1::zeros(len)
    }

    fn weighted(self, weights: &ScalarField) -> Self {
        self * weights
    }

    fn negated(self) -> Self {
        -self
    }

    fn accumulate(&mut self, other: &Self) {
        *self += other;
    }
}

impl FieldOps for VectorField {
    fn zeroed(len: usize) -> Self {
        Array2::zeros((len, 3))
    }

    fn weighted(mut self, weights: &ScalarField) -> Self {
        scale_rows(&mut self, weights);
        self
    }

    fn negated(self) -> Self {
        -self
    }

    fn accumulate(&mut self, other: &Self) {
        *self += other;
    }
}

/// Returns a scalar field with the same value at every location.
#[must_use]
pub fn uniform(len: usize, value: f64) -> ScalarField {
    Array1::from_elem(len, value)
}

/// Returns a vector field with the same vector at every location.
#[must_use]
pub fn uniform_vector(len: usize, value: [f64; 3]) -> VectorField {
    Array2::from_shape_fn((len, 3), |(_, j)| value[j])
}

/// Pointwise dot product `a · b`.
#[must_use]
pub fn dot(a: &VectorField, b: &VectorField) -> ScalarField {
    (a * b).sum_axis(Axis(1))
}

/// Pointwise cross product `a × b`.
#[must_use]
pub fn cross(a: &VectorField, b: &VectorField) -> VectorField {
    let mut out = Array2::zeros(a.raw_dim());
    Zip::from(out.rows_mut())
        .and(a.rows())
        .and(b.rows())
        .for_each(|mut c, a, b| {
            c[0] = a[1] * b[2] - a[2] * b[1];
            c[1] = a[2] * b[0] - a[0] * b[2];
            c[2] = a[0] * b[1] - a[1] * b[0];
        });
    out
}

/// Pointwise squared magnitude `|a|²`.
#[must_use]
pub fn mag_sqr(a: &VectorField) -> ScalarField {
    dot(a, a)
}

/// Pointwise magnitude `|a|`.
#[must_use]
pub fn mag(a: &VectorField) -> ScalarField {
    mag_sqr(a).mapv_into(f64::sqrt)
}

/// Returns `v` with each row multiplied by the matching scalar.
#[must_use]
pub fn scale(v: &VectorField, s: &ScalarField) -> VectorField {
    let mut out = v.clone();
    scale_rows(&mut out, s);
    out
}

/// Pointwise `max(a, floor)`.
#[must_use]
pub fn max_with(a: &ScalarField, floor: f64) -> ScalarField {
    a.mapv(|x| x.max(floor))
}

/// Clips every value into `[0, 1]`, mapping NaN to zero.
#[must_use]
pub fn clip_unit(a: ScalarField) -> ScalarField {
    a.mapv_into(|x| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) })
}

fn scale_rows(v: &mut VectorField, s: &ScalarField) {
    Zip::from(v.rows_mut())
        .and(s)
        .for_each(|mut row, &factor| row *= factor);
}
