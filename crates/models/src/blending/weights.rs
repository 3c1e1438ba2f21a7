use interphase_core::{Mesh, ScalarField, field::clip_unit};
use ndarray::Zip;

/// The two directional weights of a pair.
///
/// Each weight lies in `[0, 1]` and, at every location, the two sum to at
/// most one. Where raw weights sum above one they are rescaled so the sum is
/// exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendWeights {
    one_in_two: ScalarField,
    two_in_one: ScalarField,
}

impl BlendWeights {
    /// Clips and normalizes raw directional weights.
    ///
    /// # Panics
    ///
    /// Panics if the two fields have different lengths.
    #[must_use]
    pub fn new(one_in_two: ScalarField, two_in_one: ScalarField) -> Self {
        let mut one_in_two = clip_unit(one_in_two);
        let mut two_in_one = clip_unit(two_in_one);

        Zip::from(&mut one_in_two)
            .and(&mut two_in_one)
            .for_each(|w12, w21| {
                let sum = *w12 + *w21;
                if sum > 1.0 {
                    *w12 /= sum;
                    *w21 = 1.0 - *w12;
                }
            });

        Self {
            one_in_two,
            two_in_one,
        }
    }

    /// Weight of the model for phase 1 dispersed in phase 2.
    #[must_use]
    pub fn one_in_two(&self) -> &ScalarField {
        &self.one_in_two
    }

    /// Weight of the model for phase 2 dispersed in phase 1.
    #[must_use]
    pub fn two_in_one(&self) -> &ScalarField {
        &self.two_in_one
    }

    /// Interpolates cell weights to faces.
    #[must_use]
    pub fn to_faces(&self, mesh: &dyn Mesh) -> Self {
        Self::new(
            mesh.interpolate(&self.one_in_two),
            mesh.interpolate(&self.two_in_one),
        )
    }
}
