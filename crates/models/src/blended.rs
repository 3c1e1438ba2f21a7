use interphase_core::{
    ConfigError, EvaluationError, FieldOps, Mesh, OrderedPhasePair, PhasePair, PhasePairKey,
    ScalarField, VectorField,
};

use crate::{BlendWeights, BlendingMethod, Coefficients};

/// A family of closure models that can be selected by name.
///
/// Implemented for each model trait object, such as `dyn DragModel`.
pub trait ModelKind {
    /// Name of the kind, as used in messages.
    const KIND: &'static str;

    /// Names accepted by [`ModelKind::select`].
    const AVAILABLE: &'static [&'static str];

    /// Builds the named model from its coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModel`] for an unknown name, or a
    /// coefficient error if the model rejects its coefficients.
    fn select(name: &str, coefficients: &Coefficients) -> Result<Box<Self>, ConfigError>;
}

/// A model that contributes an implicit momentum exchange coefficient.
pub trait ImplicitCoefficient {
    /// Coefficient per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model needs.
    fn k(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError>;

    /// Coefficient per face.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model needs.
    fn kf(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError>;
}

/// A model that contributes an explicit force on the dispersed phase.
pub trait ExplicitForce {
    /// Force density per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model needs.
    fn f(&self, pair: &OrderedPhasePair<'_>) -> Result<VectorField, EvaluationError>;

    /// Force flux per face, `interpolate(α_d) (interpolate(Fi) · Sf)`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the pair lacks an input the model needs.
    fn ff(&self, pair: &OrderedPhasePair<'_>) -> Result<ScalarField, EvaluationError>;
}

/// Where a blended quantity is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Cell,
    Face,
}

impl Location {
    fn len(self, mesh: &dyn Mesh) -> usize {
        match self {
            Location::Cell => mesh.n_cells(),
            Location::Face => mesh.n_faces(),
        }
    }
}

/// How a "2 in 1" result relates to phase 1.
#[derive(Debug, Clone, Copy)]
enum Orientation {
    /// Symmetric quantities such as exchange coefficients.
    Shared,
    /// Forces, which act on the dispersed phase.
    OnDispersed,
}

impl Orientation {
    fn toward_phase1<T: FieldOps>(self, value: T) -> T {
        match self {
            Orientation::Shared => value,
            Orientation::OnDispersed => value.negated(),
        }
    }
}

/// The closure models of one kind for one phase pair.
///
/// Holds up to two directional models, one for each phase dispersed in the
/// other, and the blending method that weighs them. With a single model its
/// result is returned unchanged. With both, the results are combined using
/// [`BlendWeights`]. Forces are always reported as acting on phase 1 of the
/// [`PhasePair`] being evaluated.
#[derive(Debug)]
pub struct BlendedInterfacialModel<M: ?Sized> {
    key: PhasePairKey,
    blending: Box<dyn BlendingMethod>,
    first_in_second: Option<Box<M>>,
    second_in_first: Option<Box<M>>,
}

impl<M: ?Sized> BlendedInterfacialModel<M> {
    /// Creates an empty model for the pair `key`, ignoring any ordering it carries.
    #[must_use]
    pub fn new(key: &PhasePairKey, blending: Box<dyn BlendingMethod>) -> Self {
        Self {
            key: key.unordered(),
            blending,
            first_in_second: None,
            second_in_first: None,
        }
    }

    /// Returns the unordered key of the pair.
    #[must_use]
    pub fn key(&self) -> &PhasePairKey {
        &self.key
    }

    #[must_use]
    pub fn blending(&self) -> &dyn BlendingMethod {
        self.blending.as_ref()
    }

    /// Returns the model for the ordered pair `dispersed_in`, if any.
    #[must_use]
    pub fn model(&self, dispersed_in: &PhasePairKey) -> Option<&M> {
        if !dispersed_in.is_ordered() || dispersed_in.unordered() != self.key {
            return None;
        }
        if dispersed_in.first() == self.key.first() {
            self.first_in_second.as_deref()
        } else {
            self.second_in_first.as_deref()
        }
    }

    /// Returns the ordered keys of the models present.
    #[must_use]
    pub fn directions(&self) -> Vec<PhasePairKey> {
        let (first, second) = (self.key.first(), self.key.second());
        [
            (self.first_in_second.is_some(), first, second),
            (self.second_in_first.is_some(), second, first),
        ]
        .into_iter()
        .filter(|(present, ..)| *present)
        .filter_map(|(_, dispersed, continuous)| PhasePairKey::ordered(dispersed, continuous).ok())
        .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_in_second.is_none() && self.second_in_first.is_none()
    }

    /// Returns the clipped directional weights of `pair`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `pair` is not this model's pair.
    pub fn weights(
        &self,
        pair: &PhasePair<'_>,
        location: Location,
    ) -> Result<BlendWeights, EvaluationError> {
        self.check_pair(pair)?;

        let cells = BlendWeights::new(
            self.blending.weight(pair.phase1(), pair.phase2())?,
            self.blending.weight(pair.phase2(), pair.phase1())?,
        );
        Ok(match location {
            Location::Cell => cells,
            Location::Face => cells.to_faces(pair.mesh()),
        })
    }

    fn check_pair(&self, pair: &PhasePair<'_>) -> Result<(), EvaluationError> {
        if pair.key() == self.key {
            Ok(())
        } else {
            Err(EvaluationError::UnknownPair(pair.key().to_string()))
        }
    }

    /// Returns the "1 in 2" and "2 in 1" models of `pair`.
    fn directional(&self, pair: &PhasePair<'_>) -> Result<(Option<&M>, Option<&M>), EvaluationError> {
        self.check_pair(pair)?;

        let first = self.first_in_second.as_deref();
        let second = self.second_in_first.as_deref();
        Ok(if pair.phase1().name() == self.key.first() {
            (first, second)
        } else {
            (second, first)
        })
    }

    fn blend<T: FieldOps>(
        &self,
        pair: &PhasePair<'_>,
        location: Location,
        orientation: Orientation,
        eval: impl Fn(&M, &OrderedPhasePair<'_>) -> Result<T, EvaluationError>,
    ) -> Result<T, EvaluationError> {
        let (one_in_two, two_in_one) = self.directional(pair)?;
        let reversed = |model: &M| {
            eval(model, &pair.two_in_one()).map(|value| orientation.toward_phase1(value))
        };

        match (one_in_two, two_in_one) {
            (Some(model), None) => eval(model, &pair.one_in_two()),
            (None, Some(model)) => reversed(model),
            (Some(one_in_two), Some(two_in_one)) => {
                let weights = self.weights(pair, location)?;
                let mut blended = eval(one_in_two, &pair.one_in_two())?.weighted(weights.one_in_two());
                blended.accumulate(&reversed(two_in_one)?.weighted(weights.two_in_one()));
                Ok(blended)
            }
            (None, None) => Ok(T::zeroed(location.len(pair.mesh()))),
        }
    }
}

impl<M: ModelKind + ?Sized> BlendedInterfacialModel<M> {
    /// Adds the model for the ordered pair `dispersed_in`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `dispersed_in` is unordered, belongs to
    /// another pair, or already has a model.
    pub fn insert(&mut self, dispersed_in: &PhasePairKey, model: Box<M>) -> Result<(), ConfigError> {
        if !dispersed_in.is_ordered() {
            return Err(ConfigError::UnorderedModel {
                kind: M::KIND,
                pair: dispersed_in.to_string(),
            });
        }
        if dispersed_in.unordered() != self.key {
            return Err(ConfigError::InvalidPair(dispersed_in.to_string()));
        }

        let slot = if dispersed_in.first() == self.key.first() {
            &mut self.first_in_second
        } else {
            &mut self.second_in_first
        };
        if slot.is_some() {
            return Err(ConfigError::DuplicateModel {
                kind: M::KIND,
                pair: dispersed_in.to_string(),
            });
        }

        *slot = Some(model);
        Ok(())
    }
}

impl<M: ImplicitCoefficient + ?Sized> BlendedInterfacialModel<M> {
    /// Blended coefficient per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `pair` is not this model's pair or a
    /// sub-model cannot be evaluated.
    pub fn k(&self, pair: &PhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        self.blend(pair, Location::Cell, Orientation::Shared, M::k)
    }

    /// Blended coefficient per face.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `pair` is not this model's pair or a
    /// sub-model cannot be evaluated.
    pub fn kf(&self, pair: &PhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        self.blend(pair, Location::Face, Orientation::Shared, M::kf)
    }
}

impl<M: ExplicitForce + ?Sized> BlendedInterfacialModel<M> {
    /// Blended force on phase 1 per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `pair` is not this model's pair or a
    /// sub-model cannot be evaluated.
    pub fn f(&self, pair: &PhasePair<'_>) -> Result<VectorField, EvaluationError> {
        self.blend(pair, Location::Cell, Orientation::OnDispersed, M::f)
    }

    /// Blended force flux on phase 1 per face.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `pair` is not this model's pair or a
    /// sub-model cannot be evaluated.
    pub fn ff(&self, pair: &PhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        self.blend(pair, Location::Face, Orientation::OnDispersed, M::ff)
    }
}

impl BlendedInterfacialModel<dyn crate::TurbulentDispersionModel> {
    /// Blended turbulent diffusivity per cell.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `pair` is not this model's pair or a
    /// sub-model cannot be evaluated.
    pub fn d(&self, pair: &PhasePair<'_>) -> Result<ScalarField, EvaluationError> {
        self.blend(pair, Location::Cell, Orientation::Shared, |model, pair| {
            model.d(pair)
        })
    }
}
