use std::collections::HashMap;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, Length, MassDensity},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
};

use crate::{
    error::{ConfigError, EvaluationError},
    field::{ScalarField, VectorField, uniform},
};

/// The residual volume fraction used when none is configured.
pub const DEFAULT_RESIDUAL_ALPHA: f64 = 1e-6;

/// Constant material properties of a phase.
///
/// Quantities deserialize from numbers in SI base units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseProperties {
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,

    /// Characteristic diameter, required whenever the phase is dispersed.
    #[serde(default)]
    pub diameter: Option<Length>,

    /// Volume fraction below which the phase is treated as absent.
    #[serde(default = "default_residual_alpha")]
    pub residual_alpha: f64,
}

fn default_residual_alpha() -> f64 {
    DEFAULT_RESIDUAL_ALPHA
}

impl PhaseProperties {
    /// Creates properties for a phase without a diameter.
    #[must_use]
    pub fn new(density: MassDensity, viscosity: DynamicViscosity) -> Self {
        Self {
            density,
            viscosity,
            diameter: None,
            residual_alpha: DEFAULT_RESIDUAL_ALPHA,
        }
    }

    #[must_use]
    pub fn with_diameter(self, diameter: Length) -> Self {
        Self {
            diameter: Some(diameter),
            ..self
        }
    }

    #[must_use]
    pub fn with_residual_alpha(self, residual_alpha: f64) -> Self {
        Self {
            residual_alpha,
            ..self
        }
    }
}

/// Turbulence fields of a phase, supplied by an external turbulence model.
#[derive(Debug, Clone, PartialEq)]
pub struct Turbulence {
    /// Turbulent kinetic energy `k`.
    pub k: ScalarField,

    /// Turbulent kinematic viscosity `νt`.
    pub nut: ScalarField,
}

/// A named phase and its current field state.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    name: String,
    index: usize,
    properties: PhaseProperties,
    alpha: ScalarField,
    velocity: VectorField,
    acceleration: VectorField,
    turbulence: Option<Turbulence>,
}

impl Phase {
    fn new(name: String, index: usize, properties: PhaseProperties, n_cells: usize) -> Self {
        Self {
            name,
            index,
            properties,
            alpha: Array1::zeros(n_cells),
            velocity: Array2::zeros((n_cells, 3)),
            acceleration: Array2::zeros((n_cells, 3)),
            turbulence: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the position of this phase within its [`PhaseSet`].
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn properties(&self) -> &PhaseProperties {
        &self.properties
    }

    /// Density in kg/m³.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.properties.density.get::<kilogram_per_cubic_meter>()
    }

    /// Dynamic viscosity in Pa·s.
    #[must_use]
    pub fn viscosity(&self) -> f64 {
        self.properties.viscosity.get::<pascal_second>()
    }

    /// Kinematic viscosity in m²/s.
    #[must_use]
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity() / self.density()
    }

    /// Diameter in m.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingDiameter`] if the phase has none.
    pub fn diameter(&self) -> Result<f64, EvaluationError> {
        self.properties
            .diameter
            .map(|d| d.get::<meter>())
            .ok_or_else(|| EvaluationError::MissingDiameter(self.name.clone()))
    }

    #[must_use]
    pub fn residual_alpha(&self) -> f64 {
        self.properties.residual_alpha
    }

    /// Volume fraction per cell.
    #[must_use]
    pub fn alpha(&self) -> &ScalarField {
        &self.alpha
    }

    /// Velocity per cell.
    #[must_use]
    pub fn velocity(&self) -> &VectorField {
        &self.velocity
    }

    /// Material acceleration `DU/Dt` per cell.
    #[must_use]
    pub fn acceleration(&self) -> &VectorField {
        &self.acceleration
    }

    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingTurbulence`] if no turbulence fields are set.
    pub fn turbulence(&self) -> Result<&Turbulence, EvaluationError> {
        self.turbulence
            .as_ref()
            .ok_or_else(|| EvaluationError::MissingTurbulence(self.name.clone()))
    }

    /// Replaces the volume fraction field.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::ShapeMismatch`] if `alpha` has the wrong length.
    pub fn set_alpha(&mut self, alpha: ScalarField) -> Result<(), EvaluationError> {
        check_len("alpha", self.alpha.len(), alpha.len())?;
        self.alpha = alpha;
        Ok(())
    }

    /// Sets the same volume fraction in every cell.
    pub fn set_uniform_alpha(&mut self, alpha: f64) {
        self.alpha = uniform(self.alpha.len(), alpha);
    }

    /// Replaces the velocity field.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::ShapeMismatch`] if `velocity` is not one
    /// three-component row per cell.
    pub fn set_velocity(&mut self, velocity: VectorField) -> Result<(), EvaluationError> {
        check_vector("velocity", self.velocity.nrows(), &velocity)?;
        self.velocity = velocity;
        Ok(())
    }

    /// Replaces the material acceleration field.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::ShapeMismatch`] if `acceleration` is not
    /// one three-component row per cell.
    pub fn set_acceleration(&mut self, acceleration: VectorField) -> Result<(), EvaluationError> {
        check_vector("acceleration", self.acceleration.nrows(), &acceleration)?;
        self.acceleration = acceleration;
        Ok(())
    }

    /// Sets the turbulence fields.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::ShapeMismatch`] if either field has the wrong length.
    pub fn set_turbulence(&mut self, turbulence: Turbulence) -> Result<(), EvaluationError> {
        check_len("k", self.alpha.len(), turbulence.k.len())?;
        check_len("nut", self.alpha.len(), turbulence.nut.len())?;
        self.turbulence = Some(turbulence);
        Ok(())
    }

    /// Replaces the constant properties.
    pub fn set_properties(&mut self, properties: PhaseProperties) {
        self.properties = properties;
    }
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<(), EvaluationError> {
    if expected == found {
        Ok(())
    } else {
        Err(EvaluationError::ShapeMismatch {
            field,
            expected,
            found,
        })
    }
}

fn check_vector(
    field: &'static str,
    n_cells: usize,
    value: &VectorField,
) -> Result<(), EvaluationError> {
    check_len(field, n_cells, value.nrows())?;
    check_len(field, 3, value.ncols())
}

/// The phases of a system, in definition order.
///
/// Every phase holds fields over the same number of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseSet {
    n_cells: usize,
    phases: Vec<Phase>,
    indices: HashMap<String, usize>,
}

impl PhaseSet {
    /// Creates an empty set whose phases will hold `n_cells` values.
    #[must_use]
    pub fn new(n_cells: usize) -> Self {
        Self {
            n_cells,
            ..Self::default()
        }
    }

    /// Adds a phase with zero volume fraction and velocity, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicatePhase`] if the name is already taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        properties: PhaseProperties,
    ) -> Result<usize, ConfigError> {
        let name = name.into();
        if self.indices.contains_key(&name) {
            return Err(ConfigError::DuplicatePhase(name));
        }

        let index = self.phases.len();
        self.indices.insert(name.clone(), index);
        self.phases
            .push(Phase::new(name, index, properties, self.n_cells));
        Ok(index)
    }

    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPhase`] if no phase has this name.
    pub fn index_of(&self, name: &str) -> Result<usize, EvaluationError> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| EvaluationError::UnknownPhase(name.to_owned()))
    }

    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPhase`] if no phase has this name.
    pub fn get(&self, name: &str) -> Result<&Phase, EvaluationError> {
        let index = self.index_of(name)?;
        Ok(&self.phases[index])
    }

    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPhase`] if no phase has this name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Phase, EvaluationError> {
        let index = self.index_of(name)?;
        Ok(&mut self.phases[index])
    }

    #[must_use]
    pub fn by_index(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn by_index_mut(&mut self, index: usize) -> Option<&mut Phase> {
        self.phases.get_mut(index)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Phase> {
        self.phases.iter_mut()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.phases.iter().map(Phase::name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Returns the number of cells every phase field spans.
    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }
}
