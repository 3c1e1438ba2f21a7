use std::collections::BTreeMap;

use interphase_core::{
    EvaluationError, ScalarField, VectorField,
    field::{scale, uniform},
};
use ndarray::{Array1, Array2};

/// The interfacial momentum transfer contribution to one phase's momentum equation.
///
/// The transfer per unit volume, given the phase's velocity `U` and
/// material acceleration `DU/Dt`, is
///
/// ```text
/// −Kd U − Vm DU/Dt + S
/// ```
///
/// where `Kd` and `Vm` are implicit coefficients summed over the phase's
/// pairs and `S` collects explicit sources: the virtual mass coupling
/// `Vm DU_other/Dt`, lift and wall lubrication forces, and turbulent
/// dispersion. The explicit part of drag, `Kd U_other`, is never included;
/// it belongs to the pressure-velocity coupling.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumTransferMatrix {
    phase: String,
    drag: ScalarField,
    virtual_mass: ScalarField,
    source: VectorField,
    couplings: BTreeMap<String, Coupling>,
}

/// The implicit coefficients between a phase and one partner phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupling {
    pub drag: ScalarField,
    pub virtual_mass: ScalarField,
}

impl MomentumTransferMatrix {
    pub(crate) fn new(phase: &str, n_cells: usize) -> Self {
        Self {
            phase: phase.to_owned(),
            drag: Array1::zeros(n_cells),
            virtual_mass: Array1::zeros(n_cells),
            source: Array2::zeros((n_cells, 3)),
            couplings: BTreeMap::new(),
        }
    }

    /// Name of the phase this contribution belongs to.
    #[must_use]
    pub fn phase(&self) -> &str {
        &self.phase
    }

    /// Implicit drag coefficient on the phase's own velocity.
    #[must_use]
    pub fn implicit_drag(&self) -> &ScalarField {
        &self.drag
    }

    /// Implicit virtual mass coefficient on the phase's own acceleration.
    #[must_use]
    pub fn implicit_virtual_mass(&self) -> &ScalarField {
        &self.virtual_mass
    }

    /// Explicit source per cell.
    #[must_use]
    pub fn source(&self) -> &VectorField {
        &self.source
    }

    /// Returns the implicit coupling with `partner`, if they share a model.
    #[must_use]
    pub fn coupling(&self, partner: &str) -> Option<&Coupling> {
        self.couplings.get(partner)
    }

    /// Returns the partner phases this phase is coupled to.
    pub fn partners(&self) -> impl Iterator<Item = &str> {
        self.couplings.keys().map(String::as_str)
    }

    /// Evaluates the transfer for a given velocity and acceleration of this phase.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::ShapeMismatch`] if either field has the
    /// wrong number of cells.
    pub fn evaluate(
        &self,
        velocity: &VectorField,
        acceleration: &VectorField,
    ) -> Result<VectorField, EvaluationError> {
        let n = self.drag.len();
        for (field, value) in [("velocity", velocity), ("acceleration", acceleration)] {
            if value.nrows() != n {
                return Err(EvaluationError::ShapeMismatch {
                    field,
                    expected: n,
                    found: value.nrows(),
                });
            }
        }

        Ok(&self.source - &scale(velocity, &self.drag) - &scale(acceleration, &self.virtual_mass))
    }

    pub(crate) fn add_drag(&mut self, partner: &str, k: &ScalarField) {
        self.drag += k;
        self.coupling_mut(partner).drag += k;
    }

    /// Adds `Vm` implicitly and `Vm DU_partner/Dt` explicitly.
    pub(crate) fn add_virtual_mass(
        &mut self,
        partner: &str,
        vm: &ScalarField,
        partner_acceleration: &VectorField,
    ) {
        self.virtual_mass += vm;
        self.source += &scale(partner_acceleration, vm);
        self.coupling_mut(partner).virtual_mass += vm;
    }

    pub(crate) fn add_source(&mut self, source: &VectorField) {
        self.source += source;
    }

    pub(crate) fn subtract_source(&mut self, source: &VectorField) {
        self.source -= source;
    }

    fn coupling_mut(&mut self, partner: &str) -> &mut Coupling {
        let n = self.drag.len();
        self.couplings
            .entry(partner.to_owned())
            .or_insert_with(|| Coupling {
                drag: uniform(n, 0.0),
                virtual_mass: uniform(n, 0.0),
            })
    }
}
