use interphase_core::{EvaluationError, Mesh, Phase, field::scale};

use super::MomentumTransferSystem;
use crate::{matrix::MomentumTransferMatrix, per_phase::PerPhase};

impl<M: Mesh> MomentumTransferSystem<M> {
    /// Assembles the interfacial momentum transfer of every phase.
    ///
    /// Drag and virtual mass enter implicitly, with the partner's
    /// acceleration coupling recorded explicitly. Lift, wall lubrication,
    /// and turbulent dispersion (`-D grad(alpha1)` on the first phase of a
    /// pair) enter the explicit source. Every phase gets a matrix, zero if
    /// it takes part in no model.
    ///
    /// # Errors
    ///
    /// Returns the first error from evaluating a coefficient or force.
    pub fn momentum_transfer(&self) -> Result<PerPhase<MomentumTransferMatrix>, EvaluationError> {
        let mut matrices = Matrices {
            matrices: PerPhase::new(&self.phases),
            n_cells: self.mesh.n_cells(),
        };
        for phase in self.phases.iter() {
            matrices.of(phase);
        }

        for key in self.registries.drag.keys() {
            let k = self.drag_coefficient(key)?;
            let pair = self.pair(key)?;
            matrices.of(pair.phase1()).add_drag(pair.phase2().name(), k);
            matrices.of(pair.phase2()).add_drag(pair.phase1().name(), k);
        }

        for key in self.registries.virtual_mass.keys() {
            let vm = self.virtual_mass_coefficient(key)?;
            let pair = self.pair(key)?;
            let (phase1, phase2) = (pair.phase1(), pair.phase2());
            matrices
                .of(phase1)
                .add_virtual_mass(phase2.name(), vm, phase2.acceleration());
            matrices
                .of(phase2)
                .add_virtual_mass(phase1.name(), vm, phase1.acceleration());
        }

        for (name, force) in self.combined_forces()?.present() {
            matrices.of(self.phases.get(name)?).add_source(force);
        }

        for key in self.registries.turbulent_dispersion.keys() {
            let d = self.turbulent_diffusivity(key)?;
            let pair = self.pair(key)?;
            let force = scale(&self.mesh.grad(pair.phase1().alpha()), d);
            matrices.of(pair.phase1()).subtract_source(&force);
            matrices.of(pair.phase2()).add_source(&force);
        }

        log::trace!("assembled momentum transfer for {} phases", self.phases.len());
        Ok(matrices.matrices)
    }
}

struct Matrices {
    matrices: PerPhase<MomentumTransferMatrix>,
    n_cells: usize,
}

impl Matrices {
    fn of(&mut self, phase: &Phase) -> &mut MomentumTransferMatrix {
        let n_cells = self.n_cells;
        self.matrices.entry(phase.index(), || {
            MomentumTransferMatrix::new(phase.name(), n_cells)
        })
    }
}
