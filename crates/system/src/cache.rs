use std::collections::HashMap;

use interphase_core::{EvaluationError, PhasePairKey, ScalarField, VectorField};
use once_cell::unsync::OnceCell;

use crate::per_phase::PerPhase;

/// Lazily computed values for every unordered pair of the phase set.
#[derive(Debug)]
pub(crate) struct PairCache<T> {
    cells: HashMap<PhasePairKey, OnceCell<T>>,
}

impl<T> PairCache<T> {
    fn new(pairs: &[PhasePairKey]) -> Self {
        Self {
            cells: pairs.iter().map(|key| (key.clone(), OnceCell::new())).collect(),
        }
    }

    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPair`] if `key` is not a pair of the phase set.
    pub(crate) fn cell(&self, key: &PhasePairKey) -> Result<&OnceCell<T>, EvaluationError> {
        self.cells
            .get(key)
            .ok_or_else(|| EvaluationError::UnknownPair(key.to_string()))
    }

    fn clear(&mut self) {
        for cell in self.cells.values_mut() {
            cell.take();
        }
    }
}

/// Lazily computed values for every phase, by phase index.
#[derive(Debug)]
pub(crate) struct PhaseCache<T> {
    cells: Vec<OnceCell<T>>,
}

impl<T> PhaseCache<T> {
    fn new(n_phases: usize) -> Self {
        Self {
            cells: (0..n_phases).map(|_| OnceCell::new()).collect(),
        }
    }

    pub(crate) fn cell(&self, index: usize) -> &OnceCell<T> {
        &self.cells[index]
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.take();
        }
    }
}

/// Every derived field of one time step.
#[derive(Debug)]
pub(crate) struct Cache {
    pub(crate) drag: PairCache<ScalarField>,
    pub(crate) face_drag: PairCache<ScalarField>,
    pub(crate) virtual_mass: PairCache<ScalarField>,
    pub(crate) face_virtual_mass: PairCache<ScalarField>,
    pub(crate) combined_force: PairCache<VectorField>,
    pub(crate) combined_face_force: PairCache<ScalarField>,
    pub(crate) turbulent_diffusivity: PairCache<ScalarField>,

    pub(crate) phase_drag: PhaseCache<ScalarField>,
    pub(crate) phase_face_drag: PhaseCache<ScalarField>,
    pub(crate) phase_virtual_mass: PhaseCache<ScalarField>,
    pub(crate) phase_face_virtual_mass: PhaseCache<ScalarField>,

    pub(crate) forces: OnceCell<PerPhase<VectorField>>,
    pub(crate) face_forces: OnceCell<PerPhase<ScalarField>>,
}

impl Cache {
    pub(crate) fn new(pairs: &[PhasePairKey], n_phases: usize) -> Self {
        Self {
            drag: PairCache::new(pairs),
            face_drag: PairCache::new(pairs),
            virtual_mass: PairCache::new(pairs),
            face_virtual_mass: PairCache::new(pairs),
            combined_force: PairCache::new(pairs),
            combined_face_force: PairCache::new(pairs),
            turbulent_diffusivity: PairCache::new(pairs),
            phase_drag: PhaseCache::new(n_phases),
            phase_face_drag: PhaseCache::new(n_phases),
            phase_virtual_mass: PhaseCache::new(n_phases),
            phase_face_virtual_mass: PhaseCache::new(n_phases),
            forces: OnceCell::new(),
            face_forces: OnceCell::new(),
        }
    }

    /// Discards every cached value.
    pub(crate) fn clear(&mut self) {
        for pairs in [
            &mut self.drag,
            &mut self.face_drag,
            &mut self.virtual_mass,
            &mut self.face_virtual_mass,
            &mut self.combined_face_force,
            &mut self.turbulent_diffusivity,
        ] {
            pairs.clear();
        }
        self.combined_force.clear();

        for phases in [
            &mut self.phase_drag,
            &mut self.phase_face_drag,
            &mut self.phase_virtual_mass,
            &mut self.phase_face_virtual_mass,
        ] {
            phases.clear();
        }

        self.forces.take();
        self.face_forces.take();
    }
}
