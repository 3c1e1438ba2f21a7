use interphase_core::{EvaluationError, FieldOps, Mesh, PhasePairKey, ScalarField, VectorField};

use super::MomentumTransferSystem;
use crate::per_phase::PerPhase;

impl<M: Mesh> MomentumTransferSystem<M> {
    /// Returns the lift and wall lubrication force of a pair, in cells.
    ///
    /// The force acts on the first phase of the pair (the one defined first)
    /// and with opposite sign on the second.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `key` is not a pair of the system or
    /// a model cannot be evaluated.
    pub fn combined_force(&self, key: &PhasePairKey) -> Result<&VectorField, EvaluationError> {
        self.cached_pair(&self.cache.combined_force, key, "combined force", |pair| {
            let mut force = VectorField::zeroed(self.mesh.n_cells());
            if let Some(model) = self.registries.lift.get(key) {
                force += &model.f(pair)?;
            }
            if let Some(model) = self.registries.wall_lubrication.get(key) {
                force += &model.f(pair)?;
            }
            Ok(force)
        })
    }

    /// Returns the face flux of the lift and wall lubrication force of a pair.
    ///
    /// # Errors
    ///
    /// See [`combined_force`](Self::combined_force).
    pub fn combined_face_force(
        &self,
        key: &PhasePairKey,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_pair(&self.cache.combined_face_force, key, "combined face force", |pair| {
            let mut flux = ScalarField::zeroed(self.mesh.n_faces());
            if let Some(model) = self.registries.lift.get(key) {
                flux += &model.ff(pair)?;
            }
            if let Some(model) = self.registries.wall_lubrication.get(key) {
                flux += &model.ff(pair)?;
            }
            Ok(flux)
        })
    }

    /// Returns the net lift and wall lubrication force on each phase.
    ///
    /// Phases without such a force have no entry.
    ///
    /// # Errors
    ///
    /// Returns the first error from evaluating a pair's force.
    pub fn combined_forces(&self) -> Result<&PerPhase<VectorField>, EvaluationError> {
        self.cache.forces.get_or_try_init(|| {
            log::trace!("computing combined forces");
            let n = self.mesh.n_cells();
            let mut forces = PerPhase::new(&self.phases);
            for key in self.registries.force_pairs() {
                let force = self.combined_force(key)?;
                let pair = self.pair(key)?;
                *forces.entry(pair.phase1().index(), || VectorField::zeroed(n)) += force;
                *forces.entry(pair.phase2().index(), || VectorField::zeroed(n)) -= force;
            }
            Ok(forces)
        })
    }

    /// Face counterpart of [`combined_forces`](Self::combined_forces).
    ///
    /// # Errors
    ///
    /// Returns the first error from evaluating a pair's face force.
    pub fn combined_face_forces(&self) -> Result<&PerPhase<ScalarField>, EvaluationError> {
        self.cache.face_forces.get_or_try_init(|| {
            log::trace!("computing combined face forces");
            let n = self.mesh.n_faces();
            let mut fluxes = PerPhase::new(&self.phases);
            for key in self.registries.force_pairs() {
                let flux = self.combined_face_force(key)?;
                let pair = self.pair(key)?;
                *fluxes.entry(pair.phase1().index(), || ScalarField::zeroed(n)) += flux;
                *fluxes.entry(pair.phase2().index(), || ScalarField::zeroed(n)) -= flux;
            }
            Ok(fluxes)
        })
    }

    /// Returns the turbulent diffusivity `D` of a pair, in cells.
    ///
    /// # Errors
    ///
    /// See [`combined_force`](Self::combined_force).
    pub fn turbulent_diffusivity(
        &self,
        key: &PhasePairKey,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_pair(
            &self.cache.turbulent_diffusivity,
            key,
            "turbulent diffusivity",
            |pair| match self.registries.turbulent_dispersion.get(key) {
                Some(model) => model.d(pair),
                None => Ok(self.zero_cells()),
            },
        )
    }

    /// Returns the turbulent dispersion face flux of each phase.
    ///
    /// `r_aus` holds the reciprocal of each phase's momentum matrix diagonal
    /// in cells, indexed like the phase set. For a pair with diffusivity `D`
    /// the flux is `interp(rAU D) snGrad(alpha1) |Sf|`, added to the first
    /// phase and subtracted from the second. The result is not cached.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::PhaseCount`] or
    /// [`EvaluationError::ShapeMismatch`] if `r_aus` does not have one cell
    /// field per phase, or any error from evaluating a diffusivity.
    pub fn turbulent_dispersion_fluxes(
        &self,
        r_aus: &[ScalarField],
    ) -> Result<PerPhase<ScalarField>, EvaluationError> {
        self.check_per_phase(r_aus, "rAU", self.mesh.n_cells())?;
        self.dispersion_fluxes(|index, d, sn_grad| {
            self.mesh.interpolate(&(&r_aus[index] * d)) * sn_grad
        })
    }

    /// Returns the turbulent dispersion face flux of each phase from face
    /// values of the reciprocal diagonal.
    ///
    /// The flux is `rAUf interp(D) snGrad(alpha1) |Sf|`.
    ///
    /// # Errors
    ///
    /// See [`turbulent_dispersion_fluxes`](Self::turbulent_dispersion_fluxes).
    pub fn face_turbulent_dispersion_fluxes(
        &self,
        r_aufs: &[ScalarField],
    ) -> Result<PerPhase<ScalarField>, EvaluationError> {
        self.check_per_phase(r_aufs, "rAUf", self.mesh.n_faces())?;
        self.dispersion_fluxes(|index, d, sn_grad| {
            &r_aufs[index] * &(self.mesh.interpolate(d) * sn_grad)
        })
    }

    fn dispersion_fluxes(
        &self,
        flux: impl Fn(usize, &ScalarField, &ScalarField) -> ScalarField,
    ) -> Result<PerPhase<ScalarField>, EvaluationError> {
        let n = self.mesh.n_faces();
        let mut fluxes = PerPhase::new(&self.phases);
        for key in self.registries.turbulent_dispersion.keys() {
            let d = self.turbulent_diffusivity(key)?;
            let pair = self.pair(key)?;
            let (phase1, phase2) = (pair.phase1().index(), pair.phase2().index());
            let sn_grad = self.mesh.sn_grad(pair.phase1().alpha()) * &self.mesh.face_areas();

            *fluxes.entry(phase1, || ScalarField::zeroed(n)) += &flux(phase1, d, &sn_grad);
            *fluxes.entry(phase2, || ScalarField::zeroed(n)) -= &flux(phase2, d, &sn_grad);
        }
        Ok(fluxes)
    }

    fn check_per_phase(
        &self,
        fields: &[ScalarField],
        field: &'static str,
        expected: usize,
    ) -> Result<(), EvaluationError> {
        if fields.len() != self.phases.len() {
            return Err(EvaluationError::PhaseCount {
                expected: self.phases.len(),
                found: fields.len(),
            });
        }
        match fields.iter().find(|values| values.len() != expected) {
            Some(values) => Err(EvaluationError::ShapeMismatch {
                field,
                expected,
                found: values.len(),
            }),
            None => Ok(()),
        }
    }
}
