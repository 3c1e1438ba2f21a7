//! The momentum transfer phase system.

mod build;
mod forces;
mod transfer;

use std::collections::HashMap;

use interphase_core::{
    ConfigError, EvaluationError, FieldOps, Mesh, PhasePair, PhasePairKey, PhaseSet, ScalarField,
};
use interphase_models::{
    DragModel, LiftModel, TurbulentDispersionModel, VirtualMassModel, WallLubricationModel,
};

use crate::{
    cache::{Cache, PairCache, PhaseCache},
    config::Config,
    error::Error,
    registry::{ModelTable, Registries},
};

/// Interfacial momentum transfer between the phases of a multiphase flow.
///
/// The system owns the phases and one table of blended closure models per
/// model kind. Coefficients and forces are computed on first request and
/// cached until [`new_time_step`](Self::new_time_step), so repeated queries
/// within a time step return the same field.
///
/// Queries about a pair accept its key in either orientation. Pairs without
/// a model of the requested kind contribute zero.
#[derive(Debug)]
pub struct MomentumTransferSystem<M: Mesh> {
    mesh: M,
    config: Config,
    phases: PhaseSet,
    pairs: Vec<PhasePairKey>,
    gravity: [f64; 3],
    surface_tension: HashMap<PhasePairKey, f64>,
    registries: Registries,
    cache: Cache,
}

impl<M: Mesh> MomentumTransferSystem<M> {
    /// Builds the phases and selects every configured model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is inconsistent, names
    /// an unknown model or phase, or lacks a model a pair requires.
    pub fn new(mesh: M, config: Config) -> Result<Self, ConfigError> {
        let phases = build::phase_set(&config, mesh.n_cells())?;
        let pairs = build::all_pairs(&phases)?;
        let setup = build::setup(&config, &phases)?;

        log::info!(
            "momentum transfer system with {} phases: {} drag, {} virtual mass, {} lift, \
             {} wall lubrication, {} turbulent dispersion pairs",
            phases.len(),
            setup.registries.drag.len(),
            setup.registries.virtual_mass.len(),
            setup.registries.lift.len(),
            setup.registries.wall_lubrication.len(),
            setup.registries.turbulent_dispersion.len(),
        );

        Ok(Self {
            cache: Cache::new(&pairs, phases.len()),
            mesh,
            config,
            phases,
            pairs,
            gravity: setup.gravity,
            surface_tension: setup.surface_tension,
            registries: setup.registries,
        })
    }

    /// Parses a TOML configuration and builds the system from it.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the text does not parse or the configuration
    /// is rejected by [`new`](Self::new).
    pub fn from_toml_str(mesh: M, s: &str) -> Result<Self, Error> {
        Ok(Self::new(mesh, Config::from_toml_str(s)?)?)
    }

    /// Re-reads the configuration, keeping the phase set and its fields.
    ///
    /// Returns `false` without touching anything if `config` equals the
    /// current configuration. Otherwise phase properties, gravity, surface
    /// tension, and every model are replaced and the cache is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PhaseSetChanged`] if `config` defines different
    /// phases, or any error [`new`](Self::new) would report. On error the
    /// system is left unchanged.
    pub fn read(&mut self, config: Config) -> Result<bool, ConfigError> {
        if config == self.config {
            log::debug!("configuration unchanged");
            return Ok(false);
        }

        let staged = build::phase_set(&config, self.mesh.n_cells())?;
        if !config.phase_names().eq(self.config.phase_names()) {
            return Err(ConfigError::PhaseSetChanged);
        }
        let setup = build::setup(&config, &staged)?;

        for (phase, staged) in self.phases.iter_mut().zip(staged.iter()) {
            phase.set_properties(*staged.properties());
        }
        self.gravity = setup.gravity;
        self.surface_tension = setup.surface_tension;
        self.registries = setup.registries;
        self.config = config;
        self.cache.clear();

        log::info!("momentum transfer configuration re-read");
        Ok(true)
    }

    /// Parses a TOML configuration and re-reads it.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the text does not parse or
    /// [`read`](Self::read) rejects the configuration.
    pub fn read_toml_str(&mut self, s: &str) -> Result<bool, Error> {
        Ok(self.read(Config::from_toml_str(s)?)?)
    }

    /// Discards every cached coefficient and force.
    ///
    /// Returns the phases so their fields can be updated for the new step.
    pub fn new_time_step(&mut self) -> &mut PhaseSet {
        log::trace!("new time step, clearing momentum transfer cache");
        self.cache.clear();
        &mut self.phases
    }

    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    pub fn phases(&self) -> &PhaseSet {
        &self.phases
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns every unordered pair of the phase set.
    pub fn pairs(&self) -> &[PhasePairKey] {
        &self.pairs
    }

    pub fn gravity(&self) -> [f64; 3] {
        self.gravity
    }

    /// Returns the pair of `key`, with gravity and surface tension attached.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPhase`] if `key` names a phase that
    /// is not part of the system.
    pub fn pair(&self, key: &PhasePairKey) -> Result<PhasePair<'_>, EvaluationError> {
        let pair = PhasePair::new(&self.phases, key, &self.mesh)?;
        let sigma = self.surface_tension.get(&pair.key()).copied();
        Ok(pair.with_gravity(self.gravity).with_surface_tension(sigma))
    }

    pub fn drag_models(&self) -> &ModelTable<dyn DragModel> {
        &self.registries.drag
    }

    pub fn virtual_mass_models(&self) -> &ModelTable<dyn VirtualMassModel> {
        &self.registries.virtual_mass
    }

    pub fn lift_models(&self) -> &ModelTable<dyn LiftModel> {
        &self.registries.lift
    }

    pub fn wall_lubrication_models(&self) -> &ModelTable<dyn WallLubricationModel> {
        &self.registries.wall_lubrication
    }

    pub fn turbulent_dispersion_models(&self) -> &ModelTable<dyn TurbulentDispersionModel> {
        &self.registries.turbulent_dispersion
    }

    /// Returns the drag coefficient `K` of a pair, in cells.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if `key` is not a pair of the system or
    /// a model cannot be evaluated.
    pub fn drag_coefficient(&self, key: &PhasePairKey) -> Result<&ScalarField, EvaluationError> {
        self.cached_pair(&self.cache.drag, key, "drag coefficient", |pair| {
            match self.registries.drag.get(key) {
                Some(model) => model.k(pair),
                None => Ok(self.zero_cells()),
            }
        })
    }

    /// Returns the drag coefficient of a pair on faces.
    ///
    /// # Errors
    ///
    /// See [`drag_coefficient`](Self::drag_coefficient).
    pub fn face_drag_coefficient(
        &self,
        key: &PhasePairKey,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_pair(&self.cache.face_drag, key, "face drag coefficient", |pair| {
            match self.registries.drag.get(key) {
                Some(model) => model.kf(pair),
                None => Ok(self.zero_faces()),
            }
        })
    }

    /// Returns the virtual mass coefficient `Vm` of a pair, in cells.
    ///
    /// # Errors
    ///
    /// See [`drag_coefficient`](Self::drag_coefficient).
    pub fn virtual_mass_coefficient(
        &self,
        key: &PhasePairKey,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_pair(&self.cache.virtual_mass, key, "virtual mass coefficient", |pair| {
            match self.registries.virtual_mass.get(key) {
                Some(model) => model.k(pair),
                None => Ok(self.zero_cells()),
            }
        })
    }

    /// Returns the virtual mass coefficient of a pair on faces.
    ///
    /// # Errors
    ///
    /// See [`drag_coefficient`](Self::drag_coefficient).
    pub fn face_virtual_mass_coefficient(
        &self,
        key: &PhasePairKey,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_pair(
            &self.cache.face_virtual_mass,
            key,
            "face virtual mass coefficient",
            |pair| match self.registries.virtual_mass.get(key) {
                Some(model) => model.kf(pair),
                None => Ok(self.zero_faces()),
            },
        )
    }

    /// Returns the sum of the drag coefficients of every pair containing `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnknownPhase`] if `phase` is not defined, or
    /// any error from evaluating a pair's coefficient.
    pub fn phase_drag_coefficient(&self, phase: &str) -> Result<&ScalarField, EvaluationError> {
        self.cached_phase(&self.cache.phase_drag, phase, "drag coefficient", || {
            sum_fields(
                self.registries.drag.keys_with(phase),
                self.mesh.n_cells(),
                |key| self.drag_coefficient(key),
            )
        })
    }

    /// Face counterpart of [`phase_drag_coefficient`](Self::phase_drag_coefficient).
    ///
    /// # Errors
    ///
    /// See [`phase_drag_coefficient`](Self::phase_drag_coefficient).
    pub fn phase_face_drag_coefficient(
        &self,
        phase: &str,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_phase(&self.cache.phase_face_drag, phase, "face drag coefficient", || {
            sum_fields(
                self.registries.drag.keys_with(phase),
                self.mesh.n_faces(),
                |key| self.face_drag_coefficient(key),
            )
        })
    }

    /// Returns the sum of the virtual mass coefficients of every pair
    /// containing `phase`.
    ///
    /// # Errors
    ///
    /// See [`phase_drag_coefficient`](Self::phase_drag_coefficient).
    pub fn phase_virtual_mass_coefficient(
        &self,
        phase: &str,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_phase(
            &self.cache.phase_virtual_mass,
            phase,
            "virtual mass coefficient",
            || {
                sum_fields(
                    self.registries.virtual_mass.keys_with(phase),
                    self.mesh.n_cells(),
                    |key| self.virtual_mass_coefficient(key),
                )
            },
        )
    }

    /// Face counterpart of
    /// [`phase_virtual_mass_coefficient`](Self::phase_virtual_mass_coefficient).
    ///
    /// # Errors
    ///
    /// See [`phase_drag_coefficient`](Self::phase_drag_coefficient).
    pub fn phase_face_virtual_mass_coefficient(
        &self,
        phase: &str,
    ) -> Result<&ScalarField, EvaluationError> {
        self.cached_phase(
            &self.cache.phase_face_virtual_mass,
            phase,
            "face virtual mass coefficient",
            || {
                sum_fields(
                    self.registries.virtual_mass.keys_with(phase),
                    self.mesh.n_faces(),
                    |key| self.face_virtual_mass_coefficient(key),
                )
            },
        )
    }

    /// Returns the drag coefficient of every pair with a drag model.
    ///
    /// # Errors
    ///
    /// Returns the first error from evaluating a coefficient.
    pub fn drag_coefficients(
        &self,
    ) -> Result<Vec<(&PhasePairKey, &ScalarField)>, EvaluationError> {
        self.registries
            .drag
            .keys()
            .map(|key| self.drag_coefficient(key).map(|field| (key, field)))
            .collect()
    }

    /// Returns the virtual mass coefficient of every pair with a virtual mass model.
    ///
    /// # Errors
    ///
    /// Returns the first error from evaluating a coefficient.
    pub fn virtual_mass_coefficients(
        &self,
    ) -> Result<Vec<(&PhasePairKey, &ScalarField)>, EvaluationError> {
        self.registries
            .virtual_mass
            .keys()
            .map(|key| self.virtual_mass_coefficient(key).map(|field| (key, field)))
            .collect()
    }

    /// Face counterpart of [`drag_coefficients`](Self::drag_coefficients).
    ///
    /// # Errors
    ///
    /// Returns the first error from evaluating a coefficient.
    pub fn face_drag_coefficients(
        &self,
    ) -> Result<Vec<(&PhasePairKey, &ScalarField)>, EvaluationError> {
        self.registries
            .drag
            .keys()
            .map(|key| self.face_drag_coefficient(key).map(|field| (key, field)))
            .collect()
    }

    /// Face counterpart of [`virtual_mass_coefficients`](Self::virtual_mass_coefficients).
    ///
    /// # Errors
    ///
    /// Returns the first error from evaluating a coefficient.
    pub fn face_virtual_mass_coefficients(
        &self,
    ) -> Result<Vec<(&PhasePairKey, &ScalarField)>, EvaluationError> {
        self.registries
            .virtual_mass
            .keys()
            .map(|key| self.face_virtual_mass_coefficient(key).map(|field| (key, field)))
            .collect()
    }

    /// Returns the cached value of a pair, computing it on first access.
    fn cached_pair<'s, T>(
        &'s self,
        cache: &'s PairCache<T>,
        key: &PhasePairKey,
        quantity: &str,
        compute: impl FnOnce(&PhasePair<'s>) -> Result<T, EvaluationError>,
    ) -> Result<&'s T, EvaluationError> {
        let key = key.unordered();
        cache.cell(&key)?.get_or_try_init(|| {
            log::trace!("computing {quantity} for `{key}`");
            compute(&self.pair(&key)?)
        })
    }

    /// Returns the cached value of a phase, computing it on first access.
    fn cached_phase<'s, T>(
        &'s self,
        cache: &'s PhaseCache<T>,
        phase: &str,
        quantity: &str,
        compute: impl FnOnce() -> Result<T, EvaluationError>,
    ) -> Result<&'s T, EvaluationError> {
        let index = self.phases.index_of(phase)?;
        cache.cell(index).get_or_try_init(|| {
            log::trace!("computing {quantity} for phase `{phase}`");
            compute()
        })
    }

    fn zero_cells(&self) -> ScalarField {
        ScalarField::zeroed(self.mesh.n_cells())
    }

    fn zero_faces(&self) -> ScalarField {
        ScalarField::zeroed(self.mesh.n_faces())
    }
}

fn sum_fields<'k, 's>(
    keys: impl Iterator<Item = &'k PhasePairKey>,
    len: usize,
    field: impl Fn(&'k PhasePairKey) -> Result<&'s ScalarField, EvaluationError>,
) -> Result<ScalarField, EvaluationError> {
    let mut total = ScalarField::zeroed(len);
    for key in keys {
        total += field(key)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests;
