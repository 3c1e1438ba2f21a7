use std::collections::HashMap;

use interphase_core::{ConfigError, PhasePairKey, PhaseSet};
use interphase_models::{
    BlendedInterfacialModel, BlendingConfig, DragModel, LiftModel, ModelKind,
    TurbulentDispersionModel, VirtualMassModel, WallLubricationModel, blending,
};

use crate::config::{Config, Kind, ModelEntry};

/// The blended models of one kind, keyed by unordered pair.
///
/// Iteration follows the order pairs first appear in the configuration.
#[derive(Debug)]
pub struct ModelTable<M: ?Sized> {
    models: Vec<BlendedInterfacialModel<M>>,
    index: HashMap<PhasePairKey, usize>,
}

impl<M: ModelKind + ?Sized> ModelTable<M> {
    /// Selects every model in `entries` and groups them by pair.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an entry names an unknown phase or model,
    /// is not ordered, duplicates another entry, or needs blending that is
    /// not configured.
    pub(crate) fn build(
        entries: &[ModelEntry],
        blending: Option<&BlendingConfig>,
        phases: &PhaseSet,
    ) -> Result<Self, ConfigError> {
        let mut table = Self {
            models: Vec::new(),
            index: HashMap::new(),
        };

        for entry in entries {
            let key: PhasePairKey = entry.pair.parse()?;
            if !key.is_ordered() {
                return Err(ConfigError::UnorderedModel {
                    kind: M::KIND,
                    pair: entry.pair.clone(),
                });
            }
            for phase in [key.first(), key.second()] {
                if !phases.contains(phase) {
                    return Err(ConfigError::UnknownPhase(phase.to_owned()));
                }
            }

            let model = M::select(&entry.model, &entry.coefficients)?;
            log::debug!("selected {} model `{}` for `{key}`", M::KIND, entry.model);

            let pair = key.unordered();
            let slot = match table.index.get(&pair) {
                Some(&slot) => slot,
                None => {
                    let config = blending.ok_or(ConfigError::MissingBlending { kind: M::KIND })?;
                    let method = blending::select(config, phases)?;
                    method.check_pair(&pair)?;
                    table.models.push(BlendedInterfacialModel::new(&pair, method));
                    table.index.insert(pair, table.models.len() - 1);
                    table.models.len() - 1
                }
            };
            table.models[slot].insert(&key, model)?;
        }

        Ok(table)
    }
}

impl<M: ?Sized> ModelTable<M> {
    /// Returns the model of the pair, ignoring any ordering `key` carries.
    #[must_use]
    pub fn get(&self, key: &PhasePairKey) -> Option<&BlendedInterfacialModel<M>> {
        let slot = if key.is_ordered() {
            self.index.get(&key.unordered())
        } else {
            self.index.get(key)
        };
        slot.map(|&slot| &self.models[slot])
    }

    #[must_use]
    pub fn contains(&self, key: &PhasePairKey) -> bool {
        self.get(key).is_some()
    }

    /// Returns the unordered keys of all pairs with a model.
    pub fn keys(&self) -> impl Iterator<Item = &PhasePairKey> {
        self.models.iter().map(BlendedInterfacialModel::key)
    }

    /// Returns the keys of pairs with a model that involve `phase`.
    pub fn keys_with<'a>(&'a self, phase: &str) -> impl Iterator<Item = &'a PhasePairKey> {
        self.keys().filter(move |key| key.contains(phase))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlendedInterfacialModel<M>> {
        self.models.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// One model table per kind.
#[derive(Debug)]
pub(crate) struct Registries {
    pub(crate) drag: ModelTable<dyn DragModel>,
    pub(crate) virtual_mass: ModelTable<dyn VirtualMassModel>,
    pub(crate) lift: ModelTable<dyn LiftModel>,
    pub(crate) wall_lubrication: ModelTable<dyn WallLubricationModel>,
    pub(crate) turbulent_dispersion: ModelTable<dyn TurbulentDispersionModel>,
}

impl Registries {
    pub(crate) fn build(config: &Config, phases: &PhaseSet) -> Result<Self, ConfigError> {
        Ok(Self {
            drag: table(config, Kind::Drag, phases)?,
            virtual_mass: table(config, Kind::VirtualMass, phases)?,
            lift: table(config, Kind::Lift, phases)?,
            wall_lubrication: table(config, Kind::WallLubrication, phases)?,
            turbulent_dispersion: table(config, Kind::TurbulentDispersion, phases)?,
        })
    }

    /// Returns whether a model of `kind` is registered for the pair.
    pub(crate) fn contains(&self, kind: Kind, key: &PhasePairKey) -> bool {
        match kind {
            Kind::Drag => self.drag.contains(key),
            Kind::VirtualMass => self.virtual_mass.contains(key),
            Kind::Lift => self.lift.contains(key),
            Kind::WallLubrication => self.wall_lubrication.contains(key),
            Kind::TurbulentDispersion => self.turbulent_dispersion.contains(key),
        }
    }

    /// Returns the unordered keys of pairs with a lift or wall lubrication model.
    pub(crate) fn force_pairs(&self) -> Vec<&PhasePairKey> {
        let mut keys: Vec<_> = self.lift.keys().collect();
        for key in self.wall_lubrication.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

fn table<M: ModelKind + ?Sized>(
    config: &Config,
    kind: Kind,
    phases: &PhaseSet,
) -> Result<ModelTable<M>, ConfigError> {
    ModelTable::build(config.models(kind), config.blending_for(kind), phases)
}
