use interphase_core::PhaseSet;

/// One optional entry per phase, in phase definition order.
///
/// Entries are filled only for phases that receive a contribution, so an
/// absent entry means "nothing", not zero-filled storage.
#[derive(Debug, Clone, PartialEq)]
pub struct PerPhase<T> {
    names: Vec<String>,
    entries: Vec<Option<T>>,
}

impl<T> PerPhase<T> {
    pub(crate) fn new(phases: &PhaseSet) -> Self {
        Self {
            names: phases.names().map(str::to_owned).collect(),
            entries: phases.iter().map(|_| None).collect(),
        }
    }

    /// Returns the entry of the named phase, if it has one.
    #[must_use]
    pub fn get(&self, phase: &str) -> Option<&T> {
        let index = self.names.iter().position(|name| name == phase)?;
        self.get_index(index)
    }

    /// Returns the entry of the phase at `index`, if it has one.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.entries.get(index)?.as_ref()
    }

    /// Iterates over phase names and their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&T>)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.entries.iter().map(Option::as_ref))
    }

    /// Iterates over the phases that have an entry.
    pub fn present(&self) -> impl Iterator<Item = (&str, &T)> {
        self.iter()
            .filter_map(|(name, entry)| entry.map(|entry| (name, entry)))
    }

    /// Returns the number of phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the entry at `index`, creating it with `init` if absent.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub(crate) fn entry(&mut self, index: usize, init: impl FnOnce() -> T) -> &mut T {
        self.entries[index].get_or_insert_with(init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use interphase_core::{ConfigError, PhaseProperties};
    use uom::si::{
        dynamic_viscosity::pascal_second,
        f64::{DynamicViscosity, MassDensity},
        mass_density::kilogram_per_cubic_meter,
    };

    #[test]
    fn lazily_filled_entries() -> Result<(), ConfigError> {
        let props = PhaseProperties::new(
            MassDensity::new::<kilogram_per_cubic_meter>(1.0),
            DynamicViscosity::new::<pascal_second>(1.0),
        );
        let mut phases = PhaseSet::new(1);
        for name in ["a", "b", "c"] {
            phases.insert(name, props)?;
        }

        let mut counts: PerPhase<u32> = PerPhase::new(&phases);
        *counts.entry(2, || 0) += 1;
        *counts.entry(2, || 0) += 1;

        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get("a"), None);
        assert_eq!(counts.get("c"), Some(&2));
        assert_eq!(counts.get("d"), None);
        assert_eq!(counts.present().collect::<Vec<_>>(), [("c", &2)]);
        assert_eq!(
            counts.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );

        Ok(())
    }
}
