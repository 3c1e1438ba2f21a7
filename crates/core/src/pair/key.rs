use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Identifies a pair of distinct phases.
///
/// An unordered key `a and b` compares and hashes the same regardless of the
/// order its phases were given in. An ordered key `a in b` names `a` as the
/// dispersed phase and `b` as the continuous phase, and is distinct from both
/// `b in a` and `a and b`; [`PhasePairKey::unordered`] recovers the pair it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhasePairKey {
    first: String,
    second: String,
    ordered: bool,
}

impl PhasePairKey {
    /// Creates an unordered key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SelfPair`] if both names are the same.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Result<Self, ConfigError> {
        let (a, b) = (a.into(), b.into());
        if a == b {
            return Err(ConfigError::SelfPair(a));
        }
        Ok(Self::from_distinct(a, b))
    }

    /// Creates an ordered key for `dispersed` in `continuous`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SelfPair`] if both names are the same.
    pub fn ordered(
        dispersed: impl Into<String>,
        continuous: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let (dispersed, continuous) = (dispersed.into(), continuous.into());
        if dispersed == continuous {
            return Err(ConfigError::SelfPair(dispersed));
        }
        Ok(Self::ordered_from_distinct(dispersed, continuous))
    }

    pub(crate) fn ordered_from_distinct(dispersed: String, continuous: String) -> Self {
        Self {
            first: dispersed,
            second: continuous,
            ordered: true,
        }
    }

    pub(crate) fn from_distinct(a: String, b: String) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            ordered: false,
        }
    }

    /// The dispersed phase of an ordered key, or the lesser name otherwise.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }

    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Returns the unordered key of the same two phases.
    #[must_use]
    pub fn unordered(&self) -> Self {
        if self.ordered {
            Self::from_distinct(self.first.clone(), self.second.clone())
        } else {
            self.clone()
        }
    }

    #[must_use]
    pub fn contains(&self, phase: &str) -> bool {
        self.first == phase || self.second == phase
    }

    /// Returns the partner of `phase`, if `phase` belongs to this pair.
    #[must_use]
    pub fn other(&self, phase: &str) -> Option<&str> {
        if self.first == phase {
            Some(&self.second)
        } else if self.second == phase {
            Some(&self.first)
        } else {
            None
        }
    }

    #[must_use]
    pub fn dispersed(&self) -> Option<&str> {
        self.ordered.then_some(self.first.as_str())
    }

    #[must_use]
    pub fn continuous(&self) -> Option<&str> {
        self.ordered.then_some(self.second.as_str())
    }
}

impl fmt::Display for PhasePairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.ordered { "in" } else { "and" };
        write!(f, "{} {separator} {}", self.first, self.second)
    }
}

/// Parses `<a> in <b>` as an ordered key and `<a> and <b>` as an unordered one.
impl FromStr for PhasePairKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPair(s.to_owned());

        let mut words = s.split_whitespace();
        let (Some(a), Some(separator), Some(b), None) =
            (words.next(), words.next(), words.next(), words.next())
        else {
            return Err(invalid());
        };

        match separator {
            "in" => Self::ordered(a, b),
            "and" => Self::new(a, b),
            _ => Err(invalid()),
        }
    }
}
