//! Key registry
//!
//! Immutable description of which configuration keys each subsystem
//! recognizes, requires, and can fill in automatically.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_AUTOCONFIGURABLE_KEYS_CORE, CONFIG_AUTOCONFIGURABLE_KEYS_NLU, CONFIG_KEYS_CORE,
    CONFIG_KEYS_NLU, CONFIG_MANDATORY_KEYS_CORE, CONFIG_MANDATORY_KEYS_NLU,
};
use crate::error::{Result, SchemaError};

/// A configurable area of the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsystemId {
    /// Dialogue management (policies)
    Core,
    /// Language understanding (pipeline)
    Nlu,
}

impl SubsystemId {
    /// Every subsystem, in registry order
    pub const ALL: [SubsystemId; 2] = [SubsystemId::Core, SubsystemId::Nlu];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubsystemId::Core => "core",
            SubsystemId::Nlu => "nlu",
        }
    }
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubsystemId {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(SubsystemId::Core),
            "nlu" | "language-understanding" | "language_understanding" => Ok(SubsystemId::Nlu),
            other => Err(SchemaError::UnknownSubsystem(other.to_string())),
        }
    }
}

/// Key sets for a single subsystem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubsystemKeys {
    /// Every key the subsystem understands
    pub recognized: BTreeSet<String>,
    /// Keys a document must contain
    pub mandatory: BTreeSet<String>,
    /// Keys the platform can populate when absent
    pub auto_configurable: BTreeSet<String>,
}

impl SubsystemKeys {
    pub fn new<R, M, A>(recognized: R, mandatory: M, auto_configurable: A) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            recognized: recognized.into_iter().map(Into::into).collect(),
            mandatory: mandatory.into_iter().map(Into::into).collect(),
            auto_configurable: auto_configurable.into_iter().map(Into::into).collect(),
        }
    }

    fn check_subsets(&self, subsystem: SubsystemId) -> Result<()> {
        for (set, keys) in [
            ("mandatory", &self.mandatory),
            ("auto-configurable", &self.auto_configurable),
        ] {
            if let Some(key) = keys.difference(&self.recognized).next() {
                return Err(SchemaError::RegistryInvariant {
                    subsystem: subsystem.to_string(),
                    key: key.clone(),
                    set: set.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Registry of key sets for every subsystem
///
/// Built once and never mutated. A subsystem absent from the registry
/// contributes no keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRegistry {
    subsystems: BTreeMap<SubsystemId, SubsystemKeys>,
}

impl KeyRegistry {
    /// Build a registry, rejecting definitions whose mandatory or
    /// auto-configurable keys are not recognized.
    pub fn new(
        definitions: impl IntoIterator<Item = (SubsystemId, SubsystemKeys)>,
    ) -> Result<Self> {
        let subsystems: BTreeMap<_, _> = definitions.into_iter().collect();
        for (id, keys) in &subsystems {
            keys.check_subsets(*id)?;
        }
        Ok(Self { subsystems })
    }

    /// The platform's built-in key sets
    pub fn builtin() -> Self {
        let subsystems = BTreeMap::from([
            (
                SubsystemId::Core,
                SubsystemKeys::new(
                    CONFIG_KEYS_CORE.iter().copied(),
                    CONFIG_MANDATORY_KEYS_CORE.iter().copied(),
                    CONFIG_AUTOCONFIGURABLE_KEYS_CORE.iter().copied(),
                ),
            ),
            (
                SubsystemId::Nlu,
                SubsystemKeys::new(
                    CONFIG_KEYS_NLU.iter().copied(),
                    CONFIG_MANDATORY_KEYS_NLU.iter().copied(),
                    CONFIG_AUTOCONFIGURABLE_KEYS_NLU.iter().copied(),
                ),
            ),
        ]);
        Self { subsystems }
    }

    /// Key sets for one subsystem
    pub fn get(&self, subsystem: SubsystemId) -> Option<&SubsystemKeys> {
        self.subsystems.get(&subsystem)
    }

    /// Union of the key sets of the given subsystems
    pub fn merged<'a>(
        &self,
        subsystems: impl IntoIterator<Item = &'a SubsystemId>,
    ) -> SubsystemKeys {
        let mut merged = SubsystemKeys::default();
        for keys in subsystems.into_iter().filter_map(|id| self.get(*id)) {
            merged.recognized.extend(keys.recognized.iter().cloned());
            merged.mandatory.extend(keys.mandatory.iter().cloned());
            merged.auto_configurable.extend(keys.auto_configurable.iter().cloned());
        }
        merged
    }

    /// Every key recognized by any subsystem
    pub fn all_recognized(&self) -> BTreeSet<String> {
        self.merged(SubsystemId::ALL.iter()).recognized
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
