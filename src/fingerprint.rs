//! Section fingerprints
//!
//! A fingerprint digests the part of a document one subsystem reads, so a
//! stored artifact can tell whether its subsystem's configuration changed.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::document::ConfigDocument;
use crate::error::Result;
use crate::registry::{KeyRegistry, SubsystemId};

/// SHA256 digest of a subsystem's configuration section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Fingerprint the keys of `document` that `subsystem` recognizes.
///
/// Keys are serialized in sorted order as canonical JSON; absent keys are
/// left out, so adding an unrelated key does not change the result.
pub fn fingerprint_section(
    registry: &KeyRegistry,
    subsystem: SubsystemId,
    document: &ConfigDocument,
) -> Result<Fingerprint> {
    let recognized = registry
        .get(subsystem)
        .map(|keys| &keys.recognized)
        .cloned()
        .unwrap_or_default();

    let section: BTreeMap<&String, &serde_yaml::Value> = document
        .iter()
        .filter(|(key, _)| recognized.contains(*key))
        .collect();

    let canonical = serde_json::to_string(&section)?;
    Ok(Fingerprint::from_bytes(canonical.as_bytes()))
}

/// Subsystems whose section differs between two documents
pub fn changed_subsystems(
    registry: &KeyRegistry,
    old: &ConfigDocument,
    new: &ConfigDocument,
) -> Result<BTreeSet<SubsystemId>> {
    let mut changed = BTreeSet::new();
    for subsystem in SubsystemId::ALL {
        if fingerprint_section(registry, subsystem, old)?
            != fingerprint_section(registry, subsystem, new)?
        {
            changed.insert(subsystem);
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> ConfigDocument {
        ConfigDocument::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_fingerprint_consistency() {
        let registry = KeyRegistry::builtin();
        let document = doc("language: en\npipeline:\n  - name: DIETClassifier");
        let first = fingerprint_section(&registry, SubsystemId::Nlu, &document).unwrap();
        let second = fingerprint_section(&registry, SubsystemId::Nlu, &document).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 64);
    }

    #[test]
    fn test_unrelated_keys_do_not_change_fingerprint() {
        let registry = KeyRegistry::builtin();
        let a = fingerprint_section(&registry, SubsystemId::Core, &doc("policies: []")).unwrap();
        let b = fingerprint_section(
            &registry,
            SubsystemId::Core,
            &doc("policies: []\nlanguage: en\nextra: true"),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_changed_subsystems() {
        let registry = KeyRegistry::builtin();
        let old = doc("language: en\npipeline: []\npolicies:\n  - name: RulePolicy");
        let new = doc("language: de\npipeline: []\npolicies:\n  - name: RulePolicy");

        let changed = changed_subsystems(&registry, &old, &new).unwrap();
        assert_eq!(changed, BTreeSet::from([SubsystemId::Nlu]));
        assert!(changed_subsystems(&registry, &old, &old).unwrap().is_empty());
    }

    #[test]
    fn test_removed_key_is_a_change() {
        let registry = KeyRegistry::builtin();
        let changed =
            changed_subsystems(&registry, &doc("policies: []"), &ConfigDocument::new()).unwrap();
        assert_eq!(changed, BTreeSet::from([SubsystemId::Core]));
    }
}
