//! Configuration schema validation
//!
//! Checks a document's key set against the registry: which mandatory keys are
//! missing, which keys nobody recognizes, and which missing keys the platform
//! could fill in on its own.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::ConfigDocument;
use crate::error::{Result, SchemaError};
use crate::registry::{KeyRegistry, SubsystemId};

/// Outcome of validating one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Mandatory keys the document does not contain
    pub missing_mandatory_keys: BTreeSet<String>,
    /// Document keys no requested subsystem recognizes
    pub unknown_keys: BTreeSet<String>,
    /// Auto-configurable keys the document does not contain
    pub auto_configurable_missing_keys: BTreeSet<String>,
    /// True iff no mandatory key is missing
    pub is_valid: bool,
}

impl ValidationReport {
    fn new(
        missing_mandatory_keys: BTreeSet<String>,
        unknown_keys: BTreeSet<String>,
        auto_configurable_missing_keys: BTreeSet<String>,
    ) -> Self {
        let is_valid = missing_mandatory_keys.is_empty();
        Self {
            missing_mandatory_keys,
            unknown_keys,
            auto_configurable_missing_keys,
            is_valid,
        }
    }

    /// Valid and free of unknown keys
    pub fn is_clean(&self) -> bool {
        self.is_valid && self.unknown_keys.is_empty()
    }
}

/// Validates documents against an injected [`KeyRegistry`]
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    registry: KeyRegistry,
}

impl SchemaValidator {
    pub fn new(registry: KeyRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Validate the key set of `document` for the requested subsystems.
    ///
    /// Only key presence is checked; a key mapped to `null` counts as present.
    /// Fails with [`SchemaError::InvalidArgument`] if `subsystems` is empty.
    pub fn validate(
        &self,
        subsystems: &BTreeSet<SubsystemId>,
        document: &ConfigDocument,
    ) -> Result<ValidationReport> {
        if subsystems.is_empty() {
            return Err(SchemaError::InvalidArgument(
                "at least one subsystem must be requested".to_string(),
            ));
        }

        let expected = self.registry.merged(subsystems);
        let present = document.keys();

        Ok(ValidationReport::new(
            expected.mandatory.difference(&present).cloned().collect(),
            present.difference(&expected.recognized).cloned().collect(),
            expected
                .auto_configurable
                .difference(&present)
                .cloned()
                .collect(),
        ))
    }

    /// Validate against every subsystem
    pub fn validate_all(&self, document: &ConfigDocument) -> Result<ValidationReport> {
        self.validate(&SubsystemId::ALL.into_iter().collect(), document)
    }
}
