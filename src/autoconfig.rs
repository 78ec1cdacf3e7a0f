//! Auto-configuration
//!
//! Fills auto-configurable keys a document leaves out (or sets to `null`)
//! from a default configuration. Mandatory keys are never filled.

use std::collections::BTreeSet;

use serde_yaml::Value;
use tracing::{info, warn};

use crate::document::ConfigDocument;
use crate::error::Result;
use crate::registry::SubsystemId;
use crate::validator::{SchemaValidator, ValidationReport};

const DEFAULT_CONFIG: &str = include_str!("default_config.yml");

/// Result of [`AutoConfigurator::autofill`]
#[derive(Debug, Clone, PartialEq)]
pub struct AutofillOutcome {
    /// The completed document
    pub document: ConfigDocument,
    /// Keys that were taken from the defaults
    pub filled_keys: BTreeSet<String>,
    /// Validation of the completed document
    pub report: ValidationReport,
}

/// Completes documents from a default configuration
#[derive(Debug, Clone)]
pub struct AutoConfigurator {
    validator: SchemaValidator,
    defaults: ConfigDocument,
}

impl AutoConfigurator {
    pub fn new(validator: SchemaValidator, defaults: ConfigDocument) -> Self {
        Self {
            validator,
            defaults,
        }
    }

    /// Use the bundled default configuration
    pub fn with_defaults(validator: SchemaValidator) -> Result<Self> {
        let defaults = ConfigDocument::from_yaml_str(DEFAULT_CONFIG)?;
        Ok(Self::new(validator, defaults))
    }

    pub fn defaults(&self) -> &ConfigDocument {
        &self.defaults
    }

    /// Fill missing auto-configurable keys of the requested subsystems.
    pub fn autofill(
        &self,
        subsystems: &BTreeSet<SubsystemId>,
        document: &ConfigDocument,
    ) -> Result<AutofillOutcome> {
        let before = self.validator.validate(subsystems, document)?;

        let auto_configurable = self.validator.registry().merged(subsystems).auto_configurable;
        let mut candidates = before.auto_configurable_missing_keys;
        candidates.extend(
            auto_configurable
                .into_iter()
                .filter(|key| matches!(document.get(key), Some(Value::Null))),
        );

        let mut completed = document.clone();
        let mut filled_keys = BTreeSet::new();
        for key in candidates {
            match self.defaults.get(&key) {
                Some(value) => {
                    info!(key = %key, "Configuration key not provided, using default");
                    completed.insert(key.clone(), value.clone());
                    filled_keys.insert(key);
                }
                None => warn!(key = %key, "No default available for auto-configurable key"),
            }
        }

        let report = self.validator.validate(subsystems, &completed)?;
        Ok(AutofillOutcome {
            document: completed,
            filled_keys,
            report,
        })
    }
}
