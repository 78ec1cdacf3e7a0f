//! Backward-compatibility checking
//!
//! Decides whether an artifact recorded with some version can be used by the
//! running software, given the oldest version it still supports.

use serde::{Deserialize, Serialize};

use crate::constants::MINIMUM_COMPATIBLE_VERSION;
use crate::error::Result;
use crate::version::SemanticVersion;

/// Result of a compatibility check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    /// Whether the artifact can be used
    pub is_compatible: bool,
    /// Oldest supported version
    pub minimum_required: SemanticVersion,
    /// Version recorded by the artifact
    pub actual: SemanticVersion,
    /// Human-readable explanation
    pub reason: String,
}

impl CompatibilityVerdict {
    /// Compare two parsed versions
    pub fn evaluate(actual: SemanticVersion, minimum_required: SemanticVersion) -> Self {
        let is_compatible = actual >= minimum_required;
        let reason = if is_compatible {
            format!(
                "Version {} satisfies the minimum compatible version {}",
                actual, minimum_required
            )
        } else {
            format!(
                "Version {} is older than the minimum compatible version {}",
                actual, minimum_required
            )
        };
        Self {
            is_compatible,
            minimum_required,
            actual,
            reason,
        }
    }
}

/// Checks artifact versions against a fixed minimum
#[derive(Debug, Clone)]
pub struct CompatibilityChecker {
    minimum: SemanticVersion,
}

impl CompatibilityChecker {
    pub fn new(minimum: SemanticVersion) -> Self {
        Self { minimum }
    }

    /// Checker using [`MINIMUM_COMPATIBLE_VERSION`]
    pub fn builtin() -> Self {
        // constant is a valid version
        let minimum = SemanticVersion::parse(MINIMUM_COMPATIBLE_VERSION)
            .expect("built-in minimum compatible version parses");
        Self::new(minimum)
    }

    pub fn minimum(&self) -> &SemanticVersion {
        &self.minimum
    }

    /// Parse `actual` and compare it with the configured minimum
    pub fn check(&self, actual: &str) -> Result<CompatibilityVerdict> {
        let actual = SemanticVersion::parse(actual)?;
        Ok(self.check_version(actual))
    }

    pub fn check_version(&self, actual: SemanticVersion) -> CompatibilityVerdict {
        CompatibilityVerdict::evaluate(actual, self.minimum.clone())
    }
}

impl Default for CompatibilityChecker {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compare an artifact version with an explicit minimum.
///
/// Fails with [`crate::SchemaError::MalformedVersion`] if either string does
/// not parse.
pub fn check_compatible(actual: &str, minimum: &str) -> Result<CompatibilityVerdict> {
    let minimum = SemanticVersion::parse(minimum)?;
    let actual = SemanticVersion::parse(actual)?;
    Ok(CompatibilityVerdict::evaluate(actual, minimum))
}

/// Compare an artifact version with [`MINIMUM_COMPATIBLE_VERSION`]
pub fn check_against_minimum(actual: &str) -> Result<CompatibilityVerdict> {
    CompatibilityChecker::builtin().check(actual)
}
