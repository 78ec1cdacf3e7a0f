//! Assistant Configuration Contract
//!
//! Static configuration contract for a conversational assistant: which keys a
//! model configuration may and must contain, which of them the platform can
//! fill in, and whether a persisted artifact is new enough to load.
//!
//! ## Features
//!
//! - **Schema Validation**: Missing mandatory keys, unknown keys and
//!   auto-configurable gaps, per subsystem (`core`, `nlu`)
//! - **Compatibility Checking**: Version ordering that accepts the historical
//!   `2.0.0a3` format
//! - **Auto-Configuration**: Fill omitted keys from bundled defaults
//! - **Fingerprints**: Detect which subsystem's section changed
//! - **Runtime Settings**: Layered file and environment configuration
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use assistant_config::{ConfigDocument, SchemaValidator, SubsystemId, check_compatible};
//!
//! let document = ConfigDocument::from_yaml_str("language: en\n").unwrap();
//! let subsystems: BTreeSet<_> = SubsystemId::ALL.into_iter().collect();
//! let report = SchemaValidator::default().validate(&subsystems, &document).unwrap();
//! assert!(report.is_valid);
//!
//! assert!(check_compatible("2.0.0", "2.0.0a3").unwrap().is_compatible);
//! ```

pub mod autoconfig;
pub mod compatibility;
pub mod constants;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod registry;
pub mod settings;
pub mod validator;
pub mod version;

pub use autoconfig::{AutoConfigurator, AutofillOutcome};
pub use compatibility::{
    check_against_minimum, check_compatible, CompatibilityChecker, CompatibilityVerdict,
};
pub use document::ConfigDocument;
pub use error::{Result, SchemaError};
pub use fingerprint::{changed_subsystems, fingerprint_section, Fingerprint};
pub use registry::{KeyRegistry, SubsystemId, SubsystemKeys};
pub use settings::Settings;
pub use validator::{SchemaValidator, ValidationReport};
pub use version::SemanticVersion;
