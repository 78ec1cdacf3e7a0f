//! Configuration Contract Tests
//!
//! Validation, auto-configuration and compatibility against fixture files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use assistant_config::{
    changed_subsystems, check_against_minimum, check_compatible, AutoConfigurator,
    ConfigDocument, KeyRegistry, SchemaError, SchemaValidator, SubsystemId, SubsystemKeys,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load(name: &str) -> ConfigDocument {
    ConfigDocument::from_path(fixture(name)).unwrap()
}

fn keys(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn all() -> BTreeSet<SubsystemId> {
    SubsystemId::ALL.into_iter().collect()
}

fn every_subset() -> Vec<BTreeSet<SubsystemId>> {
    vec![
        BTreeSet::from([SubsystemId::Core]),
        BTreeSet::from([SubsystemId::Nlu]),
        all(),
    ]
}

// =============================================================================
// Schema Validation
// =============================================================================

#[test]
fn test_complete_fixture_is_clean() {
    let report = SchemaValidator::default()
        .validate(&all(), &load("complete.yml"))
        .unwrap();
    assert!(report.is_clean());
    assert!(report.auto_configurable_missing_keys.is_empty());
}

#[test]
fn test_empty_fixture_against_both_subsystems() {
    let report = SchemaValidator::default()
        .validate(&all(), &load("empty.yml"))
        .unwrap();

    assert_eq!(report.missing_mandatory_keys, keys(&["language"]));
    assert!(report.unknown_keys.is_empty());
    assert_eq!(
        report.auto_configurable_missing_keys,
        keys(&["pipeline", "policies"])
    );
    assert!(!report.is_valid);
}

#[test]
fn test_mandatory_keys_present_means_valid_whatever_else() {
    let validator = SchemaValidator::default();
    for name in ["complete.yml", "nlu_only.yml", "unknown_keys.yml", "null_values.yml"] {
        let document = load(name);
        for subsystems in every_subset() {
            let report = validator.validate(&subsystems, &document).unwrap();
            assert!(report.is_valid, "{} should be valid for {:?}", name, subsystems);
        }
    }
}

#[test]
fn test_missing_mandatory_key_is_reported() {
    let document = load("missing_language.yml");
    let validator = SchemaValidator::default();

    for subsystems in [BTreeSet::from([SubsystemId::Nlu]), all()] {
        let report = validator.validate(&subsystems, &document).unwrap();
        assert!(!report.is_valid);
        assert!(report.missing_mandatory_keys.contains("language"));
    }

    let core_only = validator
        .validate(&BTreeSet::from([SubsystemId::Core]), &document)
        .unwrap();
    assert!(core_only.is_valid);
    assert_eq!(core_only.unknown_keys, keys(&["pipeline"]));
}

#[test]
fn test_unknown_keys_fixture() {
    let report = SchemaValidator::default()
        .validate(&all(), &load("unknown_keys.yml"))
        .unwrap();
    assert_eq!(report.unknown_keys, keys(&["assistant_id", "recipe"]));
    assert!(report.is_valid);
}

#[test]
fn test_empty_subsystem_request_fails() {
    let err = SchemaValidator::default()
        .validate(&BTreeSet::new(), &load("complete.yml"))
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidArgument(_)));
}

#[test]
fn test_validation_is_idempotent() {
    let validator = SchemaValidator::default();
    let document = load("missing_language.yml");
    let reports: Vec<_> = (0..3)
        .map(|_| validator.validate(&all(), &document).unwrap())
        .collect();
    assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_custom_registry_is_injected() {
    let registry = KeyRegistry::new([
        (
            SubsystemId::Core,
            SubsystemKeys::new(["policies", "recipe"], ["recipe"], ["policies"]),
        ),
        (
            SubsystemId::Nlu,
            SubsystemKeys::new(["language", "pipeline"], ["language"], ["pipeline"]),
        ),
    ])
    .unwrap();

    let report = SchemaValidator::new(registry)
        .validate(&all(), &load("unknown_keys.yml"))
        .unwrap();
    assert!(report.is_valid);
    assert_eq!(report.unknown_keys, keys(&["assistant_id"]));
}

#[test]
fn test_validator_is_shareable_across_threads() {
    let validator = std::sync::Arc::new(SchemaValidator::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let validator = validator.clone();
            std::thread::spawn(move || {
                validator
                    .validate(&all(), &ConfigDocument::new())
                    .unwrap()
                    .missing_mandatory_keys
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), keys(&["language"]));
    }
}

// =============================================================================
// Auto-Configuration
// =============================================================================

#[test]
fn test_autofill_nlu_only_fixture() {
    let configurator = AutoConfigurator::with_defaults(SchemaValidator::default()).unwrap();
    let outcome = configurator.autofill(&all(), &load("nlu_only.yml")).unwrap();

    assert_eq!(outcome.filled_keys, keys(&["policies"]));
    assert!(outcome.report.is_clean());
}

#[test]
fn test_autofill_null_values_fixture() {
    let configurator = AutoConfigurator::with_defaults(SchemaValidator::default()).unwrap();
    let outcome = configurator.autofill(&all(), &load("null_values.yml")).unwrap();

    assert_eq!(outcome.filled_keys, keys(&["pipeline", "policies"]));
    // language is mandatory, so a null value stays as the user wrote it
    assert_eq!(outcome.document.get("language"), Some(&serde_yaml::Value::Null));
}

#[test]
fn test_autofill_output_parses_back() {
    let configurator = AutoConfigurator::with_defaults(SchemaValidator::default()).unwrap();
    let outcome = configurator.autofill(&all(), &load("nlu_only.yml")).unwrap();

    let yaml = outcome.document.to_yaml_string().unwrap();
    let reparsed = ConfigDocument::from_yaml_str(&yaml).unwrap();
    assert_eq!(reparsed, outcome.document);
}

// =============================================================================
// Fingerprints
// =============================================================================

#[test]
fn test_fixture_changes_by_subsystem() {
    let registry = KeyRegistry::builtin();
    let changed =
        changed_subsystems(&registry, &load("complete.yml"), &load("nlu_only.yml")).unwrap();
    assert_eq!(changed, all());

    let changed = changed_subsystems(
        &registry,
        &load("unknown_keys.yml"),
        &ConfigDocument::from_yaml_str("language: en").unwrap(),
    )
    .unwrap();
    assert!(changed.is_empty());
}

// =============================================================================
// Compatibility
// =============================================================================

#[test]
fn test_compatibility_contract() {
    assert!(check_compatible("2.0.0a3", "2.0.0a3").unwrap().is_compatible);
    assert!(!check_compatible("1.9.9", "2.0.0a3").unwrap().is_compatible);
    assert!(check_compatible("2.0.0", "2.0.0a3").unwrap().is_compatible);
    assert!(matches!(
        check_compatible("not-a-version", "2.0.0a3"),
        Err(SchemaError::MalformedVersion { .. })
    ));
}

#[test]
fn test_verdict_carries_both_versions() {
    let verdict = check_against_minimum("v2.1.0").unwrap();
    assert!(verdict.is_compatible);
    assert_eq!(verdict.actual.to_string(), "2.1.0");
    assert_eq!(verdict.minimum_required.to_string(), "2.0.0-a3");
}

#[test]
fn test_verdict_serializes_versions_as_strings() {
    let verdict = check_compatible("1.9.9", "2.0.0a3").unwrap();
    let json = serde_json::to_value(&verdict).unwrap();
    assert_eq!(json["actual"], "1.9.9");
    assert_eq!(json["minimum_required"], "2.0.0-a3");
    assert_eq!(json["is_compatible"], false);
}
