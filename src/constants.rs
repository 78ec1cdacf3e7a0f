//! Platform constants
//!
//! Flat lookup table of default paths, file names, ports, documentation links
//! and environment variable names. Nothing here carries behavior; the
//! validator and checker consult these by name.

use std::path::PathBuf;

macro_rules! docs_base_url {
    () => {
        "https://rasa.com/docs/rasa"
    };
}

// Default paths
pub const DEFAULT_ENDPOINTS_PATH: &str = "endpoints.yml";
pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.yml";
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
pub const DEFAULT_DOMAIN_PATH: &str = "domain.yml";
pub const DEFAULT_ACTIONS_PATH: &str = "actions";
pub const DEFAULT_MODELS_PATH: &str = "models";
pub const DEFAULT_CONVERTED_DATA_PATH: &str = "converted_data";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_RESULTS_PATH: &str = "results";
pub const DEFAULT_NLU_RESULTS_PATH: &str = "nlu_comparison_results";
pub const DEFAULT_CORE_SUBDIRECTORY_NAME: &str = "core";
pub const DEFAULT_NLU_SUBDIRECTORY_NAME: &str = "nlu";

/// Seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 60 * 5;
/// Seconds
pub const DEFAULT_RESPONSE_TIMEOUT: u64 = 60 * 60;

// Data files
pub const TEST_DATA_FILE: &str = "test.md";
pub const TRAIN_DATA_FILE: &str = "train.md";
pub const NLG_DATA_FILE: &str = "responses.md";
pub const RESULTS_FILE: &str = "results.json";
pub const NUMBER_OF_TRAINING_STORIES_FILE: &str = "num_stories.json";
pub const PERCENTAGE_KEY: &str = "__percentage__";

pub const PACKAGE_NAME: &str = "rasa";

// Ports
pub const DEFAULT_RASA_X_PORT: u16 = 5002;
pub const DEFAULT_RASA_PORT: u16 = 5005;

// Documentation
pub const DOCS_BASE_URL: &str = docs_base_url!();
pub const DOCS_URL_POLICIES: &str = concat!(docs_base_url!(), "/policies");
pub const DOCS_URL_TEST_STORIES: &str = concat!(docs_base_url!(), "/testing-your-assistant");
pub const DOCS_URL_ACTIONS: &str = concat!(docs_base_url!(), "/actions");
pub const DOCS_URL_CONNECTORS: &str = concat!(docs_base_url!(), "/connectors/");
pub const DOCS_URL_EVENT_BROKERS: &str = concat!(docs_base_url!(), "/event-brokers");
pub const DOCS_URL_PIKA_EVENT_BROKER: &str =
    concat!(docs_base_url!(), "/event-brokers", "#pika-event-broker");
pub const DOCS_URL_TRACKER_STORES: &str = concat!(docs_base_url!(), "/tracker-stores");
pub const DOCS_URL_PIPELINE: &str = concat!(docs_base_url!(), "/tuning-your-model");
pub const DOCS_URL_COMPONENTS: &str = concat!(docs_base_url!(), "/components");
pub const DOCS_URL_MIGRATION_GUIDE: &str = concat!(docs_base_url!(), "/migrate-from/");
pub const DOCS_BASE_URL_RASA_X: &str = "https://rasa.com/docs/rasa-x";

// Configuration keys, grouped per subsystem. `KeyRegistry::builtin` is built
// from these.
pub const CONFIG_KEYS_CORE: &[&str] = &["policies"];
pub const CONFIG_KEYS_NLU: &[&str] = &["language", "pipeline"];
pub const CONFIG_MANDATORY_KEYS_CORE: &[&str] = &[];
pub const CONFIG_MANDATORY_KEYS_NLU: &[&str] = &["language"];
pub const CONFIG_AUTOCONFIGURABLE_KEYS_CORE: &[&str] = &["policies"];
pub const CONFIG_AUTOCONFIGURABLE_KEYS_NLU: &[&str] = &["pipeline"];

// Versions
pub const MINIMUM_COMPATIBLE_VERSION: &str = "2.0.0a3";
pub const NEXT_MAJOR_VERSION_FOR_DEPRECATIONS: &str = "3.0.0";

// Logging
pub const DEFAULT_LOG_LEVEL_RASA_X: &str = "WARNING";
pub const DEFAULT_LOG_LEVEL_LIBRARIES: &str = "ERROR";
pub const ENV_LOG_LEVEL_LIBRARIES: &str = "LOG_LEVEL_LIBRARIES";

// Server concurrency
pub const DEFAULT_SANIC_WORKERS: usize = 1;
pub const ENV_SANIC_WORKERS: &str = "SANIC_WORKERS";
pub const ENV_SANIC_BACKLOG: &str = "SANIC_BACKLOG";

// Sessions
pub const DEFAULT_SESSION_EXPIRATION_TIME_IN_MINUTES: u64 = 0;
pub const DEFAULT_CARRY_OVER_SLOTS_TO_NEW_SESSION: bool = true;

// Tensor runtime tuning
pub const ENV_GPU_CONFIG: &str = "TF_GPU_MEMORY_ALLOC";
pub const ENV_CPU_INTER_OP_CONFIG: &str = "TF_INTER_OP_PARALLELISM_THREADS";
pub const ENV_CPU_INTRA_OP_CONFIG: &str = "TF_INTRA_OP_PARALLELISM_THREADS";

/// Location of the per-user global configuration (`~/.config/rasa/global.yml`).
///
/// `None` when no home directory can be determined.
pub fn global_user_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join(PACKAGE_NAME)
            .join("global.yml")
    })
}
