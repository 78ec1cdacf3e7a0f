//! Runtime settings
//!
//! Layered, later sources win:
//! - Default values
//! - Global user config (`~/.config/rasa/global.yml`)
//! - Project file (`assistant.toml`, `.assistant.toml`)
//! - An explicit file passed by the caller
//! - Environment variables (`ASSISTANT__<SECTION>__<KEY>`)
//! - The platform's own tuning variables (`SANIC_WORKERS`, `SANIC_BACKLOG`,
//!   `LOG_LEVEL_LIBRARIES`, `TF_*`)
//!
//! ## Example config file (assistant.toml):
//! ```toml
//! [paths]
//! config = "config.yml"
//! models = "models"
//!
//! [server]
//! port = 5005
//! workers = 2
//!
//! [logging]
//! level = "INFO"
//! libraries_level = "ERROR"
//! ```

use std::env;
use std::path::{Path, PathBuf};

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    global_user_config_path, DEFAULT_ACTIONS_PATH, DEFAULT_CARRY_OVER_SLOTS_TO_NEW_SESSION,
    DEFAULT_CONFIG_PATH, DEFAULT_CREDENTIALS_PATH, DEFAULT_DATA_PATH, DEFAULT_DOMAIN_PATH,
    DEFAULT_ENDPOINTS_PATH, DEFAULT_LOG_LEVEL_LIBRARIES, DEFAULT_LOG_LEVEL_RASA_X,
    DEFAULT_MODELS_PATH, DEFAULT_RASA_PORT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RESPONSE_TIMEOUT,
    DEFAULT_RESULTS_PATH, DEFAULT_SANIC_WORKERS, DEFAULT_SESSION_EXPIRATION_TIME_IN_MINUTES,
    ENV_CPU_INTER_OP_CONFIG, ENV_CPU_INTRA_OP_CONFIG, ENV_GPU_CONFIG, ENV_LOG_LEVEL_LIBRARIES,
    ENV_SANIC_BACKLOG, ENV_SANIC_WORKERS,
};

/// Platform runtime settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub compute: ComputeSettings,
}

/// Default project file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_config_path")]
    pub config: PathBuf,

    #[serde(default = "default_domain_path")]
    pub domain: PathBuf,

    #[serde(default = "default_endpoints_path")]
    pub endpoints: PathBuf,

    #[serde(default = "default_credentials_path")]
    pub credentials: PathBuf,

    #[serde(default = "default_models_path")]
    pub models: PathBuf,

    #[serde(default = "default_data_path")]
    pub data: PathBuf,

    #[serde(default = "default_actions_path")]
    pub actions: PathBuf,

    #[serde(default = "default_results_path")]
    pub results: PathBuf,
}

/// HTTP server tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Worker processes (`SANIC_WORKERS`)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Listen backlog (`SANIC_BACKLOG`)
    #[serde(default = "default_backlog")]
    pub backlog: u32,

    /// Seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Seconds
    #[serde(default = "default_response_timeout")]
    pub response_timeout: u64,
}

/// Log levels, using the platform's level names (`DEBUG` .. `CRITICAL`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Level for third-party libraries (`LOG_LEVEL_LIBRARIES`)
    #[serde(default = "default_libraries_level")]
    pub libraries_level: String,

    /// Level used when running alongside the UI companion
    #[serde(default = "default_ui_level")]
    pub ui_level: String,
}

/// Conversation session defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Zero disables expiration
    #[serde(default = "default_session_expiration")]
    pub expiration_minutes: u64,

    #[serde(default = "default_carry_over_slots")]
    pub carry_over_slots: bool,
}

/// Tensor runtime tuning, passed through untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputeSettings {
    /// `TF_GPU_MEMORY_ALLOC`, e.g. `"0:1024, 1:2048"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_memory_alloc: Option<String>,

    /// `TF_INTER_OP_PARALLELISM_THREADS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_op_threads: Option<usize>,

    /// `TF_INTRA_OP_PARALLELISM_THREADS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intra_op_threads: Option<usize>,
}

// Default value functions
fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

fn default_domain_path() -> PathBuf {
    PathBuf::from(DEFAULT_DOMAIN_PATH)
}

fn default_endpoints_path() -> PathBuf {
    PathBuf::from(DEFAULT_ENDPOINTS_PATH)
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIALS_PATH)
}

fn default_models_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODELS_PATH)
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_actions_path() -> PathBuf {
    PathBuf::from(DEFAULT_ACTIONS_PATH)
}

fn default_results_path() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_PATH)
}

fn default_port() -> u16 {
    DEFAULT_RASA_PORT
}

fn default_workers() -> usize {
    DEFAULT_SANIC_WORKERS
}

fn default_backlog() -> u32 {
    100
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_response_timeout() -> u64 {
    DEFAULT_RESPONSE_TIMEOUT
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_libraries_level() -> String {
    DEFAULT_LOG_LEVEL_LIBRARIES.to_string()
}

fn default_ui_level() -> String {
    DEFAULT_LOG_LEVEL_RASA_X.to_string()
}

fn default_session_expiration() -> u64 {
    DEFAULT_SESSION_EXPIRATION_TIME_IN_MINUTES
}

fn default_carry_over_slots() -> bool {
    DEFAULT_CARRY_OVER_SLOTS_TO_NEW_SESSION
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            config: default_config_path(),
            domain: default_domain_path(),
            endpoints: default_endpoints_path(),
            credentials: default_credentials_path(),
            models: default_models_path(),
            data: default_data_path(),
            actions: default_actions_path(),
            results: default_results_path(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            workers: default_workers(),
            backlog: default_backlog(),
            request_timeout: default_request_timeout(),
            response_timeout: default_response_timeout(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            libraries_level: default_libraries_level(),
            ui_level: default_ui_level(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expiration_minutes: default_session_expiration(),
            carry_over_slots: default_carry_over_slots(),
        }
    }
}

/// Platform tuning variables and the settings key each one overrides
const PLATFORM_ENV_OVERRIDES: [(&str, &str); 6] = [
    (ENV_SANIC_WORKERS, "server.workers"),
    (ENV_SANIC_BACKLOG, "server.backlog"),
    (ENV_LOG_LEVEL_LIBRARIES, "logging.libraries_level"),
    (ENV_GPU_CONFIG, "compute.gpu_memory_alloc"),
    (ENV_CPU_INTER_OP_CONFIG, "compute.inter_op_threads"),
    (ENV_CPU_INTRA_OP_CONFIG, "compute.intra_op_threads"),
];

impl Settings {
    /// Load settings from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load settings, adding a required file on top of the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_layers(global_user_config_path().as_deref(), config_path)
    }

    /// Load settings with an explicit global user config location.
    ///
    /// A missing global file is skipped; a missing `config_path` is an error.
    pub fn load_layers(
        global: Option<&Path>,
        config_path: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(global) = global.filter(|path| path.exists()) {
            debug!(path = %global.display(), "Reading global user config");
            builder = builder.add_source(File::from(global).required(false));
        }

        for location in ["assistant.toml", ".assistant.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ASSISTANT")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in PLATFORM_ENV_OVERRIDES {
            builder = builder.set_override_option(key, env::var(var).ok())?;
        }

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save settings to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Path of the model configuration file, resolved against the current directory
    pub fn config_path(&self) -> PathBuf {
        resolve(&self.paths.config)
    }

    /// Path of the models directory, resolved against the current directory
    pub fn models_path(&self) -> PathBuf {
        resolve(&self.paths.models)
    }
}

fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(path)
    }
}
