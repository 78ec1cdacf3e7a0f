//! Logging setup
//!
//! `RUST_LOG` takes precedence when set. Otherwise this crate logs at the
//! configured level and every other target at the libraries level.

use tracing_subscriber::EnvFilter;

use crate::settings::LoggingSettings;

const CRATE_TARGET: &str = "assistant_config";

/// Map a platform level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`,
/// `CRITICAL`) to a tracing directive. Unknown names yield `None`.
pub fn level_directive(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_uppercase().as_str() {
        "NOTSET" | "TRACE" => Some("trace"),
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "WARNING" | "WARN" => Some("warn"),
        "ERROR" | "CRITICAL" | "FATAL" => Some("error"),
        "OFF" => Some("off"),
        _ => None,
    }
}

/// Filter built from settings, ignoring `RUST_LOG`
pub fn filter_for(settings: &LoggingSettings) -> EnvFilter {
    let level = level_directive(&settings.level).unwrap_or("info");
    let libraries = level_directive(&settings.libraries_level).unwrap_or("error");
    EnvFilter::new(format!("{},{}={}", libraries, CRATE_TARGET, level))
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(settings));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(level_directive("WARNING"), Some("warn"));
        assert_eq!(level_directive("critical"), Some("error"));
        assert_eq!(level_directive(" Info "), Some("info"));
        assert_eq!(level_directive("loud"), None);
    }

    #[test]
    fn test_filter_directives() {
        let settings = LoggingSettings {
            level: "DEBUG".to_string(),
            libraries_level: "WARNING".to_string(),
            ui_level: "WARNING".to_string(),
        };
        let rendered = filter_for(&settings).to_string();
        assert!(rendered.contains("assistant_config=debug"));
        assert!(rendered.contains("warn"));
    }

    #[test]
    fn test_unknown_levels_fall_back() {
        let settings = LoggingSettings {
            level: "chatty".to_string(),
            libraries_level: "quiet".to_string(),
            ui_level: "WARNING".to_string(),
        };
        let rendered = filter_for(&settings).to_string();
        assert!(rendered.contains("assistant_config=info"));
        assert!(rendered.contains("error"));
    }
}
