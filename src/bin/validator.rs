//! Configuration Validator CLI
//!
//! Validates model configuration files and checks artifact versions.

use std::collections::BTreeSet;
use std::path::PathBuf;

use assistant_config::constants::MINIMUM_COMPATIBLE_VERSION;
use assistant_config::{
    changed_subsystems, check_compatible, logging, AutoConfigurator, ConfigDocument,
    SchemaValidator, Settings, SubsystemId, ValidationReport,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate assistant configuration files and artifact versions")]
#[command(version)]
struct Cli {
    /// Settings file to load (optional)
    #[arg(short, long, global = true)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a configuration file's keys
    Validate {
        /// Configuration file (defaults to the configured config path)
        file: Option<PathBuf>,
        /// Subsystem to validate for, repeatable (default: all)
        #[arg(long = "subsystem")]
        subsystems: Vec<SubsystemId>,
        /// Treat unknown keys as failures
        #[arg(long)]
        strict: bool,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill missing auto-configurable keys from the defaults
    Autofill {
        /// Configuration file (defaults to the configured config path)
        file: Option<PathBuf>,
        /// Subsystem to fill for, repeatable (default: all)
        #[arg(long = "subsystem")]
        subsystems: Vec<SubsystemId>,
        /// Write the completed configuration here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether an artifact version can be loaded
    Compat {
        /// Version recorded by the artifact
        actual: String,
        /// Oldest supported version
        #[arg(short, long, default_value = MINIMUM_COMPATIBLE_VERSION)]
        minimum: String,
    },

    /// Report which subsystems' configuration changed between two files
    Fingerprint {
        old: PathBuf,
        new: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load_from(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&settings.logging);

    match run(cli.command, &settings) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn requested(subsystems: Vec<SubsystemId>) -> BTreeSet<SubsystemId> {
    if subsystems.is_empty() {
        SubsystemId::ALL.into_iter().collect()
    } else {
        subsystems.into_iter().collect()
    }
}

fn print_report(report: &ValidationReport) {
    for key in &report.missing_mandatory_keys {
        println!("  ❌ missing mandatory key '{}'", key);
    }
    for key in &report.unknown_keys {
        println!("  ⚠️  unknown key '{}'", key);
    }
    for key in &report.auto_configurable_missing_keys {
        println!("  💡 '{}' not provided, it will be auto-configured", key);
    }
}

/// Returns `Ok(false)` when the check ran but did not pass.
fn run(command: Commands, settings: &Settings) -> Result<bool, Box<dyn std::error::Error>> {
    let validator = SchemaValidator::default();

    match command {
        Commands::Validate {
            file,
            subsystems,
            strict,
            json,
        } => {
            let path = file.unwrap_or_else(|| settings.config_path());
            let document = ConfigDocument::from_path(&path)?;
            let report = validator.validate(&requested(subsystems), &document)?;
            let passed = report.is_valid && (!strict || report.unknown_keys.is_empty());

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("🔍 Validating {}", path.display());
                print_report(&report);
                println!();
                if passed {
                    println!("✅ Configuration is valid");
                } else {
                    println!("❌ Configuration is invalid");
                }
            }
            Ok(passed)
        }

        Commands::Autofill {
            file,
            subsystems,
            output,
        } => {
            let path = file.unwrap_or_else(|| settings.config_path());
            let document = ConfigDocument::from_path(&path)?;
            let configurator = AutoConfigurator::with_defaults(validator)?;
            let outcome = configurator.autofill(&requested(subsystems), &document)?;
            let yaml = outcome.document.to_yaml_string()?;

            match output {
                Some(out) => {
                    std::fs::write(&out, &yaml)?;
                    println!("✅ Wrote {:?}", out);
                    for key in &outcome.filled_keys {
                        println!("  └─ filled '{}'", key);
                    }
                }
                None => print!("{}", yaml),
            }

            if !outcome.report.is_valid {
                eprintln!("❌ Still missing mandatory keys:");
                for key in &outcome.report.missing_mandatory_keys {
                    eprintln!("  └─ {}", key);
                }
            }
            Ok(outcome.report.is_valid)
        }

        Commands::Compat { actual, minimum } => {
            let verdict = check_compatible(&actual, &minimum)?;
            if verdict.is_compatible {
                println!("✅ {}", verdict.reason);
            } else {
                println!("❌ {}", verdict.reason);
            }
            Ok(verdict.is_compatible)
        }

        Commands::Fingerprint { old, new } => {
            let old = ConfigDocument::from_path(&old)?;
            let new = ConfigDocument::from_path(&new)?;
            let changed = changed_subsystems(validator.registry(), &old, &new)?;

            if changed.is_empty() {
                println!("✅ No subsystem configuration changed");
            } else {
                println!("🔄 Changed subsystems:");
                for subsystem in &changed {
                    println!("  └─ {}", subsystem);
                }
            }
            Ok(true)
        }
    }
}
