//! Settings CLI
//!
//! View and initialize runtime settings.

use assistant_config::Settings;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "config-settings")]
#[command(about = "View and initialize assistant runtime settings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show resolved settings
    Show {
        /// Settings file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a settings file with default values
    Init {
        /// Output path
        #[arg(short, long, default_value = "assistant.toml")]
        output: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = Settings::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                println!("📋 Assistant Settings\n");
                println!("Paths:");
                println!("  Config: {:?}", cfg.paths.config);
                println!("  Domain: {:?}", cfg.paths.domain);
                println!("  Endpoints: {:?}", cfg.paths.endpoints);
                println!("  Credentials: {:?}", cfg.paths.credentials);
                println!("  Models: {:?}", cfg.paths.models);
                println!("  Data: {:?}", cfg.paths.data);

                println!("\nServer:");
                println!("  Port: {}", cfg.server.port);
                println!("  Workers: {}", cfg.server.workers);
                println!("  Backlog: {}", cfg.server.backlog);
                println!("  Request timeout: {}s", cfg.server.request_timeout);
                println!("  Response timeout: {}s", cfg.server.response_timeout);

                println!("\nLogging:");
                println!("  Level: {}", cfg.logging.level);
                println!("  Libraries: {}", cfg.logging.libraries_level);

                println!("\nSession:");
                println!("  Expiration: {} min", cfg.session.expiration_minutes);
                println!("  Carry over slots: {}", cfg.session.carry_over_slots);

                if let Some(alloc) = &cfg.compute.gpu_memory_alloc {
                    println!("\nCompute:");
                    println!("  GPU memory: {}", alloc);
                }
            }
        }

        Commands::Init { output } => {
            Settings::default().save(&output)?;
            println!("✅ Created settings file: {}", output);
        }
    }

    Ok(())
}
