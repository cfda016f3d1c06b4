//! FlightPhase CLI - Command-line interface
//!
//! Replays recorded telemetry through the flight phase tracker, prints the
//! transition graph, and manages the config file.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use flightphase::config::ConfigFile;
use flightphase::logging::{init_logging, LoggingConfig};

use commands::config::ConfigCommands;
use commands::graph::GraphFormat;
use error::CliError;

#[derive(Parser)]
#[command(name = "flightphase")]
#[command(version, about = "Track aircraft flight phases from telemetry", long_about = None)]
struct Cli {
    /// Path to the config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded telemetry trace (JSON Lines) and print phase changes
    Replay {
        /// Trace file, one snapshot per line
        file: PathBuf,

        /// Time between snapshots in milliseconds (overrides service.poll_interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Print the flight phase transition graph
    Graph {
        /// Output format
        #[arg(long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },

    /// View or change configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Replay { file, interval_ms } => {
            let path = commands::config::resolve_path(cli.config.as_deref())?;
            let config = ConfigFile::load_from(&path)?;

            let logging = logging_config(&config, cli.log_level);
            let _guard = init_logging(&logging)?;
            tracing::debug!(config = %path.display(), "Configuration loaded");

            commands::replay::run(commands::replay::ReplayArgs { file, interval_ms }, &config)
        }
        Commands::Graph { format } => {
            commands::graph::run(format);
            Ok(())
        }
        Commands::Config(command) => commands::config::run(command, cli.config.as_deref()),
    }
}

/// Logging settings from the config file, with the command-line level applied.
fn logging_config(config: &ConfigFile, level: Option<String>) -> LoggingConfig {
    match level {
        Some(level) => config.logging.clone().with_level(level),
        None => config.logging.clone(),
    }
}
