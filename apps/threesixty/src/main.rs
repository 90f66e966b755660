//! # threesixty Binary
//!
//! Entry point: clap command dispatch plus tracing setup.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use threesixty::cli::{cmd_score, cmd_summary};
use threesixty::config::load_config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "threesixty", version, about = "360-degree feedback scoring service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8080.
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,

        /// Optional score config file (weights + thresholds), JSON.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score one employee from a JSON responses file.
    Score {
        /// JSON file containing an array of rating responses.
        #[arg(long)]
        responses: PathBuf,

        /// Employee id.
        #[arg(long)]
        employee: u64,

        /// Cycle id.
        #[arg(long)]
        cycle: u64,

        /// Optional score config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Summarize every scored employee in a cycle.
    Summary {
        /// JSON file containing an array of rating responses.
        #[arg(long)]
        responses: PathBuf,

        /// Cycle id.
        #[arg(long)]
        cycle: u64,

        /// Optional score config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Serve { bind, config } => {
            let config = load_config(config.as_deref())?;
            let engine = config.build_engine()?;
            threesixty::api::serve(&bind, engine).await?;
        }
        Commands::Score {
            responses,
            employee,
            cycle,
            config,
            json,
        } => cmd_score(&responses, employee, cycle, config.as_deref(), json)?,
        Commands::Summary {
            responses,
            cycle,
            config,
            json,
        } => cmd_summary(&responses, cycle, config.as_deref(), json)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
