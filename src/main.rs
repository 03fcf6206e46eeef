//! SafeNote server binary

use clap::Parser;
use safenote_rs::config::{Config, DEFAULT_CONFIG_PATH};
use safenote_rs::server::run_server;
use safenote_rs::utils::logging::init_tracing;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

/// SAFE note and term sheet API server
#[derive(Debug, Parser)]
#[command(name = "safenote-server", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "SAFENOTE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

async fn load_config(path: &Path) -> safenote_rs::Result<Config> {
    if path.exists() {
        Config::from_file(path).await
    } else {
        Config::from_env()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if !cli.config.exists() {
        warn!(
            "Configuration file {:?} not found, using environment configuration",
            cli.config
        );
    }
    let build = safenote_rs::build_info();
    info!(version = build.version, git_hash = build.git_hash, "Starting SafeNote server");

    match run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
