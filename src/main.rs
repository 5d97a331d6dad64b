//! abtest-analytics server
//!
//! Loads configuration and serves the analytics HTTP API.

#![allow(missing_docs)]

use abtest_analytics::{build_info, server, utils::logging};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Multi-tenant A/B testing analytics service
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file; the environment is used when it cannot be loaded
    #[arg(short, long, env = "ANALYTICS_CONFIG", default_value = "config/analytics.yaml")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long, env = "ANALYTICS_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_tracing("info", cli.log_json);

    let build = build_info();
    info!("abtest-analytics {} ({})", build.version, build.git_hash);

    match server::run_server(&cli.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
