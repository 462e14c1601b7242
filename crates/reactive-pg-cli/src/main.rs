#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod bootstrap;
mod config;
mod service;
mod telemetry;

use std::process;

use anyhow::Context;

use crate::config::Cli;
use crate::service::ServiceState;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "reactive_pg_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "reactive_pg_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "reactive_pg_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    let mut state = ServiceState::new();
    let pool = bootstrap::create_pool(&cli, &mut state).context("failed to create connection pool")?;

    if cli.verify_connection
        && let Err(err) = pool.check_connectivity().await
    {
        state.shutdown();
        return Err(err).context("database connectivity check failed");
    }

    bootstrap::run_until_shutdown(state).await;

    Ok(())
}
