//! Pool bootstrap and process lifecycle.

mod shutdown;

use std::time::Instant;

use reactive_pg_pool::{DieselPoolDriver, PgPool, PgResult, PoolHandle};

use crate::config::Cli;
use crate::service::ServiceState;
use crate::{TRACING_TARGET_SHUTDOWN, TRACING_TARGET_STARTUP};

/// Creates the connection pool from the CLI configuration and registers it
/// in the application state.
///
/// On error nothing is registered in `state`.
pub fn create_pool(cli: &Cli, state: &mut ServiceState) -> PgResult<PoolHandle<PgPool>> {
    let source = cli.config_source();
    let (slot, shutdown) = state.registries();
    let pool = reactive_pg_pool::create_pool(&source, &DieselPoolDriver::new(), slot, shutdown)
        .inspect_err(|err| {
            if err.is_configuration() {
                tracing::info!(
                    target: TRACING_TARGET_STARTUP,
                    suggestion = "Check the datasource URL and options, see --help",
                    "Recovery suggestion"
                );
            }
        })?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        database_url = %pool.database_url_masked(),
        max_size = pool.status().max_size,
        "Connection pool ready"
    );

    Ok(pool)
}

/// Waits for a shutdown signal, then runs every registered shutdown task.
pub async fn run_until_shutdown(mut state: ServiceState) {
    let start_time = Instant::now();

    shutdown::shutdown_signal().await;

    if let Some(pool) = state.postgres() {
        let status = pool.status();
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            size = status.size,
            available = status.available,
            waiting = status.waiting,
            "Connection pool status before shutdown"
        );
    }

    state.shutdown();

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        uptime_secs = start_time.elapsed().as_secs(),
        "Shutdown completed"
    );
}
