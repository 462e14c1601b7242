//! Application state and dependency injection.

use reactive_pg_pool::{PgPool, PoolSlot, ShutdownTasks};

/// Application state.
///
/// Acts as the container the connection pool is registered with, and owns
/// the tasks to run when the process shuts down.
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Default)]
pub struct ServiceState {
    postgres: PoolSlot<PgPool>,
    shutdown: ShutdownTasks,
}

impl ServiceState {
    /// Creates an empty application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered PostgreSQL pool, if any.
    pub fn postgres(&self) -> Option<&PgPool> {
        self.postgres.get()
    }

    /// Splits the state into the pool slot and the shutdown registry, so
    /// both can be handed to the pool lifecycle manager at once.
    pub fn registries(&mut self) -> (&PoolSlot<PgPool>, &mut ShutdownTasks) {
        (&self.postgres, &mut self.shutdown)
    }

    /// Runs every registered shutdown task.
    pub fn shutdown(&mut self) {
        self.shutdown.run();
    }
}
