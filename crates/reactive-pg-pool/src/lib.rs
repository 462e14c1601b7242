#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for configuration resolution.
///
/// Use this target for logging which configuration path was selected and
/// which options were resolved from it.
pub const TRACING_TARGET_CONFIG: &str = "reactive_pg_pool::config";

/// Tracing target for database connection operations.
///
/// Use this target for logging connection establishment, pool management, and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "reactive_pg_pool::connection";

/// Tracing target for pool lifecycle operations.
///
/// Use this target for logging pool registration and shutdown.
pub const TRACING_TARGET_LIFECYCLE: &str = "reactive_pg_pool::lifecycle";

mod config;
mod driver;
mod error;
mod lifecycle;
mod options;
mod resolve;

pub use crate::config::{
    DEFAULT_LEGACY_MAX_SIZE, DataSourceConfig, LegacyDataSourceConfig, LegacyReactiveConfig,
    ReactiveConfig,
};
pub use crate::driver::{
    ConnectionPool, DieselPoolDriver, ManagedPool, PgPool, PgPoolStatus, PoolDriver,
    PooledConnection,
};
pub use crate::error::{PgError, PgResult, TimeoutType};
pub use crate::lifecycle::{
    PoolHandle, PoolSlot, Registrar, ShutdownHooks, ShutdownTask, ShutdownTasks, create_pool,
};
pub use crate::options::{LEGACY_URL_PREFIX, PgConnectOptions, PgPoolOptions, strip_legacy_prefix};
pub use crate::resolve::{ConfigSource, ResolvedOptions};
