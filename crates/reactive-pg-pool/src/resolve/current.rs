//! Resolution of the current configuration shape.

use crate::config::{DataSourceConfig, ReactiveConfig};
use crate::options::{PgConnectOptions, PgPoolOptions};
use crate::PgResult;

/// Resolves connection options from the generic datasource and the reactive config.
pub(super) fn connect_options(
    datasource: &DataSourceConfig,
    reactive: &ReactiveConfig,
) -> PgResult<PgConnectOptions> {
    super::connect_options(
        reactive.url.as_deref(),
        datasource,
        reactive.cache_prepared_statements,
        reactive.pipelining_limit,
    )
}

/// Resolves pool options; an absent max size stays unset.
pub(super) fn pool_options(reactive: &ReactiveConfig) -> PgPoolOptions {
    PgPoolOptions {
        max_size: reactive.max_size,
    }
}
