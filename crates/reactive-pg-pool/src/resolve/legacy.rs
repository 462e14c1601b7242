//! Resolution of the legacy configuration shape.
//!
//! Connection options are resolved exactly like the current shape, reading
//! the URL from [`LegacyDataSourceConfig`] and the tuning values from
//! [`LegacyReactiveConfig`].
//!
//! Unlike the current shape, the max pool size is always set explicitly,
//! [`DEFAULT_LEGACY_MAX_SIZE`] when not configured.
//!
//! [`DEFAULT_LEGACY_MAX_SIZE`]: crate::DEFAULT_LEGACY_MAX_SIZE

use super::ResolvedOptions;
use crate::config::{DataSourceConfig, LegacyDataSourceConfig, LegacyReactiveConfig};
use crate::options::PgPoolOptions;
use crate::PgResult;

/// Resolves connection and pool options from the legacy shape.
pub(super) fn resolve(
    datasource: &DataSourceConfig,
    legacy_datasource: &LegacyDataSourceConfig,
    legacy_reactive: &LegacyReactiveConfig,
) -> PgResult<ResolvedOptions> {
    let connect = super::connect_options(
        legacy_datasource.url.as_deref(),
        datasource,
        legacy_reactive.cache_prepared_statements,
        legacy_reactive.pipelining_limit,
    )?;

    let pool = PgPoolOptions::new().with_max_size(legacy_datasource.max_size);

    Ok(ResolvedOptions { connect, pool })
}
