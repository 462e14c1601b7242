//! Configuration resolution.
//!
//! Turns one of the two configuration shapes into the normalized
//! [`PgConnectOptions`] and [`PgPoolOptions`] the driver consumes. The shape
//! is chosen once, up front, through [`ConfigSource`]; the current and
//! legacy paths are never merged.

mod current;
mod legacy;

use std::num::NonZeroU32;

use crate::config::{
    DataSourceConfig, LegacyDataSourceConfig, LegacyReactiveConfig, ReactiveConfig,
};
use crate::options::{PgConnectOptions, PgPoolOptions, mask_url, strip_legacy_prefix};
use crate::{PgResult, TRACING_TARGET_CONFIG};

/// Fully resolved options, ready for pool construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Connection options.
    pub connect: PgConnectOptions,
    /// Pool sizing options.
    pub pool: PgPoolOptions,
}

/// The configuration a pool is built from.
///
/// Both variants share the generic [`DataSourceConfig`], which supplies the
/// credentials; everything else comes from the variant's own reactive
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Current configuration shape.
    Current {
        /// Generic datasource settings.
        datasource: DataSourceConfig,
        /// Reactive pool settings.
        reactive: ReactiveConfig,
    },
    /// Legacy configuration shape, kept for backward compatibility.
    Legacy {
        /// Generic datasource settings.
        datasource: DataSourceConfig,
        /// Legacy URL and pool size.
        legacy_datasource: LegacyDataSourceConfig,
        /// Legacy PostgreSQL tuning.
        legacy_reactive: LegacyReactiveConfig,
    },
}

impl ConfigSource {
    /// Creates a source for the current configuration shape.
    pub fn current(datasource: DataSourceConfig, reactive: ReactiveConfig) -> Self {
        Self::Current {
            datasource,
            reactive,
        }
    }

    /// Creates a source for the legacy configuration shape.
    pub fn legacy(
        datasource: DataSourceConfig,
        legacy_datasource: LegacyDataSourceConfig,
        legacy_reactive: LegacyReactiveConfig,
    ) -> Self {
        Self::Legacy {
            datasource,
            legacy_datasource,
            legacy_reactive,
        }
    }

    /// Picks the active shape from a legacy-mode flag decided by the bootstrap.
    ///
    /// The configuration belonging to the inactive shape is dropped.
    pub fn select(
        legacy: bool,
        datasource: DataSourceConfig,
        reactive: ReactiveConfig,
        legacy_datasource: LegacyDataSourceConfig,
        legacy_reactive: LegacyReactiveConfig,
    ) -> Self {
        if legacy {
            Self::legacy(datasource, legacy_datasource, legacy_reactive)
        } else {
            Self::current(datasource, reactive)
        }
    }

    /// Returns whether the legacy shape is active.
    #[inline]
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy { .. })
    }

    /// Resolves the configuration into connection and pool options.
    ///
    /// # Errors
    ///
    /// Returns [`PgError::ConfigurationParse`] if the configured URL cannot
    /// be parsed. Nothing is defaulted in its place.
    ///
    /// [`PgError::ConfigurationParse`]: crate::PgError::ConfigurationParse
    #[tracing::instrument(skip_all, target = TRACING_TARGET_CONFIG, fields(legacy = self.is_legacy()))]
    pub fn resolve(&self) -> PgResult<ResolvedOptions> {
        let resolved = match self {
            Self::Current {
                datasource,
                reactive,
            } => ResolvedOptions {
                connect: current::connect_options(datasource, reactive)?,
                pool: current::pool_options(reactive),
            },
            Self::Legacy {
                datasource,
                legacy_datasource,
                legacy_reactive,
            } => legacy::resolve(datasource, legacy_datasource, legacy_reactive)?,
        };

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            host = ?resolved.connect.host,
            port = ?resolved.connect.port,
            database = ?resolved.connect.database,
            user = ?resolved.connect.user,
            cache_prepared_statements = ?resolved.connect.cache_prepared_statements,
            pipelining_limit = ?resolved.connect.pipelining_limit,
            max_size = ?resolved.pool.max_size,
            "Resolved pool configuration"
        );

        Ok(resolved)
    }
}

/// Connection option resolution shared by both shapes.
///
/// Steps, in order: parse the URL (legacy prefix stripped) or start empty,
/// then let explicit credentials and tuning values override.
fn connect_options(
    url: Option<&str>,
    datasource: &DataSourceConfig,
    cache_prepared_statements: Option<bool>,
    pipelining_limit: Option<NonZeroU32>,
) -> PgResult<PgConnectOptions> {
    let mut options = match url {
        Some(url) => {
            let stripped = strip_legacy_prefix(url);
            if stripped.len() != url.len() {
                tracing::debug!(
                    target: TRACING_TARGET_CONFIG,
                    url = %mask_url(url),
                    "Stripped legacy scheme prefix from connection URL"
                );
            }
            PgConnectOptions::from_uri(stripped)?
        }
        None => PgConnectOptions::new(),
    };

    if let Some(username) = &datasource.username {
        options.user = Some(username.clone());
    }

    if let Some(password) = &datasource.password {
        options.password = Some(password.clone());
    }

    if let Some(enabled) = cache_prepared_statements {
        options.cache_prepared_statements = Some(enabled);
    }

    if let Some(limit) = pipelining_limit {
        options.pipelining_limit = Some(limit);
    }

    Ok(options)
}
