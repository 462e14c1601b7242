//! Legacy datasource configuration shape.
//!
//! Kept for users who have not migrated to [`ReactiveConfig`]. The two
//! shapes differ in optionality: the legacy max pool size is required and
//! defaults to [`DEFAULT_LEGACY_MAX_SIZE`], independently of whatever the
//! driver would pick on its own.
//!
//! [`ReactiveConfig`]: crate::ReactiveConfig

use std::fmt;
use std::num::NonZeroU32;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::options::mask_url;

/// Max pool size used by the legacy configuration when none is given.
pub const DEFAULT_LEGACY_MAX_SIZE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(size) => size,
    None => unreachable!(),
};

fn default_legacy_max_size() -> NonZeroU32 {
    DEFAULT_LEGACY_MAX_SIZE
}

/// Legacy datasource settings: connection URL and pool size.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "kebab-case")]
pub struct LegacyDataSourceConfig {
    /// Legacy reactive connection URL
    #[cfg_attr(
        feature = "config",
        arg(
            id = "legacy_url",
            long = "legacy-url",
            env = "DATASOURCE_LEGACY_URL"
        )
    )]
    #[serde(default)]
    pub url: Option<String>,

    /// Legacy maximum size of the pool
    #[cfg_attr(
        feature = "config",
        arg(
            id = "legacy_max_size",
            long = "legacy-max-size",
            env = "DATASOURCE_LEGACY_MAX_SIZE",
            default_value_t = DEFAULT_LEGACY_MAX_SIZE
        )
    )]
    #[serde(default = "default_legacy_max_size")]
    pub max_size: NonZeroU32,
}

impl LegacyDataSourceConfig {
    /// Creates a legacy configuration with no URL and the legacy default pool size.
    pub fn new() -> Self {
        Self {
            url: None,
            max_size: DEFAULT_LEGACY_MAX_SIZE,
        }
    }

    /// Sets the legacy connection URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the legacy max pool size.
    #[must_use]
    pub fn with_max_size(mut self, max_size: NonZeroU32) -> Self {
        self.max_size = max_size;
        self
    }
}

impl Default for LegacyDataSourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LegacyDataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyDataSourceConfig")
            .field("url", &self.url.as_deref().map(mask_url))
            .field("max_size", &self.max_size)
            .finish()
    }
}

/// Legacy PostgreSQL tuning for the reactive pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "kebab-case", default)]
pub struct LegacyReactiveConfig {
    /// Whether prepared statements should be cached (legacy)
    #[cfg_attr(
        feature = "config",
        arg(
            id = "legacy_cache_prepared_statements",
            long = "legacy-cache-prepared-statements",
            env = "DATASOURCE_LEGACY_POSTGRESQL_CACHE_PREPARED_STATEMENTS"
        )
    )]
    pub cache_prepared_statements: Option<bool>,

    /// Maximum number of in-flight pipelined requests per connection (legacy)
    #[cfg_attr(
        feature = "config",
        arg(
            id = "legacy_pipelining_limit",
            long = "legacy-pipelining-limit",
            env = "DATASOURCE_LEGACY_POSTGRESQL_PIPELINING_LIMIT"
        )
    )]
    pub pipelining_limit: Option<NonZeroU32>,
}

impl LegacyReactiveConfig {
    /// Creates an empty legacy tuning configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether prepared statements are cached.
    #[must_use]
    pub fn with_cache_prepared_statements(mut self, enabled: bool) -> Self {
        self.cache_prepared_statements = Some(enabled);
        self
    }

    /// Sets the pipelining limit. Zero clears it back to the driver default.
    #[must_use]
    pub fn with_pipelining_limit(mut self, limit: u32) -> Self {
        self.pipelining_limit = NonZeroU32::new(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_max_size_defaults_to_twenty() {
        assert_eq!(LegacyDataSourceConfig::new().max_size.get(), 20);
        assert_eq!(LegacyDataSourceConfig::default().max_size, DEFAULT_LEGACY_MAX_SIZE);
    }

    #[test]
    fn legacy_max_size_default_applies_when_deserializing() {
        let config: LegacyDataSourceConfig =
            serde_json::from_str(r#"{ "url": "postgresql://localhost/db" }"#).unwrap();
        assert_eq!(config.url.as_deref(), Some("postgresql://localhost/db"));
        assert_eq!(config.max_size, DEFAULT_LEGACY_MAX_SIZE);
    }

    #[test]
    fn legacy_max_size_can_be_overridden() {
        let config: LegacyDataSourceConfig =
            serde_json::from_str(r#"{ "max-size": 5 }"#).unwrap();
        assert_eq!(config.max_size.get(), 5);
        assert_eq!(config.url, None);
    }

    #[test]
    fn legacy_reactive_defaults_are_unset() {
        let config = LegacyReactiveConfig::new();
        assert_eq!(config.cache_prepared_statements, None);
        assert_eq!(config.pipelining_limit, None);
    }
}
