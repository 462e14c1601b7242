//! Reactive pool configuration (current shape).

use std::fmt;
use std::num::NonZeroU32;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::options::mask_url;

/// PostgreSQL tuning for the reactive pool, layered on top of
/// [`DataSourceConfig`].
///
/// Every field is optional: an unset field leaves the driver default in
/// place rather than being replaced by a value chosen here.
///
/// [`DataSourceConfig`]: crate::DataSourceConfig
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "kebab-case", default)]
pub struct ReactiveConfig {
    /// Reactive connection URL (`postgresql://...`, `vertx-reactive:` prefix accepted)
    #[cfg_attr(
        feature = "config",
        arg(
            id = "reactive_url",
            long = "reactive-url",
            env = "DATASOURCE_REACTIVE_URL"
        )
    )]
    pub url: Option<String>,

    /// Maximum size of the pool (driver default when unset)
    #[cfg_attr(
        feature = "config",
        arg(
            id = "reactive_max_size",
            long = "reactive-max-size",
            env = "DATASOURCE_REACTIVE_MAX_SIZE"
        )
    )]
    pub max_size: Option<NonZeroU32>,

    /// Whether prepared statements should be cached on the client side
    #[cfg_attr(
        feature = "config",
        arg(
            id = "reactive_cache_prepared_statements",
            long = "reactive-cache-prepared-statements",
            env = "DATASOURCE_REACTIVE_POSTGRESQL_CACHE_PREPARED_STATEMENTS"
        )
    )]
    pub cache_prepared_statements: Option<bool>,

    /// Maximum number of in-flight pipelined requests per connection
    #[cfg_attr(
        feature = "config",
        arg(
            id = "reactive_pipelining_limit",
            long = "reactive-pipelining-limit",
            env = "DATASOURCE_REACTIVE_POSTGRESQL_PIPELINING_LIMIT"
        )
    )]
    pub pipelining_limit: Option<NonZeroU32>,
}

impl ReactiveConfig {
    /// Creates an empty reactive configuration (all driver defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reactive connection URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the maximum pool size. Zero clears it back to the driver default.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = NonZeroU32::new(max_size);
        self
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

impl fmt::Debug for ReactiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveConfig")
            .field("url", &self.url.as_deref().map(mask_url))
            .field("max_size", &self.max_size)
            .field("cache_prepared_statements", &self.cache_prepared_statements)
            .field("pipelining_limit", &self.pipelining_limit)
            .finish()
    }
}
