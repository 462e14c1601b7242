//! Normalized connection and pool options handed to the driver.
//!
//! These values are ephemeral: they are computed by the resolvers, consumed
//! by [`PoolDriver::create_pool`] and then dropped. Every field is optional,
//! and an unset field means the driver keeps its own default.
//!
//! [`PoolDriver::create_pool`]: crate::PoolDriver::create_pool

mod uri;

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

pub(crate) use uri::mask_url;
pub use uri::{LEGACY_URL_PREFIX, strip_legacy_prefix};

use crate::PgResult;

/// Connection options for a PostgreSQL pool.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PgConnectOptions {
    /// Server host name, IP address or unix socket directory.
    pub host: Option<String>,
    /// Server port.
    pub port: Option<u16>,
    /// Database name.
    pub database: Option<String>,
    /// Role used to authenticate.
    pub user: Option<String>,
    /// Password used to authenticate.
    pub password: Option<String>,
    /// Extra connection parameters taken from the URI query string
    /// (`sslmode`, `application_name`, ...).
    pub properties: BTreeMap<String, String>,
    /// Whether prepared statements are cached per connection.
    pub cache_prepared_statements: Option<bool>,
    /// Maximum number of pipelined requests per connection.
    pub pipelining_limit: Option<NonZeroU32>,
}

impl PgConnectOptions {
    /// Creates empty options; every value falls back to the driver default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a standard `postgres://` or `postgresql://` connection URI.
    ///
    /// The legacy `vertx-reactive:` prefix is *not* handled here; strip it
    /// first with [`strip_legacy_prefix`].
    ///
    /// # Errors
    ///
    /// Returns [`PgError::ConfigurationParse`] if the URI is malformed or
    /// does not use a PostgreSQL scheme.
    ///
    /// [`PgError::ConfigurationParse`]: crate::PgError::ConfigurationParse
    pub fn from_uri(uri: &str) -> PgResult<Self> {
        uri::parse_uri(uri)
    }

    /// Sets the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Sets the user.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets whether prepared statements are cached.
    #[must_use]
    pub fn with_cache_prepared_statements(mut self, enabled: bool) -> Self {
        self.cache_prepared_statements = Some(enabled);
        self
    }

    /// Sets the pipelining limit.
    #[must_use]
    pub fn with_pipelining_limit(mut self, limit: NonZeroU32) -> Self {
        self.pipelining_limit = Some(limit);
        self
    }
}

impl fmt::Debug for PgConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConnectOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("properties", &self.properties)
            .field("cache_prepared_statements", &self.cache_prepared_statements)
            .field("pipelining_limit", &self.pipelining_limit)
            .finish()
    }
}

/// Sizing options for a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PgPoolOptions {
    /// Maximum number of connections; the driver default applies when unset.
    pub max_size: Option<NonZeroU32>,
}

impl PgPoolOptions {
    /// Creates pool options that leave every value at the driver default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub fn with_max_size(mut self, max_size: NonZeroU32) -> Self {
        self.max_size = Some(max_size);
        self
    }
}
