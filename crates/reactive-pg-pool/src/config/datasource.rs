//! Driver-agnostic datasource configuration.

use std::fmt;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::options::mask_url;

/// Generic datasource settings shared by every client of the database.
///
/// Credentials configured here take precedence over any credentials
/// embedded in the reactive connection URL.
///
/// The generic `url` is kept for clients that consume it directly; the
/// reactive pool never reads it and uses [`ReactiveConfig::url`] (or the
/// legacy URL) instead.
///
/// [`ReactiveConfig::url`]: crate::ReactiveConfig::url
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "kebab-case", default)]
pub struct DataSourceConfig {
    /// Datasource username
    #[cfg_attr(
        feature = "config",
        arg(
            id = "datasource_username",
            long = "datasource-username",
            env = "DATASOURCE_USERNAME"
        )
    )]
    pub username: Option<String>,

    /// Datasource password
    #[cfg_attr(
        feature = "config",
        arg(
            id = "datasource_password",
            long = "datasource-password",
            env = "DATASOURCE_PASSWORD"
        )
    )]
    pub password: Option<String>,

    /// Datasource URL (not used by the reactive pool)
    #[cfg_attr(
        feature = "config",
        arg(
            id = "datasource_url",
            long = "datasource-url",
            env = "DATASOURCE_URL"
        )
    )]
    pub url: Option<String>,
}

impl DataSourceConfig {
    /// Creates an empty datasource configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the generic datasource URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("url", &self.url.as_deref().map(mask_url))
            .finish()
    }
}
