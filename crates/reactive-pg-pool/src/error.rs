//! Error types and utilities for pool configuration and lifecycle operations.
//!
//! Configuration errors are fatal at startup and are never recovered from
//! locally: a bad URL or an option the driver cannot honour aborts pool
//! creation and is surfaced to whatever bootstraps the process.

use std::borrow::Cow;

pub use deadpool::managed::TimeoutType;
use diesel::result::{ConnectionError, Error};
use diesel_async::pooled_connection::PoolError as DieselPoolError;
use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

use crate::TRACING_TARGET_CONNECTION;

/// Error type for resolving configuration and managing the pool.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// The connection URI could not be parsed.
    ///
    /// The URL is stored with its password masked so the error can be
    /// logged as-is.
    #[error("Configuration parse error for '{url}': {reason}")]
    ConfigurationParse {
        /// Masked form of the offending URL.
        url: String,
        /// Why the URL was rejected.
        reason: Cow<'static, str>,
    },

    /// The underlying driver cannot honour a resolved option.
    #[error("Driver does not support {0}")]
    MissingDriverCapability(Cow<'static, str>),

    /// The pool could not be registered with the container.
    ///
    /// Raised when a registration slot that may only be written once has
    /// already been filled.
    #[error("Registration error: {0}")]
    Registration(Cow<'static, str>),

    /// Database operation timed out.
    ///
    /// This can occur during connection creation, waiting for available connections,
    /// or connection recycling operations.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// Failed to establish or maintain a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Database query execution failed.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// Unexpected error occurred.
    ///
    /// This can occur when an error is encountered that is not covered by the
    /// other error types.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Creates a [`PgError::ConfigurationParse`] for the given (already masked) URL.
    pub(crate) fn parse(url: impl Into<String>, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::ConfigurationParse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns whether this error comes from invalid or unsupported configuration.
    ///
    /// Configuration errors are permanent: retrying with the same settings
    /// fails the same way.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PgError::ConfigurationParse { .. } | PgError::MissingDriverCapability(_)
        )
    }
}

impl From<DeadpoolError> for PgError {
    fn from(value: DeadpoolError) -> Self {
        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                tracing::warn!(target: TRACING_TARGET_CONNECTION, error = %err, "Unexpected post-create hook error");
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                tracing::error!(target: TRACING_TARGET_CONNECTION, "No tokio runtime specified for connection pool");
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "Connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] type for pool configuration and lifecycle operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_includes_url_and_reason() {
        let err = PgError::parse("not a uri", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Configuration parse error for 'not a uri': relative URL without a base"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn runtime_errors_are_not_configuration_errors() {
        assert!(PgError::MissingDriverCapability("x".into()).is_configuration());
        assert!(!PgError::Timeout(TimeoutType::Wait).is_configuration());
        assert!(!PgError::Registration("taken".into()).is_configuration());
    }

    #[test]
    fn closed_pool_maps_to_connection_error() {
        let err = PgError::from(DeadpoolError::Closed);
        assert!(matches!(
            err,
            PgError::Connection(ConnectionError::InvalidConnectionUrl(_))
        ));
    }
}
