//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── datasource: DataSourceConfig                # Username, password, generic URL
//! ├── reactive: ReactiveConfig                    # Current pool shape
//! ├── legacy_datasource: LegacyDataSourceConfig   # Legacy URL and max size
//! ├── legacy_reactive: LegacyReactiveConfig       # Legacy PostgreSQL tuning
//! ├── legacy: bool                                # Selects the legacy shape
//! └── verify_connection: bool                     # Runs SELECT 1 after startup
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure the reactive pool
//! reactive-pg-cli --reactive-url "postgresql://..." --reactive-max-size 16
//!
//! # Or via environment variables
//! DATASOURCE_REACTIVE_URL="postgresql://..." reactive-pg-cli
//! ```

use std::process;

use clap::Parser;
use reactive_pg_pool::{
    ConfigSource, DataSourceConfig, LegacyDataSourceConfig, LegacyReactiveConfig, ReactiveConfig,
};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
///
/// Combines all datasource configuration groups:
/// - [`DataSourceConfig`]: credentials shared by every database client
/// - [`ReactiveConfig`]: the current reactive pool shape
/// - [`LegacyDataSourceConfig`] and [`LegacyReactiveConfig`]: the legacy shape
#[derive(Debug, Clone, Parser)]
#[command(name = "reactive-pg-cli")]
#[command(about = "Creates and manages a reactive PostgreSQL connection pool")]
#[command(version)]
pub struct Cli {
    /// Driver-agnostic datasource configuration.
    #[clap(flatten)]
    pub datasource: DataSourceConfig,

    /// Reactive pool configuration (current shape).
    #[clap(flatten)]
    pub reactive: ReactiveConfig,

    /// Legacy datasource configuration.
    #[clap(flatten)]
    pub legacy_datasource: LegacyDataSourceConfig,

    /// Legacy PostgreSQL tuning.
    #[clap(flatten)]
    pub legacy_reactive: LegacyReactiveConfig,

    /// Use the legacy configuration shape instead of the current one
    #[arg(long, env = "DATASOURCE_LEGACY", default_value_t = false)]
    pub legacy: bool,

    /// Verify the database is reachable once the pool is created
    #[arg(long, env = "DATASOURCE_VERIFY_CONNECTION", default_value_t = false)]
    pub verify_connection: bool,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// This is the preferred way to initialize the CLI configuration as it ensures
    /// .env files are loaded before clap parses arguments, allowing environment
    /// variables from .env to be used as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Returns the configuration shape selected by the `--legacy` flag.
    ///
    /// Settings of the inactive shape are ignored.
    pub fn config_source(&self) -> ConfigSource {
        ConfigSource::select(
            self.legacy,
            self.datasource.clone(),
            self.reactive.clone(),
            self.legacy_datasource.clone(),
            self.legacy_reactive.clone(),
        )
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Logs configuration (passwords and URLs are masked).
    pub fn log(&self) {
        Self::log_build_info();

        if self.legacy {
            tracing::info!(
                target: TRACING_TARGET_CONFIG,
                datasource = ?self.datasource,
                legacy_datasource = ?self.legacy_datasource,
                legacy_reactive = ?self.legacy_reactive,
                "Using legacy datasource configuration"
            );
        } else {
            tracing::info!(
                target: TRACING_TARGET_CONFIG,
                datasource = ?self.datasource,
                reactive = ?self.reactive,
                "Using reactive datasource configuration"
            );
        }

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            verify_connection = self.verify_connection,
            "Startup options"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use clap::CommandFactory;
    use reactive_pg_pool::DEFAULT_LEGACY_MAX_SIZE;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("reactive-pg-cli").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_current_shape() {
        let cli = parse(&[
            "--reactive-url",
            "postgresql://u:p@host:5432/db",
            "--reactive-max-size",
            "16",
            "--reactive-cache-prepared-statements",
            "true",
            "--datasource-username",
            "alice",
        ]);

        assert!(!cli.legacy);
        assert_eq!(cli.reactive.max_size, NonZeroU32::new(16));
        assert_eq!(cli.reactive.cache_prepared_statements, Some(true));
        assert_eq!(cli.datasource.username.as_deref(), Some("alice"));

        let source = cli.config_source();
        assert!(!source.is_legacy());

        let resolved = source.resolve().unwrap();
        assert_eq!(resolved.connect.user.as_deref(), Some("alice"));
        assert_eq!(resolved.connect.password.as_deref(), Some("p"));
        assert_eq!(resolved.pool.max_size, NonZeroU32::new(16));
    }

    #[test]
    fn legacy_max_size_defaults_to_twenty() {
        let cli = parse(&["--legacy", "--legacy-url", "postgresql://host/db"]);

        assert!(cli.legacy);
        assert_eq!(cli.legacy_datasource.max_size, DEFAULT_LEGACY_MAX_SIZE);

        let resolved = cli.config_source().resolve().unwrap();
        assert_eq!(resolved.pool.max_size, NonZeroU32::new(20));
    }

    #[test]
    fn inactive_shape_is_ignored() {
        let cli = parse(&[
            "--reactive-url",
            "postgresql://current/db",
            "--legacy-url",
            "postgresql://legacy/db",
        ]);

        let resolved = cli.config_source().resolve().unwrap();
        assert_eq!(resolved.connect.host.as_deref(), Some("current"));
        assert_eq!(resolved.pool.max_size, None);
    }

    #[test]
    fn groups_keep_their_own_values() {
        let cli = parse(&[
            "--datasource-url",
            "postgresql://generic/db",
            "--reactive-url",
            "postgresql://current/db",
            "--reactive-max-size",
            "8",
            "--reactive-cache-prepared-statements",
            "true",
            "--reactive-pipelining-limit",
            "32",
            "--legacy-url",
            "postgresql://legacy/db",
            "--legacy-max-size",
            "5",
            "--legacy-cache-prepared-statements",
            "false",
            "--legacy-pipelining-limit",
            "16",
        ]);

        assert_eq!(cli.datasource.url.as_deref(), Some("postgresql://generic/db"));

        assert_eq!(cli.reactive.url.as_deref(), Some("postgresql://current/db"));
        assert_eq!(cli.reactive.max_size, NonZeroU32::new(8));
        assert_eq!(cli.reactive.cache_prepared_statements, Some(true));
        assert_eq!(cli.reactive.pipelining_limit, NonZeroU32::new(32));

        assert_eq!(cli.legacy_datasource.url.as_deref(), Some("postgresql://legacy/db"));
        assert_eq!(cli.legacy_datasource.max_size, NonZeroU32::new(5).unwrap());
        assert_eq!(cli.legacy_reactive.cache_prepared_statements, Some(false));
        assert_eq!(cli.legacy_reactive.pipelining_limit, NonZeroU32::new(16));
    }

    #[test]
    fn legacy_url_alone_parses() {
        let cli = parse(&["--legacy-url", "postgresql://legacy/db"]);

        assert_eq!(cli.legacy_datasource.url.as_deref(), Some("postgresql://legacy/db"));
        assert_eq!(cli.legacy_datasource.max_size, DEFAULT_LEGACY_MAX_SIZE);
        assert!(cli.reactive.url.is_none());
    }

    #[test]
    fn rejects_zero_max_size() {
        let result = Cli::try_parse_from(["reactive-pg-cli", "--reactive-max-size", "0"]);
        assert!(result.is_err());
    }
}
