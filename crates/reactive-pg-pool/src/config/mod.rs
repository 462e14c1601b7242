//! Externally supplied datasource configuration.
//!
//! The configuration hierarchy mirrors how settings are grouped at the
//! bootstrap layer:
//!
//! ```text
//! DataSourceConfig          # driver-agnostic: username, password, url
//! ReactiveConfig            # current reactive pool shape (all optional)
//! LegacyDataSourceConfig    # legacy shape: url, max size (required, default 20)
//! LegacyReactiveConfig      # legacy PostgreSQL tuning
//! ```
//!
//! All types deserialize from kebab-case keys and, with the `config` feature,
//! can be flattened into a `clap` parser with environment variable fallbacks.

mod datasource;
mod legacy;
mod reactive;

pub use datasource::DataSourceConfig;
pub use legacy::{DEFAULT_LEGACY_MAX_SIZE, LegacyDataSourceConfig, LegacyReactiveConfig};
pub use reactive::ReactiveConfig;
