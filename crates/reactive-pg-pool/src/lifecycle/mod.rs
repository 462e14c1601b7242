//! Pool lifecycle: creation, registration and teardown.
//!
//! [`create_pool`] is the single entry point run once at startup. It
//! resolves the configuration, builds the pool, registers it with the
//! container and schedules its closing at shutdown. Any failure leaves
//! nothing behind: no registered pool and no shutdown task.

mod registry;
mod shutdown;

use derive_more::Deref;

pub use self::registry::{PoolSlot, Registrar};
pub use self::shutdown::{ShutdownHooks, ShutdownTask, ShutdownTasks};
use crate::driver::{ManagedPool, PoolDriver};
use crate::resolve::{ConfigSource, ResolvedOptions};
use crate::{PgResult, TRACING_TARGET_LIFECYCLE};

/// Handle to a pool produced by [`create_pool`].
///
/// Dereferences to the pool itself.
#[derive(Debug, Clone, Deref)]
pub struct PoolHandle<P> {
    pool: P,
}

impl<P> PoolHandle<P> {
    /// Returns the underlying pool.
    pub fn into_inner(self) -> P {
        self.pool
    }
}

/// Creates, registers and schedules teardown of a pool.
///
/// Steps, in order:
///
/// 1. resolve `source` into connection and pool options;
/// 2. build the pool through `driver`;
/// 3. register a clone of the pool with `registrar`;
/// 4. add a shutdown task that closes the pool;
/// 5. return a handle to the pool.
///
/// # Errors
///
/// - Resolution errors (e.g. [`PgError::ConfigurationParse`]) are returned
///   before the driver is called.
/// - Driver errors are returned before anything is registered.
/// - If registration fails, the freshly built pool is closed and no
///   shutdown task is added.
///
/// [`PgError::ConfigurationParse`]: crate::PgError::ConfigurationParse
#[tracing::instrument(
    skip_all,
    target = TRACING_TARGET_LIFECYCLE,
    fields(legacy = source.is_legacy())
)]
pub fn create_pool<D, R, S>(
    source: &ConfigSource,
    driver: &D,
    registrar: &R,
    shutdown: &mut S,
) -> PgResult<PoolHandle<D::Pool>>
where
    D: PoolDriver + ?Sized,
    R: Registrar<D::Pool> + ?Sized,
    S: ShutdownHooks + ?Sized,
{
    let ResolvedOptions { connect, pool } = source.resolve().inspect_err(|err| {
        tracing::error!(target: TRACING_TARGET_LIFECYCLE, error = %err, "Failed to resolve pool configuration");
    })?;

    let pool = driver.create_pool(&connect, &pool).inspect_err(|err| {
        tracing::error!(target: TRACING_TARGET_LIFECYCLE, error = %err, "Failed to create connection pool");
    })?;

    if let Err(err) = registrar.register(pool.clone()) {
        tracing::error!(
            target: TRACING_TARGET_LIFECYCLE,
            error = %err,
            "Failed to register connection pool, closing it"
        );
        pool.close();
        return Err(err);
    }

    let closing = pool.clone();
    shutdown.add_shutdown_task(Box::new(move || closing.close()));

    tracing::info!(
        target: TRACING_TARGET_LIFECYCLE,
        "Connection pool created and registered"
    );

    Ok(PoolHandle { pool })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::options::{PgConnectOptions, PgPoolOptions};
    use crate::{
        DataSourceConfig, LegacyDataSourceConfig, LegacyReactiveConfig, PgError, ReactiveConfig,
    };

    #[derive(Debug, Clone, Default)]
    struct FakePool {
        connect: PgConnectOptions,
        options: PgPoolOptions,
        closed: Arc<AtomicBool>,
    }

    impl ManagedPool for FakePool {
        fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }

        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct FakeDriver {
        created: AtomicUsize,
        pools: Mutex<Vec<FakePool>>,
        fail: bool,
    }

    impl PoolDriver for FakeDriver {
        type Pool = FakePool;

        fn create_pool(
            &self,
            connect: &PgConnectOptions,
            pool: &PgPoolOptions,
        ) -> PgResult<FakePool> {
            if self.fail {
                return Err(PgError::MissingDriverCapability("everything".into()));
            }
            self.created.fetch_add(1, Ordering::SeqCst);
            let pool = FakePool {
                connect: connect.clone(),
                options: *pool,
                closed: Arc::default(),
            };
            self.pools.lock().unwrap().push(pool.clone());
            Ok(pool)
        }
    }

    #[derive(Default)]
    struct RecordingRegistrar {
        pools: Mutex<Vec<FakePool>>,
    }

    impl Registrar<FakePool> for RecordingRegistrar {
        fn register(&self, pool: FakePool) -> PgResult<()> {
            self.pools.lock().unwrap().push(pool);
            Ok(())
        }
    }

    fn current(url: &str) -> ConfigSource {
        ConfigSource::current(DataSourceConfig::new(), ReactiveConfig::new().with_url(url))
    }

    #[test]
    fn creates_registers_and_schedules_close() {
        let driver = FakeDriver::default();
        let registrar = RecordingRegistrar::default();
        let mut shutdown = ShutdownTasks::new();

        let source = ConfigSource::current(
            DataSourceConfig::new(),
            ReactiveConfig::new()
                .with_url("vertx-reactive:postgresql://u:p@host:5432/db")
                .with_cache_prepared_statements(true)
                .with_pipelining_limit(64),
        );

        let handle = create_pool(&source, &driver, &registrar, &mut shutdown).unwrap();

        assert_eq!(driver.created.load(Ordering::SeqCst), 1);
        assert_eq!(registrar.pools.lock().unwrap().len(), 1);
        assert_eq!(shutdown.len(), 1);

        assert_eq!(handle.connect.host.as_deref(), Some("host"));
        assert_eq!(handle.connect.port, Some(5432));
        assert_eq!(handle.connect.database.as_deref(), Some("db"));
        assert_eq!(handle.connect.user.as_deref(), Some("u"));
        assert_eq!(handle.connect.password.as_deref(), Some("p"));
        assert_eq!(handle.connect.cache_prepared_statements, Some(true));
        assert_eq!(handle.connect.pipelining_limit, NonZeroU32::new(64));
        assert_eq!(handle.options.max_size, None);

        assert!(!handle.is_closed());
        shutdown.run();
        assert!(handle.is_closed());
        assert!(registrar.pools.lock().unwrap()[0].is_closed());
    }

    #[test]
    fn legacy_source_always_sets_max_size() {
        let driver = FakeDriver::default();
        let slot = PoolSlot::new();
        let mut shutdown = ShutdownTasks::new();

        let source = ConfigSource::legacy(
            DataSourceConfig::new().with_username("bob").with_password("pw"),
            LegacyDataSourceConfig::new().with_max_size(NonZeroU32::new(5).unwrap()),
            LegacyReactiveConfig::new(),
        );

        let handle = create_pool(&source, &driver, &slot, &mut shutdown).unwrap();

        assert_eq!(handle.options.max_size, NonZeroU32::new(5));
        assert_eq!(
            handle.connect,
            PgConnectOptions::new().with_user("bob").with_password("pw")
        );
        assert!(slot.is_registered());
    }

    #[test]
    fn malformed_url_creates_nothing() {
        let driver = FakeDriver::default();
        let registrar = RecordingRegistrar::default();
        let mut shutdown = ShutdownTasks::new();

        let err = create_pool(&current("not a uri"), &driver, &registrar, &mut shutdown)
            .unwrap_err();

        assert!(matches!(err, PgError::ConfigurationParse { .. }));
        assert_eq!(driver.created.load(Ordering::SeqCst), 0);
        assert!(registrar.pools.lock().unwrap().is_empty());
        assert!(shutdown.is_empty());
    }

    #[test]
    fn driver_failure_registers_nothing() {
        let driver = FakeDriver {
            fail: true,
            ..FakeDriver::default()
        };
        let registrar = RecordingRegistrar::default();
        let mut shutdown = ShutdownTasks::new();

        let err = create_pool(&current("postgresql://host/db"), &driver, &registrar, &mut shutdown)
            .unwrap_err();

        assert!(matches!(err, PgError::MissingDriverCapability(_)));
        assert!(registrar.pools.lock().unwrap().is_empty());
        assert!(shutdown.is_empty());
    }

    #[test]
    fn registration_failure_closes_pool_without_shutdown_task() {
        let driver = FakeDriver::default();
        let slot = PoolSlot::new();
        let mut shutdown = ShutdownTasks::new();
        let source = current("postgresql://host/db");

        let first = create_pool(&source, &driver, &slot, &mut shutdown).unwrap();
        let err = create_pool(&source, &driver, &slot, &mut shutdown).unwrap_err();

        assert!(matches!(err, PgError::Registration(_)));
        assert_eq!(driver.created.load(Ordering::SeqCst), 2);
        assert_eq!(shutdown.len(), 1);
        assert!(!first.is_closed());
        assert!(!slot.get().unwrap().is_closed());

        let pools = driver.pools.lock().unwrap();
        assert_eq!(pools.len(), 2);
        assert!(!pools[0].is_closed());
        assert!(pools[1].is_closed());
    }

    #[tokio::test]
    async fn works_with_the_diesel_driver() {
        let slot = PoolSlot::new();
        let mut shutdown = ShutdownTasks::new();
        let source = ConfigSource::current(
            DataSourceConfig::new().with_username("alice"),
            ReactiveConfig::new()
                .with_url("postgres://mallory@localhost/app")
                .with_max_size(3),
        );

        let handle =
            create_pool(&source, &crate::DieselPoolDriver::new(), &slot, &mut shutdown).unwrap();

        assert_eq!(handle.status().max_size, 3);
        assert_eq!(handle.database_url_masked(), "postgresql://alice@localhost/app");

        shutdown.run();
        assert!(handle.is_closed());
        assert!(slot.get().unwrap().is_closed());
    }
}
