//! Driver seam: how a resolved configuration becomes a live pool.
//!
//! The lifecycle manager only needs two things from a driver: a way to build
//! a pool from [`PgConnectOptions`] and [`PgPoolOptions`], and a way to close
//! it again. [`DieselPoolDriver`] provides both on top of `deadpool` and
//! `diesel-async`.

mod diesel_pool;
mod hooks;
mod status;

use deadpool::managed::{Object, Pool};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;

pub use self::diesel_pool::{DieselPoolDriver, PgPool};
pub use self::status::PgPoolStatus;
use crate::PgResult;
use crate::options::{PgConnectOptions, PgPoolOptions};

/// Type alias for the connection pool built by [`DieselPoolDriver`].
pub type ConnectionPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Type alias for a connection object from the pool.
pub type PooledConnection = Object<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// A pool whose teardown is owned by the lifecycle manager.
pub trait ManagedPool {
    /// Closes the pool, releasing every pooled connection.
    ///
    /// May be called more than once; later calls are no-ops.
    fn close(&self);

    /// Returns whether the pool has been closed.
    fn is_closed(&self) -> bool;
}

/// Builds pools from resolved options.
pub trait PoolDriver {
    /// The pool type produced by this driver.
    ///
    /// Clones must share the same underlying pool: one clone is registered
    /// with the container, another is closed by the shutdown task.
    type Pool: ManagedPool + Clone + Send + Sync + 'static;

    /// Constructs a pool.
    ///
    /// # Errors
    ///
    /// Returns [`PgError::MissingDriverCapability`] if an option cannot be
    /// honoured, or another error if the pool cannot be built.
    ///
    /// [`PgError::MissingDriverCapability`]: crate::PgError::MissingDriverCapability
    fn create_pool(
        &self,
        connect: &PgConnectOptions,
        pool: &PgPoolOptions,
    ) -> PgResult<Self::Pool>;
}
