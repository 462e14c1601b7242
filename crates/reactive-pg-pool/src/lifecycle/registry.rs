//! Container registration of the produced pool.

use std::fmt;
use std::sync::OnceLock;

use crate::{PgError, PgResult};

/// A container the lifecycle manager registers the pool with, so other
/// components can retrieve it later.
pub trait Registrar<P> {
    /// Registers the pool instance.
    ///
    /// # Errors
    ///
    /// Returns [`PgError::Registration`] if the container refuses the instance.
    fn register(&self, pool: P) -> PgResult<()>;
}

/// A single registration slot that can be written exactly once.
///
/// ```
/// use reactive_pg_pool::{PoolSlot, Registrar};
///
/// let slot = PoolSlot::new();
/// slot.register("primary").unwrap();
/// assert_eq!(slot.get(), Some(&"primary"));
/// assert!(slot.register("replica").is_err());
/// ```
pub struct PoolSlot<P> {
    pool: OnceLock<P>,
}

impl<P> PoolSlot<P> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            pool: OnceLock::new(),
        }
    }

    /// Returns the registered pool, if any.
    #[inline]
    pub fn get(&self) -> Option<&P> {
        self.pool.get()
    }

    /// Returns whether a pool has been registered.
    #[inline]
    pub fn is_registered(&self) -> bool {
        self.pool.get().is_some()
    }
}

impl<P> Default for PoolSlot<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Registrar<P> for PoolSlot<P> {
    fn register(&self, pool: P) -> PgResult<()> {
        self.pool
            .set(pool)
            .map_err(|_| PgError::Registration("a pool is already registered in this slot".into()))
    }
}

impl<P: fmt::Debug> fmt::Debug for PoolSlot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolSlot").field("pool", &self.pool.get()).finish()
    }
}
