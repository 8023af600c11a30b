//! Live adapter for the `IdSource` port.

use rand::rngs::OsRng;
use rand::TryRngCore;
use uuid::{Builder, Uuid};

use crate::error::Error;
use crate::ports::IdSource;

/// Bytes of entropy fetched per refill: enough for sixteen UUIDs.
pub const POOL_SIZE: usize = 16 * 16;

const UUID_LEN: usize = 16;

/// Identifier source that hands out version 4 UUIDs from a pool of random
/// bytes, refilling the pool from the entropy source once it is used up.
///
/// Pooling trades one system call per identifier for one per sixteen.
pub struct PooledIdSource<R = OsRng> {
    rng: R,
    pool: [u8; POOL_SIZE],
    pos: usize,
}

impl PooledIdSource<OsRng> {
    /// Creates a pooled source reading from the operating system CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for PooledIdSource<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> PooledIdSource<R> {
    /// Creates a pooled source drawing entropy from `rng`.
    ///
    /// The pool starts empty, so the first identifier triggers a fill.
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng, pool: [0; POOL_SIZE], pos: POOL_SIZE }
    }
}

impl<R> IdSource for PooledIdSource<R>
where
    R: TryRngCore + Send,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    fn next_id(&mut self) -> Result<Uuid, Error> {
        if self.pos == POOL_SIZE {
            // `pos` stays at the end on failure so a partial fill is never read.
            self.rng.try_fill_bytes(&mut self.pool).map_err(Error::generation)?;
            self.pos = 0;
        }

        let mut bytes = [0u8; UUID_LEN];
        bytes.copy_from_slice(&self.pool[self.pos..self.pos + UUID_LEN]);
        self.pos += UUID_LEN;

        Ok(Builder::from_random_bytes(bytes).into_uuid())
    }
}
