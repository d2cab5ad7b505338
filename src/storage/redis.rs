//! Redis key-value store implementation
//!
//! This module provides a Redis-backed implementation of the SessionStore
//! trait on top of the `redis` crate's [`ConnectionManager`], which multiplexes
//! one connection across clones and reconnects on its own. Sessions stored
//! through this backend are plain JSON strings under predictable keys, so any
//! other Redis client can read them with a single `GET`.
//!
//! Enabled with the `redis-storage` feature.

use crate::error::{StoreError, StoreResult};
use crate::storage::SessionStore;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};

fn map_err(err: RedisError) -> StoreError {
    if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        StoreError::ConnectionUnavailable(err.to_string())
    } else {
        StoreError::Backend(err.to_string())
    }
}

/// Redis-backed key-value store
///
/// # Examples
///
/// ```no_run
/// use redsess::RedisStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = RedisStore::connect("redis://127.0.0.1:6379").await?;
///     # let _ = store;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Create a store from an already-established connection manager
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Connect to a Redis server by URL and create a store
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url).map_err(map_err)?;
        let manager = client.get_connection_manager().await.map_err(map_err)?;
        Ok(Self::new(manager))
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        conn.get::<_, Option<Vec<u8>>>(key).await.map_err(map_err)
    }

    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut conn = self.manager.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(map_err)
    }

    async fn del(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key).await.map_err(map_err)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool> {
        let mut conn = self.manager.clone();
        conn.expire::<_, bool>(key, ttl_seconds as i64)
            .await
            .map_err(map_err)
    }
}
