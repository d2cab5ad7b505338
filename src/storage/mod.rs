//! Key-value store backends
//!
//! This module defines the trait-based abstraction over the external key-value
//! store that session records are persisted to, allowing different backend
//! implementations (in-memory, Redis, and any store exposing GET/SET/DEL with
//! per-key expiration).
//!
//! The trait deliberately stays at the raw key/bytes level: key derivation and
//! payload encoding belong to [`crate::key`] and [`crate::codec`], and the
//! degradation policy for backend failures belongs to the lifecycle adapter in
//! [`crate::handler`]. Backends report failures honestly via [`StoreError`]
//! and never absorb them.

use crate::error::StoreResult;
use async_trait::async_trait;

pub mod memory;

#[cfg(feature = "redis-storage")]
pub mod redis;

/// Trait for key-value store backends
///
/// This trait defines the four store operations the lifecycle adapter needs.
/// Implementations must be thread-safe; one store instance may serve many
/// request-scoped handlers concurrently.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the bytes stored under `key`
    ///
    /// # Returns
    ///
    /// `Ok(Some(bytes))` when the key exists, `Ok(None)` when it does not, or
    /// a store error
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Delete the value stored under `key`, if any
    async fn del(&self, key: &str) -> StoreResult<()>;

    /// Set the expiration of `key` to `ttl_seconds` from now
    ///
    /// # Returns
    ///
    /// `Ok(true)` when the expiration was applied, `Ok(false)` when the key
    /// does not exist, or a store error
    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool>;
}
