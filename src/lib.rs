//! # redsess - Portable KV-Backed Session Persistence
//!
//! redsess plugs a host application's session lifecycle (open, close, read,
//! write, destroy, gc) into an external key-value store with native per-key
//! expiration. Session data is stored as plain JSON rather than a
//! host-specific wire format, so other processes (a Node.js service, a
//! worker in another language, a debugging CLI) can read and mutate the same
//! session state directly from the store.
//!
//! ## Features
//!
//! - **Six lifecycle callbacks**: the [`SessionLifecycle`] trait mirrors the
//!   classic save-handler contract, ready to register with any host dispatch
//! - **Portable JSON payloads**: [`SessionPayload`] round-trips arbitrary
//!   nested values with top-level ordering preserved
//! - **TTL instead of GC**: every read and write refreshes the key's
//!   expiration; no batch sweeps, the backend reaps idle sessions on its own
//! - **Pluggable backends**: [`InMemoryStore`] built in, Redis behind the
//!   `redis-storage` feature, or implement [`SessionStore`] yourself
//! - **Availability first**: backend hiccups surface as "no session", not as
//!   exceptions thrown into the host's request handling
//!
//! ## Quick Start
//!
//! ```
//! use redsess::{InMemoryStore, KvSessionHandler, SessionId, SessionLifecycle, SessionPayload};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut handler = KvSessionHandler::builder()
//!     .store(InMemoryStore::new())
//!     .namespace("sessions")
//!     .ttl_seconds(1800)
//!     .build()?;
//!
//! // The host runtime supplies the session ID; redsess never generates one.
//! let id = SessionId::from("abc123");
//!
//! let mut payload = SessionPayload::new();
//! payload.insert("user_id", serde_json::json!(42));
//! payload.insert("cart", serde_json::json!([1, 2, 3]));
//!
//! assert!(handler.write(&id, &payload).await);
//! assert_eq!(handler.read(&id).await, payload);
//!
//! handler.destroy(&id).await;
//! assert!(handler.read(&id).await.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Redis
//!
//! Enable the `redis-storage` feature and hand the handler a [`RedisStore`]:
//!
//! ```toml
//! [dependencies]
//! redsess = { version = "0.1", features = ["redis-storage"] }
//! ```
//!
//! ```no_run
//! # #[cfg(feature = "redis-storage")]
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use redsess::{KvSessionHandler, RedisStore};
//!
//! let store = RedisStore::connect("redis://127.0.0.1:6379").await?;
//! let handler = KvSessionHandler::builder().store(store).build()?;
//! # let _ = handler;
//! # Ok(())
//! # }
//! ```
//!
//! With the default key layout, a session `abc123` lives under
//! `sessions:PHPSESSID:abc123` as a JSON object: `GET` it from redis-cli or
//! any other client and you have the session.
//!
//! ## Module Overview
//!
//! - [`handler`]: the lifecycle adapter and its builder
//! - [`storage`]: the store trait and backends
//! - [`codec`]: JSON encode/decode between native and stored form
//! - [`key`]: storage key derivation
//! - [`payload`]: the native session payload type
//! - [`error`]: error types and result aliases
//!
//! ## License
//!
//! Licensed under either of Apache License 2.0 or MIT license at your option.

// Core type definitions
pub mod types;

// Error types
pub mod error;

// Native payload representation
pub mod payload;

// Native <-> stored form translation
pub mod codec;

// Storage key derivation
pub mod key;

// Store backends
pub mod storage;

// Lifecycle adapter
pub mod handler;

pub use error::{CodecError, CodecResult, Result, SessionError, StoreError, StoreResult};
pub use handler::{
    DEFAULT_TTL_SECS, KvSessionHandler, KvSessionHandlerBuilder, SessionLifecycle,
};
pub use key::{KeyBuilder, DEFAULT_NAMESPACE, DEFAULT_PREFIX, DEFAULT_SEPARATOR};
pub use payload::SessionPayload;
pub use storage::{memory::InMemoryStore, SessionStore};
pub use types::SessionId;

#[cfg(feature = "redis-storage")]
pub use storage::redis::RedisStore;
