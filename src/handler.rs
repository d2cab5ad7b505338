//! Session lifecycle adapter
//!
//! This module implements the bridge between a host runtime's session
//! lifecycle contract and a key-value store: the six callbacks (open, close,
//! read, write, destroy, gc) a session subsystem invokes around a request,
//! mapped onto GET/SET/DEL/EXPIRE against a [`SessionStore`] backend.
//!
//! The adapter favors availability over strictness. Host session
//! infrastructure is generally not prepared to handle storage exceptions
//! mid-request, so every operation degrades to its benign outcome: `read`
//! returns an empty payload on a miss, a backend error, or corrupted data;
//! `destroy` deletes best-effort; `gc` is a documented no-op because the
//! per-key TTL already expires sessions. The one failure that stays visible is
//! `write`'s primary SET, reported as `false` so the host can decide how to
//! react (discard state, fail a login, retry).
//!
//! Concurrent writers to the same session ID are not coordinated: the last
//! write/expire pair to reach the backend wins.

use crate::codec;
use crate::error::SessionError;
use crate::key::KeyBuilder;
use crate::payload::SessionPayload;
use crate::storage::SessionStore;
use crate::types::SessionId;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Default session time-to-live in seconds (30 minutes)
pub const DEFAULT_TTL_SECS: u64 = 1800;

/// The six session lifecycle callbacks a host runtime invokes
///
/// Any type implementing this trait can be registered with a host's session
/// subsystem; [`KvSessionHandler`] is the key-value-store-backed
/// implementation. Methods take `&mut self` because the adapter is a single
/// request-scoped instance and `close` drops its store reference.
#[async_trait]
pub trait SessionLifecycle: Send {
    /// Called when the host opens the session for a request
    async fn open(&mut self, save_path: &str, session_name: &str) -> bool;

    /// Called when the host is done with the session for this request
    async fn close(&mut self) -> bool;

    /// Fetch the session data for `id`
    ///
    /// "No session yet" is a normal condition, so this never fails: absence,
    /// backend errors, and corrupted data all yield an empty payload.
    async fn read(&mut self, id: &SessionId) -> SessionPayload;

    /// Persist the session data for `id`
    ///
    /// Returns `false` when the data could not be persisted.
    async fn write(&mut self, id: &SessionId, payload: &SessionPayload) -> bool;

    /// Delete the session data for `id`
    async fn destroy(&mut self, id: &SessionId) -> bool;

    /// Garbage-collect sessions older than `max_lifetime` seconds
    async fn gc(&mut self, max_lifetime: u64) -> bool;
}

/// Key-value-store-backed session lifecycle handler
///
/// Composes a [`KeyBuilder`] (where a session lives in the store), the JSON
/// codec (what is stored), and a [`SessionStore`] backend (how it is stored),
/// with a TTL refreshed on every read and write in place of explicit garbage
/// collection.
///
/// # Examples
///
/// ```
/// use redsess::{InMemoryStore, KvSessionHandler, SessionId, SessionLifecycle, SessionPayload};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut handler = KvSessionHandler::builder()
///         .store(InMemoryStore::new())
///         .ttl_seconds(1800)
///         .build()?;
///
///     let id = SessionId::from("abc123");
///     let mut payload = SessionPayload::new();
///     payload.insert("user_id", serde_json::json!(42));
///
///     assert!(handler.write(&id, &payload).await);
///     assert_eq!(handler.read(&id).await, payload);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct KvSessionHandler<S: SessionStore> {
    store: Option<S>,
    keys: KeyBuilder,
    ttl_seconds: u64,
}

impl<S: SessionStore> KvSessionHandler<S> {
    /// Create a builder for configuring a handler
    pub fn builder() -> KvSessionHandlerBuilder<S> {
        KvSessionHandlerBuilder::new()
    }

    /// Create a handler over `store` with default key layout and TTL
    pub fn new(store: S) -> Self {
        Self {
            store: Some(store),
            keys: KeyBuilder::new(),
            ttl_seconds: DEFAULT_TTL_SECS,
        }
    }

    /// The configured session time-to-live in seconds
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// The storage key this handler derives for a session ID
    pub fn key_for(&self, id: &SessionId) -> String {
        self.keys.build(id)
    }

    /// Whether the handler still holds a store reference
    ///
    /// Returns `false` after [`SessionLifecycle::close`]; all lifecycle calls
    /// then degrade to their empty/failure outcome.
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }
}

#[async_trait]
impl<S: SessionStore> SessionLifecycle for KvSessionHandler<S> {
    async fn open(&mut self, save_path: &str, session_name: &str) -> bool {
        // The store connection is injected at construction; the host's save
        // path and session name do not apply to a key-value backend.
        debug!(save_path, session_name, "session open");
        true
    }

    async fn close(&mut self) -> bool {
        debug!("session close, releasing store reference");
        self.store = None;
        true
    }

    async fn read(&mut self, id: &SessionId) -> SessionPayload {
        let Some(store) = self.store.as_ref() else {
            debug!(session_id = %id, "read with no store attached, returning empty payload");
            return SessionPayload::new();
        };
        let key = self.keys.build(id);

        let bytes = match store.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(%key, "no session data");
                return SessionPayload::new();
            }
            Err(err) => {
                warn!(%key, error = %err, "session read failed, returning empty payload");
                return SessionPayload::new();
            }
        };

        // A present-but-empty value is treated like a miss, not corruption.
        if bytes.is_empty() {
            debug!(%key, "empty session record");
            return SessionPayload::new();
        }

        let payload = match codec::decode(&bytes) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(%key, error = %err, "corrupted session data, returning empty payload");
                return SessionPayload::new();
            }
        };

        // Reading stale-but-present data beats failing the request, so a
        // failed TTL refresh is not fatal here.
        if let Err(err) = store.expire(&key, self.ttl_seconds).await {
            warn!(%key, error = %err, "failed to refresh session TTL on read");
        }

        payload
    }

    async fn write(&mut self, id: &SessionId, payload: &SessionPayload) -> bool {
        let Some(store) = self.store.as_ref() else {
            warn!(session_id = %id, "write with no store attached");
            return false;
        };
        let key = self.keys.build(id);

        let bytes = match codec::encode(payload) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%key, error = %err, "failed to encode session payload");
                return false;
            }
        };

        if let Err(err) = store.set(&key, &bytes).await {
            warn!(%key, error = %err, "failed to persist session");
            return false;
        }

        // The data is persisted at this point; a failed EXPIRE means the key
        // may linger past its lifetime, which is degraded but acceptable.
        if let Err(err) = store.expire(&key, self.ttl_seconds).await {
            warn!(%key, error = %err, "session persisted but TTL could not be set");
        }

        true
    }

    async fn destroy(&mut self, id: &SessionId) -> bool {
        let Some(store) = self.store.as_ref() else {
            warn!(session_id = %id, "destroy with no store attached");
            return false;
        };
        let key = self.keys.build(id);

        // Best-effort delete: the TTL will reap the key eventually even if
        // the DEL fails now.
        if let Err(err) = store.del(&key).await {
            warn!(%key, error = %err, "failed to delete session");
        }
        true
    }

    async fn gc(&mut self, max_lifetime: u64) -> bool {
        // Expiration is delegated entirely to the backend's per-key TTL,
        // refreshed on every read and write; there is nothing to sweep.
        debug!(max_lifetime, "gc is a no-op, TTL expiry owns session cleanup");
        true
    }
}

/// Builder for [`KvSessionHandler`]
///
/// Configuration surface: key namespace (default `"sessions"`), key prefix
/// (default `"PHPSESSID"`), segment separator (default `":"`), and TTL in
/// seconds (default 1800; override it with the host's gc-maxlifetime setting
/// when one is configured).
#[derive(Debug)]
pub struct KvSessionHandlerBuilder<S: SessionStore> {
    store: Option<S>,
    keys: KeyBuilder,
    ttl_seconds: u64,
}

impl<S: SessionStore> KvSessionHandlerBuilder<S> {
    fn new() -> Self {
        Self {
            store: None,
            keys: KeyBuilder::new(),
            ttl_seconds: DEFAULT_TTL_SECS,
        }
    }

    /// Set the key-value store backend (required)
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the key namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.keys = self.keys.namespace(namespace);
        self
    }

    /// Set the key prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.keys = self.keys.prefix(prefix);
        self
    }

    /// Set the key segment separator
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.keys = self.keys.separator(separator);
        self
    }

    /// Set the session time-to-live in seconds
    pub fn ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Build the handler
    ///
    /// Fails with [`SessionError::Configuration`] when no store was provided.
    pub fn build(self) -> Result<KvSessionHandler<S>, SessionError> {
        let store = self.store.ok_or_else(|| {
            SessionError::Configuration("a session store backend is required".to_string())
        })?;
        Ok(KvSessionHandler {
            store: Some(store),
            keys: self.keys,
            ttl_seconds: self.ttl_seconds,
        })
    }
}

impl<S: SessionStore> Default for KvSessionHandlerBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::storage::memory::InMemoryStore;
    use serde_json::json;

    /// Store double that fails selected operations, delegating the rest
    #[derive(Debug, Clone, Default)]
    struct FlakyStore {
        inner: InMemoryStore,
        fail_get: bool,
        fail_set: bool,
        fail_del: bool,
        fail_expire: bool,
    }

    #[async_trait]
    impl SessionStore for FlakyStore {
        async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
            if self.fail_get {
                return Err(StoreError::Backend("injected get failure".to_string()));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
            if self.fail_set {
                return Err(StoreError::Backend("injected set failure".to_string()));
            }
            self.inner.set(key, value).await
        }

        async fn del(&self, key: &str) -> StoreResult<()> {
            if self.fail_del {
                return Err(StoreError::Backend("injected del failure".to_string()));
            }
            self.inner.del(key).await
        }

        async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool> {
            if self.fail_expire {
                return Err(StoreError::Backend("injected expire failure".to_string()));
            }
            self.inner.expire(key, ttl_seconds).await
        }
    }

    fn sample_payload() -> SessionPayload {
        let mut payload = SessionPayload::new();
        payload.insert("user_id", json!(42));
        payload.insert("cart", json!([1, 2, 3]));
        payload
    }

    #[tokio::test]
    async fn test_builder_requires_store() {
        let result = KvSessionHandler::<InMemoryStore>::builder().build();
        assert!(matches!(result, Err(SessionError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_builder_defaults() {
        let handler = KvSessionHandler::builder()
            .store(InMemoryStore::new())
            .build()
            .unwrap();

        assert_eq!(handler.ttl_seconds(), DEFAULT_TTL_SECS);
        assert_eq!(
            handler.key_for(&SessionId::from("abc123")),
            "sessions:PHPSESSID:abc123"
        );
    }

    #[tokio::test]
    async fn test_builder_custom_key_layout() {
        let handler = KvSessionHandler::builder()
            .store(InMemoryStore::new())
            .namespace("app")
            .prefix("sid")
            .separator("/")
            .ttl_seconds(60)
            .build()
            .unwrap();

        assert_eq!(handler.ttl_seconds(), 60);
        assert_eq!(handler.key_for(&SessionId::from("x")), "app/sid/x");
    }

    #[tokio::test]
    async fn test_open_and_gc_are_noops() {
        let mut handler = KvSessionHandler::new(InMemoryStore::new());
        assert!(handler.open("/var/lib/sessions", "PHPSESSID").await);
        assert!(handler.gc(1440).await);
    }

    #[tokio::test]
    async fn test_read_degrades_to_empty_on_get_failure() {
        let store = FlakyStore {
            fail_get: true,
            ..Default::default()
        };
        let mut handler = KvSessionHandler::new(store);

        let payload = handler.read(&SessionId::from("abc123")).await;
        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn test_read_degrades_to_empty_on_corrupted_data() {
        let store = InMemoryStore::new();
        store
            .set("sessions:PHPSESSID:abc123", b"{not valid json")
            .await
            .unwrap();

        let mut handler = KvSessionHandler::new(store);
        let payload = handler.read(&SessionId::from("abc123")).await;
        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn test_read_treats_empty_record_as_miss() {
        let store = InMemoryStore::new();
        store.set("sessions:PHPSESSID:abc123", b"").await.unwrap();

        let mut handler = KvSessionHandler::new(store);
        let payload = handler.read(&SessionId::from("abc123")).await;
        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn test_read_survives_expire_failure() {
        let store = FlakyStore {
            fail_expire: true,
            ..Default::default()
        };
        store
            .inner
            .set("sessions:PHPSESSID:abc123", br#"{"user_id":42}"#)
            .await
            .unwrap();

        let mut handler = KvSessionHandler::new(store);
        let payload = handler.read(&SessionId::from("abc123")).await;
        assert_eq!(payload.get("user_id"), Some(&json!(42)));
    }

    #[tokio::test]
    async fn test_write_fails_on_set_failure() {
        let store = FlakyStore {
            fail_set: true,
            ..Default::default()
        };
        let mut handler = KvSessionHandler::new(store);

        assert!(!handler.write(&SessionId::from("abc123"), &sample_payload()).await);
    }

    #[tokio::test]
    async fn test_write_survives_expire_failure() {
        let store = FlakyStore {
            fail_expire: true,
            ..Default::default()
        };
        let inner = store.inner.clone();
        let mut handler = KvSessionHandler::new(store);

        assert!(handler.write(&SessionId::from("abc123"), &sample_payload()).await);

        // The data made it to the backend even though the TTL did not.
        let stored = inner.get("sessions:PHPSESSID:abc123").await.unwrap();
        assert!(stored.is_some());
        assert_eq!(inner.ttl("sessions:PHPSESSID:abc123").await, None);
    }

    #[tokio::test]
    async fn test_destroy_is_forgiving_of_del_failure() {
        let store = FlakyStore {
            fail_del: true,
            ..Default::default()
        };
        let mut handler = KvSessionHandler::new(store);

        assert!(handler.destroy(&SessionId::from("abc123")).await);
    }

    #[tokio::test]
    async fn test_lifecycle_calls_after_close_degrade() {
        let mut handler = KvSessionHandler::new(InMemoryStore::new());
        let id = SessionId::from("abc123");

        assert!(handler.write(&id, &sample_payload()).await);
        assert!(handler.close().await);
        assert!(!handler.is_open());

        assert!(handler.read(&id).await.is_empty());
        assert!(!handler.write(&id, &sample_payload()).await);
        assert!(!handler.destroy(&id).await);
        // gc stays a harmless no-op either way.
        assert!(handler.gc(1440).await);
    }

    #[tokio::test]
    async fn test_handler_is_usable_as_trait_object() {
        let mut handler: Box<dyn SessionLifecycle> =
            Box::new(KvSessionHandler::new(InMemoryStore::new()));

        let id = SessionId::from("abc123");
        assert!(handler.write(&id, &sample_payload()).await);
        assert_eq!(handler.read(&id).await, sample_payload());
    }
}
