//! Error types for the redsess library
//!
//! This module provides error types using thiserror for all redsess operations.
//!
//! The taxonomy mirrors the degradation policy of the lifecycle adapter: store
//! errors and codec errors exist so that backends and the codec can report
//! failures precisely, but [`crate::handler::KvSessionHandler`] deliberately
//! absorbs most of them into degraded return values (empty payload, `false`)
//! instead of surfacing them to the host runtime.

use thiserror::Error;

/// Errors reported by a key-value store backend
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// No live backend connection is available
    #[error("store connection unavailable: {0}")]
    ConnectionUnavailable(String),

    /// The backend itself reported a failure (network, protocol, server error)
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors reported by the payload codec
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CodecError {
    /// Stored bytes are not well-formed JSON
    #[error("malformed session payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Stored bytes are valid JSON but not an object (or null)
    #[error("unexpected payload type: expected a JSON object, got {0}")]
    UnexpectedType(&'static str),
}

/// Umbrella error type for redsess operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SessionError {
    /// Store backend error
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Payload codec error
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Invalid or incomplete handler configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Type alias for redsess library Result
pub type Result<T> = std::result::Result<T, SessionError>;

/// Type alias for store backend Result
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Type alias for codec Result
pub type CodecResult<T> = std::result::Result<T, CodecError>;
