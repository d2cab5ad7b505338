//! Common type definitions used throughout the redsess library
//!
//! This module provides a newtype wrapper for session identifiers. Session IDs
//! are minted by the host runtime (web framework, PHP-compatible dispatcher,
//! load balancer cookie, ...) and are opaque to this crate: they are lookup
//! keys only, never validated or generated here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a session, supplied by the host runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the underlying string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
