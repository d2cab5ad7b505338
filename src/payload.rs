//! Native session payload representation
//!
//! This module provides [`SessionPayload`], the in-memory form of a session:
//! an ordered mapping from session-variable names to arbitrary JSON-compatible
//! values (strings, numbers, booleans, null, arrays, nested objects).
//!
//! The payload is the value the host runtime hands to `write` and receives
//! back from `read`. It is a plain value type: converting it to and from the
//! stored wire form never touches any shared or ambient session state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered mapping of session-variable names to JSON-compatible values
///
/// Insertion order of top-level variables is preserved through encode/decode,
/// so a payload written by this crate reads back with its variables in the
/// same order (and vice versa for payloads written by other clients).
///
/// # Examples
///
/// ```
/// use redsess::SessionPayload;
///
/// let mut payload = SessionPayload::new();
/// payload.insert("user_id", serde_json::json!(42));
/// payload.insert("cart", serde_json::json!([1, 2, 3]));
///
/// assert_eq!(payload.get("user_id"), Some(&serde_json::json!(42)));
/// assert_eq!(payload.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionPayload(Map<String, Value>);

impl SessionPayload {
    /// Create a new, empty payload
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Number of top-level session variables
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the payload holds no session variables
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Set a session variable, returning the previous value if one existed
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Get a session variable by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Remove a session variable, returning its value if it existed
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Check whether a session variable is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a session variable from any serializable value
    ///
    /// Fails only if the value cannot be represented as JSON (e.g. a map with
    /// non-string keys).
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, serde_json::Error> {
        let value = serde_json::to_value(value)?;
        Ok(self.0.insert(name.into(), value))
    }

    /// Get a session variable deserialized into a concrete type
    ///
    /// Returns `Ok(None)` when the variable is absent and an error when it is
    /// present but does not match the requested type.
    pub fn get_deserialized<T: for<'de> Deserialize<'de>>(
        &self,
        name: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        match self.0.get(name) {
            Some(value) => serde_json::from_value(value.clone()).map(Some),
            None => Ok(None),
        }
    }

    /// Iterate over the session variables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// View the payload as its underlying JSON object map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for SessionPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<SessionPayload> for Map<String, Value> {
    fn from(payload: SessionPayload) -> Self {
        payload.0
    }
}

impl FromIterator<(String, Value)> for SessionPayload {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SessionPayload {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
