//! Storage key derivation
//!
//! Every session record lives in the backend under a single string key derived
//! from the configured namespace, prefix, separator, and the host-supplied
//! session ID: `namespace + sep + prefix + sep + id`. With the defaults this
//! yields keys like `sessions:PHPSESSID:abc123`, which groups all session
//! records under one scannable namespace and keeps them recognizable to other
//! clients sharing the store.
//!
//! Derivation is a pure function: the same configuration and session ID always
//! produce the same key. Configuration values are concatenated as-is; two
//! configurations that happen to collide on the same key are a caller error.

use crate::types::SessionId;

/// Default key namespace
pub const DEFAULT_NAMESPACE: &str = "sessions";

/// Default key prefix
pub const DEFAULT_PREFIX: &str = "PHPSESSID";

/// Default segment separator
pub const DEFAULT_SEPARATOR: &str = ":";

/// Derives backend storage keys from session IDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBuilder {
    namespace: String,
    prefix: String,
    separator: String,
}

impl KeyBuilder {
    /// Create a key builder with the default namespace, prefix, and separator
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Set the key namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the key prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the segment separator
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Derive the storage key for a session ID
    pub fn build(&self, id: &SessionId) -> String {
        format!(
            "{ns}{sep}{prefix}{sep}{id}",
            ns = self.namespace,
            sep = self.separator,
            prefix = self.prefix,
            id = id.as_str()
        )
    }
}

impl Default for KeyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_shape() {
        let keys = KeyBuilder::new();
        let id = SessionId::from("abc123");
        assert_eq!(keys.build(&id), "sessions:PHPSESSID:abc123");
    }

    #[test]
    fn test_custom_configuration() {
        let keys = KeyBuilder::new()
            .namespace("app")
            .prefix("sid")
            .separator("/");
        let id = SessionId::from("abc123");
        assert_eq!(keys.build(&id), "app/sid/abc123");
    }

    #[test]
    fn test_deterministic() {
        let keys = KeyBuilder::new();
        let id = SessionId::from("abc123");
        assert_eq!(keys.build(&id), keys.build(&id));
    }

    #[test]
    fn test_injective_across_ids() {
        let keys = KeyBuilder::new();
        let ids = ["a", "b", "ab", "a:b", ""];
        let built: Vec<String> = ids
            .iter()
            .map(|id| keys.build(&SessionId::from(*id)))
            .collect();

        for (i, left) in built.iter().enumerate() {
            for (j, right) in built.iter().enumerate() {
                if i != j {
                    assert_ne!(left, right, "distinct IDs must map to distinct keys");
                }
            }
        }
    }

    #[test]
    fn test_empty_configuration_concatenates_as_is() {
        let keys = KeyBuilder::new().namespace("").prefix("").separator("");
        let id = SessionId::from("abc123");
        assert_eq!(keys.build(&id), "abc123");
    }
}
