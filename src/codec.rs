//! Translation between native payloads and the stored wire form
//!
//! Sessions are stored as UTF-8 JSON objects so that non-Rust clients (a
//! Node.js service, a CLI, another web stack) can read and mutate the same
//! session state directly from the backend. This module converts between that
//! wire form and [`SessionPayload`] as a pair of pure functions: no ambient
//! session container is consulted or mutated.
//!
//! Decoding is lenient about "nothing there" and strict about corruption:
//! JSON `null` decodes to the empty payload (a missing key JSON-decodes to
//! null in several client stacks), while malformed text or a non-object value
//! is a [`CodecError`]. The lifecycle adapter decides what to do with that
//! error; the codec only reports it.

use crate::error::{CodecError, CodecResult};
use crate::payload::SessionPayload;
use serde_json::Value;

/// Serialize a native payload into the stored wire form
///
/// An empty payload encodes as `{}`, so other clients always find a valid
/// JSON object under the session key.
pub fn encode(payload: &SessionPayload) -> CodecResult<Vec<u8>> {
    Ok(serde_json::to_vec(payload)?)
}

/// Deserialize stored bytes back into a native payload
///
/// Fails with [`CodecError::Malformed`] when the bytes are not valid JSON and
/// [`CodecError::UnexpectedType`] when they are valid JSON but not an object.
/// JSON `null` is accepted and decodes to the empty payload.
pub fn decode(bytes: &[u8]) -> CodecResult<SessionPayload> {
    let value: Value = serde_json::from_slice(bytes)?;
    match value {
        Value::Object(map) => Ok(SessionPayload::from(map)),
        Value::Null => Ok(SessionPayload::new()),
        Value::Array(_) => Err(CodecError::UnexpectedType("array")),
        Value::String(_) => Err(CodecError::UnexpectedType("string")),
        Value::Number(_) => Err(CodecError::UnexpectedType("number")),
        Value::Bool(_) => Err(CodecError::UnexpectedType("boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> SessionPayload {
        let mut payload = SessionPayload::new();
        payload.insert("user_id", json!(42));
        payload.insert("cart", json!([1, 2, 3]));
        payload.insert(
            "profile",
            json!({"name": "Ada", "active": true, "score": 9.5, "bio": null}),
        );
        payload
    }

    #[test]
    fn test_round_trip() {
        let payload = sample_payload();
        let bytes = encode(&payload).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, payload, "decode(encode(x)) must equal x");
    }

    #[test]
    fn test_round_trip_preserves_top_level_order() {
        let payload = sample_payload();
        let bytes = encode(&payload).unwrap();
        let decoded = decode(&bytes).unwrap();

        let original: Vec<&str> = payload.iter().map(|(k, _)| k.as_str()).collect();
        let roundtrip: Vec<&str> = decoded.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_encode_empty_payload() {
        let bytes = encode(&SessionPayload::new()).unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[test]
    fn test_decode_empty_object() {
        let decoded = decode(b"{}").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_null_is_empty_payload() {
        let decoded = decode(b"null").unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        let result = decode(b"{\"user_id\": 42");
        assert!(matches!(result, Err(CodecError::Malformed(_))));
    }

    #[test]
    fn test_decode_empty_bytes_is_malformed() {
        // The adapter maps a store miss to an empty payload before decoding;
        // a present-but-empty value is corruption, not a miss.
        let result = decode(b"");
        assert!(matches!(result, Err(CodecError::Malformed(_))));
    }

    #[test]
    fn test_decode_non_object() {
        assert!(matches!(
            decode(b"[1,2,3]"),
            Err(CodecError::UnexpectedType("array"))
        ));
        assert!(matches!(
            decode(b"\"hello\""),
            Err(CodecError::UnexpectedType("string"))
        ));
        assert!(matches!(
            decode(b"42"),
            Err(CodecError::UnexpectedType("number"))
        ));
        assert!(matches!(
            decode(b"true"),
            Err(CodecError::UnexpectedType("boolean"))
        ));
    }

    #[test]
    fn test_decode_interop_payload() {
        // A payload written by a non-Rust client, e.g. JSON.stringify in node.
        let bytes = br#"{"user_id":42,"cart":[1,2,3]}"#;
        let decoded = decode(bytes).unwrap();
        assert_eq!(decoded.get("user_id"), Some(&json!(42)));
        assert_eq!(decoded.get("cart"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_encode_is_plain_json() {
        let mut payload = SessionPayload::new();
        payload.insert("user_id", json!(42));
        payload.insert("cart", json!([1, 2, 3]));

        let bytes = encode(&payload).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"user_id":42,"cart":[1,2,3]}"#
        );
    }
}
