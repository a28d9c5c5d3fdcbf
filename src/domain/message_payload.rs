//! Opaque chat message payload routed by the fanout.

use serde::{Deserialize, Serialize};

use super::UserId;

/// JSON field naming the recipient of a message.
pub const RECEIVER_FIELD: &str = "receiverId";

/// A message as sent by a client.
///
/// Only [`RECEIVER_FIELD`] is interpreted; every other field is forwarded
/// to the recipient byte-for-byte as it was parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessagePayload(serde_json::Value);

impl MessagePayload {
    /// Wraps a raw JSON value.
    #[must_use]
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Returns the recipient, or `None` when the field is missing or not
    /// a usable identity.
    #[must_use]
    pub fn receiver_id(&self) -> Option<UserId> {
        self.0.get(RECEIVER_FIELD).and_then(UserId::from_json)
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_string_receiver() {
        let payload = MessagePayload::new(json!({"receiverId": "u1", "text": "hi"}));
        assert_eq!(payload.receiver_id(), UserId::parse("u1"));
    }

    #[test]
    fn reads_numeric_receiver() {
        let payload = MessagePayload::new(json!({"receiverId": 7}));
        assert_eq!(payload.receiver_id(), UserId::parse("7"));
    }

    #[test]
    fn missing_or_empty_receiver_is_none() {
        assert!(MessagePayload::new(json!({"text": "hi"})).receiver_id().is_none());
        assert!(MessagePayload::new(json!({"receiverId": ""})).receiver_id().is_none());
        assert!(MessagePayload::new(json!("just a string")).receiver_id().is_none());
    }

    #[test]
    fn serializes_without_wrapping() {
        let raw = json!({"receiverId": "u1", "attachments": [1, 2], "meta": {"seen": false}});
        let payload = MessagePayload::new(raw.clone());
        assert_eq!(serde_json::to_value(&payload).ok(), Some(raw));
    }
}
