//! WebSocket wire types: handshake parameters and inbound events.
//!
//! Every text frame is a JSON envelope `{"event": <name>, "data": <value>}`.
//! Outbound frames use the same envelope, see [`crate::domain::RelayEvent`].

use serde::Deserialize;

use crate::domain::{MessagePayload, UserId};

/// Query parameters accepted on `GET /ws`.
///
/// A client that already knows its identity can pass `?userId=<id>` and
/// skip the explicit `authenticate` event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandshakeParams {
    /// Pre-established identity supplied at connect time.
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

impl HandshakeParams {
    /// Returns the handshake identity, if a non-empty one was supplied.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id.as_deref().and_then(UserId::parse)
    }
}

/// Client → server event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Establish (or switch) the connection's identity. `data` is either
    /// the bare id or `{"userId": <id>}`.
    Authenticate(serde_json::Value),
    /// Send a message to the user named by the payload's `receiverId`.
    SendMessage(MessagePayload),
}

impl ClientEvent {
    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] for malformed JSON or unknown
    /// event names.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Extracts the identity carried by an `authenticate` event.
#[must_use]
pub fn identity_from(data: &serde_json::Value) -> Option<UserId> {
    match data.get("userId") {
        Some(user_id) => UserId::from_json(user_id),
        None => UserId::from_json(data),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_authenticate_with_bare_id() {
        let Ok(ClientEvent::Authenticate(data)) =
            ClientEvent::parse(r#"{"event":"authenticate","data":"u1"}"#)
        else {
            panic!("expected authenticate");
        };
        assert_eq!(identity_from(&data), UserId::parse("u1"));
    }

    #[test]
    fn parses_authenticate_with_object() {
        let Ok(ClientEvent::Authenticate(data)) =
            ClientEvent::parse(r#"{"event":"authenticate","data":{"userId":99}}"#)
        else {
            panic!("expected authenticate");
        };
        assert_eq!(identity_from(&data), UserId::parse("99"));
    }

    #[test]
    fn authenticate_with_empty_object_has_no_identity() {
        assert!(identity_from(&json!({"userId": ""})).is_none());
        assert!(identity_from(&json!({})).is_none());
    }

    #[test]
    fn parses_send_message_payload_verbatim() {
        let text = r#"{"event":"sendMessage","data":{"receiverId":"u2","text":"hi","n":1}}"#;
        let Ok(ClientEvent::SendMessage(payload)) = ClientEvent::parse(text) else {
            panic!("expected sendMessage");
        };
        assert_eq!(
            payload.as_value(),
            &json!({"receiverId": "u2", "text": "hi", "n": 1})
        );
    }

    #[test]
    fn rejects_unknown_event_and_garbage() {
        assert!(ClientEvent::parse(r#"{"event":"typing","data":{}}"#).is_err());
        assert!(ClientEvent::parse("not json").is_err());
    }

    #[test]
    fn handshake_ignores_empty_identity() {
        let params = HandshakeParams {
            user_id: Some(String::new()),
        };
        assert!(params.user_id().is_none());
        assert!(HandshakeParams::default().user_id().is_none());
    }
}
