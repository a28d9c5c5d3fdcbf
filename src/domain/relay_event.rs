//! Events pushed from the server to a connection's outbox.

use serde::Serialize;

use super::MessagePayload;

/// Server → client event.
///
/// Serialized with the same `{"event": .., "data": ..}` envelope the
/// clients use for inbound events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum RelayEvent {
    /// A message addressed to the connection's user. Carries the payload
    /// exactly as the sender emitted it.
    ReceiveMessage(MessagePayload),
}

impl RelayEvent {
    /// Returns the wire name of the event.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::ReceiveMessage(_) => "receiveMessage",
        }
    }
}
