//! WebSocket connection loop.
//!
//! Drives one connection from accept to close: dispatches inbound events
//! to the [`PresenceService`] and writes outbox events to the socket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use super::messages::{ClientEvent, identity_from};
use crate::domain::{Session, UserId};
use crate::service::PresenceService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Registers the connection (and its handshake identity, if any).
/// - Reads events from the client and dispatches them in arrival order.
/// - Forwards events queued in the connection's outbox to the client.
/// - Deregisters the connection however the loop ends.
pub async fn run_connection(
    socket: WebSocket,
    service: Arc<PresenceService>,
    handshake_user: Option<UserId>,
) {
    let (mut session, mut outbox) = service.connect(handshake_user).await;
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_text_message(&text, &service, &mut session).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(error)) => {
                        tracing::debug!(connection_id = %session.id(), %error, "ws receive error");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
            // Event queued for this connection
            event = outbox.recv() => {
                let Some(event) = event else {
                    break;
                };
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(error) => {
                        tracing::warn!(connection_id = %session.id(), %error, "failed to encode event");
                        continue;
                    }
                };
                if ws_tx.send(Message::text(json)).await.is_err() {
                    break;
                }
            }
        }
    }

    service.disconnect(&mut session).await;
}

/// Dispatches one text frame. Malformed frames and unknown events are
/// ignored.
async fn handle_text_message(text: &str, service: &PresenceService, session: &mut Session) {
    let event = match ClientEvent::parse(text) {
        Ok(event) => event,
        Err(error) => {
            tracing::debug!(connection_id = %session.id(), %error, "ignoring unreadable frame");
            return;
        }
    };

    match event {
        ClientEvent::Authenticate(data) => {
            service.authenticate(session, identity_from(&data)).await;
        }
        ClientEvent::SendMessage(payload) => {
            service.deliver(session, payload).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{ConnectionHub, ConnectionState, PresenceRegistry, RelayEvent};

    fn make_service() -> PresenceService {
        PresenceService::new(
            Arc::new(PresenceRegistry::new()),
            Arc::new(ConnectionHub::new(16)),
        )
    }

    #[tokio::test]
    async fn authenticate_frame_registers_session() {
        let service = make_service();
        let (mut session, _rx) = service.connect(None).await;

        handle_text_message(
            r#"{"event":"authenticate","data":"u1"}"#,
            &service,
            &mut session,
        )
        .await;

        let Some(user_id) = UserId::parse("u1") else {
            panic!("valid user id");
        };
        assert_eq!(session.state(), &ConnectionState::Authenticated(user_id.clone()));
        assert!(service.registry().is_online(&user_id).await);
    }

    #[tokio::test]
    async fn send_message_frame_reaches_recipient() {
        let service = make_service();
        let (_recipient, mut rx) = service.connect(UserId::parse("u1")).await;
        let (mut sender, _sender_rx) = service.connect(UserId::parse("u2")).await;

        handle_text_message(
            r#"{"event":"sendMessage","data":{"receiverId":"u1","text":"hi"}}"#,
            &service,
            &mut sender,
        )
        .await;

        let Ok(RelayEvent::ReceiveMessage(payload)) = rx.try_recv() else {
            panic!("expected a message");
        };
        assert_eq!(payload.as_value(), &json!({"receiverId": "u1", "text": "hi"}));
    }

    #[tokio::test]
    async fn garbage_frame_changes_nothing() {
        let service = make_service();
        let (mut session, _rx) = service.connect(None).await;

        handle_text_message("{oops", &service, &mut session).await;
        handle_text_message(r#"{"event":"typing","data":{}}"#, &service, &mut session).await;

        assert_eq!(session.state(), &ConnectionState::Unauthenticated);
        assert_eq!(service.registry().user_count().await, 0);
    }
}
