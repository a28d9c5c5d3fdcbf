//! Presence service: connection lifecycle and message fanout.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{
    Authentication, ConnectionHub, MessagePayload, PresenceRegistry, RelayEvent, Session, UserId,
};

/// Orchestration layer for the real-time relay.
///
/// Owns references to the [`PresenceRegistry`] (who is online where) and
/// the [`ConnectionHub`] (how to reach a connection). Each lifecycle
/// method applies a [`Session`] transition and then the registry effect
/// that transition implies.
///
/// Delivery is best effort: nothing here ever fails. Missing identities,
/// offline recipients and full outboxes are logged and dropped.
#[derive(Debug, Clone)]
pub struct PresenceService {
    registry: Arc<PresenceRegistry>,
    hub: Arc<ConnectionHub>,
}

impl PresenceService {
    /// Creates a new `PresenceService`.
    #[must_use]
    pub fn new(registry: Arc<PresenceRegistry>, hub: Arc<ConnectionHub>) -> Self {
        Self { registry, hub }
    }

    /// Returns a reference to the inner [`PresenceRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<PresenceRegistry> {
        &self.registry
    }

    /// Returns a reference to the inner [`ConnectionHub`].
    #[must_use]
    pub fn hub(&self) -> &Arc<ConnectionHub> {
        &self.hub
    }

    /// Opens a connection.
    ///
    /// When the handshake already carries an identity the session is
    /// authenticated and registered before this returns.
    pub async fn connect(
        &self,
        handshake_user: Option<UserId>,
    ) -> (Session, mpsc::Receiver<RelayEvent>) {
        let (connection_id, outbox) = self.hub.open().await;
        let mut session = Session::new(connection_id);
        tracing::debug!(%connection_id, "connection opened");

        if handshake_user.is_some() {
            self.authenticate(&mut session, handshake_user).await;
        }
        (session, outbox)
    }

    /// Applies an `authenticate` event to `session`.
    ///
    /// A connection that switches identity is moved from the previous
    /// user's set to the new one.
    pub async fn authenticate(&self, session: &mut Session, user_id: Option<UserId>) {
        let connection_id = session.id();
        let Some(user_id) = user_id else {
            tracing::debug!(%connection_id, "authenticate without identity ignored");
            return;
        };

        match session.authenticate(user_id.clone()) {
            Authentication::Established => {
                self.registry.register(&user_id, connection_id).await;
                tracing::info!(%connection_id, %user_id, "connection authenticated");
            }
            Authentication::Unchanged => {
                self.registry.register(&user_id, connection_id).await;
            }
            Authentication::Switched { previous } => {
                self.registry.unregister(&previous, connection_id).await;
                self.registry.register(&user_id, connection_id).await;
                tracing::info!(
                    %connection_id,
                    %previous,
                    %user_id,
                    "connection switched identity"
                );
            }
            Authentication::Rejected => {
                tracing::debug!(%connection_id, "authenticate on closed connection ignored");
            }
        }
    }

    /// Handles a `sendMessage` event from `sender`.
    ///
    /// Returns the number of recipient connections the payload was queued
    /// to. The sender itself is never told.
    pub async fn deliver(&self, sender: &Session, payload: MessagePayload) -> usize {
        let delivered = self.fanout(payload).await;
        tracing::debug!(
            sender = %sender.id(),
            sender_user = sender.user_id().map(UserId::as_str),
            delivered,
            "message fanned out"
        );
        delivered
    }

    /// Pushes `payload` verbatim to every live connection of its
    /// recipient and returns how many outboxes accepted it.
    ///
    /// Payloads without a recipient and recipients without connections
    /// are dropped.
    pub async fn fanout(&self, payload: MessagePayload) -> usize {
        let Some(receiver_id) = payload.receiver_id() else {
            tracing::debug!("message without receiverId dropped");
            return 0;
        };

        let targets = self.registry.lookup(&receiver_id).await;
        if targets.is_empty() {
            tracing::debug!(%receiver_id, "recipient offline, message dropped");
            return 0;
        }

        let mut delivered = 0usize;
        for connection_id in targets {
            let event = RelayEvent::ReceiveMessage(payload.clone());
            if self.hub.push(connection_id, event).await {
                delivered = delivered.saturating_add(1);
            }
        }
        delivered
    }

    /// Closes `session`, deregistering it if it was authenticated.
    ///
    /// Safe to call more than once.
    pub async fn disconnect(&self, session: &mut Session) {
        let connection_id = session.id();
        if let Some(user_id) = session.close() {
            self.registry.unregister(&user_id, connection_id).await;
            tracing::info!(%connection_id, %user_id, "connection closed");
        } else {
            tracing::debug!(%connection_id, "unauthenticated connection closed");
        }
        self.hub.close(connection_id).await;
    }
}
