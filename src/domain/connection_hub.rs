//! Per-connection outboxes.
//!
//! [`ConnectionHub`] owns one bounded [`tokio::sync::mpsc`] sender per live
//! connection. The connection task holds the matching receiver and writes
//! whatever arrives to its socket. Pushing never blocks: a full or closed
//! outbox drops the event.

use std::collections::HashMap;

use tokio::sync::{RwLock, mpsc};

use super::{ConnectionId, RelayEvent};

/// Table of outbound channels keyed by [`ConnectionId`].
#[derive(Debug)]
pub struct ConnectionHub {
    outboxes: RwLock<HashMap<ConnectionId, mpsc::Sender<RelayEvent>>>,
    capacity: usize,
}

impl ConnectionHub {
    /// Creates an empty hub whose outboxes buffer up to `capacity` events.
    ///
    /// A capacity of zero is bumped to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            outboxes: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Allocates a new connection id and its outbox.
    ///
    /// The caller owns the receiver and must call [`close`](Self::close)
    /// when the connection ends.
    pub async fn open(&self) -> (ConnectionId, mpsc::Receiver<RelayEvent>) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::channel(self.capacity);
        self.outboxes.write().await.insert(id, tx);
        (id, rx)
    }

    /// Drops the outbox of `id`. Returns `false` if it was already gone.
    pub async fn close(&self, id: ConnectionId) -> bool {
        self.outboxes.write().await.remove(&id).is_some()
    }

    /// Queues `event` for connection `id`.
    ///
    /// Returns `true` if the event was queued. Unknown ids, full outboxes
    /// and closed receivers all drop the event.
    pub async fn push(&self, id: ConnectionId, event: RelayEvent) -> bool {
        let outboxes = self.outboxes.read().await;
        let Some(tx) = outboxes.get(&id) else {
            tracing::debug!(connection_id = %id, "no outbox for connection");
            return false;
        };
        match tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::debug!(
                    connection_id = %id,
                    event = event.event_name(),
                    "outbox full, dropping event"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(connection_id = %id, "outbox closed, dropping event");
                false
            }
        }
    }

    /// Returns the number of open outboxes.
    pub async fn len(&self) -> usize {
        self.outboxes.read().await.len()
    }

    /// Returns `true` if no outbox is open.
    pub async fn is_empty(&self) -> bool {
        self.outboxes.read().await.is_empty()
    }
}
