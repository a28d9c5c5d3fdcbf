//! Presence entry: one online user's live connections plus metadata.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ConnectionId, UserId};

/// Registry value for a single online user.
///
/// An entry only exists while `connections` is non-empty; the registry
/// drops it as soon as the last connection goes away.
#[derive(Debug, Clone)]
pub struct PresenceEntry {
    /// Live connections owned by the user.
    pub connections: HashSet<ConnectionId>,

    /// When the user's first connection of the current presence period
    /// was registered.
    pub online_since: DateTime<Utc>,
}

impl PresenceEntry {
    /// Creates an entry holding a single connection.
    #[must_use]
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connections: HashSet::from([connection_id]),
            online_since: Utc::now(),
        }
    }
}

/// Read-only view of a user's presence for list and status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PresenceSummary {
    /// The online user.
    pub user_id: UserId,
    /// Number of live connections.
    pub connections: usize,
    /// Start of the current presence period.
    pub online_since: DateTime<Utc>,
}

impl PresenceSummary {
    /// Builds a summary for `user_id` from its registry entry.
    #[must_use]
    pub fn from_entry(user_id: &UserId, entry: &PresenceEntry) -> Self {
        Self {
            user_id: user_id.clone(),
            connections: entry.connections.len(),
            online_since: entry.online_since,
        }
    }
}
