//! Process-wide presence store: user identity → live connections.
//!
//! [`PresenceRegistry`] keeps a forward map from [`UserId`] to the user's
//! [`PresenceEntry`] and a reverse owner index from [`ConnectionId`] to
//! [`UserId`]. Both maps sit behind one [`tokio::sync::RwLock`] so every
//! operation observes and leaves a consistent pair.
//!
//! # Invariants
//!
//! - A user is present iff its connection set is non-empty.
//! - A connection is owned by at most one user at a time.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use super::presence_entry::{PresenceEntry, PresenceSummary};
use super::{ConnectionId, UserId};

#[derive(Debug, Default)]
struct RegistryState {
    users: HashMap<UserId, PresenceEntry>,
    owners: HashMap<ConnectionId, UserId>,
}

impl RegistryState {
    /// Removes `connection_id` from `user_id`'s set, pruning empty entries.
    fn detach(&mut self, user_id: &UserId, connection_id: ConnectionId) -> bool {
        let Some(entry) = self.users.get_mut(user_id) else {
            return false;
        };
        if !entry.connections.remove(&connection_id) {
            return false;
        }
        if entry.connections.is_empty() {
            self.users.remove(user_id);
        }
        if self.owners.get(&connection_id) == Some(user_id) {
            self.owners.remove(&connection_id);
        }
        true
    }
}

/// Registry of online users and their live connections.
///
/// Never exposes the underlying maps; all access goes through
/// [`register`](Self::register), [`unregister`](Self::unregister),
/// [`remove_connection`](Self::remove_connection) and the read helpers.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    state: RwLock<RegistryState>,
}

impl PresenceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `connection_id` to `user_id`'s connection set.
    ///
    /// Registering the same pair twice is a no-op. If the connection is
    /// currently owned by a different user it is moved, and that previous
    /// owner is returned.
    pub async fn register(&self, user_id: &UserId, connection_id: ConnectionId) -> Option<UserId> {
        let mut state = self.state.write().await;

        let previous = match state.owners.get(&connection_id) {
            Some(owner) if owner == user_id => return None,
            Some(owner) => Some(owner.clone()),
            None => None,
        };
        if let Some(owner) = &previous {
            state.detach(owner, connection_id);
        }

        state
            .users
            .entry(user_id.clone())
            .and_modify(|entry| {
                entry.connections.insert(connection_id);
            })
            .or_insert_with(|| PresenceEntry::new(connection_id));
        state.owners.insert(connection_id, user_id.clone());

        previous
    }

    /// Removes `connection_id` from `user_id`'s set.
    ///
    /// Drops the user's entry once its set is empty. Returns `false` when
    /// the pair was not registered.
    pub async fn unregister(&self, user_id: &UserId, connection_id: ConnectionId) -> bool {
        self.state.write().await.detach(user_id, connection_id)
    }

    /// Removes `connection_id` from whichever user owns it and returns
    /// that user.
    pub async fn remove_connection(&self, connection_id: ConnectionId) -> Option<UserId> {
        let mut state = self.state.write().await;
        let owner = state.owners.get(&connection_id).cloned()?;
        state.detach(&owner, connection_id);
        Some(owner)
    }

    /// Returns the current connection set for `user_id` (empty if offline).
    pub async fn lookup(&self, user_id: &UserId) -> HashSet<ConnectionId> {
        self.state
            .read()
            .await
            .users
            .get(user_id)
            .map(|entry| entry.connections.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if `user_id` has at least one live connection.
    pub async fn is_online(&self, user_id: &UserId) -> bool {
        self.state.read().await.users.contains_key(user_id)
    }

    /// Returns the presence summary of `user_id`, if online.
    pub async fn snapshot(&self, user_id: &UserId) -> Option<PresenceSummary> {
        self.state
            .read()
            .await
            .users
            .get(user_id)
            .map(|entry| PresenceSummary::from_entry(user_id, entry))
    }

    /// Returns summaries of every online user, sorted by user id.
    pub async fn online_users(&self) -> Vec<PresenceSummary> {
        let state = self.state.read().await;
        let mut summaries: Vec<PresenceSummary> = state
            .users
            .iter()
            .map(|(user_id, entry)| PresenceSummary::from_entry(user_id, entry))
            .collect();
        summaries.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        summaries
    }

    /// Returns the number of online users.
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Returns the number of registered connections across all users.
    pub async fn connection_count(&self) -> usize {
        self.state.read().await.owners.len()
    }
}
