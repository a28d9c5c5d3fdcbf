//! Per-connection lifecycle state.
//!
//! A [`Session`] is owned by the task driving one connection. It tracks
//! where the connection is in its lifecycle and which identity (if any)
//! it is registered under. It performs no registry I/O itself; the
//! service layer applies the registry effects each transition reports.

use super::{ConnectionId, UserId};

/// Lifecycle state of a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Open, identity not yet established.
    Unauthenticated,
    /// Identity established and registered in the presence registry.
    Authenticated(UserId),
    /// Terminal.
    Closed,
}

/// Result of applying an identity to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// First identity for this connection.
    Established,
    /// Same identity as before; nothing changes.
    Unchanged,
    /// The connection switched identity and was registered under
    /// `previous` until now.
    Switched {
        /// Identity the connection is leaving.
        previous: UserId,
    },
    /// The session is closed; the identity was ignored.
    Rejected,
}

/// State of one live connection.
#[derive(Debug)]
pub struct Session {
    id: ConnectionId,
    state: ConnectionState,
}

impl Session {
    /// Creates an unauthenticated session for a freshly accepted connection.
    #[must_use]
    pub const fn new(id: ConnectionId) -> Self {
        Self {
            id,
            state: ConnectionState::Unauthenticated,
        }
    }

    /// Returns the connection identifier.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Returns the identity the connection is registered under, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        match &self.state {
            ConnectionState::Authenticated(user_id) => Some(user_id),
            ConnectionState::Unauthenticated | ConnectionState::Closed => None,
        }
    }

    /// Returns `true` once the session reached its terminal state.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.state, ConnectionState::Closed)
    }

    /// Moves the session to `Authenticated(user_id)`.
    pub fn authenticate(&mut self, user_id: UserId) -> Authentication {
        let outcome = match &self.state {
            ConnectionState::Closed => return Authentication::Rejected,
            ConnectionState::Authenticated(current) if *current == user_id => {
                return Authentication::Unchanged;
            }
            ConnectionState::Authenticated(current) => Authentication::Switched {
                previous: current.clone(),
            },
            ConnectionState::Unauthenticated => Authentication::Established,
        };
        self.state = ConnectionState::Authenticated(user_id);
        outcome
    }

    /// Moves the session to `Closed`, returning the identity it was
    /// registered under. Closing twice returns `None` the second time.
    pub fn close(&mut self) -> Option<UserId> {
        match std::mem::replace(&mut self.state, ConnectionState::Closed) {
            ConnectionState::Authenticated(user_id) => Some(user_id),
            ConnectionState::Unauthenticated | ConnectionState::Closed => None,
        }
    }
}
