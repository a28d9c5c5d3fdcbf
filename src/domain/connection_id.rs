//! Type-safe connection identifier.
//!
//! [`ConnectionId`] is a newtype wrapper around [`uuid::Uuid`] (v4) so that
//! connection identifiers cannot be confused with user identifiers or any
//! other UUID in the system.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for one live transport-level connection.
///
/// Generated when a WebSocket is accepted and never reused. One user may
/// own many connections (tabs, devices); each gets its own `ConnectionId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    /// Creates a new random `ConnectionId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }

    #[test]
    fn displays_as_v4_uuid() {
        let Ok(uuid) = uuid::Uuid::parse_str(&ConnectionId::new().to_string()) else {
            panic!("display is not a uuid");
        };
        assert_eq!(uuid.get_version_num(), 4);
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = ConnectionId::new();
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, format!("\"{id}\""));
    }
}
