//! Domain layer: identities, presence registry, sessions and outboxes.
//!
//! This module contains the in-memory model of who is online: user and
//! connection identities, the presence registry mapping users to their
//! live connections, the per-connection lifecycle state, and the hub of
//! outbound channels used to deliver events to connections.

pub mod connection_hub;
pub mod connection_id;
pub mod message_payload;
pub mod presence_entry;
pub mod presence_registry;
pub mod relay_event;
pub mod session;
pub mod user_id;

pub use connection_hub::ConnectionHub;
pub use connection_id::ConnectionId;
pub use message_payload::MessagePayload;
pub use presence_entry::{PresenceEntry, PresenceSummary};
pub use presence_registry::PresenceRegistry;
pub use relay_event::RelayEvent;
pub use session::{Authentication, ConnectionState, Session};
pub use user_id::UserId;
