//! # edu-relay
//!
//! Real-time presence and message fanout for an educational platform.
//!
//! Clients hold WebSocket connections; each connection is tied to a user
//! identity either at handshake (`/ws?userId=..`) or through an
//! `authenticate` event. A user may have many connections (tabs,
//! devices). A `sendMessage` event is pushed, unchanged, to every live
//! connection of the user named by its `receiverId`. Delivery is
//! best effort: offline recipients and malformed events are dropped.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, REST)
//!     │
//!     ├── WS Handler (ws/)
//!     ├── REST Handlers (api/)
//!     │
//!     ├── PresenceService (service/)
//!     │
//!     ├── PresenceRegistry (domain/)   user → connections
//!     └── ConnectionHub (domain/)      connection → outbox
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
