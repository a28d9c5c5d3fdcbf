//! Service layer: lifecycle and fanout orchestration.
//!
//! Coordinates between the WebSocket and REST layers and the presence
//! registry / connection hub.

pub mod presence_service;

pub use presence_service::PresenceService;
