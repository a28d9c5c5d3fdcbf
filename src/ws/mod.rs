//! WebSocket layer: upgrade handler, connection loop, wire types.
//!
//! The WebSocket endpoint at `/ws` carries the real-time protocol:
//! `authenticate` and `sendMessage` from clients, `receiveMessage` to them.

pub mod connection;
pub mod handler;
pub mod messages;
