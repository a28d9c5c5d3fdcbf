//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::domain::{ConnectionHub, PresenceRegistry};
use crate::service::PresenceService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Presence service for lifecycle handling and fanout.
    pub presence_service: Arc<PresenceService>,
}

impl AppState {
    /// Builds the domain and service layers for `config`.
    #[must_use]
    pub fn new(config: &RelayConfig) -> Self {
        let registry = Arc::new(PresenceRegistry::new());
        let hub = Arc::new(ConnectionHub::new(config.connection_buffer));
        Self {
            presence_service: Arc::new(PresenceService::new(registry, hub)),
        }
    }
}
