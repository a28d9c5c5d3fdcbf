//! REST API layer: route handlers, DTOs, router composition and the
//! OpenAPI document.
//!
//! Resource endpoints are mounted under `/api/v1`; system endpoints sit
//! at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "edu-relay",
        description = "Presence queries and message injection for the real-time relay. The WebSocket protocol at `/ws` is not part of this document."
    ),
    paths(
        handlers::system::health_handler,
        handlers::presence::list_presence,
        handlers::presence::get_presence,
        handlers::message::deliver_message,
    ),
    tags(
        (name = "System", description = "Health and liveness"),
        (name = "Presence", description = "Who is online"),
        (name = "Messages", description = "Server-side message fanout"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_rest_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/presence",
            "/api/v1/presence/{user_id}",
            "/api/v1/messages",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
