//! Presence query handlers: list online users, get one user's status.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    PaginationParams, PresenceListResponse, PresenceStatusResponse, PresenceSummaryDto,
};
use crate::app_state::AppState;
use crate::domain::UserId;
use crate::error::{ErrorResponse, RelayError};

/// `GET /presence` — List online users with pagination.
///
/// # Errors
///
/// Never fails; the `Result` keeps the handler signature uniform.
#[utoipa::path(
    get,
    path = "/api/v1/presence",
    tag = "Presence",
    summary = "List online users",
    description = "Returns a paginated list of users with at least one live connection, sorted by user id.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated online users", body = PresenceListResponse),
    )
)]
pub async fn list_presence(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, RelayError> {
    let summaries = state.presence_service.registry().online_users().await;
    let (page, pagination) = params.paginate(summaries);

    Ok(Json(PresenceListResponse {
        data: page.into_iter().map(PresenceSummaryDto::from).collect(),
        pagination,
    }))
}

/// `GET /presence/{user_id}` — Presence status of a single user.
///
/// # Errors
///
/// Returns [`RelayError::InvalidRequest`] if `user_id` is empty.
#[utoipa::path(
    get,
    path = "/api/v1/presence/{user_id}",
    tag = "Presence",
    summary = "Get user presence",
    description = "Reports whether the user is online and how many live connections it has. Offline users are not an error.",
    params(
        ("user_id" = String, Path, description = "User identifier"),
    ),
    responses(
        (status = 200, description = "Presence status", body = PresenceStatusResponse),
        (status = 400, description = "Empty user id", body = ErrorResponse),
    )
)]
pub async fn get_presence(
    State(state): State<AppState>,
    Path(raw_user_id): Path<String>,
) -> Result<impl IntoResponse, RelayError> {
    let user_id = UserId::parse(&raw_user_id)
        .ok_or_else(|| RelayError::InvalidRequest("user id must not be empty".to_string()))?;

    let summary = state.presence_service.registry().snapshot(&user_id).await;
    Ok(Json(PresenceStatusResponse::new(&user_id, summary)))
}

/// Presence routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/presence", get(list_presence))
        .route("/presence/{user_id}", get(get_presence))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::RelayConfig;

    async fn get_json(state: &AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let app = crate::api::build_router().with_state(state.clone());
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router is infallible");
        };
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        let json = serde_json::from_slice(&bytes).unwrap_or_default();
        (status, json)
    }

    #[tokio::test]
    async fn offline_user_reports_offline() {
        let state = AppState::new(&RelayConfig::default());
        let (status, body) = get_json(&state, "/api/v1/presence/u1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["online"], false);
        assert_eq!(body["connections"], 0);
        assert!(body["online_since"].is_null());
    }

    #[tokio::test]
    async fn online_user_reports_connections() {
        let state = AppState::new(&RelayConfig::default());
        let service = &state.presence_service;
        let (_a, _rx_a) = service.connect(UserId::parse("u1")).await;
        let (_b, _rx_b) = service.connect(UserId::parse("u1")).await;

        let (status, body) = get_json(&state, "/api/v1/presence/u1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["online"], true);
        assert_eq!(body["connections"], 2);
    }

    #[tokio::test]
    async fn list_is_paginated_and_sorted() {
        let state = AppState::new(&RelayConfig::default());
        let service = &state.presence_service;
        let mut held = Vec::new();
        for raw in ["c", "a", "b"] {
            held.push(service.connect(UserId::parse(raw)).await);
        }

        let (status, body) = get_json(&state, "/api/v1/presence?page=1&per_page=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 3);
        assert_eq!(body["pagination"]["total_pages"], 2);
        let ids: Vec<&str> = body["data"]
            .as_array()
            .map(|items| items.iter().filter_map(|i| i["user_id"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(ids, ["a", "b"]);
    }
}
