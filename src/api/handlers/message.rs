//! Server-side message injection.
//!
//! Lets a trusted backend collaborator (e.g. the service that persists
//! chat history) push a stored message to the recipient's live
//! connections through the same fanout the WebSocket path uses.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::DeliverMessageResponse;
use crate::app_state::AppState;
use crate::domain::MessagePayload;
use crate::error::{ErrorResponse, RelayError};

/// `POST /messages` — Fan a message out to its recipient's connections.
///
/// # Errors
///
/// Returns [`RelayError::InvalidBody`] if the body is not JSON, and
/// [`RelayError::InvalidRequest`] if it has no usable `receiverId`.
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    tag = "Messages",
    summary = "Deliver a message",
    description = "Pushes the JSON body verbatim, as a `receiveMessage` event, to every live connection of the user named by its `receiverId`. Offline recipients are not an error: `delivered_to` is 0 and nothing is queued.",
    responses(
        (status = 202, description = "Message fanned out", body = DeliverMessageResponse),
        (status = 400, description = "Malformed JSON or missing receiverId", body = ErrorResponse),
        (status = 415, description = "Body is not application/json", body = ErrorResponse),
    )
)]
pub async fn deliver_message(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, RelayError> {
    let Json(body) = body?;
    let payload = MessagePayload::new(body);
    let receiver_id = payload.receiver_id().ok_or_else(|| {
        RelayError::InvalidRequest("payload must carry a non-empty receiverId".to_string())
    })?;

    let delivered_to = state.presence_service.fanout(payload).await;
    tracing::debug!(%receiver_id, delivered_to, "message injected over REST");

    Ok((
        StatusCode::ACCEPTED,
        Json(DeliverMessageResponse {
            receiver_id: receiver_id.to_string(),
            delivered_to,
        }),
    ))
}

/// Message routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/messages", post(deliver_message))
}
