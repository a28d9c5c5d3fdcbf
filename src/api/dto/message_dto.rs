//! Message injection DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `POST /messages` (202 Accepted).
#[derive(Debug, Serialize, ToSchema)]
pub struct DeliverMessageResponse {
    /// Recipient read from the payload's `receiverId`.
    pub receiver_id: String,
    /// Number of live connections the payload was queued to.
    pub delivered_to: usize,
}
