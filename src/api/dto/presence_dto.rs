//! Presence DTOs for list and status endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{PresenceSummary, UserId};

/// One online user in `GET /presence`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PresenceSummaryDto {
    /// User identifier.
    pub user_id: String,
    /// Number of live connections.
    pub connections: usize,
    /// When the user's current presence period started.
    pub online_since: DateTime<Utc>,
}

impl From<PresenceSummary> for PresenceSummaryDto {
    fn from(summary: PresenceSummary) -> Self {
        Self {
            user_id: summary.user_id.to_string(),
            connections: summary.connections,
            online_since: summary.online_since,
        }
    }
}

/// Paginated response for `GET /presence`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PresenceListResponse {
    /// Online users on this page.
    pub data: Vec<PresenceSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Response for `GET /presence/{user_id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PresenceStatusResponse {
    /// User identifier echoed from the path.
    pub user_id: String,
    /// Whether the user has at least one live connection.
    pub online: bool,
    /// Number of live connections (0 when offline).
    pub connections: usize,
    /// Start of the current presence period, if online.
    pub online_since: Option<DateTime<Utc>>,
}

impl PresenceStatusResponse {
    /// Builds the status of `user_id` from its optional summary.
    #[must_use]
    pub fn new(user_id: &UserId, summary: Option<PresenceSummary>) -> Self {
        match summary {
            Some(summary) => Self {
                user_id: user_id.to_string(),
                online: true,
                connections: summary.connections,
                online_since: Some(summary.online_since),
            },
            None => Self {
                user_id: user_id.to_string(),
                online: false,
                connections: 0,
                online_since: None,
            },
        }
    }
}
