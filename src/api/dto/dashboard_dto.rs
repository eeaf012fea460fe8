//! DTOs for the dashboard sample endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::dashboard::SamplePoll;

/// Response body for `GET /api/polls`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SamplePollListResponse {
    /// Sample polls.
    pub polls: Vec<SamplePoll>,
}

/// Request body for `POST /api/polls`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SamplePollRequest {
    /// Poll question.
    #[serde(default)]
    pub question: Option<String>,
}

/// Response body for `POST /api/polls`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SamplePollResponse {
    /// Outcome.
    pub message: String,
    /// Echoed poll.
    pub poll: SamplePoll,
}

/// Response body for `GET /api/export/{type}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExportLinkResponse {
    /// Outcome.
    pub message: String,
    /// Where the file can be fetched.
    pub download_url: String,
}
