//! Engagement DTOs: snapshot, polls and Q&A.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Engagement, Poll, QaQuestion};

/// Response body for `GET /api/events/{id}/engagement`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EngagementResponse {
    /// Always `true`.
    pub success: bool,
    /// Polls in creation order.
    pub polls: Vec<Poll>,
    /// Questions in submission order.
    pub qa_questions: Vec<QaQuestion>,
    /// Attendees in the room.
    pub live_attendance: u64,
}

impl From<Engagement> for EngagementResponse {
    fn from(e: Engagement) -> Self {
        Self {
            success: true,
            polls: e.polls,
            qa_questions: e.qa_questions,
            live_attendance: e.live_attendance,
        }
    }
}

/// Response body for `GET /api/events/{id}/polls`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PollListResponse {
    /// Always `true`.
    pub success: bool,
    /// Polls of the event.
    pub polls: Vec<Poll>,
}

/// Request body for `POST /api/events/{id}/polls`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePollRequest {
    /// Poll question.
    #[serde(default)]
    pub question: String,
    /// At least two distinct options.
    #[serde(default)]
    pub options: Vec<String>,
}

/// Request body for `POST /api/events/{id}/polls/{poll_id}/vote`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PollVoteRequest {
    /// Chosen option; must be one of the poll's options.
    #[serde(default)]
    pub option: String,
}

/// Poll mutation result.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PollResponse {
    /// Always `true`.
    pub success: bool,
    /// Outcome.
    pub message: String,
    /// Poll after the change.
    pub poll: Poll,
}

/// Response body for `GET /api/events/{id}/qa`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionListResponse {
    /// Always `true`.
    pub success: bool,
    /// Questions of the event.
    pub qa_questions: Vec<QaQuestion>,
}

/// Request body for `POST /api/events/{id}/qa`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmitQuestionRequest {
    /// Question text.
    #[serde(default)]
    pub question: String,
}

/// Question mutation result.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionResponse {
    /// Always `true`.
    pub success: bool,
    /// Outcome.
    pub message: String,
    /// Question after the change.
    pub question: QaQuestion,
}
