//! Engagement handlers: snapshot, live polls and Q&A.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreatePollRequest, EngagementResponse, MessageResponse, PollListResponse, PollResponse,
    PollVoteRequest, QuestionListResponse, QuestionResponse, SubmitQuestionRequest,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /api/events/{id}/engagement`: Engagement snapshot.
#[utoipa::path(
    get,
    path = "/api/events/{id}/engagement",
    tag = "Engagement",
    summary = "Get engagement",
    description = "Polls, questions and live attendance. Events without engagement return empty lists and zero attendance.",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Snapshot", body = EngagementResponse),
    )
)]
pub async fn get_engagement(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    Json(EngagementResponse::from(state.event_service.engagement(id).await))
}

// ── Polls ───────────────────────────────────────────────────────────────

/// `GET /api/events/{id}/polls`: List polls.
#[utoipa::path(
    get,
    path = "/api/events/{id}/polls",
    tag = "Engagement",
    summary = "List polls",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Polls", body = PollListResponse),
    )
)]
pub async fn list_polls(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    Json(PollListResponse {
        success: true,
        polls: state.event_service.polls(id).await,
    })
}

/// `POST /api/events/{id}/polls`: Create a poll.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] or
/// [`GatewayError::EventNotFound`].
#[utoipa::path(
    post,
    path = "/api/events/{id}/polls",
    tag = "Engagement",
    summary = "Create a poll",
    description = "Adds an active poll. The question must not be blank and at least two distinct options are required.",
    params(("id" = u64, Path, description = "Event id")),
    request_body = CreatePollRequest,
    responses(
        (status = 200, description = "Poll created", body = PollResponse),
        (status = 400, description = "Invalid poll", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn create_poll(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<CreatePollRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let poll = state
        .event_service
        .create_poll(id, &req.question, req.options)
        .await?;
    Ok(Json(PollResponse {
        success: true,
        message: "Poll created successfully".to_string(),
        poll,
    }))
}

/// `POST /api/events/{id}/polls/{poll_id}/vote`: Vote on a poll.
///
/// # Errors
///
/// Returns [`GatewayError::EngagementNotFound`],
/// [`GatewayError::PollNotFound`] or [`GatewayError::InvalidRequest`].
#[utoipa::path(
    post,
    path = "/api/events/{id}/polls/{poll_id}/vote",
    tag = "Engagement",
    summary = "Vote on a poll",
    params(
        ("id" = u64, Path, description = "Event id"),
        ("poll_id" = u64, Path, description = "Poll id"),
    ),
    request_body = PollVoteRequest,
    responses(
        (status = 200, description = "Vote recorded", body = PollResponse),
        (status = 400, description = "Unknown option", body = ErrorResponse),
        (status = 404, description = "Poll not found", body = ErrorResponse),
    )
)]
pub async fn vote_poll(
    State(state): State<AppState>,
    Path((id, poll_id)): Path<(u64, u64)>,
    Json(req): Json<PollVoteRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let poll = state
        .event_service
        .vote_poll(id, poll_id, &req.option)
        .await?;
    Ok(Json(PollResponse {
        success: true,
        message: "Vote recorded successfully".to_string(),
        poll,
    }))
}

/// `DELETE /api/events/{id}/polls/{poll_id}`: Delete a poll.
///
/// # Errors
///
/// Returns [`GatewayError::EngagementNotFound`] or
/// [`GatewayError::PollNotFound`].
#[utoipa::path(
    delete,
    path = "/api/events/{id}/polls/{poll_id}",
    tag = "Engagement",
    summary = "Delete a poll",
    params(
        ("id" = u64, Path, description = "Event id"),
        ("poll_id" = u64, Path, description = "Poll id"),
    ),
    responses(
        (status = 200, description = "Poll deleted", body = MessageResponse),
        (status = 404, description = "Poll not found", body = ErrorResponse),
    )
)]
pub async fn delete_poll(
    State(state): State<AppState>,
    Path((id, poll_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, GatewayError> {
    state.event_service.delete_poll(id, poll_id).await?;
    Ok(Json(MessageResponse::ok("Poll deleted successfully")))
}

// ── Q&A ─────────────────────────────────────────────────────────────────

/// `GET /api/events/{id}/qa`: List questions.
#[utoipa::path(
    get,
    path = "/api/events/{id}/qa",
    tag = "Engagement",
    summary = "List questions",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Questions", body = QuestionListResponse),
    )
)]
pub async fn list_questions(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    Json(QuestionListResponse {
        success: true,
        qa_questions: state.event_service.questions(id).await,
    })
}

/// `POST /api/events/{id}/qa`: Submit a question.
///
/// Also mounted at `/api/events/{id}/qa-questions`.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] or
/// [`GatewayError::EventNotFound`].
#[utoipa::path(
    post,
    path = "/api/events/{id}/qa",
    tag = "Engagement",
    summary = "Submit a question",
    params(("id" = u64, Path, description = "Event id")),
    request_body = SubmitQuestionRequest,
    responses(
        (status = 200, description = "Question submitted", body = QuestionResponse),
        (status = 400, description = "Blank question", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn submit_question(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<SubmitQuestionRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let question = state
        .event_service
        .submit_question(id, &req.question)
        .await?;
    Ok(Json(QuestionResponse {
        success: true,
        message: "Question submitted successfully".to_string(),
        question,
    }))
}

/// `POST /api/events/{id}/qa/{question_id}/vote`: Up-vote a question.
///
/// # Errors
///
/// Returns [`GatewayError::EngagementNotFound`] or
/// [`GatewayError::QuestionNotFound`].
#[utoipa::path(
    post,
    path = "/api/events/{id}/qa/{question_id}/vote",
    tag = "Engagement",
    summary = "Up-vote a question",
    params(
        ("id" = u64, Path, description = "Event id"),
        ("question_id" = u64, Path, description = "Question id"),
    ),
    responses(
        (status = 200, description = "Vote recorded", body = QuestionResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
    )
)]
pub async fn vote_question(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, GatewayError> {
    let question = state.event_service.vote_question(id, question_id).await?;
    Ok(Json(QuestionResponse {
        success: true,
        message: "Vote recorded successfully".to_string(),
        question,
    }))
}

/// `DELETE /api/events/{id}/qa/{question_id}`: Delete a question.
///
/// # Errors
///
/// Returns [`GatewayError::EngagementNotFound`] or
/// [`GatewayError::QuestionNotFound`].
#[utoipa::path(
    delete,
    path = "/api/events/{id}/qa/{question_id}",
    tag = "Engagement",
    summary = "Delete a question",
    params(
        ("id" = u64, Path, description = "Event id"),
        ("question_id" = u64, Path, description = "Question id"),
    ),
    responses(
        (status = 200, description = "Question deleted", body = MessageResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
    )
)]
pub async fn delete_question(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, GatewayError> {
    state.event_service.delete_question(id, question_id).await?;
    Ok(Json(MessageResponse::ok("Question deleted successfully")))
}

/// Engagement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/{id}/engagement", get(get_engagement))
        .route("/events/{id}/polls", get(list_polls).post(create_poll))
        .route("/events/{id}/polls/{poll_id}", delete(delete_poll))
        .route("/events/{id}/polls/{poll_id}/vote", post(vote_poll))
        .route("/events/{id}/qa", get(list_questions).post(submit_question))
        .route("/events/{id}/qa-questions", post(submit_question))
        .route("/events/{id}/qa/{question_id}", delete(delete_question))
        .route("/events/{id}/qa/{question_id}/vote", post(vote_question))
}
