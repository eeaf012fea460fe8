//! Dashboard handlers: overview, sample analytics and export links.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    ExportLinkResponse, SamplePollListResponse, SamplePollRequest, SamplePollResponse,
};
use crate::app_state::AppState;
use crate::domain::event::now_local;
use crate::error::{ErrorResponse, GatewayError};
use crate::service::dashboard::{
    self, EngagementAnalytics, EventAnalyticsCard, FeedbackSummary, LiveUpdate, Overview,
    RevenueAnalytics,
};

/// `GET /api/dashboard`: Overview.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    summary = "Dashboard overview",
    description = "Totals over all events, the four most recent events and the weekly revenue trend.",
    responses(
        (status = 200, description = "Overview", body = Overview),
    )
)]
pub async fn overview(State(state): State<AppState>) -> impl IntoResponse {
    let events = state.event_service.list_events().await;
    Json(dashboard::overview(&events))
}

/// `GET /api/analytics/revenue`: Weekly revenue.
#[utoipa::path(
    get,
    path = "/api/analytics/revenue",
    tag = "Dashboard",
    summary = "Revenue analytics",
    responses(
        (status = 200, description = "Revenue figures", body = RevenueAnalytics),
    )
)]
pub async fn revenue() -> impl IntoResponse {
    Json(dashboard::revenue())
}

/// `GET /api/analytics/engagement`: Engagement across events.
#[utoipa::path(
    get,
    path = "/api/analytics/engagement",
    tag = "Dashboard",
    summary = "Engagement analytics",
    responses(
        (status = 200, description = "Engagement figures", body = EngagementAnalytics),
    )
)]
pub async fn engagement() -> impl IntoResponse {
    Json(dashboard::engagement())
}

/// `GET /api/feedback`: Feedback summary.
#[utoipa::path(
    get,
    path = "/api/feedback",
    tag = "Dashboard",
    summary = "Feedback analytics",
    responses(
        (status = 200, description = "Feedback summary", body = FeedbackSummary),
    )
)]
pub async fn feedback() -> impl IntoResponse {
    Json(dashboard::feedback())
}

/// `GET /api/polls`: Sample poll list.
#[utoipa::path(
    get,
    path = "/api/polls",
    tag = "Dashboard",
    summary = "List sample polls",
    responses(
        (status = 200, description = "Sample polls", body = SamplePollListResponse),
    )
)]
pub async fn sample_polls() -> impl IntoResponse {
    Json(SamplePollListResponse {
        polls: dashboard::sample_polls(),
    })
}

/// `POST /api/polls`: Echo a new poll without storing it.
#[utoipa::path(
    post,
    path = "/api/polls",
    tag = "Dashboard",
    summary = "Create a sample poll",
    description = "Echoes the poll back. Event polls live under `/api/events/{id}/polls`.",
    request_body = SamplePollRequest,
    responses(
        (status = 201, description = "Poll echoed", body = SamplePollResponse),
    )
)]
pub async fn echo_poll(Json(req): Json<SamplePollRequest>) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(SamplePollResponse {
            message: "Poll created successfully".to_string(),
            poll: dashboard::echo_poll(req.question.unwrap_or_default()),
        }),
    )
}

/// `GET /api/live-updates`: Live ticker counters.
#[utoipa::path(
    get,
    path = "/api/live-updates",
    tag = "Dashboard",
    summary = "Live updates",
    responses(
        (status = 200, description = "Counters", body = LiveUpdate),
    )
)]
pub async fn live_updates() -> impl IntoResponse {
    Json(dashboard::live_update(now_local()))
}

/// `GET /api/export/{data_type}`: Export link.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] unless the type is `revenue`,
/// `feedback` or `engagement`.
#[utoipa::path(
    get,
    path = "/api/export/{data_type}",
    tag = "Dashboard",
    summary = "Export data",
    params(("data_type" = String, Path, description = "revenue, feedback or engagement")),
    responses(
        (status = 200, description = "Download link", body = ExportLinkResponse),
        (status = 400, description = "Invalid data type", body = ErrorResponse),
    )
)]
pub async fn export_data(Path(data_type): Path<String>) -> Result<impl IntoResponse, GatewayError> {
    let (message, download_url) = dashboard::export_link(&data_type)
        .ok_or_else(|| GatewayError::InvalidRequest("Invalid data type".to_string()))?;
    Ok(Json(ExportLinkResponse {
        message,
        download_url,
    }))
}

/// `GET /api/events/{id}/analytics`: Analytics card for one event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/events/{id}/analytics",
    tag = "Dashboard",
    summary = "Event analytics card",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Card", body = EventAnalyticsCard),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_analytics(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state.event_service.get_event(id).await?;
    Ok(Json(dashboard::event_analytics(event)))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(overview))
        .route("/analytics/revenue", get(revenue))
        .route("/analytics/engagement", get(engagement))
        .route("/feedback", get(feedback))
        .route("/polls", get(sample_polls).post(echo_poll))
        .route("/live-updates", get(live_updates))
        .route("/export/{data_type}", get(export_data))
        .route("/events/{id}/analytics", get(event_analytics))
}
