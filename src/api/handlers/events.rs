//! Event handlers: list, create, lifecycle and post-event analytics.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::analytics::PostEventReport;
use crate::api::dto::{
    CreateEventRequest, CreateEventResponse, EventListResponse, EventStatusResponse,
    MessageResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /api/events`: List every event.
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    summary = "List events",
    description = "Returns every event in creation order.",
    responses(
        (status = 200, description = "Event list", body = EventListResponse),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(EventListResponse {
        events: state.event_service.list_events().await,
    })
}

/// `POST /api/events`: Create an event.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] if the title is blank.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an upcoming event. `capacity` and `ticketPrice` accept numbers or numeric strings.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = CreateEventResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .event_service
        .create_event(req.into_new_event())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            success: true,
            event_id: event.id,
        }),
    ))
}

/// `POST /api/create-event`: Create an event (form endpoint).
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] if the title is blank.
#[utoipa::path(
    post,
    path = "/api/create-event",
    tag = "Events",
    summary = "Create an event from the creation form",
    description = "Same as `POST /api/events` but answers 200, as the creation page expects.",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = CreateEventResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_event_form(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .event_service
        .create_event(req.into_new_event())
        .await?;
    Ok(Json(CreateEventResponse {
        success: true,
        event_id: event.id,
    }))
}

/// `GET /api/events/{id}/status`: Lifecycle status.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/events/{id}/status",
    tag = "Events",
    summary = "Get event status",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Current status", body = EventStatusResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn event_status(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state.event_service.get_event(id).await?;
    Ok(Json(EventStatusResponse {
        status: event.status,
        live_start_time: event.live_start_time,
    }))
}

/// `POST /api/events/{id}/go-live`: Start an upcoming event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] or
/// [`GatewayError::InvalidTransition`].
#[utoipa::path(
    post,
    path = "/api/events/{id}/go-live",
    tag = "Events",
    summary = "Go live",
    description = "Moves an upcoming event to live and records the start time.",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event is live", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Event is not upcoming", body = ErrorResponse),
    )
)]
pub async fn go_live(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    state.event_service.go_live(id).await?;
    Ok(Json(MessageResponse::ok("Event is now live")))
}

/// `POST /api/events/{id}/end-event`: End a live event.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] or
/// [`GatewayError::InvalidTransition`].
#[utoipa::path(
    post,
    path = "/api/events/{id}/end-event",
    tag = "Events",
    summary = "End event",
    description = "Moves a live event to completed and captures its analytics when the analytics database is enabled.",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event ended", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Event is not live", body = ErrorResponse),
    )
)]
pub async fn end_event(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    state.event_service.end_event(id).await?;
    Ok(Json(MessageResponse::ok("Event ended successfully")))
}

/// `GET /api/events/{id}/post-analytics`: Post-event report.
///
/// # Errors
///
/// Returns [`GatewayError::EventNotFound`] or
/// [`GatewayError::NotCompleted`].
#[utoipa::path(
    get,
    path = "/api/events/{id}/post-analytics",
    tag = "Analytics",
    summary = "Post-event analytics",
    description = "Aggregated revenue, engagement, poll, Q&A and sentiment figures with generated insights. Only available once the event is completed.",
    params(("id" = u64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Report", body = PostEventReport),
        (status = 400, description = "Event not completed yet", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn post_analytics(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let report = state.event_service.post_event_report(id).await?;
    Ok(Json(report))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/create-event", post(create_event_form))
        .route("/events/{id}/status", get(event_status))
        .route("/events/{id}/go-live", post(go_live))
        .route("/events/{id}/end-event", post(end_event))
        .route("/events/{id}/post-analytics", get(post_analytics))
}
