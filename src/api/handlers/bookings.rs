//! Ticketing handlers: book, live sales, CSV export.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{BookTicketRequest, BookTicketResponse};
use crate::app_state::AppState;
use crate::domain::LiveSales;
use crate::error::{ErrorResponse, GatewayError};
use crate::service::export::BOOKINGS_CSV_FILENAME;

/// `POST /api/book-ticket`: Book one ticket.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a blank attendee, or
/// [`GatewayError::EventNotFound`] for an unknown event.
#[utoipa::path(
    post,
    path = "/api/book-ticket",
    tag = "Tickets",
    summary = "Book a ticket",
    description = "Confirms a booking and updates the live sales counters. Price defaults to 250000 and currency to INR.",
    request_body = BookTicketRequest,
    responses(
        (status = 200, description = "Booking confirmed", body = BookTicketResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn book_ticket(
    State(state): State<AppState>,
    Json(req): Json<BookTicketRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let booking = state
        .event_service
        .book_ticket(req.into_new_booking())
        .await?;
    Ok(Json(BookTicketResponse {
        success: true,
        booking_id: booking.id,
    }))
}

/// `GET /api/live-sales`: Live sales counters.
#[utoipa::path(
    get,
    path = "/api/live-sales",
    tag = "Tickets",
    summary = "Live sales",
    description = "Bookings and revenue since startup with the ten most recent bookings, newest first.",
    responses(
        (status = 200, description = "Counters", body = LiveSales),
    )
)]
pub async fn live_sales(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.event_service.live_sales().await)
}

/// `GET /api/export-bookings`: Bookings as CSV.
#[utoipa::path(
    get,
    path = "/api/export-bookings",
    tag = "Tickets",
    summary = "Export bookings",
    description = "Every booking as a CSV attachment.",
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
    )
)]
pub async fn export_bookings(State(state): State<AppState>) -> impl IntoResponse {
    let csv = state.event_service.bookings_csv().await;
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={BOOKINGS_CSV_FILENAME}"),
            ),
        ],
        csv,
    )
}

/// Ticketing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book-ticket", post(book_ticket))
        .route("/live-sales", get(live_sales))
        .route("/export-bookings", get(export_bookings))
}
