//! Login and logout against the demo accounts.
//!
//! The session id travels in a `session_id` cookie.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{LoginRequest, LoginResponse};
use crate::app_state::AppState;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// `POST /login`: Start a session.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    summary = "Log in",
    description = "Checks the credentials and sets a `session_id` cookie. Emails compare case-insensitively.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = LoginResponse),
    )
)]
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.auth.login(&req.email, &req.password).await {
        Ok(session) => (
            [(
                header::SET_COOKIE,
                format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", session.id),
            )],
            Json(LoginResponse {
                success: true,
                message: None,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                message: Some(e.to_string()),
            }),
        )
            .into_response(),
    }
}

/// `GET /logout`: End the session and go home.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Auth",
    summary = "Log out",
    responses(
        (status = 303, description = "Redirect to `/`"),
    )
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(id) = session_id(&headers) {
        state.auth.logout(id).await;
    }
    (
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}=; Path=/; Max-Age=0"),
        )],
        Redirect::to("/"),
    )
}

/// Extracts the session id from the `Cookie` headers.
#[must_use]
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

/// Auth routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
}
