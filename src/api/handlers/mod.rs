//! REST endpoint handlers organized by resource.

pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod engagement;
pub mod events;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(events::routes())
        .merge(bookings::routes())
        .merge(engagement::routes())
        .merge(dashboard::routes())
}
