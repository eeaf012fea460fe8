//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::{AuthService, EventService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event, ticketing and engagement operations.
    pub event_service: Arc<EventService>,
    /// Login sessions.
    pub auth: AuthService,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
