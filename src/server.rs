//! Wiring: state construction and the HTTP router with its middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::GatewayConfig;
use crate::domain::EventBus;
use crate::error::GatewayError;
use crate::persistence::{AnalyticsStore, JsonFileStore};
use crate::service::bootstrap::load_registry;
use crate::service::{AuthService, EventService};
use crate::ws::handler::ws_handler;

/// Loads the data files, opens the analytics database when enabled and
/// assembles the services.
///
/// An analytics database that cannot be opened disables capture with a
/// warning instead of failing startup.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] if seeded sample data
/// cannot be written to the data directory.
pub async fn build_state(config: &GatewayConfig) -> Result<AppState, GatewayError> {
    let store = JsonFileStore::new(&config.data_dir);
    let registry = Arc::new(load_registry(&store).await?);

    let analytics = if config.analytics_db_enabled {
        match AnalyticsStore::connect(&config.analytics_db_url).await {
            Ok(db) => {
                tracing::info!(url = %config.analytics_db_url, "analytics database ready");
                Some(db)
            }
            Err(e) => {
                tracing::warn!(error = %e, "analytics database unavailable, capture disabled");
                None
            }
        }
    } else {
        None
    };

    let event_bus = EventBus::new(config.event_bus_capacity);
    let event_service = Arc::new(EventService::new(
        registry,
        store,
        analytics,
        event_bus.clone(),
    ));

    Ok(AppState {
        event_service,
        auth: AuthService::new(),
        event_bus,
    })
}

/// Builds the router: REST API, WebSocket feed and middleware.
pub fn build_app(state: AppState, config: &GatewayConfig) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
