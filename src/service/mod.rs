//! Service layer: business logic orchestration.
//!
//! [`EventService`] coordinates event, ticketing and engagement operations
//! and emits live events through the [`super::domain::EventBus`].
//! [`AuthService`] checks logins, [`bootstrap::load_registry`] builds the
//! initial state and [`dashboard`] provides the dashboard payloads.

pub mod auth_service;
pub mod bootstrap;
pub mod dashboard;
pub mod event_service;
pub mod export;

pub use auth_service::AuthService;
pub use event_service::EventService;
