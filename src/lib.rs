//! # eventpro-gateway
//!
//! REST API and live WebSocket feed for running events: event lifecycle,
//! ticket booking, live polls and Q&A, dashboard figures and post-event
//! analytics.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventService, AuthService (service/)
//!     ├── Analytics: report, insights, heuristics (analytics/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── EventRegistry (domain/)
//!     │
//!     └── JSON data files + SQLite analytics store (persistence/)
//! ```

pub mod analytics;
pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
pub mod ws;
