//! WebSocket layer: connection handling, commands, subscriptions.
//!
//! The endpoint at `/ws` streams live events of subscribed events and
//! answers engagement snapshot requests.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
