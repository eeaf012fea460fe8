//! Data Transfer Objects for REST request/response serialization.
//!
//! Numeric request fields that HTML forms send as strings accept both
//! shapes through [`common_dto::number_or_string`].

pub mod auth_dto;
pub mod booking_dto;
pub mod common_dto;
pub mod dashboard_dto;
pub mod engagement_dto;
pub mod event_dto;

pub use auth_dto::*;
pub use booking_dto::*;
pub use common_dto::*;
pub use dashboard_dto::*;
pub use engagement_dto::*;
pub use event_dto::*;
