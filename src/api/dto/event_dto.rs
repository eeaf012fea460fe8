//! Event DTOs for create, list and status.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::number_or_string;
use crate::domain::{DEFAULT_CURRENCY, DEFAULT_EVENT_IMAGE, Event, EventStatus, NewEvent};

/// Request body for `POST /api/create-event` and `POST /api/events`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Date string, e.g. `2024-03-15`.
    #[serde(default)]
    pub date: Option<String>,
    /// Time string, e.g. `09:00`.
    #[serde(default)]
    pub time: Option<String>,
    /// Venue.
    #[serde(default)]
    pub location: Option<String>,
    /// Capacity; a number or a numeric string.
    #[serde(default, deserialize_with = "number_or_string")]
    pub capacity: u64,
    /// Ticket price; a number or a numeric string.
    #[serde(rename = "ticketPrice", default, deserialize_with = "number_or_string")]
    pub ticket_price: u64,
    /// Currency code, `INR` when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// Cover image path.
    #[serde(default)]
    pub image: Option<String>,
}

impl CreateEventRequest {
    /// Fills defaults for absent fields.
    #[must_use]
    pub fn into_new_event(self) -> NewEvent {
        NewEvent {
            title: self.title,
            description: self.description.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            capacity: self.capacity,
            ticket_price: self.ticket_price,
            currency: self
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            image: self
                .image
                .unwrap_or_else(|| DEFAULT_EVENT_IMAGE.to_string()),
        }
    }
}

/// Response body for event creation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateEventResponse {
    /// Always `true`.
    pub success: bool,
    /// Assigned id.
    pub event_id: u64,
}

/// Response body for `GET /api/events`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Every event in creation order.
    pub events: Vec<Event>,
}

/// Response body for `GET /api/events/{id}/status`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventStatusResponse {
    /// Lifecycle status.
    pub status: EventStatus,
    /// When the event went live; `null` before that.
    pub live_start_time: Option<NaiveDateTime>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn form_style_body_gets_defaults() {
        let raw = r#"{"title": "Hackathon", "capacity": "120", "ticketPrice": "0"}"#;
        let Ok(req) = serde_json::from_str::<CreateEventRequest>(raw) else {
            panic!("body should parse");
        };
        let new = req.into_new_event();
        assert_eq!(new.capacity, 120);
        assert_eq!(new.ticket_price, 0);
        assert_eq!(new.currency, "INR");
        assert_eq!(new.image, DEFAULT_EVENT_IMAGE);
        assert!(new.description.is_empty());
    }
}
