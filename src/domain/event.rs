//! Event record and its lifecycle.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GatewayError;

/// Image used when an event is created without one.
pub const DEFAULT_EVENT_IMAGE: &str = "/static/images/default-event.jpg";

/// Currency used when none is supplied.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Lifecycle status of an event.
///
/// Transitions only move forward: `upcoming → live → completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Scheduled, not yet started.
    #[default]
    Upcoming,
    /// Currently running; polls and Q&A are in use.
    Live,
    /// Ended; post-event analytics are available.
    Completed,
}

impl EventStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed event as stored in `events_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Unique id, assigned as `max(existing) + 1`.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Calendar date as entered (e.g. `2024-03-15`).
    #[serde(default)]
    pub date: String,
    /// Start time as entered (e.g. `09:00`).
    #[serde(default)]
    pub time: String,
    /// Venue.
    #[serde(default)]
    pub location: String,
    /// Maximum number of attendees.
    #[serde(default)]
    pub capacity: u64,
    /// Price of one ticket in the smallest display unit of `currency`.
    #[serde(rename = "ticketPrice", default)]
    pub ticket_price: u64,
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Cover image path.
    #[serde(default = "default_image")]
    pub image: String,
    /// Registered attendee count.
    #[serde(default)]
    pub attendees: u64,
    /// Lifecycle status.
    #[serde(default)]
    pub status: EventStatus,
    /// Creation timestamp (local time, no offset).
    #[serde(default = "now_local")]
    pub created_at: NaiveDateTime,
    /// When the event went live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_start_time: Option<NaiveDateTime>,
    /// When the event was ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<NaiveDateTime>,
}

/// Validated input for a new event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Display title (non-empty).
    pub title: String,
    /// Description.
    pub description: String,
    /// Date string.
    pub date: String,
    /// Time string.
    pub time: String,
    /// Venue.
    pub location: String,
    /// Capacity.
    pub capacity: u64,
    /// Ticket price.
    pub ticket_price: u64,
    /// Currency code.
    pub currency: String,
    /// Cover image path.
    pub image: String,
}

impl Event {
    /// Builds a new upcoming event with the given id.
    #[must_use]
    pub fn from_new(id: u64, new: NewEvent, now: NaiveDateTime) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            date: new.date,
            time: new.time,
            location: new.location,
            capacity: new.capacity,
            ticket_price: new.ticket_price,
            currency: new.currency,
            image: new.image,
            attendees: 0,
            status: EventStatus::Upcoming,
            created_at: now,
            live_start_time: None,
            ended_at: None,
        }
    }

    /// Moves an upcoming event to live.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] unless the event is
    /// currently upcoming.
    pub fn go_live(&mut self, now: NaiveDateTime) -> Result<(), GatewayError> {
        self.transition(EventStatus::Upcoming, EventStatus::Live)?;
        self.live_start_time = Some(now);
        Ok(())
    }

    /// Moves a live event to completed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] unless the event is
    /// currently live.
    pub fn end(&mut self, now: NaiveDateTime) -> Result<(), GatewayError> {
        self.transition(EventStatus::Live, EventStatus::Completed)?;
        self.ended_at = Some(now);
        Ok(())
    }

    /// Returns `true` once the event has ended.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }

    fn transition(&mut self, expected: EventStatus, to: EventStatus) -> Result<(), GatewayError> {
        if self.status != expected {
            return Err(GatewayError::InvalidTransition {
                event_id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

/// Next free event id: one past the largest existing id, starting at 1.
#[must_use]
pub fn next_event_id(events: &[Event]) -> u64 {
    events
        .iter()
        .map(|e| e.id)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Current local wall-clock time, matching the stored timestamp format.
#[must_use]
pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_image() -> String {
    DEFAULT_EVENT_IMAGE.to_string()
}
