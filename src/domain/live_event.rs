//! Live events reflecting event, booking and engagement mutations.
//!
//! Every state change emits a [`LiveEvent`] through the [`super::EventBus`].
//! Live events are broadcast to WebSocket subscribers of the affected
//! event id.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::EventStatus;

/// Notification emitted after every state mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A new event was created.
    EventCreated {
        /// Event identifier.
        event_id: u64,
        /// Event title.
        title: String,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An event changed lifecycle status.
    EventStatusChanged {
        /// Event identifier.
        event_id: u64,
        /// New status.
        status: EventStatus,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A ticket was booked.
    BookingConfirmed {
        /// Event identifier.
        event_id: u64,
        /// Booking identifier.
        booking_id: u64,
        /// Price paid.
        ticket_price: u64,
        /// Sales total after this booking.
        total_sales: u64,
        /// Revenue total after this booking.
        total_revenue: u64,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A poll was created.
    PollCreated {
        /// Event identifier.
        event_id: u64,
        /// Poll identifier.
        poll_id: u64,
        /// Poll question.
        question: String,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A vote was cast on a poll.
    PollVoted {
        /// Event identifier.
        event_id: u64,
        /// Poll identifier.
        poll_id: u64,
        /// Chosen option.
        option: String,
        /// Poll responses after the vote.
        responses: u64,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A poll was deleted.
    PollDeleted {
        /// Event identifier.
        event_id: u64,
        /// Poll identifier.
        poll_id: u64,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A question was submitted.
    QuestionSubmitted {
        /// Event identifier.
        event_id: u64,
        /// Question identifier.
        question_id: u64,
        /// Question text.
        question: String,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A question received an up-vote.
    QuestionVoted {
        /// Event identifier.
        event_id: u64,
        /// Question identifier.
        question_id: u64,
        /// Votes after this one.
        votes: u64,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A question was deleted.
    QuestionDeleted {
        /// Event identifier.
        event_id: u64,
        /// Question identifier.
        question_id: u64,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl LiveEvent {
    /// Returns the id of the event this notification concerns.
    #[must_use]
    pub const fn event_id(&self) -> u64 {
        match self {
            Self::EventCreated { event_id, .. }
            | Self::EventStatusChanged { event_id, .. }
            | Self::BookingConfirmed { event_id, .. }
            | Self::PollCreated { event_id, .. }
            | Self::PollVoted { event_id, .. }
            | Self::PollDeleted { event_id, .. }
            | Self::QuestionSubmitted { event_id, .. }
            | Self::QuestionVoted { event_id, .. }
            | Self::QuestionDeleted { event_id, .. } => *event_id,
        }
    }

    /// Returns the snake_case discriminator used on the wire.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventCreated { .. } => "event_created",
            Self::EventStatusChanged { .. } => "event_status_changed",
            Self::BookingConfirmed { .. } => "booking_confirmed",
            Self::PollCreated { .. } => "poll_created",
            Self::PollVoted { .. } => "poll_voted",
            Self::PollDeleted { .. } => "poll_deleted",
            Self::QuestionSubmitted { .. } => "question_submitted",
            Self::QuestionVoted { .. } => "question_voted",
            Self::QuestionDeleted { .. } => "question_deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_tag_matches_event_type_str() {
        let event = LiveEvent::PollVoted {
            event_id: 4,
            poll_id: 2,
            option: "Yes".to_string(),
            responses: 10,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(
            json.get("event_type").and_then(|v| v.as_str()),
            Some(event.event_type_str())
        );
        assert_eq!(event.event_id(), 4);
    }

    #[test]
    fn status_changes_serialize_lowercase() {
        let event = LiveEvent::EventStatusChanged {
            event_id: 1,
            status: EventStatus::Live,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("live"));
    }
}
