//! Ticket booking DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{number_or_string, opt_number_or_string};
use crate::domain::{DEFAULT_CURRENCY, DEFAULT_TICKET_PRICE, NewBooking};

/// Request body for `POST /api/book-ticket`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookTicketRequest {
    /// Event to book; a number or a numeric string.
    #[serde(deserialize_with = "number_or_string")]
    pub event_id: u64,
    /// Attendee name.
    #[serde(default)]
    pub attendee_name: String,
    /// Attendee email.
    #[serde(default)]
    pub attendee_email: String,
    /// Price paid; 250000 when absent.
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub ticket_price: Option<u64>,
    /// Currency code; `INR` when absent.
    #[serde(default)]
    pub currency: Option<String>,
}

impl BookTicketRequest {
    /// Fills defaults for absent fields.
    #[must_use]
    pub fn into_new_booking(self) -> NewBooking {
        NewBooking {
            event_id: self.event_id,
            attendee_name: self.attendee_name,
            attendee_email: self.attendee_email,
            ticket_price: self.ticket_price.unwrap_or(DEFAULT_TICKET_PRICE),
            currency: self
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

/// Response body for `POST /api/book-ticket`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookTicketResponse {
    /// Always `true`.
    pub success: bool,
    /// Sequential booking id.
    pub booking_id: u64,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn price_and_currency_default() {
        let raw = r#"{"event_id": "2", "attendee_name": "Mina", "attendee_email": "m@x.io"}"#;
        let Ok(req) = serde_json::from_str::<BookTicketRequest>(raw) else {
            panic!("body should parse");
        };
        let new = req.into_new_booking();
        assert_eq!(new.event_id, 2);
        assert_eq!(new.ticket_price, 250_000);
        assert_eq!(new.currency, "INR");
    }
}
