//! Ticket bookings and the rolling live-sales counters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Price charged when a booking request omits one.
pub const DEFAULT_TICKET_PRICE: u64 = 250_000;

/// Number of bookings kept in [`LiveSales::recent_bookings`].
pub const RECENT_BOOKINGS_LIMIT: usize = 10;

/// Booking status. Bookings are confirmed on creation and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Ticket issued.
    #[default]
    Confirmed,
}

impl BookingStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
        }
    }
}

/// One ticket purchase. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    /// Sequential id, starting at 1.
    pub id: u64,
    /// Booked event.
    pub event_id: u64,
    /// Attendee display name.
    pub attendee_name: String,
    /// Attendee contact email.
    pub attendee_email: String,
    /// Price paid.
    pub ticket_price: u64,
    /// Currency of `ticket_price`.
    pub currency: String,
    /// When the booking was made.
    pub booking_time: NaiveDateTime,
    /// Always `confirmed`.
    pub status: BookingStatus,
}

/// Validated input for a booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Booked event.
    pub event_id: u64,
    /// Attendee name.
    pub attendee_name: String,
    /// Attendee email.
    pub attendee_email: String,
    /// Price paid.
    pub ticket_price: u64,
    /// Currency code.
    pub currency: String,
}

impl Booking {
    /// Confirms a new booking as the next entry of the booking list.
    #[must_use]
    pub fn confirm(existing: &[Booking], new: NewBooking, now: NaiveDateTime) -> Self {
        Self {
            id: (existing.len() as u64).saturating_add(1),
            event_id: new.event_id,
            attendee_name: new.attendee_name,
            attendee_email: new.attendee_email,
            ticket_price: new.ticket_price,
            currency: new.currency,
            booking_time: now,
            status: BookingStatus::Confirmed,
        }
    }
}

/// Running sales totals shown on the live sales board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct LiveSales {
    /// Number of bookings since startup.
    pub total_sales: u64,
    /// Sum of ticket prices since startup.
    pub total_revenue: u64,
    /// Most recent bookings, newest first.
    pub recent_bookings: Vec<Booking>,
}

impl LiveSales {
    /// Accounts for a confirmed booking.
    pub fn record(&mut self, booking: &Booking) {
        self.total_sales = self.total_sales.saturating_add(1);
        self.total_revenue = self.total_revenue.saturating_add(booking.ticket_price);
        self.recent_bookings.insert(0, booking.clone());
        self.recent_bookings.truncate(RECENT_BOOKINGS_LIMIT);
    }
}
