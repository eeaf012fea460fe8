//! In-memory store for events, engagement, bookings and sales counters.
//!
//! [`EventRegistry`] owns every mutable collection of the service. Each
//! collection sits behind its own [`tokio::sync::RwLock`] so that a
//! read-modify-write (a vote, a status change) happens under one write
//! guard and concurrent requests never interleave inside it.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tokio::sync::{RwLock, RwLockWriteGuard};

use super::{Booking, Engagement, Event, LiveSales, NewBooking};
use crate::error::GatewayError;

/// Ticket totals recorded by the box office, keyed by event id in
/// `tickets_data.json`. Read-only at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TicketSales {
    /// Tickets sold, if known.
    #[serde(default)]
    pub total_sold: Option<u64>,
    /// Revenue collected, if known.
    #[serde(default)]
    pub revenue: Option<u64>,
}

/// Central store for all mutable application data.
#[derive(Debug, Default)]
pub struct EventRegistry {
    events: RwLock<Vec<Event>>,
    engagement: RwLock<BTreeMap<u64, Engagement>>,
    bookings: RwLock<Vec<Booking>>,
    live_sales: RwLock<LiveSales>,
    tickets: BTreeMap<u64, TicketSales>,
}

impl EventRegistry {
    /// Creates a registry from loaded data. Bookings always start empty.
    #[must_use]
    pub fn new(
        events: Vec<Event>,
        engagement: BTreeMap<u64, Engagement>,
        tickets: BTreeMap<u64, TicketSales>,
    ) -> Self {
        Self {
            events: RwLock::new(events),
            engagement: RwLock::new(engagement),
            bookings: RwLock::new(Vec::new()),
            live_sales: RwLock::new(LiveSales::default()),
            tickets,
        }
    }

    /// Exclusive access to the event list.
    pub async fn events_mut(&self) -> RwLockWriteGuard<'_, Vec<Event>> {
        self.events.write().await
    }

    /// Exclusive access to the engagement map.
    pub async fn engagement_mut(&self) -> RwLockWriteGuard<'_, BTreeMap<u64, Engagement>> {
        self.engagement.write().await
    }

    /// Snapshot of every event in creation order.
    pub async fn list_events(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    /// Returns a copy of one event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if no event has that id.
    pub async fn get_event(&self, event_id: u64) -> Result<Event, GatewayError> {
        self.events
            .read()
            .await
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or(GatewayError::EventNotFound(event_id))
    }

    /// Returns `true` if an event with that id exists.
    pub async fn contains_event(&self, event_id: u64) -> bool {
        self.events.read().await.iter().any(|e| e.id == event_id)
    }

    /// Returns a copy of an event's engagement record, if it has one.
    pub async fn engagement(&self, event_id: u64) -> Option<Engagement> {
        self.engagement.read().await.get(&event_id).cloned()
    }

    /// Number of events with an engagement record.
    pub async fn engagement_count(&self) -> usize {
        self.engagement.read().await.len()
    }

    /// Box-office totals for an event, if any were loaded.
    #[must_use]
    pub fn tickets(&self, event_id: u64) -> Option<TicketSales> {
        self.tickets.get(&event_id).copied()
    }

    /// Number of events with box-office totals.
    #[must_use]
    pub fn tickets_count(&self) -> usize {
        self.tickets.len()
    }

    /// Appends a confirmed booking and updates the live sales counters
    /// under both write guards.
    pub async fn record_booking(&self, new: NewBooking, now: NaiveDateTime) -> (Booking, LiveSales) {
        let mut bookings = self.bookings.write().await;
        let mut sales = self.live_sales.write().await;
        let booking = Booking::confirm(&bookings, new, now);
        bookings.push(booking.clone());
        sales.record(&booking);
        (booking, sales.clone())
    }

    /// Snapshot of every booking in booking order.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }

    /// Snapshot of the live sales counters.
    pub async fn live_sales(&self) -> LiveSales {
        self.live_sales.read().await.clone()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::event::now_local;
    use crate::domain::{DEFAULT_CURRENCY, NewEvent};

    fn registry_with_event() -> EventRegistry {
        let event = Event::from_new(
            1,
            NewEvent {
                title: "Tech Conference".to_string(),
                description: String::new(),
                date: String::new(),
                time: String::new(),
                location: String::new(),
                capacity: 500,
                ticket_price: 250_000,
                currency: DEFAULT_CURRENCY.to_string(),
                image: String::new(),
            },
            now_local(),
        );
        EventRegistry::new(vec![event], BTreeMap::new(), BTreeMap::new())
    }

    fn booking_for(event_id: u64) -> NewBooking {
        NewBooking {
            event_id,
            attendee_name: "Ravi".to_string(),
            attendee_email: "ravi@example.com".to_string(),
            ticket_price: 250_000,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    #[tokio::test]
    async fn get_missing_event_is_not_found() {
        let registry = registry_with_event();
        assert!(registry.get_event(1).await.is_ok());
        let Err(GatewayError::EventNotFound(id)) = registry.get_event(2).await else {
            panic!("expected EventNotFound");
        };
        assert_eq!(id, 2);
    }

    #[tokio::test]
    async fn concurrent_bookings_get_distinct_ids() {
        let registry = Arc::new(registry_with_event());
        let mut handles = Vec::new();
        for _ in 0..20 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry.record_booking(booking_for(1), now_local()).await
            }));
        }
        for handle in handles {
            assert!(handle.await.is_ok());
        }

        let mut ids: Vec<u64> = registry.bookings().await.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());

        let sales = registry.live_sales().await;
        assert_eq!(sales.total_sales, 20);
        assert_eq!(sales.total_revenue, 20 * 250_000);
    }

    #[tokio::test]
    async fn engagement_is_absent_until_created() {
        let registry = registry_with_event();
        assert!(registry.engagement(1).await.is_none());
        registry
            .engagement_mut()
            .await
            .insert(1, Engagement::started());
        assert_eq!(registry.engagement_count().await, 1);
    }
}
