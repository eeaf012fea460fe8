//! Domain layer: events, bookings, engagement, sessions and the live
//! event bus.
//!
//! This module contains the server-side domain model: the records kept
//! in the data files, the registry that owns them at runtime, and the
//! broadcast bus that notifies WebSocket subscribers of changes.

pub mod booking;
pub mod engagement;
pub mod event;
pub mod event_bus;
pub mod event_registry;
pub mod live_event;
pub mod seed;
pub mod session;

pub use booking::{Booking, BookingStatus, DEFAULT_TICKET_PRICE, LiveSales, NewBooking};
pub use engagement::{DEFAULT_LIVE_ATTENDANCE, Engagement, Poll, QaQuestion};
pub use event::{DEFAULT_CURRENCY, DEFAULT_EVENT_IMAGE, Event, EventStatus, NewEvent};
pub use event_bus::EventBus;
pub use event_registry::{EventRegistry, TicketSales};
pub use live_event::LiveEvent;
pub use session::{Session, SessionStore};
