//! Event service: lifecycle, ticketing, polls and Q&A.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;

use crate::analytics::{
    CompletionSnapshot, PostEventReport, build_completion_record, build_post_event_report,
};
use crate::domain::event::{next_event_id, now_local};
use crate::domain::{
    Booking, Engagement, Event, EventBus, EventRegistry, LiveEvent, LiveSales, NewBooking,
    NewEvent, Poll, QaQuestion,
};
use crate::error::GatewayError;
use crate::persistence::{AnalyticsStore, JsonFileStore};

use super::export::bookings_csv;

/// Orchestration layer for every event operation.
///
/// Owns references to the [`EventRegistry`] for state, the
/// [`JsonFileStore`] for durability and the [`EventBus`] for live
/// notifications. Every mutation follows the same pattern: take the write
/// guard, apply the change to a staged copy, write the data file from the
/// copy, commit it under the guard, release, publish a [`LiveEvent`].
/// A failed write leaves the in-memory state untouched.
#[derive(Debug, Clone)]
pub struct EventService {
    registry: Arc<EventRegistry>,
    store: JsonFileStore,
    analytics: Option<AnalyticsStore>,
    event_bus: EventBus,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(
        registry: Arc<EventRegistry>,
        store: JsonFileStore,
        analytics: Option<AnalyticsStore>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            registry,
            store,
            analytics,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`EventRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<EventRegistry> {
        &self.registry
    }

    /// Returns the analytics store, when capture is enabled.
    #[must_use]
    pub fn analytics_store(&self) -> Option<&AnalyticsStore> {
        self.analytics.as_ref()
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Lists every event in creation order.
    pub async fn list_events(&self) -> Vec<Event> {
        self.registry.list_events().await
    }

    /// Returns one event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the id is unknown.
    pub async fn get_event(&self, event_id: u64) -> Result<Event, GatewayError> {
        self.registry.get_event(event_id).await
    }

    /// Creates an upcoming event with the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the title is blank, or
    /// [`GatewayError::PersistenceError`] if the events file cannot be
    /// written.
    pub async fn create_event(&self, new: NewEvent) -> Result<Event, GatewayError> {
        if new.title.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "event title must not be empty".to_string(),
            ));
        }

        let mut events = self.registry.events_mut().await;
        let event = Event::from_new(next_event_id(&events), new, now_local());
        let mut staged = events.clone();
        staged.push(event.clone());
        self.store.save_events(&staged).await?;
        *events = staged;
        drop(events);

        let _ = self.event_bus.publish(LiveEvent::EventCreated {
            event_id: event.id,
            title: event.title.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(event_id = event.id, title = %event.title, "event created");
        Ok(event)
    }

    /// Moves an upcoming event to live.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the id is unknown,
    /// [`GatewayError::InvalidTransition`] unless the event is upcoming, or
    /// [`GatewayError::PersistenceError`] if the events file cannot be
    /// written.
    pub async fn go_live(&self, event_id: u64) -> Result<Event, GatewayError> {
        let mut events = self.registry.events_mut().await;
        let mut staged = events.clone();
        let event = staged
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or(GatewayError::EventNotFound(event_id))?;
        event.go_live(now_local())?;
        let updated = event.clone();
        self.store.save_events(&staged).await?;
        *events = staged;
        drop(events);

        self.publish_status(&updated);
        tracing::info!(event_id, "event is live");
        Ok(updated)
    }

    /// Moves a live event to completed and captures its analytics.
    ///
    /// A capture failure is logged and does not fail the request; the
    /// status change is already durable by then.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the id is unknown,
    /// [`GatewayError::InvalidTransition`] unless the event is live, or
    /// [`GatewayError::PersistenceError`] if the events file cannot be
    /// written.
    pub async fn end_event(&self, event_id: u64) -> Result<Event, GatewayError> {
        let now = now_local();
        let mut events = self.registry.events_mut().await;
        let mut staged = events.clone();
        let event = staged
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or(GatewayError::EventNotFound(event_id))?;
        event.end(now)?;
        let updated = event.clone();
        self.store.save_events(&staged).await?;
        *events = staged;
        drop(events);

        self.publish_status(&updated);
        tracing::info!(event_id, "event ended");

        if let Some(analytics) = &self.analytics {
            let engagement = self.registry.engagement(event_id).await;
            let snapshot = CompletionSnapshot::build(
                &updated,
                engagement.as_ref(),
                self.registry.tickets(event_id),
            );
            let record = build_completion_record(&snapshot, engagement.as_ref(), now);
            match analytics.capture(&record).await {
                Ok(()) => tracing::info!(
                    event_id,
                    insights = record.insights.len(),
                    "completion analytics captured"
                ),
                Err(e) => tracing::warn!(event_id, error = %e, "completion capture failed"),
            }
        }

        Ok(updated)
    }

    fn publish_status(&self, event: &Event) {
        let _ = self.event_bus.publish(LiveEvent::EventStatusChanged {
            event_id: event.id,
            status: event.status,
            timestamp: Utc::now(),
        });
    }

    // ── Bookings ────────────────────────────────────────────────────────

    /// Books one ticket.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the attendee name or
    /// email is blank, or [`GatewayError::EventNotFound`] if the event does
    /// not exist.
    pub async fn book_ticket(&self, new: NewBooking) -> Result<Booking, GatewayError> {
        if new.attendee_name.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "attendee_name must not be empty".to_string(),
            ));
        }
        if new.attendee_email.trim().is_empty() {
            return Err(GatewayError::InvalidRequest(
                "attendee_email must not be empty".to_string(),
            ));
        }
        if !self.registry.contains_event(new.event_id).await {
            return Err(GatewayError::EventNotFound(new.event_id));
        }

        let (booking, sales) = self.registry.record_booking(new, now_local()).await;

        let _ = self.event_bus.publish(LiveEvent::BookingConfirmed {
            event_id: booking.event_id,
            booking_id: booking.id,
            ticket_price: booking.ticket_price,
            total_sales: sales.total_sales,
            total_revenue: sales.total_revenue,
            timestamp: Utc::now(),
        });

        tracing::info!(
            event_id = booking.event_id,
            booking_id = booking.id,
            ticket_price = booking.ticket_price,
            "ticket booked"
        );
        Ok(booking)
    }

    /// Current live sales counters.
    pub async fn live_sales(&self) -> LiveSales {
        self.registry.live_sales().await
    }

    /// Every booking rendered as CSV.
    pub async fn bookings_csv(&self) -> String {
        bookings_csv(&self.registry.bookings().await)
    }

    // ── Engagement ──────────────────────────────────────────────────────

    /// Engagement snapshot; all empty with zero attendance when the event
    /// has no record.
    pub async fn engagement(&self, event_id: u64) -> Engagement {
        self.registry
            .engagement(event_id)
            .await
            .unwrap_or_default()
    }

    /// Polls of an event, empty when it has none.
    pub async fn polls(&self, event_id: u64) -> Vec<Poll> {
        self.engagement(event_id).await.polls
    }

    /// Questions of an event, empty when it has none.
    pub async fn questions(&self, event_id: u64) -> Vec<QaQuestion> {
        self.engagement(event_id).await.qa_questions
    }

    /// Creates an active poll, starting the event's engagement record if
    /// needed.
    ///
    /// Options are trimmed and blank ones dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the question is blank or
    /// fewer than two distinct options remain, [`GatewayError::EventNotFound`]
    /// if the event does not exist, or [`GatewayError::PersistenceError`]
    /// if the engagement file cannot be written.
    pub async fn create_poll(
        &self,
        event_id: u64,
        question: &str,
        options: Vec<String>,
    ) -> Result<Poll, GatewayError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "poll question must not be empty".to_string(),
            ));
        }
        let options = normalize_options(options)?;
        if !self.registry.contains_event(event_id).await {
            return Err(GatewayError::EventNotFound(event_id));
        }

        let mut engagement = self.registry.engagement_mut().await;
        let mut staged = engagement.clone();
        let poll = staged
            .entry(event_id)
            .or_insert_with(Engagement::started)
            .add_poll(question.to_string(), options, now_local());
        self.store.save_engagement(&staged).await?;
        *engagement = staged;
        drop(engagement);

        let _ = self.event_bus.publish(LiveEvent::PollCreated {
            event_id,
            poll_id: poll.id,
            question: poll.question.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(event_id, poll_id = poll.id, options = poll.options.len(), "poll created");
        Ok(poll)
    }

    /// Records one vote on a poll option.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EngagementNotFound`] or
    /// [`GatewayError::PollNotFound`] when either is missing,
    /// [`GatewayError::InvalidRequest`] if `option` is not one of the poll's
    /// options, or [`GatewayError::PersistenceError`] if the engagement
    /// file cannot be written.
    pub async fn vote_poll(
        &self,
        event_id: u64,
        poll_id: u64,
        option: &str,
    ) -> Result<Poll, GatewayError> {
        let mut engagement = self.registry.engagement_mut().await;
        let mut staged = engagement.clone();
        let poll = staged
            .get_mut(&event_id)
            .ok_or(GatewayError::EngagementNotFound(event_id))?
            .poll_mut(poll_id)
            .ok_or(GatewayError::PollNotFound { event_id, poll_id })?;
        if !poll.vote(option) {
            return Err(GatewayError::InvalidRequest(format!(
                "'{option}' is not an option of poll {poll_id}"
            )));
        }
        let poll = poll.clone();
        self.store.save_engagement(&staged).await?;
        *engagement = staged;
        drop(engagement);

        let _ = self.event_bus.publish(LiveEvent::PollVoted {
            event_id,
            poll_id,
            option: option.to_string(),
            responses: poll.responses,
            timestamp: Utc::now(),
        });

        tracing::debug!(event_id, poll_id, option, "poll vote recorded");
        Ok(poll)
    }

    /// Deletes a poll.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EngagementNotFound`] or
    /// [`GatewayError::PollNotFound`] when either is missing, or
    /// [`GatewayError::PersistenceError`] if the engagement file cannot be
    /// written.
    pub async fn delete_poll(&self, event_id: u64, poll_id: u64) -> Result<(), GatewayError> {
        let mut engagement = self.registry.engagement_mut().await;
        let mut staged = engagement.clone();
        let removed = staged
            .get_mut(&event_id)
            .ok_or(GatewayError::EngagementNotFound(event_id))?
            .remove_poll(poll_id);
        if !removed {
            return Err(GatewayError::PollNotFound { event_id, poll_id });
        }
        self.store.save_engagement(&staged).await?;
        *engagement = staged;
        drop(engagement);

        let _ = self.event_bus.publish(LiveEvent::PollDeleted {
            event_id,
            poll_id,
            timestamp: Utc::now(),
        });

        tracing::info!(event_id, poll_id, "poll deleted");
        Ok(())
    }

    /// Submits an audience question, starting the event's engagement
    /// record if needed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the question is blank,
    /// [`GatewayError::EventNotFound`] if the event does not exist, or
    /// [`GatewayError::PersistenceError`] if the engagement file cannot be
    /// written.
    pub async fn submit_question(
        &self,
        event_id: u64,
        question: &str,
    ) -> Result<QaQuestion, GatewayError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "question must not be empty".to_string(),
            ));
        }
        if !self.registry.contains_event(event_id).await {
            return Err(GatewayError::EventNotFound(event_id));
        }

        let mut engagement = self.registry.engagement_mut().await;
        let mut staged = engagement.clone();
        let entry = staged
            .entry(event_id)
            .or_insert_with(Engagement::started)
            .add_question(question.to_string(), now_local());
        self.store.save_engagement(&staged).await?;
        *engagement = staged;
        drop(engagement);

        let _ = self.event_bus.publish(LiveEvent::QuestionSubmitted {
            event_id,
            question_id: entry.id,
            question: entry.question.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(event_id, question_id = entry.id, "question submitted");
        Ok(entry)
    }

    /// Adds one up-vote to a question.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EngagementNotFound`] or
    /// [`GatewayError::QuestionNotFound`] when either is missing, or
    /// [`GatewayError::PersistenceError`] if the engagement file cannot be
    /// written.
    pub async fn vote_question(
        &self,
        event_id: u64,
        question_id: u64,
    ) -> Result<QaQuestion, GatewayError> {
        let mut engagement = self.registry.engagement_mut().await;
        let mut staged = engagement.clone();
        let entry = staged
            .get_mut(&event_id)
            .ok_or(GatewayError::EngagementNotFound(event_id))?
            .question_mut(question_id)
            .ok_or(GatewayError::QuestionNotFound {
                event_id,
                question_id,
            })?;
        entry.votes = entry.votes.saturating_add(1);
        let entry = entry.clone();
        self.store.save_engagement(&staged).await?;
        *engagement = staged;
        drop(engagement);

        let _ = self.event_bus.publish(LiveEvent::QuestionVoted {
            event_id,
            question_id,
            votes: entry.votes,
            timestamp: Utc::now(),
        });

        tracing::debug!(event_id, question_id, votes = entry.votes, "question vote recorded");
        Ok(entry)
    }

    /// Deletes a question.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EngagementNotFound`] or
    /// [`GatewayError::QuestionNotFound`] when either is missing, or
    /// [`GatewayError::PersistenceError`] if the engagement file cannot be
    /// written.
    pub async fn delete_question(&self, event_id: u64, question_id: u64) -> Result<(), GatewayError> {
        let mut engagement = self.registry.engagement_mut().await;
        let mut staged = engagement.clone();
        let removed = staged
            .get_mut(&event_id)
            .ok_or(GatewayError::EngagementNotFound(event_id))?
            .remove_question(question_id);
        if !removed {
            return Err(GatewayError::QuestionNotFound {
                event_id,
                question_id,
            });
        }
        self.store.save_engagement(&staged).await?;
        *engagement = staged;
        drop(engagement);

        let _ = self.event_bus.publish(LiveEvent::QuestionDeleted {
            event_id,
            question_id,
            timestamp: Utc::now(),
        });

        tracing::info!(event_id, question_id, "question deleted");
        Ok(())
    }

    // ── Analytics ───────────────────────────────────────────────────────

    /// Builds the post-event report of a completed event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventNotFound`] if the id is unknown, or
    /// [`GatewayError::NotCompleted`] if the event has not ended.
    pub async fn post_event_report(&self, event_id: u64) -> Result<PostEventReport, GatewayError> {
        let event = self.registry.get_event(event_id).await?;
        let engagement = self.engagement(event_id).await;
        build_post_event_report(&event, &engagement)
    }
}

/// Trims options, drops blank ones and requires at least two, all
/// distinct.
fn normalize_options(options: Vec<String>) -> Result<Vec<String>, GatewayError> {
    let options: Vec<String> = options
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    let distinct: BTreeSet<&str> = options.iter().map(String::as_str).collect();
    if distinct.len() != options.len() {
        return Err(GatewayError::InvalidRequest(
            "poll options must be distinct".to_string(),
        ));
    }
    if options.len() < 2 {
        return Err(GatewayError::InvalidRequest(
            "a poll needs at least two options".to_string(),
        ));
    }
    Ok(options)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::seed::{sample_engagement, sample_events};
    use crate::domain::{DEFAULT_CURRENCY, EventStatus};
    use crate::persistence::json_store::ENGAGEMENT_FILE;

    struct Fixture {
        service: EventService,
        dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let registry = Arc::new(EventRegistry::new(
            sample_events(now_local()),
            BTreeMap::new(),
            BTreeMap::new(),
        ));
        let service = EventService::new(
            registry,
            JsonFileStore::new(dir.path()),
            None,
            EventBus::new(64),
        );
        Fixture { service, dir }
    }

    fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "Workshop".to_string(),
            date: "2024-06-01".to_string(),
            time: "10:00".to_string(),
            location: "Room 4".to_string(),
            capacity: 40,
            ticket_price: 1_000,
            currency: DEFAULT_CURRENCY.to_string(),
            image: String::new(),
        }
    }

    fn yes_no() -> Vec<String> {
        vec!["Yes".to_string(), "No".to_string()]
    }

    #[tokio::test]
    async fn created_event_ids_increase() {
        let f = fixture();
        let Ok(a) = f.service.create_event(new_event("Rust Meetup")).await else {
            panic!("create should succeed");
        };
        let Ok(b) = f.service.create_event(new_event("Go Meetup")).await else {
            panic!("create should succeed");
        };
        assert_eq!(a.id, 3);
        assert_eq!(b.id, 4);
        assert_eq!(a.status, EventStatus::Upcoming);
        assert_eq!(f.service.list_events().await.len(), 4);
    }

    #[tokio::test]
    async fn failed_write_leaves_state_unchanged() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        // A regular file where the data directory should be.
        let blocked = dir.path().join("not-a-dir");
        assert!(std::fs::write(&blocked, "").is_ok());
        let mut engagement = sample_engagement();
        let Some(first) = engagement.get_mut(&1) else {
            panic!("seed engagement for event 1");
        };
        let lunch = first.add_poll("Lunch?".to_string(), yes_no(), now_local());
        let service = EventService::new(
            Arc::new(EventRegistry::new(
                sample_events(now_local()),
                engagement,
                BTreeMap::new(),
            )),
            JsonFileStore::new(&blocked),
            None,
            EventBus::new(16),
        );

        assert!(matches!(
            service.create_event(new_event("Rust Meetup")).await,
            Err(GatewayError::PersistenceError(_))
        ));
        assert_eq!(service.list_events().await.len(), 2);

        assert!(service.go_live(1).await.is_err());
        assert!(
            service
                .get_event(1)
                .await
                .is_ok_and(|e| e.status == EventStatus::Upcoming)
        );

        assert!(matches!(
            service.vote_poll(1, lunch.id, "Yes").await,
            Err(GatewayError::PersistenceError(_))
        ));
        assert!(service.delete_poll(1, lunch.id).await.is_err());
        assert!(service.create_poll(1, "Dinner?", yes_no()).await.is_err());
        assert!(service.submit_question(2, "Encore?").await.is_err());
        assert!(service.vote_question(1, 1).await.is_err());
        assert!(service.delete_question(1, 1).await.is_err());

        let one = service.engagement(1).await;
        assert_eq!(one.polls.len(), 3);
        assert!(
            one.polls
                .iter()
                .find(|p| p.id == lunch.id)
                .is_some_and(|p| p.votes_for("Yes") == 0 && p.responses == 0)
        );
        assert_eq!(one.qa_questions.len(), 2);
        assert_eq!(one.qa_questions.first().map(|q| q.votes), Some(15));
        assert_eq!(service.questions(2).await.len(), 1);
        assert!(!blocked.is_dir());
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let f = fixture();
        let result = f.service.create_event(new_event("   ")).await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn create_event_publishes() {
        let f = fixture();
        let mut rx = f.service.event_bus().subscribe();
        assert!(f.service.create_event(new_event("Launch")).await.is_ok());
        let Ok(LiveEvent::EventCreated { event_id, .. }) = rx.try_recv() else {
            panic!("expected EventCreated");
        };
        assert_eq!(event_id, 3);
    }

    #[tokio::test]
    async fn lifecycle_rejects_out_of_order_transitions() {
        let f = fixture();
        assert!(matches!(
            f.service.end_event(1).await,
            Err(GatewayError::InvalidTransition { .. })
        ));
        let Ok(live) = f.service.go_live(1).await else {
            panic!("go-live should succeed");
        };
        assert_eq!(live.status, EventStatus::Live);
        assert!(live.live_start_time.is_some());
        assert!(matches!(
            f.service.go_live(1).await,
            Err(GatewayError::InvalidTransition { .. })
        ));
        let Ok(done) = f.service.end_event(1).await else {
            panic!("end should succeed");
        };
        assert!(done.is_completed());
        assert!(done.ended_at.is_some());
        assert!(matches!(
            f.service.end_event(99).await,
            Err(GatewayError::EventNotFound(99))
        ));
    }

    #[tokio::test]
    async fn booking_requires_known_event_and_attendee() {
        let f = fixture();
        let booking = |event_id: u64, name: &str| NewBooking {
            event_id,
            attendee_name: name.to_string(),
            attendee_email: "guest@example.com".to_string(),
            ticket_price: 250_000,
            currency: DEFAULT_CURRENCY.to_string(),
        };
        assert!(matches!(
            f.service.book_ticket(booking(42, "Guest")).await,
            Err(GatewayError::EventNotFound(42))
        ));
        assert!(matches!(
            f.service.book_ticket(booking(1, " ")).await,
            Err(GatewayError::InvalidRequest(_))
        ));
        let Ok(first) = f.service.book_ticket(booking(1, "Guest")).await else {
            panic!("booking should succeed");
        };
        assert_eq!(first.id, 1);
        let sales = f.service.live_sales().await;
        assert_eq!(sales.total_sales, 1);
        assert_eq!(sales.total_revenue, 250_000);
        assert_eq!(f.service.bookings_csv().await.lines().count(), 2);
    }

    #[tokio::test]
    async fn votes_accumulate_per_option() {
        let f = fixture();
        assert!(matches!(
            f.service.create_poll(3, "Pizza?", yes_no()).await,
            Err(GatewayError::EventNotFound(3))
        ));
        let Ok(poll) = f.service.create_poll(1, "Pizza?", yes_no()).await else {
            panic!("poll on event 1 should succeed");
        };
        for _ in 0..5 {
            assert!(f.service.vote_poll(1, poll.id, "Yes").await.is_ok());
        }
        let Ok(voted) = f.service.vote_poll(1, poll.id, "No").await else {
            panic!("vote should succeed");
        };
        assert_eq!(voted.votes_for("Yes"), 5);
        assert_eq!(voted.votes_for("No"), 1);
        assert_eq!(voted.responses, 6);
    }

    #[tokio::test]
    async fn unknown_option_is_rejected() {
        let f = fixture();
        let Ok(poll) = f.service.create_poll(1, "Lunch?", yes_no()).await else {
            panic!("poll should be created");
        };
        assert!(matches!(
            f.service.vote_poll(1, poll.id, "Maybe").await,
            Err(GatewayError::InvalidRequest(_))
        ));
        assert_eq!(
            f.service.polls(1).await.first().map(|p| p.responses),
            Some(0)
        );
    }

    #[tokio::test]
    async fn poll_validation() {
        let f = fixture();
        assert!(matches!(
            f.service.create_poll(1, " ", yes_no()).await,
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(matches!(
            f.service
                .create_poll(1, "One?", vec!["Only".to_string(), " ".to_string()])
                .await,
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(matches!(
            f.service
                .create_poll(1, "Dup?", vec!["A".to_string(), "A ".to_string()])
                .await,
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn first_poll_starts_engagement_and_is_saved() {
        let f = fixture();
        assert_eq!(f.service.engagement(1).await.live_attendance, 0);
        let Ok(poll) = f.service.create_poll(1, "Enjoying it?", yes_no()).await else {
            panic!("poll should be created");
        };
        assert_eq!(poll.id, 1);
        assert_eq!(f.service.engagement(1).await.live_attendance, 240);
        assert!(f.dir.path().join(ENGAGEMENT_FILE).exists());
    }

    #[tokio::test]
    async fn deleting_missing_items_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.service.delete_poll(1, 1).await,
            Err(GatewayError::EngagementNotFound(1))
        ));
        assert!(f.service.submit_question(2, "Encore?").await.is_ok());
        assert!(matches!(
            f.service.delete_poll(2, 99).await,
            Err(GatewayError::PollNotFound { .. })
        ));
        assert!(matches!(
            f.service.delete_question(2, 99).await,
            Err(GatewayError::QuestionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn questions_can_be_voted_and_deleted() {
        let f = fixture();
        let Ok(q) = f.service.submit_question(1, "Where is parking?").await else {
            panic!("question should be submitted");
        };
        assert_eq!(q.votes, 0);
        assert!(!q.answered);
        let Ok(q) = f.service.vote_question(1, q.id).await else {
            panic!("vote should succeed");
        };
        assert_eq!(q.votes, 1);
        assert!(f.service.delete_question(1, q.id).await.is_ok());
        assert!(f.service.questions(1).await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_votes_are_not_lost() {
        let f = fixture();
        let Ok(poll) = f.service.create_poll(1, "Tabs?", yes_no()).await else {
            panic!("poll should be created");
        };
        let mut handles = Vec::new();
        for _ in 0..25 {
            let service = f.service.clone();
            handles.push(tokio::spawn(async move {
                service.vote_poll(1, poll.id, "Yes").await.is_ok()
            }));
        }
        for handle in handles {
            assert!(matches!(handle.await, Ok(true)));
        }
        let Some(poll) = f.service.polls(1).await.into_iter().next() else {
            panic!("poll should exist");
        };
        assert_eq!(poll.votes_for("Yes"), 25);
        assert_eq!(poll.responses, 25);
    }

    #[tokio::test]
    async fn post_event_report_needs_completion() {
        let f = fixture();
        assert!(matches!(
            f.service.post_event_report(2).await,
            Err(GatewayError::NotCompleted(2))
        ));
        assert!(f.service.go_live(2).await.is_ok());
        assert!(f.service.end_event(2).await.is_ok());
        let Ok(report) = f.service.post_event_report(2).await else {
            panic!("report should build");
        };
        assert!(report.success);
        assert!(matches!(
            f.service.post_event_report(77).await,
            Err(GatewayError::EventNotFound(77))
        ));
    }

    #[tokio::test]
    async fn end_event_captures_when_store_is_configured() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let Ok(analytics) = AnalyticsStore::connect("sqlite::memory:").await else {
            panic!("in-memory database");
        };
        let service = EventService::new(
            Arc::new(EventRegistry::new(
                sample_events(now_local()),
                sample_engagement(),
                BTreeMap::new(),
            )),
            JsonFileStore::new(dir.path()),
            Some(analytics),
            EventBus::new(16),
        );
        assert!(service.go_live(2).await.is_ok());
        assert!(service.end_event(2).await.is_ok());
        let Some(store) = service.analytics_store() else {
            panic!("store configured");
        };
        let Ok(Some(row)) = store.load_event(2).await else {
            panic!("capture should be stored");
        };
        assert_eq!(row.event_status, "completed");
    }
}
