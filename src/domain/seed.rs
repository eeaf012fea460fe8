//! Sample data used when the data files do not exist yet.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::{Engagement, Event, EventStatus, Poll, QaQuestion};

/// The two demo events shipped with a fresh install.
#[must_use]
pub fn sample_events(now: NaiveDateTime) -> Vec<Event> {
    vec![
        Event {
            id: 1,
            title: "Tech Conference 2024".to_string(),
            description: "Annual technology conference featuring the latest innovations"
                .to_string(),
            date: "2024-03-15".to_string(),
            time: "09:00".to_string(),
            location: "Convention Center, Jakarta".to_string(),
            capacity: 500,
            ticket_price: 250_000,
            currency: "INR".to_string(),
            image: "/static/images/tech-conference.jpg".to_string(),
            attendees: 0,
            status: EventStatus::Upcoming,
            created_at: now,
            live_start_time: None,
            ended_at: None,
        },
        Event {
            id: 2,
            title: "Music Festival".to_string(),
            description: "Three-day music festival with international artists".to_string(),
            date: "2024-04-20".to_string(),
            time: "18:00".to_string(),
            location: "City Park, Jakarta".to_string(),
            capacity: 1000,
            ticket_price: 450_000,
            currency: "INR".to_string(),
            image: "/static/images/music-festival.jpg".to_string(),
            attendees: 0,
            status: EventStatus::Upcoming,
            created_at: now,
            live_start_time: None,
            ended_at: None,
        },
    ]
}

/// Engagement for the demo events.
#[must_use]
pub fn sample_engagement() -> BTreeMap<u64, Engagement> {
    let mut map = BTreeMap::new();
    map.insert(
        1,
        Engagement {
            polls: vec![
                summary_poll(1, "How satisfied are you with the event?", 45, false),
                summary_poll(2, "What topics interest you most?", 32, true),
            ],
            qa_questions: vec![
                question(1, "What are the latest trends in AI?", 15, true),
                question(2, "How can we improve engagement?", 8, false),
            ],
            live_attendance: 180,
        },
    );
    map.insert(
        2,
        Engagement {
            polls: vec![summary_poll(1, "Rate the music quality", 89, false)],
            qa_questions: vec![question(1, "When is the next performance?", 12, true)],
            live_attendance: 450,
        },
    );
    map
}

fn summary_poll(id: u64, text: &str, responses: u64, active: bool) -> Poll {
    Poll {
        id,
        question: text.to_string(),
        options: Vec::new(),
        responses,
        active,
        created: None,
        option_votes: BTreeMap::new(),
    }
}

fn question(id: u64, text: &str, votes: u64, answered: bool) -> QaQuestion {
    QaQuestion {
        id,
        question: text.to_string(),
        votes,
        answered,
        timestamp: None,
    }
}
