//! Dashboard payloads.
//!
//! Most of these are fixed sample figures shown by the dashboard until
//! real aggregation replaces them. Only [`overview`] and [`event_analytics`]
//! read live event data.

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Event;

/// Average rating reported by the sample feedback.
pub const SAMPLE_AVG_RATING: f64 = 4.6;

/// Number of events listed in the overview.
pub const RECENT_EVENTS: usize = 4;

/// Sales for one weekday.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyRevenue {
    /// Short weekday name.
    pub day: String,
    /// Tickets sold.
    pub sales: u64,
    /// Revenue collected.
    pub revenue: u64,
}

/// Revenue figures for the analytics page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueAnalytics {
    /// Revenue to date.
    pub total: u64,
    /// Week-over-week change in percent.
    pub change: f64,
    /// Monday to Sunday.
    pub weekly_data: Vec<DailyRevenue>,
}

/// One slice of the engagement breakdown chart.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BreakdownSlice {
    /// Activity name.
    pub name: String,
    /// Share in percent.
    pub value: u64,
}

/// Engagement figures for the analytics page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EngagementAnalytics {
    /// Attendees in the room.
    pub live_attendance: u64,
    /// Polls accepting votes.
    pub active_polls: u64,
    /// Questions asked.
    pub qa_questions: u64,
    /// Share of each activity.
    pub breakdown: Vec<BreakdownSlice>,
}

/// Rating for one feedback category.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryRating {
    /// Category name.
    pub category: String,
    /// Score out of 100.
    pub rating: u64,
}

/// Sentiment split in percent.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SentimentSplit {
    /// Positive share.
    pub positive: u64,
    /// Neutral share.
    pub neutral: u64,
    /// Negative share.
    pub negative: u64,
}

/// One attendee comment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackComment {
    /// Stars out of 5.
    pub rating: u64,
    /// Comment text.
    pub comment: String,
    /// Attendee name.
    pub attendee: String,
    /// Session the comment is about.
    pub session: String,
}

/// Post-event feedback summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackSummary {
    /// Feedback forms received.
    pub total_responses: u64,
    /// Mean rating out of 5.
    pub avg_rating: f64,
    /// Response rate in percent.
    pub response_rate: u64,
    /// Net promoter score.
    pub nps: i64,
    /// Per-category ratings.
    pub ratings: Vec<CategoryRating>,
    /// Sentiment split.
    pub sentiment: SentimentSplit,
    /// Highlighted comments.
    pub comments: Vec<FeedbackComment>,
}

/// Poll entry of the sample poll list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SamplePoll {
    /// Poll id.
    pub id: u64,
    /// Question.
    pub question: String,
    /// Responses.
    pub responses: u64,
    /// Whether it accepts votes.
    pub active: bool,
}

/// Attendance counters for the live ticker.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LiveUpdate {
    /// Attendees in the room.
    pub attendance: u64,
    /// Polls accepting votes.
    pub new_polls: u64,
    /// Questions asked.
    pub qa_questions: u64,
    /// When the figures were taken.
    pub timestamp: NaiveDateTime,
}

/// Headline numbers of the overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverviewStats {
    /// Number of events.
    pub total_events: u64,
    /// Sum of ticket price × attendees over all events.
    pub total_revenue: u64,
    /// Sum of attendees over all events.
    pub total_attendees: u64,
    /// Average feedback rating.
    pub avg_rating: f64,
}

/// Dashboard overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Overview {
    /// Headline numbers.
    pub stats: OverviewStats,
    /// The most recently created events, oldest first.
    pub recent_events: Vec<Event>,
    /// Weekly revenue trend.
    pub revenue_trend: Vec<DailyRevenue>,
}

/// Attendance at one time of day.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendancePoint {
    /// Clock time.
    pub time: String,
    /// Attendees present.
    pub attendees: u64,
}

/// Per-event analytics card.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventAnalyticsCard {
    /// The event.
    pub event: Event,
    /// Ticket price × attendees.
    pub revenue: u64,
    /// Engagement rate in percent.
    pub engagement_rate: u64,
    /// Satisfaction out of 5.
    pub satisfaction_score: f64,
    /// Attendance over the day.
    pub attendance_trend: Vec<AttendancePoint>,
}

/// Revenue of the current week.
#[must_use]
pub fn revenue() -> RevenueAnalytics {
    RevenueAnalytics {
        total: 7_852_000,
        change: 8.1,
        weekly_data: weekly_data(),
    }
}

fn weekly_data() -> Vec<DailyRevenue> {
    [
        ("Mon", 45, 2_300_000),
        ("Tue", 32, 1_800_000),
        ("Wed", 68, 3_200_000),
        ("Thu", 55, 2_900_000),
        ("Fri", 89, 4_100_000),
        ("Sat", 120, 5_800_000),
        ("Sun", 95, 4_500_000),
    ]
    .into_iter()
    .map(|(day, sales, revenue)| DailyRevenue {
        day: day.to_string(),
        sales,
        revenue,
    })
    .collect()
}

/// Engagement across live events.
#[must_use]
pub fn engagement() -> EngagementAnalytics {
    EngagementAnalytics {
        live_attendance: 240,
        active_polls: 3,
        qa_questions: 47,
        breakdown: vec![
            BreakdownSlice {
                name: "Poll Participation".to_string(),
                value: 40,
            },
            BreakdownSlice {
                name: "Q&A Sessions".to_string(),
                value: 32,
            },
            BreakdownSlice {
                name: "Survey Responses".to_string(),
                value: 28,
            },
        ],
    }
}

/// Feedback summary.
#[must_use]
pub fn feedback() -> FeedbackSummary {
    let rating = |category: &str, rating| CategoryRating {
        category: category.to_string(),
        rating,
    };
    FeedbackSummary {
        total_responses: 2568,
        avg_rating: SAMPLE_AVG_RATING,
        response_rate: 89,
        nps: 67,
        ratings: vec![
            rating("Overall Satisfaction", 85),
            rating("Content Quality", 92),
            rating("Organization", 78),
            rating("Venue Quality", 88),
        ],
        sentiment: SentimentSplit {
            positive: 68,
            neutral: 22,
            negative: 10,
        },
        comments: vec![FeedbackComment {
            rating: 5,
            comment: "Excellent conference! Very informative.".to_string(),
            attendee: "Sarah Johnson".to_string(),
            session: "Tech Panel Discussion".to_string(),
        }],
    }
}

/// The global poll list.
#[must_use]
pub fn sample_polls() -> Vec<SamplePoll> {
    vec![
        SamplePoll {
            id: 1,
            question: "What's your favorite session topic?".to_string(),
            responses: 145,
            active: true,
        },
        SamplePoll {
            id: 2,
            question: "Rate the venue quality".to_string(),
            responses: 89,
            active: false,
        },
    ]
}

/// Echo of a poll posted to the global list. Nothing is stored.
#[must_use]
pub fn echo_poll(question: String) -> SamplePoll {
    SamplePoll {
        id: 1,
        question,
        responses: 0,
        active: true,
    }
}

/// Current live counters.
#[must_use]
pub fn live_update(now: NaiveDateTime) -> LiveUpdate {
    let e = engagement();
    LiveUpdate {
        attendance: e.live_attendance,
        new_polls: e.active_polls,
        qa_questions: e.qa_questions,
        timestamp: now,
    }
}

/// Download link for an export type, `None` for unknown types.
#[must_use]
pub fn export_link(data_type: &str) -> Option<(String, String)> {
    let label = match data_type {
        "revenue" => "Revenue",
        "feedback" => "Feedback",
        "engagement" => "Engagement",
        _ => return None,
    };
    Some((
        format!("{label} data exported successfully"),
        format!("/downloads/{data_type}.csv"),
    ))
}

/// Overview of all events.
#[must_use]
pub fn overview(events: &[Event]) -> Overview {
    let total_revenue = events
        .iter()
        .map(|e| e.ticket_price.saturating_mul(e.attendees))
        .fold(0_u64, u64::saturating_add);
    let total_attendees = events
        .iter()
        .map(|e| e.attendees)
        .fold(0_u64, u64::saturating_add);
    let skip = events.len().saturating_sub(RECENT_EVENTS);
    Overview {
        stats: OverviewStats {
            total_events: events.len() as u64,
            total_revenue,
            total_attendees,
            avg_rating: SAMPLE_AVG_RATING,
        },
        recent_events: events.iter().skip(skip).cloned().collect(),
        revenue_trend: weekly_data(),
    }
}

/// Analytics card for one event.
#[must_use]
pub fn event_analytics(event: Event) -> EventAnalyticsCard {
    let attendees = event.attendees;
    EventAnalyticsCard {
        revenue: event.ticket_price.saturating_mul(attendees),
        event,
        engagement_rate: 75,
        satisfaction_score: 4.5,
        attendance_trend: vec![
            AttendancePoint {
                time: "10:00".to_string(),
                attendees: 50,
            },
            AttendancePoint {
                time: "11:00".to_string(),
                attendees: 120,
            },
            AttendancePoint {
                time: "12:00".to_string(),
                attendees,
            },
        ],
    }
}
