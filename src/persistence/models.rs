//! Row types for the analytics database.
//!
//! Integer columns are `i64` because SQLite has no unsigned integer
//! storage class.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Converts a counter to a SQLite integer, saturating at `i64::MAX`.
#[must_use]
pub fn to_db_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// One row of `events_analytics`, keyed by `event_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAnalyticsRow {
    /// Event id rendered as text.
    pub event_id: String,
    /// Event title.
    pub event_title: String,
    /// Event date as entered.
    pub event_date: String,
    /// Always `completed`.
    pub event_status: String,
    /// Capture time.
    pub completed_at: NaiveDateTime,
    /// Event capacity.
    pub total_capacity: i64,
    /// Tickets sold.
    pub total_tickets_sold: i64,
    /// Revenue collected.
    pub total_revenue: i64,
    /// Ticket price.
    pub ticket_price: i64,
    /// Currency code.
    pub currency: String,
    /// Attendees in the room.
    pub live_attendance: i64,
    /// Highest attendance seen.
    pub peak_attendance: i64,
    /// Mean attendance.
    pub avg_attendance: f64,
    /// Nominal event length.
    pub attendance_duration_minutes: i64,
    /// Number of polls.
    pub total_polls: i64,
    /// Sum of poll responses.
    pub total_poll_responses: i64,
    /// Number of questions.
    pub total_qa_questions: i64,
    /// Answered questions.
    pub total_qa_answered: i64,
    /// Engagement rate in percent.
    pub engagement_rate: f64,
    /// Tickets per page view in percent.
    pub conversion_rate: f64,
    /// Satisfaction score out of 5.
    pub satisfaction_score: f64,
    /// Net promoter score.
    pub nps_score: f64,
    /// Share of attendees who would recommend the event.
    pub recommendation_rate: f64,
}

/// One row of `poll_analytics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollAnalyticsRow {
    /// Event id rendered as text.
    pub event_id: String,
    /// Poll id within the event.
    pub poll_id: i64,
    /// Poll question.
    pub poll_question: String,
    /// Always `multiple_choice`.
    pub poll_type: String,
    /// Recorded responses.
    pub total_responses: i64,
    /// Poll creation time, or the capture time when unknown.
    pub created_at: NaiveDateTime,
    /// Responses per attendee in percent.
    pub response_rate: f64,
    /// Option with the most votes, empty when the poll has no options.
    pub most_popular_option: String,
    /// Share of responses for that option in percent.
    pub most_popular_percentage: f64,
}

/// One row of `poll_options_analytics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollOptionRow {
    /// Event id rendered as text.
    pub event_id: String,
    /// Poll id within the event.
    pub poll_id: i64,
    /// Option text.
    pub option_text: String,
    /// Votes cast.
    pub vote_count: i64,
    /// Share of the poll's responses in percent.
    pub percentage: f64,
}

/// One row of `qa_analytics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaAnalyticsRow {
    /// Event id rendered as text.
    pub event_id: String,
    /// Question id within the event.
    pub question_id: i64,
    /// Question text.
    pub question_text: String,
    /// Topic bucket.
    pub category: String,
    /// Question sentiment label.
    pub sentiment: String,
    /// Urgency bucket.
    pub priority_level: String,
    /// Votes received.
    pub vote_count: i64,
    /// Whether it was answered.
    pub is_answered: bool,
    /// Submission time, or the capture time when unknown.
    pub created_at: NaiveDateTime,
}

/// One row of `event_insights`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightRow {
    /// Event id rendered as text.
    pub event_id: String,
    /// `strength`, `weakness`, `opportunity` or `recommendation`.
    pub insight_type: String,
    /// Area the insight is about.
    pub insight_category: String,
    /// Insight text.
    pub insight_text: String,
    /// Confidence in `[0, 1]`.
    pub confidence_score: f64,
    /// Supporting metrics as a JSON object.
    pub supporting_data: String,
}

/// One row of `sentiment_analysis`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRow {
    /// Event id rendered as text.
    pub event_id: String,
    /// `poll_question` or `qa_question`.
    pub content_type: String,
    /// Poll or question id.
    pub content_id: i64,
    /// Score in `[-1, 1]`.
    pub sentiment_score: f64,
    /// `positive`, `neutral` or `negative`.
    pub sentiment_label: String,
    /// Fixed confidence.
    pub confidence: f64,
    /// Keywords as a JSON array.
    pub keywords: String,
}

/// Every row written for one completed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRecord {
    /// Main row.
    pub event: EventAnalyticsRow,
    /// One row per poll.
    pub polls: Vec<PollAnalyticsRow>,
    /// One row per option of polls that have options.
    pub poll_options: Vec<PollOptionRow>,
    /// One row per question.
    pub questions: Vec<QaAnalyticsRow>,
    /// Generated insights.
    pub insights: Vec<InsightRow>,
    /// Poll questions followed by audience questions.
    pub sentiments: Vec<SentimentRow>,
}
