//! Snapshot of an event taken when it ends, and the analytics rows
//! derived from it.

use chrono::NaiveDateTime;

use super::heuristics::{
    PriorityLevel, categorize_question, extract_keywords, question_sentiment, sentiment,
};
use super::insights::completion_insights;
use crate::domain::{Engagement, Event, Poll, TicketSales};
use crate::persistence::models::{
    CompletionRecord, EventAnalyticsRow, InsightRow, PollAnalyticsRow, PollOptionRow,
    QaAnalyticsRow, SentimentRow, to_db_int,
};

/// Attendance assumed when neither engagement nor box-office data exist.
pub const FALLBACK_ATTENDANCE: u64 = 150;
/// Nominal event length in minutes.
pub const ATTENDANCE_DURATION_MINUTES: u64 = 120;
/// Minimum page views assumed per event.
const MIN_PAGE_VIEWS: u64 = 1000;
/// Page views assumed per ticket sold.
const VIEWS_PER_TICKET: u64 = 5;
/// Confidence stored with every sentiment row.
const SENTIMENT_CONFIDENCE: f64 = 0.8;

const SATISFACTION_WORDS: [&str; 4] = ["satisfaction", "satisfied", "rate", "recommend"];

/// Satisfaction estimate derived from rating-style polls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satisfaction {
    /// Score out of 5.
    pub score: f64,
    /// Net promoter score.
    pub nps: f64,
    /// Share of attendees who would recommend the event, in percent.
    pub recommendation_rate: f64,
}

impl Satisfaction {
    /// Estimates satisfaction from polls whose question mentions
    /// satisfaction, rating or recommending.
    #[must_use]
    pub fn from_polls(polls: &[Poll]) -> Self {
        let rating_polls: Vec<&Poll> = polls
            .iter()
            .filter(|p| {
                let lower = p.question.to_lowercase();
                SATISFACTION_WORDS.iter().any(|w| lower.contains(w))
            })
            .collect();

        if rating_polls.is_empty() {
            return Self {
                score: 3.5,
                nps: 50.0,
                recommendation_rate: 75.0,
            };
        }

        let responses = rating_polls
            .iter()
            .map(|p| p.responses)
            .fold(0, u64::saturating_add) as f64;
        Self {
            score: (3.5 + responses / 100.0).min(5.0),
            nps: (40.0 + responses / 10.0).min(100.0),
            recommendation_rate: (60.0 + responses / 5.0).min(95.0),
        }
    }
}

/// Metrics of an event at the moment it ends.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSnapshot {
    /// Event id.
    pub event_id: u64,
    /// Event title.
    pub title: String,
    /// Event date as entered.
    pub date: String,
    /// Event capacity.
    pub capacity: u64,
    /// Ticket price.
    pub ticket_price: u64,
    /// Currency code.
    pub currency: String,
    /// Attendees in the room.
    pub live_attendance: u64,
    /// Tickets sold.
    pub total_tickets_sold: u64,
    /// Revenue collected.
    pub total_revenue: u64,
    /// Highest attendance seen.
    pub peak_attendance: u64,
    /// 85% of live attendance.
    pub avg_attendance: f64,
    /// Nominal event length.
    pub attendance_duration_minutes: u64,
    /// Number of polls.
    pub total_polls: u64,
    /// Sum of poll responses.
    pub total_poll_responses: u64,
    /// Number of questions.
    pub total_qa_questions: u64,
    /// Answered questions.
    pub total_qa_answered: u64,
    /// Questions count double; capped at 100.
    pub engagement_rate: f64,
    /// Tickets per assumed page view in percent.
    pub conversion_rate: f64,
    /// Satisfaction estimate.
    pub satisfaction: Satisfaction,
}

impl CompletionSnapshot {
    /// Gathers the snapshot from the event, its engagement record (if any)
    /// and its box-office totals (if any).
    #[must_use]
    pub fn build(event: &Event, engagement: Option<&Engagement>, tickets: Option<TicketSales>) -> Self {
        let tickets = tickets.unwrap_or_default();
        let live_attendance = engagement.map_or_else(
            || tickets.total_sold.unwrap_or(FALLBACK_ATTENDANCE),
            |e| e.live_attendance,
        );
        let total_tickets_sold = tickets.total_sold.unwrap_or(live_attendance);
        let total_revenue = tickets
            .revenue
            .unwrap_or_else(|| event.ticket_price.saturating_mul(total_tickets_sold));

        let (polls, questions) = engagement.map_or((&[][..], &[][..]), |e| {
            (e.polls.as_slice(), e.qa_questions.as_slice())
        });
        let total_poll_responses = polls
            .iter()
            .map(|p| p.responses)
            .fold(0, u64::saturating_add);
        let total_qa_questions = questions.len() as u64;
        let total_qa_answered = questions.iter().filter(|q| q.answered).count() as u64;

        Self {
            event_id: event.id,
            title: event.title.clone(),
            date: event.date.clone(),
            capacity: event.capacity,
            ticket_price: event.ticket_price,
            currency: event.currency.clone(),
            live_attendance,
            total_tickets_sold,
            total_revenue,
            peak_attendance: live_attendance.max(total_tickets_sold),
            avg_attendance: live_attendance as f64 * 0.85,
            attendance_duration_minutes: ATTENDANCE_DURATION_MINUTES,
            total_polls: polls.len() as u64,
            total_poll_responses,
            total_qa_questions,
            total_qa_answered,
            engagement_rate: weighted_engagement_rate(
                total_poll_responses,
                total_qa_questions,
                live_attendance,
            ),
            conversion_rate: conversion_rate(total_tickets_sold),
            satisfaction: Satisfaction::from_polls(polls),
        }
    }

    /// Tickets sold as a fraction of capacity. Zero capacity yields zero.
    #[must_use]
    pub fn capacity_filled(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.total_tickets_sold as f64 / self.capacity as f64
    }

    /// Answered share of questions in percent; 100 when nobody asked.
    #[must_use]
    pub fn qa_response_rate(&self) -> f64 {
        if self.total_qa_questions == 0 {
            return 100.0;
        }
        self.total_qa_answered as f64 / self.total_qa_questions as f64 * 100.0
    }
}

/// Poll responses plus twice the questions, per attendee, in percent.
#[must_use]
pub fn weighted_engagement_rate(poll_responses: u64, qa_questions: u64, attendance: u64) -> f64 {
    if attendance == 0 {
        return 0.0;
    }
    let score = (poll_responses as f64 + qa_questions as f64 * 2.0) / attendance as f64 * 100.0;
    score.min(100.0)
}

/// Tickets sold over assumed page views, in percent.
#[must_use]
pub fn conversion_rate(tickets_sold: u64) -> f64 {
    let page_views = MIN_PAGE_VIEWS.max(tickets_sold.saturating_mul(VIEWS_PER_TICKET));
    tickets_sold as f64 / page_views as f64 * 100.0
}

/// Builds every analytics row for a completed event.
#[must_use]
pub fn build_completion_record(
    snapshot: &CompletionSnapshot,
    engagement: Option<&Engagement>,
    completed_at: NaiveDateTime,
) -> CompletionRecord {
    let event_id = snapshot.event_id.to_string();
    let (polls, questions) = engagement.map_or((&[][..], &[][..]), |e| {
        (e.polls.as_slice(), e.qa_questions.as_slice())
    });

    let event = EventAnalyticsRow {
        event_id: event_id.clone(),
        event_title: snapshot.title.clone(),
        event_date: snapshot.date.clone(),
        event_status: "completed".to_string(),
        completed_at,
        total_capacity: to_db_int(snapshot.capacity),
        total_tickets_sold: to_db_int(snapshot.total_tickets_sold),
        total_revenue: to_db_int(snapshot.total_revenue),
        ticket_price: to_db_int(snapshot.ticket_price),
        currency: snapshot.currency.clone(),
        live_attendance: to_db_int(snapshot.live_attendance),
        peak_attendance: to_db_int(snapshot.peak_attendance),
        avg_attendance: snapshot.avg_attendance,
        attendance_duration_minutes: to_db_int(snapshot.attendance_duration_minutes),
        total_polls: to_db_int(snapshot.total_polls),
        total_poll_responses: to_db_int(snapshot.total_poll_responses),
        total_qa_questions: to_db_int(snapshot.total_qa_questions),
        total_qa_answered: to_db_int(snapshot.total_qa_answered),
        engagement_rate: snapshot.engagement_rate,
        conversion_rate: snapshot.conversion_rate,
        satisfaction_score: snapshot.satisfaction.score,
        nps_score: snapshot.satisfaction.nps,
        recommendation_rate: snapshot.satisfaction.recommendation_rate,
    };

    let poll_rows = polls
        .iter()
        .map(|poll| poll_row(&event_id, poll, snapshot.live_attendance, completed_at))
        .collect();

    let poll_options = polls
        .iter()
        .flat_map(|poll| {
            poll.options.iter().map(|option| {
                let votes = poll.votes_for(option);
                PollOptionRow {
                    event_id: event_id.clone(),
                    poll_id: to_db_int(poll.id),
                    option_text: option.clone(),
                    vote_count: to_db_int(votes),
                    percentage: share_of(votes, poll.responses),
                }
            })
        })
        .collect();

    let question_rows = questions
        .iter()
        .map(|q| QaAnalyticsRow {
            event_id: event_id.clone(),
            question_id: to_db_int(q.id),
            question_text: q.question.clone(),
            category: categorize_question(&q.question).to_string(),
            sentiment: question_sentiment(&q.question).as_str().to_string(),
            priority_level: PriorityLevel::for_capture(q.votes).as_str().to_string(),
            vote_count: to_db_int(q.votes),
            is_answered: q.answered,
            created_at: q.timestamp.unwrap_or(completed_at),
        })
        .collect();

    let insights = completion_insights(snapshot)
        .into_iter()
        .map(|insight| InsightRow {
            event_id: event_id.clone(),
            insight_type: insight.insight_type.as_str().to_string(),
            insight_category: insight.category,
            insight_text: insight.text,
            confidence_score: insight.confidence,
            supporting_data: insight.supporting_data.to_string(),
        })
        .collect();

    let sentiments = polls
        .iter()
        .map(|p| ("poll_question", p.id, p.question.as_str()))
        .chain(
            questions
                .iter()
                .map(|q| ("qa_question", q.id, q.question.as_str())),
        )
        .map(|(content_type, content_id, text)| {
            let scored = sentiment(text);
            SentimentRow {
                event_id: event_id.clone(),
                content_type: content_type.to_string(),
                content_id: to_db_int(content_id),
                sentiment_score: scored.score,
                sentiment_label: scored.label.as_str().to_string(),
                confidence: SENTIMENT_CONFIDENCE,
                keywords: serde_json::to_string(&extract_keywords(text))
                    .unwrap_or_else(|_| "[]".to_string()),
            }
        })
        .collect();

    CompletionRecord {
        event,
        polls: poll_rows,
        poll_options,
        questions: question_rows,
        insights,
        sentiments,
    }
}

fn poll_row(
    event_id: &str,
    poll: &Poll,
    attendance: u64,
    completed_at: NaiveDateTime,
) -> PollAnalyticsRow {
    // First option wins ties.
    let top = poll
        .options
        .iter()
        .map(|o| (o, poll.votes_for(o)))
        .reduce(|best, next| if next.1 > best.1 { next } else { best });

    PollAnalyticsRow {
        event_id: event_id.to_string(),
        poll_id: to_db_int(poll.id),
        poll_question: poll.question.clone(),
        poll_type: "multiple_choice".to_string(),
        total_responses: to_db_int(poll.responses),
        created_at: poll.created.unwrap_or(completed_at),
        response_rate: share_of(poll.responses, attendance),
        most_popular_option: top.map_or_else(String::new, |(o, _)| o.clone()),
        most_popular_percentage: top.map_or(0.0, |(_, votes)| share_of(votes, poll.responses)),
    }
}

fn share_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::event::now_local;
    use crate::domain::seed::{sample_engagement, sample_events};

    fn tech_conference() -> (Event, Engagement) {
        let Some(event) = sample_events(now_local()).into_iter().next() else {
            panic!("seed events missing");
        };
        let Some(engagement) = sample_engagement().remove(&1) else {
            panic!("seed engagement 1 missing");
        };
        (event, engagement)
    }

    #[test]
    fn snapshot_from_engagement() {
        let (event, engagement) = tech_conference();
        let s = CompletionSnapshot::build(&event, Some(&engagement), None);
        assert_eq!(s.live_attendance, 180);
        assert_eq!(s.total_tickets_sold, 180);
        assert_eq!(s.total_revenue, 250_000 * 180);
        assert_eq!(s.peak_attendance, 180);
        assert!((s.avg_attendance - 153.0).abs() < 1e-9);
        assert_eq!(s.total_poll_responses, 77);
        assert_eq!(s.total_qa_answered, 1);
        // (77 + 2 * 2) / 180 * 100
        assert!((s.engagement_rate - 45.0).abs() < 1e-9);
        assert!((s.conversion_rate - 18.0).abs() < 1e-9);
        // "How satisfied are you with the event?" has 45 responses.
        assert!((s.satisfaction.score - 3.95).abs() < 1e-9);
        assert!((s.satisfaction.nps - 44.5).abs() < 1e-9);
        assert!((s.satisfaction.recommendation_rate - 69.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_without_engagement_uses_tickets_then_fallback() {
        let (event, _) = tech_conference();
        let tickets = TicketSales {
            total_sold: Some(420),
            revenue: Some(99),
        };
        let s = CompletionSnapshot::build(&event, None, Some(tickets));
        assert_eq!(s.live_attendance, 420);
        assert_eq!(s.total_revenue, 99);
        assert_eq!(s.total_polls, 0);
        assert_eq!(s.engagement_rate, 0.0);
        assert_eq!(s.satisfaction.score, 3.5);

        let s = CompletionSnapshot::build(&event, None, None);
        assert_eq!(s.live_attendance, FALLBACK_ATTENDANCE);
        assert_eq!(s.total_revenue, 250_000 * FALLBACK_ATTENDANCE);
    }

    #[test]
    fn engagement_rate_is_capped() {
        assert_eq!(weighted_engagement_rate(500, 10, 100), 100.0);
        assert_eq!(weighted_engagement_rate(5, 5, 0), 0.0);
    }

    #[test]
    fn conversion_rate_uses_larger_view_estimate() {
        assert!((conversion_rate(100) - 10.0).abs() < 1e-9);
        assert!((conversion_rate(1000) - 20.0).abs() < 1e-9);
        assert_eq!(conversion_rate(0), 0.0);
    }

    #[test]
    fn completion_insights_for_seed_event() {
        let (event, engagement) = tech_conference();
        let s = CompletionSnapshot::build(&event, Some(&engagement), None);
        let record = build_completion_record(&s, Some(&engagement), now_local());
        let kinds: Vec<(&str, &str)> = record
            .insights
            .iter()
            .map(|i| (i.insight_type.as_str(), i.insight_category.as_str()))
            .collect();
        // 45% engagement, 36% filled, 50% answered, 38.5 avg responses.
        assert_eq!(kinds, vec![("recommendation", "future")]);
    }

    #[test]
    fn low_engagement_and_unanswered_questions() {
        let (mut event, _) = tech_conference();
        event.capacity = 100;
        let mut engagement = Engagement {
            live_attendance: 90,
            ..Engagement::default()
        };
        engagement.add_question("Is there a problem with the venue wifi?".to_string(), now_local());
        let s = CompletionSnapshot::build(&event, Some(&engagement), None);
        let record = build_completion_record(&s, Some(&engagement), now_local());
        let kinds: Vec<&str> = record
            .insights
            .iter()
            .map(|i| i.insight_type.as_str())
            .collect();
        assert_eq!(kinds, vec!["weakness", "strength", "opportunity", "recommendation"]);

        let Some(q) = record.questions.first() else {
            panic!("question row missing");
        };
        assert_eq!(q.category, "logistics");
        assert_eq!(q.sentiment, "negative");
        assert_eq!(q.priority_level, "low");
    }

    #[test]
    fn rows_for_poll_with_options() {
        let (event, _) = tech_conference();
        let mut engagement = Engagement::started();
        let poll = engagement.add_poll(
            "Rate the keynote".to_string(),
            vec!["Great".to_string(), "Okay".to_string()],
            now_local(),
        );
        for option in ["Okay", "Great", "Great", "Okay"] {
            let Some(p) = engagement.poll_mut(poll.id) else {
                panic!("poll missing");
            };
            assert!(p.vote(option));
        }
        let s = CompletionSnapshot::build(&event, Some(&engagement), None);
        let record = build_completion_record(&s, Some(&engagement), now_local());

        let Some(row) = record.polls.first() else {
            panic!("poll row missing");
        };
        assert_eq!(row.most_popular_option, "Great");
        assert!((row.most_popular_percentage - 50.0).abs() < 1e-9);
        assert_eq!(record.poll_options.len(), 2);
        assert_eq!(record.sentiments.len(), 1);
        assert_eq!(
            record.sentiments.first().map(|r| r.keywords.as_str()),
            Some("[\"rate\",\"keynote\"]")
        );
        assert_eq!(record.event.event_id, "1");
    }

    #[test]
    fn busy_polls_fire_both_engagement_strengths() {
        let (mut event, _) = tech_conference();
        event.capacity = 1000;
        let mut engagement = Engagement {
            live_attendance: 100,
            ..Engagement::default()
        };
        let poll = engagement.add_poll(
            "Favourite track?".to_string(),
            vec!["Rust".to_string(), "Go".to_string()],
            now_local(),
        );
        let Some(p) = engagement.poll_mut(poll.id) else {
            panic!("poll missing");
        };
        p.responses = 90;

        let s = CompletionSnapshot::build(&event, Some(&engagement), None);
        assert!((s.engagement_rate - 90.0).abs() < 1e-9);
        let insights = completion_insights(&s);
        let kinds: Vec<(&str, &str, f64)> = insights
            .iter()
            .map(|i| (i.insight_type.as_str(), i.category.as_str(), i.confidence))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("strength", "engagement", 0.9),
                ("strength", "engagement", 0.85),
                ("recommendation", "future", 0.75),
            ]
        );
    }

    #[test]
    fn huge_response_counts_saturate() {
        let (event, _) = tech_conference();
        let mut engagement = Engagement::started();
        for (question, responses) in [("Rate the venue", u64::MAX), ("Rate the food", 1)] {
            let poll = engagement.add_poll(
                question.to_string(),
                vec!["Good".to_string(), "Bad".to_string()],
                now_local(),
            );
            let Some(p) = engagement.poll_mut(poll.id) else {
                panic!("poll missing");
            };
            p.responses = responses;
        }
        engagement.add_question("Any parking?".to_string(), now_local());

        let s = CompletionSnapshot::build(&event, Some(&engagement), None);
        assert_eq!(s.total_poll_responses, u64::MAX);
        assert_eq!(s.engagement_rate, 100.0);
        assert_eq!(s.satisfaction.score, 5.0);
        let record = build_completion_record(&s, Some(&engagement), now_local());
        assert_eq!(record.event.total_poll_responses, i64::MAX);
    }
}
