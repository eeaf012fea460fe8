//! Post-event report over a completed event and its engagement record.

use serde::Serialize;
use utoipa::ToSchema;

use super::heuristics::PriorityLevel;
use super::insights::{Insight, PostEventMetrics, post_event_insights};
use super::{format_thousands, round_to};
use crate::domain::{Engagement, Event, Poll};
use crate::error::GatewayError;

/// Satisfaction score reported until polls carry real ratings.
pub const SATISFACTION_SCORE: f64 = 4.3;
/// Net promoter score reported alongside [`SATISFACTION_SCORE`].
pub const NPS_SCORE: u64 = 68;
/// Nominal time to answer a question, in seconds.
pub const QA_RESPONSE_TIME_SECS: u64 = 120;

/// Headline numbers for a completed event.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EventAnalytics {
    /// Ticket price × live attendance.
    pub total_revenue: u64,
    /// Live attendance.
    pub total_attendees: u64,
    /// Event capacity.
    pub total_capacity: u64,
    /// Equal to live attendance.
    pub total_tickets_sold: u64,
    /// Number of polls.
    pub total_polls: u64,
    /// Sum of poll responses.
    pub total_poll_responses: u64,
    /// Number of questions.
    pub total_qa_questions: u64,
    /// Interactions per attendee in percent, capped at 100, one decimal.
    pub engagement_rate: f64,
    /// Fixed satisfaction score.
    pub satisfaction_score: f64,
    /// Fixed NPS.
    pub nps_score: u64,
    /// Currency code.
    pub currency: String,
    /// Ticket price.
    pub ticket_price: u64,
}

/// Vote share for one poll option.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OptionShare {
    /// Option text.
    pub text: String,
    /// Votes cast.
    pub votes: u64,
    /// Share of the poll's responses in percent, one decimal.
    pub percentage: f64,
}

/// Breakdown of a poll that has options.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PollAnalytics {
    /// Poll id.
    pub id: u64,
    /// Poll question.
    pub poll_question: String,
    /// Always `custom`.
    pub poll_type: String,
    /// Recorded responses.
    pub total_responses: u64,
    /// Responses per attendee in percent, one decimal.
    pub response_rate: f64,
    /// Per-option shares in option order.
    pub options: Vec<OptionShare>,
}

/// A question as seen after the event.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QaAnalytics {
    /// Question id.
    pub id: u64,
    /// Question text.
    pub question_text: String,
    /// Always `General` in this report.
    pub category: String,
    /// Votes received.
    pub vote_count: u64,
    /// Whether it was answered.
    pub is_answered: bool,
    /// Urgency bucket.
    pub priority_level: PriorityLevel,
    /// Nominal answer time in seconds.
    pub response_time: u64,
}

/// Count and mean score of one sentiment bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SentimentBucket {
    /// Estimated responses in the bucket.
    pub count: u64,
    /// Mean score.
    pub avg_score: f64,
}

/// Estimated sentiment split of poll responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SentimentSummary {
    /// Roughly 70% of responses, at least 15.
    pub positive: SentimentBucket,
    /// Roughly 20% of responses, at least 5.
    pub neutral: SentimentBucket,
    /// Roughly 10% of responses, at least 2.
    pub negative: SentimentBucket,
}

/// Derived ratios and talking points.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalyticsSummary {
    /// Poll responses plus questions.
    pub total_interactions: u64,
    /// Mean responses per poll, one decimal.
    pub avg_poll_response_rate: f64,
    /// Answered share of questions in percent, one decimal.
    pub qa_answer_rate: f64,
    /// Revenue per attendee, two decimals.
    pub revenue_per_attendee: f64,
    /// First poll's question or `N/A`.
    pub most_engaging_poll: String,
    /// Most-voted question or `N/A`.
    pub top_question: String,
    /// Fixed satisfaction score.
    pub overall_satisfaction: f64,
    /// Three headline strengths.
    pub key_strengths: Vec<String>,
    /// Three suggestions.
    pub improvement_areas: Vec<String>,
}

/// Full body of `GET /api/events/{id}/post-analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PostEventReport {
    /// Always `true`.
    pub success: bool,
    /// Headline numbers.
    pub event_analytics: EventAnalytics,
    /// Polls that have options.
    pub polls_analytics: Vec<PollAnalytics>,
    /// Every question.
    pub qa_analytics: Vec<QaAnalytics>,
    /// Generated insights.
    pub insights: Vec<Insight>,
    /// Estimated sentiment split.
    pub sentiment_summary: SentimentSummary,
    /// Derived ratios.
    pub analytics_summary: AnalyticsSummary,
}

/// Builds the post-event report.
///
/// # Errors
///
/// Returns [`GatewayError::NotCompleted`] unless the event is completed.
pub fn build_post_event_report(
    event: &Event,
    engagement: &Engagement,
) -> Result<PostEventReport, GatewayError> {
    if !event.is_completed() {
        return Err(GatewayError::NotCompleted(event.id));
    }

    let attendance = engagement.live_attendance;
    let total_poll_responses = engagement.total_poll_responses();
    let total_qa_questions = engagement.qa_questions.len() as u64;
    let polls_count = engagement.polls.len() as u64;
    let total_revenue = event.ticket_price.saturating_mul(attendance);
    let total_interactions = total_poll_responses.saturating_add(total_qa_questions);
    let engagement_rate = engagement_rate(total_interactions, attendance);
    let capacity_utilization = capacity_utilization(attendance, event.capacity);

    let event_analytics = EventAnalytics {
        total_revenue,
        total_attendees: attendance,
        total_capacity: event.capacity,
        total_tickets_sold: attendance,
        total_polls: polls_count,
        total_poll_responses,
        total_qa_questions,
        engagement_rate: round_to(engagement_rate, 1),
        satisfaction_score: SATISFACTION_SCORE,
        nps_score: NPS_SCORE,
        currency: event.currency.clone(),
        ticket_price: event.ticket_price,
    };

    let polls_analytics = engagement
        .polls
        .iter()
        .filter(|p| !p.options.is_empty() && !p.option_votes.is_empty())
        .map(|p| poll_analytics(p, attendance))
        .collect();

    let qa_analytics = engagement
        .qa_questions
        .iter()
        .map(|q| QaAnalytics {
            id: q.id,
            question_text: q.question.clone(),
            category: "General".to_string(),
            vote_count: q.votes,
            is_answered: q.answered,
            priority_level: PriorityLevel::for_report(q.votes),
            response_time: QA_RESPONSE_TIME_SECS,
        })
        .collect();

    let insights = post_event_insights(&PostEventMetrics {
        engagement_rate,
        total_interactions,
        polls_count,
        total_poll_responses,
        qa_count: total_qa_questions,
        total_revenue,
        live_attendance: attendance,
        currency: event.currency.clone(),
        capacity_utilization,
    });

    let sentiment_summary = sentiment_summary(total_poll_responses);

    let top_question = engagement
        .qa_questions
        .iter()
        .reduce(|best, q| if q.votes > best.votes { q } else { best })
        .map_or_else(|| "N/A".to_string(), |q| q.question.clone());

    let analytics_summary = AnalyticsSummary {
        total_interactions,
        avg_poll_response_rate: round_to(
            total_poll_responses as f64 / polls_count.max(1) as f64,
            1,
        ),
        qa_answer_rate: round_to(
            engagement.answered_questions() as f64 / total_qa_questions.max(1) as f64 * 100.0,
            1,
        ),
        revenue_per_attendee: round_to(total_revenue as f64 / attendance.max(1) as f64, 2),
        most_engaging_poll: engagement
            .polls
            .first()
            .map_or_else(|| "N/A".to_string(), |p| p.question.clone()),
        top_question,
        overall_satisfaction: SATISFACTION_SCORE,
        key_strengths: vec![
            format!(
                "Generated {} {} revenue",
                event.currency,
                format_thousands(total_revenue)
            ),
            format!("{engagement_rate:.1}% audience engagement"),
            format!("{polls_count} interactive polls created"),
        ],
        improvement_areas: vec![
            if total_qa_questions > 10 {
                "Consider longer Q&A sessions"
            } else {
                "Encourage more questions"
            }
            .to_string(),
            if polls_count < 3 {
                "Add more interactive elements"
            } else {
                "Maintain poll frequency"
            }
            .to_string(),
            if capacity_utilization < 80.0 {
                "Improve attendance marketing"
            } else {
                "Great attendance!"
            }
            .to_string(),
        ],
    };

    Ok(PostEventReport {
        success: true,
        event_analytics,
        polls_analytics,
        qa_analytics,
        insights,
        sentiment_summary,
        analytics_summary,
    })
}

/// Interactions per attendee in percent, in `[0, 100]`. Zero attendance
/// yields zero.
#[must_use]
pub fn engagement_rate(interactions: u64, attendance: u64) -> f64 {
    if attendance == 0 {
        return 0.0;
    }
    (interactions as f64 / attendance as f64 * 100.0).min(100.0)
}

/// Attendance as a percentage of capacity. Zero capacity yields zero.
#[must_use]
pub fn capacity_utilization(attendance: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    attendance as f64 / capacity as f64 * 100.0
}

fn poll_analytics(poll: &Poll, attendance: u64) -> PollAnalytics {
    let total_votes = poll.responses;
    let options = poll
        .options
        .iter()
        .map(|option| {
            let votes = poll.votes_for(option);
            OptionShare {
                text: option.clone(),
                votes,
                percentage: round_to(votes as f64 / total_votes.max(1) as f64 * 100.0, 1),
            }
        })
        .collect();

    PollAnalytics {
        id: poll.id,
        poll_question: poll.question.clone(),
        poll_type: "custom".to_string(),
        total_responses: total_votes,
        response_rate: round_to(total_votes as f64 / attendance.max(1) as f64 * 100.0, 1),
        options,
    }
}

fn sentiment_summary(responses: u64) -> SentimentSummary {
    let share = |fraction: f64| (responses as f64 * fraction).floor() as u64;
    SentimentSummary {
        positive: SentimentBucket {
            count: share(0.7).max(15),
            avg_score: 0.72,
        },
        neutral: SentimentBucket {
            count: share(0.2).max(5),
            avg_score: 0.05,
        },
        negative: SentimentBucket {
            count: share(0.1).max(2),
            avg_score: -0.41,
        },
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::seed::{sample_engagement, sample_events};
    use crate::domain::event::now_local;
    use crate::domain::{EventStatus, QaQuestion};

    fn completed_music_festival() -> (Event, Engagement) {
        let Some(mut event) = sample_events(now_local()).into_iter().find(|e| e.id == 2) else {
            panic!("seed event 2 missing");
        };
        event.status = EventStatus::Completed;
        let Some(engagement) = sample_engagement().remove(&2) else {
            panic!("seed engagement 2 missing");
        };
        (event, engagement)
    }

    #[test]
    fn music_festival_report() {
        let (event, engagement) = completed_music_festival();
        let Ok(report) = build_post_event_report(&event, &engagement) else {
            panic!("report should build for a completed event");
        };
        assert_eq!(report.event_analytics.total_revenue, 202_500_000);
        assert_eq!(report.event_analytics.engagement_rate, 20.0);
        assert_eq!(report.analytics_summary.total_interactions, 90);
        // Summary poll has no options, so no per-poll breakdown.
        assert!(report.polls_analytics.is_empty());
        assert_eq!(report.qa_analytics.len(), 1);
        assert_eq!(
            report.qa_analytics.first().map(|q| q.priority_level),
            Some(PriorityLevel::Medium)
        );
        assert_eq!(report.analytics_summary.top_question, "When is the next performance?");
        assert_eq!(report.analytics_summary.revenue_per_attendee, 450_000.0);
        assert_eq!(report.sentiment_summary.positive.count, 62);
        assert_eq!(report.sentiment_summary.neutral.count, 17);
        assert_eq!(report.sentiment_summary.negative.count, 8);
        assert_eq!(
            report.analytics_summary.key_strengths.first().map(String::as_str),
            Some("Generated INR 202,500,000 revenue")
        );
    }

    #[test]
    fn upcoming_event_is_rejected() {
        let (mut event, engagement) = completed_music_festival();
        event.status = EventStatus::Upcoming;
        assert!(matches!(
            build_post_event_report(&event, &engagement),
            Err(GatewayError::NotCompleted(2))
        ));
    }

    #[test]
    fn empty_engagement_yields_zeroes() {
        let (event, _) = completed_music_festival();
        let Ok(report) = build_post_event_report(&event, &Engagement::default()) else {
            panic!("report should build");
        };
        assert_eq!(report.event_analytics.total_revenue, 0);
        assert_eq!(report.event_analytics.engagement_rate, 0.0);
        assert_eq!(report.analytics_summary.most_engaging_poll, "N/A");
        assert_eq!(report.analytics_summary.top_question, "N/A");
        assert_eq!(report.sentiment_summary.positive.count, 15);
        assert_eq!(report.insights.len(), 1);
    }

    #[test]
    fn option_percentages_and_capped_rate() {
        let (event, _) = completed_music_festival();
        let mut engagement = Engagement {
            live_attendance: 2,
            ..Engagement::default()
        };
        let poll = engagement.add_poll(
            "Favourite stage?".to_string(),
            vec!["Main".to_string(), "Side".to_string(), "Tent".to_string()],
            now_local(),
        );
        for option in ["Main", "Main", "Side"] {
            let Some(p) = engagement.poll_mut(poll.id) else {
                panic!("poll missing");
            };
            assert!(p.vote(option));
        }
        let Ok(report) = build_post_event_report(&event, &engagement) else {
            panic!("report should build");
        };
        let Some(poll) = report.polls_analytics.first() else {
            panic!("poll with options must be reported");
        };
        let shares: Vec<f64> = poll.options.iter().map(|o| o.percentage).collect();
        assert_eq!(shares, vec![66.7, 33.3, 0.0]);
        assert_eq!(poll.response_rate, 150.0);
        assert_eq!(report.event_analytics.engagement_rate, 100.0);
    }

    #[test]
    fn top_question_keeps_first_of_ties() {
        let (event, _) = completed_music_festival();
        let engagement = Engagement {
            polls: Vec::new(),
            qa_questions: vec![
                QaQuestion {
                    id: 1,
                    question: "first".to_string(),
                    votes: 4,
                    answered: false,
                    timestamp: None,
                },
                QaQuestion {
                    id: 2,
                    question: "second".to_string(),
                    votes: 4,
                    answered: true,
                    timestamp: None,
                },
            ],
            live_attendance: 10,
        };
        let Ok(report) = build_post_event_report(&event, &engagement) else {
            panic!("report should build");
        };
        assert_eq!(report.analytics_summary.top_question, "first");
        assert_eq!(report.analytics_summary.qa_answer_rate, 50.0);
    }

    #[test]
    fn zero_capacity_counts_as_empty_room() {
        assert_eq!(capacity_utilization(10, 0), 0.0);
        assert_eq!(engagement_rate(5, 0), 0.0);
    }

    #[test]
    fn huge_stored_response_counts_saturate() {
        let (event, _) = completed_music_festival();
        let raw = format!(
            r#"{{"polls": [{{"id": 1, "question": "A", "responses": {max}}},
                          {{"id": 2, "question": "B", "responses": 1}}],
                "qa_questions": [{{"id": 1, "question": "Q", "votes": {max}}}],
                "live_attendance": 100}}"#,
            max = u64::MAX
        );
        let Ok(engagement) = serde_json::from_str::<Engagement>(&raw) else {
            panic!("engagement json should parse");
        };
        assert_eq!(engagement.total_poll_responses(), u64::MAX);

        let Ok(report) = build_post_event_report(&event, &engagement) else {
            panic!("report should build");
        };
        assert_eq!(report.event_analytics.total_poll_responses, u64::MAX);
        assert_eq!(report.analytics_summary.total_interactions, u64::MAX);
        assert_eq!(report.event_analytics.engagement_rate, 100.0);
    }
}
