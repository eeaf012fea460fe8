//! Natural-language insights generated from event metrics.
//!
//! Two generators exist and are deliberately kept apart:
//!
//! - [`post_event_insights`] feeds `GET /api/events/{id}/post-analytics`.
//! - [`completion_insights`] runs when an event ends and its output is
//!   stored in the analytics database.
//!
//! They use different thresholds and wording, so the same event can get
//! a strength from one and a weakness from the other.

use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use super::completion::CompletionSnapshot;
use super::format_thousands;

/// Kind of observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    /// Something that went well.
    Strength,
    /// Something that went badly.
    Weakness,
    /// Room for improvement.
    Opportunity,
    /// Advice for next time.
    Recommendation,
}

impl InsightType {
    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Weakness => "weakness",
            Self::Opportunity => "opportunity",
            Self::Recommendation => "recommendation",
        }
    }
}

/// A generated observation with the metrics behind it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Insight {
    /// Kind of observation.
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// Area the insight is about (`engagement`, `revenue`, ...).
    pub category: String,
    /// Human-readable text.
    pub text: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Metrics backing the insight.
    pub supporting_data: serde_json::Value,
}

impl Insight {
    fn new(
        insight_type: InsightType,
        category: &str,
        text: String,
        confidence: f64,
        supporting_data: serde_json::Value,
    ) -> Self {
        Self {
            insight_type,
            category: category.to_string(),
            text,
            confidence,
            supporting_data,
        }
    }
}

/// Metrics the post-event generator reads.
#[derive(Debug, Clone, PartialEq)]
pub struct PostEventMetrics {
    /// Unrounded engagement rate in percent.
    pub engagement_rate: f64,
    /// Poll responses plus questions.
    pub total_interactions: u64,
    /// Number of polls.
    pub polls_count: u64,
    /// Sum of poll responses.
    pub total_poll_responses: u64,
    /// Number of questions.
    pub qa_count: u64,
    /// Ticket price × live attendance.
    pub total_revenue: u64,
    /// Attendees in the room.
    pub live_attendance: u64,
    /// Currency code for the revenue text.
    pub currency: String,
    /// Live attendance as a percentage of capacity.
    pub capacity_utilization: f64,
}

/// Insights shown on the post-event analytics page, in display order.
#[must_use]
pub fn post_event_insights(m: &PostEventMetrics) -> Vec<Insight> {
    let mut insights = Vec::new();

    if m.engagement_rate > 50.0 {
        insights.push(Insight::new(
            InsightType::Strength,
            "engagement",
            format!(
                "Good audience engagement with {:.1}% participation rate across {} interactions.",
                m.engagement_rate, m.total_interactions
            ),
            0.85,
            json!({
                "engagement_rate": m.engagement_rate,
                "total_interactions": m.total_interactions,
            }),
        ));
    }

    if m.polls_count > 0 {
        insights.push(Insight::new(
            InsightType::Strength,
            "interaction",
            format!(
                "Successfully used {} interactive polls generating {} responses.",
                m.polls_count, m.total_poll_responses
            ),
            0.90,
            json!({
                "polls_count": m.polls_count,
                "responses": m.total_poll_responses,
            }),
        ));
    }

    if m.qa_count > 5 {
        insights.push(Insight::new(
            InsightType::Strength,
            "participation",
            format!(
                "High audience interest demonstrated through {} questions submitted.",
                m.qa_count
            ),
            0.80,
            json!({ "qa_count": m.qa_count }),
        ));
    }

    if m.total_revenue > 0 {
        insights.push(Insight::new(
            InsightType::Strength,
            "revenue",
            format!(
                "Generated {} {} in revenue from {} attendees.",
                m.currency,
                format_thousands(m.total_revenue),
                m.live_attendance
            ),
            0.95,
            json!({
                "revenue": m.total_revenue,
                "attendance": m.live_attendance,
            }),
        ));
    }

    if m.capacity_utilization < 70.0 {
        insights.push(Insight::new(
            InsightType::Opportunity,
            "marketing",
            format!(
                "Event reached {:.1}% capacity. Consider enhanced marketing for future events.",
                m.capacity_utilization
            ),
            0.75,
            json!({ "capacity_utilization": m.capacity_utilization }),
        ));
    }

    insights
}

/// Insights stored when an event is captured at completion, in order.
/// Always ends with a recommendation.
#[must_use]
pub fn completion_insights(s: &CompletionSnapshot) -> Vec<Insight> {
    let mut insights = Vec::new();
    let rate = s.engagement_rate;

    if rate > 80.0 {
        insights.push(Insight::new(
            InsightType::Strength,
            "engagement",
            format!(
                "Exceptional audience engagement with {rate:.1}% participation rate. Your interactive content strategy was highly effective."
            ),
            0.9,
            json!({
                "engagement_rate": rate,
                "total_responses": s.total_poll_responses,
            }),
        ));
    } else if rate < 30.0 {
        insights.push(Insight::new(
            InsightType::Weakness,
            "engagement",
            format!(
                "Low engagement rate of {rate:.1}%. Consider more interactive polls and Q&A sessions to boost participation."
            ),
            0.85,
            json!({ "engagement_rate": rate }),
        ));
    }

    let capacity_filled = s.capacity_filled();
    if capacity_filled > 0.8 {
        insights.push(Insight::new(
            InsightType::Strength,
            "revenue",
            format!(
                "Strong ticket sales with {:.1}% capacity filled. Revenue target exceeded expectations.",
                capacity_filled * 100.0
            ),
            0.95,
            json!({
                "revenue": s.total_revenue,
                "capacity_filled": capacity_filled,
            }),
        ));
    }

    let qa_response_rate = s.qa_response_rate();
    if qa_response_rate < 50.0 {
        insights.push(Insight::new(
            InsightType::Opportunity,
            "content",
            format!(
                "Only {qa_response_rate:.1}% of Q&A questions were answered. Allocating more time for Q&A could improve audience satisfaction."
            ),
            0.8,
            json!({
                "qa_response_rate": qa_response_rate,
                "total_questions": s.total_qa_questions,
            }),
        ));
    }

    if s.total_polls > 0 {
        let avg_poll_responses = s.total_poll_responses as f64 / s.total_polls as f64;
        if avg_poll_responses > s.live_attendance as f64 * 0.6 {
            insights.push(Insight::new(
                InsightType::Strength,
                "engagement",
                format!(
                    "Polls were highly effective with an average of {avg_poll_responses:.0} responses per poll."
                ),
                0.85,
                json!({ "avg_poll_responses": avg_poll_responses }),
            ));
        }
    }

    insights.push(Insight::new(
        InsightType::Recommendation,
        "future",
        "Based on engagement patterns, consider extending similar events to 90-120 minutes for optimal audience retention."
            .to_string(),
        0.75,
        json!({ "current_engagement": rate }),
    ));

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> PostEventMetrics {
        PostEventMetrics {
            engagement_rate: 20.0,
            total_interactions: 90,
            polls_count: 1,
            total_poll_responses: 89,
            qa_count: 1,
            total_revenue: 202_500_000,
            live_attendance: 450,
            currency: "INR".to_string(),
            capacity_utilization: 45.0,
        }
    }

    fn categories(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.category.as_str()).collect()
    }

    #[test]
    fn post_event_order_and_revenue_text() {
        let insights = post_event_insights(&metrics());
        assert_eq!(categories(&insights), vec!["interaction", "revenue", "marketing"]);
        let revenue = insights.iter().find(|i| i.category == "revenue");
        assert_eq!(
            revenue.map(|i| i.text.as_str()),
            Some("Generated INR 202,500,000 in revenue from 450 attendees.")
        );
        assert_eq!(
            insights.last().map(|i| i.insight_type),
            Some(InsightType::Opportunity)
        );
    }

    #[test]
    fn post_event_high_engagement_and_many_questions() {
        let m = PostEventMetrics {
            engagement_rate: 75.5,
            qa_count: 6,
            capacity_utilization: 90.0,
            ..metrics()
        };
        let insights = post_event_insights(&m);
        assert_eq!(
            categories(&insights),
            vec!["engagement", "interaction", "participation", "revenue"]
        );
        assert!(
            insights
                .first()
                .is_some_and(|i| i.text.contains("75.5% participation rate across 90"))
        );
    }

    #[test]
    fn post_event_empty_event_yields_only_marketing() {
        let m = PostEventMetrics {
            engagement_rate: 0.0,
            total_interactions: 0,
            polls_count: 0,
            total_poll_responses: 0,
            qa_count: 0,
            total_revenue: 0,
            live_attendance: 0,
            currency: "INR".to_string(),
            capacity_utilization: 0.0,
        };
        assert_eq!(categories(&post_event_insights(&m)), vec!["marketing"]);
    }

    #[test]
    fn insight_serializes_type_key() {
        let insights = post_event_insights(&metrics());
        let json = serde_json::to_value(&insights).unwrap_or_default();
        assert_eq!(
            json.pointer("/0/type").and_then(|v| v.as_str()),
            Some("strength")
        );
    }
}
