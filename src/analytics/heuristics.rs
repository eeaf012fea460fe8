//! Keyword heuristics over question and poll text.
//!
//! All lookups are case-insensitive substring searches against fixed word
//! lists, so "registration" also matches inside "preregistration".

use serde::Serialize;
use utoipa::ToSchema;

/// Category buckets, checked in order; the first bucket with a hit wins.
const CATEGORY_KEYWORDS: [(&str, &[&str]); 7] = [
    (
        "technical",
        &["technical", "platform", "tool", "software", "system", "bug", "error"],
    ),
    (
        "content",
        &["topic", "subject", "content", "session", "speaker", "presentation"],
    ),
    (
        "engagement",
        &["engage", "audience", "interaction", "participate", "involve"],
    ),
    (
        "logistics",
        &["time", "schedule", "venue", "location", "registration", "access"],
    ),
    (
        "feedback",
        &["feedback", "opinion", "suggestion", "improve", "better", "rate"],
    ),
    (
        "future",
        &["future", "next", "upcoming", "plan", "roadmap", "trend"],
    ),
    (
        "business",
        &["business", "strategy", "revenue", "roi", "profit", "cost"],
    ),
];

/// Category used when no bucket matches.
pub const GENERAL_CATEGORY: &str = "general";

const POSITIVE_WORDS: [&str; 12] = [
    "good",
    "great",
    "excellent",
    "amazing",
    "helpful",
    "useful",
    "love",
    "best",
    "fantastic",
    "wonderful",
    "awesome",
    "perfect",
];

const NEGATIVE_WORDS: [&str; 12] = [
    "bad",
    "poor",
    "terrible",
    "awful",
    "hate",
    "worst",
    "difficult",
    "problem",
    "issue",
    "disappointing",
    "frustrating",
    "confusing",
];

/// Shorter lists used when labelling stored questions.
const QUESTION_POSITIVE_WORDS: [&str; 8] = [
    "good", "great", "excellent", "amazing", "helpful", "useful", "love", "best",
];

const QUESTION_NEGATIVE_WORDS: [&str; 9] = [
    "bad",
    "poor",
    "terrible",
    "awful",
    "hate",
    "worst",
    "difficult",
    "problem",
    "issue",
];

const STOP_WORDS: [&str; 38] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "how",
    "what", "when", "where", "why", "is", "are", "was", "were", "be", "been", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "can", "may", "might",
];

/// Score above which text is positive (and below whose negation it is
/// negative).
const SENTIMENT_THRESHOLD: f64 = 0.1;

/// Maximum number of keywords returned by [`extract_keywords`].
pub const MAX_KEYWORDS: usize = 5;

/// Polarity of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// More positive than negative hits.
    Positive,
    /// Balanced or no hits.
    Neutral,
    /// More negative than positive hits.
    Negative,
}

impl SentimentLabel {
    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// Sentiment score in `[-1, 1]` and its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Sentiment {
    /// `(positive hits − negative hits) / max(word count, 1)`.
    pub score: f64,
    /// Label derived from `score` with a ±0.1 threshold.
    pub label: SentimentLabel,
}

/// Urgency of a question, derived from its votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    /// Many votes.
    High,
    /// Some votes.
    Medium,
    /// Few votes.
    Low,
}

impl PriorityLevel {
    /// Thresholds used by the post-event report: high above 15 votes,
    /// medium above 5.
    #[must_use]
    pub const fn for_report(votes: u64) -> Self {
        if votes > 15 {
            Self::High
        } else if votes > 5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Thresholds used when capturing a completed event: high from 20
    /// votes, medium from 10.
    #[must_use]
    pub const fn for_capture(votes: u64) -> Self {
        if votes >= 20 {
            Self::High
        } else if votes >= 10 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns the stored label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Classifies a question into one of seven topic buckets, or
/// [`GENERAL_CATEGORY`].
#[must_use]
pub fn categorize_question(question: &str) -> &'static str {
    let lower = question.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(GENERAL_CATEGORY, |(category, _)| *category)
}

/// Scores text by keyword hits relative to its length.
#[must_use]
pub fn sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let positive = count_hits(&lower, &POSITIVE_WORDS);
    let negative = count_hits(&lower, &NEGATIVE_WORDS);
    let words = text.split_whitespace().count().max(1);

    let score = (positive as f64 - negative as f64) / words as f64;
    let label = if score > SENTIMENT_THRESHOLD {
        SentimentLabel::Positive
    } else if score < -SENTIMENT_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };
    Sentiment { score, label }
}

/// Labels a question by comparing positive and negative hit counts.
#[must_use]
pub fn question_sentiment(question: &str) -> SentimentLabel {
    let lower = question.to_lowercase();
    let positive = count_hits(&lower, &QUESTION_POSITIVE_WORDS);
    let negative = count_hits(&lower, &QUESTION_NEGATIVE_WORDS);
    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => SentimentLabel::Positive,
        std::cmp::Ordering::Less => SentimentLabel::Negative,
        std::cmp::Ordering::Equal => SentimentLabel::Neutral,
    }
}

/// Lowercased whitespace tokens longer than three characters that are not
/// stop words, first [`MAX_KEYWORDS`] in order.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !STOP_WORDS.contains(w))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

fn count_hits(lower: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| lower.contains(*w)).count()
}
