//! Per-event engagement: live polls, Q&A questions and attendance.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attendance assumed for an event whose engagement record is created by
/// its first poll or question.
pub const DEFAULT_LIVE_ATTENDANCE: u64 = 240;

/// A multiple-choice poll run during an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Poll {
    /// Per-event id, assigned as `max(existing) + 1`.
    pub id: u64,
    /// Poll question.
    pub question: String,
    /// Ordered answer options.
    #[serde(default)]
    pub options: Vec<String>,
    /// Total votes cast.
    #[serde(default)]
    pub responses: u64,
    /// Whether the poll accepts votes in the UI.
    #[serde(default)]
    pub active: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDateTime>,
    /// Votes per option.
    #[serde(default)]
    pub option_votes: BTreeMap<String, u64>,
}

impl Poll {
    /// Records one vote for `option`.
    ///
    /// Returns `false` without changing anything when `option` is not one
    /// of the poll's options.
    pub fn vote(&mut self, option: &str) -> bool {
        if !self.options.iter().any(|o| o == option) {
            return false;
        }
        let count = self.option_votes.entry(option.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        self.responses = self.responses.saturating_add(1);
        true
    }

    /// Votes recorded for `option` (0 when absent).
    #[must_use]
    pub fn votes_for(&self, option: &str) -> u64 {
        self.option_votes.get(option).copied().unwrap_or(0)
    }
}

/// An audience question submitted during an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QaQuestion {
    /// Per-event id, assigned as `max(existing) + 1`.
    pub id: u64,
    /// Question text.
    pub question: String,
    /// Up-votes.
    #[serde(default)]
    pub votes: u64,
    /// Whether the speaker answered it.
    #[serde(default)]
    pub answered: bool,
    /// Submission timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

/// Polls, questions and attendance for one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Engagement {
    /// Polls in creation order.
    #[serde(default)]
    pub polls: Vec<Poll>,
    /// Questions in submission order.
    #[serde(default)]
    pub qa_questions: Vec<QaQuestion>,
    /// Attendees currently in the room.
    #[serde(default)]
    pub live_attendance: u64,
}

impl Engagement {
    /// A fresh record for an event that just received its first
    /// interaction.
    #[must_use]
    pub fn started() -> Self {
        Self {
            live_attendance: DEFAULT_LIVE_ATTENDANCE,
            ..Self::default()
        }
    }

    /// Adds an active poll with every option at zero votes and returns it.
    pub fn add_poll(
        &mut self,
        question: String,
        options: Vec<String>,
        now: NaiveDateTime,
    ) -> Poll {
        let id = next_id(self.polls.iter().map(|p| p.id));
        let option_votes = options.iter().map(|o| (o.clone(), 0)).collect();
        let poll = Poll {
            id,
            question,
            options,
            responses: 0,
            active: true,
            created: Some(now),
            option_votes,
        };
        self.polls.push(poll.clone());
        poll
    }

    /// Adds an unanswered question with no votes and returns it.
    pub fn add_question(&mut self, question: String, now: NaiveDateTime) -> QaQuestion {
        let id = next_id(self.qa_questions.iter().map(|q| q.id));
        let entry = QaQuestion {
            id,
            question,
            votes: 0,
            answered: false,
            timestamp: Some(now),
        };
        self.qa_questions.push(entry.clone());
        entry
    }

    /// Mutable access to a poll by id.
    pub fn poll_mut(&mut self, poll_id: u64) -> Option<&mut Poll> {
        self.polls.iter_mut().find(|p| p.id == poll_id)
    }

    /// Mutable access to a question by id.
    pub fn question_mut(&mut self, question_id: u64) -> Option<&mut QaQuestion> {
        self.qa_questions.iter_mut().find(|q| q.id == question_id)
    }

    /// Removes a poll. Returns `false` if no poll had that id.
    pub fn remove_poll(&mut self, poll_id: u64) -> bool {
        let before = self.polls.len();
        self.polls.retain(|p| p.id != poll_id);
        self.polls.len() != before
    }

    /// Removes a question. Returns `false` if no question had that id.
    pub fn remove_question(&mut self, question_id: u64) -> bool {
        let before = self.qa_questions.len();
        self.qa_questions.retain(|q| q.id != question_id);
        self.qa_questions.len() != before
    }

    /// Sum of responses over all polls.
    #[must_use]
    pub fn total_poll_responses(&self) -> u64 {
        self.polls
            .iter()
            .map(|p| p.responses)
            .fold(0, u64::saturating_add)
    }

    /// Number of questions marked answered.
    #[must_use]
    pub fn answered_questions(&self) -> u64 {
        self.qa_questions.iter().filter(|q| q.answered).count() as u64
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0).saturating_add(1)
}
