//! Shared types used across modules
//!
//! The data model for recorded interactions and explicit user feedback.
//! Both types are append-only: they are created once by the host UI and
//! never mutated in place (merging averages satisfaction, nothing else).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded interaction between a user and the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    /// What the user typed
    pub user_input: String,
    /// Intent the example was labeled with, if a tester supplied one
    pub expected_intent: Option<String>,
    /// Intent the classifier actually assigned
    pub actual_intent: Option<String>,
    /// Response a tester said the bot should have given
    pub expected_response: Option<String>,
    /// Response the bot actually gave
    pub actual_response: String,
    /// Satisfaction in [0, 1], derived from a rating or supplied directly
    pub satisfaction: Option<f64>,
    /// How long the bot took to answer
    pub response_time_ms: Option<u64>,
    /// When the interaction happened; immutable once created
    pub timestamp: DateTime<Utc>,
}

impl TrainingExample {
    pub fn new(user_input: &str, actual_response: &str) -> Self {
        Self {
            user_input: user_input.to_string(),
            expected_intent: None,
            actual_intent: None,
            expected_response: None,
            actual_response: actual_response.to_string(),
            satisfaction: None,
            response_time_ms: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_intents(mut self, expected: Option<&str>, actual: Option<&str>) -> Self {
        self.expected_intent = expected.map(|s| s.to_string());
        self.actual_intent = actual.map(|s| s.to_string());
        self
    }

    pub fn with_expected_response(mut self, response: &str) -> Self {
        self.expected_response = Some(response.to_string());
        self
    }

    /// Set satisfaction, clamped to [0, 1]
    pub fn with_satisfaction(mut self, satisfaction: f64) -> Self {
        self.satisfaction = Some(satisfaction.clamp(0.0, 1.0));
        self
    }

    pub fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    /// Backdate the creation timestamp. Only meaningful at construction
    /// time; the timestamp is never touched again afterwards.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Whether both intent fields are present (the accuracy denominator)
    pub fn has_intent_pair(&self) -> bool {
        self.expected_intent.is_some() && self.actual_intent.is_some()
    }

    /// Whether both intent fields are present and agree
    pub fn intent_matched(&self) -> bool {
        match (&self.expected_intent, &self.actual_intent) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}

/// An explicit user rating of one interaction.
///
/// Independent of `TrainingExample` — correlated only by input/response
/// equality when needed, never by a foreign key, because the source
/// interaction may no longer exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Conversation the rating belongs to
    pub conversation_id: String,
    /// The input that was rated
    pub user_input: String,
    /// The response that was rated
    pub bot_response: String,
    /// Rating from 1 (worst) to 5 (best)
    pub rating: u8,
    /// Optional free-form note
    pub note: Option<String>,
    /// When the rating was given
    pub timestamp: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Create a new feedback record. Rating is clamped to 1..=5.
    pub fn new(conversation_id: &str, user_input: &str, bot_response: &str, rating: u8) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            user_input: user_input.to_string(),
            bot_response: bot_response.to_string(),
            rating: rating.clamp(1, 5),
            note: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Map the 1-5 rating onto the [0, 1] satisfaction scale (3 → 0.6)
    pub fn satisfaction(&self) -> f64 {
        f64::from(self.rating) / 5.0
    }

    /// Rating below 3 counts as negative feedback
    pub fn is_negative(&self) -> bool {
        self.rating < 3
    }

    /// Rating of 4 or 5 counts as positive feedback
    pub fn is_positive(&self) -> bool {
        self.rating >= 4
    }
}
