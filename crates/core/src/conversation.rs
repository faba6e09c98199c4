//! Persisted conversation record
//!
//! One record per answered chat request. Records are created once and never
//! mutated; they exist as an audit trail and are not consulted when matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;

/// A single user message and the reply it received
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Record ID
    pub id: Uuid,
    /// What the user sent
    pub user_message: String,
    /// What the bot answered
    pub bot_response: String,
    /// Language of the matched pattern (English when nothing matched)
    pub language: Language,
    /// When the exchange happened
    pub timestamp: DateTime<Utc>,
}

impl Conversation {
    /// Create a new record with a fresh ID and the current time
    pub fn new(
        user_message: impl Into<String>,
        bot_response: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_message: user_message.into(),
            bot_response: bot_response.into(),
            language,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_creation() {
        let record = Conversation::new("hello", "Hi! How can I help?", Language::English);
        assert_eq!(record.user_message, "hello");
        assert_eq!(record.bot_response, "Hi! How can I help?");
        assert_eq!(record.language, Language::English);
    }

    #[test]
    fn test_records_get_distinct_ids() {
        let a = Conversation::new("hi", "Hello!", Language::English);
        let b = Conversation::new("hi", "Hello!", Language::English);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serializes_language_as_code() {
        let record = Conversation::new("नमस्ते", "नमस्ते!", Language::Hindi);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["language"], "hi");
    }
}
