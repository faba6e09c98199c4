//! Utterance-to-pattern matching
//!
//! Word-overlap scoring: the utterance and each pattern are lower-cased and
//! whitespace-split into word sets, and the score is the size of their
//! intersection. Any score above zero counts as a match. The language of the
//! result is the language of the winning pattern, not a separate detection
//! step over the utterance.

use std::collections::HashSet;

use serde::Serialize;

use chat_agent_core::Language;

use crate::catalog::IntentCatalog;

/// Outcome of scoring an utterance against the catalog
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Tag of the best-scoring intent, or `None` below the threshold
    pub tag: Option<String>,
    /// Language of the winning pattern (English when nothing matched)
    pub language: Language,
    /// Number of shared words with the winning pattern
    pub score: usize,
}

impl MatchResult {
    /// The no-match result
    fn none() -> Self {
        Self {
            tag: None,
            language: Language::English,
            score: 0,
        }
    }

    /// Whether an intent was selected
    pub fn is_match(&self) -> bool {
        self.tag.is_some()
    }
}

impl IntentCatalog {
    /// Score `utterance` against every pattern and return the best candidate
    ///
    /// Iteration is stable: intents in authored order, languages in code
    /// order, patterns in authored order. Only a strictly greater score
    /// replaces the current best, so the first of equally scored patterns
    /// wins.
    pub fn best_match(&self, utterance: &str) -> MatchResult {
        let utterance = utterance.to_lowercase();
        let user_words: HashSet<&str> = utterance.split_whitespace().collect();

        let mut best = MatchResult::none();

        for intent in self.intents() {
            for (lang, patterns) in &intent.patterns {
                for pattern in patterns {
                    let pattern = pattern.to_lowercase();
                    let pattern_words: HashSet<&str> = pattern.split_whitespace().collect();
                    let score = user_words.intersection(&pattern_words).count();

                    if score > best.score {
                        best = MatchResult {
                            tag: Some(intent.tag.clone()),
                            language: *lang,
                            score,
                        };
                    }
                }
            }
        }

        tracing::debug!(
            tag = best.tag.as_deref().unwrap_or("-"),
            language = best.language.code(),
            score = best.score,
            "Matched utterance"
        );

        best
    }
}
