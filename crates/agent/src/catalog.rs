//! Intent catalog
//!
//! The catalog is a static JSON document mapping intent tags to per-language
//! pattern and response lists. It is loaded exactly once at startup; after a
//! successful load it is shared read-only, so concurrent request handlers
//! need no locking.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use chat_agent_core::Language;

/// A named category of user request
///
/// Patterns are example phrases users might type; responses are the candidate
/// replies, both keyed by language. A language present in `patterns` should
/// also appear in `responses` — the load does not enforce this, and a missing
/// entry surfaces as a recoverable lookup error at response time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier within the catalog
    pub tag: String,
    /// Example phrases per language
    pub patterns: BTreeMap<Language, Vec<String>>,
    /// Candidate replies per language
    pub responses: BTreeMap<Language, Vec<String>>,
}

/// The full intent table, in authored order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

/// Catalog load failures (fatal at startup)
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read catalog: {0}")]
    Io(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Duplicate intent tag: {0}")]
    DuplicateTag(String),

    #[error("Intent '{tag}' has no {what}")]
    EmptyIntent { tag: String, what: &'static str },
}

impl IntentCatalog {
    /// Parse a catalog from a JSON string and validate its shape
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: IntentCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.display().to_string()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;

        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            intents = catalog.len(),
            "Intent catalog loaded"
        );
        Ok(catalog)
    }

    /// Validate basic shape: unique tags, no empty pattern/response tables
    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for intent in &self.intents {
            if intent.tag.trim().is_empty() {
                return Err(CatalogError::Parse("intent with empty tag".to_string()));
            }
            if !seen.insert(intent.tag.as_str()) {
                return Err(CatalogError::DuplicateTag(intent.tag.clone()));
            }
            if intent.patterns.is_empty() || intent.patterns.values().all(|p| p.is_empty()) {
                return Err(CatalogError::EmptyIntent {
                    tag: intent.tag.clone(),
                    what: "patterns",
                });
            }
            if intent.responses.is_empty() {
                return Err(CatalogError::EmptyIntent {
                    tag: intent.tag.clone(),
                    what: "responses",
                });
            }
        }
        Ok(())
    }

    /// Iterate intents in authored order
    pub fn intents(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    /// Look up an intent by tag
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.tag == tag)
    }

    /// Number of intents
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the catalog holds no intents
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn minimal_json() -> &'static str {
        r#"{
            "intents": [
                {
                    "tag": "greeting",
                    "patterns": { "en": ["hello", "hi there"], "hi": ["नमस्ते"] },
                    "responses": { "en": ["Hi!"], "hi": ["नमस्ते!"] }
                }
            ]
        }"#
    }

    #[test]
    fn test_parse_minimal_catalog() {
        let catalog = IntentCatalog::from_json_str(minimal_json()).unwrap();
        assert_eq!(catalog.len(), 1);

        let intent = catalog.get("greeting").unwrap();
        assert_eq!(intent.patterns[&Language::English].len(), 2);
        assert_eq!(intent.responses[&Language::Hindi], vec!["नमस्ते!"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(minimal_json().as_bytes()).unwrap();

        let catalog = IntentCatalog::from_json_file(file.path()).unwrap();
        assert!(catalog.get("greeting").is_some());
    }

    #[test]
    fn test_missing_file() {
        let err = IntentCatalog::from_json_file("no/such/intents.json").unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = IntentCatalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_missing_keys_rejected() {
        // No "responses" key on the entry
        let err = IntentCatalog::from_json_str(
            r#"{ "intents": [ { "tag": "x", "patterns": { "en": ["a"] } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_unknown_language_code_rejected() {
        let err = IntentCatalog::from_json_str(
            r#"{
                "intents": [
                    {
                        "tag": "x",
                        "patterns": { "ta": ["வணக்கம்"] },
                        "responses": { "ta": ["வணக்கம்!"] }
                    }
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let err = IntentCatalog::from_json_str(
            r#"{
                "intents": [
                    { "tag": "x", "patterns": { "en": ["a"] }, "responses": { "en": ["b"] } },
                    { "tag": "x", "patterns": { "en": ["c"] }, "responses": { "en": ["d"] } }
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTag(tag) if tag == "x"));
    }

    #[test]
    fn test_empty_patterns_rejected() {
        let err = IntentCatalog::from_json_str(
            r#"{ "intents": [ { "tag": "x", "patterns": {}, "responses": { "en": ["b"] } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyIntent { what: "patterns", .. }));
    }

    #[test]
    fn test_pattern_language_without_responses_loads() {
        // Authoring inconsistency deliberately allowed at load time; it is
        // reported at response time instead.
        let catalog = IntentCatalog::from_json_str(
            r#"{
                "intents": [
                    {
                        "tag": "greeting",
                        "patterns": { "en": ["hello"], "ml": ["നമസ്കാരം"] },
                        "responses": { "en": ["Hi!"] }
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
