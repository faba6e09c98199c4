//! Language definitions for the chat agent
//!
//! The intent catalog is authored in English, Hindi and Malayalam. Language
//! codes follow ISO 639-1 and are used verbatim as catalog keys, so the
//! serde representation is the two-letter code.

use serde::{Deserialize, Serialize};

/// Supported reply languages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ml")]
    Malayalam,
}

impl Language {
    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Malayalam => "ml",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Malayalam => "Malayalam",
        }
    }

    /// Parse from string (case-insensitive, accepts codes and names)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "hi" | "hin" | "hindi" => Some(Self::Hindi),
            "ml" | "mal" | "malayalam" => Some(Self::Malayalam),
            _ => None,
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[Self::English, Self::Hindi, Self::Malayalam]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Hindi.code(), "hi");
        assert_eq!(Language::Malayalam.code(), "ml");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!(Language::from_str_loose("hi"), Some(Language::Hindi));
        assert_eq!(Language::from_str_loose("Hindi"), Some(Language::Hindi));
        assert_eq!(Language::from_str_loose("MALAYALAM"), Some(Language::Malayalam));
        assert_eq!(Language::from_str_loose("unknown"), None);
    }

    #[test]
    fn test_serde_uses_iso_codes() {
        let json = serde_json::to_string(&Language::Malayalam).unwrap();
        assert_eq!(json, "\"ml\"");

        let lang: Language = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(lang, Language::Hindi);

        assert!(serde_json::from_str::<Language>("\"ta\"").is_err());
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_all_languages() {
        assert_eq!(Language::all().len(), 3);
    }
}
