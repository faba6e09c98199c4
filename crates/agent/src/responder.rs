//! Response selection
//!
//! Turns a match result into a reply string. A matched intent answers with a
//! uniformly random pick from its response list in the detected language; no
//! match answers with a fixed default reply.

use rand::seq::SliceRandom;
use rand::Rng;

use chat_agent_core::Language;

use crate::catalog::IntentCatalog;
use crate::matcher::MatchResult;

/// Recoverable response lookup failures
///
/// These indicate catalog authoring inconsistencies (a pattern exists in a
/// language without a matching response list). The caller should log them
/// and fall back to the default reply rather than surface them to the user.
#[derive(thiserror::Error, Debug)]
pub enum ResponderError {
    #[error("No intent with tag '{tag}' in the catalog")]
    UnknownTag { tag: String },

    #[error("Intent '{tag}' has no responses authored for {language}")]
    MissingResponses { tag: String, language: Language },
}

/// Fixed reply used when no intent matches
pub fn default_reply(language: Language) -> &'static str {
    match language {
        Language::English => "I'm sorry, I don't understand. Could you please rephrase?",
        Language::Hindi => {
            "मुझे क्षमा करें, मैं यह समझ नहीं पा रहा हूँ। क्या आप अपना प्रश्न फिर से पूछ सकते हैं?"
        }
        Language::Malayalam => {
            "ക്ഷമിക്കണം, എനിക്കത് മനസ്സിലായില്ല. നിങ്ങളുടെ ചോദ്യം ഒന്നു മാറ്റി ചോദിക്കാമോ?"
        }
    }
}

/// Select a reply for `result` using the thread-local RNG
pub fn respond(result: &MatchResult, catalog: &IntentCatalog) -> Result<String, ResponderError> {
    respond_with(result, catalog, &mut rand::thread_rng())
}

/// Select a reply for `result` using the supplied RNG
///
/// Injectable RNG keeps the random draw deterministic under test.
pub fn respond_with<R: Rng>(
    result: &MatchResult,
    catalog: &IntentCatalog,
    rng: &mut R,
) -> Result<String, ResponderError> {
    let Some(tag) = result.tag.as_deref() else {
        // TODO: pick the default reply by detected language once product
        // confirms; replies for Hindi and Malayalam are authored above but
        // the fallback currently always answers in English.
        return Ok(default_reply(Language::English).to_string());
    };

    let intent = catalog.get(tag).ok_or_else(|| ResponderError::UnknownTag {
        tag: tag.to_string(),
    })?;

    // A missing language key and an empty response list are the same
    // authoring mistake: nothing to say in the detected language.
    intent
        .responses
        .get(&result.language)
        .and_then(|responses| responses.choose(rng))
        .cloned()
        .ok_or(ResponderError::MissingResponses {
            tag: tag.to_string(),
            language: result.language,
        })
}
