//! Intent matching engine
//!
//! The engine answers a free-text message in three steps:
//! - the catalog holds the authored intents (patterns and responses per
//!   language), loaded once at startup and read-only afterwards
//! - the matcher scores the message against every pattern and picks the
//!   best-scoring intent, inferring the language from the winning pattern
//! - the responder turns a match into a reply string, falling back to a
//!   default reply when nothing matched

pub mod catalog;
pub mod matcher;
pub mod responder;

pub use catalog::{CatalogError, Intent, IntentCatalog};
pub use matcher::MatchResult;
pub use responder::{default_reply, respond, respond_with, ResponderError};
