//! Conversation log storage
//!
//! Persists one record per answered chat request. The log is an audit trail:
//! matching never reads it, and a write failure must not fail the request.

pub mod conversations;

pub use conversations::{
    ConversationStore, InMemoryConversationStore, SqliteConversationStore,
};

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to open database: {0}")]
    Connect(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Stored row is not decodable: {0}")]
    Decode(String),
}
