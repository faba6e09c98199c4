//! Conversation store backends
//!
//! `SqliteConversationStore` is the production backend; the in-memory store
//! backs tests and storeless deployments.

use async_trait::async_trait;
use parking_lot::RwLock;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

use chat_agent_core::{Conversation, Language};

use crate::PersistenceError;

/// Pluggable conversation log backend
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append one record
    async fn record(&self, conversation: &Conversation) -> Result<(), PersistenceError>;

    /// Most recent records, newest first
    async fn recent(&self, limit: usize) -> Result<Vec<Conversation>, PersistenceError>;
}

/// In-memory conversation log
#[derive(Default)]
pub struct InMemoryConversationStore {
    records: RwLock<Vec<Conversation>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn record(&self, conversation: &Conversation) -> Result<(), PersistenceError> {
        self.records.write().push(conversation.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Conversation>, PersistenceError> {
        let records = self.records.read();
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS conversations (
    id TEXT PRIMARY KEY,
    user_message TEXT NOT NULL,
    bot_response TEXT NOT NULL,
    language TEXT NOT NULL,
    timestamp TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_conversations_timestamp
    ON conversations (timestamp);";

/// SQLite-backed conversation log
#[derive(Clone)]
pub struct SqliteConversationStore {
    pool: SqlitePool,
}

impl SqliteConversationStore {
    /// Open (creating if missing) the database at `db_path` and ensure the schema
    pub async fn new(db_path: &str) -> Result<Self, PersistenceError> {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| PersistenceError::Connect(format!("create data dir: {e}")))?;
            }
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| PersistenceError::Connect(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| PersistenceError::Connect(e.to_string()))?;

        sqlx::raw_sql(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| PersistenceError::Query(format!("create schema: {e}")))?;

        tracing::info!(path = db_path, "Conversation log opened");

        Ok(Self { pool })
    }

    fn decode_row(
        (id, user_message, bot_response, language, timestamp): (
            String,
            String,
            String,
            String,
            String,
        ),
    ) -> Result<Conversation, PersistenceError> {
        let id = Uuid::parse_str(&id)
            .map_err(|e| PersistenceError::Decode(format!("id '{id}': {e}")))?;
        let language = Language::from_str_loose(&language)
            .ok_or_else(|| PersistenceError::Decode(format!("language '{language}'")))?;
        let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp)
            .map_err(|e| PersistenceError::Decode(format!("timestamp '{timestamp}': {e}")))?
            .with_timezone(&chrono::Utc);

        Ok(Conversation {
            id,
            user_message,
            bot_response,
            language,
            timestamp,
        })
    }
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn record(&self, conversation: &Conversation) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO conversations (id, user_message, bot_response, language, timestamp) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(conversation.id.to_string())
        .bind(&conversation.user_message)
        .bind(&conversation.bot_response)
        .bind(conversation.language.code())
        .bind(conversation.timestamp.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| PersistenceError::Query(format!("insert failed: {e}")))?;

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Conversation>, PersistenceError> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, user_message, bot_response, language, timestamp \
             FROM conversations ORDER BY timestamp DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PersistenceError::Query(format!("query failed: {e}")))?;

        rows.into_iter().map(Self::decode_row).collect()
    }
}
