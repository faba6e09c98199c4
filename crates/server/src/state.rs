//! Shared application state

use std::sync::Arc;

use chat_agent_agent::IntentCatalog;
use chat_agent_config::Settings;
use chat_agent_persistence::ConversationStore;

/// State shared by all request handlers
///
/// The catalog is loaded once at startup and never mutated afterwards, so
/// handlers read it concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub catalog: Arc<IntentCatalog>,
    pub store: Arc<dyn ConversationStore>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        catalog: IntentCatalog,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            catalog: Arc::new(catalog),
            store,
        }
    }
}
