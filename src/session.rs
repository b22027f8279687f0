//! In-memory conversation session store (non-persistent).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// One user/assistant exchange.
#[derive(Debug, Clone)]
struct Exchange {
    user: String,
    assistant: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Tracks per-session conversation history, bounded to the most recent
/// `max_history` exchanges.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Vec<Exchange>>>>,
    max_history: usize,
}

impl SessionManager {
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_history,
        }
    }

    /// Allocate a new session and return its identifier.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), Vec::new());
        id
    }

    /// Record one completed exchange. Unknown session ids are created
    /// implicitly so callers may pass their own identifiers.
    pub async fn add_exchange(&self, session_id: &str, user: &str, assistant: &str) {
        let mut sessions = self.sessions.write().await;
        let exchanges = sessions.entry(session_id.to_string()).or_default();
        exchanges.push(Exchange {
            user: user.to_string(),
            assistant: assistant.to_string(),
            created_at: chrono::Utc::now(),
        });
        let len = exchanges.len();
        if len > self.max_history {
            exchanges.drain(..len - self.max_history);
        }
    }

    /// Formatted history for a session, or `None` when there is nothing
    /// to show. The format is opaque to callers; it is only ever embedded
    /// verbatim into system content.
    pub async fn history(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        let exchanges = sessions.get(session_id)?;
        if exchanges.is_empty() {
            return None;
        }
        let formatted = exchanges
            .iter()
            .map(|e| format!("User: {}\nAssistant: {}", e.user, e.assistant))
            .collect::<Vec<_>>()
            .join("\n");
        Some(formatted)
    }

    /// Drop a session's history. Clearing an unknown session is a no-op.
    pub async fn clear_session(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Timestamp of the most recent exchange in a session, if any.
    pub async fn last_activity(&self, session_id: &str) -> Option<chrono::DateTime<chrono::Utc>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .and_then(|exchanges| exchanges.last())
            .map(|e| e.created_at)
    }
}
