use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-session state: the current document and the last summary produced
/// for it. One record per session id; a new upload under the same id
/// replaces the record wholesale.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub document_path: PathBuf,
    pub original_name: String,
    pub extension: String,
    pub last_summary: Option<String>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl SessionStore {
    pub async fn insert(&self, session_id: &str, record: SessionRecord) {
        let mut guard = self.inner.write().await;
        guard.insert(session_id.to_string(), record);
    }

    pub async fn get(&self, session_id: &str) -> Option<SessionRecord> {
        let guard = self.inner.read().await;
        guard.get(session_id).cloned()
    }
}
