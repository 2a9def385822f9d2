use std::sync::Arc;

use crate::assistant::DocumentAssistant;
use crate::config::Config;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub assistant: Arc<DocumentAssistant>,
}

// Request and page types

/// Form body for `/chat` and `/chat_page`. Both fields are optional: a
/// missing or blank question selects the summarization template, and a
/// missing session id is the "no document uploaded" error state.
#[derive(Debug, serde::Deserialize)]
pub struct ChatForm {
    pub user_query: Option<String>,
    pub session_id: Option<String>,
}

/// Everything the result page can show. Handlers fill the slots they have;
/// empty slots simply do not render.
#[derive(Debug, Default)]
pub struct ResultPage {
    pub summary: Option<String>,
    pub filename: Option<String>,
    pub chat_response: Option<String>,
    pub user_query: Option<String>,
    pub error: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}
