// Chat endpoints
// A chat turn re-reads the stored document from disk, extracts its text
// fresh, and asks the model. Nothing about the document is cached between
// turns beyond the file itself.

use crate::extract;
use crate::models::{AppState, ChatForm, ResultPage};
use crate::routes::pages;
use crate::session::SessionRecord;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use tracing::{info, warn};

const NO_DOCUMENT_MSG: &str =
    "No document uploaded or document not found. Please upload a document first.";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat_page", get(chat_page).post(chat_page_submit))
        .with_state(state)
}

struct ChatTurn {
    answer: Option<String>,
    error: Option<String>,
    record: Option<SessionRecord>,
}

/// Resolve the session, re-extract the document, and run one model turn.
/// Returns the no-document error when the session or its file is gone.
async fn run_chat_turn(state: &AppState, form: &ChatForm) -> ChatTurn {
    let record = match &form.session_id {
        Some(id) => state.sessions.get(id).await,
        None => None,
    };

    let record = match record {
        Some(record) => record,
        None => {
            info!("Chat request without an active session");
            return ChatTurn {
                answer: None,
                error: Some(NO_DOCUMENT_MSG.to_string()),
                record: None,
            };
        }
    };

    if tokio::fs::metadata(&record.document_path).await.is_err() {
        warn!(
            path = %record.document_path.display(),
            "Session document missing from disk"
        );
        return ChatTurn {
            answer: None,
            error: Some(NO_DOCUMENT_MSG.to_string()),
            record: None,
        };
    }

    info!(
        document = %record.original_name,
        has_question = form
            .user_query
            .as_deref()
            .map(|q| !q.trim().is_empty())
            .unwrap_or(false),
        "Running chat turn"
    );

    let result = match extract::extract_text(&record.document_path, &record.extension).await {
        Ok(text) => {
            state
                .assistant
                .respond(&text, form.user_query.as_deref())
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(answer) => ChatTurn {
            answer: Some(answer),
            error: None,
            record: Some(record),
        },
        Err(e) => {
            warn!(error = %e, "Chat turn failed");
            ChatTurn {
                answer: None,
                error: Some(e.user_message()),
                record: Some(record),
            }
        }
    }
}

async fn chat(State(state): State<AppState>, Form(form): Form<ChatForm>) -> Html<String> {
    let turn = run_chat_turn(&state, &form).await;

    match turn.record {
        Some(record) => pages::render_result(&ResultPage {
            summary: record.last_summary,
            filename: Some(record.original_name),
            chat_response: turn.answer,
            user_query: form.user_query,
            error: turn.error,
            session_id: form.session_id,
        }),
        None => pages::render_result(&ResultPage {
            error: turn.error,
            session_id: form.session_id,
            ..Default::default()
        }),
    }
}

async fn chat_page() -> Html<String> {
    pages::render_chat(None, None, None)
}

async fn chat_page_submit(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Html<String> {
    let turn = run_chat_turn(&state, &form).await;
    pages::render_chat(
        turn.answer.as_deref(),
        turn.error.as_deref(),
        form.session_id.as_deref(),
    )
}
