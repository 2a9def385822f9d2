// End-to-end tests against the router. The model adapter is mocked so no
// network calls happen; uploaded documents land in a per-test tempdir.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use docsage::assistant::DocumentAssistant;
use docsage::config::{Config, LLMConfig, ServerConfig, UploadConfig};
use docsage::llm::LLMAdapter;
use docsage::session::SessionStore;
use docsage::types::AppResult;
use docsage::{create_router, AppState};

const BOUNDARY: &str = "test-boundary-7d93b07ac0aa";
const NO_DOCUMENT_MSG: &str =
    "No document uploaded or document not found. Please upload a document first.";

struct MockAdapter {
    calls: Arc<AtomicUsize>,
    reply: String,
}

#[async_trait::async_trait]
impl LLMAdapter for MockAdapter {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

fn test_app(upload_dir: &std::path::Path, calls: Arc<AtomicUsize>) -> axum::Router {
    let config = Config {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        llm: LLMConfig {
            google_api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
        },
        upload: UploadConfig {
            dir: upload_dir.to_path_buf(),
            allowed_extensions: vec![
                "pdf".to_string(),
                "txt".to_string(),
                "doc".to_string(),
                "docx".to_string(),
            ],
            max_upload_bytes: 16 * 1024 * 1024,
        },
    };

    let llm: Arc<dyn LLMAdapter> = Arc::new(MockAdapter {
        calls,
        reply: "Mock model output".to_string(),
    });

    let state = AppState {
        config,
        sessions: SessionStore::default(),
        assistant: Arc::new(DocumentAssistant::new(llm)),
    };

    create_router(state)
}

fn multipart_body(
    field_name: &str,
    filename: &str,
    content: &[u8],
    session_id: Option<&str>,
) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(id) = session_id {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"session_id\"\r\n\r\n{id}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn chat_request(uri: &str, form_body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

fn extract_session_id(html: &str) -> String {
    let marker = r#"name="session_id" value=""#;
    let start = html.find(marker).expect("page should embed a session id") + marker.len();
    let end = html[start..].find('"').expect("unterminated session id attribute") + start;
    html[start..end].to_string()
}

#[tokio::test]
async fn test_index_renders_upload_form() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), Arc::new(AtomicUsize::new(0)));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="document""#));
    assert!(html.contains("multipart/form-data"));
}

#[tokio::test]
async fn test_upload_without_file_part_shows_error() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let body = multipart_body("other", "notes.txt", b"hello", None);
    let response = app.oneshot(upload_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No file part in the request."));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let body = multipart_body("document", "notes.exe", b"MZ", None);
    let response = app.oneshot(upload_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Unsupported file type."));

    // Nothing should be written to disk for a rejected upload
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_txt_returns_summary_and_stores_file() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let body = multipart_body(
        "document",
        "contract.txt",
        b"This agreement is between two parties.",
        None,
    );
    let response = app.oneshot(upload_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Mock model output"));
    assert!(html.contains("contract.txt"));

    let stored: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].ends_with("_contract.txt"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_upload_reuses_posted_session_id() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let first = multipart_body("document", "first.txt", b"First document.", None);
    let response = app.clone().oneshot(upload_request(first)).await.unwrap();
    let session_id = extract_session_id(&body_text(response).await);

    let second = multipart_body("document", "second.txt", b"Second document.", Some(&session_id));
    let response = app.oneshot(upload_request(second)).await.unwrap();
    let html = body_text(response).await;

    assert!(html.contains(&session_id));
    assert!(html.contains("second.txt"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_chat_without_session_shows_no_document_error() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let response = app
        .oneshot(chat_request("/chat", "user_query=What%3F".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(NO_DOCUMENT_MSG));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_answers_after_upload() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let body = multipart_body(
        "document",
        "lease.txt",
        b"Tenant must give thirty days notice.",
        None,
    );
    let response = app.clone().oneshot(upload_request(body)).await.unwrap();
    let session_id = extract_session_id(&body_text(response).await);

    let form = format!("session_id={session_id}&user_query=What+is+the+notice+period%3F");
    let response = app.oneshot(chat_request("/chat", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Mock model output"));
    assert!(html.contains("You asked:"));
    assert!(html.contains("lease.txt"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_chat_after_document_removed_shows_no_document_error() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let body = multipart_body("document", "gone.txt", b"Soon to be deleted.", None);
    let response = app.clone().oneshot(upload_request(body)).await.unwrap();
    let session_id = extract_session_id(&body_text(response).await);

    for entry in std::fs::read_dir(dir.path()).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let form = format!("session_id={session_id}&user_query=Still+there%3F");
    let response = app.oneshot(chat_request("/chat", form)).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains(NO_DOCUMENT_MSG));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_chat_page_runs_turn_against_session() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let app = test_app(dir.path(), calls.clone());

    let body = multipart_body("document", "policy.txt", b"Claims are paid in 30 days.", None);
    let response = app.clone().oneshot(upload_request(body)).await.unwrap();
    let session_id = extract_session_id(&body_text(response).await);

    let form = format!("session_id={session_id}&user_query=When+are+claims+paid%3F");
    let response = app.oneshot(chat_request("/chat_page", form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Mock model output"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_chat_page_get_renders_form() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), Arc::new(AtomicUsize::new(0)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/chat_page")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"name="user_query""#));
    assert!(html.contains(r#"name="session_id""#));
}

#[tokio::test]
async fn test_health_endpoint_reports_healthy() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path(), Arc::new(AtomicUsize::new(0)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "docsage");
}
