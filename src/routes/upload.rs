// Upload endpoint
// Accepts a multipart document, stores it on disk, and renders the summary.

use crate::config::UploadConfig;
use crate::extract;
use crate::models::{AppState, ResultPage};
use crate::routes::pages;
use crate::session::SessionRecord;
use crate::types::{AppError, AppResult};
use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tracing::{info, warn};
use uuid::Uuid;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(upload_document))
        .with_state(state)
}

async fn index() -> Html<String> {
    pages::render_index(None)
}

async fn upload_document(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    match process_upload(&state, multipart).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Upload rejected");
            pages::render_index(Some(&e.user_message()))
        }
    }
}

async fn process_upload(state: &AppState, mut multipart: Multipart) -> AppResult<Html<String>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut posted_session_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload request: {}", e)))?
    {
        let field_name = field.name().map(|name| name.to_string());
        match field_name.as_deref() {
            Some("document") => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?;
                file = Some((original_name, bytes.to_vec()));
            }
            Some("session_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?;
                let value = value.trim();
                if !value.is_empty() {
                    posted_session_id = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    let (original_name, bytes, extension) = validate_upload(file, &state.config.upload)?;

    let safe_name = sanitize_filename(&original_name);
    let stored_name = format!("{}_{}", Uuid::new_v4(), safe_name);
    let path = state.config.upload.dir.join(&stored_name);
    tokio::fs::write(&path, &bytes).await?;

    info!(
        original = %original_name,
        stored = %stored_name,
        bytes = bytes.len(),
        "Stored uploaded document"
    );

    // Reuse the caller's session when it exists so a re-upload replaces the
    // document in place; otherwise start a fresh one.
    let session_id = match posted_session_id {
        Some(id) if state.sessions.get(&id).await.is_some() => id,
        _ => Uuid::new_v4().to_string(),
    };

    let summary_result = match extract::extract_text(&path, &extension).await {
        Ok(text) => state.assistant.respond(&text, None).await,
        Err(e) => Err(e),
    };

    let (summary, error) = match summary_result {
        Ok(summary) => (Some(summary), None),
        Err(e) => {
            warn!(error = %e, "Could not summarize uploaded document");
            (None, Some(e.user_message()))
        }
    };

    state
        .sessions
        .insert(
            &session_id,
            SessionRecord {
                document_path: path,
                original_name: original_name.clone(),
                extension,
                last_summary: summary.clone(),
            },
        )
        .await;

    Ok(pages::render_result(&ResultPage {
        summary,
        filename: Some(original_name),
        error,
        session_id: Some(session_id),
        ..Default::default()
    }))
}

fn validate_upload(
    file: Option<(String, Vec<u8>)>,
    config: &UploadConfig,
) -> AppResult<(String, Vec<u8>, String)> {
    let (original_name, bytes) = match file {
        Some(file) => file,
        None => return Err(AppError::Validation("No file part in the request.".to_string())),
    };

    if original_name.is_empty() {
        return Err(AppError::Validation("No file selected.".to_string()));
    }

    let extension = match file_extension(&original_name).filter(|ext| config.is_allowed(ext)) {
        Some(ext) => ext.to_lowercase(),
        None => return Err(AppError::Validation("Unsupported file type.".to_string())),
    };

    Ok((original_name, bytes, extension))
}

fn file_extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

// Keep only characters that are safe in a filename on disk.
fn sanitize_filename(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_start_matches('.');
    if safe.is_empty() {
        "document".to_string()
    } else {
        safe.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_config() -> UploadConfig {
        UploadConfig {
            dir: PathBuf::from("uploads"),
            allowed_extensions: vec![
                "pdf".to_string(),
                "txt".to_string(),
                "doc".to_string(),
                "docx".to_string(),
            ],
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }

    #[test]
    fn test_sanitize_filename_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my lease (final).pdf"), "my_lease__final_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_filename("..."), "document");
        assert_eq!(sanitize_filename("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_file_extension_takes_last_component() {
        assert_eq!(file_extension("lease.pdf"), Some("pdf"));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_validate_upload_requires_file_part() {
        let err = validate_upload(None, &test_config()).unwrap_err();
        assert_eq!(err.user_message(), "No file part in the request.");
    }

    #[test]
    fn test_validate_upload_requires_selected_file() {
        let err = validate_upload(Some((String::new(), vec![1, 2, 3])), &test_config()).unwrap_err();
        assert_eq!(err.user_message(), "No file selected.");
    }

    #[test]
    fn test_validate_upload_rejects_unknown_extension() {
        let err =
            validate_upload(Some(("malware.exe".to_string(), vec![0])), &test_config()).unwrap_err();
        assert_eq!(err.user_message(), "Unsupported file type.");
    }

    #[test]
    fn test_validate_upload_lowercases_extension() {
        let (name, bytes, extension) =
            validate_upload(Some(("Lease.PDF".to_string(), vec![0])), &test_config()).unwrap();
        assert_eq!(name, "Lease.PDF");
        assert_eq!(bytes, vec![0]);
        assert_eq!(extension, "pdf");
    }
}
