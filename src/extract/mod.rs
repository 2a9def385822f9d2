// Text extraction strategies

mod docx;
mod pdf;

use std::path::Path;
use tracing::warn;

use crate::types::{AppError, AppResult, DocumentKind};

/// Extract text from a stored document according to its declared extension.
///
/// PDF and DOC/DOCX extraction degrade to empty text when the file cannot
/// be parsed; callers treat empty as "could not extract", not as an empty
/// document. Plain text must be valid UTF-8 or the request fails. An
/// extension without a strategy also extracts as empty.
pub async fn extract_text(path: &Path, extension: &str) -> AppResult<String> {
    let kind = match DocumentKind::from_extension(extension) {
        Some(kind) => kind,
        None => {
            warn!(extension, "No extraction strategy for extension");
            return Ok(String::new());
        }
    };

    let bytes = tokio::fs::read(path).await?;

    match kind {
        DocumentKind::Pdf => Ok(pdf::extract(&bytes)),
        DocumentKind::Docx => Ok(docx::extract(&bytes)),
        DocumentKind::Txt => String::from_utf8(bytes)
            .map_err(|e| AppError::Extraction(format!("document is not valid UTF-8: {}", e))),
    }
}
