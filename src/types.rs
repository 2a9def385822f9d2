// Core types and error taxonomy

/// File formats the extractor has a strategy for.
///
/// `doc` maps onto the DOCX strategy, as the original allow-list admits it;
/// a true legacy binary `.doc` fails the ZIP open and extracts as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Txt),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Docx => write!(f, "docx"),
            DocumentKind::Txt => write!(f, "txt"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("AI service error: {0}")]
    Upstream(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Message surfaced in a page's error slot. Validation messages pass
    /// through verbatim; extraction failures collapse to one fixed message;
    /// anything else keeps the underlying detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(message) => message.clone(),
            AppError::Extraction(_) => {
                "Could not extract text from the document. Please check the file format or content."
                    .to_string()
            }
            other => format!("Sorry, there was an error processing your request: {}", other),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
