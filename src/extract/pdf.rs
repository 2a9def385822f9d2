use lopdf::Document;
use tracing::warn;

/// Per-page PDF text extraction. Pages whose text cannot be decoded are
/// skipped rather than failing the document; a file that does not load as
/// a PDF at all yields empty text.
pub(crate) fn extract(bytes: &[u8]) -> String {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "PDF load failed");
            return String::new();
        }
    };

    let mut pages_text = Vec::new();
    for (page_number, _object_id) in doc.get_pages() {
        match doc.extract_text(&[page_number]) {
            Ok(text) => {
                let text = text.trim_end_matches('\n');
                if !text.is_empty() {
                    pages_text.push(text.to_string());
                }
            }
            Err(e) => {
                warn!(page = page_number, error = %e, "Skipping page without extractable text");
            }
        }
    }

    pages_text.join("\n")
}
