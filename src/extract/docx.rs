use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use zip::ZipArchive;

/// DOC/DOCX text extraction: stream `word/document.xml` and join paragraph
/// texts with newlines. Empty paragraphs are kept, matching how word
/// processors count them. Any ZIP or XML failure yields empty text.
pub(crate) fn extract(bytes: &[u8]) -> String {
    match parse_paragraphs(bytes) {
        Ok(paragraphs) => paragraphs.join("\n"),
        Err(e) => {
            warn!(error = %e, "DOCX parsing failed");
            String::new()
        }
    }
}

fn parse_paragraphs(bytes: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    let mut document = archive.by_name("word/document.xml")?;
    document.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::Text(e)) if in_text => {
                current.push_str(&e.unescape()?);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(String::new());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("XML parsing error: {}", e)),
            _ => {}
        }
        buf.clear();
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs)
}
