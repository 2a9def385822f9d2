//! Server-rendered pages
//!
//! Plain HTML with a small shared shell, rendered with format strings. All
//! user-supplied values are escaped before interpolation.

use crate::models::ResultPage;
use axum::response::Html;

/// Escape a value for interpolation into HTML text or attribute content.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page_shell(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{title}</title>
<style>
  body {{ font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #1f2430; }}
  h1 {{ font-size: 1.5rem; }}
  .card {{ border: 1px solid #d5d9e0; border-radius: 8px; padding: 1rem 1.25rem; margin: 1rem 0; }}
  .error {{ border-color: #c0392b; color: #c0392b; }}
  label {{ display: block; margin-bottom: 0.5rem; font-weight: 600; }}
  input, textarea {{ width: 100%; box-sizing: border-box; padding: 0.5rem; margin-bottom: 0.75rem; }}
  button {{ padding: 0.5rem 1.25rem; cursor: pointer; }}
  pre {{ white-space: pre-wrap; font-family: inherit; margin: 0; }}
</style>
</head>
<body>
{body}
</body>
</html>"#
    ))
}

/// The upload form, optionally with an error banner above it.
pub fn render_index(error: Option<&str>) -> Html<String> {
    let error_block = match error {
        Some(message) => format!(
            r#"<div class="card error">{}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    };

    let body = format!(
        r#"<h1>Legal Document Assistant</h1>
{error_block}
<div class="card">
  <form action="/" method="post" enctype="multipart/form-data">
    <label for="document">Upload a document (PDF, DOC, DOCX or TXT)</label>
    <input type="file" id="document" name="document" />
    <button type="submit">Upload &amp; Summarize</button>
  </form>
</div>
<p><a href="/chat_page">Chat with a previously uploaded document</a></p>"#
    );

    page_shell("Legal Document Assistant", &body)
}

/// The result page shown after an upload or a chat turn: summary, latest
/// answer, and a follow-up question form carrying the session id.
pub fn render_result(page: &ResultPage) -> Html<String> {
    let mut body = String::from("<h1>Legal Document Assistant</h1>\n");

    if let Some(error) = &page.error {
        body.push_str(&format!(
            r#"<div class="card error">{}</div>
"#,
            escape_html(error)
        ));
    }

    if let Some(filename) = &page.filename {
        body.push_str(&format!(
            "<p>Document: <strong>{}</strong></p>\n",
            escape_html(filename)
        ));
    }

    if let Some(summary) = &page.summary {
        body.push_str(&format!(
            r#"<div class="card"><h2>Summary</h2><pre>{}</pre></div>
"#,
            escape_html(summary)
        ));
    }

    if let Some(answer) = &page.chat_response {
        let asked = match &page.user_query {
            Some(query) => format!("<p>You asked: <em>{}</em></p>", escape_html(query)),
            None => String::new(),
        };
        body.push_str(&format!(
            r#"<div class="card"><h2>Answer</h2>{asked}<pre>{}</pre></div>
"#,
            escape_html(answer)
        ));
    }

    if let Some(session_id) = &page.session_id {
        body.push_str(&format!(
            r#"<div class="card">
  <form action="/chat" method="post">
    <input type="hidden" name="session_id" value="{}" />
    <label for="user_query">Ask a question about this document</label>
    <input type="text" id="user_query" name="user_query" placeholder="e.g. What is the termination notice period?" />
    <button type="submit">Ask</button>
  </form>
</div>
"#,
            escape_html(session_id)
        ));
    }

    body.push_str(r#"<p><a href="/">Upload another document</a></p>"#);

    page_shell("Legal Document Assistant", &body)
}

/// The standalone chat page: a bare question form plus the latest answer.
pub fn render_chat(
    answer: Option<&str>,
    error: Option<&str>,
    session_id: Option<&str>,
) -> Html<String> {
    let mut body = String::from("<h1>Document Chat</h1>\n");

    if let Some(error) = error {
        body.push_str(&format!(
            r#"<div class="card error">{}</div>
"#,
            escape_html(error)
        ));
    }

    if let Some(answer) = answer {
        body.push_str(&format!(
            r#"<div class="card"><h2>Answer</h2><pre>{}</pre></div>
"#,
            escape_html(answer)
        ));
    }

    body.push_str(&format!(
        r#"<div class="card">
  <form action="/chat_page" method="post">
    <label for="session_id">Session id</label>
    <input type="text" id="session_id" name="session_id" value="{}" placeholder="Paste the session id from your upload" />
    <label for="user_query">Your question</label>
    <input type="text" id="user_query" name="user_query" />
    <button type="submit">Ask</button>
  </form>
</div>
<p><a href="/">Back to upload</a></p>"#,
        escape_html(session_id.unwrap_or_default())
    ));

    page_shell("Document Chat", &body)
}
