//! Document assistant
//!
//! Builds the prompt for a summarization or question-answering turn and runs
//! it through the configured LLM adapter.

use crate::llm::LLMAdapter;
use crate::types::{AppError, AppResult};
use std::sync::Arc;
use tracing::{error, info};

pub struct DocumentAssistant {
    llm: Arc<dyn LLMAdapter>,
}

impl DocumentAssistant {
    pub fn new(llm: Arc<dyn LLMAdapter>) -> Self {
        Self { llm }
    }

    /// Answer a question about the document, or summarize it when no question
    /// is given. A blank question counts as no question.
    pub async fn respond(&self, document_text: &str, question: Option<&str>) -> AppResult<String> {
        if document_text.is_empty() {
            return Err(AppError::Extraction(
                "no document content available to process".to_string(),
            ));
        }

        let question = question.map(str::trim).filter(|q| !q.is_empty());

        let prompt = match question {
            Some(user_query) => question_prompt(document_text, user_query),
            None => summary_prompt(document_text),
        };

        info!(
            prompt_len = prompt.len(),
            is_question = question.is_some(),
            "Sending document prompt"
        );

        match self.llm.generate(&prompt).await {
            Ok(reply) => {
                info!(reply_len = reply.len(), "Received model reply");
                Ok(reply)
            }
            Err(e) => {
                error!(error = %e, "Model call failed");
                Err(e)
            }
        }
    }
}

fn summary_prompt(document_content: &str) -> String {
    format!(
        r#"You are a helpful legal assistant. Summarize the key points and important clauses of the following legal document. Use clear, simple language and avoid jargon. Present the summary as bullet points or numbered lists for readability. Highlight potential areas of concern or common pitfalls if they are evident.

--- Document ---
{document_content}

--- Summary ---"#
    )
}

fn question_prompt(document_content: &str, user_query: &str) -> String {
    format!(
        r#"You are a helpful legal assistant. Based only on the following document, answer the user's question clearly and concisely. If the information is not present, state 'I cannot find that information in the provided document.'

--- Document ---
{document_content}

--- User Question ---
{user_query}

--- AI Answer ---"#
    )
}
