// LLM abstraction layer

pub mod gemini;
pub mod provider;

pub use provider::LLMAdapter;
