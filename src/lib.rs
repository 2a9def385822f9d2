// DocSage - AI-assisted legal document summarizer and Q&A web service

pub mod assistant;
pub mod config;
pub mod extract;
pub mod llm;
pub mod models;
pub mod routes;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
