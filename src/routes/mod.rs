//! HTTP endpoints
//!
//! - `GET /` and `POST /` serve the upload form and handle a new document
//! - `POST /chat` runs a follow-up question against the session's document
//! - `GET/POST /chat_page` is the standalone chat page
//! - `GET /api/health` reports service health

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

pub mod chat;
pub mod health;
pub mod pages;
pub mod upload;

pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let max_upload_bytes = state.config.upload.max_upload_bytes;

    Router::new()
        .merge(upload::router(state.clone()))
        .merge(chat::router(state))
        .merge(health::router())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
