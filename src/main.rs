use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsage::assistant::DocumentAssistant;
use docsage::llm::gemini::GeminiAdapter;
use docsage::llm::LLMAdapter;
use docsage::routes::create_router;
use docsage::session::SessionStore;
use docsage::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsage=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    if config.llm.google_api_key.is_empty() {
        warn!("GOOGLE_API_KEY is not set; AI requests will fail until it is configured");
    }

    // Make sure the upload directory exists before the first request
    tokio::fs::create_dir_all(&config.upload.dir).await?;
    info!("Upload directory ready: {}", config.upload.dir.display());

    let llm: Arc<dyn LLMAdapter> =
        Arc::new(GeminiAdapter::new(&config.llm.google_api_key, &config.llm.model));

    let state = AppState {
        config: config.clone(),
        sessions: SessionStore::default(),
        assistant: Arc::new(DocumentAssistant::new(llm)),
    };

    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
