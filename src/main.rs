use std::sync::{Arc, Mutex};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use salonbook::config::AppConfig;
use salonbook::db;
use salonbook::handlers;
use salonbook::services::ai::gemini::GeminiProvider;
use salonbook::services::persistence::SqliteBlobStore;
use salonbook::services::session::Session;
use salonbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let store = Arc::new(SqliteBlobStore::new(Arc::new(Mutex::new(conn))));

    if config.has_api_key() {
        tracing::info!("using Gemini provider (model: {})", config.gemini_model);
    } else {
        tracing::warn!("GEMINI_API_KEY is not set; chat turns will be rejected until it is");
    }
    let llm = GeminiProvider::new(config.gemini_api_key.clone(), config.gemini_base_url.clone());

    let session = Session::load(store, config.has_api_key());
    let state = Arc::new(AppState::new(config.clone(), Box::new(llm), session));

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
