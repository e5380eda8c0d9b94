//! services/api/src/bin/api.rs

use api_lib::{
    adapters::build_answer_provider,
    config::Config,
    error::ApiError,
    web::{self, state::AppState},
};
use astrologer_core::{AstrologyEngine, SystemClock};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Answer Provider & Engine ---
    let provider = build_answer_provider(&config.llm)?;
    let engine = Arc::new(AstrologyEngine::new(provider, Arc::new(SystemClock)));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(engine, config.clone()));
    let sweep_every = config.session_ttl.min(Duration::from_secs(60));
    app_state.spawn_session_sweeper(sweep_every);
    info!(ttl = ?config.session_ttl, "Idle sessions will be expired.");

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    // --- 4. Create the Web Router ---
    let app = web::router(app_state).layer(cors);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
