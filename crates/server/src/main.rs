//! Paperdeck static server
//!
//! Browsers refuse relative-path fetches for pages opened straight from
//! disk, so the catalog has to be served over local HTTP. This binary
//! serves:
//! - the data tree (`index.json`, `dates/<date>.json`) under `/data`,
//!   with caching disabled so a regenerated tree is picked up on reload
//! - the static web shell at `/`, when one is configured
//! - a `/health` liveness route

use axum::{http::header, response::Json, routing::get, Router};
use paperdeck_common::{AppConfig, VERSION};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness probe - always returns healthy if the server is running
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .with_target(true)
        .init();

    info!("Starting paperdeck server v{}", VERSION);

    let app = create_router(&config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Serving {} at http://{}/data", config.server.data_dir, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the application router
fn create_router(config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // The data tree is immutable per generation but regenerated in place;
    // disable response caching exactly like the client disables request
    // caching.
    let no_cache = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache"),
    );

    let data = ServeDir::new(&config.server.data_dir);

    let mut app = Router::new()
        .route("/health", get(health))
        .nest_service("/data", data)
        .layer(no_cache);

    if let Some(static_dir) = &config.server.static_dir {
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    app.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
