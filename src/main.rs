//! Credit scoring + explanation API server
//!
//! Serves a fitted default-risk classifier over JSON/HTTP for the advisor
//! dashboard: `/predict` returns a calibrated probability and a decision
//! band, `/explain` returns the top local feature attributions for the
//! same client. Both routes sit behind a shared-secret bearer gate; the
//! health routes are open.

mod config;
mod error;
mod handlers;
mod middleware;
mod scoring;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scoring::artifact::ModelArtifact;
use scoring::ScoringContext;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "neobank_scoring=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Scoring API starting...");
    if !config.is_production() && config.api_key.starts_with("dev-") {
        tracing::warn!("Using the development API key; set API_KEY before deploying");
    }

    // Load the fitted model artifact. Any failure here is fatal: the
    // process must not accept traffic without a usable model.
    let artifact = ModelArtifact::load(&config.model_path)
        .with_context(|| format!("model unavailable at '{}'", config.model_path))?;
    let ctx = ScoringContext::from_artifact(artifact)
        .context("model artifact failed validation")?;

    // Build application state
    let state = AppState {
        ctx: Arc::new(ctx),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state: the immutable scoring context plus config.
/// Read-only after startup, so concurrent requests need no locking.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<ScoringContext>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Open routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(handlers::health::check))
        .route("/health", get(handlers::health::check));

    // Scoring routes (shared-secret bearer auth)
    let protected_routes = Router::new()
        .route("/predict", post(handlers::predict::predict))
        .route("/explain", post(handlers::explain::explain))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
