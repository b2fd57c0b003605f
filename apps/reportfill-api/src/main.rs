//! Reportfill API Server - Backend for Word report template filling
//!
//! Provides REST endpoints for:
//! - Template and draft listings
//! - Draft pre-fill for resuming a submission
//! - Submission (draft save/delete + document generation)
//! - Generated document download

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod models;
mod state;

use state::AppState;

pub(crate) fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Listings, fetched fresh per request
        .route("/api/templates", get(handlers::list_templates))
        .route("/api/drafts", get(handlers::list_drafts))
        // Draft pre-fill
        .route("/api/drafts/:key", get(handlers::get_draft))
        // Submission
        .route("/api/submit", post(handlers::submit))
        // Document delivery
        .route("/api/documents/:member_name", get(handlers::download))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("reportfill_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing Reportfill API...");
    let state = Arc::new(AppState::new()?);

    let app = router(state);

    // Parse bind address
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting Reportfill API on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
