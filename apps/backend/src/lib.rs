pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::services::locks::ReviewLocks;
use srs_core::sm2::Sm2;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub scheduler: Sm2,
    pub review_locks: Arc<ReviewLocks>,
}

/// Build the API router over the given state.
///
/// Shared with the integration tests so they drive the same routes the
/// server does.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Item routes
        .route("/api/items", post(routes::items::create))
        .route("/api/items/bulk", post(routes::items::bulk_create))
        // Review routes
        .route("/api/reviews", post(routes::reviews::submit))
        .route("/api/reviews/due", get(routes::reviews::due))
        .route("/api/reviews/due/count", get(routes::reviews::due_count))
        // Stats routes
        .route("/api/stats", get(routes::stats::learner_stats))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:lexora.db".to_string());

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState {
        db: Arc::new(db),
        scheduler: Sm2::default(),
        review_locks: Arc::new(ReviewLocks::new()),
    };

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
