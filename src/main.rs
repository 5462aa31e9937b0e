// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OctoFit Tracker API Server

use octofit_tracker::{
    config::{Config, StorageBackend},
    db::{Database, FirestoreDb},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        backend = ?config.storage_backend,
        "Starting OctoFit Tracker API"
    );

    let db = match config.storage_backend {
        StorageBackend::Firestore => {
            Database::Firestore(FirestoreDb::new(&config.gcp_project_id).await?)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data will not survive a restart");
            Database::in_memory()
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
    });

    // Build router
    let app = octofit_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("octofit_tracker=debug,info")),
        )
        .with(format)
        .init();
}
