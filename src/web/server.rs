//! Axum web server for the Schemer API.
//!
//! Exposes schema crawling and model generation endpoints plus database
//! connection management.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Settings;
use crate::model::ModelRegistry;

use super::database::{self, new_shared_connection, SharedConnection};

/// Application state shared across handlers.
///
/// The model registry lives here: created when the server starts, appended
/// to by every generate call, dropped at shutdown.
pub struct AppState {
    /// Application settings.
    pub settings: Settings,
    /// Shared database connection state.
    pub db_connection: SharedConnection,
    /// Registry of every model synthesized in this process.
    pub registry: Arc<ModelRegistry>,
}

/// Build the axum router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Connection management
        .route("/api/connection", get(database::get_connection_status))
        .route("/api/connection", post(database::set_connection))
        .route("/api/connection", delete(database::disconnect))
        .route("/api/connection/test", post(database::test_connection))
        // Schema crawling and model synthesis
        .route("/api/metadata", get(database::crawl_metadata))
        .route("/api/models/generate", post(database::generate_models))
        .route("/api/models/list", get(database::list_models))
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn serve(settings: Settings, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        settings,
        db_connection: new_shared_connection(),
        registry: Arc::new(ModelRegistry::new()),
    });
    let app = router(state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("Schemer API");
    println!("   URL: http://localhost:{}", port);
    println!();
    println!("   Press Ctrl+C to stop");

    axum::serve(listener, app).await?;
    Ok(())
}
