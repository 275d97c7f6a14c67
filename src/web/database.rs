//! Database connection and introspection API handlers.
//!
//! Provides endpoints for connection management, schema crawling, and
//! model generation. Limited to MSSQL and DuckDB drivers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::{connection_hash, MetadataCache};
use crate::metadata::{
    IntrospectError, MetadataProvider, SchemaIntrospector, TableSchema, WorkerMetadataProvider,
};
use crate::model::ModelSynthesizer;
use crate::worker::WorkerClient;

use super::server::AppState;

/// Supported database drivers for introspection.
const SUPPORTED_DRIVERS: &[&str] = &["mssql", "duckdb"];

// ============================================================================
// Shared State
// ============================================================================

/// Active database connection state.
#[derive(Default)]
pub struct DatabaseConnection {
    /// The active connection configuration.
    pub config: Option<ActiveConnection>,
}

/// Configuration for an active database connection.
pub struct ActiveConnection {
    /// Database driver name.
    pub driver: String,
    /// Connection string.
    pub connection_string: String,
    /// Worker client for database operations.
    pub client: Arc<WorkerClient>,
}

/// Shared database connection state wrapped in RwLock for thread-safe access.
pub type SharedConnection = Arc<RwLock<DatabaseConnection>>;

/// Create a new shared connection state.
pub fn new_shared_connection() -> SharedConnection {
    Arc::new(RwLock::new(DatabaseConnection::default()))
}

impl ActiveConnection {
    fn provider(&self) -> WorkerMetadataProvider {
        WorkerMetadataProvider::new(
            self.client.clone(),
            &self.driver,
            &self.connection_string,
        )
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to test or set a database connection.
#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    /// Database driver: "mssql" or "duckdb".
    pub driver: String,
    /// Connection string.
    pub connection_string: String,
}

/// Response from connection test/set.
#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    /// Whether the connection was successful.
    pub success: bool,
    /// Error message if connection failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Database information if connection succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_info: Option<DatabaseInfoResponse>,
}

/// Database information returned from connection.
#[derive(Debug, Serialize)]
pub struct DatabaseInfoResponse {
    /// Database product name.
    pub product_name: String,
    /// Database version.
    pub product_version: String,
    /// Current database name.
    pub database_name: String,
}

/// Response for connection status.
#[derive(Debug, Serialize)]
pub struct ConnectionStatusResponse {
    /// Whether a connection is active.
    pub connected: bool,
    /// Current driver if connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    /// Supported drivers for introspection.
    pub supported_drivers: Vec<String>,
}

/// Query parameters for crawl and generate requests.
#[derive(Debug, Deserialize)]
pub struct SchemaQuery {
    /// LIKE-style schema pattern; defaults to the configured pattern ("%").
    pub schema: Option<String>,
}

/// Response from model generation.
#[derive(Debug, Serialize)]
pub struct GenerateModelsResponse {
    /// Whether generation was successful.
    pub success: bool,
    /// Number of models generated in this call.
    pub generated: usize,
    /// Error message if generation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Connection Handlers
// ============================================================================

/// GET /api/connection - Get connection status.
pub async fn get_connection_status(
    State(state): State<Arc<AppState>>,
) -> Json<ConnectionStatusResponse> {
    let conn = state.db_connection.read().await;

    let (connected, driver) = match &conn.config {
        Some(config) => (true, Some(config.driver.clone())),
        None => (false, None),
    };

    Json(ConnectionStatusResponse {
        connected,
        driver,
        supported_drivers: SUPPORTED_DRIVERS.iter().map(|s| s.to_string()).collect(),
    })
}

/// POST /api/connection/test - Test a database connection without storing it.
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectionRequest>,
) -> Json<ConnectionResponse> {
    if !SUPPORTED_DRIVERS.contains(&req.driver.as_str()) {
        return Json(unsupported_driver_response(&req.driver));
    }

    // Spawn worker and test connection
    match WorkerClient::spawn_with_settings(&state.settings).await {
        Ok(client) => {
            let provider =
                WorkerMetadataProvider::with_client(client, &req.driver, &req.connection_string);

            match provider.get_database_info().await {
                Ok(info) => Json(ConnectionResponse {
                    success: true,
                    error: None,
                    database_info: Some(DatabaseInfoResponse {
                        product_name: info.product_name,
                        product_version: info.product_version,
                        database_name: info.database_name,
                    }),
                }),
                Err(e) => Json(ConnectionResponse {
                    success: false,
                    error: Some(format!("Connection failed: {}", e)),
                    database_info: None,
                }),
            }
        }
        Err(e) => Json(ConnectionResponse {
            success: false,
            error: Some(format!("Failed to start worker: {}", e)),
            database_info: None,
        }),
    }
}

/// POST /api/connection - Set/update the active connection.
pub async fn set_connection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConnectionRequest>,
) -> Json<ConnectionResponse> {
    if !SUPPORTED_DRIVERS.contains(&req.driver.as_str()) {
        return Json(unsupported_driver_response(&req.driver));
    }

    // Spawn worker
    let client = match WorkerClient::spawn_with_settings(&state.settings).await {
        Ok(c) => Arc::new(c),
        Err(e) => {
            return Json(ConnectionResponse {
                success: false,
                error: Some(format!("Failed to start worker: {}", e)),
                database_info: None,
            });
        }
    };

    // Test the connection before storing it
    let provider =
        WorkerMetadataProvider::new(client.clone(), &req.driver, &req.connection_string);

    match provider.get_database_info().await {
        Ok(info) => {
            let mut conn = state.db_connection.write().await;
            conn.config = Some(ActiveConnection {
                driver: req.driver.clone(),
                connection_string: req.connection_string.clone(),
                client,
            });

            Json(ConnectionResponse {
                success: true,
                error: None,
                database_info: Some(DatabaseInfoResponse {
                    product_name: info.product_name,
                    product_version: info.product_version,
                    database_name: info.database_name,
                }),
            })
        }
        Err(e) => Json(ConnectionResponse {
            success: false,
            error: Some(format!("Connection failed: {}", e)),
            database_info: None,
        }),
    }
}

/// DELETE /api/connection - Disconnect the active connection.
pub async fn disconnect(State(state): State<Arc<AppState>>) -> StatusCode {
    let mut conn = state.db_connection.write().await;
    conn.config = None;
    StatusCode::OK
}

fn unsupported_driver_response(driver: &str) -> ConnectionResponse {
    ConnectionResponse {
        success: false,
        error: Some(format!(
            "Unsupported driver '{}'. Supported: {:?}",
            driver, SUPPORTED_DRIVERS
        )),
        database_info: None,
    }
}

// ============================================================================
// Metadata / Model Handlers
// ============================================================================

/// GET /api/metadata?schema=<pattern> - Crawl the schema and return
/// canonical table snapshots.
pub async fn crawl_metadata(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SchemaQuery>,
) -> Result<Json<Vec<TableSchema>>, (StatusCode, String)> {
    let conn = state.db_connection.read().await;
    let config = active_connection(&conn)?;
    let pattern = resolve_pattern(&state, query.schema);

    let schemas = crawl(&state, config, &pattern).await?;
    Ok(Json(schemas))
}

/// POST /api/models/generate?schema=<pattern> - Crawl the schema and
/// synthesize one model per table.
pub async fn generate_models(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SchemaQuery>,
) -> Result<Json<GenerateModelsResponse>, (StatusCode, String)> {
    let conn = state.db_connection.read().await;
    let config = active_connection(&conn)?;
    let pattern = resolve_pattern(&state, query.schema);

    let schemas = crawl(&state, config, &pattern).await?;

    let synthesizer = ModelSynthesizer::new(state.registry.clone());
    let descriptors = synthesizer.synthesize(&schemas);

    Ok(Json(GenerateModelsResponse {
        success: true,
        generated: descriptors.len(),
        error: None,
    }))
}

/// GET /api/models/list - Qualified names of every registered model.
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.registry.names())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn active_connection<'a>(
    conn: &'a tokio::sync::RwLockReadGuard<'_, DatabaseConnection>,
) -> Result<&'a ActiveConnection, (StatusCode, String)> {
    conn.config
        .as_ref()
        .ok_or((StatusCode::BAD_REQUEST, "No active connection".to_string()))
}

fn resolve_pattern(state: &AppState, schema: Option<String>) -> String {
    schema.unwrap_or_else(|| state.settings.metadata.default_pattern.clone())
}

/// Run a crawl, consulting the cache when enabled.
///
/// Cache failures are reported to stderr and otherwise ignored: a broken
/// cache must never break a crawl.
async fn crawl(
    state: &AppState,
    config: &ActiveConnection,
    pattern: &str,
) -> Result<Vec<TableSchema>, (StatusCode, String)> {
    let conn_hash = connection_hash(&config.driver, &config.connection_string);

    if state.settings.metadata.cache_enabled {
        match MetadataCache::open() {
            Ok(cache) => {
                if let Ok(Some(schemas)) = cache.get_crawl(&conn_hash, pattern) {
                    return Ok(schemas);
                }
            }
            Err(e) => eprintln!("cache: open failed: {}", e),
        }
    }

    let provider = config.provider();
    let introspector = SchemaIntrospector::new(&provider);
    let schemas = introspector
        .introspect(pattern)
        .await
        .map_err(introspect_error_response)?;

    if state.settings.metadata.cache_enabled {
        if let Ok(cache) = MetadataCache::open() {
            if let Err(e) = cache.put_crawl(&conn_hash, pattern, &schemas) {
                eprintln!("cache: store failed: {}", e);
            }
        }
    }

    Ok(schemas)
}

fn introspect_error_response(err: IntrospectError) -> (StatusCode, String) {
    let status = match err {
        IntrospectError::EmptyPattern => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
