//! Protocol types for worker communication.
//!
//! The worker speaks NDJSON over stdin/stdout: one request or response
//! envelope per line. Metadata methods return raw row-level facts exactly
//! as the driver reports them; all aggregation happens on the Rust side.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Envelope
// ============================================================================

/// Request envelope sent to the worker.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: String,
    /// Method name (e.g., "metadata.list_tables").
    pub method: String,
    /// Method-specific parameters.
    pub params: serde_json::Value,
}

/// Response envelope received from the worker.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to.
    pub id: String,
    /// Whether the request succeeded.
    pub success: bool,
    /// Result data (present if success = true).
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error information (present if success = false).
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Error information in a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

// ============================================================================
// Connection Parameters (included in all requests)
// ============================================================================

/// Database connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Database driver name (e.g., "duckdb", "mssql").
    pub driver: String,
    /// Driver-specific connection string.
    pub connection_string: String,
}

// ============================================================================
// Method Names
// ============================================================================

/// Worker method names.
pub mod methods {
    pub const LIST_TABLES: &str = "metadata.list_tables";
    pub const GET_COLUMNS: &str = "metadata.get_columns";
    pub const GET_PRIMARY_KEYS: &str = "metadata.get_primary_keys";
    pub const GET_IMPORTED_KEYS: &str = "metadata.get_imported_keys";
    pub const GET_INDEX_INFO: &str = "metadata.get_index_info";
    pub const GET_DATABASE_INFO: &str = "metadata.get_database_info";
}

// ============================================================================
// Metadata Request Parameters
// ============================================================================

/// Parameters for `metadata.list_tables`.
#[derive(Debug, Clone, Serialize)]
pub struct ListTablesParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// LIKE-style pattern selecting which tables are visible ("%" = all).
    pub schema_pattern: String,
}

/// Parameters for the per-table metadata methods (`metadata.get_columns`,
/// `get_primary_keys`, `get_imported_keys`, `get_index_info`).
#[derive(Debug, Clone, Serialize)]
pub struct TableParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    /// Table name.
    pub table: String,
}

/// Parameters for `metadata.get_database_info`.
#[derive(Debug, Clone, Serialize)]
pub struct GetDatabaseInfoParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
}

// ============================================================================
// Metadata Response Rows
// ============================================================================

/// One table discovered by `metadata.list_tables`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Table name, case as reported by the driver.
    pub name: String,
}

/// One column row from `metadata.get_columns`.
///
/// Column order in the response is the driver-reported ordinal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRow {
    /// Column name, case as reported.
    pub name: String,
    /// Database-reported type name (e.g., "VARCHAR", "BIGINT").
    pub type_name: String,
    /// Column size; meaning is driver-dependent.
    pub size: u32,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

/// One primary-key row from `metadata.get_primary_keys`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryKeyRow {
    /// Name of a column participating in the primary key.
    pub column: String,
}

/// One imported-key row from `metadata.get_imported_keys`.
///
/// Composite foreign keys arrive as multiple rows, one per column pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedKeyRow {
    /// Referenced (primary-key side) table.
    pub pk_table: String,
    /// Referenced column.
    pub pk_column: String,
    /// Owning (foreign-key side) table.
    pub fk_table: String,
    /// Owning column.
    pub fk_column: String,
}

/// One index row from `metadata.get_index_info`.
///
/// Each row names one member column of one index. Rows with a null index
/// name are table statistics, not indexes. Rows for the same index are not
/// guaranteed to arrive contiguously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRow {
    /// Index name; absent for statistics rows.
    #[serde(default)]
    pub name: Option<String>,
    /// True when the index permits duplicate values.
    pub non_unique: bool,
    /// Member column this row describes.
    pub column: String,
}

/// Response for `metadata.list_tables`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListTablesResponse {
    pub tables: Vec<TableRow>,
}

/// Response for `metadata.get_columns`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetColumnsResponse {
    pub columns: Vec<ColumnRow>,
}

/// Response for `metadata.get_primary_keys`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetPrimaryKeysResponse {
    pub primary_keys: Vec<PrimaryKeyRow>,
}

/// Response for `metadata.get_imported_keys`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetImportedKeysResponse {
    pub imported_keys: Vec<ImportedKeyRow>,
}

/// Response for `metadata.get_index_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetIndexInfoResponse {
    pub index_info: Vec<IndexRow>,
}

/// Database information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Database product name.
    pub product_name: String,
    /// Database version.
    pub product_version: String,
    /// Current database name.
    pub database_name: String,
}

/// Response for `metadata.get_database_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetDatabaseInfoResponse {
    pub database: DatabaseInfo,
}
