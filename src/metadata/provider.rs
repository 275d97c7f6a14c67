//! MetadataProvider trait definition.
//!
//! The MetadataProvider trait abstracts over different ways of fetching
//! raw database metadata rows. The primary implementation uses the
//! WorkerClient for async RPC calls to the worker process; tests supply
//! in-memory fakes.

use async_trait::async_trait;

use super::types::*;
use crate::worker::WorkerError;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, WorkerError>;

/// Trait for fetching raw database metadata.
///
/// Every method returns row-level facts exactly as the data source reports
/// them — no aggregation, no deduplication. The introspector owns all
/// row-to-schema shaping.
///
/// # Example
///
/// ```ignore
/// use schemer::metadata::MetadataProvider;
///
/// async fn example(provider: &impl MetadataProvider) -> MetadataResult<()> {
///     let tables = provider.list_tables("%").await?;
///     for table in &tables {
///         let columns = provider.list_columns(&table.name).await?;
///         let indexes = provider.list_index_info(&table.name).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// List tables visible to the connection, filtered by a SQL LIKE-style
    /// schema pattern (`%` = everything).
    async fn list_tables(&self, schema_pattern: &str) -> MetadataResult<Vec<TableRow>>;

    /// List a table's columns in driver-reported ordinal order.
    async fn list_columns(&self, table: &str) -> MetadataResult<Vec<ColumnRow>>;

    /// List a table's primary-key rows, one row per member column.
    async fn list_primary_keys(&self, table: &str) -> MetadataResult<Vec<PrimaryKeyRow>>;

    /// List a table's imported-key rows, one row per foreign-key column pair.
    async fn list_imported_keys(&self, table: &str) -> MetadataResult<Vec<ImportedKeyRow>>;

    /// List a table's index rows, one row per (index, member column).
    ///
    /// Statistics rows carry no index name and must be passed through
    /// unfiltered; skipping them is the introspector's job.
    async fn list_index_info(&self, table: &str) -> MetadataResult<Vec<IndexRow>>;

    /// Get database product information.
    async fn get_database_info(&self) -> MetadataResult<DatabaseInfo>;
}
