//! WorkerMetadataProvider implementation.
//!
//! The primary MetadataProvider implementation, backed by async RPC calls
//! to the worker process.

use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{MetadataProvider, MetadataResult};
use super::types::*;
use crate::worker::protocol::{self, methods, ConnectionParams};
use crate::worker::WorkerClient;

/// MetadataProvider implementation that uses the WorkerClient.
///
/// # Example
///
/// ```ignore
/// use schemer::worker::WorkerClient;
/// use schemer::metadata::WorkerMetadataProvider;
///
/// let client = WorkerClient::spawn("./schemer-worker").await?;
/// let provider = WorkerMetadataProvider::with_client(
///     client,
///     "duckdb",
///     "./data.duckdb",
/// );
///
/// let tables = provider.list_tables("%").await?;
/// ```
pub struct WorkerMetadataProvider {
    /// The worker client for RPC calls.
    client: Arc<WorkerClient>,
    /// Cached connection parameters to avoid repeated allocations.
    connection: ConnectionParams,
}

impl WorkerMetadataProvider {
    /// Create a new WorkerMetadataProvider.
    ///
    /// # Arguments
    ///
    /// * `client` - The worker client (shared reference).
    /// * `driver` - Database driver name (e.g., "duckdb", "mssql").
    /// * `connection_string` - Driver-specific connection string.
    pub fn new(
        client: Arc<WorkerClient>,
        driver: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            client,
            connection: ConnectionParams {
                driver: driver.into(),
                connection_string: connection_string.into(),
            },
        }
    }

    /// Create a new WorkerMetadataProvider with an owned client.
    pub fn with_client(
        client: WorkerClient,
        driver: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self::new(Arc::new(client), driver, connection_string)
    }

    /// Get the connection parameters for requests.
    #[inline]
    fn connection_params(&self) -> ConnectionParams {
        self.connection.clone()
    }

    /// Get the driver name.
    pub fn driver(&self) -> &str {
        &self.connection.driver
    }

    /// Get the connection string.
    pub fn connection_string(&self) -> &str {
        &self.connection.connection_string
    }

    /// Build the per-table request parameters.
    fn table_params(&self, table: &str) -> protocol::TableParams {
        protocol::TableParams {
            connection: self.connection_params(),
            table: table.to_string(),
        }
    }
}

#[async_trait]
impl MetadataProvider for WorkerMetadataProvider {
    async fn list_tables(&self, schema_pattern: &str) -> MetadataResult<Vec<TableRow>> {
        let response: protocol::ListTablesResponse = self
            .client
            .request(
                methods::LIST_TABLES,
                protocol::ListTablesParams {
                    connection: self.connection_params(),
                    schema_pattern: schema_pattern.to_string(),
                },
            )
            .await?;

        Ok(response.tables.into_iter().map(Into::into).collect())
    }

    async fn list_columns(&self, table: &str) -> MetadataResult<Vec<ColumnRow>> {
        let response: protocol::GetColumnsResponse = self
            .client
            .request(methods::GET_COLUMNS, self.table_params(table))
            .await?;

        Ok(response.columns.into_iter().map(Into::into).collect())
    }

    async fn list_primary_keys(&self, table: &str) -> MetadataResult<Vec<PrimaryKeyRow>> {
        let response: protocol::GetPrimaryKeysResponse = self
            .client
            .request(methods::GET_PRIMARY_KEYS, self.table_params(table))
            .await?;

        Ok(response.primary_keys.into_iter().map(Into::into).collect())
    }

    async fn list_imported_keys(&self, table: &str) -> MetadataResult<Vec<ImportedKeyRow>> {
        let response: protocol::GetImportedKeysResponse = self
            .client
            .request(methods::GET_IMPORTED_KEYS, self.table_params(table))
            .await?;

        Ok(response.imported_keys.into_iter().map(Into::into).collect())
    }

    async fn list_index_info(&self, table: &str) -> MetadataResult<Vec<IndexRow>> {
        let response: protocol::GetIndexInfoResponse = self
            .client
            .request(methods::GET_INDEX_INFO, self.table_params(table))
            .await?;

        Ok(response.index_info.into_iter().map(Into::into).collect())
    }

    async fn get_database_info(&self) -> MetadataResult<DatabaseInfo> {
        let response: protocol::GetDatabaseInfoResponse = self
            .client
            .request(
                methods::GET_DATABASE_INFO,
                protocol::GetDatabaseInfoParams {
                    connection: self.connection_params(),
                },
            )
            .await?;

        Ok(response.database.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_is_send_sync() {
        fn _assert_provider_is_send_sync<T: Send + Sync>() {}
        _assert_provider_is_send_sync::<WorkerMetadataProvider>();
    }

    #[test]
    fn test_connection_params() {
        let params = ConnectionParams {
            driver: "duckdb".to_string(),
            connection_string: "./test.db".to_string(),
        };

        let cloned = params.clone();
        assert_eq!(cloned.driver, "duckdb");
        assert_eq!(cloned.connection_string, "./test.db");
    }
}
