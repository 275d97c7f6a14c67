//! Schema introspection: raw metadata rows to canonical TableSchema.

use indexmap::map::Entry;
use indexmap::IndexMap;
use thiserror::Error;

use super::provider::MetadataProvider;
use super::types::{ColumnDescriptor, ForeignKeyEdge, IndexDescriptor, TableSchema};
use crate::worker::WorkerError;

/// Errors that can occur during schema introspection.
#[derive(Debug, Error)]
pub enum IntrospectError {
    /// The schema pattern was empty. Use "%" to crawl everything.
    #[error("schema pattern must not be empty")]
    EmptyPattern,

    /// Listing tables failed before any table was crawled.
    #[error("failed to list tables: {0}")]
    ListTables(#[source] WorkerError),

    /// A metadata fetch failed while crawling one table. The whole crawl
    /// is aborted; no partial results are returned.
    #[error("metadata fetch failed for table '{table}': {source}")]
    Fetch {
        table: String,
        #[source]
        source: WorkerError,
    },
}

/// Aggregates raw metadata rows into canonical [`TableSchema`] snapshots.
///
/// The introspector is read-only and holds no state between calls; every
/// `introspect` call produces a fresh set of snapshots from whatever the
/// provider reports at that moment.
pub struct SchemaIntrospector<'a> {
    provider: &'a dyn MetadataProvider,
}

impl<'a> SchemaIntrospector<'a> {
    pub fn new(provider: &'a dyn MetadataProvider) -> Self {
        Self { provider }
    }

    /// Crawl every table matching `schema_pattern` (SQL LIKE syntax, "%"
    /// for all) and return one [`TableSchema`] per table, in the order the
    /// data source reported them.
    ///
    /// # Errors
    ///
    /// Fails on an empty pattern, and on any metadata-fetch failure for
    /// any table — introspection has no partial-success mode.
    pub async fn introspect(
        &self,
        schema_pattern: &str,
    ) -> Result<Vec<TableSchema>, IntrospectError> {
        if schema_pattern.is_empty() {
            return Err(IntrospectError::EmptyPattern);
        }

        let tables = self
            .provider
            .list_tables(schema_pattern)
            .await
            .map_err(IntrospectError::ListTables)?;

        let mut schemas = Vec::with_capacity(tables.len());
        for table in tables {
            let schema = self
                .introspect_table(&table.name)
                .await
                .map_err(|source| IntrospectError::Fetch {
                    table: table.name.clone(),
                    source,
                })?;
            schemas.push(schema);
        }

        Ok(schemas)
    }

    /// Crawl a single table.
    async fn introspect_table(&self, table: &str) -> Result<TableSchema, WorkerError> {
        let columns = self
            .provider
            .list_columns(table)
            .await?
            .into_iter()
            .map(|row| ColumnDescriptor {
                name: row.name,
                sql_type: row.type_name,
                size: row.size,
                nullable: row.nullable,
            })
            .collect();

        // Some drivers report a pk column once per index it participates
        // in; dedup without error, keeping first-seen order.
        let mut primary_key_columns: Vec<String> = Vec::new();
        for row in self.provider.list_primary_keys(table).await? {
            if !primary_key_columns.contains(&row.column) {
                primary_key_columns.push(row.column);
            }
        }

        // One edge per row, verbatim. Composite keys stay as multiple
        // edges sharing a table pair.
        let foreign_keys = self
            .provider
            .list_imported_keys(table)
            .await?
            .into_iter()
            .map(|row| ForeignKeyEdge {
                referenced_table: row.pk_table,
                referenced_column: row.pk_column,
                owning_table: row.fk_table,
                owning_column: row.fk_column,
            })
            .collect();

        // Index rows arrive one per member column and are not guaranteed
        // contiguous per index, so group by name: first row for a name
        // fixes the uniqueness flag, every row appends its column.
        let mut index_map: IndexMap<String, IndexDescriptor> = IndexMap::new();
        for row in self.provider.list_index_info(table).await? {
            let Some(name) = row.name else {
                // Unnamed rows are table statistics, not indexes.
                continue;
            };

            let index = match index_map.entry(name) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let descriptor = IndexDescriptor {
                        name: entry.key().clone(),
                        unique: !row.non_unique,
                        columns: Vec::new(),
                    };
                    entry.insert(descriptor)
                }
            };
            index.columns.push(row.column);
        }

        Ok(TableSchema {
            name: table.to_string(),
            columns,
            primary_key_columns,
            foreign_keys,
            indexes: index_map.into_values().collect(),
        })
    }
}
