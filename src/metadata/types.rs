//! Metadata types: raw rows and canonical schema snapshots.
//!
//! Raw row types mirror the worker protocol one-to-one and carry exactly
//! what the driver reports, row by row. Snapshot types are the canonical,
//! aggregated representation produced by the introspector; they are
//! read-only once constructed and their serialized shape is the wire
//! contract exposed to API callers.

use serde::{Deserialize, Serialize};

use crate::worker::protocol;

// ============================================================================
// Raw Metadata Rows
// ============================================================================

/// One discovered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Table name, case as reported by the driver.
    pub name: String,
}

/// One raw column row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    /// Column name, case as reported.
    pub name: String,
    /// Database-reported type name.
    pub type_name: String,
    /// Column size; meaning is driver-dependent.
    pub size: u32,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

/// One raw primary-key row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyRow {
    /// Name of a column participating in the primary key.
    pub column: String,
}

/// One raw imported-key (foreign-key) row.
///
/// Composite keys arrive as multiple rows, one per column pair.
#[derive(Debug, Clone, PartialEq, Eq)]
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

/// One raw index row, naming one member column of one index.
///
/// Rows with no index name are table statistics, not indexes. Rows for the
/// same index are not guaranteed to arrive contiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    /// Index name; `None` for statistics rows.
    pub name: Option<String>,
    /// True when the index permits duplicate values.
    pub non_unique: bool,
    /// Member column this row describes.
    pub column: String,
}

/// Database product information.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseInfo {
    /// Database product name.
    pub product_name: String,
    /// Database version.
    pub product_version: String,
    /// Current database name.
    pub database_name: String,
}

impl From<protocol::TableRow> for TableRow {
    fn from(row: protocol::TableRow) -> Self {
        Self { name: row.name }
    }
}

impl From<protocol::ColumnRow> for ColumnRow {
    fn from(row: protocol::ColumnRow) -> Self {
        Self {
            name: row.name,
            type_name: row.type_name,
            size: row.size,
            nullable: row.nullable,
        }
    }
}

impl From<protocol::PrimaryKeyRow> for PrimaryKeyRow {
    fn from(row: protocol::PrimaryKeyRow) -> Self {
        Self { column: row.column }
    }
}

impl From<protocol::ImportedKeyRow> for ImportedKeyRow {
    fn from(row: protocol::ImportedKeyRow) -> Self {
        Self {
            pk_table: row.pk_table,
            pk_column: row.pk_column,
            fk_table: row.fk_table,
            fk_column: row.fk_column,
        }
    }
}

impl From<protocol::IndexRow> for IndexRow {
    fn from(row: protocol::IndexRow) -> Self {
        Self {
            name: row.name,
            non_unique: row.non_unique,
            column: row.column,
        }
    }
}

impl From<protocol::DatabaseInfo> for DatabaseInfo {
    fn from(info: protocol::DatabaseInfo) -> Self {
        Self {
            product_name: info.product_name,
            product_version: info.product_version,
            database_name: info.database_name,
        }
    }
}

// ============================================================================
// Canonical Schema Snapshots
// ============================================================================

/// A column of an introspected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, case as returned by the data source.
    pub name: String,
    /// Database-reported type name.
    pub sql_type: String,
    /// Column size; meaning is driver-dependent.
    pub size: u32,
    /// Whether the column accepts NULL.
    pub nullable: bool,
}

/// A directed foreign-key edge: the owning table's column references the
/// referenced table's column.
///
/// Composite keys produce multiple edges sharing a table pair, mirroring
/// the per-row metadata; edges are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyEdge {
    /// Table on the referenced (primary-key) side.
    pub referenced_table: String,
    /// Column on the referenced side.
    pub referenced_column: String,
    /// Table owning the foreign key.
    pub owning_table: String,
    /// Column owning the foreign key.
    pub owning_column: String,
}

/// A complete index, aggregated from its per-column rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Index name. Always present; unnamed rows never produce a descriptor.
    pub name: String,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Member columns in first-seen row-arrival order.
    pub columns: Vec<String>,
}

/// Canonical snapshot of one table's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name, case as reported.
    pub name: String,
    /// Columns in driver-reported order.
    pub columns: Vec<ColumnDescriptor>,
    /// Primary-key column names, deduplicated, source order preserved.
    pub primary_key_columns: Vec<String>,
    /// Foreign-key edges owned by this table.
    pub foreign_keys: Vec<ForeignKeyEdge>,
    /// Indexes, one per distinct index name.
    pub indexes: Vec<IndexDescriptor>,
}

impl TableSchema {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether the named column is part of the primary key.
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key_columns.iter().any(|pk| pk == column)
    }
}
