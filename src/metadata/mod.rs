//! Metadata module: provider abstraction and schema introspection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MetadataProvider                           │
//! │  - list_tables(pattern)      raw rows, no aggregation           │
//! │  - list_columns(table)                                          │
//! │  - list_primary_keys(table)                                     │
//! │  - list_imported_keys(table)                                    │
//! │  - list_index_info(table)                                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     SchemaIntrospector                          │
//! │  rows → TableSchema (pk dedup, fk edges, index grouping)        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use schemer::metadata::{SchemaIntrospector, WorkerMetadataProvider};
//! use schemer::worker::WorkerClient;
//!
//! let client = WorkerClient::spawn("./schemer-worker").await?;
//! let provider = WorkerMetadataProvider::with_client(client, "duckdb", "./data.duckdb");
//!
//! let introspector = SchemaIntrospector::new(&provider);
//! let schemas = introspector.introspect("%").await?;
//! ```

mod introspector;
mod provider;
mod types;
mod worker_provider;

pub use introspector::{IntrospectError, SchemaIntrospector};
pub use provider::{MetadataProvider, MetadataResult};
pub use types::*;
pub use worker_provider::WorkerMetadataProvider;
