//! # Schemer
//!
//! A database schema crawler and runtime model synthesizer.
//!
//! ## Architecture
//!
//! Schemer introspects a live database's structure and synthesizes typed
//! runtime models from what it finds:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              Database (via worker process)               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [metadata provider]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Raw metadata rows (columns, keys, indexes)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [introspector]
//! ┌─────────────────────────────────────────────────────────┐
//! │              TableSchema (canonical snapshot)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [synthesizer]
//! ┌─────────────────────────────────────────────────────────┐
//! │       TypeDescriptor + RecordType (model registry)       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Crawl and synthesis are exposed over an HTTP API (see [`web`]) and a
//! CLI (`schemer crawl` / `schemer generate` / `schemer serve`).

pub mod cache;
pub mod config;
pub mod metadata;
pub mod model;
pub mod web;
pub mod worker;

// Re-export the core types at crate root for convenience
pub use metadata::{
    ColumnDescriptor, ForeignKeyEdge, IndexDescriptor, IntrospectError, MetadataProvider,
    SchemaIntrospector, TableSchema, WorkerMetadataProvider,
};
pub use model::{
    DynRecord, FieldValue, ModelRegistry, ModelSynthesizer, RecordType, ScalarKind,
    TypeDescriptor,
};
