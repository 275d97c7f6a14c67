//! Model synthesis: runtime types from introspected schemas.
//!
//! Given the canonical [`TableSchema`](crate::metadata::TableSchema)
//! snapshots, the [`ModelSynthesizer`] derives a [`TypeDescriptor`] per
//! table (typed fields, sanitized names) and registers a loaded
//! [`RecordType`] handle for each in the [`ModelRegistry`]. Handles
//! instantiate [`DynRecord`]s — generic records with kind-checked
//! get/set access by field name.

mod record;
mod registry;
mod synthesizer;
pub mod types;

pub use record::{AccessError, DynRecord, FieldValue, RecordType};
pub use registry::{ModelRegistry, RegisteredModel};
pub use synthesizer::ModelSynthesizer;
pub use types::{FieldDescriptor, ScalarKind, TypeDescriptor};
