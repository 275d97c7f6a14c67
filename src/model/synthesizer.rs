//! Model synthesis: TableSchema to registered runtime types.

use std::sync::Arc;

use super::registry::ModelRegistry;
use super::types::{FieldDescriptor, ScalarKind, TypeDescriptor};
use crate::metadata::TableSchema;

/// Synthesizes a runtime type per table schema and registers it.
///
/// Synthesis never fails on well-formed schemas: field kinds fall back to
/// text for unknown SQL types, and name sanitization leaves pathological
/// names unchanged rather than rejecting them.
pub struct ModelSynthesizer {
    registry: Arc<ModelRegistry>,
}

impl ModelSynthesizer {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this synthesizer appends to.
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Synthesize one type per schema, in input order, registering each
    /// in the registry. Repeated calls append repeatedly; the registry
    /// never deduplicates.
    pub fn synthesize(&self, schemas: &[TableSchema]) -> Vec<TypeDescriptor> {
        schemas
            .iter()
            .map(|schema| {
                let descriptor = TypeDescriptor {
                    qualified_name: capitalize_first(&schema.name),
                    fields: schema
                        .columns
                        .iter()
                        .map(|column| FieldDescriptor {
                            name: decapitalize_first(&column.name),
                            kind: ScalarKind::from_sql_type(&column.sql_type),
                        })
                        .collect(),
                };
                self.registry.register(descriptor.clone());
                descriptor
            })
            .collect()
    }
}

/// Upper-case the first character. Empty strings and first characters
/// without a case mapping come back unchanged.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, same edge-case rule as
/// [`capitalize_first`].
fn decapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("user"), "User");
        assert_eq!(capitalize_first("User"), "User");
        assert_eq!(capitalize_first("order_items"), "Order_items");
    }

    #[test]
    fn test_decapitalize_first() {
        assert_eq!(decapitalize_first("ID"), "iD");
        assert_eq!(decapitalize_first("name"), "name");
    }

    #[test]
    fn test_caseless_names_unchanged() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("_private"), "_private");
        assert_eq!(capitalize_first("42nd"), "42nd");
        assert_eq!(decapitalize_first(""), "");
        assert_eq!(decapitalize_first("_x"), "_x");
    }
}
