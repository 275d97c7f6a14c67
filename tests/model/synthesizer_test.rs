//! Integration tests for model synthesis.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use schemer::metadata::{ColumnDescriptor, IndexDescriptor, TableSchema};
    use schemer::model::{FieldValue, ModelRegistry, ModelSynthesizer, ScalarKind};

    fn column(name: &str, sql_type: &str, nullable: bool) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            size: 10,
            nullable,
        }
    }

    /// The `user` table: int pk `id`, nullable varchar `name`, one unique
    /// index over `name`.
    fn user_schema() -> TableSchema {
        TableSchema {
            name: "user".to_string(),
            columns: vec![
                column("id", "INTEGER", false),
                column("name", "VARCHAR", true),
            ],
            primary_key_columns: vec!["id".to_string()],
            foreign_keys: vec![],
            indexes: vec![IndexDescriptor {
                name: "idx_name".to_string(),
                unique: true,
                columns: vec!["name".to_string()],
            }],
        }
    }

    #[test]
    fn test_synthesize_user_schema() {
        let registry = Arc::new(ModelRegistry::new());
        let synthesizer = ModelSynthesizer::new(registry.clone());

        let descriptors = synthesizer.synthesize(&[user_schema()]);

        assert_eq!(descriptors.len(), 1);
        let descriptor = &descriptors[0];
        assert_eq!(descriptor.qualified_name, "User");
        assert_eq!(descriptor.fields.len(), 2);
        assert_eq!(descriptor.fields[0].name, "id");
        assert_eq!(descriptor.fields[0].kind, ScalarKind::Integer32);
        assert_eq!(descriptor.fields[1].name, "name");
        assert_eq!(descriptor.fields[1].kind, ScalarKind::Text);

        // Retrievable by name from the registry
        let registered = registry.get_by_name("User").unwrap();
        assert_eq!(registered.descriptor.as_ref(), descriptor);
    }

    #[test]
    fn test_field_names_are_decapitalized() {
        let registry = Arc::new(ModelRegistry::new());
        let synthesizer = ModelSynthesizer::new(registry);

        let schema = TableSchema {
            name: "account".to_string(),
            columns: vec![
                column("Id", "BIGINT", false),
                column("CreatedAt", "TIMESTAMP", true),
                column("active", "BOOLEAN", false),
            ],
            primary_key_columns: vec!["Id".to_string()],
            foreign_keys: vec![],
            indexes: vec![],
        };

        let descriptors = synthesizer.synthesize(&[schema]);
        let fields = &descriptors[0].fields;
        assert_eq!(fields[0].name, "id");
        assert_eq!(fields[0].kind, ScalarKind::Integer64);
        assert_eq!(fields[1].name, "createdAt");
        assert_eq!(fields[1].kind, ScalarKind::Temporal);
        assert_eq!(fields[2].name, "active");
        assert_eq!(fields[2].kind, ScalarKind::Boolean);
    }

    #[test]
    fn test_unknown_sql_types_become_text_fields() {
        let registry = Arc::new(ModelRegistry::new());
        let synthesizer = ModelSynthesizer::new(registry);

        let schema = TableSchema {
            name: "blob_store".to_string(),
            columns: vec![column("payload", "BYTEA", true)],
            primary_key_columns: vec![],
            foreign_keys: vec![],
            indexes: vec![],
        };

        let descriptors = synthesizer.synthesize(&[schema]);
        assert_eq!(descriptors[0].fields[0].kind, ScalarKind::Text);
    }

    #[test]
    fn test_repeated_synthesis_appends_to_registry() {
        // Synthesizing the same schemas twice yields two sets of registry
        // entries; the registry never deduplicates.
        let registry = Arc::new(ModelRegistry::new());
        let synthesizer = ModelSynthesizer::new(registry.clone());

        let schemas = vec![user_schema(), user_schema()];
        synthesizer.synthesize(&schemas);
        assert_eq!(registry.len(), 2);

        synthesizer.synthesize(&schemas);
        assert_eq!(registry.len(), 4);

        assert_eq!(registry.names(), vec!["User", "User", "User", "User"]);
    }

    #[test]
    fn test_pathological_names_are_left_unchanged() {
        let registry = Arc::new(ModelRegistry::new());
        let synthesizer = ModelSynthesizer::new(registry.clone());

        let schema = TableSchema {
            name: "_audit".to_string(),
            columns: vec![column("_rev", "INTEGER", false)],
            primary_key_columns: vec![],
            foreign_keys: vec![],
            indexes: vec![],
        };

        let descriptors = synthesizer.synthesize(&[schema]);
        assert_eq!(descriptors[0].qualified_name, "_audit");
        assert_eq!(descriptors[0].fields[0].name, "_rev");
        assert!(registry.get_by_name("_audit").is_some());
    }

    #[test]
    fn test_synthesized_type_is_instantiable() {
        // End to end: synthesize, fetch the handle by name, instantiate,
        // and use typed accessors - all without the synthesizer.
        let registry = Arc::new(ModelRegistry::new());
        let synthesizer = ModelSynthesizer::new(registry.clone());
        synthesizer.synthesize(&[user_schema()]);

        let handle = registry.get_by_name("User").unwrap().handle;
        let mut record = handle.instantiate();

        record.set("id", FieldValue::Integer32(7)).unwrap();
        record
            .set("name", FieldValue::Text("ada".to_string()))
            .unwrap();

        assert_eq!(record.get("id").unwrap(), Some(&FieldValue::Integer32(7)));
        assert_eq!(
            record.get("name").unwrap(),
            Some(&FieldValue::Text("ada".to_string()))
        );

        // The handle still knows its shape
        assert_eq!(record.record_type().descriptor().fields.len(), 2);

        // Kind checking holds for synthesized types too
        assert!(record.set("id", FieldValue::Boolean(true)).is_err());
    }
}
