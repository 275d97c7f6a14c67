//! Integration tests for the model registry.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use schemer::model::types::{FieldDescriptor, TypeDescriptor};
    use schemer::model::{ModelRegistry, ScalarKind};

    fn descriptor(name: &str) -> TypeDescriptor {
        TypeDescriptor {
            qualified_name: name.to_string(),
            fields: vec![FieldDescriptor {
                name: "id".to_string(),
                kind: ScalarKind::Integer64,
            }],
        }
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = ModelRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get_by_name("User").is_none());
        assert!(registry.get(0).is_none());
    }

    #[test]
    fn test_lookup_by_name_and_position() {
        let registry = ModelRegistry::new();
        registry.register(descriptor("User"));
        registry.register(descriptor("Order"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["User", "Order"]);

        let user = registry.get_by_name("User").unwrap();
        assert_eq!(user.descriptor.qualified_name, "User");

        let by_pos = registry.get(1).unwrap();
        assert_eq!(by_pos.descriptor.qualified_name, "Order");
    }

    #[test]
    fn test_duplicate_names_latest_wins_on_lookup() {
        let registry = ModelRegistry::new();
        registry.register(descriptor("User"));

        let mut second = descriptor("User");
        second.fields.push(FieldDescriptor {
            name: "email".to_string(),
            kind: ScalarKind::Text,
        });
        registry.register(second);

        // Both registrations are retained...
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().descriptor.fields.len(), 1);

        // ...but name lookup resolves to the latest one.
        let latest = registry.get_by_name("User").unwrap();
        assert_eq!(latest.descriptor.fields.len(), 2);
    }

    #[test]
    fn test_handle_outlives_registry_lock() {
        // A handle fetched from the registry keeps working with no
        // further registry involvement.
        let registry = ModelRegistry::new();
        registry.register(descriptor("User"));

        let handle = registry.get_by_name("User").unwrap().handle;
        let record = handle.instantiate();
        assert_eq!(record.get("id").unwrap(), None);
    }

    #[test]
    fn test_concurrent_appends() {
        // Appends from multiple threads all land; no reader ever sees a
        // registered-but-unqueryable entry.
        let registry = Arc::new(ModelRegistry::new());
        let mut handles = Vec::new();

        for t in 0..4 {
            let registry = registry.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    let name = format!("Type{}_{}", t, i);
                    registry.register(descriptor(&name));
                    assert!(registry.get_by_name(&name).is_some());
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 200);
    }
}
