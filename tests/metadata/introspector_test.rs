//! Integration tests for schema introspection.
//!
//! These tests drive the introspector with an in-memory fake provider to
//! verify the row-to-schema aggregation rules.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use schemer::metadata::{
        ColumnRow, DatabaseInfo, ImportedKeyRow, IndexRow, IntrospectError, MetadataProvider,
        MetadataResult, PrimaryKeyRow, SchemaIntrospector, TableRow,
    };
    use schemer::worker::WorkerError;

    /// In-memory provider serving canned metadata rows.
    #[derive(Default)]
    struct FakeProvider {
        tables: Vec<TableRow>,
        columns: HashMap<String, Vec<ColumnRow>>,
        primary_keys: HashMap<String, Vec<PrimaryKeyRow>>,
        imported_keys: HashMap<String, Vec<ImportedKeyRow>>,
        index_info: HashMap<String, Vec<IndexRow>>,
        /// When set, index-info fetches for this table fail.
        fail_index_info_for: Option<String>,
    }

    impl FakeProvider {
        fn with_table(mut self, name: &str) -> Self {
            self.tables.push(TableRow {
                name: name.to_string(),
            });
            self
        }
    }

    fn column(name: &str, type_name: &str, nullable: bool) -> ColumnRow {
        ColumnRow {
            name: name.to_string(),
            type_name: type_name.to_string(),
            size: 10,
            nullable,
        }
    }

    fn index_row(name: Option<&str>, non_unique: bool, column: &str) -> IndexRow {
        IndexRow {
            name: name.map(|s| s.to_string()),
            non_unique,
            column: column.to_string(),
        }
    }

    #[async_trait]
    impl MetadataProvider for FakeProvider {
        async fn list_tables(&self, _schema_pattern: &str) -> MetadataResult<Vec<TableRow>> {
            Ok(self.tables.clone())
        }

        async fn list_columns(&self, table: &str) -> MetadataResult<Vec<ColumnRow>> {
            Ok(self.columns.get(table).cloned().unwrap_or_default())
        }

        async fn list_primary_keys(&self, table: &str) -> MetadataResult<Vec<PrimaryKeyRow>> {
            Ok(self.primary_keys.get(table).cloned().unwrap_or_default())
        }

        async fn list_imported_keys(&self, table: &str) -> MetadataResult<Vec<ImportedKeyRow>> {
            Ok(self.imported_keys.get(table).cloned().unwrap_or_default())
        }

        async fn list_index_info(&self, table: &str) -> MetadataResult<Vec<IndexRow>> {
            if self.fail_index_info_for.as_deref() == Some(table) {
                return Err(WorkerError::ConnectionFailed(
                    "connection lost".to_string(),
                ));
            }
            Ok(self.index_info.get(table).cloned().unwrap_or_default())
        }

        async fn get_database_info(&self) -> MetadataResult<DatabaseInfo> {
            Ok(DatabaseInfo {
                product_name: "FakeDB".to_string(),
                product_version: "1.0".to_string(),
                database_name: "test".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_crawl_single_table() {
        // Table `user` with an int pk, a nullable name column, and one
        // unique index over name.
        let mut provider = FakeProvider::default().with_table("user");
        provider.columns.insert(
            "user".to_string(),
            vec![
                column("id", "INTEGER", false),
                column("name", "VARCHAR", true),
            ],
        );
        provider.primary_keys.insert(
            "user".to_string(),
            vec![PrimaryKeyRow {
                column: "id".to_string(),
            }],
        );
        provider.index_info.insert(
            "user".to_string(),
            vec![index_row(Some("idx_name"), false, "name")],
        );

        let introspector = SchemaIntrospector::new(&provider);
        let schemas = introspector.introspect("%").await.unwrap();

        assert_eq!(schemas.len(), 1);
        let schema = &schemas[0];
        assert_eq!(schema.name, "user");

        assert_eq!(schema.columns.len(), 2);
        assert_eq!(schema.columns[0].name, "id");
        assert_eq!(schema.columns[0].sql_type, "INTEGER");
        assert!(!schema.columns[0].nullable);
        assert_eq!(schema.columns[1].name, "name");
        assert_eq!(schema.columns[1].sql_type, "VARCHAR");
        assert!(schema.columns[1].nullable);

        assert_eq!(schema.primary_key_columns, vec!["id"]);
        assert!(schema.foreign_keys.is_empty());

        assert_eq!(schema.indexes.len(), 1);
        let index = &schema.indexes[0];
        assert_eq!(index.name, "idx_name");
        assert!(index.unique);
        assert_eq!(index.columns, vec!["name"]);
    }

    #[tokio::test]
    async fn test_index_rows_group_by_name_in_arrival_order() {
        // Rows for idx_ab arrive non-contiguously, with a row for another
        // index in between. The grouping must keep arrival order within
        // idx_ab, not alphabetical order.
        let mut provider = FakeProvider::default().with_table("t");
        provider.columns.insert(
            "t".to_string(),
            vec![
                column("a", "INTEGER", false),
                column("b", "INTEGER", false),
                column("x", "INTEGER", false),
            ],
        );
        provider.index_info.insert(
            "t".to_string(),
            vec![
                index_row(Some("idx_ab"), true, "b"),
                index_row(Some("idx_x"), false, "x"),
                index_row(Some("idx_ab"), true, "a"),
            ],
        );

        let introspector = SchemaIntrospector::new(&provider);
        let schemas = introspector.introspect("%").await.unwrap();

        let indexes = &schemas[0].indexes;
        assert_eq!(indexes.len(), 2);

        let idx_ab = indexes.iter().find(|i| i.name == "idx_ab").unwrap();
        assert_eq!(idx_ab.columns, vec!["b", "a"]);
        assert!(!idx_ab.unique);

        let idx_x = indexes.iter().find(|i| i.name == "idx_x").unwrap();
        assert_eq!(idx_x.columns, vec!["x"]);
        assert!(idx_x.unique);
    }

    #[tokio::test]
    async fn test_unnamed_index_rows_are_skipped() {
        // Rows without an index name are table statistics; they produce
        // no descriptor and no error.
        let mut provider = FakeProvider::default().with_table("t");
        provider
            .columns
            .insert("t".to_string(), vec![column("a", "INTEGER", false)]);
        provider.index_info.insert(
            "t".to_string(),
            vec![
                index_row(None, true, "a"),
                index_row(Some("idx_a"), true, "a"),
                index_row(None, true, "a"),
            ],
        );

        let introspector = SchemaIntrospector::new(&provider);
        let schemas = introspector.introspect("%").await.unwrap();

        assert_eq!(schemas[0].indexes.len(), 1);
        assert_eq!(schemas[0].indexes[0].name, "idx_a");
    }

    #[tokio::test]
    async fn test_column_rows_are_never_deduplicated() {
        let mut provider = FakeProvider::default().with_table("t");
        provider.columns.insert(
            "t".to_string(),
            vec![
                column("a", "INTEGER", false),
                column("a", "INTEGER", false),
                column("b", "TEXT", true),
            ],
        );

        let introspector = SchemaIntrospector::new(&provider);
        let schemas = introspector.introspect("%").await.unwrap();

        // One descriptor per row, even for a repeated name.
        assert_eq!(schemas[0].columns.len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_primary_key_rows_deduplicate() {
        let mut provider = FakeProvider::default().with_table("t");
        provider
            .columns
            .insert("t".to_string(), vec![column("a", "INTEGER", false)]);
        provider.primary_keys.insert(
            "t".to_string(),
            vec![
                PrimaryKeyRow {
                    column: "a".to_string(),
                },
                PrimaryKeyRow {
                    column: "b".to_string(),
                },
                PrimaryKeyRow {
                    column: "a".to_string(),
                },
            ],
        );

        let introspector = SchemaIntrospector::new(&provider);
        let schemas = introspector.introspect("%").await.unwrap();

        assert_eq!(schemas[0].primary_key_columns, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_composite_foreign_keys_stay_separate_edges() {
        let mut provider = FakeProvider::default().with_table("order_item");
        provider.columns.insert(
            "order_item".to_string(),
            vec![
                column("order_id", "BIGINT", false),
                column("line_no", "INTEGER", false),
            ],
        );
        provider.imported_keys.insert(
            "order_item".to_string(),
            vec![
                ImportedKeyRow {
                    pk_table: "order".to_string(),
                    pk_column: "id".to_string(),
                    fk_table: "order_item".to_string(),
                    fk_column: "order_id".to_string(),
                },
                ImportedKeyRow {
                    pk_table: "order".to_string(),
                    pk_column: "line_no".to_string(),
                    fk_table: "order_item".to_string(),
                    fk_column: "line_no".to_string(),
                },
            ],
        );

        let introspector = SchemaIntrospector::new(&provider);
        let schemas = introspector.introspect("%").await.unwrap();

        let fks = &schemas[0].foreign_keys;
        assert_eq!(fks.len(), 2);
        assert_eq!(fks[0].referenced_table, "order");
        assert_eq!(fks[0].referenced_column, "id");
        assert_eq!(fks[0].owning_table, "order_item");
        assert_eq!(fks[0].owning_column, "order_id");
        assert_eq!(fks[1].referenced_column, "line_no");
    }

    #[tokio::test]
    async fn test_empty_pattern_is_rejected() {
        let provider = FakeProvider::default();
        let introspector = SchemaIntrospector::new(&provider);

        let err = introspector.introspect("").await.unwrap_err();
        assert!(matches!(err, IntrospectError::EmptyPattern));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_whole_crawl() {
        // Two tables; the second one fails its index fetch. The whole
        // crawl must fail - no partial result containing the first table.
        let mut provider = FakeProvider::default().with_table("good").with_table("bad");
        provider
            .columns
            .insert("good".to_string(), vec![column("a", "INTEGER", false)]);
        provider
            .columns
            .insert("bad".to_string(), vec![column("b", "INTEGER", false)]);
        provider.fail_index_info_for = Some("bad".to_string());

        let introspector = SchemaIntrospector::new(&provider);
        let err = introspector.introspect("%").await.unwrap_err();

        match err {
            IntrospectError::Fetch { table, source } => {
                assert_eq!(table, "bad");
                assert!(matches!(source, WorkerError::ConnectionFailed(_)));
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_table_order_follows_data_source() {
        let mut provider = FakeProvider::default()
            .with_table("zeta")
            .with_table("alpha");
        provider
            .columns
            .insert("zeta".to_string(), vec![column("a", "INTEGER", false)]);
        provider
            .columns
            .insert("alpha".to_string(), vec![column("a", "INTEGER", false)]);

        let introspector = SchemaIntrospector::new(&provider);
        let schemas = introspector.introspect("%").await.unwrap();

        let names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
