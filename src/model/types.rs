//! Model type descriptors and scalar kinds.

use serde::{Deserialize, Serialize};

/// Canonical, database-agnostic classification of a column's value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// Character data of any length.
    Text,
    /// 32-bit signed integer.
    Integer32,
    /// 64-bit signed integer.
    Integer64,
    /// True/false.
    Boolean,
    /// Date or timestamp.
    Temporal,
}

impl ScalarKind {
    /// Map a database-reported type name to a scalar kind.
    ///
    /// The lookup is case-insensitive and total: names outside the fixed
    /// table fall back to [`ScalarKind::Text`], so an unknown database
    /// type can never block synthesis.
    pub fn from_sql_type(sql_type: &str) -> Self {
        match sql_type.to_uppercase().as_str() {
            "VARCHAR" | "TEXT" => ScalarKind::Text,
            "INT" | "INTEGER" => ScalarKind::Integer32,
            "BIGINT" => ScalarKind::Integer64,
            "DATE" | "TIMESTAMP" => ScalarKind::Temporal,
            "BOOLEAN" => ScalarKind::Boolean,
            _ => ScalarKind::Text,
        }
    }

    /// Get the kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Text => "text",
            ScalarKind::Integer32 => "integer32",
            ScalarKind::Integer64 => "integer64",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Temporal => "temporal",
        }
    }
}

/// One field of a synthesized type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, derived from the column name.
    pub name: String,
    /// Field value kind, derived from the column's SQL type.
    pub kind: ScalarKind,
}

/// Structural description of a synthesized runtime type: a name plus an
/// ordered field list, one field per source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name, derived from the table name.
    pub qualified_name: String,
    /// Fields in source-column order.
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
