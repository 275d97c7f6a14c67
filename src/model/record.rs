//! Interpreted runtime records.
//!
//! A synthesized type is represented by a [`RecordType`] handle wrapping
//! its [`TypeDescriptor`]. The handle can instantiate [`DynRecord`]s —
//! plain structural records with get/set access by field name, checked
//! against the descriptor's field kinds. New named types therefore exist
//! at runtime as soon as a schema has been observed, without any code
//! generation step.

use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;

use super::types::{FieldDescriptor, ScalarKind, TypeDescriptor};

/// A field's boxed value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer32(i32),
    Integer64(i64),
    Boolean(bool),
    Temporal(NaiveDateTime),
}

impl FieldValue {
    /// The scalar kind this value belongs to.
    pub fn kind(&self) -> ScalarKind {
        match self {
            FieldValue::Text(_) => ScalarKind::Text,
            FieldValue::Integer32(_) => ScalarKind::Integer32,
            FieldValue::Integer64(_) => ScalarKind::Integer64,
            FieldValue::Boolean(_) => ScalarKind::Boolean,
            FieldValue::Temporal(_) => ScalarKind::Temporal,
        }
    }
}

/// Errors from record field access.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The record's type has no field with the given name.
    #[error("type '{type_name}' has no field named '{field}'")]
    NoSuchField { type_name: String, field: String },

    /// The assigned value's kind does not match the field's declared kind.
    #[error("field '{field}' holds {expected:?}, cannot assign {actual:?}")]
    KindMismatch {
        field: String,
        expected: ScalarKind,
        actual: ScalarKind,
    },
}

/// A loaded runtime type: the instantiable handle registered for every
/// synthesized [`TypeDescriptor`].
///
/// Cloning is cheap; all clones share one descriptor.
#[derive(Debug, Clone)]
pub struct RecordType {
    descriptor: Arc<TypeDescriptor>,
}

impl RecordType {
    pub(crate) fn new(descriptor: Arc<TypeDescriptor>) -> Self {
        Self { descriptor }
    }

    /// The type's qualified name.
    pub fn name(&self) -> &str {
        &self.descriptor.qualified_name
    }

    /// The structural description of this type.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Create a new instance with every field unset.
    pub fn instantiate(&self) -> DynRecord {
        DynRecord {
            values: vec![None; self.descriptor.fields.len()],
            ty: self.clone(),
        }
    }
}

/// An instance of a synthesized type.
///
/// Fields start unset (database NULL) and are read and written by name.
#[derive(Debug, Clone)]
pub struct DynRecord {
    ty: RecordType,
    values: Vec<Option<FieldValue>>,
}

impl DynRecord {
    /// The type this record was instantiated from.
    pub fn record_type(&self) -> &RecordType {
        &self.ty
    }

    fn field_index(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.ty
            .descriptor
            .fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.name == name)
    }

    /// Read a field's current value. `Ok(None)` means the field is unset.
    pub fn get(&self, field: &str) -> Result<Option<&FieldValue>, AccessError> {
        let (index, _) = self.field_index(field).ok_or_else(|| AccessError::NoSuchField {
            type_name: self.ty.name().to_string(),
            field: field.to_string(),
        })?;
        Ok(self.values[index].as_ref())
    }

    /// Assign a field. The value's kind must match the field's declared
    /// kind exactly.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<(), AccessError> {
        let (index, descriptor) =
            self.field_index(field).ok_or_else(|| AccessError::NoSuchField {
                type_name: self.ty.name().to_string(),
                field: field.to_string(),
            })?;

        if value.kind() != descriptor.kind {
            return Err(AccessError::KindMismatch {
                field: field.to_string(),
                expected: descriptor.kind,
                actual: value.kind(),
            });
        }

        self.values[index] = Some(value);
        Ok(())
    }

    /// Clear a field back to unset.
    pub fn unset(&mut self, field: &str) -> Result<(), AccessError> {
        let (index, _) = self.field_index(field).ok_or_else(|| AccessError::NoSuchField {
            type_name: self.ty.name().to_string(),
            field: field.to_string(),
        })?;
        self.values[index] = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_type() -> RecordType {
        RecordType::new(Arc::new(TypeDescriptor {
            qualified_name: "Order".to_string(),
            fields: vec![
                FieldDescriptor {
                    name: "id".to_string(),
                    kind: ScalarKind::Integer64,
                },
                FieldDescriptor {
                    name: "note".to_string(),
                    kind: ScalarKind::Text,
                },
            ],
        }))
    }

    #[test]
    fn test_fields_start_unset() {
        let record = sample_type().instantiate();
        assert_eq!(record.get("id").unwrap(), None);
        assert_eq!(record.get("note").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut record = sample_type().instantiate();
        record.set("id", FieldValue::Integer64(42)).unwrap();
        assert_eq!(record.get("id").unwrap(), Some(&FieldValue::Integer64(42)));
    }

    #[test]
    fn test_set_rejects_kind_mismatch() {
        let mut record = sample_type().instantiate();
        let err = record.set("id", FieldValue::Text("42".to_string())).unwrap_err();
        assert!(matches!(
            err,
            AccessError::KindMismatch {
                expected: ScalarKind::Integer64,
                actual: ScalarKind::Text,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_field() {
        let mut record = sample_type().instantiate();
        assert!(matches!(
            record.get("missing"),
            Err(AccessError::NoSuchField { .. })
        ));
        assert!(matches!(
            record.set("missing", FieldValue::Boolean(true)),
            Err(AccessError::NoSuchField { .. })
        ));
    }

    #[test]
    fn test_unset_clears_value() {
        let mut record = sample_type().instantiate();
        record.set("note", FieldValue::Text("hi".to_string())).unwrap();
        record.unset("note").unwrap();
        assert_eq!(record.get("note").unwrap(), None);
    }
}
