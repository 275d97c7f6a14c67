//! Append-only registry of synthesized model types.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::record::RecordType;
use super::types::TypeDescriptor;

/// A registered model: its structural description plus the loaded,
/// instantiable type handle.
#[derive(Debug, Clone)]
pub struct RegisteredModel {
    pub descriptor: Arc<TypeDescriptor>,
    pub handle: RecordType,
}

/// Registry of every type synthesized so far.
///
/// The registry is owned by the application (created at service start,
/// dropped at shutdown) and injected wherever synthesis or lookup happens.
/// It only ever grows: repeated synthesis of the same schema appends new
/// entries rather than replacing old ones. Name lookup resolves to the
/// latest registration for that name; positional access reaches every
/// entry, shadowed or not.
///
/// Appends and lookups share one mutex region, so a reader can never
/// observe a type that is registered but not yet queryable.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<RegisteredModel>,
    by_name: HashMap<String, usize>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor and return its loaded type handle.
    pub fn register(&self, descriptor: TypeDescriptor) -> RecordType {
        let descriptor = Arc::new(descriptor);
        let handle = RecordType::new(descriptor.clone());

        let mut inner = self.lock();
        let index = inner.entries.len();
        inner
            .by_name
            .insert(descriptor.qualified_name.clone(), index);
        inner.entries.push(RegisteredModel {
            descriptor,
            handle: handle.clone(),
        });

        handle
    }

    /// Number of registered models, duplicates included.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Look up a model by insertion position.
    pub fn get(&self, index: usize) -> Option<RegisteredModel> {
        self.lock().entries.get(index).cloned()
    }

    /// Look up the latest registration with the given qualified name.
    pub fn get_by_name(&self, name: &str) -> Option<RegisteredModel> {
        let inner = self.lock();
        let index = *inner.by_name.get(name)?;
        inner.entries.get(index).cloned()
    }

    /// Qualified names of every registered model in insertion order,
    /// duplicates included.
    pub fn names(&self) -> Vec<String> {
        self.lock()
            .entries
            .iter()
            .map(|m| m.descriptor.qualified_name.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves only fully-registered
        // entries behind, so a poisoned registry is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
