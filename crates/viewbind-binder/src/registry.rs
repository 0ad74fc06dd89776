//! Listener Descriptor Registry
//!
//! Maps listener annotation names (`OnClick`, `OnTextChanged`, ...) to their
//! validated `ListenerClass`. Validation happens once, at construction; a
//! malformed descriptor is a configuration error and nothing is registered.

use std::sync::Arc;

use tracing::debug;

use crate::FxIndexMap;
use crate::catalog::{ANDROID_LISTENERS, ListenerClassSpec};
use crate::listener::{ListenerClass, RegistryError};

#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    by_annotation: FxIndexMap<String, Arc<ListenerClass>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in widget listeners.
    pub fn android() -> Result<Self, RegistryError> {
        Self::from_specs(ANDROID_LISTENERS)
    }

    pub fn from_specs(specs: &[ListenerClassSpec]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(ListenerClass::from_spec(spec)?)?;
        }
        debug!(listeners = registry.len(), "listener registry ready");
        Ok(registry)
    }

    pub fn register(&mut self, listener: ListenerClass) -> Result<Arc<ListenerClass>, RegistryError> {
        if self.by_annotation.contains_key(&listener.annotation) {
            return Err(RegistryError::DuplicateAnnotation(listener.annotation));
        }
        let listener = Arc::new(listener);
        self.by_annotation
            .insert(listener.annotation.clone(), Arc::clone(&listener));
        Ok(listener)
    }

    /// Look a listener up by annotation name, with or without a leading `@`.
    pub fn get(&self, annotation: &str) -> Option<&Arc<ListenerClass>> {
        self.by_annotation
            .get(annotation.strip_prefix('@').unwrap_or(annotation))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ListenerClass>> {
        self.by_annotation.values()
    }

    pub fn len(&self) -> usize {
        self.by_annotation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_annotation.is_empty()
    }
}
