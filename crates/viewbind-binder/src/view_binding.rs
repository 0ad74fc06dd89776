//! Per-identifier binding aggregate.

use std::sync::Arc;

use crate::listener::{ListenerClass, ListenerMethod};
use crate::model::{FieldViewBinding, MemberViewBinding, MethodViewBinding, ViewId};
use crate::FxIndexMap;

/// Bindings filed under one listener class, keyed by callback method. Every
/// accepted claim is kept, identical ones included, in insertion order.
pub type ListenerBindings = FxIndexMap<ListenerMethod, Vec<MethodViewBinding>>;

/// Everything bound to one identifier. All members share the element once it
/// has been looked up.
#[derive(Debug, Clone)]
pub struct ViewBinding {
    id: ViewId,
    field_binding: Option<FieldViewBinding>,
    method_bindings: FxIndexMap<Arc<ListenerClass>, ListenerBindings>,
}

impl ViewBinding {
    pub fn id(&self) -> &ViewId {
        &self.id
    }

    pub fn field_binding(&self) -> Option<&FieldViewBinding> {
        self.field_binding.as_ref()
    }

    pub fn method_bindings(&self) -> &FxIndexMap<Arc<ListenerClass>, ListenerBindings> {
        &self.method_bindings
    }

    pub fn has_method_bindings(&self) -> bool {
        !self.method_bindings.is_empty()
    }

    /// Exactly one field and no listeners.
    pub fn is_single_field_binding(&self) -> bool {
        self.method_bindings.is_empty() && self.field_binding.is_some()
    }

    pub fn is_bound_to_root(&self) -> bool {
        self.id.is_root()
    }

    /// Needs the shared `view` local during construction.
    pub fn requires_local(&self) -> bool {
        !self.is_bound_to_root() && !self.is_single_field_binding()
    }

    /// The required field binding followed by required method bindings, in
    /// insertion order.
    pub fn required_bindings(&self) -> Vec<&dyn MemberViewBinding> {
        let mut required: Vec<&dyn MemberViewBinding> = Vec::new();
        if let Some(field) = self.field_binding.as_ref().filter(|field| field.required) {
            required.push(field);
        }
        for methods in self.method_bindings.values() {
            for bindings in methods.values() {
                for binding in bindings.iter().filter(|binding| binding.required) {
                    required.push(binding);
                }
            }
        }
        required
    }
}

#[derive(Debug, Clone)]
pub struct ViewBindingBuilder {
    id: ViewId,
    field_binding: Option<FieldViewBinding>,
    method_bindings: FxIndexMap<Arc<ListenerClass>, ListenerBindings>,
}

impl ViewBindingBuilder {
    pub fn new(id: ViewId) -> Self {
        Self {
            id,
            field_binding: None,
            method_bindings: FxIndexMap::default(),
        }
    }

    pub fn set_field_binding(&mut self, binding: FieldViewBinding) {
        self.field_binding = Some(binding);
    }

    pub fn has_method_binding(&self, listener: &ListenerClass, method: &ListenerMethod) -> bool {
        self.method_bindings
            .get(listener)
            .is_some_and(|methods| methods.contains_key(method))
    }

    pub fn add_method_binding(
        &mut self,
        listener: &Arc<ListenerClass>,
        method: &ListenerMethod,
        binding: MethodViewBinding,
    ) {
        self.method_bindings
            .entry(Arc::clone(listener))
            .or_default()
            .entry(method.clone())
            .or_default()
            .push(binding);
    }

    pub fn build(self) -> ViewBinding {
        ViewBinding {
            id: self.id,
            field_binding: self.field_binding,
            method_bindings: self.method_bindings,
        }
    }
}
