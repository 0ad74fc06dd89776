//! Binding Set and its builder.
//!
//! The builder accumulates every binding requested by one target type; `build`
//! freezes them into a `BindingSet`, which owns the synthesis of the generated
//! binder (see `brew_constructor`, `brew_listeners` and `brew_unbind`).

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};
use viewbind_common::{ClassName, TypeName, TypeNameError, names};

use crate::FxIndexMap;
use crate::listener::{ListenerClass, ListenerMethod};
use crate::model::{FieldCollectionViewBinding, FieldViewBinding, MethodViewBinding, ViewId};
use crate::view_binding::{ViewBinding, ViewBindingBuilder};

/// The type whose fields and methods are being bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetType {
    pub class_name: ClassName,
    pub is_final: bool,
    /// Root-owning targets supply the root element themselves.
    pub is_activity: bool,
}

impl TargetType {
    /// `qualified_name` must start with `package`; the remainder names the
    /// (possibly nested) class.
    pub fn new(
        package: &str,
        qualified_name: &str,
        is_final: bool,
        is_activity: bool,
    ) -> Result<Self, TypeNameError> {
        let relative = if package.is_empty() {
            Some(qualified_name)
        } else {
            qualified_name
                .strip_prefix(package)
                .and_then(|rest| rest.strip_prefix('.'))
        };
        let Some(relative) = relative else {
            return Err(TypeNameError::CannotGuess(qualified_name.to_string()));
        };

        let mut segments = relative.split('.');
        let first = segments.next().unwrap_or_default();
        if first.is_empty() {
            return Err(TypeNameError::Empty);
        }
        let mut class_name = ClassName::new(package, first);
        for segment in segments {
            if segment.is_empty() {
                return Err(TypeNameError::CannotGuess(qualified_name.to_string()));
            }
            class_name = class_name.nested(segment);
        }

        Ok(Self {
            class_name,
            is_final,
            is_activity,
        })
    }

    /// `Outer.Inner` in `com.example` binds through `com.example.Outer$Inner_ViewBinding`.
    pub fn binding_class_name(&self) -> ClassName {
        let flattened = self.class_name.simple_names().join("$");
        ClassName::new(
            self.class_name.package(),
            format!("{flattened}{}", names::BINDING_CLASS_SUFFIX),
        )
    }
}

/// Every binding requested by one target type, frozen.
#[derive(Debug, Clone)]
pub struct BindingSet {
    pub(crate) target_type_name: TypeName,
    pub(crate) binding_class_name: ClassName,
    pub(crate) is_final: bool,
    pub(crate) is_activity: bool,
    pub(crate) view_bindings: Vec<ViewBinding>,
    pub(crate) collection_bindings: Vec<FieldCollectionViewBinding>,
    pub(crate) parent: Option<Arc<BindingSet>>,
    /// 0 when the layout is passed in at construction time.
    pub(crate) layout_id: i32,
}

impl BindingSet {
    pub fn builder(target: TargetType) -> BindingSetBuilder {
        BindingSetBuilder::new(target)
    }

    /// A cast is required unless the type is exactly the base element type.
    pub fn requires_cast(type_name: &TypeName) -> bool {
        crate::model::requires_cast(type_name)
    }

    pub fn target_type_name(&self) -> &TypeName {
        &self.target_type_name
    }

    pub fn binding_class_name(&self) -> &ClassName {
        &self.binding_class_name
    }

    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    pub const fn is_activity(&self) -> bool {
        self.is_activity
    }

    pub fn view_bindings(&self) -> &[ViewBinding] {
        &self.view_bindings
    }

    pub fn collection_bindings(&self) -> &[FieldCollectionViewBinding] {
        &self.collection_bindings
    }

    pub fn parent(&self) -> Option<&Arc<BindingSet>> {
        self.parent.as_ref()
    }

    pub const fn layout_id(&self) -> i32 {
        self.layout_id
    }

    // =========================================================================
    // Shape queries
    // =========================================================================

    /// True when this type's bindings require an element tree.
    pub fn has_view_bindings(&self) -> bool {
        !self.view_bindings.is_empty() || !self.collection_bindings.is_empty()
    }

    pub fn has_method_bindings(&self) -> bool {
        self.view_bindings
            .iter()
            .any(ViewBinding::has_method_bindings)
    }

    pub fn has_field_bindings(&self) -> bool {
        self.view_bindings
            .iter()
            .any(|binding| binding.field_binding().is_some())
            || !self.collection_bindings.is_empty()
    }

    pub fn has_target_field(&self) -> bool {
        self.has_field_bindings() || self.has_method_bindings()
    }

    pub fn has_view_local(&self) -> bool {
        self.view_bindings.iter().any(ViewBinding::requires_local)
    }

    /// True if this binder or any ancestor needs an element tree to bind.
    pub fn constructor_needs_view(&self) -> bool {
        self.has_view_bindings()
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.constructor_needs_view())
    }
}

impl fmt::Display for BindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.binding_class_name, f)
    }
}

/// Mutable accumulator for one target type.
#[derive(Debug)]
pub struct BindingSetBuilder {
    target: TargetType,
    binding_class_name: ClassName,
    layout_id: i32,
    parent: Option<Arc<BindingSet>>,
    view_bindings: FxIndexMap<ViewId, ViewBindingBuilder>,
    collection_bindings: Vec<FieldCollectionViewBinding>,
}

impl BindingSetBuilder {
    pub fn new(target: TargetType) -> Self {
        Self {
            binding_class_name: target.binding_class_name(),
            target,
            layout_id: 0,
            parent: None,
            view_bindings: FxIndexMap::default(),
            collection_bindings: Vec::new(),
        }
    }

    pub fn binding_class_name(&self) -> &ClassName {
        &self.binding_class_name
    }

    /// Attach the field binding of `id`; a later call for the same id wins.
    pub fn add_field(&mut self, id: ViewId, binding: FieldViewBinding) {
        self.view_binding_mut(id).set_field_binding(binding);
    }

    pub fn add_field_collection(&mut self, binding: FieldCollectionViewBinding) {
        self.collection_bindings.push(binding);
    }

    /// File a method binding under `(listener, method)` for `id`.
    ///
    /// Returns `false` without changing anything when that slot is already
    /// claimed and the callback returns a value.
    pub fn add_method(
        &mut self,
        id: ViewId,
        listener: &Arc<ListenerClass>,
        method: &ListenerMethod,
        binding: MethodViewBinding,
    ) -> bool {
        let binding_class = self.binding_class_name.simple_name().to_string();
        let view_binding = self.view_binding_mut(id);
        if view_binding.has_method_binding(listener, method) && method.has_return_value() {
            debug!(
                binding_class = %binding_class,
                listener = %listener.annotation,
                method = %method.name,
                rejected = %binding.name,
                "listener method already claimed"
            );
            return false;
        }
        view_binding.add_method_binding(listener, method, binding);
        true
    }

    pub fn set_parent(&mut self, parent: Arc<BindingSet>) {
        self.parent = Some(parent);
    }

    pub fn set_content_layout_id(&mut self, layout_id: i32) {
        self.layout_id = layout_id;
    }

    fn view_binding_mut(&mut self, id: ViewId) -> &mut ViewBindingBuilder {
        if !self.view_bindings.contains_key(&id) {
            trace!(
                binding_class = %self.binding_class_name.simple_name(),
                id = %id,
                "new view binding"
            );
        }
        self.view_bindings
            .entry(id.clone())
            .or_insert_with(|| ViewBindingBuilder::new(id))
    }

    pub fn build(self) -> BindingSet {
        let target_type_name = TypeName::Class(self.target.class_name);
        BindingSet {
            target_type_name,
            binding_class_name: self.binding_class_name,
            is_final: self.target.is_final,
            is_activity: self.target.is_activity,
            view_bindings: self
                .view_bindings
                .into_values()
                .map(ViewBindingBuilder::build)
                .collect(),
            collection_bindings: self.collection_bindings,
            parent: self.parent,
            layout_id: self.layout_id,
        }
    }
}
