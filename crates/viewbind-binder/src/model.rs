//! Binding Model
//!
//! Entities the front end hands to the builder: identifiers, field bindings,
//! listener-method bindings and collection-field bindings.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;
use viewbind_common::{TypeName, names};
use viewbind_emitter::IRNode;

/// True unless the type is exactly the base element type.
pub fn requires_cast(type_name: &TypeName) -> bool {
    type_name.to_string() != names::VIEW_TYPE
}

/// A UI element identifier, or the root element itself.
///
/// Resource identifiers compare by integer value only; `code` is the source
/// expression used in generated code (`R.id.title` or the literal).
#[derive(Debug, Clone)]
pub enum ViewId {
    Root,
    Resource { value: i32, code: String },
}

impl ViewId {
    /// Value and code of the root sentinel, matching `View.NO_ID`.
    pub const ROOT_VALUE: i32 = -1;

    pub fn new(value: i32) -> Self {
        Self::Resource {
            value,
            code: value.to_string(),
        }
    }

    pub fn with_code(value: i32, code: impl Into<String>) -> Self {
        Self::Resource {
            value,
            code: code.into(),
        }
    }

    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    pub const fn value(&self) -> i32 {
        match self {
            Self::Root => Self::ROOT_VALUE,
            Self::Resource { value, .. } => *value,
        }
    }

    pub fn code(&self) -> String {
        match self {
            Self::Root => Self::ROOT_VALUE.to_string(),
            Self::Resource { code, .. } => code.clone(),
        }
    }

    /// The identifier as it appears in generated code.
    pub fn to_ir(&self) -> IRNode {
        IRNode::Raw(self.code())
    }

    /// Name of the binder field that keeps this element for teardown.
    pub fn view_field_name(&self) -> String {
        match self {
            Self::Root => "viewSource".to_string(),
            Self::Resource { value, .. } if *value < 0 => format!("view_{}", value.unsigned_abs()),
            Self::Resource { value, .. } => format!("view{value}"),
        }
    }
}

impl PartialEq for ViewId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Root, Self::Root) => true,
            (Self::Resource { value: a, .. }, Self::Resource { value: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for ViewId {}

impl Hash for ViewId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        if let Self::Resource { value, .. } = self {
            value.hash(state);
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("<root>"),
            Self::Resource { code, .. } => f.write_str(code),
        }
    }
}

/// A binding that can be named in a human-readable error message.
pub trait MemberViewBinding {
    fn description(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViewBinding {
    pub name: String,
    pub type_name: TypeName,
    pub required: bool,
    /// Look the element up inside this container instead of the root.
    pub parent_id: Option<ViewId>,
}

impl FieldViewBinding {
    pub fn new(name: impl Into<String>, type_name: TypeName, required: bool) -> Self {
        Self {
            name: name.into(),
            type_name,
            required,
            parent_id: None,
        }
    }

    pub fn with_parent_id(mut self, parent_id: ViewId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn raw_type(&self) -> TypeName {
        self.type_name.raw_type()
    }
}

impl MemberViewBinding for FieldViewBinding {
    fn description(&self) -> String {
        format!("field '{}'", self.name)
    }
}

/// One argument of a bound method, taken from a listener callback parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub listener_position: usize,
    pub type_name: TypeName,
}

impl Parameter {
    pub fn new(listener_position: usize, type_name: TypeName) -> Self {
        Self {
            listener_position,
            type_name,
        }
    }

    /// A position outside the callback's parameter list always needs the
    /// checked conversion.
    pub fn requires_cast(&self, listener_parameters: &[TypeName]) -> bool {
        listener_parameters
            .get(self.listener_position)
            .is_none_or(|listener_type| *listener_type != self.type_name)
    }
}

pub type Parameters = SmallVec<[Parameter; 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodViewBinding {
    pub name: String,
    pub parameters: Parameters,
    pub required: bool,
}

impl MethodViewBinding {
    pub fn new(
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
            required,
        }
    }
}

impl MemberViewBinding for MethodViewBinding {
    fn description(&self) -> String {
        format!("method '{}'", self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Array,
    List,
}

impl CollectionKind {
    /// Runtime helper that builds the collection and drops missing elements.
    pub const fn factory_name(self) -> &'static str {
        match self {
            Self::Array => "arrayFilteringNull",
            Self::List => "listFilteringNull",
        }
    }
}

/// Several identifiers gathered into one array or list field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCollectionViewBinding {
    pub name: String,
    pub element_type: TypeName,
    pub kind: CollectionKind,
    pub ids: Vec<ViewId>,
    pub required: bool,
}

impl FieldCollectionViewBinding {
    pub fn new(
        name: impl Into<String>,
        element_type: TypeName,
        kind: CollectionKind,
        ids: Vec<ViewId>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            element_type,
            kind,
            ids,
            required,
        }
    }

    /// The self-contained initialization statement:
    /// `target.<name> = Utils.<factory>(<lookup>, ...);`
    pub fn render(&self) -> IRNode {
        let cast = requires_cast(&self.element_type);
        let lookups = self.ids.iter().map(|id| self.lookup(id, cast)).collect();
        IRNode::assign_stmt(
            IRNode::field(IRNode::id("target"), &self.name),
            IRNode::static_call(names::utils(), self.kind.factory_name(), lookups),
        )
    }

    fn lookup(&self, id: &ViewId, cast: bool) -> IRNode {
        let source = IRNode::id("source");
        if id.is_root() {
            if !cast {
                return source;
            }
            return IRNode::static_call(
                names::utils(),
                "castView",
                vec![
                    source,
                    id.to_ir(),
                    IRNode::string(self.description()),
                    IRNode::class_literal(self.element_type.raw_type()),
                ],
            );
        }

        if !cast && !self.required {
            return IRNode::call(source, "findViewById", vec![id.to_ir()]);
        }

        let mut name = String::from("find");
        name.push_str(if self.required { "RequiredView" } else { "OptionalView" });
        if cast {
            name.push_str("AsType");
        }
        let mut args = vec![source, id.to_ir(), IRNode::string(self.description())];
        if cast {
            args.push(IRNode::class_literal(self.element_type.raw_type()));
        }
        IRNode::static_call(names::utils(), name, args)
    }
}

impl MemberViewBinding for FieldCollectionViewBinding {
    fn description(&self) -> String {
        format!("field '{}'", self.name)
    }
}
