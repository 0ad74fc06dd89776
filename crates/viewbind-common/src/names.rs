//! Well-known class names referenced by generated binders.
//!
//! The framework capability types (view, inflater, annotations) follow the
//! Android support library; the runtime helpers live in the `viewbind`
//! runtime package that generated code links against.

use crate::type_name::ClassName;

/// Fully qualified name of the base element capability type. Field and
/// parameter types equal to this need no cast.
pub const VIEW_TYPE: &str = "android.view.View";

/// Root-owning target types are subtypes of this.
pub const ACTIVITY_TYPE: &str = "android.app.Activity";

/// Suffix appended to the flattened target name to form the binder name.
pub const BINDING_CLASS_SUFFIX: &str = "_ViewBinding";

/// Header comment placed at the top of every generated file.
pub const FILE_COMMENT: &str = "Generated code from viewbind. Do not modify!";

/// Runtime package holding `Unbinder`.
pub const RUNTIME_PACKAGE: &str = "viewbind";

/// Runtime package holding the `Utils` lookup and cast helpers.
pub const RUNTIME_INTERNAL_PACKAGE: &str = "viewbind.internal";

pub fn view() -> ClassName {
    ClassName::new("android.view", "View")
}

pub fn layout_inflater() -> ClassName {
    ClassName::new("android.view", "LayoutInflater")
}

pub fn view_group() -> ClassName {
    ClassName::new("android.view", "ViewGroup")
}

pub fn ui_thread() -> ClassName {
    ClassName::new("android.support.annotation", "UiThread")
}

pub fn call_super() -> ClassName {
    ClassName::new("android.support.annotation", "CallSuper")
}

pub fn override_annotation() -> ClassName {
    ClassName::new("java.lang", "Override")
}

pub fn illegal_state_exception() -> ClassName {
    ClassName::new("java.lang", "IllegalStateException")
}

pub fn unbinder() -> ClassName {
    ClassName::new(RUNTIME_PACKAGE, "Unbinder")
}

pub fn utils() -> ClassName {
    ClassName::new(RUNTIME_INTERNAL_PACKAGE, "Utils")
}
