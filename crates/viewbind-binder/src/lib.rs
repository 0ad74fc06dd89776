//! Binding model and binder synthesis for viewbind.
//!
//! A front end feeds a `BindingSetBuilder` with field, collection and
//! listener-method bindings for one target type, freezes it with `build()`,
//! and asks the resulting `BindingSet` for the generated binder as an
//! `IRFile` (`brew_java`).
//!
//! Listener shapes come from a `ListenerRegistry`; `ListenerRegistry::android()`
//! provides the built-in widget listeners.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered map with the fast non-cryptographic hasher.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

// Listener descriptors
pub mod catalog;
pub mod listener;
pub mod registry;
pub use catalog::{ListenerClassSpec, ListenerMethodSpec};
pub use listener::{ListenerClass, ListenerMethod, RegistryError};
pub use registry::ListenerRegistry;

// Binding model
pub mod model;
pub mod view_binding;
pub use model::{
    CollectionKind, FieldCollectionViewBinding, FieldViewBinding, MemberViewBinding,
    MethodViewBinding, Parameter, ViewId,
};
pub use view_binding::{ListenerBindings, ViewBinding, ViewBindingBuilder};

pub mod description;
pub use description::as_human_description;

// Binding sets and synthesis
pub mod binding_set;
mod brew_constructor;
mod brew_listeners;
mod brew_unbind;
pub use binding_set::{BindingSet, BindingSetBuilder, TargetType};

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;
#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;
#[cfg(test)]
#[path = "../tests/description_tests.rs"]
mod description_tests;
#[cfg(test)]
#[path = "../tests/brew_tests.rs"]
mod brew_tests;
#[cfg(test)]
#[path = "../tests/brew_java_tests.rs"]
mod brew_java_tests;
