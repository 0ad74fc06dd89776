//! Validated listener descriptors.
//!
//! `ListenerClass` and `ListenerMethod` are the keys method bindings are filed
//! under inside a `ViewBinding`, so both are hashable by value.

use thiserror::Error;
use tracing::trace;
use viewbind_common::{ClassName, TypeName, TypeNameError, names};

use crate::catalog::{ListenerClassSpec, ListenerMethodSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("@{annotation}: invalid type '{text}': {source}")]
    InvalidType {
        annotation: String,
        text: String,
        source: TypeNameError,
    },
    #[error("@{annotation}: listener type '{text}' is not a class")]
    ListenerTypeNotClass { annotation: String, text: String },
    #[error("@{annotation} declares no listener methods")]
    NoMethods { annotation: String },
    #[error("@{annotation} declares {count} methods but no callbacks")]
    MissingCallbacks { annotation: String, count: usize },
    #[error("@{annotation}'s {callback} callback has no listener method")]
    MissingCallbackMethod { annotation: String, callback: String },
    #[error("@{annotation}: method '{method}' names undeclared callback '{callback}'")]
    UndeclaredCallback {
        annotation: String,
        method: String,
        callback: String,
    },
    #[error("@{annotation}: default callback '{callback}' is not declared")]
    UnknownDefaultCallback { annotation: String, callback: String },
    #[error("listener annotation @{0} is registered twice")]
    DuplicateAnnotation(String),
}

/// One callback method of a listener interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerMethod {
    pub name: String,
    pub return_type: TypeName,
    pub parameters: Vec<TypeName>,
    pub default_return: String,
    pub callback: Option<String>,
}

impl ListenerMethod {
    /// True when the callback returns a value; such methods accept one binding.
    pub fn has_return_value(&self) -> bool {
        !self.return_type.is_void()
    }

    fn from_spec(annotation: &str, spec: &ListenerMethodSpec) -> Result<Self, RegistryError> {
        let parameters = spec
            .parameters
            .iter()
            .map(|text| resolve(annotation, text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: spec.name.to_string(),
            return_type: resolve(annotation, spec.return_type)?,
            parameters,
            default_return: spec.default_return.to_string(),
            callback: spec.callback.map(str::to_string),
        })
    }
}

/// A listener interface together with the way it is attached to an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerClass {
    pub annotation: String,
    /// Element type the setter is declared on.
    pub target_type: TypeName,
    pub setter: String,
    /// Empty when detaching passes `null` to the setter.
    pub remover: String,
    pub listener_type: ClassName,
    callbacks: Vec<String>,
    default_callback: Option<String>,
    /// Ordered by callback constant on multi-method classes.
    methods: Vec<ListenerMethod>,
}

impl ListenerClass {
    pub fn from_spec(spec: &ListenerClassSpec) -> Result<Self, RegistryError> {
        let annotation = spec.annotation;
        let target_type = resolve(annotation, spec.target_type)?;
        let listener_type = resolve(annotation, spec.listener_type)?
            .class_name()
            .cloned()
            .ok_or_else(|| RegistryError::ListenerTypeNotClass {
                annotation: annotation.to_string(),
                text: spec.listener_type.to_string(),
            })?;

        if spec.methods.is_empty() {
            return Err(RegistryError::NoMethods {
                annotation: annotation.to_string(),
            });
        }

        let declared = spec
            .methods
            .iter()
            .map(|method| ListenerMethod::from_spec(annotation, method))
            .collect::<Result<Vec<_>, _>>()?;

        let methods = if spec.callbacks.is_empty() {
            if declared.len() != 1 {
                return Err(RegistryError::MissingCallbacks {
                    annotation: annotation.to_string(),
                    count: declared.len(),
                });
            }
            declared
        } else {
            order_by_callbacks(annotation, spec.callbacks, declared)?
        };

        if let Some(default) = spec.default_callback {
            if !spec.callbacks.contains(&default) {
                return Err(RegistryError::UnknownDefaultCallback {
                    annotation: annotation.to_string(),
                    callback: default.to_string(),
                });
            }
        }

        trace!(
            listener = annotation,
            methods = methods.len(),
            "validated listener class"
        );
        Ok(Self {
            annotation: annotation.to_string(),
            target_type,
            setter: spec.setter.to_string(),
            remover: spec.remover.to_string(),
            listener_type,
            callbacks: spec.callbacks.iter().map(|c| c.to_string()).collect(),
            default_callback: spec.default_callback.map(str::to_string),
            methods,
        })
    }

    /// Every method the listener interface declares, in callback order.
    pub fn listener_methods(&self) -> &[ListenerMethod] {
        &self.methods
    }

    pub fn requires_removal(&self) -> bool {
        !self.remover.is_empty()
    }

    /// Setters declared on the base element type need no receiver cast.
    pub fn targets_base_view(&self) -> bool {
        self.target_type.to_string() == names::VIEW_TYPE
    }

    /// Method implementing the named callback constant. With no name, the
    /// default callback (or the only method) is returned.
    pub fn method_for_callback(&self, callback: Option<&str>) -> Option<&ListenerMethod> {
        let Some(callback) = callback.or(self.default_callback.as_deref()) else {
            return match self.methods.as_slice() {
                [only] => Some(only),
                _ => None,
            };
        };
        if self.callbacks.is_empty() {
            return self.methods.iter().find(|method| method.name == callback);
        }
        self.methods
            .iter()
            .find(|method| method.callback.as_deref() == Some(callback))
    }
}

fn resolve(annotation: &str, text: &str) -> Result<TypeName, RegistryError> {
    TypeName::resolve(text).map_err(|source| RegistryError::InvalidType {
        annotation: annotation.to_string(),
        text: text.to_string(),
        source,
    })
}

fn order_by_callbacks(
    annotation: &str,
    callbacks: &[&str],
    declared: Vec<ListenerMethod>,
) -> Result<Vec<ListenerMethod>, RegistryError> {
    for method in &declared {
        let named = method.callback.as_deref().unwrap_or_default();
        if !callbacks.contains(&named) {
            return Err(RegistryError::UndeclaredCallback {
                annotation: annotation.to_string(),
                method: method.name.clone(),
                callback: named.to_string(),
            });
        }
    }

    callbacks
        .iter()
        .map(|callback| {
            declared
                .iter()
                .find(|method| method.callback.as_deref() == Some(*callback))
                .cloned()
                .ok_or_else(|| RegistryError::MissingCallbackMethod {
                    annotation: annotation.to_string(),
                    callback: callback.to_string(),
                })
        })
        .collect()
}
