//! Binding manifests.
//!
//! A manifest is a camelCase JSON document listing target types together with
//! the fields, collections and listener methods each of them binds:
//!
//! ```json
//! {
//!   "targets": [{
//!     "type": "com.example.MainActivity",
//!     "activity": true,
//!     "fields": [{ "id": 2131, "code": "R.id.title", "name": "title", "type": "android.widget.TextView" }],
//!     "methods": [{ "ids": [2132], "listener": "OnClick", "name": "submit" }]
//!   }]
//! }
//! ```
//!
//! Identifiers are plain integers or `{ "value", "code" }` objects; `-1` names
//! the root element.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use viewbind_binder::{CollectionKind, ViewId};
use viewbind_common::ClassName;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingManifest {
    #[serde(default)]
    pub targets: Vec<TargetManifest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetManifest {
    /// Qualified name of the target type, nested classes joined by `.`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Guessed from `type` when absent.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    #[serde(default, rename = "activity")]
    pub is_activity: bool,
    /// Content layout resource; `0` means none.
    #[serde(default)]
    pub layout: i32,
    /// Qualified name of the closest ancestor that declares bindings.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldManifest>,
    #[serde(default)]
    pub collections: Vec<CollectionManifest>,
    #[serde(default)]
    pub methods: Vec<MethodManifest>,
}

impl TargetManifest {
    /// Declared package, or the package guessed from the qualified name.
    pub fn package(&self) -> String {
        match &self.package {
            Some(package) => package.clone(),
            None => ClassName::best_guess(&self.type_name)
                .map(|name| name.package().to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldManifest {
    pub id: i32,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_required")]
    pub required: bool,
    /// Container the element is looked up in, when it is not the root.
    #[serde(default)]
    pub parent_id: Option<IdManifest>,
}

impl FieldManifest {
    pub fn view_id(&self) -> ViewId {
        to_view_id(self.id, self.code.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKindManifest {
    Array,
    List,
}

impl From<CollectionKindManifest> for CollectionKind {
    fn from(kind: CollectionKindManifest) -> Self {
        match kind {
            CollectionKindManifest::Array => CollectionKind::Array,
            CollectionKindManifest::List => CollectionKind::List,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionManifest {
    pub name: String,
    pub kind: CollectionKindManifest,
    /// Element type.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub ids: Vec<IdManifest>,
    #[serde(default = "default_required")]
    pub required: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodManifest {
    /// Elements the method listens on; empty binds the root.
    #[serde(default)]
    pub ids: Vec<IdManifest>,
    /// Listener annotation name, with or without the leading `@`.
    pub listener: String,
    #[serde(default)]
    pub callback: Option<String>,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterManifest>,
    #[serde(default = "default_required")]
    pub required: bool,
}

impl MethodManifest {
    pub fn view_ids(&self) -> Vec<ViewId> {
        if self.ids.is_empty() {
            return vec![ViewId::Root];
        }
        self.ids.iter().map(IdManifest::view_id).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterManifest {
    /// Index into the listener callback's parameter list.
    pub position: usize,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdManifest {
    Value(i32),
    Coded { value: i32, code: String },
}

impl IdManifest {
    pub fn view_id(&self) -> ViewId {
        match self {
            Self::Value(value) => to_view_id(*value, None),
            Self::Coded { value, code } => to_view_id(*value, Some(code)),
        }
    }
}

const fn default_required() -> bool {
    true
}

fn to_view_id(value: i32, code: Option<&str>) -> ViewId {
    match (value, code) {
        (ViewId::ROOT_VALUE, _) => ViewId::Root,
        (value, Some(code)) => ViewId::with_code(value, code),
        (value, None) => ViewId::new(value),
    }
}

pub fn parse_manifest(text: &str) -> Result<BindingManifest> {
    serde_json::from_str(text).context("failed to parse binding manifest")
}

pub fn load_manifest(path: &Path) -> Result<BindingManifest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    parse_manifest(&text).with_context(|| format!("in manifest {}", path.display()))
}
