use anyhow::{Context, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info_span};
use walkdir::WalkDir;

use viewbind_binder::{
    BindingSet, BindingSetBuilder, FieldCollectionViewBinding, FieldViewBinding, ListenerRegistry,
    MethodViewBinding, Parameter, TargetType,
};
use viewbind_common::{Diagnostic, DiagnosticMessage, TypeName, diagnostic_messages};
use viewbind_emitter::{IRPrinter, PrinterOptions};

use crate::args::CliArgs;
use crate::manifest::{
    CollectionManifest, FieldManifest, MethodManifest, TargetManifest, load_manifest,
};

/// One generated binder source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Qualified name of the target type.
    pub target: String,
    /// Canonical name of the generated binder.
    pub binding_class: String,
    /// `<package path>/<Binder>.java`, relative to the output directory.
    pub relative_path: PathBuf,
    pub source: String,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub generated: Vec<GeneratedFile>,
    pub emitted_files: Vec<PathBuf>,
    pub manifests_read: Vec<PathBuf>,
}

impl GenerationResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Load every manifest named by `args`, generate binders, and write them
/// unless `--stdout` was requested.
pub fn run(args: &CliArgs, registry: &ListenerRegistry) -> Result<GenerationResult> {
    let manifests = collect_manifest_paths(&args.inputs)?;
    let mut targets = Vec::new();
    for path in &manifests {
        targets.extend(load_manifest(path)?.targets);
    }

    let mut result = generate(&targets, registry, &args.printer_options());
    result.manifests_read = manifests;
    if !args.stdout {
        result.emitted_files = write_generated(&result.generated, &args.out_dir)?;
    }
    Ok(result)
}

/// Expand directories into the `*.json` files beneath them, sorted by path.
/// Explicit file arguments are kept as given.
pub fn collect_manifest_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            paths.push(input.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            let entry =
                entry.with_context(|| format!("failed to walk {}", input.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
                found.push(path.to_path_buf());
            }
        }
        found.sort();
        paths.extend(found);
    }
    Ok(paths)
}

pub fn write_generated(files: &[GeneratedFile], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(&path, &file.source)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote binder");
        written.push(path);
    }
    Ok(written)
}

/// Generate binders for `targets`. Problems are reported as diagnostics; a
/// target with errors produces no file.
pub fn generate(
    targets: &[TargetManifest],
    registry: &ListenerRegistry,
    options: &PrinterOptions,
) -> GenerationResult {
    let _span = info_span!("generate", targets = targets.len()).entered();
    let mut generator = Generator::new(targets, registry);
    let order = generator.parent_order();
    for index in order {
        generator.generate_target(index, options);
    }
    GenerationResult {
        diagnostics: generator.diagnostics,
        generated: generator.generated,
        ..GenerationResult::default()
    }
}

/// Binder source path relative to the output directory.
pub fn relative_source_path(binding_class: &viewbind_common::ClassName) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in binding_class.package().split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.java", binding_class.simple_name()));
    path
}

/// Human-readable listing of the registered listener annotations.
pub fn describe_listeners(registry: &ListenerRegistry) -> String {
    let mut out = String::new();
    for listener in registry.iter() {
        out.push_str(&format!(
            "@{} -> {}.{}({})\n",
            listener.annotation,
            listener.target_type,
            listener.setter,
            listener.listener_type.canonical_name()
        ));
        for method in listener.listener_methods() {
            let parameters: Vec<String> =
                method.parameters.iter().map(ToString::to_string).collect();
            let callback = method
                .callback
                .as_deref()
                .map(|name| format!(" [{name}]"))
                .unwrap_or_default();
            out.push_str(&format!(
                "    {} {}({}){}\n",
                method.return_type,
                method.name,
                parameters.join(", "),
                callback
            ));
        }
    }
    out
}

// =============================================================================
// Generator
// =============================================================================

struct Generator<'a> {
    targets: &'a [TargetManifest],
    registry: &'a ListenerRegistry,
    /// First declaration of each qualified type name.
    index: FxHashMap<&'a str, usize>,
    /// Targets excluded before synthesis (duplicates, cycle members).
    skipped: FxHashSet<usize>,
    built: FxHashMap<usize, Arc<BindingSet>>,
    diagnostics: Vec<Diagnostic>,
    generated: Vec<GeneratedFile>,
}

impl<'a> Generator<'a> {
    fn new(targets: &'a [TargetManifest], registry: &'a ListenerRegistry) -> Self {
        let mut index = FxHashMap::default();
        let mut skipped = FxHashSet::default();
        let mut diagnostics = Vec::new();
        for (i, target) in targets.iter().enumerate() {
            if index.contains_key(target.type_name.as_str()) {
                diagnostics.push(Diagnostic::from_message(
                    &target.type_name,
                    &diagnostic_messages::DUPLICATE_TARGET,
                    &[&target.type_name],
                ));
                skipped.insert(i);
            } else {
                index.insert(target.type_name.as_str(), i);
            }
        }
        Self {
            targets,
            registry,
            index,
            skipped,
            built: FxHashMap::default(),
            diagnostics,
            generated: Vec::new(),
        }
    }

    fn parent_index(&self, index: usize) -> Option<usize> {
        let parent = self.targets[index].parent.as_deref()?;
        self.index.get(parent).copied()
    }

    /// Targets ordered so that every parent precedes its children. Members of
    /// a parent cycle, and targets inheriting from one, are reported and left
    /// out.
    fn parent_order(&mut self) -> Vec<usize> {
        let mut result = Vec::new();
        let mut visited = FxHashSet::default();
        let mut temp_visited = FxHashSet::default();
        let mut cycle_path = Vec::new();

        for id in 0..self.targets.len() {
            if self.skipped.contains(&id) || visited.contains(&id) {
                continue;
            }
            if !self.visit_parent_first(
                id,
                &mut visited,
                &mut temp_visited,
                &mut result,
                &mut cycle_path,
            ) {
                let involving = cycle_path
                    .first()
                    .map(|&entry| self.targets[entry].type_name.clone())
                    .unwrap_or_default();
                let mut reported = FxHashSet::default();
                for member in cycle_path.drain(..) {
                    if !reported.insert(member) {
                        continue;
                    }
                    self.diagnostics.push(Diagnostic::from_message(
                        &self.targets[member].type_name,
                        &diagnostic_messages::CIRCULAR_PARENT_CHAIN,
                        &[&involving],
                    ));
                    self.skipped.insert(member);
                    visited.insert(member);
                }
                temp_visited.clear();
            }
        }

        // Post-order DFS yields parents before children.
        result
    }

    fn visit_parent_first(
        &self,
        id: usize,
        visited: &mut FxHashSet<usize>,
        temp_visited: &mut FxHashSet<usize>,
        result: &mut Vec<usize>,
        cycle_path: &mut Vec<usize>,
    ) -> bool {
        if temp_visited.contains(&id) {
            cycle_path.push(id);
            return false;
        }
        if visited.contains(&id) {
            return true;
        }

        temp_visited.insert(id);
        if let Some(parent) = self.parent_index(id) {
            if !self.visit_parent_first(parent, visited, temp_visited, result, cycle_path) {
                cycle_path.push(id);
                return false;
            }
        }
        temp_visited.remove(&id);
        visited.insert(id);
        result.push(id);
        true
    }

    fn generate_target(&mut self, index: usize, options: &PrinterOptions) {
        if self.skipped.contains(&index) {
            return;
        }
        let targets = self.targets;
        let target = &targets[index];
        let _span = tracing::debug_span!("target", target = %target.type_name).entered();
        let errors_before = self.error_count();

        let target_type = match TargetType::new(
            &target.package(),
            &target.type_name,
            target.is_final,
            target.is_activity,
        ) {
            Ok(target_type) => target_type,
            Err(err) => {
                self.report(
                    target,
                    &diagnostic_messages::INVALID_TYPE_NAME,
                    &[&target.type_name, "target type", &err.to_string()],
                );
                return;
            }
        };

        let mut builder = BindingSet::builder(target_type);
        builder.set_content_layout_id(target.layout);
        self.attach_parent(index, &mut builder);
        for field in &target.fields {
            self.add_field(target, field, &mut builder);
        }
        for collection in &target.collections {
            self.add_collection(target, collection, &mut builder);
        }
        for method in &target.methods {
            self.add_method(target, method, &mut builder);
        }

        if self.error_count() > errors_before {
            debug!(target = %target.type_name, "skipping binder with errors");
            return;
        }

        let binding_set = builder.build();
        let file = binding_set.brew_java();
        let source = IRPrinter::print_file(&file, options);
        let binding_class = binding_set.binding_class_name();
        debug!(binding_class = %binding_class, "generated binder");
        self.generated.push(GeneratedFile {
            target: target.type_name.clone(),
            binding_class: binding_class.canonical_name(),
            relative_path: relative_source_path(binding_class),
            source,
        });
        self.built.insert(index, Arc::new(binding_set));
    }

    fn attach_parent(&mut self, index: usize, builder: &mut BindingSetBuilder) {
        let targets = self.targets;
        let target = &targets[index];
        let Some(parent_name) = target.parent.as_deref() else {
            return;
        };
        match self.parent_index(index) {
            Some(parent) => {
                // A parent that failed to build has already been reported.
                if let Some(parent_set) = self.built.get(&parent) {
                    builder.set_parent(Arc::clone(parent_set));
                }
            }
            None => self.report(
                target,
                &diagnostic_messages::UNKNOWN_PARENT,
                &[parent_name, &target.type_name],
            ),
        }
    }

    fn add_field(
        &mut self,
        target: &TargetManifest,
        field: &FieldManifest,
        builder: &mut BindingSetBuilder,
    ) {
        let what = format!("field '{}'", field.name);
        let Some(type_name) = self.resolve_type(target, &field.type_name, &what) else {
            return;
        };
        let mut binding = FieldViewBinding::new(&field.name, type_name, field.required);
        if let Some(parent_id) = &field.parent_id {
            binding = binding.with_parent_id(parent_id.view_id());
        }
        builder.add_field(field.view_id(), binding);
    }

    fn add_collection(
        &mut self,
        target: &TargetManifest,
        collection: &CollectionManifest,
        builder: &mut BindingSetBuilder,
    ) {
        if collection.ids.is_empty() {
            self.report(
                target,
                &diagnostic_messages::EMPTY_COLLECTION,
                &[&collection.name],
            );
            return;
        }
        let what = format!("field '{}'", collection.name);
        let Some(element_type) = self.resolve_type(target, &collection.type_name, &what) else {
            return;
        };
        builder.add_field_collection(FieldCollectionViewBinding::new(
            &collection.name,
            element_type,
            collection.kind.into(),
            collection.ids.iter().map(|id| id.view_id()).collect(),
            collection.required,
        ));
    }

    fn add_method(
        &mut self,
        target: &TargetManifest,
        method: &MethodManifest,
        builder: &mut BindingSetBuilder,
    ) {
        let registry = self.registry;
        let Some(listener) = registry.get(&method.listener) else {
            self.report(
                target,
                &diagnostic_messages::UNKNOWN_LISTENER,
                &[&method.listener, &method.name],
            );
            return;
        };
        let Some(listener_method) = listener.method_for_callback(method.callback.as_deref())
        else {
            self.report(
                target,
                &diagnostic_messages::UNKNOWN_CALLBACK,
                &[
                    &listener.annotation,
                    method.callback.as_deref().unwrap_or("(default)"),
                    &method.name,
                ],
            );
            return;
        };

        let mut parameters = Vec::with_capacity(method.parameters.len());
        let mut valid = true;
        for (i, parameter) in method.parameters.iter().enumerate() {
            let arity = listener_method.parameters.len();
            if parameter.position >= arity {
                self.report(
                    target,
                    &diagnostic_messages::PARAMETER_OUT_OF_RANGE,
                    &[
                        &(i + 1).to_string(),
                        &method.name,
                        &parameter.position.to_string(),
                        &listener_method.name,
                        &arity.to_string(),
                    ],
                );
                valid = false;
                continue;
            }
            let what = format!("parameter #{} of method '{}'", i + 1, method.name);
            match self.resolve_type(target, &parameter.type_name, &what) {
                Some(type_name) => parameters.push(Parameter::new(parameter.position, type_name)),
                None => valid = false,
            }
        }
        if !valid {
            return;
        }

        let binding = MethodViewBinding::new(&method.name, parameters, method.required);
        for id in method.view_ids() {
            if !builder.add_method(id.clone(), listener, listener_method, binding.clone()) {
                self.report(
                    target,
                    &diagnostic_messages::DUPLICATE_LISTENER_METHOD,
                    &[&id.code(), &target.type_name, &method.name],
                );
            }
        }
    }

    fn resolve_type(
        &mut self,
        target: &TargetManifest,
        text: &str,
        what: &str,
    ) -> Option<TypeName> {
        match TypeName::resolve(text) {
            Ok(type_name) => Some(type_name),
            Err(err) => {
                self.report(
                    target,
                    &diagnostic_messages::INVALID_TYPE_NAME,
                    &[text, what, &err.to_string()],
                );
                None
            }
        }
    }

    fn report(&mut self, target: &TargetManifest, message: &DiagnosticMessage, args: &[&str]) {
        self.diagnostics
            .push(Diagnostic::from_message(&target.type_name, message, args));
    }

    fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}
