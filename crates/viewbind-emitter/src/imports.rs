//! Import collection for generated files.
//!
//! Every class mentioned anywhere in an `IRFile` is gathered by its top-level
//! class. For each simple name one class wins the right to be spelled by its
//! simple name: a class in the file's own package first, then `java.lang`,
//! then the alphabetically first candidate, which gets an `import` line.
//! Losers of a simple-name clash are spelled fully qualified.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;
use viewbind_common::{ClassName, TypeName};

use crate::ir::{IRClass, IRFile, IRMethod, IRMethodKind, IRNode};

const JAVA_LANG: &str = "java.lang";

#[derive(Debug, Clone, Default)]
pub struct ImportScope {
    package: String,
    visible: FxHashSet<ClassName>,
    imports: Vec<String>,
}

impl ImportScope {
    /// Build the scope for a file by walking every type reference in it.
    pub fn collect(file: &IRFile) -> Self {
        let mut referenced = BTreeSet::new();
        // The generated class itself claims its simple name.
        referenced.insert(ClassName::new(file.package.clone(), file.class.name.clone()));
        collect_class(&file.class, &mut referenced);
        Self::from_referenced(&file.package, referenced)
    }

    pub fn from_referenced(package: &str, referenced: BTreeSet<ClassName>) -> Self {
        let mut by_simple_name: BTreeMap<String, Vec<ClassName>> = BTreeMap::new();
        for class in referenced {
            by_simple_name
                .entry(class.simple_name().to_string())
                .or_default()
                .push(class);
        }

        let mut visible = FxHashSet::default();
        let mut imports = Vec::new();
        for candidates in by_simple_name.into_values() {
            let winner = candidates
                .iter()
                .find(|class| class.package() == package)
                .or_else(|| candidates.iter().find(|class| class.package() == JAVA_LANG))
                .or_else(|| candidates.first());
            let Some(winner) = winner else {
                continue;
            };

            let implicit = winner.package() == package || winner.package() == JAVA_LANG;
            if !implicit {
                // Default-package classes cannot be imported from a named package.
                if winner.package().is_empty() {
                    continue;
                }
                imports.push(winner.canonical_name());
            }
            visible.insert(winner.clone());
        }
        imports.sort();

        Self {
            package: package.to_string(),
            visible,
            imports,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Canonical names to import, sorted.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Spell a class name as it must appear in this file.
    pub fn spell(&self, name: &ClassName) -> String {
        if self.visible.contains(&name.top_level()) {
            name.simple_names().join(".")
        } else {
            name.canonical_name()
        }
    }
}

fn collect_type(ty: &TypeName, out: &mut BTreeSet<ClassName>) {
    ty.for_each_class_name(&mut |name| {
        out.insert(name.top_level());
    });
}

fn collect_class(class: &IRClass, out: &mut BTreeSet<ClassName>) {
    if let Some(superclass) = &class.superclass {
        collect_type(superclass, out);
    }
    for interface in &class.interfaces {
        collect_type(interface, out);
    }
    for field in &class.fields {
        collect_type(&field.ty, out);
    }
    for method in &class.methods {
        collect_method(method, out);
    }
}

fn collect_method(method: &IRMethod, out: &mut BTreeSet<ClassName>) {
    for annotation in &method.annotations {
        out.insert(annotation.top_level());
    }
    if let IRMethodKind::Method { return_type, .. } = &method.kind {
        collect_type(return_type, out);
    }
    for param in &method.parameters {
        collect_type(&param.ty, out);
    }
    for statement in &method.body {
        collect_node(statement, out);
    }
}

fn collect_node(node: &IRNode, out: &mut BTreeSet<ClassName>) {
    match node {
        IRNode::NumericLiteral(_)
        | IRNode::StringLiteral(_)
        | IRNode::BooleanLiteral(_)
        | IRNode::NullLiteral
        | IRNode::Identifier(_)
        | IRNode::This
        | IRNode::Super
        | IRNode::BlankLine
        | IRNode::Raw(_)
        | IRNode::Comment(_) => {}
        IRNode::TypeRef(ty) | IRNode::ClassLiteral(ty) => collect_type(ty, out),
        IRNode::BinaryExpr { left, right, .. } => {
            collect_node(left, out);
            collect_node(right, out);
        }
        IRNode::MethodCall {
            receiver,
            type_arguments,
            arguments,
            ..
        } => {
            if let Some(receiver) = receiver {
                collect_node(receiver, out);
            }
            for ty in type_arguments {
                collect_type(ty, out);
            }
            for argument in arguments {
                collect_node(argument, out);
            }
        }
        IRNode::FieldAccess { object, .. } => collect_node(object, out),
        IRNode::Cast { ty, expr } => {
            collect_type(ty, out);
            collect_node(expr, out);
        }
        IRNode::ExpressionStatement(inner)
        | IRNode::ThrowStatement(inner) => collect_node(inner, out),
        IRNode::NewExpr { ty, arguments } => {
            collect_type(ty, out);
            for argument in arguments {
                collect_node(argument, out);
            }
        }
        IRNode::AnonymousClass {
            superclass,
            arguments,
            methods,
        } => {
            collect_type(superclass, out);
            for argument in arguments {
                collect_node(argument, out);
            }
            for method in methods {
                collect_method(method, out);
            }
        }
        IRNode::LocalVarDecl {
            ty, initializer, ..
        } => {
            collect_type(ty, out);
            if let Some(init) = initializer {
                collect_node(init, out);
            }
        }
        IRNode::ReturnStatement(value) => {
            if let Some(value) = value {
                collect_node(value, out);
            }
        }
        IRNode::IfStatement {
            condition,
            then_branch,
            else_branch,
        } => {
            collect_node(condition, out);
            for statement in then_branch {
                collect_node(statement, out);
            }
            for statement in else_branch.iter().flatten() {
                collect_node(statement, out);
            }
        }
        IRNode::SuperCall(arguments) | IRNode::Sequence(arguments) => {
            for argument in arguments {
                collect_node(argument, out);
            }
        }
    }
}
