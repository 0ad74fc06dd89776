//! IR Printer - Emits Java source from IR nodes
//!
//! This module provides the `IRPrinter` which takes IR nodes produced by
//! binder synthesis and emits Java source strings.
//!
//! # Usage
//!
//! ```ignore
//! let file = binding_set.brew_java();
//! let source = IRPrinter::print_file(&file, &PrinterOptions::default());
//! ```
//!
//! Expressions are emitted in place; statements are emitted without their
//! leading indentation or trailing newline so that callers control layout
//! (`emit_statements` does both for a statement list).

use tracing::trace;
use viewbind_common::{ClassName, TypeName};

use crate::imports::ImportScope;
use crate::ir::{IRClass, IRField, IRFile, IRMethod, IRMethodKind, IRNode, IRParam};

/// Formatting knobs for generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterOptions {
    /// One level of indentation.
    pub indent: String,
    /// Emit the file's header comment when it has one.
    pub emit_file_comment: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            emit_file_comment: true,
        }
    }
}

/// Printer that converts IR nodes to Java source
pub struct IRPrinter<'a> {
    pub(crate) output: String,
    pub(crate) indent_level: u32,
    pub(crate) indent_str: &'a str,
    /// Without a scope every class is spelled fully qualified.
    pub(crate) scope: Option<&'a ImportScope>,
}

impl Default for IRPrinter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IRPrinter<'a> {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "  ",
            scope: None,
        }
    }

    pub fn with_indent(mut self, indent: &'a str) -> Self {
        self.indent_str = indent;
        self
    }

    pub fn with_scope(mut self, scope: &'a ImportScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    /// Emit a single IR node to a string, spelling classes fully qualified.
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut printer = IRPrinter::new();
        printer.emit_node(node);
        printer.output
    }

    /// Render a complete compilation unit: header comment, package, imports
    /// and the class declaration.
    pub fn print_file(file: &IRFile, options: &PrinterOptions) -> String {
        let scope = ImportScope::collect(file);
        trace!(
            class = %file.class.name,
            imports = scope.imports().len(),
            "printing generated file"
        );

        let mut printer = IRPrinter::new()
            .with_indent(&options.indent)
            .with_scope(&scope);

        if options.emit_file_comment {
            if let Some(comment) = &file.file_comment {
                for line in comment.lines() {
                    printer.write("// ");
                    printer.write(line);
                    printer.write_line();
                }
            }
        }
        if !file.package.is_empty() {
            printer.write("package ");
            printer.write(&file.package);
            printer.write(";");
            printer.write_line();
            printer.write_line();
        }
        if !scope.imports().is_empty() {
            for import in scope.imports() {
                printer.write("import ");
                printer.write(import);
                printer.write(";");
                printer.write_line();
            }
            printer.write_line();
        }
        printer.emit_class(&file.class);
        printer.output
    }

    /// Spell a class according to the active import scope.
    pub fn class_name(&self, name: &ClassName) -> String {
        match self.scope {
            Some(scope) => scope.spell(name),
            None => name.canonical_name(),
        }
    }

    /// Spell a type according to the active import scope.
    pub fn type_name(&self, ty: &TypeName) -> String {
        ty.render_with(&|name: &ClassName| self.class_name(name))
    }

    pub fn emit_class(&mut self, class: &IRClass) {
        self.write_indent();
        self.write_modifiers(class.modifiers);
        self.write("class ");
        self.write(&class.name);
        if let Some(superclass) = &class.superclass {
            self.write(" extends ");
            let spelled = self.type_name(superclass);
            self.write(&spelled);
        }
        if !class.interfaces.is_empty() {
            self.write(" implements ");
            let interfaces: Vec<String> = class
                .interfaces
                .iter()
                .map(|interface| self.type_name(interface))
                .collect();
            self.write(&interfaces.join(", "));
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();

        let mut first = true;
        for field in &class.fields {
            if !first {
                self.write_line();
            }
            first = false;
            self.emit_field(field);
        }
        for method in &class.methods {
            if !first {
                self.write_line();
            }
            first = false;
            self.emit_method(method, &class.name);
        }

        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    pub fn emit_field(&mut self, field: &IRField) {
        self.write_indent();
        self.write_modifiers(field.modifiers);
        let spelled = self.type_name(&field.ty);
        self.write(&spelled);
        self.write(" ");
        self.write(&field.name);
        self.write(";");
        self.write_line();
    }

    /// Emit a method or constructor; `owner` names constructors.
    pub fn emit_method(&mut self, method: &IRMethod, owner: &str) {
        for annotation in &method.annotations {
            self.write_indent();
            self.write("@");
            let spelled = self.class_name(annotation);
            self.write(&spelled);
            self.write_line();
        }

        self.write_indent();
        self.write_modifiers(method.modifiers);
        match &method.kind {
            IRMethodKind::Constructor => self.write(owner),
            IRMethodKind::Method { name, return_type } => {
                let spelled = self.type_name(return_type);
                self.write(&spelled);
                self.write(" ");
                self.write(name);
            }
        }
        self.write("(");
        self.emit_parameters(&method.parameters);
        self.write(") {");
        self.write_line();

        self.increase_indent();
        self.emit_statements(&method.body);
        self.decrease_indent();

        self.write_indent();
        self.write("}");
        self.write_line();
    }

    pub(crate) fn emit_parameters(&mut self, params: &[IRParam]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.is_final {
                self.write("final ");
            }
            let spelled = self.type_name(&param.ty);
            self.write(&spelled);
            self.write(" ");
            self.write(&param.name);
        }
    }

    /// Emit statements one per line at the current indentation.
    pub fn emit_statements(&mut self, statements: &[IRNode]) {
        for statement in statements {
            match statement {
                IRNode::Sequence(inner) => self.emit_statements(inner),
                IRNode::BlankLine => self.write_line(),
                _ => {
                    self.write_indent();
                    self.emit_node(statement);
                    self.write_line();
                }
            }
        }
    }

    /// Emit a node (main dispatch)
    pub fn emit_node(&mut self, node: &IRNode) {
        match node {
            IRNode::NumericLiteral(value) => self.write(value),
            IRNode::StringLiteral(value) => {
                self.write("\"");
                self.write_escaped(value);
                self.write("\"");
            }
            IRNode::BooleanLiteral(value) => self.write(if *value { "true" } else { "false" }),
            IRNode::NullLiteral => self.write("null"),
            IRNode::Identifier(name) => self.write(name),
            IRNode::This => self.write("this"),
            IRNode::Super => self.write("super"),
            IRNode::TypeRef(ty) => {
                let spelled = self.type_name(ty);
                self.write(&spelled);
            }
            IRNode::ClassLiteral(ty) => {
                let spelled = self.type_name(&ty.raw_type());
                self.write(&spelled);
                self.write(".class");
            }
            IRNode::BinaryExpr {
                left,
                operator,
                right,
            } => {
                self.emit_node(left);
                self.write(" ");
                self.write(operator);
                self.write(" ");
                self.emit_node(right);
            }
            IRNode::MethodCall {
                receiver,
                type_arguments,
                name,
                arguments,
            } => {
                if let Some(receiver) = receiver {
                    self.emit_receiver(receiver);
                    self.write(".");
                }
                if !type_arguments.is_empty() {
                    let spelled: Vec<String> =
                        type_arguments.iter().map(|ty| self.type_name(ty)).collect();
                    self.write("<");
                    self.write(&spelled.join(", "));
                    self.write(">");
                }
                self.write(name);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            IRNode::FieldAccess { object, field } => {
                self.emit_receiver(object);
                self.write(".");
                self.write(field);
            }
            IRNode::Cast { ty, expr } => {
                self.write("(");
                let spelled = self.type_name(ty);
                self.write(&spelled);
                self.write(") ");
                if matches!(**expr, IRNode::BinaryExpr { .. }) {
                    self.write("(");
                    self.emit_node(expr);
                    self.write(")");
                } else {
                    self.emit_node(expr);
                }
            }
            IRNode::NewExpr { ty, arguments } => {
                self.write("new ");
                let spelled = self.type_name(ty);
                self.write(&spelled);
                self.write("(");
                self.emit_comma_separated(arguments);
                self.write(")");
            }
            IRNode::AnonymousClass {
                superclass,
                arguments,
                methods,
            } => self.emit_anonymous_class(superclass, arguments, methods),
            IRNode::LocalVarDecl {
                ty,
                name,
                initializer,
            } => {
                let spelled = self.type_name(ty);
                self.write(&spelled);
                self.write(" ");
                self.write(name);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.emit_node(init);
                }
                self.write(";");
            }
            IRNode::ExpressionStatement(expr) => {
                self.emit_node(expr);
                self.write(";");
            }
            IRNode::ReturnStatement(value) => {
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.emit_node(value);
                }
                self.write(";");
            }
            IRNode::ThrowStatement(value) => {
                self.write("throw ");
                self.emit_node(value);
                self.write(";");
            }
            IRNode::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                self.write("if (");
                self.emit_node(condition);
                self.write(") ");
                self.emit_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.write(" else ");
                    self.emit_block(else_branch);
                }
            }
            IRNode::SuperCall(arguments) => {
                self.write("super(");
                self.emit_comma_separated(arguments);
                self.write(");");
            }
            IRNode::BlankLine => {}
            IRNode::Raw(text) => self.write(text),
            IRNode::Comment(text) => {
                self.write("// ");
                self.write(text);
            }
            IRNode::Sequence(nodes) => {
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        self.write_line();
                        self.write_indent();
                    }
                    self.emit_node(node);
                }
            }
        }
    }
}
