//! Low-level output helpers for `IRPrinter`.

use viewbind_common::TypeName;

use crate::ir::{IRMethod, IRNode, Modifiers};
use crate::ir_printer::IRPrinter;

impl<'a> IRPrinter<'a> {
    // =========================================================================
    // Output
    // =========================================================================

    pub(crate) fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub(crate) fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub(crate) fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    pub(crate) const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) const fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub(crate) fn write_modifiers(&mut self, modifiers: Modifiers) {
        for keyword in modifiers.keywords() {
            self.write(keyword);
            self.write(" ");
        }
    }

    /// Write string literal contents with Java escapes applied.
    pub(crate) fn write_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.output.push(c),
            }
        }
    }

    // =========================================================================
    // Compound constructs
    // =========================================================================

    pub(crate) fn emit_comma_separated(&mut self, nodes: &[IRNode]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_node(node);
        }
    }

    /// Receivers that bind looser than member access get parenthesized.
    pub(crate) fn emit_receiver(&mut self, node: &IRNode) {
        if matches!(node, IRNode::Cast { .. } | IRNode::BinaryExpr { .. }) {
            self.write("(");
            self.emit_node(node);
            self.write(")");
        } else {
            self.emit_node(node);
        }
    }

    /// `{`, the statements one level deeper, then `}` at the current level.
    pub(crate) fn emit_block(&mut self, statements: &[IRNode]) {
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statements(statements);
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    pub(crate) fn emit_anonymous_class(
        &mut self,
        superclass: &TypeName,
        arguments: &[IRNode],
        methods: &[IRMethod],
    ) {
        self.write("new ");
        let spelled = self.type_name(superclass);
        self.write(&spelled);
        self.write("(");
        self.emit_comma_separated(arguments);
        self.write(") {");
        self.write_line();
        self.increase_indent();
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.emit_method(method, "");
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }
}
