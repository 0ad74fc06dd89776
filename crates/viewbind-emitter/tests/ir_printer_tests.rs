use crate::ir::{IRClass, IRField, IRFile, IRMethod, IRNode, IRParam, Modifiers};
use crate::ir_printer::{IRPrinter, PrinterOptions};
use viewbind_common::{ClassName, TypeName, names};

fn text_view() -> TypeName {
    TypeName::class("android.widget", "TextView")
}

#[test]
fn test_cast_receiver_is_parenthesized() {
    let node = IRNode::call(
        IRNode::cast(text_view(), IRNode::id("view")),
        "setText",
        vec![IRNode::string("hi")],
    );
    assert_eq!(
        IRPrinter::emit_to_string(&node),
        r#"((android.widget.TextView) view).setText("hi")"#
    );
}

#[test]
fn test_local_declaration() {
    let node = IRNode::local(names::view().into(), "view", Some(IRNode::NullLiteral));
    assert_eq!(
        IRPrinter::emit_to_string(&node),
        "android.view.View view = null;"
    );
}

#[test]
fn test_string_literal_escaping() {
    let node = IRNode::string("a\"b\\c\n");
    assert_eq!(IRPrinter::emit_to_string(&node), r#""a\"b\\c\n""#);
}

#[test]
fn test_generic_static_call_and_class_literal() {
    let node = IRNode::generic_static_call(
        names::utils(),
        vec![text_view()],
        "castView",
        vec![IRNode::id("view"), IRNode::class_literal(text_view())],
    );
    assert_eq!(
        IRPrinter::emit_to_string(&node),
        "viewbind.internal.Utils.<android.widget.TextView>castView(view, android.widget.TextView.class)"
    );

    let list = TypeName::resolve("java.util.List<Foo>").unwrap();
    assert_eq!(
        IRPrinter::emit_to_string(&IRNode::class_literal(list)),
        "java.util.List.class"
    );
}

#[test]
fn test_if_statement_block() {
    let node = IRNode::if_then(
        IRNode::not_equal(IRNode::id("view"), IRNode::NullLiteral),
        vec![IRNode::assign_stmt(IRNode::id("x"), IRNode::number("1"))],
    );
    assert_eq!(
        IRPrinter::emit_to_string(&node),
        "if (view != null) {\n  x = 1;\n}"
    );
}

#[test]
fn test_anonymous_class_is_indented() {
    let on_click = IRMethod::method("onClick", TypeName::VOID)
        .with_annotation(names::override_annotation())
        .with_modifiers(Modifiers::PUBLIC)
        .with_param(IRParam::new(names::view(), "p0"))
        .with_statement(IRNode::expr_stmt(IRNode::call(
            IRNode::id("target"),
            "click",
            vec![],
        )));
    let listener = IRNode::AnonymousClass {
        superclass: names::view().nested("OnClickListener").into(),
        arguments: vec![],
        methods: vec![on_click],
    };
    let node = IRNode::expr_stmt(IRNode::call(
        IRNode::id("view"),
        "setOnClickListener",
        vec![listener],
    ));
    assert_eq!(
        IRPrinter::emit_to_string(&node),
        "view.setOnClickListener(new android.view.View.OnClickListener() {\n  @java.lang.Override\n  public void onClick(android.view.View p0) {\n    target.click();\n  }\n});"
    );
}

#[test]
fn test_modifier_keywords_are_ordered() {
    let modifiers = Modifiers::FINAL | Modifiers::PUBLIC | Modifiers::STATIC;
    assert_eq!(modifiers.keywords(), vec!["public", "static", "final"]);
    assert!(Modifiers::empty().keywords().is_empty());
}

fn unbinder_file() -> IRFile {
    let target = TypeName::class("com.example", "MainActivity");
    let mut class = IRClass::new("MainActivity_ViewBinding");
    class.modifiers = Modifiers::PUBLIC;
    class.interfaces.push(names::unbinder().into());
    class.add_field(IRField::new(target.clone(), "target", Modifiers::PRIVATE));

    let mut unbind = IRMethod::method("unbind", TypeName::VOID)
        .with_annotation(names::override_annotation())
        .with_modifiers(Modifiers::PUBLIC);
    unbind.push(IRNode::local(
        target,
        "target",
        Some(IRNode::this_field("target")),
    ));
    unbind.push(IRNode::if_then(
        IRNode::equal(IRNode::id("target"), IRNode::NullLiteral),
        vec![IRNode::throw_new(
            names::illegal_state_exception(),
            vec![IRNode::string("Bindings already cleared.")],
        )],
    ));
    class.methods.push(unbind);

    IRFile {
        package: "com.example".to_string(),
        file_comment: Some("Generated".to_string()),
        class,
    }
}

#[test]
fn test_print_file_layout() {
    let output = IRPrinter::print_file(&unbinder_file(), &PrinterOptions::default());
    let expected = "// Generated
package com.example;

import viewbind.Unbinder;

public class MainActivity_ViewBinding implements Unbinder {
  private MainActivity target;

  @Override
  public void unbind() {
    MainActivity target = this.target;
    if (target == null) {
      throw new IllegalStateException(\"Bindings already cleared.\");
    }
  }
}
";
    assert_eq!(output, expected);
}

#[test]
fn test_print_file_options() {
    let options = PrinterOptions {
        indent: "    ".to_string(),
        emit_file_comment: false,
    };
    let output = IRPrinter::print_file(&unbinder_file(), &options);
    assert!(output.starts_with("package com.example;"));
    assert!(output.contains("\n    private MainActivity target;\n"));
    assert!(output.contains("\n        MainActivity target = this.target;\n"));
}

#[test]
fn test_blank_line_and_sequence_statements() {
    let mut method = IRMethod::constructor().with_modifiers(Modifiers::PUBLIC);
    method.push(IRNode::Sequence(vec![
        IRNode::assign_stmt(IRNode::this_field("a"), IRNode::id("a")),
        IRNode::BlankLine,
        IRNode::Comment("done".to_string()),
    ]));
    let mut printer = IRPrinter::new();
    printer.emit_method(&method, "Foo");
    assert_eq!(
        printer.get_output(),
        "public Foo() {\n  this.a = a;\n\n  // done\n}\n"
    );
}

#[test]
fn test_type_spelling_without_scope_is_qualified() {
    let printer = IRPrinter::new();
    let nested = ClassName::new("android.widget", "CompoundButton").nested("OnCheckedChangeListener");
    assert_eq!(
        printer.class_name(&nested),
        "android.widget.CompoundButton.OnCheckedChangeListener"
    );
}
