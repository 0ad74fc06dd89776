//! End-to-end: bindings in, Java source out.

use std::sync::Arc;

use crate::binding_set::{BindingSet, TargetType};
use crate::model::{FieldViewBinding, MethodViewBinding, Parameter, ViewId};
use crate::registry::ListenerRegistry;
use viewbind_common::TypeName;
use viewbind_emitter::{IRPrinter, PrinterOptions};

fn render(set: &BindingSet) -> String {
    IRPrinter::print_file(&set.brew_java(), &PrinterOptions::default())
}

#[test]
fn test_required_cast_field_and_optional_plain_field() {
    let target = TargetType::new("com.example", "com.example.MainActivity", false, true).unwrap();
    let mut builder = BindingSet::builder(target);
    builder.add_field(
        ViewId::new(100),
        FieldViewBinding::new("title", TypeName::resolve("android.widget.TextView").unwrap(), true),
    );
    builder.add_field(
        ViewId::new(200),
        FieldViewBinding::new("root", TypeName::resolve("android.view.View").unwrap(), false),
    );

    let expected = r#"// Generated code from viewbind. Do not modify!
package com.example;

import android.support.annotation.CallSuper;
import android.support.annotation.UiThread;
import android.view.View;
import android.widget.TextView;
import viewbind.Unbinder;
import viewbind.internal.Utils;

public class MainActivity_ViewBinding implements Unbinder {
  private MainActivity target;

  @UiThread
  public MainActivity_ViewBinding(MainActivity target, View source, int layoutId) {
    this.target = target;

    if (layoutId != 0) {
      target.setContentView(layoutId);
    }

    target.title = Utils.findRequiredViewAsType(source, 100, "field 'title'", TextView.class);
    target.root = source.findViewById(200);
  }

  @Override
  @CallSuper
  public void unbind() {
    MainActivity target = this.target;
    if (target == null) {
      throw new IllegalStateException("Bindings already cleared.");
    }
    this.target = null;

    target.title = null;
    target.root = null;
  }

  @Override
  public Object getLayout() {
    throw new IllegalStateException("Root-owning binders do not hold a layout.");
  }
}
"#;
    assert_eq!(render(&builder.build()), expected);
}

#[test]
fn test_two_void_bindings_fire_in_insertion_order() {
    let registry = ListenerRegistry::android().unwrap();
    let click = Arc::clone(registry.get("OnClick").unwrap());
    let on_click = click.listener_methods()[0].clone();

    let target = TargetType::new("com.example", "com.example.Toolbar", false, false).unwrap();
    let mut builder = BindingSet::builder(target);
    builder.set_content_layout_id(2131);
    assert!(builder.add_method(
        ViewId::new(100),
        &click,
        &on_click,
        MethodViewBinding::new("first", Vec::<Parameter>::new(), true),
    ));
    assert!(builder.add_method(
        ViewId::new(100),
        &click,
        &on_click,
        MethodViewBinding::new("second", Vec::<Parameter>::new(), true),
    ));
    let output = render(&builder.build());

    let body = r#"    this.target = target;

    source = inflater.inflate(2131, container, false);

    View view;
    view = Utils.findRequiredView(source, 100, "method 'first' and method 'second'");
    view100 = view;
    view.setOnClickListener(new View.OnClickListener() {
      @Override
      public void onClick(View p0) {
        target.first();
        target.second();
      }
    });
  }
"#;
    assert!(output.contains(body), "constructor body mismatch:\n{output}");
    assert!(output.contains(
        "  public Toolbar_ViewBinding(final Toolbar target, LayoutInflater inflater, ViewGroup container, int layoutId) {\n"
    ));

    let unbind = r#"  public void unbind() {
    if (target == null) {
      throw new IllegalStateException("Bindings already cleared.");
    }
    this.target = null;

    view100.setOnClickListener(null);
    view100 = null;
  }
"#;
    assert!(output.contains(unbind), "unbind mismatch:\n{output}");
    assert!(output.contains("  private Toolbar target;\n\n  private View source;\n\n  private View view100;\n"));
    assert!(output.contains("  @Override\n  public Object getLayout() {\n    return source;\n  }\n"));
}
