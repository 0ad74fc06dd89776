use std::sync::Arc;

use crate::binding_set::{BindingSet, TargetType};
use crate::listener::ListenerClass;
use crate::model::{
    CollectionKind, FieldCollectionViewBinding, FieldViewBinding, MethodViewBinding, Parameter,
    ViewId,
};
use crate::registry::ListenerRegistry;
use viewbind_common::TypeName;
use viewbind_emitter::{IRNode, IRPrinter, PrinterOptions};

fn render(set: &BindingSet) -> String {
    IRPrinter::print_file(&set.brew_java(), &PrinterOptions::default())
}

fn listener(name: &str) -> Arc<ListenerClass> {
    let registry = ListenerRegistry::android().unwrap();
    Arc::clone(registry.get(name).unwrap())
}

fn ty(text: &str) -> TypeName {
    TypeName::resolve(text).unwrap()
}

fn target(name: &str, is_final: bool, is_activity: bool) -> TargetType {
    TargetType::new("com.example", &format!("com.example.{name}"), is_final, is_activity).unwrap()
}

fn no_params(name: &str, required: bool) -> MethodViewBinding {
    MethodViewBinding::new(name, Vec::<Parameter>::new(), required)
}

#[test]
fn test_requires_cast_only_for_non_base_types() {
    assert!(!BindingSet::requires_cast(&ty("android.view.View")));
    assert!(BindingSet::requires_cast(&ty("android.widget.TextView")));
    assert!(BindingSet::requires_cast(&ty("com.example.View")));
    assert!(BindingSet::requires_cast(&ty("android.view.View.OnClickListener")));
}

#[test]
fn test_parent_needing_view_propagates() {
    let mut parent = BindingSet::builder(target("BaseActivity", false, true));
    parent.add_field(ViewId::new(1), FieldViewBinding::new("title", ty("android.view.View"), true));
    let parent = Arc::new(parent.build());
    assert!(parent.constructor_needs_view());

    let mut child = BindingSet::builder(target("MainActivity", false, true));
    child.set_parent(Arc::clone(&parent));
    let child = child.build();
    assert!(!child.has_view_bindings());
    assert!(child.constructor_needs_view());

    let lonely = BindingSet::builder(target("Empty", false, true)).build();
    assert!(!lonely.constructor_needs_view());
    assert!(!lonely.has_target_field());
}

#[test]
fn test_derived_teardown_clears_before_super_unbind() {
    let click = listener("OnClick");
    let on_click = click.listener_methods()[0].clone();

    let mut parent = BindingSet::builder(target("BaseActivity", false, true));
    parent.add_field(ViewId::new(1), FieldViewBinding::new("base", ty("android.view.View"), true));
    let parent = Arc::new(parent.build());

    let mut child = BindingSet::builder(target("MainActivity", true, true));
    child.set_parent(parent);
    child.add_field(ViewId::new(2), FieldViewBinding::new("title", ty("android.view.View"), true));
    child.add_method(ViewId::new(3), &click, &on_click, no_params("clicked", false));
    let child = child.build();

    let class = child.brew_java().class;
    let unbind = class.method("unbind").unwrap();
    let statements: Vec<String> = unbind
        .body
        .iter()
        .filter(|node| !matches!(node, IRNode::BlankLine))
        .map(IRPrinter::emit_to_string)
        .collect();

    assert_eq!(statements.last().map(String::as_str), Some("super.unbind();"));
    let super_at = statements.len() - 1;
    let clear_at = statements
        .iter()
        .position(|s| s == "target.title = null;")
        .unwrap();
    let detach_at = statements
        .iter()
        .position(|s| s.starts_with("if (view3 != null)"))
        .unwrap();
    assert!(clear_at < detach_at && detach_at < super_at);

    // Derived binders extend the parent binder and drop @CallSuper.
    assert_eq!(
        class.superclass.as_ref().map(ToString::to_string),
        Some("com.example.BaseActivity_ViewBinding".to_string())
    );
    assert!(class.interfaces.is_empty());
    assert_eq!(unbind.annotations.len(), 1);
    assert!(class.modifiers.keywords().contains(&"final"));
}

#[test]
fn test_derived_root_owning_binder_calls_parent_and_skips_content() {
    let parent = Arc::new(BindingSet::builder(target("BaseActivity", false, true)).build());
    let mut child = BindingSet::builder(target("MainActivity", false, true));
    child.set_parent(parent);
    child.set_content_layout_id(2131);
    let output = render(&child.build());

    assert!(output.contains("    super(target, source, 2131);\n"));
    assert!(!output.contains("setContentView"));
    assert!(output.contains("  public void unbind() {\n    super.unbind();\n  }\n"));
}

#[test]
fn test_static_layout_sets_content_without_guard() {
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.set_content_layout_id(2131);
    let output = render(&builder.build());
    assert!(output.contains("    target.setContentView(2131);\n"));
    assert!(!output.contains("layoutId != 0"));
}

#[test]
fn test_derived_view_binder_takes_root_from_parent() {
    let mut parent = BindingSet::builder(target("BaseView", false, false));
    parent.set_content_layout_id(7);
    let parent = Arc::new(parent.build());

    let mut child = BindingSet::builder(target("FancyView", false, false));
    child.set_parent(parent);
    child.add_field(ViewId::new(9), FieldViewBinding::new("icon", ty("android.widget.ImageView"), true));
    let output = render(&child.build());

    assert!(output.contains("public class FancyView_ViewBinding extends BaseView_ViewBinding {"));
    assert!(output.contains("    super(target, inflater, container, layoutId);\n"));
    assert!(output.contains("    source = (View) super.getLayout();\n"));
    assert!(!output.contains("inflater.inflate"));
    // Secondary constructor chains to the parent's view constructor.
    assert!(output.contains(
        "  public FancyView_ViewBinding(final FancyView target, View source) {\n    super(target, source);\n\n    this.target = target;\n\n    this.source = source;\n\n"
    ));
}

#[test]
fn test_dynamic_inflation_is_guarded() {
    let mut builder = BindingSet::builder(target("Card", false, false));
    builder.add_field(ViewId::new(3), FieldViewBinding::new("label", ty("android.view.View"), false));
    let output = render(&builder.build());
    assert!(output.contains(
        "    if (layoutId != 0) {\n      source = inflater.inflate(layoutId, container, false);\n    }\n"
    ));
    assert!(output.contains("    target.label = source.findViewById(3);\n"));
}

#[test]
fn test_view_constructor_only_for_non_root_owning() {
    let activity = BindingSet::builder(target("MainActivity", false, true)).build();
    assert_eq!(activity.brew_java().class.constructors().count(), 1);
    assert!(activity.brew_java().class.field("source").is_none());

    let view = BindingSet::builder(target("Card", false, false)).build();
    let class = view.brew_java().class;
    assert_eq!(class.constructors().count(), 2);
    assert!(class.field("source").is_some());
    assert!(class.field("target").is_none());
}

#[test]
fn test_optional_listener_is_null_guarded() {
    let click = listener("OnClick");
    let on_click = click.listener_methods()[0].clone();
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.add_field(ViewId::new(5), FieldViewBinding::new("button", ty("android.widget.Button"), false));
    builder.add_method(ViewId::new(5), &click, &on_click, no_params("clicked", false));
    let output = render(&builder.build());

    assert!(output.contains("    view = source.findViewById(5);\n"));
    assert!(output.contains(
        "    target.button = Utils.castView(view, 5, \"field 'button'\", Button.class);\n    if (view != null) {\n      view5 = view;\n"
    ));
    assert!(output.contains(
        "    if (view5 != null) {\n      view5.setOnClickListener(null);\n      view5 = null;\n    }\n"
    ));
}

#[test]
fn test_removable_listener_keeps_field_and_casts_receiver() {
    let text = listener("OnTextChanged");
    let changed = text.method_for_callback(Some("TEXT_CHANGED")).unwrap().clone();
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.add_method(ViewId::new(300), &text, &changed, no_params("onChanged", true));
    let set = builder.build();

    let class = set.brew_java().class;
    assert!(class.field("view300").is_some());
    assert_eq!(
        class.field("view300TextWatcher").map(|f| f.ty.to_string()),
        Some("android.text.TextWatcher".to_string())
    );

    let output = render(&set);
    assert!(output.contains("    view300TextWatcher = new TextWatcher() {\n"));
    assert!(output.contains("    ((TextView) view).addTextChangedListener(view300TextWatcher);\n"));
    assert!(output.contains(
        "    ((TextView) view300).removeTextChangedListener(view300TextWatcher);\n    view300TextWatcher = null;\n    view300 = null;\n"
    ));
    // Unclaimed void callbacks are implemented with empty bodies.
    assert!(output.contains(
        "      public void beforeTextChanged(CharSequence p0, int p1, int p2, int p3) {\n      }\n"
    ));
    assert!(output.contains("        target.onChanged();\n"));
}

#[test]
fn test_value_callback_returns_binding_result() {
    let long_click = listener("OnLongClick");
    let method = long_click.listener_methods()[0].clone();
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.add_method(
        ViewId::new(8),
        &long_click,
        &method,
        MethodViewBinding::new(
            "pressed",
            [Parameter::new(0, ty("android.view.View"))],
            true,
        ),
    );
    let output = render(&builder.build());
    assert!(output.contains("      public boolean onLongClick(View p0) {\n        return target.pressed(p0);\n      }\n"));
}

#[test]
fn test_unclaimed_value_callback_returns_default() {
    static SPEC: crate::catalog::ListenerClassSpec = crate::catalog::ListenerClassSpec {
        annotation: "OnKey",
        target_type: "android.view.View",
        setter: "setOnKeyListener",
        remover: "",
        listener_type: "com.example.KeyListener",
        callbacks: &["DOWN", "UP"],
        default_callback: Some("DOWN"),
        methods: &[
            crate::catalog::ListenerMethodSpec {
                name: "onKeyDown",
                return_type: "void",
                parameters: &["int"],
                default_return: "null",
                callback: Some("DOWN"),
            },
            crate::catalog::ListenerMethodSpec {
                name: "onKeyUp",
                return_type: "boolean",
                parameters: &["int"],
                default_return: "true",
                callback: Some("UP"),
            },
        ],
    };
    let key = Arc::new(ListenerClass::from_spec(&SPEC).unwrap());
    let down = key.method_for_callback(None).unwrap().clone();
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.add_method(ViewId::new(4), &key, &down, no_params("down", true));
    let output = render(&builder.build());

    assert!(output.contains("      public boolean onKeyUp(int p0) {\n        return true;\n      }\n"));
    assert!(output.contains("    view.setOnKeyListener(new KeyListener() {\n"));
}

#[test]
fn test_mismatched_parameter_uses_cast_param() {
    let item_click = listener("OnItemClick");
    let method = item_click.listener_methods()[0].clone();
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.add_method(
        ViewId::new(6),
        &item_click,
        &method,
        MethodViewBinding::new(
            "onItem",
            [
                Parameter::new(2, TypeName::INT),
                Parameter::new(0, ty("android.widget.ListView")),
            ],
            true,
        ),
    );
    let output = render(&builder.build());

    assert!(output.contains(
        "        target.onItem(p2, Utils.<ListView>castParam(p0, \"onItemClick\", 0, \"onItem\", 1));\n"
    ));
    assert!(output.contains("    ((AdapterView<?>) view).setOnItemClickListener(new AdapterView.OnItemClickListener() {\n"));
    assert!(output.contains("      public void onItemClick(AdapterView<?> p0, View p1, int p2, long p3) {\n"));
}

#[test]
fn test_root_binding_uses_source_directly() {
    let click = listener("OnClick");
    let on_click = click.listener_methods()[0].clone();
    let mut builder = BindingSet::builder(target("Card", false, false));
    builder.add_field(ViewId::Root, FieldViewBinding::new("self", ty("android.widget.FrameLayout"), true));
    builder.add_method(ViewId::Root, &click, &on_click, no_params("tapped", false));
    let set = builder.build();
    assert!(!set.has_view_local());

    let output = render(&set);
    assert!(!output.contains("View view;"));
    assert!(!output.contains("findViewById(-1)"));
    assert!(output.contains(
        "    target.self = Utils.castView(source, -1, \"field 'self'\", FrameLayout.class);\n"
    ));
    assert!(output.contains("    viewSource = source;\n    source.setOnClickListener(new View.OnClickListener() {\n"));
    assert!(output.contains("  private View viewSource;\n"));
    assert!(output.contains("    viewSource.setOnClickListener(null);\n    viewSource = null;\n"));
}

#[test]
fn test_single_field_with_parent_container() {
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.add_field(
        ViewId::with_code(10, "R.id.label"),
        FieldViewBinding::new("label", ty("android.view.View"), false)
            .with_parent_id(ViewId::with_code(11, "R.id.header")),
    );
    builder.add_field(
        ViewId::with_code(12, "R.id.badge"),
        FieldViewBinding::new("badge", ty("android.widget.TextView"), false)
            .with_parent_id(ViewId::with_code(11, "R.id.header")),
    );
    let output = render(&builder.build());

    assert!(output.contains("    target.label = source.findViewById(R.id.header).findViewById(R.id.label);\n"));
    assert!(output.contains(
        "    target.badge = Utils.findOptionalViewAsType(source.findViewById(R.id.header), R.id.badge, \"field 'badge'\", TextView.class);\n"
    ));
}

#[test]
fn test_collection_binding_renders_one_statement() {
    let mut builder = BindingSet::builder(target("MainActivity", false, true));
    builder.add_field_collection(FieldCollectionViewBinding::new(
        "tabs",
        ty("android.widget.TextView"),
        CollectionKind::Array,
        vec![ViewId::new(1), ViewId::new(2)],
        true,
    ));
    builder.add_field_collection(FieldCollectionViewBinding::new(
        "panes",
        ty("android.view.View"),
        CollectionKind::List,
        vec![ViewId::new(3)],
        false,
    ));
    let set = builder.build();
    assert!(set.has_field_bindings());
    assert!(set.has_target_field());

    let output = render(&set);
    assert!(output.contains(
        "    target.tabs = Utils.arrayFilteringNull(Utils.findRequiredViewAsType(source, 1, \"field 'tabs'\", TextView.class), Utils.findRequiredViewAsType(source, 2, \"field 'tabs'\", TextView.class));\n"
    ));
    assert!(output.contains("    target.panes = Utils.listFilteringNull(source.findViewById(3));\n"));
    assert!(output.contains("    target.tabs = null;\n    target.panes = null;\n"));
}

#[test]
fn test_final_target_without_parent_omits_call_super() {
    let set = BindingSet::builder(target("MainActivity", true, true)).build();
    let class = set.brew_java().class;
    let unbind = class.method("unbind").unwrap();
    assert_eq!(unbind.annotations.len(), 1);
    assert!(unbind.body.is_empty());
}
