//! Binder type and constructor synthesis.
//!
//! `brew_java` lays out the generated class; the constructors resolve every
//! bound element and assign fields. Listener wiring lives in
//! `brew_listeners`, teardown in `brew_unbind`.

use tracing::debug;
use viewbind_common::{TypeName, names};
use viewbind_emitter::{IRClass, IRField, IRFile, IRMethod, IRNode, IRParam, Modifiers};

use crate::binding_set::BindingSet;
use crate::description::as_human_description;
use crate::model::{FieldViewBinding, MemberViewBinding, requires_cast};
use crate::view_binding::ViewBinding;

impl BindingSet {
    /// Describe the generated binder as one compilation unit.
    pub fn brew_java(&self) -> IRFile {
        let _span = tracing::debug_span!(
            "brew_java",
            binding_class = %self.binding_class_name
        )
        .entered();
        debug!(
            view_bindings = self.view_bindings.len(),
            collections = self.collection_bindings.len(),
            has_parent = self.parent.is_some(),
            needs_view = self.constructor_needs_view(),
            "synthesizing binder"
        );

        IRFile {
            package: self.binding_class_name.package().to_string(),
            file_comment: Some(names::FILE_COMMENT.to_string()),
            class: self.create_type(),
        }
    }

    pub(crate) fn create_type(&self) -> IRClass {
        let mut class = IRClass::new(self.binding_class_name.simple_name());
        class.modifiers = Modifiers::PUBLIC;
        if self.is_final {
            class.modifiers |= Modifiers::FINAL;
        }
        match &self.parent {
            Some(parent) => class.superclass = Some(parent.binding_class_name.clone().into()),
            None => class.interfaces.push(names::unbinder().into()),
        }

        if self.has_target_field() {
            class.add_field(IRField::new(
                self.target_type_name.clone(),
                "target",
                Modifiers::PRIVATE,
            ));
        }
        if !self.is_activity {
            class.add_field(IRField::new(names::view(), "source", Modifiers::PRIVATE));
        }
        for field in self.listener_fields() {
            class.add_field(field);
        }

        if !self.is_activity {
            class.methods.push(self.create_view_constructor());
        }
        class.methods.push(self.create_binding_constructor());
        class.methods.push(self.create_unbind_method());
        class.methods.push(self.create_get_layout_method());
        class
    }

    /// `(target, View source)`: binds against an element tree the caller
    /// already has.
    fn create_view_constructor(&self) -> IRMethod {
        let mut constructor = IRMethod::constructor()
            .with_annotation(names::ui_thread())
            .with_modifiers(Modifiers::PUBLIC)
            .with_param(IRParam::final_param(self.target_type_name.clone(), "target"))
            .with_param(IRParam::new(names::view(), "source"));

        let mut groups = Vec::new();
        if self.parent.is_some() {
            groups.push(vec![IRNode::super_call(vec![
                IRNode::id("target"),
                IRNode::id("source"),
            ])]);
        }
        if self.has_target_field() {
            groups.push(vec![IRNode::assign_stmt(
                IRNode::this_field("target"),
                IRNode::id("target"),
            )]);
        }
        groups.push(vec![IRNode::assign_stmt(
            IRNode::this_field("source"),
            IRNode::id("source"),
        )]);
        groups.push(self.view_binding_statements());

        constructor.body = join_groups(groups);
        constructor
    }

    fn create_binding_constructor(&self) -> IRMethod {
        let target_param = if self.has_method_bindings() {
            IRParam::final_param(self.target_type_name.clone(), "target")
        } else {
            IRParam::new(self.target_type_name.clone(), "target")
        };
        let mut constructor = IRMethod::constructor()
            .with_annotation(names::ui_thread())
            .with_modifiers(Modifiers::PUBLIC)
            .with_param(target_param);
        if self.is_activity {
            constructor = constructor.with_param(IRParam::new(names::view(), "source"));
        } else {
            constructor = constructor
                .with_param(IRParam::new(names::layout_inflater(), "inflater"))
                .with_param(IRParam::new(names::view_group(), "container"));
        }
        constructor = constructor.with_param(IRParam::new(TypeName::INT, "layoutId"));

        let mut groups = Vec::new();
        if self.parent.is_some() {
            let mut args = vec![IRNode::id("target")];
            if self.is_activity {
                args.push(IRNode::id("source"));
            } else {
                args.push(IRNode::id("inflater"));
                args.push(IRNode::id("container"));
            }
            args.push(self.layout_argument());
            groups.push(vec![IRNode::super_call(args)]);
        }
        if self.has_target_field() {
            groups.push(vec![IRNode::assign_stmt(
                IRNode::this_field("target"),
                IRNode::id("target"),
            )]);
        }
        groups.push(self.content_statements());
        groups.push(self.view_binding_statements());

        constructor.body = join_groups(groups);
        constructor
    }

    /// The static layout literal, or the `layoutId` parameter.
    fn layout_argument(&self) -> IRNode {
        if self.layout_id != 0 {
            IRNode::number(self.layout_id.to_string())
        } else {
            IRNode::id("layoutId")
        }
    }

    /// Content setting (root-owning) or inflation (otherwise). Only the
    /// outermost binder does either; a derived non-root binder takes the root
    /// from its parent.
    fn content_statements(&self) -> Vec<IRNode> {
        let layout = self.layout_argument();
        let guard_dynamic = |statement: IRNode, layout_id: i32| {
            if layout_id != 0 {
                statement
            } else {
                IRNode::if_then(
                    IRNode::not_equal(IRNode::id("layoutId"), IRNode::number("0")),
                    vec![statement],
                )
            }
        };

        if self.is_activity {
            if self.parent.is_some() {
                return Vec::new();
            }
            let set_content = IRNode::expr_stmt(IRNode::call(
                IRNode::id("target"),
                "setContentView",
                vec![layout],
            ));
            return vec![guard_dynamic(set_content, self.layout_id)];
        }

        if self.parent.is_some() {
            return vec![IRNode::assign_stmt(
                IRNode::id("source"),
                IRNode::cast(
                    names::view().into(),
                    IRNode::call(IRNode::Super, "getLayout", vec![]),
                ),
            )];
        }
        let inflate = IRNode::assign_stmt(
            IRNode::id("source"),
            IRNode::call(
                IRNode::id("inflater"),
                "inflate",
                vec![layout, IRNode::id("container"), IRNode::BooleanLiteral(false)],
            ),
        );
        vec![guard_dynamic(inflate, self.layout_id)]
    }

    fn create_get_layout_method(&self) -> IRMethod {
        let mut method = IRMethod::method("getLayout", TypeName::object())
            .with_annotation(names::override_annotation())
            .with_modifiers(Modifiers::PUBLIC);
        if self.is_activity {
            method.push(IRNode::throw_new(
                names::illegal_state_exception(),
                vec![IRNode::string(
                    "Root-owning binders do not hold a layout.",
                )],
            ));
        } else {
            method.push(IRNode::ret(Some(IRNode::id("source"))));
        }
        method
    }

    // =========================================================================
    // Element resolution
    // =========================================================================

    /// Lookups, field assignments, listener wiring and collections; empty
    /// when nothing is bound.
    fn view_binding_statements(&self) -> Vec<IRNode> {
        let mut body = Vec::new();
        if !self.has_view_bindings() {
            return body;
        }
        if self.has_view_local() {
            body.push(IRNode::local(names::view().into(), "view", None));
        }
        for binding in &self.view_bindings {
            self.add_view_binding(&mut body, binding);
        }
        for collection in &self.collection_bindings {
            body.push(collection.render());
        }
        body
    }

    fn add_view_binding(&self, body: &mut Vec<IRNode>, binding: &ViewBinding) {
        if binding.is_single_field_binding() && !binding.is_bound_to_root() {
            if let Some(field) = binding.field_binding() {
                body.push(single_field_statement(binding, field));
                return;
            }
        }

        let element = if binding.is_bound_to_root() {
            IRNode::id("source")
        } else {
            let required = binding.required_bindings();
            let lookup = if required.is_empty() {
                IRNode::call(
                    IRNode::id("source"),
                    "findViewById",
                    vec![binding.id().to_ir()],
                )
            } else {
                IRNode::static_call(
                    names::utils(),
                    "findRequiredView",
                    vec![
                        IRNode::id("source"),
                        binding.id().to_ir(),
                        IRNode::string(as_human_description(&required)),
                    ],
                )
            };
            body.push(IRNode::assign_stmt(IRNode::id("view"), lookup));
            IRNode::id("view")
        };

        if let Some(field) = binding.field_binding() {
            let value = if requires_cast(&field.type_name) {
                IRNode::static_call(
                    names::utils(),
                    "castView",
                    vec![
                        element,
                        binding.id().to_ir(),
                        IRNode::string(field.description()),
                        IRNode::class_literal(field.raw_type()),
                    ],
                )
            } else {
                element
            };
            body.push(IRNode::assign_stmt(
                IRNode::field(IRNode::id("target"), &field.name),
                value,
            ));
        }

        self.add_method_bindings(body, binding);
    }
}

/// `target.<name> = <lookup>;` for an id bound to nothing but one field.
fn single_field_statement(binding: &ViewBinding, field: &FieldViewBinding) -> IRNode {
    let id = binding.id().to_ir();
    let root = match &field.parent_id {
        Some(parent) => IRNode::call(IRNode::id("source"), "findViewById", vec![parent.to_ir()]),
        None => IRNode::id("source"),
    };
    let cast = requires_cast(&field.type_name);

    let value = if !cast && !field.required {
        IRNode::call(root, "findViewById", vec![id])
    } else {
        let mut name = String::from("find");
        name.push_str(if field.required { "RequiredView" } else { "OptionalView" });
        if cast {
            name.push_str("AsType");
        }
        let mut args = vec![root, id];
        if field.required || cast {
            let description = as_human_description(&[field as &dyn MemberViewBinding]);
            args.push(IRNode::string(description));
        }
        if cast {
            args.push(IRNode::class_literal(field.raw_type()));
        }
        IRNode::static_call(names::utils(), name, args)
    };

    IRNode::assign_stmt(IRNode::field(IRNode::id("target"), &field.name), value)
}

/// Concatenate non-empty statement groups with a blank line between them.
pub(crate) fn join_groups(groups: Vec<Vec<IRNode>>) -> Vec<IRNode> {
    let mut out = Vec::new();
    for group in groups.into_iter().filter(|group| !group.is_empty()) {
        if !out.is_empty() {
            out.push(IRNode::BlankLine);
        }
        out.extend(group);
    }
    out
}
