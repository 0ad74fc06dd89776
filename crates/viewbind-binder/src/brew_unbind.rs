//! Teardown (`unbind`) synthesis.

use viewbind_common::{TypeName, names};
use viewbind_emitter::{IRMethod, IRNode, Modifiers};

use crate::binding_set::BindingSet;
use crate::brew_constructor::join_groups;
use crate::brew_listeners::{listener_field_name, setter_receiver};
use crate::view_binding::ViewBinding;

impl BindingSet {
    pub(crate) fn create_unbind_method(&self) -> IRMethod {
        let mut unbind = IRMethod::method("unbind", TypeName::VOID)
            .with_annotation(names::override_annotation())
            .with_modifiers(Modifiers::PUBLIC);
        if !self.is_final && self.parent.is_none() {
            unbind = unbind.with_annotation(names::call_super());
        }

        let mut groups = Vec::new();
        if self.has_target_field() {
            let mut guard = Vec::new();
            if self.has_field_bindings() {
                guard.push(IRNode::local(
                    self.target_type_name.clone(),
                    "target",
                    Some(IRNode::this_field("target")),
                ));
            }
            guard.push(IRNode::if_then(
                IRNode::equal(IRNode::id("target"), IRNode::NullLiteral),
                vec![IRNode::throw_new(
                    names::illegal_state_exception(),
                    vec![IRNode::string("Bindings already cleared.")],
                )],
            ));
            guard.push(IRNode::assign_stmt(
                IRNode::this_field("target"),
                IRNode::NullLiteral,
            ));
            groups.push(guard);

            let field_names = self
                .view_bindings
                .iter()
                .filter_map(|binding| binding.field_binding().map(|field| field.name.as_str()))
                .chain(self.collection_bindings.iter().map(|c| c.name.as_str()));
            groups.push(
                field_names
                    .map(|name| {
                        IRNode::assign_stmt(
                            IRNode::field(IRNode::id("target"), name),
                            IRNode::NullLiteral,
                        )
                    })
                    .collect(),
            );
        }

        if self.has_method_bindings() {
            let mut detach = Vec::new();
            for binding in &self.view_bindings {
                detach_listeners(&mut detach, binding);
            }
            groups.push(detach);
        }

        if self.parent.is_some() {
            groups.push(vec![IRNode::expr_stmt(IRNode::call(
                IRNode::Super,
                "unbind",
                vec![],
            ))]);
        }

        unbind.body = join_groups(groups);
        unbind
    }
}

/// Detach every listener attached to one id, then drop the element.
fn detach_listeners(body: &mut Vec<IRNode>, binding: &ViewBinding) {
    if !binding.has_method_bindings() {
        return;
    }

    let field_name = binding.id().view_field_name();
    let mut block = Vec::new();
    for listener in binding.method_bindings().keys() {
        let receiver = setter_receiver(listener, &field_name);
        if listener.requires_removal() {
            let listener_field = listener_field_name(&field_name, listener);
            block.push(IRNode::expr_stmt(IRNode::call(
                receiver,
                &listener.remover,
                vec![IRNode::id(&listener_field)],
            )));
            block.push(IRNode::assign_stmt(
                IRNode::id(listener_field),
                IRNode::NullLiteral,
            ));
        } else {
            block.push(IRNode::expr_stmt(IRNode::call(
                receiver,
                &listener.setter,
                vec![IRNode::NullLiteral],
            )));
        }
    }
    block.push(IRNode::assign_stmt(IRNode::id(&field_name), IRNode::NullLiteral));

    if binding.required_bindings().is_empty() {
        body.push(IRNode::if_then(
            IRNode::not_equal(IRNode::id(field_name), IRNode::NullLiteral),
            block,
        ));
    } else {
        body.extend(block);
    }
}
