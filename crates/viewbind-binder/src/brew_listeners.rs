//! Listener callback merging.
//!
//! All method bindings filed under one listener class on one id share a
//! single anonymous callback object implementing every method the listener
//! declares.

use viewbind_common::names;
use viewbind_emitter::{IRField, IRMethod, IRNode, IRParam, Modifiers};

use crate::binding_set::BindingSet;
use crate::listener::{ListenerClass, ListenerMethod};
use crate::model::MethodViewBinding;
use crate::view_binding::{ListenerBindings, ViewBinding};

impl BindingSet {
    /// Fields keeping bound elements (and removable listeners) for teardown.
    pub(crate) fn listener_fields(&self) -> Vec<IRField> {
        let mut fields = Vec::new();
        for binding in &self.view_bindings {
            if !binding.has_method_bindings() {
                continue;
            }
            let field_name = binding.id().view_field_name();
            fields.push(IRField::new(names::view(), &field_name, Modifiers::PRIVATE));
            for listener in binding.method_bindings().keys() {
                if listener.requires_removal() {
                    fields.push(IRField::new(
                        listener.listener_type.clone(),
                        listener_field_name(&field_name, listener),
                        Modifiers::PRIVATE,
                    ));
                }
            }
        }
        fields
    }

    pub(crate) fn add_method_bindings(&self, body: &mut Vec<IRNode>, binding: &ViewBinding) {
        if !binding.has_method_bindings() {
            return;
        }

        let field_name = binding.id().view_field_name();
        let bind_name = if binding.is_bound_to_root() {
            "source"
        } else {
            "view"
        };

        let mut block = vec![IRNode::assign_stmt(
            IRNode::id(&field_name),
            IRNode::id(bind_name),
        )];
        for (listener, methods) in binding.method_bindings() {
            let callback = listener_callback(listener, methods);
            let receiver = setter_receiver(listener, bind_name);
            if listener.requires_removal() {
                let listener_field = listener_field_name(&field_name, listener);
                block.push(IRNode::assign_stmt(IRNode::id(&listener_field), callback));
                block.push(IRNode::expr_stmt(IRNode::call(
                    receiver,
                    &listener.setter,
                    vec![IRNode::id(listener_field)],
                )));
            } else {
                block.push(IRNode::expr_stmt(IRNode::call(
                    receiver,
                    &listener.setter,
                    vec![callback],
                )));
            }
        }

        // Only optional bindings may find the element missing.
        if binding.required_bindings().is_empty() {
            body.push(IRNode::if_then(
                IRNode::not_equal(IRNode::id(bind_name), IRNode::NullLiteral),
                block,
            ));
        } else {
            body.extend(block);
        }
    }
}

/// `<viewField><ListenerSimpleName>`, e.g. `view2131TextWatcher`.
pub(crate) fn listener_field_name(view_field: &str, listener: &ListenerClass) -> String {
    format!("{view_field}{}", listener.listener_type.simple_name())
}

/// The element, cast to the listener's target type unless that is the base
/// element type.
pub(crate) fn setter_receiver(listener: &ListenerClass, element: &str) -> IRNode {
    if listener.targets_base_view() {
        IRNode::id(element)
    } else {
        IRNode::cast(listener.target_type.clone(), IRNode::id(element))
    }
}

fn listener_callback(listener: &ListenerClass, bindings: &ListenerBindings) -> IRNode {
    let methods = listener
        .listener_methods()
        .iter()
        .map(|method| callback_method(method, bindings))
        .collect();
    IRNode::AnonymousClass {
        superclass: listener.listener_type.clone().into(),
        arguments: Vec::new(),
        methods,
    }
}

fn callback_method(method: &ListenerMethod, bindings: &ListenerBindings) -> IRMethod {
    let mut callback = IRMethod::method(&method.name, method.return_type.clone())
        .with_annotation(names::override_annotation())
        .with_modifiers(Modifiers::PUBLIC);
    for (i, parameter) in method.parameters.iter().enumerate() {
        callback = callback.with_param(IRParam::new(parameter.clone(), format!("p{i}")));
    }

    match bindings.get(method) {
        Some(claimed) => {
            for binding in claimed {
                let call = IRNode::call(
                    IRNode::id("target"),
                    &binding.name,
                    call_arguments(method, binding),
                );
                if method.has_return_value() {
                    callback.push(IRNode::ret(Some(call)));
                } else {
                    callback.push(IRNode::expr_stmt(call));
                }
            }
        }
        None if method.has_return_value() => {
            callback.push(IRNode::ret(Some(IRNode::Raw(method.default_return.clone()))));
        }
        None => {}
    }
    callback
}

/// `p<pos>`, or `Utils.<T>castParam(...)` when the declared type differs from
/// the callback's parameter type.
fn call_arguments(method: &ListenerMethod, binding: &MethodViewBinding) -> Vec<IRNode> {
    binding
        .parameters
        .iter()
        .enumerate()
        .map(|(index, parameter)| {
            let position = parameter.listener_position;
            let argument = IRNode::id(format!("p{position}"));
            if !parameter.requires_cast(&method.parameters) {
                return argument;
            }
            IRNode::generic_static_call(
                names::utils(),
                vec![parameter.type_name.clone()],
                "castParam",
                vec![
                    argument,
                    IRNode::string(&method.name),
                    IRNode::number(position.to_string()),
                    IRNode::string(&binding.name),
                    IRNode::number(index.to_string()),
                ],
            )
        })
        .collect()
}
