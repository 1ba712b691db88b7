//! Structural hashing, consistent with [`crate::equal`].
//!
//! # Strategy
//!
//! Recursive depth-first traversal. For each node:
//! 1. Hash the node kind and operator discriminant
//! 2. Hash non-child data (handles, flags, constant values)
//! 3. Recurse into children in the same order equality visits them
//!
//! Node addresses are never hashed. Bound parameters contribute their
//! binding ordinal and labels their first-occurrence ordinal, so trees that
//! differ only in parameter or label names hash alike.

use std::hash::{Hash, Hasher};
use std::slice;
use std::sync::Arc;

use rustc_hash::FxHasher;
use slim_ir::{
    ArgumentProvider, CatchBlockSlim, ElementInitSlim, ExpressionSlim, LabelTargetSlim,
    LambdaExpressionSlim, MemberBindingSlim, NewExpressionSlim, ParameterExpressionSlim,
};
use slim_stack::ensure_sufficient_stack;

use crate::scope::{Labels, Scope};

#[derive(Default)]
pub(crate) struct Fingerprint {
    scope: Scope,
    labels: Labels,
    state: FxHasher,
}

impl Fingerprint {
    pub(crate) fn finish(&self) -> u64 {
        self.state.finish()
    }

    pub(crate) fn expression(&mut self, node: &ExpressionSlim) {
        ensure_sufficient_stack(|| self.expression_inner(node));
    }

    #[expect(clippy::too_many_lines, reason = "exhaustive ExpressionSlim hashing dispatch")]
    fn expression_inner(&mut self, node: &ExpressionSlim) {
        node.kind().hash(&mut self.state);
        node.node_type().hash(&mut self.state);

        match node {
            ExpressionSlim::Binary(node) => {
                node.is_lifted_to_null().hash(&mut self.state);
                node.method().hash(&mut self.state);
                self.expression(node.left());
                self.expression(node.right());
                node.conversion().is_some().hash(&mut self.state);
                if let Some(conversion) = node.conversion() {
                    self.lambda(conversion);
                }
            }
            ExpressionSlim::Unary(node) => {
                node.ty().hash(&mut self.state);
                node.method().hash(&mut self.state);
                self.optional(node.operand());
            }
            ExpressionSlim::Conditional(node) => {
                node.explicit_type().hash(&mut self.state);
                self.expression(node.test());
                self.expression(node.if_true());
                self.expression(node.if_false());
            }
            ExpressionSlim::Constant(node) => {
                node.ty().hash(&mut self.state);
                node.value().hash(&mut self.state);
            }
            ExpressionSlim::Default(node) => node.ty().hash(&mut self.state),
            ExpressionSlim::Parameter(node) => self.parameter(node),
            ExpressionSlim::Lambda(node) => self.lambda(node),
            ExpressionSlim::Invocation(node) => {
                self.expression(node.expression());
                self.arguments(&**node);
            }
            ExpressionSlim::MethodCall(node) => {
                node.method().hash(&mut self.state);
                self.optional(node.object());
                self.arguments(&**node);
            }
            ExpressionSlim::New(node) => self.new_expression(node),
            ExpressionSlim::NewArray(node) => {
                node.element_type().hash(&mut self.state);
                self.arguments(&**node);
            }
            ExpressionSlim::Index(node) => {
                node.indexer().hash(&mut self.state);
                self.expression(node.object());
                self.arguments(&**node);
            }
            ExpressionSlim::Member(node) => {
                node.member().hash(&mut self.state);
                self.optional(node.expression());
            }
            ExpressionSlim::ListInit(node) => {
                self.new_expression(node.new_expression());
                self.element_inits(node.initializers());
            }
            ExpressionSlim::MemberInit(node) => {
                self.new_expression(node.new_expression());
                self.bindings(node.bindings());
            }
            ExpressionSlim::TypeBinary(node) => {
                node.type_operand().hash(&mut self.state);
                self.expression(node.expression());
            }
            ExpressionSlim::Block(node) => {
                node.explicit_type().hash(&mut self.state);
                self.declarations(node.variables());
                self.scope.bind(node.variables());
                self.all(node.expressions());
                self.scope.unbind(node.variables());
            }
            ExpressionSlim::Goto(node) => {
                node.kind().hash(&mut self.state);
                node.ty().hash(&mut self.state);
                self.label(node.target());
                self.optional(node.value());
            }
            ExpressionSlim::Label(node) => {
                self.label(node.target());
                self.optional(node.default_value());
            }
            ExpressionSlim::Loop(node) => {
                self.optional_label(node.break_label());
                self.optional_label(node.continue_label());
                self.expression(node.body());
            }
            ExpressionSlim::Switch(node) => {
                node.ty().hash(&mut self.state);
                node.comparison().hash(&mut self.state);
                self.expression(node.switch_value());
                node.cases().len().hash(&mut self.state);
                for case in node.cases() {
                    self.all(case.test_values());
                    self.expression(case.body());
                }
                self.optional(node.default_body());
            }
            ExpressionSlim::Try(node) => {
                node.ty().hash(&mut self.state);
                self.expression(node.body());
                node.handlers().len().hash(&mut self.state);
                for handler in node.handlers() {
                    self.catch_block(handler);
                }
                self.optional(node.finally());
                self.optional(node.fault());
            }
        }
    }

    fn all(&mut self, nodes: &[ExpressionSlim]) {
        nodes.len().hash(&mut self.state);
        for node in nodes {
            self.expression(node);
        }
    }

    fn arguments<N: ArgumentProvider>(&mut self, node: &N) {
        self.all(node.argument_list().as_slice());
    }

    fn optional(&mut self, node: Option<&ExpressionSlim>) {
        node.is_some().hash(&mut self.state);
        if let Some(node) = node {
            self.expression(node);
        }
    }

    fn parameter(&mut self, node: &Arc<ParameterExpressionSlim>) {
        match self.scope.resolve(node) {
            Some(ordinal) => {
                0u8.hash(&mut self.state);
                ordinal.hash(&mut self.state);
            }
            None => {
                1u8.hash(&mut self.state);
                node.name().hash(&mut self.state);
                node.ty().hash(&mut self.state);
            }
        }
    }

    fn declarations(&mut self, parameters: &[Arc<ParameterExpressionSlim>]) {
        parameters.len().hash(&mut self.state);
        for parameter in parameters {
            parameter.ty().hash(&mut self.state);
        }
    }

    fn lambda(&mut self, node: &Arc<LambdaExpressionSlim>) {
        node.delegate_type().hash(&mut self.state);
        self.declarations(node.parameters());
        self.scope.bind(node.parameters());
        self.expression(node.body());
        self.scope.unbind(node.parameters());
    }

    fn new_expression(&mut self, node: &Arc<NewExpressionSlim>) {
        node.ty().hash(&mut self.state);
        node.constructor().hash(&mut self.state);
        node.members().hash(&mut self.state);
        self.arguments(&**node);
    }

    fn element_inits(&mut self, initializers: &[Arc<ElementInitSlim>]) {
        initializers.len().hash(&mut self.state);
        for initializer in initializers {
            initializer.add_method().hash(&mut self.state);
            self.arguments(&**initializer);
        }
    }

    fn bindings(&mut self, bindings: &[MemberBindingSlim]) {
        bindings.len().hash(&mut self.state);
        for binding in bindings {
            binding.binding_type().hash(&mut self.state);
            binding.member().hash(&mut self.state);
            match binding {
                MemberBindingSlim::Assignment(binding) => self.expression(binding.expression()),
                MemberBindingSlim::ListBinding(binding) => self.element_inits(binding.initializers()),
                MemberBindingSlim::MemberBinding(binding) => self.bindings(binding.bindings()),
            }
        }
    }

    fn label(&mut self, label: &Arc<LabelTargetSlim>) {
        label.ty().hash(&mut self.state);
        let ordinal = self.labels.ordinal(label);
        ordinal.hash(&mut self.state);
    }

    fn optional_label(&mut self, label: Option<&Arc<LabelTargetSlim>>) {
        label.is_some().hash(&mut self.state);
        if let Some(label) = label {
            self.label(label);
        }
    }

    fn catch_block(&mut self, handler: &Arc<CatchBlockSlim>) {
        handler.test().hash(&mut self.state);
        let variable = handler.variable().map(slice::from_ref).unwrap_or_default();
        self.declarations(variable);
        self.scope.bind(variable);
        self.optional(handler.filter());
        self.expression(handler.body());
        self.scope.unbind(variable);
    }
}
