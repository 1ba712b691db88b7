//! Expression-only transformer.
//!
//! Converters into tree models without statements implement
//! [`ExpressionOnlyTransformer`]. It has no associated types or hooks for
//! block, goto, label, loop, switch and try, so an implementor cannot opt
//! back into them. The shared [`SlimTransformer`] traversal runs through a
//! private adapter that turns any of those nodes into
//! [`SlimError::Unsupported`].

use std::sync::Arc;

use super::SlimTransformer;
use crate::{
    BinaryExpressionSlim, BlockExpressionSlim, CatchBlockSlim, ConditionalExpressionSlim,
    ConstantExpressionSlim, DefaultExpressionSlim, ElementInitSlim, ExpressionSlim,
    GotoExpressionSlim, IndexExpressionSlim, InvocationExpressionSlim, LabelExpressionSlim,
    LabelTargetSlim, LambdaExpressionSlim, ListInitExpressionSlim, LoopExpressionSlim,
    MemberAssignmentSlim, MemberExpressionSlim, MemberInitExpressionSlim, MemberListBindingSlim,
    MemberMemberBindingSlim, MethodCallExpressionSlim, NewArrayExpressionSlim, NewExpressionSlim,
    NodeKind, ParameterExpressionSlim, SlimError, SwitchCaseSlim, SwitchExpressionSlim,
    TryExpressionSlim, TypeBinaryExpressionSlim, UnaryExpressionSlim,
};

/// Result type of the statement roles in an expression-only traversal.
/// Uninhabited: no such result is ever produced.
#[derive(Debug)]
pub enum Unsupported {}

/// A [`SlimTransformer`] restricted to expression kinds.
///
/// The hooks mirror [`SlimTransformer`]'s `make_*` hooks for every
/// non-statement kind.
pub trait ExpressionOnlyTransformer {
    type Expression;
    type Lambda: Into<Self::Expression>;
    type Parameter: Into<Self::Expression>;
    type New: Into<Self::Expression>;
    type ElementInit;
    type MemberBinding;
    type MemberAssignment: Into<Self::MemberBinding>;
    type MemberListBinding: Into<Self::MemberBinding>;
    type MemberMemberBinding: Into<Self::MemberBinding>;
    type Error: From<SlimError>;

    /// Transform `node`.
    ///
    /// # Errors
    ///
    /// `Unsupported` on the first statement node reached, plus whatever the
    /// hooks return.
    #[tracing::instrument(level = "debug", skip_all)]
    fn transform(&mut self, node: &ExpressionSlim) -> Result<Self::Expression, Self::Error> {
        Restricted(self).visit(node)
    }

    fn make_binary(
        &mut self,
        node: &Arc<BinaryExpressionSlim>,
        left: Self::Expression,
        conversion: Option<Self::Lambda>,
        right: Self::Expression,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_unary(
        &mut self,
        node: &Arc<UnaryExpressionSlim>,
        operand: Option<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_conditional(
        &mut self,
        node: &Arc<ConditionalExpressionSlim>,
        test: Self::Expression,
        if_true: Self::Expression,
        if_false: Self::Expression,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_constant(&mut self, node: &Arc<ConstantExpressionSlim>) -> Result<Self::Expression, Self::Error>;

    fn make_default(&mut self, node: &Arc<DefaultExpressionSlim>) -> Result<Self::Expression, Self::Error>;

    fn make_parameter(&mut self, node: &Arc<ParameterExpressionSlim>) -> Result<Self::Parameter, Self::Error>;

    fn make_lambda(
        &mut self,
        node: &Arc<LambdaExpressionSlim>,
        body: Self::Expression,
        parameters: Vec<Self::Parameter>,
    ) -> Result<Self::Lambda, Self::Error>;

    fn make_invocation(
        &mut self,
        node: &Arc<InvocationExpressionSlim>,
        expression: Self::Expression,
        arguments: Vec<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_method_call(
        &mut self,
        node: &Arc<MethodCallExpressionSlim>,
        object: Option<Self::Expression>,
        arguments: Vec<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_new(
        &mut self,
        node: &Arc<NewExpressionSlim>,
        arguments: Vec<Self::Expression>,
    ) -> Result<Self::New, Self::Error>;

    fn make_new_array(
        &mut self,
        node: &Arc<NewArrayExpressionSlim>,
        expressions: Vec<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_index(
        &mut self,
        node: &Arc<IndexExpressionSlim>,
        object: Self::Expression,
        arguments: Vec<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_member(
        &mut self,
        node: &Arc<MemberExpressionSlim>,
        expression: Option<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_list_init(
        &mut self,
        node: &Arc<ListInitExpressionSlim>,
        new_expression: Self::New,
        initializers: Vec<Self::ElementInit>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_member_init(
        &mut self,
        node: &Arc<MemberInitExpressionSlim>,
        new_expression: Self::New,
        bindings: Vec<Self::MemberBinding>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_type_binary(
        &mut self,
        node: &Arc<TypeBinaryExpressionSlim>,
        expression: Self::Expression,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_element_init(
        &mut self,
        node: &Arc<ElementInitSlim>,
        arguments: Vec<Self::Expression>,
    ) -> Result<Self::ElementInit, Self::Error>;

    fn make_member_assignment(
        &mut self,
        node: &Arc<MemberAssignmentSlim>,
        expression: Self::Expression,
    ) -> Result<Self::MemberAssignment, Self::Error>;

    fn make_member_list_binding(
        &mut self,
        node: &Arc<MemberListBindingSlim>,
        initializers: Vec<Self::ElementInit>,
    ) -> Result<Self::MemberListBinding, Self::Error>;

    fn make_member_member_binding(
        &mut self,
        node: &Arc<MemberMemberBindingSlim>,
        bindings: Vec<Self::MemberBinding>,
    ) -> Result<Self::MemberMemberBinding, Self::Error>;
}

/// Runs an [`ExpressionOnlyTransformer`] as a [`SlimTransformer`].
struct Restricted<'a, T: ?Sized>(&'a mut T);

fn unsupported<E: From<SlimError>>(kind: NodeKind) -> E {
    tracing::debug!(%kind, "expression-only transformer reached a statement node");
    E::from(SlimError::Unsupported { kind })
}

impl<T: ExpressionOnlyTransformer + ?Sized> SlimTransformer for Restricted<'_, T> {
    type Expression = T::Expression;
    type Lambda = T::Lambda;
    type Parameter = T::Parameter;
    type New = T::New;
    type ElementInit = T::ElementInit;
    type MemberBinding = T::MemberBinding;
    type MemberAssignment = T::MemberAssignment;
    type MemberListBinding = T::MemberListBinding;
    type MemberMemberBinding = T::MemberMemberBinding;
    type CatchBlock = Unsupported;
    type SwitchCase = Unsupported;
    type LabelTarget = Unsupported;
    type Error = T::Error;

    // Statement kinds are rejected before their children are visited.

    fn visit_block(&mut self, _: &Arc<BlockExpressionSlim>) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Block))
    }

    fn visit_goto(&mut self, _: &Arc<GotoExpressionSlim>) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Goto))
    }

    fn visit_label(&mut self, _: &Arc<LabelExpressionSlim>) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Label))
    }

    fn visit_loop(&mut self, _: &Arc<LoopExpressionSlim>) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Loop))
    }

    fn visit_switch(&mut self, _: &Arc<SwitchExpressionSlim>) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Switch))
    }

    fn visit_try(&mut self, _: &Arc<TryExpressionSlim>) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Try))
    }

    fn make_block(
        &mut self,
        _: &Arc<BlockExpressionSlim>,
        _: Vec<T::Parameter>,
        _: Vec<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Block))
    }

    fn make_goto(
        &mut self,
        _: &Arc<GotoExpressionSlim>,
        target: Unsupported,
        _: Option<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        match target {}
    }

    fn make_label(
        &mut self,
        _: &Arc<LabelExpressionSlim>,
        target: Unsupported,
        _: Option<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        match target {}
    }

    fn make_loop(
        &mut self,
        _: &Arc<LoopExpressionSlim>,
        _: T::Expression,
        _: Option<Unsupported>,
        _: Option<Unsupported>,
    ) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Loop))
    }

    fn make_switch(
        &mut self,
        _: &Arc<SwitchExpressionSlim>,
        _: T::Expression,
        _: Vec<Unsupported>,
        _: Option<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Switch))
    }

    fn make_try(
        &mut self,
        _: &Arc<TryExpressionSlim>,
        _: T::Expression,
        _: Vec<Unsupported>,
        _: Option<T::Expression>,
        _: Option<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        Err(unsupported(NodeKind::Try))
    }

    fn make_catch_block(
        &mut self,
        _: &Arc<CatchBlockSlim>,
        _: Option<T::Parameter>,
        _: T::Expression,
        _: Option<T::Expression>,
    ) -> Result<Unsupported, T::Error> {
        Err(unsupported(NodeKind::Try))
    }

    fn make_switch_case(
        &mut self,
        _: &Arc<SwitchCaseSlim>,
        _: Vec<T::Expression>,
        _: T::Expression,
    ) -> Result<Unsupported, T::Error> {
        Err(unsupported(NodeKind::Switch))
    }

    fn make_label_target(&mut self, _: &Arc<LabelTargetSlim>) -> Result<Unsupported, T::Error> {
        Err(unsupported(NodeKind::Label))
    }

    // Expression kinds forward to the restricted transformer.

    fn make_binary(
        &mut self,
        node: &Arc<BinaryExpressionSlim>,
        left: T::Expression,
        conversion: Option<T::Lambda>,
        right: T::Expression,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_binary(node, left, conversion, right)
    }

    fn make_unary(
        &mut self,
        node: &Arc<UnaryExpressionSlim>,
        operand: Option<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_unary(node, operand)
    }

    fn make_conditional(
        &mut self,
        node: &Arc<ConditionalExpressionSlim>,
        test: T::Expression,
        if_true: T::Expression,
        if_false: T::Expression,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_conditional(node, test, if_true, if_false)
    }

    fn make_constant(&mut self, node: &Arc<ConstantExpressionSlim>) -> Result<T::Expression, T::Error> {
        self.0.make_constant(node)
    }

    fn make_default(&mut self, node: &Arc<DefaultExpressionSlim>) -> Result<T::Expression, T::Error> {
        self.0.make_default(node)
    }

    fn make_parameter(&mut self, node: &Arc<ParameterExpressionSlim>) -> Result<T::Parameter, T::Error> {
        self.0.make_parameter(node)
    }

    fn make_lambda(
        &mut self,
        node: &Arc<LambdaExpressionSlim>,
        body: T::Expression,
        parameters: Vec<T::Parameter>,
    ) -> Result<T::Lambda, T::Error> {
        self.0.make_lambda(node, body, parameters)
    }

    fn make_invocation(
        &mut self,
        node: &Arc<InvocationExpressionSlim>,
        expression: T::Expression,
        arguments: Vec<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_invocation(node, expression, arguments)
    }

    fn make_method_call(
        &mut self,
        node: &Arc<MethodCallExpressionSlim>,
        object: Option<T::Expression>,
        arguments: Vec<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_method_call(node, object, arguments)
    }

    fn make_new(&mut self, node: &Arc<NewExpressionSlim>, arguments: Vec<T::Expression>) -> Result<T::New, T::Error> {
        self.0.make_new(node, arguments)
    }

    fn make_new_array(
        &mut self,
        node: &Arc<NewArrayExpressionSlim>,
        expressions: Vec<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_new_array(node, expressions)
    }

    fn make_index(
        &mut self,
        node: &Arc<IndexExpressionSlim>,
        object: T::Expression,
        arguments: Vec<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_index(node, object, arguments)
    }

    fn make_member(
        &mut self,
        node: &Arc<MemberExpressionSlim>,
        expression: Option<T::Expression>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_member(node, expression)
    }

    fn make_list_init(
        &mut self,
        node: &Arc<ListInitExpressionSlim>,
        new_expression: T::New,
        initializers: Vec<T::ElementInit>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_list_init(node, new_expression, initializers)
    }

    fn make_member_init(
        &mut self,
        node: &Arc<MemberInitExpressionSlim>,
        new_expression: T::New,
        bindings: Vec<T::MemberBinding>,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_member_init(node, new_expression, bindings)
    }

    fn make_type_binary(
        &mut self,
        node: &Arc<TypeBinaryExpressionSlim>,
        expression: T::Expression,
    ) -> Result<T::Expression, T::Error> {
        self.0.make_type_binary(node, expression)
    }

    fn make_element_init(
        &mut self,
        node: &Arc<ElementInitSlim>,
        arguments: Vec<T::Expression>,
    ) -> Result<T::ElementInit, T::Error> {
        self.0.make_element_init(node, arguments)
    }

    fn make_member_assignment(
        &mut self,
        node: &Arc<MemberAssignmentSlim>,
        expression: T::Expression,
    ) -> Result<T::MemberAssignment, T::Error> {
        self.0.make_member_assignment(node, expression)
    }

    fn make_member_list_binding(
        &mut self,
        node: &Arc<MemberListBindingSlim>,
        initializers: Vec<T::ElementInit>,
    ) -> Result<T::MemberListBinding, T::Error> {
        self.0.make_member_list_binding(node, initializers)
    }

    fn make_member_member_binding(
        &mut self,
        node: &Arc<MemberMemberBindingSlim>,
        bindings: Vec<T::MemberBinding>,
    ) -> Result<T::MemberMemberBinding, T::Error> {
        self.0.make_member_member_binding(node, bindings)
    }
}
