//! Same-type rewriting visitor.
//!
//! Override `visit_*` to replace nodes; call the matching `walk_*` to keep
//! the default traversal for children. Walks rebuild through `update`, so
//! a visitor that replaces nothing returns the input tree itself.
//!
//! ```text
//! struct Inline { target: Arc<ParameterExpressionSlim>, value: ExpressionSlim }
//!
//! impl SlimVisitor for Inline {
//!     type Error = SlimError;
//!
//!     fn visit_parameter(&mut self, node: &Arc<ParameterExpressionSlim>) -> Result<ExpressionSlim, SlimError> {
//!         if Arc::ptr_eq(node, &self.target) {
//!             return Ok(self.value.clone());
//!         }
//!         Ok(ExpressionSlim::Parameter(Arc::clone(node)))
//!     }
//! }
//! ```

use std::sync::Arc;

use slim_stack::ensure_sufficient_stack;

use super::visit_each;
use crate::{
    ArgumentProvider, BinaryExpressionSlim, BlockExpressionSlim, CatchBlockSlim, ConditionalExpressionSlim,
    ConstantExpressionSlim, DefaultExpressionSlim, ElementInitSlim, ExpressionSlim,
    GotoExpressionSlim, IndexExpressionSlim, InvocationExpressionSlim, LabelExpressionSlim,
    LabelTargetSlim, LambdaExpressionSlim, ListInitExpressionSlim, LoopExpressionSlim,
    MemberAssignmentSlim, MemberBindingSlim, MemberExpressionSlim, MemberInitExpressionSlim,
    MemberListBindingSlim, MemberMemberBindingSlim, MethodCallExpressionSlim,
    NewArrayExpressionSlim, NewExpressionSlim, NodeKind, ParameterExpressionSlim, SlimError,
    SwitchCaseSlim, SwitchExpressionSlim, TryExpressionSlim, TypeBinaryExpressionSlim,
    UnaryExpressionSlim,
};

/// Same-type rewriting visitor.
///
/// Slots that require a specific kind (a binary's conversion lambda, a
/// lambda's parameters, the `new` of an initializer) are visited through
/// [`visit`](Self::visit) and converted back; returning another kind there
/// is a [`SlimError::SlotKindMismatch`].
pub trait SlimVisitor {
    type Error: From<SlimError>;

    /// Visit any node, dispatching on its kind.
    fn visit(&mut self, node: &ExpressionSlim) -> Result<ExpressionSlim, Self::Error> {
        ensure_sufficient_stack(|| walk_expression(self, node))
    }

    fn visit_binary(&mut self, node: &Arc<BinaryExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_binary(self, node)
    }

    fn visit_unary(&mut self, node: &Arc<UnaryExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_unary(self, node)
    }

    fn visit_conditional(&mut self, node: &Arc<ConditionalExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_conditional(self, node)
    }

    fn visit_constant(&mut self, node: &Arc<ConstantExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        Ok(ExpressionSlim::Constant(Arc::clone(node)))
    }

    fn visit_default(&mut self, node: &Arc<DefaultExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        Ok(ExpressionSlim::Default(Arc::clone(node)))
    }

    fn visit_parameter(&mut self, node: &Arc<ParameterExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        Ok(ExpressionSlim::Parameter(Arc::clone(node)))
    }

    fn visit_lambda(&mut self, node: &Arc<LambdaExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_lambda(self, node)
    }

    fn visit_invocation(&mut self, node: &Arc<InvocationExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_invocation(self, node)
    }

    fn visit_method_call(&mut self, node: &Arc<MethodCallExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_method_call(self, node)
    }

    fn visit_new(&mut self, node: &Arc<NewExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_new(self, node)
    }

    fn visit_new_array(&mut self, node: &Arc<NewArrayExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_new_array(self, node)
    }

    fn visit_index(&mut self, node: &Arc<IndexExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_index(self, node)
    }

    fn visit_member(&mut self, node: &Arc<MemberExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_member(self, node)
    }

    fn visit_list_init(&mut self, node: &Arc<ListInitExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_list_init(self, node)
    }

    fn visit_member_init(&mut self, node: &Arc<MemberInitExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_member_init(self, node)
    }

    fn visit_type_binary(&mut self, node: &Arc<TypeBinaryExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_type_binary(self, node)
    }

    fn visit_block(&mut self, node: &Arc<BlockExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_block(self, node)
    }

    fn visit_goto(&mut self, node: &Arc<GotoExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_goto(self, node)
    }

    fn visit_label(&mut self, node: &Arc<LabelExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_label(self, node)
    }

    fn visit_loop(&mut self, node: &Arc<LoopExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_loop(self, node)
    }

    fn visit_switch(&mut self, node: &Arc<SwitchExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_switch(self, node)
    }

    fn visit_try(&mut self, node: &Arc<TryExpressionSlim>) -> Result<ExpressionSlim, Self::Error> {
        walk_try(self, node)
    }

    // Role hooks: children that are not expressions.

    fn visit_element_init(&mut self, node: &Arc<ElementInitSlim>) -> Result<Arc<ElementInitSlim>, Self::Error> {
        walk_element_init(self, node)
    }

    fn visit_member_binding(&mut self, node: &MemberBindingSlim) -> Result<MemberBindingSlim, Self::Error> {
        walk_member_binding(self, node)
    }

    fn visit_member_assignment(
        &mut self,
        node: &Arc<MemberAssignmentSlim>,
    ) -> Result<Arc<MemberAssignmentSlim>, Self::Error> {
        let expression = self.visit(node.expression())?;
        Ok(node.update(expression))
    }

    fn visit_member_list_binding(
        &mut self,
        node: &Arc<MemberListBindingSlim>,
    ) -> Result<Arc<MemberListBindingSlim>, Self::Error> {
        let initializers = visit_each(node.initializers(), |init| self.visit_element_init(init))?;
        Ok(node.update(initializers.as_deref().unwrap_or(node.initializers())))
    }

    fn visit_member_member_binding(
        &mut self,
        node: &Arc<MemberMemberBindingSlim>,
    ) -> Result<Arc<MemberMemberBindingSlim>, Self::Error> {
        let bindings = visit_each(node.bindings(), |binding| self.visit_member_binding(binding))?;
        Ok(node.update(bindings.as_deref().unwrap_or(node.bindings())))
    }

    fn visit_catch_block(&mut self, node: &Arc<CatchBlockSlim>) -> Result<Arc<CatchBlockSlim>, Self::Error> {
        walk_catch_block(self, node)
    }

    fn visit_switch_case(&mut self, node: &Arc<SwitchCaseSlim>) -> Result<Arc<SwitchCaseSlim>, Self::Error> {
        walk_switch_case(self, node)
    }

    fn visit_label_target(&mut self, node: &Arc<LabelTargetSlim>) -> Result<Arc<LabelTargetSlim>, Self::Error> {
        Ok(Arc::clone(node))
    }
}

// Typed slots

fn mismatch<E: From<SlimError>>(slot: &'static str, expected: NodeKind, found: &ExpressionSlim) -> E {
    E::from(SlimError::SlotKindMismatch {
        slot,
        expected,
        found: found.kind(),
    })
}

fn visit_lambda_slot<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<LambdaExpressionSlim>,
    slot: &'static str,
) -> Result<Arc<LambdaExpressionSlim>, V::Error> {
    match visitor.visit(&ExpressionSlim::Lambda(Arc::clone(node)))? {
        ExpressionSlim::Lambda(lambda) => Ok(lambda),
        other => Err(mismatch(slot, NodeKind::Lambda, &other)),
    }
}

fn visit_parameter_slot<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<ParameterExpressionSlim>,
    slot: &'static str,
) -> Result<Arc<ParameterExpressionSlim>, V::Error> {
    match visitor.visit(&ExpressionSlim::Parameter(Arc::clone(node)))? {
        ExpressionSlim::Parameter(parameter) => Ok(parameter),
        other => Err(mismatch(slot, NodeKind::Parameter, &other)),
    }
}

fn visit_new_slot<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<NewExpressionSlim>,
    slot: &'static str,
) -> Result<Arc<NewExpressionSlim>, V::Error> {
    match visitor.visit(&ExpressionSlim::New(Arc::clone(node)))? {
        ExpressionSlim::New(new) => Ok(new),
        other => Err(mismatch(slot, NodeKind::New, &other)),
    }
}

fn visit_optional<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: Option<&ExpressionSlim>,
) -> Result<Option<ExpressionSlim>, V::Error> {
    node.map(|node| visitor.visit(node)).transpose()
}

// Walk functions

/// Dispatch to the `visit_*` hook for the node's kind.
pub fn walk_expression<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &ExpressionSlim,
) -> Result<ExpressionSlim, V::Error> {
    match node {
        ExpressionSlim::Binary(node) => visitor.visit_binary(node),
        ExpressionSlim::Unary(node) => visitor.visit_unary(node),
        ExpressionSlim::Conditional(node) => visitor.visit_conditional(node),
        ExpressionSlim::Constant(node) => visitor.visit_constant(node),
        ExpressionSlim::Default(node) => visitor.visit_default(node),
        ExpressionSlim::Parameter(node) => visitor.visit_parameter(node),
        ExpressionSlim::Lambda(node) => visitor.visit_lambda(node),
        ExpressionSlim::Invocation(node) => visitor.visit_invocation(node),
        ExpressionSlim::MethodCall(node) => visitor.visit_method_call(node),
        ExpressionSlim::New(node) => visitor.visit_new(node),
        ExpressionSlim::NewArray(node) => visitor.visit_new_array(node),
        ExpressionSlim::Index(node) => visitor.visit_index(node),
        ExpressionSlim::Member(node) => visitor.visit_member(node),
        ExpressionSlim::ListInit(node) => visitor.visit_list_init(node),
        ExpressionSlim::MemberInit(node) => visitor.visit_member_init(node),
        ExpressionSlim::TypeBinary(node) => visitor.visit_type_binary(node),
        ExpressionSlim::Block(node) => visitor.visit_block(node),
        ExpressionSlim::Goto(node) => visitor.visit_goto(node),
        ExpressionSlim::Label(node) => visitor.visit_label(node),
        ExpressionSlim::Loop(node) => visitor.visit_loop(node),
        ExpressionSlim::Switch(node) => visitor.visit_switch(node),
        ExpressionSlim::Try(node) => visitor.visit_try(node),
    }
}

pub fn walk_binary<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<BinaryExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let left = visitor.visit(node.left())?;
    let right = visitor.visit(node.right())?;
    let conversion = node
        .conversion()
        .map(|conversion| visit_lambda_slot(visitor, conversion, "binary conversion"))
        .transpose()?;
    Ok(node.update(left, conversion, right).into())
}

pub fn walk_unary<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<UnaryExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let operand = visit_optional(visitor, node.operand())?;
    Ok(node.update(operand)?.into())
}

pub fn walk_conditional<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<ConditionalExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let test = visitor.visit(node.test())?;
    let if_true = visitor.visit(node.if_true())?;
    let if_false = visitor.visit(node.if_false())?;
    Ok(node.update(test, if_true, if_false).into())
}

pub fn walk_lambda<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<LambdaExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let body = visitor.visit(node.body())?;
    let parameters = visit_each(node.parameters(), |parameter| {
        visit_parameter_slot(visitor, parameter, "lambda parameter")
    })?;
    Ok(node
        .update(body, parameters.as_deref().unwrap_or(node.parameters()))
        .into())
}

pub fn walk_invocation<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<InvocationExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let expression = visitor.visit(node.expression())?;
    let arguments = visit_each(node.argument_list().as_slice(), |argument| visitor.visit(argument))?;
    Ok(node.rewrite(expression, arguments).into())
}

pub fn walk_method_call<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<MethodCallExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let object = visit_optional(visitor, node.object())?;
    let arguments = visit_each(node.argument_list().as_slice(), |argument| visitor.visit(argument))?;
    Ok(node.rewrite(object, arguments)?.into())
}

pub fn walk_new<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<NewExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let arguments = visit_each(node.argument_list().as_slice(), |argument| visitor.visit(argument))?;
    Ok(node.rewrite(arguments).into())
}

pub fn walk_new_array<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<NewArrayExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let expressions = visit_each(node.argument_list().as_slice(), |expression| visitor.visit(expression))?;
    Ok(node.rewrite(expressions).into())
}

pub fn walk_index<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<IndexExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let object = visitor.visit(node.object())?;
    let arguments = visit_each(node.argument_list().as_slice(), |argument| visitor.visit(argument))?;
    Ok(node.rewrite(object, arguments).into())
}

pub fn walk_member<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<MemberExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let expression = visit_optional(visitor, node.expression())?;
    Ok(node.update(expression).into())
}

pub fn walk_list_init<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<ListInitExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let new_expression = visit_new_slot(visitor, node.new_expression(), "list initializer constructor")?;
    let initializers = visit_each(node.initializers(), |init| visitor.visit_element_init(init))?;
    let updated = node.update(
        new_expression,
        initializers.as_deref().unwrap_or(node.initializers()),
    )?;
    Ok(updated.into())
}

pub fn walk_member_init<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<MemberInitExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let new_expression = visit_new_slot(visitor, node.new_expression(), "member initializer constructor")?;
    let bindings = visit_each(node.bindings(), |binding| visitor.visit_member_binding(binding))?;
    Ok(node
        .update(new_expression, bindings.as_deref().unwrap_or(node.bindings()))
        .into())
}

pub fn walk_type_binary<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<TypeBinaryExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let expression = visitor.visit(node.expression())?;
    Ok(node.update(expression).into())
}

pub fn walk_block<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<BlockExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let variables = visit_each(node.variables(), |variable| {
        visit_parameter_slot(visitor, variable, "block variable")
    })?;
    let expressions = visit_each(node.expressions(), |expression| visitor.visit(expression))?;
    let updated = node.update(
        variables.as_deref().unwrap_or(node.variables()),
        expressions.as_deref().unwrap_or(node.expressions()),
    )?;
    Ok(updated.into())
}

pub fn walk_goto<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<GotoExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let target = visitor.visit_label_target(node.target())?;
    let value = visit_optional(visitor, node.value())?;
    Ok(node.update(target, value).into())
}

pub fn walk_label<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<LabelExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let target = visitor.visit_label_target(node.target())?;
    let default_value = visit_optional(visitor, node.default_value())?;
    Ok(node.update(target, default_value).into())
}

pub fn walk_loop<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<LoopExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let body = visitor.visit(node.body())?;
    let break_label = node
        .break_label()
        .map(|label| visitor.visit_label_target(label))
        .transpose()?;
    let continue_label = node
        .continue_label()
        .map(|label| visitor.visit_label_target(label))
        .transpose()?;
    Ok(node.update(break_label, continue_label, body).into())
}

pub fn walk_switch<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<SwitchExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let switch_value = visitor.visit(node.switch_value())?;
    let cases = visit_each(node.cases(), |case| visitor.visit_switch_case(case))?;
    let default_body = visit_optional(visitor, node.default_body())?;
    Ok(node
        .update(switch_value, cases.as_deref().unwrap_or(node.cases()), default_body)
        .into())
}

pub fn walk_try<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<TryExpressionSlim>,
) -> Result<ExpressionSlim, V::Error> {
    let body = visitor.visit(node.body())?;
    let handlers = visit_each(node.handlers(), |handler| visitor.visit_catch_block(handler))?;
    let finally = visit_optional(visitor, node.finally())?;
    let fault = visit_optional(visitor, node.fault())?;
    let updated = node.update(
        body,
        handlers.as_deref().unwrap_or(node.handlers()),
        finally,
        fault,
    )?;
    Ok(updated.into())
}

pub fn walk_catch_block<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<CatchBlockSlim>,
) -> Result<Arc<CatchBlockSlim>, V::Error> {
    let variable = node
        .variable()
        .map(|variable| visit_parameter_slot(visitor, variable, "catch variable"))
        .transpose()?;
    let body = visitor.visit(node.body())?;
    let filter = visit_optional(visitor, node.filter())?;
    Ok(node.update(variable, filter, body))
}

pub fn walk_switch_case<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<SwitchCaseSlim>,
) -> Result<Arc<SwitchCaseSlim>, V::Error> {
    let test_values = visit_each(node.test_values(), |value| visitor.visit(value))?;
    let body = visitor.visit(node.body())?;
    Ok(node.update(test_values.as_deref().unwrap_or(node.test_values()), body)?)
}

pub fn walk_element_init<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &Arc<ElementInitSlim>,
) -> Result<Arc<ElementInitSlim>, V::Error> {
    let arguments = visit_each(node.argument_list().as_slice(), |argument| visitor.visit(argument))?;
    Ok(node.rewrite(arguments))
}

/// Dispatch a binding to the hook for its binding type.
pub fn walk_member_binding<V: SlimVisitor + ?Sized>(
    visitor: &mut V,
    node: &MemberBindingSlim,
) -> Result<MemberBindingSlim, V::Error> {
    Ok(match node {
        MemberBindingSlim::Assignment(binding) => visitor.visit_member_assignment(binding)?.into(),
        MemberBindingSlim::ListBinding(binding) => visitor.visit_member_list_binding(binding)?.into(),
        MemberBindingSlim::MemberBinding(binding) => visitor.visit_member_member_binding(binding)?.into(),
    })
}
