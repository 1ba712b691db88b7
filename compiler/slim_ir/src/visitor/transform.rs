//! Cross-type transformer.
//!
//! A [`SlimTransformer`] turns a slim tree into some other representation:
//! a host expression tree, a string, a hash. The walk visits children first
//! and hands their results to a `make_*` hook, so every hook sees its
//! children already transformed.
//!
//! Results are grouped by role. A lambda slot (a binary conversion) takes a
//! `Self::Lambda`, a parameter slot a `Self::Parameter`; both upcast into
//! `Self::Expression` through `Into`, so a transformer cannot hand an
//! arbitrary expression to a slot that needs a lambda.

use std::sync::Arc;

use slim_stack::ensure_sufficient_stack;

use crate::{
    ArgumentProvider, BinaryExpressionSlim, BlockExpressionSlim, CatchBlockSlim,
    ConditionalExpressionSlim, ConstantExpressionSlim, DefaultExpressionSlim, ElementInitSlim,
    ExpressionSlim, GotoExpressionSlim, IndexExpressionSlim, InvocationExpressionSlim,
    LabelExpressionSlim, LabelTargetSlim, LambdaExpressionSlim, ListInitExpressionSlim,
    LoopExpressionSlim, MemberAssignmentSlim, MemberBindingSlim, MemberExpressionSlim,
    MemberInitExpressionSlim, MemberListBindingSlim, MemberMemberBindingSlim,
    MethodCallExpressionSlim, NewArrayExpressionSlim, NewExpressionSlim, ParameterExpressionSlim,
    SlimError, SwitchCaseSlim, SwitchExpressionSlim, TryExpressionSlim, TypeBinaryExpressionSlim,
    UnaryExpressionSlim,
};

/// Cross-type transformer over slim trees.
///
/// `visit_*` hooks default to the `walk_*` traversal; `make_*` hooks are
/// required and build one result from the node and its transformed
/// children. Leaves (constant, default, parameter, label target) only get
/// the node.
pub trait SlimTransformer {
    type Expression;
    type Lambda: Into<Self::Expression>;
    type Parameter: Into<Self::Expression>;
    type New: Into<Self::Expression>;
    type ElementInit;
    type MemberBinding;
    type MemberAssignment: Into<Self::MemberBinding>;
    type MemberListBinding: Into<Self::MemberBinding>;
    type MemberMemberBinding: Into<Self::MemberBinding>;
    type CatchBlock;
    type SwitchCase;
    type LabelTarget;
    type Error: From<SlimError>;

    /// Transform any node, dispatching on its kind.
    fn visit(&mut self, node: &ExpressionSlim) -> Result<Self::Expression, Self::Error> {
        ensure_sufficient_stack(|| walk_expression(self, node))
    }

    fn visit_binary(&mut self, node: &Arc<BinaryExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        walk_binary(self, node)
    }

    fn visit_unary(&mut self, node: &Arc<UnaryExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let operand = node.operand().map(|operand| self.visit(operand)).transpose()?;
        self.make_unary(node, operand)
    }

    fn visit_conditional(&mut self, node: &Arc<ConditionalExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        walk_conditional(self, node)
    }

    fn visit_constant(&mut self, node: &Arc<ConstantExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        self.make_constant(node)
    }

    fn visit_default(&mut self, node: &Arc<DefaultExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        self.make_default(node)
    }

    fn visit_parameter(&mut self, node: &Arc<ParameterExpressionSlim>) -> Result<Self::Parameter, Self::Error> {
        self.make_parameter(node)
    }

    fn visit_lambda(&mut self, node: &Arc<LambdaExpressionSlim>) -> Result<Self::Lambda, Self::Error> {
        walk_lambda(self, node)
    }

    fn visit_invocation(&mut self, node: &Arc<InvocationExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let expression = self.visit(node.expression())?;
        let arguments = visit_all(self, node.argument_list().as_slice())?;
        self.make_invocation(node, expression, arguments)
    }

    fn visit_method_call(&mut self, node: &Arc<MethodCallExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let object = node.object().map(|object| self.visit(object)).transpose()?;
        let arguments = visit_all(self, node.argument_list().as_slice())?;
        self.make_method_call(node, object, arguments)
    }

    fn visit_new(&mut self, node: &Arc<NewExpressionSlim>) -> Result<Self::New, Self::Error> {
        let arguments = visit_all(self, node.argument_list().as_slice())?;
        self.make_new(node, arguments)
    }

    fn visit_new_array(&mut self, node: &Arc<NewArrayExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let expressions = visit_all(self, node.argument_list().as_slice())?;
        self.make_new_array(node, expressions)
    }

    fn visit_index(&mut self, node: &Arc<IndexExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let object = self.visit(node.object())?;
        let arguments = visit_all(self, node.argument_list().as_slice())?;
        self.make_index(node, object, arguments)
    }

    fn visit_member(&mut self, node: &Arc<MemberExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let expression = node.expression().map(|expression| self.visit(expression)).transpose()?;
        self.make_member(node, expression)
    }

    fn visit_list_init(&mut self, node: &Arc<ListInitExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let new_expression = self.visit_new(node.new_expression())?;
        let initializers = node
            .initializers()
            .iter()
            .map(|init| self.visit_element_init(init))
            .collect::<Result<Vec<_>, _>>()?;
        self.make_list_init(node, new_expression, initializers)
    }

    fn visit_member_init(&mut self, node: &Arc<MemberInitExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let new_expression = self.visit_new(node.new_expression())?;
        let bindings = node
            .bindings()
            .iter()
            .map(|binding| self.visit_member_binding(binding))
            .collect::<Result<Vec<_>, _>>()?;
        self.make_member_init(node, new_expression, bindings)
    }

    fn visit_type_binary(&mut self, node: &Arc<TypeBinaryExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let expression = self.visit(node.expression())?;
        self.make_type_binary(node, expression)
    }

    fn visit_block(&mut self, node: &Arc<BlockExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        walk_block(self, node)
    }

    fn visit_goto(&mut self, node: &Arc<GotoExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let target = self.visit_label_target(node.target())?;
        let value = node.value().map(|value| self.visit(value)).transpose()?;
        self.make_goto(node, target, value)
    }

    fn visit_label(&mut self, node: &Arc<LabelExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let target = self.visit_label_target(node.target())?;
        let default_value = node.default_value().map(|value| self.visit(value)).transpose()?;
        self.make_label(node, target, default_value)
    }

    fn visit_loop(&mut self, node: &Arc<LoopExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        let body = self.visit(node.body())?;
        let break_label = node.break_label().map(|label| self.visit_label_target(label)).transpose()?;
        let continue_label = node
            .continue_label()
            .map(|label| self.visit_label_target(label))
            .transpose()?;
        self.make_loop(node, body, break_label, continue_label)
    }

    fn visit_switch(&mut self, node: &Arc<SwitchExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        walk_switch(self, node)
    }

    fn visit_try(&mut self, node: &Arc<TryExpressionSlim>) -> Result<Self::Expression, Self::Error> {
        walk_try(self, node)
    }

    fn visit_element_init(&mut self, node: &Arc<ElementInitSlim>) -> Result<Self::ElementInit, Self::Error> {
        let arguments = visit_all(self, node.argument_list().as_slice())?;
        self.make_element_init(node, arguments)
    }

    fn visit_member_binding(&mut self, node: &MemberBindingSlim) -> Result<Self::MemberBinding, Self::Error> {
        Ok(match node {
            MemberBindingSlim::Assignment(binding) => self.visit_member_assignment(binding)?.into(),
            MemberBindingSlim::ListBinding(binding) => self.visit_member_list_binding(binding)?.into(),
            MemberBindingSlim::MemberBinding(binding) => self.visit_member_member_binding(binding)?.into(),
        })
    }

    fn visit_member_assignment(
        &mut self,
        node: &Arc<MemberAssignmentSlim>,
    ) -> Result<Self::MemberAssignment, Self::Error> {
        let expression = self.visit(node.expression())?;
        self.make_member_assignment(node, expression)
    }

    fn visit_member_list_binding(
        &mut self,
        node: &Arc<MemberListBindingSlim>,
    ) -> Result<Self::MemberListBinding, Self::Error> {
        let initializers = node
            .initializers()
            .iter()
            .map(|init| self.visit_element_init(init))
            .collect::<Result<Vec<_>, _>>()?;
        self.make_member_list_binding(node, initializers)
    }

    fn visit_member_member_binding(
        &mut self,
        node: &Arc<MemberMemberBindingSlim>,
    ) -> Result<Self::MemberMemberBinding, Self::Error> {
        let bindings = node
            .bindings()
            .iter()
            .map(|binding| self.visit_member_binding(binding))
            .collect::<Result<Vec<_>, _>>()?;
        self.make_member_member_binding(node, bindings)
    }

    fn visit_catch_block(&mut self, node: &Arc<CatchBlockSlim>) -> Result<Self::CatchBlock, Self::Error> {
        let variable = node.variable().map(|variable| self.visit_parameter(variable)).transpose()?;
        let body = self.visit(node.body())?;
        let filter = node.filter().map(|filter| self.visit(filter)).transpose()?;
        self.make_catch_block(node, variable, body, filter)
    }

    fn visit_switch_case(&mut self, node: &Arc<SwitchCaseSlim>) -> Result<Self::SwitchCase, Self::Error> {
        let test_values = visit_all(self, node.test_values())?;
        let body = self.visit(node.body())?;
        self.make_switch_case(node, test_values, body)
    }

    fn visit_label_target(&mut self, node: &Arc<LabelTargetSlim>) -> Result<Self::LabelTarget, Self::Error> {
        self.make_label_target(node)
    }

    // Builders

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

    fn make_block(
        &mut self,
        node: &Arc<BlockExpressionSlim>,
        variables: Vec<Self::Parameter>,
        expressions: Vec<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_goto(
        &mut self,
        node: &Arc<GotoExpressionSlim>,
        target: Self::LabelTarget,
        value: Option<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_label(
        &mut self,
        node: &Arc<LabelExpressionSlim>,
        target: Self::LabelTarget,
        default_value: Option<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_loop(
        &mut self,
        node: &Arc<LoopExpressionSlim>,
        body: Self::Expression,
        break_label: Option<Self::LabelTarget>,
        continue_label: Option<Self::LabelTarget>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_switch(
        &mut self,
        node: &Arc<SwitchExpressionSlim>,
        switch_value: Self::Expression,
        cases: Vec<Self::SwitchCase>,
        default_body: Option<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_try(
        &mut self,
        node: &Arc<TryExpressionSlim>,
        body: Self::Expression,
        handlers: Vec<Self::CatchBlock>,
        finally: Option<Self::Expression>,
        fault: Option<Self::Expression>,
    ) -> Result<Self::Expression, Self::Error>;

    fn make_catch_block(
        &mut self,
        node: &Arc<CatchBlockSlim>,
        variable: Option<Self::Parameter>,
        body: Self::Expression,
        filter: Option<Self::Expression>,
    ) -> Result<Self::CatchBlock, Self::Error>;

    fn make_switch_case(
        &mut self,
        node: &Arc<SwitchCaseSlim>,
        test_values: Vec<Self::Expression>,
        body: Self::Expression,
    ) -> Result<Self::SwitchCase, Self::Error>;

    fn make_label_target(&mut self, node: &Arc<LabelTargetSlim>) -> Result<Self::LabelTarget, Self::Error>;

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

fn visit_all<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    nodes: &[ExpressionSlim],
) -> Result<Vec<T::Expression>, T::Error> {
    nodes.iter().map(|node| transformer.visit(node)).collect()
}

/// Dispatch to the `visit_*` hook for the node's kind and upcast the
/// result.
pub fn walk_expression<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    node: &ExpressionSlim,
) -> Result<T::Expression, T::Error> {
    match node {
        ExpressionSlim::Binary(node) => transformer.visit_binary(node),
        ExpressionSlim::Unary(node) => transformer.visit_unary(node),
        ExpressionSlim::Conditional(node) => transformer.visit_conditional(node),
        ExpressionSlim::Constant(node) => transformer.visit_constant(node),
        ExpressionSlim::Default(node) => transformer.visit_default(node),
        ExpressionSlim::Parameter(node) => transformer.visit_parameter(node).map(Into::into),
        ExpressionSlim::Lambda(node) => transformer.visit_lambda(node).map(Into::into),
        ExpressionSlim::Invocation(node) => transformer.visit_invocation(node),
        ExpressionSlim::MethodCall(node) => transformer.visit_method_call(node),
        ExpressionSlim::New(node) => transformer.visit_new(node).map(Into::into),
        ExpressionSlim::NewArray(node) => transformer.visit_new_array(node),
        ExpressionSlim::Index(node) => transformer.visit_index(node),
        ExpressionSlim::Member(node) => transformer.visit_member(node),
        ExpressionSlim::ListInit(node) => transformer.visit_list_init(node),
        ExpressionSlim::MemberInit(node) => transformer.visit_member_init(node),
        ExpressionSlim::TypeBinary(node) => transformer.visit_type_binary(node),
        ExpressionSlim::Block(node) => transformer.visit_block(node),
        ExpressionSlim::Goto(node) => transformer.visit_goto(node),
        ExpressionSlim::Label(node) => transformer.visit_label(node),
        ExpressionSlim::Loop(node) => transformer.visit_loop(node),
        ExpressionSlim::Switch(node) => transformer.visit_switch(node),
        ExpressionSlim::Try(node) => transformer.visit_try(node),
    }
}

pub fn walk_binary<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    node: &Arc<BinaryExpressionSlim>,
) -> Result<T::Expression, T::Error> {
    let left = transformer.visit(node.left())?;
    let right = transformer.visit(node.right())?;
    let conversion = node
        .conversion()
        .map(|conversion| transformer.visit_lambda(conversion))
        .transpose()?;
    transformer.make_binary(node, left, conversion, right)
}

pub fn walk_conditional<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    node: &Arc<ConditionalExpressionSlim>,
) -> Result<T::Expression, T::Error> {
    let test = transformer.visit(node.test())?;
    let if_true = transformer.visit(node.if_true())?;
    let if_false = transformer.visit(node.if_false())?;
    transformer.make_conditional(node, test, if_true, if_false)
}

pub fn walk_lambda<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    node: &Arc<LambdaExpressionSlim>,
) -> Result<T::Lambda, T::Error> {
    let body = transformer.visit(node.body())?;
    let parameters = node
        .parameters()
        .iter()
        .map(|parameter| transformer.visit_parameter(parameter))
        .collect::<Result<Vec<_>, _>>()?;
    transformer.make_lambda(node, body, parameters)
}

pub fn walk_block<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    node: &Arc<BlockExpressionSlim>,
) -> Result<T::Expression, T::Error> {
    let variables = node
        .variables()
        .iter()
        .map(|variable| transformer.visit_parameter(variable))
        .collect::<Result<Vec<_>, _>>()?;
    let expressions = visit_all(transformer, node.expressions())?;
    transformer.make_block(node, variables, expressions)
}

pub fn walk_switch<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    node: &Arc<SwitchExpressionSlim>,
) -> Result<T::Expression, T::Error> {
    let switch_value = transformer.visit(node.switch_value())?;
    let cases = node
        .cases()
        .iter()
        .map(|case| transformer.visit_switch_case(case))
        .collect::<Result<Vec<_>, _>>()?;
    let default_body = node.default_body().map(|body| transformer.visit(body)).transpose()?;
    transformer.make_switch(node, switch_value, cases, default_body)
}

pub fn walk_try<T: SlimTransformer + ?Sized>(
    transformer: &mut T,
    node: &Arc<TryExpressionSlim>,
) -> Result<T::Expression, T::Error> {
    let body = transformer.visit(node.body())?;
    let handlers = node
        .handlers()
        .iter()
        .map(|handler| transformer.visit_catch_block(handler))
        .collect::<Result<Vec<_>, _>>()?;
    let finally = node.finally().map(|finally| transformer.visit(finally)).transpose()?;
    let fault = node.fault().map(|fault| transformer.visit(fault)).transpose()?;
    transformer.make_try(node, body, handlers, finally, fault)
}
