//! Structural equality up to renaming of declared parameters and labels.

use std::slice;
use std::sync::Arc;

use slim_ir::{
    ArgumentProvider, CatchBlockSlim, ElementInitSlim, ExpressionSlim, LabelTargetSlim,
    LambdaExpressionSlim, MemberBindingSlim, NewExpressionSlim, ParameterExpressionSlim, SwitchCaseSlim,
};
use slim_stack::ensure_sufficient_stack;

use crate::scope::{Labels, Scope};

/// One equality run. Both trees are walked in lockstep, so declarations on
/// the two sides open in the same order and get the same ordinals.
#[derive(Default)]
pub(crate) struct Equality {
    left: Scope,
    right: Scope,
    left_labels: Labels,
    right_labels: Labels,
    next_label: usize,
}

fn arguments<N: ArgumentProvider>(node: &N) -> &[ExpressionSlim] {
    node.argument_list().as_slice()
}

/// Declarations match when their types do; names are irrelevant.
fn same_declarations(left: &[Arc<ParameterExpressionSlim>], right: &[Arc<ParameterExpressionSlim>]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.ty() == b.ty())
}

impl Equality {
    pub(crate) fn expression(&mut self, left: &ExpressionSlim, right: &ExpressionSlim) -> bool {
        ensure_sufficient_stack(|| self.expression_inner(left, right))
    }

    #[expect(clippy::too_many_lines, reason = "exhaustive ExpressionSlim comparison")]
    fn expression_inner(&mut self, left: &ExpressionSlim, right: &ExpressionSlim) -> bool {
        if left.kind() != right.kind() || left.node_type() != right.node_type() {
            return false;
        }
        match (left, right) {
            (ExpressionSlim::Binary(a), ExpressionSlim::Binary(b)) => {
                a.is_lifted_to_null() == b.is_lifted_to_null()
                    && a.method() == b.method()
                    && self.expression(a.left(), b.left())
                    && self.expression(a.right(), b.right())
                    && match (a.conversion(), b.conversion()) {
                        (None, None) => true,
                        (Some(a), Some(b)) => self.lambda(a, b),
                        _ => false,
                    }
            }
            (ExpressionSlim::Unary(a), ExpressionSlim::Unary(b)) => {
                a.ty() == b.ty() && a.method() == b.method() && self.optional(a.operand(), b.operand())
            }
            (ExpressionSlim::Conditional(a), ExpressionSlim::Conditional(b)) => {
                a.explicit_type() == b.explicit_type()
                    && self.expression(a.test(), b.test())
                    && self.expression(a.if_true(), b.if_true())
                    && self.expression(a.if_false(), b.if_false())
            }
            (ExpressionSlim::Constant(a), ExpressionSlim::Constant(b)) => a.ty() == b.ty() && a.value() == b.value(),
            (ExpressionSlim::Default(a), ExpressionSlim::Default(b)) => a.ty() == b.ty(),
            (ExpressionSlim::Parameter(a), ExpressionSlim::Parameter(b)) => self.parameter(a, b),
            (ExpressionSlim::Lambda(a), ExpressionSlim::Lambda(b)) => self.lambda(a, b),
            (ExpressionSlim::Invocation(a), ExpressionSlim::Invocation(b)) => {
                self.expression(a.expression(), b.expression()) && self.all(arguments(&**a), arguments(&**b))
            }
            (ExpressionSlim::MethodCall(a), ExpressionSlim::MethodCall(b)) => {
                a.method() == b.method()
                    && self.optional(a.object(), b.object())
                    && self.all(arguments(&**a), arguments(&**b))
            }
            (ExpressionSlim::New(a), ExpressionSlim::New(b)) => self.new_expression(a, b),
            (ExpressionSlim::NewArray(a), ExpressionSlim::NewArray(b)) => {
                a.element_type() == b.element_type() && self.all(arguments(&**a), arguments(&**b))
            }
            (ExpressionSlim::Index(a), ExpressionSlim::Index(b)) => {
                a.indexer() == b.indexer()
                    && self.expression(a.object(), b.object())
                    && self.all(arguments(&**a), arguments(&**b))
            }
            (ExpressionSlim::Member(a), ExpressionSlim::Member(b)) => {
                a.member() == b.member() && self.optional(a.expression(), b.expression())
            }
            (ExpressionSlim::ListInit(a), ExpressionSlim::ListInit(b)) => {
                self.new_expression(a.new_expression(), b.new_expression())
                    && a.initializers().len() == b.initializers().len()
                    && a
                        .initializers()
                        .iter()
                        .zip(b.initializers())
                        .all(|(a, b)| self.element_init(a, b))
            }
            (ExpressionSlim::MemberInit(a), ExpressionSlim::MemberInit(b)) => {
                self.new_expression(a.new_expression(), b.new_expression())
                    && self.bindings(a.bindings(), b.bindings())
            }
            (ExpressionSlim::TypeBinary(a), ExpressionSlim::TypeBinary(b)) => {
                a.type_operand() == b.type_operand() && self.expression(a.expression(), b.expression())
            }
            (ExpressionSlim::Block(a), ExpressionSlim::Block(b)) => {
                if a.explicit_type() != b.explicit_type() || !same_declarations(a.variables(), b.variables()) {
                    return false;
                }
                self.left.bind(a.variables());
                self.right.bind(b.variables());
                let equal = self.all(a.expressions(), b.expressions());
                self.left.unbind(a.variables());
                self.right.unbind(b.variables());
                equal
            }
            (ExpressionSlim::Goto(a), ExpressionSlim::Goto(b)) => {
                a.kind() == b.kind()
                    && a.ty() == b.ty()
                    && self.label(a.target(), b.target())
                    && self.optional(a.value(), b.value())
            }
            (ExpressionSlim::Label(a), ExpressionSlim::Label(b)) => {
                self.label(a.target(), b.target()) && self.optional(a.default_value(), b.default_value())
            }
            (ExpressionSlim::Loop(a), ExpressionSlim::Loop(b)) => {
                self.optional_label(a.break_label(), b.break_label())
                    && self.optional_label(a.continue_label(), b.continue_label())
                    && self.expression(a.body(), b.body())
            }
            (ExpressionSlim::Switch(a), ExpressionSlim::Switch(b)) => {
                a.ty() == b.ty()
                    && a.comparison() == b.comparison()
                    && self.expression(a.switch_value(), b.switch_value())
                    && a.cases().len() == b.cases().len()
                    && a.cases().iter().zip(b.cases()).all(|(a, b)| self.switch_case(a, b))
                    && self.optional(a.default_body(), b.default_body())
            }
            (ExpressionSlim::Try(a), ExpressionSlim::Try(b)) => {
                a.ty() == b.ty()
                    && self.expression(a.body(), b.body())
                    && a.handlers().len() == b.handlers().len()
                    && a.handlers().iter().zip(b.handlers()).all(|(a, b)| self.catch_block(a, b))
                    && self.optional(a.finally(), b.finally())
                    && self.optional(a.fault(), b.fault())
            }
            _ => false,
        }
    }

    fn all(&mut self, left: &[ExpressionSlim], right: &[ExpressionSlim]) -> bool {
        left.len() == right.len() && left.iter().zip(right).all(|(a, b)| self.expression(a, b))
    }

    fn optional(&mut self, left: Option<&ExpressionSlim>, right: Option<&ExpressionSlim>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(a), Some(b)) => self.expression(a, b),
            _ => false,
        }
    }

    /// Bound parameters match by binding ordinal, free ones by name and type.
    fn parameter(&self, left: &Arc<ParameterExpressionSlim>, right: &Arc<ParameterExpressionSlim>) -> bool {
        match (self.left.resolve(left), self.right.resolve(right)) {
            (Some(a), Some(b)) => a == b,
            (None, None) => Arc::ptr_eq(left, right) || (left.name() == right.name() && left.ty() == right.ty()),
            _ => false,
        }
    }

    fn lambda(&mut self, left: &Arc<LambdaExpressionSlim>, right: &Arc<LambdaExpressionSlim>) -> bool {
        if left.delegate_type() != right.delegate_type() || !same_declarations(left.parameters(), right.parameters()) {
            return false;
        }
        self.left.bind(left.parameters());
        self.right.bind(right.parameters());
        let equal = self.expression(left.body(), right.body());
        self.left.unbind(left.parameters());
        self.right.unbind(right.parameters());
        equal
    }

    fn new_expression(&mut self, left: &Arc<NewExpressionSlim>, right: &Arc<NewExpressionSlim>) -> bool {
        left.ty() == right.ty()
            && left.constructor() == right.constructor()
            && left.members() == right.members()
            && self.all(arguments(&**left), arguments(&**right))
    }

    fn element_init(&mut self, left: &Arc<ElementInitSlim>, right: &Arc<ElementInitSlim>) -> bool {
        left.add_method() == right.add_method() && self.all(arguments(&**left), arguments(&**right))
    }

    fn bindings(&mut self, left: &[MemberBindingSlim], right: &[MemberBindingSlim]) -> bool {
        left.len() == right.len() && left.iter().zip(right).all(|(a, b)| self.binding(a, b))
    }

    fn binding(&mut self, left: &MemberBindingSlim, right: &MemberBindingSlim) -> bool {
        if left.member() != right.member() {
            return false;
        }
        match (left, right) {
            (MemberBindingSlim::Assignment(a), MemberBindingSlim::Assignment(b)) => {
                self.expression(a.expression(), b.expression())
            }
            (MemberBindingSlim::ListBinding(a), MemberBindingSlim::ListBinding(b)) => {
                a.initializers().len() == b.initializers().len()
                    && a
                        .initializers()
                        .iter()
                        .zip(b.initializers())
                        .all(|(a, b)| self.element_init(a, b))
            }
            (MemberBindingSlim::MemberBinding(a), MemberBindingSlim::MemberBinding(b)) => {
                self.bindings(a.bindings(), b.bindings())
            }
            _ => false,
        }
    }

    /// Labels match when they are paired consistently: the first meeting of
    /// two unseen labels pairs them, later meetings must agree.
    fn label(&mut self, left: &Arc<LabelTargetSlim>, right: &Arc<LabelTargetSlim>) -> bool {
        if left.ty() != right.ty() {
            return false;
        }
        match (self.left_labels.get(left), self.right_labels.get(right)) {
            (Some(a), Some(b)) => a == b,
            (None, None) => {
                self.left_labels.insert(left, self.next_label);
                self.right_labels.insert(right, self.next_label);
                self.next_label += 1;
                true
            }
            _ => false,
        }
    }

    fn optional_label(&mut self, left: Option<&Arc<LabelTargetSlim>>, right: Option<&Arc<LabelTargetSlim>>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(a), Some(b)) => self.label(a, b),
            _ => false,
        }
    }

    fn switch_case(&mut self, left: &Arc<SwitchCaseSlim>, right: &Arc<SwitchCaseSlim>) -> bool {
        self.all(left.test_values(), right.test_values()) && self.expression(left.body(), right.body())
    }

    /// The catch variable is in scope for the filter and the body.
    fn catch_block(&mut self, left: &Arc<CatchBlockSlim>, right: &Arc<CatchBlockSlim>) -> bool {
        let (left_variable, right_variable) = (left.variable(), right.variable());
        let declared = match (left_variable, right_variable) {
            (None, None) => true,
            (Some(a), Some(b)) => a.ty() == b.ty(),
            _ => false,
        };
        if left.test() != right.test() || !declared {
            return false;
        }
        let left_scope = left_variable.map(slice::from_ref).unwrap_or_default();
        let right_scope = right_variable.map(slice::from_ref).unwrap_or_default();
        self.left.bind(left_scope);
        self.right.bind(right_scope);
        let equal = self.optional(left.filter(), right.filter()) && self.expression(left.body(), right.body());
        self.left.unbind(left_scope);
        self.right.unbind(right_scope);
        equal
    }
}
