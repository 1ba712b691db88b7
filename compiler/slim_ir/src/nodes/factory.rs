//! Convenience factories returning [`ExpressionSlim`] handles.
//!
//! These wrap the per-node constructors for the shapes producers build most
//! often. Operators whose discriminant is fixed by the factory cannot fail
//! validation, so they return the handle directly.

use std::sync::Arc;

use super::{
    BinaryExpressionSlim, BlockExpressionSlim, ConditionalExpressionSlim, ConstantExpressionSlim,
    DefaultExpressionSlim, ExpressionSlim, InvocationExpressionSlim, LambdaExpressionSlim,
    MemberExpressionSlim, MethodCallExpressionSlim, ParameterExpressionSlim, UnaryExpressionSlim,
};
use crate::{ExpressionType, MemberInfoSlim, MethodInfoSlim, ObjectSlim, SlimError, TypeSlim};

macro_rules! simple_binary {
    ($($(#[$meta:meta])* $name:ident => $node_type:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(left: ExpressionSlim, right: ExpressionSlim) -> ExpressionSlim {
                BinaryExpressionSlim::build(ExpressionType::$node_type, left, right, false, None, None).into()
            }
        )*
    };
}

impl ExpressionSlim {
    /// Binary node for any binary discriminant.
    ///
    /// # Errors
    ///
    /// `InvalidNodeType` if `node_type` is not a binary operator.
    pub fn make_binary(
        node_type: ExpressionType,
        left: ExpressionSlim,
        right: ExpressionSlim,
        is_lifted_to_null: bool,
        method: Option<MethodInfoSlim>,
        conversion: Option<Arc<LambdaExpressionSlim>>,
    ) -> Result<ExpressionSlim, SlimError> {
        BinaryExpressionSlim::new(node_type, left, right, is_lifted_to_null, method, conversion).map(Into::into)
    }

    simple_binary! {
        /// `left + right`
        add => Add,
        /// `left - right`
        subtract => Subtract,
        /// `left * right`
        multiply => Multiply,
        /// `left / right`
        divide => Divide,
        equal => Equal,
        not_equal => NotEqual,
        less_than => LessThan,
        greater_than => GreaterThan,
        /// Short-circuit `&&`.
        and_also => AndAlso,
        /// Short-circuit `||`.
        or_else => OrElse,
        assign => Assign,
    }

    /// Unary node for any unary discriminant.
    ///
    /// # Errors
    ///
    /// See [`UnaryExpressionSlim::new`].
    pub fn make_unary(
        node_type: ExpressionType,
        operand: Option<ExpressionSlim>,
        ty: Option<TypeSlim>,
        method: Option<MethodInfoSlim>,
    ) -> Result<ExpressionSlim, SlimError> {
        UnaryExpressionSlim::new(node_type, operand, ty, method).map(Into::into)
    }

    pub fn condition(test: ExpressionSlim, if_true: ExpressionSlim, if_false: ExpressionSlim) -> ExpressionSlim {
        ConditionalExpressionSlim::new(test, if_true, if_false, None).into()
    }

    pub fn constant(value: ObjectSlim) -> ExpressionSlim {
        ConstantExpressionSlim::new(value, None).into()
    }

    /// Constant with an explicit type, e.g. a `null` typed as `String`.
    pub fn constant_typed(value: ObjectSlim, ty: TypeSlim) -> ExpressionSlim {
        ConstantExpressionSlim::new(value, Some(ty)).into()
    }

    pub fn default_value(ty: TypeSlim) -> ExpressionSlim {
        DefaultExpressionSlim::new(ty).into()
    }

    /// Named parameter. Keep the returned `Arc` to refer to the same
    /// variable from a lambda body.
    pub fn parameter(ty: TypeSlim, name: impl Into<Arc<str>>) -> Arc<ParameterExpressionSlim> {
        ParameterExpressionSlim::named(ty, name)
    }

    pub fn lambda(
        body: ExpressionSlim,
        parameters: impl IntoIterator<Item = Arc<ParameterExpressionSlim>>,
    ) -> ExpressionSlim {
        LambdaExpressionSlim::new(None, body, parameters).into()
    }

    pub fn invoke(expression: ExpressionSlim, arguments: impl IntoIterator<Item = ExpressionSlim>) -> ExpressionSlim {
        InvocationExpressionSlim::new(expression, arguments).into()
    }

    /// Method call; `object` is `None` for static methods.
    pub fn call(
        object: Option<ExpressionSlim>,
        method: MethodInfoSlim,
        arguments: impl IntoIterator<Item = ExpressionSlim>,
    ) -> ExpressionSlim {
        MethodCallExpressionSlim::new(object, method, arguments).into()
    }

    /// Field or property access; `expression` is `None` for static members.
    pub fn member(expression: Option<ExpressionSlim>, member: impl Into<MemberInfoSlim>) -> ExpressionSlim {
        MemberExpressionSlim::new(expression, member.into()).into()
    }

    /// # Errors
    ///
    /// `EmptyCollection` if `expressions` is empty.
    pub fn block(
        variables: impl IntoIterator<Item = Arc<ParameterExpressionSlim>>,
        expressions: impl IntoIterator<Item = ExpressionSlim>,
    ) -> Result<ExpressionSlim, SlimError> {
        BlockExpressionSlim::new(None, variables, expressions).map(Into::into)
    }
}
