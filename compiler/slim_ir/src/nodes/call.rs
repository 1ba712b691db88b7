use std::sync::Arc;

use super::{same_optional, trace_rebuild, ExpressionSlim};
use super::release::{detach, detach_optional, DetachChildren};
use crate::arguments::ArgumentBuffer;
use crate::{ArgumentList, ArgumentProvider, Identity, MethodInfoSlim, SlimError};

/// Invocation of a delegate or lambda value.
#[derive(Debug)]
pub struct InvocationExpressionSlim {
    expression: ExpressionSlim,
    arguments: ArgumentList,
}

impl InvocationExpressionSlim {
    pub fn new(
        expression: ExpressionSlim,
        arguments: impl IntoIterator<Item = ExpressionSlim>,
    ) -> Arc<Self> {
        Arc::new(InvocationExpressionSlim {
            expression,
            arguments: ArgumentList::new(arguments),
        })
    }

    /// The invoked value.
    #[inline]
    pub fn expression(&self) -> &ExpressionSlim {
        &self.expression
    }

    pub fn update(self: &Arc<Self>, expression: ExpressionSlim, arguments: &[ExpressionSlim]) -> Arc<Self> {
        let arguments = (!self.arguments.same_as(arguments)).then(|| arguments.iter().cloned().collect());
        self.rewrite(expression, arguments)
    }

    /// Rebuild with a new target and, if `Some`, new arguments.
    pub(crate) fn rewrite(
        self: &Arc<Self>,
        expression: ExpressionSlim,
        arguments: Option<ArgumentBuffer>,
    ) -> Arc<Self> {
        if expression.same(&self.expression) && arguments.is_none() {
            return Arc::clone(self);
        }
        trace_rebuild("Invocation");
        Arc::new(InvocationExpressionSlim {
            expression,
            arguments: arguments.map_or_else(|| self.arguments.clone(), ArgumentList::from),
        })
    }
}

impl ArgumentProvider for InvocationExpressionSlim {
    fn argument_list(&self) -> &ArgumentList {
        &self.arguments
    }
}

/// Method call, static (no object) or on an instance.
#[derive(Debug)]
pub struct MethodCallExpressionSlim {
    object: Option<ExpressionSlim>,
    method: MethodInfoSlim,
    arguments: ArgumentList,
}

impl MethodCallExpressionSlim {
    pub fn new(
        object: Option<ExpressionSlim>,
        method: MethodInfoSlim,
        arguments: impl IntoIterator<Item = ExpressionSlim>,
    ) -> Arc<Self> {
        Arc::new(MethodCallExpressionSlim {
            object,
            method,
            arguments: ArgumentList::new(arguments),
        })
    }

    /// Instance the method is called on; `None` for static calls.
    #[inline]
    pub fn object(&self) -> Option<&ExpressionSlim> {
        self.object.as_ref()
    }

    #[inline]
    pub fn method(&self) -> &MethodInfoSlim {
        &self.method
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.object.is_none()
    }

    /// Replace object and arguments. Returns `self` when all are identical.
    ///
    /// Unlike [`rewrite`](Self::rewrite) this may turn a static call into
    /// an instance call and back.
    pub fn update(self: &Arc<Self>, object: Option<ExpressionSlim>, arguments: &[ExpressionSlim]) -> Arc<Self> {
        if same_optional(object.as_ref(), self.object.as_ref()) && self.arguments.same_as(arguments) {
            return Arc::clone(self);
        }
        trace_rebuild("MethodCall");
        let arguments = if self.arguments.same_as(arguments) {
            self.arguments.clone()
        } else {
            ArgumentList::new(arguments.iter().cloned())
        };
        Arc::new(MethodCallExpressionSlim {
            object,
            method: self.method.clone(),
            arguments,
        })
    }

    /// Rebuild after visiting. The object slot keeps its shape: a visitor
    /// cannot create an instance for a static call or drop one.
    ///
    /// # Errors
    ///
    /// `Unreachable` if `object` does not match the call's static-ness.
    pub(crate) fn rewrite(
        self: &Arc<Self>,
        object: Option<ExpressionSlim>,
        arguments: Option<ArgumentBuffer>,
    ) -> Result<Arc<Self>, SlimError> {
        if object.is_some() != self.object.is_some() {
            return Err(SlimError::Unreachable {
                context: if self.is_static() {
                    "static method call rewritten with an instance"
                } else {
                    "instance method call rewritten without an instance"
                },
            });
        }
        if same_optional(object.as_ref(), self.object.as_ref()) && arguments.is_none() {
            return Ok(Arc::clone(self));
        }
        trace_rebuild("MethodCall");
        Ok(Arc::new(MethodCallExpressionSlim {
            object,
            method: self.method.clone(),
            arguments: arguments.map_or_else(|| self.arguments.clone(), ArgumentList::from),
        }))
    }
}

impl ArgumentProvider for MethodCallExpressionSlim {
    fn argument_list(&self) -> &ArgumentList {
        &self.arguments
    }
}

impl DetachChildren for InvocationExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.expression, pending);
        self.arguments.detach_children(pending);
    }
}

impl DetachChildren for MethodCallExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_optional(&mut self.object, pending);
        self.arguments.detach_children(pending);
    }
}
