use std::sync::Arc;

use super::{trace_rebuild, ExpressionSlim};
use super::release::{detach, DetachChildren};
use crate::{Identity, TypeSlim};

/// `test ? if_true : if_false`.
#[derive(Debug)]
pub struct ConditionalExpressionSlim {
    test: ExpressionSlim,
    if_true: ExpressionSlim,
    if_false: ExpressionSlim,
    /// Stored only when it differs from the type of `if_true`.
    ty: Option<TypeSlim>,
}

impl ConditionalExpressionSlim {
    /// Build a conditional. An explicit type equal to the derived type is
    /// not stored.
    pub fn new(
        test: ExpressionSlim,
        if_true: ExpressionSlim,
        if_false: ExpressionSlim,
        ty: Option<TypeSlim>,
    ) -> Arc<Self> {
        let ty = ty.filter(|ty| if_true.static_type().as_ref() != Some(ty));
        Arc::new(ConditionalExpressionSlim {
            test,
            if_true,
            if_false,
            ty,
        })
    }

    #[inline]
    pub fn test(&self) -> &ExpressionSlim {
        &self.test
    }

    #[inline]
    pub fn if_true(&self) -> &ExpressionSlim {
        &self.if_true
    }

    #[inline]
    pub fn if_false(&self) -> &ExpressionSlim {
        &self.if_false
    }

    /// Explicit type, present only when it differs from the derived one.
    pub fn explicit_type(&self) -> Option<&TypeSlim> {
        self.ty.as_ref()
    }

    pub fn static_type(&self) -> Option<TypeSlim> {
        self.ty.clone().or_else(|| self.if_true.static_type())
    }

    pub fn update(
        self: &Arc<Self>,
        test: ExpressionSlim,
        if_true: ExpressionSlim,
        if_false: ExpressionSlim,
    ) -> Arc<Self> {
        if test.same(&self.test) && if_true.same(&self.if_true) && if_false.same(&self.if_false) {
            return Arc::clone(self);
        }
        trace_rebuild("Conditional");
        Self::new(test, if_true, if_false, self.ty.clone())
    }
}

impl DetachChildren for ConditionalExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.test, pending);
        detach(&mut self.if_true, pending);
        detach(&mut self.if_false, pending);
    }
}
