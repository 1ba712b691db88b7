use std::sync::Arc;

use super::{same_optional, trace_rebuild, ExpressionSlim};
use super::release::{detach_optional, DetachChildren};
use crate::MemberInfoSlim;

/// Field or property access, static (no expression) or on an instance.
#[derive(Debug)]
pub struct MemberExpressionSlim {
    expression: Option<ExpressionSlim>,
    member: MemberInfoSlim,
}

impl MemberExpressionSlim {
    pub fn new(expression: Option<ExpressionSlim>, member: MemberInfoSlim) -> Arc<Self> {
        Arc::new(MemberExpressionSlim { expression, member })
    }

    /// The instance; `None` for static members.
    #[inline]
    pub fn expression(&self) -> Option<&ExpressionSlim> {
        self.expression.as_ref()
    }

    #[inline]
    pub fn member(&self) -> &MemberInfoSlim {
        &self.member
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.expression.is_none()
    }

    pub fn update(self: &Arc<Self>, expression: Option<ExpressionSlim>) -> Arc<Self> {
        if same_optional(expression.as_ref(), self.expression.as_ref()) {
            return Arc::clone(self);
        }
        trace_rebuild("Member");
        Self::new(expression, self.member.clone())
    }
}

impl DetachChildren for MemberExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_optional(&mut self.expression, pending);
    }
}
