use std::sync::Arc;

use super::{trace_rebuild, ExpressionSlim};
use super::release::{detach, DetachChildren};
use crate::{ExpressionType, Identity, NodeKind, SlimError, TypeSlim};

/// Type test: `expression is T` (`TypeIs`) or exact type equality
/// (`TypeEqual`).
#[derive(Debug)]
pub struct TypeBinaryExpressionSlim {
    node_type: ExpressionType,
    expression: ExpressionSlim,
    type_operand: TypeSlim,
}

impl TypeBinaryExpressionSlim {
    /// # Errors
    ///
    /// `InvalidNodeType` unless `node_type` is `TypeIs` or `TypeEqual`.
    pub fn new(
        node_type: ExpressionType,
        expression: ExpressionSlim,
        type_operand: TypeSlim,
    ) -> Result<Arc<Self>, SlimError> {
        if !node_type.is_type_binary() {
            return Err(SlimError::InvalidNodeType {
                node_type,
                expected: NodeKind::TypeBinary,
            });
        }
        Ok(Arc::new(TypeBinaryExpressionSlim {
            node_type,
            expression,
            type_operand,
        }))
    }

    #[inline]
    pub fn node_type(&self) -> ExpressionType {
        self.node_type
    }

    #[inline]
    pub fn expression(&self) -> &ExpressionSlim {
        &self.expression
    }

    #[inline]
    pub fn type_operand(&self) -> &TypeSlim {
        &self.type_operand
    }

    pub fn update(self: &Arc<Self>, expression: ExpressionSlim) -> Arc<Self> {
        if expression.same(&self.expression) {
            return Arc::clone(self);
        }
        trace_rebuild("TypeBinary");
        Arc::new(TypeBinaryExpressionSlim {
            node_type: self.node_type,
            expression,
            type_operand: self.type_operand.clone(),
        })
    }
}

impl DetachChildren for TypeBinaryExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.expression, pending);
    }
}
