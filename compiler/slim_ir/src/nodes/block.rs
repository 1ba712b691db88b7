use std::sync::Arc;

use super::{trace_rebuild, ExpressionSlim, ParameterExpressionSlim};
use super::release::{detach_all, DetachChildren};
use crate::{same_elements, SlimError, TypeSlim};

/// Sequence of expressions with block-scoped variables. The value of the
/// block is the value of its last expression.
#[derive(Debug)]
pub struct BlockExpressionSlim {
    /// Stored only when it differs from the type of the last expression.
    ty: Option<TypeSlim>,
    variables: Arc<[Arc<ParameterExpressionSlim>]>,
    expressions: Arc<[ExpressionSlim]>,
}

impl BlockExpressionSlim {
    /// # Errors
    ///
    /// `EmptyCollection` if `expressions` is empty.
    pub fn new(
        ty: Option<TypeSlim>,
        variables: impl IntoIterator<Item = Arc<ParameterExpressionSlim>>,
        expressions: impl IntoIterator<Item = ExpressionSlim>,
    ) -> Result<Arc<Self>, SlimError> {
        Self::from_parts(ty, variables.into_iter().collect(), expressions.into_iter().collect())
    }

    fn from_parts(
        ty: Option<TypeSlim>,
        variables: Arc<[Arc<ParameterExpressionSlim>]>,
        expressions: Arc<[ExpressionSlim]>,
    ) -> Result<Arc<Self>, SlimError> {
        let Some(result) = expressions.last() else {
            return Err(SlimError::EmptyCollection {
                node: "Block",
                what: "expression",
            });
        };
        let ty = ty.filter(|ty| result.static_type().as_ref() != Some(ty));
        Ok(Arc::new(BlockExpressionSlim {
            ty,
            variables,
            expressions,
        }))
    }

    #[inline]
    pub fn variables(&self) -> &[Arc<ParameterExpressionSlim>] {
        &self.variables
    }

    #[inline]
    pub fn expressions(&self) -> &[ExpressionSlim] {
        &self.expressions
    }

    /// The last expression, whose value is the block's value.
    pub fn result(&self) -> Option<&ExpressionSlim> {
        self.expressions.last()
    }

    /// Explicit type, present only when it differs from the result's type.
    pub fn explicit_type(&self) -> Option<&TypeSlim> {
        self.ty.as_ref()
    }

    pub fn static_type(&self) -> Option<TypeSlim> {
        self.ty
            .clone()
            .or_else(|| self.result().and_then(ExpressionSlim::static_type))
    }

    /// # Errors
    ///
    /// `EmptyCollection` when removing every expression.
    pub fn update(
        self: &Arc<Self>,
        variables: &[Arc<ParameterExpressionSlim>],
        expressions: &[ExpressionSlim],
    ) -> Result<Arc<Self>, SlimError> {
        let same_variables = same_elements(&self.variables, variables);
        let same_expressions = same_elements(&self.expressions, expressions);
        if same_variables && same_expressions {
            return Ok(Arc::clone(self));
        }
        trace_rebuild("Block");
        let variables = if same_variables {
            Arc::clone(&self.variables)
        } else {
            Arc::from(variables)
        };
        let expressions = if same_expressions {
            Arc::clone(&self.expressions)
        } else {
            Arc::from(expressions)
        };
        Self::from_parts(self.ty.clone(), variables, expressions)
    }
}

impl DetachChildren for BlockExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_all(&mut self.expressions, pending);
    }
}
