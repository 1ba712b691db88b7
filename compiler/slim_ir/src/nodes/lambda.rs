use std::sync::Arc;

use super::{trace_rebuild, ExpressionSlim};
use super::release::{detach, DetachChildren};
use crate::{same_elements, Identity, TypeSlim};

/// Parameter or local variable.
///
/// Parameters are compared by identity: two parameters with the same name
/// and type are still different variables.
#[derive(Debug)]
pub struct ParameterExpressionSlim {
    ty: TypeSlim,
    name: Option<Arc<str>>,
}

impl ParameterExpressionSlim {
    pub fn new(ty: TypeSlim, name: Option<Arc<str>>) -> Arc<Self> {
        Arc::new(ParameterExpressionSlim { ty, name })
    }

    pub fn named(ty: TypeSlim, name: impl Into<Arc<str>>) -> Arc<Self> {
        Self::new(ty, Some(name.into()))
    }

    pub fn unnamed(ty: TypeSlim) -> Arc<Self> {
        Self::new(ty, None)
    }

    #[inline]
    pub fn ty(&self) -> &TypeSlim {
        &self.ty
    }

    /// Diagnostic name. Not part of the parameter's identity.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Lambda abstraction: declared parameters and a body that may close over
/// outer parameters.
#[derive(Debug)]
pub struct LambdaExpressionSlim {
    delegate_type: Option<TypeSlim>,
    body: ExpressionSlim,
    parameters: Arc<[Arc<ParameterExpressionSlim>]>,
}

impl LambdaExpressionSlim {
    pub fn new(
        delegate_type: Option<TypeSlim>,
        body: ExpressionSlim,
        parameters: impl IntoIterator<Item = Arc<ParameterExpressionSlim>>,
    ) -> Arc<Self> {
        Arc::new(LambdaExpressionSlim {
            delegate_type,
            body,
            parameters: parameters.into_iter().collect(),
        })
    }

    /// Delegate type, when the producer recorded one.
    #[inline]
    pub fn delegate_type(&self) -> Option<&TypeSlim> {
        self.delegate_type.as_ref()
    }

    #[inline]
    pub fn body(&self) -> &ExpressionSlim {
        &self.body
    }

    #[inline]
    pub fn parameters(&self) -> &[Arc<ParameterExpressionSlim>] {
        &self.parameters
    }

    /// Replace body and parameters. Returns `self` when the body and every
    /// parameter are identical.
    pub fn update(
        self: &Arc<Self>,
        body: ExpressionSlim,
        parameters: &[Arc<ParameterExpressionSlim>],
    ) -> Arc<Self> {
        if body.same(&self.body) && same_elements(&self.parameters, parameters) {
            return Arc::clone(self);
        }
        trace_rebuild("Lambda");
        // Reuse the parameter sequence when only the body changed.
        let parameters = if same_elements(&self.parameters, parameters) {
            Arc::clone(&self.parameters)
        } else {
            Arc::from(parameters)
        };
        Arc::new(LambdaExpressionSlim {
            delegate_type: self.delegate_type.clone(),
            body,
            parameters,
        })
    }
}

impl DetachChildren for LambdaExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.body, pending);
    }
}
