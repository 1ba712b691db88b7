use std::sync::Arc;

use super::{same_optional, trace_rebuild, ExpressionSlim, ParameterExpressionSlim};
use super::release::{detach, detach_each, detach_optional, DetachChildren};
use crate::{same_elements, Identity, SlimError, TypeSlim};

/// `catch (T variable) when (filter) { body }`.
#[derive(Debug)]
pub struct CatchBlockSlim {
    test: TypeSlim,
    variable: Option<Arc<ParameterExpressionSlim>>,
    body: ExpressionSlim,
    filter: Option<ExpressionSlim>,
}

impl CatchBlockSlim {
    pub fn new(
        test: TypeSlim,
        variable: Option<Arc<ParameterExpressionSlim>>,
        body: ExpressionSlim,
        filter: Option<ExpressionSlim>,
    ) -> Arc<Self> {
        Arc::new(CatchBlockSlim {
            test,
            variable,
            body,
            filter,
        })
    }

    /// Exception type caught.
    #[inline]
    pub fn test(&self) -> &TypeSlim {
        &self.test
    }

    #[inline]
    pub fn variable(&self) -> Option<&Arc<ParameterExpressionSlim>> {
        self.variable.as_ref()
    }

    #[inline]
    pub fn body(&self) -> &ExpressionSlim {
        &self.body
    }

    #[inline]
    pub fn filter(&self) -> Option<&ExpressionSlim> {
        self.filter.as_ref()
    }

    pub fn update(
        self: &Arc<Self>,
        variable: Option<Arc<ParameterExpressionSlim>>,
        filter: Option<ExpressionSlim>,
        body: ExpressionSlim,
    ) -> Arc<Self> {
        if body.same(&self.body)
            && same_optional(variable.as_ref(), self.variable.as_ref())
            && same_optional(filter.as_ref(), self.filter.as_ref())
        {
            return Arc::clone(self);
        }
        trace_rebuild("CatchBlock");
        Self::new(self.test.clone(), variable, body, filter)
    }
}

/// Protected region with handlers, a finally block or a fault block.
#[derive(Debug)]
pub struct TryExpressionSlim {
    ty: Option<TypeSlim>,
    body: ExpressionSlim,
    handlers: Arc<[Arc<CatchBlockSlim>]>,
    finally: Option<ExpressionSlim>,
    fault: Option<ExpressionSlim>,
}

impl TryExpressionSlim {
    /// # Errors
    ///
    /// - `MissingField` with neither handlers, finally nor fault.
    /// - `ConflictingFields` if a fault block is combined with handlers or
    ///   a finally block.
    pub fn new(
        ty: Option<TypeSlim>,
        body: ExpressionSlim,
        handlers: impl IntoIterator<Item = Arc<CatchBlockSlim>>,
        finally: Option<ExpressionSlim>,
        fault: Option<ExpressionSlim>,
    ) -> Result<Arc<Self>, SlimError> {
        Self::from_parts(ty, body, handlers.into_iter().collect(), finally, fault)
    }

    fn from_parts(
        ty: Option<TypeSlim>,
        body: ExpressionSlim,
        handlers: Arc<[Arc<CatchBlockSlim>]>,
        finally: Option<ExpressionSlim>,
        fault: Option<ExpressionSlim>,
    ) -> Result<Arc<Self>, SlimError> {
        if fault.is_some() && (!handlers.is_empty() || finally.is_some()) {
            return Err(SlimError::ConflictingFields {
                node: "Try",
                fields: "a fault block with handlers or a finally block",
            });
        }
        if handlers.is_empty() && finally.is_none() && fault.is_none() {
            return Err(SlimError::MissingField {
                node: "Try",
                field: "handlers, finally or fault",
            });
        }
        Ok(Arc::new(TryExpressionSlim {
            ty,
            body,
            handlers,
            finally,
            fault,
        }))
    }

    #[inline]
    pub fn ty(&self) -> Option<&TypeSlim> {
        self.ty.as_ref()
    }

    #[inline]
    pub fn body(&self) -> &ExpressionSlim {
        &self.body
    }

    #[inline]
    pub fn handlers(&self) -> &[Arc<CatchBlockSlim>] {
        &self.handlers
    }

    #[inline]
    pub fn finally(&self) -> Option<&ExpressionSlim> {
        self.finally.as_ref()
    }

    #[inline]
    pub fn fault(&self) -> Option<&ExpressionSlim> {
        self.fault.as_ref()
    }

    pub fn static_type(&self) -> Option<TypeSlim> {
        self.ty.clone().or_else(|| self.body.static_type())
    }

    /// # Errors
    ///
    /// The validation errors of [`new`](Self::new) when the new children
    /// violate them.
    pub fn update(
        self: &Arc<Self>,
        body: ExpressionSlim,
        handlers: &[Arc<CatchBlockSlim>],
        finally: Option<ExpressionSlim>,
        fault: Option<ExpressionSlim>,
    ) -> Result<Arc<Self>, SlimError> {
        let same_handlers = same_elements(&self.handlers, handlers);
        if body.same(&self.body)
            && same_handlers
            && same_optional(finally.as_ref(), self.finally.as_ref())
            && same_optional(fault.as_ref(), self.fault.as_ref())
        {
            return Ok(Arc::clone(self));
        }
        trace_rebuild("Try");
        let handlers = if same_handlers {
            Arc::clone(&self.handlers)
        } else {
            Arc::from(handlers)
        };
        Self::from_parts(self.ty.clone(), body, handlers, finally, fault)
    }
}

impl DetachChildren for CatchBlockSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.body, pending);
        detach_optional(&mut self.filter, pending);
    }
}

impl DetachChildren for TryExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.body, pending);
        detach_each(&mut self.handlers, pending);
        detach_optional(&mut self.finally, pending);
        detach_optional(&mut self.fault, pending);
    }
}
