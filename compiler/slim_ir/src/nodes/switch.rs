use std::sync::Arc;

use super::{same_optional, trace_rebuild, ExpressionSlim};
use super::release::{detach, detach_all, detach_each, detach_optional, DetachChildren};
use crate::{same_elements, Identity, MethodInfoSlim, SlimError, TypeSlim};

/// One `case v1, v2: body` of a switch.
#[derive(Debug)]
pub struct SwitchCaseSlim {
    test_values: Arc<[ExpressionSlim]>,
    body: ExpressionSlim,
}

impl SwitchCaseSlim {
    /// # Errors
    ///
    /// `EmptyCollection` without test values.
    pub fn new(
        test_values: impl IntoIterator<Item = ExpressionSlim>,
        body: ExpressionSlim,
    ) -> Result<Arc<Self>, SlimError> {
        let test_values: Arc<[ExpressionSlim]> = test_values.into_iter().collect();
        if test_values.is_empty() {
            return Err(SlimError::EmptyCollection {
                node: "SwitchCase",
                what: "test value",
            });
        }
        Ok(Arc::new(SwitchCaseSlim { test_values, body }))
    }

    #[inline]
    pub fn test_values(&self) -> &[ExpressionSlim] {
        &self.test_values
    }

    #[inline]
    pub fn body(&self) -> &ExpressionSlim {
        &self.body
    }

    /// # Errors
    ///
    /// `EmptyCollection` when removing every test value.
    pub fn update(
        self: &Arc<Self>,
        test_values: &[ExpressionSlim],
        body: ExpressionSlim,
    ) -> Result<Arc<Self>, SlimError> {
        let same_values = same_elements(&self.test_values, test_values);
        if same_values && body.same(&self.body) {
            return Ok(Arc::clone(self));
        }
        trace_rebuild("SwitchCase");
        if same_values {
            return Ok(Arc::new(SwitchCaseSlim {
                test_values: Arc::clone(&self.test_values),
                body,
            }));
        }
        Self::new(test_values.iter().cloned(), body)
    }
}

/// Multi-way branch on a value.
#[derive(Debug)]
pub struct SwitchExpressionSlim {
    ty: Option<TypeSlim>,
    switch_value: ExpressionSlim,
    cases: Arc<[Arc<SwitchCaseSlim>]>,
    default_body: Option<ExpressionSlim>,
    comparison: Option<MethodInfoSlim>,
}

impl SwitchExpressionSlim {
    pub fn new(
        ty: Option<TypeSlim>,
        switch_value: ExpressionSlim,
        cases: impl IntoIterator<Item = Arc<SwitchCaseSlim>>,
        default_body: Option<ExpressionSlim>,
        comparison: Option<MethodInfoSlim>,
    ) -> Arc<Self> {
        Arc::new(SwitchExpressionSlim {
            ty,
            switch_value,
            cases: cases.into_iter().collect(),
            default_body,
            comparison,
        })
    }

    #[inline]
    pub fn ty(&self) -> Option<&TypeSlim> {
        self.ty.as_ref()
    }

    #[inline]
    pub fn switch_value(&self) -> &ExpressionSlim {
        &self.switch_value
    }

    #[inline]
    pub fn cases(&self) -> &[Arc<SwitchCaseSlim>] {
        &self.cases
    }

    #[inline]
    pub fn default_body(&self) -> Option<&ExpressionSlim> {
        self.default_body.as_ref()
    }

    /// Equality method used to match test values, if not the default one.
    #[inline]
    pub fn comparison(&self) -> Option<&MethodInfoSlim> {
        self.comparison.as_ref()
    }

    /// Explicit type, or the type of the first case body.
    pub fn static_type(&self) -> Option<TypeSlim> {
        self.ty.clone().or_else(|| {
            self.cases
                .first()
                .map(|case| case.body())
                .or(self.default_body.as_ref())
                .and_then(ExpressionSlim::static_type)
        })
    }

    pub fn update(
        self: &Arc<Self>,
        switch_value: ExpressionSlim,
        cases: &[Arc<SwitchCaseSlim>],
        default_body: Option<ExpressionSlim>,
    ) -> Arc<Self> {
        let same_cases = same_elements(&self.cases, cases);
        if switch_value.same(&self.switch_value)
            && same_cases
            && same_optional(default_body.as_ref(), self.default_body.as_ref())
        {
            return Arc::clone(self);
        }
        trace_rebuild("Switch");
        let cases = if same_cases {
            Arc::clone(&self.cases)
        } else {
            Arc::from(cases)
        };
        Arc::new(SwitchExpressionSlim {
            ty: self.ty.clone(),
            switch_value,
            cases,
            default_body,
            comparison: self.comparison.clone(),
        })
    }
}

impl DetachChildren for SwitchCaseSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_all(&mut self.test_values, pending);
        detach(&mut self.body, pending);
    }
}

impl DetachChildren for SwitchExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.switch_value, pending);
        detach_each(&mut self.cases, pending);
        detach_optional(&mut self.default_body, pending);
    }
}
