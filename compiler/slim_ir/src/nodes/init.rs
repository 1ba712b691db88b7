//! Collection and object initializers, and the member bindings they carry.

use std::sync::Arc;

use super::{trace_rebuild, ExpressionSlim, NewExpressionSlim};
use super::release::{detach, detach_each, detach_nested, DetachChildren};
use crate::arguments::ArgumentBuffer;
use crate::{same_elements, ArgumentList, ArgumentProvider, Identity, MemberInfoSlim, MethodInfoSlim, SlimError};

/// One `Add(...)` call of a collection initializer.
#[derive(Debug)]
pub struct ElementInitSlim {
    add_method: MethodInfoSlim,
    arguments: ArgumentList,
}

impl ElementInitSlim {
    pub fn new(add_method: MethodInfoSlim, arguments: impl IntoIterator<Item = ExpressionSlim>) -> Arc<Self> {
        Arc::new(ElementInitSlim {
            add_method,
            arguments: ArgumentList::new(arguments),
        })
    }

    #[inline]
    pub fn add_method(&self) -> &MethodInfoSlim {
        &self.add_method
    }

    pub fn update(self: &Arc<Self>, arguments: &[ExpressionSlim]) -> Arc<Self> {
        let arguments = (!self.arguments.same_as(arguments)).then(|| arguments.iter().cloned().collect());
        self.rewrite(arguments)
    }

    pub(crate) fn rewrite(self: &Arc<Self>, arguments: Option<ArgumentBuffer>) -> Arc<Self> {
        let Some(arguments) = arguments else {
            return Arc::clone(self);
        };
        trace_rebuild("ElementInit");
        Arc::new(ElementInitSlim {
            add_method: self.add_method.clone(),
            arguments: ArgumentList::from(arguments),
        })
    }
}

impl ArgumentProvider for ElementInitSlim {
    fn argument_list(&self) -> &ArgumentList {
        &self.arguments
    }
}

/// `new List<T> { a, b }`.
#[derive(Debug)]
pub struct ListInitExpressionSlim {
    new_expression: Arc<NewExpressionSlim>,
    initializers: Arc<[Arc<ElementInitSlim>]>,
}

impl ListInitExpressionSlim {
    /// # Errors
    ///
    /// `EmptyCollection` without initializers.
    pub fn new(
        new_expression: Arc<NewExpressionSlim>,
        initializers: impl IntoIterator<Item = Arc<ElementInitSlim>>,
    ) -> Result<Arc<Self>, SlimError> {
        let initializers: Arc<[Arc<ElementInitSlim>]> = initializers.into_iter().collect();
        if initializers.is_empty() {
            return Err(SlimError::EmptyCollection {
                node: "ListInit",
                what: "initializer",
            });
        }
        Ok(Arc::new(ListInitExpressionSlim {
            new_expression,
            initializers,
        }))
    }

    #[inline]
    pub fn new_expression(&self) -> &Arc<NewExpressionSlim> {
        &self.new_expression
    }

    #[inline]
    pub fn initializers(&self) -> &[Arc<ElementInitSlim>] {
        &self.initializers
    }

    /// # Errors
    ///
    /// `EmptyCollection` when removing every initializer.
    pub fn update(
        self: &Arc<Self>,
        new_expression: Arc<NewExpressionSlim>,
        initializers: &[Arc<ElementInitSlim>],
    ) -> Result<Arc<Self>, SlimError> {
        let same_initializers = same_elements(&self.initializers, initializers);
        if new_expression.same(&self.new_expression) && same_initializers {
            return Ok(Arc::clone(self));
        }
        trace_rebuild("ListInit");
        if same_initializers {
            return Ok(Arc::new(ListInitExpressionSlim {
                new_expression,
                initializers: Arc::clone(&self.initializers),
            }));
        }
        Self::new(new_expression, initializers.iter().cloned())
    }
}

/// `new T { A = x, B = { ... } }`.
#[derive(Debug)]
pub struct MemberInitExpressionSlim {
    new_expression: Arc<NewExpressionSlim>,
    bindings: Arc<[MemberBindingSlim]>,
}

impl MemberInitExpressionSlim {
    pub fn new(
        new_expression: Arc<NewExpressionSlim>,
        bindings: impl IntoIterator<Item = MemberBindingSlim>,
    ) -> Arc<Self> {
        Arc::new(MemberInitExpressionSlim {
            new_expression,
            bindings: bindings.into_iter().collect(),
        })
    }

    #[inline]
    pub fn new_expression(&self) -> &Arc<NewExpressionSlim> {
        &self.new_expression
    }

    #[inline]
    pub fn bindings(&self) -> &[MemberBindingSlim] {
        &self.bindings
    }

    pub fn update(
        self: &Arc<Self>,
        new_expression: Arc<NewExpressionSlim>,
        bindings: &[MemberBindingSlim],
    ) -> Arc<Self> {
        let same_bindings = same_elements(&self.bindings, bindings);
        if new_expression.same(&self.new_expression) && same_bindings {
            return Arc::clone(self);
        }
        trace_rebuild("MemberInit");
        let bindings = if same_bindings {
            Arc::clone(&self.bindings)
        } else {
            Arc::from(bindings)
        };
        Arc::new(MemberInitExpressionSlim {
            new_expression,
            bindings,
        })
    }
}

/// Discriminant of a [`MemberBindingSlim`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingType {
    Assignment,
    ListBinding,
    MemberBinding,
}

/// One member initialization inside a member initializer.
#[derive(Clone, Debug)]
pub enum MemberBindingSlim {
    /// `Member = expression`
    Assignment(Arc<MemberAssignmentSlim>),
    /// `Member = { a, b }`
    ListBinding(Arc<MemberListBindingSlim>),
    /// `Member = { X = ..., Y = ... }`
    MemberBinding(Arc<MemberMemberBindingSlim>),
}

impl MemberBindingSlim {
    pub fn binding_type(&self) -> BindingType {
        match self {
            Self::Assignment(_) => BindingType::Assignment,
            Self::ListBinding(_) => BindingType::ListBinding,
            Self::MemberBinding(_) => BindingType::MemberBinding,
        }
    }

    /// The initialized member.
    pub fn member(&self) -> &MemberInfoSlim {
        match self {
            Self::Assignment(binding) => binding.member(),
            Self::ListBinding(binding) => binding.member(),
            Self::MemberBinding(binding) => binding.member(),
        }
    }
}

impl Identity for MemberBindingSlim {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Assignment(a), Self::Assignment(b)) => a.same(b),
            (Self::ListBinding(a), Self::ListBinding(b)) => a.same(b),
            (Self::MemberBinding(a), Self::MemberBinding(b)) => a.same(b),
            _ => false,
        }
    }
}

impl From<Arc<MemberAssignmentSlim>> for MemberBindingSlim {
    fn from(binding: Arc<MemberAssignmentSlim>) -> Self {
        MemberBindingSlim::Assignment(binding)
    }
}

impl From<Arc<MemberListBindingSlim>> for MemberBindingSlim {
    fn from(binding: Arc<MemberListBindingSlim>) -> Self {
        MemberBindingSlim::ListBinding(binding)
    }
}

impl From<Arc<MemberMemberBindingSlim>> for MemberBindingSlim {
    fn from(binding: Arc<MemberMemberBindingSlim>) -> Self {
        MemberBindingSlim::MemberBinding(binding)
    }
}

#[derive(Debug)]
pub struct MemberAssignmentSlim {
    member: MemberInfoSlim,
    expression: ExpressionSlim,
}

impl MemberAssignmentSlim {
    pub fn new(member: MemberInfoSlim, expression: ExpressionSlim) -> Arc<Self> {
        Arc::new(MemberAssignmentSlim { member, expression })
    }

    #[inline]
    pub fn member(&self) -> &MemberInfoSlim {
        &self.member
    }

    #[inline]
    pub fn expression(&self) -> &ExpressionSlim {
        &self.expression
    }

    pub fn update(self: &Arc<Self>, expression: ExpressionSlim) -> Arc<Self> {
        if expression.same(&self.expression) {
            return Arc::clone(self);
        }
        trace_rebuild("MemberAssignment");
        Self::new(self.member.clone(), expression)
    }
}

#[derive(Debug)]
pub struct MemberListBindingSlim {
    member: MemberInfoSlim,
    initializers: Arc<[Arc<ElementInitSlim>]>,
}

impl MemberListBindingSlim {
    pub fn new(member: MemberInfoSlim, initializers: impl IntoIterator<Item = Arc<ElementInitSlim>>) -> Arc<Self> {
        Arc::new(MemberListBindingSlim {
            member,
            initializers: initializers.into_iter().collect(),
        })
    }

    #[inline]
    pub fn member(&self) -> &MemberInfoSlim {
        &self.member
    }

    #[inline]
    pub fn initializers(&self) -> &[Arc<ElementInitSlim>] {
        &self.initializers
    }

    pub fn update(self: &Arc<Self>, initializers: &[Arc<ElementInitSlim>]) -> Arc<Self> {
        if same_elements(&self.initializers, initializers) {
            return Arc::clone(self);
        }
        trace_rebuild("MemberListBinding");
        Self::new(self.member.clone(), initializers.iter().cloned())
    }
}

#[derive(Debug)]
pub struct MemberMemberBindingSlim {
    member: MemberInfoSlim,
    bindings: Arc<[MemberBindingSlim]>,
}

impl MemberMemberBindingSlim {
    pub fn new(member: MemberInfoSlim, bindings: impl IntoIterator<Item = MemberBindingSlim>) -> Arc<Self> {
        Arc::new(MemberMemberBindingSlim {
            member,
            bindings: bindings.into_iter().collect(),
        })
    }

    #[inline]
    pub fn member(&self) -> &MemberInfoSlim {
        &self.member
    }

    #[inline]
    pub fn bindings(&self) -> &[MemberBindingSlim] {
        &self.bindings
    }

    pub fn update(self: &Arc<Self>, bindings: &[MemberBindingSlim]) -> Arc<Self> {
        if same_elements(&self.bindings, bindings) {
            return Arc::clone(self);
        }
        trace_rebuild("MemberMemberBinding");
        Self::new(self.member.clone(), bindings.iter().cloned())
    }
}

impl DetachChildren for ElementInitSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        self.arguments.detach_children(pending);
    }
}

impl DetachChildren for ListInitExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_nested(&mut self.new_expression, pending);
        detach_each(&mut self.initializers, pending);
    }
}

impl DetachChildren for MemberInitExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_nested(&mut self.new_expression, pending);
        detach_bindings(&mut self.bindings, pending);
    }
}

impl DetachChildren for MemberBindingSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        match self {
            MemberBindingSlim::Assignment(node) => detach_nested(node, pending),
            MemberBindingSlim::ListBinding(node) => detach_nested(node, pending),
            MemberBindingSlim::MemberBinding(node) => detach_nested(node, pending),
        }
    }
}

impl DetachChildren for MemberAssignmentSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.expression, pending);
    }
}

impl DetachChildren for MemberListBindingSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_each(&mut self.initializers, pending);
    }
}

impl DetachChildren for MemberMemberBindingSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_bindings(&mut self.bindings, pending);
    }
}

fn detach_bindings(bindings: &mut Arc<[MemberBindingSlim]>, pending: &mut Vec<ExpressionSlim>) {
    if let Some(bindings) = Arc::get_mut(bindings) {
        for binding in bindings {
            binding.detach_children(pending);
        }
    }
}
