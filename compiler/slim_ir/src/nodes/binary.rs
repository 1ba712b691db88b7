use std::sync::Arc;

use super::{same_optional, trace_rebuild, ExpressionSlim, LambdaExpressionSlim};
use super::release::{detach, detach_nested, DetachChildren};
use crate::{ExpressionType, Identity, MethodInfoSlim, NodeKind, SlimError, TypeSlim};

/// Optional features of a binary node, smallest first.
#[derive(Debug)]
enum BinaryShape {
    Simple,
    Lifted,
    Method(MethodInfoSlim),
    LiftedMethod(MethodInfoSlim),
    /// A conversion lambda is present. Rare (compound assignment with a
    /// user-defined operator), so boxed.
    Full(Box<BinaryFull>),
}

#[derive(Debug)]
struct BinaryFull {
    method: Option<MethodInfoSlim>,
    is_lifted_to_null: bool,
    conversion: Arc<LambdaExpressionSlim>,
}

/// Which optional features a binary node stores.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryLayout {
    Simple,
    Lifted,
    Method,
    LiftedMethod,
    Full,
}

/// Binary operator application: `left op right`.
#[derive(Debug)]
pub struct BinaryExpressionSlim {
    node_type: ExpressionType,
    left: ExpressionSlim,
    right: ExpressionSlim,
    shape: BinaryShape,
}

impl BinaryExpressionSlim {
    /// Build a binary node with the smallest layout for the given features.
    ///
    /// # Errors
    ///
    /// `InvalidNodeType` if `node_type` is not a binary operator.
    pub fn new(
        node_type: ExpressionType,
        left: ExpressionSlim,
        right: ExpressionSlim,
        is_lifted_to_null: bool,
        method: Option<MethodInfoSlim>,
        conversion: Option<Arc<LambdaExpressionSlim>>,
    ) -> Result<Arc<Self>, SlimError> {
        if !node_type.is_binary() {
            return Err(SlimError::InvalidNodeType {
                node_type,
                expected: NodeKind::Binary,
            });
        }
        Ok(Self::build(
            node_type,
            left,
            right,
            is_lifted_to_null,
            method,
            conversion,
        ))
    }

    /// Build without validating `node_type`. Callers guarantee it is binary.
    pub(crate) fn build(
        node_type: ExpressionType,
        left: ExpressionSlim,
        right: ExpressionSlim,
        is_lifted_to_null: bool,
        method: Option<MethodInfoSlim>,
        conversion: Option<Arc<LambdaExpressionSlim>>,
    ) -> Arc<Self> {
        let shape = match (method, is_lifted_to_null, conversion) {
            (method, is_lifted_to_null, Some(conversion)) => BinaryShape::Full(Box::new(BinaryFull {
                method,
                is_lifted_to_null,
                conversion,
            })),
            (None, false, None) => BinaryShape::Simple,
            (None, true, None) => BinaryShape::Lifted,
            (Some(method), false, None) => BinaryShape::Method(method),
            (Some(method), true, None) => BinaryShape::LiftedMethod(method),
        };
        Arc::new(BinaryExpressionSlim {
            node_type,
            left,
            right,
            shape,
        })
    }

    #[inline]
    pub fn node_type(&self) -> ExpressionType {
        self.node_type
    }

    #[inline]
    pub fn left(&self) -> &ExpressionSlim {
        &self.left
    }

    #[inline]
    pub fn right(&self) -> &ExpressionSlim {
        &self.right
    }

    /// User-defined operator method, if any.
    pub fn method(&self) -> Option<&MethodInfoSlim> {
        match &self.shape {
            BinaryShape::Method(method) | BinaryShape::LiftedMethod(method) => Some(method),
            BinaryShape::Full(full) => full.method.as_ref(),
            BinaryShape::Simple | BinaryShape::Lifted => None,
        }
    }

    pub fn is_lifted_to_null(&self) -> bool {
        match &self.shape {
            BinaryShape::Lifted | BinaryShape::LiftedMethod(_) => true,
            BinaryShape::Full(full) => full.is_lifted_to_null,
            BinaryShape::Simple | BinaryShape::Method(_) => false,
        }
    }

    /// Conversion applied to the result of a compound assignment.
    pub fn conversion(&self) -> Option<&Arc<LambdaExpressionSlim>> {
        match &self.shape {
            BinaryShape::Full(full) => Some(&full.conversion),
            _ => None,
        }
    }

    pub fn layout(&self) -> BinaryLayout {
        match &self.shape {
            BinaryShape::Simple => BinaryLayout::Simple,
            BinaryShape::Lifted => BinaryLayout::Lifted,
            BinaryShape::Method(_) => BinaryLayout::Method,
            BinaryShape::LiftedMethod(_) => BinaryLayout::LiftedMethod,
            BinaryShape::Full(_) => BinaryLayout::Full,
        }
    }

    /// Result type: the operator method's return type, or `Boolean` for
    /// comparisons and short-circuit operators when not lifted.
    pub fn static_type(&self) -> Option<TypeSlim> {
        if let Some(method) = self.method() {
            return method.return_type().cloned();
        }
        let is_predicate = matches!(
            self.node_type,
            ExpressionType::Equal
                | ExpressionType::NotEqual
                | ExpressionType::LessThan
                | ExpressionType::LessThanOrEqual
                | ExpressionType::GreaterThan
                | ExpressionType::GreaterThanOrEqual
                | ExpressionType::AndAlso
                | ExpressionType::OrElse
        );
        if is_predicate && !self.is_lifted_to_null() {
            return Some(TypeSlim::simple("Boolean"));
        }
        if self.node_type == ExpressionType::Assign || self.node_type.is_compound_assignment() {
            return self.left.static_type();
        }
        None
    }

    /// Replace the children. Returns `self` when every child is identical.
    pub fn update(
        self: &Arc<Self>,
        left: ExpressionSlim,
        conversion: Option<Arc<LambdaExpressionSlim>>,
        right: ExpressionSlim,
    ) -> Arc<Self> {
        if left.same(&self.left)
            && right.same(&self.right)
            && same_optional(conversion.as_ref(), self.conversion())
        {
            return Arc::clone(self);
        }
        trace_rebuild("Binary");
        Self::build(
            self.node_type,
            left,
            right,
            self.is_lifted_to_null(),
            self.method().cloned(),
            conversion,
        )
    }
}

impl DetachChildren for BinaryExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.left, pending);
        detach(&mut self.right, pending);
        if let BinaryShape::Full(full) = &mut self.shape {
            detach_nested(&mut full.conversion, pending);
        }
    }
}
