use std::sync::Arc;

use super::{same_optional, trace_rebuild, ExpressionSlim};
use super::release::{detach_optional, DetachChildren};
use crate::{ExpressionType, MethodInfoSlim, NodeKind, SlimError, TypeSlim};

#[derive(Debug)]
enum UnaryShape {
    Simple,
    Typed(TypeSlim),
    Method(MethodInfoSlim),
    Full(Box<(TypeSlim, MethodInfoSlim)>),
}

/// Which optional features a unary node stores.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryLayout {
    Simple,
    /// Explicit result type (conversions, `TypeAs`, `Unbox`, typed `Throw`).
    Typed,
    Method,
    Full,
}

/// Unary operator application.
///
/// The operand is optional only for `Throw`, where a missing operand is a
/// rethrow.
#[derive(Debug)]
pub struct UnaryExpressionSlim {
    node_type: ExpressionType,
    operand: Option<ExpressionSlim>,
    shape: UnaryShape,
}

impl UnaryExpressionSlim {
    /// # Errors
    ///
    /// - `InvalidNodeType` if `node_type` is not a unary operator.
    /// - `MissingField` if `operand` is absent for anything but `Throw`, or
    ///   if a conversion-style operator has no result type.
    pub fn new(
        node_type: ExpressionType,
        operand: Option<ExpressionSlim>,
        ty: Option<TypeSlim>,
        method: Option<MethodInfoSlim>,
    ) -> Result<Arc<Self>, SlimError> {
        if !node_type.is_unary() {
            return Err(SlimError::InvalidNodeType {
                node_type,
                expected: NodeKind::Unary,
            });
        }
        if operand.is_none() && node_type != ExpressionType::Throw {
            return Err(SlimError::MissingField {
                node: "Unary",
                field: "operand",
            });
        }
        let needs_type = matches!(
            node_type,
            ExpressionType::Convert
                | ExpressionType::ConvertChecked
                | ExpressionType::TypeAs
                | ExpressionType::Unbox
        );
        if needs_type && ty.is_none() {
            return Err(SlimError::MissingField {
                node: "Unary",
                field: "type",
            });
        }
        let shape = match (ty, method) {
            (None, None) => UnaryShape::Simple,
            (Some(ty), None) => UnaryShape::Typed(ty),
            (None, Some(method)) => UnaryShape::Method(method),
            (Some(ty), Some(method)) => UnaryShape::Full(Box::new((ty, method))),
        };
        Ok(Arc::new(UnaryExpressionSlim {
            node_type,
            operand,
            shape,
        }))
    }

    #[inline]
    pub fn node_type(&self) -> ExpressionType {
        self.node_type
    }

    /// The operand; `None` only for a rethrow.
    #[inline]
    pub fn operand(&self) -> Option<&ExpressionSlim> {
        self.operand.as_ref()
    }

    /// Explicit result type, if stored.
    pub fn ty(&self) -> Option<&TypeSlim> {
        match &self.shape {
            UnaryShape::Typed(ty) => Some(ty),
            UnaryShape::Full(full) => Some(&full.0),
            UnaryShape::Simple | UnaryShape::Method(_) => None,
        }
    }

    pub fn method(&self) -> Option<&MethodInfoSlim> {
        match &self.shape {
            UnaryShape::Method(method) => Some(method),
            UnaryShape::Full(full) => Some(&full.1),
            UnaryShape::Simple | UnaryShape::Typed(_) => None,
        }
    }

    pub fn layout(&self) -> UnaryLayout {
        match &self.shape {
            UnaryShape::Simple => UnaryLayout::Simple,
            UnaryShape::Typed(_) => UnaryLayout::Typed,
            UnaryShape::Method(_) => UnaryLayout::Method,
            UnaryShape::Full(_) => UnaryLayout::Full,
        }
    }

    /// Explicit type, then the method's return type, then the operand's
    /// type for operators that preserve it.
    pub fn static_type(&self) -> Option<TypeSlim> {
        if let Some(ty) = self.ty() {
            return Some(ty.clone());
        }
        if let Some(method) = self.method() {
            return method.return_type().cloned();
        }
        match self.node_type {
            ExpressionType::IsTrue | ExpressionType::IsFalse => Some(TypeSlim::simple("Boolean")),
            ExpressionType::ArrayLength => Some(TypeSlim::simple("Int32")),
            ExpressionType::Negate
            | ExpressionType::NegateChecked
            | ExpressionType::UnaryPlus
            | ExpressionType::Not
            | ExpressionType::OnesComplement
            | ExpressionType::Increment
            | ExpressionType::Decrement
            | ExpressionType::PreIncrementAssign
            | ExpressionType::PreDecrementAssign
            | ExpressionType::PostIncrementAssign
            | ExpressionType::PostDecrementAssign => {
                self.operand.as_ref().and_then(ExpressionSlim::static_type)
            }
            _ => None,
        }
    }

    /// Replace the operand. Returns `self` when it is identical.
    ///
    /// # Errors
    ///
    /// `MissingField` when removing the operand of anything but `Throw`.
    pub fn update(self: &Arc<Self>, operand: Option<ExpressionSlim>) -> Result<Arc<Self>, SlimError> {
        if same_optional(operand.as_ref(), self.operand.as_ref()) {
            return Ok(Arc::clone(self));
        }
        trace_rebuild("Unary");
        Self::new(
            self.node_type,
            operand,
            self.ty().cloned(),
            self.method().cloned(),
        )
    }
}

impl DetachChildren for UnaryExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_optional(&mut self.operand, pending);
    }
}
