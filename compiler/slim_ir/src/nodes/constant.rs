use std::sync::Arc;

use crate::{ObjectSlim, TypeSlim};

#[derive(Debug)]
enum ConstantShape {
    Plain,
    Typed(TypeSlim),
}

/// Which layout a constant uses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstantLayout {
    /// The constant's type is the value's own type.
    Plain,
    /// An explicit type that differs from the value's type (e.g. a `null`
    /// typed as `String`).
    Typed,
}

/// Constant value leaf.
#[derive(Debug)]
pub struct ConstantExpressionSlim {
    value: ObjectSlim,
    shape: ConstantShape,
}

impl ConstantExpressionSlim {
    /// Build a constant. An explicit type equal to the value's type selects
    /// the plain layout.
    pub fn new(value: ObjectSlim, ty: Option<TypeSlim>) -> Arc<Self> {
        let shape = match ty {
            Some(ty) if !(ty.ptr_eq(value.ty()) || &ty == value.ty()) => ConstantShape::Typed(ty),
            _ => ConstantShape::Plain,
        };
        Arc::new(ConstantExpressionSlim { value, shape })
    }

    #[inline]
    pub fn value(&self) -> &ObjectSlim {
        &self.value
    }

    /// The constant's type: the explicit type, or the value's.
    pub fn ty(&self) -> &TypeSlim {
        match &self.shape {
            ConstantShape::Plain => self.value.ty(),
            ConstantShape::Typed(ty) => ty,
        }
    }

    pub fn layout(&self) -> ConstantLayout {
        match self.shape {
            ConstantShape::Plain => ConstantLayout::Plain,
            ConstantShape::Typed(_) => ConstantLayout::Typed,
        }
    }
}

/// Default value of a type.
#[derive(Debug)]
pub struct DefaultExpressionSlim {
    ty: TypeSlim,
}

impl DefaultExpressionSlim {
    pub fn new(ty: TypeSlim) -> Arc<Self> {
        Arc::new(DefaultExpressionSlim { ty })
    }

    #[inline]
    pub fn ty(&self) -> &TypeSlim {
        &self.ty
    }
}
