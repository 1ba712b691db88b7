use std::sync::Arc;

use super::{trace_rebuild, ExpressionSlim};
use super::release::DetachChildren;
use crate::arguments::ArgumentBuffer;
use crate::{
    ArgumentList, ArgumentProvider, ConstructorInfoSlim, ExpressionType, MemberInfoSlim, NodeKind,
    SlimError, TypeSlim,
};

#[derive(Debug)]
enum NewShape {
    /// Default construction of a value type; no constructor, no arguments.
    ValueType(TypeSlim),
    Constructor(ConstructorInfoSlim),
    /// Anonymous-type style construction: each argument initializes the
    /// member at the same position.
    WithMembers(Box<(ConstructorInfoSlim, Arc<[MemberInfoSlim]>)>),
}

/// Which layout a `new` node uses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NewLayout {
    ValueType,
    Constructor,
    WithMembers,
}

/// Object construction.
#[derive(Debug)]
pub struct NewExpressionSlim {
    shape: NewShape,
    arguments: ArgumentList,
}

impl NewExpressionSlim {
    /// `new T()` for a value type without a constructor.
    pub fn value_type(ty: TypeSlim) -> Arc<Self> {
        Arc::new(NewExpressionSlim {
            shape: NewShape::ValueType(ty),
            arguments: ArgumentList::empty(),
        })
    }

    /// Constructor call.
    pub fn new(
        constructor: ConstructorInfoSlim,
        arguments: impl IntoIterator<Item = ExpressionSlim>,
    ) -> Arc<Self> {
        Arc::new(NewExpressionSlim {
            shape: NewShape::Constructor(constructor),
            arguments: ArgumentList::new(arguments),
        })
    }

    /// Constructor call whose arguments initialize `members`, position by
    /// position.
    ///
    /// # Errors
    ///
    /// `ConflictingFields` if the member and argument counts differ.
    pub fn with_members(
        constructor: ConstructorInfoSlim,
        arguments: impl IntoIterator<Item = ExpressionSlim>,
        members: impl IntoIterator<Item = MemberInfoSlim>,
    ) -> Result<Arc<Self>, SlimError> {
        let arguments = ArgumentList::new(arguments);
        let members: Arc<[MemberInfoSlim]> = members.into_iter().collect();
        if members.len() != arguments.len() {
            return Err(SlimError::ConflictingFields {
                node: "New",
                fields: "a member list whose length differs from the argument count",
            });
        }
        Ok(Arc::new(NewExpressionSlim {
            shape: NewShape::WithMembers(Box::new((constructor, members))),
            arguments,
        }))
    }

    /// General factory used by converters that carry all fields at once.
    ///
    /// # Errors
    ///
    /// - `MissingField` if there is no constructor but there are
    ///   arguments or members, or neither a type nor a constructor.
    /// - `ConflictingFields` as for [`with_members`](Self::with_members).
    pub fn make(
        ty: Option<TypeSlim>,
        constructor: Option<ConstructorInfoSlim>,
        arguments: impl IntoIterator<Item = ExpressionSlim>,
        members: Option<Vec<MemberInfoSlim>>,
    ) -> Result<Arc<Self>, SlimError> {
        let arguments = ArgumentList::new(arguments);
        match (constructor, members) {
            (Some(constructor), Some(members)) => Self::with_members(constructor, arguments.iter().cloned(), members),
            (Some(constructor), None) => Ok(Arc::new(NewExpressionSlim {
                shape: NewShape::Constructor(constructor),
                arguments,
            })),
            (None, Some(_)) => Err(SlimError::MissingField {
                node: "New",
                field: "constructor",
            }),
            (None, None) if !arguments.is_empty() => Err(SlimError::MissingField {
                node: "New",
                field: "constructor",
            }),
            (None, None) => match ty {
                Some(ty) => Ok(Self::value_type(ty)),
                None => Err(SlimError::MissingField {
                    node: "New",
                    field: "type",
                }),
            },
        }
    }

    /// The constructed type.
    pub fn ty(&self) -> &TypeSlim {
        match &self.shape {
            NewShape::ValueType(ty) => ty,
            NewShape::Constructor(constructor) => constructor.declaring_type(),
            NewShape::WithMembers(with_members) => with_members.0.declaring_type(),
        }
    }

    pub fn constructor(&self) -> Option<&ConstructorInfoSlim> {
        match &self.shape {
            NewShape::ValueType(_) => None,
            NewShape::Constructor(constructor) => Some(constructor),
            NewShape::WithMembers(with_members) => Some(&with_members.0),
        }
    }

    pub fn members(&self) -> Option<&[MemberInfoSlim]> {
        match &self.shape {
            NewShape::WithMembers(with_members) => Some(&with_members.1),
            _ => None,
        }
    }

    pub fn layout(&self) -> NewLayout {
        match self.shape {
            NewShape::ValueType(_) => NewLayout::ValueType,
            NewShape::Constructor(_) => NewLayout::Constructor,
            NewShape::WithMembers(_) => NewLayout::WithMembers,
        }
    }

    pub fn update(self: &Arc<Self>, arguments: &[ExpressionSlim]) -> Arc<Self> {
        let arguments = (!self.arguments.same_as(arguments)).then(|| arguments.iter().cloned().collect());
        self.rewrite(arguments)
    }

    /// Rebuild with new arguments, if any. A visitor maps arguments one to
    /// one, so the member count stays consistent.
    pub(crate) fn rewrite(self: &Arc<Self>, arguments: Option<ArgumentBuffer>) -> Arc<Self> {
        let Some(arguments) = arguments else {
            return Arc::clone(self);
        };
        trace_rebuild("New");
        let shape = match &self.shape {
            NewShape::ValueType(ty) => NewShape::ValueType(ty.clone()),
            NewShape::Constructor(constructor) => NewShape::Constructor(constructor.clone()),
            NewShape::WithMembers(with_members) => NewShape::WithMembers(with_members.clone()),
        };
        Arc::new(NewExpressionSlim {
            shape,
            arguments: ArgumentList::from(arguments),
        })
    }
}

impl ArgumentProvider for NewExpressionSlim {
    fn argument_list(&self) -> &ArgumentList {
        &self.arguments
    }
}

/// Array creation, from element initializers (`NewArrayInit`) or from
/// dimension bounds (`NewArrayBounds`).
#[derive(Debug)]
pub struct NewArrayExpressionSlim {
    node_type: ExpressionType,
    element_type: TypeSlim,
    expressions: ArgumentList,
}

impl NewArrayExpressionSlim {
    /// # Errors
    ///
    /// - `InvalidNodeType` unless `node_type` is `NewArrayInit` or
    ///   `NewArrayBounds`.
    /// - `EmptyCollection` for `NewArrayBounds` without bounds.
    pub fn new(
        node_type: ExpressionType,
        element_type: TypeSlim,
        expressions: impl IntoIterator<Item = ExpressionSlim>,
    ) -> Result<Arc<Self>, SlimError> {
        if !node_type.is_new_array() {
            return Err(SlimError::InvalidNodeType {
                node_type,
                expected: NodeKind::NewArray,
            });
        }
        let expressions = ArgumentList::new(expressions);
        if node_type == ExpressionType::NewArrayBounds && expressions.is_empty() {
            return Err(SlimError::EmptyCollection {
                node: "NewArrayBounds",
                what: "bound",
            });
        }
        Ok(Arc::new(NewArrayExpressionSlim {
            node_type,
            element_type,
            expressions,
        }))
    }

    /// `new T[] { ... }`.
    pub fn init(element_type: TypeSlim, expressions: impl IntoIterator<Item = ExpressionSlim>) -> Arc<Self> {
        Arc::new(NewArrayExpressionSlim {
            node_type: ExpressionType::NewArrayInit,
            element_type,
            expressions: ArgumentList::new(expressions),
        })
    }

    #[inline]
    pub fn node_type(&self) -> ExpressionType {
        self.node_type
    }

    #[inline]
    pub fn element_type(&self) -> &TypeSlim {
        &self.element_type
    }

    /// Array type produced: rank 1 for initializers, one dimension per
    /// bound otherwise.
    pub fn static_type(&self) -> TypeSlim {
        let rank = match self.node_type {
            ExpressionType::NewArrayBounds => self.expressions.len(),
            _ => 1,
        };
        match u32::try_from(rank) {
            Ok(rank) if rank > 1 => TypeSlim::array_with_rank(self.element_type.clone(), rank),
            _ => TypeSlim::array(self.element_type.clone()),
        }
    }

    /// # Errors
    ///
    /// `EmptyCollection` when removing every bound of `NewArrayBounds`.
    pub fn update(self: &Arc<Self>, expressions: &[ExpressionSlim]) -> Result<Arc<Self>, SlimError> {
        if self.expressions.same_as(expressions) {
            return Ok(Arc::clone(self));
        }
        trace_rebuild("NewArray");
        Self::new(self.node_type, self.element_type.clone(), expressions.iter().cloned())
    }

    pub(crate) fn rewrite(self: &Arc<Self>, expressions: Option<ArgumentBuffer>) -> Arc<Self> {
        let Some(expressions) = expressions else {
            return Arc::clone(self);
        };
        trace_rebuild("NewArray");
        Arc::new(NewArrayExpressionSlim {
            node_type: self.node_type,
            element_type: self.element_type.clone(),
            expressions: ArgumentList::from(expressions),
        })
    }
}

impl ArgumentProvider for NewArrayExpressionSlim {
    fn argument_list(&self) -> &ArgumentList {
        &self.expressions
    }
}

impl DetachChildren for NewExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        self.arguments.detach_children(pending);
    }
}

impl DetachChildren for NewArrayExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        self.expressions.detach_children(pending);
    }
}
