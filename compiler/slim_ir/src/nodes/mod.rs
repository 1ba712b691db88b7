//! Expression nodes.
//!
//! [`ExpressionSlim`] is the handle every parent stores: one `Arc` per node
//! kind behind a tag. Cloning it is a reference-count bump, and two handles
//! are the *same* node when they point at the same allocation.
//!
//! Each node kind has its own struct (`BinaryExpressionSlim`, ...). Node
//! structs are immutable, expose their fields through accessors and offer
//! an `update` method that returns the receiver's own `Arc` when every
//! supplied child is identical to the current one.
//!
//! # Layouts
//!
//! Kinds with optional features (operator methods, lifting, conversions,
//! explicit types, instance targets) store them in a private shape enum
//! whose rare variants are boxed. The factory picks the smallest shape for
//! the fields actually present; `layout()` reports the choice.

use std::sync::Arc;

use crate::{ExpressionType, Identity, NodeKind, TypeSlim};

mod binary;
mod block;
mod call;
mod conditional;
mod constant;
mod factory;
mod index;
mod init;
mod jumps;
mod lambda;
mod member;
mod new;
pub(crate) mod release;
mod switch;
mod try_catch;
mod type_binary;
mod unary;

pub use binary::{BinaryExpressionSlim, BinaryLayout};
pub use block::BlockExpressionSlim;
pub use call::{InvocationExpressionSlim, MethodCallExpressionSlim};
pub use conditional::ConditionalExpressionSlim;
pub use constant::{ConstantExpressionSlim, ConstantLayout, DefaultExpressionSlim};
pub use index::IndexExpressionSlim;
pub use init::{
    BindingType, ElementInitSlim, ListInitExpressionSlim, MemberAssignmentSlim,
    MemberBindingSlim, MemberInitExpressionSlim, MemberListBindingSlim, MemberMemberBindingSlim,
};
pub use jumps::{GotoExpressionSlim, GotoKind, LabelExpressionSlim, LabelTargetSlim, LoopExpressionSlim};
pub use lambda::{LambdaExpressionSlim, ParameterExpressionSlim};
pub use member::MemberExpressionSlim;
pub use new::{NewArrayExpressionSlim, NewExpressionSlim, NewLayout};
pub use switch::{SwitchCaseSlim, SwitchExpressionSlim};
pub use try_catch::{CatchBlockSlim, TryExpressionSlim};
pub use type_binary::TypeBinaryExpressionSlim;
pub use unary::{UnaryExpressionSlim, UnaryLayout};

/// Handle to any expression node.
#[derive(Clone, Debug)]
pub enum ExpressionSlim {
    Binary(Arc<BinaryExpressionSlim>),
    Unary(Arc<UnaryExpressionSlim>),
    Conditional(Arc<ConditionalExpressionSlim>),
    Constant(Arc<ConstantExpressionSlim>),
    Default(Arc<DefaultExpressionSlim>),
    Parameter(Arc<ParameterExpressionSlim>),
    Lambda(Arc<LambdaExpressionSlim>),
    Invocation(Arc<InvocationExpressionSlim>),
    MethodCall(Arc<MethodCallExpressionSlim>),
    New(Arc<NewExpressionSlim>),
    NewArray(Arc<NewArrayExpressionSlim>),
    Index(Arc<IndexExpressionSlim>),
    Member(Arc<MemberExpressionSlim>),
    ListInit(Arc<ListInitExpressionSlim>),
    MemberInit(Arc<MemberInitExpressionSlim>),
    TypeBinary(Arc<TypeBinaryExpressionSlim>),
    Block(Arc<BlockExpressionSlim>),
    Goto(Arc<GotoExpressionSlim>),
    Label(Arc<LabelExpressionSlim>),
    Loop(Arc<LoopExpressionSlim>),
    Switch(Arc<SwitchExpressionSlim>),
    Try(Arc<TryExpressionSlim>),
}

impl ExpressionSlim {
    /// Structural variant.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Binary(_) => NodeKind::Binary,
            Self::Unary(_) => NodeKind::Unary,
            Self::Conditional(_) => NodeKind::Conditional,
            Self::Constant(_) => NodeKind::Constant,
            Self::Default(_) => NodeKind::Default,
            Self::Parameter(_) => NodeKind::Parameter,
            Self::Lambda(_) => NodeKind::Lambda,
            Self::Invocation(_) => NodeKind::Invocation,
            Self::MethodCall(_) => NodeKind::MethodCall,
            Self::New(_) => NodeKind::New,
            Self::NewArray(_) => NodeKind::NewArray,
            Self::Index(_) => NodeKind::Index,
            Self::Member(_) => NodeKind::Member,
            Self::ListInit(_) => NodeKind::ListInit,
            Self::MemberInit(_) => NodeKind::MemberInit,
            Self::TypeBinary(_) => NodeKind::TypeBinary,
            Self::Block(_) => NodeKind::Block,
            Self::Goto(_) => NodeKind::Goto,
            Self::Label(_) => NodeKind::Label,
            Self::Loop(_) => NodeKind::Loop,
            Self::Switch(_) => NodeKind::Switch,
            Self::Try(_) => NodeKind::Try,
        }
    }

    /// Operator-level discriminant.
    pub fn node_type(&self) -> ExpressionType {
        match self {
            Self::Binary(node) => node.node_type(),
            Self::Unary(node) => node.node_type(),
            Self::NewArray(node) => node.node_type(),
            Self::TypeBinary(node) => node.node_type(),
            Self::Conditional(_) => ExpressionType::Conditional,
            Self::Constant(_) => ExpressionType::Constant,
            Self::Default(_) => ExpressionType::Default,
            Self::Parameter(_) => ExpressionType::Parameter,
            Self::Lambda(_) => ExpressionType::Lambda,
            Self::Invocation(_) => ExpressionType::Invoke,
            Self::MethodCall(_) => ExpressionType::Call,
            Self::New(_) => ExpressionType::New,
            Self::Index(_) => ExpressionType::Index,
            Self::Member(_) => ExpressionType::MemberAccess,
            Self::ListInit(_) => ExpressionType::ListInit,
            Self::MemberInit(_) => ExpressionType::MemberInit,
            Self::Block(_) => ExpressionType::Block,
            Self::Goto(_) => ExpressionType::Goto,
            Self::Label(_) => ExpressionType::Label,
            Self::Loop(_) => ExpressionType::Loop,
            Self::Switch(_) => ExpressionType::Switch,
            Self::Try(_) => ExpressionType::Try,
        }
    }

    /// Result type when it can be read off the node's own handles.
    ///
    /// `None` means deriving the type would need a type system (e.g. the
    /// result of `a + b` without an operator method).
    pub fn static_type(&self) -> Option<TypeSlim> {
        match self {
            Self::Binary(node) => node.static_type(),
            Self::Unary(node) => node.static_type(),
            Self::Conditional(node) => node.static_type(),
            Self::Constant(node) => Some(node.ty().clone()),
            Self::Default(node) => Some(node.ty().clone()),
            Self::Parameter(node) => Some(node.ty().clone()),
            Self::Lambda(node) => node.delegate_type().cloned(),
            Self::Invocation(node) => node
                .expression()
                .as_lambda()
                .and_then(|lambda| lambda.body().static_type()),
            Self::TypeBinary(_) => Some(TypeSlim::simple("Boolean")),
            Self::Loop(node) => node.static_type(),
            Self::MethodCall(node) => node.method().return_type().cloned(),
            Self::New(node) => Some(node.ty().clone()),
            Self::NewArray(node) => Some(node.static_type()),
            Self::Index(node) => node.indexer().map(|indexer| indexer.property_type().clone()),
            Self::Member(node) => node.member().member_type().cloned(),
            Self::ListInit(node) => Some(node.new_expression().ty().clone()),
            Self::MemberInit(node) => Some(node.new_expression().ty().clone()),
            Self::Block(node) => node.static_type(),
            Self::Goto(node) => node.ty().cloned(),
            Self::Label(node) => node.target().ty().cloned(),
            Self::Switch(node) => node.static_type(),
            Self::Try(node) => node.static_type(),
        }
    }

    /// The lambda node, if this is one.
    pub fn as_lambda(&self) -> Option<&Arc<LambdaExpressionSlim>> {
        match self {
            Self::Lambda(node) => Some(node),
            _ => None,
        }
    }

    /// The parameter node, if this is one.
    pub fn as_parameter(&self) -> Option<&Arc<ParameterExpressionSlim>> {
        match self {
            Self::Parameter(node) => Some(node),
            _ => None,
        }
    }

    /// The new node, if this is one.
    pub fn as_new(&self) -> Option<&Arc<NewExpressionSlim>> {
        match self {
            Self::New(node) => Some(node),
            _ => None,
        }
    }

    /// Address of the node allocation. Stable for the node's lifetime and
    /// usable as an identity key.
    pub fn address(&self) -> usize {
        fn addr<T>(node: &Arc<T>) -> usize {
            Arc::as_ptr(node) as usize
        }
        match self {
            Self::Binary(node) => addr(node),
            Self::Unary(node) => addr(node),
            Self::Conditional(node) => addr(node),
            Self::Constant(node) => addr(node),
            Self::Default(node) => addr(node),
            Self::Parameter(node) => addr(node),
            Self::Lambda(node) => addr(node),
            Self::Invocation(node) => addr(node),
            Self::MethodCall(node) => addr(node),
            Self::New(node) => addr(node),
            Self::NewArray(node) => addr(node),
            Self::Index(node) => addr(node),
            Self::Member(node) => addr(node),
            Self::ListInit(node) => addr(node),
            Self::MemberInit(node) => addr(node),
            Self::TypeBinary(node) => addr(node),
            Self::Block(node) => addr(node),
            Self::Goto(node) => addr(node),
            Self::Label(node) => addr(node),
            Self::Loop(node) => addr(node),
            Self::Switch(node) => addr(node),
            Self::Try(node) => addr(node),
        }
    }
}

impl Identity for ExpressionSlim {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.address() == other.address()
    }
}

macro_rules! impl_from_node {
    ($($variant:ident => $node:ty),* $(,)?) => {
        $(
            impl From<Arc<$node>> for ExpressionSlim {
                #[inline]
                fn from(node: Arc<$node>) -> Self {
                    ExpressionSlim::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    Binary => BinaryExpressionSlim,
    Unary => UnaryExpressionSlim,
    Conditional => ConditionalExpressionSlim,
    Constant => ConstantExpressionSlim,
    Default => DefaultExpressionSlim,
    Parameter => ParameterExpressionSlim,
    Lambda => LambdaExpressionSlim,
    Invocation => InvocationExpressionSlim,
    MethodCall => MethodCallExpressionSlim,
    New => NewExpressionSlim,
    NewArray => NewArrayExpressionSlim,
    Index => IndexExpressionSlim,
    Member => MemberExpressionSlim,
    ListInit => ListInitExpressionSlim,
    MemberInit => MemberInitExpressionSlim,
    TypeBinary => TypeBinaryExpressionSlim,
    Block => BlockExpressionSlim,
    Goto => GotoExpressionSlim,
    Label => LabelExpressionSlim,
    Loop => LoopExpressionSlim,
    Switch => SwitchExpressionSlim,
    Try => TryExpressionSlim,
}

/// Identity of an optional child against the node's current optional child.
#[inline]
pub(crate) fn same_optional<T: Identity>(new: Option<&T>, current: Option<&T>) -> bool {
    match (new, current) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same(b),
        _ => false,
    }
}

/// Record that an `update` had to allocate.
#[inline]
pub(crate) fn trace_rebuild(kind: &'static str) {
    tracing::trace!(kind, "rebuilding node with changed children");
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::ExpressionSlim;
    // Tag + one pointer. Stored inline in argument slots and child fields.
    crate::static_assert_size!(ExpressionSlim, 16);
}

#[cfg(test)]
mod tests;
