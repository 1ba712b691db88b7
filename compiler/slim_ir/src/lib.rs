//! Slim IR - Portable Expression Trees
//!
//! This crate contains the core data structures of the slim expression
//! representation:
//! - Surrogate handles for types, members and constant values
//! - Expression nodes (`ExpressionSlim` and one struct per node kind)
//! - Fixed-arity argument storage for call-like nodes
//! - Identity-preserving `update` on every node
//! - Visitors: a same-type rewriter, a cross-type transformer and an
//!   expression-only transformer
//!
//! # Design Philosophy
//!
//! - **Immutable nodes**: every node sits behind an `Arc` and is never
//!   mutated after construction (except the one-time argument
//!   materialization, see [`arguments`]).
//! - **Identity is the change signal**: `update` compares children with
//!   `Arc::ptr_eq` and hands back the same `Arc` when nothing changed, so a
//!   rewrite pass that touches nothing allocates nothing.
//! - **Pay for what you use**: factories pick the smallest layout that can
//!   hold the optional fields actually present.
//! - **No deep equality on nodes**: structural comparison lives in a
//!   consuming crate. Handles compare by value.
//!
//! # Tracing
//!
//! Node rebuilds and argument materialization emit `trace` events.
//! Enable with `RUST_LOG=slim_ir=trace`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod arguments;
mod error;
mod expression_type;
pub mod handles;
mod identity;
pub mod nodes;
pub mod visitor;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use arguments::{ArgumentLayout, ArgumentList, ArgumentProvider, INLINE_ARGUMENTS};
pub use error::SlimError;
pub use expression_type::{ExpressionType, NodeKind};
pub use handles::{
    ConstructorInfoSlim, FieldInfoSlim, MemberInfoSlim, MemberKind, MethodInfoSlim, ObjectSlim,
    ObjectValue, PropertyInfoSlim, TypeSlim, TypeSlimKind,
};
pub use identity::{same_elements, Identity};
pub use nodes::{
    BinaryExpressionSlim, BinaryLayout, BindingType, BlockExpressionSlim, CatchBlockSlim,
    ConditionalExpressionSlim, ConstantExpressionSlim, ConstantLayout, DefaultExpressionSlim,
    ElementInitSlim, ExpressionSlim, GotoExpressionSlim, GotoKind, IndexExpressionSlim,
    InvocationExpressionSlim, LabelExpressionSlim, LabelTargetSlim, LambdaExpressionSlim,
    ListInitExpressionSlim, LoopExpressionSlim, MemberAssignmentSlim, MemberBindingSlim,
    MemberExpressionSlim, MemberInitExpressionSlim, MemberListBindingSlim,
    MemberMemberBindingSlim, MethodCallExpressionSlim, NewArrayExpressionSlim,
    NewExpressionSlim, NewLayout, ParameterExpressionSlim, SwitchCaseSlim, SwitchExpressionSlim,
    TryExpressionSlim, TypeBinaryExpressionSlim, UnaryExpressionSlim, UnaryLayout,
};
pub use visitor::{ExpressionOnlyTransformer, SlimTransformer, SlimVisitor, Unsupported};
