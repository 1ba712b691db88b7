//! Teardown of deep trees without recursion.
//!
//! Dropping a node drops its children, which drop theirs: a right-nested
//! chain of 100k nodes would need 100k nested drop frames. Instead, every
//! node with children detaches them into a heap work-list when it is
//! dropped, and [`release`] drains that list. A child is only opened up
//! when the dropping node was its last owner; shared children just lose a
//! reference.
//!
//! Detached slots are refilled with a shared placeholder leaf, so the node's
//! own field drops that follow are shallow.

use std::mem;
use std::sync::{Arc, OnceLock};

use super::{
    BinaryExpressionSlim, BlockExpressionSlim, ConditionalExpressionSlim, DefaultExpressionSlim,
    ExpressionSlim, GotoExpressionSlim, IndexExpressionSlim, InvocationExpressionSlim,
    LabelExpressionSlim, LambdaExpressionSlim, ListInitExpressionSlim, LoopExpressionSlim,
    MemberExpressionSlim, MemberInitExpressionSlim, MethodCallExpressionSlim,
    NewArrayExpressionSlim, NewExpressionSlim, SwitchExpressionSlim, TryExpressionSlim,
    TypeBinaryExpressionSlim, UnaryExpressionSlim,
};
use crate::TypeSlim;

/// Nodes that own expression children.
pub(crate) trait DetachChildren {
    /// Move every child this node owns into `pending`, leaving placeholders.
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>);
}

static HOLE: OnceLock<ExpressionSlim> = OnceLock::new();

fn hole() -> ExpressionSlim {
    HOLE.get_or_init(|| DefaultExpressionSlim::new(TypeSlim::simple("Void")).into())
        .clone()
}

fn is_hole(slot: &ExpressionSlim) -> bool {
    HOLE.get().is_some_and(|hole| hole.address() == slot.address())
}

/// Move `slot` into `pending`.
pub(crate) fn detach(slot: &mut ExpressionSlim, pending: &mut Vec<ExpressionSlim>) {
    if !is_hole(slot) {
        pending.push(mem::replace(slot, hole()));
    }
}

pub(crate) fn detach_optional(slot: &mut Option<ExpressionSlim>, pending: &mut Vec<ExpressionSlim>) {
    if let Some(slot) = slot {
        detach(slot, pending);
    }
}

/// Detach the elements of a sequence this node owns alone.
pub(crate) fn detach_all(slots: &mut Arc<[ExpressionSlim]>, pending: &mut Vec<ExpressionSlim>) {
    if let Some(slots) = Arc::get_mut(slots) {
        for slot in slots {
            detach(slot, pending);
        }
    }
}

/// Open up a typed child (lambda, `new`, catch block, ...) owned alone.
pub(crate) fn detach_nested<T: DetachChildren>(node: &mut Arc<T>, pending: &mut Vec<ExpressionSlim>) {
    if let Some(node) = Arc::get_mut(node) {
        node.detach_children(pending);
    }
}

pub(crate) fn detach_each<T: DetachChildren>(nodes: &mut Arc<[Arc<T>]>, pending: &mut Vec<ExpressionSlim>) {
    if let Some(nodes) = Arc::get_mut(nodes) {
        for node in nodes {
            detach_nested(node, pending);
        }
    }
}

/// Drop detached children one at a time, opening up the ones that were
/// owned only through `pending`.
fn release(mut pending: Vec<ExpressionSlim>) {
    while let Some(mut node) = pending.pop() {
        match &mut node {
            ExpressionSlim::Binary(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Unary(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Conditional(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Lambda(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Invocation(node) => detach_nested(node, &mut pending),
            ExpressionSlim::MethodCall(node) => detach_nested(node, &mut pending),
            ExpressionSlim::New(node) => detach_nested(node, &mut pending),
            ExpressionSlim::NewArray(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Index(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Member(node) => detach_nested(node, &mut pending),
            ExpressionSlim::ListInit(node) => detach_nested(node, &mut pending),
            ExpressionSlim::MemberInit(node) => detach_nested(node, &mut pending),
            ExpressionSlim::TypeBinary(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Block(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Goto(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Label(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Loop(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Switch(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Try(node) => detach_nested(node, &mut pending),
            ExpressionSlim::Constant(_) | ExpressionSlim::Default(_) | ExpressionSlim::Parameter(_) => {}
        }
        // `node` now holds only placeholders and shared children.
    }
}

macro_rules! release_on_drop {
    ($($node:ty),* $(,)?) => {
        $(
            impl Drop for $node {
                fn drop(&mut self) {
                    let mut pending = Vec::new();
                    self.detach_children(&mut pending);
                    if !pending.is_empty() {
                        release(pending);
                    }
                }
            }
        )*
    };
}

release_on_drop! {
    BinaryExpressionSlim,
    UnaryExpressionSlim,
    ConditionalExpressionSlim,
    LambdaExpressionSlim,
    InvocationExpressionSlim,
    MethodCallExpressionSlim,
    NewExpressionSlim,
    NewArrayExpressionSlim,
    IndexExpressionSlim,
    MemberExpressionSlim,
    ListInitExpressionSlim,
    MemberInitExpressionSlim,
    TypeBinaryExpressionSlim,
    BlockExpressionSlim,
    GotoExpressionSlim,
    LabelExpressionSlim,
    LoopExpressionSlim,
    SwitchExpressionSlim,
    TryExpressionSlim,
}
