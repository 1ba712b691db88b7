//! Visitor Protocol
//!
//! Three traversal shapes over slim trees:
//!
//! - [`SlimVisitor`]: same-type rewriter. Every hook returns a slim node;
//!   the default `walk_*` functions visit children and rebuild through
//!   `update`, so an unchanged subtree comes back as the same `Arc`.
//! - [`SlimTransformer`]: cross-type transformer. Results have associated
//!   types (`Expression`, `Lambda`, `Parameter`, ...) and `make_*` hooks
//!   build them from already-transformed children. This is the shape a
//!   converter into another tree model implements.
//! - [`ExpressionOnlyTransformer`]: a [`SlimTransformer`] without the
//!   statement kinds (block, goto, label, loop, switch, try). Meeting one
//!   is an [`Unsupported`](crate::SlimError::Unsupported) error.
//!
//! # Traversal order
//!
//! Both shapes visit children in the same order:
//!
//! | Node | Order |
//! |---|---|
//! | binary | left, right, conversion |
//! | conditional | test, if-true, if-false |
//! | lambda | body, parameters |
//! | invocation | expression, arguments |
//! | method call / index | object, arguments |
//! | list / member init | new expression, initializers / bindings |
//! | block | variables, expressions |
//! | goto | target, value |
//! | label | target, default value |
//! | loop | body, break label, continue label |
//! | switch | switch value, cases, default body |
//! | try | body, handlers, finally, fault |
//! | catch block | variable, body, filter |
//! | switch case | test values, body |
//!
//! Every traversal step goes through `slim_stack::ensure_sufficient_stack`,
//! so deeply nested trees do not overflow the native stack.

use smallvec::SmallVec;

use crate::{Identity, INLINE_ARGUMENTS};

mod restricted;
pub mod rewrite;
pub mod transform;

pub use restricted::{ExpressionOnlyTransformer, Unsupported};
pub use rewrite::SlimVisitor;
pub use transform::SlimTransformer;

/// Visit every element; `None` if every result is the same instance as its
/// input.
///
/// Nothing is buffered until the first changed element.
pub(crate) fn visit_each<T, E>(
    items: &[T],
    mut visit: impl FnMut(&T) -> Result<T, E>,
) -> Result<Option<SmallVec<[T; INLINE_ARGUMENTS]>>, E>
where
    T: Identity + Clone,
{
    let mut changed: Option<SmallVec<[T; INLINE_ARGUMENTS]>> = None;
    for (index, item) in items.iter().enumerate() {
        let visited = visit(item)?;
        match &mut changed {
            Some(buffer) => buffer.push(visited),
            None if !visited.same(item) => {
                let mut buffer = SmallVec::with_capacity(items.len());
                buffer.extend(items[..index].iter().cloned());
                buffer.push(visited);
                changed = Some(buffer);
            }
            None => {}
        }
    }
    Ok(changed)
}
