//! Reference identity, the change signal of the update protocol.
//!
//! `update` never asks whether a new child is *equal* to the old one, only
//! whether it is the *same* instance. That is what makes a no-op rewrite
//! pass free: identity is one pointer compare, structural equality is a
//! tree walk.

use std::sync::Arc;

/// Reference identity of shared IR values.
pub trait Identity {
    /// Whether `self` and `other` are the same instance.
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identity> Identity for Option<T> {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same(b),
            _ => false,
        }
    }
}

/// Element-wise identity of two sequences of equal length.
pub fn same_elements<T: Identity>(current: &[T], new: &[T]) -> bool {
    current.len() == new.len() && current.iter().zip(new).all(|(a, b)| a.same(b))
}
