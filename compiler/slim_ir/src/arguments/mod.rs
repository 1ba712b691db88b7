//! Fixed-arity argument storage for call-like nodes.
//!
//! This module provides [`ArgumentList`], the backing store of every
//! argument-bearing node (method calls, invocations, constructions,
//! new-array, indexers, element initializers).
//!
//! # Motivation
//!
//! Argument lists are short: zero to three arguments cover almost every call
//! in real query trees. Storing them in a separately allocated collection
//! would cost one allocation per node for no benefit. Instead:
//!
//! - arity 0 stores nothing;
//! - arity 1-5 stores the arguments in a fixed inline array;
//! - arity > 5 stores one shared `Arc<[ExpressionSlim]>` given at
//!   construction.
//!
//! # Materialization
//!
//! Positional access ([`ArgumentList::get`]) never allocates. Consumers that
//! need an owned, shareable sequence call [`ArgumentList::materialize`]. For
//! inline layouts the first call allocates the sequence and installs it in
//! a `OnceLock`; every later call returns that same `Arc`. The install is an
//! atomic compare-and-set, so racing first calls are safe: the loser's
//! allocation is dropped and both observe the winner's sequence.

use std::fmt;
use std::sync::{Arc, OnceLock};

use smallvec::SmallVec;

use crate::nodes::release::{detach, detach_all, DetachChildren};
use crate::{ExpressionSlim, SlimError};

/// Maximum arity stored inline.
pub const INLINE_ARGUMENTS: usize = 5;

/// Buffer used while collecting arguments before they are installed.
pub type ArgumentBuffer = SmallVec<[ExpressionSlim; INLINE_ARGUMENTS]>;

/// Fixed-arity slots. Each variant stores exactly its arity.
#[derive(Clone)]
enum Slots {
    Zero,
    One([ExpressionSlim; 1]),
    Two([ExpressionSlim; 2]),
    Three([ExpressionSlim; 3]),
    Four([ExpressionSlim; 4]),
    Five([ExpressionSlim; 5]),
    Many(Arc<[ExpressionSlim]>),
}

/// Which physical layout backs an argument list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArgumentLayout {
    /// No arguments, no storage.
    Empty,
    /// 1-5 arguments in fixed slots; the value is the arity.
    Inline(u8),
    /// More than [`INLINE_ARGUMENTS`] arguments in one shared sequence.
    Spilled,
}

/// Ordered, immutable argument list with lazy materialization.
#[derive(Clone)]
pub struct ArgumentList {
    slots: Slots,
    /// Materialized sequence for inline layouts. Unused for `Zero` before
    /// the first `materialize` call and never used for `Many`.
    materialized: OnceLock<Arc<[ExpressionSlim]>>,
}

impl ArgumentList {
    /// The empty argument list.
    pub fn empty() -> Self {
        Self::from_slots(Slots::Zero)
    }

    /// Build an argument list, picking the smallest layout for the arity.
    ///
    /// Only lists longer than [`INLINE_ARGUMENTS`] allocate.
    pub fn new(arguments: impl IntoIterator<Item = ExpressionSlim>) -> Self {
        let mut it = arguments.into_iter().fuse();
        let slots = match (it.next(), it.next(), it.next(), it.next(), it.next(), it.next()) {
            (None, ..) => Slots::Zero,
            (Some(a), None, ..) => Slots::One([a]),
            (Some(a), Some(b), None, ..) => Slots::Two([a, b]),
            (Some(a), Some(b), Some(c), None, ..) => Slots::Three([a, b, c]),
            (Some(a), Some(b), Some(c), Some(d), None, _) => Slots::Four([a, b, c, d]),
            (Some(a), Some(b), Some(c), Some(d), Some(e), None) => Slots::Five([a, b, c, d, e]),
            (Some(a), Some(b), Some(c), Some(d), Some(e), Some(f)) => {
                let many: Arc<[ExpressionSlim]> = [a, b, c, d, e, f].into_iter().chain(it).collect();
                Slots::Many(many)
            }
        };
        Self::from_slots(slots)
    }

    /// Build a spilled list around an existing shared sequence.
    ///
    /// Short sequences are still stored inline.
    pub fn from_shared(arguments: Arc<[ExpressionSlim]>) -> Self {
        if arguments.len() <= INLINE_ARGUMENTS {
            return Self::new(arguments.iter().cloned());
        }
        Self::from_slots(Slots::Many(arguments))
    }

    fn from_slots(slots: Slots) -> Self {
        ArgumentList {
            slots,
            materialized: OnceLock::new(),
        }
    }

    /// Borrow the arguments as a slice. Never allocates.
    #[inline]
    pub fn as_slice(&self) -> &[ExpressionSlim] {
        match &self.slots {
            Slots::Zero => &[],
            Slots::One(slots) => slots,
            Slots::Two(slots) => slots,
            Slots::Three(slots) => slots,
            Slots::Four(slots) => slots,
            Slots::Five(slots) => slots,
            Slots::Many(many) => many,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.slots, Slots::Zero)
    }

    /// Positional access, bounds-checked.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&ExpressionSlim, SlimError> {
        let slice = self.as_slice();
        slice.get(index).ok_or(SlimError::ArgumentOutOfRange {
            index,
            count: slice.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpressionSlim> {
        self.as_slice().iter()
    }

    /// The materialized ordered sequence.
    ///
    /// Repeated calls return the same `Arc`.
    pub fn materialize(&self) -> &Arc<[ExpressionSlim]> {
        if let Slots::Many(many) = &self.slots {
            return many;
        }
        self.materialized.get_or_init(|| {
            tracing::trace!(arity = self.len(), "materializing inline argument list");
            Arc::from(self.as_slice())
        })
    }

    /// Whether the inline layout has already been materialized.
    ///
    /// Spilled lists are always materialized.
    pub fn is_materialized(&self) -> bool {
        matches!(self.slots, Slots::Many(_)) || self.materialized.get().is_some()
    }

    pub fn layout(&self) -> ArgumentLayout {
        match &self.slots {
            Slots::Zero => ArgumentLayout::Empty,
            Slots::Many(_) => ArgumentLayout::Spilled,
            _ => ArgumentLayout::Inline(u8::try_from(self.len()).unwrap_or(u8::MAX)),
        }
    }

    /// Whether `arguments` are the same instances, in order, as this list.
    pub fn same_as(&self, arguments: &[ExpressionSlim]) -> bool {
        crate::same_elements(self.as_slice(), arguments)
    }
}

impl DetachChildren for ArgumentList {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        // The materialized copy shares the inline arguments; whichever
        // reference is released last opens the child up.
        if let Some(mut materialized) = self.materialized.take() {
            detach_all(&mut materialized, pending);
        }
        let slots: &mut [ExpressionSlim] = match &mut self.slots {
            Slots::Zero => return,
            Slots::One(slots) => slots,
            Slots::Two(slots) => slots,
            Slots::Three(slots) => slots,
            Slots::Four(slots) => slots,
            Slots::Five(slots) => slots,
            Slots::Many(many) => {
                detach_all(many, pending);
                return;
            }
        };
        for slot in slots {
            detach(slot, pending);
        }
    }
}

impl Default for ArgumentList {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<ArgumentBuffer> for ArgumentList {
    fn from(buffer: ArgumentBuffer) -> Self {
        Self::new(buffer)
    }
}

impl<'a> IntoIterator for &'a ArgumentList {
    type Item = &'a ExpressionSlim;
    type IntoIter = std::slice::Iter<'a, ExpressionSlim>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Uniform access to the arguments of an argument-bearing node.
///
/// Invariant: `argument_count() == arguments().len()`, before and after
/// materialization.
pub trait ArgumentProvider {
    /// The backing list.
    fn argument_list(&self) -> &ArgumentList;

    fn argument_count(&self) -> usize {
        self.argument_list().len()
    }

    /// Positional access; out-of-range indices are an error.
    fn argument(&self, index: usize) -> Result<&ExpressionSlim, SlimError> {
        self.argument_list().get(index)
    }

    /// Materialized ordered view; the same `Arc` on every call.
    fn arguments(&self) -> &Arc<[ExpressionSlim]> {
        self.argument_list().materialize()
    }
}
