//! Slim Compare - Structural Equality for Slim Expression Trees
//!
//! Nodes in `slim_ir` only know reference identity. This crate owns deep
//! equality: two trees are equal when they have the same shape, the same
//! operators, handles and constants, and the same binding structure.
//!
//! Parameters and labels are compared up to consistent renaming
//! (alpha-equivalence):
//! - a parameter declared by an enclosing lambda, block or catch matches the
//!   parameter declared at the same position on the other side, whatever
//!   its name;
//! - a free parameter matches a free parameter with the same name and type;
//! - labels match when they pair up one-to-one across the two trees.
//!
//! [`StructuralComparer::hash`] agrees with [`StructuralComparer::eq`]: equal
//! trees hash alike. [`StructuralKey`] packages both for use as a map key.

mod equal;
mod hash;
mod scope;

use std::hash::{Hash, Hasher};

use slim_ir::ExpressionSlim;

use crate::equal::Equality;
use crate::hash::Fingerprint;

/// Deep, alpha-equivalence aware comparison of slim trees.
#[derive(Copy, Clone, Debug, Default)]
pub struct StructuralComparer;

impl StructuralComparer {
    /// Whether `left` and `right` are structurally equal.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eq(&self, left: &ExpressionSlim, right: &ExpressionSlim) -> bool {
        let equal = left.address() == right.address() || Equality::default().expression(left, right);
        tracing::trace!(equal, "structural comparison");
        equal
    }

    /// Structural fingerprint of `node`, stable across runs.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn hash(&self, node: &ExpressionSlim) -> u64 {
        let mut fingerprint = Fingerprint::default();
        fingerprint.expression(node);
        fingerprint.finish()
    }
}

/// A tree compared and hashed structurally.
///
/// ```text
/// let mut compiled: FxHashMap<StructuralKey, Delegate> = FxHashMap::default();
/// compiled.entry(StructuralKey::new(tree)).or_insert_with(|| compile(&tree));
/// ```
#[derive(Clone, Debug)]
pub struct StructuralKey {
    tree: ExpressionSlim,
    hash: u64,
}

impl StructuralKey {
    /// Fingerprints `tree` once, up front.
    pub fn new(tree: ExpressionSlim) -> Self {
        let hash = StructuralComparer.hash(&tree);
        StructuralKey { tree, hash }
    }

    pub fn tree(&self) -> &ExpressionSlim {
        &self.tree
    }
}

impl PartialEq for StructuralKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && StructuralComparer.eq(&self.tree, &other.tree)
    }
}

impl Eq for StructuralKey {}

impl Hash for StructuralKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}
