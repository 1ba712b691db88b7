//! Binder bookkeeping shared by equality and hashing.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use slim_ir::{LabelTargetSlim, ParameterExpressionSlim};

fn address<T>(node: &Arc<T>) -> usize {
    Arc::as_ptr(node) as usize
}

/// Parameters in scope on one side of a comparison.
///
/// A parameter declared by an enclosing lambda, block or catch resolves to
/// its binding ordinal: the number of declarations opened before it. Binding
/// the same parameter again (shadowing) pushes a new ordinal.
#[derive(Default)]
pub(crate) struct Scope {
    bound: FxHashMap<usize, Vec<usize>>,
    depth: usize,
}

impl Scope {
    pub(crate) fn bind(&mut self, parameters: &[Arc<ParameterExpressionSlim>]) {
        for parameter in parameters {
            self.bound.entry(address(parameter)).or_default().push(self.depth);
            self.depth += 1;
        }
    }

    /// Close the declarations opened by the matching [`bind`](Self::bind).
    pub(crate) fn unbind(&mut self, parameters: &[Arc<ParameterExpressionSlim>]) {
        for parameter in parameters.iter().rev() {
            let key = address(parameter);
            if let Some(ordinals) = self.bound.get_mut(&key) {
                ordinals.pop();
                if ordinals.is_empty() {
                    self.bound.remove(&key);
                }
            }
            self.depth = self.depth.saturating_sub(1);
        }
    }

    /// Binding ordinal, or `None` for a free parameter.
    pub(crate) fn resolve(&self, parameter: &Arc<ParameterExpressionSlim>) -> Option<usize> {
        self.bound
            .get(&address(parameter))
            .and_then(|ordinals| ordinals.last().copied())
    }
}

/// Label targets numbered by first occurrence.
#[derive(Default)]
pub(crate) struct Labels {
    ordinals: FxHashMap<usize, usize>,
}

impl Labels {
    pub(crate) fn get(&self, label: &Arc<LabelTargetSlim>) -> Option<usize> {
        self.ordinals.get(&address(label)).copied()
    }

    pub(crate) fn insert(&mut self, label: &Arc<LabelTargetSlim>, ordinal: usize) {
        self.ordinals.insert(address(label), ordinal);
    }

    /// Ordinal of `label`, numbering it if this is its first occurrence.
    pub(crate) fn ordinal(&mut self, label: &Arc<LabelTargetSlim>) -> usize {
        let next = self.ordinals.len();
        *self.ordinals.entry(address(label)).or_insert(next)
    }
}
