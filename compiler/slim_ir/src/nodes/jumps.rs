//! Labels and the nodes that jump to them.

use std::fmt;
use std::sync::Arc;

use super::{same_optional, trace_rebuild, ExpressionSlim};
use super::release::{detach, detach_optional, DetachChildren};
use crate::{Identity, TypeSlim};

/// Jump destination. Compared by identity: the name is diagnostic only.
#[derive(Debug)]
pub struct LabelTargetSlim {
    ty: Option<TypeSlim>,
    name: Option<Arc<str>>,
}

impl LabelTargetSlim {
    /// `ty` is the type of the value carried by jumps to this label;
    /// `None` for a void label.
    pub fn new(ty: Option<TypeSlim>, name: Option<Arc<str>>) -> Arc<Self> {
        Arc::new(LabelTargetSlim { ty, name })
    }

    pub fn named(name: impl Into<Arc<str>>) -> Arc<Self> {
        Self::new(None, Some(name.into()))
    }

    #[inline]
    pub fn ty(&self) -> Option<&TypeSlim> {
        self.ty.as_ref()
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Flavor of a [`GotoExpressionSlim`]. Affects printing only.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum GotoKind {
    Goto,
    Return,
    Break,
    Continue,
}

impl fmt::Display for GotoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GotoKind::Goto => "goto",
            GotoKind::Return => "return",
            GotoKind::Break => "break",
            GotoKind::Continue => "continue",
        })
    }
}

/// Unconditional jump to a label, optionally carrying a value.
#[derive(Debug)]
pub struct GotoExpressionSlim {
    kind: GotoKind,
    target: Arc<LabelTargetSlim>,
    value: Option<ExpressionSlim>,
    ty: Option<TypeSlim>,
}

impl GotoExpressionSlim {
    pub fn new(
        kind: GotoKind,
        target: Arc<LabelTargetSlim>,
        value: Option<ExpressionSlim>,
        ty: Option<TypeSlim>,
    ) -> Arc<Self> {
        Arc::new(GotoExpressionSlim {
            kind,
            target,
            value,
            ty,
        })
    }

    #[inline]
    pub fn kind(&self) -> GotoKind {
        self.kind
    }

    #[inline]
    pub fn target(&self) -> &Arc<LabelTargetSlim> {
        &self.target
    }

    #[inline]
    pub fn value(&self) -> Option<&ExpressionSlim> {
        self.value.as_ref()
    }

    /// Type of the goto expression itself.
    #[inline]
    pub fn ty(&self) -> Option<&TypeSlim> {
        self.ty.as_ref()
    }

    pub fn update(self: &Arc<Self>, target: Arc<LabelTargetSlim>, value: Option<ExpressionSlim>) -> Arc<Self> {
        if target.same(&self.target) && same_optional(value.as_ref(), self.value.as_ref()) {
            return Arc::clone(self);
        }
        trace_rebuild("Goto");
        Self::new(self.kind, target, value, self.ty.clone())
    }
}

/// Placement of a label, with the value produced when control falls
/// through instead of jumping.
#[derive(Debug)]
pub struct LabelExpressionSlim {
    target: Arc<LabelTargetSlim>,
    default_value: Option<ExpressionSlim>,
}

impl LabelExpressionSlim {
    pub fn new(target: Arc<LabelTargetSlim>, default_value: Option<ExpressionSlim>) -> Arc<Self> {
        Arc::new(LabelExpressionSlim { target, default_value })
    }

    #[inline]
    pub fn target(&self) -> &Arc<LabelTargetSlim> {
        &self.target
    }

    #[inline]
    pub fn default_value(&self) -> Option<&ExpressionSlim> {
        self.default_value.as_ref()
    }

    pub fn update(self: &Arc<Self>, target: Arc<LabelTargetSlim>, default_value: Option<ExpressionSlim>) -> Arc<Self> {
        if target.same(&self.target) && same_optional(default_value.as_ref(), self.default_value.as_ref()) {
            return Arc::clone(self);
        }
        trace_rebuild("Label");
        Self::new(target, default_value)
    }
}

/// Infinite loop, left through its break label.
#[derive(Debug)]
pub struct LoopExpressionSlim {
    body: ExpressionSlim,
    break_label: Option<Arc<LabelTargetSlim>>,
    continue_label: Option<Arc<LabelTargetSlim>>,
}

impl LoopExpressionSlim {
    pub fn new(
        body: ExpressionSlim,
        break_label: Option<Arc<LabelTargetSlim>>,
        continue_label: Option<Arc<LabelTargetSlim>>,
    ) -> Arc<Self> {
        Arc::new(LoopExpressionSlim {
            body,
            break_label,
            continue_label,
        })
    }

    #[inline]
    pub fn body(&self) -> &ExpressionSlim {
        &self.body
    }

    #[inline]
    pub fn break_label(&self) -> Option<&Arc<LabelTargetSlim>> {
        self.break_label.as_ref()
    }

    #[inline]
    pub fn continue_label(&self) -> Option<&Arc<LabelTargetSlim>> {
        self.continue_label.as_ref()
    }

    /// The loop's value type: the break label's type.
    pub fn static_type(&self) -> Option<TypeSlim> {
        self.break_label.as_ref().and_then(|label| label.ty().cloned())
    }

    pub fn update(
        self: &Arc<Self>,
        break_label: Option<Arc<LabelTargetSlim>>,
        continue_label: Option<Arc<LabelTargetSlim>>,
        body: ExpressionSlim,
    ) -> Arc<Self> {
        if body.same(&self.body)
            && same_optional(break_label.as_ref(), self.break_label.as_ref())
            && same_optional(continue_label.as_ref(), self.continue_label.as_ref())
        {
            return Arc::clone(self);
        }
        trace_rebuild("Loop");
        Self::new(body, break_label, continue_label)
    }
}

impl DetachChildren for GotoExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_optional(&mut self.value, pending);
    }
}

impl DetachChildren for LabelExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach_optional(&mut self.default_value, pending);
    }
}

impl DetachChildren for LoopExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.body, pending);
    }
}
