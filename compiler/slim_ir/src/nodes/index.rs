use std::sync::Arc;

use super::{trace_rebuild, ExpressionSlim};
use super::release::{detach, DetachChildren};
use crate::arguments::ArgumentBuffer;
use crate::{ArgumentList, ArgumentProvider, Identity, PropertyInfoSlim};

/// Indexer access: `object[arguments]`, through an indexed property or,
/// without one, an array element.
#[derive(Debug)]
pub struct IndexExpressionSlim {
    object: ExpressionSlim,
    indexer: Option<PropertyInfoSlim>,
    arguments: ArgumentList,
}

impl IndexExpressionSlim {
    pub fn new(
        object: ExpressionSlim,
        indexer: Option<PropertyInfoSlim>,
        arguments: impl IntoIterator<Item = ExpressionSlim>,
    ) -> Arc<Self> {
        Arc::new(IndexExpressionSlim {
            object,
            indexer,
            arguments: ArgumentList::new(arguments),
        })
    }

    #[inline]
    pub fn object(&self) -> &ExpressionSlim {
        &self.object
    }

    /// Indexed property; `None` for array access.
    #[inline]
    pub fn indexer(&self) -> Option<&PropertyInfoSlim> {
        self.indexer.as_ref()
    }

    pub fn update(self: &Arc<Self>, object: ExpressionSlim, arguments: &[ExpressionSlim]) -> Arc<Self> {
        let arguments = (!self.arguments.same_as(arguments)).then(|| arguments.iter().cloned().collect());
        self.rewrite(object, arguments)
    }

    pub(crate) fn rewrite(self: &Arc<Self>, object: ExpressionSlim, arguments: Option<ArgumentBuffer>) -> Arc<Self> {
        if object.same(&self.object) && arguments.is_none() {
            return Arc::clone(self);
        }
        trace_rebuild("Index");
        Arc::new(IndexExpressionSlim {
            object,
            indexer: self.indexer.clone(),
            arguments: arguments.map_or_else(|| self.arguments.clone(), ArgumentList::from),
        })
    }
}

impl ArgumentProvider for IndexExpressionSlim {
    fn argument_list(&self) -> &ArgumentList {
        &self.arguments
    }
}

impl DetachChildren for IndexExpressionSlim {
    fn detach_children(&mut self, pending: &mut Vec<ExpressionSlim>) {
        detach(&mut self.object, pending);
        self.arguments.detach_children(pending);
    }
}
