//! Rule type for node transforms.

use std::fmt;
use std::sync::Arc;

use crate::node::Node;
use crate::service::ExportOptions;
use crate::{Content, Result};

/// Type alias for transform functions.
///
/// A transform receives the node, its already-transformed children (in
/// document order) and the export options, and returns zero or more pieces of
/// output content.
pub type TransformFn =
    Arc<dyn Fn(&Node, Vec<Content>, &ExportOptions) -> Result<Vec<Content>> + Send + Sync>;

/// A rule defines how to convert one node kind to output content
#[derive(Clone)]
pub struct Rule {
    /// Transform function that generates output content
    pub transform: TransformFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&Node, Vec<Content>, &ExportOptions) -> Result<Vec<Content>> + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
        }
    }

    /// Create a rule from a transform that always yields exactly one piece of content
    pub fn single<F>(transform: F) -> Self
    where
        F: Fn(&Node, Vec<Content>, &ExportOptions) -> Result<Content> + Send + Sync + 'static,
    {
        Self::new(move |node, children, options| {
            transform(node, children, options).map(|content| vec![content])
        })
    }

    /// Apply this rule's transform
    pub fn apply(
        &self,
        node: &Node,
        children: Vec<Content>,
        options: &ExportOptions,
    ) -> Result<Vec<Content>> {
        (self.transform)(node, children, options)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}
