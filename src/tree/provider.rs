//! Tree data provider for outline views.
//!
//! An outline widget only ever asks four things: how many children, which
//! child at an index, can it expand, and what text to draw. `TreeProvider`
//! answers those for any forest of `TreeNode`s. A `None` node stands for the
//! implicit root above the top-level categories.

use thiserror::Error;

use super::node::{Label, TreeNode};

/// Errors from tree queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Child index past the last child.
    #[error("child index {index} out of range (node has {count} children)")]
    IndexOutOfRange { index: usize, count: usize },

    /// Source file names a parent that is not an earlier file in the list.
    #[error("source file {file} names unknown parent {parent}")]
    UnknownParent { file: usize, parent: usize },

    /// Node paths need at least one index.
    #[error("empty node path")]
    EmptyPath,

    /// Include chain deeper than the source tree allows.
    #[error("source file {file} is nested {depth} includes deep")]
    IncludeTooDeep { file: usize, depth: usize },
}

/// Read-only forest exposed to a tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeProvider<C, L> {
    roots: Vec<TreeNode<C, L>>,
}

impl<C, L> Default for TreeProvider<C, L> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<C, L> TreeProvider<C, L> {
    /// Create a provider over the given top-level nodes.
    pub fn new(roots: Vec<TreeNode<C, L>>) -> Self {
        Self { roots }
    }

    /// Build a two-level forest: one category per entry, one leaf per item.
    ///
    /// Categories and leaves keep the iteration order of `mapping`. Pass an
    /// ordered collection when the display order matters; a `HashMap` gives
    /// an arbitrary one.
    pub fn from_mapping<M, V>(mapping: M) -> Self
    where
        M: IntoIterator<Item = (C, V)>,
        V: IntoIterator<Item = L>,
    {
        let roots = mapping
            .into_iter()
            .map(|(item, leaves)| {
                TreeNode::category(item, leaves.into_iter().map(TreeNode::leaf).collect())
            })
            .collect();
        Self { roots }
    }

    /// Top-level nodes.
    pub fn roots(&self) -> &[TreeNode<C, L>] {
        &self.roots
    }

    /// Number of top-level nodes.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Number of children of `node`, or of the root when `node` is `None`.
    pub fn child_count(&self, node: Option<&TreeNode<C, L>>) -> usize {
        self.siblings(node).len()
    }

    /// Child at `index` under `node`, or the top-level node at `index` when
    /// `node` is `None`.
    pub fn child<'a>(
        &'a self,
        node: Option<&'a TreeNode<C, L>>,
        index: usize,
    ) -> Result<&'a TreeNode<C, L>, TreeError> {
        let siblings = self.siblings(node);
        siblings.get(index).ok_or(TreeError::IndexOutOfRange {
            index,
            count: siblings.len(),
        })
    }

    pub fn is_expandable(&self, node: &TreeNode<C, L>) -> bool {
        node.is_expandable()
    }

    /// Follow a path of child indices from the root.
    pub fn resolve(&self, path: &[usize]) -> Result<&TreeNode<C, L>, TreeError> {
        let (first, rest) = path.split_first().ok_or(TreeError::EmptyPath)?;
        let mut node = self.child(None, *first)?;
        for &index in rest {
            node = self.child(Some(node), index)?;
        }
        Ok(node)
    }

    /// Depth-first walk yielding `(depth, node)`, roots at depth 0.
    pub fn walk(&self) -> Walk<'_, C, L> {
        Walk {
            stack: self.roots.iter().rev().map(|n| (0, n)).collect(),
        }
    }

    fn siblings<'a>(&'a self, node: Option<&'a TreeNode<C, L>>) -> &'a [TreeNode<C, L>] {
        match node {
            Some(node) => node.children(),
            None => &self.roots,
        }
    }
}

impl<C: Label, L: Label> TreeProvider<C, L> {
    /// Display text of `node`.
    pub fn label<'a>(&self, node: &'a TreeNode<C, L>) -> &'a str {
        node.label()
    }
}

/// Depth-first iterator over a forest.
pub struct Walk<'a, C, L> {
    stack: Vec<(usize, &'a TreeNode<C, L>)>,
}

impl<'a, C, L> Iterator for Walk<'a, C, L> {
    type Item = (usize, &'a TreeNode<C, L>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
