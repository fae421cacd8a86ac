//! Tree nodes.

/// Anything a tree view can show as a line of text.
pub trait Label {
    fn label(&self) -> &str;
}

impl Label for String {
    fn label(&self) -> &str {
        self
    }
}

impl Label for &str {
    fn label(&self) -> &str {
        self
    }
}

/// A node in a labeled forest.
///
/// Categories hold children (which may themselves be categories); leaves are
/// terminal. `C` and `L` carry the payload shown for each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode<C, L> {
    /// Internal node with zero or more children.
    Category {
        item: C,
        children: Vec<TreeNode<C, L>>,
    },
    /// Terminal node.
    Leaf(L),
}

impl<C, L> TreeNode<C, L> {
    /// Create a category node.
    pub fn category(item: C, children: Vec<TreeNode<C, L>>) -> Self {
        TreeNode::Category { item, children }
    }

    /// Create a leaf node.
    pub fn leaf(item: L) -> Self {
        TreeNode::Leaf(item)
    }

    /// Children of this node. Always empty for a leaf.
    pub fn children(&self) -> &[TreeNode<C, L>] {
        match self {
            TreeNode::Category { children, .. } => children,
            TreeNode::Leaf(_) => &[],
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn is_category(&self) -> bool {
        matches!(self, TreeNode::Category { .. })
    }

    /// True for a category with at least one child.
    pub fn is_expandable(&self) -> bool {
        self.child_count() > 0
    }
}

impl<C: Label, L: Label> Label for TreeNode<C, L> {
    fn label(&self) -> &str {
        match self {
            TreeNode::Category { item, .. } => item.label(),
            TreeNode::Leaf(item) => item.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_has_no_children() {
        let leaf: TreeNode<String, &str> = TreeNode::leaf("Cat");
        assert_eq!(leaf.label(), "Cat");
        assert_eq!(leaf.child_count(), 0);
        assert!(!leaf.is_category());
        assert!(!leaf.is_expandable());
    }

    #[test]
    fn test_empty_category_is_not_expandable() {
        let empty: TreeNode<String, &str> = TreeNode::category("Reptiles".to_string(), vec![]);
        assert!(empty.is_category());
        assert!(!empty.is_expandable());
        assert_eq!(empty.label(), "Reptiles");
    }

    #[test]
    fn test_nested_categories() {
        let tree: TreeNode<&str, &str> = TreeNode::category(
            "Vertebrates",
            vec![
                TreeNode::category("Birds", vec![TreeNode::leaf("Hawk")]),
                TreeNode::leaf("Cod"),
            ],
        );
        assert_eq!(tree.child_count(), 2);
        assert!(tree.children()[0].is_expandable());
        assert_eq!(tree.children()[0].children()[0].label(), "Hawk");
    }
}
