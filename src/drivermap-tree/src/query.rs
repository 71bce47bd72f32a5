//! Child lookups over the effective-children view.
//!
//! Every query here goes through [`DeclTree::effective_children`], so callers
//! never need to know whether an object was declared directly or through an
//! anonymous type.

use crate::node::{NodeId, NodeKind};
use crate::tree::DeclTree;

impl DeclTree {
    /// First child accepted by `pred`.
    pub fn find_child(&self, parent: NodeId, mut pred: impl FnMut(NodeId) -> bool) -> Option<NodeId> {
        self.effective_children(parent)
            .iter()
            .copied()
            .find(|&child| pred(child))
    }

    /// First child named `name` and accepted by `pred`.
    pub fn find_child_by_name(
        &self,
        parent: NodeId,
        name: &str,
        mut pred: impl FnMut(NodeId) -> bool,
    ) -> Option<NodeId> {
        self.find_child(parent, |child| self.name(child) == name && pred(child))
    }

    /// All children accepted by `pred`, in document order.
    pub fn filter_children(&self, parent: NodeId, mut pred: impl FnMut(NodeId) -> bool) -> Vec<NodeId> {
        self.effective_children(parent)
            .iter()
            .copied()
            .filter(|&child| pred(child))
            .collect()
    }

    /// All children of the given kind, in document order.
    pub fn filter_children_by_kind(&self, parent: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.filter_children(parent, |child| self.node(child).kind == kind)
    }

    /// The root itself if it is named `name`, otherwise the first direct
    /// child of the root named `name` and accepted by `pred`.
    pub fn find_at_root(&self, name: &str, mut pred: impl FnMut(NodeId) -> bool) -> Option<NodeId> {
        let root = self.root();
        if self.name(root) == name && pred(root) {
            return Some(root);
        }
        self.find_child_by_name(root, name, pred)
    }
}
