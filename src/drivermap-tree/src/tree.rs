//! Arena-backed declaration tree.
//!
//! Nodes are stored in a `Vec` and addressed by [`NodeId`]. Object-literal
//! constants are often declared through an anonymous type: the constant has
//! no children of its own and its members hang off a separate type-literal
//! declaration. The tree resolves that indirection once per node, on first
//! visit, so queries see one uniform "effective children" view.

use std::cell::OnceCell;

use crate::node::{DeclarationNode, NodeId, NodeKind, TypeShape};

/// Limit on chained reflection hops when resolving effective children.
const MAX_REFLECTION_DEPTH: usize = 8;

/// An immutable declaration tree.
#[derive(Debug)]
pub struct DeclTree {
    nodes: Vec<DeclarationNode>,
    root: NodeId,
    /// Memoized owner of each node's effective children.
    effective: Vec<OnceCell<NodeId>>,
}

impl DeclTree {
    fn from_parts(nodes: Vec<DeclarationNode>, root: NodeId) -> Self {
        let effective = std::iter::repeat_with(OnceCell::new)
            .take(nodes.len())
            .collect();
        Self {
            nodes,
            root,
            effective,
        }
    }

    /// The project node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not minted by this tree.
    pub fn node(&self, id: NodeId) -> &DeclarationNode {
        &self.nodes[id.index()]
    }

    /// Borrow a node, if the id belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<&DeclarationNode> {
        self.nodes.get(id.index())
    }

    /// Identifier name of a node.
    pub fn name(&self, id: NodeId) -> &str {
        &self.node(id).name
    }

    /// Number of nodes, detached type declarations included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children, as declared.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The node whose children stand in for `id`'s children.
    ///
    /// For a node typed as an anonymous object this is the type-literal
    /// declaration; otherwise it is the node itself.
    pub fn effective_owner(&self, id: NodeId) -> NodeId {
        *self.effective[id.index()].get_or_init(|| self.resolve_owner(id))
    }

    /// Children after looking through an anonymous object type.
    pub fn effective_children(&self, id: NodeId) -> &[NodeId] {
        self.children(self.effective_owner(id))
    }

    fn resolve_owner(&self, id: NodeId) -> NodeId {
        let mut current = id;
        for _ in 0..MAX_REFLECTION_DEPTH {
            match self.get(current).and_then(DeclarationNode::reflected_declaration) {
                Some(next) if next != current && self.get(next).is_some() => current = next,
                _ => break,
            }
        }
        current
    }

    /// Iterate over every node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DeclarationNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from_index(index), node))
    }
}

/// Incremental builder for a [`DeclTree`].
///
/// ```rust,ignore
/// let mut builder = TreeBuilder::new("my-driver");
/// let class = builder.add_child(builder.root(), DeclarationNode::new(NodeKind::Class, "FakeDriver"));
/// let (_, body) = builder.add_object(class, DeclarationNode::new(NodeKind::Property, "newMethodMap"));
/// let tree = builder.build();
/// ```
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    nodes: Vec<DeclarationNode>,
    root: NodeId,
}

impl TreeBuilder {
    /// Start a tree with a project root of the given name.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self::with_root(DeclarationNode::new(NodeKind::Project, project_name))
    }

    /// Start a tree with an arbitrary root node.
    pub fn with_root(root: DeclarationNode) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId::from_index(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Store a node without attaching it to a parent.
    pub fn add_detached(&mut self, node: DeclarationNode) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Store a node and append it to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, node: DeclarationNode) -> NodeId {
        let id = self.add_detached(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Append `node` to `parent`, typed as an anonymous object.
    ///
    /// Returns `(node, body)`; members of the object go under `body`.
    pub fn add_object(&mut self, parent: NodeId, node: DeclarationNode) -> (NodeId, NodeId) {
        let body = self.add_detached(DeclarationNode::new(NodeKind::TypeLiteral, "__type"));
        let id = self.add_child(parent, node.with_type(TypeShape::Reflection(body)));
        (id, body)
    }

    /// Mutable access to a node that was already added.
    pub fn node_mut(&mut self, id: NodeId) -> &mut DeclarationNode {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Freeze the tree.
    pub fn build(self) -> DeclTree {
        DeclTree::from_parts(self.nodes, self.root)
    }
}
