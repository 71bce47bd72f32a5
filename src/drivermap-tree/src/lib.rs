//! Declaration tree for drivermap.
//!
//! This crate holds the read-only input of command extraction: a tree of
//! parsed source declarations (modules, classes, methods, properties, ...).
//!
//! - [`DeclTree`] is an arena of [`DeclarationNode`]s addressed by [`NodeId`].
//! - Object-literal constants declared through an anonymous type expose their
//!   members through [`DeclTree::effective_children`], resolved once per node.
//! - The query helpers ([`DeclTree::find_child`], [`DeclTree::filter_children`],
//!   ...) all read through that view.
//! - [`TreeBuilder`] builds trees programmatically; [`typedoc`] loads them from
//!   `typedoc --json` output.
//!
//! # Example
//!
//! ```rust,ignore
//! use drivermap_tree::{DeclarationNode, NodeKind, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new("my-driver");
//! let class = builder.add_child(builder.root(), DeclarationNode::new(NodeKind::Class, "MyDriver"));
//! let tree = builder.build();
//! assert_eq!(tree.effective_children(tree.root()), &[class]);
//! ```

mod error;
mod node;
mod query;
mod tree;
pub mod typedoc;

pub use error::{TreeError, TreeResult};
pub use node::{
    Comment, CommentTag, DeclarationNode, LiteralValue, NodeFlags, NodeId, NodeKind, TypeShape,
};
pub use tree::{DeclTree, TreeBuilder};
