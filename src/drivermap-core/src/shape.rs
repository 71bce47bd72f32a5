//! Structural classification of declaration nodes.
//!
//! [`Shapes::classify`] is the single place that decides what a node is for
//! extraction purposes. The boolean helpers below are views over it.

use std::str::FromStr;

use drivermap_tree::{DeclTree, DeclarationNode, NodeId, NodeKind};
use strum_macros::Display;

use crate::model::HttpMethod;
use crate::names::NameTable;

/// Every node shape the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum NodeShape {
    /// A module or the project root.
    ModuleDecl,
    /// The framework's built-in driver module.
    BuiltinDriverModule,
    /// The module declaring the extension-point interface.
    TypesModule,
    ClassDecl,
    ExtensionPointInterface,
    /// A public method returning one of the async return types.
    AsyncMethod,
    /// An object constant mapping routes to verbs.
    MethodMapConst,
    /// An object constant mapping script names to commands.
    ExecMapConst,
    /// An object whose keys are all HTTP verbs.
    RouteEntry,
    VerbEntry(HttpMethod),
    /// A `command` property holding a non-empty string literal.
    CommandProp,
    /// A parameter container object.
    ParamsProp,
    /// A `required` or `optional` list of parameter names.
    ParamNames,
    Other,
}

/// Shape classifier bound to one tree and one names table.
#[derive(Debug, Clone, Copy)]
pub struct Shapes<'t> {
    tree: &'t DeclTree,
    names: &'t NameTable,
}

impl<'t> Shapes<'t> {
    pub fn new(tree: &'t DeclTree, names: &'t NameTable) -> Self {
        Self { tree, names }
    }

    pub fn tree(&self) -> &'t DeclTree {
        self.tree
    }

    pub fn names(&self) -> &'t NameTable {
        self.names
    }

    /// Classify a node. Name-specific shapes win over structural ones.
    pub fn classify(&self, id: NodeId) -> NodeShape {
        let node = self.tree.node(id);
        match node.kind {
            NodeKind::Project | NodeKind::Module => self.classify_module(node),
            NodeKind::Class => NodeShape::ClassDecl,
            NodeKind::Interface if node.name == self.names.extension_point => {
                NodeShape::ExtensionPointInterface
            }
            NodeKind::Method if self.is_async_public(node) => NodeShape::AsyncMethod,
            kind if kind.is_value_like() => self.classify_value(id, node),
            _ => NodeShape::Other,
        }
    }

    fn classify_module(&self, node: &DeclarationNode) -> NodeShape {
        if node.name == self.names.builtin_module {
            NodeShape::BuiltinDriverModule
        } else if node.name == self.names.types_module {
            NodeShape::TypesModule
        } else {
            NodeShape::ModuleDecl
        }
    }

    fn classify_value(&self, id: NodeId, node: &DeclarationNode) -> NodeShape {
        let names = self.names;
        let name = node.name.as_str();
        let is_object = self.is_object(id, node);

        if name == names.command {
            return match literal_str(node) {
                Some(value) if !value.is_empty() => NodeShape::CommandProp,
                _ => NodeShape::Other,
            };
        }
        if names.is_params_name(name) && is_object {
            return NodeShape::ParamsProp;
        }
        if (name == names.required || name == names.optional)
            && node.ty.as_ref().is_some_and(|ty| ty.is_list())
        {
            return NodeShape::ParamNames;
        }
        if names.is_method_map_name(name) && is_object {
            return NodeShape::MethodMapConst;
        }
        if name == names.execute_method_map && is_object {
            return NodeShape::ExecMapConst;
        }
        if let Ok(method) = HttpMethod::from_str(name) {
            return if is_object {
                NodeShape::VerbEntry(method)
            } else {
                NodeShape::Other
            };
        }
        if is_object
            && self
                .tree
                .effective_children(id)
                .iter()
                .all(|&child| HttpMethod::from_str(self.tree.name(child)).is_ok())
        {
            return NodeShape::RouteEntry;
        }
        NodeShape::Other
    }

    /// Declared as an object, directly or through an anonymous type.
    fn is_object(&self, id: NodeId, node: &DeclarationNode) -> bool {
        node.reflected_declaration().is_some() || !self.tree.children(id).is_empty()
    }

    fn is_async_public(&self, node: &DeclarationNode) -> bool {
        let returns_async = node
            .ty
            .as_ref()
            .and_then(|ty| ty.reference_name())
            .is_some_and(|name| self.names.async_return_types.iter().any(|t| t == name));
        returns_async && !self.is_private(node)
    }

    fn is_private(&self, node: &DeclarationNode) -> bool {
        node.flags.is_private
            || node.comment.as_ref().is_some_and(|comment| {
                self.names
                    .private_markers
                    .iter()
                    .any(|marker| comment.has_modifier(marker))
            })
    }

    pub fn is_module(&self, id: NodeId) -> bool {
        matches!(
            self.classify(id),
            NodeShape::ModuleDecl | NodeShape::BuiltinDriverModule | NodeShape::TypesModule
        )
    }

    pub fn is_builtin_driver_module(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::BuiltinDriverModule)
    }

    pub fn is_types_module(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::TypesModule)
    }

    pub fn is_class(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::ClassDecl)
    }

    pub fn is_extension_point(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::ExtensionPointInterface)
    }

    pub fn is_async_method(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::AsyncMethod)
    }

    pub fn is_method_map(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::MethodMapConst)
    }

    pub fn is_exec_map(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::ExecMapConst)
    }

    pub fn is_route_entry(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::RouteEntry)
    }

    /// The verb of an HTTP-verb entry.
    pub fn verb(&self, id: NodeId) -> Option<HttpMethod> {
        match self.classify(id) {
            NodeShape::VerbEntry(method) => Some(method),
            _ => None,
        }
    }

    pub fn is_command_prop(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::CommandProp)
    }

    pub fn is_params_prop(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::ParamsProp)
    }

    pub fn is_param_names(&self, id: NodeId) -> bool {
        matches!(self.classify(id), NodeShape::ParamNames)
    }

    /// Any value-like node named like the command property, valid or not.
    pub fn find_command_prop(&self, parent: NodeId) -> Option<NodeId> {
        self.tree.find_child_by_name(parent, &self.names.command, |id| {
            self.tree.node(id).kind.is_value_like()
        })
    }

    /// The command name of a valid command property.
    pub fn command_name(&self, id: NodeId) -> Option<&'t str> {
        if self.is_command_prop(id) {
            literal_str(self.tree.node(id))
        } else {
            None
        }
    }
}

fn literal_str(node: &DeclarationNode) -> Option<&str> {
    node.literal().and_then(|value| value.as_str())
}
