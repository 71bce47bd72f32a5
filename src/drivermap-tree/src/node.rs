//! Declaration node types.

use std::fmt;

use serde::Serialize;

/// Handle to a node stored in a [`DeclTree`](crate::DeclTree).
///
/// Ids are only minted by the tree that owns the node, so two equal ids
/// always refer to the same node instance of the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Syntactic kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Project,
    Module,
    Namespace,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    Accessor,
    TypeLiteral,
    TypeAlias,
    Other,
}

impl NodeKind {
    /// Maps a TypeDoc `ReflectionKind` bit value onto a node kind.
    pub fn from_reflection_kind(kind: u32) -> Self {
        match kind {
            0x1 => Self::Project,
            0x2 => Self::Module,
            0x4 => Self::Namespace,
            0x20 => Self::Variable,
            0x40 => Self::Function,
            0x80 => Self::Class,
            0x100 => Self::Interface,
            0x200 => Self::Constructor,
            0x400 => Self::Property,
            0x800 => Self::Method,
            0x10000 => Self::TypeLiteral,
            0x40000 => Self::Accessor,
            0x400000 => Self::TypeAlias,
            _ => Self::Other,
        }
    }

    /// Whether nodes of this kind carry a value (variables, properties, accessors).
    pub fn is_value_like(self) -> bool {
        matches!(self, Self::Variable | Self::Property | Self::Accessor)
    }
}

/// Flags attached to a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeFlags {
    pub is_private: bool,
    pub is_protected: bool,
    pub is_static: bool,
    pub is_external: bool,
    pub is_optional: bool,
}

/// A block tag inside a documentation comment, e.g. `@param`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentTag {
    pub tag: String,
    pub content: String,
}

/// Documentation comment attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Summary text, parts joined.
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub block_tags: Vec<CommentTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifier_tags: Vec<String>,
}

impl Comment {
    /// Create a comment with only a summary.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Add a block tag.
    pub fn with_block_tag(mut self, tag: impl Into<String>, content: impl Into<String>) -> Self {
        self.block_tags.push(CommentTag {
            tag: tag.into(),
            content: content.into(),
        });
        self
    }

    /// Add a modifier tag such as `@internal`.
    pub fn with_modifier(mut self, tag: impl Into<String>) -> Self {
        self.modifier_tags.push(tag.into());
        self
    }

    /// Whether the comment carries the given modifier tag.
    pub fn has_modifier(&self, tag: &str) -> bool {
        self.modifier_tags.iter().any(|t| t == tag)
    }

    /// A comment with no summary and no tags says nothing.
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.block_tags.is_empty() && self.modifier_tags.is_empty()
    }
}

/// Value of a literal type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    /// Big integers keep their decimal text.
    BigInt(String),
}

impl LiteralValue {
    /// The string payload, if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::BigInt(n) => f.write_str(n),
        }
    }
}

/// Type payload of a declaration.
///
/// For value-like nodes this is the declared type (a literal for `as const`
/// scalars, a reflection for object literals); for methods it is the return
/// type of the first signature.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Literal(LiteralValue),
    /// An anonymous object type whose members live on another node.
    Reflection(NodeId),
    TypeOperator {
        operator: String,
        target: Box<TypeShape>,
    },
    Tuple(Vec<TypeShape>),
    Array(Box<TypeShape>),
    Reference {
        name: String,
        type_arguments: Vec<TypeShape>,
    },
    Intrinsic(String),
    Unknown,
}

impl TypeShape {
    /// Strips type operators (`readonly`, `keyof`, ...) down to the operand.
    pub fn peel_operators(&self) -> &TypeShape {
        let mut shape = self;
        while let TypeShape::TypeOperator { target, .. } = shape {
            shape = target;
        }
        shape
    }

    /// Elements of a tuple type, looking through type operators.
    pub fn tuple_elements(&self) -> Option<&[TypeShape]> {
        match self.peel_operators() {
            TypeShape::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Whether this is a tuple or array, looking through type operators.
    pub fn is_list(&self) -> bool {
        matches!(
            self.peel_operators(),
            TypeShape::Tuple(_) | TypeShape::Array(_)
        )
    }

    /// Name of a referenced type, looking through type operators.
    pub fn reference_name(&self) -> Option<&str> {
        match self.peel_operators() {
            TypeShape::Reference { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// One declaration in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationNode {
    pub kind: NodeKind,
    /// Identifier name.
    pub name: String,
    /// Name as written in source, when it differs from the identifier
    /// (quoted keys such as route paths).
    pub original_name: Option<String>,
    pub children: Vec<NodeId>,
    pub ty: Option<TypeShape>,
    /// Declaration this one is inherited from.
    pub inherited_from: Option<NodeId>,
    pub comment: Option<Comment>,
    pub flags: NodeFlags,
}

impl DeclarationNode {
    /// Create a childless node.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            original_name: None,
            children: Vec::new(),
            ty: None,
            inherited_from: None,
            comment: None,
            flags: NodeFlags::default(),
        }
    }

    pub fn with_original_name(mut self, original_name: impl Into<String>) -> Self {
        self.original_name = Some(original_name.into());
        self
    }

    pub fn with_type(mut self, ty: TypeShape) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_literal(self, value: LiteralValue) -> Self {
        self.with_type(TypeShape::Literal(value))
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn inherited_from(mut self, ancestor: NodeId) -> Self {
        self.inherited_from = Some(ancestor);
        self
    }

    /// The source-level name, falling back to the identifier.
    pub fn original_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or(&self.name)
    }

    /// The literal payload, if the node's type is a literal.
    pub fn literal(&self) -> Option<&LiteralValue> {
        match &self.ty {
            Some(TypeShape::Literal(value)) => Some(value),
            _ => None,
        }
    }

    /// The declaration holding this node's members, if it is typed as an
    /// anonymous object.
    pub fn reflected_declaration(&self) -> Option<NodeId> {
        match &self.ty {
            Some(TypeShape::Reflection(id)) => Some(*id),
            _ => None,
        }
    }
}
