//! Loader for TypeDoc JSON output.
//!
//! Reads the project reflection written by `typedoc --json` and lowers it into
//! a [`DeclTree`]. Only the parts of the format that describe declarations,
//! comments and types are read; everything else is ignored.
//!
//! ```rust,ignore
//! let tree = drivermap_tree::typedoc::load("docs/api.json")?;
//! println!("{} declarations", tree.len());
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{TreeError, TreeResult};
use crate::node::{
    Comment, CommentTag, DeclarationNode, LiteralValue, NodeFlags, NodeId, NodeKind, TypeShape,
};
use crate::tree::{DeclTree, TreeBuilder};

/// `ReflectionKind.Project`.
const KIND_PROJECT: u32 = 0x1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReflection {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    #[serde(default)]
    kind: u32,
    #[serde(default)]
    original_name: Option<String>,
    #[serde(default)]
    flags: RawFlags,
    #[serde(default)]
    comment: Option<RawComment>,
    #[serde(default)]
    children: Vec<RawReflection>,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default)]
    signatures: Vec<RawSignature>,
    #[serde(default)]
    inherited_from: Option<RawType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSignature {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    comment: Option<RawComment>,
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default)]
    inherited_from: Option<RawType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawFlags {
    is_private: bool,
    is_protected: bool,
    is_static: bool,
    is_external: bool,
    is_optional: bool,
}

/// Both the current (`summary`/`blockTags`) and the legacy
/// (`shortText`/`text`) comment layouts are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawComment {
    summary: Vec<RawCommentPart>,
    block_tags: Vec<RawBlockTag>,
    modifier_tags: Vec<String>,
    short_text: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCommentPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawBlockTag {
    tag: String,
    #[serde(default)]
    content: Vec<RawCommentPart>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum RawType {
    Literal {
        #[serde(default)]
        value: Value,
    },
    Reflection {
        declaration: Box<RawReflection>,
    },
    TypeOperator {
        operator: String,
        target: Box<RawType>,
    },
    Tuple {
        #[serde(default)]
        elements: Vec<RawType>,
    },
    Array {
        #[serde(rename = "elementType")]
        element_type: Box<RawType>,
    },
    Reference {
        name: String,
        #[serde(default, rename = "typeArguments")]
        type_arguments: Vec<RawType>,
        #[serde(default)]
        target: Option<Value>,
    },
    Intrinsic {
        name: String,
    },
    #[serde(other)]
    Unknown,
}

/// Parse TypeDoc JSON from a string.
pub fn from_json_str(json: &str) -> TreeResult<DeclTree> {
    let raw: RawReflection = serde_json::from_str(json)?;
    lower_project(raw)
}

/// Parse TypeDoc JSON from a reader.
pub fn from_reader(reader: impl Read) -> TreeResult<DeclTree> {
    let raw: RawReflection = serde_json::from_reader(reader)?;
    lower_project(raw)
}

/// Read and parse a TypeDoc JSON file.
pub fn load(path: impl AsRef<Path>) -> TreeResult<DeclTree> {
    let path = path.as_ref();
    debug!("Loading declaration tree from {:?}", path);

    if !path.exists() {
        return Err(TreeError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    from_json_str(&content)
}

fn lower_project(raw: RawReflection) -> TreeResult<DeclTree> {
    if raw.kind != KIND_PROJECT {
        return Err(TreeError::InvalidRoot {
            name: raw.name,
            kind: raw.kind,
        });
    }

    let mut lowering = Lowering {
        builder: TreeBuilder::new(raw.name.clone()),
        ids: HashMap::new(),
        pending_inherited: Vec::new(),
    };
    let root = lowering.builder.root();
    lowering.fill(root, raw);
    lowering.resolve_inherited();

    let tree = lowering.builder.build();
    debug!("Loaded {} declarations", tree.len());
    Ok(tree)
}

struct Lowering {
    builder: TreeBuilder,
    /// TypeDoc reflection id to arena id. Signature ids map to their method.
    ids: HashMap<u64, NodeId>,
    pending_inherited: Vec<(NodeId, u64)>,
}

impl Lowering {
    /// Populate an already-stored node from its raw reflection.
    fn fill(&mut self, id: NodeId, raw: RawReflection) {
        let RawReflection {
            id: raw_id,
            name,
            kind: _,
            original_name,
            flags,
            comment,
            children,
            ty,
            signatures,
            inherited_from,
        } = raw;

        if let Some(raw_id) = raw_id {
            self.ids.insert(raw_id, id);
        }

        let mut ty = ty.map(|t| self.lower_type(t));
        let mut comment = comment.map(lower_comment);
        let mut inherited = inherited_from.as_ref().and_then(reference_target);

        for (index, signature) in signatures.into_iter().enumerate() {
            if let Some(sig_id) = signature.id {
                self.ids.insert(sig_id, id);
            }
            if index > 0 {
                continue;
            }
            if ty.is_none() {
                ty = signature.ty.map(|t| self.lower_type(t));
            }
            if comment.is_none() {
                comment = signature.comment.map(lower_comment);
            }
            if inherited.is_none() {
                inherited = signature.inherited_from.as_ref().and_then(reference_target);
            }
        }

        if let Some(target) = inherited {
            self.pending_inherited.push((id, target));
        }

        for child in children {
            let child_id = self.builder.add_child(
                id,
                DeclarationNode::new(NodeKind::from_reflection_kind(child.kind), child.name.clone()),
            );
            self.fill(child_id, child);
        }

        let node = self.builder.node_mut(id);
        node.original_name = original_name.filter(|original| *original != name);
        node.flags = NodeFlags {
            is_private: flags.is_private,
            is_protected: flags.is_protected,
            is_static: flags.is_static,
            is_external: flags.is_external,
            is_optional: flags.is_optional,
        };
        node.comment = comment.filter(|c| !c.is_empty());
        node.ty = ty;
    }

    fn lower_type(&mut self, raw: RawType) -> TypeShape {
        match raw {
            RawType::Literal { value } => TypeShape::Literal(lower_literal(value)),
            RawType::Reflection { declaration } => {
                let declaration = *declaration;
                let id = self.builder.add_detached(DeclarationNode::new(
                    NodeKind::from_reflection_kind(declaration.kind),
                    declaration.name.clone(),
                ));
                self.fill(id, declaration);
                TypeShape::Reflection(id)
            }
            RawType::TypeOperator { operator, target } => TypeShape::TypeOperator {
                operator,
                target: Box::new(self.lower_type(*target)),
            },
            RawType::Tuple { elements } => {
                TypeShape::Tuple(elements.into_iter().map(|e| self.lower_type(e)).collect())
            }
            RawType::Array { element_type } => {
                TypeShape::Array(Box::new(self.lower_type(*element_type)))
            }
            RawType::Reference {
                name,
                type_arguments,
                ..
            } => TypeShape::Reference {
                name,
                type_arguments: type_arguments
                    .into_iter()
                    .map(|t| self.lower_type(t))
                    .collect(),
            },
            RawType::Intrinsic { name } => TypeShape::Intrinsic(name),
            RawType::Unknown => TypeShape::Unknown,
        }
    }

    fn resolve_inherited(&mut self) {
        for (id, target) in std::mem::take(&mut self.pending_inherited) {
            match self.ids.get(&target) {
                Some(&ancestor) if ancestor != id => {
                    self.builder.node_mut(id).inherited_from = Some(ancestor);
                }
                _ => {
                    debug!("Dropping unresolved inheritedFrom target {} on {}", target, id);
                }
            }
        }
    }
}

fn reference_target(raw: &RawType) -> Option<u64> {
    match raw {
        RawType::Reference {
            target: Some(target),
            ..
        } => target.as_u64(),
        _ => None,
    }
}

fn lower_literal(value: Value) -> LiteralValue {
    match value {
        Value::String(s) => LiteralValue::String(s),
        Value::Number(n) => LiteralValue::Number(n.as_f64().unwrap_or_default()),
        Value::Bool(b) => LiteralValue::Boolean(b),
        Value::Object(map) => {
            let digits = map.get("value").and_then(Value::as_str).unwrap_or("0");
            let negative = map.get("negative").and_then(Value::as_bool).unwrap_or(false);
            if negative {
                LiteralValue::BigInt(format!("-{digits}"))
            } else {
                LiteralValue::BigInt(digits.to_string())
            }
        }
        Value::Null | Value::Array(_) => LiteralValue::Null,
    }
}

fn join_parts(parts: &[RawCommentPart]) -> String {
    parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<String>()
        .trim()
        .to_string()
}

fn lower_comment(raw: RawComment) -> Comment {
    let summary = if raw.summary.is_empty() {
        [raw.short_text, raw.text]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        join_parts(&raw.summary)
    };

    Comment {
        summary,
        block_tags: raw
            .block_tags
            .iter()
            .map(|tag| CommentTag {
                tag: tag.tag.clone(),
                content: join_parts(&tag.content),
            })
            .collect(),
        modifier_tags: raw.modifier_tags,
    }
}
