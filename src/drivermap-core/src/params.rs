//! Parameter names of map entries.

use drivermap_tree::{NodeId, TypeShape};

use crate::shape::Shapes;

/// Required and optional parameter names of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandParams {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

/// Read the parameter container of a verb or execute-map entry.
///
/// A missing container or a missing list yields empty lists.
pub fn command_params(shapes: &Shapes<'_>, entry: NodeId) -> CommandParams {
    let Some(params) = shapes.tree().find_child(entry, |id| shapes.is_params_prop(id)) else {
        return CommandParams::default();
    };
    let names = shapes.names();
    CommandParams {
        required: param_names(shapes, params, &names.required),
        optional: param_names(shapes, params, &names.optional),
    }
}

/// Literal elements of the named list, stringified. Empty strings and
/// non-literal elements are dropped.
fn param_names(shapes: &Shapes<'_>, params: NodeId, list_name: &str) -> Vec<String> {
    let tree = shapes.tree();
    let Some(list) = tree.find_child_by_name(params, list_name, |id| shapes.is_param_names(id)) else {
        return Vec::new();
    };
    tree.node(list)
        .ty
        .as_ref()
        .and_then(TypeShape::tuple_elements)
        .unwrap_or_default()
        .iter()
        .filter_map(|element| match element {
            TypeShape::Literal(value) => Some(value.to_string()),
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .collect()
}
