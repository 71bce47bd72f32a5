//! Known-methods resolution.
//!
//! The extension-point interface of the types module declares every method a
//! driver may implement. Its async methods, keyed by name, back-fill comments
//! for commands that a driver inherits instead of overriding.

use drivermap_tree::NodeId;
use tracing::{debug, warn};

use crate::model::KnownMethods;
use crate::shape::Shapes;

/// Resolve the project-wide known methods.
///
/// A missing module, a missing interface, or an interface without async
/// methods all yield an empty mapping.
pub fn resolve_known_methods(shapes: &Shapes<'_>) -> KnownMethods {
    let tree = shapes.tree();
    let names = shapes.names();

    let Some(module) = tree.find_at_root(&names.types_module, |id| shapes.is_types_module(id)) else {
        debug!("Module {} not found; no known methods", names.types_module);
        return KnownMethods::new();
    };

    let Some(interface) =
        tree.find_child_by_name(module, &names.extension_point, |id| shapes.is_extension_point(id))
    else {
        warn!(
            "Could not find {} in {}",
            names.extension_point, names.types_module
        );
        return KnownMethods::new();
    };

    let methods = async_methods(shapes, interface);
    if methods.is_empty() {
        warn!("No methods found in {}", names.extension_point);
    } else {
        debug!(
            "Found {} method declarations in {}",
            methods.len(),
            names.extension_point
        );
    }
    methods
}

/// Async methods declared directly on `parent`, keyed by name.
///
/// Overloads share a name; the first declaration is kept.
pub fn async_methods(shapes: &Shapes<'_>, parent: NodeId) -> KnownMethods {
    let tree = shapes.tree();
    let mut methods = KnownMethods::new();
    for id in tree.filter_children(parent, |id| shapes.is_async_method(id)) {
        methods.entry(tree.name(id).to_string()).or_insert(id);
    }
    methods
}
