//! Commands of the framework's built-in driver module.

use tracing::{debug, error};

use crate::error::{ExtractError, ExtractResult};
use crate::known_methods::async_methods;
use crate::method_map::parse_method_map;
use crate::model::{CommandInfo, KnownMethods, ModuleCommands};
use crate::shape::Shapes;

/// Parse the built-in module's canonical method map.
///
/// Projects without the built-in module get an empty result. A method map
/// that is present but yields no routes is an integrity violation.
pub fn convert_builtin(shapes: &Shapes<'_>) -> ExtractResult<ModuleCommands> {
    let tree = shapes.tree();
    let names = shapes.names();
    let mut commands = ModuleCommands::new();

    let Some(module) = tree.find_at_root(&names.builtin_module, |id| {
        shapes.is_builtin_driver_module(id)
    }) else {
        debug!("Did not find {}", names.builtin_module);
        return Ok(commands);
    };
    debug!("Found {}", names.builtin_module);

    let local_methods = match tree.find_child_by_name(module, &names.builtin_driver_class, |id| {
        shapes.is_class(id)
    }) {
        Some(class) => async_methods(shapes, class),
        None => {
            error!(
                "Could not find {} in {}",
                names.builtin_driver_class, names.builtin_module
            );
            KnownMethods::new()
        }
    };

    let Some(map) = tree.find_child_by_name(module, &names.builtin_method_map, |id| {
        shapes.is_method_map(id)
    }) else {
        error!(
            "Could not find {} in {}",
            names.builtin_method_map, names.builtin_module
        );
        return Ok(commands);
    };

    // the built-in module is the canonical source, so nothing is known yet
    let routes = parse_method_map(shapes, map, module, &local_methods, &KnownMethods::new());
    if routes.is_empty() {
        return Err(ExtractError::EmptyBuiltinMethodMap {
            module: names.builtin_module.clone(),
        });
    }

    debug!(
        "Found {} routes in {} of {}",
        routes.len(),
        names.builtin_method_map,
        names.builtin_module
    );
    commands.insert_or_merge(module, CommandInfo::from_routes(routes));
    Ok(commands)
}
