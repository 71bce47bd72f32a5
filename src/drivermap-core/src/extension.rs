//! Commands declared by extension classes.

use drivermap_tree::{NodeId, NodeKind};
use tracing::debug;

use crate::exec_map::parse_execute_method_map;
use crate::known_methods::async_methods;
use crate::method_map::parse_method_map;
use crate::model::{CommandInfo, KnownMethods, ModuleCommands};
use crate::shape::Shapes;

/// Convert every module of the project into `commands`.
///
/// Modules are the module-kind children of the root, or the root itself
/// when it has none. Modules without any command are left out.
pub fn convert_extensions(
    shapes: &Shapes<'_>,
    known_methods: &KnownMethods,
    commands: &mut ModuleCommands,
) {
    let tree = shapes.tree();
    let root = tree.root();

    let mut modules = tree.filter_children_by_kind(root, NodeKind::Module);
    if modules.is_empty() {
        modules.push(root);
    }

    for module in modules {
        debug!("Converting module {}", tree.name(module));
        let info = convert_module_classes(shapes, module, known_methods);
        if info.has_data() {
            commands.insert_or_merge(module, info);
        }
    }
}

/// Collect routes and execute commands of every class in `module`.
///
/// Routes merge across classes at the command level; a later class wins a
/// command it shares with an earlier one.
pub fn convert_module_classes(
    shapes: &Shapes<'_>,
    module: NodeId,
    known_methods: &KnownMethods,
) -> CommandInfo {
    let tree = shapes.tree();
    let names = shapes.names();
    let mut info = CommandInfo::default();

    for class in tree.filter_children(module, |id| shapes.is_class(id)) {
        let class_name = tree.name(class);
        debug!("Converting class {}", class_name);

        let local_methods = async_methods(shapes, class);
        debug!(
            "Found {} interesting methods in class {}",
            local_methods.len(),
            class_name
        );

        match tree.find_child_by_name(class, &names.method_map, |id| shapes.is_method_map(id)) {
            Some(map) => {
                let routes = parse_method_map(shapes, map, class, &local_methods, known_methods);
                info.route_map.merge(routes);
            }
            None => debug!("No {} in {}", names.method_map, class_name),
        }

        let exec_methods = parse_execute_method_map(shapes, class, &local_methods);
        info.exec_method_data_set.extend(exec_methods);
    }

    info
}
