//! Execute-method map parsing.

use drivermap_tree::NodeId;
use tracing::{debug, warn};

use crate::model::{ExecMethodDataSet, ExecuteCommand, KnownMethods};
use crate::params::command_params;
use crate::shape::Shapes;

/// Parse the execute-method map of `class`, if it has one.
///
/// Unlike route entries, an entry without a command property is malformed
/// and skipped with a warning. Each command keeps the entry's own comment.
pub fn parse_execute_method_map(
    shapes: &Shapes<'_>,
    class: NodeId,
    local_methods: &KnownMethods,
) -> ExecMethodDataSet {
    let tree = shapes.tree();
    let names = shapes.names();
    let class_name = tree.name(class);
    let mut commands = ExecMethodDataSet::new();

    let Some(map) = tree.find_child(class, |id| shapes.is_exec_map(id)) else {
        return commands;
    };

    for entry in tree.filter_children(map, |id| tree.node(id).kind.is_value_like()) {
        let node = tree.node(entry);
        let script = node.original_name();

        if script.is_empty() {
            warn!("Execute method map in {} has an entry without a name", class_name);
            continue;
        }

        let Some(command_prop) = shapes.find_command_prop(entry) else {
            warn!(
                "Execute method map in {} has no \"{}\" property for {}",
                class_name, names.command, script
            );
            continue;
        };
        let Some(command) = shapes.command_name(command_prop) else {
            warn!(
                "Execute method map in {} has an empty or invalid \"{}\" property for {}",
                class_name, names.command, script
            );
            continue;
        };

        if !local_methods.contains_key(command) {
            debug!(
                "Execute method {} in {} refers to {}, which {} does not implement",
                script, class_name, command, class_name
            );
        }

        let params = command_params(shapes, entry);
        let inserted = commands.insert(ExecuteCommand {
            command: command.to_string(),
            script: script.to_string(),
            required_params: params.required,
            optional_params: params.optional,
            comment: node.comment.clone(),
        });
        if !inserted {
            debug!("Duplicate execute method {} -> {} in {}", script, command, class_name);
        }
    }

    commands
}
