//! Tests for the extension converter and the merged result.

use drivermap_tree::{Comment, TreeBuilder};
use pretty_assertions::assert_eq;

use super::fixtures::*;
use crate::extension::{convert_extensions, convert_module_classes};
use crate::model::{Command, CommandInfo, HttpMethod, KnownMethods, ModuleCommands, RouteMap};
use crate::names::NameTable;
use crate::shape::Shapes;

#[test]
fn test_two_classes_share_a_route() {
    let mut builder = TreeBuilder::new("project");
    let module = add_module(&mut builder, "driver");

    let first = add_class(&mut builder, module, "FirstDriver");
    let (_, body) = add_map(&mut builder, first, "newMethodMap");
    let route = add_route(&mut builder, body, "/status");
    add_verb(&mut builder, route, "GET", Some("getStatus"));
    let (verb, _) = add_verb(&mut builder, route, "POST", Some("shared"));
    builder.node_mut(verb).comment = Some(Comment::new("first"));

    let second = add_class(&mut builder, module, "SecondDriver");
    let (_, body) = add_map(&mut builder, second, "newMethodMap");
    let route = add_route(&mut builder, body, "/status");
    add_verb(&mut builder, route, "DELETE", Some("clearStatus"));
    let (verb, _) = add_verb(&mut builder, route, "GET", Some("shared"));
    builder.node_mut(verb).comment = Some(Comment::new("second"));

    let tree = builder.build();
    let names = NameTable::default();
    let info = convert_module_classes(&Shapes::new(&tree, &names), module, &KnownMethods::new());

    let commands = info.route_map.get("/status").unwrap();
    let command_names: Vec<_> = commands.keys().cloned().collect();
    assert_eq!(command_names, vec!["getStatus", "shared", "clearStatus"]);

    let shared = &commands["shared"];
    assert_eq!(shared.http_method, HttpMethod::Get);
    assert_eq!(summary(&shared.comment), Some("second"));
}

#[test]
fn test_exec_methods_union_across_classes() {
    let mut builder = TreeBuilder::new("project");
    let module = add_module(&mut builder, "driver");
    for (class_name, script) in [("A", "mobile: a"), ("B", "mobile: b"), ("C", "mobile: a")] {
        let class = add_class(&mut builder, module, class_name);
        let (_, body) = add_map(&mut builder, class, "executeMethodMap");
        add_exec_entry(&mut builder, body, script, Some("run"));
    }
    let tree = builder.build();
    let names = NameTable::default();

    let info = convert_module_classes(&Shapes::new(&tree, &names), module, &KnownMethods::new());

    assert!(info.route_map.is_empty());
    let scripts: Vec<_> = info
        .exec_method_data_set
        .iter()
        .map(|c| c.script.as_str())
        .collect();
    assert_eq!(scripts, vec!["mobile: a", "mobile: b"]);
}

#[test]
fn test_modules_without_data_are_left_out() {
    let mut builder = TreeBuilder::new("project");
    let empty = add_module(&mut builder, "utils");
    let class = add_class(&mut builder, empty, "Helper");
    add_method(&mut builder, class, "doThings");

    let driver = add_module(&mut builder, "driver");
    let class = add_class(&mut builder, driver, "Driver");
    let (_, body) = add_map(&mut builder, class, "executeMethodMap");
    add_exec_entry(&mut builder, body, "mobile: tap", Some("tap"));

    let tree = builder.build();
    let names = NameTable::default();
    let mut commands = ModuleCommands::new();
    convert_extensions(&Shapes::new(&tree, &names), &KnownMethods::new(), &mut commands);

    assert_eq!(commands.modules().collect::<Vec<_>>(), vec![driver]);
    assert!(!commands.contains(empty));
    assert!(commands.get(driver).unwrap().has_data());
}

#[test]
fn test_project_root_used_without_modules() {
    let mut builder = TreeBuilder::new("single-file-driver");
    let root = builder.root();
    let class = add_class(&mut builder, root, "Driver");
    let (_, body) = add_map(&mut builder, class, "newMethodMap");
    let route = add_route(&mut builder, body, "/fake");
    add_verb(&mut builder, route, "GET", Some("getFake"));
    let tree = builder.build();
    let names = NameTable::default();

    let mut commands = ModuleCommands::new();
    convert_extensions(&Shapes::new(&tree, &names), &KnownMethods::new(), &mut commands);

    assert_eq!(commands.modules().collect::<Vec<_>>(), vec![tree.root()]);
}

#[test]
fn test_class_without_maps_has_no_data() {
    let mut builder = TreeBuilder::new("project");
    let module = add_module(&mut builder, "driver");
    let class = add_class(&mut builder, module, "Driver");
    add_method(&mut builder, class, "getStatus");
    // METHOD_MAP is only looked up in the built-in module
    let (_, body) = add_map(&mut builder, class, "METHOD_MAP");
    let route = add_route(&mut builder, body, "/status");
    add_verb(&mut builder, route, "GET", Some("getStatus"));
    let tree = builder.build();
    let names = NameTable::default();

    let info = convert_module_classes(&Shapes::new(&tree, &names), module, &KnownMethods::new());

    assert!(!info.has_data());
}

#[test]
fn test_extension_merges_into_builtin_module() {
    let mut builder = TreeBuilder::new("project");
    let module = add_module(&mut builder, "@appium/base-driver");
    let class = add_class(&mut builder, module, "BaseDriver");
    let (_, body) = add_map(&mut builder, class, "executeMethodMap");
    add_exec_entry(&mut builder, body, "mobile: status", Some("getStatus"));
    let tree = builder.build();
    let names = NameTable::default();

    let mut commands = ModuleCommands::new();
    let mut routes = RouteMap::new();
    routes.upsert(Command {
        command: "getStatus".to_string(),
        route: "/status".to_string(),
        http_method: HttpMethod::Get,
        required_params: Vec::new(),
        optional_params: Vec::new(),
        comment: None,
    });
    commands.insert_or_merge(module, CommandInfo::from_routes(routes));

    convert_extensions(&Shapes::new(&tree, &names), &KnownMethods::new(), &mut commands);

    let info = commands.get(module).unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(info.route_map.command_count(), 1);
    assert_eq!(info.exec_method_data_set.len(), 1);
}

#[test]
fn test_module_commands_merge_and_counts() {
    let mut builder = TreeBuilder::new("project");
    let a = add_module(&mut builder, "a");
    let b = add_module(&mut builder, "b");
    let tree = builder.build();

    let info = |route: &str, command: &str| {
        let mut routes = RouteMap::new();
        routes.upsert(Command {
            command: command.to_string(),
            route: route.to_string(),
            http_method: HttpMethod::Post,
            required_params: Vec::new(),
            optional_params: Vec::new(),
            comment: None,
        });
        CommandInfo::from_routes(routes)
    };

    let mut left = ModuleCommands::new();
    left.insert_or_merge(a, info("/x", "x"));
    let mut right = ModuleCommands::new();
    right.insert_or_merge(b, info("/y", "y"));
    right.insert_or_merge(a, info("/x", "x2"));
    left.merge(right);

    assert_eq!(left.modules().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(left.route_count(), 2);
    assert_eq!(left.command_count(), 3);
    assert_eq!(left.exec_method_count(), 0);

    let report = left.to_report(&tree);
    assert_eq!(report[0].module, "a");
    assert_eq!(report[1].module, "b");
}
