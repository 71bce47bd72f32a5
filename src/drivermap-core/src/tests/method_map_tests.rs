//! Tests for route method-map parsing.

use drivermap_tree::{DeclarationNode, LiteralValue, NodeId, NodeKind, TreeBuilder};
use pretty_assertions::assert_eq;

use super::fixtures::*;
use crate::method_map::parse_method_map;
use crate::model::{Command, HttpMethod, KnownMethods, RouteMap};
use crate::names::NameTable;
use crate::shape::Shapes;

/// A `Driver` class with an empty `newMethodMap`; returns `(class, map, body)`.
fn driver(builder: &mut TreeBuilder) -> (NodeId, NodeId, NodeId) {
    let root = builder.root();
    let class = add_class(builder, root, "Driver");
    let (map, body) = add_map(builder, class, "newMethodMap");
    (class, map, body)
}

fn parse(builder: TreeBuilder, map: NodeId, class: NodeId) -> RouteMap {
    let tree = builder.build();
    let names = NameTable::default();
    let shapes = Shapes::new(&tree, &names);
    parse_method_map(
        &shapes,
        map,
        class,
        &KnownMethods::new(),
        &KnownMethods::new(),
    )
}

#[test]
fn test_single_status_route() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    let route = add_route(&mut builder, body, "/status");
    add_verb(&mut builder, route, "GET", Some("getStatus"));

    let routes = parse(builder, map, class);

    let mut expected = RouteMap::new();
    expected.upsert(Command {
        command: "getStatus".to_string(),
        route: "/status".to_string(),
        http_method: HttpMethod::Get,
        required_params: vec![],
        optional_params: vec![],
        comment: None,
    });
    assert_eq!(routes, expected);
}

#[test]
fn test_verb_without_command_contributes_nothing() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    let route = add_route(&mut builder, body, "/session/:sessionId/timeouts");
    add_verb(&mut builder, route, "GET", None);
    add_verb(&mut builder, route, "POST", Some("timeouts"));
    let lonely = add_route(&mut builder, body, "/session/:sessionId/noop");
    add_verb(&mut builder, lonely, "DELETE", None);

    let routes = parse(builder, map, class);

    assert_eq!(routes.len(), 1);
    let commands = routes.get("/session/:sessionId/timeouts").unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands["timeouts"].http_method, HttpMethod::Post);
    assert!(routes.get("/session/:sessionId/noop").is_none());
}

#[test]
fn test_empty_and_non_string_commands_skipped() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    let route = add_route(&mut builder, body, "/element");
    let (_, get_body) = add_verb(&mut builder, route, "GET", None);
    builder.add_child(
        get_body,
        DeclarationNode::new(NodeKind::Property, "command")
            .with_literal(LiteralValue::String(String::new())),
    );
    let (_, post_body) = add_verb(&mut builder, route, "POST", None);
    builder.add_child(
        post_body,
        DeclarationNode::new(NodeKind::Property, "command").with_literal(LiteralValue::Number(4.0)),
    );
    add_verb(&mut builder, route, "DELETE", Some("removeElement"));

    let routes = parse(builder, map, class);

    let names: Vec<_> = routes.commands().map(|c| c.command.as_str()).collect();
    assert_eq!(names, vec!["removeElement"]);
}

#[test]
fn test_non_route_properties_skipped() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    // a scalar where a route object belongs
    builder.add_child(
        body,
        DeclarationNode::new(NodeKind::Property, "/scalar")
            .with_literal(LiteralValue::String("GET".to_string())),
    );
    // an object with a key that is not a verb
    let odd = add_route(&mut builder, body, "/odd");
    add_verb(&mut builder, odd, "FETCH", Some("fetch"));
    let route = add_route(&mut builder, body, "/status");
    add_verb(&mut builder, route, "GET", Some("getStatus"));

    let routes = parse(builder, map, class);

    assert_eq!(routes.routes().collect::<Vec<_>>(), vec!["/status"]);
}

#[test]
fn test_route_without_verbs_skipped() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    add_route(&mut builder, body, "/empty");

    let routes = parse(builder, map, class);

    assert!(routes.is_empty());
}

#[test]
fn test_map_without_routes() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, _) = driver(&mut builder);

    assert!(parse(builder, map, class).is_empty());
}

#[test]
fn test_params_extracted() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    let route = add_route(&mut builder, body, "/session/:sessionId/url");
    let (_, post) = add_verb(&mut builder, route, "POST", Some("setUrl"));
    add_params(&mut builder, post, "payloadParams", &["a", "b"], &["c"]);
    add_verb(&mut builder, route, "GET", Some("getUrl"));

    let routes = parse(builder, map, class);

    let set_url = routes.command("/session/:sessionId/url", "setUrl").unwrap();
    assert_eq!(set_url.required_params, vec!["a", "b"]);
    assert_eq!(set_url.optional_params, vec!["c"]);

    let get_url = routes.command("/session/:sessionId/url", "getUrl").unwrap();
    assert!(get_url.required_params.is_empty());
    assert!(get_url.optional_params.is_empty());
}

#[test]
fn test_params_with_only_optional_list() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    let route = add_route(&mut builder, body, "/session");
    let (_, post) = add_verb(&mut builder, route, "POST", Some("createSession"));
    add_params(&mut builder, post, "payloadParams", &[], &["capabilities", ""]);

    let routes = parse(builder, map, class);

    let command = routes.command("/session", "createSession").unwrap();
    assert!(command.required_params.is_empty());
    // empty names are dropped
    assert_eq!(command.optional_params, vec!["capabilities"]);
}

#[test]
fn test_document_order_preserved() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    for route in ["/z", "/a", "/m"] {
        let route_body = add_route(&mut builder, body, route);
        add_verb(&mut builder, route_body, "POST", Some(format!("post{route}").as_str()));
        add_verb(&mut builder, route_body, "GET", Some(format!("get{route}").as_str()));
    }

    let routes = parse(builder, map, class);

    assert_eq!(routes.routes().collect::<Vec<_>>(), vec!["/z", "/a", "/m"]);
    let commands: Vec<_> = routes.get("/a").unwrap().keys().cloned().collect();
    assert_eq!(commands, vec!["post/a", "get/a"]);
}

#[test]
fn test_same_command_twice_in_route_last_wins() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    let route = add_route(&mut builder, body, "/window");
    add_verb(&mut builder, route, "GET", Some("window"));
    add_verb(&mut builder, route, "POST", Some("window"));

    let routes = parse(builder, map, class);

    let commands = routes.get("/window").unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands["window"].http_method, HttpMethod::Post);
}

#[test]
fn test_directly_declared_map() {
    let mut builder = TreeBuilder::new("project");
    let root = builder.root();
    let class = add_class(&mut builder, root, "Driver");
    // members hang off the constant itself, not an anonymous type
    let map = builder.add_child(
        class,
        DeclarationNode::new(NodeKind::Property, "newMethodMap").with_flags(static_flags()),
    );
    let route = builder.add_child(map, DeclarationNode::new(NodeKind::Property, "/status"));
    let verb = builder.add_child(route, DeclarationNode::new(NodeKind::Property, "GET"));
    add_command(&mut builder, verb, "getStatus");

    let routes = parse(builder, map, class);

    assert!(routes.command("/status", "getStatus").is_some());
}

#[test]
fn test_route_key_uses_original_name() {
    let mut builder = TreeBuilder::new("project");
    let (class, map, body) = driver(&mut builder);
    let (_, route) = builder.add_object(
        body,
        DeclarationNode::new(NodeKind::Property, "__session_status")
            .with_original_name("/session/:sessionId/status"),
    );
    add_verb(&mut builder, route, "GET", Some("getSessionStatus"));

    let routes = parse(builder, map, class);

    let command = routes
        .command("/session/:sessionId/status", "getSessionStatus")
        .unwrap();
    assert_eq!(command.route, "/session/:sessionId/status");
}
