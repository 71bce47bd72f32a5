//! Route method-map parsing.

use drivermap_tree::{Comment, DeclTree, DeclarationNode, NodeId};
use indexmap::IndexSet;
use strum_macros::Display;
use tracing::{debug, trace, warn};

use crate::model::{Command, HttpMethod, KnownMethods, RouteMap};
use crate::params::command_params;
use crate::shape::Shapes;

/// Where a command's documentation comment came from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CommentSource {
    /// The local method implementing the command.
    LocalMethod,
    /// The declaration the local method is inherited from.
    Ancestor,
    /// The extension-point declaration of the command.
    KnownMethod,
    /// The HTTP-verb entry in the method map.
    MapEntry,
}

/// Pick the comment for `command`, falling through the sources in order.
pub fn resolve_comment<'t>(
    tree: &'t DeclTree,
    command: &str,
    verb_entry: NodeId,
    local_methods: &KnownMethods,
    known_methods: &KnownMethods,
) -> Option<(CommentSource, &'t Comment)> {
    let local = local_methods.get(command).map(|&id| tree.node(id));

    local
        .and_then(comment_of)
        .map(|comment| (CommentSource::LocalMethod, comment))
        .or_else(|| {
            local
                .and_then(|method| method.inherited_from)
                .and_then(|ancestor| tree.get(ancestor))
                .and_then(comment_of)
                .map(|comment| (CommentSource::Ancestor, comment))
        })
        .or_else(|| {
            known_methods
                .get(command)
                .and_then(|&id| comment_of(tree.node(id)))
                .map(|comment| (CommentSource::KnownMethod, comment))
        })
        .or_else(|| comment_of(tree.node(verb_entry)).map(|comment| (CommentSource::MapEntry, comment)))
}

fn comment_of(node: &DeclarationNode) -> Option<&Comment> {
    node.comment.as_ref().filter(|comment| !comment.is_empty())
}

/// Parse a method map into routes.
///
/// `parent` is the class or module holding the map and is only used in
/// diagnostics. Malformed routes and entries are skipped with a warning;
/// a verb without a command property is skipped silently.
pub fn parse_method_map(
    shapes: &Shapes<'_>,
    map: NodeId,
    parent: NodeId,
    local_methods: &KnownMethods,
    known_methods: &KnownMethods,
) -> RouteMap {
    let tree = shapes.tree();
    let parent_name = tree.name(parent);
    let mut routes = RouteMap::new();

    let mut unmatched_local: IndexSet<&str> = local_methods.keys().map(String::as_str).collect();
    let mut unmatched_known: IndexSet<&str> = known_methods.keys().map(String::as_str).collect();

    let route_props = tree.filter_children(map, |id| tree.node(id).kind.is_value_like());
    if route_props.is_empty() {
        warn!("No routes found in method map of {}; skipping", parent_name);
        return routes;
    }

    for route_prop in route_props {
        let route = tree.node(route_prop).original_name();

        if route.is_empty() {
            warn!("Empty route in {}", parent_name);
            continue;
        }
        if !shapes.is_route_entry(route_prop) {
            warn!(
                "Route {}.{} is not an object of HTTP methods ({}); skipping",
                parent_name,
                route,
                shapes.classify(route_prop)
            );
            continue;
        }

        let mut verbs: Vec<(NodeId, HttpMethod)> = Vec::new();
        for &child in tree.effective_children(route_prop) {
            match shapes.verb(child) {
                Some(method) => verbs.push((child, method)),
                None => warn!(
                    "Malformed HTTP method {} in {}.{}",
                    tree.name(child),
                    parent_name,
                    route
                ),
            }
        }
        if verbs.is_empty() {
            warn!("No HTTP methods found in route {}.{}", parent_name, route);
            continue;
        }

        for (verb_entry, http_method) in verbs {
            let Some(command_prop) = shapes.find_command_prop(verb_entry) else {
                trace!("No command for {} {} in {}", http_method, route, parent_name);
                continue;
            };
            let Some(command) = shapes.command_name(command_prop) else {
                warn!(
                    "Empty command name found in {}.{}.{}",
                    parent_name, route, http_method
                );
                continue;
            };

            if unmatched_local.shift_remove(command) {
                debug!("Found method matching command {}", command);
            }
            unmatched_known.shift_remove(command);

            let comment = resolve_comment(tree, command, verb_entry, local_methods, known_methods)
                .map(|(source, comment)| {
                    trace!("Comment for {} taken from {}", command, source);
                    comment.clone()
                });
            let params = command_params(shapes, verb_entry);

            routes.upsert(Command {
                command: command.to_string(),
                route: route.to_string(),
                http_method,
                required_params: params.required,
                optional_params: params.optional,
                comment,
            });
        }
    }

    for method in unmatched_local {
        debug!(
            "Method {}.{} is not bound to any route in the method map",
            parent_name, method
        );
    }
    for method in unmatched_known {
        trace!("Known method {} has no route in {}", method, parent_name);
    }

    routes
}
