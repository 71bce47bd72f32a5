//! Command model produced by extraction.
//!
//! All maps are insertion-ordered, so iterating a result walks routes and
//! commands in the order they were declared.

use std::hash::{Hash, Hasher};

use drivermap_tree::{Comment, DeclTree, NodeId};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// HTTP verbs a route may bind commands to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// Method name to its declaration.
pub type KnownMethods = IndexMap<String, NodeId>;

/// A command bound to a route and HTTP verb.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub command: String,
    pub route: String,
    pub http_method: HttpMethod,
    pub required_params: Vec<String>,
    pub optional_params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
}

/// Commands of one route, keyed by command name.
pub type CommandMap = IndexMap<String, Command>;

/// Commands grouped by route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteMap(IndexMap<String, CommandMap>);

impl RouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of a route.
    pub fn get(&self, route: &str) -> Option<&CommandMap> {
        self.0.get(route)
    }

    /// A single command of a route.
    pub fn command(&self, route: &str, command: &str) -> Option<&Command> {
        self.0.get(route).and_then(|commands| commands.get(command))
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, CommandMap> {
        self.0.iter()
    }

    /// Route strings in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every command of every route.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.0.values().flat_map(IndexMap::values)
    }

    /// Number of commands across all routes.
    pub fn command_count(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    /// Insert a command under its route, replacing one of the same name.
    pub fn upsert(&mut self, command: Command) {
        self.0
            .entry(command.route.clone())
            .or_default()
            .insert(command.command.clone(), command);
    }

    /// Merge another route map into this one.
    ///
    /// Routes present in both are merged by command name; commands from
    /// `other` win.
    pub fn merge(&mut self, other: RouteMap) {
        for (route, commands) in other.0 {
            self.0.entry(route).or_default().extend(commands);
        }
    }
}

impl<'a> IntoIterator for &'a RouteMap {
    type Item = (&'a String, &'a CommandMap);
    type IntoIter = indexmap::map::Iter<'a, String, CommandMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for RouteMap {
    type Item = (String, CommandMap);
    type IntoIter = indexmap::map::IntoIter<String, CommandMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A command reachable through a script name in an execute-method map.
///
/// Two execute commands are the same entry when script and command match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteCommand {
    pub command: String,
    pub script: String,
    pub required_params: Vec<String>,
    pub optional_params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
}

impl PartialEq for ExecuteCommand {
    fn eq(&self, other: &Self) -> bool {
        self.script == other.script && self.command == other.command
    }
}

impl Eq for ExecuteCommand {}

impl Hash for ExecuteCommand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.script.hash(state);
        self.command.hash(state);
    }
}

/// Execute commands of a module, in declaration order.
pub type ExecMethodDataSet = IndexSet<ExecuteCommand>;

/// Everything extracted for one module.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInfo {
    pub route_map: RouteMap,
    pub exec_method_data_set: ExecMethodDataSet,
}

impl CommandInfo {
    pub fn new(route_map: RouteMap, exec_method_data_set: ExecMethodDataSet) -> Self {
        Self {
            route_map,
            exec_method_data_set,
        }
    }

    /// Info with routes only.
    pub fn from_routes(route_map: RouteMap) -> Self {
        Self::new(route_map, ExecMethodDataSet::new())
    }

    /// True iff there is at least one route or execute command.
    pub fn has_data(&self) -> bool {
        !self.route_map.is_empty() || !self.exec_method_data_set.is_empty()
    }

    /// Merge another module's info into this one.
    pub fn merge(&mut self, other: CommandInfo) {
        self.route_map.merge(other.route_map);
        self.exec_method_data_set.extend(other.exec_method_data_set);
    }
}

/// Extraction result: module (or project) node to its commands.
///
/// Keys are the node ids of the input tree, so consumers can attach output
/// to the very declarations the commands were found in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleCommands(IndexMap<NodeId, CommandInfo>);

impl ModuleCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, module: NodeId) -> Option<&CommandInfo> {
        self.0.get(&module)
    }

    pub fn contains(&self, module: NodeId) -> bool {
        self.0.contains_key(&module)
    }

    /// Number of modules with data.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, NodeId, CommandInfo> {
        self.0.iter()
    }

    /// Module ids in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.keys().copied()
    }

    /// Add a module's info, merging with what is already recorded for it.
    pub fn insert_or_merge(&mut self, module: NodeId, info: CommandInfo) {
        match self.0.get_mut(&module) {
            Some(existing) => existing.merge(info),
            None => {
                self.0.insert(module, info);
            }
        }
    }

    /// Merge every module of `other` into this result.
    pub fn merge(&mut self, other: ModuleCommands) {
        for (module, info) in other.0 {
            self.insert_or_merge(module, info);
        }
    }

    /// Total routes across modules.
    pub fn route_count(&self) -> usize {
        self.0.values().map(|info| info.route_map.len()).sum()
    }

    /// Total route-bound commands across modules.
    pub fn command_count(&self) -> usize {
        self.0.values().map(|info| info.route_map.command_count()).sum()
    }

    /// Total execute commands across modules.
    pub fn exec_method_count(&self) -> usize {
        self.0
            .values()
            .map(|info| info.exec_method_data_set.len())
            .sum()
    }

    /// Serializable view naming each module.
    pub fn to_report<'a>(&'a self, tree: &'a DeclTree) -> Vec<ModuleReport<'a>> {
        self.0
            .iter()
            .map(|(&node, commands)| ModuleReport {
                module: tree.name(node),
                node,
                commands,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ModuleCommands {
    type Item = (&'a NodeId, &'a CommandInfo);
    type IntoIter = indexmap::map::Iter<'a, NodeId, CommandInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One module of a [`ModuleCommands`] result, ready for serialization.
#[derive(Debug, Serialize)]
pub struct ModuleReport<'a> {
    pub module: &'a str,
    pub node: NodeId,
    #[serde(flatten)]
    pub commands: &'a CommandInfo,
}
