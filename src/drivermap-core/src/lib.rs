//! Command extraction for drivermap.
//!
//! Turns a [`DeclTree`] into the commands a remote-automation driver
//! declares: HTTP routes bound to commands through method maps, and script
//! names bound to commands through execute-method maps.
//!
//! Extraction runs in three steps over one tree:
//!
//! 1. Known methods are read from the extension-point interface.
//! 2. The built-in driver module's canonical method map is parsed.
//! 3. Every class of every module is searched for its own method map and
//!    execute-method map.
//!
//! All results land in a single [`ModuleCommands`] keyed by the module nodes
//! of the input tree.
//!
//! # Example
//!
//! ```rust,ignore
//! use drivermap_core::extract;
//!
//! let tree = drivermap_tree::typedoc::load("docs.json")?;
//! let commands = extract(&tree)?;
//! for (module, info) in &commands {
//!     println!("{}: {} routes", tree.name(*module), info.route_map.len());
//! }
//! ```

pub mod builtin;
pub mod error;
pub mod exec_map;
pub mod extension;
pub mod extractor;
pub mod known_methods;
pub mod method_map;
pub mod model;
pub mod names;
pub mod params;
pub mod shape;

#[cfg(test)]
mod tests;

use drivermap_tree::DeclTree;

pub use error::{ExtractError, ExtractResult};
pub use extractor::Extractor;
pub use method_map::CommentSource;
pub use model::{
    Command, CommandInfo, CommandMap, ExecMethodDataSet, ExecuteCommand, HttpMethod,
    KnownMethods, ModuleCommands, ModuleReport, RouteMap,
};
pub use names::NameTable;
pub use shape::{NodeShape, Shapes};

/// Extract commands with the default names table.
pub fn extract(tree: &DeclTree) -> ExtractResult<ModuleCommands> {
    Extractor::new(tree).extract()
}
