//! Top-level extraction run.

use drivermap_tree::{DeclTree, NodeKind};
use tracing::{debug, info, warn};

use crate::builtin::convert_builtin;
use crate::error::ExtractResult;
use crate::extension::convert_extensions;
use crate::known_methods::resolve_known_methods;
use crate::model::ModuleCommands;
use crate::names::NameTable;
use crate::shape::Shapes;

/// One extraction over a tree with a names table.
#[derive(Debug, Clone)]
pub struct Extractor<'t> {
    tree: &'t DeclTree,
    names: NameTable,
}

impl<'t> Extractor<'t> {
    /// Extractor using the default names.
    pub fn new(tree: &'t DeclTree) -> Self {
        Self::with_names(tree, NameTable::default())
    }

    pub fn with_names(tree: &'t DeclTree, names: NameTable) -> Self {
        Self { tree, names }
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Run the extraction.
    ///
    /// Either returns the complete result or fails with the one fatal
    /// error; nothing partial is returned.
    pub fn extract(&self) -> ExtractResult<ModuleCommands> {
        let shapes = Shapes::new(self.tree, &self.names);

        let known_methods = resolve_known_methods(&shapes);
        debug!("Known method count: {}", known_methods.len());

        let mut commands = convert_builtin(&shapes)?;
        convert_extensions(&shapes, &known_methods, &mut commands);

        if commands.is_empty() {
            warn!("No commands nor execute methods found in entire project!");
        } else {
            let module_total = self
                .tree
                .filter_children_by_kind(self.tree.root(), NodeKind::Module)
                .len()
                .max(1);
            info!(
                "Found {} commands in {} routes and {} execute methods of {}/{} modules",
                commands.command_count(),
                commands.route_count(),
                commands.exec_method_count(),
                commands.len(),
                module_total
            );
        }

        Ok(commands)
    }
}
