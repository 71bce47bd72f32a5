//! Library side of the `drivermap` binary.
//!
//! Loading and rendering live here so they can be tested without spawning
//! the binary.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use drivermap_core::{Extractor, ModuleCommands, ModuleReport, NameTable};
use drivermap_tree::{DeclTree, typedoc};
use serde::Serialize;
use tracing::debug;

/// Output format of the command model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full command model as JSON.
    #[default]
    Json,
    /// One line per route command and execute command.
    Summary,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    project: &'a str,
    routes: usize,
    commands: usize,
    execute_methods: usize,
    modules: Vec<ModuleReport<'a>>,
}

/// Load a tree and an optional names table, then extract.
pub fn run(
    tree_path: &Path,
    names_path: Option<&Path>,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    let names = match names_path {
        Some(path) => NameTable::load(path)
            .with_context(|| format!("Failed to load names table from {}", path.display()))?,
        None => NameTable::default(),
    };

    let tree = typedoc::load(tree_path)
        .with_context(|| format!("Failed to load declaration tree from {}", tree_path.display()))?;
    debug!("Loaded {} declarations from {}", tree.len(), tree_path.display());

    let commands = Extractor::with_names(&tree, names).extract()?;
    render(&tree, &commands, format, pretty)
}

/// Render an extraction result.
pub fn render(
    tree: &DeclTree,
    commands: &ModuleCommands,
    format: OutputFormat,
    pretty: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let output = JsonOutput {
                project: tree.name(tree.root()),
                routes: commands.route_count(),
                commands: commands.command_count(),
                execute_methods: commands.exec_method_count(),
                modules: commands.to_report(tree),
            };
            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            Ok(json)
        }
        OutputFormat::Summary => Ok(render_summary(tree, commands)),
    }
}

fn render_summary(tree: &DeclTree, commands: &ModuleCommands) -> String {
    let mut out = String::new();
    for (&module, info) in commands {
        let _ = writeln!(
            out,
            "{} ({} routes, {} execute methods)",
            tree.name(module),
            info.route_map.len(),
            info.exec_method_data_set.len()
        );
        for command in info.route_map.commands() {
            let _ = writeln!(
                out,
                "  {:<6} {} -> {}",
                command.http_method.as_ref(),
                command.route,
                command.command
            );
        }
        for exec in &info.exec_method_data_set {
            let _ = writeln!(out, "  EXEC   {} -> {}", exec.script, exec.command);
        }
    }
    out
}
