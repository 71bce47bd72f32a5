//! Error types for loading declaration trees.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while loading a declaration tree.
#[derive(Error, Debug)]
pub enum TreeError {
    /// JSON parsing error.
    #[error("Failed to parse declaration tree: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree file not found.
    #[error("Declaration tree not found: {0}")]
    NotFound(PathBuf),

    /// The top-level reflection is not a project.
    #[error("Root reflection '{name}' has kind {kind}, expected a project (1)")]
    InvalidRoot { name: String, kind: u32 },
}
