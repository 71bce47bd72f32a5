//! Error types for command extraction.
//!
//! Missing constructs and malformed map entries are not errors: they are
//! logged and skipped. The only extraction failure is an integrity violation
//! in the built-in driver's method map.

use thiserror::Error;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur during extraction or while loading its configuration.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The built-in driver declares its method map but exposes no routes.
    #[error("Could not find any commands in the method map of {module}")]
    EmptyBuiltinMethodMap { module: String },

    /// Names table failed validation.
    #[error("Invalid names table: {0}")]
    InvalidNames(String),

    /// TOML parsing error.
    #[error("Failed to parse names table: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Returns true if the error aborts an extraction run, as opposed to a
    /// configuration problem detected before one starts.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExtractError::EmptyBuiltinMethodMap { .. })
    }

    /// Returns the exit code for CLI error reporting.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExtractError::EmptyBuiltinMethodMap { .. } => 3,
            ExtractError::InvalidNames(_) | ExtractError::Config(_) => 2,
            ExtractError::Io(_) => 1,
        }
    }
}
