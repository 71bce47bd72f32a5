//! Well-known names the extractor looks for.
//!
//! Every module, class, constant and property name the extractor matches on
//! lives in [`NameTable`]. The defaults describe Appium's extension API; a
//! TOML file can override any subset of them.
//!
//! ```toml
//! # names.toml
//! method_map = "newMethodMap"
//! execute_method_map = "executeMethodMap"
//! async_return_types = ["Promise", "Bluebird"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

/// Names of the constructs recognized during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameTable {
    /// Module declaring the base extension-point interface.
    pub types_module: String,
    /// Base extension-point interface whose methods are the known methods.
    pub extension_point: String,
    /// Module of the framework's built-in driver.
    pub builtin_module: String,
    /// Concrete driver class inside the built-in module.
    pub builtin_driver_class: String,
    /// Module-level canonical method map of the built-in module.
    pub builtin_method_map: String,
    /// Static method map declared by extension classes.
    pub method_map: String,
    /// Static execute-method map declared by extension classes.
    pub execute_method_map: String,
    /// Property naming the command inside a map entry.
    pub command: String,
    /// Parameter container of an execute-method map entry.
    pub params: String,
    /// Parameter container of a method map entry.
    pub payload_params: String,
    pub required: String,
    pub optional: String,
    /// Return types that make a method asynchronous.
    pub async_return_types: Vec<String>,
    /// Comment modifiers that hide a method from extraction.
    pub private_markers: Vec<String>,
}

impl Default for NameTable {
    fn default() -> Self {
        Self {
            types_module: "@appium/types".to_string(),
            extension_point: "ExternalDriver".to_string(),
            builtin_module: "@appium/base-driver".to_string(),
            builtin_driver_class: "BaseDriver".to_string(),
            builtin_method_map: "METHOD_MAP".to_string(),
            method_map: "newMethodMap".to_string(),
            execute_method_map: "executeMethodMap".to_string(),
            command: "command".to_string(),
            params: "params".to_string(),
            payload_params: "payloadParams".to_string(),
            required: "required".to_string(),
            optional: "optional".to_string(),
            async_return_types: vec!["Promise".to_string()],
            private_markers: vec!["@internal".to_string(), "@private".to_string()],
        }
    }
}

impl NameTable {
    /// Parse a names table from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> ExtractResult<Self> {
        let names: Self = toml::from_str(content)?;
        names.validate()?;
        Ok(names)
    }

    /// Read a names table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        debug!("Loading names table from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject empty names; an empty name would match unnamed declarations.
    pub fn validate(&self) -> ExtractResult<()> {
        let fields = [
            ("types_module", &self.types_module),
            ("extension_point", &self.extension_point),
            ("builtin_module", &self.builtin_module),
            ("builtin_driver_class", &self.builtin_driver_class),
            ("builtin_method_map", &self.builtin_method_map),
            ("method_map", &self.method_map),
            ("execute_method_map", &self.execute_method_map),
            ("command", &self.command),
            ("params", &self.params),
            ("payload_params", &self.payload_params),
            ("required", &self.required),
            ("optional", &self.optional),
        ];

        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ExtractError::InvalidNames(format!("'{field}' must not be empty")));
        }

        if self.async_return_types.iter().all(|t| t.trim().is_empty()) {
            return Err(ExtractError::InvalidNames(
                "'async_return_types' needs at least one type name".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `name` names either parameter container.
    pub fn is_params_name(&self, name: &str) -> bool {
        name == self.params || name == self.payload_params
    }

    /// Whether `name` names either kind of method map.
    pub fn is_method_map_name(&self, name: &str) -> bool {
        name == self.method_map || name == self.builtin_method_map
    }
}
