//! Compiler configuration

use crate::constants::emit::{DEFAULT_ENTRY_POINT, DEFAULT_FUNCTION_PREFIX, DEFAULT_INDENT_WIDTH};
use crate::error::CodegenResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling how a compiled graph is emitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Name of the generated graph function
    pub entry_point: String,
    /// Prefix of generated per-node functions
    pub function_prefix: String,
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Emit a `// node (kind)` comment before each node call
    pub emit_node_comments: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            function_prefix: DEFAULT_FUNCTION_PREFIX.to_string(),
            indent_width: DEFAULT_INDENT_WIDTH,
            emit_node_comments: true,
        }
    }
}

impl CompilerConfig {
    /// Parse a JSON configuration; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> CodegenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = CompilerConfig::from_json_str(r#"{ "entry_point": "surface_main" }"#).unwrap();
        assert_eq!(config.entry_point, "surface_main");
        assert_eq!(config.function_prefix, "vop");
        assert_eq!(config.indent_width, 4);
        assert!(config.emit_node_comments);
    }

    #[test]
    fn test_invalid_config_is_json_error() {
        let result = CompilerConfig::from_json_str(r#"{ "indent_width": "wide" }"#);
        assert!(matches!(result, Err(crate::error::CodegenError::Json(_))));
    }

    #[test]
    fn test_indent() {
        let config = CompilerConfig {
            indent_width: 2,
            ..Default::default()
        };
        assert_eq!(config.indent(), "  ");
    }
}
