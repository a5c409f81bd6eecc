//! Error types for VOP code generation
//!
//! Every failure is fatal for the graph being compiled. Failures raised while a
//! specific node is being processed are wrapped in [`CodegenError::Node`] so the
//! host can point at the offending node.

use crate::nodes::data_type::DataType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Unknown socket data type '{0}'")]
    UnknownType(String),

    #[error("Data type {0:?} has no Slang representation")]
    UnsupportedType(DataType),

    #[error("No adapter registered for node kind '{0}'")]
    UnknownNodeKind(String),

    #[error("An adapter for node kind '{0}' is already registered")]
    DuplicateAdapter(String),

    #[error("Socket '{0}' not found in node context")]
    MissingSocket(String),

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Node '{node}' ({kind}): {source}")]
    Node {
        node: String,
        kind: String,
        #[source]
        source: Box<CodegenError>,
    },

    #[error("Unknown node '{0}'")]
    UnknownNode(String),

    #[error("Node '{node}' has no socket named '{socket}'")]
    UnknownSocket { node: String, socket: String },

    #[error("Duplicate node name '{0}'")]
    DuplicateNode(String),

    #[error("'{first}' and '{second}' both generate the identifier '{identifier}'")]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Input '{socket}' on node '{node}' is connected more than once")]
    MultipleConnections { node: String, socket: String },

    #[error("Cycle detected in node graph")]
    CycleDetected,

    #[error("Graph output '{0}' is not connected")]
    MissingOutputBinding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    pub fn missing_socket(name: impl Into<String>) -> Self {
        CodegenError::MissingSocket(name.into())
    }

    pub fn contract(message: impl Into<String>) -> Self {
        CodegenError::ContractViolation(message.into())
    }

    /// Attach the identity of the node that was being processed.
    ///
    /// Errors already carrying a node identity are returned unchanged.
    pub fn in_node(self, node: impl Into<String>, kind: impl Into<String>) -> Self {
        match self {
            err @ CodegenError::Node { .. } => err,
            other => CodegenError::Node {
                node: node.into(),
                kind: kind.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping node identity wrappers.
    pub fn root_cause(&self) -> &CodegenError {
        match self {
            CodegenError::Node { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Name and kind of the failing node, if known.
    pub fn node_identity(&self) -> Option<(&str, &str)> {
        match self {
            CodegenError::Node { node, kind, .. } => Some((node, kind)),
            _ => None,
        }
    }
}

/// Result type for code generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;
