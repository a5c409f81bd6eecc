//! Accumulated per-node programs of a compiled graph

use super::Operation;
use crate::error::CodegenResult;
use crate::nodes::data_type::to_target_type_string;
use crate::nodes::port::Socket;

/// A typed variable declaration: function parameter or local
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub name: String,
    pub type_name: &'static str,
    pub qualifier: Option<&'static str>,
}

impl ParameterDecl {
    /// Declaration of a socket as a function parameter.
    ///
    /// Fails for sockets whose type has no Slang spelling.
    pub fn from_socket(socket: &Socket) -> CodegenResult<Self> {
        Ok(Self {
            name: socket.code_var_name(),
            type_name: to_target_type_string(socket.data_type())?,
            qualifier: socket.type_qualifier(),
        })
    }

    /// Plain local variable declaration
    pub fn local(name: impl Into<String>, socket: &Socket) -> CodegenResult<Self> {
        Ok(Self {
            name: name.into(),
            type_name: to_target_type_string(socket.data_type())?,
            qualifier: None,
        })
    }

    /// `[qualifier ]type name`
    pub fn render(&self) -> String {
        match self.qualifier {
            Some(qualifier) => format!("{} {} {}", qualifier, self.type_name, self.name),
            None => format!("{} {}", self.type_name, self.name),
        }
    }
}

/// Generated code for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeProgram {
    pub node_name: String,
    pub kind: String,
    /// Signature of the node function: bound inputs, then outputs
    pub parameters: Vec<ParameterDecl>,
    /// Body of the node function
    pub operations: Vec<Operation>,
    /// Call arguments, one per parameter
    pub arguments: Vec<String>,
    /// Locals receiving the node outputs in the entry function
    pub locals: Vec<ParameterDecl>,
}

/// Ordered programs of every node in a graph plus the entry point interface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderProgram {
    /// Graph inputs followed by graph outputs
    pub parameters: Vec<ParameterDecl>,
    /// Node programs in dependency order
    pub nodes: Vec<NodeProgram>,
    /// Assignments copying node results to the graph outputs
    pub output_bindings: Vec<Operation>,
}

impl ShaderProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: NodeProgram) {
        self.nodes.push(node);
    }

    pub fn node(&self, name: &str) -> Option<&NodeProgram> {
        self.nodes.iter().find(|n| n.node_name == name)
    }

    /// Every node operation in program order
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.nodes.iter().flat_map(|n| n.operations.iter())
    }
}
