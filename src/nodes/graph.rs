//! Node graph description consumed by the code generation engine

use super::context::NodeContext;
use super::port::{code_var_name, Direction, Socket};
use crate::constants::graph::{SUBNET_INPUT, SUBNET_OUTPUT};
use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Declared socket: host name plus host type name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl SocketDecl {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Resolve into a socket with the given direction
    pub fn to_socket(&self, direction: Direction) -> CodegenResult<Socket> {
        Socket::new(self.name.as_str(), &self.type_name, direction)
    }
}

/// A visual operator node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VopNode {
    /// Unique node name within the graph
    pub name: String,
    /// Node kind used for adapter lookup
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<SocketDecl>,
    #[serde(default)]
    pub outputs: Vec<SocketDecl>,
}

impl VopNode {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, name: &str, type_name: &str) -> Self {
        self.inputs.push(SocketDecl::new(name, type_name));
        self
    }

    pub fn with_output(mut self, name: &str, type_name: &str) -> Self {
        self.outputs.push(SocketDecl::new(name, type_name));
        self
    }

    pub fn input(&self, name: &str) -> Option<&SocketDecl> {
        self.inputs.iter().find(|s| s.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&SocketDecl> {
        self.outputs.iter().find(|s| s.name == name)
    }
}

/// Represents a connection between two sockets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from_node: String,
    pub from_socket: String,
    pub to_node: String,
    pub to_socket: String,
}

impl Connection {
    /// Creates a new connection
    pub fn new(from_node: &str, from_socket: &str, to_node: &str, to_socket: &str) -> Self {
        Self {
            from_node: from_node.to_string(),
            from_socket: from_socket.to_string(),
            to_node: to_node.to_string(),
            to_socket: to_socket.to_string(),
        }
    }
}

/// A graph of VOP nodes with its external inputs and outputs.
///
/// Graph inputs are read through the `subinput` pseudo node, graph outputs are
/// written through `suboutput`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VopGraph {
    #[serde(default)]
    pub inputs: Vec<SocketDecl>,
    #[serde(default)]
    pub outputs: Vec<SocketDecl>,
    #[serde(default)]
    pub nodes: Vec<VopNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl VopGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON graph description
    pub fn from_json_str(json: &str) -> CodegenResult<Self> {
        let graph: VopGraph = serde_json::from_str(json)?;
        graph.validate()?;
        Ok(graph)
    }

    /// Load and validate a JSON graph description from disk
    pub fn from_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Declares a graph input
    pub fn add_input(&mut self, name: &str, type_name: &str) -> &mut Self {
        self.inputs.push(SocketDecl::new(name, type_name));
        self
    }

    /// Declares a graph output
    pub fn add_output(&mut self, name: &str, type_name: &str) -> &mut Self {
        self.outputs.push(SocketDecl::new(name, type_name));
        self
    }

    /// Adds a node and returns its index
    pub fn add_node(&mut self, node: VopNode) -> CodegenResult<usize> {
        if is_reserved(&node.name) || self.node_index(&node.name).is_some() {
            return Err(CodegenError::DuplicateNode(node.name));
        }
        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }

    /// Adds a connection between two sockets
    pub fn add_connection(&mut self, connection: Connection) -> CodegenResult<()> {
        self.check_connection(&connection)?;
        if self.incoming(&connection.to_node, &connection.to_socket).is_some() {
            return Err(CodegenError::MultipleConnections {
                node: connection.to_node,
                socket: connection.to_socket,
            });
        }
        self.connections.push(connection);
        Ok(())
    }

    /// Helper to add a connection by names
    pub fn connect(
        &mut self,
        from_node: &str,
        from_socket: &str,
        to_node: &str,
        to_socket: &str,
    ) -> CodegenResult<()> {
        self.add_connection(Connection::new(from_node, from_socket, to_node, to_socket))
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    pub fn node(&self, name: &str) -> Option<&VopNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// The connection feeding a given input, if any
    pub fn incoming(&self, node: &str, socket: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.to_node == node && c.to_socket == socket)
    }

    /// Whether any connection reads from the given node
    pub fn has_consumers(&self, node: &str) -> bool {
        self.connections.iter().any(|c| c.from_node == node)
    }

    /// Check names, endpoints and fan-in of a deserialized graph
    pub fn validate(&self) -> CodegenResult<()> {
        let mut names = HashSet::new();
        for node in &self.nodes {
            if is_reserved(&node.name) || !names.insert(node.name.as_str()) {
                return Err(CodegenError::DuplicateNode(node.name.clone()));
            }
        }
        self.check_identifiers()?;

        let mut targets = HashSet::new();
        for connection in &self.connections {
            self.check_connection(connection)?;
            if !targets.insert((connection.to_node.as_str(), connection.to_socket.as_str())) {
                return Err(CodegenError::MultipleConnections {
                    node: connection.to_node.clone(),
                    socket: connection.to_socket.clone(),
                });
            }
        }
        Ok(())
    }

    // Distinct host names must stay distinct once turned into generated identifiers
    fn check_identifiers(&self) -> CodegenResult<()> {
        let mut functions = IdentifierScope::default();
        let mut entry = IdentifierScope::default();

        for socket in self.inputs.iter().chain(&self.outputs) {
            entry.claim(code_var_name(&socket.name), &socket.name)?;
        }

        for node in &self.nodes {
            let function = format!(
                "{}_{}",
                sanitize_identifier(&node.kind),
                sanitize_identifier(&node.name)
            );
            functions.claim(function, &node.name)?;

            let mut parameters = IdentifierScope::default();
            for socket in node.inputs.iter().chain(&node.outputs) {
                let owner = format!("{}.{}", node.name, socket.name);
                parameters.claim(code_var_name(&socket.name), &owner)?;
            }
            for output in &node.outputs {
                entry.claim(
                    local_var_name(&node.name, &output.name),
                    &format!("{}.{}", node.name, output.name),
                )?;
            }
        }
        Ok(())
    }

    fn check_connection(&self, connection: &Connection) -> CodegenResult<()> {
        let source_ok = if connection.from_node == SUBNET_INPUT {
            self.inputs.iter().any(|s| s.name == connection.from_socket)
        } else {
            self.node(&connection.from_node)
                .ok_or_else(|| CodegenError::UnknownNode(connection.from_node.clone()))?
                .output(&connection.from_socket)
                .is_some()
        };
        if !source_ok {
            return Err(CodegenError::UnknownSocket {
                node: connection.from_node.clone(),
                socket: connection.from_socket.clone(),
            });
        }

        let target_ok = if connection.to_node == SUBNET_OUTPUT {
            self.outputs.iter().any(|s| s.name == connection.to_socket)
        } else {
            self.node(&connection.to_node)
                .ok_or_else(|| CodegenError::UnknownNode(connection.to_node.clone()))?
                .input(&connection.to_socket)
                .is_some()
        };
        if !target_ok {
            return Err(CodegenError::UnknownSocket {
                node: connection.to_node.clone(),
                socket: connection.to_socket.clone(),
            });
        }
        Ok(())
    }

    /// Build the context for a node: connected inputs in declaration order, all outputs
    pub fn node_context(&self, node: &VopNode) -> CodegenResult<NodeContext> {
        let mut ctx = NodeContext::new();
        for input in &node.inputs {
            if self.incoming(&node.name, &input.name).is_some() {
                ctx.add_socket(input.to_socket(Direction::Input)?);
            }
        }
        for output in &node.outputs {
            ctx.add_socket(output.to_socket(Direction::Output)?);
        }
        Ok(ctx)
    }

    /// Variable holding the value that flows out of a connection's source
    pub fn source_var_name(&self, connection: &Connection) -> String {
        if connection.from_node == SUBNET_INPUT {
            code_var_name(&connection.from_socket)
        } else {
            local_var_name(&connection.from_node, &connection.from_socket)
        }
    }

    /// Node indices keyed by name
    pub(crate) fn index_by_name(&self) -> HashMap<&str, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.name.as_str(), i))
            .collect()
    }
}

/// Generated identifiers of one scope and the host names that produced them
#[derive(Default)]
struct IdentifierScope {
    owners: HashMap<String, String>,
}

impl IdentifierScope {
    fn claim(&mut self, identifier: String, owner: &str) -> CodegenResult<()> {
        if let Some(first) = self.owners.get(&identifier) {
            return Err(CodegenError::IdentifierCollision {
                identifier,
                first: first.clone(),
                second: owner.to_string(),
            });
        }
        self.owners.insert(identifier, owner.to_string());
        Ok(())
    }
}

fn is_reserved(name: &str) -> bool {
    name == SUBNET_INPUT || name == SUBNET_OUTPUT
}

/// Replaces every character that cannot appear in an identifier with `_`
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Local variable holding a node output inside the entry function
pub fn local_var_name(node: &str, socket: &str) -> String {
    format!("{}{}", sanitize_identifier(node), code_var_name(socket))
}
