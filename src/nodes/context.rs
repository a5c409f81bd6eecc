//! Per-node view of resolved sockets handed to adapters

use super::port::{Direction, Socket};
use crate::error::{CodegenError, CodegenResult};
use indexmap::IndexMap;

/// Resolved sockets of one node for a single code generation pass.
///
/// Inputs and outputs keep their declaration order; variadic adapters rely on it.
#[derive(Debug, Clone, Default)]
pub struct NodeContext {
    inputs: IndexMap<String, Socket>,
    outputs: IndexMap<String, Socket>,
}

impl NodeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a socket, routing it by direction. `InOut` sockets count as outputs.
    ///
    /// Re-adding a name replaces the socket but keeps its original position.
    pub fn add_socket(&mut self, socket: Socket) -> &mut Self {
        let name = socket.name().to_string();
        match socket.direction() {
            Direction::Input => self.inputs.insert(name, socket),
            Direction::Output | Direction::InOut => self.outputs.insert(name, socket),
        };
        self
    }

    /// Builder-style input declaration from a host type name
    pub fn with_input(mut self, name: &str, type_name: &str) -> CodegenResult<Self> {
        self.add_socket(Socket::new(name, type_name, Direction::Input)?);
        Ok(self)
    }

    /// Builder-style output declaration from a host type name
    pub fn with_output(mut self, name: &str, type_name: &str) -> CodegenResult<Self> {
        self.add_socket(Socket::new(name, type_name, Direction::Output)?);
        Ok(self)
    }

    pub fn inputs(&self) -> &IndexMap<String, Socket> {
        &self.inputs
    }

    pub fn outputs(&self) -> &IndexMap<String, Socket> {
        &self.outputs
    }

    /// Looks up a bound input by name
    pub fn input(&self, name: &str) -> CodegenResult<&Socket> {
        self.inputs.get(name).ok_or_else(|| CodegenError::missing_socket(name))
    }

    /// Looks up an output by name
    pub fn output(&self, name: &str) -> CodegenResult<&Socket> {
        self.outputs.get(name).ok_or_else(|| CodegenError::missing_socket(name))
    }

    /// All sockets in parameter order: inputs first, then outputs
    pub fn parameters(&self) -> impl Iterator<Item = &Socket> {
        self.inputs.values().chain(self.outputs.values())
    }
}
