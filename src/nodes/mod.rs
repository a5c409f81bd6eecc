//! Node system - sockets, contexts, adapters and the graph code generation engine

// Core node system modules
pub mod codegen_engine;
pub mod context;
pub mod data_type;
pub mod factory;
pub mod graph;
pub mod port;

// Operator adapters
pub mod math;

// Re-export core types
pub use context::NodeContext;
pub use data_type::{is_target_representable, to_target_type_string, DataType};
pub use graph::{Connection, SocketDecl, VopGraph, VopNode};
pub use port::{Direction, Socket};

// Re-export factory types
pub use factory::{AdapterMetadata, AdapterRegistry, NodeAdapter, NodeCategory, BUILTIN_ADAPTERS};

// Re-export engine types
pub use codegen_engine::CodegenEngine;
