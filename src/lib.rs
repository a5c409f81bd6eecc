//! slangvop - visual operator node graphs to Slang shader code
//!
//! Each VOP node is handed to the adapter registered for its kind, which turns the
//! node's typed sockets into intermediate [`Operation`]s. The engine accumulates them
//! in dependency order and [`SlangEmitter`] renders the result as source text.

pub mod code;
pub mod config;
pub mod constants;
pub mod error;
pub mod nodes;

// Re-export commonly used types
pub use code::{BinaryOp, Expr, Operation, ShaderProgram, SlangEmitter};
pub use config::CompilerConfig;
pub use error::{CodegenError, CodegenResult};
pub use nodes::{AdapterRegistry, CodegenEngine, NodeAdapter, NodeContext, Socket, VopGraph};

/// Compile a graph with the built-in adapters and render it as Slang source
pub fn compile_to_slang(graph: &VopGraph, config: &CompilerConfig) -> CodegenResult<String> {
    let program = CodegenEngine::new().compile(graph)?;
    Ok(SlangEmitter::new(config.clone()).emit(&program))
}
