//! Slang source emission for compiled programs

use super::program::{NodeProgram, ShaderProgram};
use crate::config::CompilerConfig;
use crate::nodes::graph::sanitize_identifier;
use std::fmt::Write;

/// Renders a [`ShaderProgram`] as Slang source text
#[derive(Debug, Clone, Default)]
pub struct SlangEmitter {
    config: CompilerConfig,
}

impl SlangEmitter {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Name of the function generated for a node
    pub fn node_function_name(&self, node: &NodeProgram) -> String {
        format!(
            "{}_{}_{}",
            self.config.function_prefix,
            sanitize_identifier(&node.kind),
            sanitize_identifier(&node.node_name)
        )
    }

    /// Full source: one function per node followed by the entry point
    pub fn emit(&self, program: &ShaderProgram) -> String {
        let mut source = String::from("// Generated by slangvop\n");
        for node in &program.nodes {
            source.push('\n');
            source.push_str(&self.emit_node_function(node));
        }
        source.push('\n');
        source.push_str(&self.emit_entry_point(program));
        source
    }

    /// Function holding a node's operations
    pub fn emit_node_function(&self, node: &NodeProgram) -> String {
        let indent = self.config.indent();
        let params: Vec<String> = node.parameters.iter().map(|p| p.render()).collect();

        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "void {}({})", self.node_function_name(node), params.join(", "));
        out.push_str("{\n");
        for operation in &node.operations {
            let _ = writeln!(out, "{}{}", indent, operation.to_statement());
        }
        out.push_str("}\n");
        out
    }

    /// Graph function: declares node outputs, calls nodes in order, writes results
    pub fn emit_entry_point(&self, program: &ShaderProgram) -> String {
        let indent = self.config.indent();
        let params: Vec<String> = program.parameters.iter().map(|p| p.render()).collect();

        let mut out = String::new();
        let _ = writeln!(out, "void {}({})", self.config.entry_point, params.join(", "));
        out.push_str("{\n");
        for local in program.nodes.iter().flat_map(|n| n.locals.iter()) {
            let _ = writeln!(out, "{}{};", indent, local.render());
        }
        for node in &program.nodes {
            if self.config.emit_node_comments {
                let _ = writeln!(out, "{}// {} ({})", indent, node.node_name, node.kind);
            }
            let _ = writeln!(
                out,
                "{}{}({});",
                indent,
                self.node_function_name(node),
                node.arguments.join(", ")
            );
        }
        for binding in &program.output_bindings {
            let _ = writeln!(out, "{}{}", indent, binding.to_statement());
        }
        out.push_str("}\n");
        out
    }
}
