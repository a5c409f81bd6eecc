//! Node graph code generation engine
//!
//! Walks a [`VopGraph`] in dependency order and turns every node into a
//! [`NodeProgram`]:
//! - Execution ordering via topological sort
//! - Context building from bound sockets
//! - Adapter dispatch by node kind
//! - Signature and call argument resolution

use std::collections::VecDeque;

use log::{debug, error, info, warn};

use super::factory::{AdapterRegistry, BUILTIN_ADAPTERS};
use super::graph::{local_var_name, VopGraph, VopNode};
use super::port::Direction;
use super::NodeContext;
use crate::code::{NodeProgram, Operation, ParameterDecl, ShaderProgram};
use crate::constants::graph::{SUBNET_INPUT, SUBNET_OUTPUT};
use crate::error::{CodegenError, CodegenResult};

/// Code generation engine for node graphs
pub struct CodegenEngine<'r> {
    registry: &'r AdapterRegistry,
}

impl CodegenEngine<'static> {
    /// Engine backed by the built-in adapters
    pub fn new() -> Self {
        Self {
            registry: &*BUILTIN_ADAPTERS,
        }
    }
}

impl Default for CodegenEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> CodegenEngine<'r> {
    pub fn with_registry(registry: &'r AdapterRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        self.registry
    }

    /// Get the node order using topological sort.
    ///
    /// Ties are broken by declaration order so the result is deterministic.
    pub fn execution_order(&self, graph: &VopGraph) -> CodegenResult<Vec<usize>> {
        let index = graph.index_by_name();

        // Build dependency graph
        let mut in_degree = vec![0usize; graph.nodes.len()];
        let mut adj_list: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];

        for connection in &graph.connections {
            if connection.from_node == SUBNET_INPUT || connection.to_node == SUBNET_OUTPUT {
                continue;
            }
            let from = *index
                .get(connection.from_node.as_str())
                .ok_or_else(|| CodegenError::UnknownNode(connection.from_node.clone()))?;
            let to = *index
                .get(connection.to_node.as_str())
                .ok_or_else(|| CodegenError::UnknownNode(connection.to_node.clone()))?;
            adj_list[from].push(to);
            in_degree[to] += 1;
        }

        // Kahn's algorithm, starting with nodes that have no dependencies
        let mut queue: VecDeque<usize> = (0..graph.nodes.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut result = Vec::with_capacity(graph.nodes.len());

        while let Some(node_idx) = queue.pop_front() {
            result.push(node_idx);
            for &neighbor in &adj_list[node_idx] {
                in_degree[neighbor] -= 1;
                if in_degree[neighbor] == 0 {
                    queue.push_back(neighbor);
                }
            }
        }

        if result.len() != graph.nodes.len() {
            return Err(CodegenError::CycleDetected);
        }
        Ok(result)
    }

    /// Generate the operations of a single node.
    ///
    /// For hosts that walk their own graph. Failures carry the node identity.
    pub fn generate_node(
        &self,
        node_name: &str,
        kind: &str,
        ctx: &NodeContext,
    ) -> CodegenResult<Vec<Operation>> {
        self.registry
            .lookup(kind)
            .and_then(|adapter| adapter.generate_code(ctx))
            .map_err(|e| e.in_node(node_name, kind))
    }

    /// Compile a whole graph into an ordered shader program
    pub fn compile(&self, graph: &VopGraph) -> CodegenResult<ShaderProgram> {
        graph.validate()?;
        let order = self.execution_order(graph)?;

        let mut program = ShaderProgram::new();
        for input in &graph.inputs {
            program
                .parameters
                .push(ParameterDecl::from_socket(&input.to_socket(Direction::Input)?)?);
        }
        for output in &graph.outputs {
            program
                .parameters
                .push(ParameterDecl::from_socket(&output.to_socket(Direction::Output)?)?);
        }

        for node_idx in order {
            let node = &graph.nodes[node_idx];
            let node_program = self.compile_node(graph, node).map_err(|e| {
                error!("Code generation failed for node '{}' ({}): {}", node.name, node.kind, e);
                e.in_node(&node.name, &node.kind)
            })?;
            program.push(node_program);
        }

        for output in &graph.outputs {
            let connection = graph
                .incoming(SUBNET_OUTPUT, &output.name)
                .ok_or_else(|| CodegenError::MissingOutputBinding(output.name.clone()))?;
            let target = output.to_socket(Direction::Output)?.code_var_name();
            program
                .output_bindings
                .push(Operation::assign(target, graph.source_var_name(connection)));
        }

        info!(
            "Compiled {} nodes into {} operations",
            program.nodes.len(),
            program.operations().count()
        );
        Ok(program)
    }

    fn compile_node(&self, graph: &VopGraph, node: &VopNode) -> CodegenResult<NodeProgram> {
        let ctx = graph.node_context(node)?;
        let adapter = self.registry.lookup(&node.kind)?;
        let operations = adapter.generate_code(&ctx)?;
        debug!(
            "Node '{}' ({}) produced {} operations",
            node.name,
            node.kind,
            operations.len()
        );

        let parameters = ctx
            .parameters()
            .map(ParameterDecl::from_socket)
            .collect::<CodegenResult<Vec<_>>>()?;

        let mut arguments = Vec::with_capacity(parameters.len());
        for input in ctx.inputs().values() {
            let connection = graph
                .incoming(&node.name, input.name())
                .ok_or_else(|| CodegenError::missing_socket(input.name()))?;
            arguments.push(graph.source_var_name(connection));
        }

        let mut locals = Vec::with_capacity(ctx.outputs().len());
        for output in ctx.outputs().values() {
            let local = ParameterDecl::local(local_var_name(&node.name, output.name()), output)?;
            arguments.push(local.name.clone());
            locals.push(local);
        }

        if !graph.has_consumers(&node.name) {
            warn!("Node '{}' ({}) has no connected outputs", node.name, node.kind);
        }

        Ok(NodeProgram {
            node_name: node.name.clone(),
            kind: node.kind.clone(),
            parameters,
            operations,
            arguments,
            locals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> VopGraph {
        let mut graph = VopGraph::new();
        graph.add_input("a", "float").add_input("b", "float");
        graph.add_output("out", "float");
        // Declared before its dependency on purpose
        graph
            .add_node(
                VopNode::new("mul", "multiply")
                    .with_input("input1", "float")
                    .with_input("input2", "float")
                    .with_output("product", "float"),
            )
            .unwrap();
        graph
            .add_node(
                VopNode::new("sum", "add")
                    .with_input("input1", "float")
                    .with_input("input2", "float")
                    .with_output("sum", "float"),
            )
            .unwrap();
        graph.connect("subinput", "a", "sum", "input1").unwrap();
        graph.connect("subinput", "b", "sum", "input2").unwrap();
        graph.connect("sum", "sum", "mul", "input1").unwrap();
        graph.connect("subinput", "b", "mul", "input2").unwrap();
        graph.connect("mul", "product", "suboutput", "out").unwrap();
        graph
    }

    #[test]
    fn test_execution_order_respects_dependencies() {
        let graph = chain_graph();
        let order = CodegenEngine::new().execution_order(&graph).unwrap();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_cycle_detected() {
        let mut graph = VopGraph::new();
        graph
            .add_node(
                VopNode::new("x", "add")
                    .with_input("input1", "float")
                    .with_output("sum", "float"),
            )
            .unwrap();
        graph
            .add_node(
                VopNode::new("y", "add")
                    .with_input("input1", "float")
                    .with_output("sum", "float"),
            )
            .unwrap();
        graph.connect("x", "sum", "y", "input1").unwrap();
        graph.connect("y", "sum", "x", "input1").unwrap();

        let result = CodegenEngine::new().compile(&graph);
        assert!(matches!(result, Err(CodegenError::CycleDetected)));
    }

    #[test]
    fn test_compile_resolves_arguments() {
        let program = CodegenEngine::new().compile(&chain_graph()).unwrap();

        let names: Vec<&str> = program.nodes.iter().map(|n| n.node_name.as_str()).collect();
        assert_eq!(names, vec!["sum", "mul"]);

        let mul = program.node("mul").unwrap();
        assert_eq!(mul.arguments, vec!["sum_sum", "_b", "mul_product"]);
        assert_eq!(mul.operations[0].to_string(), "_product = _input1 * _input2;");
        assert_eq!(program.output_bindings, vec![Operation::assign("_out", "mul_product")]);
    }

    #[test]
    fn test_unknown_kind_carries_node_identity() {
        let mut graph = VopGraph::new();
        graph.add_input("a", "float");
        graph
            .add_node(
                VopNode::new("fancy", "noise")
                    .with_input("pos", "vector")
                    .with_output("noise", "float"),
            )
            .unwrap();
        graph.connect("subinput", "a", "fancy", "pos").unwrap();

        let err = CodegenEngine::new().compile(&graph).unwrap_err();
        assert_eq!(err.node_identity(), Some(("fancy", "noise")));
        assert!(matches!(err.root_cause(), CodegenError::UnknownNodeKind(kind) if kind == "noise"));
    }

    #[test]
    fn test_unconnected_add_is_contract_violation() {
        let mut graph = VopGraph::new();
        graph
            .add_node(
                VopNode::new("lonely", "add")
                    .with_input("input1", "float")
                    .with_output("sum", "float"),
            )
            .unwrap();

        let err = CodegenEngine::new().compile(&graph).unwrap_err();
        assert_eq!(err.node_identity(), Some(("lonely", "add")));
        assert!(matches!(err.root_cause(), CodegenError::ContractViolation(_)));
    }

    #[test]
    fn test_string_socket_aborts_compilation() {
        let mut graph = VopGraph::new();
        graph.add_input("label", "string");
        graph
            .add_node(
                VopNode::new("cat", "add")
                    .with_input("input1", "string")
                    .with_output("sum", "string"),
            )
            .unwrap();
        graph.connect("subinput", "label", "cat", "input1").unwrap();

        let result = CodegenEngine::new().compile(&graph);
        assert!(matches!(result, Err(CodegenError::UnsupportedType(_))));
    }

    #[test]
    fn test_missing_output_binding() {
        let mut graph = chain_graph();
        graph.add_output("unused", "float");
        let result = CodegenEngine::new().compile(&graph);
        assert!(matches!(
            result,
            Err(CodegenError::MissingOutputBinding(name)) if name == "unused"
        ));
    }

    #[test]
    fn test_generate_node_wraps_errors() {
        let ctx = NodeContext::new().with_input("input1", "float").unwrap();
        let err = CodegenEngine::new().generate_node("add7", "add", &ctx).unwrap_err();
        assert_eq!(err.node_identity(), Some(("add7", "add")));
        assert!(matches!(err.root_cause(), CodegenError::MissingSocket(name) if name == "sum"));
    }

    #[test]
    fn test_custom_registry() {
        let registry = AdapterRegistry::new();
        let engine = CodegenEngine::with_registry(&registry);
        assert!(engine.registry().is_empty());
        let err = engine.compile(&chain_graph()).unwrap_err();
        assert!(matches!(err.root_cause(), CodegenError::UnknownNodeKind(_)));
    }
}
