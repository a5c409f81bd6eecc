use pretty_assertions::assert_eq;
use serde_json::json;
use slangvop::nodes::{AdapterMetadata, NodeCategory};
use slangvop::{
    compile_to_slang, AdapterRegistry, CodegenEngine, CodegenError, CodegenResult, CompilerConfig,
    NodeAdapter, NodeContext, Operation, SlangEmitter, VopGraph,
};

const TINTED_COLOR: &str = include_str!("../demos/tinted_color.json");

fn graph_from(value: serde_json::Value) -> VopGraph {
    VopGraph::from_json_str(&value.to_string()).unwrap()
}

#[test]
fn test_compile_demo_graph() {
    let graph = VopGraph::from_json_str(TINTED_COLOR).unwrap();
    let source = compile_to_slang(&graph, &CompilerConfig::default()).unwrap();

    let expected = "\
// Generated by slangvop

void vop_add_mix(float3 _input1, float3 _input2, out float3 _sum)
{
    _sum = _input1 + _input2;
}

void vop_multiply_scale(float3 _input1, float _input2, out float3 _product)
{
    _product = _input1 * _input2;
}

void shade(float3 _baseColor, float3 _tint, float _gain, out float3 _result)
{
    float3 mix_sum;
    float3 scale_product;
    // mix (add)
    vop_add_mix(_baseColor, _tint, mix_sum);
    // scale (multiply)
    vop_multiply_scale(mix_sum, _gain, scale_product);
    _result = scale_product;
}
";
    assert_eq!(source, expected);
}

#[test]
fn test_compilation_is_deterministic() {
    let graph = VopGraph::from_json_str(TINTED_COLOR).unwrap();
    let config = CompilerConfig::default();
    assert_eq!(
        compile_to_slang(&graph, &config).unwrap(),
        compile_to_slang(&graph, &config).unwrap()
    );
}

#[test]
fn test_variadic_add_keeps_connection_order() {
    let graph = graph_from(json!({
        "inputs": [
            { "name": "a", "type": "float" },
            { "name": "b", "type": "float" },
            { "name": "c", "type": "float" }
        ],
        "outputs": [{ "name": "total", "type": "float" }],
        "nodes": [{
            "name": "add1",
            "kind": "add",
            "inputs": [
                { "name": "input1", "type": "float" },
                { "name": "input2", "type": "float" },
                { "name": "input3", "type": "float" }
            ],
            "outputs": [{ "name": "sum", "type": "float" }]
        }],
        "connections": [
            { "from_node": "subinput", "from_socket": "c", "to_node": "add1", "to_socket": "input3" },
            { "from_node": "subinput", "from_socket": "a", "to_node": "add1", "to_socket": "input1" },
            { "from_node": "subinput", "from_socket": "b", "to_node": "add1", "to_socket": "input2" },
            { "from_node": "add1", "from_socket": "sum", "to_node": "suboutput", "to_socket": "total" }
        ]
    }));

    let program = CodegenEngine::new().compile(&graph).unwrap();
    let add = program.node("add1").unwrap();
    assert_eq!(
        add.operations,
        vec![Operation::assign(
            "_sum",
            Operation::add(Operation::add("_input1", "_input2"), "_input3")
        )]
    );
    assert_eq!(add.arguments, vec!["_a", "_b", "_c", "add1_sum"]);
}

#[test]
fn test_string_output_reports_node() {
    let graph = graph_from(json!({
        "inputs": [{ "name": "x", "type": "float" }],
        "nodes": [{
            "name": "concat",
            "kind": "add",
            "inputs": [{ "name": "input1", "type": "float" }],
            "outputs": [{ "name": "sum", "type": "string" }]
        }],
        "connections": [
            { "from_node": "subinput", "from_socket": "x", "to_node": "concat", "to_socket": "input1" }
        ]
    }));

    let err = compile_to_slang(&graph, &CompilerConfig::default()).unwrap_err();
    assert_eq!(err.node_identity(), Some(("concat", "add")));
    assert!(matches!(err.root_cause(), CodegenError::UnsupportedType(_)));
}

#[test]
fn test_unknown_type_name_reports_node() {
    let graph = graph_from(json!({
        "inputs": [{ "name": "x", "type": "float" }],
        "nodes": [{
            "name": "xform",
            "kind": "multiply",
            "inputs": [{ "name": "input1", "type": "matrix" }],
            "outputs": [{ "name": "product", "type": "float" }]
        }],
        "connections": [
            { "from_node": "subinput", "from_socket": "x", "to_node": "xform", "to_socket": "input1" }
        ]
    }));

    let err = CodegenEngine::new().compile(&graph).unwrap_err();
    assert_eq!(err.node_identity(), Some(("xform", "multiply")));
    assert!(matches!(err.root_cause(), CodegenError::UnknownType(name) if name == "matrix"));
}

#[test]
fn test_nodes_with_colliding_identifiers_are_rejected() {
    let node = |name: &str| {
        json!({
            "name": name,
            "kind": "add",
            "inputs": [{ "name": "input1", "type": "float" }],
            "outputs": [{ "name": "sum", "type": "float" }]
        })
    };
    let value = json!({
        "inputs": [{ "name": "x", "type": "float" }],
        "nodes": [node("my-node"), node("my_node")],
        "connections": [
            { "from_node": "subinput", "from_socket": "x", "to_node": "my-node", "to_socket": "input1" },
            { "from_node": "subinput", "from_socket": "x", "to_node": "my_node", "to_socket": "input1" }
        ]
    });

    let result = VopGraph::from_json_str(&value.to_string());
    assert!(matches!(result, Err(CodegenError::IdentifierCollision { .. })));
}

#[test]
fn test_graph_interface_with_colliding_variables_is_rejected() {
    let value = json!({
        "inputs": [
            { "name": "base_color", "type": "float" },
            { "name": "baseColor", "type": "float" }
        ],
        "outputs": [{ "name": "base_color", "type": "float" }],
        "connections": [
            { "from_node": "subinput", "from_socket": "base_color", "to_node": "suboutput", "to_socket": "base_color" }
        ]
    });

    let result = VopGraph::from_json_str(&value.to_string());
    assert!(matches!(
        result,
        Err(CodegenError::IdentifierCollision { identifier, .. }) if identifier == "_baseColor"
    ));
}

#[test]
fn test_malformed_json() {
    let result = VopGraph::from_json_str("{ \"nodes\": [ { \"name\": 3 } ] }");
    assert!(matches!(result, Err(CodegenError::Json(_))));
}

#[derive(Default)]
struct NegateAdapter;

impl NodeAdapter for NegateAdapter {
    fn vop_type_name(&self) -> &'static str {
        "negate"
    }

    fn metadata(&self) -> AdapterMetadata {
        AdapterMetadata::new(
            "negate",
            "Negate",
            NodeCategory::math(),
            "Flips the sign of its input",
        )
        .with_output_socket("negated")
    }

    fn emit(&self, ctx: &NodeContext) -> CodegenResult<Vec<Operation>> {
        let input = ctx.input("val")?.code_var_name();
        let output = ctx.output("negated")?.code_var_name();
        Ok(vec![Operation::assign(output, format!("-{}", input))])
    }
}

#[test]
fn test_custom_adapter_in_registry() {
    let mut registry = AdapterRegistry::with_builtin_adapters().unwrap();
    registry.register::<NegateAdapter>().unwrap();

    let graph = graph_from(json!({
        "inputs": [{ "name": "v", "type": "vector" }],
        "outputs": [{ "name": "out", "type": "vector" }],
        "nodes": [{
            "name": "neg",
            "kind": "negate",
            "inputs": [{ "name": "val", "type": "vector" }],
            "outputs": [{ "name": "negated", "type": "vector" }]
        }],
        "connections": [
            { "from_node": "subinput", "from_socket": "v", "to_node": "neg", "to_socket": "val" },
            { "from_node": "neg", "from_socket": "negated", "to_node": "suboutput", "to_socket": "out" }
        ]
    }));

    let program = CodegenEngine::with_registry(&registry).compile(&graph).unwrap();
    let source = SlangEmitter::default().emit_node_function(&program.nodes[0]);
    assert_eq!(
        source,
        "void vop_negate_neg(float3 _val, out float3 _negated)\n{\n    _negated = -_val;\n}\n"
    );
}
