//! Divide node adapter

use super::functions::fold_inputs;
use crate::code::{BinaryOp, Operation};
use crate::constants::sockets::DIV;
use crate::error::CodegenResult;
use crate::nodes::{AdapterMetadata, NodeAdapter, NodeCategory, NodeContext};

/// Divides the first input by each following input, writing `div`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DivideAdapter;

impl NodeAdapter for DivideAdapter {
    fn vop_type_name(&self) -> &'static str {
        "divide"
    }

    fn metadata(&self) -> AdapterMetadata {
        AdapterMetadata::new(
            "divide",
            "Divide",
            NodeCategory::math(),
            "Divides the first input by the remaining inputs",
        )
        .with_output_socket(DIV)
    }

    fn emit(&self, ctx: &NodeContext) -> CodegenResult<Vec<Operation>> {
        fold_inputs(ctx, BinaryOp::Divide, DIV)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodegenError;

    #[test]
    fn test_divide_chain() {
        let ctx = NodeContext::new()
            .with_input("input1", "float")
            .unwrap()
            .with_input("input2", "float")
            .unwrap()
            .with_output("div", "float")
            .unwrap();

        let ops = DivideAdapter.generate_code(&ctx).unwrap();
        assert_eq!(ops[0].to_string(), "_div = _input1 / _input2;");
    }

    #[test]
    fn test_divide_wrong_output_name() {
        let ctx = NodeContext::new()
            .with_input("input1", "float")
            .unwrap()
            .with_output("sum", "float")
            .unwrap();

        let result = DivideAdapter.generate_code(&ctx);
        assert!(matches!(result, Err(CodegenError::MissingSocket(name)) if name == "div"));
    }
}
