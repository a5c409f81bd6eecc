//! Subtract node adapter

use super::functions::fold_inputs;
use crate::code::{BinaryOp, Operation};
use crate::constants::sockets::DIFF;
use crate::error::CodegenResult;
use crate::nodes::{AdapterMetadata, NodeAdapter, NodeCategory, NodeContext};

/// Subtracts every following input from the first one, writing `diff`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubtractAdapter;

impl NodeAdapter for SubtractAdapter {
    fn vop_type_name(&self) -> &'static str {
        "subtract"
    }

    fn metadata(&self) -> AdapterMetadata {
        AdapterMetadata::new(
            "subtract",
            "Subtract",
            NodeCategory::math(),
            "Subtracts the remaining inputs from the first",
        )
        .with_output_socket(DIFF)
    }

    fn emit(&self, ctx: &NodeContext) -> CodegenResult<Vec<Operation>> {
        fold_inputs(ctx, BinaryOp::Subtract, DIFF)
    }
}
