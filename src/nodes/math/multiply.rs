//! Multiply node adapter

use super::functions::fold_inputs;
use crate::code::{BinaryOp, Operation};
use crate::constants::sockets::PRODUCT;
use crate::error::CodegenResult;
use crate::nodes::{AdapterMetadata, NodeAdapter, NodeCategory, NodeContext};

/// Multiplies all bound inputs into the `product` output.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultiplyAdapter;

impl NodeAdapter for MultiplyAdapter {
    fn vop_type_name(&self) -> &'static str {
        "multiply"
    }

    fn metadata(&self) -> AdapterMetadata {
        AdapterMetadata::new(
            "multiply",
            "Multiply",
            NodeCategory::math(),
            "Multiplies all connected inputs together",
        )
        .with_output_socket(PRODUCT)
    }

    fn emit(&self, ctx: &NodeContext) -> CodegenResult<Vec<Operation>> {
        fold_inputs(ctx, BinaryOp::Multiply, PRODUCT)
    }
}
