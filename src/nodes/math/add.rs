//! Addition node adapter

use super::functions::fold_inputs;
use crate::code::{BinaryOp, Operation};
use crate::constants::sockets::SUM;
use crate::error::CodegenResult;
use crate::nodes::{AdapterMetadata, NodeAdapter, NodeCategory, NodeContext};

/// Sums every bound input into the `sum` output.
///
/// One bound input is copied through and must be named `input1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddAdapter;

impl NodeAdapter for AddAdapter {
    fn vop_type_name(&self) -> &'static str {
        "add"
    }

    fn metadata(&self) -> AdapterMetadata {
        AdapterMetadata::new(
            "add",
            "Add",
            NodeCategory::math(),
            "Adds all connected inputs together",
        )
        .with_output_socket(SUM)
    }

    fn emit(&self, ctx: &NodeContext) -> CodegenResult<Vec<Operation>> {
        fold_inputs(ctx, BinaryOp::Add, SUM)
    }
}
