//! Shared code generation for variadic arithmetic nodes

use crate::code::{BinaryOp, Expr, Operation};
use crate::constants::sockets::FIRST_INPUT;
use crate::error::{CodegenError, CodegenResult};
use crate::nodes::NodeContext;

/// Left-fold every bound input with `op` and assign the result to `output`.
///
/// A single bound input must be named `input1` and is passed straight through.
/// Operands keep input declaration order; reordering them changes the generated text.
pub fn fold_inputs(ctx: &NodeContext, op: BinaryOp, output: &str) -> CodegenResult<Vec<Operation>> {
    if ctx.inputs().is_empty() {
        return Err(CodegenError::contract(format!(
            "node writing '{}' requires at least one bound input",
            output
        )));
    }

    let target = ctx.output(output)?.code_var_name();

    let value = if ctx.inputs().len() == 1 {
        Expr::var(ctx.input(FIRST_INPUT)?.code_var_name())
    } else {
        let mut vars = ctx.inputs().values().map(|socket| socket.code_var_name());
        let first = Expr::var(vars.next().unwrap_or_default());
        vars.fold(first, |acc, var| Operation::binary(op, acc, var).into())
    };

    Ok(vec![Operation::assign(target, value)])
}
