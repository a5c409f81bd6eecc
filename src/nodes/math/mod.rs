//! Arithmetic operator adapters

pub mod add;
pub mod divide;
mod functions;
pub mod multiply;
pub mod subtract;

pub use add::AddAdapter;
pub use divide::DivideAdapter;
pub use functions::fold_inputs;
pub use multiply::MultiplyAdapter;
pub use subtract::SubtractAdapter;

use crate::error::CodegenResult;
use crate::nodes::AdapterRegistry;

/// Register every arithmetic adapter
pub fn register_all(registry: &mut AdapterRegistry) -> CodegenResult<()> {
    registry.register::<AddAdapter>()?;
    registry.register::<SubtractAdapter>()?;
    registry.register::<MultiplyAdapter>()?;
    registry.register::<DivideAdapter>()?;
    Ok(())
}
