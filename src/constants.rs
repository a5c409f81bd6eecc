//! Code generation constants and default values
//!
//! Centralized location for all hard-coded names shared between the adapters,
//! the graph loader and the emitter

/// Prefix put in front of every generated socket variable
pub const VAR_PREFIX: &str = "_";

/// Host data type vocabulary
pub mod types {
    /// Every type name accepted in socket declarations, in host order
    pub const HOST_TYPE_NAMES: &[&str] = &[
        "undef", "int", "float", "string", "vector", "color", "vector4", "bsdf", "shader",
        "surface",
    ];
}

/// Socket naming conventions of the built-in operator nodes
pub mod sockets {
    /// Input bound when a variadic operator has a single connection
    pub const FIRST_INPUT: &str = "input1";

    /// Output of the `add` node
    pub const SUM: &str = "sum";

    /// Output of the `subtract` node
    pub const DIFF: &str = "diff";

    /// Output of the `multiply` node
    pub const PRODUCT: &str = "product";

    /// Output of the `divide` node
    pub const DIV: &str = "div";
}

/// Reserved node names used by graph descriptions
pub mod graph {
    /// Pseudo node providing the graph inputs
    pub const SUBNET_INPUT: &str = "subinput";

    /// Pseudo node receiving the graph outputs
    pub const SUBNET_OUTPUT: &str = "suboutput";
}

/// Emitter defaults
pub mod emit {
    /// Default name of the generated graph function
    pub const DEFAULT_ENTRY_POINT: &str = "shade";

    /// Default prefix of generated per-node functions
    pub const DEFAULT_FUNCTION_PREFIX: &str = "vop";

    /// Default indentation width in spaces
    pub const DEFAULT_INDENT_WIDTH: usize = 4;
}
