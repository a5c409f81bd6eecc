//! Socket types for node connections

use super::data_type::DataType;
use crate::constants::VAR_PREFIX;
use crate::error::CodegenResult;
use serde::{Deserialize, Serialize};

/// Direction of a socket (input, output or both)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Input,
    Output,
    InOut,
}

impl Direction {
    /// Qualifier used when the socket is declared as a function parameter
    pub fn type_qualifier(self) -> Option<&'static str> {
        match self {
            Direction::Input => None,
            Direction::Output => Some("out"),
            Direction::InOut => Some("inout"),
        }
    }
}

/// A typed connection point on a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socket {
    name: String,
    data_type: DataType,
    direction: Direction,
}

impl Socket {
    /// Creates a socket from a host type name
    pub fn new(
        name: impl Into<String>,
        type_name: &str,
        direction: Direction,
    ) -> CodegenResult<Self> {
        Ok(Self::with_type(name, DataType::from_host_name(type_name)?, direction))
    }

    /// Creates a socket from an already resolved type
    pub fn with_type(name: impl Into<String>, data_type: DataType, direction: Direction) -> Self {
        Self {
            name: name.into(),
            data_type,
            direction,
        }
    }

    /// Host-side socket name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Variable name used for this socket in generated code
    pub fn code_var_name(&self) -> String {
        code_var_name(&self.name)
    }

    /// Parameter qualifier (`out`, `inout`), `None` for inputs
    pub fn type_qualifier(&self) -> Option<&'static str> {
        self.direction.type_qualifier()
    }

    /// Checks if this socket is an input
    pub fn is_input(&self) -> bool {
        matches!(self.direction, Direction::Input)
    }

    /// Checks if this socket is an output
    pub fn is_output(&self) -> bool {
        matches!(self.direction, Direction::Output)
    }
}

/// `snake_case` host name to `_camelCase` code identifier.
///
/// Never returns `socket_name` itself: names already in that form (`_`, `_Abc`)
/// get a second prefix.
pub fn code_var_name(socket_name: &str) -> String {
    let name = format!("{}{}", VAR_PREFIX, to_camel_case(socket_name));
    if name == socket_name {
        format!("{}{}", VAR_PREFIX, name)
    } else {
        name
    }
}

/// Converts an underscore separated name to camel case.
///
/// The first character is lower-cased and every component after the first is
/// title-cased: its first letter upper-cased, the remaining letters lower-cased.
pub fn to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    let lowered = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };

    let mut components = lowered.split('_');
    let mut result = components.next().unwrap_or_default().to_string();
    for component in components {
        result.push_str(&title_case(component));
    }
    result
}

// A letter starts a new word unless it directly follows another letter
fn title_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut previous_cased = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if previous_cased {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            result.push(c);
            previous_cased = false;
        }
    }
    result
}
