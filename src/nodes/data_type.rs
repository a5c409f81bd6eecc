//! Socket data types and their Slang spellings

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Value kinds that can flow through VOP sockets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Undef,
    Int,
    Float,
    String,
    Color,
    Vector,
    Vector4,
    Matrix,
    Matrix3,
    Bsdf,
    Shader,
    Surface,
}

impl DataType {
    /// Parse a host type name.
    ///
    /// `color` resolves to [`DataType::Vector`]. `matrix` and `matrix3` are not part of
    /// the host vocabulary, so those variants can only be constructed directly.
    pub fn from_host_name(name: &str) -> CodegenResult<DataType> {
        match name {
            "undef" => Ok(DataType::Undef),
            "int" => Ok(DataType::Int),
            "float" => Ok(DataType::Float),
            "string" => Ok(DataType::String),
            "vector" => Ok(DataType::Vector),
            "color" => Ok(DataType::Vector),
            "vector4" => Ok(DataType::Vector4),
            "bsdf" => Ok(DataType::Bsdf),
            "shader" => Ok(DataType::Shader),
            "surface" => Ok(DataType::Surface),
            other => Err(CodegenError::UnknownType(other.to_string())),
        }
    }
}

impl FromStr for DataType {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::from_host_name(s)
    }
}

/// Whether a value of this type can exist at runtime in the generated shader
pub fn is_target_representable(data_type: DataType) -> bool {
    data_type != DataType::String
}

/// Slang spelling of a data type
pub fn to_target_type_string(data_type: DataType) -> CodegenResult<&'static str> {
    let spelling = match data_type {
        DataType::Int => "int",
        DataType::Float => "float",
        DataType::Color | DataType::Vector => "float3",
        DataType::Vector4 => "float4",
        DataType::Matrix => "float4x4",
        DataType::Matrix3 => "float3x3",
        DataType::Bsdf => "bsdf",
        DataType::Shader => "shader",
        DataType::Surface => "surface",
        // Unresolved sockets still need a spelling so signatures stay well formed
        DataType::Undef => "undef",
        DataType::String => return Err(CodegenError::UnsupportedType(data_type)),
    };
    Ok(spelling)
}
