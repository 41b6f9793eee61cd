use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer, e.g., pixels.
    Uint8,
    /// Boolean.
    Bool,
}

impl Dtype {
    /// Name of the type as numpy spells it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Bool => "bool",
        }
    }

    /// `true` for integer and boolean types.
    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::Float32 | Self::Float64)
    }
}

impl Default for Dtype {
    fn default() -> Self {
        Self::Float64
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
