// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket definitions for node inputs/outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type that can flow through sockets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Scalar float
    Float,
    /// 2D vector
    Vector2,
    /// 3D vector
    Vector3,
    /// 4D vector / color
    Vector4,
    /// Texture sampler (opaque)
    Sampler2D,
}

impl DataType {
    /// All data types, scalar first
    pub const ALL: [DataType; 5] = [
        Self::Float,
        Self::Vector2,
        Self::Vector3,
        Self::Vector4,
        Self::Sampler2D,
    ];

    /// GLSL type keyword
    pub fn glsl_name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vector2 => "vec2",
            Self::Vector3 => "vec3",
            Self::Vector4 => "vec4",
            Self::Sampler2D => "sampler2D",
        }
    }

    /// Number of float components, `None` for opaque types
    pub fn components(self) -> Option<usize> {
        match self {
            Self::Float => Some(1),
            Self::Vector2 => Some(2),
            Self::Vector3 => Some(3),
            Self::Vector4 => Some(4),
            Self::Sampler2D => None,
        }
    }

    /// Opaque handles are aliased, never copied or converted
    pub fn is_opaque(self) -> bool {
        matches!(self, Self::Sampler2D)
    }

    /// GLSL expression for the zero value of this type
    pub fn zero_literal(self) -> Option<String> {
        match self {
            Self::Float => Some("0.0".to_string()),
            Self::Vector2 | Self::Vector3 | Self::Vector4 => {
                Some(format!("{}(0.0)", self.glsl_name()))
            }
            Self::Sampler2D => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glsl_name())
    }
}

/// Check that a string is usable as a shader identifier
///
/// Letters, digits and underscores, not starting with a digit.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Handle of a socket in a graph's socket arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SocketId(pub usize);

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Consumes a value (sink side of a wire)
    Input,
    /// Produces a value (source side of a wire)
    Output,
}

/// Socket declaration made by a node at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketSpec {
    /// Local name, unique within the node
    pub name: String,
    /// Declared data type
    pub data_type: DataType,
}

/// A typed connection point owned by exactly one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socket {
    id: String,
    data_type: DataType,
    direction: SocketDirection,
    owner: usize,
    overridden_variable_name: Option<String>,
}

impl Socket {
    /// Create a socket for the node at `owner` in the graph's node table
    ///
    /// The id is `<owner_id>_<local_name>`; both parts were validated when the
    /// owning node was constructed.
    pub fn new(
        owner: usize,
        owner_id: &str,
        local_name: &str,
        data_type: DataType,
        direction: SocketDirection,
    ) -> Self {
        Self {
            id: format!("{owner_id}_{local_name}"),
            data_type,
            direction,
            owner,
            overridden_variable_name: None,
        }
    }

    /// Socket id, unique within the graph
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared data type
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Direction of the socket on its node
    pub fn direction(&self) -> SocketDirection {
        self.direction
    }

    /// Index of the owning node in the graph's node table
    pub fn owner(&self) -> usize {
        self.owner
    }

    /// Variable name used for this socket in generated code
    ///
    /// The override wins when set, otherwise `<id>_<type>`.
    pub fn variable_name(&self) -> String {
        match &self.overridden_variable_name {
            Some(name) => name.clone(),
            None => format!("{}_{}", self.id, self.data_type.glsl_name()),
        }
    }

    /// Whether the variable name is currently aliased to another identifier
    pub fn is_overridden(&self) -> bool {
        self.overridden_variable_name.is_some()
    }

    /// Use the given identifier instead of the generated one.
    ///
    /// Only graph resolution calls this; names read before resolution has
    /// finished for the whole graph may be stale.
    pub fn override_variable_name(&mut self, name: impl Into<String>) {
        self.overridden_variable_name = Some(name.into());
    }

    /// Go back to the generated variable name
    pub fn clear_override(&mut self) {
        self.overridden_variable_name = None;
    }
}
