// SPDX-License-Identifier: MIT OR Apache-2.0
//! Uniform slots declared by nodes and the values bound to them.

use crate::error::UniformError;
use crate::socket::DataType;
use serde::{Deserialize, Serialize};

/// Handle to an image the renderer uploads as a texture.
///
/// The core never decodes images; the handle is the asset key the host
/// resolves at upload time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    /// Create a handle from an asset key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The asset key
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Value carried by a uniform or a node parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShaderValue {
    /// Scalar
    Float(f32),
    /// 2D vector
    Vector2([f32; 2]),
    /// 3D vector
    Vector3([f32; 3]),
    /// 4D vector
    Vector4([f32; 4]),
    /// Texture image
    Sampler2D(ImageHandle),
}

impl ShaderValue {
    /// Get the data type for this value
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Float(_) => DataType::Float,
            Self::Vector2(_) => DataType::Vector2,
            Self::Vector3(_) => DataType::Vector3,
            Self::Vector4(_) => DataType::Vector4,
            Self::Sampler2D(_) => DataType::Sampler2D,
        }
    }

    /// Float components of the value, empty for images
    pub fn components(&self) -> &[f32] {
        match self {
            Self::Float(v) => std::slice::from_ref(v),
            Self::Vector2(v) => v,
            Self::Vector3(v) => v,
            Self::Vector4(v) => v,
            Self::Sampler2D(_) => &[],
        }
    }
}

/// A node's declaration of a shader uniform
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSlot {
    data_type: DataType,
    name: Option<String>,
    value: Option<ShaderValue>,
}

impl UniformSlot {
    /// Create an unnamed slot with no value
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            name: None,
            value: None,
        }
    }

    /// Create an unnamed slot holding `value`
    pub fn with_value(value: ShaderValue) -> Self {
        Self {
            data_type: value.data_type(),
            name: None,
            value: Some(value),
        }
    }

    /// Declared type
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Name assigned by graph resolution
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current value
    pub fn value(&self) -> Option<&ShaderValue> {
        self.value.as_ref()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Replace the value; it must match the declared type
    pub fn set_value(&mut self, index: usize, value: ShaderValue) -> Result<(), UniformError> {
        if value.data_type() != self.data_type {
            return Err(UniformError::WrongVariant {
                index,
                expected: self.data_type,
                got: value.data_type(),
            });
        }
        self.value = Some(value);
        Ok(())
    }
}

/// Name of uniform `index` of node `node_id`.
///
/// `u<nodeId>_<index>_<type>`: node ids are unique and the trailing two
/// segments never contain `_`, so names are distinct across the program.
pub fn uniform_name(node_id: &str, index: usize, data_type: DataType) -> String {
    format!("u{node_id}_{index}_{}", data_type.glsl_name())
}
