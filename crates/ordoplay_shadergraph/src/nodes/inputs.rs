// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input nodes: constants, uniforms and vertex varyings.
//!
//! Uniform-backed inputs (time, camera position, texture) never declare a
//! local variable. Their output socket aliases the uniform name, so consumers
//! read the uniform directly.

use crate::codegen::VARYING_UV;
use crate::error::{ConstructionError, UniformError};
use crate::node::{check_finite, float_literal, AttributeKind, CodeContext, NodeCore, ShaderNode};
use crate::registry::NodeTypeId;
use crate::runtime::FrameContext;
use crate::socket::DataType;
use crate::uniform::{ImageHandle, ShaderValue};

/// Interpolated texture coordinates from the vertex stage
#[derive(Debug, Clone)]
pub struct UvInputNode {
    core: NodeCore,
}

impl UvInputNode {
    /// Create a UV input
    pub fn new(id: impl Into<String>) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::InputUv.as_str())?;
        core.add_out_socket("out", DataType::Vector2)?;
        core.require_attribute(AttributeKind::Uv);
        Ok(Self { core })
    }
}

impl ShaderNode for UvInputNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, _ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(String::new())
    }

    fn output_alias(&self, index: usize) -> Result<Option<String>, UniformError> {
        Ok((index == 0).then(|| VARYING_UV.to_string()))
    }
}

/// Seconds since the renderer started, refreshed every frame
#[derive(Debug, Clone)]
pub struct TimeInputNode {
    core: NodeCore,
}

impl TimeInputNode {
    /// Create a time input starting at zero
    pub fn new(id: impl Into<String>) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::InputTime.as_str())?;
        core.add_uniform_with_value(ShaderValue::Float(0.0));
        core.add_out_socket("out", DataType::Float)?;
        Ok(Self { core })
    }
}

impl ShaderNode for TimeInputNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, _ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(String::new())
    }

    fn output_alias(&self, index: usize) -> Result<Option<String>, UniformError> {
        if index != 0 {
            return Ok(None);
        }
        self.core.uniform_name(0).map(|name| Some(name.to_string()))
    }

    fn update_on_draw(&mut self, frame: &FrameContext) -> Result<(), UniformError> {
        self.core.set_uniform_value(0, ShaderValue::Float(frame.seconds()))
    }
}

/// Camera eye position, refreshed every frame
#[derive(Debug, Clone)]
pub struct CameraPositionInputNode {
    core: NodeCore,
}

impl CameraPositionInputNode {
    /// Create a camera position input at the origin
    pub fn new(id: impl Into<String>) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::InputCameraPosition.as_str())?;
        core.add_uniform_with_value(ShaderValue::Vector3([0.0; 3]));
        core.add_out_socket("out", DataType::Vector3)?;
        Ok(Self { core })
    }
}

impl ShaderNode for CameraPositionInputNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, _ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(String::new())
    }

    fn output_alias(&self, index: usize) -> Result<Option<String>, UniformError> {
        if index != 0 {
            return Ok(None);
        }
        self.core.uniform_name(0).map(|name| Some(name.to_string()))
    }

    fn update_on_draw(&mut self, frame: &FrameContext) -> Result<(), UniformError> {
        self.core.set_uniform_value(0, ShaderValue::Vector3(frame.eye_position))
    }
}

/// Constant float written as a literal
#[derive(Debug, Clone)]
pub struct FloatInputNode {
    core: NodeCore,
    value: f32,
}

impl FloatInputNode {
    /// Create a float constant
    pub fn new(id: impl Into<String>, value: f32) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::InputFloat.as_str())?;
        check_finite(core.id(), &[value])?;
        core.add_out_socket("out", DataType::Float)?;
        Ok(Self { core, value })
    }

    /// The constant
    pub fn value(&self) -> f32 {
        self.value
    }
}

impl ShaderNode for FloatInputNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(format!("float {} = {};", ctx.output(0)?, float_literal(self.value)))
    }
}

/// Constant vector written as a constructor of literals
#[derive(Debug, Clone)]
pub struct VectorInputNode {
    core: NodeCore,
    value: ShaderValue,
}

impl VectorInputNode {
    /// Create a vector constant; the value's type picks the node kind
    pub fn new(id: impl Into<String>, value: ShaderValue) -> Result<Self, ConstructionError> {
        let id = id.into();
        let type_id = match value.data_type() {
            DataType::Vector2 => NodeTypeId::InputVector2,
            DataType::Vector3 => NodeTypeId::InputVector3,
            DataType::Vector4 => NodeTypeId::InputVector4,
            data_type @ (DataType::Float | DataType::Sampler2D) => {
                return Err(ConstructionError::UnsupportedType {
                    type_id: "input_vector".to_string(),
                    data_type,
                })
            }
        };
        let mut core = NodeCore::new(id, type_id.as_str())?;
        check_finite(core.id(), value.components())?;
        core.add_out_socket("out", value.data_type())?;
        Ok(Self { core, value })
    }

    /// The constant
    pub fn value(&self) -> &ShaderValue {
        &self.value
    }
}

impl ShaderNode for VectorInputNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        let ty = self.value.data_type().glsl_name();
        let parts: Vec<String> = self.value.components().iter().copied().map(float_literal).collect();
        Ok(format!("{ty} {} = {ty}({});", ctx.output(0)?, parts.join(", ")))
    }
}

/// Texture bound to a sampler uniform
#[derive(Debug, Clone)]
pub struct TextureInputNode {
    core: NodeCore,
}

impl TextureInputNode {
    /// Create a texture input bound to `image`
    pub fn new(id: impl Into<String>, image: ImageHandle) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::InputTexture.as_str())?;
        core.add_uniform_with_value(ShaderValue::Sampler2D(image));
        core.add_out_socket("out", DataType::Sampler2D)?;
        Ok(Self { core })
    }

    /// Currently bound image
    pub fn image(&self) -> Option<&ImageHandle> {
        match self.core.uniform_value(0) {
            Ok(ShaderValue::Sampler2D(image)) => Some(image),
            _ => None,
        }
    }
}

impl ShaderNode for TextureInputNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, _ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(String::new())
    }

    fn output_alias(&self, index: usize) -> Result<Option<String>, UniformError> {
        if index != 0 {
            return Ok(None);
        }
        self.core.uniform_name(0).map(|name| Some(name.to_string()))
    }
}
