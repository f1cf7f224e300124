// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output node writing the fragment color.

use crate::error::ConstructionError;
use crate::node::{CodeContext, NodeCore, ShaderNode};
use crate::registry::NodeTypeId;
use crate::socket::DataType;

/// Writes `gl_FragColor`; the graph's single sink
#[derive(Debug, Clone)]
pub struct ColorOutputNode {
    core: NodeCore,
    data_type: DataType,
}

impl ColorOutputNode {
    /// Create a color output taking a `vec3` (opaque) or `vec4` (with alpha)
    pub fn new(id: impl Into<String>, data_type: DataType) -> Result<Self, ConstructionError> {
        let type_id = NodeTypeId::OutputColor.as_str();
        if !matches!(data_type, DataType::Vector3 | DataType::Vector4) {
            return Err(ConstructionError::UnsupportedType {
                type_id: type_id.to_string(),
                data_type,
            });
        }
        let mut core = NodeCore::new(id, type_id)?;
        core.add_in_socket("in0", data_type)?;
        core.mark_output_sink();
        Ok(Self { core, data_type })
    }

    /// Opaque RGB output
    pub fn rgb(id: impl Into<String>) -> Result<Self, ConstructionError> {
        Self::new(id, DataType::Vector3)
    }
}

impl ShaderNode for ColorOutputNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        let color = ctx.input(0)?;
        Ok(match self.data_type {
            DataType::Vector4 => format!("gl_FragColor = {color};"),
            _ => format!("gl_FragColor = vec4({color}, 1.0);"),
        })
    }
}
