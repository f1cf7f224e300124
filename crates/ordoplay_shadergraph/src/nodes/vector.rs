// SPDX-License-Identifier: MIT OR Apache-2.0
//! Vector assembly and disassembly.

use crate::error::ConstructionError;
use crate::node::{CodeContext, NodeCore, ShaderNode};
use crate::registry::NodeTypeId;
use crate::socket::DataType;

const CHANNELS: [(&str, &str); 4] = [("r", "x"), ("g", "y"), ("b", "z"), ("a", "w")];

/// Four floats in, one `vec4` out
#[derive(Debug, Clone)]
pub struct CombineNode {
    core: NodeCore,
}

impl CombineNode {
    /// Create a combine node
    pub fn new(id: impl Into<String>) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::MathCombine.as_str())?;
        for (channel, _) in CHANNELS {
            core.add_in_socket(channel, DataType::Float)?;
        }
        core.add_out_socket("vec", DataType::Vector4)?;
        Ok(Self { core })
    }
}

impl ShaderNode for CombineNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(format!(
            "vec4 {} = vec4({}, {}, {}, {});",
            ctx.output(0)?,
            ctx.input(0)?,
            ctx.input(1)?,
            ctx.input(2)?,
            ctx.input(3)?
        ))
    }
}

/// One `vec4` in, four floats out
#[derive(Debug, Clone)]
pub struct SeparateNode {
    core: NodeCore,
}

impl SeparateNode {
    /// Create a separate node
    pub fn new(id: impl Into<String>) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::MathSeparate.as_str())?;
        core.add_in_socket("vec", DataType::Vector4)?;
        for (channel, _) in CHANNELS {
            core.add_out_socket(channel, DataType::Float)?;
        }
        Ok(Self { core })
    }
}

impl ShaderNode for SeparateNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        let vector = ctx.input(0)?;
        let mut lines = Vec::with_capacity(CHANNELS.len());
        for (index, (_, component)) in CHANNELS.iter().enumerate() {
            lines.push(format!("float {} = {vector}.{component};", ctx.output(index)?));
        }
        Ok(lines.join("\n"))
    }
}
