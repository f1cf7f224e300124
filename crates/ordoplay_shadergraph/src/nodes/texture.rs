// SPDX-License-Identifier: MIT OR Apache-2.0
//! Texture sampling and procedural texture nodes.

use crate::error::ConstructionError;
use crate::node::{CodeContext, NodeCore, ShaderNode};
use crate::registry::NodeTypeId;
use crate::socket::DataType;

/// `out = texture2D(tex, uv)`
#[derive(Debug, Clone)]
pub struct SampleTextureNode {
    core: NodeCore,
}

impl SampleTextureNode {
    /// Create a sample node
    pub fn new(id: impl Into<String>) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::TextureSample.as_str())?;
        core.add_in_socket("tex", DataType::Sampler2D)?;
        core.add_in_socket("uv", DataType::Vector2)?;
        core.add_out_socket("color", DataType::Vector4)?;
        Ok(Self { core })
    }
}

impl ShaderNode for SampleTextureNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(format!(
            "vec4 {} = texture2D({}, {});",
            ctx.output(0)?,
            ctx.input(0)?,
            ctx.input(1)?
        ))
    }
}

/// Gradient noise helpers shared by every perlin noise node in a program
const PERLIN_NOISE_GLSL: &str = "\
vec2 perlinFade(vec2 t) {
  return t * t * t * (t * (t * 6.0 - 15.0) + 10.0);
}

vec2 perlinGradient(vec2 p) {
  float a = fract(sin(dot(p, vec2(127.1, 311.7))) * 43758.5453) * 6.2831853;
  return vec2(cos(a), sin(a));
}

float perlinNoise(vec2 p) {
  vec2 i = floor(p);
  vec2 f = fract(p);
  vec2 u = perlinFade(f);
  float n00 = dot(perlinGradient(i), f);
  float n10 = dot(perlinGradient(i + vec2(1.0, 0.0)), f - vec2(1.0, 0.0));
  float n01 = dot(perlinGradient(i + vec2(0.0, 1.0)), f - vec2(0.0, 1.0));
  float n11 = dot(perlinGradient(i + vec2(1.0, 1.0)), f - vec2(1.0, 1.0));
  return mix(mix(n00, n10, u.x), mix(n01, n11, u.x), u.y) * 0.5 + 0.5;
}
";

/// 2D gradient noise in `[0, 1]` sampled at `uv`
#[derive(Debug, Clone)]
pub struct PerlinNoiseNode {
    core: NodeCore,
}

impl PerlinNoiseNode {
    /// Create a noise node
    pub fn new(id: impl Into<String>) -> Result<Self, ConstructionError> {
        let mut core = NodeCore::new(id, NodeTypeId::TexturePerlinNoise.as_str())?;
        core.add_in_socket("uv", DataType::Vector2)?;
        core.add_out_socket("value", DataType::Float)?;
        Ok(Self { core })
    }
}

impl ShaderNode for PerlinNoiseNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_common_code(&self) -> String {
        PERLIN_NOISE_GLSL.to_string()
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(format!("float {} = perlinNoise({});", ctx.output(0)?, ctx.input(0)?))
    }
}
