// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material wrapper turning a graph into a renderable program.
//!
//! A material compiles its graph once. If that fails it falls back to a
//! plain normal-shaded program for good, so a broken graph costs one warning
//! instead of a compile attempt every frame.

use crate::codegen::{ATTRIBUTE_NORMAL, ATTRIBUTE_POSITION, UNIFORM_MVP, VARYING_NORMAL};
use crate::error::GraphError;
use crate::graph::Graph;
use crate::node::AttributeKind;
use crate::runtime::{FrameContext, UniformBinding, UniformBindingRecord};
use crate::uniform::ShaderValue;

/// Where a program's source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramOrigin {
    /// Generated from the material's graph
    Graph,
    /// Built-in default used after a failed compile
    Fallback,
}

/// Vertex and fragment source ready for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramSource {
    /// Vertex shader source
    pub vertex: String,
    /// Fragment shader source
    pub fragment: String,
    /// Whether the renderer must supply the UV attribute
    pub uses_uv: bool,
    /// Graph or fallback
    pub origin: ProgramOrigin,
}

impl ProgramSource {
    /// Generate both stages from a graph with an output node
    pub fn compile(graph: &Graph) -> crate::Result<Self> {
        if graph.output_node().is_none() {
            return Err(GraphError::NoOutputNode.into());
        }
        let program = Self {
            vertex: graph.generate_vert_code()?,
            fragment: graph.generate_frag_code()?,
            uses_uv: graph.requires_attribute(AttributeKind::Uv),
            origin: ProgramOrigin::Graph,
        };
        tracing::debug!(
            "Compiled graph '{}' ({} + {} bytes)",
            graph.name,
            program.vertex.len(),
            program.fragment.len()
        );
        Ok(program)
    }

    /// Normal-shaded default program
    pub fn fallback() -> Self {
        let vertex = format!(
            "precision mediump float;
attribute vec3 {ATTRIBUTE_POSITION};
attribute vec3 {ATTRIBUTE_NORMAL};
uniform mat4 {UNIFORM_MVP};
varying vec3 {VARYING_NORMAL};

void main() {{
  gl_Position = {UNIFORM_MVP} * vec4({ATTRIBUTE_POSITION}, 1.0);
  {VARYING_NORMAL} = {ATTRIBUTE_NORMAL};
}}
"
        );
        let fragment = format!(
            "precision mediump float;
varying vec3 {VARYING_NORMAL};

void main() {{
  float light = max(dot(normalize({VARYING_NORMAL}), normalize(vec3(0.5, 1.0, 0.75))), 0.0);
  gl_FragColor = vec4(vec3(0.2 + 0.8 * light), 1.0);
}}
"
        );
        Self {
            vertex,
            fragment,
            uses_uv: false,
            origin: ProgramOrigin::Fallback,
        }
    }
}

fn compile_or_fallback(graph: &Graph) -> ProgramSource {
    ProgramSource::compile(graph).unwrap_or_else(|err| {
        tracing::warn!("Failed to compile shader graph '{}', using fallback: {}", graph.name, err);
        ProgramSource::fallback()
    })
}

/// A graph plus its cached program
#[derive(Debug)]
pub struct ShaderGraphMaterial {
    graph: Graph,
    program: Option<ProgramSource>,
}

impl ShaderGraphMaterial {
    /// Wrap a graph; nothing is compiled until first use
    pub fn new(graph: Graph) -> Self {
        Self { graph, program: None }
    }

    /// The underlying graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Program for this material, compiling on first call
    pub fn program(&mut self) -> &ProgramSource {
        let graph = &self.graph;
        self.program.get_or_insert_with(|| compile_or_fallback(graph))
    }

    /// Whether the material ended up on the fallback program
    pub fn is_fallback(&mut self) -> bool {
        self.program().origin == ProgramOrigin::Fallback
    }

    /// Rebind a uniform value, e.g. a texture image
    pub fn set_uniform_value(&mut self, node_id: &str, slot: usize, value: ShaderValue) -> crate::Result<()> {
        self.graph.set_uniform_value(node_id, slot, value)
    }

    /// Refresh per-frame uniforms and return what the renderer must upload
    pub fn pre_draw(&mut self, frame: &FrameContext) -> crate::Result<Vec<UniformBindingRecord>> {
        if self.is_fallback() {
            return Ok(Vec::new());
        }
        self.graph.update_on_draw(frame)?;
        Ok(self
            .graph
            .uniform_bindings()?
            .iter()
            .map(UniformBinding::to_record)
            .collect())
    }
}
