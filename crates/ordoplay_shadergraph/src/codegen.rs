// SPDX-License-Identifier: MIT OR Apache-2.0
//! GLSL ES 1.00 source generation for resolved graphs.

use crate::error::GraphError;
use crate::graph::{Graph, NodeEntry};
use crate::node::{AttributeKind, CodeContext};
use crate::socket::SocketId;
use std::collections::HashSet;
use std::fmt::Write as _;

/// Vertex position attribute
pub const ATTRIBUTE_POSITION: &str = "aPosition";
/// Vertex normal attribute
pub const ATTRIBUTE_NORMAL: &str = "aNormal";
/// Vertex texture coordinate attribute
pub const ATTRIBUTE_UV: &str = "aUV";
/// Model-view-projection matrix uniform
pub const UNIFORM_MVP: &str = "uMvpMatrix";
/// Normal passed from the vertex to the fragment stage
pub const VARYING_NORMAL: &str = "vNormal";
/// Texture coordinates passed from the vertex to the fragment stage
pub const VARYING_UV: &str = "vUV";

const PRECISION: &str = "precision mediump float;";
const INDENT: &str = "  ";

impl Graph {
    /// Vertex shader for this graph; adds the UV pass-through when needed
    pub fn generate_vert_code(&self) -> crate::Result<String> {
        let uses_uv = self.uses_uv()?;
        let mut out = String::new();
        let _ = writeln!(out, "{PRECISION}");
        let _ = writeln!(out, "attribute vec3 {ATTRIBUTE_POSITION};");
        let _ = writeln!(out, "attribute vec3 {ATTRIBUTE_NORMAL};");
        if uses_uv {
            let _ = writeln!(out, "attribute vec2 {ATTRIBUTE_UV};");
        }
        let _ = writeln!(out, "uniform mat4 {UNIFORM_MVP};");
        let _ = writeln!(out, "varying vec3 {VARYING_NORMAL};");
        if uses_uv {
            let _ = writeln!(out, "varying vec2 {VARYING_UV};");
        }
        out.push('\n');
        out.push_str("void main() {\n");
        let _ = writeln!(out, "{INDENT}gl_Position = {UNIFORM_MVP} * vec4({ATTRIBUTE_POSITION}, 1.0);");
        let _ = writeln!(out, "{INDENT}{VARYING_NORMAL} = {ATTRIBUTE_NORMAL};");
        if uses_uv {
            let _ = writeln!(out, "{INDENT}{VARYING_UV} = {ATTRIBUTE_UV};");
        }
        out.push_str("}\n");
        Ok(out)
    }

    /// Fragment shader computing every resolved node in dependency order
    pub fn generate_frag_code(&self) -> crate::Result<String> {
        let entries = self.resolved_entries()?;
        let resolved: HashSet<usize> = self.resolved.iter().flatten().copied().collect();

        let mut uniforms = Vec::new();
        let mut common = Vec::new();
        let mut common_types = HashSet::new();
        let mut body = Vec::new();

        for entry in &entries {
            let core = entry.node.core();

            if common_types.insert(core.type_id()) {
                let code = entry.node.generate_common_code();
                if !code.is_empty() {
                    common.push(code);
                }
            }

            for (index, slot) in core.uniforms().iter().enumerate() {
                uniforms.push(format!("uniform {} {};", slot.data_type(), core.uniform_name(index)?));
            }

            self.declare_unwired_inputs(entry, &mut body)?;

            let ctx = CodeContext::new(core.id(), &self.sockets, &entry.inputs, &entry.outputs);
            let code = entry.node.generate_code(&ctx)?;
            body.extend(code.lines().filter(|line| !line.is_empty()).map(str::to_string));

            for &output in &entry.outputs {
                for wire in self.wires.iter().filter(|wire| wire.source == output) {
                    if !self.socket_owner_in(wire.sink, &resolved) {
                        continue;
                    }
                    let code = wire.generate_code(&self.sockets)?;
                    if !code.is_empty() {
                        body.push(code);
                    }
                }
            }
        }

        let uses_uv = self.uses_uv()?;
        let mut out = String::new();
        let _ = writeln!(out, "{PRECISION}");
        for uniform in &uniforms {
            let _ = writeln!(out, "{uniform}");
        }
        let _ = writeln!(out, "varying vec3 {VARYING_NORMAL};");
        if uses_uv {
            let _ = writeln!(out, "varying vec2 {VARYING_UV};");
        }
        out.push('\n');
        for code in &common {
            out.push_str(code.trim_end());
            out.push_str("\n\n");
        }
        out.push_str("void main() {\n");
        for line in &body {
            let _ = writeln!(out, "{INDENT}{line}");
        }
        out.push_str("}\n");

        tracing::debug!(
            "Generated fragment code for '{}': {} statements, {} uniforms",
            self.name,
            body.len(),
            uniforms.len()
        );
        Ok(out)
    }

    fn uses_uv(&self) -> Result<bool, GraphError> {
        let entries = self.resolved_entries()?;
        Ok(entries
            .iter()
            .any(|entry| entry.node.core().attributes().contains(&AttributeKind::Uv)))
    }

    fn socket_owner_in(&self, socket: SocketId, nodes: &HashSet<usize>) -> bool {
        self.socket(socket).is_some_and(|socket| nodes.contains(&socket.owner()))
    }

    /// Zero-initialize inputs no wire feeds, so no undefined name is read
    fn declare_unwired_inputs(&self, entry: &NodeEntry, body: &mut Vec<String>) -> crate::Result<()> {
        for &input in &entry.inputs {
            if self.wires_into(input).next().is_some() {
                continue;
            }
            let Some(socket) = self.socket(input) else {
                continue;
            };
            let data_type = socket.data_type();
            let zero = data_type
                .zero_literal()
                .ok_or_else(|| GraphError::UnwiredSampler(socket.id().to_string()))?;
            body.push(format!("{data_type} {} = {zero};", socket.variable_name()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShaderGraphError;
    use crate::nodes::{
        BinaryMathNode, ColorOutputNode, FloatInputNode, PerlinNoiseNode, SampleTextureNode, TextureInputNode,
        UvInputNode,
    };
    use crate::socket::DataType;
    use crate::uniform::ImageHandle;

    fn connect(graph: &mut Graph, source: &str, out: usize, sink: &str, input: usize) {
        let source = graph.out_socket(source, out).unwrap();
        let sink = graph.in_socket(sink, input).unwrap();
        graph.add_wire(source, sink).unwrap();
    }

    #[test]
    fn test_float_add_round_trip() {
        let mut graph = Graph::new("sum");
        graph.add_node(FloatInputNode::new("a", 0.5).unwrap()).unwrap();
        graph.add_node(FloatInputNode::new("b", 0.25).unwrap()).unwrap();
        graph.add_node(BinaryMathNode::add("add", DataType::Float).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "a", 0, "add", 0);
        connect(&mut graph, "b", 0, "add", 1);
        connect(&mut graph, "add", 0, "out", 0);

        let frag = graph.generate_frag_code().unwrap();
        assert!(frag.contains("float a_out_float = 0.500000;"));
        assert!(frag.contains("float b_out_float = 0.250000;"));
        assert!(frag.contains("float add_out_float = add_in0_float + add_in1_float;"));
        assert!(frag.contains("vec3 out_in0_vec3 = vec3(add_out_float);"));

        let last = frag.lines().rev().find(|line| line.trim() != "}").unwrap();
        assert_eq!(last.trim(), "gl_FragColor = vec4(out_in0_vec3, 1.0);");

        // Declarations come before their uses
        let a = frag.find("a_out_float =").unwrap();
        let add = frag.find("add_out_float =").unwrap();
        assert!(a < add);

        let vert = graph.generate_vert_code().unwrap();
        assert!(!vert.contains(ATTRIBUTE_UV));
    }

    #[test]
    fn test_uv_texture_scenario() {
        let mut graph = Graph::new("textured");
        graph.add_node(UvInputNode::new("uv").unwrap()).unwrap();
        graph
            .add_node(TextureInputNode::new("tex", ImageHandle::new("brick.png")).unwrap())
            .unwrap();
        graph.add_node(SampleTextureNode::new("sample").unwrap()).unwrap();
        graph
            .add_node(ColorOutputNode::new("out", DataType::Vector4).unwrap())
            .unwrap();
        connect(&mut graph, "tex", 0, "sample", 0);
        connect(&mut graph, "uv", 0, "sample", 1);
        connect(&mut graph, "sample", 0, "out", 0);

        let vert = graph.generate_vert_code().unwrap();
        assert!(vert.contains("attribute vec2 aUV;"));
        assert!(vert.contains("varying vec2 vUV;"));
        assert!(vert.contains("vUV = aUV;"));

        let frag = graph.generate_frag_code().unwrap();
        assert!(frag.contains("uniform sampler2D utex_0_sampler2D;"));
        assert!(frag.contains("varying vec2 vUV;"));
        assert!(frag.contains("vec2 sample_uv_vec2 = vUV;"));
        assert!(frag.contains("texture2D(utex_0_sampler2D, sample_uv_vec2)"));
        assert!(frag.contains("gl_FragColor = out_in0_vec4;"));
        // The sampler is aliased, never copied
        assert!(!frag.contains("sampler2D sample_tex"));
    }

    #[test]
    fn test_unwired_output_is_zeroed() {
        let mut graph = Graph::new("unwired");
        graph.add_node(FloatInputNode::new("a", 1.0).unwrap()).unwrap();
        graph.add_node(FloatInputNode::new("b", 2.0).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();

        assert_eq!(graph.resolved_nodes().unwrap(), vec!["out"]);
        let frag = graph.generate_frag_code().unwrap();
        assert!(frag.contains("vec3 out_in0_vec3 = vec3(0.0);"));
        assert!(frag.contains("gl_FragColor = vec4(out_in0_vec3, 1.0);"));
        assert!(!frag.contains("a_out_float"));
    }

    #[test]
    fn test_unwired_sampler_is_an_error() {
        let mut graph = Graph::new("no_texture");
        graph.add_node(UvInputNode::new("uv").unwrap()).unwrap();
        graph.add_node(SampleTextureNode::new("sample").unwrap()).unwrap();
        graph
            .add_node(ColorOutputNode::new("out", DataType::Vector4).unwrap())
            .unwrap();
        connect(&mut graph, "uv", 0, "sample", 1);
        connect(&mut graph, "sample", 0, "out", 0);

        assert_eq!(
            graph.generate_frag_code(),
            Err(ShaderGraphError::Graph(GraphError::UnwiredSampler("sample_tex".to_string())))
        );
    }

    #[test]
    fn test_common_code_emitted_once_per_type() {
        let mut graph = Graph::new("noise");
        graph.add_node(UvInputNode::new("uv").unwrap()).unwrap();
        graph.add_node(PerlinNoiseNode::new("n1").unwrap()).unwrap();
        graph.add_node(PerlinNoiseNode::new("n2").unwrap()).unwrap();
        graph.add_node(BinaryMathNode::add("add", DataType::Float).unwrap()).unwrap();
        graph.add_node(ColorOutputNode::rgb("out").unwrap()).unwrap();
        connect(&mut graph, "uv", 0, "n1", 0);
        connect(&mut graph, "uv", 0, "n2", 0);
        connect(&mut graph, "n1", 0, "add", 0);
        connect(&mut graph, "n2", 0, "add", 1);
        connect(&mut graph, "add", 0, "out", 0);

        let frag = graph.generate_frag_code().unwrap();
        assert_eq!(frag.matches("float perlinNoise(vec2 p)").count(), 1);
        assert!(frag.find("float perlinNoise(vec2 p)") < frag.find("void main()"));
        assert!(frag.contains("float n1_value_float = perlinNoise(n1_uv_vec2);"));
        assert!(frag.contains("float n2_value_float = perlinNoise(n2_uv_vec2);"));
    }

    #[test]
    fn test_coercion_error_surfaces() {
        let mut graph = Graph::new("bad");
        graph
            .add_node(TextureInputNode::new("tex", ImageHandle::new("a.png")).unwrap())
            .unwrap();
        graph
            .add_node(ColorOutputNode::new("out", DataType::Vector4).unwrap())
            .unwrap();
        connect(&mut graph, "tex", 0, "out", 0);

        assert!(matches!(
            graph.generate_frag_code(),
            Err(ShaderGraphError::Coercion(_))
        ));
    }

    #[test]
    fn test_unresolved_graph_refuses_codegen() {
        let mut graph = Graph::new("two");
        graph.add_node(ColorOutputNode::rgb("a").unwrap()).unwrap();
        assert!(graph.add_node(ColorOutputNode::rgb("b").unwrap()).is_err());
        assert_eq!(
            graph.generate_frag_code(),
            Err(ShaderGraphError::Graph(GraphError::Unresolved))
        );
        assert!(graph.generate_vert_code().is_err());
    }

    #[test]
    fn test_empty_graph_has_empty_main() {
        let graph = Graph::new("empty");
        let frag = graph.generate_frag_code().unwrap();
        assert!(frag.ends_with("void main() {\n}\n"));
    }
}
