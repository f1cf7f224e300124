// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node kinds by type id, and building graphs from flat descriptors.
//!
//! Descriptors are what an editor (or a description file) hands over: an
//! order-irrelevant list of nodes and a list of wires addressing sockets by
//! node id and socket index.

use crate::error::{BuildError, ConstructionError};
use crate::graph::Graph;
use crate::node::ShaderNode;
use crate::nodes::{
    BinaryMathNode, BinaryOp, CameraPositionInputNode, ColorOutputNode, CombineNode, DotNode, FloatInputNode,
    PerlinNoiseNode, SampleTextureNode, SeparateNode, TextureInputNode, TimeInputNode, UnaryFn, UnaryMathNode,
    UvInputNode, VectorInputNode,
};
use crate::socket::DataType;
use crate::uniform::{ImageHandle, ShaderValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Every node kind the factory can construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTypeId {
    /// Interpolated texture coordinates
    InputUv,
    /// Seconds since start
    InputTime,
    /// Float constant
    InputFloat,
    /// `vec2` constant
    InputVector2,
    /// `vec3` constant
    InputVector3,
    /// `vec4` constant
    InputVector4,
    /// Sampler bound to an image
    InputTexture,
    /// Camera eye position
    InputCameraPosition,
    /// Addition
    MathAdd,
    /// Subtraction
    MathSubtract,
    /// Component-wise multiplication
    MathMultiply,
    /// Dot product
    MathDot,
    /// Sine
    MathSine,
    /// Cosine
    MathCosine,
    /// Tangent
    MathTangent,
    /// Fractional part
    MathFrac,
    /// Four floats into a `vec4`
    MathCombine,
    /// A `vec4` into four floats
    MathSeparate,
    /// Texture lookup
    TextureSample,
    /// Procedural gradient noise
    TexturePerlinNoise,
    /// Fragment color output
    OutputColor,
}

/// Node category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Constants, uniforms and varyings
    Input,
    /// Arithmetic and vector operations
    Math,
    /// Texture sampling and procedural textures
    Texture,
    /// Shader outputs
    Output,
}

impl NodeTypeId {
    /// All node kinds, in palette order
    pub const ALL: [NodeTypeId; 21] = [
        Self::InputUv,
        Self::InputTime,
        Self::InputFloat,
        Self::InputVector2,
        Self::InputVector3,
        Self::InputVector4,
        Self::InputTexture,
        Self::InputCameraPosition,
        Self::MathAdd,
        Self::MathSubtract,
        Self::MathMultiply,
        Self::MathDot,
        Self::MathSine,
        Self::MathCosine,
        Self::MathTangent,
        Self::MathFrac,
        Self::MathCombine,
        Self::MathSeparate,
        Self::TextureSample,
        Self::TexturePerlinNoise,
        Self::OutputColor,
    ];

    /// The type id string nodes of this kind carry
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputUv => "input_uv",
            Self::InputTime => "input_time",
            Self::InputFloat => "input_float",
            Self::InputVector2 => "input_vector2",
            Self::InputVector3 => "input_vector3",
            Self::InputVector4 => "input_vector4",
            Self::InputTexture => "input_texture",
            Self::InputCameraPosition => "input_camera_position",
            Self::MathAdd => "math_add",
            Self::MathSubtract => "math_subtract",
            Self::MathMultiply => "math_multiply",
            Self::MathDot => "math_dot",
            Self::MathSine => "math_sine",
            Self::MathCosine => "math_cosine",
            Self::MathTangent => "math_tangent",
            Self::MathFrac => "math_frac",
            Self::MathCombine => "math_combine",
            Self::MathSeparate => "math_separate",
            Self::TextureSample => "texture_sample",
            Self::TexturePerlinNoise => "texture_perlin_noise",
            Self::OutputColor => "output_color",
        }
    }

    /// Look up a kind by its type id string
    pub fn from_type_id(type_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == type_id)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::InputUv => "UV",
            Self::InputTime => "Time",
            Self::InputFloat => "Float",
            Self::InputVector2 => "Vector2",
            Self::InputVector3 => "Vector3",
            Self::InputVector4 => "Vector4",
            Self::InputTexture => "Texture",
            Self::InputCameraPosition => "Camera Position",
            Self::MathAdd => "Add",
            Self::MathSubtract => "Subtract",
            Self::MathMultiply => "Multiply",
            Self::MathDot => "Dot Product",
            Self::MathSine => "Sine",
            Self::MathCosine => "Cosine",
            Self::MathTangent => "Tangent",
            Self::MathFrac => "Fraction",
            Self::MathCombine => "Combine",
            Self::MathSeparate => "Separate",
            Self::TextureSample => "Sample Texture",
            Self::TexturePerlinNoise => "Perlin Noise",
            Self::OutputColor => "Color Output",
        }
    }

    /// Palette category
    pub fn category(self) -> NodeCategory {
        match self {
            Self::InputUv
            | Self::InputTime
            | Self::InputFloat
            | Self::InputVector2
            | Self::InputVector3
            | Self::InputVector4
            | Self::InputTexture
            | Self::InputCameraPosition => NodeCategory::Input,
            Self::MathAdd
            | Self::MathSubtract
            | Self::MathMultiply
            | Self::MathDot
            | Self::MathSine
            | Self::MathCosine
            | Self::MathTangent
            | Self::MathFrac
            | Self::MathCombine
            | Self::MathSeparate => NodeCategory::Math,
            Self::TextureSample | Self::TexturePerlinNoise => NodeCategory::Texture,
            Self::OutputColor => NodeCategory::Output,
        }
    }
}

/// One node of a graph description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Node id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    /// Node kind
    pub type_id: NodeTypeId,
    /// Type parameter for math and output nodes
    #[serde(default)]
    pub data_type: Option<DataType>,
    /// Value parameter for constant and texture inputs
    #[serde(default)]
    pub value: Option<ShaderValue>,
}

impl NodeDescriptor {
    /// Describe a node of the given kind with default parameters
    pub fn new(type_id: NodeTypeId) -> Self {
        Self {
            id: None,
            type_id,
            data_type: None,
            value: None,
        }
    }

    /// Set the node id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the type parameter
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Set the value parameter
    pub fn with_value(mut self, value: ShaderValue) -> Self {
        self.value = Some(value);
        self
    }
}

/// One wire of a graph description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDescriptor {
    /// Producing node id
    pub source_node: String,
    /// Output socket index on the producing node
    pub source_socket: usize,
    /// Consuming node id
    pub sink_node: String,
    /// Input socket index on the consuming node
    pub sink_socket: usize,
}

impl WireDescriptor {
    /// Describe a wire between two sockets
    pub fn new(source_node: impl Into<String>, source_socket: usize, sink_node: impl Into<String>, sink_socket: usize) -> Self {
        Self {
            source_node: source_node.into(),
            source_socket,
            sink_node: sink_node.into(),
            sink_socket,
        }
    }
}

fn default_graph_name() -> String {
    "Untitled".to_string()
}

/// A complete graph description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// Graph name
    #[serde(default = "default_graph_name")]
    pub name: String,
    /// Nodes, in any order
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    /// Wires, in any order
    #[serde(default)]
    pub wires: Vec<WireDescriptor>,
}

impl GraphDescriptor {
    /// Create an empty description
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            wires: Vec::new(),
        }
    }

    /// Parse a RON description
    pub fn from_ron(text: &str) -> Result<Self, BuildError> {
        ron::from_str(text).map_err(|e| BuildError::Parse(e.to_string()))
    }

    /// Parse a JSON description
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        serde_json::from_str(text).map_err(|e| BuildError::Parse(e.to_string()))
    }

    /// Serialize as pretty RON
    pub fn to_ron(&self) -> Result<String, BuildError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| BuildError::Parse(e.to_string()))
    }

    /// Build the described graph
    pub fn build(&self) -> crate::Result<Graph> {
        build_graph(self)
    }
}

/// Fresh node id that is a valid shader identifier
pub fn generate_node_id() -> String {
    format!("n{}", Uuid::new_v4().simple())
}

fn parameter(id: &str, expected: DataType, value: Option<&ShaderValue>) -> Result<Option<ShaderValue>, ConstructionError> {
    match value {
        Some(value) if value.data_type() != expected => Err(ConstructionError::ParameterType {
            node: id.to_string(),
            expected,
            got: value.data_type(),
        }),
        value => Ok(value.cloned()),
    }
}

fn float_parameter(id: &str, value: Option<&ShaderValue>) -> Result<f32, ConstructionError> {
    Ok(match parameter(id, DataType::Float, value)? {
        Some(ShaderValue::Float(v)) => v,
        _ => 0.0,
    })
}

fn vector_parameter(id: &str, expected: DataType, value: Option<&ShaderValue>) -> Result<ShaderValue, ConstructionError> {
    Ok(match parameter(id, expected, value)? {
        Some(value) => value,
        None => match expected {
            DataType::Vector2 => ShaderValue::Vector2([0.0; 2]),
            DataType::Vector3 => ShaderValue::Vector3([0.0; 3]),
            _ => ShaderValue::Vector4([0.0; 4]),
        },
    })
}

fn image_parameter(id: &str, value: Option<&ShaderValue>) -> Result<ImageHandle, ConstructionError> {
    match parameter(id, DataType::Sampler2D, value)? {
        Some(ShaderValue::Sampler2D(image)) => Ok(image),
        _ => Err(ConstructionError::MissingParameter {
            node: id.to_string(),
            expected: DataType::Sampler2D,
        }),
    }
}

/// Construct the node a descriptor names, under the given id
pub fn create_node(descriptor: &NodeDescriptor, id: &str) -> crate::Result<Box<dyn ShaderNode>> {
    let math_type = descriptor.data_type.unwrap_or(DataType::Vector4);
    let value = descriptor.value.as_ref();
    let node: Box<dyn ShaderNode> = match descriptor.type_id {
        NodeTypeId::InputUv => Box::new(UvInputNode::new(id)?),
        NodeTypeId::InputTime => Box::new(TimeInputNode::new(id)?),
        NodeTypeId::InputFloat => Box::new(FloatInputNode::new(id, float_parameter(id, value)?)?),
        NodeTypeId::InputVector2 => Box::new(VectorInputNode::new(id, vector_parameter(id, DataType::Vector2, value)?)?),
        NodeTypeId::InputVector3 => Box::new(VectorInputNode::new(id, vector_parameter(id, DataType::Vector3, value)?)?),
        NodeTypeId::InputVector4 => Box::new(VectorInputNode::new(id, vector_parameter(id, DataType::Vector4, value)?)?),
        NodeTypeId::InputTexture => Box::new(TextureInputNode::new(id, image_parameter(id, value)?)?),
        NodeTypeId::InputCameraPosition => Box::new(CameraPositionInputNode::new(id)?),
        NodeTypeId::MathAdd => Box::new(BinaryMathNode::new(id, BinaryOp::Add, math_type)?),
        NodeTypeId::MathSubtract => Box::new(BinaryMathNode::new(id, BinaryOp::Subtract, math_type)?),
        NodeTypeId::MathMultiply => Box::new(BinaryMathNode::new(id, BinaryOp::Multiply, math_type)?),
        NodeTypeId::MathDot => Box::new(DotNode::new(id, math_type)?),
        NodeTypeId::MathSine => Box::new(UnaryMathNode::new(id, UnaryFn::Sine, math_type)?),
        NodeTypeId::MathCosine => Box::new(UnaryMathNode::new(id, UnaryFn::Cosine, math_type)?),
        NodeTypeId::MathTangent => Box::new(UnaryMathNode::new(id, UnaryFn::Tangent, math_type)?),
        NodeTypeId::MathFrac => Box::new(UnaryMathNode::new(id, UnaryFn::Frac, math_type)?),
        NodeTypeId::MathCombine => Box::new(CombineNode::new(id)?),
        NodeTypeId::MathSeparate => Box::new(SeparateNode::new(id)?),
        NodeTypeId::TextureSample => Box::new(SampleTextureNode::new(id)?),
        NodeTypeId::TexturePerlinNoise => Box::new(PerlinNoiseNode::new(id)?),
        NodeTypeId::OutputColor => Box::new(ColorOutputNode::new(id, descriptor.data_type.unwrap_or(DataType::Vector3))?),
    };
    Ok(node)
}

/// Build a graph from a description, resolving once at the end
pub fn build_graph(descriptor: &GraphDescriptor) -> crate::Result<Graph> {
    let mut graph = Graph::new(&descriptor.name);
    let mut known = HashSet::new();
    let mut edit = graph.begin_edit();

    for node in &descriptor.nodes {
        let id = node.id.clone().unwrap_or_else(generate_node_id);
        edit.add_boxed_node(create_node(node, &id)?)?;
        known.insert(id);
    }

    for wire in &descriptor.wires {
        for node in [&wire.source_node, &wire.sink_node] {
            if !known.contains(node) {
                return Err(BuildError::UnknownNode(node.clone()).into());
            }
        }
        let source = edit.out_socket(&wire.source_node, wire.source_socket)?;
        let sink = edit.in_socket(&wire.sink_node, wire.sink_socket)?;
        edit.add_wire(source, sink)?;
    }

    edit.commit()?;
    tracing::debug!(
        "Built graph '{}' from {} nodes and {} wires",
        descriptor.name,
        descriptor.nodes.len(),
        descriptor.wires.len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShaderGraphError;
    use crate::socket::is_valid_identifier;

    const PULSE: &str = r#"(
        name: "pulse",
        nodes: [
            (id: Some("out"), type_id: output_color),
            (id: Some("sine"), type_id: math_sine, data_type: Some(Float)),
            (id: Some("time"), type_id: input_time),
        ],
        wires: [
            (source_node: "sine", source_socket: 0, sink_node: "out", sink_socket: 0),
            (source_node: "time", source_socket: 0, sink_node: "sine", sink_socket: 0),
        ],
    )"#;

    #[test]
    fn test_type_ids_match_serde_names() {
        for kind in NodeTypeId::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(NodeTypeId::from_type_id(kind.as_str()), Some(kind));
            assert!(is_valid_identifier(kind.as_str()));
        }
        assert_eq!(NodeTypeId::from_type_id("math_pow"), None);
    }

    #[test]
    fn test_factory_builds_every_kind() {
        for kind in NodeTypeId::ALL {
            let mut descriptor = NodeDescriptor::new(kind);
            if kind == NodeTypeId::InputTexture {
                descriptor = descriptor.with_value(ShaderValue::Sampler2D(ImageHandle::new("a.png")));
            }
            let node = create_node(&descriptor, "n").unwrap();
            assert_eq!(node.core().type_id(), kind.as_str());
            assert_eq!(node.core().is_output_sink(), kind.category() == NodeCategory::Output);
        }
    }

    #[test]
    fn test_factory_defaults() {
        let add = create_node(&NodeDescriptor::new(NodeTypeId::MathAdd), "add").unwrap();
        assert_eq!(add.core().out_sockets()[0].data_type, DataType::Vector4);

        let out = create_node(&NodeDescriptor::new(NodeTypeId::OutputColor), "out").unwrap();
        assert_eq!(out.core().in_sockets()[0].data_type, DataType::Vector3);
    }

    #[test]
    fn test_factory_checks_parameters() {
        let wrong = NodeDescriptor::new(NodeTypeId::InputFloat).with_value(ShaderValue::Vector2([1.0, 2.0]));
        assert!(matches!(
            create_node(&wrong, "f"),
            Err(ShaderGraphError::Construction(ConstructionError::ParameterType { .. }))
        ));

        let texture = NodeDescriptor::new(NodeTypeId::InputTexture);
        assert!(matches!(
            create_node(&texture, "t"),
            Err(ShaderGraphError::Construction(ConstructionError::MissingParameter { .. }))
        ));

        let sampler_math = NodeDescriptor::new(NodeTypeId::MathDot).with_data_type(DataType::Sampler2D);
        assert!(create_node(&sampler_math, "d").is_err());
    }

    #[test]
    fn test_build_from_ron() {
        let descriptor = GraphDescriptor::from_ron(PULSE).unwrap();
        let graph = build_graph(&descriptor).unwrap();
        assert_eq!(graph.name, "pulse");
        assert_eq!(graph.resolved_nodes().unwrap(), vec!["time", "sine", "out"]);

        let frag = graph.generate_frag_code().unwrap();
        assert!(frag.contains("uniform float utime_0_float;"));
        assert!(frag.contains("float sine_in0_float = utime_0_float;"));
    }

    #[test]
    fn test_build_from_json() {
        let json = r#"{
            "name": "tint",
            "nodes": [
                {"id": "color", "type_id": "input_vector3", "value": {"Vector3": [1.0, 0.5, 0.0]}},
                {"id": "out", "type_id": "output_color"}
            ],
            "wires": [
                {"source_node": "color", "source_socket": 0, "sink_node": "out", "sink_socket": 0}
            ]
        }"#;
        let graph = GraphDescriptor::from_json(json).unwrap().build().unwrap();
        let frag = graph.generate_frag_code().unwrap();
        assert!(frag.contains("vec3 color_out_vec3 = vec3(1.000000, 0.500000, 0.000000);"));
    }

    #[test]
    fn test_ron_round_trip_preserves_description() {
        let descriptor = GraphDescriptor::from_ron(PULSE).unwrap();
        let text = descriptor.to_ron().unwrap();
        assert_eq!(GraphDescriptor::from_ron(&text).unwrap(), descriptor);
    }

    #[test]
    fn test_bad_references_rejected() {
        let mut descriptor = GraphDescriptor::new("bad");
        descriptor.nodes.push(NodeDescriptor::new(NodeTypeId::InputFloat).with_id("a"));
        descriptor.nodes.push(NodeDescriptor::new(NodeTypeId::OutputColor).with_id("out"));
        descriptor.wires.push(WireDescriptor::new("a", 0, "missing", 0));
        assert_eq!(
            build_graph(&descriptor).unwrap_err(),
            ShaderGraphError::Build(BuildError::UnknownNode("missing".to_string()))
        );

        descriptor.wires[0] = WireDescriptor::new("a", 3, "out", 0);
        assert!(matches!(
            build_graph(&descriptor),
            Err(ShaderGraphError::Build(BuildError::SocketIndex { index: 3, direction: "out", .. }))
        ));
    }

    #[test]
    fn test_generated_ids_are_identifiers() {
        let id = generate_node_id();
        assert!(is_valid_identifier(&id));
        assert_ne!(id, generate_node_id());

        let mut descriptor = GraphDescriptor::new("anon");
        descriptor.nodes.push(NodeDescriptor::new(NodeTypeId::InputTime));
        descriptor.nodes.push(NodeDescriptor::new(NodeTypeId::InputTime));
        assert_eq!(build_graph(&descriptor).unwrap().node_count(), 2);
    }

    #[test]
    fn test_parse_error_reported() {
        assert!(matches!(GraphDescriptor::from_ron("(name: )"), Err(BuildError::Parse(_))));
        assert!(matches!(GraphDescriptor::from_json("{"), Err(BuildError::Parse(_))));
    }
}
