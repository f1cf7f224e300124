// SPDX-License-Identifier: MIT OR Apache-2.0
//! The node contract shared by every shader node kind.
//!
//! A node declares its fixed shape (sockets, uniform slots, vertex
//! attributes, output flag) once, at construction, through [`NodeCore`].
//! After that only uniform values change. The graph turns socket specs into
//! arena sockets when the node is added, and hands the node a
//! [`CodeContext`] to look up variable names when generating code.

use crate::error::{BuildError, ConstructionError, UniformError};
use crate::runtime::FrameContext;
use crate::socket::{is_valid_identifier, DataType, Socket, SocketId, SocketSpec};
use crate::uniform::{ShaderValue, UniformSlot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertex attribute a node needs the renderer to supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Texture coordinates
    Uv,
}

/// Shape and mutable uniform state common to all nodes
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCore {
    id: String,
    type_id: String,
    in_sockets: Vec<SocketSpec>,
    out_sockets: Vec<SocketSpec>,
    uniforms: Vec<UniformSlot>,
    attributes: Vec<AttributeKind>,
    output_sink: bool,
}

impl NodeCore {
    /// Create an empty node shape. Fails fast on invalid identifiers.
    pub fn new(id: impl Into<String>, type_id: impl Into<String>) -> Result<Self, ConstructionError> {
        let id = id.into();
        let type_id = type_id.into();
        if !is_valid_identifier(&id) {
            return Err(ConstructionError::InvalidIdentifier {
                kind: "node id",
                value: id,
            });
        }
        if !is_valid_identifier(&type_id) {
            return Err(ConstructionError::InvalidIdentifier {
                kind: "node typeId",
                value: type_id,
            });
        }
        Ok(Self {
            id,
            type_id,
            in_sockets: Vec::new(),
            out_sockets: Vec::new(),
            uniforms: Vec::new(),
            attributes: Vec::new(),
            output_sink: false,
        })
    }

    fn socket_spec(name: &str, data_type: DataType) -> Result<SocketSpec, ConstructionError> {
        if !is_valid_identifier(name) {
            return Err(ConstructionError::InvalidIdentifier {
                kind: "socket name",
                value: name.to_string(),
            });
        }
        Ok(SocketSpec {
            name: name.to_string(),
            data_type,
        })
    }

    /// Declare an input socket
    pub fn add_in_socket(&mut self, name: &str, data_type: DataType) -> Result<(), ConstructionError> {
        self.in_sockets.push(Self::socket_spec(name, data_type)?);
        Ok(())
    }

    /// Declare an output socket
    pub fn add_out_socket(&mut self, name: &str, data_type: DataType) -> Result<(), ConstructionError> {
        self.out_sockets.push(Self::socket_spec(name, data_type)?);
        Ok(())
    }

    /// Declare a uniform slot, returning its index
    pub fn add_uniform(&mut self, data_type: DataType) -> usize {
        self.uniforms.push(UniformSlot::new(data_type));
        self.uniforms.len() - 1
    }

    /// Declare a uniform slot with an initial value, returning its index
    pub fn add_uniform_with_value(&mut self, value: ShaderValue) -> usize {
        self.uniforms.push(UniformSlot::with_value(value));
        self.uniforms.len() - 1
    }

    /// Declare a required vertex attribute
    pub fn require_attribute(&mut self, kind: AttributeKind) {
        if !self.attributes.contains(&kind) {
            self.attributes.push(kind);
        }
    }

    /// Flag this node as the shader's final output
    pub fn mark_output_sink(&mut self) {
        self.output_sink = true;
    }

    /// Unique node id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Node kind identifier
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Declared input sockets, in order
    pub fn in_sockets(&self) -> &[SocketSpec] {
        &self.in_sockets
    }

    /// Declared output sockets, in order
    pub fn out_sockets(&self) -> &[SocketSpec] {
        &self.out_sockets
    }

    /// Uniform slots, in order
    pub fn uniforms(&self) -> &[UniformSlot] {
        &self.uniforms
    }

    /// Required vertex attributes
    pub fn attributes(&self) -> &[AttributeKind] {
        &self.attributes
    }

    /// Whether this node is the shader output
    pub fn is_output_sink(&self) -> bool {
        self.output_sink
    }

    fn slot(&self, index: usize) -> Result<&UniformSlot, UniformError> {
        self.uniforms.get(index).ok_or(UniformError::MissingSlot(index))
    }

    /// Name of uniform `index`; unnamed before the first resolution
    pub fn uniform_name(&self, index: usize) -> Result<&str, UniformError> {
        self.slot(index)?.name().ok_or(UniformError::Unnamed(index))
    }

    /// Current value of uniform `index`
    pub fn uniform_value(&self, index: usize) -> Result<&ShaderValue, UniformError> {
        self.slot(index)?.value().ok_or(UniformError::Unset(index))
    }

    /// Replace the value of uniform `index`
    pub fn set_uniform_value(&mut self, index: usize, value: ShaderValue) -> Result<(), UniformError> {
        self.uniforms
            .get_mut(index)
            .ok_or(UniformError::MissingSlot(index))?
            .set_value(index, value)
    }

    pub(crate) fn set_uniform_name(&mut self, index: usize, name: String) -> Result<(), UniformError> {
        self.uniforms
            .get_mut(index)
            .ok_or(UniformError::MissingSlot(index))?
            .set_name(name);
        Ok(())
    }
}

/// Variable names of one node's sockets during code generation
pub struct CodeContext<'a> {
    node: &'a str,
    sockets: &'a [Socket],
    inputs: &'a [SocketId],
    outputs: &'a [SocketId],
}

impl<'a> CodeContext<'a> {
    /// Create a context over a socket arena
    pub fn new(node: &'a str, sockets: &'a [Socket], inputs: &'a [SocketId], outputs: &'a [SocketId]) -> Self {
        Self {
            node,
            sockets,
            inputs,
            outputs,
        }
    }

    fn lookup(&self, ids: &[SocketId], index: usize, direction: &'static str) -> Result<String, BuildError> {
        ids.get(index)
            .and_then(|id| self.sockets.get(id.0))
            .map(Socket::variable_name)
            .ok_or_else(|| BuildError::SocketIndex {
                node: self.node.to_string(),
                direction,
                index,
            })
    }

    /// Variable name of input socket `index`
    pub fn input(&self, index: usize) -> Result<String, BuildError> {
        self.lookup(self.inputs, index, "in")
    }

    /// Variable name of output socket `index`
    pub fn output(&self, index: usize) -> Result<String, BuildError> {
        self.lookup(self.outputs, index, "out")
    }
}

/// Capabilities every shader node kind provides
pub trait ShaderNode: fmt::Debug + Send {
    /// Shared shape and uniform state
    fn core(&self) -> &NodeCore;

    /// Mutable access for uniform values and resolution
    fn core_mut(&mut self) -> &mut NodeCore;

    /// Helper GLSL emitted once per `type_id`, before `main`
    fn generate_common_code(&self) -> String {
        String::new()
    }

    /// The node's own statements inside `main`
    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String>;

    /// Identifier output socket `index` aliases instead of a local variable
    fn output_alias(&self, _index: usize) -> Result<Option<String>, UniformError> {
        Ok(None)
    }

    /// Per-frame refresh before uniforms are uploaded
    fn update_on_draw(&mut self, _frame: &FrameContext) -> Result<(), UniformError> {
        Ok(())
    }
}

/// Format a float as a GLSL literal with a decimal point
pub fn float_literal(value: f32) -> String {
    format!("{value:.6}")
}

/// Reject values that have no GLSL literal form
pub fn check_finite(node: &str, values: &[f32]) -> Result<(), ConstructionError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(ConstructionError::NonFiniteLiteral {
            node: node.to_string(),
            value,
        }),
        None => Ok(()),
    }
}
