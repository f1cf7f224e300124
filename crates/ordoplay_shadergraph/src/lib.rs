// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader graph compiler for `OrdoPlay`.
//!
//! This crate turns a directed graph of shading operations into GLSL ES
//! vertex and fragment source:
//! - Input nodes (UV, time, constants, textures, camera position)
//! - Math and vector nodes
//! - Texture sampling and procedural noise
//! - A single color output
//!
//! ## Architecture
//!
//! The compiler is built on a small graph model with:
//! - Typed sockets stored in a graph-owned arena
//! - Wires that coerce between socket types
//! - Resolution from the output node into a dependency order
//! - Code generation over the resolved nodes
//! - A per-frame hook refreshing uniform values for the renderer

pub mod codegen;
pub mod error;
pub mod graph;
pub mod material;
pub mod node;
pub mod nodes;
pub mod registry;
pub mod runtime;
pub mod socket;
pub mod uniform;
pub mod wire;

pub use error::{
    BuildError, CoercionError, ConstructionError, GraphError, Result, ShaderGraphError, UniformError,
};
pub use graph::{Graph, GraphEdit};
pub use material::{ProgramOrigin, ProgramSource, ShaderGraphMaterial};
pub use node::{AttributeKind, CodeContext, NodeCore, ShaderNode};
pub use registry::{build_graph, GraphDescriptor, NodeCategory, NodeDescriptor, NodeTypeId, WireDescriptor};
pub use runtime::{FrameClock, FrameContext, UniformBinding, UniformBindingRecord};
pub use socket::{DataType, Socket, SocketDirection, SocketId};
pub use uniform::{ImageHandle, ShaderValue};
pub use wire::Wire;
