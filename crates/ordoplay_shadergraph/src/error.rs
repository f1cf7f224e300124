// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for graph construction, resolution and code generation.

use crate::socket::DataType;
use thiserror::Error;

/// Error raised while constructing a node
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// A node id, type id or socket name is not a valid shader identifier
    #[error("Invalid {kind}: {value:?}")]
    InvalidIdentifier {
        /// What the identifier names ("node id", "node typeId", "socket name")
        kind: &'static str,
        /// The rejected string
        value: String,
    },

    /// The node kind does not accept this data type parameter
    #[error("Unsupported type for {type_id}: {data_type}")]
    UnsupportedType {
        /// Node type id
        type_id: String,
        /// Rejected data type
        data_type: DataType,
    },

    /// A literal value cannot be written as GLSL
    #[error("Non-finite literal for node {node}: {value}")]
    NonFiniteLiteral {
        /// Node id
        node: String,
        /// Rejected value
        value: f32,
    },

    /// A node parameter has the wrong kind of value
    #[error("Parameter of node {node} must be {expected}, got {got}")]
    ParameterType {
        /// Node id
        node: String,
        /// Expected value type
        expected: DataType,
        /// Supplied value type
        got: DataType,
    },

    /// A required node parameter was not supplied
    #[error("Node {node} requires a {expected} parameter")]
    MissingParameter {
        /// Node id
        node: String,
        /// Expected value type
        expected: DataType,
    },
}

/// Error raised while mutating or resolving a graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node with the same id is already in the graph
    #[error("the same node id already exists : {0}")]
    DuplicateNode(String),

    /// More than one node is flagged as the shader output
    #[error("More than one output node found: {}", .0.join(", "))]
    MultipleOutputs(Vec<String>),

    /// An input socket is the sink of more than one wire
    #[error("in socket has more than 1 wires connected: {socket} ({count} wires)")]
    MultipleWires {
        /// Socket id
        socket: String,
        /// Number of wires into the socket
        count: usize,
    },

    /// The graph reachable from the output node contains a cycle
    #[error("Graph contains a cycle through node {0}")]
    Cycle(String),

    /// A wire refers to a socket that is not in this graph
    #[error("Socket not found: {0}")]
    UnknownSocket(usize),

    /// A wire source must be an output socket and its sink an input socket
    #[error("Wire must run from an out socket to an in socket: {source_id} -> {sink_id}")]
    WireDirection {
        /// Source socket id
        source_id: String,
        /// Sink socket id
        sink_id: String,
    },

    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// The graph has no valid resolution (last resolve failed or an edit is pending)
    #[error("Graph is not resolved")]
    Unresolved,

    /// A sampler input has no wire; GLSL cannot declare a local sampler
    #[error("Sampler2D in socket is not connected: {0}")]
    UnwiredSampler(String),

    /// A program was requested from a graph without an output node
    #[error("No output node found")]
    NoOutputNode,

    /// Dependency ordering did not end with the output node
    #[error("no last node - might be a bug (expected {expected}, found {found:?})")]
    NoLastNode {
        /// The output node id
        expected: String,
        /// The node that ended the order, if any
        found: Option<String>,
    },
}

/// Error raised by a wire whose socket types cannot be coerced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// Opaque source wired into a non-opaque sink
    #[error("Sampler2D can only be connected to Sampler2D in: {source_id} / {source_type} out: {sink_id} / {sink_type}")]
    OpaqueSource {
        /// Producing socket id
        source_id: String,
        /// Producing socket type
        source_type: DataType,
        /// Consuming socket id
        sink_id: String,
        /// Consuming socket type
        sink_type: DataType,
    },

    /// Non-opaque source wired into an opaque sink
    #[error("Unsupported connection type: {source_type} to {sink_type} in: {source_id} out: {sink_id}")]
    OpaqueSink {
        /// Producing socket id
        source_id: String,
        /// Producing socket type
        source_type: DataType,
        /// Consuming socket id
        sink_id: String,
        /// Consuming socket type
        sink_type: DataType,
    },
}

/// Error raised when a uniform slot is read or written incorrectly
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniformError {
    /// No slot at this index
    #[error("Uniform index {0} does not exist")]
    MissingSlot(usize),

    /// The slot has not been named by graph resolution
    #[error("Uniform index {0} does not have a name")]
    Unnamed(usize),

    /// The slot has no value yet
    #[error("Uniform index {0} does not have a value")]
    Unset(usize),

    /// The value does not match the slot's declared type
    #[error("Uniform index {index} is {expected}, value is {got}")]
    WrongVariant {
        /// Slot index
        index: usize,
        /// Declared slot type
        expected: DataType,
        /// Type of the rejected value
        got: DataType,
    },
}

/// Error raised while turning descriptors into a graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// A wire descriptor names a node that was not described
    #[error("Wire refers to unknown node: {0}")]
    UnknownNode(String),

    /// A wire descriptor names a socket index the node does not have
    #[error("Node {node} has no {direction} socket {index}")]
    SocketIndex {
        /// Node id
        node: String,
        /// "in" or "out"
        direction: &'static str,
        /// Requested index
        index: usize,
    },

    /// A descriptor document could not be parsed
    #[error("Invalid graph description: {0}")]
    Parse(String),
}

/// Any error produced by this crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShaderGraphError {
    /// Node construction failed
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Graph topology is invalid
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Wire types cannot be coerced
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// Uniform slot misuse
    #[error(transparent)]
    Uniform(#[from] UniformError),

    /// Descriptor references are invalid
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Result type for shader graph operations
pub type Result<T> = std::result::Result<T, ShaderGraphError>;
