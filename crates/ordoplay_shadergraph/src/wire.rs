// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wire (edge) definitions and the coercion matrix between socket types.

use crate::error::CoercionError;
use crate::socket::{DataType, Socket, SocketId};

/// A directed edge from a producing out socket to a consuming in socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wire {
    /// Out socket producing the value
    pub source: SocketId,
    /// In socket consuming the value
    pub sink: SocketId,
}

impl Wire {
    /// Create a new wire
    pub fn new(source: SocketId, sink: SocketId) -> Self {
        Self { source, sink }
    }

    /// Check if this wire touches a specific socket
    pub fn involves_socket(&self, socket: SocketId) -> bool {
        self.source == socket || self.sink == socket
    }

    /// Assignment statement carrying the source value into the sink variable.
    ///
    /// Sampler-to-sampler wires produce no statement: the sink is aliased
    /// during resolution instead.
    pub fn generate_code(&self, sockets: &[Socket]) -> Result<String, CoercionError> {
        let (source, sink) = match (sockets.get(self.source.0), sockets.get(self.sink.0)) {
            (Some(source), Some(sink)) => (source, sink),
            // Wires are only created over sockets of the same arena
            _ => return Ok(String::new()),
        };
        coerce(source, sink)
    }

    /// Alias an opaque sink onto its source's variable
    pub(crate) fn bind_alias(&self, sockets: &mut [Socket]) {
        let Some(source) = sockets.get(self.source.0) else {
            return;
        };
        if !source.data_type().is_opaque() {
            return;
        }
        let name = source.variable_name();
        if let Some(sink) = sockets.get_mut(self.sink.0) {
            if sink.data_type().is_opaque() {
                sink.override_variable_name(name);
            }
        }
    }
}

const COMPONENTS: [&str; 4] = ["x", "y", "z", "w"];

fn coerce(source: &Socket, sink: &Socket) -> Result<String, CoercionError> {
    let source_type = source.data_type();
    let sink_type = sink.data_type();
    let from = source.variable_name();
    let to = sink.variable_name();

    let expression = match (source_type.components(), sink_type.components()) {
        (None, None) => return Ok(String::new()),
        (None, Some(_)) => {
            return Err(CoercionError::OpaqueSource {
                source_id: source.id().to_string(),
                source_type,
                sink_id: sink.id().to_string(),
                sink_type,
            })
        }
        (Some(_), None) => {
            return Err(CoercionError::OpaqueSink {
                source_id: source.id().to_string(),
                source_type,
                sink_id: sink.id().to_string(),
                sink_type,
            })
        }
        (Some(m), Some(n)) if m == n => from,
        // Broadcast
        (Some(1), Some(_)) => format!("{sink_type}({from})"),
        (Some(_), Some(1)) => format!("{from}.x"),
        // Zero-pad
        (Some(m), Some(n)) if m < n => {
            let padding = vec!["0.0"; n - m].join(", ");
            format!("{sink_type}({from}, {padding})")
        }
        // Truncate
        (Some(_), Some(n)) => {
            let parts: Vec<String> = COMPONENTS[..n].iter().map(|c| format!("{from}.{c}")).collect();
            format!("{sink_type}({})", parts.join(", "))
        }
    };
    Ok(format!("{} {to} = {expression};", sink_type.glsl_name()))
}

/// Whether a wire from `source` into `sink` can produce valid code
pub fn is_coercible(source: DataType, sink: DataType) -> bool {
    source.is_opaque() == sink.is_opaque()
}
