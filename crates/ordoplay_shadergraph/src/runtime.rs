// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-frame runtime contract between compiled graphs and the renderer.
//!
//! Each frame the renderer builds a [`FrameContext`], calls
//! [`Graph::update_on_draw`](crate::Graph::update_on_draw), then uploads the
//! values returned by [`Graph::uniform_bindings`](crate::Graph::uniform_bindings)
//! to the locations it bound by name.

use crate::socket::DataType;
use crate::uniform::ShaderValue;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// State of the frame about to be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Time since the renderer's clock started
    pub elapsed: Duration,
    /// Camera eye position in world space
    pub eye_position: [f32; 3],
}

impl FrameContext {
    /// Create a frame context
    pub fn new(elapsed: Duration, eye_position: [f32; 3]) -> Self {
        Self {
            elapsed,
            eye_position,
        }
    }

    /// Elapsed time in seconds
    pub fn seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// Monotonic clock producing frame contexts
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
}

impl FrameClock {
    /// Start a clock now
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Context for a frame drawn now from the given eye position
    pub fn frame(&self, eye_position: [f32; 3]) -> FrameContext {
        FrameContext::new(self.started.elapsed(), eye_position)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

/// A uniform the renderer must bind and upload
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBinding<'a> {
    /// Id of the node declaring the uniform
    pub node: &'a str,
    /// Uniform name in the generated source
    pub name: &'a str,
    /// Declared type
    pub data_type: DataType,
    /// Current value; texture uniforms carry their image handle
    pub value: Option<&'a ShaderValue>,
}

impl UniformBinding<'_> {
    /// Owned copy suitable for manifests and logs
    pub fn to_record(&self) -> UniformBindingRecord {
        UniformBindingRecord {
            node: self.node.to_string(),
            name: self.name.to_string(),
            data_type: self.data_type,
            value: self.value.cloned(),
        }
    }
}

/// Owned, serializable form of a [`UniformBinding`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformBindingRecord {
    /// Id of the node declaring the uniform
    pub node: String,
    /// Uniform name in the generated source
    pub name: String,
    /// Declared type
    pub data_type: DataType,
    /// Value at the time the record was taken
    pub value: Option<ShaderValue>,
}
