// SPDX-License-Identifier: MIT OR Apache-2.0
//! Concrete shader node kinds.

pub mod inputs;
pub mod math;
pub mod output;
pub mod texture;
pub mod vector;

pub use inputs::{
    CameraPositionInputNode, FloatInputNode, TextureInputNode, TimeInputNode, UvInputNode,
    VectorInputNode,
};
pub use math::{BinaryMathNode, BinaryOp, DotNode, UnaryFn, UnaryMathNode};
pub use output::ColorOutputNode;
pub use texture::{PerlinNoiseNode, SampleTextureNode};
pub use vector::{CombineNode, SeparateNode};

use crate::error::ConstructionError;
use crate::socket::DataType;

/// Accept only types that support arithmetic
pub(crate) fn numeric_type(type_id: &str, data_type: DataType) -> Result<DataType, ConstructionError> {
    if data_type.is_opaque() {
        return Err(ConstructionError::UnsupportedType {
            type_id: type_id.to_string(),
            data_type,
        });
    }
    Ok(data_type)
}
