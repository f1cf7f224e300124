// SPDX-License-Identifier: MIT OR Apache-2.0
//! Math nodes. Every socket of a math node shares one caller-chosen type,
//! except `dot`, whose result is always a float.

use super::numeric_type;
use crate::error::ConstructionError;
use crate::node::{CodeContext, NodeCore, ShaderNode};
use crate::registry::NodeTypeId;
use crate::socket::DataType;

/// Two-operand arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b` (component-wise)
    Multiply,
}

impl BinaryOp {
    fn type_id(self) -> NodeTypeId {
        match self {
            Self::Add => NodeTypeId::MathAdd,
            Self::Subtract => NodeTypeId::MathSubtract,
            Self::Multiply => NodeTypeId::MathMultiply,
        }
    }

    fn operator(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
        }
    }
}

/// `out = in0 <op> in1`
#[derive(Debug, Clone)]
pub struct BinaryMathNode {
    core: NodeCore,
    op: BinaryOp,
    data_type: DataType,
}

impl BinaryMathNode {
    /// Create a binary math node over `data_type`
    pub fn new(id: impl Into<String>, op: BinaryOp, data_type: DataType) -> Result<Self, ConstructionError> {
        let type_id = op.type_id().as_str();
        let data_type = numeric_type(type_id, data_type)?;
        let mut core = NodeCore::new(id, type_id)?;
        core.add_in_socket("in0", data_type)?;
        core.add_in_socket("in1", data_type)?;
        core.add_out_socket("out", data_type)?;
        Ok(Self { core, op, data_type })
    }

    /// Add node
    pub fn add(id: impl Into<String>, data_type: DataType) -> Result<Self, ConstructionError> {
        Self::new(id, BinaryOp::Add, data_type)
    }

    /// Subtract node
    pub fn subtract(id: impl Into<String>, data_type: DataType) -> Result<Self, ConstructionError> {
        Self::new(id, BinaryOp::Subtract, data_type)
    }

    /// Multiply node
    pub fn multiply(id: impl Into<String>, data_type: DataType) -> Result<Self, ConstructionError> {
        Self::new(id, BinaryOp::Multiply, data_type)
    }

    /// The operation
    pub fn op(&self) -> BinaryOp {
        self.op
    }
}

impl ShaderNode for BinaryMathNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(format!(
            "{} {} = {} {} {};",
            self.data_type,
            ctx.output(0)?,
            ctx.input(0)?,
            self.op.operator(),
            ctx.input(1)?
        ))
    }
}

/// Single-argument built-in function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFn {
    /// `sin`
    Sine,
    /// `cos`
    Cosine,
    /// `tan`
    Tangent,
    /// `fract`
    Frac,
}

impl UnaryFn {
    fn type_id(self) -> NodeTypeId {
        match self {
            Self::Sine => NodeTypeId::MathSine,
            Self::Cosine => NodeTypeId::MathCosine,
            Self::Tangent => NodeTypeId::MathTangent,
            Self::Frac => NodeTypeId::MathFrac,
        }
    }

    fn glsl_function(self) -> &'static str {
        match self {
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tan",
            Self::Frac => "fract",
        }
    }
}

/// `out = f(in0)`
#[derive(Debug, Clone)]
pub struct UnaryMathNode {
    core: NodeCore,
    function: UnaryFn,
    data_type: DataType,
}

impl UnaryMathNode {
    /// Create a unary math node over `data_type`
    pub fn new(id: impl Into<String>, function: UnaryFn, data_type: DataType) -> Result<Self, ConstructionError> {
        let type_id = function.type_id().as_str();
        let data_type = numeric_type(type_id, data_type)?;
        let mut core = NodeCore::new(id, type_id)?;
        core.add_in_socket("in0", data_type)?;
        core.add_out_socket("out", data_type)?;
        Ok(Self {
            core,
            function,
            data_type,
        })
    }

    /// The function
    pub fn function(&self) -> UnaryFn {
        self.function
    }
}

impl ShaderNode for UnaryMathNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(format!(
            "{} {} = {}({});",
            self.data_type,
            ctx.output(0)?,
            self.function.glsl_function(),
            ctx.input(0)?
        ))
    }
}

/// `out = dot(in0, in1)`, always a float
#[derive(Debug, Clone)]
pub struct DotNode {
    core: NodeCore,
}

impl DotNode {
    /// Create a dot product over `data_type` operands
    pub fn new(id: impl Into<String>, data_type: DataType) -> Result<Self, ConstructionError> {
        let type_id = NodeTypeId::MathDot.as_str();
        let data_type = numeric_type(type_id, data_type)?;
        let mut core = NodeCore::new(id, type_id)?;
        core.add_in_socket("in0", data_type)?;
        core.add_in_socket("in1", data_type)?;
        core.add_out_socket("out", DataType::Float)?;
        Ok(Self { core })
    }
}

impl ShaderNode for DotNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn generate_code(&self, ctx: &CodeContext<'_>) -> crate::Result<String> {
        Ok(format!(
            "float {} = dot({}, {});",
            ctx.output(0)?,
            ctx.input(0)?,
            ctx.input(1)?
        ))
    }
}
