//! The seam between the compiler and a numeric runtime.
//!
//! The compiler never computes anything itself. For each AOG node it asks an
//! [`OperatorFactory`] for an opaque operator handle plus the shape that
//! operator produces, and wires the handle to its operands.

use aognet_aog::{NodeId, NodeKind, Range};

use crate::{Result, Shape};

/// Everything a factory sees about the node it binds.
#[derive(Debug, Clone)]
pub struct OperatorRequest<'a> {
    pub node: NodeId,
    pub kind: NodeKind,
    pub range: Range,
    /// Size of the whole domain the range lives in.
    pub dim: usize,
    /// Axis that ranges index into and that And nodes concatenate along.
    pub feature_axis: usize,
    /// Operand shapes in operand order: the graph input for a Terminal,
    /// children for an And, alternatives for an Or.
    pub input_shapes: &'a [Shape],
}

/// A bound operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<Op> {
    pub op: Op,
    pub output_shape: Shape,
    /// Learnable parameter count.
    pub params: u64,
    /// Abstract cost of running the operator once; the memory planner charges
    /// it for every replay.
    pub cost: u64,
}

/// Maps a node kind, range and operand shapes to a concrete operator.
///
/// Deterministic factories give deterministic compiled graphs. The factory also
/// decides how an Or node combines its alternatives.
pub trait OperatorFactory {
    type Op;

    fn bind(&self, request: &OperatorRequest<'_>) -> Result<Binding<Self::Op>>;
}

impl<F: OperatorFactory + ?Sized> OperatorFactory for &F {
    type Op = F::Op;

    fn bind(&self, request: &OperatorRequest<'_>) -> Result<Binding<Self::Op>> {
        (**self).bind(request)
    }
}
