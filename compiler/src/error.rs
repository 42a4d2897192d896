use aognet_aog::{NodeId, Range};
use snafu::Snafu;

use crate::Shape;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// An AOG edge points at a node that does not exist.
    #[snafu(display("node {node} references unresolved node {child}"))]
    UnresolvedNode { node: NodeId, child: NodeId },

    /// Operand shapes of a node cannot be fused or combined.
    #[snafu(display("shape mismatch at node {node} over {range}: expected {expected}, got {actual}"))]
    ShapeMismatch { node: NodeId, range: Range, expected: Shape, actual: Shape },

    #[snafu(display("input shape {shape} has no feature axis {axis}"))]
    InvalidInputShape { shape: Shape, axis: usize },

    /// The operator factory refused a node.
    #[snafu(display("operator factory failed at node {node}: {reason}"))]
    Operator { node: NodeId, reason: String },

    /// A computation node reads a value produced later in execution order.
    #[snafu(display("computation node {node} reads node {input}, which does not precede it"))]
    OutOfOrderInput { node: usize, input: usize },

    #[snafu(display("invalid AOG"))]
    Graph { source: aognet_aog::Error },
}
