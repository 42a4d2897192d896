pub mod property;

use aognet_aog::{NodeId, NodeKind, Range};
use aognet_compiler::{ComputationGraph, ComputationNode, Shape, ValueRef};
use aognet_dtype::DType;

use crate::ExecutionShape;

/// Byte-typed execution at batch 1, so a node's bytes equal its width.
pub fn bytes_shape() -> ExecutionShape {
    ExecutionShape::new(1, DType::UInt8).unwrap()
}

/// A chain `input -> 0 -> 1 -> ...`, node `i` producing `widths[i]` bytes at cost `costs[i]`.
pub fn chain(widths: &[usize], costs: &[u64]) -> ComputationGraph<()> {
    let nodes = widths
        .iter()
        .zip(costs)
        .enumerate()
        .map(|(i, (&width, &cost))| ComputationNode {
            source: NodeId::from(i),
            kind: if i == 0 { NodeKind::Terminal } else { NodeKind::Or },
            range: Range::new(0, 1),
            inputs: [if i == 0 { ValueRef::Input } else { ValueRef::Node(i - 1) }].into_iter().collect(),
            op: (),
            shape: Shape::from([1, width]),
            params: 0,
            cost,
        })
        .collect();
    ComputationGraph::from_nodes(nodes, Shape::from([1, 1])).unwrap()
}
