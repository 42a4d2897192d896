//! Compiled computation graphs.

use aognet_aog::{NodeId, NodeKind, Range};
use smallvec::SmallVec;
use snafu::ensure;

use crate::error::*;
use crate::Shape;

/// Operand of a computation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueRef {
    /// The graph input tensor.
    Input,
    /// Output of the computation node at this execution index.
    Node(usize),
}

impl ValueRef {
    pub fn node(self) -> Option<usize> {
        match self {
            Self::Input => None,
            Self::Node(i) => Some(i),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputationNode<Op> {
    /// AOG node this was compiled from.
    pub source: NodeId,
    pub kind: NodeKind,
    pub range: Range,
    pub inputs: SmallVec<[ValueRef; 2]>,
    pub op: Op,
    pub shape: Shape,
    pub params: u64,
    pub cost: u64,
}

/// Computation nodes in execution order.
///
/// Every node reads only the graph input or nodes before it, and the last
/// node produces the graph output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputationGraph<Op> {
    nodes: Vec<ComputationNode<Op>>,
    input_shape: Shape,
}

impl<Op> ComputationGraph<Op> {
    /// Assemble a graph from nodes already in execution order.
    pub fn from_nodes(nodes: Vec<ComputationNode<Op>>, input_shape: Shape) -> Result<Self> {
        for (i, node) in nodes.iter().enumerate() {
            for input in node.inputs.iter().filter_map(|v| v.node()) {
                ensure!(input < i, OutOfOrderInputSnafu { node: i, input });
            }
        }
        Ok(Self { nodes, input_shape })
    }

    pub fn nodes(&self) -> &[ComputationNode<Op>] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&ComputationNode<Op>> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn input_shape(&self) -> &Shape {
        &self.input_shape
    }

    /// Execution index of the node producing the graph output.
    pub fn output(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    pub fn output_shape(&self) -> Option<&Shape> {
        self.nodes.last().map(|n| &n.shape)
    }

    /// Execution index of the node compiled from `source`.
    pub fn lookup(&self, source: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.source == source)
    }

    /// Distinct operand nodes of `index`, in operand order.
    pub fn operands(&self, index: usize) -> SmallVec<[usize; 4]> {
        let mut operands: SmallVec<[usize; 4]> = SmallVec::new();
        if let Some(node) = self.nodes.get(index) {
            for i in node.inputs.iter().filter_map(|v| v.node()) {
                if !operands.contains(&i) {
                    operands.push(i);
                }
            }
        }
        operands
    }

    /// Consumers of every node, ascending, indexed by execution index.
    pub fn consumers(&self) -> Vec<SmallVec<[usize; 4]>> {
        let mut consumers = vec![SmallVec::new(); self.nodes.len()];
        for i in 0..self.nodes.len() {
            for j in self.operands(i) {
                consumers[j].push(i);
            }
        }
        consumers
    }

    pub fn num_params(&self) -> u64 {
        self.nodes.iter().map(|n| n.params).sum()
    }

    /// Cost of one full forward execution.
    pub fn total_cost(&self) -> u64 {
        self.nodes.iter().map(|n| n.cost).sum()
    }
}
