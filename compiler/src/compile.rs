//! AOG to computation-graph compilation.
//!
//! Nodes are visited children-first, so each shared AOG node is compiled once
//! and every operand shape is known before its consumer is bound.

use aognet_aog::{AOGraph, AogNode, NodeId};
use bon::bon;
use smallvec::{SmallVec, smallvec};
use snafu::{OptionExt, ensure};
use tracing::{debug, trace};

use crate::error::*;
use crate::{Binding, ComputationGraph, ComputationNode, OperatorFactory, OperatorRequest, Shape, ValueRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Axis ranges index into; And nodes concatenate along it.
    pub feature_axis: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { feature_axis: 1 }
    }
}

#[bon]
impl CompileOptions {
    #[builder]
    pub fn builder(#[builder(default = 1)] feature_axis: usize) -> Self {
        Self { feature_axis }
    }
}

/// Compile with the default options (NCHW, channels on axis 1).
pub fn compile<F: OperatorFactory>(
    graph: &AOGraph,
    factory: &F,
    input_shape: &Shape,
) -> Result<ComputationGraph<F::Op>> {
    compile_with(graph, factory, input_shape, &CompileOptions::default())
}

/// Compile every node reachable from the root, children first.
///
/// Graphs from [`aognet_aog::build`] contain only reachable nodes, so they
/// compile to exactly one computation node per AOG node. Nodes of a
/// hand-assembled graph that the root does not reach are skipped.
#[tracing::instrument(skip_all, fields(nodes = graph.len(), input = %input_shape))]
pub fn compile_with<F: OperatorFactory>(
    graph: &AOGraph,
    factory: &F,
    input_shape: &Shape,
    options: &CompileOptions,
) -> Result<ComputationGraph<F::Op>> {
    let axis = options.feature_axis;
    ensure!(axis < input_shape.rank(), InvalidInputShapeSnafu { shape: input_shape.clone(), axis });

    let order = graph.toposort().map_err(|source| match source {
        aognet_aog::Error::DanglingChild { node, child } => Error::UnresolvedNode { node, child },
        source => Error::Graph { source },
    })?;

    let mut index: Vec<Option<usize>> = vec![None; graph.len()];
    let mut nodes: Vec<ComputationNode<F::Op>> = Vec::with_capacity(order.len());

    for id in order {
        let node = graph.node(id).context(UnresolvedNodeSnafu { node: id, child: id })?;

        let inputs: SmallVec<[ValueRef; 2]> = match node {
            AogNode::Terminal { .. } => smallvec![ValueRef::Input],
            AogNode::And { .. } | AogNode::Or { .. } => node
                .sources()
                .iter()
                .map(|&child| {
                    index.get(child.index()).copied().flatten().map(ValueRef::Node).context(UnresolvedNodeSnafu { node: id, child })
                })
                .collect::<Result<_>>()?,
        };

        let input_shapes: Vec<Shape> = inputs
            .iter()
            .map(|v| match v {
                ValueRef::Input => input_shape.clone(),
                ValueRef::Node(i) => nodes[*i].shape.clone(),
            })
            .collect();
        check_operands(id, node, &input_shapes, axis)?;

        let request = OperatorRequest {
            node: id,
            kind: node.kind(),
            range: node.range(),
            dim: graph.config().dim,
            feature_axis: axis,
            input_shapes: &input_shapes,
        };
        let Binding { op, output_shape, params, cost } = factory.bind(&request)?;
        trace!(%id, %node, shape = %output_shape, params, cost, "bound operator");

        index[id.index()] = Some(nodes.len());
        nodes.push(ComputationNode {
            source: id,
            kind: node.kind(),
            range: node.range(),
            inputs,
            op,
            shape: output_shape,
            params,
            cost,
        });
    }

    let compiled = ComputationGraph::from_nodes(nodes, input_shape.clone())?;
    debug!(
        nodes = compiled.len(),
        params = compiled.num_params(),
        output = %compiled.output_shape().cloned().unwrap_or_default(),
        "graph compiled"
    );
    Ok(compiled)
}

/// And operands must agree off the feature axis; Or operands must agree everywhere.
fn check_operands(id: NodeId, node: &AogNode, shapes: &[Shape], axis: usize) -> Result<()> {
    let Some(first) = shapes.first() else {
        return Ok(());
    };
    for shape in &shapes[1..] {
        let fusable = match node {
            AogNode::Terminal { .. } => true,
            AogNode::And { .. } => first.matches_except(shape, axis),
            AogNode::Or { .. } => first == shape,
        };
        ensure!(
            fusable,
            ShapeMismatchSnafu { node: id, range: node.range(), expected: first.clone(), actual: shape.clone() }
        );
    }
    Ok(())
}
