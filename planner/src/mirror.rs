//! Threshold plans: keep one output per block of roughly `threshold` bytes.

use aognet_compiler::ComputationGraph;

use crate::{ExecutionShape, MemoryPlan};

/// A threshold plan with the sizes that seed the next threshold guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPlan {
    pub plan: MemoryPlan,
    pub threshold: u64,
    /// Largest block of bytes accumulated before a retained node.
    pub max_size: u64,
    /// Bytes of all retained outputs.
    pub save_size: u64,
}

/// Walk the execution order accumulating output bytes; retain a node each
/// time the running block exceeds `threshold`, then start a new block.
///
/// A zero threshold retains every node with a non-empty output.
pub fn mirror_plan<Op>(graph: &ComputationGraph<Op>, shape: &ExecutionShape, threshold: u64) -> MirrorPlan {
    let output = graph.output();
    let mut dropped = vec![false; graph.len()];
    let (mut block, mut max_size, mut save_size) = (0u64, 0u64, 0u64);

    for (i, node) in graph.nodes().iter().enumerate() {
        let bytes = shape.bytes(&node.shape);
        block += bytes;
        if block > threshold || Some(i) == output {
            save_size += bytes;
            max_size = max_size.max(block);
            block = 0;
        } else {
            dropped[i] = true;
        }
    }

    MirrorPlan { plan: MemoryPlan::from_dropped(graph, &dropped), threshold, max_size, save_size }
}

/// Next threshold guess: the geometric mean of the saved bytes and the largest
/// block, halved under the root.
pub fn next_threshold(max_size: u64, save_size: u64) -> u64 {
    ((save_size as f64) * (max_size as f64) / 2.0).sqrt() as u64
}
