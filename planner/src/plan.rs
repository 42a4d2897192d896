//! Retain/recompute decisions.

use std::fmt;
use std::ops::Range;

use aognet_compiler::ComputationGraph;

/// What happens to one node's output after the forward pass is done with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Kept live until the backward pass reaches the node.
    Retain,
    /// Freed after its last forward consumer and rebuilt on demand.
    Recompute {
        /// Contiguous slice of the execution order holding every replayed node.
        segment: Range<usize>,
        /// Nodes to execute, ascending, to rebuild this output. Ends with the
        /// node itself; every other entry is a dropped ancestor reached only
        /// through dropped nodes.
        replay: Vec<usize>,
    },
}

impl Decision {
    pub fn is_retain(&self) -> bool {
        matches!(self, Self::Retain)
    }

    pub fn is_recompute(&self) -> bool {
        matches!(self, Self::Recompute { .. })
    }
}

/// One [`Decision`] per computation node, in execution order.
///
/// The graph output is always retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryPlan {
    decisions: Vec<Decision>,
}

impl MemoryPlan {
    /// Keep every output.
    pub fn retain_all<Op>(graph: &ComputationGraph<Op>) -> Self {
        Self { decisions: vec![Decision::Retain; graph.len()] }
    }

    /// Recompute the nodes flagged in `dropped` (indexed by execution index).
    ///
    /// Missing flags mean retain. The output node is retained regardless.
    pub fn from_dropped<Op>(graph: &ComputationGraph<Op>, dropped: &[bool]) -> Self {
        let n = graph.len();
        let output = graph.output();
        let is_dropped = |i: usize| Some(i) != output && dropped.get(i).copied().unwrap_or(false);

        let mut decisions = Vec::with_capacity(n);
        for i in 0..n {
            if !is_dropped(i) {
                decisions.push(Decision::Retain);
                continue;
            }

            // Walk operands through dropped nodes only; retained operands are
            // still live when the backward pass needs them.
            let mut seen = vec![false; i + 1];
            let mut stack = vec![i];
            seen[i] = true;
            let mut replay = Vec::new();
            while let Some(v) = stack.pop() {
                replay.push(v);
                for u in graph.operands(v) {
                    if is_dropped(u) && !seen[u] {
                        seen[u] = true;
                        stack.push(u);
                    }
                }
            }
            replay.sort_unstable();

            let segment = replay[0]..i + 1;
            decisions.push(Decision::Recompute { segment, replay });
        }

        Self { decisions }
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn decision(&self, index: usize) -> Option<&Decision> {
        self.decisions.get(index)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn is_dropped(&self, index: usize) -> bool {
        self.decisions.get(index).is_some_and(Decision::is_recompute)
    }

    /// Drop flags, indexed by execution index.
    pub fn dropped(&self) -> Vec<bool> {
        self.decisions.iter().map(Decision::is_recompute).collect()
    }

    pub fn num_dropped(&self) -> usize {
        self.decisions.iter().filter(|d| d.is_recompute()).count()
    }

    /// Cost the backward pass adds by replaying dropped nodes; each is rebuilt
    /// exactly once.
    pub fn recompute_cost<Op>(&self, graph: &ComputationGraph<Op>) -> u64 {
        graph.nodes().iter().zip(&self.decisions).filter(|(_, d)| d.is_recompute()).map(|(n, _)| n.cost).sum()
    }
}

impl fmt::Display for MemoryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.decisions {
            f.write_str(if d.is_retain() { "R" } else { "." })?;
        }
        Ok(())
    }
}
