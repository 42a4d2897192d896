//! Peak-memory simulation of one forward and one backward pass.
//!
//! Nothing is executed. Every node's output is charged its byte size while
//! live:
//!
//! - Forward, in execution order: an output is allocated when its node runs.
//!   A dropped output is freed once its last consumer has run.
//! - Backward, in reverse: step `i` needs node `i` and its operands. A needed
//!   dropped output that is not live is rebuilt by running its replay list.
//!   Every output is freed after its own step.
//!
//! The graph input lives outside the planner and is not charged.

use aognet_compiler::ComputationGraph;
use snafu::ensure;
use tracing::trace;

use crate::error::*;
use crate::{Decision, ExecutionShape, MemoryPlan};

/// Outcome of simulating a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CostReport {
    /// Peak live bytes during the forward pass.
    pub forward_peak: u64,
    /// Peak live bytes during the backward pass, replays included.
    pub backward_peak: u64,
    /// Larger of the two.
    pub peak: u64,
    /// Cost of all replays in the backward pass.
    pub recompute_cost: u64,
}

struct LiveSet<'a> {
    bytes: &'a [u64],
    live: Vec<bool>,
    total: u64,
    peak: u64,
}

impl<'a> LiveSet<'a> {
    fn new(bytes: &'a [u64]) -> Self {
        Self { bytes, live: vec![false; bytes.len()], total: 0, peak: 0 }
    }

    fn alloc(&mut self, i: usize) {
        if !self.live[i] {
            self.live[i] = true;
            self.total += self.bytes[i];
        }
    }

    fn free(&mut self, i: usize) {
        if self.live[i] {
            self.live[i] = false;
            self.total -= self.bytes[i];
        }
    }

    fn observe(&mut self) {
        self.peak = self.peak.max(self.total);
    }
}

/// Simulate `plan` on `graph` under `shape`.
pub fn simulate<Op>(graph: &ComputationGraph<Op>, plan: &MemoryPlan, shape: &ExecutionShape) -> Result<CostReport> {
    ensure!(plan.len() == graph.len(), PlanMismatchSnafu { expected: graph.len(), actual: plan.len() });

    let n = graph.len();
    let bytes: Vec<u64> = graph.nodes().iter().map(|node| shape.bytes(&node.shape)).collect();
    let consumers = graph.consumers();
    let mut live = LiveSet::new(&bytes);

    for i in 0..n {
        live.alloc(i);
        live.observe();
        for j in graph.operands(i) {
            if plan.is_dropped(j) && consumers[j].last() == Some(&i) {
                live.free(j);
            }
        }
        if plan.is_dropped(i) && consumers[i].is_empty() {
            live.free(i);
        }
    }
    let forward_peak = live.peak;
    live.peak = 0;

    let mut recompute_cost = 0;
    for i in (0..n).rev() {
        let needed = std::iter::once(i).chain(graph.operands(i));
        for v in needed {
            if live.live[v] {
                continue;
            }
            if let Some(Decision::Recompute { replay, .. }) = plan.decision(v) {
                for &r in replay {
                    if !live.live[r] {
                        live.alloc(r);
                        recompute_cost += graph.nodes()[r].cost;
                    }
                }
            }
        }
        live.observe();
        live.free(i);
    }
    let backward_peak = live.peak;

    let report = CostReport { forward_peak, backward_peak, peak: forward_peak.max(backward_peak), recompute_cost };
    trace!(plan = %plan, ?report, "simulated plan");
    Ok(report)
}

/// Peak bytes of `plan` on `graph` under `shape`.
pub fn get_cost<Op>(graph: &ComputationGraph<Op>, plan: &MemoryPlan, shape: &ExecutionShape) -> Result<u64> {
    simulate(graph, plan, shape).map(|report| report.peak)
}
