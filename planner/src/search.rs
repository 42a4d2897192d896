//! Plan search.
//!
//! Two phases share one trial counter:
//!
//! 1. **Threshold sweep**: a few threshold guesses, each refined from the
//!    sizes of the previous threshold plan, then evenly spaced thresholds
//!    between the best guess and the last guess scaled by sqrt(2).
//! 2. **Greedy refinement**: starting from the best plan within the recompute
//!    budget, try dropping retained nodes in priority order (large outputs
//!    that are cheap to rebuild first) and keep every drop that lowers the
//!    peak without leaving the budget.
//!
//! The lowest-peak plan within the recompute budget wins, ties going to the
//! cheaper plan.

use std::cmp::Ordering;

use aognet_compiler::ComputationGraph;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::*;
use crate::{
    CostReport, ExecutionShape, MemoryPlan, PlannerConfig, RecomputeBudget, mirror_plan, next_threshold, simulate,
};

/// Best plan found and what it costs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub plan: MemoryPlan,
    pub report: CostReport,
    /// Plans evaluated, the retain-all baseline included.
    pub trials: usize,
}

struct Tracker {
    budget: RecomputeBudget,
    max_trials: usize,
    trials: usize,
    best: Option<(MemoryPlan, CostReport)>,
    min_feasible_budget: Option<u64>,
}

impl Tracker {
    fn exhausted(&self) -> bool {
        self.trials >= self.max_trials
    }

    fn remaining(&self) -> usize {
        self.max_trials.saturating_sub(self.trials)
    }

    fn record(&mut self, plan: &MemoryPlan, report: CostReport) {
        self.trials += 1;
        trace!(trial = self.trials, plan = %plan, peak = report.peak, cost = report.recompute_cost, "evaluated plan");

        if self.budget.admits_peak(report.peak) {
            self.min_feasible_budget =
                Some(self.min_feasible_budget.map_or(report.recompute_cost, |c| c.min(report.recompute_cost)));
        }
        if !self.budget.admits_cost(report.recompute_cost) {
            return;
        }
        let better = match &self.best {
            None => true,
            Some((_, best)) => (report.peak, report.recompute_cost) < (best.peak, best.recompute_cost),
        };
        if better {
            self.best = Some((plan.clone(), report));
        }
    }
}

/// Search for a plan with an injected evaluator.
///
/// `evaluate` must be a pure function of the plan; it is called from the
/// rayon pool when `config.parallel` is set.
#[tracing::instrument(skip_all, fields(nodes = graph.len(), max_cost = budget.max_cost, memory_limit = ?budget.memory_limit))]
pub fn search<Op, F>(
    graph: &ComputationGraph<Op>,
    shape: &ExecutionShape,
    budget: &RecomputeBudget,
    config: &PlannerConfig,
    evaluate: F,
) -> Result<SearchResult>
where
    F: Fn(&MemoryPlan) -> Result<CostReport> + Sync,
{
    let mut tracker =
        Tracker { budget: *budget, max_trials: config.max_trials.max(1), trials: 0, best: None, min_feasible_budget: None };

    let baseline = MemoryPlan::retain_all(graph);
    let report = evaluate(&baseline)?;
    let baseline_peak = report.peak;
    tracker.record(&baseline, report);

    threshold_sweep(graph, shape, config, &evaluate, &mut tracker)?;
    greedy_refine(graph, shape, &evaluate, &mut tracker)?;

    let Tracker { trials, best, min_feasible_budget, .. } = tracker;
    let (plan, report) = best.unwrap_or((baseline, report));

    if !budget.admits_peak(report.peak) {
        return BudgetInfeasibleSnafu {
            max_cost: budget.max_cost,
            memory_limit: budget.memory_limit,
            best_peak: report.peak,
            min_feasible_budget,
        }
        .fail();
    }

    debug!(
        trials,
        dropped = plan.num_dropped(),
        peak = report.peak,
        baseline_peak,
        recompute_cost = report.recompute_cost,
        "memory plan selected"
    );
    Ok(SearchResult { plan, report, trials })
}

fn threshold_sweep<Op, F>(
    graph: &ComputationGraph<Op>,
    shape: &ExecutionShape,
    config: &PlannerConfig,
    evaluate: &F,
    tracker: &mut Tracker,
) -> Result<()>
where
    F: Fn(&MemoryPlan) -> Result<CostReport> + Sync,
{
    if graph.is_empty() {
        return Ok(());
    }

    let mut guess = 0;
    let mut best_guess: Option<(u64, u64)> = None;
    for _ in 0..config.initial_sweeps {
        if tracker.exhausted() {
            return Ok(());
        }
        let mirror = mirror_plan(graph, shape, guess);
        let report = evaluate(&mirror.plan)?;
        tracker.record(&mirror.plan, report);
        if best_guess.is_none_or(|(peak, _)| report.peak < peak) {
            best_guess = Some((report.peak, guess));
        }
        guess = next_threshold(mirror.max_size, mirror.save_size);
    }

    let Some((_, min_threshold)) = best_guess else {
        return Ok(());
    };
    let max_threshold = (guess as f64 * std::f64::consts::SQRT_2) as u64;
    if config.threshold_trials == 0 || max_threshold <= min_threshold {
        return Ok(());
    }
    let step = ((max_threshold - min_threshold) / config.threshold_trials as u64).max(1);

    let mut candidates: Vec<MemoryPlan> = Vec::new();
    for k in 1..=config.threshold_trials as u64 {
        let plan = mirror_plan(graph, shape, min_threshold + step * k).plan;
        if !candidates.contains(&plan) {
            candidates.push(plan);
        }
    }
    candidates.truncate(tracker.remaining());

    let reports: Vec<CostReport> = if config.parallel {
        candidates.par_iter().map(evaluate).collect::<Result<_>>()?
    } else {
        candidates.iter().map(evaluate).collect::<Result<_>>()?
    };
    for (plan, report) in candidates.iter().zip(reports) {
        tracker.record(plan, report);
    }
    Ok(())
}

fn greedy_refine<Op, F>(graph: &ComputationGraph<Op>, shape: &ExecutionShape, evaluate: &F, tracker: &mut Tracker) -> Result<()>
where
    F: Fn(&MemoryPlan) -> Result<CostReport>,
{
    let Some((start, start_report)) = tracker.best.clone() else {
        return Ok(());
    };
    let mut dropped = start.dropped();
    let (mut peak, mut cost) = (start_report.peak, start_report.recompute_cost);

    // (bytes, cost, index) of every retained node but the output.
    let output = graph.output();
    let mut candidates: Vec<(u64, u64, usize)> = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|&(i, _)| !dropped[i] && Some(i) != output)
        .map(|(i, n)| (shape.bytes(&n.shape), n.cost, i))
        .collect();
    candidates.sort_by(|a, b| priority(b, a).then(a.2.cmp(&b.2)));

    for (_, node_cost, i) in candidates {
        if tracker.exhausted() {
            debug!(trials = tracker.trials, "trial cap reached");
            break;
        }
        if !tracker.budget.admits_cost(cost.saturating_add(node_cost)) {
            continue;
        }
        dropped[i] = true;
        let plan = MemoryPlan::from_dropped(graph, &dropped);
        let report = evaluate(&plan)?;
        tracker.record(&plan, report);
        if report.peak < peak && tracker.budget.admits_cost(report.recompute_cost) {
            peak = report.peak;
            cost = report.recompute_cost;
        } else {
            dropped[i] = false;
        }
    }
    Ok(())
}

/// Compare `bytes / (cost + 1)` without floating point.
fn priority(a: &(u64, u64, usize), b: &(u64, u64, usize)) -> Ordering {
    let lhs = a.0 as u128 * (b.1 as u128 + 1);
    let rhs = b.0 as u128 * (a.1 as u128 + 1);
    lhs.cmp(&rhs)
}

/// Plan with the built-in simulator and a given configuration.
pub fn plan_with<Op: Sync>(
    graph: &ComputationGraph<Op>,
    shape: &ExecutionShape,
    budget: &RecomputeBudget,
    config: &PlannerConfig,
) -> Result<SearchResult> {
    search(graph, shape, budget, config, |plan| simulate(graph, plan, shape))
}

/// Lowest-peak plan whose added recompute cost stays within `budget`.
pub fn plan<Op: Sync>(graph: &ComputationGraph<Op>, shape: &ExecutionShape, budget: &RecomputeBudget) -> Result<MemoryPlan> {
    plan_with(graph, shape, budget, &PlannerConfig::default()).map(|result| result.plan)
}
