use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// No evaluated plan met both the recompute budget and the memory limit.
    ///
    /// `min_feasible_budget` is the smallest recompute cost among evaluated
    /// plans that met the memory limit, if any did.
    #[snafu(display(
        "no plan within recompute budget {max_cost} reaches memory limit {}: best peak {best_peak} bytes, minimal feasible budget {}",
        memory_limit.map_or_else(|| "none".to_string(), |b| format!("{b} bytes")),
        min_feasible_budget.map_or_else(|| "unknown".to_string(), |c| c.to_string())
    ))]
    BudgetInfeasible { max_cost: u64, memory_limit: Option<u64>, best_peak: u64, min_feasible_budget: Option<u64> },

    #[snafu(display("invalid execution shape: {reason}"))]
    InvalidExecutionShape { reason: &'static str },

    /// A plan was applied to a graph it was not made for.
    #[snafu(display("plan covers {actual} nodes, graph has {expected}"))]
    PlanMismatch { expected: usize, actual: usize },
}
