//! Memory planning for compiled AND-OR graphs.
//!
//! Training keeps every forward output alive until the backward pass consumes
//! it. The planner picks outputs to drop after the forward pass and rebuild on
//! demand, trading recompute cost for a lower peak.
//!
//! # Example
//!
//! ```ignore
//! let shape = ExecutionShape::of::<f32>(32)?;
//! let plan = plan(&compiled, &shape, &RecomputeBudget::new(compiled.total_cost() / 3))?;
//! assert!(get_cost(&compiled, &plan, &shape)? <= get_cost(&compiled, &MemoryPlan::retain_all(&compiled), &shape)?);
//! ```
//!
//! # Module Organization
//!
//! - `plan` - Retain/recompute decisions
//! - `simulate` - Peak-memory simulation
//! - [`mirror`] - Threshold plans
//! - `search` - Budgeted plan search
//! - [`config`] - Budgets and search configuration
//! - [`error`] - Error types and result handling

pub mod config;
pub mod error;
pub mod mirror;
pub mod plan;
pub mod search;
pub mod shape;
pub mod simulate;

#[cfg(test)]
pub mod test;

pub use config::{PlannerConfig, RecomputeBudget};
pub use error::{Error, Result};
pub use mirror::{MirrorPlan, mirror_plan, next_threshold};
pub use plan::{Decision, MemoryPlan};
pub use search::{SearchResult, plan, plan_with, search};
pub use shape::ExecutionShape;
pub use simulate::{CostReport, get_cost, simulate};
