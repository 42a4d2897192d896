//! Planner configuration.
//!
//! Typed configuration with bon builders and environment variable fallbacks.

use bon::bon;

/// Bounds a returned plan must respect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RecomputeBudget {
    /// Largest recompute cost the backward pass may add.
    pub max_cost: u64,
    /// Largest acceptable peak in bytes. `None` only minimizes the peak.
    pub memory_limit: Option<u64>,
}

#[bon]
impl RecomputeBudget {
    #[builder]
    pub fn builder(#[builder(default = u64::MAX)] max_cost: u64, memory_limit: Option<u64>) -> Self {
        Self { max_cost, memory_limit }
    }
}

impl RecomputeBudget {
    pub fn new(max_cost: u64) -> Self {
        Self { max_cost, memory_limit: None }
    }

    /// No recompute allowed.
    pub fn none() -> Self {
        Self::new(0)
    }

    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    pub fn with_memory_limit(mut self, bytes: u64) -> Self {
        self.memory_limit = Some(bytes);
        self
    }

    pub fn admits_cost(&self, cost: u64) -> bool {
        cost <= self.max_cost
    }

    pub fn admits_peak(&self, peak: u64) -> bool {
        self.memory_limit.is_none_or(|limit| peak <= limit)
    }
}

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Cap on evaluated plans, the retain-all baseline included.
    pub max_trials: usize,
    /// Threshold guesses refined from the previous plan's sizes.
    pub initial_sweeps: usize,
    /// Evenly spaced thresholds tried after the guesses.
    pub threshold_trials: usize,
    /// Evaluate threshold candidates on the rayon pool.
    pub parallel: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_trials: 512, initial_sweeps: 3, threshold_trials: 6, parallel: true }
    }
}

#[bon]
impl PlannerConfig {
    #[builder]
    pub fn builder(
        #[builder(default = 512)] max_trials: usize,
        #[builder(default = 3)] initial_sweeps: usize,
        #[builder(default = 6)] threshold_trials: usize,
        #[builder(default = true)] parallel: bool,
    ) -> Self {
        Self { max_trials, initial_sweeps, threshold_trials, parallel }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `AOGNET_PLAN_TRIALS` - Max evaluated plans (default: 512)
    /// * `AOGNET_PLAN_SWEEPS` - Threshold guesses (default: 3)
    /// * `AOGNET_PLAN_THRESHOLDS` - Evenly spaced thresholds (default: 6)
    /// * `AOGNET_PLAN_SERIAL` - Evaluate candidates on the calling thread if set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PlannerConfig::from_env`], reading variables through `lookup`.
    /// Unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_trials = lookup("AOGNET_PLAN_TRIALS").and_then(|s| s.parse().ok()).unwrap_or(512);
        let initial_sweeps = lookup("AOGNET_PLAN_SWEEPS").and_then(|s| s.parse().ok()).unwrap_or(3);
        let threshold_trials = lookup("AOGNET_PLAN_THRESHOLDS").and_then(|s| s.parse().ok()).unwrap_or(6);
        let parallel = lookup("AOGNET_PLAN_SERIAL").is_none();

        Self { max_trials, initial_sweeps, threshold_trials, parallel }
    }
}
