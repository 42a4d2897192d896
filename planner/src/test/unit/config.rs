use crate::{PlannerConfig, RecomputeBudget};

#[test]
fn test_planner_config_defaults() {
    let config = PlannerConfig::default();
    assert_eq!(config, PlannerConfig::builder().build());
    assert_eq!(config.initial_sweeps, 3);
    assert_eq!(config.threshold_trials, 6);
    assert!(config.parallel);
}

#[test]
fn test_planner_config_builder() {
    let config = PlannerConfig::builder().max_trials(8).parallel(false).build();
    assert_eq!(config.max_trials, 8);
    assert!(!config.parallel);
}

#[test]
fn test_budget() {
    let budget = RecomputeBudget::new(10).with_memory_limit(100);
    assert!(budget.admits_cost(10));
    assert!(!budget.admits_cost(11));
    assert!(budget.admits_peak(100));
    assert!(!budget.admits_peak(101));

    assert_eq!(RecomputeBudget::builder().max_cost(10).memory_limit(100).build(), budget);
    assert!(RecomputeBudget::unlimited().admits_peak(u64::MAX));
    assert!(!RecomputeBudget::none().admits_cost(1));
}

#[test]
fn test_from_lookup() {
    let vars = [("AOGNET_PLAN_TRIALS", "32"), ("AOGNET_PLAN_THRESHOLDS", "oops"), ("AOGNET_PLAN_SERIAL", "1")];
    let config = PlannerConfig::from_lookup(|key| vars.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string()));
    assert_eq!(config.max_trials, 32);
    assert_eq!(config.initial_sweeps, 3);
    assert_eq!(config.threshold_trials, 6);
    assert!(!config.parallel);

    assert_eq!(PlannerConfig::from_lookup(|_| None), PlannerConfig::default());
}

// The only test in this crate that touches the process environment.
#[test]
fn test_from_env() {
    // SAFETY: no other test reads or writes these variables.
    unsafe {
        std::env::set_var("AOGNET_PLAN_TRIALS", "40");
        std::env::set_var("AOGNET_PLAN_SWEEPS", "2");
        std::env::remove_var("AOGNET_PLAN_THRESHOLDS");
        std::env::remove_var("AOGNET_PLAN_SERIAL");
    }
    let config = PlannerConfig::from_env();
    unsafe {
        std::env::remove_var("AOGNET_PLAN_TRIALS");
        std::env::remove_var("AOGNET_PLAN_SWEEPS");
    }

    assert_eq!(config, PlannerConfig::builder().max_trials(40).initial_sweeps(2).build());
}
