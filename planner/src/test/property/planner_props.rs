use proptest::prelude::*;

use super::generators::{compiled_graph, graph_and_drops};
use crate::{MemoryPlan, PlannerConfig, RecomputeBudget, get_cost, plan_with, simulate};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn retain_all_bounds_every_plan((graph, shape, drops) in graph_and_drops()) {
        let baseline = get_cost(&graph, &MemoryPlan::retain_all(&graph), &shape).unwrap();
        let plan = MemoryPlan::from_dropped(&graph, &drops);
        prop_assert!(get_cost(&graph, &plan, &shape).unwrap() <= baseline);
    }

    #[test]
    fn each_dropped_node_replays_once((graph, shape, drops) in graph_and_drops()) {
        let plan = MemoryPlan::from_dropped(&graph, &drops);
        let report = simulate(&graph, &plan, &shape).unwrap();
        prop_assert_eq!(report.recompute_cost, plan.recompute_cost(&graph));
        prop_assert_eq!(report.peak, report.forward_peak.max(report.backward_peak));
    }

    #[test]
    fn replay_stays_inside_segment((graph, _shape, drops) in graph_and_drops()) {
        let plan = MemoryPlan::from_dropped(&graph, &drops);
        for (i, decision) in plan.decisions().iter().enumerate() {
            if let crate::Decision::Recompute { segment, replay } = decision {
                prop_assert_eq!(replay.last(), Some(&i));
                prop_assert!(replay.iter().all(|r| segment.contains(r) && plan.is_dropped(*r)));
                prop_assert!(replay.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn planned_peak_is_monotone_and_within_budget(
        (graph, shape) in compiled_graph(),
        fraction in 0u64..=4,
    ) {
        let max_cost = graph.total_cost() * fraction / 4;
        let config = PlannerConfig::builder().max_trials(64).build();
        let result = plan_with(&graph, &shape, &RecomputeBudget::new(max_cost), &config).unwrap();

        let baseline = get_cost(&graph, &MemoryPlan::retain_all(&graph), &shape).unwrap();
        prop_assert!(get_cost(&graph, &result.plan, &shape).unwrap() <= baseline);
        prop_assert!(result.plan.recompute_cost(&graph) <= max_cost);
        prop_assert!(result.trials <= 64);
    }
}
