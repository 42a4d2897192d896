//! Property-based tests for memory planning.

mod planner_props;
