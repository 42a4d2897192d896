//! Proptest strategies for AOG configurations.

use proptest::prelude::*;

use crate::AogConfig;

/// Consistent configurations with small domains (node counts grow cubically).
pub fn valid_config() -> impl Strategy<Value = AogConfig> {
    (1usize..=7)
        .prop_flat_map(|dim| (Just(dim), 1..=dim))
        .prop_flat_map(|(dim, min_size)| (Just(dim), Just(min_size), min_size..=dim + 1, any::<bool>()))
        .prop_map(|(dim, min_size, tnode_max_size, unit_off)| AogConfig::new(dim, min_size, tnode_max_size, unit_off))
}

/// Configurations where every range of length >= 1 is decomposable.
pub fn unit_config() -> impl Strategy<Value = AogConfig> {
    (1usize..=7, 1usize..=4, any::<bool>())
        .prop_map(|(dim, max, unit_off)| AogConfig::new(dim, 1, max.min(dim), unit_off))
}
