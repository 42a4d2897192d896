pub mod config;
pub mod graph;
pub mod tree;
