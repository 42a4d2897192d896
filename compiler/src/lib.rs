//! Compiles an AND-OR graph into an executable computation graph.
//!
//! One computation node is emitted per AOG node, bound to an operator obtained
//! from an [`OperatorFactory`] and wired to its operands' outputs. Shapes are
//! inferred alongside, so every node carries a concrete output shape.
//!
//! # Module Organization
//!
//! - [`shape`] - Static tensor shapes
//! - [`operator`] - The operator factory seam
//! - [`factory`] - Reference channel-split factory
//! - [`graph`] - Compiled graphs in execution order
//! - [`compile`] - The compiler
//! - [`error`] - Error types and result handling

pub mod compile;
pub mod error;
pub mod factory;
pub mod graph;
pub mod operator;
pub mod shape;


pub use compile::{CompileOptions, compile, compile_with};
pub use error::{Error, Result};
pub use factory::{ChannelSplitFactory, CombineRule, UnitOp};
pub use graph::{ComputationGraph, ComputationNode, ValueRef};
pub use operator::{Binding, OperatorFactory, OperatorRequest};
pub use shape::Shape;
