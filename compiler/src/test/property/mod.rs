//! Property-based tests for compilation.
