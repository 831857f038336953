//! Execution engine tests
//!
//! Tests for the typed row model, aggregation state, and pull operators.

pub mod operators;
pub mod schema_test;
