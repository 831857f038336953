//! Operator tests
//!
//! Tests for the pull-iterator contract and the aggregate operator.

pub mod source_test;
