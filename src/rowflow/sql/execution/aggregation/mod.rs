//! Single-pass grouped aggregation.
//!
//! This module contains the accumulator side of aggregation:
//! - [`AggregateFunction`] - the supported aggregate operators
//! - [`IntegerAggregator`] - folds a stream of rows into per-group running
//!   state, one pass, O(distinct groups) memory
//!
//! The pull-operator wrapper that drives an aggregator lives in
//! [`crate::rowflow::sql::execution::operators::aggregate`].

pub mod accumulator;

pub use accumulator::{AggregateFunction, IntegerAggregator};
