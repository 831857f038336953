//! Query evaluation engine: typed rows and streaming aggregation.
//!
//! This module contains the data model and the operators of the evaluation
//! core:
//! - [`types`] - The field value type system ([`types::FieldValue`], [`types::FieldType`])
//! - [`schema`] - Ordered, fixed row shapes ([`schema::Schema`])
//! - [`row`] - Positional typed records bound to a schema ([`row::Row`])
//! - [`aggregation`] - Single-pass grouped aggregation state
//! - [`operators`] - The pull-iterator contract and the aggregate operator
//!
//! Evaluation is single-threaded and synchronous: operators pull rows from
//! their child on demand, and the only blocking point is the child's own
//! `fetch_next`. Schemas are immutable and shared by reference; rows are
//! owned and mutated only by their producer.

pub mod aggregation;
pub mod operators;
pub mod row;
pub mod schema;
pub mod types;

pub use aggregation::{AggregateFunction, IntegerAggregator};
pub use operators::{AggregateOperator, OperatorState, RowBuffer, RowOperator};
pub use row::{Row, RowLocation};
pub use schema::{FieldDef, Schema};
pub use types::{FieldType, FieldValue};
