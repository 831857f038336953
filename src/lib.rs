//! # rowflow
//!
//! A typed-row query evaluation core: fixed schemas over heterogeneously
//! typed rows, and a streaming, single-pass grouped aggregation operator
//! that composes through a pull-iterator contract.
//!
//! ## Features
//!
//! - **Typed Row Model**: `Schema` / `Row` value types with positional,
//!   bounds-checked field access and structural equality
//! - **Grouped Aggregation**: COUNT, SUM, AVG, MIN, MAX folded in one pass
//!   with memory bounded by the number of distinct groups
//! - **Pull-Iterator Operators**: `open`/`fetch_next`/`rewind`/`close`
//!   lifecycle so the aggregate operator chains under any other operator
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use rowflow::rowflow::sql::execution::aggregation::AggregateFunction;
//! use rowflow::rowflow::sql::execution::operators::{AggregateOperator, RowBuffer, RowOperator};
//! use rowflow::rowflow::sql::execution::row::Row;
//! use rowflow::rowflow::sql::execution::schema::Schema;
//! use rowflow::rowflow::sql::execution::types::{FieldType, FieldValue};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = Arc::new(Schema::with_names(
//!         vec![FieldType::Integer, FieldType::Integer],
//!         vec![Some("category".to_string()), Some("amount".to_string())],
//!     )?);
//!
//!     let mut rows = Vec::new();
//!     for (category, amount) in [(1, 10), (1, 20), (2, 5)] {
//!         let mut row = Row::new(schema.clone());
//!         row.set_field(0, FieldValue::Integer(category))?;
//!         row.set_field(1, FieldValue::Integer(amount))?;
//!         rows.push(row);
//!     }
//!
//!     let scan = RowBuffer::new(schema, rows)?;
//!     let mut agg =
//!         AggregateOperator::new(Box::new(scan), 1, Some(0), AggregateFunction::Sum)?;
//!
//!     agg.open()?;
//!     while let Some(row) = agg.fetch_next()? {
//!         print!("{}", row);
//!     }
//!     agg.close()?;
//!     Ok(())
//! }
//! ```

#![allow(clippy::collapsible_if)]
#![allow(clippy::needless_doctest_main)]
#![allow(clippy::large_enum_variant)]

pub mod rowflow;

// Re-export the main API at the crate root for convenience
pub use crate::rowflow::sql::execution::aggregation::{AggregateFunction, IntegerAggregator};
pub use crate::rowflow::sql::execution::operators::{AggregateOperator, RowBuffer, RowOperator};
pub use crate::rowflow::sql::execution::row::{Row, RowLocation};
pub use crate::rowflow::sql::execution::schema::{FieldDef, Schema};
pub use crate::rowflow::sql::execution::types::{FieldType, FieldValue};
pub use crate::rowflow::sql::{SqlError, SqlResult};
