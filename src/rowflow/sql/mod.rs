// Relational query evaluation core for rowflow
// Provides the typed row model and the streaming aggregation operator

pub mod error;
pub mod execution;

// Re-export main API
pub use error::{SqlError, SqlResult};
pub use execution::aggregation::{AggregateFunction, IntegerAggregator};
pub use execution::operators::{AggregateOperator, RowBuffer, RowOperator};
pub use execution::row::Row;
pub use execution::schema::Schema;
pub use execution::types::{FieldType, FieldValue};

// Version and feature info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FEATURES: &[&str] = &[
    "typed_rows",          // positional, bounds-checked field access
    "schema_merge",        // positional schema concatenation for join output shapes
    "grouped_aggregation", // single-pass GROUP BY folding
    "aggregate_functions", // COUNT, SUM, AVG, MIN, MAX
    "pull_iterators",      // open/fetch_next/rewind/close operator contract
];
