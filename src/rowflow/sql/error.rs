/*!
# Query Evaluation Error Handling

This module provides error handling for the query evaluation core. All
operations return well-structured errors with enough context to tell the
failure classes apart at the call site.

## Error Categories

The evaluation core defines four categories of errors:

- **Invalid Argument Errors**: bad constructor inputs (out-of-range field
  indices, zero-field schemas, mismatched type/name lists), detected eagerly
  at construction
- **Type Errors**: a field's runtime type does not match what an operation
  requires, detected per row during aggregation
- **Schema Errors**: a row arrives with a schema different from the one the
  aggregation started with, or a field lookup fails
- **Illegal State Errors**: a pull-protocol call (`fetch_next`, `rewind`,
  `close`) made while an operator is not open, or `open` on an open operator

Exhaustion of a row stream is NOT an error: `fetch_next` returning
`Ok(None)` and `has_next` returning `Ok(false)` are the normal terminal
condition, distinct from all of the above.

## Error Propagation

All errors are surfaced synchronously to the immediate caller; nothing is
swallowed or retried internally. A failed merge during an aggregate drain
aborts the whole aggregation and leaves the operator unusable.

The module provides the `SqlResult<T>` alias for fallible operations.
Errors implement the standard Rust error traits (`std::error::Error`,
`Display`, `Debug`) for seamless integration with caller error handling.
*/

use std::fmt;

/// Result type for all fallible query evaluation operations.
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for query evaluation operations.
///
/// Each variant carries the context relevant to its failure class, enabling
/// precise error reporting without string matching.
///
/// # Examples
///
/// ```rust
/// use rowflow::rowflow::sql::error::SqlError;
///
/// let arg_err = SqlError::invalid_argument("field index 7 out of range for 2 fields");
/// let type_err = SqlError::type_error("INTEGER", "TEXT", Some("abc".to_string()));
/// let state_err = SqlError::illegal_state("AggregateOperator", "operator is not open");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlError {
    /// Invalid constructor or call arguments.
    ///
    /// Occurs when an operator or schema is built from malformed inputs:
    /// grouping/aggregate indices out of range, zero-field schemas, or
    /// type/name lists of different lengths. Always detected eagerly.
    InvalidArgument {
        /// Description of the rejected argument
        message: String,
    },

    /// Runtime type does not match the required type.
    ///
    /// Occurs when an aggregate field's value is not of the type the
    /// aggregator is specialized for. Detected per row during `merge`;
    /// the failed merge is not partially applied.
    TypeError {
        /// Required type name
        expected: String,
        /// Type name actually encountered
        actual: String,
        /// Display form of the offending value, if available
        value: Option<String>,
    },

    /// Schema validation failure.
    ///
    /// Occurs when a row's schema differs from the schema the aggregation
    /// started with, or when a name lookup finds no matching field.
    SchemaError {
        /// Description of the schema failure
        message: String,
        /// Name of the column involved, if applicable
        column: Option<String>,
    },

    /// Pull-protocol call made in the wrong operator state.
    ///
    /// Occurs when `fetch_next`, `rewind`, or `close` is called on a closed
    /// operator, or `open` on an operator that is already open.
    IllegalState {
        /// Name of the operator that rejected the call
        operator: String,
        /// Description of the state violation
        message: String,
    },
}

impl fmt::Display for SqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlError::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            SqlError::TypeError {
                expected,
                actual,
                value,
            } => {
                if let Some(val) = value {
                    write!(
                        f,
                        "Type error: expected {}, got {} for value '{}'",
                        expected, actual, val
                    )
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, actual)
                }
            }
            SqlError::SchemaError { message, column } => {
                if let Some(col) = column {
                    write!(f, "Schema error for column '{}': {}", col, message)
                } else {
                    write!(f, "Schema error: {}", message)
                }
            }
            SqlError::IllegalState { operator, message } => {
                write!(f, "Illegal state in {}: {}", operator, message)
            }
        }
    }
}

impl std::error::Error for SqlError {}

impl SqlError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SqlError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a type error with expected/actual type names
    pub fn type_error(
        expected: impl Into<String>,
        actual: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        SqlError::TypeError {
            expected: expected.into(),
            actual: actual.into(),
            value,
        }
    }

    /// Create a schema error, optionally naming the column involved
    pub fn schema_error(message: impl Into<String>, column: Option<String>) -> Self {
        SqlError::SchemaError {
            message: message.into(),
            column,
        }
    }

    /// Create an illegal state error for an operator
    pub fn illegal_state(operator: impl Into<String>, message: impl Into<String>) -> Self {
        SqlError::IllegalState {
            operator: operator.into(),
            message: message.into(),
        }
    }
}
