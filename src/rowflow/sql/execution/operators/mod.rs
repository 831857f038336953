//! Pull-iterator operators for row streams.
//!
//! This module contains the operator contract shared by every row-stream
//! producer in the engine, plus the operators of this core:
//! - [`RowBuffer`] - restartable in-memory row stream (leaf scans, result
//!   streams)
//! - [`AggregateOperator`] - grouped aggregation over one upstream child
//!
//! Evaluation is a synchronous pull: a caller opens an operator, repeatedly
//! asks it for the next row, and closes it. Operators compose by owning
//! their children behind the same contract, so the aggregate operator can
//! sit under or above any other operator without special-casing.

pub mod aggregate;
pub mod source;

pub use aggregate::AggregateOperator;
pub use source::RowBuffer;

use crate::rowflow::sql::error::SqlResult;
use crate::rowflow::sql::execution::row::Row;
use crate::rowflow::sql::execution::schema::Schema;
use std::sync::Arc;

/// Lifecycle state of a pull operator.
///
/// Every operator starts `Closed`, becomes `Open` through a successful
/// `open()`, and returns to `Closed` through `close()`. All pull calls
/// made while `Closed` fail with an illegal-state error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorState {
    /// Not open: only `open()` and `output_schema()` are valid
    Closed,
    /// Open and producing rows
    Open,
}

/// The pull-iterator contract implemented by every row-stream operator.
///
/// `fetch_next` returning `Ok(None)` and `has_next` returning `Ok(false)`
/// signal normal exhaustion; they are not errors and the operator stays
/// open. Exhausting the stream or hitting an error are the only ways
/// evaluation stops early.
pub trait RowOperator {
    /// Open the operator, acquiring whatever it needs to produce rows.
    ///
    /// Fails with an illegal-state error if already open, and propagates
    /// any failure from opening a child unchanged.
    fn open(&mut self) -> SqlResult<()>;

    /// Check whether another row is available without consuming it.
    ///
    /// Fails with an illegal-state error if not open. Stable across
    /// repeated calls.
    fn has_next(&mut self) -> SqlResult<bool>;

    /// Consume and return the next row, or `None` when exhausted.
    ///
    /// Fails with an illegal-state error if not open.
    fn fetch_next(&mut self) -> SqlResult<Option<Row>>;

    /// Reset the stream to its beginning.
    ///
    /// Fails with an illegal-state error if not open.
    fn rewind(&mut self) -> SqlResult<()>;

    /// Close the operator and release its resources.
    ///
    /// Fails with an illegal-state error if not open; safe to call once
    /// per open.
    fn close(&mut self) -> SqlResult<()>;

    /// Schema of the rows this operator produces.
    ///
    /// Available at any time after construction, independent of state.
    fn output_schema(&self) -> Arc<Schema>;
}
