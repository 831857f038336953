//! Restartable in-memory row streams.

use crate::rowflow::sql::error::{SqlError, SqlResult};
use crate::rowflow::sql::execution::operators::{OperatorState, RowOperator};
use crate::rowflow::sql::execution::row::Row;
use crate::rowflow::sql::execution::schema::Schema;
use std::sync::Arc;

/// A pull operator over a stable, in-memory sequence of rows.
///
/// The rows are stored in a plain `Vec` and never consumed destructively,
/// so `rewind` is an O(1) cursor reset and the stream can be re-iterated
/// any number of times. Serves as the aggregator's result stream and as a
/// leaf scan over pre-materialized rows.
#[derive(Debug)]
pub struct RowBuffer {
    schema: Arc<Schema>,
    rows: Vec<Row>,
    cursor: usize,
    state: OperatorState,
}

impl RowBuffer {
    /// Create a buffer over `rows`, all of which must be bound to a schema
    /// equal to `schema`.
    ///
    /// Fails with a schema error on the first row whose schema differs.
    pub fn new(schema: Arc<Schema>, rows: Vec<Row>) -> SqlResult<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.schema().as_ref() != schema.as_ref() {
                return Err(SqlError::schema_error(
                    format!("row {} does not match the buffer schema", i),
                    None,
                ));
            }
        }
        Ok(RowBuffer {
            schema,
            rows,
            cursor: 0,
            state: OperatorState::Closed,
        })
    }

    /// Number of rows in the buffer, independent of cursor position
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the buffer holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn ensure_open(&self) -> SqlResult<()> {
        if self.state != OperatorState::Open {
            return Err(SqlError::illegal_state("RowBuffer", "operator is not open"));
        }
        Ok(())
    }
}

impl RowOperator for RowBuffer {
    fn open(&mut self) -> SqlResult<()> {
        if self.state == OperatorState::Open {
            return Err(SqlError::illegal_state("RowBuffer", "operator is already open"));
        }
        self.cursor = 0;
        self.state = OperatorState::Open;
        Ok(())
    }

    fn has_next(&mut self) -> SqlResult<bool> {
        self.ensure_open()?;
        Ok(self.cursor < self.rows.len())
    }

    fn fetch_next(&mut self) -> SqlResult<Option<Row>> {
        self.ensure_open()?;
        match self.rows.get(self.cursor) {
            Some(row) => {
                self.cursor += 1;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    fn rewind(&mut self) -> SqlResult<()> {
        self.ensure_open()?;
        self.cursor = 0;
        Ok(())
    }

    fn close(&mut self) -> SqlResult<()> {
        self.ensure_open()?;
        self.state = OperatorState::Closed;
        Ok(())
    }

    fn output_schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }
}
