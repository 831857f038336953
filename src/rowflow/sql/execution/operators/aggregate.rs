//! The grouped aggregation operator.
//!
//! [`AggregateOperator`] adapts an [`IntegerAggregator`] into the pull
//! contract used by every other operator. Grouped aggregation is
//! inherently blocking: any input row can change any group's final value,
//! so `open()` drains the upstream child completely before the first
//! output row is available. After the drain the computed groups are a
//! snapshot for the operator's lifetime; `rewind` re-reads them without
//! touching the child again.

use crate::rowflow::sql::error::{SqlError, SqlResult};
use crate::rowflow::sql::execution::aggregation::{AggregateFunction, IntegerAggregator};
use crate::rowflow::sql::execution::operators::{OperatorState, RowBuffer, RowOperator};
use crate::rowflow::sql::execution::row::Row;
use crate::rowflow::sql::execution::schema::Schema;
use crate::rowflow::sql::execution::types::FieldType;
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

/// Pull operator computing one aggregate (COUNT, SUM, AVG, MIN, MAX) over
/// one integer column of its child's stream, optionally grouped by one
/// column.
///
/// Output shape, derived once at construction: without grouping, a single
/// `INTEGER` field named after the aggregated input field; with grouping,
/// the group-by field's type and name first, then the aggregate field.
pub struct AggregateOperator {
    child: Box<dyn RowOperator>,
    aggregate_index: usize,
    group_by_index: Option<usize>,
    function: AggregateFunction,
    output_schema: Arc<Schema>,
    aggregator: IntegerAggregator,
    results: Option<RowBuffer>,
    state: OperatorState,
}

// Manual impl: the child is a `Box<dyn RowOperator>` and trait objects
// carry no Debug bound.
impl fmt::Debug for AggregateOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateOperator")
            .field("aggregate_index", &self.aggregate_index)
            .field("group_by_index", &self.group_by_index)
            .field("function", &self.function)
            .field("output_schema", &self.output_schema)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AggregateOperator {
    /// Create an aggregate operator over `child`.
    ///
    /// `aggregate_index` and `group_by_index` are positions in the child's
    /// output rows. Both are validated against the child's schema eagerly,
    /// and the declared type of the aggregate column must be `INTEGER`;
    /// any violation is a construction error, never deferred.
    pub fn new(
        child: Box<dyn RowOperator>,
        aggregate_index: usize,
        group_by_index: Option<usize>,
        function: AggregateFunction,
    ) -> SqlResult<Self> {
        let child_schema = child.output_schema();

        let aggregate_type = child_schema.field_type(aggregate_index)?;
        if aggregate_type != FieldType::Integer {
            return Err(SqlError::type_error(
                FieldType::Integer.as_str(),
                aggregate_type.as_str(),
                None,
            ));
        }
        let aggregate_name = child_schema
            .field_name(aggregate_index)?
            .map(|s| s.to_string());

        let (output_schema, group_by_type) = match group_by_index {
            None => (
                Schema::with_names(vec![FieldType::Integer], vec![aggregate_name])?,
                None,
            ),
            Some(index) => {
                let group_by_type = child_schema.field_type(index)?;
                let group_by_name = child_schema.field_name(index)?.map(|s| s.to_string());
                (
                    Schema::with_names(
                        vec![group_by_type, FieldType::Integer],
                        vec![group_by_name, aggregate_name],
                    )?,
                    Some(group_by_type),
                )
            }
        };
        let output_schema = Arc::new(output_schema);

        let aggregator = IntegerAggregator::new(
            group_by_index,
            group_by_type,
            aggregate_index,
            function,
            output_schema.clone(),
        )?;

        Ok(AggregateOperator {
            child,
            aggregate_index,
            group_by_index,
            function,
            output_schema,
            aggregator,
            results: None,
            state: OperatorState::Closed,
        })
    }

    /// The grouping field index in input-row terms, or `None` when this
    /// aggregate has no grouping
    pub fn group_by_index(&self) -> Option<usize> {
        self.group_by_index
    }

    /// The grouping field's name in output-row terms.
    ///
    /// `None` when not grouping or when the group-by input field is
    /// unnamed.
    pub fn group_by_name(&self) -> Option<&str> {
        self.group_by_index?;
        self.output_schema.field_name(0).ok().flatten()
    }

    /// The aggregate field index in input-row terms
    pub fn aggregate_index(&self) -> usize {
        self.aggregate_index
    }

    /// The aggregate field's name in output-row terms.
    ///
    /// `None` when the aggregated input field is unnamed.
    pub fn aggregate_name(&self) -> Option<&str> {
        let index = if self.group_by_index.is_some() { 1 } else { 0 };
        self.output_schema.field_name(index).ok().flatten()
    }

    /// The aggregation operator in use
    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    /// Release the child after a failed open, keeping the original error.
    fn release_child_after(&mut self, error: SqlError) -> SqlError {
        if let Err(close_error) = self.child.close() {
            warn!(
                "failed to release child after aborted aggregation open: {}",
                close_error
            );
        }
        error
    }

    fn results_mut(&mut self) -> SqlResult<&mut RowBuffer> {
        match self.results.as_mut() {
            Some(results) => Ok(results),
            None => Err(SqlError::illegal_state(
                "AggregateOperator",
                "operator is not open",
            )),
        }
    }
}

impl RowOperator for AggregateOperator {
    /// Open the child and drain it completely into the aggregator, then
    /// open the finished result stream for pulling.
    ///
    /// A child or merge failure propagates unchanged, the child is
    /// released, and the operator remains closed and unusable.
    fn open(&mut self) -> SqlResult<()> {
        if self.state == OperatorState::Open {
            return Err(SqlError::illegal_state(
                "AggregateOperator",
                "operator is already open",
            ));
        }

        self.child.open()?;
        let mut merged = 0usize;
        loop {
            let row = match self.child.fetch_next() {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(e) => return Err(self.release_child_after(e)),
            };
            if let Err(e) = self.aggregator.merge(&row) {
                return Err(self.release_child_after(e));
            }
            merged += 1;
        }

        let mut results = match self.aggregator.results() {
            Ok(results) => results,
            Err(e) => return Err(self.release_child_after(e)),
        };
        results.open()?;
        debug!(
            "aggregation drained {} rows into {} groups ({} over field {})",
            merged,
            self.aggregator.group_count(),
            self.function,
            self.aggregate_index
        );

        self.results = Some(results);
        self.state = OperatorState::Open;
        Ok(())
    }

    fn has_next(&mut self) -> SqlResult<bool> {
        self.results_mut()?.has_next()
    }

    /// Pull the next output row from the computed groups. Never re-touches
    /// the upstream child.
    fn fetch_next(&mut self) -> SqlResult<Option<Row>> {
        self.results_mut()?.fetch_next()
    }

    /// Reset the result stream to its beginning without re-draining the
    /// upstream or recomputing aggregates.
    fn rewind(&mut self) -> SqlResult<()> {
        self.results_mut()?.rewind()
    }

    fn close(&mut self) -> SqlResult<()> {
        if self.state != OperatorState::Open {
            return Err(SqlError::illegal_state(
                "AggregateOperator",
                "operator is not open",
            ));
        }
        if let Some(results) = self.results.as_mut() {
            results.close()?;
        }
        self.results = None;
        self.child.close()?;
        self.state = OperatorState::Closed;
        debug!("aggregation operator closed");
        Ok(())
    }

    fn output_schema(&self) -> Arc<Schema> {
        self.output_schema.clone()
    }
}
