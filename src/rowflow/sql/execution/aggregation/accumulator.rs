//! Accumulator for integer aggregation.
//!
//! [`IntegerAggregator`] folds an unbounded but logically finite stream of
//! rows into a finite set of group results, keyed by the group-by field
//! value. Individual rows are discarded as soon as they are folded; only
//! per-group running state is retained.

use crate::rowflow::sql::error::{SqlError, SqlResult};
use crate::rowflow::sql::execution::operators::RowBuffer;
use crate::rowflow::sql::execution::row::Row;
use crate::rowflow::sql::execution::schema::Schema;
use crate::rowflow::sql::execution::types::{FieldType, FieldValue};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The supported aggregate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFunction {
    /// Number of rows per group
    Count,
    /// Arithmetic sum of the aggregate field per group
    Sum,
    /// Running integer mean per group, truncating toward zero
    Avg,
    /// Minimum aggregate field value per group
    Min,
    /// Maximum aggregate field value per group
    Max,
}

impl AggregateFunction {
    /// Function name as it appears in output naming and diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Running state for a single group.
///
/// `value` is always the currently exposed aggregate. For AVG, `count` and
/// `sum` are maintained separately and the exposed value is the truncating
/// integer mean, recomputed on every update.
#[derive(Debug, Clone)]
struct GroupState {
    value: i64,
    count: i64,
    sum: i64,
}

impl GroupState {
    /// State after the first value seen for a group
    fn first(function: AggregateFunction, v: i64) -> Self {
        let value = match function {
            AggregateFunction::Count => 1,
            AggregateFunction::Sum
            | AggregateFunction::Avg
            | AggregateFunction::Min
            | AggregateFunction::Max => v,
        };
        GroupState {
            value,
            count: 1,
            sum: v,
        }
    }

    /// Fold one more value into this group's state
    fn update(&mut self, function: AggregateFunction, v: i64) {
        self.count += 1;
        self.sum += v;
        self.value = match function {
            AggregateFunction::Count => self.value + 1,
            AggregateFunction::Sum => self.value + v,
            AggregateFunction::Min => self.value.min(v),
            AggregateFunction::Max => self.value.max(v),
            // i64 division truncates toward zero, e.g. -7 / 2 == -3
            AggregateFunction::Avg => self.sum / self.count,
        };
    }
}

/// Single-pass accumulator for integer aggregates, optionally grouped by
/// one field.
///
/// One aggregator instance aggregates exactly one homogeneous stream: the
/// first merged row fixes the expected input schema, and every later row
/// must carry an equal schema. Merging never deduplicates; every row
/// counts.
///
/// The group key is the group-by field's value; `None` is the single
/// implicit key used when the aggregator was built without grouping.
#[derive(Debug)]
pub struct IntegerAggregator {
    group_by_index: Option<usize>,
    group_by_type: Option<FieldType>,
    aggregate_index: usize,
    function: AggregateFunction,
    output_schema: Arc<Schema>,
    input_schema: Option<Arc<Schema>>,
    groups: FxHashMap<Option<FieldValue>, GroupState>,
}

impl IntegerAggregator {
    /// Create an aggregator.
    ///
    /// `group_by_index` is the grouping field's index in input rows, or
    /// `None` for a single implicit group. `group_by_type` is the declared
    /// type of that field and is ignored when not grouping.
    /// `output_schema` is the shape of the emitted rows and must have one
    /// field without grouping, or two (group key, then aggregate value)
    /// with grouping; a mismatch is rejected eagerly.
    pub fn new(
        group_by_index: Option<usize>,
        group_by_type: Option<FieldType>,
        aggregate_index: usize,
        function: AggregateFunction,
        output_schema: Arc<Schema>,
    ) -> SqlResult<Self> {
        let expected_arity = if group_by_index.is_some() { 2 } else { 1 };
        if output_schema.field_count() != expected_arity {
            return Err(SqlError::invalid_argument(format!(
                "{} output schema must have {} field(s), got {}",
                function,
                expected_arity,
                output_schema.field_count()
            )));
        }
        Ok(IntegerAggregator {
            group_by_index,
            group_by_type,
            aggregate_index,
            function,
            output_schema,
            input_schema: None,
            groups: FxHashMap::default(),
        })
    }

    /// The grouping field index this aggregator was built with
    pub fn group_by_index(&self) -> Option<usize> {
        self.group_by_index
    }

    /// The declared type of the grouping field, if grouping
    pub fn group_by_type(&self) -> Option<FieldType> {
        self.group_by_type
    }

    /// The aggregate field index this aggregator was built with
    pub fn aggregate_index(&self) -> usize {
        self.aggregate_index
    }

    /// The aggregate operator in use
    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    /// Schema of the rows [`results`](Self::results) emits
    pub fn output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    /// Number of distinct groups seen so far
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Fold one row into the aggregate.
    ///
    /// Fails with a type error if the aggregate field is unset or not an
    /// integer, and with a schema error if the row's schema differs from
    /// the first merged row's schema or the group-by field is unset. All
    /// checks run before any state changes, so a failed merge leaves the
    /// group table exactly as it was.
    pub fn merge(&mut self, row: &Row) -> SqlResult<()> {
        let v = match row.field(self.aggregate_index)? {
            Some(value) => value.as_integer()?,
            None => {
                return Err(SqlError::type_error(
                    FieldType::Integer.as_str(),
                    "unset field",
                    None,
                ));
            }
        };

        if let Some(expected) = &self.input_schema {
            if expected.as_ref() != row.schema().as_ref() {
                return Err(SqlError::schema_error(
                    "row schema differs from the schema this aggregation started with",
                    None,
                ));
            }
        }

        let key = match self.group_by_index {
            None => None,
            Some(index) => match row.field(index)? {
                Some(value) => Some(value.clone()),
                None => {
                    return Err(SqlError::schema_error(
                        "group-by field is unset",
                        row.schema().field_name(index)?.map(|s| s.to_string()),
                    ));
                }
            },
        };

        // All checks passed; state changes only happen from here on
        if self.input_schema.is_none() {
            self.input_schema = Some(row.schema().clone());
        }
        match self.groups.get_mut(&key) {
            Some(state) => state.update(self.function, v),
            None => {
                self.groups.insert(key, GroupState::first(self.function, v));
            }
        }
        Ok(())
    }

    /// Produce the finished groups as a restartable row stream.
    ///
    /// One output row per known group, bound to the output schema:
    /// `[group value, aggregate value]` when grouping, `[aggregate value]`
    /// otherwise. Emission order follows the internal hash table and is
    /// NOT guaranteed; callers must not rely on any particular order.
    /// Zero merged rows yield an immediately exhausted stream.
    pub fn results(&self) -> SqlResult<RowBuffer> {
        let mut rows = Vec::with_capacity(self.groups.len());
        for (key, state) in &self.groups {
            let mut row = Row::new(self.output_schema.clone());
            match key {
                Some(group_value) => {
                    row.set_field(0, group_value.clone())?;
                    row.set_field(1, FieldValue::Integer(state.value))?;
                }
                None => row.set_field(0, FieldValue::Integer(state.value))?,
            }
            rows.push(row);
        }
        RowBuffer::new(self.output_schema.clone(), rows)
    }
}
