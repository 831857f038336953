//! Rows: positional typed records bound to exactly one schema.
//!
//! A [`Row`] is created by a producer (a scan, a join, or the aggregator's
//! output builder), mutated only by that producer while it is being filled,
//! and then handed downstream as logically immutable. Rows are never shared
//! for concurrent mutation.

use crate::rowflow::sql::error::{SqlError, SqlResult};
use crate::rowflow::sql::execution::schema::Schema;
use crate::rowflow::sql::execution::types::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque storage-location tag for a row.
///
/// Meaningful only to the storage layer that produced the row; this core
/// carries it through untouched. Computed (aggregated) rows have no
/// location and leave it absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowLocation {
    /// Identifier of the page holding the row
    pub page: u64,
    /// Slot of the row within its page
    pub slot: u32,
}

impl RowLocation {
    /// Create a location tag from page and slot
    pub fn new(page: u64, slot: u32) -> Self {
        RowLocation { page, slot }
    }
}

/// One record of typed field values conforming to exactly one schema.
///
/// The field vector's length always equals the bound schema's arity. A
/// slot holds either "unset" (`None`) or a value; assignment accepts any
/// field value without checking it against the declared column type, and
/// all aggregation and display logic assumes the producer kept them in
/// agreement.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<Schema>,
    fields: Vec<Option<FieldValue>>,
    location: Option<RowLocation>,
}

impl Row {
    /// Create a new row with all fields unset, bound to the given schema.
    pub fn new(schema: Arc<Schema>) -> Self {
        let arity = schema.field_count();
        Row {
            schema,
            fields: vec![None; arity],
            location: None,
        }
    }

    /// The schema this row is bound to
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Value of the field at `index`, or `None` if it has not been set.
    ///
    /// Fails with an invalid-argument error if `index` is out of range.
    pub fn field(&self, index: usize) -> SqlResult<Option<&FieldValue>> {
        self.fields
            .get(index)
            .map(|slot| slot.as_ref())
            .ok_or_else(|| self.index_error(index))
    }

    /// Set the field at `index` to `value`.
    ///
    /// Fails with an invalid-argument error if `index` is out of range.
    /// The value's runtime type is not checked against the declared column
    /// type here.
    pub fn set_field(&mut self, index: usize, value: FieldValue) -> SqlResult<()> {
        let arity = self.fields.len();
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(SqlError::invalid_argument(format!(
                "field index {} out of range for row with {} fields",
                index, arity
            ))),
        }
    }

    /// Storage location of this row, if the producer tagged one
    pub fn location(&self) -> Option<RowLocation> {
        self.location
    }

    /// Set or clear the storage-location tag
    pub fn set_location(&mut self, location: Option<RowLocation>) {
        self.location = location;
    }

    /// Rebind this row to a new schema.
    ///
    /// Replaces the schema reference and reallocates the field vector to
    /// the new arity, discarding all prior values. Used when re-purposing
    /// a row template; the old field storage is never aliased into the new
    /// shape.
    pub fn rebind(&mut self, schema: Arc<Schema>) {
        let arity = schema.field_count();
        self.schema = schema;
        self.fields = vec![None; arity];
    }

    /// Lazy forward-only iterator over this row's field slots, in schema
    /// order. Unset slots yield `None`.
    pub fn fields(&self) -> impl Iterator<Item = Option<&FieldValue>> {
        self.fields.iter().map(|slot| slot.as_ref())
    }

    fn index_error(&self, index: usize) -> SqlError {
        SqlError::invalid_argument(format!(
            "field index {} out of range for row with {} fields",
            index,
            self.fields.len()
        ))
    }
}

/// Canonical text form: field values separated by tabs, with one trailing
/// newline after the last field. Unset slots render as `NULL`.
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "\t")?;
            }
            match slot {
                Some(value) => write!(f, "{}", value)?,
                None => write!(f, "NULL")?,
            }
        }
        writeln!(f)
    }
}
