//! Row schemas: ordered, fixed descriptions of field types and names.
//!
//! A [`Schema`] is a pure value type created once by whatever component
//! defines a row shape (a scan, a join, or the aggregate operator deriving
//! its output shape), then shared by reference (`Arc<Schema>`) among all
//! rows of that shape. It never changes after construction.

use crate::rowflow::sql::error::{SqlError, SqlResult};
use crate::rowflow::sql::execution::types::FieldType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One column of a schema: a declared type and an optional name.
///
/// Names may be absent (e.g. intermediate shapes produced by expression
/// evaluation). Two entries with absent names are name-equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared type of the column
    pub field_type: FieldType,
    /// Column name, if any
    pub name: Option<String>,
}

impl FieldDef {
    /// Create a named column definition
    pub fn named(field_type: FieldType, name: impl Into<String>) -> Self {
        FieldDef {
            field_type,
            name: Some(name.into()),
        }
    }

    /// Create an unnamed column definition
    pub fn unnamed(field_type: FieldType) -> Self {
        FieldDef {
            field_type,
            name: None,
        }
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}({})", self.field_type, name),
            None => write!(f, "{}(?)", self.field_type),
        }
    }
}

/// An ordered, fixed-length description of a row shape.
///
/// Arity is at least 1 and never changes; the type at each index never
/// changes. Equality compares field count and the type sequence only -
/// names are excluded so join and aggregate output shapes match regardless
/// of labeling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a schema from column definitions.
    ///
    /// Fails with an invalid-argument error if `fields` is empty.
    pub fn new(fields: Vec<FieldDef>) -> SqlResult<Self> {
        if fields.is_empty() {
            return Err(SqlError::invalid_argument(
                "schema must contain at least one field",
            ));
        }
        Ok(Schema { fields })
    }

    /// Create a schema of anonymous (unnamed) columns from a type list.
    pub fn from_types(types: Vec<FieldType>) -> SqlResult<Self> {
        Schema::new(types.into_iter().map(FieldDef::unnamed).collect())
    }

    /// Create a schema from parallel type and name lists.
    ///
    /// Fails with an invalid-argument error if the lists are empty or of
    /// different lengths.
    pub fn with_names(types: Vec<FieldType>, names: Vec<Option<String>>) -> SqlResult<Self> {
        if types.len() != names.len() {
            return Err(SqlError::invalid_argument(format!(
                "type list has {} entries but name list has {}",
                types.len(),
                names.len()
            )));
        }
        Schema::new(
            types
                .into_iter()
                .zip(names)
                .map(|(field_type, name)| FieldDef { field_type, name })
                .collect(),
        )
    }

    /// Number of fields in this schema
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Declared type of the field at `index`.
    ///
    /// Fails with an invalid-argument error if `index` is out of range.
    pub fn field_type(&self, index: usize) -> SqlResult<FieldType> {
        self.fields
            .get(index)
            .map(|def| def.field_type)
            .ok_or_else(|| self.index_error(index))
    }

    /// Name of the field at `index`, which may be absent.
    ///
    /// Fails with an invalid-argument error if `index` is out of range.
    pub fn field_name(&self, index: usize) -> SqlResult<Option<&str>> {
        self.fields
            .get(index)
            .map(|def| def.name.as_deref())
            .ok_or_else(|| self.index_error(index))
    }

    /// Index of the first field with the given name.
    ///
    /// Unnamed fields never match. Fails with a schema error if no field
    /// carries the name.
    pub fn index_of(&self, name: &str) -> SqlResult<usize> {
        self.fields
            .iter()
            .position(|def| def.name.as_deref() == Some(name))
            .ok_or_else(|| {
                SqlError::schema_error("no field with this name", Some(name.to_string()))
            })
    }

    /// Size in bytes of rows of this shape, as a sizing hint.
    ///
    /// The sum of per-type fixed widths; not a serialization format.
    pub fn byte_size(&self) -> usize {
        self.fields.iter().map(|def| def.field_type.byte_width()).sum()
    }

    /// Merge two schemas by concatenation: all fields of `left` followed by
    /// all fields of `right`, names carried positionally. If neither input
    /// names any field, the merged schema names none either.
    pub fn merge(left: &Schema, right: &Schema) -> Schema {
        let mut fields = Vec::with_capacity(left.field_count() + right.field_count());
        fields.extend(left.fields.iter().cloned());
        fields.extend(right.fields.iter().cloned());
        // Arity is >= 2 here, so the unchecked construction cannot fail
        Schema { fields }
    }

    /// Iterate over the column definitions in order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    fn index_error(&self, index: usize) -> SqlError {
        SqlError::invalid_argument(format!(
            "field index {} out of range for schema with {} fields",
            index,
            self.fields.len()
        ))
    }
}

/// Equality compares the type sequence only; names are excluded so output
/// shapes match regardless of labeling.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a.field_type == b.field_type)
    }
}

impl Eq for Schema {}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, def) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", def)?;
        }
        Ok(())
    }
}
