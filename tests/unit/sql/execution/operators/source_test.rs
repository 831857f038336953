//! Tests for the restartable in-memory row stream

use rowflow::rowflow::sql::error::SqlError;
use rowflow::rowflow::sql::execution::operators::{RowBuffer, RowOperator};
use rowflow::rowflow::sql::execution::row::Row;
use rowflow::rowflow::sql::execution::schema::Schema;
use rowflow::rowflow::sql::execution::types::{FieldType, FieldValue};
use std::sync::Arc;

fn one_col_schema() -> Arc<Schema> {
    Arc::new(Schema::with_names(vec![FieldType::Integer], vec![Some("n".to_string())]).unwrap())
}

fn make_rows(schema: &Arc<Schema>, values: &[i64]) -> Vec<Row> {
    values
        .iter()
        .map(|v| {
            let mut row = Row::new(schema.clone());
            row.set_field(0, FieldValue::Integer(*v)).unwrap();
            row
        })
        .collect()
}

#[test]
fn test_rejects_rows_of_a_different_schema() {
    let schema = one_col_schema();
    let other = Arc::new(Schema::from_types(vec![FieldType::Text]).unwrap());
    let stray = Row::new(other);

    let err = RowBuffer::new(schema, vec![stray]).unwrap_err();
    assert!(matches!(err, SqlError::SchemaError { .. }));
}

#[test]
fn test_pull_protocol_happy_path() {
    let schema = one_col_schema();
    let mut buffer = RowBuffer::new(schema.clone(), make_rows(&schema, &[1, 2, 3])).unwrap();
    assert_eq!(buffer.len(), 3);

    buffer.open().unwrap();
    assert!(buffer.has_next().unwrap());
    // has_next is stable across repeated calls
    assert!(buffer.has_next().unwrap());

    let mut seen = Vec::new();
    while let Some(row) = buffer.fetch_next().unwrap() {
        seen.push(row.field(0).unwrap().unwrap().as_integer().unwrap());
    }
    assert_eq!(seen, vec![1, 2, 3]);

    // Exhaustion is a normal terminal condition, not an error
    assert!(!buffer.has_next().unwrap());
    assert_eq!(buffer.fetch_next().unwrap(), None);
    buffer.close().unwrap();
}

#[test]
fn test_rewind_is_a_cursor_reset() {
    let schema = one_col_schema();
    let mut buffer = RowBuffer::new(schema.clone(), make_rows(&schema, &[5, 6])).unwrap();
    buffer.open().unwrap();

    while buffer.fetch_next().unwrap().is_some() {}
    buffer.rewind().unwrap();

    let row = buffer.fetch_next().unwrap().unwrap();
    assert_eq!(row.field(0).unwrap().unwrap().as_integer().unwrap(), 5);
    buffer.close().unwrap();
}

#[test]
fn test_empty_buffer_is_immediately_exhausted() {
    let schema = one_col_schema();
    let mut buffer = RowBuffer::new(schema, vec![]).unwrap();
    assert!(buffer.is_empty());

    buffer.open().unwrap();
    assert!(!buffer.has_next().unwrap());
    assert_eq!(buffer.fetch_next().unwrap(), None);
    buffer.close().unwrap();
}

#[test]
fn test_calls_while_closed_rejected() {
    let schema = one_col_schema();
    let mut buffer = RowBuffer::new(schema.clone(), make_rows(&schema, &[1])).unwrap();

    assert!(matches!(
        buffer.fetch_next().unwrap_err(),
        SqlError::IllegalState { .. }
    ));
    assert!(matches!(
        buffer.has_next().unwrap_err(),
        SqlError::IllegalState { .. }
    ));
    assert!(matches!(
        buffer.rewind().unwrap_err(),
        SqlError::IllegalState { .. }
    ));
    assert!(matches!(
        buffer.close().unwrap_err(),
        SqlError::IllegalState { .. }
    ));
}

#[test]
fn test_double_open_rejected_but_reopen_after_close_works() {
    let schema = one_col_schema();
    let mut buffer = RowBuffer::new(schema.clone(), make_rows(&schema, &[9])).unwrap();

    buffer.open().unwrap();
    assert!(matches!(
        buffer.open().unwrap_err(),
        SqlError::IllegalState { .. }
    ));

    buffer.fetch_next().unwrap();
    buffer.close().unwrap();

    // A fresh open starts from the beginning again
    buffer.open().unwrap();
    let row = buffer.fetch_next().unwrap().unwrap();
    assert_eq!(row.field(0).unwrap().unwrap().as_integer().unwrap(), 9);
    buffer.close().unwrap();
}

#[test]
fn test_output_schema_available_while_closed() {
    let schema = one_col_schema();
    let buffer = RowBuffer::new(schema.clone(), vec![]).unwrap();
    assert_eq!(buffer.output_schema().as_ref(), schema.as_ref());
}
