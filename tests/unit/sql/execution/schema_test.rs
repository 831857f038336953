//! Tests for schema construction, lookup, merge, and equality

use rowflow::rowflow::sql::error::SqlError;
use rowflow::rowflow::sql::execution::schema::{FieldDef, Schema};
use rowflow::rowflow::sql::execution::types::{FieldType, TEXT_FIELD_WIDTH};

fn named_schema() -> Schema {
    Schema::with_names(
        vec![FieldType::Integer, FieldType::Text],
        vec![Some("a".to_string()), Some("b".to_string())],
    )
    .unwrap()
}

#[test]
fn test_zero_fields_rejected() {
    let err = Schema::from_types(vec![]).unwrap_err();
    assert!(matches!(err, SqlError::InvalidArgument { .. }));

    let err = Schema::new(vec![]).unwrap_err();
    assert!(matches!(err, SqlError::InvalidArgument { .. }));
}

#[test]
fn test_mismatched_type_and_name_lengths_rejected() {
    let err = Schema::with_names(
        vec![FieldType::Integer, FieldType::Text],
        vec![Some("a".to_string())],
    )
    .unwrap_err();
    assert!(matches!(err, SqlError::InvalidArgument { .. }));
}

#[test]
fn test_field_lookup_by_index() {
    let schema = named_schema();
    assert_eq!(schema.field_count(), 2);
    assert_eq!(schema.field_type(0).unwrap(), FieldType::Integer);
    assert_eq!(schema.field_type(1).unwrap(), FieldType::Text);
    assert_eq!(schema.field_name(0).unwrap(), Some("a"));
    assert_eq!(schema.field_name(1).unwrap(), Some("b"));
}

#[test]
fn test_out_of_range_index_rejected() {
    let schema = named_schema();
    assert!(matches!(
        schema.field_type(2).unwrap_err(),
        SqlError::InvalidArgument { .. }
    ));
    assert!(matches!(
        schema.field_name(99).unwrap_err(),
        SqlError::InvalidArgument { .. }
    ));
}

#[test]
fn test_index_lookup_by_name() {
    let schema = named_schema();
    assert_eq!(schema.index_of("a").unwrap(), 0);
    assert_eq!(schema.index_of("b").unwrap(), 1);

    let err = schema.index_of("missing").unwrap_err();
    assert!(matches!(err, SqlError::SchemaError { .. }));
}

#[test]
fn test_index_lookup_returns_first_match() {
    let schema = Schema::new(vec![
        FieldDef::named(FieldType::Integer, "dup"),
        FieldDef::named(FieldType::Text, "dup"),
    ])
    .unwrap();
    assert_eq!(schema.index_of("dup").unwrap(), 0);
}

#[test]
fn test_unnamed_fields_never_match_by_name() {
    let schema = Schema::from_types(vec![FieldType::Integer]).unwrap();
    assert!(schema.index_of("anything").is_err());
}

#[test]
fn test_byte_size_hint() {
    let schema = named_schema();
    assert_eq!(schema.byte_size(), 8 + TEXT_FIELD_WIDTH);
}

#[test]
fn test_merge_concatenates_types_and_names() {
    let left = named_schema();
    let right = Schema::with_names(vec![FieldType::Boolean], vec![Some("c".to_string())]).unwrap();

    let merged = Schema::merge(&left, &right);
    assert_eq!(merged.field_count(), 3);
    assert_eq!(merged.field_type(0).unwrap(), FieldType::Integer);
    assert_eq!(merged.field_type(2).unwrap(), FieldType::Boolean);
    assert_eq!(merged.field_name(0).unwrap(), Some("a"));
    assert_eq!(merged.field_name(2).unwrap(), Some("c"));
}

#[test]
fn test_merge_of_unnamed_schemas_stays_unnamed() {
    let left = Schema::from_types(vec![FieldType::Integer]).unwrap();
    let right = Schema::from_types(vec![FieldType::Text, FieldType::Float]).unwrap();

    let merged = Schema::merge(&left, &right);
    assert_eq!(merged.field_count(), 3);
    for i in 0..merged.field_count() {
        assert_eq!(merged.field_name(i).unwrap(), None);
    }
}

#[test]
fn test_equality_ignores_names() {
    let named = named_schema();
    let anonymous = Schema::with_names(
        vec![FieldType::Integer, FieldType::Text],
        vec![None, None],
    )
    .unwrap();

    // Same type sequence compares equal regardless of labels...
    assert_eq!(named, anonymous);
    // ...but the two schemas are still distinguishable by name lookup
    assert!(named.index_of("a").is_ok());
    assert!(anonymous.index_of("a").is_err());
}

#[test]
fn test_inequality_on_types_or_arity() {
    let schema = named_schema();
    let different_types =
        Schema::from_types(vec![FieldType::Text, FieldType::Integer]).unwrap();
    let different_arity = Schema::from_types(vec![FieldType::Integer]).unwrap();

    assert_ne!(schema, different_types);
    assert_ne!(schema, different_arity);
}

#[test]
fn test_display() {
    assert_eq!(named_schema().to_string(), "INTEGER(a), TEXT(b)");
    let anonymous = Schema::from_types(vec![FieldType::Integer]).unwrap();
    assert_eq!(anonymous.to_string(), "INTEGER(?)");
}

#[test]
fn test_iterator_walks_fields_in_order() {
    let schema = named_schema();
    let defs: Vec<&FieldDef> = schema.iter().collect();
    assert_eq!(defs.len(), 2);
    assert_eq!(defs[0].field_type, FieldType::Integer);
    assert_eq!(defs[1].name.as_deref(), Some("b"));
}
