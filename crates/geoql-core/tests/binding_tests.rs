//! Coercing supplied argument literals through the scalar registry.

use geoql_core::document::Argument;
use geoql_core::literal::Literal;
use geoql_core::scalar::spatial::Geometry;
use geoql_core::schema::ArgumentDefinition;
use geoql_core::{coerce_argument_values, ScalarRegistry, Value};
use serde_json::json;

fn def(name: &str, ty: &str) -> ArgumentDefinition {
    ArgumentDefinition::new(name, ty.parse().unwrap())
}

fn point_literal(x: i64, y: i64) -> Literal {
    Literal::Object(vec![
        ("type".into(), Literal::Enum("Point".into())),
        (
            "coordinates".into(),
            Literal::List(vec![Literal::Int(x), Literal::Int(y)]),
        ),
    ])
}

#[test]
fn binds_in_declaration_order() {
    let definitions = [def("limit", "Int"), def("near", "PointInput!")];
    let supplied = [
        Argument::new("near", point_literal(30, 10)),
        Argument::new("limit", Literal::Int(5)),
    ];
    let values =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap();
    assert_eq!(
        values,
        vec![
            ("limit".to_string(), Some(Value::Json(json!(5)))),
            (
                "near".to_string(),
                Some(Value::Geometry(Geometry::point(30.0, 10.0).unwrap()))
            ),
        ]
    );
}

#[test]
fn default_value_is_used_when_omitted() {
    let definitions = [def("limit", "Int!").with_default(Literal::Int(10))];
    let values = coerce_argument_values(&definitions, &[], &ScalarRegistry::standard()).unwrap();
    assert_eq!(values, vec![("limit".to_string(), Some(Value::Json(json!(10))))]);
}

#[test]
fn omitted_nullable_argument_is_absent() {
    let definitions = [def("area", "Geometry")];
    let values = coerce_argument_values(&definitions, &[], &ScalarRegistry::standard()).unwrap();
    assert_eq!(values, vec![("area".to_string(), None)]);
}

#[test]
fn missing_non_null_argument_is_a_data_error() {
    let definitions = [def("near", "PointInput!")];
    let err = coerce_argument_values(&definitions, &[], &ScalarRegistry::standard()).unwrap_err();
    assert!(err.is_data_error());
    assert_eq!(err.to_string(), "The argument `near` is required.");
}

#[test]
fn explicit_null_for_non_null_argument_is_a_data_error() {
    let definitions = [def("near", "PointInput!")];
    let supplied = [Argument::new("near", Literal::Null)];
    let err =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap_err();
    assert!(err.is_data_error());
}

#[test]
fn list_arguments_coerce_element_wise() {
    let definitions = [def("stops", "[PointInput!]!")];
    let supplied = [Argument::new(
        "stops",
        Literal::List(vec![point_literal(0, 0), point_literal(1, 1)]),
    )];
    let values =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap();
    assert_eq!(
        values[0].1,
        Some(Value::List(vec![
            Value::Geometry(Geometry::point(0.0, 0.0).unwrap()),
            Value::Geometry(Geometry::point(1.0, 1.0).unwrap()),
        ]))
    );
}

#[test]
fn single_value_for_list_type_becomes_a_list() {
    let definitions = [def("ids", "[ID]")];
    let supplied = [Argument::new("ids", Literal::Int(4))];
    let values =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap();
    assert_eq!(values[0].1, Some(Value::List(vec![Value::Json(json!("4"))])));
}

#[test]
fn null_element_in_nullable_list_is_kept() {
    let definitions = [def("ids", "[ID]")];
    let supplied = [Argument::new(
        "ids",
        Literal::List(vec![Literal::Null, Literal::String("a".into())]),
    )];
    let values =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap();
    assert_eq!(
        values[0].1,
        Some(Value::List(vec![Value::Json(json!(null)), Value::Json(json!("a"))]))
    );
}

#[test]
fn null_element_in_non_null_list_is_a_data_error() {
    let definitions = [def("ids", "[ID!]")];
    let supplied = [Argument::new("ids", Literal::List(vec![Literal::Null]))];
    let err =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap_err();
    assert!(err.is_data_error());
    assert_eq!(err.type_name(), "ID");
}

#[test]
fn scalar_data_errors_propagate() {
    let definitions = [def("near", "PointInput")];
    let supplied = [Argument::new(
        "near",
        Literal::Object(vec![("type".into(), Literal::Enum("Point".into()))]),
    )];
    let err =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap_err();
    assert!(err.is_data_error());
    assert_eq!(err.type_name(), "PointInput");
}

#[test]
fn unregistered_type_is_a_contract_violation() {
    let definitions = [def("when", "DateTime")];
    let supplied = [Argument::new("when", Literal::String("2024-01-01".into()))];
    let err =
        coerce_argument_values(&definitions, &supplied, &ScalarRegistry::standard()).unwrap_err();
    assert!(err.is_contract_violation());
    assert_eq!(err.type_name(), "DateTime");
}
