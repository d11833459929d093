//! Property-Based Roundtrip Tests for the geometry scalars
//!
//! Uses the `proptest` crate to generate random well-formed geometries and
//! verify that, for the matching input type and for the composite `Geometry`:
//!
//! - `deserialize(serialize(g)) == g`
//! - `parse_literal(parse_result(g)) == g`
//! - `parse_value` gives the same literal for `g` and for `serialize(g)`
//!
//! Strategies generate:
//! - Finite coordinates, both whole degrees and arbitrary fractions
//! - Every geometry kind, with line and ring rules respected
//! - An optional spatial reference id across the whole `i32` range

use proptest::prelude::*;

use geoql_core::scalar::spatial::{Coordinates, Geometry, GeometryKind, Position};
use geoql_core::{ScalarRegistry, ScalarType, Value};

// ============================================================================
// Strategies for generating geometries
// ============================================================================

fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-180i32..=180).prop_map(f64::from),
        -1.0e6f64..1.0e6,
    ]
}

fn arb_position() -> impl Strategy<Value = Position> {
    (arb_number(), arb_number()).prop_map(|(x, y)| Position::new(x, y))
}

fn arb_line() -> impl Strategy<Value = Vec<Position>> {
    prop::collection::vec(arb_position(), 2..8)
}

/// A closed ring: three or more positions, then back to the start.
fn arb_ring() -> impl Strategy<Value = Vec<Position>> {
    prop::collection::vec(arb_position(), 3..8).prop_map(|mut ring| {
        ring.push(ring[0]);
        ring
    })
}

fn arb_rings() -> impl Strategy<Value = Vec<Vec<Position>>> {
    prop::collection::vec(arb_ring(), 1..4)
}

fn arb_coordinates(kind: GeometryKind) -> BoxedStrategy<Coordinates> {
    match kind {
        GeometryKind::Point => arb_position().prop_map(Coordinates::Position).boxed(),
        GeometryKind::MultiPoint => prop::collection::vec(arb_position(), 0..8)
            .prop_map(Coordinates::Positions)
            .boxed(),
        GeometryKind::LineString => arb_line().prop_map(Coordinates::Positions).boxed(),
        GeometryKind::MultiLineString => prop::collection::vec(arb_line(), 0..4)
            .prop_map(Coordinates::Rings)
            .boxed(),
        GeometryKind::Polygon => arb_rings().prop_map(Coordinates::Rings).boxed(),
        GeometryKind::MultiPolygon => prop::collection::vec(arb_rings(), 0..3)
            .prop_map(Coordinates::Polygons)
            .boxed(),
    }
}

fn arb_geometry() -> impl Strategy<Value = Geometry> {
    prop::sample::select(GeometryKind::ALL.to_vec()).prop_flat_map(|kind| {
        (arb_coordinates(kind), prop::option::of(any::<i32>())).prop_map(
            move |(coordinates, srid)| {
                let geometry = Geometry::new(kind, coordinates)
                    .expect("strategy only builds well-formed geometries");
                match srid {
                    Some(srid) => geometry.with_srid(srid),
                    None => geometry,
                }
            },
        )
    })
}

fn scalars_for(geometry: &Geometry) -> Vec<std::sync::Arc<dyn ScalarType>> {
    let registry = ScalarRegistry::standard();
    [geometry.kind().input_type_name(), "Geometry"]
        .into_iter()
        .filter_map(|name| registry.get(name).cloned())
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn serialize_deserialize_roundtrip(geometry in arb_geometry()) {
        for scalar in scalars_for(&geometry) {
            let serialized = scalar.serialize(Some(Value::Geometry(geometry.clone()))).unwrap();
            prop_assert!(matches!(serialized, Some(Value::Json(_))));
            let back = scalar.deserialize(serialized).unwrap();
            prop_assert_eq!(back, Some(Value::Geometry(geometry.clone())));
        }
    }

    #[test]
    fn parse_result_parse_literal_roundtrip(geometry in arb_geometry()) {
        for scalar in scalars_for(&geometry) {
            let literal = scalar.parse_result(Some(&Value::Geometry(geometry.clone()))).unwrap();
            let back = scalar.parse_literal(&literal).unwrap();
            prop_assert_eq!(back, Some(Value::Geometry(geometry.clone())));
        }
    }

    #[test]
    fn parse_value_accepts_serialized_form(geometry in arb_geometry()) {
        for scalar in scalars_for(&geometry) {
            let runtime = Value::Geometry(geometry.clone());
            let serialized = scalar.serialize(Some(runtime.clone())).unwrap();
            prop_assert_eq!(
                scalar.parse_value(serialized.as_ref()).unwrap(),
                scalar.parse_value(Some(&runtime)).unwrap()
            );
        }
    }

    #[test]
    fn serialized_map_passes_through_serialize(geometry in arb_geometry()) {
        for scalar in scalars_for(&geometry) {
            let serialized = Value::Json(geometry.to_json());
            prop_assert_eq!(scalar.serialize(Some(serialized.clone())).unwrap(), Some(serialized));
        }
    }
}
