//! Bench literal parsing through a concrete input type versus the composite
//! `Geometry` scalar, and required-argument validation over a wide document.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use geoql_core::document::{Document, Field};
use geoql_core::literal::Literal;
use geoql_core::schema::{ArgumentDefinition, FieldDefinition, Schema, TypeRef};
use geoql_core::{validate, ScalarRegistry, Value};

const FIELDS: usize = 1_000;

fn ring(n: usize) -> Literal {
    let mut positions: Vec<Literal> = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            Literal::List(vec![Literal::Float(angle.cos()), Literal::Float(angle.sin())])
        })
        .collect();
    positions.push(positions[0].clone());
    Literal::List(positions)
}

fn multi_polygon_literal() -> Literal {
    Literal::Object(vec![
        ("type".into(), Literal::Enum("MultiPolygon".into())),
        (
            "coordinates".into(),
            Literal::List((0..8).map(|_| Literal::List(vec![ring(64)])).collect()),
        ),
        ("crs".into(), Literal::Int(4326)),
    ])
}

fn bench_parse_literal(c: &mut Criterion) {
    let registry = ScalarRegistry::standard();
    let literal = multi_polygon_literal();
    let mut group = c.benchmark_group("parse_literal");
    for name in ["MultiPolygonInput", "Geometry"] {
        let Some(scalar) = registry.get(name) else {
            continue;
        };
        group.bench_function(name, |b| {
            b.iter(|| black_box(scalar.parse_literal(black_box(&literal)).unwrap()))
        });
    }
    group.finish();
}

fn bench_serialize_roundtrip(c: &mut Criterion) {
    let registry = ScalarRegistry::standard();
    let Some(scalar) = registry.get("Geometry") else {
        return;
    };
    let geometry = scalar
        .parse_literal(&multi_polygon_literal())
        .unwrap()
        .expect("literal is not null");

    c.bench_function("serialize_deserialize/Geometry", |b| {
        b.iter_batched(
            || geometry.clone(),
            |value: Value| {
                let serialized = scalar.serialize(Some(value)).unwrap();
                black_box(scalar.deserialize(serialized).unwrap())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_validate(c: &mut Criterion) {
    let mut builder = Schema::builder();
    let mut root = Field::new("arguments");
    for i in 0..FIELDS {
        let name = format!("field{i}");
        builder = builder.field(
            "Arguments",
            name.as_str(),
            FieldDefinition::new(TypeRef::named("String"))
                .argument(ArgumentDefinition::new("x", "Int!".parse().unwrap()))
                .argument(ArgumentDefinition::new("y", "Int".parse().unwrap())),
        );
        let field = Field::new(name);
        root = root.select(if i % 2 == 0 {
            field.argument("x", Literal::Int(1))
        } else {
            field
        });
    }
    let schema = builder
        .field("Query", "arguments", FieldDefinition::new(TypeRef::named("Arguments")))
        .build();
    let document = Document::query(vec![root.into()]);

    c.bench_function("validate/required_arguments", |b| {
        b.iter(|| black_box(validate(black_box(&document), &schema)))
    });
}

criterion_group!(
    benches,
    bench_parse_literal,
    bench_serialize_roundtrip,
    bench_validate
);
criterion_main!(benches);
