//! # geoql-core
//!
//! Static argument validation and scalar value coercion for a schema-driven
//! query processor (GraphQL-style), with GeoJSON geometry scalars.
//!
//! Two independent pieces:
//!
//! - **Validation** checks, before anything executes, that every required
//!   argument of every field and directive in a document is present and not
//!   `null`.
//! - **Coercion** converts scalar values between literal, external, runtime
//!   and serialized forms through the [`ScalarType`] contract.
//!
//! ## Quick start
//!
//! ```rust
//! use geoql_core::document::{Document, Field};
//! use geoql_core::schema::{ArgumentDefinition, FieldDefinition, Schema, TypeRef};
//! use geoql_core::validate;
//!
//! let schema = Schema::builder()
//!     .field("Query", "arguments", FieldDefinition::new(TypeRef::named("Arguments")))
//!     .field(
//!         "Arguments",
//!         "nonNullBooleanArgField",
//!         FieldDefinition::new(TypeRef::named("Boolean")).argument(ArgumentDefinition::new(
//!             "nonNullBooleanArg",
//!             "Boolean!".parse().unwrap(),
//!         )),
//!     )
//!     .build();
//!
//! let document = Document::query(vec![Field::new("arguments")
//!     .select(Field::new("nonNullBooleanArgField"))
//!     .into()]);
//!
//! let errors = validate(&document, &schema);
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].message, "The argument `nonNullBooleanArg` is required.");
//! ```
//!
//! ```rust
//! use geoql_core::literal::Literal;
//! use geoql_core::scalar::spatial::{GeoJsonScalar, Geometry};
//! use geoql_core::{ScalarType, Value};
//!
//! let point = GeoJsonScalar::point();
//! let literal = Literal::Object(vec![
//!     ("type".into(), Literal::String("Point".into())),
//!     ("coordinates".into(), Literal::List(vec![Literal::Int(30), Literal::Int(10)])),
//!     ("crs".into(), Literal::Int(26912)),
//! ]);
//! let value = point.parse_literal(&literal).unwrap();
//! assert_eq!(value, Some(Value::Geometry(Geometry::point(30.0, 10.0).unwrap().with_srid(26912))));
//! ```
//!
//! ## Modules
//!
//! - [`literal`]: literal value tree and source locations
//! - [`document`]: fragment-expanded executable documents
//! - [`schema`]: `TypeSystemView` and an in-memory `Schema`
//! - [`validation`]: `DocumentValidator` and the required-argument rule
//! - [`scalar`]: `ScalarType`, `ScalarRegistry`, built-in and spatial scalars
//! - [`value`]: runtime values and `is_instance_of` inputs
//! - [`binding`]: argument coercion through the registry
//! - [`error`]: `CoercionError` and `ValidationError`

pub mod binding;
pub mod document;
pub mod error;
pub mod literal;
pub mod scalar;
pub mod schema;
pub mod validation;
pub mod value;

pub use binding::coerce_argument_values;
pub use error::{CoercionError, ValidationError};
pub use literal::{Literal, Location};
pub use scalar::{ScalarRegistry, ScalarType};
pub use schema::{Schema, TypeSystemView};
pub use validation::{validate, DocumentValidator, ValidationResult};
pub use value::{Instance, Value};
