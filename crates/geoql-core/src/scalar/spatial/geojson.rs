//! Concrete GeoJSON input scalars, one per [`GeometryKind`].
//!
//! Literals and serialized maps share the same reserved fields:
//!
//! - `type`: the kind name, matched exactly
//! - `coordinates`: nested numeric lists, depth fixed per kind
//! - `crs`: optional integer spatial reference id
//!
//! Both inputs are first lowered to a [`Nested`] coordinate tree so the
//! depth and element rules live in one place.

use serde_json::{Map, Value as JsonValue};

use super::geometry::{Coordinates, Geometry, GeometryKind, Position};
use super::{COORDINATES_FIELD, CRS_FIELD, TYPE_FIELD};
use crate::error::{CoercionError, Result};
use crate::literal::Literal;
use crate::scalar::{present, present_ref, require_instance, ScalarType};
use crate::value::{Instance, Value};

/// Coordinates lowered from either input representation.
#[derive(Debug, Clone, PartialEq)]
enum Nested {
    Number(f64),
    List(Vec<Nested>),
}

impl Nested {
    fn from_literal(literal: &Literal) -> std::result::Result<Self, String> {
        match literal {
            Literal::Int(n) => Self::number(*n as f64),
            Literal::Float(n) => Self::number(*n),
            Literal::List(items) => items
                .iter()
                .map(Self::from_literal)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Self::List),
            other => Err(format!(
                "coordinates may only contain numbers and lists, found {}",
                other.kind_name()
            )),
        }
    }

    fn from_json(json: &JsonValue) -> std::result::Result<Self, String> {
        match json {
            JsonValue::Number(n) => match n.as_f64() {
                Some(n) => Self::number(n),
                None => Err(format!("coordinate {n} is not representable as a float")),
            },
            JsonValue::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(Self::List),
            _ => Err("coordinates may only contain numbers and arrays".into()),
        }
    }

    fn number(n: f64) -> std::result::Result<Self, String> {
        if n.is_finite() {
            Ok(Self::Number(n))
        } else {
            Err("coordinates must be finite numbers".into())
        }
    }

    fn list(&self) -> std::result::Result<&[Nested], String> {
        match self {
            Self::List(items) => Ok(items),
            Self::Number(_) => Err("expected a list of coordinates, found a number".into()),
        }
    }

    fn position(&self) -> std::result::Result<Position, String> {
        match self.list()? {
            [Self::Number(x), Self::Number(y)] => Ok(Position::new(*x, *y)),
            items if items.iter().any(|item| matches!(item, Self::List(_))) => {
                Err("coordinates are nested too deeply".into())
            }
            items => Err(format!(
                "a position needs exactly 2 numbers, found {}",
                items.len()
            )),
        }
    }

    fn positions(&self) -> std::result::Result<Vec<Position>, String> {
        self.list()?.iter().map(Self::position).collect()
    }

    fn rings(&self) -> std::result::Result<Vec<Vec<Position>>, String> {
        self.list()?.iter().map(Self::positions).collect()
    }

    fn polygons(&self) -> std::result::Result<Vec<Vec<Vec<Position>>>, String> {
        self.list()?.iter().map(Self::rings).collect()
    }

    fn into_coordinates(self, kind: GeometryKind) -> std::result::Result<Coordinates, String> {
        Ok(match kind.depth() {
            0 => Coordinates::Position(self.position()?),
            1 => Coordinates::Positions(self.positions()?),
            2 => Coordinates::Rings(self.rings()?),
            _ => Coordinates::Polygons(self.polygons()?),
        })
    }
}

/// Input scalar for a single geometry kind (`PointInput`, `PolygonInput`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoJsonScalar {
    kind: GeometryKind,
}

impl GeoJsonScalar {
    pub const fn new(kind: GeometryKind) -> Self {
        Self { kind }
    }

    pub const fn point() -> Self {
        Self::new(GeometryKind::Point)
    }

    pub const fn kind(&self) -> GeometryKind {
        self.kind
    }

    fn data_error(&self, message: impl Into<String>) -> CoercionError {
        CoercionError::data(self.name(), message)
    }

    fn unsupported(&self, value: &Value) -> CoercionError {
        self.data_error(format!(
            "{} cannot represent {} value",
            self.name(),
            value.describe()
        ))
    }

    fn check_type(&self, found: Option<&str>) -> Result<()> {
        match found {
            Some(name) if name == self.kind.name() => Ok(()),
            Some(name) => Err(self.data_error(format!(
                "The `{TYPE_FIELD}` field is `{name}`, expected `{}`.",
                self.kind
            ))),
            None => Err(self.data_error(format!(
                "The `{TYPE_FIELD}` field is missing, expected `{}`.",
                self.kind
            ))),
        }
    }

    fn build(&self, coordinates: Option<Nested>, srid: Option<i32>) -> Result<Geometry> {
        let nested = coordinates.ok_or_else(|| {
            self.data_error(format!("The `{COORDINATES_FIELD}` field is missing."))
        })?;
        let coordinates = nested
            .into_coordinates(self.kind)
            .map_err(|message| self.data_error(message))?;
        let geometry = Geometry::new(self.kind, coordinates)
            .map_err(|err| self.data_error(err.to_string()))?;
        Ok(geometry.with_optional_srid(srid))
    }

    fn srid_from(&self, n: Option<i64>) -> Result<i32> {
        n.and_then(|n| i32::try_from(n).ok()).ok_or_else(|| {
            self.data_error(format!(
                "The `{CRS_FIELD}` field must be a 32-bit integer."
            ))
        })
    }

    fn geometry_from_literal(&self, literal: &Literal) -> Result<Geometry> {
        let type_name = match literal.field(TYPE_FIELD) {
            Some(Literal::String(name) | Literal::Enum(name)) => Some(name.as_str()),
            Some(Literal::Null) | None => None,
            Some(other) => {
                return Err(self.data_error(format!(
                    "The `{TYPE_FIELD}` field must be a string, found {}.",
                    other.kind_name()
                )))
            }
        };
        self.check_type(type_name)?;

        let coordinates = match literal.field(COORDINATES_FIELD) {
            Some(Literal::Null) | None => None,
            Some(value) => {
                Some(Nested::from_literal(value).map_err(|message| self.data_error(message))?)
            }
        };

        let srid = match literal.field(CRS_FIELD) {
            Some(Literal::Null) | None => None,
            Some(Literal::Int(n)) => Some(self.srid_from(Some(*n))?),
            Some(_) => Some(self.srid_from(None)?),
        };

        self.build(coordinates, srid)
    }

    fn geometry_from_json(&self, map: &Map<String, JsonValue>) -> Result<Geometry> {
        let type_name = match map.get(TYPE_FIELD) {
            Some(JsonValue::String(name)) => Some(name.as_str()),
            Some(JsonValue::Null) | None => None,
            Some(_) => {
                return Err(self.data_error(format!(
                    "The `{TYPE_FIELD}` field must be a string."
                )))
            }
        };
        self.check_type(type_name)?;

        let coordinates = match map.get(COORDINATES_FIELD) {
            Some(JsonValue::Null) | None => None,
            Some(value) => {
                Some(Nested::from_json(value).map_err(|message| self.data_error(message))?)
            }
        };

        let srid = match map.get(CRS_FIELD) {
            Some(JsonValue::Null) | None => None,
            Some(value) => Some(self.srid_from(value.as_i64())?),
        };

        self.build(coordinates, srid)
    }

    fn accepts(&self, geometry: &Geometry) -> bool {
        geometry.kind() == self.kind
    }

    fn to_literal(&self, value: Option<&Value>) -> Result<Literal> {
        match present_ref(value) {
            None => Ok(Literal::Null),
            Some(Value::Geometry(geometry)) if self.accepts(geometry) => Ok(geometry.to_literal()),
            Some(Value::Json(JsonValue::Object(map))) => {
                Ok(self.geometry_from_json(map)?.to_literal())
            }
            Some(other) => Err(self.unsupported(other)),
        }
    }
}

impl ScalarType for GeoJsonScalar {
    fn name(&self) -> &str {
        self.kind.input_type_name()
    }

    fn is_instance_of(&self, value: Option<Instance<'_>>) -> Result<bool> {
        Ok(match require_instance(self.name(), value)? {
            Instance::Literal(literal) => {
                matches!(literal, Literal::Null | Literal::Object(_))
            }
            Instance::Value(Value::Geometry(geometry)) => self.accepts(geometry),
            Instance::Value(value) => value.is_null(),
        })
    }

    fn parse_literal(&self, literal: &Literal) -> Result<Option<Value>> {
        match literal {
            Literal::Null => Ok(None),
            Literal::Object(_) => Ok(Some(Value::Geometry(self.geometry_from_literal(literal)?))),
            other => Err(CoercionError::contract(
                self.name(),
                format!(
                    "parse_literal expects an object literal, got {}",
                    other.kind_name()
                ),
            )),
        }
    }

    fn parse_value(&self, value: Option<&Value>) -> Result<Literal> {
        self.to_literal(value)
    }

    fn parse_result(&self, value: Option<&Value>) -> Result<Literal> {
        self.to_literal(value)
    }

    fn serialize(&self, value: Option<Value>) -> Result<Option<Value>> {
        match present(value) {
            None => Ok(None),
            // Already-serialized or foreign maps are not ours to convert.
            Some(value @ Value::Json(JsonValue::Object(_))) => Ok(Some(value)),
            Some(Value::Geometry(geometry)) if self.accepts(&geometry) => {
                Ok(Some(Value::Json(geometry.to_json())))
            }
            Some(other) => Err(self.unsupported(&other)),
        }
    }

    fn deserialize(&self, value: Option<Value>) -> Result<Option<Value>> {
        match present(value) {
            None => Ok(None),
            Some(Value::Geometry(geometry)) if self.accepts(&geometry) => {
                Ok(Some(Value::Geometry(geometry)))
            }
            Some(Value::Json(JsonValue::Object(map))) => {
                Ok(Some(Value::Geometry(self.geometry_from_json(&map)?)))
            }
            Some(other) => Err(self.unsupported(&other)),
        }
    }
}
