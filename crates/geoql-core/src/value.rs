//! Values crossing the scalar coercion boundary.
//!
//! Absence is always `Option::None`. A JSON `null` wrapped in [`Value::Json`]
//! is treated the same way by every coercion.

use serde_json::Value as JsonValue;

use crate::literal::Literal;
use crate::scalar::spatial::Geometry;

/// A runtime or externally supplied value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Untyped external data: variables, defaults, previously serialized
    /// results. Also the runtime form of the built-in primitive scalars.
    Json(JsonValue),
    /// A typed geometry.
    Geometry(Geometry),
    /// Element-wise coerced list argument.
    List(Vec<Value>),
}

impl Value {
    /// `true` for a JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Json(JsonValue::Null))
    }

    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Self::Json(json) => Some(json),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Self::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Json(JsonValue::Null) => "null",
            Self::Json(JsonValue::Bool(_)) => "boolean",
            Self::Json(JsonValue::Number(_)) => "number",
            Self::Json(JsonValue::String(_)) => "string",
            Self::Json(JsonValue::Array(_)) => "array",
            Self::Json(JsonValue::Object(_)) => "object",
            Self::Geometry(_) => "geometry",
            Self::List(_) => "list",
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        Self::Json(json)
    }
}

impl From<Geometry> for Value {
    fn from(geometry: Geometry) -> Self {
        Self::Geometry(geometry)
    }
}

/// Argument to [`ScalarType::is_instance_of`](crate::scalar::ScalarType::is_instance_of):
/// either a syntax-tree literal or a runtime value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instance<'a> {
    Literal(&'a Literal),
    Value(&'a Value),
}

impl<'a> From<&'a Literal> for Instance<'a> {
    fn from(literal: &'a Literal) -> Self {
        Self::Literal(literal)
    }
}

impl<'a> From<&'a Value> for Instance<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}
