//! Built-in primitive scalars: `Boolean`, `Int`, `Float`, `String`, `ID`.
//!
//! Their runtime and serialized forms are both plain JSON values, so
//! `serialize` and `deserialize` share one normalizing coercion.

use std::sync::Arc;

use serde_json::{Number, Value as JsonValue};

use crate::error::{CoercionError, Result};
use crate::literal::Literal;
use crate::scalar::{present, present_ref, require_instance, ScalarType};
use crate::value::{Instance, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinScalar {
    Boolean,
    /// Signed 32-bit integer.
    Int,
    Float,
    String,
    /// Opaque identifier: accepts strings and integers, always a string at runtime.
    Id,
}

/// All built-in scalars.
pub fn all() -> Vec<Arc<dyn ScalarType>> {
    [
        BuiltinScalar::Boolean,
        BuiltinScalar::Int,
        BuiltinScalar::Float,
        BuiltinScalar::String,
        BuiltinScalar::Id,
    ]
    .into_iter()
    .map(|scalar| Arc::new(scalar) as Arc<dyn ScalarType>)
    .collect()
}

fn int32(n: i64) -> Option<i64> {
    i32::try_from(n).ok().map(i64::from)
}

impl BuiltinScalar {
    fn type_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Id => "ID",
        }
    }

    /// Literal → runtime JSON, `None` when the literal has the wrong shape.
    fn runtime_from_literal(self, literal: &Literal) -> Option<JsonValue> {
        match (self, literal) {
            (Self::Boolean, Literal::Boolean(b)) => Some(JsonValue::Bool(*b)),
            (Self::Int, Literal::Int(n)) => int32(*n).map(JsonValue::from),
            (Self::Float, Literal::Int(n)) => Number::from_f64(*n as f64).map(JsonValue::Number),
            (Self::Float, Literal::Float(n)) => Number::from_f64(*n).map(JsonValue::Number),
            (Self::String | Self::Id, Literal::String(s)) => Some(JsonValue::String(s.clone())),
            (Self::Id, Literal::Int(n)) => Some(JsonValue::String(n.to_string())),
            _ => None,
        }
    }

    /// External JSON → normalized runtime JSON.
    fn runtime_from_json(self, json: &JsonValue) -> Option<JsonValue> {
        match (self, json) {
            (Self::Boolean, JsonValue::Bool(b)) => Some(JsonValue::Bool(*b)),
            (Self::Int, JsonValue::Number(n)) => n.as_i64().and_then(int32).map(JsonValue::from),
            (Self::Float, JsonValue::Number(n)) => {
                n.as_f64().and_then(Number::from_f64).map(JsonValue::Number)
            }
            (Self::String | Self::Id, JsonValue::String(s)) => Some(JsonValue::String(s.clone())),
            (Self::Id, JsonValue::Number(n)) => n.as_i64().map(|n| JsonValue::String(n.to_string())),
            _ => None,
        }
    }

    fn to_literal(self, json: &JsonValue) -> Literal {
        match json {
            JsonValue::Bool(b) => Literal::Boolean(*b),
            JsonValue::Number(n) if self == Self::Float => {
                Literal::Float(n.as_f64().unwrap_or_default())
            }
            JsonValue::Number(n) => Literal::Int(n.as_i64().unwrap_or_default()),
            JsonValue::String(s) => Literal::String(s.clone()),
            _ => Literal::Null,
        }
    }

    fn coerce(self, value: Option<Value>) -> Result<Option<Value>> {
        match present(value) {
            None => Ok(None),
            Some(value) => self.coerce_json(&value).map(|json| Some(Value::Json(json))),
        }
    }

    fn coerce_json(self, value: &Value) -> Result<JsonValue> {
        value
            .as_json()
            .and_then(|json| self.runtime_from_json(json))
            .ok_or_else(|| {
                CoercionError::data(
                    self.type_name(),
                    format!("{} cannot represent {} value", self.type_name(), value.describe()),
                )
            })
    }

    fn literal_for(self, value: Option<&Value>) -> Result<Literal> {
        match present_ref(value) {
            None => Ok(Literal::Null),
            Some(value) => Ok(self.to_literal(&self.coerce_json(value)?)),
        }
    }
}

impl ScalarType for BuiltinScalar {
    fn name(&self) -> &str {
        self.type_name()
    }

    fn is_instance_of(&self, value: Option<Instance<'_>>) -> Result<bool> {
        Ok(match require_instance(self.type_name(), value)? {
            Instance::Literal(Literal::Null) => true,
            Instance::Literal(literal) => self.runtime_from_literal(literal).is_some(),
            Instance::Value(value) if value.is_null() => true,
            Instance::Value(value) => value
                .as_json()
                .is_some_and(|json| self.runtime_from_json(json).is_some()),
        })
    }

    fn parse_literal(&self, literal: &Literal) -> Result<Option<Value>> {
        if literal.is_null() {
            return Ok(None);
        }
        self.runtime_from_literal(literal)
            .map(|json| Some(Value::Json(json)))
            .ok_or_else(|| {
                CoercionError::data(
                    self.type_name(),
                    format!(
                        "{} cannot parse {} literal",
                        self.type_name(),
                        literal.kind_name()
                    ),
                )
            })
    }

    fn parse_value(&self, value: Option<&Value>) -> Result<Literal> {
        self.literal_for(value)
    }

    fn parse_result(&self, value: Option<&Value>) -> Result<Literal> {
        self.literal_for(value)
    }

    fn serialize(&self, value: Option<Value>) -> Result<Option<Value>> {
        self.coerce(value)
    }

    fn deserialize(&self, value: Option<Value>) -> Result<Option<Value>> {
        self.coerce(value)
    }
}
