//! The composite `Geometry` scalar: accepts any of several concrete kinds.
//!
//! Candidates are opaque [`ScalarType`]s. Each operation offers the input to
//! the candidates in order; a data error means "not my kind" and moves on to
//! the next one, a contract violation stops immediately. When no candidate
//! accepts, the error from the candidate named by the input's `type` field
//! is reported in preference to a generic mismatch.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::trace;

use super::geojson::GeoJsonScalar;
use super::geometry::GeometryKind;
use super::TYPE_FIELD;
use crate::error::{CoercionError, Result};
use crate::literal::Literal;
use crate::scalar::{present, present_ref, require_instance, ScalarType};
use crate::value::{Instance, Value};

pub struct GeometryScalar {
    candidates: Vec<Arc<dyn ScalarType>>,
}

impl GeometryScalar {
    pub const NAME: &'static str = "Geometry";

    pub fn new(candidates: Vec<Arc<dyn ScalarType>>) -> Self {
        Self { candidates }
    }

    /// Composite over every [`GeometryKind`].
    pub fn standard() -> Self {
        Self::new(
            GeometryKind::ALL
                .into_iter()
                .map(|kind| Arc::new(GeoJsonScalar::new(kind)) as Arc<dyn ScalarType>)
                .collect(),
        )
    }

    pub fn candidates(&self) -> &[Arc<dyn ScalarType>] {
        &self.candidates
    }

    fn no_match(&self, what: &str) -> CoercionError {
        CoercionError::data(
            Self::NAME,
            format!("{what} does not match any supported geometry kind"),
        )
    }

    /// Run `attempt` on each candidate until one succeeds.
    ///
    /// `declared` is the kind the input claims to be; if its candidate
    /// rejects the input, that rejection is returned.
    fn first_accepting<T>(
        &self,
        what: &str,
        declared: Option<GeometryKind>,
        mut attempt: impl FnMut(&dyn ScalarType) -> Result<T>,
    ) -> Result<T> {
        let declared = declared.map(GeometryKind::input_type_name);
        let mut matched = None;
        for candidate in &self.candidates {
            match attempt(candidate.as_ref()) {
                Ok(result) => return Ok(result),
                Err(err @ CoercionError::ContractViolation { .. }) => return Err(err),
                Err(err) => {
                    trace!(candidate = candidate.name(), %err, "geometry candidate rejected input");
                    if matched.is_none() && declared == Some(candidate.name()) {
                        matched = Some(err);
                    }
                }
            }
        }
        Err(matched.unwrap_or_else(|| self.no_match(what)))
    }

    fn instance_candidate(&self, value: &Value) -> Result<Option<&Arc<dyn ScalarType>>> {
        for candidate in &self.candidates {
            if candidate.is_instance_of(Some(Instance::Value(value)))? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

/// The kind a runtime value claims to be, from its geometry or its `type` field.
fn declared_kind(value: &Value) -> Option<GeometryKind> {
    match value {
        Value::Geometry(geometry) => Some(geometry.kind()),
        Value::Json(JsonValue::Object(map)) => map
            .get(TYPE_FIELD)
            .and_then(JsonValue::as_str)
            .and_then(GeometryKind::from_name),
        _ => None,
    }
}

impl std::fmt::Debug for GeometryScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryScalar")
            .field(
                "candidates",
                &self.candidates.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ScalarType for GeometryScalar {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_instance_of(&self, value: Option<Instance<'_>>) -> Result<bool> {
        let value = require_instance(Self::NAME, value)?;
        for candidate in &self.candidates {
            if candidate.is_instance_of(Some(value))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn parse_literal(&self, literal: &Literal) -> Result<Option<Value>> {
        match literal {
            Literal::Null => Ok(None),
            Literal::Object(_) => {
                let declared = match literal.field(TYPE_FIELD) {
                    Some(Literal::String(name) | Literal::Enum(name)) => {
                        GeometryKind::from_name(name)
                    }
                    _ => None,
                };
                self.first_accepting("object literal", declared, |candidate| {
                    candidate.parse_literal(literal)
                })
            }
            other => Err(CoercionError::contract(
                Self::NAME,
                format!(
                    "parse_literal expects an object literal, got {}",
                    other.kind_name()
                ),
            )),
        }
    }

    fn parse_value(&self, value: Option<&Value>) -> Result<Literal> {
        match present_ref(value) {
            None => Ok(Literal::Null),
            Some(value) => self.first_accepting(value.describe(), declared_kind(value), |candidate| {
                candidate.parse_value(Some(value))
            }),
        }
    }

    fn parse_result(&self, value: Option<&Value>) -> Result<Literal> {
        match present_ref(value) {
            None => Ok(Literal::Null),
            Some(value) => self.first_accepting(value.describe(), declared_kind(value), |candidate| {
                candidate.parse_result(Some(value))
            }),
        }
    }

    fn serialize(&self, value: Option<Value>) -> Result<Option<Value>> {
        match present(value) {
            None => Ok(None),
            // Kind-ambiguous payloads that are already serialized pass through.
            Some(value @ Value::Json(JsonValue::Object(_))) => Ok(Some(value)),
            Some(value) => match self.instance_candidate(&value)? {
                Some(candidate) => candidate.serialize(Some(value)),
                None => Err(self.no_match(value.describe())),
            },
        }
    }

    fn deserialize(&self, value: Option<Value>) -> Result<Option<Value>> {
        match present(value) {
            None => Ok(None),
            Some(value) => self.first_accepting(value.describe(), declared_kind(&value), |candidate| {
                candidate.deserialize(Some(value.clone()))
            }),
        }
    }
}
