//! The scalar coercion contract and the registry of scalar kinds.
//!
//! Every leaf type implements [`ScalarType`], a square of conversions between
//! four representations:
//!
//! - `parse_literal`: syntax-tree literal → runtime value
//! - `parse_value` / `parse_result`: external, runtime or serialized value → literal
//! - `serialize`: runtime value → serialized output
//! - `deserialize`: serialized or external input → runtime value
//!
//! Input can arrive as an inline literal, an external variable payload, or a
//! previously serialized result; output can be requested as a runtime value
//! or as a literal for printing. Nothing above this trait branches on the
//! concrete scalar kind.

pub mod builtin;
pub mod spatial;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CoercionError, Result};
use crate::literal::Literal;
use crate::value::{Instance, Value};

/// Conversions every leaf scalar kind provides.
pub trait ScalarType: Send + Sync {
    /// Type name as registered in the schema.
    fn name(&self) -> &str;

    /// Whether `value` is something this scalar can represent.
    ///
    /// `None` is the absent sentinel (no value at all, not a null value) and
    /// is a contract violation.
    fn is_instance_of(&self, value: Option<Instance<'_>>) -> Result<bool>;

    /// Literal → runtime value. `Null` yields `None`.
    fn parse_literal(&self, literal: &Literal) -> Result<Option<Value>>;

    /// External input → literal. Absent yields [`Literal::Null`].
    fn parse_value(&self, value: Option<&Value>) -> Result<Literal>;

    /// Runtime or serialized result → literal.
    fn parse_result(&self, value: Option<&Value>) -> Result<Literal>;

    /// Runtime value → serialized output.
    fn serialize(&self, value: Option<Value>) -> Result<Option<Value>>;

    /// Serialized or external input → runtime value.
    fn deserialize(&self, value: Option<Value>) -> Result<Option<Value>>;
}

/// Raise the contract violation for a missing `is_instance_of` argument.
pub(crate) fn require_instance<'a>(
    type_name: &str,
    value: Option<Instance<'a>>,
) -> Result<Instance<'a>> {
    value.ok_or_else(|| {
        CoercionError::contract(type_name, "is_instance_of requires a value, got none")
    })
}

/// Drop JSON `null` so callers only see real values.
pub(crate) fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

pub(crate) fn present_ref(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Scalar kinds keyed by type name.
#[derive(Clone, Default)]
pub struct ScalarRegistry {
    scalars: BTreeMap<String, Arc<dyn ScalarType>>,
}

impl fmt::Debug for ScalarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.scalars.keys()).finish()
    }
}

impl ScalarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in scalars and every spatial input type.
    pub fn standard() -> Self {
        Self::new().with_builtins().with_spatial()
    }

    /// Add `Boolean`, `Int`, `Float`, `String` and `ID`.
    pub fn with_builtins(mut self) -> Self {
        for scalar in builtin::all() {
            self.register(scalar);
        }
        self
    }

    /// Add the GeoJSON input types and the composite `Geometry` scalar.
    pub fn with_spatial(mut self) -> Self {
        for scalar in spatial::all() {
            self.register(scalar);
        }
        self
    }

    /// Register `scalar` under its own name, replacing any previous entry.
    pub fn register(&mut self, scalar: Arc<dyn ScalarType>) -> Option<Arc<dyn ScalarType>> {
        self.scalars.insert(scalar.name().to_string(), scalar)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ScalarType>> {
        self.scalars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scalars.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scalars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ScalarType>> {
        self.scalars.values()
    }
}
