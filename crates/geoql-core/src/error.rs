//! Error types for scalar coercion and document validation.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::literal::Location;

/// Errors raised by a scalar coercion operation.
///
/// Only [`CoercionError::Data`] is reportable to the end user; a contract
/// violation is a bug in the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The caller broke the operation's contract (absent value where one is
    /// mandatory, or a literal whose top-level shape cannot be this scalar).
    #[error("{type_name}: {message}")]
    ContractViolation { type_name: String, message: String },

    /// The value has a plausible shape but fails a coercion rule.
    #[error("{message}")]
    Data { type_name: String, message: String },
}

impl CoercionError {
    pub fn contract(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ContractViolation {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn data(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Data {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Name of the scalar type that raised the error.
    pub fn type_name(&self) -> &str {
        match self {
            Self::ContractViolation { type_name, .. } | Self::Data { type_name, .. } => type_name,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }

    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    /// Turn a data error into a document-level error at `location`.
    ///
    /// Contract violations are never reported to the end user and yield `None`.
    pub fn into_validation_error(self, location: Option<Location>) -> Option<ValidationError> {
        match self {
            Self::ContractViolation { .. } => None,
            Self::Data { type_name, message } => {
                let mut error = ValidationError::new(message);
                if let Some(location) = location {
                    error = error.with_location(location);
                }
                Some(error.with_extension("type", type_name))
            }
        }
    }
}

/// Convenience alias used throughout geoql-core.
pub type Result<T> = std::result::Result<T, CoercionError>;

/// A document-level validation error.
///
/// Created by a validation rule and never mutated afterwards; a non-empty
/// list of these must stop the document from executing.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, JsonValue>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            extensions: Map::new(),
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_extension(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.extensions.insert(key.to_string(), value.into());
        self
    }
}
