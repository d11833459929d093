//! Read-only view of the type system, plus a small in-memory implementation.
//!
//! Validation only ever asks three questions of a schema: which type roots an
//! operation, what type a field returns, and which arguments a field or
//! directive declares. [`TypeSystemView`] is that surface. [`Schema`] answers
//! it from plain maps and can be built in code or loaded from JSON.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::OperationKind;
use crate::literal::Literal;

/// A declared type: a named type, wrapped in list and non-null modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// The innermost named type, ignoring list and non-null wrappers.
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid type reference `{0}`")]
pub struct ParseTypeRefError(String);

impl FromStr for TypeRef {
    type Err = ParseTypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(inner) = trimmed.strip_suffix('!') {
            let inner: TypeRef = inner.parse().map_err(|_| ParseTypeRefError(s.into()))?;
            if inner.is_non_null() {
                return Err(ParseTypeRefError(s.into()));
            }
            return Ok(Self::non_null(inner));
        }
        if let Some(inner) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let inner: TypeRef = inner.parse().map_err(|_| ParseTypeRefError(s.into()))?;
            return Ok(Self::list(inner));
        }
        let valid_name = trimmed
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid_name {
            Ok(Self::named(trimmed))
        } else {
            Err(ParseTypeRefError(s.into()))
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = ParseTypeRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// An argument declared on a field or directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Literal>,
}

impl ArgumentDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: Literal) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Non-null and without a default: must be supplied with a non-null value.
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}

/// Where arguments are supplied: a field on a parent type, or a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationSite<'a> {
    Field { parent_type: &'a str, field: &'a str },
    Directive { name: &'a str },
}

/// Read-only access to the type system.
pub trait TypeSystemView {
    /// Ordered argument definitions for a site, or `None` if the site is unknown.
    fn arguments_of(&self, site: &InvocationSite<'_>) -> Option<&[ArgumentDefinition]>;

    /// Declared type of `field` on `parent_type`.
    fn field_type(&self, parent_type: &str, field: &str) -> Option<&TypeRef>;

    /// Root object type for an operation kind.
    fn root_type(&self, kind: OperationKind) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,
}

impl FieldDefinition {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            arguments: Vec::new(),
        }
    }

    pub fn argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// In-memory type system.
///
/// Every schema carries the built-in `@skip` and `@include` directives, each
/// with a single required `if: Boolean!` argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SchemaDocument")]
pub struct Schema {
    query: String,
    mutation: Option<String>,
    subscription: Option<String>,
    types: BTreeMap<String, BTreeMap<String, FieldDefinition>>,
    directives: BTreeMap<String, Vec<ArgumentDefinition>>,
}

/// On-disk shape of a schema before built-ins are added.
#[derive(Deserialize)]
struct SchemaDocument {
    #[serde(default = "default_query_type")]
    query: String,
    #[serde(default)]
    mutation: Option<String>,
    #[serde(default)]
    subscription: Option<String>,
    #[serde(default)]
    types: BTreeMap<String, BTreeMap<String, FieldDefinition>>,
    #[serde(default)]
    directives: BTreeMap<String, Vec<ArgumentDefinition>>,
}

fn default_query_type() -> String {
    "Query".to_string()
}

impl From<SchemaDocument> for Schema {
    fn from(doc: SchemaDocument) -> Self {
        let mut directives = builtin_directives();
        directives.extend(doc.directives);
        Self {
            query: doc.query,
            mutation: doc.mutation,
            subscription: doc.subscription,
            types: doc.types,
            directives,
        }
    }
}

fn builtin_directives() -> BTreeMap<String, Vec<ArgumentDefinition>> {
    let condition = || {
        vec![ArgumentDefinition::new(
            "if",
            TypeRef::non_null(TypeRef::named("Boolean")),
        )]
    };
    BTreeMap::from([
        ("skip".to_string(), condition()),
        ("include".to_string(), condition()),
    ])
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }
}

impl TypeSystemView for Schema {
    fn arguments_of(&self, site: &InvocationSite<'_>) -> Option<&[ArgumentDefinition]> {
        match site {
            InvocationSite::Field { parent_type, field } => self
                .types
                .get(*parent_type)
                .and_then(|fields| fields.get(*field))
                .map(|definition| definition.arguments.as_slice()),
            InvocationSite::Directive { name } => {
                self.directives.get(*name).map(Vec::as_slice)
            }
        }
    }

    fn field_type(&self, parent_type: &str, field: &str) -> Option<&TypeRef> {
        self.types
            .get(parent_type)
            .and_then(|fields| fields.get(field))
            .map(|definition| &definition.ty)
    }

    fn root_type(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => Some(self.query.as_str()),
            OperationKind::Mutation => self.mutation.as_deref(),
            OperationKind::Subscription => self.subscription.as_deref(),
        }
    }
}

/// Incremental construction of a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    query: Option<String>,
    mutation: Option<String>,
    subscription: Option<String>,
    types: BTreeMap<String, BTreeMap<String, FieldDefinition>>,
    directives: BTreeMap<String, Vec<ArgumentDefinition>>,
}

impl SchemaBuilder {
    pub fn query_type(mut self, name: impl Into<String>) -> Self {
        self.query = Some(name.into());
        self
    }

    pub fn mutation_type(mut self, name: impl Into<String>) -> Self {
        self.mutation = Some(name.into());
        self
    }

    pub fn subscription_type(mut self, name: impl Into<String>) -> Self {
        self.subscription = Some(name.into());
        self
    }

    pub fn field(
        mut self,
        parent_type: impl Into<String>,
        name: impl Into<String>,
        definition: FieldDefinition,
    ) -> Self {
        self.types
            .entry(parent_type.into())
            .or_default()
            .insert(name.into(), definition);
        self
    }

    pub fn directive(mut self, name: impl Into<String>, arguments: Vec<ArgumentDefinition>) -> Self {
        self.directives.insert(name.into(), arguments);
        self
    }

    pub fn build(self) -> Schema {
        Schema::from(SchemaDocument {
            query: self.query.unwrap_or_else(default_query_type),
            mutation: self.mutation,
            subscription: self.subscription,
            types: self.types,
            directives: self.directives,
        })
    }
}
