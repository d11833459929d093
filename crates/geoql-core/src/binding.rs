//! Argument binding: turn the literals supplied at a field invocation into
//! runtime values through the registered scalars.

use serde_json::Value as JsonValue;
use tracing::trace;

use crate::document::Argument;
use crate::error::{CoercionError, Result};
use crate::literal::Literal;
use crate::scalar::ScalarRegistry;
use crate::schema::{ArgumentDefinition, TypeRef};
use crate::value::Value;

/// Coerce every declared argument, in declaration order.
///
/// Each definition takes the supplied literal, else its default, else stays
/// absent. A non-null argument that ends up absent is a data error; a type
/// with no registered scalar is a contract violation.
pub fn coerce_argument_values(
    definitions: &[ArgumentDefinition],
    supplied: &[Argument],
    registry: &ScalarRegistry,
) -> Result<Vec<(String, Option<Value>)>> {
    let mut values = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let literal = supplied
            .iter()
            .find(|argument| argument.name == definition.name)
            .map(|argument| &argument.value)
            .or(definition.default_value.as_ref());

        let value = match literal {
            Some(literal) => coerce_literal(&definition.ty, literal, registry)?,
            None => None,
        };
        if value.is_none() && definition.ty.is_non_null() {
            return Err(CoercionError::data(
                definition.ty.named_type(),
                format!("The argument `{}` is required.", definition.name),
            ));
        }
        trace!(argument = %definition.name, ty = %definition.ty, "argument bound");
        values.push((definition.name.clone(), value));
    }
    Ok(values)
}

fn coerce_literal(
    ty: &TypeRef,
    literal: &Literal,
    registry: &ScalarRegistry,
) -> Result<Option<Value>> {
    match (ty, literal) {
        (_, Literal::Null) => Ok(None),
        (TypeRef::NonNull(inner), _) => coerce_literal(inner, literal, registry),
        (TypeRef::List(item), Literal::List(items)) => items
            .iter()
            .map(|element| coerce_element(item, element, registry))
            .collect::<Result<Vec<_>>>()
            .map(|elements| Some(Value::List(elements))),
        // A single value given for a list type is a list of one.
        (TypeRef::List(item), single) => {
            Ok(Some(Value::List(vec![coerce_element(item, single, registry)?])))
        }
        (TypeRef::Named(name), _) => registry
            .get(name)
            .ok_or_else(|| {
                CoercionError::contract(name.as_str(), "no scalar is registered under this name")
            })?
            .parse_literal(literal),
    }
}

fn coerce_element(ty: &TypeRef, literal: &Literal, registry: &ScalarRegistry) -> Result<Value> {
    match coerce_literal(ty, literal, registry)? {
        Some(value) => Ok(value),
        None if ty.is_non_null() => Err(CoercionError::data(
            ty.named_type(),
            "list elements of a non-null type must not be null",
        )),
        None => Ok(Value::Json(JsonValue::Null)),
    }
}
