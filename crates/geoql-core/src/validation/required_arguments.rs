//! Required-argument rule: every non-null argument without a default must be
//! supplied, and supplied with something other than `null`.
//!
//! The rule only checks presence. Whether a supplied literal fits the
//! argument's type is a separate rule's job, so `null` given to a non-null
//! argument is reported here as a missing argument whatever its scalar kind.

use std::collections::HashMap;

use crate::document::{Argument, Directive, Document, Selection};
use crate::error::ValidationError;
use crate::literal::{Literal, Location};
use crate::schema::{ArgumentDefinition, InvocationSite, TypeRef, TypeSystemView};
use crate::validation::ValidationRule;

const SPECIFIED_BY: &str = "https://spec.graphql.org/October2021/#sec-Required-Arguments";

/// Flags missing or explicitly-null required arguments on fields and directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredArgumentRule;

impl ValidationRule for RequiredArgumentRule {
    fn name(&self) -> &'static str {
        "RequiredArgumentRule"
    }

    fn validate(
        &self,
        document: &Document,
        schema: &dyn TypeSystemView,
        errors: &mut Vec<ValidationError>,
    ) {
        let mut visitor = Visitor { schema, errors };
        for operation in &document.operations {
            visitor.visit_directives(&operation.directives);
            let root = schema.root_type(operation.kind);
            visitor.visit_selection_set(&operation.selection_set, root);
        }
    }
}

/// Build the error for one unsatisfied argument.
pub(crate) fn required_argument_error(
    argument: &str,
    site: InvocationSite<'_>,
    location: Location,
) -> ValidationError {
    let error = ValidationError::new(format!("The argument `{argument}` is required."))
        .with_location(location);
    let error = match site {
        InvocationSite::Field { parent_type, field } => error
            .with_extension("type", parent_type)
            .with_extension("field", field),
        InvocationSite::Directive { name } => error.with_extension("directive", name),
    };
    error
        .with_extension("argument", argument)
        .with_extension("specifiedBy", SPECIFIED_BY)
}

struct Visitor<'a, 'e> {
    schema: &'a dyn TypeSystemView,
    errors: &'e mut Vec<ValidationError>,
}

impl<'a> Visitor<'a, '_> {
    fn visit_selection_set(&mut self, selections: &'a [Selection], parent_type: Option<&'a str>) {
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    if let Some(parent_type) = parent_type {
                        let site = InvocationSite::Field {
                            parent_type,
                            field: &field.name,
                        };
                        if let Some(definitions) = self.schema.arguments_of(&site) {
                            self.check_arguments(definitions, &field.arguments, site, field.location);
                        }
                    }
                    self.visit_directives(&field.directives);

                    // An unknown field type still gets its directives checked below;
                    // nested fields are skipped for lack of a parent type.
                    let field_type = parent_type
                        .and_then(|parent| self.schema.field_type(parent, &field.name))
                        .map(TypeRef::named_type);
                    self.visit_selection_set(&field.selection_set, field_type);
                }
                Selection::InlineFragment(fragment) => {
                    self.visit_directives(&fragment.directives);
                    let fragment_type = fragment.type_condition.as_deref().or(parent_type);
                    self.visit_selection_set(&fragment.selection_set, fragment_type);
                }
            }
        }
    }

    fn visit_directives(&mut self, directives: &'a [Directive]) {
        for directive in directives {
            let site = InvocationSite::Directive {
                name: &directive.name,
            };
            if let Some(definitions) = self.schema.arguments_of(&site) {
                self.check_arguments(definitions, &directive.arguments, site, directive.location);
            }
        }
    }

    fn check_arguments(
        &mut self,
        definitions: &[ArgumentDefinition],
        supplied: &[Argument],
        site: InvocationSite<'_>,
        location: Location,
    ) {
        let mut provided: HashMap<&str, &Literal> = HashMap::with_capacity(supplied.len());
        for argument in supplied {
            provided.entry(argument.name.as_str()).or_insert(&argument.value);
        }

        for definition in definitions.iter().filter(|d| d.is_required()) {
            let satisfied = provided
                .get(definition.name.as_str())
                .is_some_and(|value| !value.is_null());
            if !satisfied {
                self.errors
                    .push(required_argument_error(&definition.name, site, location));
            }
        }
    }
}
