//! Static document validation.
//!
//! A [`DocumentValidator`] runs an ordered list of [`ValidationRule`]s over a
//! fragment-expanded document. Rules never stop at the first problem: every
//! error across the document is collected and returned together, and a
//! non-empty result must keep the document from executing.

mod required_arguments;

pub use required_arguments::RequiredArgumentRule;

use tracing::debug;

use crate::document::Document;
use crate::error::ValidationError;
use crate::schema::TypeSystemView;

/// One static check over a document.
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Append every violation found in `document` to `errors`.
    fn validate(
        &self,
        document: &Document,
        schema: &dyn TypeSystemView,
        errors: &mut Vec<ValidationError>,
    );
}

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Execution gate: `Ok` only when no rule reported anything.
    pub fn into_result(self) -> Result<(), Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Runs a fixed set of rules against documents.
pub struct DocumentValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::new().with_rule(RequiredArgumentRule)
    }
}

impl DocumentValidator {
    /// A validator with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    pub fn validate(&self, document: &Document, schema: &dyn TypeSystemView) -> ValidationResult {
        let mut errors = Vec::new();
        for rule in &self.rules {
            let before = errors.len();
            rule.validate(document, schema, &mut errors);
            debug!(
                rule = rule.name(),
                errors = errors.len() - before,
                "validation rule finished"
            );
        }
        ValidationResult { errors }
    }
}

/// Check every required field and directive argument in `document`.
///
/// Returns an empty list when the document may execute.
pub fn validate(document: &Document, schema: &dyn TypeSystemView) -> Vec<ValidationError> {
    DocumentValidator::default()
        .validate(document, schema)
        .into_errors()
}
