//! Executable document model consumed by validation.
//!
//! Documents arrive with fragment spreads already expanded: every spread has
//! been replaced by an inline fragment carrying its type condition, so the
//! tree below is all a rule needs to walk.

use serde::{Deserialize, Serialize};

use crate::literal::{Literal, Location};

/// A parsed, fragment-expanded executable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub operations: Vec<OperationDefinition>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    #[default]
    Query,
    Mutation,
    Subscription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDefinition {
    #[serde(default)]
    pub kind: OperationKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Selection {
    Field(Field),
    InlineFragment(InlineFragment),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    #[serde(default)]
    pub directives: Vec<Directive>,
    #[serde(default)]
    pub selection_set: Vec<Selection>,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineFragment {
    #[serde(default)]
    pub type_condition: Option<String>,
    #[serde(default)]
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    #[serde(default)]
    pub location: Location,
}

/// An argument as written at an invocation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: Literal,
    #[serde(default)]
    pub location: Location,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: Literal) -> Self {
        Self {
            name: name.into(),
            value,
            location: Location::default(),
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn argument(mut self, name: impl Into<String>, value: Literal) -> Self {
        self.arguments.push(Argument::new(name, value));
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn select(mut self, selection: impl Into<Selection>) -> Self {
        self.selection_set.push(selection.into());
        self
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.location = Location::new(line, column);
        self
    }
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn argument(mut self, name: impl Into<String>, value: Literal) -> Self {
        self.arguments.push(Argument::new(name, value));
        self
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.location = Location::new(line, column);
        self
    }
}

impl InlineFragment {
    pub fn on(type_condition: impl Into<String>) -> Self {
        Self {
            type_condition: Some(type_condition.into()),
            ..Self::default()
        }
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn select(mut self, selection: impl Into<Selection>) -> Self {
        self.selection_set.push(selection.into());
        self
    }
}

impl OperationDefinition {
    pub fn query() -> Self {
        Self::default()
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn select(mut self, selection: impl Into<Selection>) -> Self {
        self.selection_set.push(selection.into());
        self
    }
}

impl Document {
    pub fn new(operations: Vec<OperationDefinition>) -> Self {
        Self { operations }
    }

    /// A document holding one anonymous query with the given selections.
    pub fn query(selections: Vec<Selection>) -> Self {
        Self::new(vec![OperationDefinition {
            selection_set: selections,
            ..OperationDefinition::default()
        }])
    }
}

impl From<Field> for Selection {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<InlineFragment> for Selection {
    fn from(fragment: InlineFragment) -> Self {
        Self::InlineFragment(fragment)
    }
}
