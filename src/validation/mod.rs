//! Submit-time validation.
//!
//! A [`Rule`] checks one field value. A [`FieldSchema`] orders the rules
//! for one field behind a type kind, and a [`Schema`] maps field names to
//! field schemas. The form container only ever talks to a [`Resolver`].

pub mod rules;
pub mod schema;

use crate::core::{ErrorMap, FormValues, Value};

pub use rules::{Matches, MaxLength, MaxNumber, MinLength, MinNumber, OneOf, Required};
pub use schema::{FieldSchema, Schema, SchemaKind};

pub type ValidationError = String;

pub trait Rule: Send + Sync {
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;
}

impl<F> Rule for F
where
    F: Fn(&Value) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self(value)
    }
}

/// Decides whether a full set of form values may be submitted.
pub trait Resolver {
    fn resolve(&self, values: &FormValues) -> Result<(), ErrorMap>;
}

impl<F> Resolver for F
where
    F: Fn(&FormValues) -> Result<(), ErrorMap>,
{
    fn resolve(&self, values: &FormValues) -> Result<(), ErrorMap> {
        self(values)
    }
}

/// Run a list of rules against `value`, returning the first error.
pub fn run_rules(rules: &[Box<dyn Rule>], value: &Value) -> Result<(), ValidationError> {
    for rule in rules {
        rule.validate(value)?;
    }
    Ok(())
}
