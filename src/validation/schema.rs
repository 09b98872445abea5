use crate::core::{ErrorMap, FieldName, FormValues, Value};
use crate::error::FieldValidationError;
use crate::validation::rules::{
    Matches, MaxLength, MaxNumber, MinLength, MinNumber, OneOf, Required,
};
use crate::validation::{Resolver, Rule, ValidationError, run_rules};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    #[default]
    Mixed,
}

impl SchemaKind {
    fn type_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Mixed => "mixed",
        }
    }

    /// Coerces `value` into this kind. `None` means the value has the wrong type.
    fn cast(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (_, Value::None) | (Self::Mixed, _) => Some(value.clone()),
            (Self::String, Value::List(_)) => None,
            (Self::String, other) => other.to_text_scalar().map(Value::Text),
            (Self::Number, Value::Text(text)) if text.trim().is_empty() => Some(Value::None),
            (Self::Number, other) => other.to_numeric(),
            (Self::Boolean, Value::Bool(_)) => Some(value.clone()),
            (Self::Boolean, Value::Text(text)) if text.is_empty() => Some(Value::None),
            (Self::Boolean, other) => other.to_bool().map(Value::Bool),
        }
    }
}

/// Ordered checks for a single field.
///
/// The value is first cast to the schema kind, then checked for presence,
/// then run through the remaining rules. The first failure wins. A field
/// that is not required and has no value skips the remaining rules.
pub struct FieldSchema {
    kind: SchemaKind,
    type_message: Option<String>,
    required: Option<Required>,
    rules: Vec<Box<dyn Rule>>,
}

impl FieldSchema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            type_message: None,
            required: None,
            rules: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn mixed() -> Self {
        Self::new(SchemaKind::Mixed)
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn type_error(mut self, message: impl Into<String>) -> Self {
        self.type_message = Some(message.into());
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(Required::new(message));
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(MinLength::new(min, message))
    }

    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(MaxLength::new(max, message))
    }

    pub fn matches(self, pattern: Regex, message: impl Into<String>) -> Self {
        self.rule(Matches::new(pattern, message))
    }

    pub fn min(self, min: i64, message: impl Into<String>) -> Self {
        self.rule(MinNumber::new(min, message))
    }

    pub fn max(self, max: i64, message: impl Into<String>) -> Self {
        self.rule(MaxNumber::new(max, message))
    }

    pub fn one_of(self, allowed: Vec<Value>, message: impl Into<String>) -> Self {
        self.rule(OneOf::new(allowed, message))
    }

    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn validate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let Some(value) = self.kind.cast(value) else {
            return Err(self.type_message.clone().unwrap_or_else(|| {
                format!("{field} must be a `{}` type", self.kind.type_name())
            }));
        };

        match &self.required {
            Some(required) => required.validate(&value)?,
            None if value.is_empty() => return Ok(()),
            None => {}
        }

        run_rules(&self.rules, &value)
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("kind", &self.kind)
            .field("type_message", &self.type_message)
            .field("required", &self.required)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Field name to [`FieldSchema`], checked against a whole form at submit.
#[derive(Debug, Default)]
pub struct Schema {
    fields: IndexMap<FieldName, FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<FieldName>, schema: FieldSchema) -> Self {
        self.insert(name, schema);
        self
    }

    pub fn insert(&mut self, name: impl Into<FieldName>, schema: FieldSchema) {
        self.fields.insert(name.into(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn validate_field(&self, name: &str, value: &Value) -> Option<FieldValidationError> {
        let schema = self.fields.get(name)?;
        schema
            .validate(name, value)
            .err()
            .map(|message| FieldValidationError::new(name, message))
    }

    /// Validates every field the schema knows about. Values without a
    /// schema entry are never reported.
    pub fn validate(&self, values: &FormValues) -> Result<(), ErrorMap> {
        let errors: Vec<FieldValidationError> = self
            .fields
            .keys()
            .filter_map(|name| {
                let absent = Value::None;
                self.validate_field(name, values.get(name).unwrap_or(&absent))
            })
            .collect();

        if errors.is_empty() {
            return Ok(());
        }
        debug!(count = errors.len(), "schema rejected values");
        Err(ErrorMap::from_errors(errors))
    }
}

impl Resolver for Schema {
    fn resolve(&self, values: &FormValues) -> Result<(), ErrorMap> {
        self.validate(values)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldSchema, Schema};
    use crate::core::{FormValues, Value};
    use regex::Regex;

    fn values(pairs: &[(&str, Value)]) -> FormValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn reference_schema() -> Schema {
        Schema::new().field(
            "textField",
            FieldSchema::string().required("Fullname is required"),
        )
    }

    #[test]
    fn empty_required_string_reports_message() {
        let errors = reference_schema()
            .validate(&values(&[("textField", Value::from(""))]))
            .expect_err("should reject");
        assert_eq!(errors.message("textField"), Some("Fullname is required"));
    }

    #[test]
    fn missing_field_validates_as_absent() {
        let errors = reference_schema()
            .validate(&FormValues::new())
            .expect_err("should reject");
        assert!(errors.contains("textField"));
    }

    #[test]
    fn fields_without_schema_are_never_reported() {
        let result = reference_schema().validate(&values(&[
            ("textField", Value::from("Ada")),
            ("Selectfield", Value::from("")),
            ("Checkboxfield", Value::List(vec![])),
        ]));
        assert!(result.is_ok());
    }

    #[test]
    fn string_kind_coerces_scalars_and_rejects_lists() {
        let schema = FieldSchema::string();
        assert!(schema.validate("f", &Value::Bool(true)).is_ok());
        assert_eq!(
            schema.validate("f", &Value::List(vec!["a".into()])),
            Err("f must be a `string` type".to_string())
        );
    }

    #[test]
    fn number_kind_parses_text_and_treats_blank_as_absent() {
        let schema = FieldSchema::number().min(18, "too young");
        assert!(schema.validate("age", &Value::from("")).is_ok());
        assert_eq!(schema.validate("age", &Value::from("12")), Err("too young".to_string()));
        assert_eq!(
            schema.validate("age", &Value::from("twelve")),
            Err("age must be a `number` type".to_string())
        );
    }

    #[test]
    fn optional_field_skips_rules_when_empty() {
        let schema = FieldSchema::string().matches(Regex::new("^a").expect("regex"), "must start with a");
        assert!(schema.validate("f", &Value::None).is_ok());
        assert!(schema.validate("f", &Value::from("b")).is_err());
    }

    #[test]
    fn first_failing_rule_wins() {
        let schema = FieldSchema::string()
            .required("required")
            .min_length(3, "short")
            .max_length(1, "long");
        assert_eq!(schema.validate("f", &Value::from("ab")), Err("short".to_string()));
    }

    #[test]
    fn debug_output_counts_boxed_rules() {
        let schema = Schema::new().field(
            "textField",
            FieldSchema::string()
                .required("Fullname is required")
                .min_length(2, "short"),
        );
        let debug = format!("{schema:?}");
        assert!(debug.contains("textField"));
        assert!(debug.contains("kind: String"));
        assert!(debug.contains("rules: 1"));
    }

    #[test]
    fn custom_rule_closure() {
        let schema = FieldSchema::mixed().rule(|value: &Value| {
            if value.as_bool() == Some(true) {
                Ok(())
            } else {
                Err("must accept".to_string())
            }
        });
        assert!(schema.validate("terms", &Value::Bool(true)).is_ok());
        assert_eq!(schema.validate("terms", &Value::Bool(false)), Err("must accept".to_string()));
    }
}
