//! YAML form definitions.
//!
//! A [`FormConfig`] lists the fields in display order and, separately, the
//! schema entries that validate them. [`FormConfig::build`] turns it into a
//! ready [`FormContainer`].

use crate::core::Value;
use crate::error::{FormError, FormResult};
use crate::form::FormContainer;
use crate::validation::{FieldSchema, Schema, SchemaKind};
use crate::widgets::{
    CheckboxField, CheckboxFieldProps, FieldWidget, SelectField, SelectFieldProps, SelectOption,
    TextField, TextFieldProps,
};
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub submit_label: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub schema: IndexMap<String, RuleSetConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldConfig {
    Text(TextFieldProps),
    Select(SelectFieldProps),
    Checkbox(CheckboxFieldProps),
}

impl FieldConfig {
    pub fn name(&self) -> &str {
        match self {
            Self::Text(props) => &props.name,
            Self::Select(props) => &props.name,
            Self::Checkbox(props) => &props.name,
        }
    }

    fn into_widget(self) -> Box<dyn FieldWidget> {
        match self {
            Self::Text(props) => Box::new(TextField::new(props)),
            Self::Select(props) => Box::new(SelectField::new(props)),
            Self::Checkbox(props) => Box::new(CheckboxField::new(props)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LengthRule {
    pub value: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundRule {
    pub value: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternRule {
    pub pattern: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OneOfRule {
    pub values: Vec<Value>,
    pub message: String,
}

/// Schema entry for one field. Rules run in the order the fields are
/// declared here, not the order they appear in the YAML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetConfig {
    #[serde(default, rename = "type")]
    pub kind: SchemaKind,
    #[serde(default)]
    pub type_error: Option<String>,
    #[serde(default)]
    pub required: Option<String>,
    #[serde(default)]
    pub min_length: Option<LengthRule>,
    #[serde(default)]
    pub max_length: Option<LengthRule>,
    #[serde(default)]
    pub matches: Option<PatternRule>,
    #[serde(default)]
    pub min: Option<BoundRule>,
    #[serde(default)]
    pub max: Option<BoundRule>,
    #[serde(default)]
    pub one_of: Option<OneOfRule>,
}

impl RuleSetConfig {
    pub fn to_field_schema(&self, field: &str) -> FormResult<FieldSchema> {
        let text_rules = self.min_length.is_some() || self.max_length.is_some() || self.matches.is_some();
        if text_rules && matches!(self.kind, SchemaKind::Number | SchemaKind::Boolean) {
            return Err(invalid(field, "length and pattern rules need a string field"));
        }
        let number_rules = self.min.is_some() || self.max.is_some();
        if number_rules && self.kind != SchemaKind::Number {
            return Err(invalid(field, "`min` and `max` need a number field"));
        }

        let mut schema = FieldSchema::new(self.kind);
        if let Some(message) = &self.type_error {
            schema = schema.type_error(message.clone());
        }
        if let Some(message) = &self.required {
            schema = schema.required(message.clone());
        }
        if let Some(rule) = &self.min_length {
            schema = schema.min_length(rule.value, rule.message.clone());
        }
        if let Some(rule) = &self.max_length {
            schema = schema.max_length(rule.value, rule.message.clone());
        }
        if let Some(rule) = &self.matches {
            let pattern = Regex::new(&rule.pattern).map_err(|source| {
                warn!(field, pattern = %rule.pattern, "rejected pattern");
                FormError::Pattern {
                    field: field.to_string(),
                    source,
                }
            })?;
            schema = schema.matches(pattern, rule.message.clone());
        }
        if let Some(rule) = &self.min {
            schema = schema.min(rule.value, rule.message.clone());
        }
        if let Some(rule) = &self.max {
            schema = schema.max(rule.value, rule.message.clone());
        }
        if let Some(rule) = &self.one_of {
            schema = schema.one_of(rule.values.clone(), rule.message.clone());
        }
        Ok(schema)
    }
}

fn invalid(field: &str, reason: &str) -> FormError {
    warn!(field, reason, "rejected schema entry");
    FormError::InvalidSchema {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

impl FormConfig {
    pub fn from_yaml_str(source: &str) -> FormResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> FormResult<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&source)?;
        debug!(path = %path.display(), fields = config.fields.len(), "loaded form config");
        Ok(config)
    }

    /// The demo form: a required name, a flavour menu and a hero checkbox.
    pub fn reference() -> Self {
        let mut schema = IndexMap::new();
        schema.insert(
            "textField".to_string(),
            RuleSetConfig {
                kind: SchemaKind::String,
                required: Some("Fullname is required".to_string()),
                ..RuleSetConfig::default()
            },
        );

        Self {
            title: "Reference form".to_string(),
            submit_label: None,
            fields: vec![
                FieldConfig::Text(TextFieldProps::new("textField").label("Full name")),
                FieldConfig::Select(SelectFieldProps::new("Selectfield").label("Flavour").options(
                    vec![
                        SelectOption::labeled("Chocolate", "chocolate"),
                        SelectOption::labeled("Strawberry", "strawberry"),
                        SelectOption::labeled("Vanilla", "vanilla"),
                    ],
                )),
                FieldConfig::Checkbox(CheckboxFieldProps::new("Checkboxfield").label("hero")),
            ],
            schema,
        }
    }

    pub fn schema(&self) -> FormResult<Schema> {
        let mut schema = Schema::new();
        for (field, rules) in &self.schema {
            if !self.fields.iter().any(|config| config.name() == field) {
                warn!(field = %field, "schema entry has no matching field");
            }
            schema.insert(field.clone(), rules.to_field_schema(field)?);
        }
        Ok(schema)
    }

    pub fn build(self) -> FormResult<FormContainer> {
        let schema = self.schema()?;
        let mut form = FormContainer::new(schema).with_title(self.title);
        if let Some(label) = self.submit_label {
            form = form.with_submit_label(label);
        }
        for field in self.fields {
            form.add_field(field.into_widget())?;
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldConfig, FormConfig};
    use crate::core::Value;
    use crate::error::FormError;
    use std::io::Write;

    const FORM: &str = r#"
title: Sign up
fields:
  - kind: text
    name: textField
    label: Full name
  - kind: select
    name: Selectfield
    label: Flavour
    options:
      - { value: chocolate, label: Chocolate }
      - { value: vanilla, label: Vanilla }
  - kind: checkbox
    name: Checkboxfield
    label: hero
    style: { color: magenta }
schema:
  textField:
    type: string
    required: Fullname is required
    min_length: { value: 2, message: Too short }
"#;

    #[test]
    fn parses_fields_in_order() {
        let config = FormConfig::from_yaml_str(FORM).expect("config");
        let names: Vec<&str> = config.fields.iter().map(FieldConfig::name).collect();
        assert_eq!(names, vec!["textField", "Selectfield", "Checkboxfield"]);
        assert_eq!(config.title, "Sign up");
    }

    #[test]
    fn built_form_registers_defaults() {
        let form = FormConfig::from_yaml_str(FORM)
            .and_then(FormConfig::build)
            .expect("form");
        assert_eq!(form.field_count(), 3);
        assert_eq!(form.value("textField"), Some(&Value::from("")));
        assert_eq!(form.value("Checkboxfield"), Some(&Value::Bool(false)));
    }

    #[test]
    fn built_schema_rejects_short_name() {
        let mut form = FormConfig::from_yaml_str(FORM)
            .and_then(FormConfig::build)
            .expect("form");
        form.set_value("textField", "A").expect("known field");
        form.submit();
        assert_eq!(form.errors().message("textField"), Some("Too short"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = FormConfig::from_yaml_str("fields:\n  - kind: text\n    name: a\n    control: x\n");
        assert!(matches!(result, Err(FormError::Config(_))));
    }

    #[test]
    fn bad_pattern_is_reported_per_field() {
        let config = FormConfig::from_yaml_str(
            "schema:\n  email:\n    type: string\n    matches: { pattern: '(', message: bad }\n",
        )
        .expect("config");
        assert!(matches!(
            config.schema(),
            Err(FormError::Pattern { field, .. }) if field == "email"
        ));
    }

    #[test]
    fn number_bounds_need_number_kind() {
        let config = FormConfig::from_yaml_str(
            "schema:\n  age:\n    type: string\n    min: { value: 1, message: low }\n",
        )
        .expect("config");
        assert!(matches!(config.schema(), Err(FormError::InvalidSchema { .. })));
    }

    #[test]
    fn duplicate_field_names_fail_to_build() {
        let result = FormConfig::from_yaml_str(
            "fields:\n  - { kind: text, name: a }\n  - { kind: checkbox, name: a }\n",
        )
        .and_then(FormConfig::build);
        assert!(matches!(result, Err(FormError::DuplicateField(name)) if name == "a"));
    }

    #[test]
    fn fractional_values_are_accepted() {
        let config = FormConfig::from_yaml_str(
            r#"
fields:
  - { kind: select, name: scale, isArray: true, options: [0.5, 1.5], defaultValue: 2.5 }
schema:
  scale:
    one_of: { values: [0.5, 1.5], message: pick one }
"#,
        )
        .expect("config");
        let mut form = config.build().expect("form");
        assert_eq!(form.value("scale"), Some(&Value::Float(2.5)));

        form.submit();
        assert_eq!(form.errors().message("scale"), Some("pick one"));

        form.set_value("scale", 0.5).expect("known field");
        assert!(form.submit().is_valid());
    }

    #[test]
    fn reference_form_matches_demo() {
        let mut form = FormConfig::reference().build().expect("form");
        assert_eq!(form.value("Selectfield"), Some(&Value::from("")));
        form.submit();
        assert_eq!(form.errors().message("textField"), Some("Fullname is required"));
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(FORM.as_bytes()).expect("write");
        let config = FormConfig::load(file.path()).expect("config");
        assert_eq!(config.fields.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = FormConfig::load(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(FormError::Io(_))));
    }
}
