use crate::core::FieldName;
use crate::error::FieldValidationError;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
}

/// Per-field failures from the most recent submit attempt.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    entries: IndexMap<FieldName, FieldError>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first error reported for each field.
    pub fn from_errors(errors: impl IntoIterator<Item = FieldValidationError>) -> Self {
        let mut map = Self::new();
        for error in errors {
            map.entries
                .entry(error.field)
                .or_insert(FieldError {
                    message: error.message,
                });
        }
        map
    }

    pub fn insert(&mut self, field: impl Into<FieldName>, message: impl Into<String>) {
        self.entries.insert(
            field.into(),
            FieldError {
                message: message.into(),
            },
        );
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.entries.get(field)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(|error| error.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorMap;
    use crate::error::FieldValidationError;

    #[test]
    fn first_error_per_field_wins() {
        let map = ErrorMap::from_errors(vec![
            FieldValidationError::new("name", "required"),
            FieldValidationError::new("name", "too short"),
            FieldValidationError::new("age", "not a number"),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.message("name"), Some("required"));
        assert_eq!(map.message("age"), Some("not a number"));
    }

    #[test]
    fn serializes_like_a_message_object() {
        let mut map = ErrorMap::new();
        map.insert("textField", "Fullname is required");
        let json = serde_json::to_string(&map).expect("serialize");
        assert_eq!(json, r#"{"textField":{"message":"Fullname is required"}}"#);
    }
}
