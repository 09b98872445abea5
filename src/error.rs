use std::io;
use thiserror::Error;

/// A field rejected by the validation schema at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid form configuration: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("invalid pattern for field `{field}`: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid schema for field `{field}`: {reason}")]
    InvalidSchema { field: String, reason: String },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{0}` is registered twice")]
    DuplicateField(String),
}

pub type FormResult<T> = Result<T, FormError>;
