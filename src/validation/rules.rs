use crate::core::Value;
use crate::validation::{Rule, ValidationError};
use regex::Regex;

/// Rejects absent values and empty text. Whitespace counts as present.
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Required {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Rule for Required {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: String,
}

impl MinLength {
    pub fn new(min: usize, message: impl Into<String>) -> Self {
        Self {
            min,
            message: message.into(),
        }
    }
}

impl Rule for MinLength {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_text() {
            Some(text) if text.chars().count() < self.min => Err(self.message.clone()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaxLength {
    max: usize,
    message: String,
}

impl MaxLength {
    pub fn new(max: usize, message: impl Into<String>) -> Self {
        Self {
            max,
            message: message.into(),
        }
    }
}

impl Rule for MaxLength {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_text() {
            Some(text) if text.chars().count() > self.max => Err(self.message.clone()),
            _ => Ok(()),
        }
    }
}

/// Text must match the pattern. Empty text is left to [`Required`].
#[derive(Debug, Clone)]
pub struct Matches {
    pattern: Regex,
    message: String,
}

impl Matches {
    pub fn new(pattern: Regex, message: impl Into<String>) -> Self {
        Self {
            pattern,
            message: message.into(),
        }
    }
}

impl Rule for Matches {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_text() {
            Some(text) if !text.is_empty() && !self.pattern.is_match(text) => {
                Err(self.message.clone())
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MinNumber {
    min: i64,
    message: String,
}

impl MinNumber {
    pub fn new(min: i64, message: impl Into<String>) -> Self {
        Self {
            min,
            message: message.into(),
        }
    }
}

impl Rule for MinNumber {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_float() {
            Some(n) if n < self.min as f64 => Err(self.message.clone()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaxNumber {
    max: i64,
    message: String,
}

impl MaxNumber {
    pub fn new(max: i64, message: impl Into<String>) -> Self {
        Self {
            max,
            message: message.into(),
        }
    }
}

impl Rule for MaxNumber {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_float() {
            Some(n) if n > self.max as f64 => Err(self.message.clone()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OneOf {
    allowed: Vec<Value>,
    message: String,
}

impl OneOf {
    pub fn new(allowed: Vec<Value>, message: impl Into<String>) -> Self {
        Self {
            allowed,
            message: message.into(),
        }
    }
}

impl Rule for OneOf {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if self.allowed.contains(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}
