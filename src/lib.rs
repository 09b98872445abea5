pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod form;
pub mod terminal;
pub mod ui;
pub mod validation;
pub mod widgets;

pub use crate::config::FormConfig;
pub use crate::core::{ErrorMap, FieldBinder, FieldError, FormState, FormValues, Value};
pub use crate::error::{FieldValidationError, FormError, FormResult};
pub use crate::form::{FormContainer, FormStatus, SubmitOutcome};
pub use crate::validation::{FieldSchema, Resolver, Rule, Schema};
