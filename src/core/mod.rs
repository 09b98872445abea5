pub mod binder;
pub mod error_map;
pub mod form_event;
pub mod form_state;
pub mod value;

pub type FieldName = String;

pub use binder::FieldBinder;
pub use error_map::{ErrorMap, FieldError};
pub use form_event::FormEvent;
pub use form_state::{FormState, FormValues};
pub use value::Value;
