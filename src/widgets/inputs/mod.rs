pub mod checkbox;
pub mod select;
pub mod text;
pub mod text_edit;

pub use checkbox::{CheckboxField, CheckboxFieldProps};
pub use select::{MenuItem, SelectField, SelectFieldProps, SelectOption};
pub use text::{TextField, TextFieldProps};
