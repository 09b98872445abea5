pub mod base;
pub mod inputs;
pub mod traits;

pub use inputs::{
    CheckboxField, CheckboxFieldProps, SelectField, SelectFieldProps, SelectOption, TextField,
    TextFieldProps,
};
pub use traits::{DrawOutput, Drawable, FieldWidget, InteractionResult, Interactive, RenderContext};
