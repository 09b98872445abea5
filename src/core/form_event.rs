use crate::core::FieldName;
use crate::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    ValueChanged {
        name: FieldName,
        value: Value,
    },
    FocusChanged {
        from: Option<FieldName>,
        to: Option<FieldName>,
    },
    Blurred {
        name: FieldName,
    },
    SubmitRequested,
    Submitted {
        valid: bool,
    },
    ExitRequested,
}
