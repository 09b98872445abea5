use crate::core::form_state::FormState;
use crate::core::value::Value;
use tracing::debug;

/// Two-way binding between one named field and the form state.
///
/// The binder borrows the state mutably for as long as it lives, so a widget
/// can only ever reach the field it was bound to.
pub struct FieldBinder<'a> {
    state: &'a mut FormState,
    name: &'a str,
}

impl<'a> FieldBinder<'a> {
    /// Binds `name`, initializing it to `default` on first use.
    pub fn bind(state: &'a mut FormState, name: &'a str, default: Value) -> Self {
        if state.register(name, default) {
            debug!(field = name, "registered field");
        }
        Self { state, name }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn value(&self) -> &Value {
        static NONE: Value = Value::None;
        self.state.get(self.name).unwrap_or(&NONE)
    }

    pub fn on_change(&mut self, value: impl Into<Value>) {
        let value = value.into();
        debug!(field = self.name, value = %value, "field changed");
        self.state.set(self.name, value);
    }

    pub fn on_blur(&mut self) {
        self.state.mark_touched(self.name);
    }

    pub fn is_touched(&self) -> bool {
        self.state.is_touched(self.name)
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_field_dirty(self.name)
    }
}
