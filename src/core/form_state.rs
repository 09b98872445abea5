use crate::core::FieldName;
use crate::core::value::Value;
use indexmap::{IndexMap, IndexSet};

/// Snapshot of every field value, in registration order.
pub type FormValues = IndexMap<FieldName, Value>;

/// Field values for one mounted form.
///
/// Owned by exactly one [`FormContainer`](crate::form::FormContainer) and
/// handed to widgets only through a [`FieldBinder`](crate::core::binder::FieldBinder).
#[derive(Debug, Default, Clone)]
pub struct FormState {
    values: FormValues,
    defaults: FormValues,
    touched: IndexSet<FieldName>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with `default` unless it is already present.
    ///
    /// Returns `true` when the field was newly registered.
    pub fn register(&mut self, name: &str, default: Value) -> bool {
        if self.values.contains_key(name) {
            return false;
        }
        self.defaults.insert(name.to_string(), default.clone());
        self.values.insert(name.to_string(), default);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn default_of(&self, name: &str) -> Option<&Value> {
        self.defaults.get(name)
    }

    /// Writes `value` for a registered field. Unknown names are left alone.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn mark_touched(&mut self, name: &str) {
        if self.values.contains_key(name) {
            self.touched.insert(name.to_string());
        }
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn touched(&self) -> impl Iterator<Item = &str> {
        self.touched.iter().map(String::as_str)
    }

    pub fn is_field_dirty(&self, name: &str) -> bool {
        match (self.values.get(name), self.defaults.get(name)) {
            (Some(current), Some(default)) => current != default,
            _ => false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.values
            .keys()
            .any(|name| self.is_field_dirty(name.as_str()))
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn snapshot(&self) -> FormValues {
        self.values.clone()
    }

    /// Restores every field to its registered default and forgets touches.
    pub fn reset(&mut self) {
        self.values.clone_from(&self.defaults);
        self.touched.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::FormState;
    use crate::core::value::Value;

    #[test]
    fn register_keeps_first_default() {
        let mut state = FormState::new();
        assert!(state.register("name", Value::from("a")));
        assert!(!state.register("name", Value::from("b")));
        assert_eq!(state.get("name"), Some(&Value::from("a")));
        assert_eq!(state.default_of("name"), Some(&Value::from("a")));
    }

    #[test]
    fn set_ignores_unregistered_fields() {
        let mut state = FormState::new();
        assert!(!state.set("ghost", Value::Bool(true)));
        assert!(state.is_empty());
    }

    #[test]
    fn reset_restores_defaults_and_clears_touched() {
        let mut state = FormState::new();
        state.register("flag", Value::Bool(false));
        state.set("flag", Value::Bool(true));
        state.mark_touched("flag");
        assert!(state.is_dirty());

        state.reset();
        assert_eq!(state.get("flag"), Some(&Value::Bool(false)));
        assert!(!state.is_touched("flag"));
        assert!(!state.is_dirty());
    }

    #[test]
    fn values_keep_registration_order() {
        let mut state = FormState::new();
        state.register("b", Value::None);
        state.register("a", Value::None);
        let names: Vec<&str> = state.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
