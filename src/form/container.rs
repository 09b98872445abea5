use crate::core::{ErrorMap, FieldBinder, FormEvent, FormState, FormValues, Value};
use crate::error::{FormError, FormResult};
use crate::form::focus::{FocusRing, FocusTarget};
use crate::terminal::{KeyCode, KeyEvent};
use crate::validation::Resolver;
use crate::widgets::traits::{DrawOutput, FieldWidget, RenderContext, WidgetAction};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Validating,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Valid(FormValues),
    Invalid(ErrorMap),
}

impl SubmitOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

type SubmitHandler = Box<dyn FnMut(&FormValues)>;

/// Owns one form: its values, the error map of the last submit, the widgets
/// bound into it, and the resolver that decides whether it may submit.
pub struct FormContainer {
    title: String,
    submit_label: String,
    state: FormState,
    errors: ErrorMap,
    widgets: Vec<Box<dyn FieldWidget>>,
    resolver: Box<dyn Resolver>,
    on_submit: Option<SubmitHandler>,
    focus: FocusRing,
    status: FormStatus,
    submit_count: usize,
    last_outcome: Option<SubmitOutcome>,
}

impl FormContainer {
    pub fn new(resolver: impl Resolver + 'static) -> Self {
        Self {
            title: String::new(),
            submit_label: "SUBMIT!".to_string(),
            state: FormState::new(),
            errors: ErrorMap::new(),
            widgets: Vec::new(),
            resolver: Box::new(resolver),
            on_submit: None,
            focus: FocusRing::new(0),
            status: FormStatus::Idle,
            submit_count: 0,
            last_outcome: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn on_submit(mut self, handler: impl FnMut(&FormValues) + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn field(mut self, widget: impl FieldWidget + 'static) -> FormResult<Self> {
        self.add_field(Box::new(widget))?;
        Ok(self)
    }

    /// Registers the widget's field with its default and appends the widget.
    pub fn add_field(&mut self, mut widget: Box<dyn FieldWidget>) -> FormResult<()> {
        let name = widget.name().to_string();
        if self.widgets.iter().any(|existing| existing.name() == name) {
            return Err(FormError::DuplicateField(name));
        }

        let binder = FieldBinder::bind(&mut self.state, &name, widget.default_value());
        if self.widgets.is_empty() {
            widget.on_focus(binder.value());
        }

        self.widgets.push(widget);
        self.focus.set_field_count(self.widgets.len());
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn values(&self) -> &FormValues {
        self.state.values()
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.state.get(name)
    }

    /// Programmatic change, as if the field's widget had produced `value`.
    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) -> FormResult<()> {
        if !self.state.set(name, value.into()) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        Ok(())
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn touched_fields(&self) -> Vec<&str> {
        self.state.touched().collect()
    }

    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    pub fn is_submit_successful(&self) -> bool {
        self.last_outcome
            .as_ref()
            .is_some_and(SubmitOutcome::is_valid)
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn field_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus.current()
    }

    pub fn focused_name(&self) -> Option<&str> {
        match self.focus.current() {
            FocusTarget::Field(idx) => self.widgets.get(idx).map(|widget| widget.name()),
            FocusTarget::Submit => None,
        }
    }

    /// Draws every field in order, each against its own value and the
    /// shared error map.
    pub fn draw_fields(&self) -> Vec<DrawOutput> {
        let focus = self.focus.current();
        self.widgets
            .iter()
            .enumerate()
            .map(|(idx, widget)| {
                let absent = Value::None;
                let value = self.state.get(widget.name()).unwrap_or(&absent);
                widget.draw(&RenderContext {
                    value,
                    focused: focus == FocusTarget::Field(idx),
                    errors: &self.errors,
                })
            })
            .collect()
    }

    /// Validates the current values and either hands them to the submit
    /// handler or replaces the error map with the rejections.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.transition(FormStatus::Validating);
        let values = self.state.snapshot();

        let outcome = match self.resolver.resolve(&values) {
            Ok(()) => {
                self.errors.clear();
                self.transition(FormStatus::Valid);
                info!(fields = values.len(), "form submitted");
                if let Some(handler) = self.on_submit.as_mut() {
                    handler(&values);
                }
                SubmitOutcome::Valid(values)
            }
            Err(errors) => {
                info!(errors = errors.len(), "form rejected");
                self.errors = errors.clone();
                self.transition(FormStatus::Invalid);
                SubmitOutcome::Invalid(errors)
            }
        };

        self.submit_count += 1;
        self.last_outcome = Some(outcome.clone());
        self.transition(FormStatus::Idle);
        outcome
    }

    /// Restores defaults and forgets errors, touches, and submit history.
    pub fn reset(&mut self) {
        self.state.reset();
        self.errors.clear();
        self.submit_count = 0;
        self.last_outcome = None;
        self.status = FormStatus::Idle;
        if let FocusTarget::Field(idx) = self.focus.first()
            && let Some(widget) = self.widgets.get_mut(idx)
        {
            let value = self.state.get(widget.name()).cloned().unwrap_or_default();
            widget.on_focus(&value);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<FormEvent> {
        if key.code == KeyCode::Esc || key.is_ctrl('c') {
            return vec![FormEvent::ExitRequested];
        }
        if key.is_ctrl('s') {
            return self.submit_events();
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => return self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => return self.move_focus(-1),
            _ => {}
        }

        let idx = match self.focus.current() {
            FocusTarget::Submit => {
                return match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') => self.submit_events(),
                    _ => Vec::new(),
                };
            }
            FocusTarget::Field(idx) => idx,
        };

        let Some(widget) = self.widgets.get_mut(idx) else {
            return Vec::new();
        };
        let name = widget.name().to_string();
        let mut binder = FieldBinder::bind(&mut self.state, &name, widget.default_value());
        let result = widget.on_key(key, &mut binder);

        let mut events = Vec::new();
        let mut submit = false;
        for action in result.actions {
            match action {
                WidgetAction::ValueChanged(value) => events.push(FormEvent::ValueChanged {
                    name: name.clone(),
                    value,
                }),
                WidgetAction::SubmitRequested => submit = true,
            }
        }
        if submit {
            events.extend(self.submit_events());
        }
        events
    }

    fn submit_events(&mut self) -> Vec<FormEvent> {
        let outcome = self.submit();
        vec![
            FormEvent::SubmitRequested,
            FormEvent::Submitted {
                valid: outcome.is_valid(),
            },
        ]
    }

    fn move_focus(&mut self, direction: isize) -> Vec<FormEvent> {
        let mut events = Vec::new();
        let from = self.focused_name().map(str::to_string);

        if let Some(name) = &from {
            self.state.mark_touched(name);
            events.push(FormEvent::Blurred { name: name.clone() });
        }

        if let FocusTarget::Field(idx) = self.focus.shift(direction)
            && let Some(widget) = self.widgets.get_mut(idx)
        {
            let value = self.state.get(widget.name()).cloned().unwrap_or_default();
            widget.on_focus(&value);
        }

        let to = self.focused_name().map(str::to_string);
        if from != to {
            events.push(FormEvent::FocusChanged { from, to });
        }
        events
    }

    fn transition(&mut self, next: FormStatus) {
        debug!(from = ?self.status, to = ?next, "form status");
        self.status = next;
    }
}
