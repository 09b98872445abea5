use crate::core::{ErrorMap, FieldBinder, FieldError, Value};
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::SpanLine;

/// What a widget needs to draw itself: the bound value, focus, and the
/// error map from the last submit.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub value: &'a Value,
    pub focused: bool,
    pub errors: &'a ErrorMap,
}

impl<'a> RenderContext<'a> {
    pub fn error_for(&self, name: &str) -> Option<&'a FieldError> {
        self.errors.get(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    /// Cursor relative to the first line, when the widget shows one.
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    ValueChanged(Value),
    SubmitRequested,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            actions: vec![action],
        }
    }

    /// Writes `value` through the binder and reports the change.
    pub fn changed(field: &mut FieldBinder<'_>, value: Value) -> Self {
        field.on_change(value.clone());
        Self::with_action(WidgetAction::ValueChanged(value))
    }

    pub fn submit() -> Self {
        Self::with_action(WidgetAction::SubmitRequested)
    }
}

pub trait Drawable {
    fn name(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput;
}

pub trait Interactive {
    /// Value the field is registered with on first bind.
    fn default_value(&self) -> Value;

    fn on_key(&mut self, key: KeyEvent, field: &mut FieldBinder<'_>) -> InteractionResult;

    fn on_focus(&mut self, _value: &Value) {}
}

pub trait FieldWidget: Drawable + Interactive {}
impl<T> FieldWidget for T where T: Drawable + Interactive {}
