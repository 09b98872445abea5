use crate::core::{FieldBinder, Value};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::{WidgetBase, helper_text};
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckboxFieldProps {
    pub name: String,
    #[serde(default, alias = "defaultValue")]
    pub default_value: Option<bool>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub style: Style,
}

impl CheckboxFieldProps {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn default_value(mut self, checked: bool) -> Self {
        self.default_value = Some(checked);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

pub struct CheckboxField {
    base: WidgetBase,
    default_value: bool,
    style: Style,
}

impl CheckboxField {
    pub fn new(props: CheckboxFieldProps) -> Self {
        Self {
            base: WidgetBase::new(props.name, props.label),
            default_value: props.default_value.unwrap_or(false),
            style: props.style,
        }
    }

    fn is_checked(value: &Value) -> bool {
        value.to_bool().unwrap_or(false)
    }
}

impl Drawable for CheckboxField {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let error = ctx.error_for(self.base.name());
        let checked = Self::is_checked(ctx.value);

        let (symbol, state_style) = if checked {
            ("[x]", Style::new().color(Color::Green))
        } else {
            ("[ ]", Style::new().color(Color::DarkGrey))
        };
        let label_style = match (error.is_some(), ctx.focused) {
            (true, _) => Style::new().color(Color::Red),
            (false, true) => Style::new().color(Color::Cyan),
            (false, false) => Style::default(),
        };

        let mut lines = vec![vec![
            Span::new(format!("{} ", self.base.focus_marker(ctx.focused))),
            Span::styled(symbol, self.style.or(state_style)),
            Span::styled(format!(" {}", self.base.label()), label_style),
        ]];
        lines.extend(helper_text(error));

        DrawOutput {
            lines,
            cursor: None,
        }
    }
}

impl Interactive for CheckboxField {
    fn default_value(&self) -> Value {
        Value::Bool(self.default_value)
    }

    fn on_key(&mut self, key: KeyEvent, field: &mut FieldBinder<'_>) -> InteractionResult {
        match key.code {
            KeyCode::Char(' ') => {
                let toggled = !Self::is_checked(field.value());
                InteractionResult::changed(field, Value::Bool(toggled))
            }
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckboxField, CheckboxFieldProps};
    use crate::core::{ErrorMap, FieldBinder, FormState, Value};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::line_text;
    use crate::ui::style::{Color, Style};
    use crate::widgets::traits::{Drawable, Interactive, RenderContext};

    fn toggle(widget: &mut CheckboxField, state: &mut FormState) {
        let mut binder = FieldBinder::bind(state, "Checkboxfield", widget.default_value());
        widget.on_key(KeyEvent::new(KeyCode::Char(' ')), &mut binder);
    }

    #[test]
    fn two_toggles_restore_value() {
        let mut widget = CheckboxField::new(CheckboxFieldProps::new("Checkboxfield").label("hero"));
        let mut state = FormState::new();
        toggle(&mut widget, &mut state);
        assert_eq!(state.get("Checkboxfield"), Some(&Value::Bool(true)));
        toggle(&mut widget, &mut state);
        assert_eq!(state.get("Checkboxfield"), Some(&Value::Bool(false)));
    }

    #[test]
    fn style_prop_colours_the_box() {
        let widget = CheckboxField::new(
            CheckboxFieldProps::new("c")
                .label("hero")
                .style(Style::new().color(Color::Magenta)),
        );
        let errors = ErrorMap::new();
        let value = Value::Bool(true);
        let out = widget.draw(&RenderContext {
            value: &value,
            focused: false,
            errors: &errors,
        });
        assert_eq!(out.lines[0][1].style.color, Some(Color::Magenta));
        assert_eq!(line_text(&out.lines[0]), "  [x] hero");
    }

    #[test]
    fn error_message_shown_as_helper_text() {
        let widget = CheckboxField::new(CheckboxFieldProps::new("c").label("hero"));
        let mut errors = ErrorMap::new();
        errors.insert("c", "You must be a hero");
        let value = Value::Bool(false);
        let out = widget.draw(&RenderContext {
            value: &value,
            focused: true,
            errors: &errors,
        });
        assert_eq!(out.lines.len(), 2);
        assert!(line_text(&out.lines[1]).contains("You must be a hero"));
    }
}
