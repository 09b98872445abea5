use super::text_edit::EditBuffer;
use crate::core::{FieldBinder, Value};
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextFieldProps {
    pub name: String,
    #[serde(default, alias = "defaultValue")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl TextFieldProps {
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

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Single-line text input. An error only turns the label red; the message
/// itself is left to the surrounding form.
pub struct TextField {
    base: WidgetBase,
    default_value: String,
    placeholder: Option<String>,
    cursor: usize,
}

impl TextField {
    pub fn new(props: TextFieldProps) -> Self {
        Self {
            base: WidgetBase::new(props.name, props.label),
            default_value: props.default_value.unwrap_or_default(),
            placeholder: props.placeholder,
            cursor: 0,
        }
    }

    fn buffer(&self, value: &Value) -> EditBuffer {
        EditBuffer::new(value.to_text_scalar().unwrap_or_default(), self.cursor)
    }
}

impl Drawable for TextField {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let invalid = ctx.error_for(self.base.name()).is_some();
        let buffer = self.buffer(ctx.value);

        let mut line = vec![self.base.label_span(ctx.focused, invalid)];
        match &self.placeholder {
            Some(placeholder) if buffer.is_empty() => {
                line.push(Span::styled(
                    placeholder.clone(),
                    Style::new().color(Color::DarkGrey),
                ));
            }
            _ => line.push(Span::new(buffer.text())),
        }

        let cursor = ctx.focused.then(|| CursorPos {
            col: self.base.label_width() + buffer.cursor_column() as u16,
            row: 0,
        });

        DrawOutput {
            lines: vec![line],
            cursor,
        }
    }
}

impl Interactive for TextField {
    fn default_value(&self) -> Value {
        Value::Text(self.default_value.clone())
    }

    fn on_key(&mut self, key: KeyEvent, field: &mut FieldBinder<'_>) -> InteractionResult {
        let mut buffer = self.buffer(field.value());
        let edited = match key.code {
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.delete_word_left()
            }
            KeyCode::Char(_)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT) =>
            {
                return InteractionResult::ignored();
            }
            KeyCode::Char(ch) => {
                buffer.insert(ch);
                true
            }
            KeyCode::Backspace => buffer.backspace(),
            KeyCode::Delete => buffer.delete(),
            KeyCode::Left => {
                let moved = buffer.move_left();
                self.cursor = buffer.cursor();
                return moved_result(moved);
            }
            KeyCode::Right => {
                let moved = buffer.move_right();
                self.cursor = buffer.cursor();
                return moved_result(moved);
            }
            KeyCode::Home => {
                buffer.home();
                self.cursor = buffer.cursor();
                return InteractionResult::handled();
            }
            KeyCode::End => {
                buffer.end();
                self.cursor = buffer.cursor();
                return InteractionResult::handled();
            }
            KeyCode::Enter => return InteractionResult::submit(),
            _ => return InteractionResult::ignored(),
        };

        if !edited {
            return InteractionResult::ignored();
        }
        self.cursor = buffer.cursor();
        InteractionResult::changed(field, Value::Text(buffer.into_text()))
    }

    fn on_focus(&mut self, value: &Value) {
        self.cursor = value.to_text_scalar().map_or(0, |text| text.chars().count());
    }
}

fn moved_result(moved: bool) -> InteractionResult {
    if moved {
        InteractionResult::handled()
    } else {
        InteractionResult::ignored()
    }
}
