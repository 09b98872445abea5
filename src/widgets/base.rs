use crate::core::FieldError;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct WidgetBase {
    name: String,
    label: String,
}

impl WidgetBase {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn focus_marker(&self, focused: bool) -> &'static str {
        if focused { ">" } else { " " }
    }

    /// `"> Label: "` in the label colour, red when `invalid`.
    pub fn label_span(&self, focused: bool, invalid: bool) -> Span {
        let style = if invalid {
            Style::new().color(Color::Red)
        } else if focused {
            Style::new().color(Color::Cyan)
        } else {
            Style::default()
        };
        let text = if self.label.is_empty() {
            format!("{} ", self.focus_marker(focused))
        } else {
            format!("{} {}: ", self.focus_marker(focused), self.label)
        };
        Span::styled(text, style)
    }

    /// Width of the label prefix, used to place the cursor.
    pub fn label_width(&self) -> u16 {
        let label = if self.label.is_empty() {
            String::from("> ")
        } else {
            format!("> {}: ", self.label)
        };
        Span::new(label).width() as u16
    }
}

pub fn helper_text(error: Option<&FieldError>) -> Option<SpanLine> {
    error.map(|error| {
        vec![Span::styled(
            format!("    {}", error.message),
            Style::new().color(Color::Red),
        )]
    })
}
