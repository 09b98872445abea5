use crate::form::{FocusTarget, FormContainer, SubmitOutcome};
use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

const HINT: &str = "tab/↑↓ move · ←→ choose · space toggle · enter/ctrl+s submit · esc quit";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

pub struct Renderer;

impl Renderer {
    pub fn render(form: &FormContainer) -> RenderFrame {
        let mut frame = RenderFrame::default();

        if !form.title().is_empty() {
            frame.lines.push(vec![Span::styled(
                form.title(),
                Style::new().color(Color::Cyan).bold(),
            )]);
            frame.lines.push(Vec::new());
        }

        for out in form.draw_fields() {
            let row_offset = frame.lines.len() as u16;
            if let Some(local) = out.cursor {
                frame.cursor = Some(CursorPos {
                    col: local.col,
                    row: row_offset.saturating_add(local.row),
                });
            }
            frame.lines.extend(out.lines);
        }

        frame.lines.push(Vec::new());
        frame.lines.push(submit_button(form));

        if let Some(status) = status_line(form.last_outcome()) {
            frame.lines.push(status);
        }
        frame.lines.push(vec![Span::styled(
            HINT,
            Style::new().color(Color::DarkGrey),
        )]);
        frame
    }
}

fn submit_button(form: &FormContainer) -> SpanLine {
    let focused = form.focus() == FocusTarget::Submit;
    let style = if focused {
        Style::new().color(Color::Cyan).bold()
    } else {
        Style::default()
    };
    let marker = if focused { ">" } else { " " };
    vec![
        Span::new(format!("{marker} ")),
        Span::styled(format!("[ {} ]", form.submit_label()), style),
    ]
}

fn status_line(outcome: Option<&SubmitOutcome>) -> Option<SpanLine> {
    let line = match outcome? {
        SubmitOutcome::Valid(values) => {
            let json = serde_json::to_string(values).unwrap_or_default();
            vec![Span::styled(
                format!("✓ submitted {json}"),
                Style::new().color(Color::Green),
            )]
        }
        SubmitOutcome::Invalid(errors) => vec![Span::styled(
            format!("✗ {} field(s) need attention", errors.len()),
            Style::new().color(Color::Red),
        )],
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::Renderer;
    use crate::form::FormContainer;
    use crate::ui::span::line_text;
    use crate::validation::{FieldSchema, Schema};
    use crate::widgets::{TextField, TextFieldProps};

    fn form() -> FormContainer {
        let schema = Schema::new().field("name", FieldSchema::string().required("Name is required"));
        FormContainer::new(schema)
            .with_title("Profile")
            .field(TextField::new(TextFieldProps::new("name").label("Name")))
            .expect("form")
    }

    #[test]
    fn cursor_follows_focused_text_field() {
        let frame = Renderer::render(&form());
        let cursor = frame.cursor.expect("cursor");
        assert_eq!(cursor.row, 2);
        assert_eq!(cursor.col, "> Name: ".len() as u16);
    }

    #[test]
    fn status_line_appears_after_submit() {
        let mut form = form();
        form.submit();
        let text: Vec<String> = Renderer::render(&form).lines.iter().map(line_text).collect();
        assert!(text.iter().any(|line| line.contains("1 field(s) need attention")));
        assert!(!text.iter().any(|line| line.contains("Name is required")));
    }
}
