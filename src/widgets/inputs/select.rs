use crate::core::{FieldBinder, Value};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::{WidgetBase, helper_text};
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use serde::Deserialize;

/// One entry of a select's `options`: either a `{ label, value }` pair or a
/// bare primitive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    Labeled { label: String, value: Value },
    Plain(Value),
}

impl SelectOption {
    pub fn labeled(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Labeled {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn plain(value: impl Into<Value>) -> Self {
        Self::Plain(value.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectFieldProps {
    pub name: String,
    #[serde(default, alias = "defaultValue")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default, alias = "isArray")]
    pub is_array: bool,
}

impl SelectFieldProps {
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

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Options given as bare primitives, shown and stored as-is.
    pub fn array_options<V: Into<Value>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.options = values.into_iter().map(SelectOption::plain).collect();
        self.is_array = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub value: Value,
}

pub struct SelectField {
    base: WidgetBase,
    default_value: Value,
    items: Vec<MenuItem>,
}

impl SelectField {
    pub fn new(props: SelectFieldProps) -> Self {
        let items = menu_items(props.options, props.is_array);
        Self {
            base: WidgetBase::new(props.name, props.label),
            default_value: props.default_value.unwrap_or_else(|| Value::from("")),
            items,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    fn selected_index(&self, value: &Value) -> Option<usize> {
        self.items.iter().position(|item| &item.value == value)
    }

    fn step(&self, value: &Value, forward: bool) -> Option<&MenuItem> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let next = match (self.selected_index(value), forward) {
            (Some(current), true) => (current + 1) % len,
            (Some(current), false) => (current + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.items.get(next)
    }
}

fn menu_items(options: Vec<SelectOption>, is_array: bool) -> Vec<MenuItem> {
    options
        .into_iter()
        .map(|option| match (option, is_array) {
            (SelectOption::Labeled { label, value }, false) => MenuItem { label, value },
            (SelectOption::Labeled { value, .. }, true) | (SelectOption::Plain(value), _) => {
                MenuItem {
                    label: value.to_string(),
                    value,
                }
            }
        })
        .collect()
}

impl Drawable for SelectField {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let error = ctx.error_for(self.base.name());
        let selected = self.selected_index(ctx.value);

        let current = match selected.and_then(|idx| self.items.get(idx)) {
            Some(item) => Span::new(format!("‹ {} ›", item.label)),
            None => Span::styled("‹ none ›", Style::new().color(Color::DarkGrey)),
        };
        let mut lines = vec![vec![
            self.base.label_span(ctx.focused, error.is_some()),
            current,
        ]];

        for (idx, item) in self.items.iter().enumerate() {
            let line = if Some(idx) == selected {
                Span::styled(format!("    ● {}", item.label), Style::new().color(Color::Green))
            } else {
                Span::new(format!("    ○ {}", item.label))
            };
            lines.push(vec![line]);
        }

        lines.extend(helper_text(error));
        DrawOutput {
            lines,
            cursor: None,
        }
    }
}

impl Interactive for SelectField {
    fn default_value(&self) -> Value {
        self.default_value.clone()
    }

    fn on_key(&mut self, key: KeyEvent, field: &mut FieldBinder<'_>) -> InteractionResult {
        let forward = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => true,
            KeyCode::Left => false,
            KeyCode::Enter => return InteractionResult::submit(),
            _ => return InteractionResult::ignored(),
        };
        match self.step(field.value(), forward) {
            Some(item) => {
                let value = item.value.clone();
                InteractionResult::changed(field, value)
            }
            None => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectField, SelectFieldProps, SelectOption};
    use crate::core::{ErrorMap, FieldBinder, FormState, Value};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::line_text;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext};

    fn flavours() -> SelectFieldProps {
        SelectFieldProps::new("Selectfield").label("Flavour").options(vec![
            SelectOption::labeled("Chocolate", "chocolate"),
            SelectOption::labeled("Strawberry", "strawberry"),
            SelectOption::labeled("Vanilla", "vanilla"),
        ])
    }

    fn press(widget: &mut SelectField, state: &mut FormState, code: KeyCode) {
        let mut binder = FieldBinder::bind(state, "Selectfield", widget.default_value());
        widget.on_key(KeyEvent::new(code), &mut binder);
    }

    #[test]
    fn labeled_options_store_value_and_show_label() {
        let widget = SelectField::new(flavours());
        assert_eq!(widget.items()[1].label, "Strawberry");
        assert_eq!(widget.items()[1].value, Value::from("strawberry"));
    }

    #[test]
    fn array_options_use_element_for_both() {
        let widget = SelectField::new(SelectFieldProps::new("size").array_options(["S", "M"]));
        assert_eq!(widget.items()[0].label, "S");
        assert_eq!(widget.items()[0].value, Value::from("S"));
    }

    #[test]
    fn cycling_wraps_and_starts_from_nothing() {
        let mut widget = SelectField::new(flavours());
        let mut state = FormState::new();
        press(&mut widget, &mut state, KeyCode::Left);
        assert_eq!(state.get("Selectfield"), Some(&Value::from("vanilla")));
        press(&mut widget, &mut state, KeyCode::Right);
        assert_eq!(state.get("Selectfield"), Some(&Value::from("chocolate")));
    }

    #[test]
    fn empty_options_render_without_items() {
        let mut widget = SelectField::new(SelectFieldProps::new("empty").label("Nothing"));
        let errors = ErrorMap::new();
        let value = Value::from("");
        let out = widget.draw(&RenderContext {
            value: &value,
            focused: true,
            errors: &errors,
        });
        assert_eq!(out.lines.len(), 1);

        let mut state = FormState::new();
        let mut binder = FieldBinder::bind(&mut state, "empty", widget.default_value());
        let result = widget.on_key(KeyEvent::new(KeyCode::Right), &mut binder);
        assert!(!result.handled);
    }

    #[test]
    fn draws_one_item_per_option_plus_helper_text() {
        let widget = SelectField::new(flavours());
        let mut errors = ErrorMap::new();
        errors.insert("Selectfield", "Pick a flavour");
        let value = Value::from("strawberry");
        let out = widget.draw(&RenderContext {
            value: &value,
            focused: false,
            errors: &errors,
        });
        let text: Vec<String> = out.lines.iter().map(line_text).collect();
        assert_eq!(text.len(), 5);
        assert!(text[0].ends_with("‹ Strawberry ›"));
        assert!(text[2].contains("● Strawberry"));
        assert!(text[4].contains("Pick a flavour"));
    }

    #[test]
    fn props_accept_camel_case_aliases() {
        let props: SelectFieldProps = serde_yaml::from_str(
            "name: Selectfield\nisArray: true\noptions: [a, b]\ndefaultValue: b",
        )
        .expect("props");
        assert!(props.is_array);
        assert_eq!(props.default_value, Some(Value::from("b")));
        assert_eq!(props.options, vec![SelectOption::plain("a"), SelectOption::plain("b")]);
    }

    #[test]
    fn fractional_options_keep_their_value() {
        let props: SelectFieldProps =
            serde_yaml::from_str("name: scale\nisArray: true\noptions: [0.5, 1.5]\ndefaultValue: 1.5")
                .expect("props");
        let widget = SelectField::new(props);
        assert_eq!(widget.items()[1].label, "1.5");
        assert_eq!(widget.items()[1].value, Value::Float(1.5));
        assert_eq!(widget.default_value(), Value::Float(1.5));
    }

    #[test]
    fn props_reject_unknown_keys() {
        assert!(serde_yaml::from_str::<SelectFieldProps>("name: x\nmultiple: true").is_err());
    }
}
