use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Reset,
    Black,
    DarkGrey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rgb(u8, u8, u8),
}

/// Presentation applied to a span. Deserializable so widget props can
/// carry it (`style: { color: cyan, bold: true }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    pub color: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Fills unset attributes from `base`.
    pub fn or(self, base: Style) -> Self {
        Self {
            color: self.color.or(base.color),
            background: self.background.or(base.background),
            bold: self.bold || base.bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Style};

    #[test]
    fn deserializes_partial_style() {
        let style: Style = serde_yaml::from_str("color: cyan\nbold: true").expect("style");
        assert_eq!(style, Style::new().color(Color::Cyan).bold());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(serde_yaml::from_str::<Style>("colour: red").is_err());
    }

    #[test]
    fn or_keeps_own_attributes() {
        let merged = Style::new()
            .color(Color::Red)
            .or(Style::new().color(Color::Green).background(Color::Black));
        assert_eq!(merged.color, Some(Color::Red));
        assert_eq!(merged.background, Some(Color::Black));
    }
}
