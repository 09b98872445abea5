use unicode_width::UnicodeWidthChar;

/// Char-indexed editing over a borrowed copy of a text field's value.
///
/// The cursor counts chars, never bytes, and is always clamped to the
/// text length before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        let text = text.into();
        let cursor = cursor.min(text.chars().count());
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Removes separators left of the cursor, then the word before them.
    pub fn delete_word_left(&mut self) -> bool {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.cursor;
        while start > 0 && is_separator(chars[start - 1]) {
            start -= 1;
        }
        while start > 0 && !is_separator(chars[start - 1]) {
            start -= 1;
        }
        if start == self.cursor {
            return false;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor);
        self.text.replace_range(from..to, "");
        self.cursor = start;
        true
    }

    /// Display column of the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor)
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@' | '_' | ':')
}

#[cfg(test)]
mod tests {
    use super::EditBuffer;

    #[test]
    fn insert_and_backspace_at_cursor() {
        let mut buf = EditBuffer::new("Ad", 2);
        buf.insert('a');
        assert_eq!(buf.text(), "Ada");
        buf.move_left();
        assert!(buf.backspace());
        assert_eq!(buf.text(), "Aa");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn cursor_is_clamped_on_construction() {
        let buf = EditBuffer::new("ab", 10);
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn multibyte_chars_edit_cleanly() {
        let mut buf = EditBuffer::new("héllo", 2);
        assert!(buf.backspace());
        assert_eq!(buf.text(), "hllo");
        assert!(buf.delete());
        assert_eq!(buf.text(), "hlo");
    }

    #[test]
    fn delete_word_left_skips_trailing_separators() {
        let mut buf = EditBuffer::new("Ada Lovelace ", 13);
        assert!(buf.delete_word_left());
        assert_eq!(buf.text(), "Ada ");
        assert_eq!(buf.cursor(), 4);
        assert!(!EditBuffer::new("", 0).delete_word_left());
    }

    #[test]
    fn cursor_column_uses_display_width() {
        let buf = EditBuffer::new("漢a", 2);
        assert_eq!(buf.cursor_column(), 3);
    }
}
