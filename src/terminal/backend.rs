use crate::ui::renderer::RenderFrame;
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveDown, MoveTo, MoveToColumn, MoveUp, Show, position};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers as CrosstermKeyModifiers,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    AltScreen,
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn is_ctrl(&self, ch: char) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL) && self.code == KeyCode::Char(ch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(TerminalSize),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub col: u16,
    pub row: u16,
}

pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    mode: RenderMode,
    last_frame: Vec<SpanLine>,
    inline_last_row: u16,
    inline_cursor_row: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            mode: RenderMode::default(),
            last_frame: Vec::new(),
            inline_last_row: 0,
            inline_cursor_row: 0,
        })
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn enter(&mut self) -> io::Result<()> {
        self.refresh_size()?;
        terminal::enable_raw_mode()?;
        match self.mode {
            RenderMode::AltScreen => execute!(self.stdout, EnterAlternateScreen, Hide),
            RenderMode::Inline => {
                let (_, row) = position()?;
                if row.saturating_add(1) >= self.size.height {
                    self.stdout.write_all(b"\r\n")?;
                }
                execute!(self.stdout, DisableLineWrap, Hide)
            }
        }
    }

    /// Leaves raw mode and prints the last frame so it survives on screen.
    pub fn exit(&mut self) -> io::Result<()> {
        match self.mode {
            RenderMode::AltScreen => {
                terminal::disable_raw_mode()?;
                execute!(self.stdout, LeaveAlternateScreen, EnableLineWrap, Show)?;
                let lines = std::mem::take(&mut self.last_frame);
                let width = self.size.width;
                for line in &lines {
                    self.write_span_line(line, width)?;
                    self.stdout.write_all(b"\r\n")?;
                }
            }
            RenderMode::Inline => {
                let below = self.inline_last_row.saturating_sub(self.inline_cursor_row);
                if below > 0 {
                    queue!(self.stdout, MoveDown(below))?;
                }
                execute!(self.stdout, EnableLineWrap, Show)?;
                terminal::disable_raw_mode()?;
                self.stdout.write_all(b"\r\n")?;
            }
        }
        self.stdout.flush()
    }

    pub fn render_frame(&mut self, frame: &RenderFrame) -> io::Result<()> {
        self.refresh_size()?;
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }
        self.last_frame.clone_from(&frame.lines);
        match self.mode {
            RenderMode::AltScreen => self.render_altscreen(frame),
            RenderMode::Inline => self.render_inline(frame),
        }
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(TerminalEvent::Key(map_key_event(key)))
            }
            CrosstermEvent::Resize(width, height) => {
                self.size = TerminalSize { width, height };
                Ok(TerminalEvent::Resize(self.size))
            }
            _ => Ok(TerminalEvent::Tick),
        }
    }

    fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.size = TerminalSize { width, height };
        Ok(())
    }

    fn render_altscreen(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let height = self.size.height as usize;
        let width = self.size.width;
        let skip = match frame.cursor {
            Some(cur) => (cur.row as usize).saturating_sub(height.saturating_sub(1)),
            None => frame.lines.len().saturating_sub(height),
        };

        queue!(self.stdout, BeginSynchronizedUpdate, MoveTo(0, 0), Clear(ClearType::All))?;
        for (row, line) in frame.lines.iter().skip(skip).take(height).enumerate() {
            queue!(self.stdout, MoveTo(0, row as u16))?;
            self.write_span_line(line, width)?;
        }
        match frame.cursor {
            Some(cur) if cur.row as usize >= skip => {
                let col = cur.col.min(width.saturating_sub(1));
                queue!(self.stdout, MoveTo(col, (cur.row as usize - skip) as u16), Show)?;
            }
            _ => queue!(self.stdout, Hide)?,
        }
        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn render_inline(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let width = self.size.width;
        let visible = frame.lines.len().min(self.size.height as usize);
        let skip = frame.lines.len() - visible;

        queue!(self.stdout, BeginSynchronizedUpdate, Hide)?;
        self.rewind_inline()?;
        queue!(self.stdout, Clear(ClearType::FromCursorDown))?;
        for (idx, line) in frame.lines.iter().skip(skip).enumerate() {
            if idx > 0 {
                queue!(self.stdout, Print("\r\n"))?;
            }
            self.write_span_line(line, width)?;
        }
        let last_row = visible.saturating_sub(1) as u16;
        self.inline_last_row = last_row;
        self.inline_cursor_row = last_row;

        if let Some(cur) = frame.cursor
            && cur.row as usize >= skip
        {
            let row = (cur.row as usize - skip) as u16;
            let up = last_row.saturating_sub(row);
            if up > 0 {
                queue!(self.stdout, MoveUp(up))?;
            }
            queue!(self.stdout, MoveToColumn(cur.col.min(width.saturating_sub(1))), Show)?;
            self.inline_cursor_row = row;
        }
        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn rewind_inline(&mut self) -> io::Result<()> {
        if self.inline_cursor_row > 0 {
            queue!(self.stdout, MoveUp(self.inline_cursor_row))?;
        }
        queue!(self.stdout, MoveToColumn(0))?;
        self.inline_cursor_row = 0;
        Ok(())
    }

    fn write_span_line(&mut self, line: &SpanLine, width: u16) -> io::Result<()> {
        let render_width = width.saturating_sub(1).max(1) as usize;
        let mut used = 0usize;
        for span in line {
            if used >= render_width {
                break;
            }
            let clipped = clip_to_width(&span.text, render_width - used);
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(self.stdout, Print(clipped.as_str()), ResetColor)?;
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
            used += clipped.chars().map(|ch| ch.width().unwrap_or(0)).sum::<usize>();
        }
        Ok(())
    }
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
        Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    [
        (CrosstermKeyModifiers::SHIFT, KeyModifiers::SHIFT),
        (CrosstermKeyModifiers::CONTROL, KeyModifiers::CONTROL),
        (CrosstermKeyModifiers::ALT, KeyModifiers::ALT),
    ]
    .into_iter()
    .filter(|(theirs, _)| modifiers.contains(*theirs))
    .fold(KeyModifiers::NONE, |acc, (_, ours)| KeyModifiers(acc.0 | ours.0))
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{KeyEvent, KeyModifiers, clip_to_width, map_key_modifiers};
    use crossterm::event::KeyModifiers as CrosstermKeyModifiers;

    #[test]
    fn clip_respects_wide_chars() {
        assert_eq!(clip_to_width("漢字abc", 3), "漢");
        assert_eq!(clip_to_width("abc\r\n", 10), "abc");
    }

    #[test]
    fn modifiers_map_to_local_bits() {
        let mapped =
            map_key_modifiers(CrosstermKeyModifiers::CONTROL | CrosstermKeyModifiers::SHIFT);
        assert!(mapped.contains(KeyModifiers::CONTROL));
        assert!(mapped.contains(KeyModifiers::SHIFT));
        assert!(!mapped.contains(KeyModifiers::ALT));
    }

    #[test]
    fn ctrl_helper_matches_only_control_chords() {
        assert!(KeyEvent::ctrl('s').is_ctrl('s'));
        assert!(!KeyEvent::new(super::KeyCode::Char('s')).is_ctrl('s'));
    }
}
